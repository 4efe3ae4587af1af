//! Library resolution – locate `<Library>.json` catalog documents.

use super::source::ContentSource;
use anyhow::Result;
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashSet;

/// Extension of catalog library documents.
pub const LIBRARY_EXTENSION: &str = "json";

/// Result for library resolution: which libraries were found (with path)
/// and which were not found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryLookupResult {
    pub found: Vec<(String, Utf8PathBuf)>,
    pub not_found: Vec<String>,
}

/// Resolver that searches for `LIBNAME.json` files in an ordered list of
/// directories (first match wins).
#[derive(Debug, Clone)]
pub struct LibraryResolver {
    search_paths: Vec<Utf8PathBuf>,
}

impl LibraryResolver {
    /// Create a resolver that will search the provided directories in order.
    pub fn new<P: AsRef<Utf8Path>>(paths: impl IntoIterator<Item = P>) -> Self {
        Self {
            search_paths: paths
                .into_iter()
                .map(|p| p.as_ref().to_path_buf())
                .collect(),
        }
    }

    /// Locate the given library names (e.g. `ProtoFlux.Core`) by looking for
    /// `ProtoFlux.Core.json` under the configured search paths. Duplicate
    /// and blank names are ignored.
    pub fn locate<'a, S, I>(&self, source: &mut S, libs: I) -> Result<LibraryLookupResult>
    where
        S: ContentSource,
        I: IntoIterator<Item = &'a str>,
    {
        let listings = self.listings(source)?;
        let mut found = Vec::new();
        let mut not_found = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for lib in libs {
            let lib = lib.trim();
            if lib.is_empty() || !seen.insert(lib.to_string()) {
                continue;
            }
            let file_name = format!("{}.{}", lib, LIBRARY_EXTENSION);
            let matched = listings
                .iter()
                .flatten()
                .find(|p| p.file_name() == Some(file_name.as_str()));
            match matched {
                Some(p) => found.push((lib.to_string(), p.clone())),
                None => not_found.push(lib.to_string()),
            }
        }
        Ok(LibraryLookupResult { found, not_found })
    }

    /// Every library document in the search paths. A library present in
    /// several directories is taken from the first one.
    pub fn discover<S: ContentSource>(&self, source: &mut S) -> Result<Vec<(String, Utf8PathBuf)>> {
        let mut out = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for path in self.listings(source)?.into_iter().flatten() {
            if path.extension() != Some(LIBRARY_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem() else {
                continue;
            };
            if seen.insert(stem.to_string()) {
                out.push((stem.to_string(), path));
            }
        }
        Ok(out)
    }

    fn listings<S: ContentSource>(&self, source: &mut S) -> Result<Vec<Vec<Utf8PathBuf>>> {
        self.search_paths
            .iter()
            .map(|dir| source.list_dir(dir))
            .collect()
    }
}
