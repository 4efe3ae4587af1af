//! Engine type names as they appear in catalog documents.
//!
//! Catalogs spell types the way source code does (`Ns.ValueInput<Ns.float3>`),
//! while the rendered tables use the engine's runtime names: namespace
//! dropped and generic arity kept as a `` `N `` suffix (``ValueInput`1``).

use anyhow::{Result, anyhow, bail};

/// A parsed, possibly generic, type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName {
    pub namespace: Option<String>,
    pub name: String,
    pub args: Vec<TypeName>,
    /// Anything after the argument list, e.g. `[]`.
    pub suffix: String,
}

impl TypeName {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            bail!("Empty type name");
        }
        let (ty, rest) = parse_one(s)?;
        if !rest.trim().is_empty() {
            bail!("Unexpected '{}' after type name in {}", rest.trim(), s);
        }
        Ok(ty)
    }

    /// Runtime short name: ``List`1``, `Single`, `float3[]`.
    pub fn short_name(&self) -> String {
        if self.args.is_empty() || self.name.contains('`') {
            format!("{}{}", self.name, self.suffix)
        } else {
            format!("{}`{}{}", self.name, self.args.len(), self.suffix)
        }
    }

    /// Namespace-qualified runtime name: ``Ns.ValueAdd`1``.
    pub fn full_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}.{}", ns, self.short_name()),
            None => self.short_name(),
        }
    }

    /// Element type of a generic container, or the type itself when it is
    /// not generic: `ValueInput<float>` → `float`, `Call` → `Call`.
    pub fn unwrapped(&self) -> String {
        match self.args.first() {
            Some(inner) => inner.short_name(),
            None => self.short_name(),
        }
    }
}

fn parse_one(s: &str) -> Result<(TypeName, &str)> {
    let end = s.find([',', '<', '>']).unwrap_or(s.len());
    let head = s[..end].trim();
    if head.is_empty() {
        return Err(anyhow!("Missing type name in {}", s));
    }
    let mut rest = &s[end..];
    let mut args = Vec::new();
    if let Some(after) = rest.strip_prefix('<') {
        rest = after;
        loop {
            let (arg, after_arg) = parse_one(rest)?;
            args.push(arg);
            let after_arg = after_arg.trim_start();
            if let Some(r) = after_arg.strip_prefix(',') {
                rest = r;
            } else if let Some(r) = after_arg.strip_prefix('>') {
                rest = r;
                break;
            } else {
                bail!("Unclosed generic argument list in {}", s);
            }
        }
    }
    let suffix_end = rest.find([',', '<', '>']).unwrap_or(rest.len());
    let suffix = rest[..suffix_end].trim().to_string();
    rest = &rest[suffix_end..];

    let (namespace, name) = match head.rsplit_once('.') {
        Some((ns, name)) if !ns.is_empty() && !name.is_empty() => {
            (Some(ns.trim().to_string()), name.trim().to_string())
        }
        _ => (None, head.to_string()),
    };
    Ok((
        TypeName {
            namespace,
            name,
            args,
            suffix,
        },
        rest,
    ))
}

/// Strip a generic arity suffix: ``ValueAdd`1`` → `ValueAdd`.
pub fn strip_arity(name: &str) -> &str {
    name.split_once('`').map_or(name, |(base, _)| base)
}

/// Split a type identifier into words at lower→upper case boundaries:
/// `ValueAddMulti` → `Value Add Multi`.
pub fn beautify_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for ch in name.chars() {
        if ch.is_uppercase() && prev_lower {
            out.push(' ');
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name() {
        let t = TypeName::parse("System.Single").unwrap();
        assert_eq!(t.namespace.as_deref(), Some("System"));
        assert_eq!(t.short_name(), "Single");
        assert_eq!(t.unwrapped(), "Single");
    }

    #[test]
    fn test_nested_generics() {
        let t = TypeName::parse("Ns.ObjectInput<System.Collections.Generic.List<string>>").unwrap();
        assert_eq!(t.short_name(), "ObjectInput`1");
        assert_eq!(t.full_name(), "Ns.ObjectInput`1");
        assert_eq!(t.unwrapped(), "List`1");
    }

    #[test]
    fn test_multiple_args_and_suffix() {
        let t = TypeName::parse("Dictionary<string, int[]>").unwrap();
        assert_eq!(t.args.len(), 2);
        assert_eq!(t.args[1].short_name(), "int[]");
        assert_eq!(t.short_name(), "Dictionary`2");
    }

    #[test]
    fn test_runtime_arity_is_kept() {
        let t = TypeName::parse("Ns.ValueAdd`1").unwrap();
        assert_eq!(t.short_name(), "ValueAdd`1");
    }

    #[test]
    fn test_malformed() {
        assert!(TypeName::parse("List<int").is_err());
        assert!(TypeName::parse("").is_err());
        assert!(TypeName::parse("A>B").is_err());
    }

    #[test]
    fn test_beautify() {
        assert_eq!(beautify_name(strip_arity("ValueAdd`1")), "Value Add");
        assert_eq!(beautify_name("Float3ToXYZ"), "Float3 To XYZ");
    }
}
