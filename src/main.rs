use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use nodedoc::catalog::{CatalogLoader, FsSource, JsonCatalog, ZipSource};
use nodedoc::config::{ExportConfig, MarkerPolicy};
use nodedoc::generator::{self, Palette};
use nodedoc::grouping;
use nodedoc::model::NodeDescriptor;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Export node catalogs to wiki tables and type colours", long_about = None)]
struct Cli {
    /// JSON config file; flags override its values
    #[arg(short, long, global = true, value_name = "CONFIG_FILE")]
    config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write one Markdown page per node category plus an index page
    Nodes {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Output directory (cleared first)
        #[arg(short, long)]
        out: Option<Utf8PathBuf>,

        /// Do not add a list-end row after dynamic lists
        #[arg(long)]
        no_list_ends: bool,
    },
    /// Print the deduplicated, categorized catalog as JSON
    Dump {
        #[command(flatten)]
        catalog: CatalogArgs,
    },
    /// Write the type-colour stylesheet
    Colors {
        /// Palette JSON file
        #[arg(short, long, value_name = "PALETTE_FILE")]
        palette: Utf8PathBuf,

        /// Stylesheet to write
        #[arg(short, long)]
        out: Option<Utf8PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
struct CatalogArgs {
    /// Directory or .zip bundle holding `<Library>.json` documents. Can be repeated.
    #[arg(long, required = true, value_name = "DIR_OR_ZIP")]
    catalog: Vec<Utf8PathBuf>,

    /// Library to load instead of the configured list. Can be repeated.
    #[arg(short = 'L', long = "lib")]
    lib: Vec<String>,
}

fn load_nodes(args: &CatalogArgs, config: &ExportConfig) -> Result<Vec<NodeDescriptor>> {
    let libraries = if args.lib.is_empty() {
        &config.libraries
    } else {
        &args.lib
    };
    match args.catalog.as_slice() {
        [bundle] if bundle.extension() == Some("zip") => {
            let file = std::fs::File::open(bundle).with_context(|| format!("Open {}", bundle))?;
            let source = ZipSource::new(std::io::BufReader::new(file))?;
            JsonCatalog::new(source, [Utf8Path::new("")], &config.root_category)
                .load(libraries)
                .with_context(|| format!("Failed to load catalog {}", bundle))
        }
        dirs if dirs.iter().any(|d| d.extension() == Some("zip")) => {
            bail!("A .zip bundle must be the only --catalog argument, got {:?}", dirs)
        }
        dirs => JsonCatalog::new(FsSource, dirs, &config.root_category)
            .load(libraries)
            .context("Failed to load catalog"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nodedoc=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => ExportConfig::from_file(path)?,
        None => ExportConfig::default(),
    };

    match cli.command {
        Command::Nodes {
            catalog,
            out,
            no_list_ends,
        } => {
            if let Some(out) = out {
                config.output_dir = out;
            }
            if no_list_ends {
                config.list_ends = MarkerPolicy::Omit;
            }
            let nodes = load_nodes(&catalog, &config)?;
            let groups = grouping::categorize(&nodes);
            info!(loaded = nodes.len(), categories = groups.len(), "catalog grouped");
            let summary = generator::export_markdown(&config, &groups)?;
            println!("Wrote {} category pages and {}", summary.pages.len(), summary.index);
        }
        Command::Dump { catalog } => {
            let nodes = load_nodes(&catalog, &config)?;
            let groups = grouping::categorize(&nodes);
            println!("{}", serde_json::to_string_pretty(&groups)?);
        }
        Command::Colors { palette, out } => {
            if let Some(out) = out {
                config.css_file = out;
            }
            let palette = Palette::from_file(&palette)?;
            generator::export_css(&config, &palette)?;
            println!("Wrote {}", config.css_file);
        }
    }
    Ok(())
}
