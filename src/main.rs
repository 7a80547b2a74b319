//! postgen: write a Postman collection for a Web API.
//!
//! `postgen bin/Sample.Api.json -o out -e myhost` reads the route catalog,
//! looks for `bin/Sample.Api.xml` next to it and writes
//! `out/Sample.Api.postman.json`.

use anyhow::{Context, Result};
use clap::Parser;
use postgen::catalog::default_documentation_path;
use postgen::{GeneratorConfig, NoSamples, RouteCatalog, SampleMap, SampleProvider};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_ENVIRONMENT_KEY: &str = "url";
const DEFAULT_ROUTE_TEMPLATE: &str = "api/{controller}/{id}";
const OUTPUT_EXTENSION: &str = "postman.json";

#[derive(Parser)]
#[command(
    name = "postgen",
    about = "Generate a Postman collection from a Web API route catalog and its XML documentation"
)]
struct Cli {
    /// Route catalog (JSON) describing the API's operations
    catalog: PathBuf,

    /// XML documentation file. Defaults to the catalog path with an .xml extension.
    #[arg(short = 'd', long)]
    docs: Option<PathBuf>,

    /// Output directory
    #[arg(short = 'o', long, default_value = ".")]
    output: PathBuf,

    /// Postman environment variable holding the base URL
    #[arg(short = 'e', long, default_value = DEFAULT_ENVIRONMENT_KEY)]
    environment_key: String,

    /// Route template used for actions without an explicit path
    #[arg(short = 't', long, default_value = DEFAULT_ROUTE_TEMPLATE)]
    route_template: String,

    /// JSON object of request samples keyed by "METHOD path"
    #[arg(short = 's', long)]
    samples: Option<PathBuf>,

    /// Do not warn when the catalog yields no folders
    #[arg(long)]
    allow_empty: bool,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    info!(catalog = %cli.catalog.display(), "generating Postman collection");

    let catalog = RouteCatalog::load(&cli.catalog)?;
    debug!(
        routes = catalog.routes.len(),
        controllers = catalog.controller_count(),
        "loaded route catalog"
    );

    let docs_path = cli
        .docs
        .clone()
        .unwrap_or_else(|| default_documentation_path(&cli.catalog));
    let samples = load_samples(cli.samples.as_deref())?;
    let config = GeneratorConfig::new(cli.environment_key.as_str(), cli.route_template.as_str());

    let collection = postgen::assemble(&catalog, &docs_path, &*samples, &config)
        .with_context(|| format!("failed to generate collection for {}", cli.catalog.display()))?;

    if collection.folders.is_empty() && !cli.allow_empty {
        warn!("no API controllers found; the collection is empty");
    }

    let out_path = write_collection(&collection, &cli.output)?;
    info!(
        path = %out_path.display(),
        folders = collection.folders.len(),
        requests = collection.requests.len(),
        "Postman collection created"
    );

    Ok(())
}

/// Log to stderr so stdout stays free for other tooling.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_samples(path: Option<&Path>) -> Result<Box<dyn SampleProvider>> {
    match path {
        Some(path) => {
            let samples = SampleMap::load(path)?;
            debug!(count = samples.len(), path = %path.display(), "loaded request samples");
            Ok(Box::new(samples))
        }
        None => Ok(Box::new(NoSamples)),
    }
}

/// Write `<output>/<collection name>.postman.json`.
fn write_collection(collection: &postgen::Collection, output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    let out_path = output_dir.join(output_file_name(&collection.name));
    let json = serde_json::to_string_pretty(collection).context("failed to serialize collection")?;
    fs::write(&out_path, json).with_context(|| format!("failed to write {}", out_path.display()))?;

    Ok(out_path)
}

fn output_file_name(collection_name: &str) -> String {
    format!("{}.{}", collection_name, OUTPUT_EXTENSION)
}
