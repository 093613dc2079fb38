//! CLI for `mealplanr-openapi`.
//!
//! Standalone binary — no `cargo xtask`, no workspace coupling.
//!
//! # Subcommands
//!
//! ```text
//! # Build the Swagger document from a route manifest
//! mealplanr-openapi generate --manifest api/routes.yaml --output api/swagger.yaml
//!
//! # Validate a manifest without writing anything
//! mealplanr-openapi check --manifest api/routes.yaml
//! ```

#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use mealplanr_openapi::{build, ApiDocument, RouteManifest};

/// Swagger document generator for the mealplanr CRUD API.
#[derive(Parser)]
#[command(name = "mealplanr-openapi", version, about)]
enum Cli {
    /// Build the Swagger document from a route manifest.
    Generate(GenerateArgs),

    /// Build every route of a manifest and report failures without writing
    /// any output.
    Check(CheckArgs),
}

#[derive(Parser)]
struct GenerateArgs {
    /// Path to the route manifest YAML.
    #[arg(short, long)]
    manifest: PathBuf,

    /// Path to the output Swagger YAML file. Defaults to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Parser)]
struct CheckArgs {
    /// Path to the route manifest YAML.
    #[arg(short, long)]
    manifest: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli {
        Cli::Generate(args) => run_generate(&args),
        Cli::Check(args) => run_check(&args),
    }
}

fn run_generate(args: &GenerateArgs) -> anyhow::Result<()> {
    let manifest = load_manifest(&args.manifest)?;

    let document =
        ApiDocument::from_manifest(&manifest).context("Failed to build the Swagger document")?;
    let yaml = document.to_yaml().context("Failed to serialize document")?;

    match &args.output {
        Some(path) => {
            fs::write(path, &yaml)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "Swagger document ready: {} ({} paths, {} routes)",
                path.display(),
                document.paths.len(),
                manifest.routes.len(),
            );
        }
        None => print!("{yaml}"),
    }

    Ok(())
}

fn run_check(args: &CheckArgs) -> anyhow::Result<()> {
    let manifest = load_manifest(&args.manifest)?;

    let mut failures = 0usize;
    for route in &manifest.routes {
        let result = route
            .endpoint_config(&manifest.models)
            .and_then(|config| build(&config));
        if let Err(error) = result {
            failures += 1;
            eprintln!("{} {}: {error}", route.method, route.path);
        }
    }

    if failures > 0 {
        bail!("{failures} of {} routes failed to build", manifest.routes.len());
    }
    eprintln!("All {} routes build cleanly", manifest.routes.len());
    Ok(())
}

fn load_manifest(path: &Path) -> anyhow::Result<RouteManifest> {
    RouteManifest::load(path)
        .with_context(|| format!("Failed to load manifest: {}", path.display()))
}
