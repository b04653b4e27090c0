use crate::config::{GeneratorConfig, CRATE_ROOT_ENV};
use crate::filter::ContextTypeMatcher;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::PathBuf;

/// routegen - Generate a router table from annotated handler functions
#[derive(clap::Parser, Debug)]
#[command(name = "routegen")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Directory holding the handlers; the generated module is written here
    #[arg(value_name = "ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Crate root used to derive module paths (defaults to $ROUTEGEN_CRATE_ROOT)
    #[arg(long = "crate-root", value_name = "DIR")]
    pub crate_root: Option<PathBuf>,

    /// Path of the router type the generated code constructs
    #[arg(long = "router", value_name = "PATH", default_value = crate::emitter::DEFAULT_ROUTER)]
    pub router_type: String,

    /// Only accept this fully qualified request-context type (repeatable)
    #[arg(long = "context-type", value_name = "PATH")]
    pub context_types: Vec<String>,

    /// Print the discovered routes as JSON instead of writing the module
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.root.is_dir() {
        anyhow::bail!("Root is not a directory: {}", args.root.display());
    }

    info!("Root: {}", args.root.display());
    info!("Router type: {}", args.router_type);
    if args.context_types.is_empty() {
        info!("Context type: any *::RequestCtx");
    } else {
        info!("Context types: {:?}", args.context_types);
    }

    Ok(args)
}

/// Turns arguments into a generator configuration, falling back to the environment
/// for the crate root.
pub fn build_config(args: &CliArgs) -> GeneratorConfig {
    let crate_root = args
        .crate_root
        .clone()
        .or_else(|| std::env::var_os(CRATE_ROOT_ENV).map(PathBuf::from));

    match &crate_root {
        Some(dir) => info!("Crate root: {}", dir.display()),
        None => warn!(
            "{} is not set and --crate-root was not given; module paths will contain the absolute path",
            CRATE_ROOT_ENV
        ),
    }

    GeneratorConfig::new(args.root.clone())
        .with_crate_root(crate_root)
        .with_router_type(args.router_type.clone())
        .with_context_type(ContextTypeMatcher::from_paths(&args.context_types))
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    let config = build_config(&args);

    let generation = crate::generate(&config)
        .with_context(|| format!("Failed to scan {}", config.root.display()))?;

    if args.list {
        let json = generation.routes_json().context("Failed to list routes")?;
        println!("{}", json);
        return Ok(());
    }

    generation
        .write()
        .with_context(|| format!("Failed to write {}", generation.output_path.display()))?;

    info!("Generation complete!");
    info!("Summary:");
    info!("  - Files scanned: {}", generation.files_scanned);
    info!("  - Handlers found: {}", generation.routes().len());
    info!("  - Output: {}", generation.output_path.display());

    Ok(())
}
