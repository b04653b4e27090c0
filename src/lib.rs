//! routegen - router tables generated from annotated handler functions.
//!
//! Instead of registering every route by hand, handlers describe themselves in their
//! doc comments and `routegen` writes the registration code:
//!
//! ```ignore
//! /// Lists every user.
//! /// @METHOD: GET
//! /// @PATH: /users
//! pub fn list_users(ctx: &mut web::RequestCtx) { /* ... */ }
//! ```
//!
//! A function is picked up when it is `pub` (or `pub(crate)`), documented, free
//! standing, returns nothing and takes exactly one `&RequestCtx` / `&mut RequestCtx`.
//!
//! # Architecture
//!
//! 1. [`scanner`] - Recursively lists the `.rs` files under the root
//! 2. [`parser`] - Parses each file with `syn`
//! 3. [`filter`] - Decides which functions are handlers
//! 4. [`annotation`] - Reads `@METHOD:` / `@PATH:` directives
//! 5. [`module_path`] - Maps files to module paths
//! 6. [`registry`] - Accumulates routes and the modules to import
//! 7. [`emitter`] - Renders and writes `router_gen.rs`
//!
//! # Example Usage
//!
//! ```no_run
//! use routegen::{generate, config::GeneratorConfig};
//! use std::path::PathBuf;
//!
//! let config = GeneratorConfig::new(PathBuf::from("./src/api"))
//!     .with_crate_root(Some(PathBuf::from(".")));
//! let generation = generate(&config).unwrap();
//! generation.write().unwrap();
//! ```

pub mod annotation;
pub mod cli;
pub mod config;
pub mod emitter;
pub mod error;
pub mod filter;
pub mod module_path;
pub mod parser;
pub mod registry;
pub mod scanner;

use config::GeneratorConfig;
use error::{GenError, Result};
use filter::HandlerFilter;
use log::info;
use module_path::ModuleResolver;
use parser::AstParser;
use registry::{Route, RouteRegistry};
use scanner::FileScanner;
use std::path::PathBuf;

/// Outcome of a scan: the routes found and the rendered module.
#[derive(Debug, Clone)]
pub struct Generation {
    /// Number of source files scanned
    pub files_scanned: usize,
    /// Every handler found, routable or not
    pub registry: RouteRegistry,
    /// Rendered contents of the generated module
    pub content: String,
    /// Where [`Generation::write`] puts the module
    pub output_path: PathBuf,
}

impl Generation {
    pub fn routes(&self) -> &[Route] {
        self.registry.routes()
    }

    /// Overwrites the generated module on disk.
    pub fn write(&self) -> Result<()> {
        emitter::write_to_file(&self.content, &self.output_path)
    }

    /// Route records as pretty-printed JSON.
    pub fn routes_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self.routes())?)
    }
}

/// Scans `config.root` and renders the router module without writing it.
///
/// # Errors
///
/// Fails on the first directory that cannot be listed, file that cannot be read or
/// file that does not parse. Annotation problems never fail the run.
pub fn generate(config: &GeneratorConfig) -> Result<Generation> {
    if !config.root.is_dir() {
        return Err(GenError::InvalidArgument(format!(
            "root is not a directory: {}",
            config.root.display()
        )));
    }

    let resolver = ModuleResolver::new(config.crate_root.as_deref())?;
    let target = resolver.module_of_dir(&config.root)?;
    info!("Target module: {}", target);

    let files = FileScanner::new(config.root.clone()).scan()?;
    info!("Found {} Rust files", files.len());

    let parsed = AstParser::parse_files(&files)?;

    let filter = HandlerFilter::new(config.context_type.clone());
    let registry = RouteRegistry::collect(target, &parsed, &resolver, &filter)?;
    info!("Found {} handlers", registry.routes().len());

    let content = emitter::render(&registry, &config.router_type);

    Ok(Generation {
        files_scanned: files.len(),
        registry,
        content,
        output_path: config.output_path(),
    })
}
