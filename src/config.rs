use crate::emitter::{DEFAULT_ROUTER, OUTPUT_FILE};
use crate::filter::ContextTypeMatcher;
use std::path::PathBuf;

/// Environment variable naming the crate root whose `src/` directory anchors module paths.
pub const CRATE_ROOT_ENV: &str = "ROUTEGEN_CRATE_ROOT";

/// Everything the generator needs to know about one run.
///
/// The core never consults the working directory or the environment; callers fill
/// this in (the CLI does so from its flags and [`CRATE_ROOT_ENV`]).
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Directory to scan; the generated file is written here as well
    pub root: PathBuf,
    /// Crate root used to turn file paths into module paths
    pub crate_root: Option<PathBuf>,
    /// Path of the router type the generated code constructs
    pub router_type: String,
    /// How the handler parameter type is recognized
    pub context_type: ContextTypeMatcher,
}

impl GeneratorConfig {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            crate_root: None,
            router_type: DEFAULT_ROUTER.to_string(),
            context_type: ContextTypeMatcher::default(),
        }
    }

    pub fn with_crate_root(mut self, crate_root: Option<PathBuf>) -> Self {
        self.crate_root = crate_root;
        self
    }

    pub fn with_router_type(mut self, router_type: impl Into<String>) -> Self {
        self.router_type = router_type.into();
        self
    }

    pub fn with_context_type(mut self, context_type: ContextTypeMatcher) -> Self {
        self.context_type = context_type;
        self
    }

    /// Where the generated module ends up.
    pub fn output_path(&self) -> PathBuf {
        self.root.join(OUTPUT_FILE)
    }
}
