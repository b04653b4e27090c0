//! Rendering of the generated router module.
//!
//! The output for a tree with one handler in `crate::api::users` looks like:
//!
//! ```text
//! // Code generated by routegen. DO NOT EDIT.
//!
//! //! Route table for `crate::api`.
//!
//! use web::Router;
//! use crate::api::users;
//!
//! /// Builds the router with every annotated handler registered.
//! pub fn router() -> Router {
//!     let mut router = Router::new();
//!     router.get("/users", users::list_users);
//!     router
//! }
//! ```

use crate::error::{GenError, Result};
use crate::registry::{HttpMethod, RouteRegistry};
use log::debug;
use std::fs;
use std::path::Path;

/// File name of the generated module, written into the scanned root directory.
pub const OUTPUT_FILE: &str = "router_gen.rs";

/// Banner marking the file as machine generated.
pub const BANNER: &str = "// Code generated by routegen. DO NOT EDIT.";

/// Router type used when none is configured.
pub const DEFAULT_ROUTER: &str = "web::Router";

/// Renders the generated module for `registry`.
///
/// `router_type` is the path of the router type, e.g. `web::Router`. Routes whose
/// method is empty or not one of GET, POST, DELETE, PUT, OPTIONS and HEAD are left
/// out without complaint.
pub fn render(registry: &RouteRegistry, router_type: &str) -> String {
    let router_name = router_type.rsplit("::").next().unwrap_or(router_type);
    let imports = registry.imports();

    let registrations: Vec<String> = registry
        .routes()
        .iter()
        .filter_map(|route| match HttpMethod::parse(&route.method) {
            Some(method) => Some(format!(
                "    router.{}({:?}, {});",
                method.router_fn(),
                route.path,
                registry.handler_ref(route, &imports)
            )),
            None => {
                debug!(
                    "Skipping {}::{}: unroutable method {:?}",
                    route.module_path, route.handler, route.method
                );
                None
            }
        })
        .collect();

    let mut lines = vec![
        BANNER.to_string(),
        String::new(),
        format!("//! Route table for `{}`.", registry.target()),
        String::new(),
    ];

    if router_type.contains("::") {
        lines.push(format!("use {};", router_type));
    }
    lines.extend(imports.iter().map(|import| match &import.alias {
        Some(alias) => format!("use {} as {};", import.path, alias),
        None => format!("use {};", import.path),
    }));
    lines.push(String::new());

    lines.push("/// Builds the router with every annotated handler registered.".to_string());
    lines.push(format!("pub fn router() -> {} {{", router_name));
    if registrations.is_empty() {
        lines.push(format!("    let router = {}::new();", router_name));
    } else {
        lines.push(format!("    let mut router = {}::new();", router_name));
        lines.extend(registrations);
    }
    lines.push("    router".to_string());
    lines.push("}".to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Writes the rendered module, replacing any previous file.
///
/// The content is rendered in full before the file is touched, so a failure while
/// building it leaves the old file in place.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing generated router to {}", path.display());

    fs::write(path, content).map_err(|e| GenError::io(path, e))?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
