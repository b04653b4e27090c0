//! Accumulation of route records across the whole source tree.

use crate::annotation;
use crate::error::Result;
use crate::filter::HandlerFilter;
use crate::module_path::{ModulePath, ModuleResolver};
use crate::parser::ParsedFile;
use log::{debug, warn};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// One annotated handler found in the source tree.
///
/// `method` and `path` are whatever the doc comment said, possibly empty. Records are
/// never deduplicated: two handlers claiming the same method and path are both kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Last segment of the module the handler lives in (`crate` for the crate root)
    pub module_name: String,
    /// Full module path of the handler, e.g. `crate::api::users`
    pub module_path: String,
    /// HTTP method as written in the `@METHOD:` directive
    pub method: String,
    /// Name of the handler function
    pub handler: String,
    /// URL path as written in the `@PATH:` directive
    pub path: String,
}

/// HTTP methods the generated router registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
    Put,
    Options,
    Head,
}

impl HttpMethod {
    /// Parses a directive value case-insensitively; anything else, `PATCH` included,
    /// is not routable.
    pub fn parse(method: &str) -> Option<Self> {
        match method.to_uppercase().as_str() {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            "DELETE" => Some(HttpMethod::Delete),
            "PUT" => Some(HttpMethod::Put),
            "OPTIONS" => Some(HttpMethod::Options),
            "HEAD" => Some(HttpMethod::Head),
            _ => None,
        }
    }

    /// Name of the router's registration method.
    pub fn router_fn(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Put => "put",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
        }
    }
}

/// Ordered collection of routes plus the module the generated file belongs to.
#[derive(Debug, Clone)]
pub struct RouteRegistry {
    target: ModulePath,
    routes: Vec<Route>,
}

impl RouteRegistry {
    pub fn new(target: ModulePath) -> Self {
        Self {
            target,
            routes: Vec::new(),
        }
    }

    /// Runs the scan pass over `files`, in order, keeping every function the filter
    /// accepts.
    ///
    /// Items of inline `mod name { .. }` blocks are visited with the nested module path.
    /// Functions inside function bodies, `impl` blocks and traits are never handlers.
    pub fn collect(
        target: ModulePath,
        files: &[ParsedFile],
        resolver: &ModuleResolver,
        filter: &HandlerFilter,
    ) -> Result<Self> {
        let mut registry = Self::new(target);

        for file in files {
            let module = resolver.module_of_file(&file.path)?;
            debug!("Scanning {} as {}", file.path.display(), module);
            registry.collect_items(&file.syntax_tree.items, &module, filter);
        }

        Ok(registry)
    }

    fn collect_items(&mut self, items: &[syn::Item], module: &ModulePath, filter: &HandlerFilter) {
        for item in items {
            match item {
                syn::Item::Fn(item_fn) if filter.is_handler(item_fn) => {
                    let annotation = annotation::extract(&item_fn.attrs);
                    self.push(Route {
                        module_name: module.name().to_string(),
                        module_path: module.to_string(),
                        method: annotation.method,
                        handler: item_fn.sig.ident.to_string(),
                        path: annotation.path,
                    });
                }
                syn::Item::Mod(item_mod) => {
                    if let Some((_, nested)) = &item_mod.content {
                        let child = module.child(&item_mod.ident.to_string());
                        self.collect_items(nested, &child, filter);
                    }
                }
                _ => {}
            }
        }
    }

    pub fn push(&mut self, route: Route) {
        debug!(
            "Found handler {}::{} ({:?} {:?})",
            route.module_path, route.handler, route.method, route.path
        );
        self.routes.push(route);
    }

    pub fn target(&self) -> &ModulePath {
        &self.target
    }

    /// Routes in discovery order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Distinct modules the generated file must import, sorted by path.
    ///
    /// The target module is reached through `super` and the crate root through
    /// `crate`, so neither is imported. Modules sharing a last segment are imported
    /// under an alias built from their whole path (`crate::a::users as a_users`).
    pub fn imports(&self) -> Vec<Import> {
        let target = self.target.to_string();
        let crate_root = ModulePath::crate_root().to_string();

        let paths: BTreeSet<&str> = self
            .routes
            .iter()
            .map(|route| route.module_path.as_str())
            .filter(|path| *path != target && *path != crate_root)
            .collect();

        let mut name_counts: HashMap<&str, usize> = HashMap::new();
        for path in paths.iter().copied() {
            *name_counts.entry(last_segment(path)).or_default() += 1;
        }

        paths
            .into_iter()
            .map(|path| {
                let alias = if name_counts[last_segment(path)] > 1 {
                    let alias = path
                        .strip_prefix("crate::")
                        .unwrap_or(path)
                        .replace("::", "_");
                    warn!(
                        "Module name {} is ambiguous; importing {} as {}",
                        last_segment(path),
                        path,
                        alias
                    );
                    Some(alias)
                } else {
                    None
                };
                Import {
                    path: path.to_string(),
                    alias,
                }
            })
            .collect()
    }

    /// How the generated module refers to `route`'s handler, given the `imports`
    /// it declares.
    pub fn handler_ref(&self, route: &Route, imports: &[Import]) -> String {
        if route.module_path == self.target.to_string() {
            return format!("super::{}", route.handler);
        }
        let qualifier = imports
            .iter()
            .find(|import| import.path == route.module_path)
            .map(Import::local_name)
            .unwrap_or(route.module_name.as_str());
        format!("{}::{}", qualifier, route.handler)
    }
}

/// A `use` line of the generated module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// Full module path, e.g. `crate::api::users`
    pub path: String,
    /// Name the module is bound to when its last segment clashes with another import
    pub alias: Option<String>,
}

impl Import {
    /// Name handlers of this module are qualified with.
    pub fn local_name(&self) -> &str {
        self.alias
            .as_deref()
            .unwrap_or_else(|| last_segment(&self.path))
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}
