//! Signature-shape predicate deciding which functions are route handlers.
//!
//! A handler is a free, visible, documented function that takes exactly one
//! reference to the request context and returns nothing:
//!
//! ```ignore
//! /// @METHOD: GET
//! /// @PATH: /users
//! pub fn list_users(ctx: &mut web::RequestCtx) { /* ... */ }
//! ```

use crate::annotation;
use syn::{FnArg, ItemFn, ReturnType, Type, Visibility};

/// Name of the request-context type handlers take by reference.
pub const REQUEST_CTX: &str = "RequestCtx";

/// How the handler's single parameter type is recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextTypeMatcher {
    /// Only the trailing identifier is compared, so `a::RequestCtx` and
    /// `b::RequestCtx` both match even when `b` is an unrelated module.
    Loose(String),
    /// Full paths such as `web::RequestCtx`; the parameter must be spelled exactly
    /// as one of them.
    AllowList(Vec<String>),
}

impl Default for ContextTypeMatcher {
    fn default() -> Self {
        ContextTypeMatcher::Loose(REQUEST_CTX.to_string())
    }
}

impl ContextTypeMatcher {
    /// Builds a matcher from user-supplied qualified paths, falling back to the
    /// loose default when none are given.
    pub fn from_paths(paths: &[String]) -> Self {
        if paths.is_empty() {
            Self::default()
        } else {
            let normalized = paths
                .iter()
                .map(|p| p.split("::").map(str::trim).collect::<Vec<_>>().join("::"))
                .collect();
            ContextTypeMatcher::AllowList(normalized)
        }
    }

    fn matches(&self, type_path: &syn::TypePath) -> bool {
        if type_path.qself.is_some() {
            return false;
        }
        let segments = &type_path.path.segments;
        match self {
            ContextTypeMatcher::Loose(name) => segments
                .last()
                .map(|segment| segment.ident == name.as_str())
                .unwrap_or(false),
            ContextTypeMatcher::AllowList(allowed) => {
                let full = segments
                    .iter()
                    .map(|segment| segment.ident.to_string())
                    .collect::<Vec<_>>()
                    .join("::");
                allowed.iter().any(|candidate| *candidate == full)
            }
        }
    }
}

/// Predicate over function items.
#[derive(Debug, Clone, Default)]
pub struct HandlerFilter {
    context: ContextTypeMatcher,
}

impl HandlerFilter {
    pub fn new(context: ContextTypeMatcher) -> Self {
        Self { context }
    }

    /// Returns `true` when `item_fn` has the shape of a route handler.
    pub fn is_handler(&self, item_fn: &ItemFn) -> bool {
        if !is_exported(&item_fn.vis) {
            return false;
        }
        if !returns_nothing(&item_fn.sig.output) {
            return false;
        }
        if !annotation::has_doc_comment(&item_fn.attrs) {
            return false;
        }
        if item_fn.sig.receiver().is_some() {
            return false;
        }
        if item_fn.sig.inputs.len() != 1 {
            return false;
        }
        match item_fn.sig.inputs.first() {
            Some(FnArg::Typed(pat_type)) => self.is_context_ref(&pat_type.ty),
            _ => false,
        }
    }

    fn is_context_ref(&self, ty: &Type) -> bool {
        let Type::Reference(reference) = ty else {
            return false;
        };
        match reference.elem.as_ref() {
            Type::Path(type_path) => self.context.matches(type_path),
            _ => false,
        }
    }
}

/// `pub` and `pub(crate)` items are reachable from the generated module.
fn is_exported(vis: &Visibility) -> bool {
    match vis {
        Visibility::Public(_) => true,
        Visibility::Restricted(restricted) => {
            restricted.in_token.is_none() && restricted.path.is_ident("crate")
        }
        Visibility::Inherited => false,
    }
}

fn returns_nothing(output: &ReturnType) -> bool {
    match output {
        ReturnType::Default => true,
        ReturnType::Type(_, ty) => matches!(ty.as_ref(), Type::Tuple(tuple) if tuple.elems.is_empty()),
    }
}
