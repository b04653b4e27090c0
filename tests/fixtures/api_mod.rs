//! Public HTTP API.

pub mod orders;
pub mod users;

/// Liveness check.
/// @METHOD: HEAD
/// @PATH: /health
pub fn health(ctx: &mut web::RequestCtx) {
    ctx.set_status(200);
}

/// Not routed: no directives, but still a handler by shape.
pub fn fallback(ctx: &mut web::RequestCtx) {
    ctx.set_status(404);
}
