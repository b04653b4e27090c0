/// Same type name, unrelated module.
/// @METHOD: DELETE
/// @PATH: /orders/:id
pub fn cancel_order(ctx: &mut legacy::RequestCtx) {
    ctx.reset();
}

/// @METHOD: OPTIONS
/// @PATH: /orders
pub(crate) fn order_options(ctx: &web::RequestCtx) {}

fn private_order(ctx: &mut web::RequestCtx) {}
