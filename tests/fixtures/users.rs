use web::RequestCtx;

/// Lists every user.
/// @METHOD: GET
/// @PATH: /users
pub fn list_users(ctx: &mut RequestCtx) {
    ctx.write_body(b"[]");
}

/// Partially updates a user; PATCH is not registered.
/// @METHOD: PATCH
/// @PATH: /users/:id
pub fn patch_user(ctx: &mut RequestCtx) {
    ctx.set_status(204);
}

/// Creates a user.
/// @METHOD: get
/// @PATH: /users/legacy
/// @METHOD: post
/// @PATH: /users
pub fn create_user(ctx: &mut RequestCtx) {
    ctx.set_status(201);
}

pub fn undocumented(ctx: &mut RequestCtx) {
    ctx.set_status(500);
}

/// Returns a value, so it is a plain helper.
/// @METHOD: GET
/// @PATH: /users/count
pub fn count_users(ctx: &mut RequestCtx) -> usize {
    ctx.len()
}

/// Methods are never handlers.
pub struct UserService;

impl UserService {
    /// @METHOD: GET
    /// @PATH: /users/service
    pub fn handle(ctx: &mut RequestCtx) {}
}
