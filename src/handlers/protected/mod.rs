// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Every handler here takes an `Authorized<S>` argument naming the scope it
// requires. The token is verified before the handler body runs, and any
// verification failure is answered with 401.

pub mod drinks;

pub use drinks::detail as drinks_detail_get;
pub use drinks::create as drinks_post;
pub use drinks::update as drink_patch;
pub use drinks::delete as drink_delete;
