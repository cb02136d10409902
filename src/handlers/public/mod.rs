// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Security Level: None (completely public access)
// These endpoints only ever expose the summary form of a drink.

pub mod drinks;
pub mod health;

pub use drinks::list as drinks_get;
pub use health::get as health_get;
pub use health::method_not_allowed;
pub use health::not_found as fallback;
