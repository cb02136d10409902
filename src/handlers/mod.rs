// handlers/mod.rs - 2-Tier Handler Architecture
//
// Public (no auth) → Protected (bearer token with a per-endpoint scope)
pub mod public;    // Tier 1: No authentication required
pub mod protected; // Tier 2: Scope-guarded endpoints
