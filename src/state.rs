use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::database::DrinkRepository;

/// Handles shared by every request: the record store and the token verifier
#[derive(Clone)]
pub struct AppState {
    pub drinks: DrinkRepository,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(drinks: DrinkRepository, verifier: TokenVerifier) -> Self {
        Self {
            drinks,
            verifier: Arc::new(verifier),
        }
    }
}
