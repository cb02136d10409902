pub mod error;
pub mod jwks;
pub mod verifier;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

pub use error::{AuthError, ClaimViolation, HeaderFault, KeySourceError};
pub use jwks::{InMemoryKeyStore, JwksCache, KeyStore};
pub use verifier::{bearer_token, TokenVerifier};

/// Permission names required by the guarded drink endpoints
pub mod scopes {
    pub const GET_DRINKS_DETAIL: &str = "get:drinks-detail";
    pub const POST_DRINKS: &str = "post:drinks";
    pub const PATCH_DRINKS: &str = "patch:drinks";
    pub const DELETE_DRINKS: &str = "delete:drinks";
}

/// A claim that is either one string or a list of strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// Individual entries; a single string is split on whitespace
    pub fn entries(&self) -> Vec<&str> {
        match self {
            OneOrMany::One(value) => value.split_whitespace().collect(),
            OneOrMany::Many(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

/// Verified token payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub aud: OneOrMany,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Auth0 RBAC permissions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<OneOrMany>,
    /// OAuth2 space-delimited scope
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<OneOrMany>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scopes: Option<OneOrMany>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Union of every scope-carrying claim
    pub fn scopes(&self) -> BTreeSet<String> {
        [&self.permissions, &self.scope, &self.scopes]
            .into_iter()
            .flatten()
            .flat_map(|claim| claim.entries())
            .map(str::to_string)
            .collect()
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes().contains(scope)
    }
}
