use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use std::sync::Arc;

use super::error::{AuthError, HeaderFault, KeySourceError};
use super::jwks::{JwksCache, KeyStore};
use super::Claims;
use crate::config::AuthConfig;

/// Stateless bearer token verifier. Each call checks the token from scratch.
pub struct TokenVerifier {
    keys: Arc<dyn KeyStore>,
    audience: String,
    issuer: String,
    algorithms: Vec<Algorithm>,
    leeway: u64,
}

impl TokenVerifier {
    pub fn new(keys: Arc<dyn KeyStore>, config: &AuthConfig) -> Self {
        Self {
            keys,
            audience: config.audience.clone(),
            issuer: config.issuer(),
            algorithms: config.algorithms.clone(),
            leeway: config.leeway_secs,
        }
    }

    /// Verifier backed by the provider's published key set
    pub fn from_config(config: &AuthConfig) -> Result<Self, KeySourceError> {
        if config.domain.is_empty() && (config.issuer.is_none() || config.jwks_url.is_none()) {
            return Err(KeySourceError::MissingDomain);
        }

        let jwks = JwksCache::new(config.jwks_url()?)?;
        tracing::info!("Signing keys are fetched from {}", jwks.url());
        Ok(Self::new(Arc::new(jwks), config))
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Check an `Authorization` header value and require `scope` in the verified claims
    pub async fn verify(&self, authorization: Option<&str>, scope: &str) -> Result<Claims, AuthError> {
        let token = bearer_token(authorization)?;
        let claims = self.decode(token).await?;

        if !claims.has_scope(scope) {
            return Err(AuthError::InsufficientScope);
        }
        Ok(claims)
    }

    /// Verify signature and standard claims, without any scope requirement
    pub async fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token)
            .map_err(|_| AuthError::MalformedToken("Unable to parse authentication token."))?;

        let kid = header
            .kid
            .as_deref()
            .ok_or(AuthError::MalformedToken("Authorization malformed."))?;

        if !self.algorithms.contains(&header.alg) {
            return Err(AuthError::MalformedToken("Unsupported signing algorithm."));
        }

        let key = self
            .keys
            .key(kid)
            .await
            .ok_or(AuthError::UnknownSigningKey)?;

        let mut validation = Validation::new(header.alg);
        validation.set_audience(&[&self.audience]);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "aud", "iss"]);
        validation.leeway = self.leeway;

        let data = decode::<Claims>(token, &key, &validation)?;
        Ok(data.claims)
    }
}

/// Extract the token from `Bearer <token>`; the scheme is case-sensitive
pub fn bearer_token(authorization: Option<&str>) -> Result<&str, AuthError> {
    let header = authorization.ok_or(AuthError::MissingOrMalformedHeader(HeaderFault::Missing))?;

    let parts: Vec<&str> = header.split(' ').collect();
    match parts.as_slice() {
        [scheme, ..] if *scheme != "Bearer" => {
            Err(AuthError::MissingOrMalformedHeader(HeaderFault::NotBearer))
        }
        [_] | [_, ""] => Err(AuthError::MissingOrMalformedHeader(HeaderFault::TokenMissing)),
        [_, token] => Ok(*token),
        _ => Err(AuthError::MissingOrMalformedHeader(HeaderFault::TooManyParts)),
    }
}
