use axum::http::StatusCode;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use thiserror::Error;

/// Why the `Authorization` header itself was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderFault {
    Missing,
    Unreadable,
    NotBearer,
    TokenMissing,
    TooManyParts,
}

/// Which standard claim failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimViolation {
    Expired,
    NotYetValid,
    Audience,
    Issuer,
    Missing(String),
    Malformed,
}

impl std::fmt::Display for ClaimViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClaimViolation::Expired => write!(f, "Token expired."),
            ClaimViolation::NotYetValid => write!(f, "Token is not valid yet."),
            ClaimViolation::Audience => write!(f, "Incorrect claims. Please, check the audience."),
            ClaimViolation::Issuer => write!(f, "Incorrect claims. Please, check the issuer."),
            ClaimViolation::Missing(claim) => write!(f, "Incorrect claims. Missing '{}' claim.", claim),
            ClaimViolation::Malformed => write!(f, "Incorrect claims. Unable to read the token payload."),
        }
    }
}

/// Token verification failures. Every variant is reported as 401.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("{0}")]
    MissingOrMalformedHeader(HeaderFault),

    #[error("{0}")]
    MalformedToken(&'static str),

    #[error("Unable to find the appropriate key.")]
    UnknownSigningKey,

    #[error("Token signature could not be verified.")]
    InvalidSignature,

    #[error("{0}")]
    InvalidClaims(ClaimViolation),

    #[error("Permission not found.")]
    InsufficientScope,
}

impl std::fmt::Display for HeaderFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let description = match self {
            HeaderFault::Missing => "Authorization header is expected.",
            HeaderFault::Unreadable => "Authorization header must contain visible ASCII only.",
            HeaderFault::NotBearer => "Authorization header must start with \"Bearer\".",
            HeaderFault::TokenMissing => "Token not found.",
            HeaderFault::TooManyParts => "Authorization header must be bearer token.",
        };
        f.write_str(description)
    }
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    /// Machine-readable code surfaced to the caller
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingOrMalformedHeader(HeaderFault::Missing) => "authorization_header_missing",
            AuthError::MissingOrMalformedHeader(_) => "invalid_header",
            AuthError::MalformedToken(_) => "invalid_header",
            AuthError::UnknownSigningKey => "invalid_header",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::InvalidClaims(_) => "invalid_claims",
            AuthError::InsufficientScope => "unauthorized",
        }
    }

    pub fn description(&self) -> String {
        self.to_string()
    }
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature
            | ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidKeyFormat
            | ErrorKind::InvalidRsaKey(_)
            | ErrorKind::InvalidEcdsaKey => AuthError::InvalidSignature,
            ErrorKind::ExpiredSignature => AuthError::InvalidClaims(ClaimViolation::Expired),
            ErrorKind::ImmatureSignature => AuthError::InvalidClaims(ClaimViolation::NotYetValid),
            ErrorKind::InvalidAudience => AuthError::InvalidClaims(ClaimViolation::Audience),
            ErrorKind::InvalidIssuer => AuthError::InvalidClaims(ClaimViolation::Issuer),
            ErrorKind::MissingRequiredClaim(claim) => {
                AuthError::InvalidClaims(ClaimViolation::Missing(claim.clone()))
            }
            ErrorKind::Json(_) => AuthError::InvalidClaims(ClaimViolation::Malformed),
            _ => AuthError::MalformedToken("Unable to parse authentication token."),
        }
    }
}

/// Startup failures while wiring up the provider's key set
#[derive(Debug, Error)]
pub enum KeySourceError {
    #[error("AUTH0_DOMAIN is not set; set it, or both AUTH_ISSUER and AUTH_JWKS_URL")]
    MissingDomain,

    #[error("invalid key set URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("failed to build key set client: {0}")]
    Client(#[from] reqwest::Error),
}
