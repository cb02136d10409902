use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use std::marker::PhantomData;

use crate::auth::{scopes, AuthError, Claims, HeaderFault};
use crate::error::ApiError;
use crate::state::AppState;

/// A permission a guarded endpoint requires
pub trait Scope {
    const NAME: &'static str;
}

macro_rules! scope {
    ($name:ident, $value:expr) => {
        pub struct $name;

        impl Scope for $name {
            const NAME: &'static str = $value;
        }
    };
}

scope!(GetDrinksDetail, scopes::GET_DRINKS_DETAIL);
scope!(PostDrinks, scopes::POST_DRINKS);
scope!(PatchDrinks, scopes::PATCH_DRINKS);
scope!(DeleteDrinks, scopes::DELETE_DRINKS);

/// Verified claims of a caller holding scope `S`.
///
/// Using this as a handler argument places the token check in front of the
/// handler body; requests that fail it never reach the handler and get the
/// 401 envelope instead.
pub struct Authorized<S: Scope> {
    pub claims: Claims,
    _scope: PhantomData<fn() -> S>,
}

impl<S: Scope> Authorized<S> {
    pub fn subject(&self) -> &str {
        self.claims.sub.as_deref().unwrap_or("unknown")
    }
}

#[async_trait]
impl<S, St> FromRequestParts<St> for Authorized<S>
where
    S: Scope + 'static,
    St: Send + Sync,
    AppState: FromRef<St>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &St) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let header = match parts.headers.get(AUTHORIZATION) {
            Some(value) => Some(
                value
                    .to_str()
                    .map_err(|_| AuthError::MissingOrMalformedHeader(HeaderFault::Unreadable))?,
            ),
            None => None,
        };

        let claims = state.verifier.verify(header, S::NAME).await.map_err(|err| {
            tracing::warn!(
                "Rejected {} {} (requires '{}'): {} - {}",
                parts.method,
                parts.uri.path(),
                S::NAME,
                err.code(),
                err
            );
            err
        })?;

        Ok(Self {
            claims,
            _scope: PhantomData,
        })
    }
}
