use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::{extract_bearer_token, Principal, TokenVerifier};
use crate::error::ApiError;

/// Authenticated principal resolved from the `Authorization` header.
///
/// Handlers that take this extractor reject unauthenticated requests with 401
/// before any other work happens.
#[derive(Clone, Copy, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
}

impl From<Principal> for AuthUser {
    fn from(principal: Principal) -> Self {
        Self { user_id: principal.id }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    Arc<dyn TokenVerifier>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .map(|value| value.to_str().map_err(|_| ApiError::unauthorized("Invalid Authorization header format")))
            .transpose()?;

        let token = extract_bearer_token(header)?;

        let verifier: Arc<dyn TokenVerifier> = FromRef::from_ref(state);
        let principal = verifier.verify(token)?;

        Ok(AuthUser::from(principal))
    }
}
