//! Caller Extractor
//!
//! Pulls the optional bearer token out of the request headers.

use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

use crate::auth::Caller;

/// Optional caller identity
///
/// Never rejects: a missing or malformed `Authorization` header yields
/// `MaybeCaller(None)` and the admission policy decides what that means.
#[derive(Debug, Clone)]
pub struct MaybeCaller(pub Option<Caller>);

impl<S> FromRequestParts<S> for MaybeCaller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let caller = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(Caller::from_header);

        Ok(MaybeCaller(caller))
    }
}
