//! 调用方身份
//!
//! Identity is issued and validated by an external provider. This service
//! only carries the bearer token along so the admission policy can decide
//! whether a caller is required; the token itself is never inspected.

mod extractor;

pub use extractor::MaybeCaller;

/// Opaque caller identity taken from `Authorization: Bearer <token>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub token: String,
}

impl Caller {
    /// Extract the token from an `Authorization` header value
    ///
    /// Returns `None` unless the value is `Bearer <non-empty token>`.
    pub fn from_header(header: &str) -> Option<Self> {
        let token = header.strip_prefix("Bearer ")?.trim();
        if token.is_empty() {
            return None;
        }
        Some(Self {
            token: token.to_string(),
        })
    }
}
