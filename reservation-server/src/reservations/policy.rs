//! 准入策略
//!
//! Hook consulted before any table or conflict check runs. Identity is
//! issued elsewhere; a policy only sees the opaque caller (if any) and the
//! request being admitted.

use shared::models::ReservationRequest;
use shared::{AppError, AppResult};
use std::str::FromStr;
use std::sync::Arc;

use crate::auth::Caller;

pub trait AdmissionPolicy: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    /// Err(PermissionDenied) stops the admission before the validator runs
    fn authorize(&self, caller: Option<&Caller>, request: &ReservationRequest) -> AppResult<()>;
}

/// Anyone may reserve
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenPolicy;

impl AdmissionPolicy for OpenPolicy {
    fn name(&self) -> &'static str {
        "open"
    }

    fn authorize(&self, _caller: Option<&Caller>, _request: &ReservationRequest) -> AppResult<()> {
        Ok(())
    }
}

/// Requests must carry a bearer token
#[derive(Debug, Default, Clone, Copy)]
pub struct CallerRequiredPolicy;

impl AdmissionPolicy for CallerRequiredPolicy {
    fn name(&self) -> &'static str {
        "caller-required"
    }

    fn authorize(&self, caller: Option<&Caller>, _request: &ReservationRequest) -> AppResult<()> {
        match caller {
            Some(_) => Ok(()),
            None => Err(AppError::permission_denied(
                "An authenticated caller is required to reserve",
            )),
        }
    }
}

/// Policy selection from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolicyKind {
    #[default]
    Open,
    CallerRequired,
}

impl PolicyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::Open => "open",
            PolicyKind::CallerRequired => "caller-required",
        }
    }

    pub fn build(&self) -> Arc<dyn AdmissionPolicy> {
        match self {
            PolicyKind::Open => Arc::new(OpenPolicy),
            PolicyKind::CallerRequired => Arc::new(CallerRequiredPolicy),
        }
    }
}

impl FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(PolicyKind::Open),
            "caller-required" | "caller_required" => Ok(PolicyKind::CallerRequired),
            other => Err(format!("unknown reservation policy: {other}")),
        }
    }
}

impl std::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::ErrorCode;

    fn request() -> ReservationRequest {
        serde_json::from_value(json!({
            "tableNumber": 5,
            "clientName": "Ana",
            "phoneNumber": "600000000",
            "date": "2024-06-01",
            "slotTimeStart": "18:00",
            "slotTimeEnd": "19:00"
        }))
        .unwrap()
    }

    #[test]
    fn test_open_policy_allows_anonymous() {
        assert!(OpenPolicy.authorize(None, &request()).is_ok());
    }

    #[test]
    fn test_caller_required_policy() {
        let caller = Caller {
            token: "t".into(),
        };
        assert!(
            CallerRequiredPolicy
                .authorize(Some(&caller), &request())
                .is_ok()
        );

        let err = CallerRequiredPolicy.authorize(None, &request()).unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);
    }

    #[test]
    fn test_policy_kind_parse() {
        assert_eq!("open".parse::<PolicyKind>().unwrap(), PolicyKind::Open);
        assert_eq!(
            " Caller-Required ".parse::<PolicyKind>().unwrap(),
            PolicyKind::CallerRequired
        );
        assert!("strict".parse::<PolicyKind>().is_err());
        assert_eq!(PolicyKind::CallerRequired.build().name(), "caller-required");
    }
}
