//! Wire-level response envelope and status mapping.

use cofre_core::CofreError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The `{success, data?, error?}` envelope every RPC response uses.
///
/// Service failures are folded into the envelope; the transport never
/// sees them as errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    pub fn ok<T: Serialize>(data: T) -> Self {
        match serde_json::to_value(data) {
            Ok(value) => Self {
                success: true,
                data: Some(value),
                error: None,
            },
            Err(err) => Self::err(&CofreError::Internal(err.to_string())),
        }
    }

    pub fn err(error: &CofreError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
        }
    }
}

/// Translate a domain error into the HTTP status the gateway reports.
///
/// This is the single point of wire-status translation; everything the
/// gateway cannot interpret more specifically is a 500.
pub fn http_status(error: &CofreError) -> u16 {
    match error {
        CofreError::NotFound { .. } => 404,
        CofreError::Validation { .. } => 400,
        CofreError::AuthenticationFailed { .. } => 401,
        CofreError::Database(_) | CofreError::Internal(_) => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn ok_envelope_carries_data() {
        let env = Envelope::ok(serde_json::json!({ "saldo": 3500.0 }));
        assert!(env.success);
        assert_eq!(env.data.unwrap()["saldo"], 3500.0);
        assert!(env.error.is_none());
    }

    #[test]
    fn err_envelope_carries_message() {
        let env = Envelope::err(&CofreError::validation("Value must be greater than zero"));
        assert!(!env.success);
        assert!(env.data.is_none());
        assert_eq!(env.error.as_deref(), Some("Value must be greater than zero"));
    }

    #[test]
    fn error_fields_are_omitted_from_the_wire() {
        let env = Envelope::ok(1);
        let json = serde_json::to_string(&env).unwrap();
        assert!(!json.contains("error"));
    }

    #[test]
    fn status_mapping() {
        assert_eq!(
            http_status(&CofreError::not_found("User", Uuid::new_v4())),
            404
        );
        assert_eq!(http_status(&CofreError::validation("Name cannot be empty")), 400);
        assert_eq!(
            http_status(&CofreError::AuthenticationFailed {
                reason: "Invalid email or password".into()
            }),
            401
        );
        assert_eq!(http_status(&CofreError::Database("timeout".into())), 500);
        assert_eq!(http_status(&CofreError::Internal("oops".into())), 500);
    }
}
