//! Uniform outcome of a contact submission.

use serde::{Deserialize, Serialize};

/// The only shape a caller observes after submitting the contact form.
///
/// Every delivery backend produces one of these, and every failure on the
/// way is folded into one before it reaches the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryResult {
    /// Whether the submission was accepted.
    pub success: bool,
    /// Localized, visitor-facing text.
    pub message: String,
}

impl DeliveryResult {
    /// A successful outcome.
    #[must_use]
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// A failed outcome.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_exactly_two_keys() {
        let json = serde_json::to_value(DeliveryResult::succeeded("ok")).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true, "message": "ok" }));
    }

    #[test]
    fn test_deserialize_requires_both_fields() {
        assert!(serde_json::from_str::<DeliveryResult>(r#"{"success": true}"#).is_err());
        assert!(serde_json::from_str::<DeliveryResult>(r#"{"message": "hi"}"#).is_err());
        assert!(
            serde_json::from_str::<DeliveryResult>(r#"{"success": "yes", "message": "hi"}"#)
                .is_err()
        );
    }
}
