//! Command metadata that flows through lifecycle command handlers.
//!
//! Handlers take a single `CommandMetadata` instead of loose
//! `actor`/`correlation_id`/`trace_id` parameters, and copy it onto every
//! event they publish.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Context for a single lifecycle command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The person (HR, committee member, plan owner) issuing the command.
    pub user_id: UserId,

    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
}

impl CommandMetadata {
    /// Creates new command metadata with required user ID.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            correlation_id: None,
            trace_id: None,
        }
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Builder: Add trace ID for distributed tracing.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    /// Returns the trace ID if set.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }
}

#[cfg(test)]
impl CommandMetadata {
    /// Metadata for an HR test user.
    pub fn test_fixture() -> Self {
        Self::new(UserId::new("hr-admin").unwrap()).with_correlation_id("test-correlation-id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_leaves_optional_fields_empty() {
        let metadata = CommandMetadata::new(UserId::new("user-123").unwrap());
        assert_eq!(metadata.user_id.as_str(), "user-123");
        assert!(metadata.trace_id().is_none());
    }

    #[test]
    fn explicit_correlation_id_is_stable() {
        let metadata = CommandMetadata::test_fixture();
        assert_eq!(metadata.correlation_id(), "test-correlation-id");
        assert_eq!(metadata.correlation_id(), metadata.correlation_id());
    }

    #[test]
    fn missing_correlation_id_is_generated() {
        let metadata = CommandMetadata::new(UserId::new("user").unwrap());
        assert!(!metadata.correlation_id().is_empty());
    }

    #[test]
    fn serialization_skips_absent_fields() {
        let metadata = CommandMetadata::new(UserId::new("user").unwrap()).with_trace_id("t-1");
        let json = serde_json::to_string(&metadata).unwrap();
        assert!(json.contains("trace_id"));
        assert!(!json.contains("correlation_id"));
    }
}
