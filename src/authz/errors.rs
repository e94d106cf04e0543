//! Error types for mutation authorization

use thiserror::Error;

/// Result type for policy decisions
pub type PolicyResult<T> = Result<T, PolicyError>;

/// Mutation-authorization errors
///
/// Denials are `Ok(false)`, never errors. Errors mean the decision
/// itself could not be made.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PolicyError {
    /// The content domain has not supplied its own authorization rules.
    ///
    /// Fatal by contract: callers must not catch this and fall back to
    /// a permissive or restrictive default.
    #[error("mutation policy not implemented: {policy}::{operation}")]
    Unimplemented {
        /// Policy type that refused the call
        policy: &'static str,
        /// Operation that was invoked
        operation: &'static str,
    },

    /// The injected revision store failed
    #[error("revision store error: {0}")]
    Store(String),
}

impl PolicyError {
    /// Returns true for the fail-fast unimplemented marker
    pub fn is_unimplemented(&self) -> bool {
        matches!(self, PolicyError::Unimplemented { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unimplemented_is_distinguishable() {
        let err = PolicyError::Unimplemented {
            policy: "UnspecializedPolicy",
            operation: "can_read",
        };

        assert!(err.is_unimplemented());
        assert!(err.to_string().contains("UnspecializedPolicy::can_read"));

        let store = PolicyError::Store("backend down".into());
        assert!(!store.is_unimplemented());
    }
}
