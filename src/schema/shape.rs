//! Schema shape and workflow constants

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields;

/// Publication mode of a revision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicType {
    /// Visible whenever its revision is visible
    Public = 1,
    /// Visible only inside the publish_start..publish_end window
    Limited = 2,
}

impl PublicType {
    /// JSON representation used in payloads and predicates
    pub fn as_value(self) -> Value {
        Value::from(self as i64)
    }
}

/// Workflow status carried by a revision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    Published = 1,
    ApprovalWaiting = 2,
    InDraft = 3,
    Disapproved = 4,
}

impl WorkflowStatus {
    /// All statuses a revision may legally carry
    pub const ALL: [WorkflowStatus; 4] = [
        WorkflowStatus::Published,
        WorkflowStatus::ApprovalWaiting,
        WorkflowStatus::InDraft,
        WorkflowStatus::Disapproved,
    ];

    /// JSON representation used in payloads
    pub fn as_value(self) -> Value {
        Value::from(self as i64)
    }
}

/// The set of optional workflow fields present on a revision type.
///
/// Replaces reflective per-field existence checks: callers declare the
/// shape once and the policy branches on it deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionSchema {
    present: BTreeSet<String>,
}

impl RevisionSchema {
    /// A schema with no optional workflow fields
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field as present on this revision type
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.present.insert(field.into());
        self
    }

    /// Returns true if the field exists on this revision type
    pub fn has_field(&self, field: &str) -> bool {
        self.present.contains(field)
    }

    /// Minimal workflow shape: lifecycle flags and authorship only
    pub fn minimal() -> Self {
        Self::new()
            .with_field(fields::GROUP_KEY)
            .with_field(fields::IS_ACTIVE)
            .with_field(fields::IS_LATEST)
            .with_field(fields::CREATED_USER)
            .with_field(fields::STATUS)
    }

    /// Minimal shape plus the time-boxed publication fields
    pub fn time_boxed() -> Self {
        Self::minimal()
            .with_field(fields::PUBLIC_TYPE)
            .with_field(fields::PUBLISH_START)
            .with_field(fields::PUBLISH_END)
    }

    /// Time-boxed shape plus the multilingual fields
    pub fn multilingual() -> Self {
        Self::time_boxed()
            .with_field(fields::LANGUAGE_ID)
            .with_field(fields::IS_ORIGIN)
            .with_field(fields::IS_TRANSLATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_presence() {
        let schema = RevisionSchema::minimal();

        assert!(schema.has_field(fields::IS_ACTIVE));
        assert!(schema.has_field(fields::GROUP_KEY));
        assert!(!schema.has_field(fields::PUBLIC_TYPE));
        assert!(!schema.has_field(fields::LANGUAGE_ID));
    }

    #[test]
    fn test_shape_builders_nest() {
        let time_boxed = RevisionSchema::time_boxed();
        assert!(time_boxed.has_field(fields::PUBLIC_TYPE));
        assert!(time_boxed.has_field(fields::PUBLISH_START));
        assert!(!time_boxed.has_field(fields::IS_TRANSLATION));

        let multilingual = RevisionSchema::multilingual();
        assert!(multilingual.has_field(fields::LANGUAGE_ID));
        assert!(multilingual.has_field(fields::IS_ORIGIN));
        assert!(multilingual.has_field(fields::PUBLIC_TYPE));
    }

    #[test]
    fn test_custom_field() {
        let schema = RevisionSchema::new().with_field("reservation_slot");
        assert!(schema.has_field("reservation_slot"));
        assert!(!schema.has_field(fields::IS_ACTIVE));
    }

    #[test]
    fn test_constant_values() {
        assert_eq!(PublicType::Public.as_value(), serde_json::json!(1));
        assert_eq!(PublicType::Limited.as_value(), serde_json::json!(2));
        assert_eq!(WorkflowStatus::InDraft.as_value(), serde_json::json!(3));
    }
}
