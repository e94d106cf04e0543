//! Save-time validation plan and hooks
//!
//! Before a revision is persisted, the surrounding system gives the
//! governing policy a chance to install validation rules. The standard
//! hook installs the workflow status rule; the unspecialized policy
//! overrides it as a no-op, so status is not validated on save for the
//! revisions it governs. No other rule is touched.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;
use tracing::trace;

use crate::authz::{ContentMutationPolicy, UnspecializedPolicy};
use crate::schema::{fields, WorkflowStatus};

/// Validation failures for a revision payload
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is absent or null
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A field value is outside its allowed set
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Field that failed
        field: String,
        /// What was wrong
        reason: String,
    },
}

/// A rule applied to one payload field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    /// Field must be present and non-null
    pub required: bool,
    /// Allowed values, if restricted
    pub one_of: Option<Vec<Value>>,
}

impl FieldRule {
    /// A presence-only rule
    pub fn required() -> Self {
        Self {
            required: true,
            one_of: None,
        }
    }

    /// A required rule restricted to the given values
    pub fn one_of(values: Vec<Value>) -> Self {
        Self {
            required: true,
            one_of: Some(values),
        }
    }
}

/// Named field rules checked before a revision is persisted.
///
/// Checks are strict: no coercion, no defaults. Optional fields that
/// are absent simply skip their rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationPlan {
    rules: BTreeMap<String, FieldRule>,
}

impl ValidationPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs (or replaces) a rule for a field
    pub fn insert(&mut self, field: impl Into<String>, rule: FieldRule) {
        self.rules.insert(field.into(), rule);
    }

    /// Removes a field's rule, returning it if present
    pub fn remove(&mut self, field: &str) -> Option<FieldRule> {
        self.rules.remove(field)
    }

    /// Returns true if the field has a rule installed
    pub fn has_rule(&self, field: &str) -> bool {
        self.rules.contains_key(field)
    }

    /// Checks a payload against every installed rule
    pub fn check(&self, payload: &Value) -> Result<(), ValidationError> {
        for (field, rule) in &self.rules {
            let value = match payload.get(field) {
                Some(v) if !v.is_null() => v,
                _ => {
                    if rule.required {
                        return Err(ValidationError::MissingField(field.clone()));
                    }
                    continue;
                }
            };
            if let Some(allowed) = &rule.one_of {
                if !allowed.contains(value) {
                    return Err(ValidationError::InvalidValue {
                        field: field.clone(),
                        reason: format!("{} is not an allowed value", value),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Save-time hook a policy uses to shape the validation plan.
///
/// The default installs the standard workflow status rule.
pub trait SaveHooks {
    /// Called before a revision is validated for persistence
    fn before_validate(&self, plan: &mut ValidationPlan) {
        trace!("installing standard status rule");
        plan.insert(
            fields::STATUS,
            FieldRule::one_of(
                WorkflowStatus::ALL
                    .iter()
                    .map(|status| status.as_value())
                    .collect(),
            ),
        );
    }
}

impl SaveHooks for ContentMutationPolicy {}

impl SaveHooks for UnspecializedPolicy {
    // Status validation is skipped on save: the specialized domain
    // manages status transitions itself.
    fn before_validate(&self, _plan: &mut ValidationPlan) {}
}
