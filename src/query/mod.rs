//! Read-query specification
//!
//! The policy hands the query layer a specification: whether to
//! traverse related entities, the visibility conditions, and optional
//! ordering/limit. Caller overrides are a shallow per-key merge: a
//! supplied key replaces the default wholesale. In particular a
//! caller-supplied `conditions` discards the computed visibility
//! predicate; callers wanting both must compose the tree themselves.

use serde::{Deserialize, Serialize};

use crate::predicate::Condition;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Sort specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field to sort by
    pub field: String,
    /// Sort direction
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// A read-query specification handed to the query layer
#[derive(Debug, Clone, PartialEq)]
pub struct ReadQuery {
    /// Whether to traverse related entities (default: no)
    pub include_related: bool,
    /// Visibility conditions
    pub conditions: Condition,
    /// Result ordering (unset by default)
    pub order: Option<SortSpec>,
    /// Result limit (unset by default)
    pub limit: Option<u64>,
}

impl ReadQuery {
    /// The policy defaults around a computed visibility predicate
    pub fn defaults(conditions: Condition) -> Self {
        Self {
            include_related: false,
            conditions,
            order: None,
            limit: None,
        }
    }

    /// Applies caller overrides, key by key.
    ///
    /// Shallow: each supplied key replaces the default for that key
    /// entirely; nothing is merged or intersected.
    pub fn override_with(mut self, overrides: ReadQueryOverrides) -> Self {
        if let Some(include_related) = overrides.include_related {
            self.include_related = include_related;
        }
        if let Some(conditions) = overrides.conditions {
            self.conditions = conditions;
        }
        if let Some(order) = overrides.order {
            self.order = Some(order);
        }
        if let Some(limit) = overrides.limit {
            self.limit = Some(limit);
        }
        self
    }
}

/// Caller-supplied per-key overrides for a read query
#[derive(Debug, Clone, Default)]
pub struct ReadQueryOverrides {
    pub include_related: Option<bool>,
    pub conditions: Option<Condition>,
    pub order: Option<SortSpec>,
    pub limit: Option<u64>,
}

impl ReadQueryOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_related(mut self, include_related: bool) -> Self {
        self.include_related = Some(include_related);
        self
    }

    /// Replaces the computed visibility conditions wholesale
    pub fn conditions(mut self, conditions: Condition) -> Self {
        self.conditions = Some(conditions);
        self
    }

    pub fn order(mut self, order: SortSpec) -> Self {
        self.order = Some(order);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}
