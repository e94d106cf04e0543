//! Condition-tree structures
//!
//! A condition is either a single field comparison or an `All`/`Any`
//! combination of sub-conditions. Empty `All` matches every document;
//! empty `Any` matches none (standard boolean identities; any looser
//! reading of an empty branch must be made explicit by the builder).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Filter operation types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum FilterOp {
    /// Equality: field = value
    Eq(Value),
    /// Inequality: field != value
    Ne(Value),
    /// Less than or equal: field <= value
    Lte(Value),
    /// Greater than or equal: field >= value
    Gte(Value),
    /// Field is absent or null
    IsNull,
}

impl FilterOp {
    /// Returns the operation name for explain/log output
    pub fn op_name(&self) -> &'static str {
        match self {
            FilterOp::Eq(_) => "eq",
            FilterOp::Ne(_) => "ne",
            FilterOp::Lte(_) => "lte",
            FilterOp::Gte(_) => "gte",
            FilterOp::IsNull => "is_null",
        }
    }
}

/// A single predicate (field + operation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    /// Field name
    pub field: String,
    /// Filter operation
    pub op: FilterOp,
}

impl Predicate {
    /// Create an equality predicate
    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Eq(value),
        }
    }

    /// Create an inequality predicate
    pub fn ne(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Ne(value),
        }
    }

    /// Create a range predicate (lte)
    pub fn lte(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Lte(value),
        }
    }

    /// Create a range predicate (gte)
    pub fn gte(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Gte(value),
        }
    }

    /// Create a null-or-absent predicate
    pub fn is_null(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::IsNull,
        }
    }
}

/// A boolean condition tree over document fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// All sub-conditions must hold (AND). Empty = match everything.
    All(Vec<Condition>),
    /// At least one sub-condition must hold (OR). Empty = match nothing.
    Any(Vec<Condition>),
    /// A single field comparison
    Cmp(Predicate),
}

impl Condition {
    /// The condition that matches every document
    pub fn always() -> Self {
        Condition::All(Vec::new())
    }

    /// The condition that matches no document
    pub fn never() -> Self {
        Condition::Any(Vec::new())
    }

    /// Wrap a predicate as a leaf condition
    pub fn cmp(predicate: Predicate) -> Self {
        Condition::Cmp(predicate)
    }

    /// AND-combination of conditions
    pub fn all(conditions: Vec<Condition>) -> Self {
        Condition::All(conditions)
    }

    /// OR-combination of conditions
    pub fn any(conditions: Vec<Condition>) -> Self {
        Condition::Any(conditions)
    }

    /// Returns true if this condition is the unrestricted (empty AND) tree
    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Condition::All(inner) if inner.is_empty())
    }

    /// Number of leaf predicates in the tree
    pub fn leaf_count(&self) -> usize {
        match self {
            Condition::Cmp(_) => 1,
            Condition::All(inner) | Condition::Any(inner) => {
                inner.iter().map(Condition::leaf_count).sum()
            }
        }
    }
}

impl From<Predicate> for Condition {
    fn from(predicate: Predicate) -> Self {
        Condition::Cmp(predicate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_predicate_builders() {
        let eq = Predicate::eq("is_active", json!(true));
        assert_eq!(eq.field, "is_active");
        assert_eq!(eq.op.op_name(), "eq");

        let ne = Predicate::ne("created_user", json!("u1"));
        assert_eq!(ne.op.op_name(), "ne");

        let null = Predicate::is_null("publish_start");
        assert_eq!(null.op, FilterOp::IsNull);
    }

    #[test]
    fn test_unrestricted_is_empty_all() {
        assert!(Condition::always().is_unrestricted());
        assert!(!Condition::never().is_unrestricted());
        assert!(!Condition::cmp(Predicate::eq("is_latest", json!(true))).is_unrestricted());
    }

    #[test]
    fn test_leaf_count() {
        let tree = Condition::all(vec![
            Condition::cmp(Predicate::eq("is_active", json!(true))),
            Condition::any(vec![
                Condition::cmp(Predicate::eq("public_type", json!(1))),
                Condition::cmp(Predicate::eq("public_type", json!(2))),
            ]),
        ]);
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(Condition::always().leaf_count(), 0);
    }
}
