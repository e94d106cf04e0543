//! In-memory condition evaluation
//!
//! Filters documents strictly according to the tree.
//! No type coercion, exact match only. A missing or null field never
//! satisfies a comparison; only `IsNull` accepts it.

use serde_json::Value;

use super::condition::{Condition, FilterOp, Predicate};

impl Condition {
    /// Checks if a document matches this condition tree
    pub fn matches(&self, document: &Value) -> bool {
        match self {
            Condition::All(inner) => inner.iter().all(|c| c.matches(document)),
            Condition::Any(inner) => inner.iter().any(|c| c.matches(document)),
            Condition::Cmp(predicate) => matches_predicate(document, predicate),
        }
    }
}

/// Checks if a document matches a single predicate
fn matches_predicate(document: &Value, predicate: &Predicate) -> bool {
    let field_value = document.get(&predicate.field);

    if let FilterOp::IsNull = predicate.op {
        return matches!(field_value, None | Some(Value::Null));
    }

    let field_value = match field_value {
        Some(v) if !v.is_null() => v,
        // Missing or null field = no match for comparisons
        _ => return false,
    };

    match &predicate.op {
        FilterOp::Eq(expected) => field_value == expected,
        FilterOp::Ne(expected) => field_value != expected,
        FilterOp::Lte(bound) => ord_match(field_value, bound, |o| o <= std::cmp::Ordering::Equal),
        FilterOp::Gte(bound) => ord_match(field_value, bound, |o| o >= std::cmp::Ordering::Equal),
        FilterOp::IsNull => unreachable!("handled above"),
    }
}

/// Ordered comparison over numbers and strings (no coercion between them).
///
/// RFC 3339 UTC timestamps compare correctly as strings, which is how the
/// publication window bounds are evaluated.
fn ord_match(actual: &Value, bound: &Value, accept: fn(std::cmp::Ordering) -> bool) -> bool {
    match (actual, bound) {
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(ai), Some(bi)) = (a.as_i64(), b.as_i64()) {
                return accept(ai.cmp(&bi));
            }
            match (a.as_f64(), b.as_f64()) {
                (Some(af), Some(bf)) => af.partial_cmp(&bf).map(accept).unwrap_or(false),
                _ => false,
            }
        }
        (Value::String(a), Value::String(b)) => accept(a.as_str().cmp(b.as_str())),
        _ => false,
    }
}
