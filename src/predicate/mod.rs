//! Composable boolean condition trees over revision fields
//!
//! The visibility layer emits these trees; the query-execution layer
//! consumes them. `matches` gives the reference evaluation semantics
//! for callers that filter in memory.

mod condition;
mod eval;

pub use condition::{Condition, FilterOp, Predicate};
