//! revgate - visibility and mutation-authorization policy for
//! versioned, workflow-managed content
//!
//! Pure decision logic: given an actor context and a revision schema,
//! build the condition tree of what that actor may read, and decide
//! whether a mutation is permitted. Persistence, sessions, and query
//! execution are external collaborators.

pub mod authz;
pub mod context;
pub mod predicate;
pub mod query;
pub mod schema;
pub mod validation;
pub mod visibility;
