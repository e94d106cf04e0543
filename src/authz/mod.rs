//! # Mutation authorization
//!
//! The capability-polymorphic contract deciding whether an actor may
//! create, read, edit, or delete a revision. Generic, domain-independent
//! reference semantics live in the trait's default methods; a content
//! domain adopts them by implementing the trait, or supplies its own
//! rules by overriding.
//!
//! `UnspecializedPolicy` is the deliberate opposite: every operation
//! fails fast with `PolicyError::Unimplemented`, marking a domain that
//! must define its own rules and must never inherit the generic ones.

mod errors;

use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::context::{Capability, WorkflowContext};
use crate::schema::fields;

pub use errors::{PolicyError, PolicyResult};

/// The slice of the persistence layer the policy needs for deletes:
/// how many revisions of a group are currently active.
pub trait RevisionStore {
    /// Counts revisions with the given group key and `is_active = true`
    fn count_active_in_group(&self, group_key: &str) -> PolicyResult<u64>;
}

/// Mutation-authorization contract.
///
/// Default methods carry the reference semantics. All four return
/// `Ok(false)` for denial; `Err` means the decision could not be made.
pub trait MutationPolicy {
    /// May the actor read content at all?
    fn can_read(&self, ctx: &WorkflowContext) -> PolicyResult<bool> {
        Ok(ctx.has(Capability::ContentReadable))
    }

    /// May the actor create a new revision?
    fn can_create(&self, ctx: &WorkflowContext) -> PolicyResult<bool> {
        Ok(ctx.has(Capability::ContentCreatable))
    }

    /// May the actor edit this revision?
    ///
    /// Editors may edit anything; otherwise the actor must be the
    /// revision's author. A payload without a parseable `created_user`,
    /// or an anonymous actor, is denied.
    fn can_edit(&self, ctx: &WorkflowContext, payload: &Value) -> PolicyResult<bool> {
        if ctx.has(Capability::ContentEditable) {
            return Ok(true);
        }
        let user_id = match ctx.user_id {
            Some(id) => id,
            None => return Ok(false),
        };
        Ok(payload_author(payload) == Some(user_id))
    }

    /// May the actor delete this revision?
    ///
    /// Requires edit permission. Publishers may then always delete;
    /// anyone else only while no revision of the group is active, i.e.
    /// the item has never been published.
    fn can_delete(
        &self,
        ctx: &WorkflowContext,
        payload: &Value,
        store: &dyn RevisionStore,
    ) -> PolicyResult<bool> {
        if !self.can_edit(ctx, payload)? {
            return Ok(false);
        }
        if ctx.has(Capability::ContentPublishable) {
            return Ok(true);
        }
        let group_key = match payload.get(fields::GROUP_KEY).and_then(Value::as_str) {
            Some(key) => key,
            None => return Ok(false),
        };
        let active = store.count_active_in_group(group_key)?;
        debug!(group_key, active, "delete check counted active revisions");
        Ok(active == 0)
    }
}

/// The generic content policy: reference semantics, unmodified.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentMutationPolicy;

impl MutationPolicy for ContentMutationPolicy {}

/// A policy whose domain has not supplied authorization rules.
///
/// Every operation fails fast and distinguishably, for every input.
/// This is a contract marker, not an oversight: domains layered on the
/// workflow (a reservation subsystem, for instance) must decide
/// mutation rights themselves rather than inherit content semantics.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnspecializedPolicy;

impl UnspecializedPolicy {
    const POLICY: &'static str = "UnspecializedPolicy";

    fn unimplemented<T>(operation: &'static str) -> PolicyResult<T> {
        Err(PolicyError::Unimplemented {
            policy: Self::POLICY,
            operation,
        })
    }
}

impl MutationPolicy for UnspecializedPolicy {
    fn can_read(&self, _ctx: &WorkflowContext) -> PolicyResult<bool> {
        Self::unimplemented("can_read")
    }

    fn can_create(&self, _ctx: &WorkflowContext) -> PolicyResult<bool> {
        Self::unimplemented("can_create")
    }

    fn can_edit(&self, _ctx: &WorkflowContext, _payload: &Value) -> PolicyResult<bool> {
        Self::unimplemented("can_edit")
    }

    fn can_delete(
        &self,
        _ctx: &WorkflowContext,
        _payload: &Value,
        _store: &dyn RevisionStore,
    ) -> PolicyResult<bool> {
        Self::unimplemented("can_delete")
    }
}

/// Extracts the revision author from a payload
fn payload_author(payload: &Value) -> Option<Uuid> {
    payload
        .get(fields::CREATED_USER)
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        "2026-08-26T12:00:00Z".parse().unwrap()
    }

    fn actor(capabilities: &[Capability]) -> WorkflowContext {
        let mut ctx = WorkflowContext::authenticated(Uuid::new_v4(), 1, now());
        for &capability in capabilities {
            ctx = ctx.with_capability(capability);
        }
        ctx
    }

    /// Store fixture with a fixed active count per group
    struct FixedStore(u64);

    impl RevisionStore for FixedStore {
        fn count_active_in_group(&self, _group_key: &str) -> PolicyResult<u64> {
            Ok(self.0)
        }
    }

    /// Store fixture that always fails
    struct BrokenStore;

    impl RevisionStore for BrokenStore {
        fn count_active_in_group(&self, _group_key: &str) -> PolicyResult<u64> {
            Err(PolicyError::Store("backend down".into()))
        }
    }

    #[test]
    fn test_read_create_follow_capabilities() {
        let policy = ContentMutationPolicy;

        assert!(policy
            .can_read(&actor(&[Capability::ContentReadable]))
            .unwrap());
        assert!(!policy.can_read(&actor(&[])).unwrap());
        assert!(policy
            .can_create(&actor(&[Capability::ContentCreatable]))
            .unwrap());
        assert!(!policy
            .can_create(&actor(&[Capability::ContentReadable]))
            .unwrap());
    }

    #[test]
    fn test_owner_may_edit_without_editable() {
        let policy = ContentMutationPolicy;
        let ctx = actor(&[]);
        let own = json!({"created_user": ctx.user_id.unwrap().to_string()});
        let other = json!({"created_user": Uuid::new_v4().to_string()});

        assert!(policy.can_edit(&ctx, &own).unwrap());
        assert!(!policy.can_edit(&ctx, &other).unwrap());
    }

    #[test]
    fn test_editor_may_edit_anything() {
        let policy = ContentMutationPolicy;
        let ctx = actor(&[Capability::ContentEditable]);
        let other = json!({"created_user": Uuid::new_v4().to_string()});

        assert!(policy.can_edit(&ctx, &other).unwrap());
    }

    #[test]
    fn test_missing_author_is_denial_not_error() {
        let policy = ContentMutationPolicy;
        let ctx = actor(&[]);

        assert!(!policy.can_edit(&ctx, &json!({})).unwrap());
        assert!(!policy
            .can_edit(&ctx, &json!({"created_user": "not-a-uuid"}))
            .unwrap());
    }

    #[test]
    fn test_delete_requires_edit() {
        let policy = ContentMutationPolicy;
        let ctx = actor(&[]);
        let other = json!({
            "created_user": Uuid::new_v4().to_string(),
            "group_key": "g1",
        });

        assert!(!policy.can_delete(&ctx, &other, &FixedStore(0)).unwrap());
    }

    #[test]
    fn test_publisher_deletes_published_items() {
        let policy = ContentMutationPolicy;
        let ctx = actor(&[Capability::ContentEditable, Capability::ContentPublishable]);
        let payload = json!({
            "created_user": Uuid::new_v4().to_string(),
            "group_key": "g1",
        });

        // Active revisions exist, but the publisher may still delete.
        assert!(policy.can_delete(&ctx, &payload, &FixedStore(3)).unwrap());
    }

    #[test]
    fn test_owner_deletes_only_never_published_items() {
        let policy = ContentMutationPolicy;
        let ctx = actor(&[]);
        let own = json!({
            "created_user": ctx.user_id.unwrap().to_string(),
            "group_key": "g1",
        });

        assert!(policy.can_delete(&ctx, &own, &FixedStore(0)).unwrap());
        assert!(!policy.can_delete(&ctx, &own, &FixedStore(1)).unwrap());
    }

    #[test]
    fn test_delete_without_group_key_is_denied() {
        let policy = ContentMutationPolicy;
        let ctx = actor(&[]);
        let own = json!({"created_user": ctx.user_id.unwrap().to_string()});

        assert!(!policy.can_delete(&ctx, &own, &FixedStore(0)).unwrap());
    }

    #[test]
    fn test_store_failure_propagates() {
        let policy = ContentMutationPolicy;
        let ctx = actor(&[]);
        let own = json!({
            "created_user": ctx.user_id.unwrap().to_string(),
            "group_key": "g1",
        });

        let err = policy.can_delete(&ctx, &own, &BrokenStore).unwrap_err();
        assert_eq!(err, PolicyError::Store("backend down".into()));
    }

    #[test]
    fn test_unspecialized_policy_fails_fast_on_everything() {
        let policy = UnspecializedPolicy;
        let ctx = WorkflowContext::default();
        let empty = json!({});

        assert!(policy.can_read(&ctx).unwrap_err().is_unimplemented());
        assert!(policy.can_create(&ctx).unwrap_err().is_unimplemented());
        assert!(policy.can_edit(&ctx, &empty).unwrap_err().is_unimplemented());
        assert!(policy
            .can_delete(&ctx, &empty, &FixedStore(0))
            .unwrap_err()
            .is_unimplemented());

        // Same for a fully privileged actor: never a silent fallback.
        let privileged = actor(&[
            Capability::ContentReadable,
            Capability::ContentCreatable,
            Capability::ContentEditable,
            Capability::ContentPublishable,
        ]);
        assert!(policy.can_read(&privileged).unwrap_err().is_unimplemented());
    }
}
