//! # Read-visibility policy
//!
//! Builds the condition tree that filters a revision set down to what
//! the acting user may see. The tree is language-filter AND
//! (active-branch OR latest-branch), where the branches depend on the
//! actor's tier and on which optional fields the revision schema
//! carries.
//!
//! ## Invariants
//! - VIS1: Deterministic: identical context and schema yield an
//!   identical tree.
//! - VIS2: Schema-driven: a sub-predicate referencing a field is only
//!   emitted when the schema declares that field.
//! - VIS3: The empty latest branch of the default tier never widens
//!   visibility unless `EmptyLatestBranch::MatchAll` is chosen
//!   explicitly.

use chrono::SecondsFormat;
use serde_json::Value;
use tracing::{debug, trace};

use crate::context::{Tier, WorkflowContext};
use crate::predicate::{Condition, Predicate};
use crate::query::{ReadQuery, ReadQueryOverrides};
use crate::schema::{fields, PublicType, RevisionSchema};

/// Semantics of the default tier's empty latest branch.
///
/// Legacy merge semantics read an empty condition set inside an OR as
/// "match everything", which collapses default-tier visibility to
/// unrestricted. That reading is almost certainly a latent bug, so the
/// strict reading is the default and the legacy one is opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyLatestBranch {
    /// The empty branch contributes nothing (default)
    #[default]
    MatchNone,
    /// The empty branch matches everything (legacy merge semantics)
    MatchAll,
}

/// Read-visibility policy for workflow-managed revisions
#[derive(Debug, Clone, Default)]
pub struct VisibilityPolicy {
    empty_latest_branch: EmptyLatestBranch,
}

impl VisibilityPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the empty-latest-branch semantics
    pub fn with_empty_latest_branch(mut self, semantics: EmptyLatestBranch) -> Self {
        self.empty_latest_branch = semantics;
        self
    }

    /// Builds the condition tree for a read by this actor.
    ///
    /// Shape: `All[language?, Any[active, latest?]]`.
    pub fn read_predicate(&self, ctx: &WorkflowContext, schema: &RevisionSchema) -> Condition {
        let tier = ctx.tier();
        let branches = self.tier_branches(tier, ctx, schema);
        let visibility = Condition::any(branches);

        let mut parts = Vec::with_capacity(2);
        if let Some(language) = language_condition(ctx, schema) {
            parts.push(language);
        }
        parts.push(visibility);
        let predicate = Condition::all(parts);

        debug!(
            tier = tier.as_str(),
            leaves = predicate.leaf_count(),
            "built read predicate"
        );
        predicate
    }

    /// Builds a read-query specification with policy defaults.
    ///
    /// Defaults: `include_related = false`, `conditions =
    /// read_predicate(...)`. Every key supplied in `overrides` replaces
    /// the corresponding default wholesale: a caller-supplied
    /// `conditions` discards the computed predicate rather than
    /// intersecting with it.
    pub fn read_query(
        &self,
        ctx: &WorkflowContext,
        schema: &RevisionSchema,
        overrides: ReadQueryOverrides,
    ) -> ReadQuery {
        ReadQuery::defaults(self.read_predicate(ctx, schema)).override_with(overrides)
    }

    /// The active/latest branches of the visibility OR, per tier
    fn tier_branches(
        &self,
        tier: Tier,
        ctx: &WorkflowContext,
        schema: &RevisionSchema,
    ) -> Vec<Condition> {
        match tier {
            // Editors see the full history: the active branch is
            // unrestricted, which makes the OR unrestricted.
            Tier::Editor => vec![
                Condition::always(),
                Condition::cmp(Predicate::eq(fields::IS_LATEST, Value::from(true))),
            ],

            // Creators see other users' active public revisions plus
            // their own latest revision regardless of active state.
            Tier::Creator => {
                let user = user_value(ctx);
                let mut active = vec![
                    Condition::cmp(Predicate::eq(fields::IS_ACTIVE, Value::from(true))),
                    Condition::cmp(Predicate::ne(fields::CREATED_USER, user.clone())),
                ];
                if let Some(window) = publication_window(ctx, schema) {
                    active.push(window);
                }
                let latest = vec![
                    Condition::cmp(Predicate::eq(fields::IS_LATEST, Value::from(true))),
                    Condition::cmp(Predicate::eq(fields::CREATED_USER, user)),
                ];
                vec![Condition::all(active), Condition::all(latest)]
            }

            // Everyone else sees active, publicly visible revisions.
            // The latest branch is empty; its contribution is an
            // explicit policy choice.
            Tier::Default => {
                let mut active = vec![Condition::cmp(Predicate::eq(
                    fields::IS_ACTIVE,
                    Value::from(true),
                ))];
                if let Some(window) = publication_window(ctx, schema) {
                    active.push(window);
                }
                let mut branches = vec![Condition::all(active)];
                if self.empty_latest_branch == EmptyLatestBranch::MatchAll {
                    branches.push(Condition::always());
                }
                branches
            }
        }
    }
}

/// Language sub-predicate, gated on the schema carrying `language_id`.
fn language_condition(ctx: &WorkflowContext, schema: &RevisionSchema) -> Option<Condition> {
    if !schema.has_field(fields::LANGUAGE_ID) {
        return None;
    }

    let condition = if !ctx.multilingual && schema.has_field(fields::IS_ORIGIN) {
        trace!("language filter: origin only");
        Condition::cmp(Predicate::eq(fields::IS_ORIGIN, Value::from(true)))
    } else if schema.has_field(fields::IS_TRANSLATION) {
        trace!("language filter: current language or untranslated");
        Condition::any(vec![
            Condition::cmp(Predicate::eq(
                fields::LANGUAGE_ID,
                Value::from(ctx.language_id),
            )),
            Condition::cmp(Predicate::eq(fields::IS_TRANSLATION, Value::from(false))),
        ])
    } else {
        trace!("language filter: current language");
        Condition::cmp(Predicate::eq(
            fields::LANGUAGE_ID,
            Value::from(ctx.language_id),
        ))
    };
    Some(condition)
}

/// Time-boxed publication sub-predicate, gated on `public_type`.
///
/// `public OR (limited AND start-open AND end-open)`; each bound is
/// included only when its field exists on the schema, and an unset
/// bound is open on that side.
fn publication_window(ctx: &WorkflowContext, schema: &RevisionSchema) -> Option<Condition> {
    if !schema.has_field(fields::PUBLIC_TYPE) {
        return None;
    }

    let now = timestamp_value(ctx);
    let mut limited = vec![Condition::cmp(Predicate::eq(
        fields::PUBLIC_TYPE,
        PublicType::Limited.as_value(),
    ))];
    if schema.has_field(fields::PUBLISH_START) {
        limited.push(Condition::any(vec![
            Condition::cmp(Predicate::lte(fields::PUBLISH_START, now.clone())),
            Condition::cmp(Predicate::is_null(fields::PUBLISH_START)),
        ]));
    }
    if schema.has_field(fields::PUBLISH_END) {
        limited.push(Condition::any(vec![
            Condition::cmp(Predicate::gte(fields::PUBLISH_END, now)),
            Condition::cmp(Predicate::is_null(fields::PUBLISH_END)),
        ]));
    }

    Some(Condition::any(vec![
        Condition::cmp(Predicate::eq(
            fields::PUBLIC_TYPE,
            PublicType::Public.as_value(),
        )),
        Condition::all(limited),
    ]))
}

/// The actor's identity as a predicate value (null when anonymous)
fn user_value(ctx: &WorkflowContext) -> Value {
    match ctx.user_id {
        Some(id) => Value::from(id.to_string()),
        None => Value::Null,
    }
}

/// The injected clock as the predicate timestamp representation
fn timestamp_value(ctx: &WorkflowContext) -> Value {
    Value::from(ctx.now.to_rfc3339_opts(SecondsFormat::Secs, true))
}
