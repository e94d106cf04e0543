//! Acting-user context
//!
//! Everything the policy needs about "who is asking, from where, when"
//! is injected through this context: capability set, identity, current
//! language, multilingual mode, and the wall clock. The policy never
//! reads time or session state directly.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Content capabilities an actor may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Capability {
    /// May read published content
    ContentReadable,
    /// May create new revisions
    ContentCreatable,
    /// May edit any revision
    ContentEditable,
    /// May publish / unpublish revisions
    ContentPublishable,
}

impl Capability {
    /// Returns the capability name for log output
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ContentReadable => "content_readable",
            Capability::ContentCreatable => "content_creatable",
            Capability::ContentEditable => "content_editable",
            Capability::ContentPublishable => "content_publishable",
        }
    }
}

/// Visibility tier derived from the capability set.
///
/// Editor outranks Creator; an actor holding both is an Editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Sees the full revision history
    Editor,
    /// Sees others' active public revisions plus their own latest
    Creator,
    /// Sees active, publicly visible revisions only
    Default,
}

impl Tier {
    /// Returns the tier name for log output
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Editor => "editor",
            Tier::Creator => "creator",
            Tier::Default => "default",
        }
    }
}

/// Context carried into every policy decision
#[derive(Debug, Clone)]
pub struct WorkflowContext {
    /// The acting user's ID (None if anonymous)
    pub user_id: Option<Uuid>,

    /// The session's current content language
    pub language_id: i64,

    /// Whether the installation runs with multiple languages enabled
    pub multilingual: bool,

    /// Injected wall-clock time for publication-window checks
    pub now: DateTime<Utc>,

    /// Capabilities held by the actor
    capabilities: BTreeSet<Capability>,
}

impl WorkflowContext {
    /// Context for an anonymous visitor
    pub fn anonymous(language_id: i64, now: DateTime<Utc>) -> Self {
        Self {
            user_id: None,
            language_id,
            multilingual: false,
            now,
            capabilities: BTreeSet::new(),
        }
    }

    /// Context for an authenticated user with no capabilities yet
    pub fn authenticated(user_id: Uuid, language_id: i64, now: DateTime<Utc>) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::anonymous(language_id, now)
        }
    }

    /// Grants a capability
    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.insert(capability);
        self
    }

    /// Enables multilingual mode
    pub fn with_multilingual(mut self, multilingual: bool) -> Self {
        self.multilingual = multilingual;
        self
    }

    /// Returns true if the actor holds the capability
    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Resolves the visibility tier from the capability set
    pub fn tier(&self) -> Tier {
        if self.has(Capability::ContentEditable) {
            Tier::Editor
        } else if self.has(Capability::ContentCreatable) {
            Tier::Creator
        } else {
            Tier::Default
        }
    }
}

impl Default for WorkflowContext {
    fn default() -> Self {
        Self::anonymous(1, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2026-08-26T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_anonymous_has_no_capabilities() {
        let ctx = WorkflowContext::anonymous(2, now());

        assert_eq!(ctx.user_id, None);
        assert_eq!(ctx.language_id, 2);
        assert!(!ctx.has(Capability::ContentReadable));
        assert_eq!(ctx.tier(), Tier::Default);
    }

    #[test]
    fn test_editor_outranks_creator() {
        let ctx = WorkflowContext::authenticated(Uuid::new_v4(), 1, now())
            .with_capability(Capability::ContentCreatable)
            .with_capability(Capability::ContentEditable);

        assert_eq!(ctx.tier(), Tier::Editor);
    }

    #[test]
    fn test_creator_tier() {
        let ctx = WorkflowContext::authenticated(Uuid::new_v4(), 1, now())
            .with_capability(Capability::ContentCreatable);

        assert_eq!(ctx.tier(), Tier::Creator);
    }

    #[test]
    fn test_capability_names() {
        assert_eq!(Capability::ContentPublishable.as_str(), "content_publishable");
        assert_eq!(Tier::Default.as_str(), "default");
    }
}
