//! Revision schema shape
//!
//! Revision types are sparse: not every type carries every workflow
//! field. The policy branches on field presence, so presence is an
//! explicit set passed in, never inferred from a payload.

mod shape;

pub use shape::{PublicType, RevisionSchema, WorkflowStatus};

/// Canonical workflow field names shared by the policy and its callers.
pub mod fields {
    /// Identifier shared by all revisions of one logical item
    pub const GROUP_KEY: &str = "group_key";
    /// Currently the published/active revision of its group
    pub const IS_ACTIVE: &str = "is_active";
    /// Most recently created revision of its group
    pub const IS_LATEST: &str = "is_latest";
    /// Source-language revision (multilingual schemas only)
    pub const IS_ORIGIN: &str = "is_origin";
    /// Translated copy (multilingual schemas only)
    pub const IS_TRANSLATION: &str = "is_translation";
    /// Content language (multilingual schemas only)
    pub const LANGUAGE_ID: &str = "language_id";
    /// Authoring actor
    pub const CREATED_USER: &str = "created_user";
    /// Publication mode (public / limited)
    pub const PUBLIC_TYPE: &str = "public_type";
    /// Start of the limited publication window
    pub const PUBLISH_START: &str = "publish_start";
    /// End of the limited publication window
    pub const PUBLISH_END: &str = "publish_end";
    /// Workflow status
    pub const STATUS: &str = "status";
}
