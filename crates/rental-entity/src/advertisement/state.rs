//! Moderation state derived from the stored advertisement flags.

use serde::{Deserialize, Serialize};

/// Where a listing sits in the moderation workflow.
///
/// The state is not stored; it is derived from `published`, `is_deleted`
/// and `admin_comment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationState {
    /// Created, waiting for a moderator.
    Draft,
    /// Visible in the catalog (unless the owner is banned).
    Published,
    /// A moderator asked for changes; the owner may edit.
    NeedsRevision,
    /// Soft-deleted by the owner. Terminal.
    Deleted,
}

impl ModerationState {
    /// Derive the state from the stored flags.
    pub fn from_flags(published: bool, is_deleted: bool, admin_comment: Option<&str>) -> Self {
        if is_deleted {
            Self::Deleted
        } else if published {
            Self::Published
        } else if admin_comment.is_some_and(|c| !c.trim().is_empty()) {
            Self::NeedsRevision
        } else {
            Self::Draft
        }
    }

    /// Moderators may publish, unpublish and comment on anything not deleted.
    pub fn can_moderate(self) -> bool {
        self != Self::Deleted
    }
}
