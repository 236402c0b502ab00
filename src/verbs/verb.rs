//! Alternative verbs: contextual actions offered in an entity's menu.
//!
//! A verb's action is data, not a closure, so menus can be built on one side
//! and executed later (or on the other side) without capturing state.

use serde::{Deserialize, Serialize};

use crate::core::entity::EntityId;

/// Icon shown next to a verb.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteSpecifier {
    /// A texture by resource path.
    Texture(String),
}

impl SpriteSpecifier {
    /// Texture icon (builder shorthand).
    pub fn texture(path: impl Into<String>) -> Self {
        SpriteSpecifier::Texture(path.into())
    }
}

/// What happens when a verb is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerbAct {
    /// Open the hand inspection UI of `hand` for `user`.
    OpenHandMenu { user: EntityId, hand: EntityId },
    /// Turn `hand` into a deck on behalf of `user`.
    ConvertToDeck { user: EntityId, hand: EntityId },
}

/// A verb in an entity's alternative-action menu.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlternativeVerb {
    /// Localized label.
    pub text: String,

    /// Optional icon.
    pub icon: Option<SpriteSpecifier>,

    /// Ordering hint: higher priority is listed first.
    pub priority: i32,

    /// Action run when chosen.
    pub act: VerbAct,
}

impl AlternativeVerb {
    /// Create a verb with priority 0 and no icon.
    pub fn new(text: impl Into<String>, act: VerbAct) -> Self {
        Self {
            text: text.into(),
            icon: None,
            priority: 0,
            act,
        }
    }

    /// Set the icon (builder pattern).
    #[must_use]
    pub fn with_icon(mut self, icon: SpriteSpecifier) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Set the priority (builder pattern).
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// Sort verbs for display: highest priority first, then by label.
pub fn sort_verbs(verbs: &mut [AlternativeVerb]) {
    verbs.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.text.cmp(&b.text)));
}
