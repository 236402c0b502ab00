//! Floating text popups shown above entities.

use serde::{Deserialize, Serialize};

use crate::core::entity::EntityId;

/// One popup shown above an entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Popup {
    pub text: String,
    pub entity: EntityId,
}

/// Records popups in the order they were raised.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PopupSystem {
    shown: Vec<Popup>,
}

impl PopupSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `text` above `entity`.
    pub fn popup_entity(&mut self, text: impl Into<String>, entity: EntityId) {
        let text = text.into();
        tracing::trace!(%entity, %text, "Popup");
        self.shown.push(Popup { text, entity });
    }

    /// All popups so far, oldest first.
    #[must_use]
    pub fn shown(&self) -> &[Popup] {
        &self.shown
    }

    /// Popups shown above one entity.
    pub fn shown_for(&self, entity: EntityId) -> impl Iterator<Item = &Popup> + '_ {
        self.shown.iter().filter(move |p| p.entity == entity)
    }

    /// Hand the recorded popups to the caller, clearing the log.
    pub fn take(&mut self) -> Vec<Popup> {
        std::mem::take(&mut self.shown)
    }
}
