//! Entity events.
//!
//! Events are addressed at one entity and carry whatever the handlers need.
//! Handlers receive them by mutable reference so they can mark an
//! interaction handled or add verbs to a menu.

use serde::{Deserialize, Serialize};

use crate::core::entity::EntityId;
use crate::verbs::AlternativeVerb;

/// Event kind tag used for subscriptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    InteractUsing,
    CardHandDraw,
    StackQuantityChange,
    GetAlternativeVerbs,
}

/// How a stack's card count changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StackQuantityChangeType {
    Added,
    Removed,
    Joined,
    Split,
    Unknown,
}

/// `user` used `used` on `target`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractUsing {
    pub user: EntityId,
    pub used: EntityId,
    pub target: EntityId,
    /// Set once a handler consumed the interaction.
    pub handled: bool,
}

impl InteractUsing {
    #[must_use]
    pub fn new(user: EntityId, used: EntityId, target: EntityId) -> Self {
        Self {
            user,
            used,
            target,
            handled: false,
        }
    }
}

/// `actor` asks to take `card` out of `hand`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardHandDrawMessage {
    pub hand: EntityId,
    pub card: EntityId,
    pub actor: EntityId,
}

/// The card count of `stack` changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackQuantityChange {
    pub stack: EntityId,
    pub kind: StackQuantityChangeType,
}

/// `user` opened the alternative-action menu of `target`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GetAlternativeVerbs {
    pub user: EntityId,
    pub target: EntityId,
    /// Verbs contributed by handlers.
    pub verbs: Vec<AlternativeVerb>,
}

impl GetAlternativeVerbs {
    #[must_use]
    pub fn new(user: EntityId, target: EntityId) -> Self {
        Self {
            user,
            target,
            verbs: Vec::new(),
        }
    }
}

/// Any event the card systems react to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EntityEvent {
    InteractUsing(InteractUsing),
    CardHandDraw(CardHandDrawMessage),
    StackQuantityChange(StackQuantityChange),
    GetAlternativeVerbs(GetAlternativeVerbs),
}

impl EntityEvent {
    /// The kind tag of this event.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            EntityEvent::InteractUsing(_) => EventKind::InteractUsing,
            EntityEvent::CardHandDraw(_) => EventKind::CardHandDraw,
            EntityEvent::StackQuantityChange(_) => EventKind::StackQuantityChange,
            EntityEvent::GetAlternativeVerbs(_) => EventKind::GetAlternativeVerbs,
        }
    }

    /// The entity this event is raised on.
    #[must_use]
    pub fn target(&self) -> EntityId {
        match self {
            EntityEvent::InteractUsing(e) => e.target,
            EntityEvent::CardHandDraw(e) => e.hand,
            EntityEvent::StackQuantityChange(e) => e.stack,
            EntityEvent::GetAlternativeVerbs(e) => e.target,
        }
    }

    /// Quantity-change event (builder shorthand).
    #[must_use]
    pub fn quantity_change(stack: EntityId, kind: StackQuantityChangeType) -> Self {
        EntityEvent::StackQuantityChange(StackQuantityChange { stack, kind })
    }
}
