//! Actor and hand-slot components.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::containers::ContainerId;
use crate::core::entity::EntityId;
use crate::core::world::{Component, ComponentKind, ComponentStore};
use crate::ui::SessionId;

/// An entity driven by a connected player.
///
/// Simulated agents have hands but no `Actor`, or an `Actor` whose session
/// has detached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    /// The player session controlling this entity.
    pub session: Option<SessionId>,
}

impl Actor {
    /// Create an actor attached to a session.
    #[must_use]
    pub fn new(session: SessionId) -> Self {
        Self {
            session: Some(session),
        }
    }
}

/// Hand slots of an entity that can hold things.
///
/// Each slot is a single-capacity container owned by the entity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hands {
    /// Slot containers, in slot order.
    /// SmallVec optimizes for the usual two hands.
    pub slots: SmallVec<[ContainerId; 2]>,

    /// Index of the active slot.
    pub active: usize,
}

impl Hands {
    /// Number of slots.
    #[must_use]
    pub fn count(&self) -> usize {
        self.slots.len()
    }

    /// The active slot's container.
    #[must_use]
    pub fn active_slot(&self) -> Option<ContainerId> {
        self.slots.get(self.active).copied()
    }

    /// Slots with the active one first.
    pub fn slots_active_first(&self) -> impl Iterator<Item = ContainerId> + '_ {
        self.active_slot().into_iter().chain(
            self.slots
                .iter()
                .enumerate()
                .filter(move |(i, _)| *i != self.active)
                .map(|(_, &c)| c),
        )
    }
}

impl Component for Actor {
    const KIND: ComponentKind = ComponentKind::Actor;

    fn storage(store: &ComponentStore) -> &FxHashMap<EntityId, Self> {
        &store.actors
    }

    fn storage_mut(store: &mut ComponentStore) -> &mut FxHashMap<EntityId, Self> {
        &mut store.actors
    }
}

impl Component for Hands {
    const KIND: ComponentKind = ComponentKind::Hands;

    fn storage(store: &ComponentStore) -> &FxHashMap<EntityId, Self> {
        &store.hands
    }

    fn storage_mut(store: &mut ComponentStore) -> &mut FxHashMap<EntityId, Self> {
        &mut store.hands
    }
}
