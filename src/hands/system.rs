//! Picking things up and holding them.

use crate::core::entity::EntityId;
use crate::core::world::World;

use super::component::Hands;

/// Hand-slot operations the card controller needs.
pub trait HandsService {
    /// Put `entity` into any free hand of `actor`, active hand first.
    ///
    /// Returns false if the actor has no hands, all are full, or the
    /// entity cannot be held.
    fn try_pickup_any_hand(&mut self, world: &mut World, actor: EntityId, entity: EntityId) -> bool;

    /// Check if `actor` holds `entity` in one of its hands.
    fn is_holding(&self, world: &World, actor: EntityId, entity: EntityId) -> bool;
}

/// Default hands service backed by single-slot containers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HandsSystem;

impl HandsSystem {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Give `actor` `count` empty hands. The first one is active.
    ///
    /// Existing hands are kept; returns false if the actor does not exist.
    pub fn add_hands(&self, world: &mut World, actor: EntityId, count: usize) -> bool {
        let existing = world.get::<Hands>(actor).map_or(0, Hands::count);
        let slots: Vec<_> = (existing..existing + count)
            .map(|i| world.containers.ensure_container(actor, &format!("hand-{i}"), Some(1)))
            .collect();

        match world.ensure::<Hands>(actor) {
            Some(hands) => {
                hands.slots.extend(slots);
                true
            }
            None => false,
        }
    }

    /// Make another slot the active one.
    pub fn set_active(&self, world: &mut World, actor: EntityId, slot: usize) -> bool {
        match world.get_mut::<Hands>(actor) {
            Some(hands) if slot < hands.count() => {
                hands.active = slot;
                true
            }
            _ => false,
        }
    }

    /// Everything `actor` holds, in slot order.
    #[must_use]
    pub fn held(&self, world: &World, actor: EntityId) -> Vec<EntityId> {
        let Some(hands) = world.get::<Hands>(actor) else {
            return Vec::new();
        };
        hands
            .slots
            .iter()
            .flat_map(|&slot| world.containers.contents(slot).iter().copied())
            .collect()
    }

    /// Drop a held entity at the actor's feet.
    pub fn try_drop(&self, world: &mut World, actor: EntityId, entity: EntityId) -> bool {
        if !self.is_holding(world, actor, entity) {
            return false;
        }
        world.drop_from_container(entity);
        true
    }
}

impl HandsService for HandsSystem {
    fn try_pickup_any_hand(&mut self, world: &mut World, actor: EntityId, entity: EntityId) -> bool {
        if self.is_holding(world, actor, entity) {
            return true;
        }
        let Some(hands) = world.get::<Hands>(actor) else {
            return false;
        };
        let free = hands
            .slots_active_first()
            .find(|&slot| world.containers.contents(slot).is_empty());
        let Some(slot) = free else {
            tracing::debug!(%actor, %entity, "No free hand");
            return false;
        };

        match world.insert_into(entity, slot) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(%actor, %entity, %err, "Pickup refused");
                false
            }
        }
    }

    fn is_holding(&self, world: &World, actor: EntityId, entity: EntityId) -> bool {
        let (Some(hands), Some(container)) = (world.get::<Hands>(actor), world.containers.container_of(entity))
        else {
            return false;
        };
        hands.slots.contains(&container)
    }
}
