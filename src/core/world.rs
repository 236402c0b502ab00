//! Entity storage: the arena every system works against.
//!
//! ## World
//!
//! The `World` owns:
//! - Live entities and the prototype each was spawned from
//! - Per-component sparse maps (`ComponentStore`)
//! - World positions for entities that are not contained
//! - Container placement (`ContainerManager`)
//! - The queue of entity events raised by service operations
//!
//! Component lookups go through the `Component` trait and always return an
//! `Option`; a missing entity and a missing component look the same to the
//! caller.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::entity::{EntityAllocator, EntityId};
use super::error::{CardError, Result};
use super::prototype::PrototypeRegistry;
use crate::cards::{Card, CardDeck, CardHand, CardStack};
use crate::containers::{ContainerId, ContainerManager};
use crate::events::EntityEvent;
use crate::hands::{Actor, Hands};

/// Component kinds known to the world.
///
/// Used by prototypes and by event subscriptions, which name the component
/// an entity must carry for a handler to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Card,
    CardStack,
    CardHand,
    CardDeck,
    Actor,
    Hands,
}

/// A component type stored in a sparse map keyed by entity.
pub trait Component: Clone + Default + 'static {
    /// The kind tag for this component.
    const KIND: ComponentKind;

    /// The map holding this component.
    fn storage(store: &ComponentStore) -> &FxHashMap<EntityId, Self>;

    /// The map holding this component, mutably.
    fn storage_mut(store: &mut ComponentStore) -> &mut FxHashMap<EntityId, Self>;
}

/// One sparse map per component kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComponentStore {
    pub(crate) cards: FxHashMap<EntityId, Card>,
    pub(crate) stacks: FxHashMap<EntityId, CardStack>,
    pub(crate) card_hands: FxHashMap<EntityId, CardHand>,
    pub(crate) card_decks: FxHashMap<EntityId, CardDeck>,
    pub(crate) actors: FxHashMap<EntityId, Actor>,
    pub(crate) hands: FxHashMap<EntityId, Hands>,
}

impl ComponentStore {
    fn has_kind(&self, entity: EntityId, kind: ComponentKind) -> bool {
        match kind {
            ComponentKind::Card => self.cards.contains_key(&entity),
            ComponentKind::CardStack => self.stacks.contains_key(&entity),
            ComponentKind::CardHand => self.card_hands.contains_key(&entity),
            ComponentKind::CardDeck => self.card_decks.contains_key(&entity),
            ComponentKind::Actor => self.actors.contains_key(&entity),
            ComponentKind::Hands => self.hands.contains_key(&entity),
        }
    }

    fn add_default(&mut self, entity: EntityId, kind: ComponentKind) {
        match kind {
            ComponentKind::Card => {
                self.cards.entry(entity).or_default();
            }
            ComponentKind::CardStack => {
                self.stacks.entry(entity).or_default();
            }
            ComponentKind::CardHand => {
                self.card_hands.entry(entity).or_default();
            }
            ComponentKind::CardDeck => {
                self.card_decks.entry(entity).or_default();
            }
            ComponentKind::Actor => {
                self.actors.entry(entity).or_default();
            }
            ComponentKind::Hands => {
                self.hands.entry(entity).or_default();
            }
        }
    }

    fn remove_all(&mut self, entity: EntityId) {
        self.cards.remove(&entity);
        self.stacks.remove(&entity);
        self.card_hands.remove(&entity);
        self.card_decks.remove(&entity);
        self.actors.remove(&entity);
        self.hands.remove(&entity);
    }
}

/// A point on the map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MapCoordinates {
    pub x: f32,
    pub y: f32,
}

impl MapCoordinates {
    /// Create coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Per-entity bookkeeping.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMeta {
    /// Prototype the entity was spawned from, if any.
    pub prototype: Option<String>,
}

/// The entity arena.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    alloc: EntityAllocator,
    entities: FxHashMap<EntityId, EntityMeta>,
    positions: FxHashMap<EntityId, MapCoordinates>,
    components: ComponentStore,

    /// Container placement.
    pub containers: ContainerManager,

    /// Spawn recipes.
    pub prototypes: PrototypeRegistry,

    events: VecDeque<EntityEvent>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create a world with the default card prototypes.
    #[must_use]
    pub fn new() -> Self {
        Self::with_prototypes(PrototypeRegistry::with_defaults())
    }

    /// Create a world with a custom prototype registry.
    #[must_use]
    pub fn with_prototypes(prototypes: PrototypeRegistry) -> Self {
        Self {
            alloc: EntityAllocator::new(),
            entities: FxHashMap::default(),
            positions: FxHashMap::default(),
            components: ComponentStore::default(),
            containers: ContainerManager::new(),
            prototypes,
            events: VecDeque::new(),
        }
    }

    // === Lifecycle ===

    /// Spawn an entity with no components at `coords`.
    pub fn spawn_empty(&mut self, coords: MapCoordinates) -> EntityId {
        let id = self.alloc.alloc();
        self.entities.insert(id, EntityMeta::default());
        self.positions.insert(id, coords);
        id
    }

    /// Spawn an entity from a prototype at `coords`.
    pub fn spawn(&mut self, prototype: &str, coords: MapCoordinates) -> Result<EntityId> {
        let components = self
            .prototypes
            .get(prototype)
            .ok_or_else(|| CardError::UnknownPrototype(prototype.to_string()))?
            .components
            .clone();

        let id = self.spawn_empty(coords);
        if let Some(meta) = self.entities.get_mut(&id) {
            meta.prototype = Some(prototype.to_string());
        }
        for kind in components {
            self.components.add_default(id, kind);
        }

        tracing::trace!(entity = %id, prototype, "Spawned entity");
        Ok(id)
    }

    /// Spawn an entity from a prototype straight into a container.
    ///
    /// If the container refuses it, the entity is dropped at the container
    /// owner's position instead.
    pub fn spawn_in_container_or_drop(
        &mut self,
        prototype: &str,
        container: ContainerId,
    ) -> Result<EntityId> {
        let owner = self
            .containers
            .get(container)
            .map(|c| c.owner)
            .ok_or(CardError::NoSuchContainer(container))?;
        let coords = self.position(owner).unwrap_or_default();

        let id = self.spawn(prototype, coords)?;
        if let Err(err) = self.insert_into(id, container) {
            tracing::debug!(entity = %id, %container, %err, "Container refused spawn, dropping");
        }
        Ok(id)
    }

    /// Delete an entity and everything contained in it.
    ///
    /// Returns false if the entity did not exist.
    pub fn delete(&mut self, entity: EntityId) -> bool {
        if self.entities.remove(&entity).is_none() {
            return false;
        }

        self.containers.remove(entity);
        for child in self.containers.remove_owner(entity) {
            self.delete(child);
        }

        for stack in self.components.stacks.values_mut() {
            if stack.contains(entity) {
                stack.cards.retain(|&c| c != entity);
            }
        }

        self.components.remove_all(entity);
        self.positions.remove(&entity);
        tracing::trace!(%entity, "Deleted entity");
        true
    }

    /// Check if an entity is alive.
    #[must_use]
    pub fn exists(&self, entity: EntityId) -> bool {
        self.entities.contains_key(&entity)
    }

    /// Number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Live entities, unordered.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys().copied()
    }

    /// Prototype an entity was spawned from.
    #[must_use]
    pub fn prototype_of(&self, entity: EntityId) -> Option<&str> {
        self.entities.get(&entity)?.prototype.as_deref()
    }

    // === Components ===

    /// Get a component.
    #[must_use]
    pub fn get<T: Component>(&self, entity: EntityId) -> Option<&T> {
        T::storage(&self.components).get(&entity)
    }

    /// Get a component mutably.
    pub fn get_mut<T: Component>(&mut self, entity: EntityId) -> Option<&mut T> {
        T::storage_mut(&mut self.components).get_mut(&entity)
    }

    /// Check if an entity carries a component.
    #[must_use]
    pub fn has<T: Component>(&self, entity: EntityId) -> bool {
        T::storage(&self.components).contains_key(&entity)
    }

    /// Check if an entity carries a component by kind tag.
    #[must_use]
    pub fn has_kind(&self, entity: EntityId, kind: ComponentKind) -> bool {
        self.components.has_kind(entity, kind)
    }

    /// Attach a component, replacing any existing one.
    ///
    /// Returns false if the entity does not exist.
    pub fn insert_component<T: Component>(&mut self, entity: EntityId, component: T) -> bool {
        if !self.exists(entity) {
            return false;
        }
        T::storage_mut(&mut self.components).insert(entity, component);
        true
    }

    /// Get a component, attaching a default one first if missing.
    ///
    /// Returns `None` only if the entity does not exist.
    pub fn ensure<T: Component>(&mut self, entity: EntityId) -> Option<&mut T> {
        if !self.exists(entity) {
            return None;
        }
        Some(T::storage_mut(&mut self.components).entry(entity).or_default())
    }

    /// Detach a component.
    pub fn remove_component<T: Component>(&mut self, entity: EntityId) -> Option<T> {
        T::storage_mut(&mut self.components).remove(&entity)
    }

    /// Entities carrying a component, unordered.
    pub fn query<T: Component>(&self) -> impl Iterator<Item = (EntityId, &T)> + '_ {
        T::storage(&self.components).iter().map(|(&e, c)| (e, c))
    }

    // === Placement ===

    /// World position of an entity, resolved through its containers.
    #[must_use]
    pub fn position(&self, entity: EntityId) -> Option<MapCoordinates> {
        if !self.exists(entity) {
            return None;
        }
        match self.containers.parent(entity) {
            Some(parent) => self.position(parent),
            None => self.positions.get(&entity).copied(),
        }
    }

    /// Place an entity at `coords`, taking it out of any container.
    pub fn set_position(&mut self, entity: EntityId, coords: MapCoordinates) {
        if !self.exists(entity) {
            return;
        }
        self.containers.remove(entity);
        self.positions.insert(entity, coords);
    }

    /// Insert an entity into a container.
    pub fn insert_into(&mut self, entity: EntityId, container: ContainerId) -> Result<()> {
        if !self.exists(entity) {
            return Err(CardError::NoSuchEntity(entity));
        }
        self.containers.insert(entity, container)?;
        self.positions.remove(&entity);
        Ok(())
    }

    /// Take an entity out of its container and drop it where the container
    /// owner stands.
    pub fn drop_from_container(&mut self, entity: EntityId) {
        let Some(coords) = self.containers.parent(entity).and_then(|p| self.position(p)) else {
            return;
        };
        self.set_position(entity, coords);
    }

    // === Events ===

    /// Queue an event for dispatch.
    pub fn queue_event(&mut self, event: EntityEvent) {
        self.events.push_back(event);
    }

    /// Take the oldest queued event.
    pub fn pop_event(&mut self) -> Option<EntityEvent> {
        self.events.pop_front()
    }

    /// Number of queued events.
    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }
}
