//! Container manager for entity placement.
//!
//! The `ContainerManager` tracks which container every contained entity sits
//! in and handles movement between containers. It supports:
//! - Ordered contents with append semantics
//! - Optional per-container capacity
//! - Parent lookup (the owner of an entity's container)
//! - Outermost-container queries across nested containers

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::entity::EntityId;
use crate::core::error::{CardError, Result};

/// Container identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContainerId(pub u32);

impl ContainerId {
    /// Create a new container ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ContainerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Container({})", self.0)
    }
}

/// A named slot owned by an entity that can hold other entities.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    /// Unique identifier.
    pub id: ContainerId,

    /// Entity this container belongs to.
    pub owner: EntityId,

    /// Slot name, unique per owner.
    pub name: String,

    /// Maximum entities held. `None` for unlimited.
    pub capacity: Option<usize>,

    contents: Vec<EntityId>,
}

impl Container {
    /// Contained entities in insertion order.
    #[must_use]
    pub fn contents(&self) -> &[EntityId] {
        &self.contents
    }

    /// Number of contained entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    /// Check if nothing is contained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Check if the container is at capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.capacity.is_some_and(|c| self.contents.len() >= c)
    }

    /// Check if an entity is directly contained.
    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.contents.contains(&entity)
    }
}

/// Manages entity placement across containers.
///
/// ## Usage
///
/// ```
/// use card_hands::containers::ContainerManager;
/// use card_hands::core::EntityId;
///
/// let mut manager = ContainerManager::new();
///
/// let table = EntityId(1);
/// let drawer = manager.ensure_container(table, "drawer", None);
///
/// manager.insert(EntityId(10), drawer).unwrap();
/// assert_eq!(manager.parent(EntityId(10)), Some(table));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContainerManager {
    /// Entity locations: entity -> container
    locations: FxHashMap<EntityId, ContainerId>,

    /// All containers by id.
    containers: FxHashMap<ContainerId, Container>,

    /// Containers owned by each entity, in creation order.
    by_owner: FxHashMap<EntityId, Vec<ContainerId>>,

    /// Next container ID to allocate.
    next_id: u32,
}

impl ContainerManager {
    /// Create a new empty container manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the container `name` on `owner`.
    ///
    /// An existing container keeps its original capacity.
    pub fn ensure_container(
        &mut self,
        owner: EntityId,
        name: &str,
        capacity: Option<usize>,
    ) -> ContainerId {
        if let Some(id) = self.find(owner, name) {
            return id;
        }

        let id = ContainerId::new(self.next_id);
        self.next_id += 1;

        self.containers.insert(
            id,
            Container {
                id,
                owner,
                name: name.to_string(),
                capacity,
                contents: Vec::new(),
            },
        );
        self.by_owner.entry(owner).or_default().push(id);
        id
    }

    /// Find a container by owner and name.
    #[must_use]
    pub fn find(&self, owner: EntityId, name: &str) -> Option<ContainerId> {
        self.by_owner
            .get(&owner)?
            .iter()
            .copied()
            .find(|id| self.containers.get(id).is_some_and(|c| c.name == name))
    }

    /// Get a container by id.
    #[must_use]
    pub fn get(&self, id: ContainerId) -> Option<&Container> {
        self.containers.get(&id)
    }

    /// Containers owned by an entity.
    #[must_use]
    pub fn containers_of(&self, owner: EntityId) -> &[ContainerId] {
        self.by_owner.get(&owner).map_or(&[], |v| v.as_slice())
    }

    /// Contents of a container, empty if it does not exist.
    #[must_use]
    pub fn contents(&self, id: ContainerId) -> &[EntityId] {
        self.containers.get(&id).map_or(&[], |c| c.contents())
    }

    /// The container an entity sits in directly.
    #[must_use]
    pub fn container_of(&self, entity: EntityId) -> Option<ContainerId> {
        self.locations.get(&entity).copied()
    }

    /// Check if an entity sits in any container.
    #[must_use]
    pub fn is_in_container(&self, entity: EntityId) -> bool {
        self.locations.contains_key(&entity)
    }

    /// The owner of the container an entity sits in.
    #[must_use]
    pub fn parent(&self, entity: EntityId) -> Option<EntityId> {
        let container = self.container_of(entity)?;
        self.containers.get(&container).map(|c| c.owner)
    }

    /// Walk from an entity up through the owners of its containers.
    ///
    /// Yields the entity's parent first and the outermost ancestor last.
    pub fn ancestors(&self, entity: EntityId) -> impl Iterator<Item = EntityId> + '_ {
        std::iter::successors(self.parent(entity), move |&e| self.parent(e))
    }

    /// The outermost container found walking up from an entity.
    ///
    /// A card inside a hand held by an actor resolves to the actor's hand
    /// slot, not to the hand's own card container.
    #[must_use]
    pub fn outer_container(&self, entity: EntityId) -> Option<ContainerId> {
        let mut outer = self.container_of(entity)?;
        for ancestor in self.ancestors(entity) {
            if let Some(container) = self.container_of(ancestor) {
                outer = container;
            }
        }
        Some(outer)
    }

    /// Check whether `entity` may go into `container`.
    pub fn can_insert(&self, entity: EntityId, container: ContainerId) -> Result<()> {
        let target = self
            .containers
            .get(&container)
            .ok_or(CardError::NoSuchContainer(container))?;

        if target.contains(entity) {
            return Ok(());
        }
        if target.is_full() {
            return Err(CardError::ContainerFull(container));
        }
        if target.owner == entity || self.ancestors(target.owner).any(|a| a == entity) {
            return Err(CardError::RecursiveInsert { entity });
        }
        Ok(())
    }

    /// Insert an entity, moving it out of any previous container.
    ///
    /// Returns the previous container, if any. Inserting into the container
    /// the entity already sits in is a no-op.
    pub fn insert(&mut self, entity: EntityId, container: ContainerId) -> Result<Option<ContainerId>> {
        self.can_insert(entity, container)?;

        let old = self.container_of(entity);
        if old == Some(container) {
            return Ok(old);
        }

        self.remove(entity);
        self.locations.insert(entity, container);
        if let Some(target) = self.containers.get_mut(&container) {
            target.contents.push(entity);
        }
        Ok(old)
    }

    /// Remove an entity from its container.
    ///
    /// Returns the container it was in, or `None` if not contained.
    pub fn remove(&mut self, entity: EntityId) -> Option<ContainerId> {
        let container = self.locations.remove(&entity)?;

        if let Some(c) = self.containers.get_mut(&container) {
            c.contents.retain(|&e| e != entity);
        }

        Some(container)
    }

    /// Drop every container owned by `owner`.
    ///
    /// Returns the entities that were inside them; they are no longer
    /// tracked as contained.
    pub fn remove_owner(&mut self, owner: EntityId) -> Vec<EntityId> {
        let mut orphans = Vec::new();

        for id in self.by_owner.remove(&owner).unwrap_or_default() {
            if let Some(container) = self.containers.remove(&id) {
                for entity in container.contents {
                    self.locations.remove(&entity);
                    orphans.push(entity);
                }
            }
        }

        orphans
    }

    /// Total number of contained entities.
    #[must_use]
    pub fn total_contained(&self) -> usize {
        self.locations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_is_idempotent() {
        let mut manager = ContainerManager::new();
        let owner = EntityId(1);

        let a = manager.ensure_container(owner, "slot", Some(1));
        let b = manager.ensure_container(owner, "slot", None);

        assert_eq!(a, b);
        assert_eq!(manager.get(a).unwrap().capacity, Some(1));
        assert_eq!(manager.containers_of(owner), &[a]);
    }

    #[test]
    fn test_insert_and_parent() {
        let mut manager = ContainerManager::new();
        let owner = EntityId(1);
        let slot = manager.ensure_container(owner, "slot", None);

        assert_eq!(manager.insert(EntityId(10), slot), Ok(None));

        assert_eq!(manager.container_of(EntityId(10)), Some(slot));
        assert_eq!(manager.parent(EntityId(10)), Some(owner));
        assert!(manager.is_in_container(EntityId(10)));
        assert!(!manager.is_in_container(EntityId(99)));
    }

    #[test]
    fn test_insert_preserves_order() {
        let mut manager = ContainerManager::new();
        let slot = manager.ensure_container(EntityId(1), "slot", None);

        for e in [12, 10, 11] {
            manager.insert(EntityId(e), slot).unwrap();
        }

        assert_eq!(manager.contents(slot), &[EntityId(12), EntityId(10), EntityId(11)]);
    }

    #[test]
    fn test_move_between_containers() {
        let mut manager = ContainerManager::new();
        let a = manager.ensure_container(EntityId(1), "a", None);
        let b = manager.ensure_container(EntityId(2), "b", None);

        manager.insert(EntityId(10), a).unwrap();
        let old = manager.insert(EntityId(10), b).unwrap();

        assert_eq!(old, Some(a));
        assert!(manager.contents(a).is_empty());
        assert_eq!(manager.contents(b), &[EntityId(10)]);
    }

    #[test]
    fn test_capacity() {
        let mut manager = ContainerManager::new();
        let slot = manager.ensure_container(EntityId(1), "hand", Some(1));

        manager.insert(EntityId(10), slot).unwrap();
        assert_eq!(manager.insert(EntityId(11), slot), Err(CardError::ContainerFull(slot)));

        // Re-inserting the occupant is fine
        assert_eq!(manager.insert(EntityId(10), slot), Ok(Some(slot)));
    }

    #[test]
    fn test_recursive_insert_rejected() {
        let mut manager = ContainerManager::new();
        let bag = EntityId(1);
        let box_ = EntityId(2);
        let bag_slot = manager.ensure_container(bag, "storage", None);
        let box_slot = manager.ensure_container(box_, "storage", None);

        manager.insert(box_, bag_slot).unwrap();

        assert_eq!(
            manager.insert(bag, box_slot),
            Err(CardError::RecursiveInsert { entity: bag })
        );
        assert_eq!(
            manager.insert(bag, bag_slot),
            Err(CardError::RecursiveInsert { entity: bag })
        );
    }

    #[test]
    fn test_outer_container() {
        let mut manager = ContainerManager::new();
        let actor = EntityId(1);
        let hand = EntityId(2);
        let card = EntityId(3);
        let slot = manager.ensure_container(actor, "hand-0", Some(1));
        let cards = manager.ensure_container(hand, "cards", None);

        manager.insert(hand, slot).unwrap();
        manager.insert(card, cards).unwrap();

        assert_eq!(manager.outer_container(card), Some(slot));
        assert_eq!(manager.outer_container(hand), Some(slot));
        assert_eq!(manager.outer_container(actor), None);
        assert_eq!(manager.ancestors(card).collect::<Vec<_>>(), vec![hand, actor]);
    }

    #[test]
    fn test_remove() {
        let mut manager = ContainerManager::new();
        let slot = manager.ensure_container(EntityId(1), "slot", None);
        manager.insert(EntityId(10), slot).unwrap();

        assert_eq!(manager.remove(EntityId(10)), Some(slot));
        assert_eq!(manager.remove(EntityId(10)), None);
        assert_eq!(manager.total_contained(), 0);
    }

    #[test]
    fn test_remove_owner_returns_orphans() {
        let mut manager = ContainerManager::new();
        let owner = EntityId(1);
        let a = manager.ensure_container(owner, "a", None);
        let b = manager.ensure_container(owner, "b", None);
        manager.insert(EntityId(10), a).unwrap();
        manager.insert(EntityId(11), b).unwrap();

        let orphans = manager.remove_owner(owner);

        assert_eq!(orphans, vec![EntityId(10), EntityId(11)]);
        assert!(manager.get(a).is_none());
        assert!(manager.containers_of(owner).is_empty());
        assert_eq!(manager.total_contained(), 0);
    }
}
