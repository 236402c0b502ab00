//! Entity identification system.
//!
//! Every simulation object (card, hand, deck, actor, table) has a unique
//! `EntityId`. Ids are handed out by the `World` and never reused, so a
//! stale id simply stops resolving once its entity is deleted.
//!
//! ## Usage
//!
//! ```
//! use card_hands::core::{EntityAllocator, EntityId};
//!
//! let mut alloc = EntityAllocator::new();
//! let a = alloc.alloc();
//! let b = alloc.alloc();
//!
//! assert_ne!(a, b);
//! assert!(a.is_valid());
//! assert!(!EntityId::INVALID.is_valid());
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for any simulation entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// The id that never names a live entity.
    pub const INVALID: EntityId = EntityId(0);

    /// Check whether this id could name an entity.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Monotonic entity id source.
///
/// Starts at 1 so that `EntityId::INVALID` is never allocated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityAllocator {
    next: u32,
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityAllocator {
    /// Create a fresh allocator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next entity id.
    pub fn alloc(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.next - 1
    }
}
