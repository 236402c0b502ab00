//! Entity prototypes.
//!
//! A prototype is a named recipe listing the components a freshly spawned
//! entity starts with. Hosts register their own; `with_defaults` covers the
//! card, hand and deck prototypes the hand controller spawns.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::config::{CARD_DECK_PROTOTYPE, CARD_HAND_PROTOTYPE, CARD_PROTOTYPE};
use super::world::ComponentKind;

/// A named spawn recipe.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prototype {
    /// Unique prototype name.
    pub id: String,

    /// Components added on spawn, in order.
    pub components: Vec<ComponentKind>,
}

impl Prototype {
    /// Create a prototype with no components.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            components: Vec::new(),
        }
    }

    /// Add a component (builder pattern).
    #[must_use]
    pub fn with(mut self, kind: ComponentKind) -> Self {
        if !self.components.contains(&kind) {
            self.components.push(kind);
        }
        self
    }
}

/// Prototype lookup by name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrototypeRegistry {
    prototypes: FxHashMap<String, Prototype>,
}

impl PrototypeRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the card, hand and deck prototypes.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Prototype::new(CARD_PROTOTYPE).with(ComponentKind::Card));
        registry.register(
            Prototype::new(CARD_HAND_PROTOTYPE)
                .with(ComponentKind::CardStack)
                .with(ComponentKind::CardHand),
        );
        registry.register(
            Prototype::new(CARD_DECK_PROTOTYPE)
                .with(ComponentKind::CardStack)
                .with(ComponentKind::CardDeck),
        );
        registry
    }

    /// Register or replace a prototype.
    pub fn register(&mut self, prototype: Prototype) {
        self.prototypes.insert(prototype.id.clone(), prototype);
    }

    /// Look up a prototype.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Prototype> {
        self.prototypes.get(id)
    }

    /// Check if a prototype exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.prototypes.contains_key(id)
    }

    /// Number of registered prototypes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    /// Check if no prototypes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }
}
