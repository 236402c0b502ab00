//! Card components - per-entity card data.
//!
//! - `Card` marks an entity as a playable card and tracks its orientation.
//! - `CardStack` holds an ordered list of card entities.
//! - `CardHand` / `CardDeck` are markers telling hands and decks apart. Both
//!   are realized as entities that also carry a `CardStack`.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::entity::EntityId;
use crate::core::world::{Component, ComponentKind, ComponentStore};

/// A playable card.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Is this card face-down?
    pub face_down: bool,
}

impl Card {
    /// Create a face-up card.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a face-down card.
    #[must_use]
    pub fn flipped() -> Self {
        Self { face_down: true }
    }

    /// Check if the card shows its face.
    #[must_use]
    pub fn is_face_up(&self) -> bool {
        !self.face_down
    }
}

/// Ordered collection of card entities.
///
/// Index 0 is the bottom card; the last entry is the top. The list is only
/// mutated through the card stack service, which also keeps each card's
/// container placement in step with it.
///
/// Uses `im::Vector` so world snapshots share card lists instead of
/// copying them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardStack {
    pub(crate) cards: Vector<EntityId>,
}

impl CardStack {
    /// Name of the container a stack keeps its cards in.
    pub const CONTAINER: &'static str = "cardstack-container";

    /// Create an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cards in order, bottom first.
    pub fn cards(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.cards.iter().copied()
    }

    /// Cards as a vector, bottom first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<EntityId> {
        self.cards.iter().copied().collect()
    }

    /// Number of cards.
    #[must_use]
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    /// Check if there are no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Check if a card is in this stack.
    #[must_use]
    pub fn contains(&self, card: EntityId) -> bool {
        self.cards.contains(&card)
    }

    /// The top card.
    #[must_use]
    pub fn top(&self) -> Option<EntityId> {
        self.cards.last().copied()
    }
}

/// Marks a stack as a hand meant to be carried by an actor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardHand;

/// Marks a stack as a standalone deck.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardDeck;

impl Component for Card {
    const KIND: ComponentKind = ComponentKind::Card;

    fn storage(store: &ComponentStore) -> &FxHashMap<EntityId, Self> {
        &store.cards
    }

    fn storage_mut(store: &mut ComponentStore) -> &mut FxHashMap<EntityId, Self> {
        &mut store.cards
    }
}

impl Component for CardStack {
    const KIND: ComponentKind = ComponentKind::CardStack;

    fn storage(store: &ComponentStore) -> &FxHashMap<EntityId, Self> {
        &store.stacks
    }

    fn storage_mut(store: &mut ComponentStore) -> &mut FxHashMap<EntityId, Self> {
        &mut store.stacks
    }
}

impl Component for CardHand {
    const KIND: ComponentKind = ComponentKind::CardHand;

    fn storage(store: &ComponentStore) -> &FxHashMap<EntityId, Self> {
        &store.card_hands
    }

    fn storage_mut(store: &mut ComponentStore) -> &mut FxHashMap<EntityId, Self> {
        &mut store.card_hands
    }
}

impl Component for CardDeck {
    const KIND: ComponentKind = ComponentKind::CardDeck;

    fn storage(store: &ComponentStore) -> &FxHashMap<EntityId, Self> {
        &store.card_decks
    }

    fn storage_mut(store: &mut ComponentStore) -> &mut FxHashMap<EntityId, Self> {
        &mut store.card_decks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_orientation() {
        assert!(Card::new().is_face_up());
        assert!(!Card::flipped().is_face_up());
    }

    #[test]
    fn test_stack_queries() {
        let mut stack = CardStack::new();
        assert!(stack.is_empty());
        assert_eq!(stack.top(), None);

        stack.cards.push_back(EntityId(4));
        stack.cards.push_back(EntityId(7));

        assert_eq!(stack.count(), 2);
        assert_eq!(stack.top(), Some(EntityId(7)));
        assert!(stack.contains(EntityId(4)));
        assert!(!stack.contains(EntityId(5)));
        assert_eq!(stack.to_vec(), vec![EntityId(4), EntityId(7)]);
    }

    #[test]
    fn test_stack_clone_is_independent() {
        let mut stack = CardStack::new();
        stack.cards.push_back(EntityId(1));

        let snapshot = stack.clone();
        stack.cards.push_back(EntityId(2));

        assert_eq!(snapshot.count(), 1);
        assert_eq!(stack.count(), 2);
    }

    #[test]
    fn test_stack_serialization() {
        let mut stack = CardStack::new();
        stack.cards.push_back(EntityId(1));
        stack.cards.push_back(EntityId(2));

        let json = serde_json::to_string(&stack).unwrap();
        let deserialized: CardStack = serde_json::from_str(&json).unwrap();
        assert_eq!(stack, deserialized);
    }
}
