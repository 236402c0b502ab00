//! Card stack service: the only code that mutates a stack's card list.
//!
//! Every operation keeps two things in step: the ordered `CardStack` list
//! and the placement of each card inside the stack entity's
//! `cardstack-container`. Count changes are announced by queueing a
//! `StackQuantityChange` event on the world, which the caller handles
//! before its next step; a stack that ends up empty is deleted.
//!
//! ## Usage
//!
//! ```
//! use card_hands::cards::{CardStack, CardStackService, CardStackSystem};
//! use card_hands::core::{MapCoordinates, World, CARD_HAND_PROTOTYPE, CARD_PROTOTYPE};
//!
//! let mut world = World::new();
//! let mut stacks = CardStackSystem::new();
//! let hand = world.spawn(CARD_HAND_PROTOTYPE, MapCoordinates::default()).unwrap();
//! let card = world.spawn(CARD_PROTOTYPE, MapCoordinates::default()).unwrap();
//!
//! stacks.try_insert_card(&mut world, hand, card).unwrap();
//! assert_eq!(world.get::<CardStack>(hand).unwrap().to_vec(), vec![card]);
//! ```

use crate::core::config::CardStackConfig;
use crate::core::entity::EntityId;
use crate::core::error::{CardError, Result};
use crate::core::world::World;
use crate::events::{EntityEvent, StackQuantityChangeType};

use super::component::{Card, CardStack};

/// Operations on card stacks.
///
/// The hand controller depends on this trait rather than on
/// `CardStackSystem` so tests can substitute failing implementations.
pub trait CardStackService {
    /// Append `card` to `stack`.
    fn try_insert_card(&mut self, world: &mut World, stack: EntityId, card: EntityId) -> Result<()>;

    /// Take `card` out of `stack`, dropping it where the stack is.
    fn try_remove_card(&mut self, world: &mut World, stack: EntityId, card: EntityId) -> Result<()>;

    /// Move every card of `second` onto `first`, keeping their order.
    fn try_join_stacks(&mut self, world: &mut World, first: EntityId, second: EntityId) -> Result<()>;

    /// Move the last `n` cards of `source` onto `dest`, keeping their order.
    ///
    /// Returns how many cards moved.
    fn transfer_n_last_cards(
        &mut self,
        world: &mut World,
        user: EntityId,
        n: usize,
        source: EntityId,
        dest: EntityId,
    ) -> Result<usize>;

    /// Split the last `n` cards of `stack` off into a new stack.
    ///
    /// Returns the new stack entity.
    fn try_split_stack(&mut self, world: &mut World, stack: EntityId, n: usize) -> Result<EntityId>;

    /// Turn every card of `stack` face up or face down.
    fn flip_all_cards(&mut self, world: &mut World, stack: EntityId, face_up: bool);
}

/// Default card stack service.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardStackSystem {
    config: CardStackConfig,
}

impl CardStackSystem {
    /// Create a service without a card limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service with the given limits.
    #[must_use]
    pub fn with_config(config: CardStackConfig) -> Self {
        Self { config }
    }

    /// The configured limits.
    #[must_use]
    pub fn config(&self) -> &CardStackConfig {
        &self.config
    }

    fn stack(world: &World, stack: EntityId) -> Result<&CardStack> {
        world.get::<CardStack>(stack).ok_or(CardError::NotAStack(stack))
    }

    fn check_room(&self, stack: EntityId, current: usize, incoming: usize) -> Result<()> {
        match self.config.max_cards {
            Some(max) if current + incoming > max => Err(CardError::StackFull { stack, max }),
            _ => Ok(()),
        }
    }

    /// Append a card to a stack's list and container.
    fn push_card(world: &mut World, stack: EntityId, card: EntityId) -> Result<()> {
        let container = world.containers.ensure_container(stack, CardStack::CONTAINER, None);
        world.insert_into(card, container)?;
        if let Some(s) = world.get_mut::<CardStack>(stack) {
            s.cards.push_back(card);
        }
        Ok(())
    }

    /// Detach the last `n` cards from a stack's list, in order.
    fn take_last(world: &mut World, stack: EntityId, n: usize) -> Vec<EntityId> {
        let Some(s) = world.get_mut::<CardStack>(stack) else {
            return Vec::new();
        };
        let at = s.cards.len().saturating_sub(n);
        s.cards.split_off(at).into_iter().collect()
    }

    fn delete_if_empty(world: &mut World, stack: EntityId) {
        if world.get::<CardStack>(stack).is_some_and(CardStack::is_empty) {
            tracing::debug!(%stack, "Deleting empty stack");
            world.delete(stack);
        }
    }
}

/// The stack currently holding `card`, if any.
#[must_use]
pub fn stack_of(world: &World, card: EntityId) -> Option<EntityId> {
    world
        .query::<CardStack>()
        .find(|(_, s)| s.contains(card))
        .map(|(e, _)| e)
}

impl CardStackService for CardStackSystem {
    fn try_insert_card(&mut self, world: &mut World, stack: EntityId, card: EntityId) -> Result<()> {
        if !world.exists(card) {
            return Err(CardError::NoSuchEntity(card));
        }
        if !world.has::<Card>(card) {
            return Err(CardError::NotACard(card));
        }
        let current = Self::stack(world, stack)?.count();
        if let Some(other) = stack_of(world, card) {
            return Err(CardError::AlreadyStacked { card, stack: other });
        }
        self.check_room(stack, current, 1)?;

        Self::push_card(world, stack, card)?;
        world.queue_event(EntityEvent::quantity_change(stack, StackQuantityChangeType::Added));
        Ok(())
    }

    fn try_remove_card(&mut self, world: &mut World, stack: EntityId, card: EntityId) -> Result<()> {
        let index = Self::stack(world, stack)?
            .cards
            .index_of(&card)
            .ok_or(CardError::NotInStack { card, stack })?;

        if let Some(s) = world.get_mut::<CardStack>(stack) {
            s.cards.remove(index);
        }
        world.drop_from_container(card);
        world.queue_event(EntityEvent::quantity_change(stack, StackQuantityChangeType::Removed));
        Self::delete_if_empty(world, stack);
        Ok(())
    }

    fn try_join_stacks(&mut self, world: &mut World, first: EntityId, second: EntityId) -> Result<()> {
        if first == second {
            return Err(CardError::SameStack(first));
        }
        let current = Self::stack(world, first)?.count();
        let incoming = Self::stack(world, second)?.count();
        self.check_room(first, current, incoming)?;

        for card in Self::take_last(world, second, incoming) {
            Self::push_card(world, first, card)?;
        }

        world.queue_event(EntityEvent::quantity_change(first, StackQuantityChangeType::Joined));
        Self::delete_if_empty(world, second);
        Ok(())
    }

    fn transfer_n_last_cards(
        &mut self,
        world: &mut World,
        user: EntityId,
        n: usize,
        source: EntityId,
        dest: EntityId,
    ) -> Result<usize> {
        if source == dest {
            return Err(CardError::SameStack(source));
        }
        let available = Self::stack(world, source)?.count();
        let current = Self::stack(world, dest)?.count();
        if n > available {
            return Err(CardError::NotEnoughCards {
                stack: source,
                requested: n,
                available,
            });
        }
        if n == 0 {
            return Ok(0);
        }
        self.check_room(dest, current, n)?;

        for card in Self::take_last(world, source, n) {
            Self::push_card(world, dest, card)?;
        }
        tracing::debug!(%user, %source, %dest, n, "Transferred cards");

        world.queue_event(EntityEvent::quantity_change(source, StackQuantityChangeType::Removed));
        world.queue_event(EntityEvent::quantity_change(dest, StackQuantityChangeType::Added));
        Self::delete_if_empty(world, source);
        Ok(n)
    }

    fn try_split_stack(&mut self, world: &mut World, stack: EntityId, n: usize) -> Result<EntityId> {
        let available = Self::stack(world, stack)?.count();
        if n == 0 || n >= available {
            return Err(CardError::NotEnoughCards {
                stack,
                requested: n,
                available,
            });
        }

        let coords = world.position(stack).unwrap_or_default();
        let split = match world.prototype_of(stack).map(str::to_string) {
            Some(prototype) => world.spawn(&prototype, coords)?,
            None => world.spawn_empty(coords),
        };
        world.ensure::<CardStack>(split);

        for card in Self::take_last(world, stack, n) {
            Self::push_card(world, split, card)?;
        }

        world.queue_event(EntityEvent::quantity_change(stack, StackQuantityChangeType::Split));
        world.queue_event(EntityEvent::quantity_change(split, StackQuantityChangeType::Split));
        Ok(split)
    }

    fn flip_all_cards(&mut self, world: &mut World, stack: EntityId, face_up: bool) {
        let Some(cards) = world.get::<CardStack>(stack).map(CardStack::to_vec) else {
            return;
        };
        for card in cards {
            if let Some(c) = world.get_mut::<Card>(card) {
                c.face_down = !face_up;
            }
        }
    }
}
