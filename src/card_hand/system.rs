//! Hand/deck controller.
//!
//! Reacts to four events:
//!
//! - a card used on another bare card combines both into a new hand
//! - a draw message takes one card out of a hand into the actor's hands
//! - a quantity change on a hand shows a popup and turns its cards face down
//! - the alternative-verb menu of a hand offers "pick a card" and
//!   "convert to deck"
//!
//! Every mutating path is authoritative only: on a replica the handlers
//! return before touching anything. Failures abandon the remaining steps
//! silently; entities spawned before the failure are left where they are.
//!
//! Quantity changes raised by a stack operation are reacted to as soon as
//! that operation returns, so each popup reports the count at that step.

use crate::cards::{Card, CardHand, CardStack, CardStackService, CardStackSystem};
use crate::core::config::HandConfig;
use crate::core::entity::EntityId;
use crate::core::error::{CardError, Result};
use crate::core::world::{ComponentKind, World};
use crate::events::{EntityEvent, EventKind, EventRegistry, StackQuantityChangeType};
use crate::hands::{Actor, HandsService, HandsSystem};
use crate::simulation::Runtime;
use crate::ui::UiKey;
use crate::verbs::{AlternativeVerb, SpriteSpecifier, VerbAct};

/// Icon of the "pick a card" verb.
pub const PICK_CARD_ICON: &str = "/Textures/Interface/VerbIcons/die.svg.192dpi.png";

/// Icon of the "convert to deck" verb.
pub const CONVERT_TO_DECK_ICON: &str = "/Textures/Interface/VerbIcons/rotate_cw.svg.192dpi.png";

/// Menu priority of the "pick a card" verb.
pub const PICK_CARD_PRIORITY: i32 = 3;

/// Menu priority of the "convert to deck" verb.
pub const CONVERT_TO_DECK_PRIORITY: i32 = 2;

/// Localization id of the popup for a quantity change.
#[must_use]
pub fn quantity_change_message(kind: StackQuantityChangeType) -> &'static str {
    match kind {
        StackQuantityChangeType::Added => "cards-stackquantitychange-added",
        StackQuantityChangeType::Removed => "cards-stackquantitychange-removed",
        StackQuantityChangeType::Joined => "cards-stackquantitychange-joined",
        StackQuantityChangeType::Split => "cards-stackquantitychange-split",
        StackQuantityChangeType::Unknown => "cards-stackquantitychange-unknown",
    }
}

/// Spawn `prototype` next to `entity`.
///
/// If `entity` sits in a container, the new entity goes into the outermost
/// container of its ancestry chain (or is dropped at that container owner's
/// position if the container refuses it). Otherwise it is spawned at
/// `entity`'s world position.
pub fn spawn_in_same_parent(world: &mut World, prototype: &str, entity: EntityId) -> Result<EntityId> {
    if world.containers.is_in_container(entity) {
        if let Some(container) = world.containers.outer_container(entity) {
            return world.spawn_in_container_or_drop(prototype, container);
        }
    }

    let coords = world.position(entity).ok_or(CardError::NoSuchEntity(entity))?;
    world.spawn(prototype, coords)
}

/// Controller for card hands and the decks made from them.
///
/// Talks to stacks and hands only through `CardStackService` and
/// `HandsService`, so either can be replaced in tests.
#[derive(Clone, Debug, Default)]
pub struct CardHandSystem<S = CardStackSystem, H = HandsSystem> {
    config: HandConfig,
    stacks: S,
    hands: H,
}

impl CardHandSystem {
    /// Controller over the default stack and hands services.
    #[must_use]
    pub fn new(config: HandConfig) -> Self {
        Self::with_services(config, CardStackSystem::new(), HandsSystem::new())
    }
}

impl<S, H> CardHandSystem<S, H> {
    #[must_use]
    pub fn with_services(config: HandConfig, stacks: S, hands: H) -> Self {
        Self { config, stacks, hands }
    }

    #[must_use]
    pub fn config(&self) -> &HandConfig {
        &self.config
    }

    #[must_use]
    pub fn stacks(&self) -> &S {
        &self.stacks
    }

    pub fn stacks_mut(&mut self) -> &mut S {
        &mut self.stacks
    }

    #[must_use]
    pub fn hands(&self) -> &H {
        &self.hands
    }

    pub fn hands_mut(&mut self) -> &mut H {
        &mut self.hands
    }
}

impl<S: CardStackService, H: HandsService> CardHandSystem<S, H> {
    /// Subscribe the controller's handlers.
    pub fn initialize(registry: &mut EventRegistry<Self, Runtime>) {
        registry.subscribe_local(ComponentKind::Card, EventKind::InteractUsing, Self::on_interact_using);
        registry.subscribe_local(ComponentKind::CardHand, EventKind::CardHandDraw, Self::on_card_draw);
        registry.subscribe_local(
            ComponentKind::CardHand,
            EventKind::StackQuantityChange,
            Self::on_stack_quantity_change,
        );
        registry.subscribe_local(
            ComponentKind::CardHand,
            EventKind::GetAlternativeVerbs,
            Self::on_alternative_verb,
        );
    }

    // === Handlers ===

    fn on_interact_using(&mut self, rt: &mut Runtime, uid: EntityId, event: &mut EntityEvent) {
        let EntityEvent::InteractUsing(args) = event else {
            return;
        };
        if args.handled {
            return;
        }
        if rt.world.has::<CardStack>(args.used) || !rt.world.has::<Card>(args.used) {
            return;
        }
        if rt.world.has::<CardStack>(uid) || !rt.world.has::<Card>(uid) {
            return;
        }

        let pickup = self.config.pickup_on_setup;
        self.try_setup_hand_of_cards(rt, args.user, args.used, uid, pickup);
        args.handled = true;
    }

    fn on_card_draw(&mut self, rt: &mut Runtime, uid: EntityId, event: &mut EntityEvent) {
        let EntityEvent::CardHandDraw(msg) = event else {
            return;
        };
        if !rt.world.has::<CardStack>(uid) {
            return;
        }
        let removed = self.stacks.try_remove_card(&mut rt.world, uid, msg.card);
        self.react_to_stack_changes(rt);
        if let Err(err) = removed {
            tracing::debug!(hand = %uid, card = %msg.card, %err, "Draw abandoned");
            return;
        }

        if !self.hands.try_pickup_any_hand(&mut rt.world, msg.actor, msg.card) {
            tracing::debug!(actor = %msg.actor, card = %msg.card, "Drawn card left on the floor");
        }
        // A hand left with a single card stays a hand.
    }

    fn on_stack_quantity_change(&mut self, rt: &mut Runtime, uid: EntityId, event: &mut EntityEvent) {
        if rt.net.is_client() {
            return;
        }
        let EntityEvent::StackQuantityChange(change) = event else {
            return;
        };
        let Some(count) = rt.world.get::<CardStack>(uid).map(CardStack::count) else {
            return;
        };

        let text = rt
            .loc
            .get_string(quantity_change_message(change.kind), &[("quantity", count.into())]);
        rt.popups.popup_entity(text, uid);
        self.stacks.flip_all_cards(&mut rt.world, uid, false);
    }

    fn on_alternative_verb(&mut self, rt: &mut Runtime, uid: EntityId, event: &mut EntityEvent) {
        let EntityEvent::GetAlternativeVerbs(args) = event else {
            return;
        };
        let user = args.user;

        args.verbs.push(
            AlternativeVerb::new(
                rt.loc.get_string("cards-verb-pickcard", &[]),
                VerbAct::OpenHandMenu { user, hand: uid },
            )
            .with_icon(SpriteSpecifier::texture(PICK_CARD_ICON))
            .with_priority(PICK_CARD_PRIORITY),
        );
        args.verbs.push(
            AlternativeVerb::new(
                rt.loc.get_string("cards-verb-convert-to-deck", &[]),
                VerbAct::ConvertToDeck { user, hand: uid },
            )
            .with_icon(SpriteSpecifier::texture(CONVERT_TO_DECK_ICON))
            .with_priority(CONVERT_TO_DECK_PRIORITY),
        );
    }

    // === Operations ===

    /// Run the action of a chosen verb.
    pub fn run_verb(&mut self, rt: &mut Runtime, act: VerbAct) {
        match act {
            VerbAct::OpenHandMenu { user, hand } => {
                self.open_hand_menu(rt, user, hand);
            }
            VerbAct::ConvertToDeck { user, hand } => {
                self.convert_to_deck(rt, user, hand);
            }
        }
    }

    /// Combine two bare cards into a new hand: `card` first, then `target`.
    ///
    /// Returns the hand once both cards are in it. A hand spawned before an
    /// insertion failed stays in the world.
    pub fn try_setup_hand_of_cards(
        &mut self,
        rt: &mut Runtime,
        user: EntityId,
        card: EntityId,
        target: EntityId,
        pickup: bool,
    ) -> Option<EntityId> {
        if rt.net.is_client() {
            return None;
        }

        let result = self.build_hand_of_cards(rt, card, target);
        self.finish_setup(rt, user, result, pickup)
    }

    /// Start a new hand from `card` and the last card of `stack`.
    pub fn try_setup_hand_from_stack(
        &mut self,
        rt: &mut Runtime,
        user: EntityId,
        card: EntityId,
        stack: EntityId,
        pickup: bool,
    ) -> Option<EntityId> {
        if rt.net.is_client() {
            return None;
        }

        let result = self.build_hand_from_stack(rt, user, card, stack);
        self.finish_setup(rt, user, result, pickup)
    }

    /// Open the hand UI for the user's session.
    ///
    /// Returns false if the user has no actor or no attached session.
    pub fn open_hand_menu(&mut self, rt: &mut Runtime, user: EntityId, hand: EntityId) -> bool {
        let Some(session) = rt.world.get::<Actor>(user).and_then(|a| a.session) else {
            tracing::debug!(%user, %hand, "No session to open hand UI for");
            return false;
        };
        rt.ui.open_ui(hand, UiKey::Card, session)
    }

    /// Move every card of `hand` into a new deck next to it.
    ///
    /// If the user was holding the hand, the deck is offered to the user's
    /// hands. Returns the deck once the cards moved.
    pub fn convert_to_deck(&mut self, rt: &mut Runtime, user: EntityId, hand: EntityId) -> Option<EntityId> {
        if rt.net.is_client() {
            return None;
        }

        let deck = match spawn_in_same_parent(&mut rt.world, &self.config.deck_prototype, hand) {
            Ok(deck) => deck,
            Err(err) => {
                tracing::debug!(%hand, %err, "Could not spawn deck");
                return None;
            }
        };
        let holding = self.hands.is_holding(&rt.world, user, hand);
        rt.world.ensure::<CardStack>(deck);

        if !rt.world.has::<CardStack>(hand) {
            tracing::debug!(%hand, %deck, "Hand has no stack, leaving deck empty");
            return None;
        }
        let joined = self.stacks.try_join_stacks(&mut rt.world, deck, hand);
        self.react_to_stack_changes(rt);
        if let Err(err) = joined {
            tracing::debug!(%hand, %deck, %err, "Deck conversion abandoned");
            return None;
        }

        if holding && !self.hands.try_pickup_any_hand(&mut rt.world, user, deck) {
            tracing::debug!(%user, %deck, "Deck left on the floor");
        }
        Some(deck)
    }

    // === Helpers ===

    fn spawn_hand(&self, world: &mut World, card: EntityId) -> Result<EntityId> {
        let hand = spawn_in_same_parent(world, &self.config.hand_prototype, card)?;
        if !world.has::<CardStack>(hand) {
            return Err(CardError::NotAStack(hand));
        }
        Ok(hand)
    }

    fn build_hand_of_cards(&mut self, rt: &mut Runtime, card: EntityId, target: EntityId) -> Result<EntityId> {
        let hand = self.spawn_hand(&mut rt.world, card)?;
        self.insert_and_react(rt, hand, card)?;
        self.insert_and_react(rt, hand, target)?;
        Ok(hand)
    }

    fn build_hand_from_stack(
        &mut self,
        rt: &mut Runtime,
        user: EntityId,
        card: EntityId,
        stack: EntityId,
    ) -> Result<EntityId> {
        let hand = self.spawn_hand(&mut rt.world, card)?;
        self.insert_and_react(rt, hand, card)?;
        let moved = self.stacks.transfer_n_last_cards(&mut rt.world, user, 1, stack, hand);
        self.react_to_stack_changes(rt);
        moved?;
        Ok(hand)
    }

    fn insert_and_react(&mut self, rt: &mut Runtime, stack: EntityId, card: EntityId) -> Result<()> {
        let inserted = self.stacks.try_insert_card(&mut rt.world, stack, card);
        self.react_to_stack_changes(rt);
        inserted
    }

    /// Handle the quantity changes the last stack operation queued.
    ///
    /// Same filter as the `CardHand` subscription: changes on anything that
    /// is not a hand are dropped.
    fn react_to_stack_changes(&mut self, rt: &mut Runtime) {
        while let Some(mut event) = rt.world.pop_event() {
            let target = event.target();
            if rt.world.has::<CardHand>(target) {
                self.on_stack_quantity_change(rt, target, &mut event);
            }
        }
    }

    /// Pick up a freshly built hand and turn its cards face down.
    fn finish_setup(
        &mut self,
        rt: &mut Runtime,
        user: EntityId,
        result: Result<EntityId>,
        pickup: bool,
    ) -> Option<EntityId> {
        let hand = match result {
            Ok(hand) => hand,
            Err(err) => {
                tracing::debug!(%user, %err, "Hand setup abandoned");
                return None;
            }
        };

        if pickup && !self.hands.try_pickup_any_hand(&mut rt.world, user, hand) {
            tracing::debug!(%user, %hand, "Could not pick up new hand");
            return Some(hand);
        }
        self.stacks.flip_all_cards(&mut rt.world, hand, false);
        Some(hand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::containers::ContainerId;
    use crate::core::config::{NetSide, CARD_DECK_PROTOTYPE, CARD_HAND_PROTOTYPE, CARD_PROTOTYPE};
    use crate::core::world::MapCoordinates;
    use crate::events::{CardHandDrawMessage, GetAlternativeVerbs, InteractUsing};
    use crate::hands::Hands;
    use crate::ui::SessionId;

    type Registry = EventRegistry<CardHandSystem, Runtime>;

    struct Fixture {
        rt: Runtime,
        system: CardHandSystem,
        registry: Registry,
        user: EntityId,
    }

    impl Fixture {
        fn new(net: NetSide) -> Self {
            let mut rt = Runtime::new(net);
            let user = rt.world.spawn_empty(MapCoordinates::new(1.0, 1.0));
            rt.world.insert_component(user, Actor::new(SessionId(7)));
            HandsSystem::new().add_hands(&mut rt.world, user, 2);

            let mut registry = Registry::new();
            CardHandSystem::initialize(&mut registry);
            Self {
                rt,
                system: CardHandSystem::new(HandConfig::default()),
                registry,
                user,
            }
        }

        fn card(&mut self) -> EntityId {
            self.rt.world.spawn(CARD_PROTOTYPE, MapCoordinates::new(4.0, 2.0)).unwrap()
        }

        fn raise(&mut self, mut event: EntityEvent) -> EntityEvent {
            self.registry.dispatch(&mut self.system, &mut self.rt, &mut event);
            while let Some(mut queued) = self.rt.world.pop_event() {
                self.registry.dispatch(&mut self.system, &mut self.rt, &mut queued);
            }
            event
        }

        fn slot(&self, i: usize) -> ContainerId {
            self.rt.world.get::<Hands>(self.user).unwrap().slots[i]
        }
    }

    #[test]
    fn test_subscriptions() {
        let mut registry = Registry::new();
        CardHandSystem::initialize(&mut registry);

        assert_eq!(registry.len(), 4);
        assert_eq!(registry.subscriptions(EventKind::InteractUsing), 1);
    }

    #[test]
    fn test_quantity_change_messages() {
        assert_eq!(
            quantity_change_message(StackQuantityChangeType::Added),
            "cards-stackquantitychange-added"
        );
        assert_eq!(
            quantity_change_message(StackQuantityChangeType::Unknown),
            "cards-stackquantitychange-unknown"
        );
    }

    #[test]
    fn test_interact_combines_cards() {
        let mut f = Fixture::new(NetSide::Server);
        let a = f.card();
        let b = f.card();

        let event = f.raise(EntityEvent::InteractUsing(InteractUsing::new(f.user, a, b)));

        assert!(matches!(event, EntityEvent::InteractUsing(InteractUsing { handled: true, .. })));
        let (hand, stack) = f.rt.world.query::<CardStack>().next().unwrap();
        assert_eq!(stack.to_vec(), vec![a, b]);
        assert_eq!(f.rt.world.prototype_of(hand), Some(CARD_HAND_PROTOTYPE));
        assert_eq!(f.rt.world.containers.contents(f.slot(0)), &[hand]);
        assert!(f.rt.world.get::<Card>(a).unwrap().face_down);
        assert!(f.rt.world.get::<Card>(b).unwrap().face_down);
    }

    #[test]
    fn test_interact_ignores_handled_and_stacks() {
        let mut f = Fixture::new(NetSide::Server);
        let a = f.card();
        let b = f.card();

        let mut handled = InteractUsing::new(f.user, a, b);
        handled.handled = true;
        f.raise(EntityEvent::InteractUsing(handled));
        assert_eq!(f.rt.world.query::<CardStack>().count(), 0);

        let hand = f.rt.world.spawn(CARD_HAND_PROTOTYPE, MapCoordinates::default()).unwrap();
        let event = f.raise(EntityEvent::InteractUsing(InteractUsing::new(f.user, hand, b)));
        assert!(matches!(event, EntityEvent::InteractUsing(InteractUsing { handled: false, .. })));
        assert_eq!(f.rt.world.query::<CardStack>().count(), 1);
    }

    #[test]
    fn test_interact_on_replica_is_handled_without_changes() {
        let mut f = Fixture::new(NetSide::Client);
        let a = f.card();
        let b = f.card();
        let before = f.rt.clone();

        let event = f.raise(EntityEvent::InteractUsing(InteractUsing::new(f.user, a, b)));

        assert!(matches!(event, EntityEvent::InteractUsing(InteractUsing { handled: true, .. })));
        assert_eq!(before, f.rt);
    }

    #[test]
    fn test_setup_from_stack_takes_last_card() {
        let mut f = Fixture::new(NetSide::Server);
        let cards: Vec<_> = (0..3).map(|_| f.card()).collect();
        let deck = f.rt.world.spawn(CARD_DECK_PROTOTYPE, MapCoordinates::default()).unwrap();
        let mut stacks = CardStackSystem::new();
        for &c in &cards[..2] {
            stacks.try_insert_card(&mut f.rt.world, deck, c).unwrap();
        }

        let user = f.user;
        let hand = f
            .system
            .try_setup_hand_from_stack(&mut f.rt, user, cards[2], deck, true)
            .unwrap();

        assert_eq!(f.rt.world.get::<CardStack>(hand).unwrap().to_vec(), vec![cards[2], cards[1]]);
        assert_eq!(f.rt.world.get::<CardStack>(deck).unwrap().to_vec(), vec![cards[0]]);
        assert!(f.system.hands().is_holding(&f.rt.world, user, hand));
    }

    #[test]
    fn test_setup_without_pickup_stays_on_floor() {
        let mut f = Fixture::new(NetSide::Server);
        let a = f.card();
        let b = f.card();

        let user = f.user;
        let hand = f.system.try_setup_hand_of_cards(&mut f.rt, user, a, b, false).unwrap();

        assert!(!f.rt.world.containers.is_in_container(hand));
        assert_eq!(f.rt.world.position(hand), Some(MapCoordinates::new(4.0, 2.0)));
    }

    #[test]
    fn test_setup_reacts_after_each_insert() {
        let mut f = Fixture::new(NetSide::Server);
        let a = f.card();
        let b = f.card();
        let user = f.user;

        let hand = f.system.try_setup_hand_of_cards(&mut f.rt, user, a, b, false).unwrap();

        let popups: Vec<_> = f.rt.popups.shown_for(hand).map(|p| p.text.as_str()).collect();
        assert_eq!(
            popups,
            vec!["Card was added (total cards: 1)", "Card was added (total cards: 2)"]
        );
        assert_eq!(f.rt.world.pending_events(), 0);
    }

    #[test]
    fn test_setup_from_stack_reacts_per_step() {
        let mut f = Fixture::new(NetSide::Server);
        let cards: Vec<_> = (0..3).map(|_| f.card()).collect();
        let deck = f.rt.world.spawn(CARD_DECK_PROTOTYPE, MapCoordinates::default()).unwrap();
        let mut stacks = CardStackSystem::new();
        for &c in &cards[..2] {
            stacks.try_insert_card(&mut f.rt.world, deck, c).unwrap();
        }

        let user = f.user;
        let hand = f
            .system
            .try_setup_hand_from_stack(&mut f.rt, user, cards[2], deck, false)
            .unwrap();

        let popups: Vec<_> = f.rt.popups.shown_for(hand).map(|p| p.text.as_str()).collect();
        assert_eq!(
            popups,
            vec!["Card was added (total cards: 1)", "Card was added (total cards: 2)"]
        );
        assert_eq!(f.rt.popups.shown_for(deck).count(), 0);
        assert_eq!(f.rt.world.pending_events(), 0);
    }

    #[test]
    fn test_draw() {
        let mut f = Fixture::new(NetSide::Server);
        let a = f.card();
        let b = f.card();
        let c = f.card();
        let user = f.user;
        let hand = f.system.try_setup_hand_of_cards(&mut f.rt, user, a, b, false).unwrap();
        f.system.stacks_mut().try_insert_card(&mut f.rt.world, hand, c).unwrap();

        f.raise(EntityEvent::CardHandDraw(CardHandDrawMessage { hand, card: b, actor: user }));

        assert_eq!(f.rt.world.get::<CardStack>(hand).unwrap().to_vec(), vec![a, c]);
        assert!(f.system.hands().is_holding(&f.rt.world, user, b));
    }

    #[test]
    fn test_draw_absent_card_changes_nothing() {
        let mut f = Fixture::new(NetSide::Server);
        let a = f.card();
        let b = f.card();
        let other = f.card();
        let user = f.user;
        let hand = f.system.try_setup_hand_of_cards(&mut f.rt, user, a, b, false).unwrap();
        let before = f.rt.clone();

        f.raise(EntityEvent::CardHandDraw(CardHandDrawMessage {
            hand,
            card: other,
            actor: user,
        }));

        assert_eq!(before, f.rt);
    }

    #[test]
    fn test_quantity_change_popup_and_flip() {
        let mut f = Fixture::new(NetSide::Server);
        let a = f.card();
        let b = f.card();
        let user = f.user;
        let hand = f.system.try_setup_hand_of_cards(&mut f.rt, user, a, b, false).unwrap();
        f.rt.world.get_mut::<Card>(a).unwrap().face_down = false;

        f.raise(EntityEvent::quantity_change(hand, StackQuantityChangeType::Split));

        let last = f.rt.popups.shown_for(hand).last().unwrap();
        assert_eq!(last.text, "Stack was split (total cards: 2)");
        assert!(f.rt.world.get::<Card>(a).unwrap().face_down);
    }

    #[test]
    fn test_quantity_change_on_replica() {
        let mut f = Fixture::new(NetSide::Client);
        let hand = f.rt.world.spawn(CARD_HAND_PROTOTYPE, MapCoordinates::default()).unwrap();
        let before = f.rt.clone();

        f.raise(EntityEvent::quantity_change(hand, StackQuantityChangeType::Added));

        assert_eq!(before, f.rt);
    }

    #[test]
    fn test_verbs_offered() {
        let mut f = Fixture::new(NetSide::Server);
        let hand = f.rt.world.spawn(CARD_HAND_PROTOTYPE, MapCoordinates::default()).unwrap();

        let event = f.raise(EntityEvent::GetAlternativeVerbs(GetAlternativeVerbs::new(f.user, hand)));

        let EntityEvent::GetAlternativeVerbs(args) = event else {
            panic!("event kind changed");
        };
        assert_eq!(args.verbs.len(), 2);
        assert_eq!(args.verbs[0].text, "Pick a card");
        assert_eq!(args.verbs[0].priority, 3);
        assert_eq!(args.verbs[0].icon, Some(SpriteSpecifier::texture(PICK_CARD_ICON)));
        assert_eq!(args.verbs[1].text, "Convert to deck");
        assert_eq!(args.verbs[1].priority, 2);
        assert_eq!(args.verbs[1].act, VerbAct::ConvertToDeck { user: f.user, hand });
    }

    #[test]
    fn test_open_hand_menu() {
        let mut f = Fixture::new(NetSide::Server);
        let hand = f.rt.world.spawn(CARD_HAND_PROTOTYPE, MapCoordinates::default()).unwrap();
        let user = f.user;

        assert!(f.system.open_hand_menu(&mut f.rt, user, hand));
        assert!(f.rt.ui.is_open(hand, UiKey::Card, SessionId(7)));
    }

    #[test]
    fn test_open_hand_menu_without_session() {
        let mut f = Fixture::new(NetSide::Server);
        let hand = f.rt.world.spawn(CARD_HAND_PROTOTYPE, MapCoordinates::default()).unwrap();
        let agent = f.rt.world.spawn_empty(MapCoordinates::default());
        let detached = f.rt.world.spawn_empty(MapCoordinates::default());
        f.rt.world.insert_component(detached, Actor::default());
        let before = f.rt.clone();

        f.system.run_verb(&mut f.rt, VerbAct::OpenHandMenu { user: agent, hand });
        f.system.run_verb(&mut f.rt, VerbAct::OpenHandMenu { user: detached, hand });

        assert_eq!(before, f.rt);
    }

    #[test]
    fn test_convert_held_hand() {
        let mut f = Fixture::new(NetSide::Server);
        let cards: Vec<_> = (0..3).map(|_| f.card()).collect();
        let user = f.user;
        let hand = f
            .system
            .try_setup_hand_of_cards(&mut f.rt, user, cards[0], cards[1], true)
            .unwrap();
        f.system.stacks_mut().try_insert_card(&mut f.rt.world, hand, cards[2]).unwrap();

        let deck = f.system.convert_to_deck(&mut f.rt, user, hand).unwrap();

        assert!(!f.rt.world.exists(hand));
        assert!(f.rt.world.has::<crate::cards::CardDeck>(deck));
        assert_eq!(f.rt.world.get::<CardStack>(deck).unwrap().to_vec(), cards);
        assert!(f.system.hands().is_holding(&f.rt.world, user, deck));
    }

    #[test]
    fn test_convert_on_replica() {
        let mut f = Fixture::new(NetSide::Client);
        let hand = f.rt.world.spawn(CARD_HAND_PROTOTYPE, MapCoordinates::default()).unwrap();
        let user = f.user;
        let before = f.rt.clone();

        assert_eq!(f.system.convert_to_deck(&mut f.rt, user, hand), None);
        assert_eq!(before, f.rt);
    }

    #[test]
    fn test_spawn_in_same_parent_uses_outer_container() {
        let mut f = Fixture::new(NetSide::Server);
        let a = f.card();
        let b = f.card();
        let user = f.user;
        let hand = f.system.try_setup_hand_of_cards(&mut f.rt, user, a, b, true).unwrap();
        let slot = f.slot(0);

        // The outer container of a card in a held hand is the hand slot.
        assert_eq!(f.rt.world.containers.outer_container(a), Some(slot));

        // The slot is full, so the new entity drops at the user's feet.
        let spawned = spawn_in_same_parent(&mut f.rt.world, CARD_PROTOTYPE, a).unwrap();
        assert!(!f.rt.world.containers.is_in_container(spawned));
        assert_eq!(f.rt.world.position(spawned), Some(MapCoordinates::new(1.0, 1.0)));
        assert_eq!(f.rt.world.containers.contents(slot), &[hand]);

        // A container with room takes the new entity.
        let pocket = f.rt.world.containers.ensure_container(user, "pocket", Some(4));
        let loose = f.card();
        f.rt.world.insert_into(loose, pocket).unwrap();
        let spawned = spawn_in_same_parent(&mut f.rt.world, CARD_PROTOTYPE, loose).unwrap();
        assert_eq!(f.rt.world.containers.contents(pocket), &[loose, spawned]);
    }

    #[test]
    fn test_spawn_in_same_parent_on_floor() {
        let mut world = World::new();
        let card = world.spawn(CARD_PROTOTYPE, MapCoordinates::new(9.0, 8.0)).unwrap();

        let spawned = spawn_in_same_parent(&mut world, CARD_HAND_PROTOTYPE, card).unwrap();

        assert_eq!(world.position(spawned), Some(MapCoordinates::new(9.0, 8.0)));
        assert_eq!(
            spawn_in_same_parent(&mut world, CARD_HAND_PROTOTYPE, EntityId(999)),
            Err(CardError::NoSuchEntity(EntityId(999)))
        );
    }
}
