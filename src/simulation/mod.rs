//! Driver composing the runtime, the services and the hand controller.
//!
//! `Simulation` owns everything a host would otherwise inject: the world,
//! UI and popup sinks, localization, the net side, the card hand
//! controller and its event subscriptions. The controller reacts to the
//! stack changes it causes itself; anything still queued after an event
//! or a direct stack operation is pumped oldest first.
//!
//! ## Usage
//!
//! ```
//! use card_hands::core::{HandConfig, MapCoordinates, NetSide};
//! use card_hands::simulation::Simulation;
//! use card_hands::ui::SessionId;
//!
//! let mut sim = Simulation::new(HandConfig::default(), NetSide::Server);
//! let user = sim.spawn_actor(Some(SessionId(1)), 2, MapCoordinates::default());
//! let a = sim.spawn_card(MapCoordinates::default()).unwrap();
//! let b = sim.spawn_card(MapCoordinates::default()).unwrap();
//!
//! assert!(sim.interact_using(user, a, b));
//! ```

mod runtime;

pub use runtime::Runtime;

use crate::card_hand::CardHandSystem;
use crate::cards::{CardStackService, CardStackSystem};
use crate::core::config::{HandConfig, NetSide, CARD_PROTOTYPE};
use crate::core::entity::EntityId;
use crate::core::error::Result;
use crate::core::world::{MapCoordinates, World};
use crate::events::{
    CardHandDrawMessage, EntityEvent, EventRegistry, GetAlternativeVerbs, InteractUsing,
};
use crate::hands::{Actor, HandsService, HandsSystem};
use crate::ui::{Localization, PopupSystem, SessionId, UserInterfaceSystem};
use crate::verbs::{sort_verbs, AlternativeVerb, VerbAct};

/// An in-process simulation instance.
pub struct Simulation<S = CardStackSystem, H = HandsSystem> {
    runtime: Runtime,
    card_hands: CardHandSystem<S, H>,
    registry: EventRegistry<CardHandSystem<S, H>, Runtime>,
}

impl Simulation {
    /// Simulation over the default services.
    #[must_use]
    pub fn new(config: HandConfig, net: NetSide) -> Self {
        Self::with_services(config, net, CardStackSystem::new(), HandsSystem::new())
    }
}

impl<S: CardStackService, H: HandsService> Simulation<S, H> {
    /// Simulation over custom services.
    #[must_use]
    pub fn with_services(config: HandConfig, net: NetSide, stacks: S, hands: H) -> Self {
        Self::from_parts(Runtime::new(net), CardHandSystem::with_services(config, stacks, hands))
    }

    /// Simulation over an existing runtime.
    #[must_use]
    pub fn from_parts(runtime: Runtime, card_hands: CardHandSystem<S, H>) -> Self {
        let mut registry = EventRegistry::new();
        CardHandSystem::<S, H>::initialize(&mut registry);
        Self {
            runtime,
            card_hands,
            registry,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut Runtime {
        &mut self.runtime
    }

    #[must_use]
    pub fn world(&self) -> &World {
        &self.runtime.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.runtime.world
    }

    #[must_use]
    pub fn popups(&self) -> &PopupSystem {
        &self.runtime.popups
    }

    #[must_use]
    pub fn ui(&self) -> &UserInterfaceSystem {
        &self.runtime.ui
    }

    #[must_use]
    pub fn loc(&self) -> &Localization {
        &self.runtime.loc
    }

    #[must_use]
    pub fn net(&self) -> NetSide {
        self.runtime.net
    }

    #[must_use]
    pub fn card_hands(&self) -> &CardHandSystem<S, H> {
        &self.card_hands
    }

    pub fn card_hands_mut(&mut self) -> &mut CardHandSystem<S, H> {
        &mut self.card_hands
    }

    // === Events ===

    /// Dispatch an event, then every event queued while handling it.
    ///
    /// Returns the event as the handlers left it.
    pub fn raise(&mut self, mut event: EntityEvent) -> EntityEvent {
        self.registry
            .dispatch(&mut self.card_hands, &mut self.runtime, &mut event);
        self.pump();
        event
    }

    /// Dispatch queued events until the queue is empty.
    pub fn pump(&mut self) -> usize {
        let mut pumped = 0;
        while let Some(mut event) = self.runtime.world.pop_event() {
            self.registry
                .dispatch(&mut self.card_hands, &mut self.runtime, &mut event);
            pumped += 1;
        }
        pumped
    }

    /// `user` uses `used` on `target`. Returns whether it was handled.
    pub fn interact_using(&mut self, user: EntityId, used: EntityId, target: EntityId) -> bool {
        match self.raise(EntityEvent::InteractUsing(InteractUsing::new(user, used, target))) {
            EntityEvent::InteractUsing(args) => args.handled,
            _ => false,
        }
    }

    /// `actor` draws `card` out of `hand`.
    pub fn draw(&mut self, actor: EntityId, hand: EntityId, card: EntityId) {
        self.raise(EntityEvent::CardHandDraw(CardHandDrawMessage { hand, card, actor }));
    }

    /// The alternative verbs `user` gets for `target`, highest priority first.
    pub fn alternative_verbs(&mut self, user: EntityId, target: EntityId) -> Vec<AlternativeVerb> {
        match self.raise(EntityEvent::GetAlternativeVerbs(GetAlternativeVerbs::new(user, target))) {
            EntityEvent::GetAlternativeVerbs(args) => {
                let mut verbs = args.verbs;
                sort_verbs(&mut verbs);
                verbs
            }
            _ => Vec::new(),
        }
    }

    /// Run a verb previously offered by `alternative_verbs`.
    pub fn execute_verb(&mut self, act: VerbAct) {
        self.card_hands.run_verb(&mut self.runtime, act);
        self.pump();
    }

    /// Start a hand from `card` and the last card of `stack`.
    pub fn combine_with_stack(&mut self, user: EntityId, card: EntityId, stack: EntityId) -> Option<EntityId> {
        let pickup = self.card_hands.config().pickup_on_setup;
        let hand = self
            .card_hands
            .try_setup_hand_from_stack(&mut self.runtime, user, card, stack, pickup);
        self.pump();
        hand
    }

    /// Convert `hand` into a deck on behalf of `user`.
    pub fn convert_to_deck(&mut self, user: EntityId, hand: EntityId) -> Option<EntityId> {
        let deck = self.card_hands.convert_to_deck(&mut self.runtime, user, hand);
        self.pump();
        deck
    }

    // === Stack operations ===

    /// Insert a card into a stack and react to the change.
    pub fn insert_card(&mut self, stack: EntityId, card: EntityId) -> Result<()> {
        let result = self
            .card_hands
            .stacks_mut()
            .try_insert_card(&mut self.runtime.world, stack, card);
        self.pump();
        result
    }

    /// Remove a card from a stack and react to the change.
    pub fn remove_card(&mut self, stack: EntityId, card: EntityId) -> Result<()> {
        let result = self
            .card_hands
            .stacks_mut()
            .try_remove_card(&mut self.runtime.world, stack, card);
        self.pump();
        result
    }

    /// Join `second` onto `first` and react to the change.
    pub fn join_stacks(&mut self, first: EntityId, second: EntityId) -> Result<()> {
        let result = self
            .card_hands
            .stacks_mut()
            .try_join_stacks(&mut self.runtime.world, first, second);
        self.pump();
        result
    }

    /// Split the last `n` cards of `stack` off and react to the change.
    pub fn split_stack(&mut self, stack: EntityId, n: usize) -> Result<EntityId> {
        let result = self
            .card_hands
            .stacks_mut()
            .try_split_stack(&mut self.runtime.world, stack, n);
        self.pump();
        result
    }

    // === Spawning ===

    /// Spawn a face-up card on the floor.
    pub fn spawn_card(&mut self, coords: MapCoordinates) -> Result<EntityId> {
        self.runtime.world.spawn(CARD_PROTOTYPE, coords)
    }

    /// Spawn an entity from any registered prototype.
    pub fn spawn(&mut self, prototype: &str, coords: MapCoordinates) -> Result<EntityId> {
        self.runtime.world.spawn(prototype, coords)
    }

    /// Spawn a player-driven actor with `hands` empty hands.
    ///
    /// `None` models an actor whose session has detached.
    pub fn spawn_actor(&mut self, session: Option<SessionId>, hands: usize, coords: MapCoordinates) -> EntityId {
        let actor = self.spawn_agent(hands, coords);
        self.runtime.world.insert_component(actor, Actor { session });
        actor
    }

    /// Spawn a non-player agent with `hands` empty hands.
    pub fn spawn_agent(&mut self, hands: usize, coords: MapCoordinates) -> EntityId {
        let agent = self.runtime.world.spawn_empty(coords);
        HandsSystem::new().add_hands(&mut self.runtime.world, agent, hands);
        agent
    }

    /// Put `entity` into any free hand of `actor`.
    pub fn pickup(&mut self, actor: EntityId, entity: EntityId) -> bool {
        self.card_hands
            .hands_mut()
            .try_pickup_any_hand(&mut self.runtime.world, actor, entity)
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(HandConfig::default(), NetSide::Server)
    }
}
