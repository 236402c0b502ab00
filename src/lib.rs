//! # card-hands
//!
//! Card hand and deck handling for an entity-based multiplayer simulation.
//!
//! Bare card entities combine into a hand, cards are drawn out of hands one
//! at a time, and a hand can be turned into a deck. Every change in a
//! stack's card count shows a popup and turns the stack's cards face down.
//!
//! ## Design Principles
//!
//! 1. **Explicit Services**: The controller reaches stacks, hands, UI and
//!    popups through traits and a runtime context passed to every handler.
//!    Nothing is global, so every service can be swapped in tests.
//!
//! 2. **Authority Is Data**: Whether this instance is the authoritative
//!    simulation or a replica is a `NetSide` value checked at the entry of
//!    each mutating operation.
//!
//! 3. **Silent Failure**: Services return `Result`; the controller logs a
//!    failure at debug level and abandons the rest of the operation.
//!
//! ## Architecture
//!
//! - **Entity Arena**: `World` keeps components in per-kind sparse maps
//!   keyed by `EntityId`. Lookups return `Option`.
//!
//! - **Persistent Stacks**: Card lists use `im` vectors so cloning the
//!   whole runtime for before/after comparisons stays cheap.
//!
//! - **Event Registry**: Handlers subscribe to `(component, event kind)`
//!   pairs. Quantity changes raised by stack operations are queued and
//!   dispatched after the handler that caused them.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, world arena, prototypes, configuration, errors
//! - `containers`: Which entity sits inside which
//! - `cards`: Card components and the card stack service
//! - `hands`: Actors and picking things up
//! - `ui`: Entity UIs, popups, localization
//! - `events`: Event types and the subscription registry
//! - `verbs`: Alternative-action menu entries
//! - `card_hand`: The hand/deck controller
//! - `simulation`: Driver wiring all of the above together

pub mod card_hand;
pub mod cards;
pub mod containers;
pub mod core;
pub mod events;
pub mod hands;
pub mod simulation;
pub mod ui;
pub mod verbs;

// Re-export commonly used types
pub use crate::core::{
    CardError, CardStackConfig, EntityId, HandConfig, MapCoordinates, NetSide, Result, World,
};

pub use crate::containers::{ContainerId, ContainerManager};

pub use crate::cards::{Card, CardDeck, CardHand, CardStack, CardStackService, CardStackSystem};

pub use crate::hands::{Actor, Hands, HandsService, HandsSystem};

pub use crate::card_hand::CardHandSystem;
pub use crate::simulation::{Runtime, Simulation};
