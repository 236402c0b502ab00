//! Card components and the card stack service.
//!
//! ## Key Types
//!
//! - `Card`: A single playing card (face up or face down)
//! - `CardStack`: Ordered cards held in an entity's stack container
//! - `CardHand` / `CardDeck`: Markers for the two stack flavors
//! - `CardStackService`: Insert, remove, join, transfer, split, flip

pub mod component;
pub mod stack;

pub use component::{Card, CardDeck, CardHand, CardStack};
pub use stack::{stack_of, CardStackService, CardStackSystem};
