//! Core runtime types: entities, the world arena, prototypes, configuration
//! and errors.
//!
//! Everything else in the crate is built on these. The world only stores
//! data; behaviour lives in the services and the controller.

pub mod config;
pub mod entity;
pub mod error;
pub mod prototype;
pub mod world;

pub use config::{
    CardStackConfig, HandConfig, NetSide, CARD_DECK_PROTOTYPE, CARD_HAND_PROTOTYPE, CARD_PROTOTYPE,
};
pub use entity::{EntityAllocator, EntityId};
pub use error::{CardError, Result};
pub use prototype::{Prototype, PrototypeRegistry};
pub use world::{Component, ComponentKind, ComponentStore, EntityMeta, MapCoordinates, World};
