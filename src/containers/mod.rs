//! Container system for entity placement.
//!
//! Entities either sit at world coordinates or inside a container owned by
//! another entity (an actor's hand slot, a card stack's card list, a table
//! drawer). Containers nest, which is how "card in hand held by actor"
//! resolves.
//!
//! ## Key Types
//!
//! - `ContainerId`: Opaque container identifier
//! - `Container`: Owner, slot name, capacity and ordered contents
//! - `ContainerManager`: Placement tracking and movement

pub mod manager;

pub use manager::{Container, ContainerId, ContainerManager};
