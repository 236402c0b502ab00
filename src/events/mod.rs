//! Event system for entity-addressed notifications.
//!
//! Systems subscribe handlers to `(component, event kind)` pairs. When an
//! event is raised on an entity, every handler whose component that entity
//! carries runs, in subscription order.
//!
//! ## Key Components
//!
//! - [`EventKind`]: Tag used to index subscriptions
//! - [`EntityEvent`]: An event addressed at one entity
//! - [`EventRegistry`]: Subscriptions and dispatch
//!
//! Events raised by service operations (stack quantity changes) are queued
//! on the `World` and dispatched once the handler that caused them returns.

mod event;
mod registry;

pub use event::{
    CardHandDrawMessage, EntityEvent, EventKind, GetAlternativeVerbs, InteractUsing,
    StackQuantityChange, StackQuantityChangeType,
};
pub use registry::{EventContext, EventRegistry, Handler};
