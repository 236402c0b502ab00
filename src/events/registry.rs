//! Event subscription registry.
//!
//! Systems register `(component, event kind) -> handler` subscriptions at
//! startup. Dispatching an event runs, in subscription order, every handler
//! whose component the target entity currently carries.

use rustc_hash::FxHashMap;

use crate::core::entity::EntityId;
use crate::core::world::{ComponentKind, World};

use super::event::{EntityEvent, EventKind};

/// Anything handlers run against that exposes the entity world.
pub trait EventContext {
    fn world(&self) -> &World;
}

/// Handler for an event raised on an entity.
///
/// Receives the owning system, the runtime context, the target entity and
/// the event itself.
pub type Handler<S, C> = fn(&mut S, &mut C, EntityId, &mut EntityEvent);

struct Subscription<S, C> {
    component: ComponentKind,
    handler: Handler<S, C>,
}

// Manual impl: fn pointers are Copy for any S, C.
impl<S, C> Clone for Subscription<S, C> {
    fn clone(&self) -> Self {
        Self {
            component: self.component,
            handler: self.handler,
        }
    }
}

/// Subscriptions indexed by event kind.
pub struct EventRegistry<S, C> {
    by_kind: FxHashMap<EventKind, Vec<Subscription<S, C>>>,
}

impl<S, C> Default for EventRegistry<S, C> {
    fn default() -> Self {
        Self {
            by_kind: FxHashMap::default(),
        }
    }
}

impl<S, C> Clone for EventRegistry<S, C> {
    fn clone(&self) -> Self {
        Self {
            by_kind: self.by_kind.clone(),
        }
    }
}

impl<S, C> std::fmt::Debug for EventRegistry<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (kind, subs) in &self.by_kind {
            let components: Vec<_> = subs.iter().map(|s| s.component).collect();
            map.entry(kind, &components);
        }
        map.finish()
    }
}

impl<S, C: EventContext> EventRegistry<S, C> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `handler` for `kind` events raised on entities carrying
    /// `component`.
    pub fn subscribe_local(&mut self, component: ComponentKind, kind: EventKind, handler: Handler<S, C>) {
        self.by_kind
            .entry(kind)
            .or_default()
            .push(Subscription { component, handler });
    }

    /// Number of subscriptions for an event kind.
    #[must_use]
    pub fn subscriptions(&self, kind: EventKind) -> usize {
        self.by_kind.get(&kind).map_or(0, Vec::len)
    }

    /// Total number of subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_kind.values().map(Vec::len).sum()
    }

    /// Check if nothing is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dispatch an event to matching handlers.
    ///
    /// Returns how many handlers ran. The component check happens right
    /// before each handler, so a handler that deletes the target stops
    /// later ones from running.
    pub fn dispatch(&self, system: &mut S, ctx: &mut C, event: &mut EntityEvent) -> usize {
        let Some(subs) = self.by_kind.get(&event.kind()) else {
            return 0;
        };

        let target = event.target();
        let mut ran = 0;
        for sub in subs {
            if !ctx.world().has_kind(target, sub.component) {
                continue;
            }
            tracing::trace!(entity = %target, kind = ?event.kind(), component = ?sub.component, "Dispatching");
            (sub.handler)(system, ctx, target, event);
            ran += 1;
        }
        ran
    }
}
