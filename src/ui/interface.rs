//! Session-scoped user interfaces.
//!
//! Tracks which player sessions have which entity UI open. The hand
//! controller only ever opens the card UI; rendering is the client's job.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::core::entity::EntityId;

/// A connected player session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub u32);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Session({})", self.0)
    }
}

/// Which UI of an entity is meant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UiKey {
    /// The hand inspection panel listing a hand's cards.
    Card,
}

/// Open entity UIs per session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserInterfaceSystem {
    open: FxHashMap<(EntityId, UiKey), FxHashSet<SessionId>>,
}

impl UserInterfaceSystem {
    /// Create with nothing open.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `key` on `entity` for `session`.
    ///
    /// Returns false if it was already open for that session.
    pub fn open_ui(&mut self, entity: EntityId, key: UiKey, session: SessionId) -> bool {
        let opened = self.open.entry((entity, key)).or_default().insert(session);
        if opened {
            tracing::debug!(%entity, ?key, %session, "Opened UI");
        }
        opened
    }

    /// Close `key` on `entity` for `session`.
    pub fn close_ui(&mut self, entity: EntityId, key: UiKey, session: SessionId) -> bool {
        let Some(sessions) = self.open.get_mut(&(entity, key)) else {
            return false;
        };
        let closed = sessions.remove(&session);
        if sessions.is_empty() {
            self.open.remove(&(entity, key));
        }
        closed
    }

    /// Close every UI bound to `entity`, e.g. when it is deleted.
    pub fn close_all(&mut self, entity: EntityId) {
        self.open.retain(|(e, _), _| *e != entity);
    }

    /// Check if `key` on `entity` is open for `session`.
    #[must_use]
    pub fn is_open(&self, entity: EntityId, key: UiKey, session: SessionId) -> bool {
        self.open
            .get(&(entity, key))
            .is_some_and(|s| s.contains(&session))
    }

    /// Sessions that have `key` on `entity` open.
    pub fn viewers(&self, entity: EntityId, key: UiKey) -> impl Iterator<Item = SessionId> + '_ {
        self.open.get(&(entity, key)).into_iter().flatten().copied()
    }
}
