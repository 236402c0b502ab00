//! Runtime configuration types.
//!
//! The simulation is configured at startup by providing:
//! - `NetSide`: whether this instance is the authority or a display replica
//! - `HandConfig`: prototypes and pickup behaviour of the hand controller
//! - `CardStackConfig`: limits enforced by the card stack service
//!
//! All configuration is plain data and serializes with serde, so hosts can
//! load it from whatever format they already use.

use serde::{Deserialize, Serialize};

/// Prototype spawned when two cards are combined into a hand.
pub const CARD_HAND_PROTOTYPE: &str = "CardHandBase";

/// Prototype spawned when a hand is converted into a deck.
pub const CARD_DECK_PROTOTYPE: &str = "CardDeckBase";

/// Prototype for a single bare card.
pub const CARD_PROTOTYPE: &str = "CardBase";

/// Which side of the network this simulation instance runs on.
///
/// Mutating card logic only runs on the server. Clients are display
/// replicas and must not repeat it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetSide {
    /// The authoritative simulation.
    #[default]
    Server,
    /// A replica mirroring the authority.
    Client,
}

impl NetSide {
    /// Check if this is the authoritative side.
    #[must_use]
    pub const fn is_server(self) -> bool {
        matches!(self, NetSide::Server)
    }

    /// Check if this is a replica.
    #[must_use]
    pub const fn is_client(self) -> bool {
        matches!(self, NetSide::Client)
    }
}

/// Configuration for the hand/deck controller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandConfig {
    /// Prototype used for new hands.
    pub hand_prototype: String,

    /// Prototype used for new decks.
    pub deck_prototype: String,

    /// Whether a freshly combined hand is offered to the user's hands.
    pub pickup_on_setup: bool,
}

impl Default for HandConfig {
    fn default() -> Self {
        Self {
            hand_prototype: CARD_HAND_PROTOTYPE.to_string(),
            deck_prototype: CARD_DECK_PROTOTYPE.to_string(),
            pickup_on_setup: true,
        }
    }
}

impl HandConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different hand prototype.
    #[must_use]
    pub fn with_hand_prototype(mut self, prototype: impl Into<String>) -> Self {
        self.hand_prototype = prototype.into();
        self
    }

    /// Use a different deck prototype.
    #[must_use]
    pub fn with_deck_prototype(mut self, prototype: impl Into<String>) -> Self {
        self.deck_prototype = prototype.into();
        self
    }

    /// Set whether new hands are picked up.
    #[must_use]
    pub fn with_pickup_on_setup(mut self, pickup: bool) -> Self {
        self.pickup_on_setup = pickup;
        self
    }
}

/// Limits enforced by the card stack service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardStackConfig {
    /// Maximum cards per stack. `None` for unlimited.
    pub max_cards: Option<usize>,
}

impl CardStackConfig {
    /// Create an unlimited configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum card count.
    #[must_use]
    pub fn with_max_cards(mut self, max: usize) -> Self {
        self.max_cards = Some(max);
        self
    }
}
