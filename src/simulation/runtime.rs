//! The state every handler runs against.

use crate::core::config::NetSide;
use crate::core::world::World;
use crate::events::EventContext;
use crate::ui::{Localization, PopupSystem, UserInterfaceSystem};

/// Host services shared by all card handlers.
///
/// Cloning a runtime is cheap enough for before/after comparisons in tests;
/// stack card lists are persistent vectors.
#[derive(Clone, Debug, PartialEq)]
pub struct Runtime {
    pub world: World,
    pub ui: UserInterfaceSystem,
    pub popups: PopupSystem,
    pub loc: Localization,
    /// Which side of the network this instance runs on.
    pub net: NetSide,
}

impl Runtime {
    /// Runtime with an empty world, default prototypes and English strings.
    #[must_use]
    pub fn new(net: NetSide) -> Self {
        Self::with_world(World::new(), net)
    }

    #[must_use]
    pub fn with_world(world: World, net: NetSide) -> Self {
        Self {
            world,
            ui: UserInterfaceSystem::new(),
            popups: PopupSystem::new(),
            loc: Localization::english(),
            net,
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(NetSide::Server)
    }
}

impl EventContext for Runtime {
    fn world(&self) -> &World {
        &self.world
    }
}
