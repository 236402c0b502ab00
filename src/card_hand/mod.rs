//! Hand/deck controller: combining cards into hands, drawing from them,
//! and turning them into decks.

pub mod system;

pub use system::{
    quantity_change_message, spawn_in_same_parent, CardHandSystem, CONVERT_TO_DECK_ICON,
    CONVERT_TO_DECK_PRIORITY, PICK_CARD_ICON, PICK_CARD_PRIORITY,
};
