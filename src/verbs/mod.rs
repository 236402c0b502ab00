//! Contextual verb menus.
//!
//! ## Key Types
//!
//! - `AlternativeVerb`: Label, icon, priority and action of one menu entry
//! - `VerbAct`: The action a verb runs, as data
//! - `SpriteSpecifier`: Verb icon

mod verb;

pub use verb::{sort_verbs, AlternativeVerb, SpriteSpecifier, VerbAct};
