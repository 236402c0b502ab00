//! Player-facing output: entity UIs, popups, and localized text.
//!
//! ## Key Types
//!
//! - `UserInterfaceSystem`: Which sessions have which entity UI open
//! - `PopupSystem`: Floating text above entities
//! - `Localization`: Message templates with named arguments

pub mod interface;
pub mod locale;
pub mod popup;

pub use interface::{SessionId, UiKey, UserInterfaceSystem};
pub use locale::{LocValue, Localization};
pub use popup::{Popup, PopupSystem};
