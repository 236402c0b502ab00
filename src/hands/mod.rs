//! Actors and the hands they hold things in.

pub mod component;
pub mod system;

pub use component::{Actor, Hands};
pub use system::{HandsService, HandsSystem};
