//! Error type shared by the runtime services.
//!
//! Service operations report failures through `CardError`. The hand
//! controller never surfaces these to players; it logs and abandons the
//! remaining steps of the handler.

use thiserror::Error;

use super::entity::EntityId;
use crate::containers::ContainerId;

/// Failure of a runtime service operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CardError {
    #[error("unknown prototype: {0}")]
    UnknownPrototype(String),

    #[error("{0} does not exist")]
    NoSuchEntity(EntityId),

    #[error("{0} is not a card")]
    NotACard(EntityId),

    #[error("{0} has no card stack")]
    NotAStack(EntityId),

    #[error("{card} is already in stack {stack}")]
    AlreadyStacked { card: EntityId, stack: EntityId },

    #[error("{card} is not in stack {stack}")]
    NotInStack { card: EntityId, stack: EntityId },

    #[error("stack {stack} is full ({max} cards)")]
    StackFull { stack: EntityId, max: usize },

    #[error("cannot move stack {0} into itself")]
    SameStack(EntityId),

    #[error("stack {stack} holds {available} cards, {requested} requested")]
    NotEnoughCards {
        stack: EntityId,
        requested: usize,
        available: usize,
    },

    #[error("{0} does not exist")]
    NoSuchContainer(ContainerId),

    #[error("{0} is full")]
    ContainerFull(ContainerId),

    #[error("{entity} cannot be inserted into a container it owns or contains")]
    RecursiveInsert { entity: EntityId },
}

/// Result alias for service operations.
pub type Result<T> = std::result::Result<T, CardError>;
