//! Error types for the rules engine

use crate::core::{ManaCost, ManaPool, PlayerDecision, PlayerId, Target};
use std::fmt;
use thiserror::Error;

/// Why the reducer refused a decision
///
/// Every rejection leaves the game state untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The acting player does not hold priority
    NotPriorityHolder { holder: Option<PlayerId> },
    /// The decision is not in the current legal set
    NotAvailable,
    /// The card is in hand but its cost cannot be paid from the pool
    InsufficientMana { cost: ManaCost, pool: ManaPool },
    /// The card is castable but not with this target
    IllegalTarget(Target),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NotPriorityHolder { holder: Some(holder) } => {
                write!(f, "priority is held by player {holder}")
            }
            Rejection::NotPriorityHolder { holder: None } => write!(f, "nobody holds priority"),
            Rejection::NotAvailable => write!(f, "not currently available"),
            Rejection::InsufficientMana { cost, pool } => {
                write!(f, "cannot pay {cost} from pool {pool}")
            }
            Rejection::IllegalTarget(target) => write!(f, "{target} is not a legal target"),
        }
    }
}

#[derive(Error, Debug)]
pub enum MtgError {
    #[error("Invalid decision {decision} by player {player}: {reason}")]
    InvalidDecision {
        player: PlayerId,
        decision: PlayerDecision,
        reason: Rejection,
    },

    #[error("Insufficient mana to pay {cost} (pool: {pool})")]
    InsufficientMana { cost: ManaCost, pool: ManaPool },

    #[error("Illegal target: {0}")]
    IllegalTarget(Target),

    #[error("Unknown card reference: {0}")]
    UnknownCardReference(String),

    #[error("Game already ended")]
    GameAlreadyEnded,

    #[error("Invalid mana cost {0}")]
    InvalidManaCost(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl MtgError {
    /// True for errors that reject a decision without touching the state
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            MtgError::InvalidDecision { .. }
                | MtgError::InsufficientMana { .. }
                | MtgError::IllegalTarget(_)
                | MtgError::GameAlreadyEnded
        )
    }

    /// The rejection cause, if this is an invalid decision
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            MtgError::InvalidDecision { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MtgError>;
