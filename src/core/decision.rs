//! Player decisions
//!
//! A `PlayerDecision` is one legal action offered to the player holding
//! priority. The decision enumerator produces them; the reducer accepts only
//! decisions that appear in its output.

use crate::core::{CardId, Target};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A decision a player can submit to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerDecision {
    /// Cast a spell from hand, paying its cost from the mana pool
    ///
    /// Spells go on the stack and resolve once every player passes.
    CastSpell {
        card_id: CardId,
        target: Option<Target>,
    },

    /// Play a land card from hand
    ///
    /// Lands don't use the stack. A player can play one land per turn
    /// during their own main phase while the stack is empty.
    PlayLand { card_id: CardId },

    /// Tap an untapped permanent for its mana yield (no stack)
    TapForMana { card_id: CardId },

    /// Pass priority (do nothing)
    PassPriority,

    /// End the game immediately (administrative escape)
    EndGame,
}

impl PlayerDecision {
    /// Get the card ID associated with this decision, if any
    pub fn card_id(&self) -> Option<CardId> {
        match self {
            PlayerDecision::CastSpell { card_id, .. }
            | PlayerDecision::PlayLand { card_id }
            | PlayerDecision::TapForMana { card_id } => Some(*card_id),
            PlayerDecision::PassPriority | PlayerDecision::EndGame => None,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, PlayerDecision::PassPriority)
    }

    /// Does accepting this decision change the game state?
    ///
    /// Passing only records the pass; everything else resets the round.
    pub fn is_state_changing(&self) -> bool {
        !self.is_pass()
    }
}

impl fmt::Display for PlayerDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerDecision::CastSpell {
                card_id,
                target: Some(target),
            } => write!(f, "cast {card_id} targeting {target}"),
            PlayerDecision::CastSpell {
                card_id,
                target: None,
            } => write!(f, "cast {card_id}"),
            PlayerDecision::PlayLand { card_id } => write!(f, "play land {card_id}"),
            PlayerDecision::TapForMana { card_id } => write!(f, "tap {card_id} for mana"),
            PlayerDecision::PassPriority => write!(f, "pass priority"),
            PlayerDecision::EndGame => write!(f, "end game"),
        }
    }
}
