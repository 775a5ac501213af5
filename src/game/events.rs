//! Game events
//!
//! Events are the only channel through which observers learn what changed.
//! Each accepted transition produces an ordered list of them, in the order
//! the underlying effects happened.

use crate::core::{CardId, Color, PlayerId, Target};
use crate::game::{StackObjectId, StackSource, Step};
use crate::zones::Zone;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Why the game ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEndReason {
    /// Opponents were reduced to 0 or less life; carries the winner
    PlayerDeath(PlayerId),
    /// Opponents drew from an empty library; carries the winner
    Decking(PlayerId),
    /// Every remaining player lost at the same time
    Draw,
    /// A player ended the game through the END_GAME decision
    Administrative(PlayerId),
    /// The kill switch stopped a runaway game
    KillSwitch(String),
    /// A simulation harness stopped the game at its turn limit
    TurnLimit,
}

impl GameEndReason {
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameEndReason::PlayerDeath(winner) | GameEndReason::Decking(winner) => Some(*winner),
            _ => None,
        }
    }
}

impl fmt::Display for GameEndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEndReason::PlayerDeath(winner) => write!(f, "player {winner} wins (life)"),
            GameEndReason::Decking(winner) => write!(f, "player {winner} wins (decking)"),
            GameEndReason::Draw => write!(f, "draw"),
            GameEndReason::Administrative(player) => write!(f, "ended by player {player}"),
            GameEndReason::KillSwitch(reason) => write!(f, "kill switch: {reason}"),
            GameEndReason::TurnLimit => write!(f, "turn limit reached"),
        }
    }
}

/// Something that happened in the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A spell was cast and put on the stack
    SpellCast {
        player: PlayerId,
        card_id: CardId,
        stack_object: StackObjectId,
        targets: SmallVec<[Target; 1]>,
    },

    /// An ability was put on the stack
    AbilityTriggered {
        controller: PlayerId,
        source: CardId,
        ability_index: usize,
        stack_object: StackObjectId,
    },

    /// The top of the stack resolved
    ///
    /// `fizzled` is set when every target had become illegal and no effect
    /// was applied.
    SpellResolved {
        stack_object: StackObjectId,
        source: StackSource,
        controller: PlayerId,
        fizzled: bool,
    },

    /// A card changed zones
    CardMoved {
        card_id: CardId,
        owner: PlayerId,
        from: Zone,
        to: Zone,
    },

    /// Mana was added to a pool
    ManaAdded {
        player: PlayerId,
        color: Color,
        amount: u8,
    },

    /// Damage was dealt to a player
    DirectDamageApplied {
        source: CardId,
        target: PlayerId,
        amount: i32,
        life_after: i32,
    },

    LifeGained {
        player: PlayerId,
        amount: i32,
        life_after: i32,
    },

    /// The engine is waiting for this player to choose among `options`
    PlayerDecisionRequested { player: PlayerId, options: usize },

    /// The kill switch ended the game
    KillSwitchTriggered { reason: String },

    /// The turn moved on to a new step
    StepAdvanced {
        turn_number: u32,
        active_player: PlayerId,
        step: Step,
    },

    /// A player's permanents untapped during their untap step
    PermanentsUntapped { player: PlayerId, count: usize },

    /// A non-empty mana pool was emptied
    ManaPoolEmptied { player: PlayerId },

    PriorityPassed { player: PlayerId },

    GameEnded { reason: GameEndReason },
}

impl GameEvent {
    /// Short tag naming the event kind
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::SpellCast { .. } => "SPELL_CAST",
            GameEvent::AbilityTriggered { .. } => "ABILITY_TRIGGERED",
            GameEvent::SpellResolved { .. } => "SPELL_RESOLVED",
            GameEvent::CardMoved { .. } => "CARD_MOVED",
            GameEvent::ManaAdded { .. } => "MANA_ADDED",
            GameEvent::DirectDamageApplied { .. } => "DIRECT_DAMAGE_APPLIED",
            GameEvent::LifeGained { .. } => "LIFE_GAINED",
            GameEvent::PlayerDecisionRequested { .. } => "PLAYER_DECISION_REQUESTED",
            GameEvent::KillSwitchTriggered { .. } => "KILL_SWITCH_TRIGGERED",
            GameEvent::StepAdvanced { .. } => "STEP_ADVANCED",
            GameEvent::PermanentsUntapped { .. } => "PERMANENTS_UNTAPPED",
            GameEvent::ManaPoolEmptied { .. } => "MANA_POOL_EMPTIED",
            GameEvent::PriorityPassed { .. } => "PRIORITY_PASSED",
            GameEvent::GameEnded { .. } => "GAME_ENDED",
        }
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::SpellCast {
                player,
                card_id,
                targets,
                ..
            } => {
                write!(f, "Player {player} casts card {card_id}")?;
                for target in targets {
                    write!(f, " targeting {target}")?;
                }
                Ok(())
            }
            GameEvent::AbilityTriggered {
                source,
                ability_index,
                ..
            } => write!(f, "Ability {ability_index} of card {source} triggers"),
            GameEvent::SpellResolved {
                source, fizzled, ..
            } => {
                if *fizzled {
                    write!(f, "{source} fizzles")
                } else {
                    write!(f, "{source} resolves")
                }
            }
            GameEvent::CardMoved {
                card_id, from, to, ..
            } => write!(f, "Card {card_id} moves from {from} to {to}"),
            GameEvent::ManaAdded {
                player,
                color,
                amount,
            } => write!(f, "Player {player} adds {amount} {color}"),
            GameEvent::DirectDamageApplied {
                source,
                target,
                amount,
                life_after,
            } => write!(
                f,
                "Card {source} deals {amount} damage to player {target} (life: {life_after})"
            ),
            GameEvent::LifeGained {
                player,
                amount,
                life_after,
            } => write!(f, "Player {player} gains {amount} life (life: {life_after})"),
            GameEvent::PlayerDecisionRequested { player, options } => {
                write!(f, "Player {player} to decide ({options} options)")
            }
            GameEvent::KillSwitchTriggered { reason } => write!(f, "Kill switch: {reason}"),
            GameEvent::StepAdvanced {
                turn_number,
                active_player,
                step,
            } => write!(f, "Turn {turn_number}, player {active_player}: {step}"),
            GameEvent::PermanentsUntapped { player, count } => {
                write!(f, "Player {player} untaps {count} permanent(s)")
            }
            GameEvent::ManaPoolEmptied { player } => write!(f, "Player {player} mana pool empties"),
            GameEvent::PriorityPassed { player } => write!(f, "Player {player} passes priority"),
            GameEvent::GameEnded { reason } => write!(f, "Game over: {reason}"),
        }
    }
}
