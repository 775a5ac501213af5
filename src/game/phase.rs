//! Turn phases and steps

use crate::core::PlayerId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Major phases of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Beginning,
    PreCombatMain,
    Combat,
    PostCombatMain,
    Ending,
}

/// Specific steps within phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    // Beginning Phase
    Untap,
    Upkeep,
    Draw,

    // Pre-Combat Main Phase
    Main1,

    // Combat Phase
    BeginCombat,
    DeclareAttackers,
    DeclareBlockers,
    CombatDamage,
    EndCombat,

    // Post-Combat Main Phase
    Main2,

    // Ending Phase
    End,
    Cleanup,
}

impl Step {
    /// Get the phase this step belongs to
    pub fn phase(&self) -> Phase {
        match self {
            Step::Untap | Step::Upkeep | Step::Draw => Phase::Beginning,
            Step::Main1 => Phase::PreCombatMain,
            Step::BeginCombat
            | Step::DeclareAttackers
            | Step::DeclareBlockers
            | Step::CombatDamage
            | Step::EndCombat => Phase::Combat,
            Step::Main2 => Phase::PostCombatMain,
            Step::End | Step::Cleanup => Phase::Ending,
        }
    }

    /// Get the next step in turn order
    pub fn next(&self) -> Option<Step> {
        match self {
            Step::Untap => Some(Step::Upkeep),
            Step::Upkeep => Some(Step::Draw),
            Step::Draw => Some(Step::Main1),
            Step::Main1 => Some(Step::BeginCombat),
            Step::BeginCombat => Some(Step::DeclareAttackers),
            Step::DeclareAttackers => Some(Step::DeclareBlockers),
            Step::DeclareBlockers => Some(Step::CombatDamage),
            Step::CombatDamage => Some(Step::EndCombat),
            Step::EndCombat => Some(Step::Main2),
            Step::Main2 => Some(Step::End),
            Step::End => Some(Step::Cleanup),
            Step::Cleanup => None, // End of turn
        }
    }

    /// Is this one of the two main phases?
    pub fn is_main(&self) -> bool {
        matches!(self, Step::Main1 | Step::Main2)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Step::Untap => "Untap",
            Step::Upkeep => "Upkeep",
            Step::Draw => "Draw",
            Step::Main1 => "Main 1",
            Step::BeginCombat => "Beginning of Combat",
            Step::DeclareAttackers => "Declare Attackers",
            Step::DeclareBlockers => "Declare Blockers",
            Step::CombatDamage => "Combat Damage",
            Step::EndCombat => "End of Combat",
            Step::Main2 => "Main 2",
            Step::End => "End",
            Step::Cleanup => "Cleanup",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Turn progress and per-turn resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    /// Player whose turn it is
    pub active_player: PlayerId,

    /// First player of the game; returning to their untap step completes a round
    pub starting_player: PlayerId,

    /// Current step (the phase is derived from it)
    pub step: Step,

    /// Current round number (starts at 1)
    pub turn_number: u32,

    /// Lands the active player has played this turn
    pub lands_played_this_turn: u8,
}

impl TurnState {
    pub fn new(starting_player: PlayerId) -> Self {
        TurnState {
            active_player: starting_player,
            starting_player,
            step: Step::Untap,
            turn_number: 1,
            lands_played_this_turn: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.step.phase()
    }

    /// Advance to the next step within the turn
    ///
    /// Returns false at Cleanup; the caller starts the next player's turn.
    pub fn advance_step(&mut self) -> bool {
        if let Some(next_step) = self.step.next() {
            self.step = next_step;
            true
        } else {
            false
        }
    }

    /// Start the next player's turn at Untap
    ///
    /// The turn number only increases when the rotation gets back around to
    /// the starting player's seat.
    pub fn next_turn(&mut self, next_player: PlayerId, completes_round: bool) {
        if completes_round {
            self.turn_number += 1;
        }
        self.step = Step::Untap;
        self.active_player = next_player;
        self.lands_played_this_turn = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_phases() {
        assert_eq!(Step::Untap.phase(), Phase::Beginning);
        assert_eq!(Step::Main1.phase(), Phase::PreCombatMain);
        assert_eq!(Step::DeclareAttackers.phase(), Phase::Combat);
        assert_eq!(Step::Main2.phase(), Phase::PostCombatMain);
        assert_eq!(Step::Cleanup.phase(), Phase::Ending);
    }

    #[test]
    fn test_step_progression() {
        let mut step = Step::Untap;
        step = step.next().unwrap();
        assert_eq!(step, Step::Upkeep);
        step = step.next().unwrap();
        assert_eq!(step, Step::Draw);
        assert_eq!(Step::Cleanup.next(), None);
    }

    #[test]
    fn test_turn_number_counts_rounds() {
        let p1 = PlayerId::new(1);
        let p2 = PlayerId::new(2);
        let mut turn = TurnState::new(p1);

        assert_eq!(turn.turn_number, 1);
        assert_eq!(turn.step, Step::Untap);

        // Advance through entire turn
        let mut steps = 1;
        while turn.advance_step() {
            steps += 1;
        }
        assert_eq!(steps, 12);
        assert_eq!(turn.step, Step::Cleanup);

        turn.lands_played_this_turn = 1;
        turn.next_turn(p2, false);
        assert_eq!(turn.turn_number, 1);
        assert_eq!(turn.active_player, p2);
        assert_eq!(turn.lands_played_this_turn, 0);

        turn.next_turn(p1, true);
        assert_eq!(turn.turn_number, 2);
        assert_eq!(turn.step, Step::Untap);
    }

    #[test]
    fn test_main_steps() {
        assert!(Step::Main1.is_main());
        assert!(Step::Main2.is_main());
        assert!(!Step::Upkeep.is_main());
        assert!(!Step::DeclareAttackers.is_main());
        assert_eq!(Step::Main1.to_string(), "Main 1");
    }
}
