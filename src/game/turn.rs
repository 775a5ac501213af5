//! Turn structure machine
//!
//! Advances the game one (phase, step) at a time and performs the
//! turn-based actions of the step being entered.

use crate::game::{GameEvent, GameState, Step};
use crate::{MtgError, Result};

impl GameState {
    /// Advance to the next step, starting the next player's turn after Cleanup
    ///
    /// Clears the passed set, performs the entry actions of the new step and
    /// gives priority to the active player.
    pub fn advance_step(&mut self, events: &mut Vec<GameEvent>) -> Result<()> {
        self.players_who_passed_priority.clear();

        if !self.turn.advance_step() {
            let current = self.turn.active_player;
            let next = self.next_player_in_game(current).ok_or_else(|| {
                MtgError::UnknownCardReference(format!("player {current}"))
            })?;
            let completes_round = self.passes_starting_seat(current, next);
            self.turn.next_turn(next, completes_round);
        }

        events.push(GameEvent::StepAdvanced {
            turn_number: self.turn.turn_number,
            active_player: self.turn.active_player,
            step: self.turn.step,
        });

        self.enter_step(events)?;

        if !self.game_ended {
            self.priority_player = Some(self.turn.active_player);
        }
        Ok(())
    }

    /// Turn-based actions on entering the current step
    fn enter_step(&mut self, events: &mut Vec<GameEvent>) -> Result<()> {
        let active = self.turn.active_player;
        match self.turn.step {
            Step::Untap => {
                self.empty_mana_pools(events);
                let count = self.untap_all(active)?;
                events.push(GameEvent::PermanentsUntapped {
                    player: active,
                    count,
                });
            }
            Step::Draw => {
                // The player going first skips their first draw
                let skip = self.turn.turn_number == 1 && active == self.turn.starting_player;
                if !skip {
                    self.draw_card(active, events)?;
                }
            }
            Step::Cleanup => self.empty_mana_pools(events),
            _ => {}
        }
        Ok(())
    }

    /// Does moving the turn from `from` to `to` reach or pass the starting seat?
    ///
    /// Seats of players who have lost are skipped, so the round is counted
    /// even if the starting player is out of the game.
    fn passes_starting_seat(&self, from: crate::core::PlayerId, to: crate::core::PlayerId) -> bool {
        let n = self.players.len();
        let (Some(from_idx), Some(to_idx), Some(start_idx)) = (
            self.get_player_idx(from),
            self.get_player_idx(to),
            self.get_player_idx(self.turn.starting_player),
        ) else {
            return false;
        };
        let distance = |idx: usize| (idx + n - from_idx) % n;
        let to_distance = if to_idx == from_idx { n } else { distance(to_idx) };
        let start_distance = if start_idx == from_idx { n } else { distance(start_idx) };
        start_distance <= to_distance
    }
}
