//! Reducer: the transition function
//!
//! The only code path that mutates a running game. A decision is accepted
//! only if the enumerator currently offers it to that player. Accepted
//! decisions are applied to a copy of the state which replaces the original
//! only if every step succeeded, so a failure never leaves a half-applied
//! transition behind.

use crate::core::{PlayerDecision, PlayerId};
use crate::error::Rejection;
use crate::game::decisions::{can_cast_now, decisions_for, decisions_for_player};
use crate::game::{GameEndReason, GameEvent, GameState};
use crate::{MtgError, Result};

/// Apply a decision to a state, returning the new state and its events
///
/// The input state is never modified.
pub fn transition(
    state: &GameState,
    player_id: PlayerId,
    decision: PlayerDecision,
) -> Result<(GameState, Vec<GameEvent>)> {
    if state.game_ended {
        return Err(MtgError::GameAlreadyEnded);
    }

    if !decisions_for_player(state, player_id).contains(&decision) {
        return Err(MtgError::InvalidDecision {
            player: player_id,
            decision,
            reason: classify_rejection(state, player_id, decision),
        });
    }

    let mut next = state.clone();
    let mut events = Vec::new();
    next.apply_legal_decision(player_id, decision, &mut events)?;
    Ok((next, events))
}

impl GameState {
    /// Apply a decision in place
    ///
    /// On error the state is left exactly as it was.
    pub fn apply_decision(
        &mut self,
        player_id: PlayerId,
        decision: PlayerDecision,
    ) -> Result<Vec<GameEvent>> {
        let (next, events) = transition(self, player_id, decision)?;
        *self = next;
        Ok(events)
    }

    /// Apply a decision already known to be legal
    fn apply_legal_decision(
        &mut self,
        player_id: PlayerId,
        decision: PlayerDecision,
        events: &mut Vec<GameEvent>,
    ) -> Result<()> {
        match decision {
            PlayerDecision::PassPriority => self.pass_priority(player_id, events)?,
            PlayerDecision::PlayLand { card_id } => {
                self.reset_priority_round();
                self.play_land(player_id, card_id, events)?;
            }
            PlayerDecision::TapForMana { card_id } => {
                self.reset_priority_round();
                self.tap_for_mana(player_id, card_id, events)?;
            }
            PlayerDecision::CastSpell { card_id, target } => {
                self.reset_priority_round();
                self.cast_spell(player_id, card_id, target, events)?;
            }
            PlayerDecision::EndGame => {
                self.end_game(GameEndReason::Administrative(player_id), events);
            }
        }

        if !self.game_ended {
            self.check_state_based_actions(events);
        }
        if !self.game_ended {
            if let Some(reason) = self.kill_switch.record_transition() {
                self.fire_kill_switch(reason, events);
            }
        }
        if let (false, Some(player)) = (self.game_ended, self.priority_player) {
            events.push(GameEvent::PlayerDecisionRequested {
                player,
                options: decisions_for(self).len(),
            });
        }
        Ok(())
    }

    /// State-based checks run after every accepted transition
    ///
    /// Players at 0 or less life lose. The game ends once at most one player
    /// remains. If the priority holder lost, priority moves on.
    pub fn check_state_based_actions(&mut self, events: &mut Vec<GameEvent>) {
        for player in &mut self.players {
            if player.in_game() && player.life <= 0 {
                player.has_lost = true;
            }
        }

        let remaining: Vec<PlayerId> = self.players_in_game().map(|p| p.id).collect();
        match remaining.as_slice() {
            [] => self.end_game(GameEndReason::Draw, events),
            [winner] => {
                let by_decking = self
                    .players
                    .iter()
                    .filter(|p| p.has_lost)
                    .all(|p| p.decked && p.life > 0);
                let reason = if by_decking {
                    GameEndReason::Decking(*winner)
                } else {
                    GameEndReason::PlayerDeath(*winner)
                };
                self.end_game(reason, events);
            }
            _ => {
                let lost: Vec<PlayerId> = self
                    .players
                    .iter()
                    .filter(|p| p.has_lost)
                    .map(|p| p.id)
                    .collect();
                self.players_who_passed_priority
                    .retain(|id| !lost.contains(id));
                if let Some(holder) = self.priority_player {
                    if lost.contains(&holder) {
                        self.priority_player = self.next_player_in_game(holder);
                    }
                }
            }
        }
    }
}

/// Why a decision outside the legal set was refused
fn classify_rejection(
    state: &GameState,
    player_id: PlayerId,
    decision: PlayerDecision,
) -> Rejection {
    if !state.holds_priority(player_id) {
        return Rejection::NotPriorityHolder {
            holder: state.priority_player,
        };
    }

    let PlayerDecision::CastSpell { card_id, target } = decision else {
        return Rejection::NotAvailable;
    };
    let Ok(player) = state.get_player(player_id) else {
        return Rejection::NotAvailable;
    };
    let Ok(def) = state.definition_of(card_id) else {
        return Rejection::NotAvailable;
    };
    if !player.zones.hand.contains(card_id) || !can_cast_now(state, player_id, def) {
        return Rejection::NotAvailable;
    }
    if !player.mana_pool.can_pay(&def.mana_cost) {
        return Rejection::InsufficientMana {
            cost: def.mana_cost,
            pool: player.mana_pool,
        };
    }
    match target {
        Some(target) => Rejection::IllegalTarget(target),
        None => Rejection::NotAvailable,
    }
}
