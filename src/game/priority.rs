//! Priority passing
//!
//! A unanimous pass from every player still in the game resolves the top of
//! the stack, or advances the turn one step when the stack is empty. Any
//! other action resets the round.

use crate::core::PlayerId;
use crate::game::{GameEvent, GameState};
use crate::Result;

impl GameState {
    /// Record a pass and act on it once every player has passed
    pub fn pass_priority(
        &mut self,
        player_id: PlayerId,
        events: &mut Vec<GameEvent>,
    ) -> Result<()> {
        if !self.players_who_passed_priority.contains(&player_id) {
            self.players_who_passed_priority.push(player_id);
        }
        events.push(GameEvent::PriorityPassed { player: player_id });

        if !self.all_players_passed() {
            self.priority_player = self.next_player_in_game(player_id);
            return Ok(());
        }

        if self.stack.is_empty() {
            self.advance_step(events)
        } else {
            self.players_who_passed_priority.clear();
            self.resolve_top(events)?;
            if !self.game_ended {
                self.priority_player = Some(self.turn.active_player);
            }
            Ok(())
        }
    }

    /// Has every player still in the game passed in a row?
    pub fn all_players_passed(&self) -> bool {
        self.players_in_game()
            .all(|p| self.players_who_passed_priority.contains(&p.id))
    }

    /// A state-changing action happened: start a fresh priority round
    pub fn reset_priority_round(&mut self) {
        self.players_who_passed_priority.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardDefinition;
    use crate::core::CardType;
    use crate::game::Step;
    use crate::loader::CardRegistry;
    use std::sync::Arc;

    fn game() -> GameState {
        let mut registry = CardRegistry::new();
        registry
            .add(CardDefinition::new("swamp", "Swamp", CardType::Land))
            .unwrap();
        GameState::new(["A", "B", "C"], 20, Arc::new(registry), 0).unwrap()
    }

    #[test]
    fn test_pass_moves_priority_in_turn_order() {
        let mut game = game();
        let ids: Vec<_> = game.players.iter().map(|p| p.id).collect();
        let mut events = Vec::new();

        game.pass_priority(ids[0], &mut events).unwrap();
        assert_eq!(game.priority_player, Some(ids[1]));
        game.pass_priority(ids[1], &mut events).unwrap();
        assert_eq!(game.priority_player, Some(ids[2]));
        assert_eq!(game.turn.step, Step::Untap);

        game.pass_priority(ids[2], &mut events).unwrap();
        assert_eq!(game.turn.step, Step::Upkeep);
        assert_eq!(game.priority_player, Some(ids[0]));
        assert!(game.players_who_passed_priority.is_empty());
    }

    #[test]
    fn test_players_who_lost_are_skipped() {
        let mut game = game();
        let ids: Vec<_> = game.players.iter().map(|p| p.id).collect();
        game.players[1].has_lost = true;
        let mut events = Vec::new();

        game.pass_priority(ids[0], &mut events).unwrap();
        assert_eq!(game.priority_player, Some(ids[2]));
        game.pass_priority(ids[2], &mut events).unwrap();
        assert_eq!(game.turn.step, Step::Upkeep);
    }

    #[test]
    fn test_reset_round() {
        let mut game = game();
        let p1 = game.players[0].id;
        let mut events = Vec::new();
        game.pass_priority(p1, &mut events).unwrap();
        assert!(!game.players_who_passed_priority.is_empty());
        game.reset_priority_round();
        assert!(game.players_who_passed_priority.is_empty());
    }
}
