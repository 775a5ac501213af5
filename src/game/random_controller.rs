//! Random AI controller for testing and baseline gameplay
//!
//! Makes random choices from the legal decisions. Serves as a baseline for
//! more sophisticated AI and as a fuzzer for the engine.

use crate::core::{PlayerDecision, PlayerId};
use crate::game::controller::{GameStateView, PlayerController};
use rand::Rng;

/// A controller that makes random choices
///
/// Never picks END_GAME, so games only end through play.
pub struct RandomController {
    player_id: PlayerId,
    rng: Box<dyn rand::RngCore>,
}

impl RandomController {
    /// Create a new random controller with default RNG
    pub fn new(player_id: PlayerId) -> Self {
        RandomController {
            player_id,
            rng: Box::new(rand::thread_rng()),
        }
    }

    /// Create a random controller with a seeded RNG (for deterministic testing)
    pub fn with_seed(player_id: PlayerId, seed: u64) -> Self {
        use rand::SeedableRng;
        RandomController {
            player_id,
            rng: Box::new(rand::rngs::StdRng::seed_from_u64(seed)),
        }
    }
}

impl PlayerController for RandomController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn choose_decision(
        &mut self,
        _view: &GameStateView,
        available: &[PlayerDecision],
    ) -> Option<PlayerDecision> {
        let choices: Vec<PlayerDecision> = available
            .iter()
            .filter(|d| !matches!(d, PlayerDecision::EndGame))
            .copied()
            .collect();
        if choices.is_empty() {
            return None;
        }
        let decision = choices[self.rng.gen_range(0..choices.len())];
        (!decision.is_pass()).then_some(decision)
    }

    fn name(&self) -> &str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardId;
    use crate::game::GameState;
    use crate::loader::CardRegistry;
    use std::sync::Arc;

    #[test]
    fn test_random_controller_is_seeded_and_never_ends_game() {
        let game = GameState::new(["Alice", "Bob"], 20, Arc::new(CardRegistry::new()), 0).unwrap();
        let player_id = game.players[0].id;
        let view = GameStateView::new(&game, player_id);
        let decisions = [
            PlayerDecision::PassPriority,
            PlayerDecision::TapForMana {
                card_id: CardId::new(5),
            },
            PlayerDecision::TapForMana {
                card_id: CardId::new(6),
            },
            PlayerDecision::EndGame,
        ];

        let picks = |seed| {
            let mut controller = RandomController::with_seed(player_id, seed);
            (0..50)
                .map(|_| controller.choose_decision(&view, &decisions))
                .collect::<Vec<_>>()
        };

        let first = picks(42);
        assert_eq!(first, picks(42));
        assert!(!first.contains(&Some(PlayerDecision::EndGame)));
        assert!(first.contains(&None));
        assert!(first.iter().any(Option::is_some));
    }
}
