//! Scripted player controller for testing
//!
//! Follows a predetermined script of decisions, then passes forever.

use crate::core::{PlayerDecision, PlayerId};
use crate::game::controller::{GameStateView, PlayerController};
use std::collections::VecDeque;

/// A controller that follows a predetermined sequence of decisions
///
/// A scripted decision that is not currently legal is skipped over (the
/// controller passes instead and keeps the entry for the next time it is
/// asked), so scripts can be written without knowing exactly when priority
/// comes back.
pub struct ScriptedController {
    player_id: PlayerId,
    script: VecDeque<PlayerDecision>,
}

impl ScriptedController {
    /// Create a new scripted controller with a sequence of decisions
    pub fn new(player_id: PlayerId, script: impl IntoIterator<Item = PlayerDecision>) -> Self {
        ScriptedController {
            player_id,
            script: script.into_iter().collect(),
        }
    }

    /// Decisions not yet taken
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl PlayerController for ScriptedController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn choose_decision(
        &mut self,
        _view: &GameStateView,
        available: &[PlayerDecision],
    ) -> Option<PlayerDecision> {
        let next = *self.script.front()?;
        if available.contains(&next) {
            self.script.pop_front();
            Some(next)
        } else {
            None
        }
    }

    fn name(&self) -> &str {
        "scripted"
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
    fn test_scripted_controller() {
        let game = GameState::new(["Alice", "Bob"], 20, Arc::new(CardRegistry::new()), 0).unwrap();
        let player_id = game.players[0].id;
        let view = GameStateView::new(&game, player_id);

        let land = CardId::new(10);
        let play = PlayerDecision::PlayLand { card_id: land };
        let tap = PlayerDecision::TapForMana { card_id: land };
        let mut controller = ScriptedController::new(player_id, [play, tap]);

        // Not legal yet: pass and keep it
        assert_eq!(controller.choose_decision(&view, &[]), None);
        assert_eq!(controller.remaining(), 2);

        assert_eq!(controller.choose_decision(&view, &[play]), Some(play));
        assert_eq!(controller.choose_decision(&view, &[tap]), Some(tap));
        assert_eq!(controller.remaining(), 0);

        // Script exhausted
        assert_eq!(controller.choose_decision(&view, &[play, tap]), None);
    }
}
