//! Zero controller for testing and automation
//!
//! Always takes the first decision that does something, and passes when
//! there is none. Useful for automated testing and benchmarking, since the
//! game plays out the same way every time.

use crate::core::{PlayerDecision, PlayerId};
use crate::game::controller::{GameStateView, PlayerController};

/// A controller that always chooses the first meaningful decision
pub struct ZeroController {
    player_id: PlayerId,
}

impl ZeroController {
    /// Create a new zero controller
    pub fn new(player_id: PlayerId) -> Self {
        ZeroController { player_id }
    }
}

impl PlayerController for ZeroController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn choose_decision(
        &mut self,
        _view: &GameStateView,
        available: &[PlayerDecision],
    ) -> Option<PlayerDecision> {
        available
            .iter()
            .find(|d| d.is_state_changing() && !matches!(d, PlayerDecision::EndGame))
            .copied()
    }

    fn name(&self) -> &str {
        "zero"
    }
}
