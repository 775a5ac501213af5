//! Game loop implementation
//!
//! Drives an engine to completion by asking the controller of the priority
//! holder for a decision, over and over. The loop itself holds no rules:
//! turn progression, priority and resolution all happen inside the engine.

/// Conditional logging that avoids the `format!` when the feature is off
macro_rules! log_if_verbose {
    ($logger:expr, $name:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $logger.controller_choice($name, &format!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = (&$logger, &$name);
        }
    };
}

use crate::core::{PlayerDecision, PlayerId};
use crate::game::controller::{GameStateView, PlayerController};
use crate::game::engine::Engine;
use crate::game::GameEndReason;
use crate::{MtgError, Result};

/// Result of running a game to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    /// Winner of the game (None for a draw or a game stopped early)
    pub winner: Option<PlayerId>,
    /// Turn number the game ended on
    pub turns_played: u32,
    pub end_reason: GameEndReason,
    /// Decisions accepted by the engine
    pub decisions_made: usize,
}

/// Game loop manager
pub struct GameLoop<'a> {
    pub engine: &'a mut Engine,
    /// Turn number after which the game is stopped
    max_turns: u32,
}

impl<'a> GameLoop<'a> {
    /// Create a new game loop for the given engine
    pub fn new(engine: &'a mut Engine) -> Self {
        GameLoop {
            engine,
            max_turns: 1000,
        }
    }

    /// Set maximum turns before stopping with `GameEndReason::TurnLimit`
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Run the game with one controller per player
    ///
    /// A decision the engine rejects is replaced by a pass, so a buggy
    /// controller cannot stall the game.
    pub fn run_game(
        &mut self,
        controllers: &mut [Box<dyn PlayerController>],
    ) -> Result<GameResult> {
        for player in &self.engine.state().players {
            if !controllers.iter().any(|c| c.player_id() == player.id) {
                return Err(MtgError::InvalidSettings(format!(
                    "no controller for player {}",
                    player.name
                )));
            }
        }

        let mut decisions_made = 0;
        let end_reason = loop {
            if let Some(reason) = self.engine.end_reason() {
                break reason.clone();
            }
            if self.engine.state().turn.turn_number > self.max_turns {
                break GameEndReason::TurnLimit;
            }
            let Some(player) = self.engine.priority_player() else {
                break GameEndReason::Draw;
            };
            let controller = controllers
                .iter_mut()
                .find(|c| c.player_id() == player)
                .ok_or_else(|| {
                    MtgError::InvalidSettings(format!("no controller for player {player}"))
                })?;

            let decision = {
                let available = self.engine.decisions();
                let view = GameStateView::new(self.engine.state(), player);
                controller
                    .choose_decision(&view, &available)
                    .unwrap_or(PlayerDecision::PassPriority)
            };
            if decision.is_state_changing() {
                log_if_verbose!(self.engine.logger(), controller.name(), "{decision}");
            }

            match self.engine.handle_decision(player, decision) {
                Ok(_) => decisions_made += 1,
                Err(e) if e.is_rejection() && !decision.is_pass() => {
                    self.engine.logger().verbose(&format!("rejected: {e}"));
                    self.engine
                        .handle_decision(player, PlayerDecision::PassPriority)?;
                    decisions_made += 1;
                }
                Err(e) => return Err(e),
            }
        };

        let winner = end_reason.winner();
        for controller in controllers.iter_mut() {
            let id = controller.player_id();
            controller.on_game_end(
                &GameStateView::new(self.engine.state(), id),
                winner == Some(id),
            );
        }

        self.engine
            .logger()
            .minimal(&format!("Game over: {end_reason}"));
        Ok(GameResult {
            winner,
            turns_played: self.engine.state().turn.turn_number,
            end_reason,
            decisions_made,
        })
    }
}
