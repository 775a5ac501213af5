//! Engine facade
//!
//! The entry point clients drive a game through. An `Engine` owns one game
//! state, its logger and the listeners subscribed to its events, and keeps
//! the accepted decisions so the game can be replayed.

use crate::core::{PlayerDecision, PlayerId};
use crate::game::decisions::{decisions_for, decisions_for_player};
use crate::game::logger::GameLogger;
use crate::game::state_hash::compute_state_hash;
use crate::game::{GameEndReason, GameEvent, GameState, VerbosityLevel};
use crate::loader::{initialize_game, CardRegistry, GameSettings};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Callback receiving every event in order
pub type EventListener = Box<dyn FnMut(&GameEvent) + Send>;

/// One accepted decision, as recorded in the history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub player: PlayerId,
    pub decision: PlayerDecision,
}

/// A running game
pub struct Engine {
    state: GameState,
    settings: GameSettings,
    registry: Arc<CardRegistry>,
    logger: GameLogger,
    listeners: Vec<EventListener>,
    history: Vec<DecisionRecord>,
    /// Every event emitted so far, opening events included
    event_log: Vec<GameEvent>,
}

impl Engine {
    /// Start a game with a silent logger
    pub fn start_game(settings: GameSettings, registry: Arc<CardRegistry>) -> Result<Self> {
        Self::start_game_with_logger(
            settings,
            registry,
            GameLogger::with_verbosity(VerbosityLevel::Silent),
        )
    }

    /// Start a game that logs through the given logger
    pub fn start_game_with_logger(
        settings: GameSettings,
        registry: Arc<CardRegistry>,
        logger: GameLogger,
    ) -> Result<Self> {
        let state = initialize_game(&settings, Arc::clone(&registry))?;

        let mut opening = vec![GameEvent::StepAdvanced {
            turn_number: state.turn.turn_number,
            active_player: state.turn.active_player,
            step: state.turn.step,
        }];
        if let Some(player) = state.priority_player {
            opening.push(GameEvent::PlayerDecisionRequested {
                player,
                options: decisions_for(&state).len(),
            });
        }
        for event in &opening {
            logger.log_event(event);
        }

        Ok(Engine {
            state,
            settings,
            registry,
            logger,
            listeners: Vec::new(),
            history: Vec::new(),
            event_log: opening,
        })
    }

    /// Submit a decision for `player`
    ///
    /// The only way to change the game. A rejected decision returns the
    /// error and changes nothing: no history entry, no events.
    pub fn handle_decision(
        &mut self,
        player: PlayerId,
        decision: PlayerDecision,
    ) -> Result<Vec<GameEvent>> {
        let events = self.state.apply_decision(player, decision)?;
        self.history.push(DecisionRecord { player, decision });

        #[cfg(feature = "verbose-logging")]
        self.log_transition(player, decision, &events);

        for event in &events {
            for listener in &mut self.listeners {
                listener(event);
            }
        }
        self.event_log.extend(events.iter().cloned());
        Ok(events)
    }

    #[cfg(feature = "verbose-logging")]
    fn log_transition(&self, player: PlayerId, decision: PlayerDecision, events: &[GameEvent]) {
        let name = self
            .state
            .get_player(player)
            .map(|p| p.name.to_string())
            .unwrap_or_else(|_| format!("player {player}"));
        let message = if self.logger.debug_state_hash_enabled() {
            let hash = crate::game::state_hash::format_hash(self.state_hash());
            format!("{name}: {decision} [{hash}]")
        } else {
            format!("{name}: {decision}")
        };
        self.logger.verbose(&message);
        for event in events {
            self.logger.log_event(event);
        }
    }

    /// Register a listener for every future event
    pub fn subscribe(&mut self, listener: EventListener) {
        self.listeners.push(listener);
    }

    /// Legal decisions for the priority holder
    pub fn decisions(&self) -> Vec<PlayerDecision> {
        decisions_for(&self.state)
    }

    /// Legal decisions for one player (empty unless they hold priority)
    pub fn decisions_for_player(&self, player: PlayerId) -> Vec<PlayerDecision> {
        decisions_for_player(&self.state, player)
    }

    /// Read-only view of the current state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn registry(&self) -> &Arc<CardRegistry> {
        &self.registry
    }

    pub fn priority_player(&self) -> Option<PlayerId> {
        self.state.priority_player
    }

    pub fn is_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn end_reason(&self) -> Option<&GameEndReason> {
        self.state.end_reason.as_ref()
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.state.get_winner()
    }

    /// Accepted decisions, in order
    pub fn history(&self) -> &[DecisionRecord] {
        &self.history
    }

    /// Every event so far, in order
    pub fn events(&self) -> &[GameEvent] {
        &self.event_log
    }

    pub fn logger(&self) -> &GameLogger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut GameLogger {
        &mut self.logger
    }

    pub fn state_hash(&self) -> u64 {
        compute_state_hash(&self.state)
    }

    /// Rebuild a game by starting it again and applying a recorded history
    pub fn replay(
        settings: GameSettings,
        registry: Arc<CardRegistry>,
        history: &[DecisionRecord],
    ) -> Result<Self> {
        let mut engine = Self::start_game(settings, registry)?;
        for record in history {
            engine.handle_decision(record.player, record.decision)?;
        }
        Ok(engine)
    }
}
