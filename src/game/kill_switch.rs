//! Kill switch: bounded-iteration guard against runaway games
//!
//! A card pool can contain effects that keep re-adding themselves to the
//! stack. The kill switch counts resolutions, stack depth and transitions,
//! and ends the game deterministically once any bound is exceeded.

use crate::game::{GameEndReason, GameEvent, GameState};
use serde::{Deserialize, Serialize};

/// Limits enforced by the kill switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KillSwitchConfig {
    /// Resolutions allowed since the stack was last empty
    pub max_chain_resolutions: u32,
    /// Objects allowed on the stack at once
    pub max_stack_depth: usize,
    /// Accepted transitions allowed over the whole game
    pub max_transitions: Option<u64>,
}

impl Default for KillSwitchConfig {
    fn default() -> Self {
        KillSwitchConfig {
            max_chain_resolutions: 256,
            max_stack_depth: 128,
            max_transitions: None,
        }
    }
}

/// Kill switch counters, carried in the game state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillSwitch {
    pub config: KillSwitchConfig,
    chain_resolutions: u32,
    transitions: u64,
}

impl KillSwitch {
    pub fn new(config: KillSwitchConfig) -> Self {
        KillSwitch {
            config,
            chain_resolutions: 0,
            transitions: 0,
        }
    }

    /// Count one resolution; returns a reason once the chain is too long
    pub fn record_resolution(&mut self) -> Option<String> {
        self.chain_resolutions += 1;
        (self.chain_resolutions > self.config.max_chain_resolutions).then(|| {
            format!(
                "{} resolutions without the stack emptying (limit {})",
                self.chain_resolutions, self.config.max_chain_resolutions
            )
        })
    }

    /// The stack became empty: the resolution chain is over
    pub fn stack_emptied(&mut self) {
        self.chain_resolutions = 0;
    }

    /// Check the stack size after a push
    pub fn check_stack_depth(&self, depth: usize) -> Option<String> {
        (depth > self.config.max_stack_depth).then(|| {
            format!(
                "stack depth {depth} exceeds limit {}",
                self.config.max_stack_depth
            )
        })
    }

    /// Count one accepted transition
    pub fn record_transition(&mut self) -> Option<String> {
        self.transitions += 1;
        let limit = self.config.max_transitions?;
        (self.transitions > limit)
            .then(|| format!("{} transitions exceed limit {limit}", self.transitions))
    }

    pub fn chain_resolutions(&self) -> u32 {
        self.chain_resolutions
    }

    pub fn transitions(&self) -> u64 {
        self.transitions
    }
}

impl GameState {
    /// Stop the game: KILL_SWITCH_TRIGGERED, then GAME_ENDED
    pub fn fire_kill_switch(&mut self, reason: String, events: &mut Vec<GameEvent>) {
        if self.game_ended {
            return;
        }
        events.push(GameEvent::KillSwitchTriggered {
            reason: reason.clone(),
        });
        self.end_game(GameEndReason::KillSwitch(reason), events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds() {
        let config = KillSwitchConfig::default();
        assert_eq!(config.max_chain_resolutions, 256);
        assert_eq!(config.max_stack_depth, 128);
        assert_eq!(config.max_transitions, None);
    }

    #[test]
    fn test_chain_resolutions_reset_when_stack_empties() {
        let mut ks = KillSwitch::new(KillSwitchConfig {
            max_chain_resolutions: 2,
            ..Default::default()
        });
        assert!(ks.record_resolution().is_none());
        assert!(ks.record_resolution().is_none());
        ks.stack_emptied();
        assert_eq!(ks.chain_resolutions(), 0);
        assert!(ks.record_resolution().is_none());
        assert!(ks.record_resolution().is_none());
        assert!(ks.record_resolution().is_some());
    }

    #[test]
    fn test_stack_depth_and_transitions() {
        let mut ks = KillSwitch::new(KillSwitchConfig {
            max_stack_depth: 3,
            max_transitions: Some(1),
            ..Default::default()
        });
        assert!(ks.check_stack_depth(3).is_none());
        assert!(ks.check_stack_depth(4).is_some());

        assert!(ks.record_transition().is_none());
        assert!(ks.record_transition().is_some());
        assert_eq!(ks.transitions(), 2);
    }

    #[test]
    fn test_unlimited_transitions() {
        let mut ks = KillSwitch::default();
        for _ in 0..10_000 {
            assert!(ks.record_transition().is_none());
        }
    }
}
