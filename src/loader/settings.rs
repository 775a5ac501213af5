//! Game configuration

use crate::core::{DefinitionId, PlayerName};
use crate::game::KillSwitchConfig;
use crate::loader::{builtin, DeckList};
use crate::{MtgError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One player's seat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSetup {
    pub name: PlayerName,
    /// Library contents, shuffled at game start
    #[serde(default)]
    pub deck: DeckList,
    /// Extra cards put straight into hand
    #[serde(default)]
    pub hand: Vec<DefinitionId>,
    /// Permanents the player starts with
    #[serde(default)]
    pub battlefield: Vec<DefinitionId>,
}

impl PlayerSetup {
    pub fn new(name: impl Into<PlayerName>, deck: DeckList) -> Self {
        PlayerSetup {
            name: name.into(),
            deck,
            hand: Vec::new(),
            battlefield: Vec::new(),
        }
    }

    pub fn with_hand(mut self, cards: &[&str]) -> Self {
        self.hand.extend(cards.iter().map(|&c| DefinitionId::new(c)));
        self
    }

    pub fn with_battlefield(mut self, cards: &[&str]) -> Self {
        self.battlefield
            .extend(cards.iter().map(|&c| DefinitionId::new(c)));
        self
    }
}

/// Settings for a new game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Players in turn order
    pub players: Vec<PlayerSetup>,
    pub starting_life: i32,
    pub opening_hand_size: usize,
    /// Seed for the in-game random number generator
    pub seed: u64,
    /// Index into `players` of who goes first
    pub starting_player: usize,
    pub shuffle_libraries: bool,
    pub kill_switch: KillSwitchConfig,
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings {
            players: vec![
                PlayerSetup::new("Player 1", builtin::red_deck()),
                PlayerSetup::new("Player 2", builtin::green_white_deck()),
            ],
            starting_life: 20,
            opening_hand_size: 7,
            seed: 0,
            starting_player: 0,
            shuffle_libraries: true,
            kill_switch: KillSwitchConfig::default(),
        }
    }
}

impl GameSettings {
    /// Settings with the given players and default rules
    pub fn with_players(players: Vec<PlayerSetup>) -> Self {
        GameSettings {
            players,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MtgError::InvalidSettings(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    /// Check the settings describe a playable game
    pub fn validate(&self) -> Result<()> {
        if self.players.len() < 2 {
            return Err(MtgError::InvalidSettings(
                "at least two players are required".to_string(),
            ));
        }
        if self.starting_player >= self.players.len() {
            return Err(MtgError::InvalidSettings(format!(
                "starting player index {} out of range",
                self.starting_player
            )));
        }
        if self.starting_life <= 0 {
            return Err(MtgError::InvalidSettings(
                "starting life must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = GameSettings::default();
        assert_eq!(settings.players.len(), 2);
        assert_eq!(settings.starting_life, 20);
        assert_eq!(settings.opening_hand_size, 7);
        assert_eq!(settings.kill_switch.max_chain_resolutions, 256);
        settings.validate().unwrap();
    }

    #[test]
    fn test_validation() {
        let mut settings = GameSettings::default();
        settings.starting_player = 2;
        assert!(settings.validate().is_err());

        settings.starting_player = 0;
        settings.players.truncate(1);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let json = r#"{
            "players": [
                { "name": "Alice", "deck": [ { "card": "mountain", "count": 10 } ] },
                { "name": "Bob", "hand": ["lightning_bolt"] }
            ],
            "seed": 99,
            "kill_switch": { "max_stack_depth": 8 }
        }"#;
        let settings = GameSettings::from_json(json).unwrap();
        assert_eq!(settings.seed, 99);
        assert_eq!(settings.starting_life, 20);
        assert_eq!(settings.players[0].deck.total_cards(), 10);
        assert_eq!(settings.players[1].hand.len(), 1);
        assert_eq!(settings.kill_switch.max_stack_depth, 8);
        assert_eq!(settings.kill_switch.max_chain_resolutions, 256);
    }
}
