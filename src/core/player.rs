//! Player representation

use crate::core::{GameEntity, ManaPool, PlayerId, PlayerName};
use crate::zones::PlayerZones;
use serde::{Deserialize, Serialize};

/// Represents a player in the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique ID for this player
    pub id: PlayerId,

    /// Player name
    pub name: PlayerName,

    /// Life total
    pub life: i32,

    /// Mana pool
    pub mana_pool: ManaPool,

    /// Library, hand, battlefield and graveyard
    pub zones: PlayerZones,

    /// Has the player lost?
    pub has_lost: bool,

    /// Did the player lose by drawing from an empty library?
    #[serde(default)]
    pub decked: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<PlayerName>, starting_life: i32) -> Self {
        Player {
            id,
            name: name.into(),
            life: starting_life,
            mana_pool: ManaPool::new(),
            zones: PlayerZones::new(id),
            has_lost: false,
            decked: false,
        }
    }

    pub fn gain_life(&mut self, amount: i32) {
        self.life += amount;
    }

    /// Lose life; the loss itself is checked by the state-based checks
    pub fn lose_life(&mut self, amount: i32) {
        self.life -= amount;
    }

    pub fn empty_mana_pool(&mut self) {
        self.mana_pool.clear();
    }

    pub fn in_game(&self) -> bool {
        !self.has_lost
    }
}

impl GameEntity<Player> for Player {
    fn id(&self) -> PlayerId {
        self.id
    }

    fn name(&self) -> &str {
        self.name.as_str()
    }
}
