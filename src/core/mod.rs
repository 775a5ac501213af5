//! Core game types and entities

pub mod card;
pub mod decision;
pub mod effects;
pub mod entity;
pub mod mana;
pub mod player;
pub mod types;

pub use card::{CardDefinition, CardInstance, CardType};
pub use decision::PlayerDecision;
pub use effects::{Ability, AbilityKind, Effect, Target, TargetSpec};
pub use entity::{EntityId, EntityStore, GameEntity, IdAllocator};
pub use mana::{Color, ManaCost, ManaPool};
pub use player::Player;
pub use types::{CardName, DefinitionId, PlayerName};

/// Player identifier
pub type PlayerId = EntityId<Player>;

/// Card instance identifier
pub type CardId = EntityId<CardInstance>;
