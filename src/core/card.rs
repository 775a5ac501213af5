//! Card definitions and card instances
//!
//! A `CardDefinition` is the immutable printed card, shared by every copy.
//! A `CardInstance` is one physical copy during a game and only refers to
//! its definition by `DefinitionId`.

use crate::core::{
    Ability, AbilityKind, CardId, CardName, DefinitionId, ManaCost, PlayerId, TargetSpec,
};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Card types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardType {
    Creature,
    Instant,
    Sorcery,
    Enchantment,
    Artifact,
    Land,
}

impl CardType {
    /// Does a card of this type stay on the battlefield after resolving?
    pub fn is_permanent(&self) -> bool {
        !matches!(self, CardType::Instant | CardType::Sorcery)
    }
}

/// Immutable card content supplied by the card registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: DefinitionId,

    /// Card name (e.g., "Lightning Bolt")
    pub name: CardName,

    pub card_type: CardType,

    /// Structured mana cost
    #[serde(default)]
    pub mana_cost: ManaCost,

    /// Cost as printed, for display only (e.g., "{R}")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mana_cost_text: Option<String>,

    /// Power (for creatures)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<i8>,

    /// Toughness (for creatures)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toughness: Option<i8>,

    #[serde(default)]
    pub abilities: SmallVec<[Ability; 2]>,
}

impl CardDefinition {
    pub fn new(
        id: impl Into<DefinitionId>,
        name: impl Into<CardName>,
        card_type: CardType,
    ) -> Self {
        CardDefinition {
            id: id.into(),
            name: name.into(),
            card_type,
            mana_cost: ManaCost::new(),
            mana_cost_text: None,
            power: None,
            toughness: None,
            abilities: SmallVec::new(),
        }
    }

    /// Set the cost from its printed form, keeping the text for display
    pub fn with_cost(mut self, cost: &str) -> Self {
        self.mana_cost = ManaCost::from_string(cost);
        self.mana_cost_text = Some(cost.to_string());
        self
    }

    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.abilities.push(ability);
        self
    }

    pub fn with_stats(mut self, power: i8, toughness: i8) -> Self {
        self.power = Some(power);
        self.toughness = Some(toughness);
        self
    }

    pub fn is_land(&self) -> bool {
        self.card_type == CardType::Land
    }

    pub fn is_instant(&self) -> bool {
        self.card_type == CardType::Instant
    }

    pub fn is_permanent(&self) -> bool {
        self.card_type.is_permanent()
    }

    /// What the spell targets when cast
    ///
    /// Taken from the first spell ability that needs a target.
    pub fn spell_target(&self) -> TargetSpec {
        self.abilities_of_kind(AbilityKind::Spell)
            .map(|(_, ability)| ability.target)
            .find(TargetSpec::requires_target)
            .unwrap_or_default()
    }

    pub fn has_mana_ability(&self) -> bool {
        self.abilities_of_kind(AbilityKind::Mana).next().is_some()
    }

    /// Abilities of one kind together with their index on the card
    pub fn abilities_of_kind(
        &self,
        kind: AbilityKind,
    ) -> impl Iterator<Item = (usize, &Ability)> + '_ {
        self.abilities
            .iter()
            .enumerate()
            .filter(move |(_, ability)| ability.kind == kind)
    }
}

/// One copy of a card during a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique ID for this card instance
    pub id: CardId,

    /// Shared definition this card is a copy of
    pub definition: DefinitionId,

    /// Player who owns this card (graveyard destination)
    pub owner: PlayerId,

    /// Current controller
    pub controller: PlayerId,

    /// Is the card tapped?
    pub tapped: bool,

    /// Turn number on which this card last entered the battlefield
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn_entered_battlefield: Option<u32>,
}

impl CardInstance {
    pub fn new(id: CardId, definition: DefinitionId, owner: PlayerId) -> Self {
        CardInstance {
            id,
            definition,
            owner,
            controller: owner,
            tapped: false,
            turn_entered_battlefield: None,
        }
    }

    pub fn tap(&mut self) {
        self.tapped = true;
    }

    pub fn untap(&mut self) {
        self.tapped = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Color, Effect};

    #[test]
    fn test_card_instance_creation() {
        let id = CardId::new(1);
        let owner = PlayerId::new(100);
        let card = CardInstance::new(id, DefinitionId::new("lightning_bolt"), owner);

        assert_eq!(card.id, id);
        assert_eq!(card.owner, owner);
        assert_eq!(card.controller, owner);
        assert!(!card.tapped);
    }

    #[test]
    fn test_definition_queries() {
        let bolt = CardDefinition::new("lightning_bolt", "Lightning Bolt", CardType::Instant)
            .with_cost("R")
            .with_ability(Ability::spell(
                "Lightning Bolt deals 3 damage to any target.",
                TargetSpec::AnyPlayer,
                [Effect::DealDamage { amount: 3 }],
            ));
        assert!(bolt.is_instant());
        assert!(!bolt.is_permanent());
        assert_eq!(bolt.mana_cost.pips(Color::Red), 1);
        assert_eq!(bolt.mana_cost_text.as_deref(), Some("R"));
        assert_eq!(bolt.spell_target(), TargetSpec::AnyPlayer);

        let mountain = CardDefinition::new("mountain", "Mountain", CardType::Land)
            .with_ability(Ability::mana(Color::Red, 1));
        assert!(mountain.is_land());
        assert!(mountain.has_mana_ability());
        assert_eq!(mountain.spell_target(), TargetSpec::None);
    }
}
