//! Card effects and ability system
//!
//! Card content is data: each ability carries display text, a kind telling
//! the engine when it applies, a target specification, and an ordered list
//! of effects. The engine never parses rules text.

use crate::core::{CardId, Color, PlayerId};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// A chosen target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// Target a player
    Player(PlayerId),
    /// Target a permanent on the battlefield
    Permanent(CardId),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Player(id) => write!(f, "player {id}"),
            Target::Permanent(id) => write!(f, "permanent {id}"),
        }
    }
}

/// What an ability may target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetSpec {
    /// No target
    #[default]
    None,
    /// Any player still in the game, including the controller
    AnyPlayer,
    /// Any player other than the controller
    Opponent,
    /// Any permanent on the battlefield
    AnyPermanent,
}

impl TargetSpec {
    pub fn requires_target(&self) -> bool {
        !matches!(self, TargetSpec::None)
    }
}

/// Basic card effects that can be executed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Deal damage to the targeted player
    /// Example: "Lightning Bolt deals 3 damage to any target"
    DealDamage { amount: i32 },

    /// Deal a random amount of damage in `min..=max` to the targeted player
    ///
    /// Draws exactly one value from the game RNG.
    DealRandomDamage { min: i32, max: i32 },

    /// Controller gains life
    GainLife { amount: i32 },

    /// Controller draws cards
    DrawCards { count: u8 },

    /// Controller adds mana to their pool
    AddMana { color: Color, amount: u8 },

    /// Destroy the targeted permanent (moves to its owner's graveyard)
    DestroyTarget,

    /// Put another ability of the same source onto the stack
    ///
    /// The new object keeps the targets of the object that created it.
    TriggerAbility { ability_index: usize },
}

/// When an ability applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityKind {
    /// Resolves as part of the spell itself
    Spell,
    /// Activated by tapping the permanent; resolves immediately, no stack
    Mana,
    /// Put on the stack when the permanent enters the battlefield
    EntersBattlefield,
    /// Only put on the stack by another effect (`Effect::TriggerAbility`)
    Triggered,
}

/// One ability printed on a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    /// Display text
    pub text: String,
    pub kind: AbilityKind,
    #[serde(default)]
    pub target: TargetSpec,
    pub effects: SmallVec<[Effect; 2]>,
}

impl Ability {
    pub fn new(
        kind: AbilityKind,
        text: impl Into<String>,
        target: TargetSpec,
        effects: impl IntoIterator<Item = Effect>,
    ) -> Self {
        Ability {
            text: text.into(),
            kind,
            target,
            effects: effects.into_iter().collect(),
        }
    }

    pub fn spell(
        text: impl Into<String>,
        target: TargetSpec,
        effects: impl IntoIterator<Item = Effect>,
    ) -> Self {
        Self::new(AbilityKind::Spell, text, target, effects)
    }

    /// "{T}: Add {color}" style mana ability
    pub fn mana(color: Color, amount: u8) -> Self {
        let symbols: String = std::iter::repeat(color.symbol())
            .take(amount as usize)
            .collect();
        Self::new(
            AbilityKind::Mana,
            format!("{{T}}: Add {symbols}"),
            TargetSpec::None,
            [Effect::AddMana { color, amount }],
        )
    }

    /// Mana produced when this ability is activated
    pub fn mana_yield(&self) -> SmallVec<[(Color, u8); 2]> {
        self.effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::AddMana { color, amount } => Some((*color, *amount)),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mana_ability() {
        let ability = Ability::mana(Color::Red, 2);
        assert_eq!(ability.kind, AbilityKind::Mana);
        assert_eq!(ability.text, "{T}: Add RR");
        assert_eq!(ability.mana_yield().as_slice(), &[(Color::Red, 2)]);
    }

    #[test]
    fn test_spell_ability() {
        let ability = Ability::spell(
            "Deal 3 damage to any target",
            TargetSpec::AnyPlayer,
            [Effect::DealDamage { amount: 3 }],
        );
        assert!(ability.target.requires_target());
        assert!(ability.mana_yield().is_empty());
    }

    #[test]
    fn test_target_display() {
        assert_eq!(Target::Player(PlayerId::new(1)).to_string(), "player 1");
        assert_eq!(Target::Permanent(CardId::new(7)).to_string(), "permanent 7");
    }
}
