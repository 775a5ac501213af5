//! Built-in card pool and sample decks
//!
//! A small set of cards covering every effect the engine knows about. Used
//! by the CLI, the benchmarks and the tests.

use crate::core::{Ability, AbilityKind, CardDefinition, CardType, Color, Effect, TargetSpec};
use crate::loader::{CardRegistry, DeckList};
use crate::Result;

/// Every built-in card definition
pub fn definitions() -> Vec<CardDefinition> {
    let mut cards = vec![
        basic_land("plains", "Plains", Color::White),
        basic_land("island", "Island", Color::Blue),
        basic_land("swamp", "Swamp", Color::Black),
        basic_land("mountain", "Mountain", Color::Red),
        basic_land("forest", "Forest", Color::Green),
        basic_land("wastes", "Wastes", Color::Colorless),
    ];

    cards.extend([
        CardDefinition::new("lightning_bolt", "Lightning Bolt", CardType::Instant)
            .with_cost("{R}")
            .with_ability(Ability::spell(
                "Lightning Bolt deals 3 damage to any target.",
                TargetSpec::AnyPlayer,
                [Effect::DealDamage { amount: 3 }],
            )),
        CardDefinition::new("lava_axe", "Lava Axe", CardType::Sorcery)
            .with_cost("{4}{R}")
            .with_ability(Ability::spell(
                "Lava Axe deals 5 damage to target player.",
                TargetSpec::Opponent,
                [Effect::DealDamage { amount: 5 }],
            )),
        CardDefinition::new("fickle_flames", "Fickle Flames", CardType::Instant)
            .with_cost("{1}{R}")
            .with_ability(Ability::spell(
                "Fickle Flames deals 1 to 4 damage to target opponent, chosen at random.",
                TargetSpec::Opponent,
                [Effect::DealRandomDamage { min: 1, max: 4 }],
            )),
        CardDefinition::new("healing_salve", "Healing Salve", CardType::Instant)
            .with_cost("{W}")
            .with_ability(Ability::spell(
                "You gain 3 life.",
                TargetSpec::None,
                [Effect::GainLife { amount: 3 }],
            )),
        CardDefinition::new("divination", "Divination", CardType::Sorcery)
            .with_cost("{2}{U}")
            .with_ability(Ability::spell(
                "Draw two cards.",
                TargetSpec::None,
                [Effect::DrawCards { count: 2 }],
            )),
        CardDefinition::new("dark_ritual", "Dark Ritual", CardType::Instant)
            .with_cost("{B}")
            .with_ability(Ability::spell(
                "Add {B}{B}{B}.",
                TargetSpec::None,
                [Effect::AddMana {
                    color: Color::Black,
                    amount: 3,
                }],
            )),
        CardDefinition::new("stone_rain", "Stone Rain", CardType::Sorcery)
            .with_cost("{2}{R}")
            .with_ability(Ability::spell(
                "Destroy target permanent.",
                TargetSpec::AnyPermanent,
                [Effect::DestroyTarget],
            )),
        CardDefinition::new("grizzly_bears", "Grizzly Bears", CardType::Creature)
            .with_cost("{1}{G}")
            .with_stats(2, 2),
        CardDefinition::new("llanowar_elves", "Llanowar Elves", CardType::Creature)
            .with_cost("{G}")
            .with_stats(1, 1)
            .with_ability(Ability::mana(Color::Green, 1)),
        CardDefinition::new("spark_imp", "Spark Imp", CardType::Creature)
            .with_cost("{1}{R}")
            .with_stats(1, 1)
            .with_ability(Ability::new(
                AbilityKind::EntersBattlefield,
                "When Spark Imp enters the battlefield, it deals 1 damage to target opponent.",
                TargetSpec::Opponent,
                [Effect::DealDamage { amount: 1 }],
            )),
        CardDefinition::new("endless_echo", "Endless Echo", CardType::Instant)
            .with_cost("{U}")
            .with_ability(Ability::spell(
                "Put an echo on the stack.",
                TargetSpec::None,
                [Effect::TriggerAbility { ability_index: 1 }],
            ))
            .with_ability(Ability::new(
                AbilityKind::Triggered,
                "Echo: put another echo on the stack.",
                TargetSpec::None,
                [Effect::TriggerAbility { ability_index: 1 }],
            )),
    ]);
    cards
}

fn basic_land(id: &str, name: &str, color: Color) -> CardDefinition {
    CardDefinition::new(id, name, CardType::Land).with_ability(Ability::mana(color, 1))
}

/// Registry holding the built-in card pool
pub fn registry() -> Result<CardRegistry> {
    let mut registry = CardRegistry::new();
    for definition in definitions() {
        registry.add(definition)?;
    }
    Ok(registry)
}

/// Aggressive red deck
pub fn red_deck() -> DeckList {
    DeckList::new()
        .with("mountain", 16)
        .with("lightning_bolt", 8)
        .with("fickle_flames", 4)
        .with("spark_imp", 4)
        .with("lava_axe", 4)
        .with("stone_rain", 4)
}

/// Creatures and life gain
pub fn green_white_deck() -> DeckList {
    DeckList::new()
        .with("forest", 9)
        .with("plains", 9)
        .with("llanowar_elves", 6)
        .with("grizzly_bears", 8)
        .with("healing_salve", 8)
}

/// Card draw and mana, for long games
pub fn blue_black_deck() -> DeckList {
    DeckList::new()
        .with("island", 10)
        .with("swamp", 10)
        .with("divination", 10)
        .with("dark_ritual", 10)
}

/// A deck that loops forever once an Endless Echo resolves
pub fn echo_deck() -> DeckList {
    DeckList::new().with("island", 20).with("endless_echo", 20)
}

/// Look up a sample deck by name
pub fn deck_by_name(name: &str) -> Option<DeckList> {
    match name {
        "red" => Some(red_deck()),
        "green_white" | "gw" => Some(green_white_deck()),
        "blue_black" | "ub" => Some(blue_black_deck()),
        "echo" => Some(echo_deck()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_builds() {
        let registry = registry().unwrap();
        assert_eq!(registry.len(), definitions().len());
        assert!(registry.find_by_name("Lightning Bolt").is_some());
    }

    #[test]
    fn test_sample_decks_use_known_cards() {
        let registry = registry().unwrap();
        for name in ["red", "gw", "ub", "echo"] {
            let deck = deck_by_name(name).unwrap();
            assert_eq!(deck.total_cards(), 40, "{name}");
            for card in deck.cards() {
                assert!(registry.contains(card), "{name}: {card}");
            }
        }
        assert!(deck_by_name("purple").is_none());
    }

    #[test]
    fn test_costs_parse_from_braces() {
        let registry = registry().unwrap();
        let axe = registry.find_by_name("Lava Axe").unwrap();
        assert_eq!(axe.mana_cost.cmc(), 5);
        assert_eq!(axe.mana_cost.to_string(), "4R");
        assert_eq!(axe.mana_cost_text.as_deref(), Some("{4}{R}"));
    }
}
