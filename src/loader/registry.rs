//! Card registry for looking up card definitions
//!
//! Card content is opaque to the engine: the registry maps each
//! `DefinitionId` to its immutable `CardDefinition`. Definitions can be built
//! in code or loaded from JSON.

use crate::core::{CardDefinition, DefinitionId, ManaCost};
use crate::{MtgError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Registry of card definitions keyed by definition ID
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardRegistry {
    definitions: FxHashMap<DefinitionId, CardDefinition>,
}

impl CardRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON array of card definitions
    pub fn from_json(json: &str) -> Result<Self> {
        let definitions: Vec<CardDefinition> = serde_json::from_str(json)?;
        let mut registry = CardRegistry::new();
        for definition in definitions {
            registry.add(definition)?;
        }
        Ok(registry)
    }

    /// Load a JSON array of card definitions from a file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MtgError::InvalidSettings(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    /// Add a definition; IDs must be unique
    ///
    /// A printed cost, when present, must parse to the structured cost.
    pub fn add(&mut self, definition: CardDefinition) -> Result<()> {
        if self.definitions.contains_key(&definition.id) {
            return Err(MtgError::InvalidSettings(format!(
                "duplicate card definition: {}",
                definition.id
            )));
        }
        if let Some(text) = &definition.mana_cost_text {
            let printed = ManaCost::parse(text)?;
            if printed != definition.mana_cost {
                return Err(MtgError::InvalidSettings(format!(
                    "{}: printed cost {text} does not match {}",
                    definition.id, definition.mana_cost
                )));
            }
        }
        self.definitions.insert(definition.id.clone(), definition);
        Ok(())
    }

    /// Look up a definition by ID
    pub fn get(&self, id: &DefinitionId) -> Result<&CardDefinition> {
        self.definitions
            .get(id)
            .ok_or_else(|| MtgError::UnknownCardReference(format!("definition {id}")))
    }

    pub fn contains(&self, id: &DefinitionId) -> bool {
        self.definitions.contains_key(id)
    }

    /// Look up a card by printed name (case-insensitive)
    pub fn find_by_name(&self, name: &str) -> Option<&CardDefinition> {
        let name_lower = name.to_lowercase();
        self.definitions
            .values()
            .find(|def| def.name.to_lowercase() == name_lower)
    }

    /// All definition IDs, sorted for stable output
    pub fn ids(&self) -> Vec<&DefinitionId> {
        let mut ids: Vec<_> = self.definitions.keys().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardType, Color, Effect, TargetSpec};

    #[test]
    fn test_registry_from_json() {
        let json = r#"[
            {
                "id": "shock",
                "name": "Shock",
                "card_type": "Instant",
                "mana_cost": { "generic": 0, "pips": [0, 0, 0, 1, 0, 0] },
                "mana_cost_text": "{R}",
                "abilities": [
                    {
                        "text": "Shock deals 2 damage to any target.",
                        "kind": "Spell",
                        "target": "AnyPlayer",
                        "effects": [ { "DealDamage": { "amount": 2 } } ]
                    }
                ]
            },
            {
                "id": "mountain",
                "name": "Mountain",
                "card_type": "Land",
                "abilities": [
                    {
                        "text": "{T}: Add R",
                        "kind": "Mana",
                        "effects": [ { "AddMana": { "color": "Red", "amount": 1 } } ]
                    }
                ]
            }
        ]"#;

        let registry = CardRegistry::from_json(json).unwrap();
        assert_eq!(registry.len(), 2);

        let shock = registry.get(&DefinitionId::new("shock")).unwrap();
        assert_eq!(shock.card_type, CardType::Instant);
        assert_eq!(shock.mana_cost.pips(Color::Red), 1);
        assert_eq!(shock.spell_target(), TargetSpec::AnyPlayer);
        assert_eq!(
            shock.abilities[0].effects.as_slice(),
            &[Effect::DealDamage { amount: 2 }]
        );

        let mountain = registry.find_by_name("MOUNTAIN").unwrap();
        assert!(mountain.has_mana_ability());
        assert_eq!(mountain.mana_cost.cmc(), 0);
    }

    #[test]
    fn test_unknown_definition() {
        let registry = CardRegistry::new();
        assert!(matches!(
            registry.get(&DefinitionId::new("nope")),
            Err(MtgError::UnknownCardReference(_))
        ));
    }

    #[test]
    fn test_printed_cost_is_checked() {
        let card = |text: &str| {
            format!(
                r#"[{{
                    "id": "ogre",
                    "name": "Ogre",
                    "card_type": "Creature",
                    "mana_cost": {{ "generic": 2, "pips": [0, 0, 0, 1, 0, 0] }},
                    "mana_cost_text": "{text}"
                }}]"#
            )
        };

        assert!(CardRegistry::from_json(&card("{2}{R}")).is_ok());
        assert!(matches!(
            CardRegistry::from_json(&card("{3}{R}")),
            Err(MtgError::InvalidSettings(_))
        ));
        assert!(matches!(
            CardRegistry::from_json(&card("{300}{R}")),
            Err(MtgError::InvalidManaCost(_))
        ));
    }

    #[test]
    fn test_duplicate_definition_rejected() {
        let mut registry = CardRegistry::new();
        let def = CardDefinition::new("forest", "Forest", CardType::Land);
        registry.add(def.clone()).unwrap();
        assert!(matches!(
            registry.add(def),
            Err(MtgError::InvalidSettings(_))
        ));
    }
}
