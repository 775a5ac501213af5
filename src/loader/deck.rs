//! Deck lists
//!
//! Text format: one "<count> <definition id>" per line. Blank lines, `#`
//! comments and `[Section]` headers are ignored.

use crate::core::DefinitionId;
use crate::{MtgError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Represents a deck entry (card definition and count)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub card: DefinitionId,
    pub count: u8,
}

/// Represents a complete deck list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeckList {
    pub entries: Vec<DeckEntry>,
}

impl DeckList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper for adding copies of a card
    pub fn with(mut self, card: &str, count: u8) -> Self {
        self.entries.push(DeckEntry {
            card: DefinitionId::new(card),
            count,
        });
        self
    }

    /// Load a deck from a text file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MtgError::InvalidSettings(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::parse(&content)
    }

    /// Parse a deck from its text content
    pub fn parse(content: &str) -> Result<Self> {
        let mut deck = DeckList::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }

            let (count_str, card) = line
                .split_once(char::is_whitespace)
                .ok_or_else(|| MtgError::InvalidSettings(format!("bad deck line: {line}")))?;
            let count = count_str
                .parse::<u8>()
                .map_err(|_| MtgError::InvalidSettings(format!("bad card count: {line}")))?;
            deck.entries.push(DeckEntry {
                card: DefinitionId::new(card.trim()),
                count,
            });
        }

        if deck.entries.is_empty() {
            return Err(MtgError::InvalidSettings("empty deck".to_string()));
        }
        Ok(deck)
    }

    /// Total cards in the deck
    pub fn total_cards(&self) -> usize {
        self.entries.iter().map(|e| e.count as usize).sum()
    }

    /// Every card copy in list order
    pub fn cards(&self) -> impl Iterator<Item = &DefinitionId> {
        self.entries
            .iter()
            .flat_map(|e| std::iter::repeat(&e.card).take(e.count as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_deck() {
        let content = r#"
# Burn
[Main]
20 mountain
40 lightning_bolt
"#;

        let deck = DeckList::parse(content).unwrap();
        assert_eq!(deck.entries.len(), 2);
        assert_eq!(deck.total_cards(), 60);
        assert_eq!(deck.entries[0].card, DefinitionId::new("mountain"));
        assert_eq!(deck.entries[1].count, 40);
        assert_eq!(deck.cards().count(), 60);
    }

    #[test]
    fn test_parse_errors() {
        assert!(DeckList::parse("").is_err());
        assert!(DeckList::parse("x mountain").is_err());
        assert!(DeckList::parse("mountain").is_err());
    }

    #[test]
    fn test_deck_serializes_as_list() {
        let deck = DeckList::new().with("forest", 2);
        let json = serde_json::to_string(&deck).unwrap();
        assert_eq!(json, r#"[{"card":"forest","count":2}]"#);
    }
}
