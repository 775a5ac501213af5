//! Strongly-typed wrappers for game concepts
//!
//! Newtypes prevent type confusion: a card's display name, a player's name
//! and the registry key of a card definition are all strings, but they cannot
//! be mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                $name(s.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(s.to_string())
            }
        }
    };
}

string_newtype!(
    /// Printed card name (e.g., "Lightning Bolt")
    CardName
);

string_newtype!(
    /// Player display name
    PlayerName
);

string_newtype!(
    /// Registry key of a card definition (e.g., "lightning_bolt")
    ///
    /// Every instance of the same printed card refers to one definition
    /// through this key.
    DefinitionId
);

impl CardName {
    pub fn to_lowercase(&self) -> String {
        self.0.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_name() {
        let name = CardName::new("Lightning Bolt");
        assert_eq!(name.as_str(), "Lightning Bolt");
        assert_eq!(name.to_lowercase(), "lightning bolt");
    }

    #[test]
    fn test_player_name() {
        let name = PlayerName::from("Alice");
        assert_eq!(name.to_string(), "Alice");
    }

    #[test]
    fn test_definition_id_is_transparent() {
        let id = DefinitionId::new("mountain");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"mountain\"");
    }
}
