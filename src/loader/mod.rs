//! Card registry, decks and game setup

pub mod builtin;
pub mod deck;
pub mod game_init;
pub mod registry;
pub mod settings;

pub use deck::{DeckEntry, DeckList};
pub use game_init::initialize_game;
pub use registry::CardRegistry;
pub use settings::{GameSettings, PlayerSetup};
