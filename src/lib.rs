//! MTG rules engine
//!
//! A deterministic engine for a turn-based card game: turn structure,
//! priority, a LIFO stack, mana, and a reducer that applies one player
//! decision at a time and reports what happened as events.

pub mod core;
pub mod error;
pub mod game;
pub mod loader;
pub mod tournament;
pub mod zones;

pub use error::{MtgError, Rejection, Result};
