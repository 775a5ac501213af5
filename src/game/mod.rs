//! Core game state, turn structure and the engine driving it

pub mod actions;
pub mod controller;
pub mod decisions;
pub mod engine;
pub mod events;
pub mod game_loop;
pub mod kill_switch;
pub mod logger;
pub mod phase;
pub mod priority;
pub mod random_controller;
pub mod reducer;
pub mod resolution;
pub mod scripted_controller;
pub mod stack;
pub mod state;
pub mod state_hash;
pub mod turn;
pub mod zero_controller;

pub use controller::{GameStateView, PlayerController};
pub use decisions::{decisions_for, decisions_for_player};
pub use engine::{DecisionRecord, Engine, EventListener};
pub use events::{GameEndReason, GameEvent};
pub use game_loop::{GameLoop, GameResult};
pub use kill_switch::{KillSwitch, KillSwitchConfig};
pub use logger::{GameLogger, LogEntry, OutputFormat, OutputMode, VerbosityLevel};
pub use phase::{Phase, Step, TurnState};
pub use random_controller::RandomController;
pub use reducer::transition;
pub use scripted_controller::ScriptedController;
pub use stack::{Stack, StackObject, StackObjectId, StackSource};
pub use state::GameState;
pub use state_hash::{compute_state_hash, format_hash};
pub use zero_controller::ZeroController;
