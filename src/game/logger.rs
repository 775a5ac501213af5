//! Game logger
//!
//! Each engine owns one logger. Messages are filtered by verbosity and go to
//! stdout, to an in-memory buffer that tests can inspect, or both. Events can
//! be written as text or as one JSON object per line.

use crate::game::GameEvent;
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::ops::Deref;

/// Verbosity level for game output
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum VerbosityLevel {
    /// Silent - no output during game
    Silent = 0,
    /// Minimal - only game outcome
    Minimal = 1,
    /// Normal - turns, steps, and key actions (default)
    #[default]
    Normal = 2,
    /// Verbose - all actions and state changes
    Verbose = 3,
}

impl VerbosityLevel {
    /// Map a numeric CLI level (0-3) to a verbosity
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => VerbosityLevel::Silent,
            1 => VerbosityLevel::Minimal,
            2 => VerbosityLevel::Normal,
            _ => VerbosityLevel::Verbose,
        }
    }
}

/// Output format for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Machine-readable JSON output (one object per line)
    Json,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
    /// Both stdout and in-memory buffer
    Both,
}

/// A captured log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Verbosity level of this log entry
    pub level: VerbosityLevel,
    pub message: String,
    /// Optional category (e.g., "controller_choice", "game_event")
    pub category: Option<String>,
}

/// Read-only access to captured log entries
pub struct LogGuard<'a> {
    guard: Ref<'a, Vec<LogEntry>>,
}

impl<'a> LogGuard<'a> {
    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.guard.iter()
    }

    pub fn len(&self) -> usize {
        self.guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard.is_empty()
    }
}

impl<'a> Deref for LogGuard<'a> {
    type Target = [LogEntry];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

/// Per-engine logger
pub struct GameLogger {
    verbosity: VerbosityLevel,
    output_format: OutputFormat,
    output_mode: OutputMode,
    /// Print the state hash alongside each logged transition
    debug_state_hash: bool,

    /// Captured log entries
    log_buffer: RefCell<Vec<LogEntry>>,
}

impl GameLogger {
    /// Create a new logger with default verbosity (Normal)
    pub fn new() -> Self {
        Self::with_verbosity(VerbosityLevel::default())
    }

    /// Create a logger with specified verbosity
    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        GameLogger {
            verbosity,
            output_format: OutputFormat::default(),
            output_mode: OutputMode::default(),
            debug_state_hash: false,
            log_buffer: RefCell::new(Vec::new()),
        }
    }

    /// Logger that only captures to memory, for tests and batch runs
    pub fn capturing(verbosity: VerbosityLevel) -> Self {
        let mut logger = Self::with_verbosity(verbosity);
        logger.output_mode = OutputMode::Memory;
        logger
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    /// Capture to the in-memory buffer and suppress stdout
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    pub fn disable_capture(&mut self) {
        self.output_mode = OutputMode::Stdout;
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.output_mode, OutputMode::Memory | OutputMode::Both)
    }

    /// Print buffered logs allowed by the verbosity, then clear the buffer
    pub fn flush_buffer(&mut self) {
        for entry in self.log_buffer.borrow().iter() {
            if entry.level <= self.verbosity {
                self.log_to_stdout(entry.level, &entry.message);
            }
        }
        self.clear_logs();
    }

    /// Get access to captured log entries
    pub fn logs(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.log_buffer.borrow(),
        }
    }

    pub fn clear_logs(&mut self) {
        self.log_buffer.borrow_mut().clear();
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = format;
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    pub fn set_debug_state_hash(&mut self, enabled: bool) {
        self.debug_state_hash = enabled;
    }

    pub fn debug_state_hash_enabled(&self) -> bool {
        self.debug_state_hash
    }

    #[inline]
    fn log_to_stdout(&self, level: VerbosityLevel, message: &str) {
        if level == VerbosityLevel::Minimal {
            println!("{message}");
        } else {
            println!("  {message}");
        }
    }

    /// Route one message to the buffer and/or stdout
    fn log(&self, level: VerbosityLevel, message: &str, category: Option<&str>) {
        let should_capture = self.is_capturing();
        let should_output = matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both);

        // Early exit if message won't be used
        if level > self.verbosity && !should_capture {
            return;
        }

        if should_capture {
            self.log_buffer.borrow_mut().push(LogEntry {
                level,
                message: message.to_string(),
                category: category.map(str::to_string),
            });
        }

        if should_output && level <= self.verbosity {
            self.log_to_stdout(level, message);
        }
    }

    /// Log at Minimal level
    #[inline]
    pub fn minimal(&self, message: &str) {
        self.log(VerbosityLevel::Minimal, message, None);
    }

    /// Log at Normal level
    #[inline]
    pub fn normal(&self, message: &str) {
        self.log(VerbosityLevel::Normal, message, None);
    }

    /// Log at Verbose level
    #[inline]
    pub fn verbose(&self, message: &str) {
        self.log(VerbosityLevel::Verbose, message, None);
    }

    /// Log a controller decision at Normal level
    pub fn controller_choice(&self, controller_name: &str, message: &str) {
        if self.debug_state_hash {
            eprintln!("  >>> {controller_name}: {message}");
        }
        self.log(VerbosityLevel::Normal, message, Some("controller_choice"));
    }

    /// Log a game event at the level matching its importance
    pub fn log_event(&self, event: &GameEvent) {
        let level = event_level(event);
        if level > self.verbosity && !self.is_capturing() {
            return;
        }

        let message = match self.output_format {
            OutputFormat::Text => event.to_string(),
            OutputFormat::Json => match serde_json::to_string(event) {
                Ok(json) => json,
                Err(e) => format!("{{\"error\":\"{e}\"}}"),
            },
        };
        self.log(level, &message, Some("game_event"));
    }
}

/// Verbosity at which an event is shown
fn event_level(event: &GameEvent) -> VerbosityLevel {
    match event {
        GameEvent::GameEnded { .. } | GameEvent::KillSwitchTriggered { .. } => {
            VerbosityLevel::Minimal
        }
        GameEvent::SpellCast { .. }
        | GameEvent::AbilityTriggered { .. }
        | GameEvent::SpellResolved { .. }
        | GameEvent::DirectDamageApplied { .. }
        | GameEvent::LifeGained { .. }
        | GameEvent::CardMoved { .. }
        | GameEvent::StepAdvanced { .. } => VerbosityLevel::Normal,
        GameEvent::ManaAdded { .. }
        | GameEvent::ManaPoolEmptied { .. }
        | GameEvent::PermanentsUntapped { .. }
        | GameEvent::PriorityPassed { .. }
        | GameEvent::PlayerDecisionRequested { .. } => VerbosityLevel::Verbose,
    }
}

impl Default for GameLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GameLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameLogger")
            .field("verbosity", &self.verbosity)
            .field("output_mode", &self.output_mode)
            .field("log_count", &self.log_buffer.borrow().len())
            .finish()
    }
}

impl Clone for GameLogger {
    /// Clones the settings; the captured buffer starts empty
    fn clone(&self) -> Self {
        GameLogger {
            verbosity: self.verbosity,
            output_format: self.output_format,
            output_mode: self.output_mode,
            debug_state_hash: self.debug_state_hash,
            log_buffer: RefCell::new(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    #[test]
    fn test_logger_creation() {
        let logger = GameLogger::new();
        assert_eq!(logger.verbosity(), VerbosityLevel::Normal);
        assert!(!logger.is_capturing());
    }

    #[test]
    fn test_log_capture() {
        let mut logger = GameLogger::new();
        logger.enable_capture();

        logger.normal("test message");
        logger.minimal("minimal message");

        let logs = logger.logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].message, "test message");
        assert_eq!(logs[1].level, VerbosityLevel::Minimal);
    }

    #[test]
    fn test_event_levels() {
        let logger = GameLogger::capturing(VerbosityLevel::Normal);
        let player = PlayerId::new(0);

        logger.log_event(&GameEvent::PriorityPassed { player });
        logger.log_event(&GameEvent::GameEnded {
            reason: crate::game::GameEndReason::Administrative(player),
        });

        let logs = logger.logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].level, VerbosityLevel::Verbose);
        assert_eq!(logs[1].level, VerbosityLevel::Minimal);
        assert_eq!(logs[1].category.as_deref(), Some("game_event"));
    }

    #[test]
    fn test_json_output() {
        let mut logger = GameLogger::capturing(VerbosityLevel::Verbose);
        logger.set_output_format(OutputFormat::Json);

        logger.log_event(&GameEvent::PriorityPassed {
            player: PlayerId::new(1),
        });

        let logs = logger.logs();
        assert_eq!(logs[0].message, r#"{"PriorityPassed":{"player":1}}"#);
    }

    #[test]
    fn test_flush_buffer() {
        let mut logger = GameLogger::new();
        logger.enable_capture();

        logger.normal("message 1");
        logger.normal("message 2");
        assert_eq!(logger.logs().len(), 2);

        logger.flush_buffer();
        assert_eq!(logger.logs().len(), 0);
    }

    #[test]
    fn test_from_level() {
        assert_eq!(VerbosityLevel::from_level(0), VerbosityLevel::Silent);
        assert_eq!(VerbosityLevel::from_level(3), VerbosityLevel::Verbose);
        assert_eq!(VerbosityLevel::from_level(9), VerbosityLevel::Verbose);
    }
}
