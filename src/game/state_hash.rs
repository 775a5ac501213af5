//! Deterministic state hashing
//!
//! Fingerprints a game state so two runs can be compared cheaply, e.g. to
//! check that a replayed decision history reproduces the original game.

use crate::game::GameState;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Fields left out of the hash
///
/// Card definitions are shared, immutable input rather than game state, and
/// would dominate the serialized size.
const EXCLUDED_FIELDS: &[&str] = &["card_definitions"];

/// Compute a deterministic hash of game state
///
/// The state is serialized to JSON with map keys sorted, so the hash does
/// not depend on hash map iteration order.
pub fn compute_state_hash(game: &GameState) -> u64 {
    let json_value = match serde_json::to_value(game) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Warning: Failed to serialize game state for hashing: {e}");
            return 0;
        }
    };

    let mut map = match json_value {
        serde_json::Value::Object(map) => map,
        other => return hash_value(&other),
    };
    for field in EXCLUDED_FIELDS {
        map.remove(*field);
    }
    hash_value(&serde_json::Value::Object(map))
}

fn hash_value(value: &serde_json::Value) -> u64 {
    let mut hasher = DefaultHasher::new();
    canonical(value).hash(&mut hasher);
    hasher.finish()
}

/// Canonical string form: object keys sorted at every level
fn canonical(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let body: Vec<String> = entries
                .into_iter()
                .map(|(key, v)| format!("{key:?}:{}", canonical(v)))
                .collect();
            format!("{{{}}}", body.join(","))
        }
        serde_json::Value::Array(items) => {
            let body: Vec<String> = items.iter().map(canonical).collect();
            format!("[{}]", body.join(","))
        }
        other => other.to_string(),
    }
}

/// Format a hash for display (shows first 8 hex digits)
pub fn format_hash(hash: u64) -> String {
    format!("{:08x}", (hash >> 32) as u32)
}
