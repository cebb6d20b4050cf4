//! game_storage: the persistence port used by Menu and Result.
//!
//! The only value the game keeps between sessions is the best score, stored as a
//! decimal string under a single key. Backends implement [`KeyValueStore`]; the
//! [`BestScoreStore`] resource owns one and applies the max-only update rule.

use bevy::prelude::*;

mod file;
mod store;
#[cfg(target_arch = "wasm32")]
mod web;

pub use file::FileStore;
pub use store::{KeyValueStore, MemoryStore};
#[cfg(target_arch = "wasm32")]
pub use web::WebStore;

/// Parses a stored best score. Missing, non-numeric or negative values read as 0.
pub fn parse_best(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok()).unwrap_or(0)
}

/// Best-score view over an injected key-value store.
#[derive(Resource)]
pub struct BestScoreStore {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl BestScoreStore {
    pub fn new(store: impl KeyValueStore + 'static, key: impl Into<String>) -> Self {
        Self {
            store: Box::new(store),
            key: key.into(),
        }
    }

    pub fn in_memory(key: impl Into<String>) -> Self {
        Self::new(MemoryStore::new(), key)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn describe(&self) -> String {
        self.store.describe()
    }

    /// Stored best score, defaulting to 0.
    pub fn load(&self) -> u32 {
        let raw = self.store.get(&self.key);
        let best = parse_best(raw.as_deref());
        if raw.is_some() && best == 0 && raw.as_deref().map(str::trim) != Some("0") {
            debug!(target: "storage", "stored best {:?} is not a number; treating as 0", raw);
        }
        best
    }

    /// Persists `score` only if it beats `previous_best`. Returns the resulting best.
    /// A failed write is logged and the in-memory result still reflects the new best.
    pub fn record(&mut self, previous_best: u32, score: u32) -> u32 {
        if score <= previous_best {
            return previous_best;
        }
        if let Err(e) = self.store.set(&self.key, &score.to_string()) {
            warn!(target: "storage", "failed to persist best score {score}: {e:#}");
        } else {
            info!(target: "storage", "new best score {score} saved to {}", self.store.describe());
        }
        score
    }

    /// Forgets the stored best score.
    pub fn reset(&mut self) -> anyhow::Result<()> {
        self.store.remove(&self.key)
    }
}
