//! Score-bracketed difficulty table.
//!
//! A tier is active from its `min_score` (inclusive) up to the next tier's
//! `min_score` (exclusive); the last tier is open ended.

use bevy::prelude::Resource;
use game_config::{DifficultyConfig, DifficultyTierConfig};

/// Scroll speed plus the two spawn intervals derived from the current score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Difficulty {
    pub speed: f32,
    pub obstacle_interval_ms: f32,
    pub item_interval_ms: f32,
}

#[derive(Resource, Clone, Debug, PartialEq)]
pub struct DifficultyTable {
    tiers: Vec<(u32, Difficulty)>,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self::from_config(&DifficultyConfig::default())
    }
}

impl DifficultyTable {
    /// Builds the table from config rows. Rows are sorted by threshold; an empty
    /// list falls back to the built-in three brackets.
    pub fn from_config(cfg: &DifficultyConfig) -> Self {
        let rows: Vec<DifficultyTierConfig> = if cfg.tiers.is_empty() {
            DifficultyConfig::default().tiers
        } else {
            cfg.tiers.clone()
        };
        let mut tiers: Vec<(u32, Difficulty)> = rows
            .iter()
            .map(|t| {
                (
                    t.min_score,
                    Difficulty {
                        speed: t.speed,
                        obstacle_interval_ms: t.obstacle_interval_ms,
                        item_interval_ms: t.item_interval_ms,
                    },
                )
            })
            .collect();
        tiers.sort_by_key(|(min, _)| *min);
        Self { tiers }
    }

    pub fn lookup(&self, score: u32) -> Difficulty {
        self.tiers
            .iter()
            .rev()
            .find(|(min, _)| score >= *min)
            .or_else(|| self.tiers.first())
            .map(|(_, d)| *d)
            .unwrap_or(Difficulty {
                speed: 4.0,
                obstacle_interval_ms: 1600.0,
                item_interval_ms: 1000.0,
            })
    }

    /// Index of the active tier; handy for logging tier changes.
    pub fn tier_index(&self, score: u32) -> usize {
        self.tiers
            .iter()
            .rposition(|(min, _)| score >= *min)
            .unwrap_or(0)
    }
}
