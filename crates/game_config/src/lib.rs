// Runner configuration (pure data crate; no Bevy dependency).
// Provides: data structures, layered loading, validation producing warnings (non-fatal), and tests.

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Logical playfield width; the camera always fits this many units horizontally.
    pub width: f32,
    /// Logical playfield height.
    pub height: f32,
    pub title: String,
    /// Letterbox colour shown around the playfield (0xRRGGBB).
    pub clear_color: u32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 540.0,
            height: 960.0,
            title: "AlexBeer".into(),
            clear_color: 0x196c6c,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpawnRange<T> {
    pub min: T,
    pub max: T,
}
impl<T: Default> Default for SpawnRange<T> {
    fn default() -> Self {
        Self {
            min: Default::default(),
            max: Default::default(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct GroundConfig {
    /// Height of the ground strip measured from the bottom edge.
    pub height: f32,
    /// Distance from the top of the ground strip down to the grass line the player runs on.
    pub grass_offset: f32,
    /// Vertical sway of the ground strip (px) and its half period (ms).
    pub sway: f32,
    pub sway_ms: f32,
}
impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            height: 180.0,
            grass_offset: 40.0,
            sway: 6.0,
            sway_ms: 2200.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    pub x: f32,
    pub scale: f32,
    /// Downward acceleration in px/s^2.
    pub gravity: f32,
    /// Upward speed applied on jump in px/s.
    pub jump_velocity: f32,
    /// How far above the ground line (px) still counts as standing on it.
    pub ground_tolerance: f32,
    pub run_fps: f32,
    pub jump_fps: f32,
}
impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            x: 160.0,
            scale: 1.6,
            gravity: 1200.0,
            jump_velocity: 560.0,
            ground_tolerance: 1.0,
            run_fps: 10.0,
            jump_fps: 6.0,
        }
    }
}

/// One row of the difficulty table; active from `min_score` until the next row.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct DifficultyTierConfig {
    pub min_score: u32,
    pub speed: f32,
    pub obstacle_interval_ms: f32,
    pub item_interval_ms: f32,
}
impl Default for DifficultyTierConfig {
    fn default() -> Self {
        Self {
            min_score: 0,
            speed: 4.0,
            obstacle_interval_ms: 1600.0,
            item_interval_ms: 1000.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct DifficultyConfig {
    pub tiers: Vec<DifficultyTierConfig>,
    /// Score from which a spawned obstacle may be followed by a second one.
    pub double_spawn_min_score: u32,
    pub double_spawn_chance: f64,
    pub double_spawn_delay_ms: f32,
}
impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            tiers: vec![
                DifficultyTierConfig {
                    min_score: 0,
                    speed: 4.0,
                    obstacle_interval_ms: 1600.0,
                    item_interval_ms: 1000.0,
                },
                DifficultyTierConfig {
                    min_score: 20,
                    speed: 5.0,
                    obstacle_interval_ms: 1300.0,
                    item_interval_ms: 850.0,
                },
                DifficultyTierConfig {
                    min_score: 40,
                    speed: 6.0,
                    obstacle_interval_ms: 1050.0,
                    item_interval_ms: 750.0,
                },
            ],
            double_spawn_min_score: 35,
            double_spawn_chance: 0.35,
            double_spawn_delay_ms: 300.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    /// World scroll per frame is `speed * scroll_factor` pixels.
    pub scroll_factor: f32,
    /// Obstacles appear this far beyond the right edge.
    pub obstacle_spawn_margin: f32,
    pub obstacle_despawn_x: f32,
    pub obstacle_scale: SpawnRange<f32>,
    pub item_spawn_margin: f32,
    pub item_spacing: f32,
    pub item_despawn_x: f32,
    /// Height of an item row above the ground line (inclusive integer px).
    pub item_height: SpawnRange<u32>,
    pub item_count: SpawnRange<u32>,
    pub item_scale: f32,
    pub item_bob_amplitude: f32,
    /// Radians per elapsed millisecond for the item bob.
    pub item_bob_rate: f32,
}
impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            scroll_factor: 2.2,
            obstacle_spawn_margin: 60.0,
            obstacle_despawn_x: -100.0,
            obstacle_scale: SpawnRange {
                min: 0.9,
                max: 1.15,
            },
            item_spawn_margin: 40.0,
            item_spacing: 48.0,
            item_despawn_x: -60.0,
            item_height: SpawnRange { min: 70, max: 120 },
            item_count: SpawnRange { min: 2, max: 3 },
            item_scale: 0.8,
            item_bob_amplitude: 0.3,
            item_bob_rate: 0.005,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    pub target: u32,
    pub bronze: u32,
    pub silver: u32,
    pub gold: u32,
}
impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            target: 60,
            bronze: 20,
            silver: 40,
            gold: 60,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct CelebrationConfig {
    pub confetti_count: u32,
    pub confetti_duration_ms: SpawnRange<u32>,
    pub confetti_drift: f32,
    pub confetti_spin_degrees: SpawnRange<f32>,
    /// Delay between the winning pickup and the result screen.
    pub result_delay_ms: f32,
}
impl Default for CelebrationConfig {
    fn default() -> Self {
        Self {
            confetti_count: 120,
            confetti_duration_ms: SpawnRange { min: 900, max: 1400 },
            confetti_drift: 100.0,
            confetti_spin_degrees: SpawnRange {
                min: 180.0,
                max: 540.0,
            },
            result_delay_ms: 1500.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    pub music_volume: f32,
    pub jump_volume: f32,
    pub item_volume: f32,
    pub win_volume: f32,
}
impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            music_volume: 0.25,
            jump_volume: 0.5,
            item_volume: 0.4,
            win_volume: 0.7,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Key the best score is stored under.
    pub best_key: String,
    /// File name of the key-value store inside the data directory.
    pub file_name: String,
    /// Overrides the platform data directory when set.
    pub data_dir: Option<String>,
}
impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            best_key: "alexbeer_best".into(),
            file_name: "storage.ron".into(),
            data_dir: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub ground: GroundConfig,
    pub player: PlayerConfig,
    pub difficulty: DifficultyConfig,
    pub spawn: SpawnConfig,
    pub scoring: ScoringConfig,
    pub celebration: CelebrationConfig,
    pub audio: AudioConfig,
    pub storage: StorageConfig,
    pub rapier_debug: bool,
    pub pixels_per_meter: f32,
}
impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: Default::default(),
            ground: Default::default(),
            player: Default::default(),
            difficulty: Default::default(),
            spawn: Default::default(),
            scoring: Default::default(),
            celebration: Default::default(),
            audio: Default::default(),
            storage: Default::default(),
            rapier_debug: false,
            pixels_per_meter: 100.0,
        }
    }
}

impl GameConfig {
    /// Load from a single RON file (errors contain human-readable context).
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        Self::from_ron_str(&data)
    }

    pub fn from_ron_str(data: &str) -> Result<Self, String> {
        ron::from_str(data).map_err(|e| format!("parse RON: {e}"))
    }

    /// Load file; on failure returns default config plus error string.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Load multiple layers; later overrides earlier (deep merge).
    /// Skips missing files; returns (config, used_paths, errors).
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();

        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.as_os_str().to_string_lossy().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }

        match merged {
            Some(val) => match val.into_rust::<GameConfig>() {
                Ok(cfg) => (cfg, used, errors),
                Err(e) => {
                    errors.push(format!(
                        "failed to deserialize merged config; using defaults: {e}"
                    ));
                    (GameConfig::default(), used, errors)
                }
            },
            None => (GameConfig::default(), used, errors),
        }
    }

    /// Produce validation warnings (non-fatal) for suspicious values.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.ground.height <= 0.0 || self.ground.height >= self.window.height {
            w.push(format!(
                "ground.height {} must lie inside the window height {}",
                self.ground.height, self.window.height
            ));
        }
        if self.ground.grass_offset < 0.0 || self.ground.grass_offset > self.ground.height {
            w.push(format!(
                "ground.grass_offset {} outside 0..ground.height",
                self.ground.grass_offset
            ));
        }
        if self.player.gravity <= 0.0 {
            w.push(format!(
                "player.gravity {} must be > 0 (downward acceleration)",
                self.player.gravity
            ));
        }
        if self.player.jump_velocity <= 0.0 {
            w.push("player.jump_velocity must be > 0".into());
        }
        if self.player.ground_tolerance < 0.0 {
            w.push("player.ground_tolerance negative".into());
        }

        let tiers = &self.difficulty.tiers;
        if tiers.is_empty() {
            w.push("difficulty.tiers is empty; built-in table will be used".into());
        } else {
            if tiers[0].min_score != 0 {
                w.push(format!(
                    "difficulty.tiers first min_score is {} (expected 0)",
                    tiers[0].min_score
                ));
            }
            if tiers.windows(2).any(|p| p[0].min_score >= p[1].min_score) {
                w.push("difficulty.tiers min_score must be strictly ascending".into());
            }
            for (i, t) in tiers.iter().enumerate() {
                if t.speed <= 0.0 {
                    w.push(format!("difficulty.tiers[{i}].speed must be > 0"));
                }
                if t.obstacle_interval_ms <= 0.0 || t.item_interval_ms <= 0.0 {
                    w.push(format!("difficulty.tiers[{i}] intervals must be > 0"));
                }
            }
        }
        if !(0.0..=1.0).contains(&self.difficulty.double_spawn_chance) {
            w.push(format!(
                "difficulty.double_spawn_chance {} outside 0..1",
                self.difficulty.double_spawn_chance
            ));
        }

        fn check_range<T: PartialOrd + std::fmt::Debug>(
            w: &mut Vec<String>,
            label: &str,
            r: &SpawnRange<T>,
        ) {
            if r.min > r.max {
                w.push(format!(
                    "{label} min ({:?}) greater than max ({:?})",
                    r.min, r.max
                ));
            }
        }
        check_range(&mut w, "spawn.obstacle_scale", &self.spawn.obstacle_scale);
        check_range(&mut w, "spawn.item_height", &self.spawn.item_height);
        check_range(&mut w, "spawn.item_count", &self.spawn.item_count);
        check_range(
            &mut w,
            "celebration.confetti_duration_ms",
            &self.celebration.confetti_duration_ms,
        );
        check_range(
            &mut w,
            "celebration.confetti_spin_degrees",
            &self.celebration.confetti_spin_degrees,
        );
        if self.spawn.item_count.min == 0 {
            w.push("spawn.item_count.min is 0; empty item rows possible".into());
        }
        if self.spawn.scroll_factor <= 0.0 {
            w.push("spawn.scroll_factor must be > 0".into());
        }

        let s = &self.scoring;
        if s.target == 0 {
            w.push("scoring.target is 0; every run wins immediately".into());
        }
        if !(s.bronze <= s.silver && s.silver <= s.gold) {
            w.push(format!(
                "medal thresholds out of order: bronze {} silver {} gold {}",
                s.bronze, s.silver, s.gold
            ));
        }
        if s.gold > s.target {
            w.push(format!(
                "scoring.gold {} exceeds target {}; gold is unreachable",
                s.gold, s.target
            ));
        }

        for (label, v) in [
            ("audio.music_volume", self.audio.music_volume),
            ("audio.jump_volume", self.audio.jump_volume),
            ("audio.item_volume", self.audio.item_volume),
            ("audio.win_volume", self.audio.win_volume),
        ] {
            if !(0.0..=1.0).contains(&v) {
                w.push(format!("{label} {v} outside 0..1"));
            }
        }
        if self.storage.best_key.trim().is_empty() {
            w.push("storage.best_key is empty".into());
        }
        if self.pixels_per_meter <= 0.0 {
            w.push("pixels_per_meter must be > 0".into());
        }
        w
    }
}

fn merge_value(base: &mut ron::value::Value, overlay: ron::value::Value) {
    use ron::value::Value;
    match (base, overlay) {
        (Value::Map(bm), Value::Map(om)) => {
            for (k, v) in om.into_iter() {
                let mut incoming = Some(v);
                for (ek, ev) in bm.iter_mut() {
                    if *ek == k {
                        if let Some(val) = incoming.take() {
                            merge_value(ev, val);
                        }
                        break;
                    }
                }
                if let Some(val) = incoming {
                    bm.insert(k, val);
                }
            }
        }
        (b, o) => *b = o,
    }
}
