//! Command line, layered config loading and store selection for the desktop binary.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bevy::prelude::*;
use clap::Parser;
use game_config::{GameConfig, StorageConfig};
use game_storage::BestScoreStore;

pub const BASE_CONFIG: &str = "assets/config/game.ron";
/// Optional untracked overrides next to the base file.
pub const LOCAL_CONFIG: &str = "assets/config/game.local.ron";

#[derive(Parser, Debug, Default, Clone)]
#[command(name = "alexbeer_runner", version, about = "AlexBeer endless runner")]
pub struct Cli {
    /// Extra RON config layer, applied after the bundled ones (repeatable).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Vec<PathBuf>,
    /// Directory holding the best-score file.
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
    /// Seed for the gameplay RNG (random when omitted).
    #[arg(long)]
    pub seed: Option<u64>,
    /// Write the generated textures as PNG files into DIR and exit.
    #[arg(long, value_name = "DIR")]
    pub dump_textures: Option<PathBuf>,
    /// Forget the stored best score before starting.
    #[arg(long)]
    pub reset_best: bool,
}

/// What config loading found, logged once the log plugin is up.
#[derive(Resource, Debug, Clone, Default)]
pub struct ConfigReport {
    pub used: Vec<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub notes: Vec<String>,
}

/// Bundled layers that exist on disk, then every explicit `--config` path.
pub fn config_layers(cli: &Cli, root: &Path) -> Vec<PathBuf> {
    let mut layers: Vec<PathBuf> = [BASE_CONFIG, LOCAL_CONFIG]
        .iter()
        .map(|p| root.join(p))
        .filter(|p| p.exists())
        .collect();
    layers.extend(cli.config.iter().cloned());
    layers
}

pub fn load_config(cli: &Cli, root: &Path) -> (GameConfig, ConfigReport) {
    let (cfg, used, errors) = GameConfig::load_layered(config_layers(cli, root));
    let warnings = cfg.validate();
    (
        cfg,
        ConfigReport {
            used,
            errors,
            warnings,
            notes: Vec::new(),
        },
    )
}

/// Best-score file location: `--data-dir`, then `storage.data_dir`, then the platform data dir.
#[cfg(not(target_arch = "wasm32"))]
pub fn store_path(storage: &StorageConfig, data_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = data_dir {
        return Ok(dir.join(&storage.file_name));
    }
    if let Some(dir) = &storage.data_dir {
        return Ok(PathBuf::from(dir).join(&storage.file_name));
    }
    game_storage::FileStore::default_location(&storage.file_name)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn open_store(storage: &StorageConfig, data_dir: Option<&Path>) -> Result<BestScoreStore> {
    let path = store_path(storage, data_dir).context("locate best-score file")?;
    Ok(BestScoreStore::new(
        game_storage::FileStore::open(path),
        storage.best_key.clone(),
    ))
}

#[cfg(target_arch = "wasm32")]
pub fn open_store(storage: &StorageConfig, _data_dir: Option<&Path>) -> Result<BestScoreStore> {
    Ok(BestScoreStore::new(game_storage::WebStore, storage.best_key.clone()))
}

/// Opens the configured store, falling back to memory so the game still runs.
pub fn open_store_or_memory(storage: &StorageConfig, data_dir: Option<&Path>, report: &mut ConfigReport) -> BestScoreStore {
    match open_store(storage, data_dir) {
        Ok(store) => store,
        Err(e) => {
            report
                .errors
                .push(format!("{e:#}; best score kept in memory only"));
            BestScoreStore::in_memory(storage.best_key.clone())
        }
    }
}

pub fn dump_textures(dir: &Path, cfg: &GameConfig) -> Result<Vec<PathBuf>> {
    texture_generator::dump_png(dir, cfg.window.width as u32, cfg.window.height as u32)
        .with_context(|| format!("dump textures into {}", dir.display()))
}

pub fn log_config_report(report: Res<ConfigReport>) {
    if report.used.is_empty() {
        info!("config: no files found, using defaults");
    } else {
        info!("config layers: {}", report.used.join(", "));
    }
    for e in &report.errors {
        error!("config: {e}");
    }
    for w in &report.warnings {
        warn!("config: {w}");
    }
    for n in &report.notes {
        info!("{n}");
    }
}
