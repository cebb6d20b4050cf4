//! Durable store backed by a single RON map file.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::store::KeyValueStore;

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens (or lazily creates) the store at `path`. An unreadable or corrupt
    /// file starts empty; it is overwritten on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match read_entries(&path) {
            Ok(entries) => entries,
            Err(e) => {
                if path.exists() {
                    bevy::log::warn!(target: "storage", "ignoring unreadable store {}: {e:#}", path.display());
                }
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    /// Store file inside the platform data directory for this game.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_location(file_name: &str) -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "alexbeer")
            .context("could not determine a data directory")?;
        Ok(dirs.data_dir().join(file_name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create data dir {}", parent.display()))?;
        }
        let text = ron::ser::to_string_pretty(&self.entries, ron::ser::PrettyConfig::default())
            .context("serialize store")?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, text).with_context(|| format!("write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replace {}", self.path.display()))?;
        Ok(())
    }
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, String>> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    ron::from_str(&text).with_context(|| format!("parse {}", path.display()))
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
