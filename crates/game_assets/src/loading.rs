use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::ArtAssets;

/// Per-asset progress, reduced from Bevy's `LoadState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadProgress {
    Loading,
    Loaded,
    Failed,
}

impl From<&LoadState> for LoadProgress {
    fn from(state: &LoadState) -> Self {
        match state {
            LoadState::Loaded => LoadProgress::Loaded,
            LoadState::Failed(_) => LoadProgress::Failed,
            LoadState::NotLoaded | LoadState::Loading => LoadProgress::Loading,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Pending { loaded: usize, total: usize },
    Ready,
    /// Labels of the assets that failed.
    Failed(Vec<String>),
}

/// Any failure wins over pending; ready only when everything is loaded.
pub fn summarize<L: Into<String>>(entries: impl IntoIterator<Item = (L, LoadProgress)>) -> LoadStatus {
    let mut failed = Vec::new();
    let (mut loaded, mut total) = (0, 0);
    for (label, progress) in entries {
        total += 1;
        match progress {
            LoadProgress::Loaded => loaded += 1,
            LoadProgress::Failed => failed.push(label.into()),
            LoadProgress::Loading => {}
        }
    }
    if !failed.is_empty() {
        LoadStatus::Failed(failed)
    } else if loaded == total {
        LoadStatus::Ready
    } else {
        LoadStatus::Pending { loaded, total }
    }
}

pub fn required_image_status(asset_server: &AssetServer, art: &ArtAssets) -> LoadStatus {
    summarize(art.required().map(|handle| {
        let label = asset_server
            .get_path(handle.id())
            .map(|p| p.to_string())
            .unwrap_or_else(|| format!("{:?}", handle.id()));
        (label, LoadProgress::from(&asset_server.load_state(handle.id())))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_loaded_is_ready() {
        let s = summarize([("a", LoadProgress::Loaded), ("b", LoadProgress::Loaded)]);
        assert_eq!(s, LoadStatus::Ready);
    }

    #[test]
    fn partial_is_pending() {
        let s = summarize([("a", LoadProgress::Loaded), ("b", LoadProgress::Loading)]);
        assert_eq!(s, LoadStatus::Pending { loaded: 1, total: 2 });
    }

    #[test]
    fn failure_reported_even_while_others_load() {
        let s = summarize([
            ("img/player_run_1.png", LoadProgress::Failed),
            ("img/item_beer.png", LoadProgress::Loading),
        ]);
        assert_eq!(s, LoadStatus::Failed(vec!["img/player_run_1.png".to_string()]));
    }

    #[test]
    fn not_loaded_counts_as_loading() {
        assert_eq!(LoadProgress::from(&LoadState::NotLoaded), LoadProgress::Loading);
        assert_eq!(LoadProgress::from(&LoadState::Loaded), LoadProgress::Loaded);
    }
}
