//! Centralized game asset management (sprites, sounds, UI font).
//! Provides a single plugin that requests every file asset on entering Boot and
//! exposes the handles so other code doesn't hardcode paths.

use bevy::prelude::*;
use game_core::{AppState, ItemKind};

pub mod audio;
pub mod loading;

pub use audio::{music_bundle, sfx_bundle, MusicTrack};
pub use loading::{LoadProgress, LoadStatus};

pub const PLAYER_RUN_FRAMES: [&str; 3] = [
    "img/player_run_1.png",
    "img/player_run_2.png",
    "img/player_run_3.png",
];
pub const PLAYER_JUMP_FRAMES: [&str; 2] = ["img/player_jump_1.png", "img/player_jump_2.png"];
pub const SFX_JUMP: &str = "audio/jump.ogg";
pub const SFX_ITEM: &str = "audio/coin.ogg";
pub const SFX_WIN: &str = "audio/win.ogg";
pub const MUSIC: &str = "audio/music.ogg";
/// Cyrillic-capable UI font shipped under `assets/`. Bevy's built-in font is used when absent.
pub const UI_FONT: &str = "fonts/DejaVuSans-Bold.ttf";

pub fn item_image_path(kind: ItemKind) -> String {
    format!("img/{}.png", kind.texture_key())
}

#[derive(Resource, Debug, Clone, Default)]
pub struct FontAssets {
    pub ui: Handle<Font>,
}

/// Required sprite images. Boot does not leave until all of these are loaded.
#[derive(Resource, Debug, Clone, Default)]
pub struct ArtAssets {
    pub player_run: Vec<Handle<Image>>,
    pub player_jump: Vec<Handle<Image>>,
    pub beer: Handle<Image>,
    pub fish: Handle<Image>,
    pub glass: Handle<Image>,
}

impl ArtAssets {
    pub fn item(&self, kind: ItemKind) -> Handle<Image> {
        match kind {
            ItemKind::Beer => self.beer.clone(),
            ItemKind::Fish => self.fish.clone(),
            ItemKind::Glass => self.glass.clone(),
        }
    }

    /// Frame `index` of a clip, wrapping; a clip with no frames gives the blank handle.
    pub fn frame(clip: &[Handle<Image>], index: usize) -> Handle<Image> {
        if clip.is_empty() {
            return Handle::default();
        }
        clip[index % clip.len()].clone()
    }

    pub fn required(&self) -> impl Iterator<Item = &Handle<Image>> {
        self.player_run
            .iter()
            .chain(self.player_jump.iter())
            .chain([&self.beer, &self.fish, &self.glass])
    }
}

/// Optional sounds. A handle whose load failed simply never shows up in
/// `Assets<AudioSource>` and playback is skipped.
#[derive(Resource, Debug, Clone, Default)]
pub struct SoundAssets {
    pub jump: Handle<AudioSource>,
    pub item: Handle<AudioSource>,
    pub win: Handle<AudioSource>,
    pub music: Handle<AudioSource>,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct GameAssets {
    pub art: ArtAssets,
    pub sounds: SoundAssets,
    pub fonts: FontAssets,
}

#[derive(Default)]
pub struct GameAssetsPlugin;

impl Plugin for GameAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameAssets>()
            .add_systems(OnEnter(AppState::Boot), request_assets);
    }
}

fn font_available() -> bool {
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::path::Path::new("assets").join(UI_FONT).exists()
    }
    #[cfg(target_arch = "wasm32")]
    {
        true
    }
}

pub fn request_assets(mut game_assets: ResMut<GameAssets>, asset_server: Res<AssetServer>) {
    let art = ArtAssets {
        player_run: PLAYER_RUN_FRAMES.iter().map(|p| asset_server.load(*p)).collect(),
        player_jump: PLAYER_JUMP_FRAMES.iter().map(|p| asset_server.load(*p)).collect(),
        beer: asset_server.load(item_image_path(ItemKind::Beer)),
        fish: asset_server.load(item_image_path(ItemKind::Fish)),
        glass: asset_server.load(item_image_path(ItemKind::Glass)),
    };
    let sounds = SoundAssets {
        jump: asset_server.load(SFX_JUMP),
        item: asset_server.load(SFX_ITEM),
        win: asset_server.load(SFX_WIN),
        music: asset_server.load(MUSIC),
    };
    let fonts = if font_available() {
        FontAssets { ui: asset_server.load(UI_FONT) }
    } else {
        info!(target: "boot", "{UI_FONT} not found; using the built-in font");
        FontAssets::default()
    };
    info!(target: "boot", "requested {} images and 4 sounds", art.required().count());
    *game_assets = GameAssets { art, sounds, fonts };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_paths_follow_texture_keys() {
        assert_eq!(item_image_path(ItemKind::Beer), "img/item_beer.png");
        assert_eq!(item_image_path(ItemKind::Glass), "img/item_glass.png");
    }

    #[test]
    fn frame_wraps_and_tolerates_empty_clip() {
        let mut images = Assets::<Image>::default();
        let a = images.add(Image::default());
        let b = images.add(Image::default());
        let clip = vec![a.clone(), b.clone()];
        assert_eq!(ArtAssets::frame(&clip, 0), a);
        assert_eq!(ArtAssets::frame(&clip, 3), b);
        assert_eq!(ArtAssets::frame(&[], 5), Handle::default());
    }

    #[test]
    fn ui_font_ships_with_the_assets() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets").join(UI_FONT);
        let bytes = std::fs::read(&path).unwrap();
        // TrueType outlines.
        assert_eq!(&bytes[..4], &[0, 1, 0, 0]);
    }

    #[test]
    fn required_lists_every_sprite() {
        let art = ArtAssets {
            player_run: vec![Handle::default(); 3],
            player_jump: vec![Handle::default(); 2],
            ..default()
        };
        assert_eq!(art.required().count(), 8);
    }
}
