use bevy::prelude::*;
use game_assets::loading::required_image_status;
use game_assets::{GameAssets, LoadStatus};
use game_core::{AppState, Playfield};
use texture_generator::GeneratedTextures;

pub struct BootPlugin;

impl Plugin for BootPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Boot), generate_textures)
            .add_systems(
                Update,
                wait_for_required_images.run_if(in_state(AppState::Boot)),
            );
    }
}

fn generate_textures(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    playfield: Res<Playfield>,
) {
    let textures = GeneratedTextures::build(
        &mut images,
        playfield.width as u32,
        playfield.height as u32,
    );
    info!(target: "boot", "generated {} textures", textures.len());
    commands.insert_resource(textures);
}

/// Leaves Boot once every sprite image is loaded; a failed image is fatal.
fn wait_for_required_images(
    asset_server: Res<AssetServer>,
    assets: Res<GameAssets>,
    mut next_state: ResMut<NextState<AppState>>,
    mut exit: EventWriter<AppExit>,
    mut last: Local<Option<LoadStatus>>,
) {
    let status = required_image_status(&asset_server, &assets.art);
    if last.as_ref() == Some(&status) {
        return;
    }
    match &status {
        LoadStatus::Ready => {
            info!(target: "boot", "assets ready");
            next_state.set(AppState::Menu);
        }
        LoadStatus::Pending { loaded, total } => {
            debug!(target: "boot", "loading images {loaded}/{total}");
        }
        LoadStatus::Failed(paths) => {
            error!(target: "boot", "required images failed to load: {}", paths.join(", "));
            exit.write(AppExit::error());
        }
    }
    *last = Some(status);
}
