use bevy::prelude::*;
use bevy::sprite::Anchor;
use game_assets::GameAssets;
use game_core::{AppState, GameRng, ItemKind, Playfield};
use game_storage::BestScoreStore;
use texture_generator::{self as tex, GeneratedTextures};

use crate::interaction::PointerPressed;
use crate::rendering::label::OUTLINE_BROWN;
use crate::rendering::scenery::{self, at, tinted, Z_UI};
use crate::rendering::{outlined_label, LabelStyle};

pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Menu), spawn_menu)
            .add_systems(Update, handle_menu_input.run_if(in_state(AppState::Menu)));
    }
}

/// Play button; any press on the screen starts the run as well.
#[derive(Component, Debug, Default)]
pub struct PlayButton;

/// Best-score line under the title.
#[derive(Component, Debug, Default)]
pub struct MenuBestText;

pub fn menu_best_line(best: u32) -> String {
    format!("РЕКОРД: {best}")
}

fn spawn_menu(
    mut commands: Commands,
    textures: Res<GeneratedTextures>,
    assets: Res<GameAssets>,
    playfield: Res<Playfield>,
    store: Res<BestScoreStore>,
    mut rng: ResMut<GameRng>,
) {
    let pf = *playfield;
    let best = store.load();
    info!(target: "menu", "=== MAIN MENU === best={best} (store: {})", store.describe());

    scenery::spawn_sky(&mut commands, &textures, AppState::Menu);
    scenery::spawn_static_hills(&mut commands, &textures, AppState::Menu);
    scenery::spawn_clouds(&mut commands, &textures, &pf, &mut rng.0, AppState::Menu, true);

    let font = &assets.fonts.ui;
    commands.spawn((
        outlined_label("ALEXBEER", &LabelStyle::new(font, 64.0), at(&pf, pf.width / 2.0, 140.0, Z_UI)),
        StateScoped(AppState::Menu),
    ));
    commands.spawn((
        MenuBestText,
        outlined_label(menu_best_line(best), &LabelStyle::new(font, 28.0), at(&pf, pf.width / 2.0, 220.0, Z_UI)),
        StateScoped(AppState::Menu),
    ));

    spawn_preview(&mut commands, &textures, &assets, &pf);

    commands.spawn((
        PlayButton,
        Sprite::from_image(textures.get(tex::BUTTON_LARGE)),
        Transform::from_translation(at(&pf, pf.width / 2.0, pf.height - 180.0, Z_UI)),
        StateScoped(AppState::Menu),
    ));
    commands.spawn((
        outlined_label(
            "ИГРАТЬ",
            &LabelStyle::new(font, 52.0).outline(OUTLINE_BROWN),
            at(&pf, pf.width / 2.0, pf.height - 184.0, Z_UI + 1.0),
        ),
        StateScoped(AppState::Menu),
    ));
}

/// Static miniature of a run inside a translucent panel. Purely decorative.
fn spawn_preview(commands: &mut Commands, textures: &GeneratedTextures, assets: &GameAssets, pf: &Playfield) {
    let origin = Vec2::new(30.0, 300.0);
    let panel_w = pf.width - 160.0;
    let local = |x: f32, y: f32, z: f32| at(pf, origin.x + x, origin.y + y, 4.0 + z);

    commands.spawn((
        Sprite {
            color: Color::srgba(1.0, 1.0, 1.0, 0.2),
            custom_size: Some(Vec2::new(panel_w, 260.0)),
            anchor: Anchor::TopLeft,
            ..default()
        },
        Transform::from_translation(local(0.0, 0.0, 0.0)),
        StateScoped(AppState::Menu),
    ));
    for (key, alpha, z) in [(tex::HILL_FAR, 0.4, 0.1), (tex::HILL_NEAR, 0.5, 0.2)] {
        commands.spawn((
            Sprite {
                anchor: Anchor::TopLeft,
                ..tinted(textures.get(key), alpha)
            },
            Transform::from_translation(local(0.0, 0.0, z)).with_scale(Vec3::new(0.8, 0.8, 1.0)),
            StateScoped(AppState::Menu),
        ));
    }
    for (x, y) in [(220.0, 80.0), (400.0, 60.0)] {
        commands.spawn((
            tinted(textures.get(tex::CLOUD), 0.6),
            Transform::from_translation(local(x, y, 0.3)),
            StateScoped(AppState::Menu),
        ));
    }
    let ground_scale = (pf.width - 240.0) / tex::GROUND_TILE_WIDTH as f32;
    commands.spawn((
        scenery::anchored(textures.get(tex::GROUND_TILE), Anchor::TopLeft),
        Transform::from_translation(local(40.0, 200.0, 0.4)).with_scale(Vec3::new(ground_scale, 1.0, 1.0)),
        StateScoped(AppState::Menu),
    ));
    commands.spawn((
        scenery::anchored(game_assets::ArtAssets::frame(&assets.art.player_run, 0), Anchor::BottomCenter),
        Transform::from_translation(local(140.0, 190.0, 0.5)),
        StateScoped(AppState::Menu),
    ));
    for (i, kind) in ItemKind::ALL.into_iter().enumerate() {
        commands.spawn((
            Sprite::from_image(assets.art.item(kind)),
            Transform::from_translation(local(260.0 + i as f32 * 60.0, 150.0, 0.5)),
            StateScoped(AppState::Menu),
        ));
    }
    commands.spawn((
        scenery::anchored(textures.get(tex::OBSTACLE_BLOCK), Anchor::BottomCenter),
        Transform::from_translation(local(panel_w - 120.0, 190.0, 0.5)),
        StateScoped(AppState::Menu),
    ));
}

fn handle_menu_input(
    state: Res<State<AppState>>,
    keys: Res<ButtonInput<KeyCode>>,
    mut pointer: EventReader<PointerPressed>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if state.is_changed() {
        pointer.clear();
        return;
    }
    let pressed = pointer.read().count() > 0;
    if pressed || keys.any_just_pressed([KeyCode::Enter, KeyCode::Space]) {
        info!(target: "menu", "starting run");
        next_state.set(AppState::Game);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_line_formats_score() {
        assert_eq!(menu_best_line(0), "РЕКОРД: 0");
        assert_eq!(menu_best_line(42), "РЕКОРД: 42");
    }
}
