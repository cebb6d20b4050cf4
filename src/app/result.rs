use bevy::prelude::*;
use game_assets::GameAssets;
use game_core::{AppState, GameConfigRes, Medal, Playfield, RunOutcome};
use game_storage::BestScoreStore;
use texture_generator::{self as tex, GeneratedTextures};

use crate::interaction::pointer::hits;
use crate::interaction::PointerPressed;
use crate::rendering::label::OUTLINE_BROWN;
use crate::rendering::scenery::{self, at, Z_UI};
use crate::rendering::{outlined_label, LabelStyle};

/// Half extents of the unscaled `btn_large` texture.
const BUTTON_HALF: Vec2 = Vec2::new(190.0, 65.0);
const MENU_BUTTON_SCALE: f32 = 0.6;
const MEDAL_RADIUS: f32 = 36.0;
const MEDAL_RING_RADIUS: f32 = 39.0;
const MEDAL_LABEL_SIZE: f32 = 28.0;

pub struct ResultPlugin;

impl Plugin for ResultPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Result), (record_best, spawn_result).chain())
            .add_systems(Update, handle_result_input.run_if(in_state(AppState::Result)));
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultAction {
    Retry,
    Menu,
}

impl ResultAction {
    pub fn target(self) -> AppState {
        match self {
            ResultAction::Retry => AppState::Game,
            ResultAction::Menu => AppState::Menu,
        }
    }
}

/// Clickable button on the result screen; `half` is its scaled hit box.
#[derive(Component, Debug, Clone, Copy)]
pub struct ResultButton {
    pub action: ResultAction,
    pub half: Vec2,
}

/// Best score after this session's update, shown on screen.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultBest(pub u32);

pub fn title_text(win: bool) -> &'static str {
    if win {
        "ПОБЕДА!"
    } else {
        "ИТОГ"
    }
}

pub fn score_line(score: u32, target: u32) -> String {
    format!("СЧЁТ: {score} / {target}")
}

pub fn best_line(best: u32) -> String {
    format!("РЕКОРД: {best}")
}

fn record_best(mut commands: Commands, outcome: Res<RunOutcome>, mut store: ResMut<BestScoreStore>) {
    let best = store.record(outcome.best, outcome.score);
    info!(
        target: "result",
        "=== RESULT === score={} win={} best={} (was {})",
        outcome.score, outcome.win, best, outcome.best
    );
    commands.insert_resource(ResultBest(best));
}

#[allow(clippy::too_many_arguments)]
fn spawn_result(
    mut commands: Commands,
    textures: Res<GeneratedTextures>,
    assets: Res<GameAssets>,
    playfield: Res<Playfield>,
    cfg: Res<GameConfigRes>,
    outcome: Res<RunOutcome>,
    best: Res<ResultBest>,
    meshes: Option<ResMut<Assets<Mesh>>>,
    materials: Option<ResMut<Assets<ColorMaterial>>>,
) {
    let pf = *playfield;
    let font = &assets.fonts.ui;
    let cx = pf.width / 2.0;

    scenery::spawn_sky(&mut commands, &textures, AppState::Result);
    scenery::spawn_static_hills(&mut commands, &textures, AppState::Result);

    for (text, size, y) in [
        (title_text(outcome.win).to_string(), 64.0, 100.0),
        (score_line(outcome.score, cfg.0.scoring.target), 36.0, 170.0),
        (best_line(best.0), 28.0, 220.0),
    ] {
        commands.spawn((
            outlined_label(text, &LabelStyle::new(font, size), at(&pf, cx, y, Z_UI)),
            StateScoped(AppState::Result),
        ));
    }

    if let Some(medal) = Medal::for_score(outcome.score, &cfg.0.scoring) {
        let center = at(&pf, cx, 290.0, Z_UI);
        match (meshes, materials) {
            (Some(mut meshes), Some(mut materials)) => {
                commands.spawn((
                    Mesh2d(meshes.add(Circle::new(MEDAL_RING_RADIUS))),
                    MeshMaterial2d(materials.add(Color::srgba_u8(0x33, 0x33, 0x33, 153))),
                    Transform::from_translation(center - Vec3::Z * 0.1),
                    StateScoped(AppState::Result),
                ));
                commands.spawn((
                    Mesh2d(meshes.add(Circle::new(MEDAL_RADIUS))),
                    MeshMaterial2d(materials.add(medal.color())),
                    Transform::from_translation(center),
                    StateScoped(AppState::Result),
                ));
            }
            // Headless: no mesh pipeline, a plain square stands in.
            _ => {
                commands.spawn((
                    Sprite::from_color(medal.color(), Vec2::splat(MEDAL_RADIUS * 2.0)),
                    Transform::from_translation(center),
                    StateScoped(AppState::Result),
                ));
            }
        }
        commands.spawn((
            outlined_label(medal.label(), &LabelStyle::new(font, MEDAL_LABEL_SIZE), at(&pf, cx, 350.0, Z_UI)),
            StateScoped(AppState::Result),
        ));
    }

    spawn_button(&mut commands, &textures, &pf, font, ResultAction::Retry, "ЕЩЁ РАЗ", 1.0, 40.0, pf.height - 120.0);
    spawn_button(
        &mut commands,
        &textures,
        &pf,
        font,
        ResultAction::Menu,
        "МЕНЮ",
        MENU_BUTTON_SCALE,
        28.0,
        pf.height - 40.0,
    );
}

#[allow(clippy::too_many_arguments)]
fn spawn_button(
    commands: &mut Commands,
    textures: &GeneratedTextures,
    pf: &Playfield,
    font: &Handle<Font>,
    action: ResultAction,
    label: &str,
    scale: f32,
    font_size: f32,
    y: f32,
) {
    let pos = at(pf, pf.width / 2.0, y, Z_UI);
    commands.spawn((
        ResultButton {
            action,
            half: BUTTON_HALF * scale,
        },
        Sprite::from_image(textures.get(tex::BUTTON_LARGE)),
        Transform::from_translation(pos).with_scale(Vec3::new(scale, scale, 1.0)),
        StateScoped(AppState::Result),
    ));
    commands.spawn((
        outlined_label(
            label,
            &LabelStyle::new(font, font_size).outline(OUTLINE_BROWN),
            pos + Vec3::new(0.0, 4.0 * scale, 1.0),
        ),
        StateScoped(AppState::Result),
    ));
}

/// Keyboard shortcuts first, then the first button under a pointer press.
pub fn resolve_action(
    keys: &ButtonInput<KeyCode>,
    presses: &[Vec2],
    buttons: &[(ResultButton, Vec2)],
) -> Option<ResultAction> {
    if keys.any_just_pressed([KeyCode::Enter, KeyCode::KeyR]) {
        return Some(ResultAction::Retry);
    }
    if keys.any_just_pressed([KeyCode::Escape, KeyCode::KeyM]) {
        return Some(ResultAction::Menu);
    }
    presses.iter().find_map(|p| {
        buttons
            .iter()
            .find(|(button, center)| hits(*p, *center, button.half))
            .map(|(button, _)| button.action)
    })
}

fn handle_result_input(
    state: Res<State<AppState>>,
    keys: Res<ButtonInput<KeyCode>>,
    mut pointer: EventReader<PointerPressed>,
    buttons: Query<(&ResultButton, &Transform)>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    // Ignore presses left over from the run (a jump tap on the fatal frame).
    if state.is_changed() {
        pointer.clear();
        return;
    }
    let presses: Vec<Vec2> = pointer.read().filter_map(|p| p.world).collect();
    let buttons: Vec<(ResultButton, Vec2)> = buttons
        .iter()
        .map(|(b, tf)| (*b, tf.translation.truncate()))
        .collect();
    if let Some(action) = resolve_action(&keys, &presses, &buttons) {
        info!(target: "result", "{action:?} -> {:?}", action.target());
        next_state.set(action.target());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buttons() -> Vec<(ResultButton, Vec2)> {
        vec![
            (
                ResultButton {
                    action: ResultAction::Retry,
                    half: BUTTON_HALF,
                },
                Vec2::new(0.0, -360.0),
            ),
            (
                ResultButton {
                    action: ResultAction::Menu,
                    half: BUTTON_HALF * MENU_BUTTON_SCALE,
                },
                Vec2::new(0.0, -440.0),
            ),
        ]
    }

    #[test]
    fn texts_follow_outcome() {
        assert_eq!(title_text(true), "ПОБЕДА!");
        assert_eq!(title_text(false), "ИТОГ");
        assert_eq!(score_line(15, 60), "СЧЁТ: 15 / 60");
        assert_eq!(best_line(60), "РЕКОРД: 60");
    }

    #[test]
    fn keys_pick_actions() {
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::KeyR);
        assert_eq!(resolve_action(&keys, &[], &[]), Some(ResultAction::Retry));

        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::Escape);
        assert_eq!(resolve_action(&keys, &[], &[]), Some(ResultAction::Menu));
    }

    #[test]
    fn pointer_hits_buttons() {
        let keys = ButtonInput::<KeyCode>::default();
        let b = buttons();
        assert_eq!(resolve_action(&keys, &[Vec2::new(100.0, -350.0)], &b), Some(ResultAction::Retry));
        assert_eq!(resolve_action(&keys, &[Vec2::new(20.0, -450.0)], &b), Some(ResultAction::Menu));
        // Outside the scaled menu button even though inside the unscaled box.
        assert_eq!(resolve_action(&keys, &[Vec2::new(150.0, -470.0)], &b), None);
        assert_eq!(resolve_action(&keys, &[], &b), None);
    }

    #[test]
    fn actions_map_to_states() {
        assert_eq!(ResultAction::Retry.target(), AppState::Game);
        assert_eq!(ResultAction::Menu.target(), AppState::Menu);
    }
}
