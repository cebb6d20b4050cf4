//! The run itself: entering Game builds the scene and resets the session,
//! the per-frame systems are ordered by [`RunSet`].

use bevy::prelude::*;
use game_assets::{music_bundle, GameAssets};
use game_core::{AppState, DifficultyTable, GameConfigRes, GameRng, Playfield, RunSession, RunSet};
use game_config::SpawnRange;
use game_physics::{CollisionBridgeSet, GroundBody};
use game_storage::BestScoreStore;
use rand::distributions::uniform::SampleUniform;
use rand::Rng;
use texture_generator::GeneratedTextures;

pub mod confetti;
pub mod hud;
pub mod outcome;
pub mod player;
pub mod scrolling;
pub mod spawning;

pub use outcome::WinCountdown;
pub use scrolling::Scroll;

use crate::rendering::scenery;

pub struct GameplayPlugin;

impl Plugin for GameplayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Scroll>()
            .add_systems(OnEnter(AppState::Game), start_run)
            .add_systems(OnExit(AppState::Game), end_run)
            .add_systems(
                Update,
                (player::read_jump_input, player::handle_jump)
                    .chain()
                    .in_set(RunSet::Input)
                    .run_if(in_state(AppState::Game)),
            )
            .add_systems(
                Update,
                (
                    scrolling::tick_run_clock,
                    scrolling::scroll_parallax,
                    player::land_player,
                    spawning::update_difficulty,
                    spawning::spawn_obstacles,
                    spawning::spawn_delayed_obstacles,
                    spawning::spawn_items,
                    scrolling::move_obstacles,
                    scrolling::move_items,
                    player::animate_player,
                )
                    .chain()
                    .in_set(RunSet::Simulate)
                    .run_if(in_state(AppState::Game)),
            )
            .add_systems(
                Update,
                (
                    outcome::collect_items,
                    outcome::hit_obstacles,
                    outcome::start_celebration,
                    outcome::finish_loss,
                    outcome::tick_win_countdown,
                    hud::update_hud,
                )
                    .chain()
                    .in_set(RunSet::Respond)
                    .after(CollisionBridgeSet)
                    .run_if(in_state(AppState::Game)),
            );
    }
}

/// Uniform sample from an inclusive config range; a collapsed or inverted range yields `min`.
pub(crate) fn sample_range<T>(rng: &mut impl Rng, range: &SpawnRange<T>) -> T
where
    T: SampleUniform + PartialOrd + Copy,
{
    if range.min < range.max {
        rng.gen_range(range.min..=range.max)
    } else {
        range.min
    }
}

#[allow(clippy::too_many_arguments)]
fn start_run(
    mut commands: Commands,
    cfg: Res<GameConfigRes>,
    table: Res<DifficultyTable>,
    store: Res<BestScoreStore>,
    textures: Res<GeneratedTextures>,
    assets: Res<GameAssets>,
    playfield: Res<Playfield>,
    mut rng: ResMut<GameRng>,
    mut scroll: ResMut<Scroll>,
    sources: Option<Res<Assets<AudioSource>>>,
) {
    let cfg = &cfg.0;
    let pf = *playfield;
    let best = store.load();
    let session = RunSession::new(best, cfg.scoring.target, table.lookup(0));
    info!(
        target: "game",
        "=== RUN START === best={best} target={} speed={}",
        session.target, session.speed
    );
    *scroll = Scroll::default();

    scenery::spawn_sky(&mut commands, &textures, AppState::Game);
    scenery::spawn_parallax_hills(&mut commands, &textures, &pf, AppState::Game);
    scenery::spawn_clouds(&mut commands, &textures, &pf, &mut rng.0, AppState::Game, false);
    scenery::spawn_ground(&mut commands, &textures, &pf, &cfg.ground, AppState::Game);
    commands.spawn((GroundBody, StateScoped(AppState::Game)));

    player::spawn_player(&mut commands, &assets, &pf, &cfg.player);
    hud::spawn_hud(&mut commands, &assets.fonts.ui, &pf, &session);

    match music_bundle(sources.as_deref(), &cfg.audio, &assets.sounds.music) {
        Some(music) => {
            commands.spawn((music, StateScoped(AppState::Game)));
        }
        None => debug!(target: "game", "music unavailable; running silent"),
    }

    commands.insert_resource(session);
}

fn end_run(mut commands: Commands, session: Res<RunSession>) {
    commands.remove_resource::<WinCountdown>();
    info!(target: "game", "=== RUN END === score={}", session.score);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn sample_range_stays_inside_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = SpawnRange { min: 70u32, max: 120 };
        for _ in 0..200 {
            let v = sample_range(&mut rng, &range);
            assert!((70..=120).contains(&v));
        }
    }

    #[test]
    fn collapsed_range_returns_min() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(sample_range(&mut rng, &SpawnRange { min: 2u32, max: 2 }), 2);
        assert_eq!(sample_range(&mut rng, &SpawnRange { min: 1.5f32, max: 0.5 }), 1.5);
    }
}
