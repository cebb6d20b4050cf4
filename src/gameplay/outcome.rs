//! Overlap responses and the two ways a run ends.
//!
//! Collecting the target item fires [`GameWon`]: the music stops, confetti
//! falls, and Result follows after a short countdown. Touching an obstacle fires
//! [`GameLost`] and switches to Result in the same frame. `RunSession::finished`
//! keeps either sequence from running twice.

use bevy::prelude::*;
use game_assets::{sfx_bundle, GameAssets, MusicTrack};
use game_core::{
    AppState, CollectOutcome, GameConfigRes, GameLost, GameRng, GameWon, Item, ItemCollected, ObstacleHit,
    Playfield, RunOutcome, RunSession,
};
use texture_generator::GeneratedTextures;

use super::confetti::spawn_confetti;

/// Delay between the winning pickup and the Result screen.
#[derive(Resource, Debug)]
pub struct WinCountdown(pub Timer);

#[allow(clippy::too_many_arguments)]
pub fn collect_items(
    mut commands: Commands,
    mut collected: EventReader<ItemCollected>,
    mut session: ResMut<RunSession>,
    cfg: Res<GameConfigRes>,
    assets: Res<GameAssets>,
    sources: Option<Res<Assets<AudioSource>>>,
    items: Query<(), With<Item>>,
    mut won: EventWriter<GameWon>,
) {
    let mut taken: Vec<Entity> = Vec::new();
    for ev in collected.read() {
        if taken.contains(&ev.item) || items.get(ev.item).is_err() {
            continue;
        }
        taken.push(ev.item);
        commands.entity(ev.item).despawn();

        let outcome = session.collect();
        if outcome == CollectOutcome::Ignored {
            continue;
        }
        let audio = &cfg.0.audio;
        if let Some(sfx) = sfx_bundle(sources.as_deref(), audio, &assets.sounds.item, audio.item_volume) {
            commands.spawn(sfx);
        }
        if let CollectOutcome::Won(score) = outcome {
            info!(target: "game", "target reached: {score}");
            won.write(GameWon { score });
        }
    }
}

pub fn hit_obstacles(
    mut hits: EventReader<ObstacleHit>,
    mut session: ResMut<RunSession>,
    mut lost: EventWriter<GameLost>,
) {
    if hits.read().count() == 0 {
        return;
    }
    if session.fail() {
        info!(target: "game", "obstacle hit at score {}", session.score);
        lost.write(GameLost { score: session.score });
    }
}

fn stop_music(commands: &mut Commands, music: &Query<Entity, With<MusicTrack>>) {
    for entity in music {
        commands.entity(entity).despawn();
    }
}

#[allow(clippy::too_many_arguments)]
pub fn start_celebration(
    mut commands: Commands,
    mut won: EventReader<GameWon>,
    cfg: Res<GameConfigRes>,
    textures: Res<GeneratedTextures>,
    assets: Res<GameAssets>,
    playfield: Res<Playfield>,
    sources: Option<Res<Assets<AudioSource>>>,
    mut rng: ResMut<GameRng>,
    music: Query<Entity, With<MusicTrack>>,
) {
    if won.read().count() == 0 {
        return;
    }
    let cfg = &cfg.0;
    stop_music(&mut commands, &music);
    let pieces = spawn_confetti(&mut commands, &textures, &playfield, &cfg.celebration, &mut rng.0);
    debug!(target: "game", "spawned {pieces} confetti");
    if let Some(sfx) = sfx_bundle(sources.as_deref(), &cfg.audio, &assets.sounds.win, cfg.audio.win_volume) {
        commands.spawn(sfx);
    }
    commands.insert_resource(WinCountdown(Timer::from_seconds(
        cfg.celebration.result_delay_ms / 1000.0,
        TimerMode::Once,
    )));
}

pub fn finish_loss(
    mut commands: Commands,
    mut lost: EventReader<GameLost>,
    session: Res<RunSession>,
    mut outcome: ResMut<RunOutcome>,
    mut next_state: ResMut<NextState<AppState>>,
    music: Query<Entity, With<MusicTrack>>,
) {
    if lost.read().count() == 0 {
        return;
    }
    stop_music(&mut commands, &music);
    *outcome = session.outcome(false);
    next_state.set(AppState::Result);
}

pub fn tick_win_countdown(
    mut commands: Commands,
    time: Res<Time>,
    countdown: Option<ResMut<WinCountdown>>,
    session: Res<RunSession>,
    mut outcome: ResMut<RunOutcome>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(mut countdown) = countdown else {
        return;
    };
    if countdown.0.tick(time.delta()).just_finished() {
        commands.remove_resource::<WinCountdown>();
        *outcome = session.outcome(true);
        next_state.set(AppState::Result);
    }
}
