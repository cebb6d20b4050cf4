//! Difficulty tracking and the two spawners. Obstacles and items enter just
//! past the right edge; physics colliders are attached by `game_physics`.

use std::f32::consts::TAU;

use bevy::prelude::*;
use bevy::sprite::Anchor;
use game_assets::GameAssets;
use game_config::{GameConfig, SpawnConfig};
use game_core::{AppState, DifficultyTable, GameConfigRes, GameRng, Item, ItemKind, Obstacle, Playfield, RunSession};
use rand::Rng;
use texture_generator::{self as tex, GeneratedTextures};

use super::sample_range;
use crate::rendering::scenery::{at, Z_ITEM, Z_OBSTACLE};

/// Extra obstacle queued behind a regular one.
#[derive(Component, Debug)]
pub struct DelayedObstacle(pub Timer);

/// One item of a freshly rolled row, in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemSlot {
    pub kind: ItemKind,
    pub x: f32,
    pub y: f32,
    pub phase: f32,
}

/// Rolls a row: one random kind, 2..=3 items sharing a height above the ground line.
pub fn roll_item_row(rng: &mut impl Rng, spawn: &SpawnConfig, width: f32, ground_y: f32) -> Vec<ItemSlot> {
    let kind = ItemKind::ALL[rng.gen_range(0..ItemKind::ALL.len())];
    let count = sample_range(rng, &spawn.item_count);
    let y = ground_y - sample_range(rng, &spawn.item_height) as f32;
    let start_x = width + spawn.item_spawn_margin;
    (0..count)
        .map(|i| ItemSlot {
            kind,
            x: start_x + i as f32 * spawn.item_spacing,
            y,
            phase: rng.gen_range(0.0..TAU),
        })
        .collect()
}

/// Whether a regular obstacle spawn also queues a follow-up one.
pub fn rolls_double(rng: &mut impl Rng, cfg: &GameConfig, score: u32) -> bool {
    score >= cfg.difficulty.double_spawn_min_score && rng.gen::<f64>() < cfg.difficulty.double_spawn_chance
}

pub fn spawn_obstacle(
    commands: &mut Commands,
    textures: &GeneratedTextures,
    pf: &Playfield,
    spawn: &SpawnConfig,
    rng: &mut impl Rng,
) {
    let scale = sample_range(rng, &spawn.obstacle_scale);
    let pos = at(pf, pf.width + spawn.obstacle_spawn_margin, pf.ground_y, Z_OBSTACLE);
    commands.spawn((
        Obstacle,
        Sprite {
            image: textures.get(tex::OBSTACLE_BLOCK),
            anchor: Anchor::BottomCenter,
            ..default()
        },
        Transform::from_translation(pos).with_scale(Vec3::new(scale, scale, 1.0)),
        StateScoped(AppState::Game),
    ));
}

pub fn update_difficulty(
    mut session: ResMut<RunSession>,
    table: Res<DifficultyTable>,
    mut tier: Local<Option<usize>>,
) {
    let index = table.tier_index(session.score);
    let d = table.lookup(session.score);
    if session.speed != d.speed
        || session.spawn_interval_ms != d.obstacle_interval_ms
        || session.item_interval_ms != d.item_interval_ms
    {
        session.apply_difficulty(d);
    }
    if *tier != Some(index) {
        if tier.is_some() {
            info!(
                target: "game",
                "difficulty tier {index}: speed={} obstacle={}ms item={}ms",
                d.speed, d.obstacle_interval_ms, d.item_interval_ms
            );
        }
        *tier = Some(index);
    }
}

#[allow(clippy::too_many_arguments)]
pub fn spawn_obstacles(
    mut commands: Commands,
    time: Res<Time>,
    mut session: ResMut<RunSession>,
    cfg: Res<GameConfigRes>,
    textures: Res<GeneratedTextures>,
    playfield: Res<Playfield>,
    mut rng: ResMut<GameRng>,
) {
    if !session.tick_obstacle_timer(time.delta_secs() * 1000.0) {
        return;
    }
    let cfg = &cfg.0;
    spawn_obstacle(&mut commands, &textures, &playfield, &cfg.spawn, &mut rng.0);
    if rolls_double(&mut rng.0, cfg, session.score) {
        debug!(target: "game", "double obstacle queued");
        commands.spawn((
            DelayedObstacle(Timer::from_seconds(
                cfg.difficulty.double_spawn_delay_ms / 1000.0,
                TimerMode::Once,
            )),
            StateScoped(AppState::Game),
        ));
    }
}

pub fn spawn_delayed_obstacles(
    mut commands: Commands,
    time: Res<Time>,
    cfg: Res<GameConfigRes>,
    textures: Res<GeneratedTextures>,
    playfield: Res<Playfield>,
    mut rng: ResMut<GameRng>,
    mut pending: Query<(Entity, &mut DelayedObstacle)>,
) {
    for (entity, mut delayed) in &mut pending {
        if delayed.0.tick(time.delta()).just_finished() {
            spawn_obstacle(&mut commands, &textures, &playfield, &cfg.0.spawn, &mut rng.0);
            commands.entity(entity).despawn();
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub fn spawn_items(
    mut commands: Commands,
    time: Res<Time>,
    mut session: ResMut<RunSession>,
    cfg: Res<GameConfigRes>,
    assets: Res<GameAssets>,
    playfield: Res<Playfield>,
    mut rng: ResMut<GameRng>,
) {
    if !session.tick_item_timer(time.delta_secs() * 1000.0) {
        return;
    }
    let spawn = &cfg.0.spawn;
    let pf = *playfield;
    for slot in roll_item_row(&mut rng.0, spawn, pf.width, pf.ground_y) {
        commands.spawn((
            Item::new(slot.kind, slot.phase),
            Sprite::from_image(assets.art.item(slot.kind)),
            Transform::from_translation(at(&pf, slot.x, slot.y, Z_ITEM))
                .with_scale(Vec3::new(spawn.item_scale, spawn.item_scale, 1.0)),
            StateScoped(AppState::Game),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn item_rows_share_kind_and_height() {
        let mut rng = StdRng::seed_from_u64(3);
        let spawn = SpawnConfig::default();
        for _ in 0..100 {
            let row = roll_item_row(&mut rng, &spawn, 540.0, 820.0);
            assert!((2..=3).contains(&row.len()));
            let first = row[0];
            assert_eq!(first.x, 580.0);
            assert!((700.0..=750.0).contains(&first.y));
            for (i, slot) in row.iter().enumerate() {
                assert_eq!(slot.kind, first.kind);
                assert_eq!(slot.y, first.y);
                assert_eq!(slot.x, 580.0 + i as f32 * 48.0);
                assert!((0.0..TAU).contains(&slot.phase));
            }
        }
    }

    #[test]
    fn every_kind_shows_up() {
        let mut rng = StdRng::seed_from_u64(11);
        let spawn = SpawnConfig::default();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..60 {
            seen.insert(roll_item_row(&mut rng, &spawn, 540.0, 820.0)[0].kind);
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn double_obstacle_needs_score() {
        let mut rng = StdRng::seed_from_u64(5);
        let cfg = GameConfig::default();
        assert!((0..500).all(|_| !rolls_double(&mut rng, &cfg, 34)));
        let hits = (0..2000).filter(|_| rolls_double(&mut rng, &cfg, 35)).count();
        // 35% of 2000, loosely.
        assert!((550..850).contains(&hits), "hits {hits}");
    }

    #[test]
    fn difficulty_follows_score() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<DifficultyTable>()
            .init_resource::<RunSession>()
            .add_systems(Update, update_difficulty);
        app.world_mut().resource_mut::<RunSession>().score = 40;
        app.update();
        let s = app.world().resource::<RunSession>();
        assert_eq!((s.speed, s.spawn_interval_ms, s.item_interval_ms), (6.0, 1050.0, 750.0));
    }
}
