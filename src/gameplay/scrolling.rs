//! Per-frame world motion: parallax strips, obstacles and items drift left at
//! a speed-proportional rate. Movement is applied per frame, not per second.

use bevy::prelude::*;
use game_core::{parallax_left_edge, GameConfigRes, Item, Obstacle, ParallaxLayer, Playfield, RunSession};

/// Accumulated ground scroll for the current run, in pixels.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct Scroll {
    pub distance: f32,
}

pub fn tick_run_clock(time: Res<Time>, mut session: ResMut<RunSession>) {
    session.elapsed_ms += time.delta_secs() * 1000.0;
}

pub fn scroll_parallax(
    session: Res<RunSession>,
    playfield: Res<Playfield>,
    mut scroll: ResMut<Scroll>,
    mut layers: Query<(&ParallaxLayer, &mut Transform)>,
) {
    scroll.distance += session.speed;
    let left = -playfield.width * 0.5;
    for (layer, mut transform) in &mut layers {
        let edge = parallax_left_edge(scroll.distance * layer.factor, layer.tile_width, layer.slot);
        transform.translation.x = left + edge;
    }
}

/// World-space x below which an entity authored at screen x `despawn_x` is gone.
fn despawn_line(pf: &Playfield, despawn_x: f32) -> f32 {
    pf.to_world(Vec2::new(despawn_x, 0.0)).x
}

pub fn move_obstacles(
    mut commands: Commands,
    session: Res<RunSession>,
    cfg: Res<GameConfigRes>,
    playfield: Res<Playfield>,
    mut obstacles: Query<(Entity, &mut Transform), With<Obstacle>>,
) {
    let dx = session.speed * cfg.0.spawn.scroll_factor;
    let limit = despawn_line(&playfield, cfg.0.spawn.obstacle_despawn_x);
    for (entity, mut transform) in &mut obstacles {
        transform.translation.x -= dx;
        if transform.translation.x < limit {
            commands.entity(entity).despawn();
        }
    }
}

/// Items also bob: screen-space `y += sin(t * rate + phase) * amplitude` every frame.
pub fn move_items(
    mut commands: Commands,
    session: Res<RunSession>,
    cfg: Res<GameConfigRes>,
    playfield: Res<Playfield>,
    mut items: Query<(Entity, &Item, &mut Transform)>,
) {
    let spawn = &cfg.0.spawn;
    let dx = session.speed * spawn.scroll_factor;
    let limit = despawn_line(&playfield, spawn.item_despawn_x);
    for (entity, item, mut transform) in &mut items {
        transform.translation.x -= dx;
        if transform.translation.x < limit {
            commands.entity(entity).despawn();
            continue;
        }
        let bob = (session.elapsed_ms * spawn.item_bob_rate + item.phase).sin() * spawn.item_bob_amplitude;
        transform.translation.y -= bob;
    }
}
