//! game_physics: Rapier2D integration for the runner.
//!
//! Responsibilities:
//! * Provide `PhysicsConfig` derived from the game config.
//! * Install Rapier with the configured pixel scale and gravity.
//! * Attach bodies/colliders to freshly spawned player, obstacles, items and ground.
//! * Bridge `CollisionEvent`s to `ItemCollected` / `ObstacleHit`.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use bevy_rapier2d::render::RapierDebugRenderPlugin;
use game_core::{AppState, GameConfigRes, RunSet};

mod config;
mod systems;

pub use config::PhysicsConfig;
pub use systems::{GroundBody, GroundContact};
use systems::*;

/// Turns Rapier collision events into gameplay events. Responders order after it.
#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone, Copy)]
pub struct CollisionBridgeSet;

pub struct GamePhysicsPlugin;
impl Plugin for GamePhysicsPlugin {
    fn build(&self, app: &mut App) {
        let config = match app.world().get_resource::<GameConfigRes>() {
            Some(cfg) => PhysicsConfig::from_game_config(&cfg.0),
            None => PhysicsConfig::default(),
        };
        let debug_render = config.debug_render;

        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(config.pixels_per_meter))
            .insert_resource(config);
        if debug_render {
            app.add_plugins(RapierDebugRenderPlugin::default());
        }

        app.add_systems(
            Update,
            (
                apply_config_gravity,
                attach_ground_body,
                attach_player_body,
                attach_obstacle_sensor,
                attach_item_sensor,
            ),
        )
        .add_systems(
            Update,
            bridge_collision_events
                .in_set(RunSet::Respond)
                .in_set(CollisionBridgeSet)
                .run_if(in_state(AppState::Game)),
        );
    }
}
