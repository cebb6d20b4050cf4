use bevy::prelude::*;
use game_config::GameConfig;

/// Physics tuning. Hitboxes are in unscaled sprite pixels; the entity's
/// transform scale is applied on top by Rapier.
#[derive(Resource, Debug, Clone)]
pub struct PhysicsConfig {
    pub pixels_per_meter: f32,
    /// Downward acceleration in px/s².
    pub gravity: f32,
    pub player_half_extents: Vec2,
    pub obstacle_half_extents: Vec2,
    /// Obstacle hitbox centre relative to the sprite's bottom-centre anchor.
    pub obstacle_offset: Vec2,
    pub item_radius: f32,
    pub ground_thickness: f32,
    pub debug_render: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self::from_game_config(&GameConfig::default())
    }
}

impl PhysicsConfig {
    pub fn from_game_config(cfg: &GameConfig) -> Self {
        Self {
            pixels_per_meter: cfg.pixels_per_meter,
            gravity: cfg.player.gravity,
            player_half_extents: Vec2::new(18.0, 28.0),
            // obstacle_block is 64x84 with the 60x80 block drawn at the top-left.
            obstacle_half_extents: Vec2::new(30.0, 40.0),
            obstacle_offset: Vec2::new(-2.0, 44.0),
            item_radius: 16.0,
            ground_thickness: 40.0,
            debug_render: cfg.rapier_debug || cfg!(feature = "debug"),
        }
    }
}
