use bevy::prelude::*;
use bevy::render::camera::ScalingMode;
use game_core::Playfield;

/// Marker for the single 2D camera.
#[derive(Component, Debug, Default)]
pub struct GameCamera;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera);
    }
}

/// Orthographic camera that always shows the whole playfield, letterboxed by the clear colour.
fn setup_camera(mut commands: Commands, playfield: Res<Playfield>) {
    commands.spawn((
        Camera2d,
        GameCamera,
        Projection::from(OrthographicProjection {
            scaling_mode: ScalingMode::AutoMin {
                min_width: playfield.width,
                min_height: playfield.height,
            },
            ..OrthographicProjection::default_2d()
        }),
    ));
}
