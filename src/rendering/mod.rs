//! Camera, shared scenery builders and outlined text.

use bevy::prelude::*;

pub mod camera;
pub mod label;
pub mod scenery;

pub use camera::{CameraPlugin, GameCamera};
pub use label::{outlined_label, LabelStyle};

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(CameraPlugin)
            .add_systems(PostUpdate, label::sync_label_outlines);
    }
}
