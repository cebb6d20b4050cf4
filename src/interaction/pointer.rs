//! Unified "pointer down" from mouse or touch, resolved to world coordinates.

use bevy::input::InputSystem;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// One press of the primary mouse button or a new touch this frame.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PointerPressed {
    /// World position, when a camera could resolve it.
    pub world: Option<Vec2>,
}

pub struct PointerPlugin;

impl Plugin for PointerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PointerPressed>()
            .add_systems(PreUpdate, emit_pointer_presses.after(InputSystem));
    }
}

/// Convert a window position (logical pixels, top-left origin) to world coordinates.
fn cursor_world_pos(camera_q: &Query<(&Camera, &GlobalTransform)>, screen_pos: Vec2) -> Option<Vec2> {
    let (camera, cam_tf) = camera_q.iter().next()?;
    camera.viewport_to_world_2d(cam_tf, screen_pos).ok()
}

fn emit_pointer_presses(
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    touches: Option<Res<Touches>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    mut out: EventWriter<PointerPressed>,
) {
    if let Some(touches) = touches {
        for touch in touches.iter_just_pressed() {
            out.write(PointerPressed {
                world: cursor_world_pos(&camera_q, touch.position()),
            });
        }
    }
    if buttons.is_some_and(|b| b.just_pressed(MouseButton::Left)) {
        let world = windows
            .single()
            .ok()
            .and_then(|w| w.cursor_position())
            .and_then(|p| cursor_world_pos(&camera_q, p));
        out.write(PointerPressed { world });
    }
}

/// Axis-aligned hit test against a sprite-sized rectangle centred on `center`.
pub fn hits(point: Vec2, center: Vec2, half_size: Vec2) -> bool {
    let d = (point - center).abs();
    d.x <= half_size.x && d.y <= half_size.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_is_inclusive() {
        let c = Vec2::new(0.0, -360.0);
        let half = Vec2::new(190.0, 65.0);
        assert!(hits(Vec2::new(190.0, -360.0), c, half));
        assert!(hits(Vec2::new(-10.0, -300.0), c, half));
        assert!(!hits(Vec2::new(0.0, -200.0), c, half));
    }

    #[test]
    fn mouse_press_emits_event_without_camera() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<ButtonInput<MouseButton>>()
            .add_event::<PointerPressed>()
            .add_systems(Update, emit_pointer_presses);
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        app.update();
        let events = app.world().resource::<Events<PointerPressed>>();
        let got: Vec<_> = events.iter_current_update_events().copied().collect();
        assert_eq!(got, vec![PointerPressed { world: None }]);
    }
}
