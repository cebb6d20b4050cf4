//! Minimal transform tweening: translation and z-rotation between two values,
//! with easing, optional yoyo/infinite repeat and despawn-on-complete.

use bevy::prelude::*;
use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ease {
    #[default]
    Linear,
    SineInOut,
    CubicIn,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::SineInOut => -0.5 * ((PI * t).cos() - 1.0),
            Ease::CubicIn => t * t * t,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenEnd {
    /// Stay at the final value.
    Hold,
    Despawn,
}

#[derive(Component, Clone, Debug)]
pub struct Tween {
    pub from: Vec3,
    pub to: Vec3,
    /// Z rotation in radians (from, to); untouched when `None`.
    pub rotation: Option<(f32, f32)>,
    /// Seconds for one leg.
    pub duration: f32,
    pub ease: Ease,
    /// Play forward then backward each cycle.
    pub yoyo: bool,
    pub forever: bool,
    pub end: TweenEnd,
    elapsed: f32,
}

impl Tween {
    pub fn translation(from: Vec3, to: Vec3, duration_secs: f32) -> Self {
        Self {
            from,
            to,
            rotation: None,
            duration: duration_secs.max(f32::EPSILON),
            ease: Ease::Linear,
            yoyo: false,
            forever: false,
            end: TweenEnd::Hold,
            elapsed: 0.0,
        }
    }

    pub fn with_rotation(mut self, from: f32, to: f32) -> Self {
        self.rotation = Some((from, to));
        self
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn yoyo_forever(mut self) -> Self {
        self.yoyo = true;
        self.forever = true;
        self
    }

    pub fn despawn_on_complete(mut self) -> Self {
        self.end = TweenEnd::Despawn;
        self
    }

    fn cycle_len(&self) -> f32 {
        if self.yoyo {
            self.duration * 2.0
        } else {
            self.duration
        }
    }

    pub fn is_finished(&self) -> bool {
        !self.forever && self.elapsed >= self.cycle_len()
    }

    /// Eased progress 0..=1 at the current elapsed time.
    pub fn progress(&self) -> f32 {
        let cycle = self.cycle_len();
        let local = if self.forever {
            self.elapsed.rem_euclid(cycle)
        } else {
            self.elapsed.min(cycle)
        };
        let raw = if self.yoyo && local > self.duration {
            2.0 - local / self.duration
        } else {
            local / self.duration
        };
        self.ease.apply(raw)
    }

    pub fn advance(&mut self, dt_secs: f32) {
        self.elapsed += dt_secs;
    }

    pub fn sample(&self, transform: &mut Transform) {
        let p = self.progress();
        transform.translation = self.from.lerp(self.to, p);
        if let Some((a, b)) = self.rotation {
            transform.rotation = Quat::from_rotation_z(a + (b - a) * p);
        }
    }
}

pub struct TweenPlugin;

impl Plugin for TweenPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, advance_tweens);
    }
}

pub fn advance_tweens(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut Tween, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (entity, mut tween, mut transform) in &mut q {
        tween.advance(dt);
        tween.sample(&mut transform);
        if tween.is_finished() {
            match tween.end {
                TweenEnd::Despawn => commands.entity(entity).despawn(),
                TweenEnd::Hold => {
                    commands.entity(entity).remove::<Tween>();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    #[test]
    fn easing_endpoints() {
        for e in [Ease::Linear, Ease::SineInOut, Ease::CubicIn] {
            assert!(e.apply(0.0).abs() < 1e-6);
            assert!((e.apply(1.0) - 1.0).abs() < 1e-6);
        }
        assert!(Ease::CubicIn.apply(0.5) < 0.5);
        assert!((Ease::SineInOut.apply(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn yoyo_returns_to_start() {
        let mut t = Tween::translation(Vec3::ZERO, Vec3::X * 100.0, 8.0).yoyo_forever();
        t.advance(8.0);
        assert!((t.progress() - 1.0).abs() < 1e-5);
        t.advance(8.0);
        assert!(t.progress().abs() < 1e-5);
        t.advance(4.0);
        assert!((t.progress() - 0.5).abs() < 1e-5);
        assert!(!t.is_finished());
    }

    #[test]
    fn one_shot_finishes_and_clamps() {
        let mut t = Tween::translation(Vec3::ZERO, Vec3::Y * -10.0, 1.0).with_rotation(0.0, PI);
        t.advance(2.0);
        assert!(t.is_finished());
        let mut tf = Transform::default();
        t.sample(&mut tf);
        assert_eq!(tf.translation, Vec3::Y * -10.0);
    }

    #[test]
    fn despawning_tween_removes_entity() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(20)))
            .add_plugins(TweenPlugin);
        let e = app
            .world_mut()
            .spawn((
                Transform::default(),
                Tween::translation(Vec3::ZERO, Vec3::ONE, 0.01).despawn_on_complete(),
            ))
            .id();
        for _ in 0..3 {
            app.update();
        }
        assert!(app.world().get_entity(e).is_err());
    }
}
