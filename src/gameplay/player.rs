//! Player spawn, jump handling, landing and the two sprite clips.

use bevy::prelude::*;
use bevy::sprite::Anchor;
use bevy_rapier2d::prelude::Velocity;
use game_assets::{sfx_bundle, ArtAssets, GameAssets};
use game_config::PlayerConfig;
use game_core::motion::{can_jump, has_landed};
use game_core::{AppState, GameConfigRes, JumpRequested, Player, PlayerAnim, Playfield, RunSession};
use game_physics::GroundContact;

use crate::interaction::PointerPressed;
use crate::rendering::scenery::{at, Z_PLAYER};

/// Frame cursor for the active clip.
#[derive(Component, Debug, Clone)]
pub struct PlayerAnimator {
    pub clip: PlayerAnim,
    pub frame: usize,
    timer: Timer,
    run_fps: f32,
    jump_fps: f32,
}

impl PlayerAnimator {
    pub fn new(cfg: &PlayerConfig) -> Self {
        Self {
            clip: PlayerAnim::Running,
            frame: 0,
            timer: Timer::from_seconds(frame_secs(cfg.run_fps), TimerMode::Repeating),
            run_fps: cfg.run_fps,
            jump_fps: cfg.jump_fps,
        }
    }

    /// Restart on `clip` from its first frame.
    pub fn play(&mut self, clip: PlayerAnim) {
        let fps = match clip {
            PlayerAnim::Running => self.run_fps,
            PlayerAnim::Jumping => self.jump_fps,
        };
        self.clip = clip;
        self.frame = 0;
        self.timer = Timer::from_seconds(frame_secs(fps), TimerMode::Repeating);
    }

    /// Advances by `dt`. Running loops over `frames`; Jumping holds its last frame.
    pub fn advance(&mut self, dt: std::time::Duration, frames: usize) {
        self.timer.tick(dt);
        let steps = self.timer.times_finished_this_tick() as usize;
        if steps == 0 || frames == 0 {
            return;
        }
        self.frame = match self.clip {
            PlayerAnim::Running => (self.frame + steps) % frames,
            PlayerAnim::Jumping => (self.frame + steps).min(frames - 1),
        };
    }
}

fn frame_secs(fps: f32) -> f32 {
    if fps > 0.0 {
        1.0 / fps
    } else {
        1.0
    }
}

pub fn spawn_player(commands: &mut Commands, assets: &GameAssets, pf: &Playfield, cfg: &PlayerConfig) {
    let pos = at(pf, cfg.x, pf.ground_y, Z_PLAYER);
    commands.spawn((
        Player::default(),
        PlayerAnimator::new(cfg),
        Sprite {
            image: ArtAssets::frame(&assets.art.player_run, 0),
            anchor: Anchor::BottomCenter,
            ..default()
        },
        Transform::from_translation(pos).with_scale(Vec3::new(cfg.scale, cfg.scale, 1.0)),
        Velocity::zero(),
        StateScoped(AppState::Game),
    ));
}

/// Space, ArrowUp or any pointer press asks for a jump.
pub fn read_jump_input(
    state: Res<State<AppState>>,
    keys: Res<ButtonInput<KeyCode>>,
    mut pointer: EventReader<PointerPressed>,
    mut out: EventWriter<JumpRequested>,
) {
    // The press that started the run is still buffered on the first frame.
    if state.is_changed() {
        pointer.clear();
        return;
    }
    let pressed = pointer.read().count() > 0;
    if pressed || keys.any_just_pressed([KeyCode::Space, KeyCode::ArrowUp]) {
        out.write(JumpRequested);
    }
}

/// Applies at most one jump per frame, and only from the ground.
/// `session.on_ground` stays false from take-off until `land_player` sees the touchdown.
#[allow(clippy::too_many_arguments)]
pub fn handle_jump(
    mut commands: Commands,
    mut requests: EventReader<JumpRequested>,
    mut session: ResMut<RunSession>,
    cfg: Res<GameConfigRes>,
    playfield: Res<Playfield>,
    assets: Res<GameAssets>,
    sources: Option<Res<Assets<AudioSource>>>,
    mut players: Query<(&mut Player, &mut PlayerAnimator, &Transform, &mut Velocity, Option<&mut GroundContact>)>,
) {
    if requests.read().count() == 0 {
        return;
    }
    let p = &cfg.0.player;
    let ground = playfield.ground_world_y();
    for (mut player, mut animator, transform, mut velocity, contact) in &mut players {
        let touching = contact.as_ref().is_some_and(|c| c.0);
        if !session.on_ground || !can_jump(touching, transform.translation.y, ground, p.ground_tolerance) {
            debug!(target: "game", "jump ignored: airborne at y={:.1}", transform.translation.y);
            continue;
        }
        velocity.linvel.y = p.jump_velocity;
        player.anim = PlayerAnim::Jumping;
        animator.play(PlayerAnim::Jumping);
        session.on_ground = false;
        if let Some(mut contact) = contact {
            contact.0 = false;
        }
        if let Some(sfx) = sfx_bundle(sources.as_deref(), &cfg.0.audio, &assets.sounds.jump, cfg.0.audio.jump_volume) {
            commands.spawn(sfx);
        }
    }
}

/// Snap to the ground line once falling back onto it; resume running on touchdown.
pub fn land_player(
    mut session: ResMut<RunSession>,
    cfg: Res<GameConfigRes>,
    playfield: Res<Playfield>,
    mut players: Query<(&mut Player, &mut PlayerAnimator, &mut Transform, &mut Velocity)>,
) {
    let ground = playfield.ground_world_y();
    let tolerance = cfg.0.player.ground_tolerance;
    for (mut player, mut animator, mut transform, mut velocity) in &mut players {
        if !has_landed(velocity.linvel.y, transform.translation.y, ground, tolerance) {
            continue;
        }
        transform.translation.y = ground;
        velocity.linvel.y = 0.0;
        if !session.on_ground {
            session.on_ground = true;
            player.anim = PlayerAnim::Running;
            animator.play(PlayerAnim::Running);
        }
    }
}

pub fn animate_player(
    time: Res<Time>,
    assets: Res<GameAssets>,
    mut players: Query<(&mut PlayerAnimator, &mut Sprite), With<Player>>,
) {
    for (mut animator, mut sprite) in &mut players {
        let clip = match animator.clip {
            PlayerAnim::Running => &assets.art.player_run,
            PlayerAnim::Jumping => &assets.art.player_jump,
        };
        animator.advance(time.delta(), clip.len());
        let frame = ArtAssets::frame(clip, animator.frame);
        if sprite.image != frame {
            sprite.image = frame;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn animator() -> PlayerAnimator {
        PlayerAnimator::new(&PlayerConfig::default())
    }

    #[test]
    fn run_clip_loops_at_ten_fps() {
        let mut a = animator();
        a.advance(Duration::from_millis(110), 3);
        assert_eq!(a.frame, 1);
        a.advance(Duration::from_millis(200), 3);
        assert_eq!(a.frame, 0);
    }

    #[test]
    fn jump_clip_holds_last_frame() {
        let mut a = animator();
        a.play(PlayerAnim::Jumping);
        a.advance(Duration::from_millis(100), 2);
        assert_eq!(a.frame, 0);
        a.advance(Duration::from_millis(100), 2);
        assert_eq!(a.frame, 1);
        a.advance(Duration::from_millis(1000), 2);
        assert_eq!(a.frame, 1);
    }

    #[test]
    fn play_resets_frame() {
        let mut a = animator();
        a.advance(Duration::from_millis(250), 3);
        assert_ne!(a.frame, 0);
        a.play(PlayerAnim::Running);
        assert_eq!(a.frame, 0);
    }

    #[test]
    fn empty_clip_is_tolerated() {
        let mut a = animator();
        a.advance(Duration::from_millis(500), 0);
        assert_eq!(a.frame, 0);
    }
}
