use bevy::prelude::*;
use game_config::{CelebrationConfig, SpawnRange};
use game_core::{AppState, Playfield};
use rand::Rng;
use texture_generator::{self as tex, GeneratedTextures};

use super::sample_range;
use crate::rendering::scenery::{at, Z_CONFETTI};
use crate::tween::{Ease, Tween};

/// One falling confetti strip, screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfettiPiece {
    pub texture: &'static str,
    pub start_x: f32,
    pub drift: f32,
    pub spin_degrees: f32,
    pub duration_ms: u32,
}

pub fn plan_confetti(rng: &mut impl Rng, cfg: &CelebrationConfig, width: f32) -> Vec<ConfettiPiece> {
    let keys = tex::CONFETTI_KEYS;
    let drift = SpawnRange {
        min: -cfg.confetti_drift,
        max: cfg.confetti_drift,
    };
    (0..cfg.confetti_count as usize)
        .map(|i| ConfettiPiece {
            texture: keys[i % keys.len()],
            start_x: rng.gen_range(0.0..=width),
            drift: sample_range(rng, &drift),
            spin_degrees: sample_range(rng, &cfg.confetti_spin_degrees),
            duration_ms: sample_range(rng, &cfg.confetti_duration_ms),
        })
        .collect()
}

/// Drops confetti from just above the top edge to just below the bottom one.
pub fn spawn_confetti(
    commands: &mut Commands,
    textures: &GeneratedTextures,
    pf: &Playfield,
    cfg: &CelebrationConfig,
    rng: &mut impl Rng,
) -> usize {
    let pieces = plan_confetti(rng, cfg, pf.width);
    for piece in &pieces {
        let from = at(pf, piece.start_x, -20.0, Z_CONFETTI);
        let to = at(pf, piece.start_x + piece.drift, pf.height + 30.0, Z_CONFETTI);
        commands.spawn((
            Sprite::from_image(textures.get(piece.texture)),
            Transform::from_translation(from),
            // Screen angles are clockwise; world z rotation is counter-clockwise.
            Tween::translation(from, to, piece.duration_ms as f32 / 1000.0)
                .with_rotation(0.0, -piece.spin_degrees.to_radians())
                .with_ease(Ease::CubicIn)
                .despawn_on_complete(),
            StateScoped(AppState::Game),
        ));
    }
    pieces.len()
}
