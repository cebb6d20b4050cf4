//! Shared backdrop builders (sky, hills, clouds, ground strip) used by the
//! menu, the run, and the result screen. Everything is state scoped.

use bevy::prelude::*;
use bevy::sprite::Anchor;
use game_config::GroundConfig;
use game_core::{AppState, ParallaxLayer, Playfield};
use rand::Rng;
use texture_generator::{self as tex, GeneratedTextures};

use crate::tween::{Ease, Tween};

pub const Z_SKY: f32 = 0.0;
pub const Z_HILL_FAR: f32 = 1.0;
pub const Z_HILL_NEAR: f32 = 2.0;
pub const Z_CLOUD: f32 = 3.0;
pub const Z_GROUND: f32 = 4.0;
pub const Z_OBSTACLE: f32 = 5.0;
pub const Z_ITEM: f32 = 5.5;
pub const Z_PLAYER: f32 = 6.0;
pub const Z_CONFETTI: f32 = 8.0;
pub const Z_UI: f32 = 10.0;

pub const HILL_FAR_ALPHA: f32 = 0.7;
pub const HILL_NEAR_ALPHA: f32 = 0.8;
pub const CLOUD_ALPHA: f32 = 0.8;
pub const CLOUD_COUNT: usize = 6;
pub const HILL_FAR_FACTOR: f32 = 0.2;
pub const HILL_NEAR_FACTOR: f32 = 0.35;

/// Marks the clouds that drift on the menu.
#[derive(Component, Debug, Default)]
pub struct Cloud;

/// Parent of the ground tiles; carries the sway tween.
#[derive(Component, Debug, Default)]
pub struct GroundStrip;

pub fn tinted(image: Handle<Image>, alpha: f32) -> Sprite {
    Sprite {
        image,
        color: Color::srgba(1.0, 1.0, 1.0, alpha),
        ..default()
    }
}

pub fn anchored(image: Handle<Image>, anchor: Anchor) -> Sprite {
    Sprite {
        image,
        anchor,
        ..default()
    }
}

/// World position of a screen-space point at depth `z`.
pub fn at(pf: &Playfield, x: f32, y: f32, z: f32) -> Vec3 {
    pf.to_world(Vec2::new(x, y)).extend(z)
}

pub fn spawn_sky(commands: &mut Commands, textures: &GeneratedTextures, state: AppState) {
    commands.spawn((
        Sprite::from_image(textures.get(tex::BG_GRADIENT)),
        Transform::from_xyz(0.0, 0.0, Z_SKY),
        StateScoped(state),
    ));
}

/// Non-scrolling hill silhouettes (menu, result).
pub fn spawn_static_hills(commands: &mut Commands, textures: &GeneratedTextures, state: AppState) {
    for (key, alpha, z) in [
        (tex::HILL_FAR, HILL_FAR_ALPHA, Z_HILL_FAR),
        (tex::HILL_NEAR, HILL_NEAR_ALPHA, Z_HILL_NEAR),
    ] {
        commands.spawn((
            tinted(textures.get(key), alpha),
            Transform::from_xyz(0.0, 0.0, z),
            StateScoped(state),
        ));
    }
}

/// Two side-by-side copies per hill layer so horizontal wrapping is seamless.
pub fn spawn_parallax_hills(
    commands: &mut Commands,
    textures: &GeneratedTextures,
    pf: &Playfield,
    state: AppState,
) {
    for (key, alpha, z, factor) in [
        (tex::HILL_FAR, HILL_FAR_ALPHA, Z_HILL_FAR, HILL_FAR_FACTOR),
        (tex::HILL_NEAR, HILL_NEAR_ALPHA, Z_HILL_NEAR, HILL_NEAR_FACTOR),
    ] {
        for slot in 0..2u8 {
            commands.spawn((
                Sprite {
                    anchor: Anchor::TopLeft,
                    ..tinted(textures.get(key), alpha)
                },
                Transform::from_translation(at(pf, slot as f32 * pf.width, 0.0, z)),
                ParallaxLayer {
                    factor,
                    tile_width: pf.width,
                    slot,
                },
                StateScoped(state),
            ));
        }
    }
}

/// Six clouds at random spots near the top. With `drift`, each one sways
/// 100 px to the right and back over 8 s.
pub fn spawn_clouds(
    commands: &mut Commands,
    textures: &GeneratedTextures,
    pf: &Playfield,
    rng: &mut impl Rng,
    state: AppState,
    drift: bool,
) {
    for _ in 0..CLOUD_COUNT {
        let x = rng.gen_range(0..=pf.width as i32) as f32;
        let y = rng.gen_range(50..=180) as f32;
        let pos = at(pf, x, y, Z_CLOUD);
        let mut cloud = commands.spawn((
            Cloud,
            tinted(textures.get(tex::CLOUD), CLOUD_ALPHA),
            Transform::from_translation(pos),
            StateScoped(state),
        ));
        if drift {
            cloud.insert(
                Tween::translation(pos, pos + Vec3::X * 100.0, 8.0)
                    .with_ease(Ease::SineInOut)
                    .yoyo_forever(),
            );
        }
    }
}

/// Ground band at the bottom of the playfield: repeating grass tiles over a
/// solid dirt fill, gently swaying up and down.
pub fn spawn_ground(
    commands: &mut Commands,
    textures: &GeneratedTextures,
    pf: &Playfield,
    ground: &GroundConfig,
    state: AppState,
) {
    let tile_w = tex::GROUND_TILE_WIDTH as f32;
    let tile_h = tex::GROUND_TILE_HEIGHT as f32;
    let top = pf.height - ground.height;
    let copies = (pf.width / tile_w).ceil() as u8 + 1;
    let dirt = texture_color(tex::palette::GROUND);
    let origin = Vec3::new(0.0, 0.0, Z_GROUND);
    let sway = Vec3::new(0.0, -ground.sway, 0.0);

    commands
        .spawn((
            GroundStrip,
            Transform::from_translation(origin),
            Visibility::default(),
            Tween::translation(origin, origin + sway, ground.sway_ms / 1000.0)
                .with_ease(Ease::SineInOut)
                .yoyo_forever(),
            StateScoped(state),
        ))
        .with_children(|strip| {
            // Dirt below the tile's rounded bottom; overshoots the screen edge to hide the sway.
            strip.spawn((
                Sprite {
                    color: dirt,
                    custom_size: Some(Vec2::new(pf.width, ground.height)),
                    anchor: Anchor::TopLeft,
                    ..default()
                },
                Transform::from_translation(at(pf, 0.0, top + tile_h - 10.0, -0.1)),
            ));
            for slot in 0..copies {
                strip.spawn((
                    anchored(textures.get(tex::GROUND_TILE), Anchor::TopLeft),
                    Transform::from_translation(at(pf, slot as f32 * tile_w, top, 0.0)),
                    ParallaxLayer {
                        factor: 1.0,
                        tile_width: tile_w,
                        slot,
                    },
                ));
            }
        });
}

pub fn texture_color(hex: u32) -> Color {
    Color::srgb_u8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}
