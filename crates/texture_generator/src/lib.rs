//! texture_generator: draws the procedural art (sky, hills, cloud, ground,
//! button, obstacle, confetti) into RGBA buffers.
//!
//! Generation is a pure batch step: [`generate_all`] returns `key -> RgbaImage`
//! and knows nothing about the engine. [`registry`] turns the batch into
//! engine images once at boot.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use image::RgbaImage;
use rand::{rngs::StdRng, Rng, SeedableRng};

pub mod canvas;
pub mod palette;
pub mod registry;

use canvas::{lerp_rgb, rgb, Canvas};

pub use registry::{to_engine_image, GeneratedTextures};

pub const BG_GRADIENT: &str = "bg_gradient";
pub const HILL_FAR: &str = "hill_far";
pub const HILL_NEAR: &str = "hill_near";
pub const CLOUD: &str = "cloud";
pub const GROUND_TILE: &str = "ground_tile";
pub const BUTTON_LARGE: &str = "btn_large";
pub const OBSTACLE_BLOCK: &str = "obstacle_block";
pub const CONFETTI_KEYS: [&str; 5] = ["confetti_0", "confetti_1", "confetti_2", "confetti_3", "confetti_4"];

pub const GROUND_TILE_WIDTH: u32 = 512;
pub const GROUND_TILE_HEIGHT: u32 = 120;

const GRADIENT_STEPS: u32 = 32;
const HILL_SEGMENTS: u32 = 6;

/// Ridgeline parameters for one hill silhouette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HillSpec {
    pub color: u32,
    pub base_y: f32,
    pub amplitude: f32,
    pub seed: u64,
}

pub const FAR_HILLS: HillSpec = HillSpec {
    color: palette::HILL_FAR,
    base_y: 340.0,
    amplitude: 25.0,
    seed: 1,
};

pub const NEAR_HILLS: HillSpec = HillSpec {
    color: palette::HILL_NEAR,
    base_y: 380.0,
    amplitude: 35.0,
    seed: 2,
};

/// Full texture catalogue for a playfield of `width` x `height` pixels.
pub fn generate_all(width: u32, height: u32) -> BTreeMap<&'static str, RgbaImage> {
    let mut out = BTreeMap::new();
    out.insert(BG_GRADIENT, sky_gradient(width, height));
    out.insert(HILL_FAR, hills(width, height, FAR_HILLS));
    out.insert(HILL_NEAR, hills(width, height, NEAR_HILLS));
    out.insert(CLOUD, cloud());
    out.insert(GROUND_TILE, ground_tile());
    out.insert(BUTTON_LARGE, button_large());
    out.insert(OBSTACLE_BLOCK, obstacle_block());
    for (key, color) in CONFETTI_KEYS.iter().zip(palette::CONFETTI) {
        out.insert(*key, confetti(color));
    }
    out
}

pub fn sky_gradient(width: u32, height: u32) -> RgbaImage {
    let mut c = Canvas::new(width, height);
    let (top, bottom) = (rgb(palette::BG_TOP), rgb(palette::BG_BOTTOM));
    let band = height as f32 / GRADIENT_STEPS as f32 + 1.0;
    for i in 0..GRADIENT_STEPS {
        let t = i as f32 / (GRADIENT_STEPS - 1) as f32;
        c.fill_rect(0.0, t * height as f32, width as f32, band, lerp_rgb(top, bottom, t));
    }
    c.into_image()
}

/// Ridgeline vertices (including the fixed left anchor at `base_y`).
pub fn hill_ridge(width: u32, hill: HillSpec) -> Vec<(f32, f32)> {
    let mut rng = StdRng::seed_from_u64(hill.seed);
    let mut pts = Vec::with_capacity(HILL_SEGMENTS as usize + 1);
    pts.push((0.0, hill.base_y));
    for i in 1..=HILL_SEGMENTS {
        let x = i as f32 / HILL_SEGMENTS as f32 * width as f32;
        let frac: f32 = rng.gen();
        pts.push((x, hill.base_y - hill.amplitude + frac * hill.amplitude * 2.0));
    }
    pts
}

pub fn hills(width: u32, height: u32, hill: HillSpec) -> RgbaImage {
    let mut poly = vec![(0.0, height as f32)];
    poly.extend(hill_ridge(width, hill));
    poly.push((width as f32, height as f32));
    let mut c = Canvas::new(width, height);
    c.fill_polygon(&poly, rgb(hill.color));
    c.into_image()
}

pub fn cloud() -> RgbaImage {
    let mut c = Canvas::new(96, 64);
    let white = rgb(palette::CLOUD);
    c.fill_circle(40.0, 20.0, 20.0, white);
    c.fill_circle(60.0, 30.0, 22.0, white);
    c.fill_circle(25.0, 30.0, 18.0, white);
    c.fill_rounded_rect(15.0, 30.0, 60.0, 22.0, 10.0, white);
    c.into_image()
}

pub fn ground_tile() -> RgbaImage {
    let (w, h) = (GROUND_TILE_WIDTH as f32, GROUND_TILE_HEIGHT as f32);
    let mut c = Canvas::new(GROUND_TILE_WIDTH, GROUND_TILE_HEIGHT);
    c.fill_rounded_rect(0.0, 40.0, w, h - 40.0, 16.0, rgb(palette::GROUND));
    c.stroke_rounded_rect(0.0, 40.0, w, h - 40.0, 16.0, 6.0, rgb(palette::GROUND_EDGE));
    c.fill_rect(0.0, 35.0, w, 10.0, rgb(palette::GRASS_DARK));
    let grass = rgb(palette::GRASS);
    for x in (0..GROUND_TILE_WIDTH).step_by(16) {
        c.fill_ellipse(x as f32 + 8.0, 40.0, 18.0, 10.0, grass);
    }
    c.into_image()
}

pub fn button_large() -> RgbaImage {
    let mut c = Canvas::new(380, 130);
    c.fill_rounded_rect(8.0, 8.0, 360.0, 110.0, 22.0, rgb(palette::UI_BUTTON_SHADOW));
    c.fill_rounded_rect(0.0, 0.0, 360.0, 110.0, 22.0, rgb(palette::UI_BUTTON));
    c.into_image()
}

pub fn obstacle_block() -> RgbaImage {
    let mut c = Canvas::new(64, 84);
    c.fill_rounded_rect(0.0, 0.0, 60.0, 80.0, 12.0, rgb(palette::OBSTACLE));
    c.stroke_rounded_rect(0.0, 0.0, 60.0, 80.0, 12.0, 4.0, rgb(palette::GROUND_EDGE));
    c.into_image()
}

pub fn confetti(color: u32) -> RgbaImage {
    let mut c = Canvas::new(8, 14);
    c.fill_rect(0.0, 0.0, 8.0, 14.0, rgb(color));
    c.into_image()
}

/// Writes every generated texture as `<key>.png` into `dir`.
pub fn dump_png(dir: &Path, width: u32, height: u32) -> Result<Vec<std::path::PathBuf>> {
    std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let mut written = Vec::new();
    for (key, img) in generate_all(width, height) {
        let path = dir.join(format!("{key}.png"));
        img.save(&path).with_context(|| format!("write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}
