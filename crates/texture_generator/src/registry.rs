//! Engine side of texture generation: uploads buffers into `Assets<Image>` and
//! keeps the resulting handles by key.

use std::collections::HashMap;

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use image::RgbaImage;

pub fn to_engine_image(buffer: &RgbaImage) -> Image {
    let (width, height) = buffer.dimensions();
    Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        buffer.as_raw().clone(),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD,
    )
}

/// Handles to every generated texture, filled once during boot.
#[derive(Resource, Debug, Default, Clone)]
pub struct GeneratedTextures {
    handles: HashMap<String, Handle<Image>>,
}

impl GeneratedTextures {
    /// Generates the full catalogue and registers each buffer as an image asset.
    pub fn build(images: &mut Assets<Image>, width: u32, height: u32) -> Self {
        let handles = crate::generate_all(width, height)
            .iter()
            .map(|(key, buffer)| (key.to_string(), images.add(to_engine_image(buffer))))
            .collect();
        Self { handles }
    }

    /// Handle for `key`; an unknown key yields the default (blank) handle.
    pub fn get(&self, key: &str) -> Handle<Image> {
        match self.handles.get(key) {
            Some(h) => h.clone(),
            None => {
                warn!(target: "boot", "generated texture '{key}' not registered");
                Handle::default()
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.handles.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
