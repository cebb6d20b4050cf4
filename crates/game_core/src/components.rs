use bevy::prelude::*;

/// Which clip the player sprite is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlayerAnim {
    #[default]
    Running,
    Jumping,
}

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Player {
    pub anim: PlayerAnim,
}

/// Static collider scrolled in from the right edge; touching it ends the run.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Obstacle;

/// Collectible flavours. All three are worth one point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Beer,
    Fish,
    Glass,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Beer, ItemKind::Fish, ItemKind::Glass];

    pub fn texture_key(self) -> &'static str {
        match self {
            ItemKind::Beer => "item_beer",
            ItemKind::Fish => "item_fish",
            ItemKind::Glass => "item_glass",
        }
    }
}

#[derive(Component, Clone, Copy, Debug)]
pub struct Item {
    pub kind: ItemKind,
    /// Per-item offset of the vertical bob, radians.
    pub phase: f32,
}

impl Item {
    pub fn new(kind: ItemKind, phase: f32) -> Self {
        Self { kind, phase }
    }
}

/// Horizontally scrolling background strip. Every layer is made of two copies
/// (`slot` 0 and 1) placed side by side so the wrap is seamless.
#[derive(Component, Clone, Copy, Debug)]
pub struct ParallaxLayer {
    /// Fraction of the run speed this layer scrolls at.
    pub factor: f32,
    pub tile_width: f32,
    pub slot: u8,
}

/// Reads back the horizontal position of a layer copy for a given scroll offset.
/// The returned value is the left edge relative to the playfield origin.
pub fn parallax_left_edge(offset: f32, tile_width: f32, slot: u8) -> f32 {
    if tile_width <= 0.0 {
        return 0.0;
    }
    -offset.rem_euclid(tile_width) + slot as f32 * tile_width
}
