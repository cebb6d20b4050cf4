//! Shared colour palette (0xRRGGBB).

pub const BG_TOP: u32 = 0x85d7d0;
pub const BG_BOTTOM: u32 = 0xcfeee7;
pub const HILL_FAR: u32 = 0x9fd5cc;
pub const HILL_NEAR: u32 = 0x7fc2ba;
pub const CLOUD: u32 = 0xffffff;
pub const GROUND: u32 = 0x8f563b;
pub const GROUND_EDGE: u32 = 0x5d3b24;
pub const GRASS: u32 = 0x66d06b;
pub const GRASS_DARK: u32 = 0x3a9a43;
pub const UI_TEAL: u32 = 0x196c6c;
pub const UI_BUTTON: u32 = 0xf4a62b;
pub const UI_BUTTON_SHADOW: u32 = 0xa96e15;
pub const OBSTACLE: u32 = 0x9c633d;
pub const CONFETTI: [u32; 5] = [0xff6b6b, 0xffd93d, 0x6bcfff, 0xb28dff, 0x4caf50];
