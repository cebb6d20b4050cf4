//! The four presentation states and the plugin that wires them together.

pub mod boot;
pub mod game;
pub mod menu;
pub mod result;

pub use game::RunnerPlugin;
