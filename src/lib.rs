//! AlexBeer: a small endless runner. Run, jump over crates and collect 60 items.
//!
//! The binary wires [`RunnerPlugin`] on top of `DefaultPlugins`; tests drive the
//! same plugins headless.

pub mod app;
pub mod cli;
pub mod gameplay;
pub mod interaction;
pub mod rendering;
pub mod tween;

pub use app::RunnerPlugin;
