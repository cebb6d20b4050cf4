//! game_core: foundational ECS types (states, components, resources, events) and the
//! pure scoring / difficulty rules shared by the runner crates.

use bevy::prelude::*;

pub mod app_state;
pub mod components;
pub mod difficulty;
pub mod events;
pub mod medal;
pub mod motion;
pub mod resources;

pub use app_state::*;
pub use components::*;
pub use difficulty::*;
pub use events::*;
pub use medal::*;
pub use resources::*;

/// Ordering fences for the per-frame gameplay update.
#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone, Copy)]
pub enum RunSet {
    /// Input collection and jump handling.
    Input,
    /// Background scroll, landing, difficulty, spawn timers.
    Simulate,
    /// Reacting to overlaps reported by physics.
    Respond,
}

pub struct GameCorePlugin;
impl Plugin for GameCorePlugin {
    fn build(&self, app: &mut App) {
        let cfg = app
            .world_mut()
            .get_resource_or_insert_with::<GameConfigRes>(GameConfigRes::default)
            .0
            .clone();
        let seed = app
            .world_mut()
            .get_resource_or_insert_with::<RngSeed>(RngSeed::default)
            .0;

        app.init_state::<AppState>()
            .add_event::<ItemCollected>()
            .add_event::<ObstacleHit>()
            .add_event::<JumpRequested>()
            .add_event::<GameWon>()
            .add_event::<GameLost>()
            .insert_resource(Playfield::from_config(&cfg))
            .insert_resource(DifficultyTable::from_config(&cfg.difficulty))
            .insert_resource(GameRng::from_seed(seed))
            .init_resource::<RunSession>()
            .init_resource::<RunOutcome>()
            .configure_sets(
                Update,
                (RunSet::Input, RunSet::Simulate, RunSet::Respond).chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    #[test]
    fn plugin_starts_in_boot_with_defaults() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .add_plugins(GameCorePlugin);
        app.update();
        assert_eq!(
            *app.world().resource::<State<AppState>>().get(),
            AppState::Boot
        );
        assert_eq!(app.world().resource::<Playfield>().ground_y, 820.0);
        assert_eq!(app.world().resource::<RunSession>().score, 0);
    }

    #[test]
    fn config_inserted_before_plugin_is_respected() {
        let mut cfg = game_config::GameConfig::default();
        cfg.ground.height = 200.0;
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .insert_resource(GameConfigRes(cfg))
            .add_plugins(GameCorePlugin);
        assert_eq!(app.world().resource::<Playfield>().ground_y, 800.0);
    }
}
