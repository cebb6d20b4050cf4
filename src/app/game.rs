use bevy::prelude::*;
use game_assets::GameAssetsPlugin;
use game_core::{GameConfigRes, GameCorePlugin};
use game_physics::GamePhysicsPlugin;
use game_storage::BestScoreStore;

use crate::app::boot::BootPlugin;
use crate::app::menu::MenuPlugin;
use crate::app::result::ResultPlugin;
use crate::gameplay::GameplayPlugin;
use crate::interaction::PointerPlugin;
use crate::rendering::RenderingPlugin;
use crate::tween::TweenPlugin;

/// Everything the runner needs on top of `DefaultPlugins`.
///
/// Insert `GameConfigRes`, `RngSeed` and a `BestScoreStore` before adding it;
/// defaults (and a memory-only store) are used for anything missing.
pub struct RunnerPlugin;

impl Plugin for RunnerPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<BestScoreStore>() {
            let key = app
                .world()
                .get_resource::<GameConfigRes>()
                .map(|c| c.0.storage.best_key.clone())
                .unwrap_or_else(|| game_config::StorageConfig::default().best_key);
            warn!(target: "storage", "no best-score store configured; scores will not persist");
            app.insert_resource(BestScoreStore::in_memory(key));
        }

        app.add_plugins((
            GameCorePlugin,
            GameAssetsPlugin,
            GamePhysicsPlugin,
            TweenPlugin,
            RenderingPlugin,
            PointerPlugin,
        ))
        .add_plugins((BootPlugin, MenuPlugin, GameplayPlugin, ResultPlugin));
    }
}
