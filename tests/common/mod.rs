//! Headless harness: every gameplay plugin except Boot, assets on disk and Rapier.
#![allow(dead_code)]

use std::time::Duration;

use alexbeer_runner::app::menu::MenuPlugin;
use alexbeer_runner::app::result::ResultPlugin;
use alexbeer_runner::gameplay::GameplayPlugin;
use alexbeer_runner::interaction::PointerPressed;
use alexbeer_runner::tween::TweenPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use game_assets::GameAssets;
use game_config::GameConfig;
use game_core::{AppState, GameConfigRes, GameCorePlugin, Item, ItemCollected, ItemKind, RngSeed, RunSession};
use game_storage::{BestScoreStore, MemoryStore};
use texture_generator::GeneratedTextures;

pub const BEST_KEY: &str = "alexbeer_best";
pub const STEP_MS: u64 = 50;

pub fn runner_app(stored_best: Option<u32>) -> App {
    runner_app_with(stored_best, GameConfig::default())
}

pub fn runner_app_with(stored_best: Option<u32>, cfg: GameConfig) -> App {
    let mut store = MemoryStore::new();
    if let Some(best) = stored_best {
        store = store.with_entry(BEST_KEY, &best.to_string());
    }
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(STEP_MS)))
        .insert_resource(GameConfigRes(cfg))
        .insert_resource(RngSeed(7))
        .insert_resource(BestScoreStore::new(store, BEST_KEY))
        .insert_resource(GameAssets::default())
        .insert_resource(GeneratedTextures::default())
        .init_resource::<ButtonInput<KeyCode>>()
        .add_event::<PointerPressed>()
        .add_plugins((GameCorePlugin, TweenPlugin, MenuPlugin, GameplayPlugin, ResultPlugin));
    app.update();
    app
}

pub fn state(app: &App) -> AppState {
    *app.world().resource::<State<AppState>>().get()
}

/// Requests `to` and runs the frame that applies it.
pub fn go_to(app: &mut App, to: AppState) {
    app.world_mut().resource_mut::<NextState<AppState>>().set(to);
    app.update();
    assert_eq!(state(app), to);
}

/// One frame with `key` freshly pressed, then released and cleared.
pub fn tap(app: &mut App, key: KeyCode) {
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(key);
    app.update();
    let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    keys.release(key);
    keys.clear();
}

pub fn session(app: &App) -> RunSession {
    app.world().resource::<RunSession>().clone()
}

pub fn stored_best(app: &App) -> u32 {
    app.world().resource::<BestScoreStore>().load()
}

/// Spawns `n` items and reports each one as overlapped this frame.
pub fn collect(app: &mut App, n: u32) {
    for _ in 0..n {
        let item = app
            .world_mut()
            .spawn((Item::new(ItemKind::Beer, 0.0), Transform::default()))
            .id();
        app.world_mut().send_event(ItemCollected { item });
    }
    app.update();
}

/// Updates until `pred` holds, at most `max_frames` times.
pub fn run_until(app: &mut App, max_frames: usize, pred: impl Fn(&App) -> bool) -> bool {
    for _ in 0..max_frames {
        if pred(app) {
            return true;
        }
        app.update();
    }
    pred(app)
}

pub fn count<C: Component>(app: &mut App) -> usize {
    let mut q = app.world_mut().query_filtered::<Entity, With<C>>();
    q.iter(app.world()).count()
}

/// Updates until at least `n` entities carry `C`, at most `max_frames` times.
pub fn run_until_count<C: Component>(app: &mut App, max_frames: usize, n: usize) -> bool {
    for _ in 0..max_frames {
        if count::<C>(app) >= n {
            return true;
        }
        app.update();
    }
    count::<C>(app) >= n
}
