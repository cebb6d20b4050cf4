use bevy::prelude::*;
use bevy::window::WindowResolution;
#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;
use game_core::{GameConfigRes, RngSeed};

use alexbeer_runner::cli::{self, Cli, ConfigReport};
use alexbeer_runner::rendering::scenery::texture_color;
use alexbeer_runner::RunnerPlugin;

#[cfg(target_arch = "wasm32")]
const EMBEDDED_CONFIG: &str = include_str!("../assets/config/game.ron");

#[cfg(not(target_arch = "wasm32"))]
fn load_config(cli: &Cli) -> (game_config::GameConfig, ConfigReport) {
    cli::load_config(cli, std::path::Path::new("."))
}

#[cfg(target_arch = "wasm32")]
fn load_config(_cli: &Cli) -> (game_config::GameConfig, ConfigReport) {
    let mut report = ConfigReport::default();
    let cfg = match game_config::GameConfig::from_ron_str(EMBEDDED_CONFIG) {
        Ok(cfg) => {
            report.used.push("embedded game.ron".into());
            cfg
        }
        Err(e) => {
            report.errors.push(e);
            game_config::GameConfig::default()
        }
    };
    report.warnings = cfg.validate();
    (cfg, report)
}

fn main() -> AppExit {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    #[cfg(not(target_arch = "wasm32"))]
    let cli = Cli::parse();
    #[cfg(target_arch = "wasm32")]
    let cli = Cli::default();

    let (cfg, mut report) = load_config(&cli);

    if let Some(dir) = &cli.dump_textures {
        return match cli::dump_textures(dir, &cfg) {
            Ok(paths) => {
                for p in paths {
                    println!("{}", p.display());
                }
                AppExit::Success
            }
            Err(e) => {
                eprintln!("error: {e:#}");
                AppExit::error()
            }
        };
    }

    let mut store = cli::open_store_or_memory(&cfg.storage, cli.data_dir.as_deref(), &mut report);
    report.notes.push(format!("best score store: {}", store.describe()));
    if cli.reset_best {
        match store.reset() {
            Ok(()) => report.notes.push("best score reset".into()),
            Err(e) => report.errors.push(format!("reset best score: {e:#}")),
        }
    }

    let seed = cli.seed.unwrap_or_else(rand::random);
    report.notes.push(format!("rng seed {seed}"));

    App::new()
        .insert_resource(ClearColor(texture_color(cfg.window.clear_color)))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: cfg.window.title.clone(),
                resolution: WindowResolution::new(cfg.window.width, cfg.window.height),
                resizable: true,
                fit_canvas_to_parent: true,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(GameConfigRes(cfg))
        .insert_resource(RngSeed(seed))
        .insert_resource(store)
        .insert_resource(report)
        .add_plugins(RunnerPlugin)
        .add_systems(Startup, cli::log_config_report)
        .run()
}
