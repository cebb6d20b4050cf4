//! End-to-end state flow with overlaps injected as gameplay events.

mod common;

use alexbeer_runner::app::menu::MenuBestText;
use alexbeer_runner::app::result::ResultBest;
use alexbeer_runner::gameplay::spawning::DelayedObstacle;
use alexbeer_runner::gameplay::WinCountdown;
use bevy::prelude::*;
use bevy_rapier2d::prelude::Velocity;
use common::*;
use game_config::GameConfig;
use game_core::{AppState, Item, JumpRequested, Obstacle, ObstacleHit, Player, PlayerAnim, Playfield, RunOutcome};
use game_physics::GroundContact;

fn player(app: &mut App) -> Entity {
    let mut q = app.world_mut().query_filtered::<Entity, With<Player>>();
    q.single(app.world()).expect("one player")
}

fn hit_obstacle(app: &mut App) {
    let obstacle = app.world_mut().spawn((Obstacle, Transform::default())).id();
    app.world_mut().send_event(ObstacleHit { obstacle });
    app.update();
}

#[test]
fn menu_shows_stored_best_and_enter_starts_run() {
    let mut app = runner_app(Some(25));
    go_to(&mut app, AppState::Menu);

    let mut q = app.world_mut().query_filtered::<&Text2d, With<MenuBestText>>();
    let best: Vec<String> = q.iter(app.world()).map(|t| t.0.clone()).collect();
    assert_eq!(best, vec!["РЕКОРД: 25".to_string()]);

    tap(&mut app, KeyCode::Enter);
    app.update();
    assert_eq!(state(&app), AppState::Game);
    let s = session(&app);
    assert_eq!((s.score, s.best, s.speed), (0, 25, 4.0));
}

#[test]
fn obstacle_at_fifteen_loses_and_keeps_higher_best() {
    let mut app = runner_app(Some(20));
    go_to(&mut app, AppState::Game);
    collect(&mut app, 15);
    assert_eq!(session(&app).score, 15);

    hit_obstacle(&mut app);
    app.update();
    assert_eq!(state(&app), AppState::Result);
    assert_eq!(
        *app.world().resource::<RunOutcome>(),
        RunOutcome {
            score: 15,
            best: 20,
            win: false
        }
    );
    assert_eq!(stored_best(&app), 20);
    assert_eq!(app.world().resource::<ResultBest>().0, 20);
    // Game entities are gone with the state.
    let mut players = app.world_mut().query::<&Player>();
    assert_eq!(players.iter(app.world()).count(), 0);
}

#[test]
fn losing_with_a_new_best_persists_it() {
    let mut app = runner_app(Some(3));
    go_to(&mut app, AppState::Game);
    collect(&mut app, 7);
    hit_obstacle(&mut app);
    app.update();
    assert_eq!(state(&app), AppState::Result);
    assert_eq!(stored_best(&app), 7);
}

#[test]
fn twenty_items_raise_difficulty_next_frame() {
    let mut app = runner_app(None);
    go_to(&mut app, AppState::Game);
    collect(&mut app, 20);
    let s = session(&app);
    assert_eq!((s.score, s.speed), (20, 4.0));

    app.update();
    let s = session(&app);
    assert_eq!(
        (s.speed, s.spawn_interval_ms, s.item_interval_ms),
        (5.0, 1300.0, 850.0)
    );
}

#[test]
fn jump_only_from_the_ground() {
    let mut app = runner_app(None);
    go_to(&mut app, AppState::Game);
    let ground = app.world().resource::<Playfield>().ground_world_y();
    let p = player(&mut app);

    app.world_mut().get_mut::<Transform>(p).unwrap().translation.y = ground + 100.0;
    app.world_mut().send_event(JumpRequested);
    app.update();
    assert_eq!(app.world().get::<Velocity>(p).unwrap().linvel.y, 0.0);
    assert_eq!(app.world().get::<Player>(p).unwrap().anim, PlayerAnim::Running);

    app.world_mut().get_mut::<Transform>(p).unwrap().translation.y = ground;
    app.world_mut().send_event(JumpRequested);
    app.update();
    assert_eq!(app.world().get::<Velocity>(p).unwrap().linvel.y, 560.0);
    assert_eq!(app.world().get::<Player>(p).unwrap().anim, PlayerAnim::Jumping);
    assert!(!session(&app).on_ground);
}

#[test]
fn reaching_target_wins_after_celebration() {
    let mut app = runner_app(Some(10));
    go_to(&mut app, AppState::Game);
    collect(&mut app, 59);
    assert_eq!(state(&app), AppState::Game);
    collect(&mut app, 1);
    assert_eq!(session(&app).score, 60);
    assert!(app.world().contains_resource::<WinCountdown>());

    // Extra pickups and obstacles during the celebration change nothing.
    collect(&mut app, 2);
    hit_obstacle(&mut app);
    assert_eq!(session(&app).score, 60);
    assert_eq!(state(&app), AppState::Game);

    assert!(run_until(&mut app, 60, |a| state(a) == AppState::Result));
    assert_eq!(
        *app.world().resource::<RunOutcome>(),
        RunOutcome {
            score: 60,
            best: 10,
            win: true
        }
    );
    assert_eq!(stored_best(&app), 60);
    assert!(!app.world().contains_resource::<WinCountdown>());
}

#[test]
fn retry_starts_a_fresh_session_with_updated_best() {
    let mut app = runner_app(None);
    go_to(&mut app, AppState::Game);
    collect(&mut app, 12);
    hit_obstacle(&mut app);
    app.update();
    assert_eq!(state(&app), AppState::Result);

    tap(&mut app, KeyCode::KeyR);
    app.update();
    assert_eq!(state(&app), AppState::Game);
    let s = session(&app);
    assert_eq!((s.score, s.best, s.finished), (0, 12, false));

    collect(&mut app, 1);
    hit_obstacle(&mut app);
    app.update();
    tap(&mut app, KeyCode::Escape);
    app.update();
    assert_eq!(state(&app), AppState::Menu);
    assert_eq!(stored_best(&app), 12);
}

#[test]
fn lagging_ground_contact_does_not_allow_a_mid_air_jump() {
    let mut app = runner_app(None);
    go_to(&mut app, AppState::Game);
    let p = player(&mut app);
    app.world_mut().entity_mut(p).insert(GroundContact(true));

    app.world_mut().send_event(JumpRequested);
    app.update();
    assert_eq!(app.world().get::<Velocity>(p).unwrap().linvel.y, 560.0);
    assert!(!session(&app).on_ground);

    // The landing contact is reported after the take-off, while the body rises.
    app.world_mut().get_mut::<GroundContact>(p).unwrap().0 = true;
    app.world_mut().get_mut::<Transform>(p).unwrap().translation.y += 9.0;
    app.world_mut().get_mut::<Velocity>(p).unwrap().linvel.y = 500.0;
    app.world_mut().send_event(JumpRequested);
    app.update();
    assert_eq!(app.world().get::<Velocity>(p).unwrap().linvel.y, 500.0);
    assert!(!session(&app).on_ground);
}

#[test]
fn win_waits_for_the_celebration_delay() {
    let mut app = runner_app(None);
    go_to(&mut app, AppState::Game);
    collect(&mut app, 59);
    collect(&mut app, 1);
    assert!(app.world().contains_resource::<WinCountdown>());

    // 28 frames of 50 ms at most since the winning pickup.
    for _ in 0..27 {
        app.update();
        assert_eq!(state(&app), AppState::Game);
    }
    assert!(run_until(&mut app, 5, |a| state(a) == AppState::Result));
    assert!(app.world().resource::<RunOutcome>().win);
}

#[test]
fn first_obstacle_arrives_after_its_interval() {
    let mut app = runner_app(None);
    go_to(&mut app, AppState::Game);
    assert_eq!(count::<Obstacle>(&mut app), 0);

    assert!(run_until_count::<Obstacle>(&mut app, 40, 1));
    let elapsed = session(&app).elapsed_ms;
    assert!((1550.0..=1650.0).contains(&elapsed), "obstacle at {elapsed} ms");
    assert_eq!(count::<Obstacle>(&mut app), 1);
    assert_eq!(count::<DelayedObstacle>(&mut app), 0);
}

#[test]
fn first_item_row_arrives_after_its_interval() {
    let mut app = runner_app(None);
    go_to(&mut app, AppState::Game);
    assert_eq!(count::<Item>(&mut app), 0);

    assert!(run_until_count::<Item>(&mut app, 30, 1));
    let elapsed = session(&app).elapsed_ms;
    assert!((950.0..=1050.0).contains(&elapsed), "items at {elapsed} ms");
    assert!((2..=3).contains(&count::<Item>(&mut app)));
}

#[test]
fn high_score_obstacle_is_followed_by_a_delayed_one() {
    let mut cfg = GameConfig::default();
    cfg.difficulty.double_spawn_chance = 1.0;
    let mut app = runner_app_with(None, cfg);
    go_to(&mut app, AppState::Game);
    collect(&mut app, 35);

    assert!(run_until_count::<Obstacle>(&mut app, 40, 1));
    assert_eq!(count::<Obstacle>(&mut app), 1);
    assert_eq!(count::<DelayedObstacle>(&mut app), 1);

    // Still pending 200 ms later at most.
    for _ in 0..3 {
        app.update();
    }
    assert_eq!(count::<Obstacle>(&mut app), 1);

    assert!(run_until_count::<Obstacle>(&mut app, 6, 2));
    assert_eq!(count::<DelayedObstacle>(&mut app), 0);
}

#[test]
fn low_score_obstacle_never_doubles() {
    let mut cfg = GameConfig::default();
    cfg.difficulty.double_spawn_chance = 1.0;
    let mut app = runner_app_with(None, cfg);
    go_to(&mut app, AppState::Game);
    collect(&mut app, 34);

    assert!(run_until_count::<Obstacle>(&mut app, 40, 1));
    assert_eq!(count::<DelayedObstacle>(&mut app), 0);
}

#[test]
fn bronze_medal_is_labelled_at_28px() {
    let mut app = runner_app(None);
    go_to(&mut app, AppState::Game);
    collect(&mut app, 25);
    hit_obstacle(&mut app);
    app.update();
    assert_eq!(state(&app), AppState::Result);

    let mut q = app.world_mut().query::<(&Text2d, &TextFont)>();
    let sizes: Vec<f32> = q
        .iter(app.world())
        .filter(|(t, _)| t.0 == "БРОНЗА")
        .map(|(_, f)| f.font_size)
        .collect();
    assert!(!sizes.is_empty());
    assert!(sizes.iter().all(|s| *s == 28.0));
}
