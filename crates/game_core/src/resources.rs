use bevy::prelude::*;
use game_config::GameConfig;
use rand::{rngs::StdRng, SeedableRng};

use crate::difficulty::Difficulty;

// Wrapper Bevy resource for the pure-data GameConfig (keeps game_config free of bevy dependency).
#[derive(Resource, Debug, Clone, Default)]
pub struct GameConfigRes(pub GameConfig);

/// Deterministic RNG seed resource (set once at startup / tests for reproducible spawning).
#[derive(Resource, Debug, Copy, Clone, Default)]
pub struct RngSeed(pub u64);

/// Gameplay RNG shared by spawners and effects.
#[derive(Resource, Debug, Clone)]
pub struct GameRng(pub StdRng);

impl GameRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_seed(0)
    }
}

/// Logical playfield geometry. Layout numbers are authored in screen space
/// (origin top-left, y down) and converted to Bevy world space (origin centre, y up).
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
    /// Screen-space y of the grass line the player runs on.
    pub ground_y: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl Playfield {
    pub fn from_config(cfg: &GameConfig) -> Self {
        Self {
            width: cfg.window.width,
            height: cfg.window.height,
            ground_y: cfg.window.height - cfg.ground.height + cfg.ground.grass_offset,
        }
    }

    pub fn to_world(&self, screen: Vec2) -> Vec2 {
        Vec2::new(screen.x - self.width * 0.5, self.height * 0.5 - screen.y)
    }

    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.x + self.width * 0.5, self.height * 0.5 - world.y)
    }

    pub fn ground_world_y(&self) -> f32 {
        self.height * 0.5 - self.ground_y
    }
}

/// Result of feeding one collected item into the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectOutcome {
    /// Score advanced; run continues.
    Scored(u32),
    /// Score reached the target with this pickup.
    Won(u32),
    /// The run already ended; nothing changes.
    Ignored,
}

/// Per-run mutable state, reset every time the Game state is entered.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct RunSession {
    pub score: u32,
    /// Best score known when the run started (shown in the HUD, forwarded to Result).
    pub best: u32,
    pub target: u32,
    pub speed: f32,
    pub spawn_interval_ms: f32,
    pub item_interval_ms: f32,
    pub spawn_timer_ms: f32,
    pub item_timer_ms: f32,
    pub elapsed_ms: f32,
    pub on_ground: bool,
    /// Set once a win or loss fired so the ending sequence runs at most once.
    pub finished: bool,
}

impl Default for RunSession {
    fn default() -> Self {
        Self::new(0, 60, Difficulty {
            speed: 4.0,
            obstacle_interval_ms: 1600.0,
            item_interval_ms: 1000.0,
        })
    }
}

impl RunSession {
    pub fn new(best: u32, target: u32, initial: Difficulty) -> Self {
        Self {
            score: 0,
            best,
            target,
            speed: initial.speed,
            spawn_interval_ms: initial.obstacle_interval_ms,
            item_interval_ms: initial.item_interval_ms,
            spawn_timer_ms: 0.0,
            item_timer_ms: 0.0,
            elapsed_ms: 0.0,
            on_ground: true,
            finished: false,
        }
    }

    pub fn apply_difficulty(&mut self, d: Difficulty) {
        self.speed = d.speed;
        self.spawn_interval_ms = d.obstacle_interval_ms;
        self.item_interval_ms = d.item_interval_ms;
    }

    /// One item picked up. The score never passes the target.
    pub fn collect(&mut self) -> CollectOutcome {
        if self.finished {
            return CollectOutcome::Ignored;
        }
        self.score = (self.score + 1).min(self.target);
        if self.score >= self.target {
            self.finished = true;
            CollectOutcome::Won(self.score)
        } else {
            CollectOutcome::Scored(self.score)
        }
    }

    /// Marks the run lost. Returns false if it had already ended.
    pub fn fail(&mut self) -> bool {
        if self.finished {
            return false;
        }
        self.finished = true;
        true
    }

    /// Advances the obstacle timer; true when an obstacle is due (timer resets to 0).
    pub fn tick_obstacle_timer(&mut self, delta_ms: f32) -> bool {
        self.spawn_timer_ms += delta_ms;
        if self.spawn_timer_ms >= self.spawn_interval_ms {
            self.spawn_timer_ms = 0.0;
            true
        } else {
            false
        }
    }

    /// Advances the item timer; true when an item row is due (timer resets to 0).
    pub fn tick_item_timer(&mut self, delta_ms: f32) -> bool {
        self.item_timer_ms += delta_ms;
        if self.item_timer_ms >= self.item_interval_ms {
            self.item_timer_ms = 0.0;
            true
        } else {
            false
        }
    }

    pub fn outcome(&self, win: bool) -> RunOutcome {
        RunOutcome {
            score: self.score,
            best: self.best,
            win,
        }
    }
}

/// Payload handed from Game to Result.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOutcome {
    pub score: u32,
    pub best: u32,
    pub win: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_counts_up_to_target_then_wins() {
        let mut s = RunSession::default();
        for expected in 1..60 {
            assert_eq!(s.collect(), CollectOutcome::Scored(expected));
        }
        assert_eq!(s.collect(), CollectOutcome::Won(60));
        assert_eq!(s.collect(), CollectOutcome::Ignored);
        assert_eq!(s.score, 60);
    }

    #[test]
    fn fail_only_once() {
        let mut s = RunSession::default();
        assert!(s.fail());
        assert!(!s.fail());
        assert_eq!(s.collect(), CollectOutcome::Ignored);
        assert_eq!(s.score, 0);
    }

    #[test]
    fn timers_fire_at_interval_and_reset() {
        let mut s = RunSession::default();
        assert!(!s.tick_obstacle_timer(800.0));
        assert!(!s.tick_obstacle_timer(799.0));
        assert!(s.tick_obstacle_timer(1.0));
        assert_eq!(s.spawn_timer_ms, 0.0);
        assert!(!s.tick_item_timer(999.0));
        assert!(s.tick_item_timer(16.0));
        assert_eq!(s.item_timer_ms, 0.0);
    }

    #[test]
    fn playfield_round_trips_reference_points() {
        let pf = Playfield::default();
        assert_eq!(pf.ground_y, 820.0);
        assert_eq!(pf.ground_world_y(), -340.0);
        assert_eq!(pf.to_world(Vec2::new(0.0, 0.0)), Vec2::new(-270.0, 480.0));
        assert_eq!(pf.to_screen(Vec2::new(-270.0, 480.0)), Vec2::ZERO);
    }
}
