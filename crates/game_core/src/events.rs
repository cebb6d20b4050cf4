use bevy::prelude::*;

/// The player overlapped an item. Emitted by the physics bridge.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemCollected {
    pub item: Entity,
}

/// The player overlapped an obstacle. Emitted by the physics bridge.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstacleHit {
    pub obstacle: Entity,
}

/// Jump request from any input source (key, pointer, touch).
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct JumpRequested;

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct GameWon {
    pub score: u32,
}

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct GameLost {
    pub score: u32,
}
