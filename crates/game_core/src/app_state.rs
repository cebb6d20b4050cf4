//! Application-level state machine controlling the presentation phases.
//! Session data (score, timers) lives in the `RunSession` resource; the only thing
//! carried between states is the `RunOutcome` payload.

use bevy::prelude::*;

/// Boot -> Menu -> Game -> Result -> {Game, Menu}.
#[derive(States, Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
#[states(scoped_entities)]
pub enum AppState {
    /// Asset requests in flight and generated textures being registered.
    #[default]
    Boot,
    /// Title, best score and start control.
    Menu,
    /// Active run.
    Game,
    /// Final score, medal and retry/menu controls.
    Result,
}
