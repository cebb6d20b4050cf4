use bevy::prelude::*;
use bevy::sprite::Anchor;
use game_core::{AppState, Playfield, RunSession};

use crate::rendering::scenery::{at, Z_UI};
use crate::rendering::{outlined_label, LabelStyle};

const HUD_FONT_SIZE: f32 = 28.0;

#[derive(Component, Debug, Default)]
pub struct ScoreText;

#[derive(Component, Debug, Default)]
pub struct BestText;

pub fn score_line(score: u32, target: u32) -> String {
    format!("{score}/{target}")
}

pub fn best_line(best: u32) -> String {
    format!("Рекорд: {best}")
}

pub fn spawn_hud(commands: &mut Commands, font: &Handle<Font>, pf: &Playfield, session: &RunSession) {
    commands.spawn((
        ScoreText,
        outlined_label(
            score_line(session.score, session.target),
            &LabelStyle::new(font, HUD_FONT_SIZE).anchor(Anchor::TopLeft),
            at(pf, 20.0, 16.0, Z_UI),
        ),
        StateScoped(AppState::Game),
    ));
    commands.spawn((
        BestText,
        outlined_label(
            best_line(session.best),
            &LabelStyle::new(font, HUD_FONT_SIZE).anchor(Anchor::TopRight),
            at(pf, pf.width - 20.0, 16.0, Z_UI),
        ),
        StateScoped(AppState::Game),
    ));
}

pub fn update_hud(session: Res<RunSession>, mut score: Query<&mut Text2d, With<ScoreText>>) {
    let line = score_line(session.score, session.target);
    for mut text in &mut score {
        if text.0 != line {
            text.0 = line.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hud_lines() {
        assert_eq!(score_line(0, 60), "0/60");
        assert_eq!(score_line(17, 60), "17/60");
        assert_eq!(best_line(42), "Рекорд: 42");
    }

    #[test]
    fn score_text_follows_session() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<Playfield>()
            .init_resource::<RunSession>()
            .add_systems(Update, update_hud);
        let pf = Playfield::default();
        let session = RunSession::default();
        spawn_hud(&mut app.world_mut().commands(), &Handle::default(), &pf, &session);
        app.world_mut().flush();
        app.world_mut().resource_mut::<RunSession>().score = 5;
        app.update();

        let mut q = app.world_mut().query_filtered::<&Text2d, With<ScoreText>>();
        let texts: Vec<String> = q.iter(app.world()).map(|t| t.0.clone()).collect();
        assert_eq!(texts, vec!["5/60".to_string()]);
    }
}
