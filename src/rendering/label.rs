//! World-space text with a cheap outline: a dark copy of the text sits one step
//! behind and slightly offset, and follows the parent's content.

use bevy::prelude::*;
use bevy::sprite::Anchor;

pub const TEXT_COLOR: Color = Color::WHITE;
pub const OUTLINE_TEAL: Color = Color::srgb(0.051, 0.231, 0.231);
pub const OUTLINE_BROWN: Color = Color::srgb(0.478, 0.29, 0.071);

/// The offset shadow copy of a label.
#[derive(Component, Debug, Default)]
pub struct LabelOutline;

#[derive(Clone, Debug)]
pub struct LabelStyle {
    pub font: Handle<Font>,
    pub size: f32,
    pub color: Color,
    pub outline: Color,
    pub outline_offset: f32,
    pub anchor: Anchor,
}

impl LabelStyle {
    pub fn new(font: &Handle<Font>, size: f32) -> Self {
        Self {
            font: font.clone(),
            size,
            color: TEXT_COLOR,
            outline: OUTLINE_TEAL,
            outline_offset: (size / 14.0).max(2.0),
            anchor: Anchor::Center,
        }
    }

    pub fn outline(mut self, color: Color) -> Self {
        self.outline = color;
        self
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }
}

pub fn outlined_label(text: impl Into<String>, style: &LabelStyle, at: Vec3) -> impl Bundle {
    let text = text.into();
    let font = TextFont {
        font: style.font.clone(),
        font_size: style.size,
        ..default()
    };
    let d = style.outline_offset;
    (
        Text2d::new(text.clone()),
        font.clone(),
        TextColor(style.color),
        style.anchor,
        Transform::from_translation(at),
        children![(
            LabelOutline,
            Text2d::new(text),
            font,
            TextColor(style.outline),
            style.anchor,
            Transform::from_xyz(d, -d, -0.05),
        )],
    )
}

/// Copies changed label text into its outline child.
pub fn sync_label_outlines(
    labels: Query<(&Text2d, &Children), (Changed<Text2d>, Without<LabelOutline>)>,
    mut outlines: Query<&mut Text2d, With<LabelOutline>>,
) {
    for (text, children) in &labels {
        let kids: &[Entity] = children;
        for &child in kids {
            if let Ok(mut outline) = outlines.get_mut(child) {
                if outline.0 != text.0 {
                    outline.0.clone_from(&text.0);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_follows_text_changes() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_systems(Update, sync_label_outlines);
        let style = LabelStyle::new(&Handle::default(), 28.0);
        let label = app
            .world_mut()
            .spawn(outlined_label("0/60", &style, Vec3::ZERO))
            .id();
        app.update();
        app.world_mut().get_mut::<Text2d>(label).unwrap().0 = "1/60".into();
        app.update();

        let children = app.world().get::<Children>(label).unwrap();
        let outline = children[0];
        assert!(app.world().get::<LabelOutline>(outline).is_some());
        assert_eq!(app.world().get::<Text2d>(outline).unwrap().0, "1/60");
    }
}
