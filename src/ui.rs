// src/ui.rs
use iced::widget::container;
use iced::{Background, Color, Theme};
use once_cell::sync::Lazy;

pub struct Styles {
    pub bg: Color,
    pub fg: Color,
    pub muted_fg: Color,
    pub panel_bg: Color,
    pub accent: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub error_fg: Color,
    pub warning_fg: Color,
}

pub static DARK_THEME: Lazy<Styles> = Lazy::new(|| Styles {
    bg: Color::from_rgb(0.118, 0.118, 0.118),        // #1e1e1e
    fg: Color::from_rgb(0.878, 0.878, 0.878),        // #e0e0e0
    muted_fg: Color::from_rgb(0.667, 0.667, 0.667),  // #aaaaaa
    panel_bg: Color::from_rgb(0.176, 0.176, 0.176),  // #2d2d2d
    accent: Color::from_rgb(0.204, 0.596, 0.859),    // #3498db
    header_bg: Color::from_rgb(0.22, 0.22, 0.22),
    header_fg: Color::from_rgb(1.0, 1.0, 1.0),
    error_fg: Color::from_rgb(0.906, 0.298, 0.235),  // #e74c3c
    warning_fg: Color::from_rgb(0.945, 0.769, 0.059), // #f1c40f
});

/// Solid background with rounded corners; `accent` draws a colored border.
pub struct PanelStyle {
    pub bg: Color,
    pub accent: Option<Color>,
}

impl container::StyleSheet for PanelStyle {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: None,
            background: Some(Background::Color(self.bg)),
            border_radius: 10.0_f32.into(),
            border_width: if self.accent.is_some() { 2.0 } else { 0.0 },
            border_color: self.accent.unwrap_or(Color::TRANSPARENT),
        }
    }
}

pub struct BackgroundStyle {
    pub bg: Color,
}

impl container::StyleSheet for BackgroundStyle {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: None,
            background: Some(Background::Color(self.bg)),
            border_radius: 0.0_f32.into(),
            border_width: 0.0,
            border_color: Color::TRANSPARENT,
        }
    }
}
