use serde::Serialize;

use crate::models::{Rgb, Settings, Theme};

const DARK_SURFACE: Rgb = Rgb::new(45, 45, 45);
const BLUE_SURFACE: Rgb = Rgb::new(240, 248, 255);
const BLUE_TEXT: Rgb = Rgb::new(25, 25, 112);

/// Surface and text colors the presentation layer paints with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub background: Rgb,
    pub text: Rgb,
}

impl Palette {
    pub fn resolve(settings: &Settings) -> Self {
        match &settings.theme {
            Theme::Dark => Palette {
                background: DARK_SURFACE,
                text: Rgb::WHITE,
            },
            Theme::Light => Palette {
                background: Rgb::WHITE,
                text: Rgb::BLACK,
            },
            Theme::Blue => Palette {
                background: BLUE_SURFACE,
                text: BLUE_TEXT,
            },
            Theme::Default | Theme::Custom(_) => Self::on_surface(settings.primary_color),
        }
    }

    pub fn on_surface(background: Rgb) -> Self {
        Palette {
            background,
            text: background.contrast_text(),
        }
    }
}
