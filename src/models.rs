use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    description: String,
    pub completed: bool,
}

impl Task {
    /// Builds a pending task. Callers are responsible for the non-empty check; the
    /// store does it on `add` and the task file reader skips empty rows.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            completed: false,
        }
    }

    pub fn with_completed(description: impl Into<String>, completed: bool) -> Self {
        Self {
            description: description.into(),
            completed,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Text shown in the task list.
    pub fn label(&self) -> String {
        let marker = if self.completed { '✓' } else { '○' };
        format!("{marker} {}", self.description)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn luminance(&self) -> f64 {
        (0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b))
            / 255.0
    }

    pub fn is_dark(&self) -> bool {
        self.luminance() < 0.5
    }

    /// White on dark surfaces, black otherwise.
    pub fn contrast_text(&self) -> Rgb {
        if self.is_dark() {
            Rgb::WHITE
        } else {
            Rgb::BLACK
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRgbError;

impl fmt::Display for ParseRgbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected three comma-separated components in 0..=255")
    }
}

impl std::error::Error for ParseRgbError {}

impl FromStr for Rgb {
    type Err = ParseRgbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',').map(|part| part.trim().parse::<u8>());
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(Ok(r)), Some(Ok(g)), Some(Ok(b)), None) => Ok(Rgb::new(r, g, b)),
            _ => Err(ParseRgbError),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Theme {
    #[default]
    Default,
    Light,
    Dark,
    Blue,
    /// Any other name. Rendered on the primary color.
    Custom(String),
}

impl Theme {
    pub const BUILT_IN: [Theme; 4] = [Theme::Default, Theme::Light, Theme::Dark, Theme::Blue];

    pub fn parse(name: &str) -> Self {
        match name {
            "Default" => Theme::Default,
            "Light" => Theme::Light,
            "Dark" => Theme::Dark,
            "Blue" => Theme::Blue,
            other => Theme::Custom(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Theme::Default => "Default",
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::Blue => "Blue",
            Theme::Custom(name) => name,
        }
    }
}

impl From<String> for Theme {
    fn from(value: String) -> Self {
        Theme::parse(&value)
    }
}

impl From<Theme> for String {
    fn from(value: Theme) -> Self {
        value.name().to_string()
    }
}

pub const DEFAULT_PRIMARY_COLOR: Rgb = Rgb::new(46, 125, 50);
pub const DEFAULT_SECONDARY_COLOR: Rgb = Rgb::new(25, 118, 210);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub auto_save: bool,
    pub show_confirm_dialogs: bool,
    pub theme: Theme,
    pub primary_color: Rgb,
    pub secondary_color: Rgb,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_save: true,
            show_confirm_dialogs: true,
            theme: Theme::Default,
            primary_color: DEFAULT_PRIMARY_COLOR,
            secondary_color: DEFAULT_SECONDARY_COLOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_default_values() {
        let settings = Settings::default();
        assert!(settings.auto_save);
        assert!(settings.show_confirm_dialogs);
        assert_eq!(settings.theme, Theme::Default);
        assert_eq!(settings.primary_color, Rgb::new(46, 125, 50));
        assert_eq!(settings.secondary_color, Rgb::new(25, 118, 210));
    }

    #[test]
    fn task_starts_pending_and_labels_by_state() {
        let mut task = Task::new("Buy milk");
        assert!(!task.completed);
        assert_eq!(task.label(), "○ Buy milk");
        task.completed = true;
        assert_eq!(task.label(), "✓ Buy milk");
    }

    #[test]
    fn theme_parse_is_exact_and_falls_back_to_custom() {
        assert_eq!(Theme::parse("Dark"), Theme::Dark);
        assert_eq!(Theme::parse("Blue"), Theme::Blue);
        assert_eq!(Theme::parse("dark"), Theme::Custom("dark".to_string()));
        assert_eq!(Theme::parse("Sunset").name(), "Sunset");
        for theme in Theme::BUILT_IN {
            assert_eq!(Theme::parse(theme.name()), theme);
        }
    }

    #[test]
    fn rgb_parse_accepts_triples_in_range_only() {
        assert_eq!("46,125,50".parse::<Rgb>(), Ok(Rgb::new(46, 125, 50)));
        assert_eq!(" 1, 2 ,3 ".parse::<Rgb>(), Ok(Rgb::new(1, 2, 3)));
        assert!("999,0,0".parse::<Rgb>().is_err());
        assert!("-1,0,0".parse::<Rgb>().is_err());
        assert!("1,2".parse::<Rgb>().is_err());
        assert!("1,2,3,4".parse::<Rgb>().is_err());
        assert!("red".parse::<Rgb>().is_err());
        assert_eq!(Rgb::new(25, 118, 210).to_string(), "25,118,210");
    }

    #[test]
    fn is_dark_uses_weighted_luminance() {
        assert!(Rgb::new(45, 45, 45).is_dark());
        assert!(!Rgb::WHITE.is_dark());
        assert!(DEFAULT_PRIMARY_COLOR.is_dark());
        assert_eq!(Rgb::new(45, 45, 45).contrast_text(), Rgb::WHITE);
        assert_eq!(Rgb::new(240, 248, 255).contrast_text(), Rgb::BLACK);
    }

    #[test]
    fn settings_serde_keeps_theme_as_name() {
        let mut settings = Settings::default();
        settings.theme = Theme::Custom("Sunset".to_string());
        let value = serde_json::to_value(&settings).expect("serialize settings");
        assert_eq!(value["theme"], serde_json::json!("Sunset"));
        assert_eq!(value["primary_color"], serde_json::json!({"r": 46, "g": 125, "b": 50}));

        let back: Settings = serde_json::from_value(value).expect("deserialize settings");
        assert_eq!(back, settings);
    }

    #[test]
    fn task_serializes_with_field_names() {
        let value = serde_json::to_value(Task::with_completed("Buy milk", true)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"description": "Buy milk", "completed": true})
        );
        let value = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(value["show_confirm_dialogs"], serde_json::json!(true));
        assert_eq!(value["auto_save"], serde_json::json!(true));
    }
}
