use std::collections::HashMap;

use crate::models::{Rgb, Settings, Theme};

pub const KEY_AUTO_SAVE: &str = "autoSave";
pub const KEY_SHOW_CONFIRM_DIALOGS: &str = "showConfirmDialogs";
pub const KEY_THEME: &str = "theme";
pub const KEY_PRIMARY_COLOR: &str = "primaryColor";
pub const KEY_SECONDARY_COLOR: &str = "secondaryColor";

pub const SETTINGS_COMMENT: &str = "To-Do List Settings";

/// Builds settings key by key. A missing or unreadable value only resets its own
/// field to the default.
pub fn settings_from_properties(props: &HashMap<String, String>) -> Settings {
    let defaults = Settings::default();
    Settings {
        auto_save: read_key(props, KEY_AUTO_SAVE, parse_bool).unwrap_or(defaults.auto_save),
        show_confirm_dialogs: read_key(props, KEY_SHOW_CONFIRM_DIALOGS, parse_bool)
            .unwrap_or(defaults.show_confirm_dialogs),
        theme: read_key(props, KEY_THEME, parse_theme).unwrap_or(defaults.theme),
        primary_color: read_key(props, KEY_PRIMARY_COLOR, |v| v.parse::<Rgb>().ok())
            .unwrap_or(defaults.primary_color),
        secondary_color: read_key(props, KEY_SECONDARY_COLOR, |v| v.parse::<Rgb>().ok())
            .unwrap_or(defaults.secondary_color),
    }
}

pub fn settings_to_properties(settings: &Settings) -> Vec<(&'static str, String)> {
    vec![
        (KEY_AUTO_SAVE, settings.auto_save.to_string()),
        (
            KEY_SHOW_CONFIRM_DIALOGS,
            settings.show_confirm_dialogs.to_string(),
        ),
        (KEY_THEME, settings.theme.name().to_string()),
        (KEY_PRIMARY_COLOR, settings.primary_color.to_string()),
        (KEY_SECONDARY_COLOR, settings.secondary_color.to_string()),
    ]
}

fn read_key<T>(
    props: &HashMap<String, String>,
    key: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let raw = props.get(key)?;
    let parsed = parse(raw.trim());
    if parsed.is_none() {
        log::warn!("settings key {key} has unreadable value {raw:?}; using default");
    }
    parsed
}

fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_theme(value: &str) -> Option<Theme> {
    if value.is_empty() {
        return None;
    }
    Some(Theme::parse(value))
}
