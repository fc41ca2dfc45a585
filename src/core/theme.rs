//! Terminal colour schemes and the built-in theme catalog.

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Name of the theme used when nothing valid has been persisted.
pub const DEFAULT_THEME_NAME: &str = "HackTheBox";

/// The sixteen ANSI slots, in the order terminals index them.
pub const ANSI_COLOR_FIELDS: [&str; 16] = [
    "black",
    "red",
    "green",
    "yellow",
    "blue",
    "purple",
    "cyan",
    "white",
    "brightBlack",
    "brightRed",
    "brightGreen",
    "brightYellow",
    "brightBlue",
    "brightPurple",
    "brightCyan",
    "brightWhite",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub name: String,
    pub background: String,
    pub foreground: String,
    pub cursor_color: String,
    pub black: String,
    pub red: String,
    pub green: String,
    pub yellow: String,
    pub blue: String,
    pub purple: String,
    pub cyan: String,
    pub white: String,
    pub bright_black: String,
    pub bright_red: String,
    pub bright_green: String,
    pub bright_yellow: String,
    pub bright_blue: String,
    pub bright_purple: String,
    pub bright_cyan: String,
    pub bright_white: String,
}

impl Theme {
    /// The built-in default, or a plain black/white scheme if the catalog
    /// somehow lacks it.
    pub fn default_theme() -> Theme {
        find_builtin_theme(DEFAULT_THEME_NAME).unwrap_or_else(Theme::monochrome)
    }

    /// ANSI slots in terminal index order (0-15).
    pub fn ansi_colors(&self) -> [&str; 16] {
        [
            &self.black,
            &self.red,
            &self.green,
            &self.yellow,
            &self.blue,
            &self.purple,
            &self.cyan,
            &self.white,
            &self.bright_black,
            &self.bright_red,
            &self.bright_green,
            &self.bright_yellow,
            &self.bright_blue,
            &self.bright_purple,
            &self.bright_cyan,
            &self.bright_white,
        ]
    }

    fn monochrome() -> Theme {
        let black = "#000000".to_string();
        let white = "#FFFFFF".to_string();
        Theme {
            name: "Monochrome".to_string(),
            background: black.clone(),
            foreground: white.clone(),
            cursor_color: white.clone(),
            black: black.clone(),
            red: white.clone(),
            green: white.clone(),
            yellow: white.clone(),
            blue: white.clone(),
            purple: white.clone(),
            cyan: white.clone(),
            white: white.clone(),
            bright_black: black,
            bright_red: white.clone(),
            bright_green: white.clone(),
            bright_yellow: white.clone(),
            bright_blue: white.clone(),
            bright_purple: white.clone(),
            bright_cyan: white.clone(),
            bright_white: white,
        }
    }
}

#[derive(Debug, Deserialize)]
struct BuiltinThemesConfig {
    themes: Vec<Theme>,
}

static BUILTIN_THEMES: LazyLock<Vec<Theme>> = LazyLock::new(|| {
    const CONFIG_CONTENT: &str = include_str!("../../builtin/themes.toml");
    let config: BuiltinThemesConfig =
        toml::from_str(CONFIG_CONTENT).expect("Failed to parse builtin/themes.toml");
    config.themes
});

pub fn builtin_themes() -> &'static [Theme] {
    &BUILTIN_THEMES
}

/// Case-insensitive exact lookup by theme name.
pub fn find_builtin_theme(name: &str) -> Option<Theme> {
    builtin_themes()
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .cloned()
}

/// `#rgb` or `#rrggbb`.
const HEX_COLOR_PATTERN: &str = "^#([0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$";

/// JSON schema every persisted theme must satisfy before it is trusted.
pub fn theme_schema() -> serde_json::Value {
    let mut properties = serde_json::Map::new();
    let mut required = Vec::new();
    properties.insert(
        "name".to_string(),
        serde_json::json!({ "type": "string", "minLength": 1 }),
    );
    required.push(serde_json::Value::String("name".to_string()));
    let color_fields = ["background", "foreground", "cursorColor"]
        .into_iter()
        .chain(ANSI_COLOR_FIELDS);
    for field in color_fields {
        properties.insert(
            field.to_string(),
            serde_json::json!({ "type": "string", "pattern": HEX_COLOR_PATTERN }),
        );
        required.push(serde_json::Value::String(field.to_string()));
    }
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn builtin_catalog_has_default_theme() {
        let theme = Theme::default_theme();
        assert_eq!(theme.name, DEFAULT_THEME_NAME);
    }

    #[test]
    fn builtin_theme_names_are_unique() {
        let mut seen = HashSet::new();
        for theme in builtin_themes() {
            assert!(
                seen.insert(theme.name.to_ascii_lowercase()),
                "duplicate theme name {}",
                theme.name
            );
        }
    }

    #[test]
    fn builtin_themes_have_no_empty_fields() {
        for theme in builtin_themes() {
            let value = serde_json::to_value(theme).unwrap();
            let object = value.as_object().unwrap();
            assert_eq!(object.len(), 20, "{} has wrong field count", theme.name);
            for (key, field) in object {
                assert!(
                    !field.as_str().unwrap().is_empty(),
                    "{}.{key} is empty",
                    theme.name
                );
            }
        }
    }

    #[test]
    fn find_builtin_theme_is_case_insensitive() {
        let theme = find_builtin_theme("gruvboxdark").expect("gruvbox");
        assert_eq!(theme.name, "GruvboxDark");
        assert!(find_builtin_theme("no-such-theme").is_none());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_string(&Theme::default_theme()).unwrap();
        assert!(json.contains("\"cursorColor\""));
        assert!(json.contains("\"brightPurple\""));
        assert!(!json.contains("bright_purple"));
    }

    #[test]
    fn schema_requires_every_field() {
        let schema = theme_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 20);
    }

    #[test]
    fn builtin_themes_satisfy_schema() {
        let validator = jsonschema::validator_for(&theme_schema()).unwrap();
        for theme in builtin_themes() {
            let value = serde_json::to_value(theme).unwrap();
            assert!(validator.is_valid(&value), "{} fails the schema", theme.name);
        }
    }
}
