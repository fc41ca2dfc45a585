use crate::core::theme::Theme;
use crate::utils::color::parse_hex_or;
use ratatui::style::{Color, Modifier, Style};

/// Ratatui styles derived from a [`Theme`]. Rebuilt whenever the active theme
/// changes.
#[derive(Debug, Clone)]
pub struct Palette {
    pub background_color: Color,
    pub cursor_color: Color,

    // Prompt: `user@host:~$ command`
    pub prompt_identity_style: Style,
    pub prompt_path_style: Style,
    pub command_style: Style,

    // Output
    pub text_style: Style,
    pub heading_style: Style,
    pub rule_style: Style,
    pub code_style: Style,
    pub code_marker_style: Style,
    pub list_marker_style: Style,
    pub placeholder_style: Style,

    // Chrome
    pub status_style: Style,
    pub busy_style: Style,
    pub input_text_style: Style,
    pub input_cursor_style: Style,
}

impl Palette {
    pub fn from_theme(theme: &Theme) -> Self {
        let background = parse_hex_or(&theme.background, Color::Black);
        let foreground = parse_hex_or(&theme.foreground, Color::White);
        let cursor = parse_hex_or(&theme.cursor_color, foreground);
        let green = parse_hex_or(&theme.green, Color::Green);
        let blue = parse_hex_or(&theme.bright_blue, Color::LightBlue);
        let yellow = parse_hex_or(&theme.yellow, Color::Yellow);
        let cyan = parse_hex_or(&theme.cyan, Color::Cyan);
        let purple = parse_hex_or(&theme.bright_purple, Color::LightMagenta);
        let red = parse_hex_or(&theme.red, Color::Red);
        let muted = parse_hex_or(&theme.bright_black, Color::DarkGray);

        let base = Style::default().fg(foreground).bg(background);
        Palette {
            background_color: background,
            cursor_color: cursor,

            prompt_identity_style: base.fg(green).add_modifier(Modifier::BOLD),
            prompt_path_style: base.fg(blue),
            command_style: base,

            text_style: base,
            heading_style: base.fg(yellow).add_modifier(Modifier::BOLD),
            rule_style: base.fg(muted),
            code_style: base.fg(cyan),
            code_marker_style: base.fg(muted).add_modifier(Modifier::DIM),
            list_marker_style: base.fg(purple),
            placeholder_style: base.fg(red).add_modifier(Modifier::ITALIC),

            status_style: base.fg(red),
            busy_style: base.fg(muted).add_modifier(Modifier::ITALIC),
            input_text_style: base,
            input_cursor_style: Style::default().fg(background).bg(cursor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::find_builtin_theme;

    #[test]
    fn palette_uses_theme_colors() {
        let theme = find_builtin_theme("hackthebox").unwrap();
        let palette = Palette::from_theme(&theme);
        assert_eq!(palette.background_color, Color::Rgb(0x1a, 0x23, 0x32));
        assert_eq!(palette.cursor_color, Color::Rgb(0x9f, 0xef, 0x00));
        assert_eq!(palette.text_style.fg, Some(Color::Rgb(0xff, 0xff, 0xff)));
        assert_eq!(
            palette.prompt_identity_style.fg,
            Some(Color::Rgb(0x9f, 0xef, 0x00))
        );
    }

    #[test]
    fn malformed_colors_fall_back() {
        let mut theme = Theme::default_theme();
        theme.background = "not-a-color".to_string();
        theme.cursor_color = "also bad".to_string();
        let palette = Palette::from_theme(&theme);
        assert_eq!(palette.background_color, Color::Black);
        assert_eq!(palette.cursor_color, Color::Rgb(0xff, 0xff, 0xff));
    }

    #[test]
    fn multibyte_colors_fall_back_without_panicking() {
        let mut theme = Theme::default_theme();
        theme.background = "#€".to_string();
        theme.green = "#ééé".to_string();
        let palette = Palette::from_theme(&theme);
        assert_eq!(palette.background_color, Color::Black);
        assert_eq!(palette.prompt_identity_style.fg, Some(Color::Green));
    }
}
