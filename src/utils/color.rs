use ratatui::style::Color;

/// Parse `#rrggbb` (or `#rgb`) into an RGB color.
pub fn parse_hex(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };
    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Like [`parse_hex`], with a fallback for malformed values.
pub fn parse_hex_or(value: &str, fallback: Color) -> Color {
    parse_hex(value).unwrap_or(fallback)
}

/// RGB components for colors that have a fixed value.
pub fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        Color::Black => Some((0, 0, 0)),
        Color::Red => Some((128, 0, 0)),
        Color::Green => Some((0, 128, 0)),
        Color::Yellow => Some((128, 128, 0)),
        Color::Blue => Some((0, 0, 128)),
        Color::Magenta => Some((128, 0, 128)),
        Color::Cyan => Some((0, 128, 128)),
        Color::Gray => Some((192, 192, 192)),
        Color::DarkGray => Some((128, 128, 128)),
        Color::LightRed => Some((255, 0, 0)),
        Color::LightGreen => Some((0, 255, 0)),
        Color::LightYellow => Some((255, 255, 0)),
        Color::LightBlue => Some((0, 0, 255)),
        Color::LightMagenta => Some((255, 0, 255)),
        Color::LightCyan => Some((0, 255, 255)),
        Color::White => Some((255, 255, 255)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(parse_hex("#9fef00"), Some(Color::Rgb(0x9f, 0xef, 0x00)));
        assert_eq!(parse_hex("#fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(parse_hex(" #1A2332 "), Some(Color::Rgb(0x1a, 0x23, 0x32)));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(parse_hex("9fef00"), None);
        assert_eq!(parse_hex("#12345"), None);
        assert_eq!(parse_hex("#zzzzzz"), None);
        assert_eq!(parse_hex("#+1+2+3"), None);
        assert_eq!(parse_hex_or("red", Color::Reset), Color::Reset);
    }

    #[test]
    fn multibyte_input_is_rejected_not_sliced() {
        assert_eq!(parse_hex("#€"), None);
        assert_eq!(parse_hex("#ééé"), None);
        assert_eq!(parse_hex("#€€"), None);
    }

    #[test]
    fn rgb_roundtrip_for_rgb_colors() {
        assert_eq!(color_to_rgb(Color::Rgb(1, 2, 3)), Some((1, 2, 3)));
        assert_eq!(color_to_rgb(Color::Reset), None);
    }
}
