use std::{error::Error, io, io::Write};

use ratatui::crossterm::{
    cursor::SetCursorStyle,
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, style::Color, Terminal};

use crate::utils::color::color_to_rgb;

pub type ShellTerminal = Terminal<CrosstermBackend<io::Stdout>>;

pub fn setup_terminal(cursor_color: Color) -> Result<ShellTerminal, Box<dyn Error>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetCursorStyle::SteadyBlock)?;
    write_cursor_color(&mut stdout, cursor_color)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).inspect_err(|_| {
        let _ = disable_raw_mode();
    })?;
    Ok(terminal)
}

pub fn restore_terminal(terminal: &mut ShellTerminal) -> Result<(), Box<dyn Error>> {
    disable_raw_mode()?;
    write_reset_cursor_color(terminal.backend_mut())?;
    execute!(
        terminal.backend_mut(),
        SetCursorStyle::DefaultUserShape,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Set the terminal's own cursor color (OSC 12).
pub fn write_cursor_color<W: Write>(writer: &mut W, color: Color) -> io::Result<()> {
    if let Some((r, g, b)) = color_to_rgb(color) {
        execute!(writer, Print(format!("\x1b]12;#{r:02x}{g:02x}{b:02x}\x1b\\")))?;
    }
    writer.flush()
}

fn write_reset_cursor_color<W: Write>(writer: &mut W) -> io::Result<()> {
    execute!(writer, Print("\x1b]112\x1b\\"))?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_color_sequence_is_osc12() {
        let mut buf: Vec<u8> = Vec::new();
        write_cursor_color(&mut buf, Color::Rgb(0x9f, 0xef, 0x00)).expect("write");
        assert_eq!(buf, b"\x1b]12;#9fef00\x1b\\");
    }

    #[test]
    fn unknown_colors_write_nothing() {
        let mut buf: Vec<u8> = Vec::new();
        write_cursor_color(&mut buf, Color::Reset).expect("write");
        assert!(buf.is_empty());
    }

    #[test]
    fn reset_sequence_is_osc112() {
        let mut buf: Vec<u8> = Vec::new();
        write_reset_cursor_color(&mut buf).expect("write");
        assert_eq!(buf, b"\x1b]112\x1b\\");
    }
}
