use crate::core::history::HistoryEntry;
use crate::core::output::CommandOutput;
use crate::ui::markdown::{to_terminal_text, CODE_BLOCK_END, CODE_BLOCK_START, IMAGE_PLACEHOLDER};
use crate::ui::shell_loop::ShellView;
use crate::ui::theme::Palette;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const PROMPT_SUFFIX: &str = ":~$ ";

/// A history entry whose output has already been through the text transform,
/// so drawing a frame only styles and wraps.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub command: String,
    pub body: EntryBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntryBody {
    Text(String),
    Terminal(String),
}

impl TranscriptEntry {
    pub fn from_history(entry: &HistoryEntry) -> Self {
        let body = match &entry.output {
            CommandOutput::Text(content) => EntryBody::Text(content.clone()),
            CommandOutput::Markdown { content, .. } => {
                EntryBody::Terminal(to_terminal_text(content))
            }
        };
        Self {
            command: entry.command.clone(),
            body,
        }
    }
}

pub fn draw(f: &mut Frame, view: &mut ShellView) {
    let palette = view.palette.clone();
    f.render_widget(
        Block::default().style(Style::default().bg(palette.background_color)),
        f.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    let transcript = chunks[0];
    let lines = transcript_lines(&view.prompt_identity, &view.entries, &palette);
    let wrapped = wrap_lines(lines, transcript.width as usize);

    let height = transcript.height as usize;
    let max_offset = wrapped.len().saturating_sub(height);
    view.scroll_from_bottom = view.scroll_from_bottom.min(max_offset);
    view.page_height = height.max(1);
    let top = max_offset - view.scroll_from_bottom;

    f.render_widget(
        Paragraph::new(wrapped).scroll((top.min(u16::MAX as usize) as u16, 0)),
        transcript,
    );

    let prompt = prompt_spans(&view.prompt_identity, &palette);
    let prompt_width = prompt.iter().map(|s| s.content.width()).sum::<usize>() as u16;
    let input_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(prompt_width), Constraint::Min(1)])
        .split(chunks[1]);
    f.render_widget(Paragraph::new(Line::from(prompt)), input_row[0]);
    f.render_widget(&view.input, input_row[1]);

    let status = match (&view.busy, &view.status) {
        (Some(command), _) => Span::styled(format!("running '{command}'..."), palette.busy_style),
        (None, Some(message)) => Span::styled(message.clone(), palette.status_style),
        (None, None) if view.scroll_from_bottom > 0 => Span::styled(
            format!("-- scrolled {} lines --", view.scroll_from_bottom),
            palette.busy_style,
        ),
        (None, None) => Span::raw(""),
    };
    f.render_widget(Paragraph::new(Line::from(status)), chunks[2]);
}

fn prompt_spans(identity: &str, palette: &Palette) -> Vec<Span<'static>> {
    vec![
        Span::styled(identity.to_string(), palette.prompt_identity_style),
        Span::styled(PROMPT_SUFFIX, palette.prompt_path_style),
    ]
}

/// Every history entry as its prompt line followed by its output.
pub fn transcript_lines(
    identity: &str,
    entries: &[TranscriptEntry],
    palette: &Palette,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for entry in entries {
        let mut prompt = prompt_spans(identity, palette);
        prompt.push(Span::styled(entry.command.clone(), palette.command_style));
        lines.push(Line::from(prompt));
        lines.extend(output_lines(&entry.body, palette));
    }
    lines
}

fn output_lines(body: &EntryBody, palette: &Palette) -> Vec<Line<'static>> {
    match body {
        EntryBody::Text(content) if content.is_empty() => Vec::new(),
        EntryBody::Text(content) => content
            .lines()
            .map(|line| Line::from(Span::styled(line.to_string(), palette.text_style)))
            .collect(),
        EntryBody::Terminal(text) => styled_terminal_text(text, palette),
    }
}

fn is_underline(line: &str) -> bool {
    let len = line.chars().count();
    (len == 60 && line.chars().all(|c| c == '='))
        || (matches!(len, 30 | 40 | 50) && line.chars().all(|c| c == '-'))
}

/// Style already-transformed writeup text: headings, code regions, list
/// markers and image placeholders.
pub fn styled_terminal_text(text: &str, palette: &Palette) -> Vec<Line<'static>> {
    let source: Vec<&str> = text.lines().collect();
    let mut lines = Vec::with_capacity(source.len());
    let mut in_code = false;
    let mut i = 0;

    while i < source.len() {
        let line = source[i];
        if line == CODE_BLOCK_START || line == CODE_BLOCK_END {
            in_code = line == CODE_BLOCK_START;
            lines.push(Line::from(Span::styled(line.to_string(), palette.code_marker_style)));
        } else if in_code {
            lines.push(Line::from(Span::styled(line.to_string(), palette.code_style)));
        } else if source.get(i + 1).is_some_and(|next| is_underline(next)) {
            lines.push(Line::from(Span::styled(line.to_string(), palette.heading_style)));
            lines.push(Line::from(Span::styled(source[i + 1].to_string(), palette.rule_style)));
            i += 1;
        } else {
            lines.push(prose_line(line, palette));
        }
        i += 1;
    }
    lines
}

fn prose_line(line: &str, palette: &Palette) -> Line<'static> {
    let mut spans = Vec::new();
    let mut rest = line;
    if let Some(item) = rest.strip_prefix("  • ") {
        spans.push(Span::styled("  • ", palette.list_marker_style));
        rest = item;
    }
    while let Some(pos) = rest.find(IMAGE_PLACEHOLDER) {
        if pos > 0 {
            spans.push(Span::styled(rest[..pos].to_string(), palette.text_style));
        }
        spans.push(Span::styled(IMAGE_PLACEHOLDER, palette.placeholder_style));
        rest = &rest[pos + IMAGE_PLACEHOLDER.len()..];
    }
    if !rest.is_empty() || spans.is_empty() {
        spans.push(Span::styled(rest.to_string(), palette.text_style));
    }
    Line::from(spans)
}

/// Hard-wrap lines at `width` display columns so the scroll math matches
/// what is drawn.
pub fn wrap_lines(lines: Vec<Line<'static>>, width: usize) -> Vec<Line<'static>> {
    lines
        .into_iter()
        .flat_map(|line| wrap_line(line, width))
        .collect()
}

fn wrap_line(line: Line<'static>, width: usize) -> Vec<Line<'static>> {
    if width == 0 || line.width() <= width {
        return vec![line];
    }

    let mut rows = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0usize;
    for span in line.spans {
        let style = span.style;
        let mut chunk = String::new();
        for ch in span.content.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w > width && used > 0 {
                if !chunk.is_empty() {
                    current.push(Span::styled(std::mem::take(&mut chunk), style));
                }
                rows.push(Line::from(std::mem::take(&mut current)));
                used = 0;
            }
            chunk.push(ch);
            used += w;
        }
        if !chunk.is_empty() {
            current.push(Span::styled(chunk, style));
        }
    }
    if !current.is_empty() {
        rows.push(Line::from(current));
    }
    rows
}
