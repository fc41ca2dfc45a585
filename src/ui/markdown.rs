//! Markdown to terminal text.
//!
//! This is deliberately not a markdown renderer: a fixed, ordered list of
//! substitutions turns writeup markdown into something that reads well in a
//! monospace terminal. Fenced code is wrapped in `[CODE BLOCK]` markers and
//! left untouched, images are never shown, and the result is stable under a
//! second pass.

use regex::Regex;
use std::sync::LazyLock;

pub const CODE_BLOCK_START: &str = "[CODE BLOCK]";
pub const CODE_BLOCK_END: &str = "[/CODE BLOCK]";
pub const IMAGE_PLACEHOLDER: &str = "[IMAGE REMOVED FOR SECURITY]";

const HEADING_WIDTHS: [(char, usize); 4] = [('=', 60), ('-', 50), ('-', 40), ('-', 30)];

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,4})\s+(.*?)(?:\s+#+)?\s*$").unwrap());
static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*+]\s+(.*)$").unwrap());
static NUMBERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)[.)]\s+(.*)$").unwrap());
static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)|(?i)<img\b[^>]*>").unwrap());
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]*\)").unwrap());
static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*|\b__(.+?)__\b").unwrap());
static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\s][^*]*?)\*|\b_([^_\s][^_]*?)_\b").unwrap());
static INLINE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());
static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Apply the terminal text transform.
pub fn to_terminal_text(markdown: &str) -> String {
    let normalized = markdown.replace("\r\n", "\n");
    let mut out: Vec<String> = Vec::new();
    let mut in_code = false;

    let lines: Vec<&str> = normalized.split('\n').collect();

    for (index, line) in lines.iter().copied().enumerate() {
        let trimmed = line.trim();
        if in_code {
            if trimmed.starts_with("```") || trimmed == CODE_BLOCK_END {
                out.push(CODE_BLOCK_END.to_string());
                in_code = false;
            } else {
                out.push(line.to_string());
            }
            continue;
        }

        if trimmed.starts_with("```") || trimmed == CODE_BLOCK_START {
            out.push(CODE_BLOCK_START.to_string());
            in_code = true;
            continue;
        }

        // Already heading text from an earlier pass.
        if lines.get(index + 1).is_some_and(|next| is_heading_underline(next)) {
            out.push(inline(line));
            continue;
        }

        transform_line(line, &mut out);
    }

    if in_code {
        out.push(CODE_BLOCK_END.to_string());
    }

    BLANK_RUN_RE.replace_all(&out.join("\n"), "\n\n").into_owned()
}

fn is_heading_underline(line: &str) -> bool {
    HEADING_WIDTHS
        .iter()
        .any(|&(ch, width)| line.len() == width && line.chars().all(|c| c == ch))
}

fn transform_line(line: &str, out: &mut Vec<String>) {
    if let Some(caps) = HEADING_RE.captures(line) {
        let level = caps[1].len();
        let text = inline(&caps[2]);
        let (ch, width) = HEADING_WIDTHS[level - 1];
        out.push(text);
        out.push(ch.to_string().repeat(width));
        return;
    }

    if let Some(caps) = BULLET_RE.captures(line) {
        out.push(format!("  • {}", inline(&caps[1])));
        return;
    }

    if let Some(caps) = NUMBERED_RE.captures(line) {
        out.push(format!("  {}. {}", &caps[1], inline(&caps[2])));
        return;
    }

    out.push(inline(line));
}

/// Inline substitutions, in order: images, links, bold, italic, code.
fn inline(text: &str) -> String {
    let text = IMAGE_RE.replace_all(text, IMAGE_PLACEHOLDER);
    let text = LINK_RE.replace_all(&text, "$1");
    let text = BOLD_RE.replace_all(&text, "${1}${2}");
    let text = ITALIC_RE.replace_all(&text, "${1}${2}");
    INLINE_CODE_RE.replace_all(&text, "$1").into_owned()
}
