use crate::core::catalog::Writeup;

/// What a command hands back to the terminal.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    Text(String),
    /// Markdown to be rendered; `writeup` is set when the content came from
    /// the catalog so the UI can title it.
    Markdown {
        content: String,
        writeup: Option<Box<Writeup>>,
    },
}

impl CommandOutput {
    pub fn text(content: impl Into<String>) -> Self {
        CommandOutput::Text(content.into())
    }

    pub fn empty() -> Self {
        CommandOutput::Text(String::new())
    }

    pub fn markdown(content: impl Into<String>) -> Self {
        CommandOutput::Markdown {
            content: content.into(),
            writeup: None,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            CommandOutput::Text(content) | CommandOutput::Markdown { content, .. } => content,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content().is_empty()
    }

    pub fn is_markdown(&self) -> bool {
        matches!(self, CommandOutput::Markdown { .. })
    }

    /// Plain text suitable for a dumb terminal: markdown goes through the
    /// terminal transform, text is returned as-is.
    pub fn to_terminal_text(&self) -> String {
        match self {
            CommandOutput::Text(content) => content.clone(),
            CommandOutput::Markdown { content, .. } => crate::ui::markdown::to_terminal_text(content),
        }
    }
}

impl From<String> for CommandOutput {
    fn from(value: String) -> Self {
        CommandOutput::Text(value)
    }
}

impl From<&str> for CommandOutput {
    fn from(value: &str) -> Self {
        CommandOutput::Text(value.to_string())
    }
}
