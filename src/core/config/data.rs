use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_USERNAME: &str = "guest";
pub const DEFAULT_HOSTNAME: &str = "localhost";
pub const DEFAULT_EMAIL: &str = "hello@example.com";
pub const DEFAULT_REPOSITORY: &str = "https://github.com/termblog/termblog";
pub const DEFAULT_SUDO_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
pub const DEFAULT_WEATHER_URL: &str = "https://wttr.in/{city}?ATm";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// How `read` hands a writeup to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadFormat {
    /// Return a markdown payload and let the UI render it.
    #[default]
    Markdown,
    /// Apply the terminal text transform before returning.
    Plain,
}

impl ReadFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Some(ReadFormat::Markdown),
            "plain" | "text" => Some(ReadFormat::Plain),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReadFormat::Markdown => "markdown",
            ReadFormat::Plain => "plain",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Name printed by `whoami` and in the prompt
    pub username: Option<String>,
    /// Name printed by `hostname` and in the prompt
    pub hostname: Option<String>,
    /// Address opened by `email`
    pub email: Option<String>,
    /// Repository opened by `repo`
    pub repository: Option<String>,
    /// Page opened when someone tries `sudo`
    pub sudo_url: Option<String>,
    /// Weather endpoint; `{city}` is replaced with the `+`-joined arguments
    pub weather_url: Option<String>,
    /// Directory or http(s) base that writeup `filePath`s are resolved against
    pub content_base: Option<String>,
    pub read_format: Option<ReadFormat>,
    /// Theme used when nothing valid has been persisted (e.g. "HackTheBox")
    pub default_theme: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or(DEFAULT_USERNAME)
    }

    pub fn hostname(&self) -> &str {
        self.hostname.as_deref().unwrap_or(DEFAULT_HOSTNAME)
    }

    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or(DEFAULT_EMAIL)
    }

    pub fn repository(&self) -> &str {
        self.repository.as_deref().unwrap_or(DEFAULT_REPOSITORY)
    }

    pub fn sudo_url(&self) -> &str {
        self.sudo_url.as_deref().unwrap_or(DEFAULT_SUDO_URL)
    }

    pub fn weather_url(&self) -> &str {
        self.weather_url.as_deref().unwrap_or(DEFAULT_WEATHER_URL)
    }

    /// Content base, defaulting to `fallback` (normally the `content`
    /// directory under the data dir).
    pub fn content_base_or(&self, fallback: &Path) -> String {
        match &self.content_base {
            Some(base) if !base.trim().is_empty() => base.trim().to_string(),
            _ => fallback.display().to_string(),
        }
    }

    pub fn read_format(&self) -> ReadFormat {
        self.read_format.unwrap_or_default()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
///
/// # Examples
/// - Unix: `/home/user/.config/termblog/config.toml` → `~/.config/termblog/config.toml`
/// - Windows: paths are shown unchanged
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
