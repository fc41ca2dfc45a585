use crate::core::catalog::Catalog;
use crate::core::config::Config;
use crate::core::fetch::Fetcher;
use crate::core::history::History;
use crate::core::opener::UrlOpener;
use crate::core::theme_store::ThemeStore;
use std::sync::Arc;
use tracing::warn;

/// Everything a command may read or change.
pub struct Session {
    pub config: Config,
    pub theme: ThemeStore,
    pub history: History,
    pub catalog: &'static Catalog,
    pub fetcher: Arc<dyn Fetcher>,
    pub opener: Arc<dyn UrlOpener>,
    /// Resolved base for writeup bodies (directory or http(s) URL).
    pub content_base: String,
    exit_requested: bool,
}

impl Session {
    pub fn new(
        config: Config,
        theme: ThemeStore,
        fetcher: Arc<dyn Fetcher>,
        opener: Arc<dyn UrlOpener>,
        content_base: String,
    ) -> Self {
        Self {
            config,
            theme,
            history: History::new(),
            catalog: Catalog::builtin(),
            fetcher,
            opener,
            content_base,
            exit_requested: false,
        }
    }

    /// Open a URL, logging instead of failing when no launcher is available.
    pub fn open_url(&self, url: &str) -> bool {
        match self.opener.open(url) {
            Ok(()) => true,
            Err(err) => {
                warn!(url, error = %err, "Could not open URL");
                false
            }
        }
    }

    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// `user@host`, as shown in the prompt.
    pub fn prompt_identity(&self) -> String {
        format!("{}@{}", self.config.username(), self.config.hostname())
    }
}
