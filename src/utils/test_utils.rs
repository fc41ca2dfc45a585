use crate::core::config::Config;
use crate::core::fetch::{FetchError, FetchResponse, Fetcher};
use crate::core::opener::RecordingOpener;
use crate::core::session::Session;
use crate::core::shell::Shell;
use crate::core::storage::MemoryStore;
use crate::core::theme::Theme;
use crate::core::theme_store::ThemeStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

pub const TEST_CONTENT_BASE: &str = "https://content.test";

/// Canned responses keyed by URL. Unknown URLs answer 404; local reads
/// always fail.
#[derive(Default)]
pub struct StubFetcher {
    responses: Mutex<HashMap<String, (u16, String)>>,
    calls: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, url: &str, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), (status, body.to_string()));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn get(&self, url: &str) -> Result<FetchResponse, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        let (status, body) = self
            .responses
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or((404, "not found".to_string()));
        Ok(FetchResponse {
            url: url.to_string(),
            status,
            body,
        })
    }

    async fn read_local(&self, path: &Path) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(path.display().to_string());
        Err(FetchError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        })
    }
}

pub struct TestHarness {
    pub fetcher: Arc<StubFetcher>,
    pub opener: Arc<RecordingOpener>,
    pub storage: Arc<MemoryStore>,
}

pub fn create_test_session(config: Config) -> (Session, TestHarness) {
    let harness = TestHarness {
        fetcher: Arc::new(StubFetcher::new()),
        opener: Arc::new(RecordingOpener::new()),
        storage: Arc::new(MemoryStore::new()),
    };
    let theme = ThemeStore::restore(harness.storage.clone(), Theme::default_theme());
    let session = Session::new(
        config,
        theme,
        harness.fetcher.clone(),
        harness.opener.clone(),
        TEST_CONTENT_BASE.to_string(),
    );
    (session, harness)
}

pub fn create_test_shell() -> (Shell, TestHarness) {
    let (session, harness) = create_test_session(Config::default());
    (Shell::new(session), harness)
}
