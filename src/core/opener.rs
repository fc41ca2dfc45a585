use std::error::Error;
use std::sync::Mutex;

/// Hands a URL (web page or `mailto:`) to the desktop.
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// Launches the platform handler (`open`, `start`, `xdg-open`).
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        #[cfg(target_os = "macos")]
        {
            let status = std::process::Command::new("open").arg(url).status()?;
            if status.success() {
                return Ok(());
            }
            return Err("failed to launch browser with open".into());
        }
        #[cfg(target_os = "windows")]
        {
            let status = std::process::Command::new("cmd")
                .args(["/C", "start", "", url])
                .status()?;
            if status.success() {
                return Ok(());
            }
            return Err("failed to launch browser with start".into());
        }
        #[cfg(all(unix, not(target_os = "macos")))]
        {
            let status = std::process::Command::new("xdg-open")
                .arg(url)
                .stdout(std::process::Stdio::null())
                .stderr(std::process::Stdio::null())
                .status()?;
            if status.success() {
                return Ok(());
            }
            return Err("failed to launch browser with xdg-open".into());
        }

        #[allow(unreachable_code)]
        Err(format!("no browser launcher configured for URL: {url}").into())
    }
}

/// Remembers every URL instead of opening it. Used by `termblog run` when
/// `--no-open` is given, and by tests.
#[derive(Default)]
pub struct RecordingOpener {
    opened: Mutex<Vec<String>>,
}

impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl UrlOpener for RecordingOpener {
    fn open(&self, url: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.opened
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(url.to_string());
        Ok(())
    }
}
