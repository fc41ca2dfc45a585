use std::error::Error;
use std::fs::{self, OpenOptions};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter, e.g. `TERMBLOG_LOG=debug`.
pub const LOG_ENV: &str = "TERMBLOG_LOG";
const DEFAULT_FILTER: &str = "warn";

/// Route tracing output to `log_file`. The terminal belongs to the UI, so
/// nothing is ever written to stdout or stderr.
pub fn init_logging(log_file: &Path) -> Result<(), Box<dyn Error + Send + Sync>> {
    if let Some(parent) = log_file.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file)
        .with_ansi(false)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_missing_log_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("termblog.log");
        // A global subscriber may already be installed by another test.
        let _ = init_logging(&path);
        assert!(path.exists());
    }
}
