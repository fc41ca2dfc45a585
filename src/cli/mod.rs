//! Command-line interface parsing and handling
//!
//! With no subcommand the interactive shell starts. The other subcommands
//! reuse the same session and dispatcher without touching the terminal.

pub mod theme_list;

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::warn;

use crate::cli::theme_list::list_themes;
use crate::core::config::{path_display, Config, ProjectPaths};
use crate::core::fetch::HttpFetcher;
use crate::core::opener::{RecordingOpener, SystemOpener, UrlOpener};
use crate::core::session::Session;
use crate::core::shell::Shell;
use crate::core::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::core::theme::{find_builtin_theme, Theme};
use crate::core::theme_store::ThemeStore;
use crate::ui::shell_loop::run_shell;
use crate::utils::logging::init_logging;

/// Content shipped next to the binary during development.
const LOCAL_CONTENT_DIR: &str = "content";

#[derive(Parser)]
#[command(name = "termblog")]
#[command(about = "A terminal-style blog for security writeups")]
#[command(
    long_about = "termblog is a pretend shell for reading CTF and security writeups. \
Type commands at the prompt; 'help' lists them.\n\n\
Controls:\n\
  Enter             Run the command line\n\
  Tab               Complete a command name\n\
  Up/Down           Recall previous command lines\n\
  PageUp/PageDown   Scroll the output\n\
  Ctrl+L            Clear the screen\n\
  Ctrl+C            Quit (or type 'exit')\n\n\
Environment:\n\
  TERMBLOG_LOG      Tracing filter for the log file (default: warn)"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Use this config file instead of the per-user one
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the log to this file instead of the data directory
    #[arg(short = 'l', long, global = true, value_name = "PATH")]
    pub log: Option<PathBuf>,

    /// Keep state in memory; nothing is persisted
    #[arg(long, global = true)]
    pub ephemeral: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive shell (default)
    Shell,
    /// Run one command line and print its output
    Run {
        /// Do not launch a browser or mail client; print the URL instead
        #[arg(long)]
        no_open: bool,
        /// The command line, e.g. `read sqli-basics`
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        line: Vec<String>,
    },
    /// List built-in themes, marking the current one
    Themes,
    /// List writeup categories
    Categories,
    /// List writeups, optionally in one category
    Writeups { category: Option<String> },
    /// Inspect or change the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the config file location
    Path,
    /// Print every key and its value
    Show,
    /// Set a key
    Set {
        key: String,
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Remove a key, restoring its default
    Unset { key: String },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let paths = ProjectPaths::discover()?;
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| paths.config_file.clone());

    let log_file = args.log.clone().unwrap_or_else(|| paths.log_file());
    if let Err(err) = init_logging(&log_file) {
        eprintln!("⚠️  Logging disabled: {err}");
    }

    match args.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let config = Config::load_from_path(&config_path)?;
            let session = build_session(&paths, config, args.ephemeral, Arc::new(SystemOpener))?;
            run_shell(Shell::new(session)).await
        }
        Commands::Run { no_open, line } => {
            run_line(&paths, &config_path, args.ephemeral, no_open, &line.join(" ")).await
        }
        Commands::Themes => {
            let config = Config::load_from_path(&config_path)?;
            let storage = open_storage(&paths, args.ephemeral);
            let store = ThemeStore::restore(storage, fallback_theme(&config));
            list_themes(store.get());
            Ok(())
        }
        Commands::Categories => {
            run_line(&paths, &config_path, args.ephemeral, true, "categories").await
        }
        Commands::Writeups { category } => {
            let line = match category {
                Some(category) => format!("writeups {category}"),
                None => "writeups".to_string(),
            };
            run_line(&paths, &config_path, args.ephemeral, true, &line).await
        }
        Commands::Config { action } => handle_config(&config_path, action),
    }
}

async fn run_line(
    paths: &ProjectPaths,
    config_path: &Path,
    ephemeral: bool,
    no_open: bool,
    line: &str,
) -> Result<(), Box<dyn Error>> {
    let config = Config::load_from_path(config_path)?;
    let recorder = Arc::new(RecordingOpener::new());
    let opener: Arc<dyn UrlOpener> = if no_open {
        recorder.clone()
    } else {
        Arc::new(SystemOpener)
    };

    let mut shell = Shell::new(build_session(paths, config, ephemeral, opener)?);
    let output = shell.execute(line).await;
    let text = output.to_terminal_text();
    if !text.is_empty() {
        println!("{text}");
    }
    for url in recorder.opened() {
        println!("→ {url}");
    }
    Ok(())
}

fn handle_config(config_path: &Path, action: ConfigAction) -> Result<(), Box<dyn Error>> {
    match action {
        ConfigAction::Path => {
            println!("{}", path_display(config_path));
        }
        ConfigAction::Show => {
            Config::load_from_path(config_path)?.print_all();
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_from_path(config_path)?;
            let value = value.join(" ");
            if let Err(message) = config.set_value(&key, &value) {
                eprintln!("❌ {message}");
                std::process::exit(1);
            }
            config.save_to_path(config_path)?;
            println!("✅ Set {key} to: {value}");
        }
        ConfigAction::Unset { key } => {
            let mut config = Config::load_from_path(config_path)?;
            if let Err(message) = config.unset_value(&key) {
                eprintln!("❌ {message}");
                std::process::exit(1);
            }
            config.save_to_path(config_path)?;
            println!("✅ Unset {key}");
        }
    }
    Ok(())
}

fn open_storage(paths: &ProjectPaths, ephemeral: bool) -> Arc<dyn KeyValueStore> {
    if ephemeral {
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(FileStore::new(paths.storage_dir()))
    }
}

/// The configured default theme, or the built-in default.
pub fn fallback_theme(config: &Config) -> Theme {
    match config.default_theme.as_deref() {
        Some(name) => find_builtin_theme(name).unwrap_or_else(|| {
            warn!(theme = name, "Configured default theme not found");
            Theme::default_theme()
        }),
        None => Theme::default_theme(),
    }
}

/// Where writeup bodies come from when `content-base` is not configured:
/// `./content` if present, otherwise the data directory.
fn default_content_dir(paths: &ProjectPaths) -> PathBuf {
    let local = PathBuf::from(LOCAL_CONTENT_DIR);
    if local.is_dir() {
        local
    } else {
        paths.content_dir()
    }
}

fn build_session(
    paths: &ProjectPaths,
    config: Config,
    ephemeral: bool,
    opener: Arc<dyn UrlOpener>,
) -> Result<Session, Box<dyn Error>> {
    let theme = ThemeStore::restore(open_storage(paths, ephemeral), fallback_theme(&config));
    let fetcher = Arc::new(HttpFetcher::new(config.request_timeout())?);
    let content_base = config.content_base_or(&default_content_dir(paths));
    Ok(Session::new(config, theme, fetcher, opener, content_base))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_shell() {
        let args = Args::try_parse_from(["termblog"]).unwrap();
        assert!(args.command.is_none());
        assert!(!args.ephemeral);
    }

    #[test]
    fn run_collects_the_whole_line() {
        let args =
            Args::try_parse_from(["termblog", "--ephemeral", "run", "echo", "-n", "hi"]).unwrap();
        assert!(args.ephemeral);
        match args.command {
            Some(Commands::Run { no_open, line }) => {
                assert!(!no_open);
                assert_eq!(line, vec!["echo", "-n", "hi"]);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn run_requires_a_line() {
        assert!(Args::try_parse_from(["termblog", "run"]).is_err());
    }

    #[test]
    fn config_set_joins_value_words() {
        let args =
            Args::try_parse_from(["termblog", "config", "set", "username", "neo"]).unwrap();
        match args.command {
            Some(Commands::Config {
                action: ConfigAction::Set { key, value },
            }) => {
                assert_eq!(key, "username");
                assert_eq!(value.join(" "), "neo");
            }
            _ => panic!("expected config set"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "termblog",
            "writeups",
            "web",
            "--config",
            "/tmp/c.toml",
            "--log",
            "/tmp/t.log",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/tmp/c.toml")));
        assert_eq!(args.log, Some(PathBuf::from("/tmp/t.log")));
        assert!(matches!(
            args.command,
            Some(Commands::Writeups { category: Some(ref c) }) if c == "web"
        ));
    }

    #[test]
    fn fallback_theme_honours_config() {
        let config = Config {
            default_theme: Some("nord".to_string()),
            ..Config::default()
        };
        assert_eq!(fallback_theme(&config).name, "Nord");

        let config = Config {
            default_theme: Some("no-such-theme".to_string()),
            ..Config::default()
        };
        assert_eq!(fallback_theme(&config).name, "HackTheBox");
        assert_eq!(fallback_theme(&Config::default()).name, "HackTheBox");
    }
}
