//! termblog is a terminal-style blog for reading security writeups.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the session state: configuration, the persisted theme,
//!   command history, the writeup catalog and the fetch/open collaborators.
//! - [`commands`] holds the command registry, the built-in commands and the
//!   dispatcher that runs one input line against a session.
//! - [`ui`] renders the interactive shell and runs its event loop, and
//!   provides the markdown-to-terminal transform.
//! - [`utils`] collects small helpers (URLs, colors, logging setup).
//!
//! The binary (`src/main.rs`) routes through [`crate::cli::main`], which
//! builds a [`core::session::Session`] and either starts
//! [`ui::shell_loop::run_shell`] or runs a single line non-interactively.

pub mod cli;
pub mod commands;
pub mod core;
pub mod ui;
pub mod utils;
