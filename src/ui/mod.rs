//! Terminal UI layer.
//!
//! - [`shell_loop`]: the event loop that feeds input lines to
//!   [`crate::core::shell::Shell`] and redraws as results arrive.
//! - [`render`] and [`theme`]: frame composition and color policy.
//! - [`markdown`]: the text transform applied to writeup bodies, also used by
//!   the non-interactive `run` subcommand.
//! - [`terminal`]: raw mode, alternate screen and cursor color.
//!
//! This layer presents state; [`crate::core`] owns it.

pub mod markdown;
pub mod render;
pub mod shell_loop;
pub mod terminal;
pub mod theme;
