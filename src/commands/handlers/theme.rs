use super::usage;
use crate::commands::registry::CommandInvocation;
use crate::core::output::CommandOutput;
use crate::core::session::Session;
use crate::core::theme::{builtin_themes, find_builtin_theme};
use crate::utils::url::join_url;
use tracing::warn;

const THEME_PREVIEW_PATH: &str = "tree/master/docs/themes";

const USAGE_THEME: &str = "Usage: theme [args].
    [args]:
      ls: list all available themes
      set: set theme to [theme]

    [Examples]:
      theme ls
      theme set gruvboxdark";

pub(crate) fn handle_theme(session: &mut Session, invocation: CommandInvocation<'_>) -> CommandOutput {
    match invocation.arg(0) {
        Some("ls") => list_themes(session),
        Some("set") if invocation.args_len() == 2 => {
            let name = invocation.arg(1).unwrap_or_default();
            set_theme(session, name)
        }
        _ => usage(USAGE_THEME),
    }
}

fn list_themes(session: &Session) -> CommandOutput {
    let names: Vec<String> = builtin_themes()
        .iter()
        .map(|t| t.name.to_lowercase())
        .collect();
    CommandOutput::text(format!(
        "{}\n\nYou can preview all these themes here: {}\nCurrent theme: {}",
        names.join(", "),
        join_url(session.config.repository(), THEME_PREVIEW_PATH),
        session.theme.get().name.to_lowercase()
    ))
}

fn set_theme(session: &mut Session, name: &str) -> CommandOutput {
    let Some(theme) = find_builtin_theme(name) else {
        return CommandOutput::text(format!(
            "Theme '{name}' not found. Try 'theme ls' to see all available themes."
        ));
    };

    match session.theme.set(theme) {
        Ok(()) => CommandOutput::text(format!("Theme set to {name}")),
        Err(err) => {
            warn!(error = %err, "Theme applied but not persisted");
            CommandOutput::text(format!("Theme set to {name} (unsaved: {err})"))
        }
    }
}
