use crate::commands::registry::CommandInvocation;
use crate::core::output::CommandOutput;
use crate::core::session::Session;

fn with_launch_note(session: &Session, url: &str, message: String) -> CommandOutput {
    if session.open_url(url) {
        CommandOutput::text(message)
    } else {
        CommandOutput::text(format!(
            "{message}\nCould not launch a handler; visit {url} manually."
        ))
    }
}

/// Always denied. The configured page is opened as a consolation prize.
pub(crate) fn handle_sudo(session: &mut Session, invocation: CommandInvocation<'_>) -> CommandOutput {
    session.open_url(session.config.sudo_url());
    CommandOutput::text(format!(
        "Permission denied: unable to run the command '{}' as root.",
        invocation.arg(0).unwrap_or_default()
    ))
}

pub(crate) fn handle_repo(session: &mut Session, _invocation: CommandInvocation<'_>) -> CommandOutput {
    let url = session.config.repository().to_string();
    with_launch_note(session, &url, "Opening repository...".to_string())
}

pub(crate) fn handle_email(session: &mut Session, _invocation: CommandInvocation<'_>) -> CommandOutput {
    let url = format!("mailto:{}", session.config.email());
    let message = format!("Opening {url}...");
    with_launch_note(session, &url, message)
}
