use crate::commands::command_not_found;
use crate::commands::registry::CommandInvocation;
use crate::core::output::CommandOutput;
use crate::core::session::Session;

pub(crate) const BANNER: &str = r"
 _                       _     _
| |_ ___ _ __ _ __ ___ | |__ | | ___   __ _
| __/ _ \ '__| '_ ` _ \| '_ \| |/ _ \ / _` |
| ||  __/ |  | | | | | | |_) | | (_) | (_| |
 \__\___|_|  |_| |_| |_|_.__/|_|\___/ \__, |
                                      |___/
";

/// `help` lists every command; `help <name>` describes one.
pub(crate) fn handle_help(_session: &mut Session, invocation: CommandInvocation<'_>) -> CommandOutput {
    if let Some(name) = invocation.arg(0) {
        return match invocation.registry.find(name) {
            Some(command) => CommandOutput::text(format!("{} - {}", command.name, command.help)),
            None => command_not_found(name),
        };
    }
    CommandOutput::text(format!(
        "Available commands: {}",
        invocation.registry.names().join(", ")
    ))
}

pub(crate) fn handle_hostname(session: &mut Session, _invocation: CommandInvocation<'_>) -> CommandOutput {
    CommandOutput::text(session.config.hostname())
}

pub(crate) fn handle_whoami(session: &mut Session, _invocation: CommandInvocation<'_>) -> CommandOutput {
    CommandOutput::text(session.config.username())
}

pub(crate) fn handle_date(_session: &mut Session, _invocation: CommandInvocation<'_>) -> CommandOutput {
    CommandOutput::text(
        chrono::Local::now()
            .format("%a %b %e %H:%M:%S %Z %Y")
            .to_string(),
    )
}

pub(crate) fn handle_vi(_session: &mut Session, _invocation: CommandInvocation<'_>) -> CommandOutput {
    CommandOutput::text("why use vi? try 'emacs'")
}

pub(crate) fn handle_vim(_session: &mut Session, _invocation: CommandInvocation<'_>) -> CommandOutput {
    CommandOutput::text("why use vim? try 'emacs'")
}

pub(crate) fn handle_emacs(_session: &mut Session, _invocation: CommandInvocation<'_>) -> CommandOutput {
    CommandOutput::text("why use emacs? try 'vim'")
}

pub(crate) fn handle_echo(_session: &mut Session, invocation: CommandInvocation<'_>) -> CommandOutput {
    CommandOutput::text(invocation.args_text())
}

pub(crate) fn handle_clear(session: &mut Session, _invocation: CommandInvocation<'_>) -> CommandOutput {
    session.history.clear();
    CommandOutput::empty()
}

pub(crate) fn handle_exit(session: &mut Session, _invocation: CommandInvocation<'_>) -> CommandOutput {
    session.request_exit();
    CommandOutput::text("logout")
}

pub(crate) fn handle_banner(session: &mut Session, _invocation: CommandInvocation<'_>) -> CommandOutput {
    CommandOutput::text(format!(
        "{}\nWelcome to {}'s writeup terminal.\n\nType 'help' to see list of available commands.",
        BANNER.trim_start_matches('\n'),
        session.config.hostname()
    ))
}
