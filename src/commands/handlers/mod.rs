pub(super) mod core;
pub(super) mod links;
pub(super) mod net;
pub(super) mod theme;
pub(super) mod writeups;

use crate::commands::registry::Command;
use crate::core::output::CommandOutput;

pub(super) fn usage(text: &'static str) -> CommandOutput {
    CommandOutput::text(text)
}

/// Built-in commands in the order `help` lists them.
pub(super) fn builtin_commands() -> Vec<Command> {
    vec![
        Command::sync("help", "List available commands.", core::handle_help),
        Command::sync("hostname", "Print the host name.", core::handle_hostname),
        Command::sync("whoami", "Print the current user.", core::handle_whoami),
        Command::sync("date", "Print the local date and time.", core::handle_date),
        Command::sync("vi", "Open the vi editor.", core::handle_vi),
        Command::sync("vim", "Open the vim editor.", core::handle_vim),
        Command::sync("emacs", "Open the emacs editor.", core::handle_emacs),
        Command::sync("echo", "Print the arguments.", core::handle_echo),
        Command::sync("sudo", "Run a command as root.", links::handle_sudo),
        Command::sync("theme", "List or switch colour schemes.", theme::handle_theme),
        Command::sync("repo", "Open the source repository.", links::handle_repo),
        Command::sync("clear", "Clear the terminal.", core::handle_clear),
        Command::sync("email", "Send me an email.", links::handle_email),
        Command::new("weather", "Show the weather for a city.", net::WeatherCommand),
        Command::sync("exit", "Leave the terminal.", core::handle_exit),
        Command::new("curl", "Fetch a URL and print the body.", net::CurlCommand),
        Command::sync("banner", "Show the welcome banner.", core::handle_banner),
        Command::sync("writeups", "List writeups, optionally by category.", writeups::handle_writeups),
        Command::sync("categories", "List writeup categories.", writeups::handle_categories),
        Command::new("read", "Read a writeup by id.", writeups::ReadCommand),
    ]
}
