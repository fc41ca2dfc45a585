mod handlers;
mod registry;

pub use registry::{Command, CommandHandler, CommandInvocation, CommandRegistry, SyncHandler};

use crate::core::history::HistoryEntry;
use crate::core::output::CommandOutput;
use crate::core::session::Session;
use tracing::debug;

/// Run one input line: tokenize on whitespace, look the first token up,
/// await the handler and record the result in the session history.
///
/// Nothing here can fail: unknown commands and handler-level problems all
/// come back as ordinary output. If the handler cleared the history, the
/// line itself is not recorded.
pub async fn process_input(
    registry: &CommandRegistry,
    session: &mut Session,
    input: &str,
) -> CommandOutput {
    let trimmed = input.trim();
    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    let generation = session.history.generation();

    let output = match tokens.split_first() {
        None => CommandOutput::empty(),
        Some((&name, args)) => match registry.find(name) {
            Some(command) => {
                debug!(command = command.name, args = args.len(), "Dispatching command");
                let invocation = CommandInvocation {
                    input: trimmed,
                    name,
                    args,
                    registry,
                };
                command.run(session, invocation).await
            }
            None => {
                debug!(command = name, "Unknown command");
                command_not_found(name)
            }
        },
    };

    if session.history.generation() == generation {
        session.history.push(HistoryEntry {
            command: trimmed.to_string(),
            output: output.clone(),
        });
    }
    output
}

pub fn command_not_found(name: &str) -> CommandOutput {
    CommandOutput::text(format!(
        "{name}: command not found. Type 'help' to see list of available commands."
    ))
}
