use crate::commands::{self, CommandRegistry};
use crate::core::output::CommandOutput;
use crate::core::session::Session;

/// The dispatcher: a command registry bound to the session it acts on.
///
/// `execute` takes `&mut self`, so one line always finishes, history
/// included, before the next one starts.
pub struct Shell {
    registry: CommandRegistry,
    pub session: Session,
}

impl Shell {
    pub fn new(session: Session) -> Self {
        Self::with_registry(CommandRegistry::builtin(), session)
    }

    pub fn with_registry(registry: CommandRegistry, session: Session) -> Self {
        Self { registry, session }
    }

    pub async fn execute(&mut self, line: &str) -> CommandOutput {
        commands::process_input(&self.registry, &mut self.session, line).await
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Complete a partially typed command name. Returns the common prefix of
    /// all matches and the matches themselves.
    pub fn complete(&self, partial: &str) -> (String, Vec<&'static str>) {
        let matches = self.registry.matching(partial);
        let Some(first) = matches.first() else {
            return (partial.to_string(), matches);
        };
        let mut common = first.to_string();
        for name in &matches[1..] {
            let shared = common
                .chars()
                .zip(name.chars())
                .take_while(|(a, b)| a == b)
                .count();
            common = common.chars().take(shared).collect();
        }
        (common, matches)
    }
}
