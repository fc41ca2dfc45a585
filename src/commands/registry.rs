use crate::core::output::CommandOutput;
use crate::core::session::Session;
use async_trait::async_trait;

/// A command body. Every command, fast or slow, is awaited through this one
/// entry point.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn run(&self, session: &mut Session, invocation: CommandInvocation<'_>) -> CommandOutput;
}

pub type SyncHandler = fn(&mut Session, CommandInvocation<'_>) -> CommandOutput;

struct SyncCommand(SyncHandler);

#[async_trait]
impl CommandHandler for SyncCommand {
    async fn run(&self, session: &mut Session, invocation: CommandInvocation<'_>) -> CommandOutput {
        (self.0)(session, invocation)
    }
}

pub struct Command {
    pub name: &'static str,
    pub help: &'static str,
    handler: Box<dyn CommandHandler>,
}

impl Command {
    pub fn new(name: &'static str, help: &'static str, handler: impl CommandHandler + 'static) -> Self {
        Self {
            name,
            help,
            handler: Box::new(handler),
        }
    }

    pub fn sync(name: &'static str, help: &'static str, handler: SyncHandler) -> Self {
        Self::new(name, help, SyncCommand(handler))
    }

    pub async fn run(&self, session: &mut Session, invocation: CommandInvocation<'_>) -> CommandOutput {
        self.handler.run(session, invocation).await
    }
}

#[derive(Clone, Copy)]
pub struct CommandInvocation<'a> {
    /// The full line as typed, trimmed.
    pub input: &'a str,
    pub name: &'a str,
    pub args: &'a [&'a str],
    pub registry: &'a CommandRegistry,
}

impl<'a> CommandInvocation<'a> {
    pub fn arg(&self, index: usize) -> Option<&'a str> {
        self.args.get(index).copied()
    }

    pub fn args_len(&self) -> usize {
        self.args.len()
    }

    /// Arguments re-joined with single spaces.
    pub fn args_text(&self) -> String {
        self.args.join(" ")
    }
}

/// Commands in registration order. Lookup is by exact, case-sensitive name.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for command in super::handlers::builtin_commands() {
            registry.register(command);
        }
        registry
    }

    /// Add a command. A command with the same name is replaced in place so
    /// `help` keeps its original position.
    pub fn register(&mut self, command: Command) {
        match self.commands.iter_mut().find(|c| c.name == command.name) {
            Some(existing) => *existing = command,
            None => self.commands.push(command),
        }
    }

    pub fn find(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|command| command.name == name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.commands.iter().map(|c| c.name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Names starting with `prefix`, for tab completion.
    pub fn matching(&self, prefix: &str) -> Vec<&'static str> {
        self.commands
            .iter()
            .map(|c| c.name)
            .filter(|name| name.starts_with(prefix))
            .collect()
    }
}
