use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Turn a casual sentence into a task log (default).
    Log(LogArgs),
    /// Resolve a topic to its parent task without logging anything.
    Resolve(ResolveArgs),
    /// Show the canonical topic table.
    Topics,
}

/// Arguments for `jot log`.
#[derive(Clone, Debug, Default, Args)]
pub struct LogArgs {
    /// What you did. Prompted for when omitted.
    pub text: Vec<String>,
}

impl LogArgs {
    /// Words joined back into one sentence, `None` when nothing was given.
    #[must_use]
    pub fn sentence(&self) -> Option<String> {
        let sentence = self.text.join(" ");
        (!sentence.trim().is_empty()).then_some(sentence)
    }
}

/// Arguments for `jot resolve`.
#[derive(Clone, Debug, Args)]
pub struct ResolveArgs {
    /// Topic to match against parent tasks.
    pub topic: String,
}
