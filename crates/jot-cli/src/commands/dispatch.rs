use jot_config::JotConfig;

use crate::cli::{Commands, GlobalFlags};
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: &JotConfig,
    flags: GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Log(args) => commands::log::handle(&args, config, flags).await,
        Commands::Resolve(args) => commands::resolve::handle(&args, config, flags).await,
        Commands::Topics => commands::topics::handle(config, flags),
    }
}
