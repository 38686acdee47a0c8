//! Static strategy pattern for CLI commands.
//!
//! Each subcommand is a separate strategy type with its own input, dispatched
//! statically from `main`.

use valuta_config::Config;
use valuta_storage::JsonFileLog;

mod history;
mod info;
mod init;
mod run;
mod version;

pub use history::HistoryStrategy;
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use run::{RunInput, RunStrategy};
pub use version::VersionStrategy;

/// Conversion log at the configured (or default) location.
fn open_conversion_log(config: &Config) -> anyhow::Result<JsonFileLog> {
    Ok(JsonFileLog::new(config.history.resolve_path()?))
}

/// Core trait defining the contract for all command strategies.
///
/// # Design Principles
/// - **Static dispatch**: All calls are monomorphized at compile time
/// - **Type safety**: Each strategy defines its own input type via associated type
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}
