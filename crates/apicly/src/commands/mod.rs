//! Command dispatch: bridges CLI args -> core workflows -> output formatting.

pub mod config_cmd;
pub mod device;
pub mod ip;
pub mod licenses;
pub mod util;

use apicly_core::Session;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a controller-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Ip(args) => ip::handle(session, args, global).await,
        Command::Device(args) => device::handle(session, args, global).await,
        Command::Licenses(args) => licenses::handle(session, args, global).await,
        // Config and Completions are handled before a session is acquired
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
