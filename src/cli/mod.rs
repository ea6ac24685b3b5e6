//! The `counterdesk` command line.

pub mod args;
pub mod commands;

pub use args::{BulkArgs, Cli, Commands, ListArgs, SessionArgs};
pub use commands::{render_pagination, run};
