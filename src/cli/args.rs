use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use counterdesk_auth::{BranchRef, Role, SessionContext, User};
use counterdesk_models::{SortOrder, StatusTransition};

#[derive(Parser, Debug)]
#[command(name = "counterdesk")]
#[command(about = "Counterdesk CLI - permission checks and collection queries", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the permission catalog
    Permissions {
        /// Only print this module
        #[arg(short = 'm', long)]
        module: Option<String>,
    },
    /// Decide a permission for the given session
    Can {
        /// Permission identifier, e.g. edit_branch
        permission: String,

        #[command(flatten)]
        session: SessionArgs,
    },
    /// Fetch one page of a collection
    List(ListArgs),
    /// Apply a status transition to records
    Bulk(BulkArgs),
}

/// Describes the acting user.
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Act as an administrator
    #[arg(long)]
    pub admin: bool,

    /// JSON file holding the user's role
    #[arg(long)]
    pub role_file: Option<PathBuf>,

    /// Branch the user operates in
    #[arg(long)]
    pub branch: Option<String>,
}

impl SessionArgs {
    /// Builds the session these flags describe.
    pub fn load(&self) -> anyhow::Result<SessionContext> {
        let role = match &self.role_file {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read role file {}", path.display()))?;
                let role: Role = serde_json::from_str(&raw)
                    .with_context(|| format!("Invalid role file {}", path.display()))?;
                Some(role)
            }
            None => None,
        };

        let user = User {
            role,
            branch: self.branch.as_deref().map(|id| BranchRef::new(id, id)),
            is_administrator: self.admin,
        };
        Ok(SessionContext::authenticated(user))
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Permission module the collection belongs to, e.g. sale
    pub module: String,

    /// Collection name (defaults to the module name)
    #[arg(long)]
    pub schema: Option<String>,

    /// View to show, e.g. active, deleted or all
    #[arg(short = 'c', long, default_value = "")]
    pub condition: String,

    #[arg(short = 's', long, default_value = "createdAt")]
    pub sort: String,

    /// asc or desc
    #[arg(short = 'o', long, default_value = "desc")]
    pub order: SortOrder,

    #[arg(short = 'p', long, default_value_t = 1)]
    pub page: u64,

    #[arg(short = 'l', long)]
    pub limit: Option<u64>,

    /// Free-text search keyword
    #[arg(long)]
    pub search: Option<String>,

    /// Fields the search keyword is matched against
    #[arg(long, value_delimiter = ',', default_value = "name")]
    pub search_fields: Vec<String>,

    /// Ask the store to join foreign keys
    #[arg(long)]
    pub join: bool,

    /// Only return these fields
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,

    #[command(flatten)]
    pub session: SessionArgs,
}

#[derive(Args, Debug)]
pub struct BulkArgs {
    /// Permission module the collection belongs to, e.g. sale
    pub module: String,

    /// deleted, restored, canceled, enabled, disabled, available or completed
    pub status: StatusTransition,

    /// Record ids, comma separated
    #[arg(long, value_delimiter = ',', required = true)]
    pub ids: Vec<String>,

    /// Collection name (defaults to the module name)
    #[arg(long)]
    pub schema: Option<String>,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,

    #[command(flatten)]
    pub session: SessionArgs,
}
