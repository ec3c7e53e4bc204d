//! CLI argument definitions and subcommand routing.

pub mod config;
pub mod resource;

use clap::{ArgGroup, Parser, Subcommand};

/// Command-line client for the Layer Platform API.
///
/// Connection settings come from a saved profile (see `layer init`),
/// overridden by flags and `LAYER_API_*` environment variables.
#[derive(Parser)]
#[command(name = "layer", version, about)]
pub struct Cli {
    /// Profile to read settings from.
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Platform API token.
    #[arg(long, env = "LAYER_API_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Application ID (UUID or `layer:///apps/<env>/<uuid>`).
    #[arg(long, env = "LAYER_API_APP_ID", global = true)]
    pub app_id: Option<String>,

    /// API version sent in the `Accept` header.
    #[arg(long, global = true)]
    pub api_version: Option<String>,

    /// Override the API URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Log response statuses and request errors to stderr.
    #[arg(long, env = "LAYER_API_DEBUG", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Save the current token, app ID and options to the profile.
    Init,
    /// Show the resolved settings (token redacted).
    Show,
    /// Conversation operations.
    #[command(subcommand)]
    Conversation(ConversationCmd),
    /// Message operations.
    #[command(subcommand)]
    Message(MessageCmd),
    /// Send an announcement.
    Announce(AnnounceArgs),
    /// Block list operations.
    #[command(subcommand)]
    Block(BlockCmd),
    /// Identity operations.
    #[command(subcommand)]
    Identity(IdentityCmd),
    /// Badge operations.
    #[command(subcommand)]
    Badge(BadgeCmd),
}

#[derive(Subcommand)]
pub enum ConversationCmd {
    /// Retrieve a conversation.
    Get {
        /// Conversation ID.
        id: String,
        /// Retrieve as seen by this user.
        #[arg(long)]
        user: Option<String>,
    },
    /// Create a conversation.
    Create {
        /// Participant user IDs.
        #[arg(required = true)]
        participants: Vec<String>,
        /// Reuse an existing conversation with the same participants.
        #[arg(long)]
        distinct: bool,
        /// De-duplication UUID.
        #[arg(long)]
        dedupe: Option<String>,
    },
    /// List a user's conversations.
    #[command(alias = "ls")]
    List {
        /// User ID.
        user: String,
        #[arg(long)]
        page_size: Option<u32>,
        #[arg(long)]
        from_id: Option<String>,
        #[arg(long)]
        sort_by: Option<String>,
    },
    /// Add participants.
    Add {
        id: String,
        #[arg(required = true)]
        users: Vec<String>,
    },
    /// Remove participants.
    Remove {
        id: String,
        #[arg(required = true)]
        users: Vec<String>,
    },
    /// Delete a conversation.
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum MessageCmd {
    /// Send a plain-text message.
    #[command(group(ArgGroup::new("sender").required(true).args(["user", "name"])))]
    Send {
        /// Conversation ID.
        conversation: String,
        /// Message text.
        text: String,
        /// Send on behalf of this user ID.
        #[arg(long)]
        user: Option<String>,
        /// Send from this system sender name.
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(clap::Args)]
pub struct AnnounceArgs {
    /// Announcement text.
    pub text: String,
    /// Recipient user IDs.
    #[arg(long = "to", required = true)]
    pub recipients: Vec<String>,
    /// Sender name.
    #[arg(long)]
    pub name: String,
    /// De-duplication UUID.
    #[arg(long)]
    pub dedupe: Option<String>,
}

#[derive(Subcommand)]
pub enum BlockCmd {
    /// Show a user's block list.
    #[command(alias = "ls")]
    List { owner: String },
    /// Block a user.
    Add { owner: String, user: String },
    /// Unblock a user.
    #[command(alias = "rm")]
    Remove { owner: String, user: String },
}

#[derive(Subcommand)]
pub enum IdentityCmd {
    /// Retrieve an identity.
    Get { user: String },
    /// Create an identity.
    Create {
        user: String,
        #[arg(long)]
        display_name: String,
    },
    /// Delete an identity.
    #[command(alias = "rm")]
    Delete { user: String },
}

#[derive(Subcommand)]
pub enum BadgeCmd {
    /// Retrieve a user's badge.
    Get { user: String },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn message_send_requires_a_sender() {
        let err = Cli::try_parse_from(["layer", "message", "send", "cid", "hi"]);
        assert!(err.is_err());
        let ok = Cli::try_parse_from(["layer", "message", "send", "cid", "hi", "--user", "u1"]);
        assert!(ok.is_ok());
    }
}
