//! `marketplace-app token ...`: API tokens for bearer authentication.

use clap::{Args, Subcommand};
use marketplace_app::auth::PgAuthService;

mod create;
mod list;
mod revoke;

#[derive(Debug, Args)]
pub(crate) struct TokenCommand {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Debug, Subcommand)]
enum TokenSubcommand {
    /// Issue a new token for a user; the raw token is printed once
    Create(create::CreateTokenArgs),

    /// Show every token of a user, revoked ones included
    List(list::ListTokensArgs),

    /// Revoke a token so it no longer authenticates
    Revoke(revoke::RevokeTokenArgs),
}

pub(crate) async fn run(command: TokenCommand) -> Result<(), String> {
    let database_url = command
        .database_url
        .ok_or("--database-url or DATABASE_URL is required")?;

    let auth = PgAuthService::new(super::connect(&database_url).await?);

    match command.command {
        TokenSubcommand::Create(args) => create::run(&auth, args).await,
        TokenSubcommand::List(args) => list::run(&auth, args).await,
        TokenSubcommand::Revoke(args) => revoke::run(&auth, args).await,
    }
}
