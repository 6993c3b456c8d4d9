//! Operator commands: apply migrations and create administrator accounts.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::runtime::Builder;
use tracing_subscriber::{EnvFilter, fmt};

use vidensbank::domain::{AccountService, EmailAddress, PASSWORD_MIN, Role, Username};
use vidensbank::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, run_pending_migrations,
};
use vidensbank::outbound::security::Argon2PasswordHasher;
use vidensbank::server::normalise_database_url;

/// `vidensbank-manage` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "vidensbank-manage",
    about = "Database maintenance for Vidensbank",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url", global = true)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Apply pending schema migrations.
    Migrate,
    /// Create an account with the admin role.
    CreateAdmin {
        #[arg(long, value_name = "name")]
        username: String,
        #[arg(long, value_name = "address")]
        email: String,
        #[arg(long, value_name = "secret")]
        password: String,
    },
}

fn main() -> io::Result<()> {
    let _ = fmt().with_env_filter(EnvFilter::from_default_env()).try_init();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let database_url = resolve_database_url(args.database_url)?;

    match args.command {
        Command::Migrate => {
            let applied = run_pending_migrations(&database_url)
                .await
                .map_err(|error| io::Error::other(format!("migrate: {error}")))?;
            println!("applied={}", applied.len());
        }
        Command::CreateAdmin {
            username,
            email,
            password,
        } => {
            let username = Username::new(&username).map_err(invalid_input)?;
            let email = EmailAddress::new(&email).map_err(invalid_input)?;
            if password.chars().count() < PASSWORD_MIN {
                return Err(invalid_input(format!(
                    "password must be at least {PASSWORD_MIN} characters"
                )));
            }

            run_pending_migrations(&database_url)
                .await
                .map_err(|error| io::Error::other(format!("migrate: {error}")))?;
            let pool = DbPool::new(PoolConfig::new(&database_url))
                .await
                .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;
            let accounts = AccountService::new(
                Arc::new(DieselUserRepository::new(pool)),
                Arc::new(Argon2PasswordHasher::new()),
            );
            let user = accounts
                .create_account(&username, &email, &password, Role::Admin)
                .await
                .map_err(|error| io::Error::other(format!("create admin: {}", error.message())))?;
            println!("user_id={}", user.id());
            println!("username={}", user.username());
        }
    }
    Ok(())
}

fn resolve_database_url(cli: Option<String>) -> io::Result<String> {
    cli.or_else(|| env::var("DATABASE_URL").ok())
        .map(|url| url.trim().to_owned())
        .filter(|url| !url.is_empty())
        .map(|url| normalise_database_url(&url))
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "database URL required: pass --database-url or set DATABASE_URL",
            )
        })
}

fn invalid_input(error: impl ToString) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, error.to_string())
}
