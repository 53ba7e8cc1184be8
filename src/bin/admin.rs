//! CLI administration tool for linkcut.
//!
//! Manages accounts, shows statistics and checks the database without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List accounts
//! cargo run --bin admin -- user list
//!
//! # Create an account (password is prompted)
//! cargo run --bin admin -- user create --username bob --email bob@x.com
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or the `DB_*` components, as for the server
//! - `JWT_SECRET` is not needed

use linkcut::api::dto::auth::RegisterRequest;
use linkcut::application::services::{AuthService, TokenService};
use linkcut::config::Config;
use linkcut::domain::repositories::{LinkRepository, UserRepository};
use linkcut::error::AppError;
use linkcut::infrastructure::persistence::{PgLinkRepository, PgUserRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

/// CLI tool for managing linkcut.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List all users
    List,

    /// Create a user
    Create {
        #[arg(short, long)]
        username: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;
    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    let pool = Arc::new(pool);

    match cli.command {
        Commands::User { action } => handle_user_action(action, pool).await?,
        Commands::Stats => handle_stats(pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_user_action(action: UserAction, pool: Arc<PgPool>) -> Result<()> {
    let users = Arc::new(PgUserRepository::new(pool));

    match action {
        UserAction::List => list_users(users).await,
        UserAction::Create {
            username,
            email,
            yes,
        } => create_user(users, username, email, yes).await,
    }
}

/// Lists all accounts.
///
/// # Output Format
///
/// ```text
/// Users
///
///   ID  Username             Email                          Created
///   ---------------------------------------------------------------------------
///   1   bob                  bob@x.com                      2024-01-15 10:30
/// ```
async fn list_users(users: Arc<PgUserRepository>) -> Result<()> {
    println!("{}", "Users".bright_blue().bold());
    println!();

    let all = users
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if all.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<5} {:<20} {:<30} {}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Email".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "-".repeat(75).bright_black());

    for user in &all {
        println!(
            "  {:<5} {:<20} {:<30} {}",
            user.id.to_string().bright_black(),
            user.username.cyan(),
            user.email,
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!("  Total: {}", all.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Creates an account through the same path as `POST /api/register`.
async fn create_user(
    users: Arc<PgUserRepository>,
    username: Option<String>,
    email: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Create User".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };
    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;

    let request = validated_registration(username, email, password)?;

    if !skip_confirm {
        println!();
        println!("  Username: {}", request.username.cyan());
        println!("  Email:    {}", request.email.cyan());
        println!();

        let confirmed = Confirm::new()
            .with_prompt("Create this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    // Token issuing is unused here; the secret only has to be non-empty.
    let tokens = Arc::new(TokenService::new("admin-cli", 1));
    let auth = AuthService::new(users, tokens);

    let user = auth
        .register(&request.username, &request.email, &request.password)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!(
        "{} (id {})",
        "User created successfully!".green().bold(),
        user.id.to_string().bright_white()
    );
    println!();

    Ok(())
}

/// Applies the `POST /api/register` rules: trimmed fields, all required, email shape.
fn validated_registration(
    username: String,
    email: String,
    password: String,
) -> Result<RegisterRequest> {
    let request = RegisterRequest {
        username,
        email,
        password,
    }
    .normalized();

    request
        .validate()
        .map_err(|e| anyhow::anyhow!("{}", AppError::from(e)))?;

    Ok(request)
}

/// Displays system statistics: users, links and total clicks.
async fn handle_stats(pool: Arc<PgPool>) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let users = PgUserRepository::new(pool.clone());
    let links = PgLinkRepository::new(pool);

    let users_count = users
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count users: {}", e))?;
    let links_count = links
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;
    let clicks_count = links
        .total_clicks()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to sum clicks: {}", e))?;

    println!(
        "  Users:  {}",
        users_count.to_string().bright_green().bold()
    );
    println!(
        "  Links:  {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Clicks: {}",
        clicks_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success")
                    .fetch_one(pool)
                    .await
                    .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Applied migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
