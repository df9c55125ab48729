//! CLI administration tool for todo-api.
//!
//! Provides commands for managing users and API tokens, viewing statistics,
//! and performing database operations without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create a user
//! cargo run --bin admin -- user create --username alice
//!
//! # Issue an extra token for a user
//! cargo run --bin admin -- token issue alice --name "CI"
//!
//! # List tokens, optionally for one user
//! cargo run --bin admin -- token list --user alice
//!
//! # Revoke a token
//! cargo run --bin admin -- token revoke 3
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
//! - `DATABASE_URL` or `DB_*` components (required): PostgreSQL connection
//! - `TOKEN_SIGNING_SECRET` (required): must match the server's value

use todo_api::api::dto::auth::RegisterRequest;
use todo_api::config::{self, Config};
use todo_api::domain::repositories::TokenRepository;
use todo_api::infrastructure::persistence::PgTokenRepository;
use todo_api::server::connect_database;
use todo_api::state::AppState;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use validator::Validate;

/// CLI tool for managing todo-api.
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

    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create a user and print its first token
    Create {
        #[arg(short, long)]
        username: Option<String>,
    },

    /// List all users
    List,
}

/// Token management subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Issue a new token for an existing user
    Issue {
        username: String,

        /// Token name (e.g., "CI", "Mobile App")
        #[arg(short, long)]
        name: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List tokens
    List {
        /// Only show tokens of this user
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Revoke a token by id
    Revoke { id: i64 },
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

    let config = config::load_from_env()?;
    let database = config
        .database
        .as_ref()
        .context("DATABASE_URL must be set")?;

    let pool = connect_database(database).await?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &config, &pool).await?,
        Commands::Token { action } => handle_token_action(action, &config, &pool).await?,
        Commands::Stats => handle_stats(&config, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn app_state(config: &Config, pool: &PgPool) -> AppState {
    AppState::postgres(
        Arc::new(pool.clone()),
        config.token_signing_secret.clone(),
    )
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, config: &Config, pool: &PgPool) -> Result<()> {
    let state = app_state(config, pool);

    match action {
        UserAction::Create { username } => create_user(&state, username).await?,
        UserAction::List => list_users(&state).await?,
    }

    Ok(())
}

/// Creates a user with interactive prompts.
///
/// The password is read without echo and confirmed. The printed token is the
/// same kind a `POST /api/auth/register` returns.
async fn create_user(state: &AppState, username: Option<String>) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;

    let request = RegisterRequest { username, password };
    if let Err(e) = request.validate() {
        println!("{} {}", "❌ Invalid input:".red(), e);
        return Ok(());
    }

    let issued = state
        .auth_service
        .register(&request.username, &request.password)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!("{}", "✅ User created successfully!".green().bold());
    println!("  ID:    {}", issued.user.id.to_string().bright_black());
    println!("  Name:  {}", issued.user.username.cyan());
    println!("  Token: {}", issued.token.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();

    Ok(())
}

/// Lists all users.
async fn list_users(state: &AppState) -> Result<()> {
    println!("{}", "📋 Users".bright_blue().bold());
    println!();

    let users = state
        .auth_service
        .list_users()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<30} {:<20}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(57).bright_black());

    for user in &users {
        println!(
            "  {:<5} {:<30} {}",
            user.id.to_string().bright_black(),
            user.username.cyan(),
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Dispatches token management commands.
async fn handle_token_action(action: TokenAction, config: &Config, pool: &PgPool) -> Result<()> {
    let state = app_state(config, pool);
    let repo = PgTokenRepository::new(Arc::new(pool.clone()));

    match action {
        TokenAction::Issue { username, name, yes } => {
            issue_token(&state, username, name, yes).await?;
        }
        TokenAction::List { user } => {
            list_tokens(&state, &repo, user).await?;
        }
        TokenAction::Revoke { id } => {
            revoke_token(&repo, id).await?;
        }
    }

    Ok(())
}

/// Issues a named token for an existing user.
async fn issue_token(
    state: &AppState,
    username: String,
    name: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Issue API Token".bright_blue().bold());
    println!();

    let user = state
        .auth_service
        .find_user(&username)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("User not found")?;

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text("CLI")
            .interact_text()?,
    };

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Issue token '{}' for {}?", token_name, user.username))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let token = state
        .auth_service
        .issue_token(user.id, &token_name)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to issue token: {}", e))?;

    println!();
    println!("{}", "✅ Token issued successfully!".green().bold());
    println!("  Token: {}", token.bright_yellow().bold());
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:8000/api/todos/",
        token.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists API tokens with status indicators.
///
/// # Output Format
///
/// ```text
/// 📋 API Tokens
///
///   ID  User  Name        Created              Last used            Status
///   ─────────────────────────────────────────────────────────────────────────
///   1   3     session     2025-01-15 10:30     2025-01-16 08:02     ACTIVE
///   2   3     CI          2025-01-16 14:20     never                REVOKED
/// ```
async fn list_tokens(
    state: &AppState,
    repo: &PgTokenRepository,
    username: Option<String>,
) -> Result<()> {
    println!("{}", "📋 API Tokens".bright_blue().bold());
    println!();

    let user_id = match username {
        Some(name) => Some(
            state
                .auth_service
                .find_user(&name)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
                .context("User not found")?
                .id,
        ),
        None => None,
    };

    let tokens = repo
        .list_tokens(user_id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<15} {:<20} {:<20} {:<20} {:<10}",
        "ID".bright_white().bold(),
        "User".bright_white().bold(),
        "Name".bright_white().bold(),
        "Created".bright_white().bold(),
        "Last used".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(95).bright_black());

    let mut usernames: HashMap<i64, String> = HashMap::new();
    for token in &tokens {
        if usernames.contains_key(&token.user_id) {
            continue;
        }
        let name = state
            .auth_service
            .find_user_by_id(token.user_id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
            .map(|u| u.username)
            .unwrap_or_else(|| token.user_id.to_string());
        usernames.insert(token.user_id, name);
    }

    for token in &tokens {
        let owner = usernames
            .get(&token.user_id)
            .map(String::as_str)
            .unwrap_or_default();
        let status = if token.revoked_at.is_some() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };
        let last_used = token
            .last_used_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "  {:<5} {:<15} {:<20} {:<20} {:<20} {}",
            token.id.to_string().bright_black(),
            owner.bright_black(),
            token.name.cyan(),
            token
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            last_used.bright_black(),
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        tokens.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Revokes a token by id after confirmation (default: No).
async fn revoke_token(repo: &PgTokenRepository, id: i64) -> Result<()> {
    println!("{}", "🔒 Revoke API Token".bright_blue().bold());
    println!();

    let confirmed = Confirm::new()
        .with_prompt(format!("Revoke token {}?", id))
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    let revoked = repo
        .revoke_token(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    if revoked {
        println!("{}", "✅ Token revoked successfully!".green().bold());
    } else {
        println!("{}", "⚠️  No active token with this id".yellow());
    }
    println!();

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Number of users
/// - Number of todos and notes
/// - Number of active API tokens
async fn handle_stats(config: &Config, pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let state = app_state(config, pool);
    let to_anyhow = |e: todo_api::AppError| anyhow::anyhow!("Database error: {}", e);

    let users_count = state
        .auth_service
        .list_users()
        .await
        .map_err(to_anyhow)?
        .len();
    let todos_count = state.todo_service.count_todos(None).await.map_err(to_anyhow)?;
    let notes_count = state.note_service.count_notes(None).await.map_err(to_anyhow)?;

    let tokens_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM api_tokens WHERE revoked_at IS NULL")
            .fetch_one(pool)
            .await?;

    println!(
        "  Users:         {}",
        users_count.to_string().bright_green().bold()
    );
    println!(
        "  Todos:         {}",
        todos_count.to_string().bright_green().bold()
    );
    println!(
        "  Notes:         {}",
        notes_count.to_string().bright_green().bold()
    );
    println!(
        "  Active tokens: {}",
        tokens_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
