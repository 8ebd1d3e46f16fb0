//! CLI administration tool for snaplink.
//!
//! Manages user accounts, shows statistics, and runs database diagnostics
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create an admin account
//! cargo run --bin admin -- user create --username root --admin
//!
//! # List accounts with their link counts
//! cargo run --bin admin -- user list
//!
//! # Delete an account and all of its links
//! cargo run --bin admin -- user delete alice
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
//! - `DATABASE_URL` (required): PostgreSQL connection string

use snaplink::config::mask_connection_string;
use snaplink::domain::entities::{NewUser, Role, User};
use snaplink::domain::repositories::UserRepository;
use snaplink::infrastructure::persistence::PgUserRepository;
use snaplink::utils::password::hash_password;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing snaplink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

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
    /// Create a user account
    Create {
        #[arg(short, long)]
        username: Option<String>,

        /// Grant the admin role
        #[arg(long)]
        admin: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all users
    List,

    /// Delete a user and every link they created
    Delete {
        /// Username or numeric ID
        name_or_id: String,
    },
}

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

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&database_url)
            )
        })?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));

    match action {
        UserAction::Create {
            username,
            admin,
            yes,
        } => create_user(repo, username, admin, yes).await,
        UserAction::List => list_users(repo).await,
        UserAction::Delete { name_or_id } => delete_user(repo, name_or_id).await,
    }
}

/// Creates an account with interactive prompts.
///
/// The password is always read from the terminal, never from arguments,
/// so it does not end up in shell history.
async fn create_user(
    repo: Arc<PgUserRepository>,
    username: Option<String>,
    admin: bool,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    if !(3..=50).contains(&username.len())
        || !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        anyhow::bail!("Username must be 3-50 characters of letters, digits, '_', '.' or '-'");
    }

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;

    if password.len() < 6 {
        anyhow::bail!("Password must be at least 6 characters");
    }

    let role = if admin { Role::Admin } else { Role::User };

    println!();
    println!("  Username: {}", username.cyan());
    println!("  Role:     {}", role_label(role));
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let password_hash = hash_password(&password)?;

    let user = repo
        .create(NewUser {
            username,
            password_hash,
            role,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!(
        "{} (id {})",
        "✅ User created successfully!".green().bold(),
        user.id.to_string().bright_white()
    );
    println!();

    Ok(())
}

/// Lists accounts with the number of links each owns.
///
/// # Output Format
///
/// ```text
///   ID   Username              Role    Links   Created
///   ─────────────────────────────────────────────────────────────
///   1    admin                 admin   3       2024-01-15 10:30
/// ```
async fn list_users(repo: Arc<PgUserRepository>) -> Result<()> {
    println!("{}", "📋 Users".bright_blue().bold());
    println!();

    let users = repo
        .list_with_counts()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<22} {:<7} {:<7} {}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Role".bright_white().bold(),
        "Links".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(65).bright_black());

    for summary in &users {
        let user = &summary.user;
        println!(
            "  {:<4} {:<22} {:<7} {:<7} {}",
            user.id.to_string().bright_black(),
            user.username.cyan(),
            role_label(user.role),
            summary.mapping_count,
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

/// Deletes an account by username or ID after confirmation.
async fn delete_user(repo: Arc<PgUserRepository>, name_or_id: String) -> Result<()> {
    println!("{}", "🗑  Delete User".bright_blue().bold());
    println!();

    let user: Option<User> = match name_or_id.parse::<i64>() {
        Ok(id) => repo.find_by_id(id).await,
        Err(_) => repo.find_by_username(&name_or_id).await,
    }
    .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    let user = user.context("User not found")?;

    println!("  User: {}", user.username.cyan());
    println!("  ID:   {}", user.id.to_string().bright_black());
    println!();
    println!(
        "{}",
        "⚠️  All links created by this user will be deleted too."
            .red()
            .bold()
    );
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Delete this user?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    let deleted = repo
        .delete(user.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete user: {}", e))?;

    println!();
    if deleted {
        println!("{}", "✅ User deleted successfully!".green().bold());
    } else {
        println!("{}", "⚠️  User was already gone".yellow());
    }
    println!();

    Ok(())
}

/// Displays users, links, and total clicks.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let users_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    let (links_count, clicks_count): (i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COALESCE(SUM(click_count), 0)::BIGINT FROM url_mappings",
    )
    .fetch_one(pool)
    .await?;

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

            let migrations: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM _sqlx_migrations WHERE success",
            )
            .fetch_one(pool)
            .await
            .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}

fn role_label(role: Role) -> ColoredString {
    match role {
        Role::Admin => "admin".bright_magenta(),
        Role::User => "user".normal(),
    }
}
