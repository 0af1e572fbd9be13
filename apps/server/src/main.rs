use anyhow::Context;
use clap::{Parser, Subcommand};
use relay_api::{build_router, AppState};
use relay_config::load as load_config;
use relay_database::initialize_database;
use relay_runtime::{telemetry, BackendServices};
use sqlx::Row;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "relay")]
#[command(about = "Routine relay backend (serves HTTP by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
    /// List registered users without secrets
    DumpUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing().context("failed to initialise tracing")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server().await,
        Commands::Migrate => migrate().await,
        Commands::DumpUsers => dump_users().await,
    }
}

async fn run_server() -> anyhow::Result<()> {
    info!("starting relay backend");

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let state = AppState::new(
        services.credentials.clone(),
        services.devices.clone(),
        services.notifications.clone(),
    );
    let app = build_router(state);

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(relay_runtime::shutdown_signal())
        .await
        .context("http server error")?;

    services.db_pool.close().await;
    info!("backend shut down");
    Ok(())
}

async fn migrate() -> anyhow::Result<()> {
    let config = load_config().context("failed to load configuration")?;

    let pool = initialize_database(&config.database)
        .await
        .context("failed to migrate database")?;
    pool.close().await;

    info!(url = %config.database.url, "database migrations applied");
    Ok(())
}

async fn dump_users() -> anyhow::Result<()> {
    let config = load_config().context("failed to load configuration")?;

    let pool = initialize_database(&config.database)
        .await
        .context("failed to open database")?;

    let users = sqlx::query(
        r#"
        SELECT user_id, nickname, device_address IS NOT NULL AS has_address, created_at
        FROM users
        ORDER BY created_at ASC
        "#,
    )
    .fetch_all(&pool)
    .await
    .context("failed to fetch users")?;

    println!("=== USERS ===");
    if users.is_empty() {
        println!("No users found in database");
    } else {
        println!("Found {} users:", users.len());
        println!(
            "{:<24} {:<24} {:<12} {:<25}",
            "User ID", "Nickname", "Has Device", "Created At"
        );
        println!("{}", "-".repeat(88));

        for user in users {
            let user_id: String = user.get("user_id");
            let nickname: String = user.get("nickname");
            let has_address: bool = user.get("has_address");
            let created_at: String = user.get("created_at");

            println!(
                "{:<24} {:<24} {:<12} {:<25}",
                user_id, nickname, has_address, created_at
            );
        }
    }

    pool.close().await;
    Ok(())
}
