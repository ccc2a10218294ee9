//! Pastebin Lite API server entrypoint.

use pastebin_core::constants::{DEFAULT_MAX_PASTE_SIZE, DEFAULT_PORT, DEFAULT_STORE_TIMEOUT_MS};
use pastebin_server::{config::Config, db::Database, serve_router, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct CliFlags {
    help: bool,
}

fn parse_cli_flags(args: &[String]) -> anyhow::Result<CliFlags> {
    let mut flags = CliFlags::default();
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => flags.help = true,
            value if value.starts_with('-') => {
                anyhow::bail!(
                    "Unknown option: '{}'. Use --help to see supported options.",
                    value
                );
            }
            value => {
                anyhow::bail!(
                    "Unexpected positional argument: '{}'. Use --help to see supported options.",
                    value
                );
            }
        }
    }
    Ok(flags)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pastebin=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let cli_flags = parse_cli_flags(&args)?;

    if cli_flags.help {
        print_help();
        return Ok(());
    }

    let config = Config::from_env();
    if config.test_mode {
        tracing::warn!(
            "TEST_MODE enabled - clients can override the expiry clock; never use in production"
        );
    }

    let database = Database::open(&config.db_path)?;
    tracing::info!("Using database at {}", config.db_path);

    let state = AppState::new(config.clone(), database);

    let bind_addr = pastebin_server::resolve_bind_address(&config);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let actual_addr = listener.local_addr().unwrap_or(bind_addr);
    tracing::info!("Pastebin Lite listening on http://{}", actual_addr);

    serve_router(listener, state, shutdown_signal()).await?;
    tracing::info!("Server stopped; database handle released");

    Ok(())
}

fn print_help() {
    println!("Pastebin Lite Server\n");
    println!("Usage: pastebin [OPTIONS]\n");
    println!("Options:");
    println!("  --help            Show this help message");
    println!("\nEnvironment variables:");
    println!("  DB_PATH           Database file (default: ~/.cache/pastebin-lite/pastes.redb)");
    println!("  PORT              Server port (default: {})", DEFAULT_PORT);
    println!("  BIND              Override bind address (e.g. 127.0.0.1:{})", DEFAULT_PORT);
    println!(
        "  MAX_PASTE_SIZE    Maximum paste size in bytes (default: {})",
        DEFAULT_MAX_PASTE_SIZE
    );
    println!(
        "  STORE_TIMEOUT_MS  Per-operation store timeout (default: {})",
        DEFAULT_STORE_TIMEOUT_MS
    );
    println!("  PUBLIC_BASE_URL   Base for share links (default: request Host)");
    println!("  TEST_MODE         Honor the x-test-now-ms clock header (testing only)");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
