//! Canfinity tracking service entry point.

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use canfinity::api::{self, create_router, AppState};
use canfinity::config::Config;
use canfinity::error::AppError;
use canfinity::metrics;
use canfinity::utils::shutdown_signal;

/// Chemotherapy session and medicine reminder tracking service.
#[derive(Parser, Debug)]
#[command(name = "canfinity")]
#[command(about = "In-memory service for chemo sessions and medicine reminders")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Address to bind (overrides HOST).
    #[arg(long, global = true)]
    host: Option<String>,

    /// Port to bind (overrides PORT).
    #[arg(short, long, global = true)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve,

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = load_config(&args).map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    let filter = if args.verbose || config.verbose {
        EnvFilter::new("canfinity=debug,info")
    } else {
        EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(config),
        Some(Command::Serve) | None => cmd_serve(config).await,
    }
}

/// Load from the environment and apply CLI overrides.
fn load_config(args: &Args) -> Result<Config, AppError> {
    Ok(Config::load()?.with_overrides(args.host.clone(), args.port))
}

/// Check configuration validity.
fn cmd_check_config(config: Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("CANFINITY - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(AppError::InvalidConfig(e).into());
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Listen Address: {}:{}", config.host, config.port);
    println!("  Max Body Size: {} bytes", config.max_body_bytes);
    println!("  CORS: {}", if config.enable_cors { "Enabled" } else { "Disabled" });
    println!("  Log Level: {}", config.rust_log);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(config: Config) -> anyhow::Result<()> {
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(AppError::InvalidConfig(e).into());
    }
    let addr = config.socket_addr().map_err(AppError::InvalidConfig)?;

    let handle = metrics::install_recorder().map_err(|e| {
        error!("Failed to install metrics recorder: {}", e);
        AppError::from(e)
    })?;

    let app_state = AppState::new().with_metrics(handle);
    let router = create_router(app_state, &config);

    let listener = TcpListener::bind(addr).await.map_err(AppError::from)?;
    info!("HTTP server listening on {}", listener.local_addr()?);

    api::serve(listener, router, shutdown_signal())
        .await
        .map_err(AppError::from)?;

    info!("Server stopped; in-memory records discarded");
    Ok(())
}
