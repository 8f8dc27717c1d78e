//! Meetup CLI
//!
//! Runs the registration server and offers direct access to the configured
//! store for operators.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use meetup_api::{ApiConfig, ApiServer, AppState, StoreBackend};
use meetup_core::types::RegistrationRequest;
use meetup_registry::RegistrationService;

/// Meetup - event registration service
#[derive(Parser)]
#[command(name = "meetup")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Storage backend (overrides STORE_BACKEND)
    #[arg(short, long, global = true)]
    store: Option<StoreBackend>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,
        /// Bind address (overrides BIND_ADDR)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Register an attendee directly against the store
    Register {
        /// Full name
        #[arg(long)]
        name: String,
        /// Contact email
        #[arg(long)]
        email: String,
        /// Company or organization
        #[arg(long)]
        company: String,
        /// Job role or title
        #[arg(long)]
        role: String,
    },

    /// Show registrations, newest first
    List {
        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "meetup=debug,tower_http=debug,info"
    } else {
        "meetup=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = ApiConfig::from_env().context("Failed to load configuration")?;
    if let Some(store) = cli.store {
        config.store = store;
    }
    debug!(store = %config.store, port = config.port, "Loaded configuration");

    match cli.command {
        Commands::Serve { port, bind } => cmd_serve(config, port, bind).await,
        Commands::Register {
            name,
            email,
            company,
            role,
        } => {
            let request = RegistrationRequest {
                name,
                email,
                company,
                role,
            };
            cmd_register(config, request).await
        }
        Commands::List { json } => cmd_list(config, json).await,
    }
}

/// Opens the configured store and wraps it in a service.
async fn open_service(config: &ApiConfig) -> Result<RegistrationService> {
    if config.store == StoreBackend::Memory {
        println!(
            "{}",
            "⚠️  Using in-memory storage; nothing persists after this command.".yellow()
        );
    }

    let store = config
        .open_store()
        .await
        .context("Failed to open registration store")?;
    Ok(RegistrationService::new(store))
}

/// Run API server
async fn cmd_serve(mut config: ApiConfig, port: Option<u16>, bind: Option<String>) -> Result<()> {
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(bind) = bind {
        config.bind = bind;
    }

    let addr: SocketAddr = format!("{}:{}", config.bind, config.port)
        .parse()
        .context("Invalid bind address")?;

    println!("{}", format!("🚀 Starting {}...", config.service_name).cyan().bold());
    println!("   {} http://{}", "Listening on:".green(), addr);
    println!("   {} http://{}/health", "Health check:".dimmed(), addr);
    println!("   {} {}", "Storage:".dimmed(), config.store);
    println!("\n   Press Ctrl+C to stop.\n");

    let state = AppState::new(config)
        .await
        .context("Failed to open registration store")?;
    ApiServer::new(state).run(addr).await?;

    Ok(())
}

/// Register an attendee
async fn cmd_register(config: ApiConfig, request: RegistrationRequest) -> Result<()> {
    let service = open_service(&config).await?;

    let registration = service
        .register(request)
        .await
        .context("Failed to register attendee")?;

    println!("{} {}", "✅ Registered:".green().bold(), registration.name);
    println!("   {} {}", "Id:".dimmed(), registration.id);
    println!("   {} {}", "Created:".dimmed(), registration.created_at.to_rfc3339());

    Ok(())
}

/// Print registrations
async fn cmd_list(config: ApiConfig, json: bool) -> Result<()> {
    let service = open_service(&config).await?;
    let registrations = service.list().await.context("Failed to list registrations")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&registrations)?);
        return Ok(());
    }

    if registrations.is_empty() {
        println!("{}", "No registrations yet.".yellow());
        return Ok(());
    }

    println!("{} {}", "📋 Registrations:".cyan().bold(), registrations.len());
    for reg in &registrations {
        println!(
            "   {} {} <{}> {} {} @ {}",
            reg.created_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
            reg.name.bold(),
            reg.email,
            "·".dimmed(),
            reg.role,
            reg.company
        );
    }

    Ok(())
}
