use clap::{Parser, Subcommand};
use ferrous_mdns::{Client, ClientOptions};
use ferrous_mdns_domain::CliOverrides;
use std::time::Duration;
use tracing::info;

mod bootstrap;
mod commands;

#[derive(Parser)]
#[command(name = "ferrous-mdns")]
#[command(version)]
#[command(about = "Ferrous mDNS - multicast DNS resolver and service browser")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Ask responders to answer by unicast (QU bit)
    #[arg(short = 'u', long, global = true)]
    unicast: bool,

    /// mDNS port
    #[arg(short = 'p', long, global = true)]
    port: Option<u16>,

    /// Zone file loaded into the cache before anything is sent
    #[arg(long, value_name = "ZONE_FILE", global = true)]
    preload: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a name and print the answer records
    Query {
        name: String,

        /// Record type (A, AAAA, PTR, SRV, TXT, CNAME, ...)
        #[arg(short = 't', long = "type", default_value = "A")]
        record_type: String,

        /// Give up after this many seconds
        #[arg(long, default_value_t = 5)]
        timeout: u64,
    },
    /// Browse service types and print the instances discovered
    Browse {
        /// Service names, e.g. `airplay` or `_ipp._tcp.local.`
        #[arg(required = true)]
        services: Vec<String>,

        /// Seconds to listen before printing
        #[arg(short = 'd', long, default_value_t = 5)]
        duration: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let browse_services = match &cli.command {
        Command::Browse { services, .. } => services.clone(),
        Command::Query { .. } => Vec::new(),
    };
    let cli_overrides = CliOverrides {
        log_level: cli.log_level.clone(),
        port: cli.port,
        force_unicast_responses: cli.unicast,
        browse_services,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting Ferrous mDNS v{}", env!("CARGO_PKG_VERSION"));

    let transport = bootstrap::bind_transport(&config)?;
    let client = Client::new(ClientOptions::from_config(&config.mdns).with_transport(transport))?;

    if let Some(path) = cli.preload.as_deref() {
        bootstrap::preload_cache(&client, path)?;
    }

    let result = match cli.command {
        Command::Query {
            name,
            record_type,
            timeout,
        } => commands::query::run(&client, &name, &record_type, Duration::from_secs(timeout)).await,
        Command::Browse { duration, .. } => {
            commands::browse::run(&client, Duration::from_secs(duration)).await
        }
    };

    client.close().await;
    result
}
