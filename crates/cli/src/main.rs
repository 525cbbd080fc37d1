use clap::Parser;
use hairpin_dns_domain::CliOverrides;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "hairpin-dns")]
#[command(version)]
#[command(about = "Hairpin DNS - answers cluster-internal addresses for externally exposed services")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Namespace whose services are matched
    #[arg(short = 'n', long)]
    namespace: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.clone();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind,
        namespace: cli.namespace,
        log_level: cli.log_level,
    };

    let (config, source) = bootstrap::load_config(config_path.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config)?;

    info!("Starting Hairpin DNS v{}", env!("CARGO_PKG_VERSION"));
    match source {
        Some(path) => info!(path = %path, "Configuration loaded"),
        None => info!("No configuration file found, using defaults"),
    }

    let dns_services = di::DnsServices::new(&config)?;

    server::start_dns_server(
        config.server.listen_address(),
        dns_services.handler,
        config.server.num_workers,
    )
    .await?;

    info!("Server shutdown complete");
    Ok(())
}
