use anyhow::Result;
use clap::Parser;
use giga_client::observability::metrics::get_metrics;
use giga_client::utils::config_loader;
use giga_client::utils::logging;
use giga_client::utils::logging::LogLevel;
use giga_client::GigaClient;
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "giga-client.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    /// Site code as configured under `sites` (US, DE, EU, ...)
    #[arg(short, long, env = "GIGA_SITE", default_value = "US")]
    site: String,
    /// Print Prometheus metrics to stderr after the request (also `settings.metrics.is_enabled`)
    #[arg(long)]
    print_metrics: bool,
    /// SKUs to look up
    #[arg(required = true)]
    skus: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load YAML config
    // -------------------------------

    let args = Args::parse();
    let service_config = config_loader::run(&args.config).await?;
    logging::run(&service_config, args.log_level);

    // -------------------------------
    // 2. Build client
    // -------------------------------

    let client = GigaClient::from_config(&service_config)?;

    // -------------------------------
    // 3. Fetch product details, one vendor batch at a time
    // -------------------------------

    let mut products = Vec::with_capacity(args.skus.len());
    for batch in args.skus.chunks(client.max_skus_per_request()) {
        products.extend(client.get_product_by_skus(&args.site, batch).await?);
    }
    info!(site = %args.site, requested = args.skus.len(), received = products.len(), "done");

    println!("{}", serde_json::to_string_pretty(&products)?);

    if args.print_metrics || service_config.settings.metrics.is_enabled {
        eprintln!("{}", get_metrics().await.render()?);
    }

    if products.is_empty() {
        warn!(site = %args.site, "vendor matched none of the requested skus");
    }
    Ok(())
}
