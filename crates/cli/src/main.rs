use clap::Parser;
use ferrous_doh_domain::{CliOverrides, DnsQuery, RecordType};
use ferrous_doh_infrastructure::dns::{
    build_http_client, DnsResponse, ExchangeContext, HttpsTransport,
};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

mod bootstrap;

#[derive(Parser)]
#[command(name = "ferrous-doh")]
#[command(version)]
#[command(about = "Ferrous DoH - DNS over HTTPS (RFC 8484) lookup client")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DoH endpoint URL
    #[arg(long)]
    url: Option<String>,

    /// Record type to query
    #[arg(short = 't', long = "type", default_value = "A")]
    record_type: RecordType,

    /// Exchange timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Domain name to resolve
    name: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        url: cli.url.clone(),
        timeout_ms: cli.timeout_ms,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    let client = build_http_client(&config.upstream)?;
    let transport = HttpsTransport::new(Arc::new(client), config.upstream.url.as_str());

    let query = DnsQuery::new(cli.name.as_str(), cli.record_type);
    let shutdown = CancellationToken::new();
    let ctx = ExchangeContext::new()
        .with_timeout(Duration::from_millis(config.upstream.timeout_ms))
        .with_cancellation(shutdown.clone());

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling exchange");
            shutdown.cancel();
        }
    });

    info!(
        domain = %query.domain,
        record_type = %query.record_type,
        url = %transport.url(),
        "Resolving"
    );

    let response = transport.exchange(&ctx, &query).await?;
    debug!(rcode = ?response.rcode(), answers = response.message().answers().len(), "Exchange complete");

    print_answers(&response, cli.record_type)?;
    Ok(())
}

fn print_answers(response: &DnsResponse, record_type: RecordType) -> anyhow::Result<()> {
    match record_type {
        RecordType::A => {
            for addr in response.records_a()? {
                println!("{}", addr);
            }
        }
        RecordType::AAAA => {
            for addr in response.records_aaaa()? {
                println!("{}", addr);
            }
        }
        RecordType::CNAME => println!("{}", response.records_cname()?),
        _ => {
            for record in response.message().answers() {
                println!("{}", record);
            }
        }
    }
    Ok(())
}
