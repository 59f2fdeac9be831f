use anyhow::anyhow;
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use web_service::ServerConfig;

/// Dev toolbox web server.
///
/// Flags override the `APP_*` / `TOOLBOX_*` environment variables, which in
/// turn override the built-in defaults.
#[derive(Debug, Parser)]
#[command(name = "toolbox", version, about)]
struct Args {
    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Number of worker threads
    #[arg(long)]
    workers: Option<usize>,

    /// Public origin used in canonical links and the sitemap
    #[arg(long)]
    site_url: Option<String>,

    /// Base URL of the QR image service
    #[arg(long)]
    qr_api: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, env = "TOOLBOX_JSON_LOGS")]
    json_logs: bool,
}

impl Args {
    fn into_config(self, mut config: ServerConfig) -> ServerConfig {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(workers) = self.workers.filter(|w| *w > 0) {
            config.workers = workers;
        }
        if let Some(site_url) = self.site_url {
            config.site_url = web_service::config::normalize_site_url(&site_url);
        }
        if let Some(qr_api) = self.qr_api {
            config.qr_api_base = qr_api;
        }
        config
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(fmt::layer().json().with_target(true)).init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_line_number(true)
                    .with_file(false),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(args.json_logs);

    let config = args.into_config(ServerConfig::from_env());
    tracing::info!(
        address = %config.bind_address(),
        site_url = %config.site_url,
        workers = config.workers,
        "Starting dev toolbox"
    );

    web_service::run(config).await.map_err(|e| anyhow!(e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from([
            "toolbox",
            "--port",
            "9000",
            "--site-url",
            "https://tools.example.com/",
        ]);
        let config = args.into_config(ServerConfig::default());

        assert_eq!(config.port, 9000);
        assert_eq!(config.site_url, "https://tools.example.com");
        assert_eq!(config.host, ServerConfig::default().host);
    }

    #[test]
    fn zero_workers_keeps_default() {
        let args = Args::parse_from(["toolbox", "--workers", "0"]);
        let config = args.into_config(ServerConfig::default());
        assert_eq!(config.workers, ServerConfig::default().workers);
    }
}
