use clap::Parser;
use tracing_subscriber::EnvFilter;

use haproxy_table_exporter::config::Cli;
use haproxy_table_exporter::{serve, Scraper, UnixSocketBuilder};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    tracing::info!("haproxy-table-exporter starting");
    tracing::debug!(?cli, "parsed CLI arguments");

    let builder: UnixSocketBuilder = cli.socket.clone().into();
    tracing::info!(socket = %builder.path().display(), "using HAProxy admin socket");

    let scraper = Scraper::new(builder);
    let app = serve::router(&cli.endpoint, scraper, cli.render_config());

    serve::run(cli.listen_addr(), app).await
}
