use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod server;
mod state;

use config::Cli;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_line_number(true)
                .with_file(false),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!("Starting tribunal server on port {}", cli.port);
    tracing::info!("Cases channel: {}", cli.cases_channel_id);

    let state = state::AppState::build(&cli).await;
    server::run(state, cli.port).await
}
