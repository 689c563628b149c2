//! `pulse serve` - run the echo server

use anyhow::Result;
use clap::Args;
use pulse_server::{PulseServer, ServerConfig};

#[derive(Args)]
pub struct ServeArgs {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8082)]
    port: u16,
}

pub async fn run(args: ServeArgs) -> Result<()> {
    let config = ServerConfig::new(args.host, args.port);
    tracing::info!("Starting pulse server on {}", config.addr());

    let server = PulseServer::new(config);
    server.run().await?;
    Ok(())
}
