//! `rewardlink` binary.
//!
//! # Usage
//!
//! ```bash
//! # Build a link
//! rewardlink encode --base-url https://rewards.example --token 0x.. --sender 0x.. \
//!     --recipient 0x.. --amount 1000000000000000000 --nonce 0
//!
//! # Sign it as the sender (key from REWARDLINK_PRIVATE_KEY)
//! rewardlink sign "https://rewards.example/approve-payment?..." --contract 0x..
//!
//! # Configure logging level
//! RUST_LOG=debug rewardlink decode "token=0x..&sender=0x.."
//! ```

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rewardlink_cli::{Cli, commands};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Logs go to stderr so command output can be piped.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = commands::run(cli.command).await {
        tracing::error!("rewardlink failed: {e}");
        std::process::exit(1);
    }
}
