//! Command-line arguments.
//!
//! Every deployment option can also be set from the environment (or a
//! `.env` file in the working directory).
//!
//! # Environment Variables
//!
//! - `REWARDLINK_BASE_URL` - Origin that serves the approval page
//! - `REWARDLINK_CHAIN_ID` - EIP-155 chain ID (default: Monad Testnet)
//! - `REWARDLINK_CONTRACT` - `RewardLinkExecutor` address
//! - `REWARDLINK_RPC_URL` - HTTP RPC endpoint (default: the network's public RPC)
//! - `REWARDLINK_PRIVATE_KEY` - Hex private key used by `sign` and `execute`
//! - `RUST_LOG` - Log level filter (default: `info`)

use alloy_primitives::{Address, Bytes};
use clap::{Args, Parser, Subcommand};
use rewardlink_evm::chain::ChainId;
use rewardlink_evm::networks::MONAD_TESTNET;
use url::Url;

/// Create, inspect, sign and execute `RewardLink` payment links.
#[derive(Debug, Parser)]
#[command(name = "rewardlink", version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build a shareable payment link URL
    Encode(EncodeArgs),

    /// Decode a payment link URL or query string into JSON
    Decode {
        /// Full URL or bare query string
        link: String,
    },

    /// Print the EIP-712 signing request for a link
    TypedData {
        /// Payment link URL or query string
        link: String,
        #[command(flatten)]
        deployment: DeploymentArgs,
    },

    /// Approve a link by signing it with the sender's key
    Sign {
        /// Payment link URL or query string
        link: String,
        #[command(flatten)]
        deployment: DeploymentArgs,
        #[command(flatten)]
        key: KeyArgs,
    },

    /// Check that a signature over a link belongs to its sender
    Verify {
        /// Payment link URL or query string
        link: String,
        /// Hex signature (65-byte or 64-byte compact)
        #[arg(long)]
        signature: Bytes,
        #[command(flatten)]
        deployment: DeploymentArgs,
    },

    /// Read the next unused nonce of a sender
    Nonce {
        /// Sender address
        #[arg(long)]
        sender: Address,
        #[command(flatten)]
        deployment: DeploymentArgs,
        #[command(flatten)]
        rpc: RpcArgs,
    },

    /// Submit a signed link to the executor contract
    Execute {
        /// Payment link URL or query string
        link: String,
        /// Hex signature produced by the sender
        #[arg(long)]
        signature: Bytes,
        #[command(flatten)]
        submit: SubmitArgs,
        #[command(flatten)]
        deployment: DeploymentArgs,
        #[command(flatten)]
        rpc: RpcArgs,
        #[command(flatten)]
        key: KeyArgs,
    },
}

/// Arguments for `encode`.
#[derive(Debug, Args)]
pub struct EncodeArgs {
    /// Origin that serves the approval page
    #[arg(long, env = "REWARDLINK_BASE_URL")]
    pub base_url: String,

    /// ERC-20 token address
    #[arg(long)]
    pub token: String,

    /// Wallet that will approve the link
    #[arg(long)]
    pub sender: String,

    /// Recipient address (repeat for each transfer)
    #[arg(long = "recipient", required = true)]
    pub recipients: Vec<String>,

    /// Amount in base units (repeat, one per recipient)
    #[arg(long = "amount", required = true)]
    pub amounts: Vec<String>,

    /// Sender nonce on the executor
    #[arg(long)]
    pub nonce: u64,

    /// Expiry as unix seconds (default: now + `--ttl`)
    #[arg(long)]
    pub expiry: Option<u64>,

    /// Lifetime in seconds when `--expiry` is not given
    #[arg(long, default_value_t = 86_400)]
    pub ttl: u64,
}

/// Which executor deployment a link is bound to.
#[derive(Debug, Clone, Args)]
pub struct DeploymentArgs {
    /// EIP-155 chain ID
    #[arg(long, env = "REWARDLINK_CHAIN_ID", default_value_t = MONAD_TESTNET)]
    pub chain_id: ChainId,

    /// `RewardLinkExecutor` contract address
    #[arg(long, env = "REWARDLINK_CONTRACT")]
    pub contract: Address,
}

/// RPC endpoint selection.
#[derive(Debug, Clone, Args)]
pub struct RpcArgs {
    /// HTTP RPC endpoint (default: the chain's public RPC)
    #[arg(long, env = "REWARDLINK_RPC_URL")]
    pub rpc_url: Option<Url>,
}

/// How `execute` waits for the transaction.
#[derive(Debug, Clone, Copy, Args)]
pub struct SubmitArgs {
    /// Confirmations to wait for
    #[arg(long, default_value_t = 1)]
    pub confirmations: u64,

    /// Seconds to wait for the receipt before giving up
    #[arg(long, default_value_t = 30)]
    pub receipt_timeout: u64,
}

/// Signing key.
#[derive(Clone, Args)]
pub struct KeyArgs {
    /// Hex private key
    #[arg(long, env = "REWARDLINK_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,
}

impl std::fmt::Debug for KeyArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyArgs").finish_non_exhaustive()
    }
}
