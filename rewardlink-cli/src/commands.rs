//! Subcommand implementations.
//!
//! Each command writes its result to stdout (a URL, a number, or pretty
//! JSON). Progress and summaries go through `tracing`.

use std::time::Duration;

use alloy_network::EthereumWallet;
use alloy_primitives::{Address, B256, Bytes, TxHash, U256};
use alloy_provider::ProviderBuilder;
use alloy_signer_local::PrivateKeySigner;
use rewardlink::amount::{format_token_amount, parse_amount};
use rewardlink::approval::{ensure_balance, ensure_not_expired};
use rewardlink::encoding::{decode_query, decode_url, generate_link_url};
use rewardlink::format::{format_tx_hash, short_address};
use rewardlink::{PaymentLinkData, UnixTimestamp};
use rewardlink_evm::chain::ChainId;
use rewardlink_evm::link::client::sign_payment_link;
use rewardlink_evm::link::executor::{ExecutorError, ExecutorHooks, HookFuture, RewardLinkExecutor};
use rewardlink_evm::link::{SignedPaymentLink, TypedDataRequest, build_typed_data_request};
use rewardlink_evm::networks::network_by_chain_id;
use serde::Serialize;
use url::Url;

use crate::cli::{Command, DeploymentArgs, EncodeArgs, KeyArgs, RpcArgs, SubmitArgs};
use crate::error::CliError;

/// Runs one subcommand to completion.
///
/// # Errors
///
/// Returns [`CliError`] describing why the command failed.
pub async fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Encode(args) => println!("{}", encode(&args, UnixTimestamp::now())?),
        Command::Decode { link } => print_json(&parse_link(&link)?)?,
        Command::TypedData { link, deployment } => {
            print_json(&typed_data(&parse_link(&link)?, &deployment)?)?;
        }
        Command::Sign {
            link,
            deployment,
            key,
        } => print_json(&sign(&parse_link(&link)?, &deployment, &key).await?)?,
        Command::Verify {
            link,
            signature,
            deployment,
        } => print_json(&verify(&parse_link(&link)?, &deployment, signature)?)?,
        Command::Nonce {
            sender,
            deployment,
            rpc,
        } => println!("{}", nonce(sender, &deployment, &rpc).await?),
        Command::Execute {
            link,
            signature,
            submit,
            deployment,
            rpc,
            key,
        } => {
            let data = parse_link(&link)?;
            let tx_hash = execute(&data, signature, submit, &deployment, &rpc, &key).await?;
            println!("{tx_hash}");
        }
    }
    Ok(())
}

/// Decodes a full URL or a bare query string.
///
/// # Errors
///
/// Returns [`CliError::InvalidLink`] when the input is not a complete link.
pub fn parse_link(input: &str) -> Result<PaymentLinkData, CliError> {
    let input = input.trim();
    let data = if input.contains("://") {
        decode_url(input)
    } else {
        decode_query(input)
    };
    data.ok_or_else(|| CliError::InvalidLink(input.to_owned()))
}

/// Builds the approval URL for `args`, defaulting the expiry to `now + ttl`.
///
/// # Errors
///
/// Returns [`CliError`] if recipients and amounts do not pair up or an
/// amount is not a base-10 integer.
pub fn encode(args: &EncodeArgs, now: UnixTimestamp) -> Result<String, CliError> {
    let data = PaymentLinkData {
        token: args.token.clone(),
        sender: args.sender.clone(),
        recipients: args.recipients.clone(),
        amounts: args.amounts.clone(),
        nonce: args.nonce,
        expiry: args
            .expiry
            .map_or_else(|| now + args.ttl, UnixTimestamp::from_secs),
    };
    if !data.is_well_formed() {
        return Err(CliError::UnpairedTransfers {
            recipients: data.recipients.len(),
            amounts: data.amounts.len(),
        });
    }
    for amount in &data.amounts {
        parse_amount(amount)?;
    }

    Ok(generate_link_url(args.base_url.trim_end_matches('/'), &data))
}

/// Output of `typed-data`: the wallet request plus the digest to sign.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedDataOutput {
    /// Request in wallet JSON form.
    #[serde(flatten)]
    pub request: TypedDataRequest,
    /// EIP-712 digest.
    pub signing_hash: B256,
}

/// Builds the typed-data request for `data`.
///
/// # Errors
///
/// Returns [`CliError::TypedData`] for malformed addresses or amounts.
pub fn typed_data(
    data: &PaymentLinkData,
    deployment: &DeploymentArgs,
) -> Result<TypedDataOutput, CliError> {
    let request = build_typed_data_request(deployment.chain_id, deployment.contract, data)?;
    let signing_hash = request.signing_hash();
    Ok(TypedDataOutput {
        request,
        signing_hash,
    })
}

/// Signs `data` with the configured key.
///
/// # Errors
///
/// Returns [`CliError`] if the key is invalid or the link cannot be
/// approved by it.
pub async fn sign(
    data: &PaymentLinkData,
    deployment: &DeploymentArgs,
    key: &KeyArgs,
) -> Result<SignedPaymentLink, CliError> {
    let signer: PrivateKeySigner = key.private_key.trim().parse()?;
    let signed = sign_payment_link(
        &signer,
        deployment.chain_id,
        deployment.contract,
        data,
        UnixTimestamp::now(),
    )
    .await?;
    let message = &signed.request.message;
    tracing::info!(
        sender = %short_address(&message.sender.to_string()),
        recipients = message.recipients.len(),
        total = %display_total(deployment.chain_id, message.token, &message.amounts),
        "Signed payment link"
    );
    Ok(signed)
}

/// Output of `verify`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VerifyOutput {
    /// Always `true`; mismatches are reported as errors.
    pub valid: bool,
    /// Recovered signer, equal to the link's sender.
    pub signer: Address,
}

/// Checks `signature` over `data` against its sender.
///
/// # Errors
///
/// Returns [`CliError::Signature`] when another key signed.
pub fn verify(
    data: &PaymentLinkData,
    deployment: &DeploymentArgs,
    signature: Bytes,
) -> Result<VerifyOutput, CliError> {
    let request = build_typed_data_request(deployment.chain_id, deployment.contract, data)?;
    let signed = SignedPaymentLink::new(request, signature)?;
    Ok(VerifyOutput {
        valid: true,
        signer: signed.request.sender(),
    })
}

/// Reads the sender's next nonce from the executor.
///
/// # Errors
///
/// Returns [`CliError`] if no RPC endpoint is known or the call fails.
pub async fn nonce(
    sender: Address,
    deployment: &DeploymentArgs,
    rpc: &RpcArgs,
) -> Result<U256, CliError> {
    let provider = ProviderBuilder::new().connect_http(rpc_url(rpc, deployment.chain_id)?);
    let executor = RewardLinkExecutor::new(provider, deployment.contract);
    Ok(executor.next_nonce(sender).await?)
}

/// Submits a signed link after checking expiry, balance and allowance.
///
/// # Errors
///
/// Returns [`CliError`] if a pre-check fails or the transaction is not
/// confirmed successfully.
pub async fn execute(
    data: &PaymentLinkData,
    signature: Bytes,
    submit: SubmitArgs,
    deployment: &DeploymentArgs,
    rpc: &RpcArgs,
    key: &KeyArgs,
) -> Result<TxHash, CliError> {
    let request = build_typed_data_request(deployment.chain_id, deployment.contract, data)?;
    let signed = SignedPaymentLink::new(request, signature)?;
    ensure_not_expired(data, UnixTimestamp::now())?;

    let signer: PrivateKeySigner = key.private_key.trim().parse()?;
    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .connect_http(rpc_url(rpc, deployment.chain_id)?);
    let executor = RewardLinkExecutor::new(provider, deployment.contract)
        .with_confirmations(submit.confirmations)
        .with_receipt_timeout(Duration::from_secs(submit.receipt_timeout))
        .with_hook(LogHooks {
            chain_id: deployment.chain_id,
        });

    let message = &signed.request.message;
    let balance = executor.token_balance(message.token, message.sender).await?;
    let required = ensure_balance(data, balance)?;
    let allowance = executor
        .token_allowance(message.token, message.sender)
        .await?;
    if allowance < required {
        return Err(CliError::InsufficientAllowance {
            required,
            available: allowance,
        });
    }

    Ok(executor.execute(&signed).await?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn rpc_url(rpc: &RpcArgs, chain_id: ChainId) -> Result<Url, CliError> {
    if let Some(url) = &rpc.rpc_url {
        return Ok(url.clone());
    }
    let network = network_by_chain_id(chain_id).ok_or(CliError::MissingRpcUrl(chain_id))?;
    Ok(network.rpc_url.parse()?)
}

/// Sum of `amounts` in whole tokens when the token is known on `chain_id`,
/// otherwise in base units.
fn display_total(chain_id: ChainId, token: Address, amounts: &[U256]) -> String {
    let total = amounts
        .iter()
        .try_fold(U256::ZERO, |acc, a| acc.checked_add(*a));
    let Some(total) = total else {
        return "overflow".to_owned();
    };
    let known = network_by_chain_id(chain_id)
        .and_then(|n| n.token)
        .filter(|t| t.address == token);
    match known {
        Some(t) => format_token_amount(total, t.decimals, 4),
        None => total.to_string(),
    }
}

/// Logs execution outcomes.
#[derive(Debug, Clone, Copy)]
struct LogHooks {
    chain_id: ChainId,
}

impl ExecutorHooks for LogHooks {
    fn after_execute<'a>(
        &'a self,
        link: &'a SignedPaymentLink,
        tx_hash: TxHash,
    ) -> HookFuture<'a, ()> {
        Box::pin(async move {
            let message = &link.request.message;
            tracing::info!(
                tx = %format_tx_hash(&tx_hash.to_string()),
                sender = %short_address(&message.sender.to_string()),
                recipients = message.recipients.len(),
                total = %display_total(self.chain_id, message.token, &message.amounts),
                "Payment link executed"
            );
        })
    }

    fn on_execute_failure<'a>(
        &'a self,
        link: &'a SignedPaymentLink,
        error: &'a ExecutorError,
    ) -> HookFuture<'a, ()> {
        Box::pin(async move {
            tracing::warn!(
                sender = %short_address(&link.request.message.sender.to_string()),
                nonce = %link.request.message.nonce,
                "Payment link execution failed: {error}"
            );
        })
    }
}
