use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::TxHash;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use rand::Rng;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::constants::{GAS_LIMIT_MAX, GAS_LIMIT_MIN};
use crate::wallets::{self, WalletRecord};

/// Why a single wallet's activation did not go through. Never fatal to
/// the batch; the loop always moves on to the next wallet.
#[derive(Debug, Error)]
pub enum ActivationError {
    #[error("private key is not a valid secp256k1 key")]
    InvalidKey,
    #[error("insufficient funds for activation")]
    InsufficientFunds,
    #[error("activation call reverted")]
    CallException,
    #[error("{0}")]
    Other(String),
}

impl ActivationError {
    /// Classifies an RPC-level failure by its error text, mirroring the
    /// INSUFFICIENT_FUNDS / CALL_EXCEPTION split most providers report.
    fn from_signal(message: String) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("insufficient funds") {
            Self::InsufficientFunds
        } else if lower.contains("revert") || lower.contains("call exception") {
            Self::CallException
        } else {
            Self::Other(message)
        }
    }
}

#[derive(Debug)]
pub enum ActivationOutcome {
    Confirmed { tx_hash: TxHash, block_number: u64 },
    Failed(ActivationError),
}

#[derive(Debug)]
pub struct ActivationResult {
    pub address: String,
    pub outcome: ActivationOutcome,
}

fn pick_gas_limit<R: Rng>(rng: &mut R) -> u64 {
    rng.gen_range(GAS_LIMIT_MIN..=GAS_LIMIT_MAX)
}

/// Runs one activation pass over the whole wallet list. A wallet list
/// that cannot be read or parsed aborts the pass before anything is
/// sent; per-wallet failures are reported and skipped.
pub async fn run_batch(config: &Config) -> eyre::Result<Vec<ActivationResult>> {
    let wallets = wallets::load_wallets(&config.wallets_path)?;
    info!(
        "loaded {} wallets from {}",
        wallets.len(),
        config.wallets_path.display()
    );

    let mut results = Vec::with_capacity(wallets.len());
    for wallet in &wallets {
        info!("activating node for wallet [{}]", wallet.address);

        let outcome = match activate_wallet(config, wallet).await {
            Ok((tx_hash, block_number)) => {
                info!("tx confirmed, included in block [{block_number}]");
                ActivationOutcome::Confirmed {
                    tx_hash,
                    block_number,
                }
            }
            Err(err) => {
                match &err {
                    ActivationError::InvalidKey => {
                        warn!("wallet [{}] has an invalid private key, skipping", wallet.address);
                    }
                    ActivationError::InsufficientFunds => {
                        error!("wallet [{}] has insufficient funds", wallet.address);
                    }
                    ActivationError::CallException => {
                        warn!("call exception occurred for wallet [{}]", wallet.address);
                    }
                    ActivationError::Other(message) => {
                        error!("error activating wallet [{}]: {message}", wallet.address);
                    }
                }
                ActivationOutcome::Failed(err)
            }
        };

        results.push(ActivationResult {
            address: wallet.address.clone(),
            outcome,
        });
    }
    Ok(results)
}

async fn activate_wallet(
    config: &Config,
    record: &WalletRecord,
) -> Result<(TxHash, u64), ActivationError> {
    // The original computed this validity check and ignored the result;
    // here an unparsable key skips the wallet instead.
    let signer: PrivateKeySigner = record
        .private_key
        .parse()
        .map_err(|_| ActivationError::InvalidKey)?;

    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .connect_http(config.rpc_url.clone());

    let fees = provider
        .estimate_eip1559_fees()
        .await
        .map_err(|err| ActivationError::from_signal(err.to_string()))?;

    let tx = TransactionRequest::default()
        .with_to(config.activation_contract)
        .with_input(config.activation_calldata.clone())
        .with_chain_id(config.chain_id)
        .with_gas_limit(pick_gas_limit(&mut rand::thread_rng()))
        .with_max_fee_per_gas(fees.max_fee_per_gas)
        .with_max_priority_fee_per_gas(fees.max_priority_fee_per_gas);

    let pending = provider
        .send_transaction(tx)
        .await
        .map_err(|err| ActivationError::from_signal(err.to_string()))?;
    let tx_hash = *pending.tx_hash();
    info!("tx sent: {}{tx_hash}", config.explorer_tx_url);

    let receipt = pending
        .with_required_confirmations(1)
        .get_receipt()
        .await
        .map_err(|err| ActivationError::from_signal(err.to_string()))?;

    Ok((tx_hash, receipt.block_number.unwrap_or_default()))
}
