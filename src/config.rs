use std::env;
use std::path::PathBuf;
use std::time::Duration;

use alloy::primitives::{Address, Bytes};
use eyre::{Context, Result};
use reqwest::Url;

use crate::constants::{
    ACTIVATION_CONTRACT_ADDRESS, ACTIVATION_METHOD_ID, CHAIN_ID, DEFAULT_INTERVAL_SECS, RPC_URL,
    TX_EXPLORER, WALLETS_FILE_PATH,
};

/// Runtime configuration, read once at startup. Every field has a
/// compiled-in default and can be overridden through the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub rpc_url: Url,
    pub chain_id: u64,
    pub activation_contract: Address,
    pub activation_calldata: Bytes,
    pub explorer_tx_url: String,
    pub wallets_path: PathBuf,
    pub interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let rpc_url = lookup("RPC_URL")
            .unwrap_or_else(|| RPC_URL.to_string())
            .parse::<Url>()
            .wrap_err("RPC_URL is not a valid URL")?;

        let chain_id = match lookup("CHAIN_ID") {
            Some(raw) => raw.parse::<u64>().wrap_err("CHAIN_ID is not a number")?,
            None => CHAIN_ID,
        };

        let activation_contract = match lookup("ACTIVATION_CONTRACT") {
            Some(raw) => raw
                .parse::<Address>()
                .wrap_err("ACTIVATION_CONTRACT is not a valid address")?,
            None => ACTIVATION_CONTRACT_ADDRESS,
        };

        let activation_calldata = lookup("ACTIVATION_METHOD_ID")
            .unwrap_or_else(|| ACTIVATION_METHOD_ID.to_string())
            .parse::<Bytes>()
            .wrap_err("ACTIVATION_METHOD_ID is not valid hex calldata")?;

        let interval_secs = match lookup("ACTIVATION_INTERVAL_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .wrap_err("ACTIVATION_INTERVAL_SECS is not a number")?,
            None => DEFAULT_INTERVAL_SECS,
        };

        Ok(Self {
            rpc_url,
            chain_id,
            activation_contract,
            activation_calldata,
            explorer_tx_url: lookup("TX_EXPLORER").unwrap_or_else(|| TX_EXPLORER.to_string()),
            wallets_path: PathBuf::from(
                lookup("WALLETS_FILE").unwrap_or_else(|| WALLETS_FILE_PATH.to_string()),
            ),
            interval: Duration::from_secs(interval_secs),
        })
    }
}
