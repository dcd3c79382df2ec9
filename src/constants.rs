use alloy::primitives::{Address, address};

pub const ACTIVATION_CONTRACT_ADDRESS: Address =
    address!("B3eFE5105b835E5Dd9D206445Dbd66DF24b912AB");
// activate()
pub const ACTIVATION_METHOD_ID: &str = "0x0f15f4c0";

pub const RPC_URL: &str = "https://rpc-mainnet.taker.xyz";
pub const CHAIN_ID: u64 = 1125;
pub const TX_EXPLORER: &str = "https://explorer.taker.xyz/tx/";

// FILES
pub const WALLETS_FILE_PATH: &str = "wallets.json";

pub const GAS_LIMIT_MIN: u64 = 250_000;
pub const GAS_LIMIT_MAX: u64 = 500_000;

pub const DEFAULT_INTERVAL_SECS: u64 = 24 * 60 * 60;
