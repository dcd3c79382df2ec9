use std::fs;
use std::path::Path;

use eyre::{Context, Result};
use serde::Deserialize;

/// One entry of the wallet list file. Field names match the original
/// `wallets.json` layout.
#[derive(Debug, Clone, Deserialize)]
pub struct WalletRecord {
    #[serde(rename = "wallet")]
    pub address: String,
    #[serde(rename = "privateKey")]
    pub private_key: String,
}

/// Reads the wallet list from `path`. Key validity is not checked here,
/// only that the file is a well-formed JSON array of records.
pub fn load_wallets(path: &Path) -> Result<Vec<WalletRecord>> {
    let raw = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read wallet file {}", path.display()))?;
    let wallets: Vec<WalletRecord> =
        serde_json::from_str(&raw).wrap_err("wallet file is not a valid JSON wallet list")?;
    Ok(wallets)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_wallet_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_records_in_order() {
        let file = write_wallet_file(
            r#"[
                {"wallet": "0xaaaa", "privateKey": "0x01"},
                {"wallet": "0xbbbb", "privateKey": "0x02"}
            ]"#,
        );
        let wallets = load_wallets(file.path()).unwrap();
        assert_eq!(wallets.len(), 2);
        assert_eq!(wallets[0].address, "0xaaaa");
        assert_eq!(wallets[1].address, "0xbbbb");
        assert_eq!(wallets[1].private_key, "0x02");
    }

    #[test]
    fn empty_list_is_valid() {
        let file = write_wallet_file("[]");
        assert!(load_wallets(file.path()).unwrap().is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let file = write_wallet_file("{ not json");
        assert!(load_wallets(file.path()).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_wallets(Path::new("/nonexistent/wallets.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/wallets.json"));
    }
}
