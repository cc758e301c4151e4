//! The three descriptor encodings.
//!
//! Each encoding is rendered from the same [`Descriptor`] value, so shared
//! fields cannot drift between files. Regenerating after a redeploy
//! overwrites the previous files.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use tracing::{info, warn};

use crate::{descriptor::Descriptor, error::DescriptorError};

/// Paths of the files written for one descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorFiles {
    /// Structured JSON record.
    pub json: PathBuf,
    /// Flat `KEY=value` environment file.
    pub env: PathBuf,
    /// Rust constants source file.
    pub constants: PathBuf,
}

/// Write all three encodings of `descriptor` into `dir`.
///
/// Any failure is reported to the caller and never retried here: the
/// deployment behind the descriptor is already confirmed, and a descriptor
/// write failure must not be confused with a deployment failure.
pub fn write_all(
    descriptor: &Descriptor,
    dir: impl AsRef<Path>,
) -> Result<DescriptorFiles, DescriptorError> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    if descriptor.private_key.is_some() {
        // Inherited from the original artifact shape. Callers that do not
        // need it should pass a redacted descriptor instead.
        warn!(
            network = %descriptor.network,
            "descriptor embeds the raw deployment private key; \
             consider Descriptor::redacted() for downstream distribution"
        );
    }

    let files = DescriptorFiles {
        json: dir.join(format!("{}-deployment.json", descriptor.network)),
        env: dir.join(format!("{}.env", descriptor.network)),
        constants: dir.join("constants.rs"),
    };

    std::fs::write(&files.json, to_json(descriptor)?)?;
    std::fs::write(&files.env, to_env(descriptor))?;
    std::fs::write(&files.constants, to_rust_constants(descriptor)?)?;

    info!(
        network = %descriptor.network,
        contract = %descriptor.contract_address,
        dir = %dir.display(),
        "descriptor written in json, env and constants encodings"
    );
    Ok(files)
}

/// Pretty JSON encoding.
pub fn to_json(descriptor: &Descriptor) -> Result<String, DescriptorError> {
    Ok(serde_json::to_string_pretty(descriptor)?)
}

/// Flat `KEY=value` encoding with upper-snake-case keys.
pub fn to_env(d: &Descriptor) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "# Relay deployment configuration ({})\n# Generated on {}\n\n",
        d.network, d.deployed_at
    ));
    out.push_str("# Network Configuration\n");
    out.push_str(&format!("NETWORK={}\n", d.network));
    out.push_str(&format!("CHAIN_ID={}\n", d.chain_id));
    out.push_str(&format!("RPC_URL={}\n\n", d.rpc_url));
    out.push_str("# Contract Information\n");
    out.push_str(&format!("CONTRACT_ADDRESS={}\n", d.contract_address));
    out.push_str(&format!("DEPLOYER_ADDRESS={}\n\n", d.deployer_address));
    out.push_str("# Transaction Information\n");
    out.push_str(&format!("DEPLOYMENT_TX_HASH={}\n", d.transaction_hash));
    out.push_str(&format!("DEPLOYMENT_BLOCK={}\n", d.block_number));
    out.push_str(&format!("GAS_USED={}\n\n", d.gas_used));
    if let Some(key) = &d.private_key {
        out.push_str("# Private Key (keep secure!)\n");
        out.push_str(&format!("PRIVATE_KEY={key}\n\n"));
    }
    out.push_str("# Explorer Links\n");
    out.push_str(&format!("ETHERSCAN_CONTRACT_URL={}\n", d.contract_url()));
    out.push_str(&format!("ETHERSCAN_TX_URL={}\n", d.tx_url()));
    out
}

/// Rust constants encoding: the same fields as `pub const` bindings plus the
/// ABI serialized as a single JSON string constant.
pub fn to_rust_constants(d: &Descriptor) -> Result<String, DescriptorError> {
    let abi = serde_json::to_string(&d.contract_abi)?;
    let mut out = String::new();
    out.push_str(&format!(
        "//! Relay deployment constants for `{}`.\n//! Generated on {}.\n\n",
        d.network, d.deployed_at
    ));
    out.push_str("// Network configuration\n");
    out.push_str(&format!("pub const NETWORK: &str = {:?};\n", d.network));
    out.push_str(&format!("pub const CHAIN_ID: u64 = {};\n", d.chain_id));
    out.push_str(&format!("pub const RPC_URL: &str = {:?};\n\n", d.rpc_url));
    out.push_str("// Contract information\n");
    out.push_str(&format!(
        "pub const CONTRACT_ADDRESS: &str = {:?};\n",
        d.contract_address
    ));
    out.push_str(&format!(
        "pub const DEPLOYER_ADDRESS: &str = {:?};\n\n",
        d.deployer_address
    ));
    out.push_str("// Transaction information\n");
    out.push_str(&format!(
        "pub const DEPLOYMENT_TX_HASH: &str = {:?};\n",
        d.transaction_hash
    ));
    out.push_str(&format!(
        "pub const DEPLOYMENT_BLOCK: u64 = {};\n",
        d.block_number
    ));
    out.push_str(&format!("pub const GAS_USED: &str = {:?};\n\n", d.gas_used));
    if let Some(key) = &d.private_key {
        out.push_str("// Private key - keep secure, prefer environment variables\n");
        out.push_str(&format!("pub const PRIVATE_KEY: &str = {key:?};\n\n"));
    }
    out.push_str("// Contract ABI as a JSON string\n");
    out.push_str(&format!("pub const CONTRACT_ABI: &str = {abi:?};\n\n"));
    out.push_str("// Explorer links\n");
    out.push_str(&format!(
        "pub const ETHERSCAN_CONTRACT_URL: &str = {:?};\n",
        d.contract_url()
    ));
    out.push_str(&format!(
        "pub const ETHERSCAN_TX_URL: &str = {:?};\n",
        d.tx_url()
    ));
    Ok(out)
}

/// Parse the env encoding back into a key/value map.
///
/// Comment and blank lines are skipped; values are taken verbatim after the
/// first `=`.
pub fn parse_env_str(content: &str) -> BTreeMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let (key, value) = line.split_once('=')?;
            Some((key.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Address, B256};
    use relay_core::{ArtifactStore, Variant};
    use tempfile::tempdir;

    use super::*;
    use crate::deployment::Deployment;

    fn sample_descriptor(dir: &Path) -> Descriptor {
        std::fs::write(
            dir.join("DataContract.json"),
            r#"{"contractName":"DataContract","abi":[{"type":"constructor","inputs":[]}],"bytecode":"0x6080"}"#,
        )
        .unwrap();
        let deployment = Deployment {
            variant: Variant::Public,
            network: "gnosis".to_string(),
            chain_id: 100,
            rpc_url: "https://rpc.gnosischain.com".parse().unwrap(),
            explorer_url: "https://gnosisscan.io".parse().unwrap(),
            deployer: Address::repeat_byte(0x52),
            address: Address::repeat_byte(0x44),
            tx_hash: B256::repeat_byte(0x5b),
            block_number: Some(31_337_000),
            gas_used: 288_805,
            private_key: Some("0xsecret".to_string()),
        };
        Descriptor::generate(&deployment, &ArtifactStore::new(dir)).unwrap()
    }

    /// Pull a `pub const NAME: &str = "...";` value out of generated Rust.
    fn rust_const<'a>(source: &'a str, name: &str) -> Option<&'a str> {
        let line = source
            .lines()
            .find(|line| line.starts_with(&format!("pub const {name}: &str = ")))?;
        line.split('"').nth(1)
    }

    #[test]
    fn three_encodings_agree_on_shared_fields() {
        let dir = tempdir().unwrap();
        let descriptor = sample_descriptor(dir.path());

        let json: Descriptor = serde_json::from_str(&to_json(&descriptor).unwrap()).unwrap();
        let env = parse_env_str(&to_env(&descriptor));
        let constants = to_rust_constants(&descriptor).unwrap();

        assert_eq!(json.contract_address, descriptor.contract_address);
        assert_eq!(env["CONTRACT_ADDRESS"], descriptor.contract_address);
        assert_eq!(
            rust_const(&constants, "CONTRACT_ADDRESS").unwrap(),
            descriptor.contract_address
        );

        assert_eq!(json.chain_id, 100);
        assert_eq!(env["CHAIN_ID"], "100");
        assert!(constants.contains("pub const CHAIN_ID: u64 = 100;"));

        assert_eq!(json.transaction_hash, descriptor.transaction_hash);
        assert_eq!(env["DEPLOYMENT_TX_HASH"], descriptor.transaction_hash);
        assert_eq!(
            rust_const(&constants, "DEPLOYMENT_TX_HASH").unwrap(),
            descriptor.transaction_hash
        );
    }

    #[test]
    fn env_encoding_has_the_expected_keys() {
        let dir = tempdir().unwrap();
        let env = parse_env_str(&to_env(&sample_descriptor(dir.path())));
        for key in [
            "NETWORK",
            "CHAIN_ID",
            "RPC_URL",
            "CONTRACT_ADDRESS",
            "DEPLOYER_ADDRESS",
            "DEPLOYMENT_TX_HASH",
            "DEPLOYMENT_BLOCK",
            "GAS_USED",
            "PRIVATE_KEY",
            "ETHERSCAN_CONTRACT_URL",
            "ETHERSCAN_TX_URL",
        ] {
            assert!(env.contains_key(key), "missing key {key}");
        }
    }

    #[test]
    fn redacted_encodings_omit_the_key() {
        let dir = tempdir().unwrap();
        let redacted = sample_descriptor(dir.path()).redacted();

        assert!(!to_env(&redacted).contains("PRIVATE_KEY"));
        assert!(!to_rust_constants(&redacted).unwrap().contains("PRIVATE_KEY"));
        assert!(!to_json(&redacted).unwrap().contains("privateKey"));
    }

    #[test]
    fn write_all_round_trips_via_json_loader() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("deployments");
        let descriptor = sample_descriptor(dir.path());

        let files = write_all(&descriptor, &out).unwrap();
        assert_eq!(files.json, out.join("gnosis-deployment.json"));
        assert_eq!(files.env, out.join("gnosis.env"));
        assert_eq!(files.constants, out.join("constants.rs"));

        let loaded = Descriptor::from_json_file(&files.json).unwrap();
        assert_eq!(loaded, descriptor);
    }

    #[test]
    fn abi_constant_is_a_single_json_string() {
        let dir = tempdir().unwrap();
        let constants = to_rust_constants(&sample_descriptor(dir.path())).unwrap();
        let abi_line = constants
            .lines()
            .find(|line| line.starts_with("pub const CONTRACT_ABI"))
            .unwrap();
        // One line, embedding escaped JSON.
        assert!(abi_line.contains("\\\"type\\\":\\\"constructor\\\""));
    }
}
