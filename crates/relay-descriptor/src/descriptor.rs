//! Descriptor generation.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use relay_core::ArtifactStore;
use serde::{Deserialize, Serialize};

use crate::{deployment::Deployment, error::DescriptorError};

/// Canonical record of one relay deployment.
///
/// Every field is re-derivable from the [`Deployment`] it was generated
/// from; address fields are rendered EIP-55 checksummed and hashes lowercase
/// at generation time, so all encodings of one descriptor agree byte for
/// byte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Descriptor {
    /// Network name.
    pub network: String,
    /// Chain id.
    pub chain_id: u64,
    /// Checksummed contract address.
    pub contract_address: String,
    /// Full contract ABI as structured JSON.
    #[serde(rename = "contractABI")]
    pub contract_abi: serde_json::Value,
    /// Checksummed deployer address.
    pub deployer_address: String,
    /// Raw signing credential, omitted when redacted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    /// RPC endpoint.
    pub rpc_url: String,
    /// Block-explorer base URL, used to derive the explorer link fields.
    pub explorer_url: String,
    /// Confirmation block number.
    pub block_number: u64,
    /// Constructor transaction hash, lowercase `0x` hex.
    pub transaction_hash: String,
    /// Gas used, as a decimal string.
    pub gas_used: String,
    /// ISO-8601 generation timestamp.
    pub deployed_at: String,
}

impl Descriptor {
    /// Generate the descriptor for a confirmed deployment.
    ///
    /// Pure aside from reading the ABI out of `store`; fails with
    /// [`DescriptorError::Unconfirmed`] for a pending deployment and
    /// propagates [`relay_core::CoreError::ArtifactNotFound`] when the ABI
    /// cannot be located.
    pub fn generate(
        deployment: &Deployment,
        store: &ArtifactStore,
    ) -> Result<Self, DescriptorError> {
        Self::generate_at(deployment, store, Utc::now())
    }

    /// Like [`Descriptor::generate`] with an explicit timestamp.
    pub fn generate_at(
        deployment: &Deployment,
        store: &ArtifactStore,
        generated_at: DateTime<Utc>,
    ) -> Result<Self, DescriptorError> {
        let block_number =
            deployment
                .block_number
                .ok_or_else(|| DescriptorError::Unconfirmed {
                    tx_hash: format!("{:#x}", deployment.tx_hash),
                })?;
        let artifact = store.for_variant(deployment.variant)?;

        Ok(Self {
            network: deployment.network.clone(),
            chain_id: deployment.chain_id,
            contract_address: deployment.address.to_checksum(None),
            contract_abi: artifact.abi,
            deployer_address: deployment.deployer.to_checksum(None),
            private_key: deployment.private_key.clone(),
            rpc_url: deployment.rpc_url.to_string(),
            explorer_url: deployment.explorer_url.to_string(),
            block_number,
            transaction_hash: format!("{:#x}", deployment.tx_hash),
            gas_used: deployment.gas_used.to_string(),
            deployed_at: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }

    /// Copy of this descriptor with the signing credential removed.
    pub fn redacted(&self) -> Self {
        Self {
            private_key: None,
            ..self.clone()
        }
    }

    /// Explorer link for the contract address.
    pub fn contract_url(&self) -> String {
        format!(
            "{}/address/{}",
            self.explorer_url.trim_end_matches('/'),
            self.contract_address
        )
    }

    /// Explorer link for the constructor transaction.
    pub fn tx_url(&self) -> String {
        format!(
            "{}/tx/{}",
            self.explorer_url.trim_end_matches('/'),
            self.transaction_hash
        )
    }

    /// Load a descriptor from its JSON encoding.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DescriptorError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
