//! The confirmed-deployment record produced by the relay client.

use alloy_primitives::{Address, B256};
use relay_core::Variant;
use url::Url;

/// Result of one relay deployment, as reported by the chain.
///
/// `block_number` is `None` while the constructor transaction is pending;
/// descriptor generation requires it to be set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    /// Which relay variant was deployed.
    pub variant: Variant,
    /// Network name (e.g. `sepolia`, `gnosis`).
    pub network: String,
    /// Chain id reported by the RPC endpoint.
    pub chain_id: u64,
    /// RPC endpoint the deployment went through.
    pub rpc_url: Url,
    /// Block-explorer base URL for the network.
    pub explorer_url: Url,
    /// Account that submitted the constructor transaction.
    pub deployer: Address,
    /// Address of the deployed contract instance.
    pub address: Address,
    /// Hash of the constructor transaction.
    pub tx_hash: B256,
    /// Block the constructor transaction was included in.
    pub block_number: Option<u64>,
    /// Gas consumed by the constructor transaction.
    pub gas_used: u64,
    /// Raw signing credential used for deployment, if the caller chose to
    /// propagate it into descriptors. See the credential warning in
    /// [`crate::encode::write_all`].
    pub private_key: Option<String>,
}
