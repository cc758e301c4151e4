//! The minimal chain interface the relay client depends on.

use alloy_primitives::{Address, B256, Bytes, Log, U256};

use crate::error::RpcError;

/// A transaction to submit or simulate.
///
/// `to == None` means contract creation with `data` as constructor bytecode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxRequest {
    /// Sender identity; on signing endpoints this must match the wallet.
    pub from: Address,
    /// Call target, or `None` for contract creation.
    pub to: Option<Address>,
    /// Calldata or constructor bytecode.
    pub data: Bytes,
    /// Value transferred with the call.
    pub value: U256,
}

/// Confirmed-transaction receipt in the shape the client needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    /// Transaction hash.
    pub tx_hash: B256,
    /// Inclusion block, `None` while pending.
    pub block_number: Option<u64>,
    /// Gas consumed.
    pub gas_used: u64,
    /// Created contract address for deployment transactions.
    pub contract_address: Option<Address>,
    /// Raw logs emitted by the transaction.
    pub logs: Vec<Log>,
    /// Whether execution succeeded.
    pub success: bool,
}

/// Abstract capability set the relay client requires from a chain:
/// submit a transaction, read its receipt, run a read-only call, estimate
/// gas, and read balances. Any RPC-compatible chain client satisfies this.
#[allow(async_fn_in_trait)]
pub trait ChainRpc: Send + Sync {
    /// Chain id of the connected network.
    async fn chain_id(&self) -> Result<u64, RpcError>;

    /// Balance of `address` in wei.
    async fn balance_of(&self, address: Address) -> Result<U256, RpcError>;

    /// Gas estimate for `tx`.
    async fn estimate_gas(&self, tx: &TxRequest) -> Result<u64, RpcError>;

    /// Execute `tx` read-only without submitting it.
    async fn call(&self, tx: &TxRequest) -> Result<Bytes, RpcError>;

    /// Submit `tx` for inclusion and return its hash.
    ///
    /// Endpoints that pre-execute (the dev chain, most dev nodes) reject a
    /// reverting transaction here with [`RpcError::Reverted`].
    async fn submit(&self, tx: TxRequest) -> Result<B256, RpcError>;

    /// Receipt for `hash`, `None` while the transaction is unknown or
    /// pending.
    async fn receipt(&self, hash: B256) -> Result<Option<TxReceipt>, RpcError>;
}
