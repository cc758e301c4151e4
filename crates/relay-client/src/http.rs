//! HTTP chain interface via the alloy provider stack.
//!
//! Transaction construction and signing are delegated entirely to alloy:
//! the provider fills gas, nonce and chain id, and a local wallet signs.

use alloy_network::EthereumWallet;
use alloy_primitives::{Address, B256, Bytes, TxKind, U256};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_types_eth::{TransactionReceipt, TransactionRequest};
use alloy_signer_local::PrivateKeySigner;
use url::Url;

use crate::{
    error::{ClientError, RpcError},
    rpc::{ChainRpc, TxReceipt, TxRequest},
};

/// Chain interface backed by a real EVM JSON-RPC endpoint.
#[derive(Clone, Debug)]
pub struct HttpRpc {
    provider: DynProvider,
    address: Address,
}

impl HttpRpc {
    /// Connect to `rpc_url`, signing with `private_key` (`0x`-prefixed hex).
    pub fn connect(rpc_url: &Url, private_key: &str) -> Result<Self, ClientError> {
        let signer: PrivateKeySigner = private_key
            .parse()
            .map_err(|e| ClientError::Config(format!("invalid private key: {e}")))?;
        let address = signer.address();
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(rpc_url.clone())
            .erased();
        Ok(Self { provider, address })
    }

    /// Connect without a wallet, for read-only operations such as balance
    /// checks. Submitting through a read-only connection fails.
    pub fn read_only(rpc_url: &Url) -> Self {
        let provider = ProviderBuilder::new().connect_http(rpc_url.clone()).erased();
        Self {
            provider,
            address: Address::ZERO,
        }
    }

    /// Address of the signing wallet, zero for read-only connections.
    pub fn address(&self) -> Address {
        self.address
    }

    fn to_alloy(tx: &TxRequest) -> TransactionRequest {
        let mut request = TransactionRequest::default();
        request.from = Some(tx.from);
        request.to = Some(match tx.to {
            Some(address) => TxKind::Call(address),
            None => TxKind::Create,
        });
        request.value = Some(tx.value);
        request.input = tx.data.clone().into();
        request
    }
}

impl ChainRpc for HttpRpc {
    async fn chain_id(&self) -> Result<u64, RpcError> {
        self.provider.get_chain_id().await.map_err(transport)
    }

    async fn balance_of(&self, address: Address) -> Result<U256, RpcError> {
        self.provider.get_balance(address).await.map_err(transport)
    }

    async fn estimate_gas(&self, tx: &TxRequest) -> Result<u64, RpcError> {
        self.provider
            .estimate_gas(Self::to_alloy(tx))
            .await
            .map_err(classify)
    }

    async fn call(&self, tx: &TxRequest) -> Result<Bytes, RpcError> {
        self.provider
            .call(Self::to_alloy(tx))
            .await
            .map_err(classify)
    }

    async fn submit(&self, tx: TxRequest) -> Result<B256, RpcError> {
        let pending = self
            .provider
            .send_transaction(Self::to_alloy(&tx))
            .await
            .map_err(classify)?;
        Ok(*pending.tx_hash())
    }

    async fn receipt(&self, hash: B256) -> Result<Option<TxReceipt>, RpcError> {
        let receipt = self
            .provider
            .get_transaction_receipt(hash)
            .await
            .map_err(transport)?;
        Ok(receipt.map(convert_receipt))
    }
}

fn transport(err: impl std::fmt::Display) -> RpcError {
    RpcError::Transport(err.to_string())
}

/// Split endpoint errors into revert / rejection / transport buckets based
/// on the error text, since JSON-RPC error shapes vary between endpoints.
fn classify(err: impl std::fmt::Display) -> RpcError {
    let message = err.to_string();
    if message.contains("revert") {
        RpcError::Reverted { reason: message }
    } else if message.contains("insufficient funds") {
        RpcError::Rejected(message)
    } else {
        RpcError::Transport(message)
    }
}

fn convert_receipt(receipt: TransactionReceipt) -> TxReceipt {
    TxReceipt {
        tx_hash: receipt.transaction_hash,
        block_number: receipt.block_number,
        gas_used: receipt.gas_used,
        contract_address: receipt.contract_address,
        logs: receipt
            .inner
            .logs()
            .iter()
            .map(|log| log.inner.clone())
            .collect(),
        success: receipt.status(),
    }
}
