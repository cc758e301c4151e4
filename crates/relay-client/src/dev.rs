//! In-memory dev chain.
//!
//! Executes the [`relay_core`] state machines directly, with sequential
//! blocks, per-transaction receipts and logs, and a flat gas model. Used by
//! the test suites and demos in place of a real node. Like most dev nodes it
//! pre-executes transactions and rejects a reverting one at submission,
//! carrying the contract's revert reason.

use std::{collections::HashMap, sync::Arc};

use alloy_primitives::{Address, B256, Bytes, U256, keccak256};
use alloy_sol_types::SolCall;
use relay_core::{ArtifactStore, CoreError, RelayContract, Variant, abi};
use tokio::sync::Mutex;

use crate::{
    error::RpcError,
    rpc::{ChainRpc, TxReceipt, TxRequest},
};

/// Flat gas price charged per unit of gas, in wei.
const GAS_PRICE: u64 = 1_000_000_000;

/// In-memory chain holding relay contract instances.
///
/// Cheap to clone; clones share the same chain state.
#[derive(Clone)]
pub struct DevChain {
    chain_id: u64,
    code: Arc<Vec<(Bytes, Variant)>>,
    state: Arc<Mutex<ChainState>>,
}

#[derive(Default)]
struct ChainState {
    height: u64,
    nonce: u64,
    balances: HashMap<Address, U256>,
    contracts: HashMap<Address, RelayContract>,
    receipts: HashMap<B256, TxReceipt>,
}

impl DevChain {
    /// 10 ETH in wei, a comfortable default for funded test accounts.
    pub const DEFAULT_BALANCE: U256 = U256::from_limbs([0x8ac7230489e80000, 0, 0, 0]);

    /// Create a chain that recognizes the constructor bytecode of both
    /// relay variants from `store`.
    pub fn new(chain_id: u64, store: &ArtifactStore) -> Result<Self, CoreError> {
        let mut code = Vec::new();
        for variant in [Variant::Admin, Variant::Public] {
            let artifact = store.for_variant(variant)?;
            code.push((artifact.bytecode, variant));
        }
        Ok(Self {
            chain_id,
            code: Arc::new(code),
            state: Arc::new(Mutex::new(ChainState::default())),
        })
    }

    /// Credit `address` with `amount` wei.
    pub async fn fund(&self, address: Address, amount: U256) {
        let mut state = self.state.lock().await;
        let balance = state.balances.entry(address).or_default();
        *balance += amount;
    }

    /// Current block height.
    pub async fn height(&self) -> u64 {
        self.state.lock().await.height
    }

    fn intrinsic_gas(tx: &TxRequest) -> u64 {
        let creation = if tx.to.is_none() { 32_000 } else { 0 };
        21_000 + creation + tx.data.len() as u64 * 16
    }
}

impl ChainRpc for DevChain {
    async fn chain_id(&self) -> Result<u64, RpcError> {
        Ok(self.chain_id)
    }

    async fn balance_of(&self, address: Address) -> Result<U256, RpcError> {
        let state = self.state.lock().await;
        Ok(state.balances.get(&address).copied().unwrap_or_default())
    }

    async fn estimate_gas(&self, tx: &TxRequest) -> Result<u64, RpcError> {
        Ok(Self::intrinsic_gas(tx))
    }

    async fn call(&self, tx: &TxRequest) -> Result<Bytes, RpcError> {
        let state = self.state.lock().await;
        let to = tx
            .to
            .ok_or_else(|| RpcError::Rejected("call requires a target".to_string()))?;
        let contract = state
            .contracts
            .get(&to)
            .ok_or_else(|| RpcError::Rejected(format!("no contract at {to}")))?;

        if abi::getAdminCall::abi_decode(&tx.data).is_ok() {
            // Only the admin variant exposes an owner.
            let owner = contract.owner().ok_or_else(|| RpcError::Reverted {
                reason: "execution reverted".to_string(),
            })?;
            let word = B256::left_padding_from(owner.as_slice());
            return Ok(Bytes::from(word.to_vec()));
        }
        Err(RpcError::Reverted {
            reason: "execution reverted".to_string(),
        })
    }

    async fn submit(&self, tx: TxRequest) -> Result<B256, RpcError> {
        let mut state = self.state.lock().await;

        let gas = Self::intrinsic_gas(&tx);
        let cost = U256::from(gas) * U256::from(GAS_PRICE) + tx.value;
        let balance = state.balances.get(&tx.from).copied().unwrap_or_default();
        if balance < cost {
            return Err(RpcError::Rejected(format!(
                "insufficient funds for gas * price + value: have {balance}, want {cost}"
            )));
        }

        // Execute before charging anything, dev-node style: a reverting
        // transaction is rejected outright and never included.
        let (contract_address, logs) = match tx.to {
            None => {
                let variant = self
                    .code
                    .iter()
                    .find(|(code, _)| *code == tx.data)
                    .map(|(_, variant)| *variant)
                    .ok_or_else(|| {
                        RpcError::Rejected("unknown constructor bytecode".to_string())
                    })?;
                let address = derive_address(tx.from, state.nonce);
                state
                    .contracts
                    .insert(address, RelayContract::new(variant, tx.from));
                (Some(address), Vec::new())
            }
            Some(to) => {
                let contract = state
                    .contracts
                    .get(&to)
                    .ok_or_else(|| RpcError::Rejected(format!("no contract at {to}")))?;
                let call = abi::sendDataToTargetCall::abi_decode(&tx.data).map_err(|_| {
                    RpcError::Rejected("unknown function selector".to_string())
                })?;
                let event = contract
                    .send_data(tx.from, call.target, call.ownerParam, call.actref, &call.topic)
                    .map_err(|err| RpcError::Reverted {
                        reason: err.revert_reason(contract.variant()),
                    })?;
                (None, vec![event.to_log(to)])
            }
        };

        let tx_hash = derive_tx_hash(&tx, state.nonce);
        state.height += 1;
        state.nonce += 1;
        *state.balances.entry(tx.from).or_default() -= cost;

        let receipt = TxReceipt {
            tx_hash,
            block_number: Some(state.height),
            gas_used: gas,
            contract_address,
            logs,
            success: true,
        };
        state.receipts.insert(tx_hash, receipt);
        Ok(tx_hash)
    }

    async fn receipt(&self, hash: B256) -> Result<Option<TxReceipt>, RpcError> {
        let state = self.state.lock().await;
        Ok(state.receipts.get(&hash).cloned())
    }
}

fn derive_address(from: Address, nonce: u64) -> Address {
    let mut preimage = from.to_vec();
    preimage.extend_from_slice(&nonce.to_be_bytes());
    Address::from_slice(&keccak256(&preimage)[12..])
}

fn derive_tx_hash(tx: &TxRequest, nonce: u64) -> B256 {
    let mut preimage = tx.from.to_vec();
    preimage.extend_from_slice(&nonce.to_be_bytes());
    if let Some(to) = tx.to {
        preimage.extend_from_slice(to.as_slice());
    }
    preimage.extend_from_slice(&tx.data);
    keccak256(&preimage)
}
