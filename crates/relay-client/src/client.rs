//! Deploy/invoke orchestration.

use std::time::Duration;

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::SolCall;
use relay_core::{ArtifactStore, DataSent, RelayError, Variant, abi};
use relay_descriptor::Deployment;
use tracing::{debug, info, warn};

use crate::{
    config::Network,
    error::{ClientError, Result, RpcError},
    rpc::{ChainRpc, TxReceipt, TxRequest},
};

/// Balance below which a deployment logs a funding warning (0.01 ETH).
const LOW_BALANCE: U256 = U256::from_limbs([10_000_000_000_000_000, 0, 0, 0]);

/// Interval between receipt polls while waiting for confirmation.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// High-level relay operations over an abstract chain.
///
/// Each operation is independent: concurrent invocations may succeed or fail
/// individually, and results are reported per call. No operation is retried
/// automatically. No timeout is enforced here; callers bound how long they
/// wait for confirmation.
pub struct RelayClient<C> {
    chain: C,
    store: ArtifactStore,
    network: Network,
}

impl<C: ChainRpc> RelayClient<C> {
    /// Create a client for `network`, resolving artifacts from `store`.
    pub fn new(chain: C, store: ArtifactStore, network: Network) -> Self {
        Self {
            chain,
            store,
            network,
        }
    }

    /// The underlying chain interface.
    pub fn chain(&self) -> &C {
        &self.chain
    }

    /// Balance of `address` in wei.
    pub async fn balance(&self, address: Address) -> Result<U256> {
        Ok(self.chain.balance_of(address).await?)
    }

    /// Deploy a relay variant and wait for confirmation.
    ///
    /// Fails with [`ClientError::DeploymentReverted`] when the host chain
    /// rejects the constructor transaction, surfacing its reason verbatim.
    pub async fn deploy(&self, variant: Variant, deployer: Address) -> Result<Deployment> {
        let artifact = self.store.for_variant(variant)?;
        let chain_id = self.chain.chain_id().await?;
        if chain_id != self.network.chain_id {
            return Err(ClientError::Config(format!(
                "endpoint reports chain id {chain_id}, but network `{}` expects {}",
                self.network.name, self.network.chain_id
            )));
        }

        let balance = self.chain.balance_of(deployer).await?;
        if balance < LOW_BALANCE {
            warn!(%deployer, %balance, "low balance, deployment may fail");
        }

        let request = TxRequest {
            from: deployer,
            to: None,
            data: artifact.bytecode,
            value: U256::ZERO,
        };
        let gas_estimate = self.chain.estimate_gas(&request).await?;
        info!(
            contract = variant.contract_name(),
            network = %self.network.name,
            gas_estimate,
            "deploying relay contract"
        );

        let tx_hash = self.chain.submit(request).await.map_err(|err| match err {
            RpcError::Reverted { reason } => ClientError::DeploymentReverted { reason },
            RpcError::Rejected(reason) => ClientError::DeploymentReverted { reason },
            other => ClientError::Rpc(other),
        })?;
        debug!(%tx_hash, "constructor transaction submitted");

        let receipt = self.wait_for_receipt(tx_hash).await?;
        if !receipt.success {
            return Err(ClientError::DeploymentReverted {
                reason: "constructor transaction reverted".to_string(),
            });
        }
        let address = receipt.contract_address.ok_or_else(|| {
            ClientError::Rpc(RpcError::Transport(
                "confirmed deployment receipt carries no contract address".to_string(),
            ))
        })?;
        info!(%address, block = receipt.block_number, "deployment confirmed");

        Ok(Deployment {
            variant,
            network: self.network.name.clone(),
            chain_id,
            rpc_url: self.network.rpc_url.clone(),
            explorer_url: self.network.explorer_url.clone(),
            deployer,
            address,
            tx_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
            private_key: None,
        })
    }

    /// Invoke `sendDataToTarget` and decode the emitted event.
    ///
    /// Contract-level rejections surface as
    /// [`ClientError::RelayRejected`]; a confirmed transaction without a
    /// decodable event is [`ClientError::EventNotFound`].
    pub async fn invoke(
        &self,
        contract: Address,
        caller: Address,
        target: Address,
        owner_param: B256,
        action_ref: B256,
        topic: &str,
    ) -> Result<DataSent> {
        let call = abi::sendDataToTargetCall {
            target,
            ownerParam: owner_param,
            actref: action_ref,
            topic: topic.to_string(),
        };
        let request = TxRequest {
            from: caller,
            to: Some(contract),
            data: call.abi_encode().into(),
            value: U256::ZERO,
        };

        let tx_hash = self
            .chain
            .submit(request.clone())
            .await
            .map_err(|err| match err {
                RpcError::Reverted { reason } => classify_revert(reason),
                other => ClientError::Rpc(other),
            })?;
        debug!(%tx_hash, %contract, "sendDataToTarget submitted");

        let receipt = self.wait_for_receipt(tx_hash).await?;
        if !receipt.success {
            // Included but reverted (endpoints that do not pre-execute).
            // Re-run the call read-only to recover the revert reason.
            let reason = match self.chain.call(&request).await {
                Err(RpcError::Reverted { reason }) => reason,
                _ => "transaction reverted on-chain".to_string(),
            };
            return Err(classify_revert(reason));
        }
        let event = extract_event(&receipt, contract)?;
        info!(
            from = %event.from,
            to = %event.to,
            block = receipt.block_number,
            "data sent to target"
        );
        Ok(event)
    }

    /// Read the fixed owner of an admin-variant relay via `getAdmin`.
    pub async fn owner_of(&self, contract: Address) -> Result<Address> {
        let request = TxRequest {
            from: Address::ZERO,
            to: Some(contract),
            data: abi::getAdminCall {}.abi_encode().into(),
            value: U256::ZERO,
        };
        let returned = self.chain.call(&request).await?;
        abi::getAdminCall::abi_decode_returns(&returned)
            .map_err(|e| ClientError::Rpc(RpcError::Transport(format!("bad getAdmin return: {e}"))))
    }

    /// Poll until the chain reports a receipt for `hash`.
    async fn wait_for_receipt(&self, hash: B256) -> Result<TxReceipt> {
        loop {
            if let Some(receipt) = self.chain.receipt(hash).await? {
                return Ok(receipt);
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

/// Map a revert reason onto the contract's own errors where it matches,
/// keeping unrelated reverts in the RPC failure domain.
fn classify_revert(reason: String) -> ClientError {
    match RelayError::from_revert_reason(&reason) {
        Some(relay_err) => ClientError::RelayRejected(relay_err),
        None => ClientError::Rpc(RpcError::Reverted { reason }),
    }
}

/// Typed decode-or-skip over the receipt's logs: the first decodable
/// `DataSentToTarget` from `contract` wins, everything else is ignored.
fn extract_event(receipt: &TxReceipt, contract: Address) -> Result<DataSent> {
    receipt
        .logs
        .iter()
        .filter(|log| log.address == contract)
        .find_map(DataSent::decode_log)
        .ok_or(ClientError::EventNotFound {
            tx_hash: receipt.tx_hash,
        })
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Bytes, Log, LogData};

    use super::*;

    /// Chain that includes every transaction but marks it reverted, like an
    /// endpoint that does not pre-execute submissions.
    struct IncludedRevertChain {
        reason: Option<&'static str>,
    }

    impl ChainRpc for IncludedRevertChain {
        async fn chain_id(&self) -> std::result::Result<u64, RpcError> {
            Ok(31337)
        }

        async fn balance_of(&self, _: Address) -> std::result::Result<U256, RpcError> {
            Ok(U256::MAX)
        }

        async fn estimate_gas(&self, _: &TxRequest) -> std::result::Result<u64, RpcError> {
            Ok(21_000)
        }

        async fn call(&self, _: &TxRequest) -> std::result::Result<Bytes, RpcError> {
            match self.reason {
                Some(reason) => Err(RpcError::Reverted {
                    reason: reason.to_string(),
                }),
                None => Ok(Bytes::new()),
            }
        }

        async fn submit(&self, _: TxRequest) -> std::result::Result<B256, RpcError> {
            Ok(B256::repeat_byte(0x55))
        }

        async fn receipt(
            &self,
            hash: B256,
        ) -> std::result::Result<Option<TxReceipt>, RpcError> {
            Ok(Some(TxReceipt {
                tx_hash: hash,
                block_number: Some(1),
                gas_used: 21_000,
                contract_address: None,
                logs: Vec::new(),
                success: false,
            }))
        }
    }

    async fn invoke_on(chain: IncludedRevertChain) -> ClientError {
        let client = RelayClient::new(chain, ArtifactStore::new("artifacts"), Network::dev());
        client
            .invoke(
                Address::repeat_byte(0xC0),
                Address::repeat_byte(0x0A),
                Address::repeat_byte(0x0B),
                B256::ZERO,
                B256::ZERO,
                "x",
            )
            .await
            .unwrap_err()
    }

    #[tokio::test]
    async fn included_revert_is_classified_as_relay_rejection() {
        let err = invoke_on(IncludedRevertChain {
            reason: Some("execution reverted: AdminContract: target cannot be zero address"),
        })
        .await;
        assert!(matches!(
            err,
            ClientError::RelayRejected(RelayError::InvalidTarget)
        ));
    }

    #[tokio::test]
    async fn included_revert_without_reason_stays_in_rpc_domain() {
        let err = invoke_on(IncludedRevertChain { reason: None }).await;
        assert!(matches!(err, ClientError::Rpc(RpcError::Reverted { .. })));
    }

    fn receipt_with_logs(logs: Vec<Log>) -> TxReceipt {
        TxReceipt {
            tx_hash: B256::repeat_byte(0x77),
            block_number: Some(1),
            gas_used: 50_000,
            contract_address: None,
            logs,
            success: true,
        }
    }

    fn sample_event(contract: Address) -> Log {
        DataSent {
            from: Address::repeat_byte(0x0A),
            to: Address::repeat_byte(0x0B),
            owner_param: B256::repeat_byte(1),
            action_ref: B256::repeat_byte(2),
            topic: "t".to_string(),
        }
        .to_log(contract)
    }

    #[test]
    fn extract_skips_foreign_logs() {
        let contract = Address::repeat_byte(0xC0);
        let foreign = Log {
            address: contract,
            data: LogData::new_unchecked(vec![B256::repeat_byte(0xFF)], Bytes::new()),
        };
        let receipt = receipt_with_logs(vec![foreign, sample_event(contract)]);
        let event = extract_event(&receipt, contract).unwrap();
        assert_eq!(event.topic, "t");
    }

    #[test]
    fn extract_ignores_other_contracts() {
        let contract = Address::repeat_byte(0xC0);
        let other = sample_event(Address::repeat_byte(0xC1));
        let receipt = receipt_with_logs(vec![other]);
        assert!(matches!(
            extract_event(&receipt, contract),
            Err(ClientError::EventNotFound { .. })
        ));
    }

    #[test]
    fn confirmed_but_eventless_receipt_is_event_not_found() {
        let contract = Address::repeat_byte(0xC0);
        let receipt = receipt_with_logs(Vec::new());
        assert!(matches!(
            extract_event(&receipt, contract),
            Err(ClientError::EventNotFound { tx_hash }) if tx_hash == B256::repeat_byte(0x77)
        ));
    }
}
