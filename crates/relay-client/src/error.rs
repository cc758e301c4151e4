//! Error types for the relay client.

use alloy_primitives::B256;
use relay_core::{CoreError, RelayError};
use thiserror::Error;

/// Low-level chain interface errors.
#[derive(Debug, Clone, Error)]
pub enum RpcError {
    /// The transaction reverted; carries the verbatim reason from the chain.
    #[error("transaction reverted: {reason}")]
    Reverted {
        /// Revert reason as reported by the endpoint.
        reason: String,
    },

    /// The endpoint refused the transaction before execution
    /// (e.g. insufficient funds, unknown bytecode on the dev chain).
    #[error("transaction rejected: {0}")]
    Rejected(String),

    /// Transport or protocol failure.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Per-operation errors of the relay client.
///
/// None of these are retried automatically: retrying a chain transaction
/// changes its identity and cost.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The host chain rejected the constructor transaction; the reason is
    /// surfaced verbatim.
    #[error("deployment reverted: {reason}")]
    DeploymentReverted {
        /// Reason reported by the chain.
        reason: String,
    },

    /// The relay contract rejected the call.
    #[error("relay rejected the call: {0}")]
    RelayRejected(RelayError),

    /// A confirmed transaction emitted no decodable `DataSentToTarget`
    /// event. Should not occur under correct contract behavior, but log
    /// shape cannot be assumed from external tooling.
    #[error("confirmed transaction {tx_hash} emitted no decodable DataSentToTarget event")]
    EventNotFound {
        /// Hash of the confirmed transaction.
        tx_hash: B256,
    },

    /// Chain interface failure.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// Contract artifact could not be loaded.
    #[error(transparent)]
    Artifact(#[from] CoreError),

    /// Configuration problem (bad key, unknown network, unreadable file).
    #[error("config error: {0}")]
    Config(String),

    /// TOML parse error in the network config file.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, ClientError>;
