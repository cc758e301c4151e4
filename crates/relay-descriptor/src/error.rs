//! Error types for descriptor generation.

use std::io;

use relay_core::CoreError;
use thiserror::Error;

/// Errors from descriptor generation and encoding.
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// The deployment has no confirmed block number yet. Descriptors are
    /// only generated after confirmation.
    #[error("deployment {tx_hash} is not confirmed yet")]
    Unconfirmed {
        /// Hash of the pending constructor transaction.
        tx_hash: String,
    },

    /// The contract ABI could not be loaded from the artifact store.
    #[error(transparent)]
    Artifact(#[from] CoreError),

    /// Writing a descriptor file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
