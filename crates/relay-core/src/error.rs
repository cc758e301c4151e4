//! Error types for the relay core.

use std::io;

use thiserror::Error;

use crate::variant::Variant;

/// Validation failures of the relay contract itself.
///
/// These abort the triggering transaction atomically; no event is emitted and
/// no state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RelayError {
    /// The target address is the zero address.
    #[error("target cannot be zero address")]
    InvalidTarget,
    /// The caller is not the contract owner (admin variant only).
    #[error("caller is not the owner")]
    Unauthorized,
}

impl RelayError {
    /// The revert reason string the on-chain contract produces for this
    /// failure, as seen by RPC clients.
    pub fn revert_reason(&self, variant: Variant) -> String {
        match self {
            RelayError::InvalidTarget => {
                format!("{}: target cannot be zero address", variant.contract_name())
            }
            RelayError::Unauthorized => "OwnableUnauthorizedAccount".to_string(),
        }
    }

    /// Classify a raw revert reason back into a relay error.
    ///
    /// Returns `None` for reasons that did not originate from relay
    /// validation (e.g. out-of-gas or unrelated contract errors).
    pub fn from_revert_reason(reason: &str) -> Option<Self> {
        if reason.contains("target cannot be zero address") {
            Some(RelayError::InvalidTarget)
        } else if reason.contains("OwnableUnauthorizedAccount")
            || reason.contains("caller is not the owner")
        {
            Some(RelayError::Unauthorized)
        } else {
            None
        }
    }
}

/// Errors from chain-independent core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No artifact exists for the requested contract name.
    #[error("artifact for contract `{0}` not found")]
    ArtifactNotFound(String),

    /// The artifact file exists but does not describe a usable contract.
    #[error("malformed artifact for contract `{name}`: {reason}")]
    MalformedArtifact {
        /// Contract name the artifact was loaded for.
        name: String,
        /// What was wrong with it.
        reason: String,
    },

    /// I/O error reading an artifact.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revert_reasons_round_trip() {
        for variant in [Variant::Admin, Variant::Public] {
            for err in [RelayError::InvalidTarget, RelayError::Unauthorized] {
                let reason = err.revert_reason(variant);
                assert_eq!(RelayError::from_revert_reason(&reason), Some(err));
            }
        }
    }

    #[test]
    fn foreign_reasons_are_not_classified() {
        assert_eq!(RelayError::from_revert_reason("out of gas"), None);
        assert_eq!(RelayError::from_revert_reason(""), None);
    }
}
