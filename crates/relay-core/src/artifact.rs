//! Compiled-contract artifact store.
//!
//! Maps a contract name to its ABI and deployment bytecode, loaded from
//! Hardhat-style `<name>.json` artifact files. Used by the client to build
//! constructor transactions and by the descriptor generator to embed the ABI.

use std::path::{Path, PathBuf};

use alloy_primitives::Bytes;
use serde::{Deserialize, Serialize};

use crate::{error::CoreError, variant::Variant};

/// Compiled contract artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// Name of the contract (`AdminContract` or `DataContract`).
    pub contract_name: String,
    /// Structured interface description, kept as raw JSON so it can be
    /// re-embedded in descriptors without reshaping.
    pub abi: serde_json::Value,
    /// Constructor bytecode submitted in the deployment transaction.
    pub bytecode: Bytes,
}

/// Lookup from contract name to its artifact on disk.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Create a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory this store reads from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load the artifact for a relay variant.
    pub fn for_variant(&self, variant: Variant) -> Result<Artifact, CoreError> {
        self.load(variant.contract_name())
    }

    /// Load an artifact by contract name.
    ///
    /// Fails with [`CoreError::ArtifactNotFound`] if no artifact file exists
    /// and [`CoreError::MalformedArtifact`] if it cannot describe a contract.
    pub fn load(&self, name: &str) -> Result<Artifact, CoreError> {
        let path = self.dir.join(format!("{name}.json"));
        if !path.exists() {
            return Err(CoreError::ArtifactNotFound(name.to_string()));
        }
        let content = std::fs::read_to_string(&path)?;
        let artifact: Artifact =
            serde_json::from_str(&content).map_err(|e| CoreError::MalformedArtifact {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
        if !artifact.abi.is_array() {
            return Err(CoreError::MalformedArtifact {
                name: name.to_string(),
                reason: "abi is not an array".to_string(),
            });
        }
        if artifact.bytecode.is_empty() {
            return Err(CoreError::MalformedArtifact {
                name: name.to_string(),
                reason: "bytecode is empty".to_string(),
            });
        }
        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn write_artifact(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(format!("{name}.json")), content).unwrap();
    }

    #[test]
    fn loads_valid_artifact() {
        let dir = tempdir().unwrap();
        write_artifact(
            dir.path(),
            "AdminContract",
            r#"{"contractName":"AdminContract","abi":[],"bytecode":"0x6080"}"#,
        );
        let store = ArtifactStore::new(dir.path());
        let artifact = store.for_variant(Variant::Admin).unwrap();
        assert_eq!(artifact.contract_name, "AdminContract");
        assert_eq!(artifact.bytecode.as_ref(), &[0x60, 0x80]);
    }

    #[test]
    fn missing_artifact_is_not_found() {
        let store = ArtifactStore::new(tempdir().unwrap().path());
        assert!(matches!(
            store.load("AdminContract"),
            Err(CoreError::ArtifactNotFound(name)) if name == "AdminContract"
        ));
    }

    #[test]
    fn garbled_artifact_is_malformed() {
        let dir = tempdir().unwrap();
        write_artifact(dir.path(), "DataContract", "not json at all");
        let store = ArtifactStore::new(dir.path());
        assert!(matches!(
            store.for_variant(Variant::Public),
            Err(CoreError::MalformedArtifact { .. })
        ));
    }

    #[test]
    fn non_array_abi_is_malformed() {
        let dir = tempdir().unwrap();
        write_artifact(
            dir.path(),
            "DataContract",
            r#"{"contractName":"DataContract","abi":{},"bytecode":"0x6080"}"#,
        );
        let store = ArtifactStore::new(dir.path());
        assert!(matches!(
            store.for_variant(Variant::Public),
            Err(CoreError::MalformedArtifact { .. })
        ));
    }
}
