//! Network configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ClientError, Result};

/// Networks the relay tooling knows about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Configured networks.
    #[serde(default)]
    pub networks: Vec<Network>,
}

/// A single network endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    /// Network name (`sepolia`, `gnosis`, ...).
    pub name: String,
    /// Expected chain id; deployment cross-checks it against the endpoint.
    pub chain_id: u64,
    /// HTTP JSON-RPC URL.
    pub rpc_url: Url,
    /// Block-explorer base URL.
    pub explorer_url: Url,
    /// Faucet URL for test funds, if the network has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faucet_url: Option<Url>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ClientError::Config(format!(
                "failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Look up a network by name.
    pub fn network(&self, name: &str) -> Option<&Network> {
        self.networks.iter().find(|n| n.name == name)
    }
}

impl Default for Config {
    /// The two networks the original deployment tooling targeted.
    fn default() -> Self {
        Self {
            networks: vec![
                Network {
                    name: "sepolia".to_string(),
                    chain_id: 11155111,
                    rpc_url: parse("https://ethereum-sepolia-rpc.publicnode.com"),
                    explorer_url: parse("https://sepolia.etherscan.io"),
                    faucet_url: Some(parse("https://sepoliafaucet.com")),
                },
                Network {
                    name: "gnosis".to_string(),
                    chain_id: 100,
                    rpc_url: parse("https://rpc.gnosischain.com"),
                    explorer_url: parse("https://gnosisscan.io"),
                    faucet_url: Some(parse("https://gnosisfaucet.com")),
                },
            ],
        }
    }
}

impl Network {
    /// Network record for the in-memory dev chain.
    pub fn dev() -> Self {
        Self {
            name: "dev".to_string(),
            chain_id: 31337,
            rpc_url: parse("http://localhost:8545"),
            explorer_url: parse("http://localhost:8545"),
            faucet_url: None,
        }
    }
}

fn parse(url: &'static str) -> Url {
    // Only called on compile-time constants that are known-valid URLs.
    url.parse().expect("static url must parse")
}
