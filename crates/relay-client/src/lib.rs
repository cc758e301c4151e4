//! Relay client - deploys the relay contracts and invokes their single
//! write operation over an abstract chain interface.
//!
//! The chain is an external collaborator reached through the minimal
//! [`ChainRpc`] trait: submit a transaction, read a receipt, run a read-only
//! call, estimate gas, read a balance. Two implementations ship here:
//!
//! - [`HttpRpc`] - a real EVM endpoint via the alloy provider stack, with
//!   signing delegated to a local wallet
//! - [`DevChain`] - an in-memory chain executing the [`relay_core`] state
//!   machines, used by tests and demos
//!
//! ## Example
//!
//! ```no_run
//! use alloy_primitives::{Address, B256};
//! use relay_client::{DevChain, Network, RelayClient};
//! use relay_core::{ArtifactStore, Variant};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = ArtifactStore::new("artifacts");
//! let chain = DevChain::new(31337, &store)?;
//! let deployer = Address::repeat_byte(0xAA);
//! chain.fund(deployer, DevChain::DEFAULT_BALANCE).await;
//!
//! let client = RelayClient::new(chain, store, Network::dev());
//! let deployment = client.deploy(Variant::Admin, deployer).await?;
//! let event = client
//!     .invoke(
//!         deployment.address,
//!         deployer,
//!         Address::repeat_byte(0xBB),
//!         B256::ZERO,
//!         B256::ZERO,
//!         "hello",
//!     )
//!     .await?;
//! assert_eq!(event.from, deployer);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod dev;
pub mod error;
pub mod http;
pub mod rpc;

// Re-export main types at crate root for convenience.
pub use client::RelayClient;
pub use config::{Config, Network};
pub use dev::DevChain;
pub use error::{ClientError, RpcError};
pub use http::HttpRpc;
pub use rpc::{ChainRpc, TxReceipt, TxRequest};

// Re-export the deployment record the client produces.
pub use relay_descriptor::Deployment;
