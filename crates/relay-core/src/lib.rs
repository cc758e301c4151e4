//! Core model of the data relay contracts.
//!
//! This crate contains everything that is chain-independent about the relay:
//! - The two contract variants ([`Variant::Admin`] and [`Variant::Public`])
//!   and their authorization state machine ([`RelayContract`])
//! - The [`DataSent`] event record with typed decode-or-skip log parsing
//! - The Solidity interface ([`abi`]) used for calldata and log encoding
//! - The [`ArtifactStore`] that resolves contract names to ABI + bytecode
//!
//! ## Example
//!
//! ```
//! use alloy_primitives::{Address, B256};
//! use relay_core::{RelayContract, RelayError, Variant};
//!
//! let owner = Address::repeat_byte(0xAA);
//! let relay = RelayContract::new(Variant::Admin, owner);
//!
//! let event = relay
//!     .send_data(owner, Address::repeat_byte(0xBB), B256::ZERO, B256::ZERO, "greeting")
//!     .unwrap();
//! assert_eq!(event.from, owner);
//!
//! let err = relay
//!     .send_data(owner, Address::ZERO, B256::ZERO, B256::ZERO, "greeting")
//!     .unwrap_err();
//! assert_eq!(err, RelayError::InvalidTarget);
//! ```

pub mod abi;
pub mod artifact;
pub mod contract;
pub mod error;
pub mod event;
pub mod variant;

// Re-export main types at crate root for convenience.
pub use artifact::{Artifact, ArtifactStore};
pub use contract::RelayContract;
pub use error::{CoreError, RelayError};
pub use event::DataSent;
pub use variant::Variant;

// Re-export alloy primitives that appear in our public API.
pub use alloy_primitives::{Address, B256, Bytes, Log, LogData, U256};
