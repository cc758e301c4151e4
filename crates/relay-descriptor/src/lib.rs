//! Deployment descriptors - the off-chain artifact describing one confirmed
//! relay deployment.
//!
//! A descriptor is generated exactly once per constructor transaction and
//! serialized into three byte-consistent encodings so downstream consumers
//! can load the deployment without re-deriving it:
//!
//! 1. `<network>-deployment.json` - structured record
//! 2. `<network>.env` - flat `KEY=value` file
//! 3. `constants.rs` - Rust constants embedding the same data
//!
//! Descriptor generation is a separate failure domain from deployment: a
//! failure here is reported to the caller and never retried, and it never
//! rolls back the already-confirmed deployment.

pub mod deployment;
pub mod descriptor;
pub mod encode;
pub mod error;

pub use deployment::Deployment;
pub use descriptor::Descriptor;
pub use encode::{DescriptorFiles, parse_env_str, write_all};
pub use error::DescriptorError;
