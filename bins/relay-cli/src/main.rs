//! Command-line tooling for the data relay.
//!
//! Covers the operational surface around the relay contracts: deploying a
//! variant and exporting its deployment descriptor, invoking the relay,
//! checking balances, generating keypairs, and the zero-address negative
//! test. Success/failure is communicated via exit code 0/1 and
//! human-readable console output.

use std::path::PathBuf;

use alloy_primitives::{Address, B256, hex, utils::format_ether};
use alloy_signer_local::PrivateKeySigner;
use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use relay_client::{ClientError, Config, HttpRpc, Network, RelayClient};
use relay_core::{ArtifactStore, RelayError, Variant};
use relay_descriptor::{Descriptor, encode};
use url::Url;

#[derive(Parser)]
#[command(name = "relay-cli", about = "Deploy and drive the data relay contracts")]
struct Args {
    /// Path to a networks TOML file; built-in defaults cover sepolia and
    /// gnosis.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory holding the compiled contract artifacts.
    #[arg(long, global = true, default_value = "artifacts")]
    artifacts: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Deploy a relay variant and write its deployment descriptor.
    Deploy {
        /// Network to deploy to.
        #[arg(long, default_value = "sepolia")]
        network: String,
        /// Relay variant (admin or public).
        #[arg(long, default_value = "admin")]
        variant: Variant,
        /// Deployer private key.
        #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
        private_key: String,
        /// Override the configured RPC endpoint.
        #[arg(long, env = "RPC_URL")]
        rpc_url: Option<Url>,
        /// Directory for the descriptor files.
        #[arg(long, default_value = "deployments")]
        out: PathBuf,
        /// Keep the private key out of the generated descriptor files.
        #[arg(long)]
        redact_key: bool,
    },
    /// Send data through a deployed relay and print the decoded event.
    Interact {
        /// Descriptor JSON of the deployment to talk to.
        #[arg(long)]
        descriptor: PathBuf,
        /// Target address for the event.
        #[arg(long)]
        target: Address,
        /// Owner reference: 0x-prefixed bytes32 or a short label.
        #[arg(long, value_parser = parse_bytes32, default_value = "OWNER_001")]
        owner_param: B256,
        /// Action reference: 0x-prefixed bytes32 or a short label.
        #[arg(long, value_parser = parse_bytes32, default_value = "ACTION_REF_123")]
        action_ref: B256,
        /// Free-form topic string.
        #[arg(long, default_value = "Test Topic - Contract Interaction")]
        topic: String,
        /// Caller private key; falls back to the descriptor's embedded key.
        #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
        private_key: Option<String>,
    },
    /// Print an account balance.
    Balance {
        /// Network to query.
        #[arg(long, default_value = "sepolia")]
        network: String,
        /// Account to look up.
        #[arg(long)]
        address: Address,
        /// Override the configured RPC endpoint.
        #[arg(long, env = "RPC_URL")]
        rpc_url: Option<Url>,
    },
    /// Generate a fresh keypair and print faucet pointers.
    Keypair,
    /// Negative test: the relay must reject a zero-address target.
    CheckZeroAddress {
        /// Descriptor JSON of the deployment to test.
        #[arg(long)]
        descriptor: PathBuf,
        /// Caller private key; falls back to the descriptor's embedded key.
        #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
        private_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let store = ArtifactStore::new(&args.artifacts);

    match args.command {
        Command::Deploy {
            network,
            variant,
            private_key,
            rpc_url,
            out,
            redact_key,
        } => {
            let network = resolve_network(&config, &network, rpc_url)?;
            deploy(store, network, variant, private_key, out, redact_key).await
        }
        Command::Interact {
            descriptor,
            target,
            owner_param,
            action_ref,
            topic,
            private_key,
        } => {
            let (client, caller, contract) =
                client_for_descriptor(&descriptor, private_key, store)?;
            let event = client
                .invoke(contract, caller, target, owner_param, action_ref, &topic)
                .await?;
            println!("=== Event Details ===");
            println!("From:       {}", event.from.to_checksum(None));
            println!("To:         {}", event.to.to_checksum(None));
            println!("Owner:      {:#x}", event.owner_param);
            println!("Action Ref: {:#x}", event.action_ref);
            println!("Topic:      {}", event.topic);
            Ok(())
        }
        Command::Balance {
            network,
            address,
            rpc_url,
        } => {
            let network = resolve_network(&config, &network, rpc_url)?;
            let chain = HttpRpc::read_only(&network.rpc_url);
            let client = RelayClient::new(chain, store, network.clone());
            let balance = client.balance(address).await?;
            println!("Network: {} (chain id {})", network.name, network.chain_id);
            println!("Account: {}", address.to_checksum(None));
            println!("Balance: {} ETH", format_ether(balance));
            Ok(())
        }
        Command::Keypair => {
            let signer = PrivateKeySigner::random();
            println!("Address:     {}", signer.address().to_checksum(None));
            println!("Private key: 0x{}", hex::encode(signer.to_bytes()));
            println!();
            println!("Fund the address via a faucet before deploying:");
            for network in &config.networks {
                if let Some(faucet) = &network.faucet_url {
                    println!("  {}: {}", network.name, faucet);
                }
            }
            Ok(())
        }
        Command::CheckZeroAddress {
            descriptor,
            private_key,
        } => {
            let (client, caller, contract) =
                client_for_descriptor(&descriptor, private_key, store)?;
            let result = client
                .invoke(contract, caller, Address::ZERO, B256::ZERO, B256::ZERO, "")
                .await;
            match result {
                Err(ClientError::RelayRejected(RelayError::InvalidTarget)) => {
                    println!("OK: relay rejected the zero-address target");
                    Ok(())
                }
                Ok(_) => bail!("relay accepted a zero-address target"),
                Err(other) => Err(other.into()),
            }
        }
    }
}

async fn deploy(
    store: ArtifactStore,
    network: Network,
    variant: Variant,
    private_key: String,
    out: PathBuf,
    redact_key: bool,
) -> anyhow::Result<()> {
    let chain = HttpRpc::connect(&network.rpc_url, &private_key)?;
    let deployer = chain.address();
    let client = RelayClient::new(chain, store.clone(), network);

    let balance = client.balance(deployer).await?;
    println!("Deployer: {}", deployer.to_checksum(None));
    println!("Balance:  {} ETH", format_ether(balance));

    let mut deployment = client.deploy(variant, deployer).await?;
    if !redact_key {
        deployment.private_key = Some(private_key);
    }
    println!("Contract deployed to: {}", deployment.address.to_checksum(None));
    println!("Transaction hash:     {:#x}", deployment.tx_hash);

    if variant == Variant::Admin {
        let owner = client.owner_of(deployment.address).await?;
        println!("Contract owner:       {}", owner.to_checksum(None));
    }

    let descriptor = Descriptor::generate(&deployment, &store)?;
    let files = encode::write_all(&descriptor, &out)?;
    println!("Descriptor written:");
    for path in [&files.json, &files.env, &files.constants] {
        println!("  {}", path.display());
    }
    println!("View on explorer: {}", descriptor.contract_url());
    Ok(())
}

fn resolve_network(
    config: &Config,
    name: &str,
    rpc_override: Option<Url>,
) -> anyhow::Result<Network> {
    let mut network = config
        .network(name)
        .cloned()
        .with_context(|| format!("unknown network `{name}`"))?;
    if let Some(rpc_url) = rpc_override {
        network.rpc_url = rpc_url;
    }
    Ok(network)
}

/// Build a client (and caller identity) from a deployment descriptor.
fn client_for_descriptor(
    path: &PathBuf,
    private_key: Option<String>,
    store: ArtifactStore,
) -> anyhow::Result<(RelayClient<HttpRpc>, Address, Address)> {
    let descriptor = Descriptor::from_json_file(path)
        .with_context(|| format!("failed to load descriptor {}", path.display()))?;
    let key = private_key
        .or_else(|| descriptor.private_key.clone())
        .context("no private key: pass --private-key or set PRIVATE_KEY")?;
    let rpc_url: Url = descriptor.rpc_url.parse()?;
    let chain = HttpRpc::connect(&rpc_url, &key)?;
    let caller = chain.address();
    let contract: Address = descriptor
        .contract_address
        .parse()
        .context("descriptor has a malformed contract address")?;
    let network = Network {
        name: descriptor.network.clone(),
        chain_id: descriptor.chain_id,
        rpc_url,
        explorer_url: descriptor.explorer_url.parse()?,
        faucet_url: None,
    };
    Ok((RelayClient::new(chain, store, network), caller, contract))
}

/// Accept either a 0x-prefixed bytes32 or a short label that is right-padded
/// with zeros, like the original tooling's `encodeBytes32String`.
fn parse_bytes32(s: &str) -> Result<B256, String> {
    if s.starts_with("0x") {
        s.parse::<B256>().map_err(|e| e.to_string())
    } else if s.len() > 31 {
        Err("label too long for bytes32 (max 31 bytes)".to_string())
    } else {
        Ok(B256::right_padding_from(s.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bytes32_accepts_labels_and_hex() {
        let label = parse_bytes32("OWNER_001").unwrap();
        assert_eq!(&label[..9], b"OWNER_001");
        assert_eq!(label[9..], [0u8; 23]);

        let hex = parse_bytes32(
            "0x0101010101010101010101010101010101010101010101010101010101010101",
        )
        .unwrap();
        assert_eq!(hex, B256::repeat_byte(0x01));

        assert!(parse_bytes32("this label is far too long to fit in one word").is_err());
    }
}
