use anchor_asset::{Asset, AssetCommand};
use anchor_codec::{infer_value, CommandDescriptor, Record, RecordCodec};
use anchor_crypto::AssetIdentity;
use anchor_ledger::InMemoryLedger;
use anchor_sdk::{AssetRepository, RepositoryConfig};
use anchor_types::{Metadata, MetadataValue, PublicAccount};
use anyhow::{bail, Context};
use colored::Colorize;
use serde_json::json;
use tracing::debug;

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    debug!(network = %config.network, replay = config.replay_commands, "configuration loaded");
    match cli.command {
        Command::Derive(args) => cmd_derive(args, &config, cli.format),
        Command::Publish(args) => cmd_publish(args, &config, cli.format),
        Command::Decode(args) => cmd_decode(args, cli.format),
        Command::Verify(args) => cmd_verify(args, config, cli.format).await,
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<RepositoryConfig> {
    let mut config = match &cli.config {
        Some(path) => RepositoryConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => RepositoryConfig::default(),
    };
    if let Some(network) = cli.network {
        config.network = network;
    }
    Ok(config)
}

/// Parse repeated `key=value` flags. Values are typed the way the ledger
/// decoder would type them.
fn parse_metadata(entries: &[String]) -> anyhow::Result<Metadata> {
    let mut metadata = Metadata::new();
    for entry in entries {
        let Some((key, value)) = entry.split_once('=') else {
            bail!("metadata entry {entry:?} is not KEY=VALUE");
        };
        metadata.insert(key, infer_value(value));
    }
    Ok(metadata)
}

fn build_asset(args: &AssetArgs, config: &RepositoryConfig) -> anyhow::Result<Asset> {
    let owner = PublicAccount::from_public_key(&args.owner, config.network)
        .context("invalid owner public key")?;
    let metadata = parse_metadata(&args.metadata)?;
    let asset = Asset::create(owner, &args.source, &args.identifier, metadata, config.network)?;
    Ok(asset)
}

fn cmd_derive(args: DeriveArgs, config: &RepositoryConfig, format: OutputFormat) -> anyhow::Result<()> {
    let identity = AssetIdentity::derive(&args.source, &args.identifier, config.network);
    match format {
        OutputFormat::Json => {
            let out = json!({
                "source": identity.source,
                "identifier": identity.identifier,
                "network": config.network.name(),
                "public_key": identity.public_key.to_hex(),
                "address": identity.address.plain(),
                "pretty": identity.address.pretty(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            println!("Asset {}:{}", identity.source.bold(), identity.identifier);
            println!("  Network:    {}", config.network.name().cyan());
            println!("  Public key: {}", identity.public_key.to_hex().yellow());
            println!("  Address:    {}", identity.address.pretty().green());
        }
    }
    Ok(())
}

fn cmd_publish(args: AssetArgs, config: &RepositoryConfig, format: OutputFormat) -> anyhow::Result<()> {
    let asset = build_asset(&args, config)?;
    let repo = AssetRepository::with_config(InMemoryLedger::new(), config.clone());
    let bundle = repo.publish(&asset, repo.deadline());

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&bundle)?),
        OutputFormat::Text => {
            println!("Bundle for {}", asset.address().pretty().green().bold());
            println!("  Signer:   {}", asset.owner().public_key.to_hex().yellow());
            println!("  Deadline: {}", bundle.deadline.timestamp().to_rfc3339());
            for (index, transfer) in bundle.inner_transfers().enumerate() {
                println!("  [{}] {}", index, transfer.message.payload());
            }
            println!("{}", "Not announced: sign and submit with your ledger client.".dimmed());
        }
    }
    Ok(())
}

fn cmd_decode(args: DecodeArgs, format: OutputFormat) -> anyhow::Result<()> {
    let record = RecordCodec::decode(&args.record)
        .with_context(|| format!("decoding {:?}", args.record))?;
    let kind = record.kind().name();

    match format {
        OutputFormat::Json => {
            let out = match &record {
                Record::AssetDefinition(definition) => json!({
                    "kind": kind,
                    "source": definition.source,
                    "identifier": definition.identifier,
                }),
                Record::Metadata(metadata) => {
                    let mut entries = serde_json::Map::new();
                    for (key, value) in metadata.iter() {
                        entries.insert(key.to_string(), serde_json::to_value(value)?);
                    }
                    json!({ "kind": kind, "entries": entries })
                }
                Record::Command(descriptor) => json!({ "kind": kind, "descriptor": descriptor }),
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            println!("{} {}", "✓".green().bold(), kind.bold());
            match &record {
                Record::AssetDefinition(definition) => {
                    println!("  Source:     {}", definition.source);
                    println!("  Identifier: {}", definition.identifier);
                }
                Record::Metadata(metadata) => {
                    for (key, value) in metadata.iter() {
                        let typed = match value {
                            MetadataValue::String(_) => "string",
                            MetadataValue::Number(_) => "number",
                            MetadataValue::Boolean(_) => "boolean",
                        };
                        println!("  {} = {} ({})", key.cyan(), value, typed.dimmed());
                    }
                }
                Record::Command(CommandDescriptor::TransferOwnership { new_owner }) => {
                    println!("  New owner: {}", new_owner.to_hex().yellow());
                }
            }
        }
    }
    Ok(())
}

async fn cmd_verify(args: VerifyArgs, config: RepositoryConfig, format: OutputFormat) -> anyhow::Result<()> {
    let asset = build_asset(&args.asset, &config)?;
    let repo = AssetRepository::with_config(InMemoryLedger::new(), config);

    let bundle = repo.publish(&asset, repo.deadline());
    let published = repo.client().announce(bundle.into(), asset.owner())?;
    debug!(height = published.height, hash = %published.hash, "asset bundle announced");

    let mut expected = asset.clone();
    if let Some(key) = &args.transfer_to {
        let new_owner = PublicAccount::from_public_key(key, repo.network())
            .context("invalid --transfer-to public key")?;
        let command = AssetCommand::transfer_ownership(new_owner);
        let tx = repo.publish_command(&asset, &command, repo.deadline());
        repo.client().announce(tx.into(), asset.owner())?;
        expected = command.apply(&asset);
    }

    let restored = repo.by_address(asset.address()).await?;
    let consistent = restored.identity() == expected.identity()
        && restored.owner() == expected.owner()
        && restored.metadata() == expected.metadata()
        && restored.commands().len() == expected.commands().len();

    match format {
        OutputFormat::Json => {
            let out = json!({ "consistent": consistent, "asset": restored });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            let mark = if consistent { "✓".green().bold() } else { "✗".red().bold() };
            println!("{} Asset {}", mark, restored.address().pretty().bold());
            println!("  Public key: {}", restored.public_key().to_hex().yellow());
            println!("  Owner:      {}", restored.owner().address.pretty().cyan());
            println!("  Metadata:   {} entries", restored.metadata().len());
            for command in restored.commands() {
                let evidence = command.evidence()?;
                println!(
                    "  Command:    {} at height {} ({})",
                    command.kind().name(),
                    evidence.block_height,
                    evidence.transaction_hash.to_hex().dimmed()
                );
            }
        }
    }

    if !consistent {
        bail!("reconstructed asset differs from the published one");
    }
    Ok(())
}
