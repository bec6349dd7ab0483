use std::path::PathBuf;

use anchor_types::NetworkType;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "anchor",
    about = "Asset Anchor: derive, encode and verify assets anchored in a ledger",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Repository config file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Network override: main_net, test_net, mijin or mijin_test
    #[arg(long, global = true)]
    pub network: Option<NetworkType>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Derive the public key and address of an asset
    Derive(DeriveArgs),
    /// Print the records that would define an asset
    Publish(AssetArgs),
    /// Decode a single ledger record
    Decode(DecodeArgs),
    /// Publish to an in-memory ledger and read the asset back
    Verify(VerifyArgs),
}

#[derive(Args)]
pub struct DeriveArgs {
    #[arg(long)]
    pub source: String,
    #[arg(long)]
    pub identifier: String,
}

#[derive(Args)]
pub struct AssetArgs {
    /// Owner public key (64 hex characters)
    #[arg(long)]
    pub owner: String,
    #[arg(long)]
    pub source: String,
    #[arg(long)]
    pub identifier: String,
    /// Metadata entry as key=value; repeatable
    #[arg(long = "meta", value_name = "KEY=VALUE")]
    pub metadata: Vec<String>,
}

#[derive(Args)]
pub struct DecodeArgs {
    pub record: String,
}

#[derive(Args)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub asset: AssetArgs,
    /// Also transfer ownership to this public key before reading back
    #[arg(long, value_name = "PUBLIC_KEY")]
    pub transfer_to: Option<String>,
}
