//! High-level SDK for asset anchoring.
//!
//! [`AssetRepository`] turns assets into ledger transactions and rebuilds
//! assets from what a [`LedgerClient`] reports at their address. This is the
//! main entry point for applications anchoring assets.

pub mod config;
pub mod error;
pub mod reconstruct;
pub mod repository;

pub use config::RepositoryConfig;
pub use error::{SdkError, SdkResult};
pub use reconstruct::ReconstructionEngine;
pub use repository::AssetRepository;

// Re-export key types
pub use anchor_asset::{Asset, AssetCommand};
pub use anchor_crypto::AssetIdentity;
pub use anchor_ledger::{Deadline, InMemoryLedger, LedgerClient};
pub use anchor_types::{Address, Metadata, MetadataValue, NetworkType, PublicAccount, PublicKey};
