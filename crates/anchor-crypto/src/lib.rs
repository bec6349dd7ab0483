//! Hashing for asset anchoring.
//!
//! Provides the deterministic identity derivation that ties an application
//! `(source, identifier)` pair to a ledger account, and the content hash
//! sealed transactions are identified by.
//!
//! All crypto operations wrap established libraries.

pub mod hasher;
pub mod identity;

pub use hasher::{transaction_hash, HasherError};
pub use identity::{derive_address, derive_public_key, AssetIdentity};
