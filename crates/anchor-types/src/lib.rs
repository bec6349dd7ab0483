//! Foundation types for asset anchoring.
//!
//! This crate provides the key, address, metadata, and evidence types used
//! throughout the workspace. Every other anchor crate depends on
//! `anchor-types`.
//!
//! # Key Types
//!
//! - [`PublicKey`]: 32-byte account key, rendered as uppercase hex
//! - [`Address`]: Network-qualified account address derived from a public key
//! - [`PublicAccount`]: A public key paired with its address
//! - [`NetworkType`]: Network identifier byte that prefixes every address
//! - [`Metadata`]: Ordered key/value collection attached to an asset
//! - [`Evidence`]: Block height and transaction hash proving persistence

mod base32;

pub mod account;
pub mod error;
pub mod evidence;
pub mod hash;
pub mod metadata;
pub mod network;

pub use account::{Address, PublicAccount, PublicKey};
pub use error::TypeError;
pub use evidence::Evidence;
pub use hash::Hash256;
pub use metadata::{Metadata, MetadataValue, RESERVED_CHARACTERS};
pub use network::NetworkType;
