//! Asset aggregate for asset anchoring.
//!
//! An [`Asset`] is an immutable value: its identity, its current owner, its
//! metadata, and the commands applied to it so far. Every transition returns
//! a new asset with one more command appended.
//!
//! Commands are a closed set ([`AssetCommand`]). A command built locally has
//! no [`Evidence`](anchor_types::Evidence); one read back from the ledger
//! carries the block height and transaction hash it was found at.

pub mod asset;
pub mod command;
pub mod error;

pub use asset::Asset;
pub use command::AssetCommand;
pub use error::{AssetError, AssetResult};
