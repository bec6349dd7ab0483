//! Record codec for asset anchoring.
//!
//! An asset lives on the ledger as plain-text messages. Each message starts
//! with a prefix naming its kind and format version, followed by a payload:
//!
//! | Kind               | Prefix                                  | Payload                  |
//! |--------------------|-----------------------------------------|--------------------------|
//! | Asset definition   | `asset(1):`                             | `source,identifier`      |
//! | Metadata           | `metadata(1):`                          | `k1,v1.k2,v2...`         |
//! | Transfer ownership | `asset_command(transfer_ownership,1):`  | 64 hex chars (new owner) |
//!
//! There is no escaping. Metadata keys and string values must not contain
//! the delimiters, which is enforced where metadata is validated.

pub mod codec;
pub mod command;
pub mod error;
pub mod metadata;
pub mod record;

pub use codec::{AssetDefinition, Record, RecordCodec};
pub use command::CommandDescriptor;
pub use error::{CodecError, CodecResult};
pub use metadata::{decode_metadata, encode_metadata, extract_metadata, infer_value};
pub use record::{RecordHeader, RecordKind};
