use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Ledger network an address belongs to.
///
/// The identifier byte is the first byte of every decoded address, so the
/// same public key yields a different address on each network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkType {
    MainNet,
    TestNet,
    Mijin,
    MijinTest,
}

impl NetworkType {
    pub const ALL: [NetworkType; 4] = [
        NetworkType::MainNet,
        NetworkType::TestNet,
        NetworkType::Mijin,
        NetworkType::MijinTest,
    ];

    /// The identifier byte prepended to the address hash.
    pub const fn identifier(self) -> u8 {
        match self {
            Self::MainNet => 0x68,
            Self::TestNet => 0x98,
            Self::Mijin => 0x60,
            Self::MijinTest => 0x90,
        }
    }

    /// Resolve a network from its identifier byte.
    pub fn from_identifier(byte: u8) -> Result<Self, TypeError> {
        Self::ALL
            .into_iter()
            .find(|n| n.identifier() == byte)
            .ok_or(TypeError::UnknownNetwork(byte))
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::MainNet => "main_net",
            Self::TestNet => "test_net",
            Self::Mijin => "mijin",
            Self::MijinTest => "mijin_test",
        }
    }
}

impl Default for NetworkType {
    fn default() -> Self {
        Self::MijinTest
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NetworkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|n| n.name() == normalized)
            .ok_or_else(|| format!("unknown network: {s}"))
    }
}
