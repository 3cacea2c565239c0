use serde::{Deserialize, Serialize};
use std::fmt;

/// Regulatory tariff scheme, which decides the billing strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TariffType {
    /// Tiered or flat energy pricing, single demand reading
    Normal,
    /// Time-of-use: on-peak / off-peak energy, on-peak demand
    Tou,
    /// Time-of-day: three demand periods, flat energy
    Tod,
}

impl TariffType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TariffType::Normal => "normal",
            TariffType::Tou => "tou",
            TariffType::Tod => "tod",
        }
    }
}

impl fmt::Display for TariffType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TariffType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(TariffType::Normal),
            "tou" => Ok(TariffType::Tou),
            "tod" => Ok(TariffType::Tod),
            _ => Err(format!("Invalid tariff type: {}", s)),
        }
    }
}
