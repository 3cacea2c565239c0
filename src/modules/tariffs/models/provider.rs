use serde::{Deserialize, Serialize};
use std::fmt;

use super::VoltageLevel;

/// Electricity distribution utilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Provider {
    /// Metropolitan Electricity Authority (Bangkok, Nonthaburi, Samut Prakan)
    MEA,
    /// Provincial Electricity Authority (rest of the country)
    PEA,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::MEA, Provider::PEA];

    /// Voltage levels served by this provider, lowest first
    pub fn voltage_levels(&self) -> &'static [VoltageLevel] {
        match self {
            Provider::MEA => &[
                VoltageLevel::Below12kV,
                VoltageLevel::From12To24kV,
                VoltageLevel::AtLeast69kV,
            ],
            Provider::PEA => &[
                VoltageLevel::Below22kV,
                VoltageLevel::From22To33kV,
                VoltageLevel::AtLeast69kV,
            ],
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::MEA => write!(f, "MEA"),
            Provider::PEA => write!(f, "PEA"),
        }
    }
}

impl std::str::FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "MEA" => Ok(Provider::MEA),
            "PEA" => Ok(Provider::PEA),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}
