use serde::{Serialize, Serializer};
use std::fmt;

use super::TariffType;

/// Customer category used to pick the billing formula
///
/// Type 2 is a small general business billed on energy only. Types 3 to 5
/// (medium, large and specific business) carry a demand charge and a
/// power-factor penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalculationClass {
    Type2,
    Type3,
    Type4,
    Type5,
}

impl CalculationClass {
    pub const ALL: [CalculationClass; 4] = [
        CalculationClass::Type2,
        CalculationClass::Type3,
        CalculationClass::Type4,
        CalculationClass::Type5,
    ];

    /// Tariff types offered to this class, in the order error messages list them
    pub fn allowed_tariffs(&self) -> &'static [TariffType] {
        match self {
            CalculationClass::Type2 | CalculationClass::Type3 | CalculationClass::Type5 => {
                &[TariffType::Normal, TariffType::Tou]
            }
            CalculationClass::Type4 => &[TariffType::Tod, TariffType::Tou],
        }
    }

    pub fn supports(&self, tariff: TariffType) -> bool {
        self.allowed_tariffs().contains(&tariff)
    }

    /// Whether bills for this class carry a demand charge
    pub fn is_demand_billed(&self) -> bool {
        !matches!(self, CalculationClass::Type2)
    }

    pub fn number(&self) -> u8 {
        match self {
            CalculationClass::Type2 => 2,
            CalculationClass::Type3 => 3,
            CalculationClass::Type4 => 4,
            CalculationClass::Type5 => 5,
        }
    }

    /// Path segment form, e.g. `type-3`
    pub fn slug(&self) -> String {
        format!("type-{}", self.number())
    }
}

impl fmt::Display for CalculationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type {}", self.number())
    }
}

impl std::str::FromStr for CalculationClass {
    type Err = String;

    /// Accepts `type-3`, `type3`, `type_3` or `3`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let digits = lowered
            .strip_prefix("type")
            .map(|rest| rest.trim_start_matches(['-', '_']))
            .unwrap_or(&lowered);

        match digits {
            "2" => Ok(CalculationClass::Type2),
            "3" => Ok(CalculationClass::Type3),
            "4" => Ok(CalculationClass::Type4),
            "5" => Ok(CalculationClass::Type5),
            _ => Err(format!("Unknown calculation type: {}", s)),
        }
    }
}

impl Serialize for CalculationClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.slug())
    }
}
