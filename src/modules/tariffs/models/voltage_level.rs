use serde::{Serialize, Serializer};
use std::fmt;

/// Supply voltage band. The labels are the ones used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoltageLevel {
    /// MEA: below 12 kV
    Below12kV,
    /// MEA: 12 to 24 kV
    From12To24kV,
    /// PEA: below 22 kV
    Below22kV,
    /// PEA: 22 to 33 kV
    From22To33kV,
    /// Both providers: 69 kV and above
    AtLeast69kV,
}

impl VoltageLevel {
    pub fn label(&self) -> &'static str {
        match self {
            VoltageLevel::Below12kV => "<12kV",
            VoltageLevel::From12To24kV => "12-24kV",
            VoltageLevel::Below22kV => "<22kV",
            VoltageLevel::From22To33kV => "22-33kV",
            VoltageLevel::AtLeast69kV => ">=69kV",
        }
    }
}

impl fmt::Display for VoltageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for VoltageLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "<12kV" => Ok(VoltageLevel::Below12kV),
            "12-24kV" => Ok(VoltageLevel::From12To24kV),
            "<22kV" => Ok(VoltageLevel::Below22kV),
            "22-33kV" => Ok(VoltageLevel::From22To33kV),
            ">=69kV" => Ok(VoltageLevel::AtLeast69kV),
            _ => Err(format!("Invalid voltage level: {}", s)),
        }
    }
}

impl Serialize for VoltageLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
