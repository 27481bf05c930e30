//! Tool and coolant data consumed by G-code generation.
//!
//! The tool model is deliberately trimmed to what the postprocessors need
//! for tool-change blocks and operation headers; cutting-parameter tables
//! and material mappings belong to the host application.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coolant mode commanded at the start of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cooling {
    /// No coolant
    #[default]
    Off,
    /// Mist cooling (M7)
    Mist,
    /// Flood cooling (M8)
    Flood,
}

impl Cooling {
    /// Stable name used in persisted records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Cooling::Off => "off",
            Cooling::Mist => "mist",
            Cooling::Flood => "flood",
        }
    }

    /// Parse a persisted record name; unknown names fall back to `Off`.
    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "mist" => Cooling::Mist,
            "flood" => Cooling::Flood,
            _ => Cooling::Off,
        }
    }
}

impl fmt::Display for Cooling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of the tool table referenced by operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolEntry {
    /// Tool number as addressed by T-words.
    pub number: u32,
    /// Human-readable tool name.
    pub name: String,
    /// Diameter at the tool tip (mm).
    #[serde(default)]
    pub tip_diameter: f64,
    /// Cutting-flute diameter (mm).
    #[serde(default)]
    pub flute_diameter: f64,
    /// Usable flute length (mm).
    #[serde(default)]
    pub flute_length: f64,
    /// Number of cutting flutes.
    #[serde(default)]
    pub num_flutes: u32,
}

impl ToolEntry {
    /// Create a named tool entry.
    pub fn new(number: u32, name: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
            tip_diameter: 0.0,
            flute_diameter: 0.0,
            flute_length: 0.0,
            num_flutes: 0,
        }
    }

    /// Set the tool geometry in one call.
    pub fn with_geometry(mut self, tip_diameter: f64, flute_diameter: f64, flute_length: f64) -> Self {
        debug_assert!(
            tip_diameter >= 0.0 && flute_diameter >= 0.0 && flute_length >= 0.0,
            "tool geometry must be non-negative"
        );
        self.tip_diameter = tip_diameter;
        self.flute_diameter = flute_diameter;
        self.flute_length = flute_length;
        self
    }
}

impl fmt::Display for ToolEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{} {} (d{:.3})", self.number, self.name, self.flute_diameter)
    }
}

/// Find a tool by number in a tool table.
pub fn find_tool<'a>(tools: &'a [ToolEntry], number: u32) -> Option<&'a ToolEntry> {
    tools.iter().find(|t| t.number == number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooling_round_trip() {
        for c in [Cooling::Off, Cooling::Mist, Cooling::Flood] {
            assert_eq!(Cooling::from_str_lossy(c.as_str()), c);
        }
        assert_eq!(Cooling::from_str_lossy("cryogenic"), Cooling::Off);
    }

    #[test]
    fn test_find_tool() {
        let tools = vec![
            ToolEntry::new(1, "center drill").with_geometry(2.0, 6.0, 12.0),
            ToolEntry::new(4, "twist drill 8.5").with_geometry(8.5, 8.5, 60.0),
        ];
        assert_eq!(find_tool(&tools, 4).map(|t| t.name.as_str()), Some("twist drill 8.5"));
        assert!(find_tool(&tools, 9).is_none());
    }
}
