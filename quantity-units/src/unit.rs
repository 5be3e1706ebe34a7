//! Unit representation with conversion factors

use std::fmt;
use serde::{Deserialize, Serialize};
use quantity_core::QuantityError;
use crate::{Phenomenon, UnitSystem};

/// A unit as reported by the unit directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitProps {
    /// Unique key (e.g., "Units.M", "Units.SURVEY_FT")
    pub name: String,
    /// Display label (e.g., "m", "ft (US Survey)")
    pub label: String,
    /// Physical quantity family
    pub phenomenon: Phenomenon,
    /// Measurement system
    #[serde(default)]
    pub system: UnitSystem,
    /// Factor to the phenomenon base unit (base = value * factor + offset)
    pub factor: f64,
    /// Offset for affine units like temperature (Celsius, Fahrenheit)
    #[serde(default)]
    pub offset: f64,
    /// Aliases accepted when parsing
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternate_labels: Vec<String>,
}

impl UnitProps {
    /// Create a new unit with proportional conversion (no offset)
    pub fn new(
        name: &str,
        label: &str,
        phenomenon: Phenomenon,
        system: UnitSystem,
        factor: f64,
    ) -> Self {
        UnitProps {
            name: name.to_string(),
            label: label.to_string(),
            phenomenon,
            system,
            factor,
            offset: 0.0,
            alternate_labels: Vec::new(),
        }
    }

    /// Create a unit with offset (for temperature conversions)
    pub fn with_offset(
        name: &str,
        label: &str,
        phenomenon: Phenomenon,
        system: UnitSystem,
        factor: f64,
        offset: f64,
    ) -> Self {
        UnitProps {
            offset,
            ..UnitProps::new(name, label, phenomenon, system, factor)
        }
    }

    /// Builder: attach parse aliases
    pub fn aliases(mut self, aliases: &[&str]) -> Self {
        self.alternate_labels.extend(aliases.iter().map(|a| a.to_string()));
        self
    }

    /// Check if two units measure the same phenomenon
    pub fn is_compatible(&self, other: &UnitProps) -> bool {
        self.phenomenon == other.phenomenon
    }

    /// Label followed by aliases
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.label.as_str()).chain(self.alternate_labels.iter().map(|s| s.as_str()))
    }

    /// Convert a value from this unit to the phenomenon base unit
    pub fn to_base(&self, value: f64) -> f64 {
        value * self.factor + self.offset
    }

    /// Convert a value from the phenomenon base unit to this unit
    pub fn from_base(&self, value: f64) -> f64 {
        (value - self.offset) / self.factor
    }
}

pub(crate) fn incompatible(from: &UnitProps, to: &UnitProps) -> QuantityError {
    QuantityError::IncompatiblePhenomenon {
        from: from.name.clone(),
        to: to.name.clone(),
        from_phenomenon: from.phenomenon.to_string(),
        to_phenomenon: to.phenomenon.to_string(),
    }
}

impl fmt::Display for UnitProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meter() -> UnitProps {
        UnitProps::new("Units.M", "m", Phenomenon::Length, UnitSystem::Metric, 1.0)
    }

    fn foot() -> UnitProps {
        UnitProps::new("Units.FT", "ft", Phenomenon::Length, UnitSystem::Imperial, 0.3048)
            .aliases(&["'", "feet"])
    }

    fn celsius() -> UnitProps {
        UnitProps::with_offset("Units.CELSIUS", "°C", Phenomenon::Temperature, UnitSystem::Metric, 1.0, 273.15)
    }

    #[test]
    fn test_labels() {
        let unit = foot();
        let labels: Vec<&str> = unit.labels().collect();
        assert_eq!(labels, vec!["ft", "'", "feet"]);
    }

    #[test]
    fn test_affine_roundtrip() {
        let c = celsius();
        assert!((c.to_base(100.0) - 373.15).abs() < 1e-9);
        assert!((c.from_base(273.15)).abs() < 1e-9);
    }

    #[test]
    fn test_compatibility() {
        assert!(foot().is_compatible(&meter()));
        assert!(!meter().is_compatible(&celsius()));
        let err = incompatible(&meter(), &celsius());
        assert_eq!(err.code(), "INCOMPATIBLE_PHENOMENON");
    }

    #[test]
    fn test_serde_camel_case() {
        let json = serde_json::to_value(foot()).unwrap();
        assert_eq!(json["alternateLabels"][1], "feet");
        assert_eq!(json["phenomenon"], "length");
    }
}
