//! Phenomena and measurement systems
//!
//! A phenomenon is the physical quantity family a unit measures. Units are
//! only convertible within one phenomenon, through that phenomenon's base
//! unit.

use std::fmt;
use serde::{Deserialize, Serialize};

/// Physical quantity family
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Phenomenon {
    Length,
    Area,
    Volume,
    Angle,
    Temperature,
    Time,
    Mass,
    /// Caller-defined family, identified by name
    Custom(String),
}

impl Phenomenon {
    /// Lowercase name used on the wire
    pub fn name(&self) -> &str {
        match self {
            Phenomenon::Length => "length",
            Phenomenon::Area => "area",
            Phenomenon::Volume => "volume",
            Phenomenon::Angle => "angle",
            Phenomenon::Temperature => "temperature",
            Phenomenon::Time => "time",
            Phenomenon::Mass => "mass",
            Phenomenon::Custom(name) => name,
        }
    }
}

impl From<String> for Phenomenon {
    fn from(name: String) -> Self {
        match name.to_lowercase().as_str() {
            "length" => Phenomenon::Length,
            "area" => Phenomenon::Area,
            "volume" => Phenomenon::Volume,
            "angle" => Phenomenon::Angle,
            "temperature" => Phenomenon::Temperature,
            "time" => Phenomenon::Time,
            "mass" => Phenomenon::Mass,
            _ => Phenomenon::Custom(name),
        }
    }
}

impl From<Phenomenon> for String {
    fn from(phenomenon: Phenomenon) -> Self {
        phenomenon.name().to_string()
    }
}

impl fmt::Display for Phenomenon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Measurement system a unit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnitSystem {
    Metric,
    Imperial,
    UsSurvey,
    #[default]
    Other,
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
            UnitSystem::UsSurvey => "usSurvey",
            UnitSystem::Other => "other",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_roundtrip() {
        for p in [Phenomenon::Length, Phenomenon::Area, Phenomenon::Angle, Phenomenon::Temperature] {
            assert_eq!(Phenomenon::from(p.name().to_string()), p);
        }
    }

    #[test]
    fn test_custom_phenomenon() {
        let p = Phenomenon::from("luminosity".to_string());
        assert_eq!(p, Phenomenon::Custom("luminosity".to_string()));
        assert_eq!(p.to_string(), "luminosity");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Phenomenon::Area).unwrap();
        assert_eq!(json, "\"area\"");
        let back: Phenomenon = serde_json::from_str("\"Length\"").unwrap();
        assert_eq!(back, Phenomenon::Length);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Phenomenon::Volume), "volume");
        assert_eq!(format!("{}", UnitSystem::UsSurvey), "usSurvey");
    }
}
