//! Quantity types

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// A kind of quantity the formatter serves specs for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuantityType {
    Length,
    Angle,
    Area,
    Volume,
    LatLong,
    Coordinate,
    Stationing,
    LengthSurvey,
    LengthEngineering,
    /// Registered through a specs provider
    Custom(String),
}

impl QuantityType {
    pub const BUILT_IN: [QuantityType; 9] = [
        QuantityType::Length,
        QuantityType::Angle,
        QuantityType::Area,
        QuantityType::Volume,
        QuantityType::LatLong,
        QuantityType::Coordinate,
        QuantityType::Stationing,
        QuantityType::LengthSurvey,
        QuantityType::LengthEngineering,
    ];

    pub fn name(&self) -> &str {
        match self {
            QuantityType::Length => "Length",
            QuantityType::Angle => "Angle",
            QuantityType::Area => "Area",
            QuantityType::Volume => "Volume",
            QuantityType::LatLong => "LatLong",
            QuantityType::Coordinate => "Coordinate",
            QuantityType::Stationing => "Stationing",
            QuantityType::LengthSurvey => "LengthSurvey",
            QuantityType::LengthEngineering => "LengthEngineering",
            QuantityType::Custom(name) => name,
        }
    }

    /// Unit magnitudes of this type are stored in
    pub fn persistence_unit_name(&self) -> Option<&'static str> {
        match self {
            QuantityType::Length
            | QuantityType::Coordinate
            | QuantityType::Stationing
            | QuantityType::LengthSurvey
            | QuantityType::LengthEngineering => Some("Units.M"),
            QuantityType::Angle | QuantityType::LatLong => Some("Units.RAD"),
            QuantityType::Area => Some("Units.SQ_M"),
            QuantityType::Volume => Some("Units.CUB_M"),
            QuantityType::Custom(_) => None,
        }
    }

    /// Built-in type with this name, case-insensitive
    pub fn built_in(name: &str) -> Option<QuantityType> {
        let name = name.trim();
        Self::BUILT_IN
            .iter()
            .find(|t| t.name().eq_ignore_ascii_case(name))
            .cloned()
    }
}

impl FromStr for QuantityType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(QuantityType::from(s.to_string()))
    }
}

impl From<String> for QuantityType {
    fn from(name: String) -> Self {
        QuantityType::built_in(&name).unwrap_or(QuantityType::Custom(name))
    }
}

impl From<&str> for QuantityType {
    fn from(name: &str) -> Self {
        QuantityType::from(name.to_string())
    }
}

impl From<QuantityType> for String {
    fn from(t: QuantityType) -> Self {
        t.name().to_string()
    }
}

impl fmt::Display for QuantityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
