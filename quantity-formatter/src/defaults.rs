//! Default format definitions for the built-in quantity types

use quantity_format::{FormatProps, FormatTrait, FormatType};
use crate::QuantityType;

const DEFAULT_TRAITS: [FormatTrait; 2] = [FormatTrait::KeepSingleZero, FormatTrait::ShowUnitLabel];

fn decimal(precision: u32, unit: &str, label: &str) -> FormatProps {
    FormatProps::new(FormatType::Decimal, precision)
        .traits(&DEFAULT_TRAITS)
        .units(&[(unit, label)], " ", true)
}

fn station(offset_size: u32, unit: &str, label: &str) -> FormatProps {
    FormatProps::new(FormatType::Station, 2)
        .traits(&DEFAULT_TRAITS)
        .units(&[(unit, label)], " ", true)
        .station_offset_size(offset_size)
}

fn degrees_minutes_seconds(precision: u32) -> FormatProps {
    FormatProps::new(FormatType::Decimal, precision)
        .traits(&DEFAULT_TRAITS)
        .units(
            &[("Units.ARC_DEG", "°"), ("Units.ARC_MINUTE", "'"), ("Units.ARC_SECOND", "\"")],
            "",
            true,
        )
        .uom_separator("")
}

/// Format used for a built-in type when no override is installed
pub fn default_format(quantity_type: &QuantityType, use_imperial: bool) -> Option<FormatProps> {
    let props = match (quantity_type, use_imperial) {
        (QuantityType::Length, false) => decimal(4, "Units.M", "m"),
        (QuantityType::Length, true) => FormatProps::new(FormatType::Fractional, 3)
            .traits(&DEFAULT_TRAITS)
            .units(&[("Units.FT", "'"), ("Units.IN", "\"")], "-", true)
            .uom_separator(""),
        (QuantityType::Angle, false) => decimal(2, "Units.ARC_DEG", "°").uom_separator(""),
        (QuantityType::Angle, true) => degrees_minutes_seconds(0),
        (QuantityType::Area, false) => decimal(4, "Units.SQ_M", "m²"),
        (QuantityType::Area, true) => decimal(4, "Units.SQ_FT", "ft²"),
        (QuantityType::Volume, false) => decimal(4, "Units.CUB_M", "m³"),
        (QuantityType::Volume, true) => decimal(4, "Units.CUB_FT", "ft³"),
        (QuantityType::LatLong, false) => decimal(6, "Units.ARC_DEG", "°").uom_separator(""),
        (QuantityType::LatLong, true) => degrees_minutes_seconds(2),
        (QuantityType::Coordinate, false) => decimal(2, "Units.M", "m"),
        (QuantityType::Coordinate, true) => decimal(2, "Units.FT", "ft"),
        (QuantityType::Stationing, false) => station(3, "Units.M", "m"),
        (QuantityType::Stationing, true) => station(2, "Units.FT", "ft"),
        (QuantityType::LengthSurvey, false) => decimal(4, "Units.M", "m"),
        (QuantityType::LengthSurvey, true) => decimal(4, "Units.SURVEY_FT", "ft (US Survey)"),
        (QuantityType::LengthEngineering, false) => decimal(4, "Units.MM", "mm"),
        (QuantityType::LengthEngineering, true) => decimal(4, "Units.IN", "in"),
        (QuantityType::Custom(_), _) => return None,
    };
    Some(props)
}
