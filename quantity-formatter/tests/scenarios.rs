//! End to end formatting and parsing through the default and override formats

use quantity_format::FormatProps;
use quantity_formatter::{
    FormatTrait, FormatType, OverrideFormatEntry, ParseError, QuantityFormatter, QuantityType,
};

const LABELED: [FormatTrait; 2] = [FormatTrait::KeepSingleZero, FormatTrait::ShowUnitLabel];

fn decimal(precision: u32, unit: &str, label: &str) -> FormatProps {
    FormatProps::new(FormatType::Decimal, precision)
        .traits(&LABELED)
        .units(&[(unit, label)], " ", true)
}

async fn format(formatter: &QuantityFormatter, quantity_type: QuantityType, imperial: bool, magnitude: f64) -> String {
    let spec = formatter
        .get_formatter_spec_by_quantity_type(&quantity_type, imperial)
        .await
        .unwrap();
    formatter.format_quantity(magnitude, &spec)
}

async fn parse(formatter: &QuantityFormatter, quantity_type: QuantityType, imperial: bool, text: &str) -> f64 {
    let spec = formatter
        .get_parser_spec_by_quantity_type(&quantity_type, imperial)
        .await
        .unwrap();
    formatter
        .parse_into_quantity_value(text, &spec)
        .value()
        .unwrap_or_else(|| panic!("'{}' did not parse", text))
}

#[tokio::test]
async fn test_imperial_length_fraction() {
    let formatter = QuantityFormatter::with_basic_units();
    assert_eq!(format(&formatter, QuantityType::Length, true, 123.456).await, "405'-0 1/2\"");
}

#[tokio::test]
async fn test_length_defaults_and_overrides() {
    let formatter = QuantityFormatter::with_basic_units();
    assert_eq!(format(&formatter, QuantityType::Length, false, 1.5).await, "1.5 m");
    assert_eq!(format(&formatter, QuantityType::Length, true, 1.5).await, "4'-11\"");

    let entry = OverrideFormatEntry::both(decimal(4, "Units.CM", "cm"), decimal(4, "Units.IN", "in"));
    formatter.set_override_formats(&QuantityType::Length, entry).await.unwrap();
    assert_eq!(format(&formatter, QuantityType::Length, false, 1.5).await, "150 cm");
    assert_eq!(format(&formatter, QuantityType::Length, true, 1.5).await, "59.0551 in");

    formatter.clear_override_formats(&QuantityType::Length);
    assert_eq!(format(&formatter, QuantityType::Length, false, 1.5).await, "1.5 m");
    assert_eq!(format(&formatter, QuantityType::Length, true, 1.5).await, "4'-11\"");
}

#[tokio::test]
async fn test_length_parsing_equivalents() {
    let formatter = QuantityFormatter::with_basic_units();
    for text in ["48\"", "48 in", "4 ft", "4'"] {
        let value = parse(&formatter, QuantityType::Length, true, text).await;
        assert!((value - 1.2192).abs() < 1e-9, "{} -> {}", text, value);
    }
    let value = parse(&formatter, QuantityType::Length, false, "48 in").await;
    assert!((value - 1.2192).abs() < 1e-9);
}

#[tokio::test]
async fn test_unknown_unit_token() {
    let formatter = QuantityFormatter::with_basic_units();
    let spec = formatter
        .get_parser_spec_by_quantity_type(&QuantityType::Length, false)
        .await
        .unwrap();
    let result = formatter.parse_into_quantity_value("100 flurgs", &spec);
    assert_eq!(result.error(), Some(&ParseError::UnknownUnitToken("flurgs".to_string())));
}

#[tokio::test]
async fn test_coordinate_survey_feet() {
    let formatter = QuantityFormatter::with_basic_units();
    assert_eq!(format(&formatter, QuantityType::Coordinate, false, 100000.0).await, "100000 m");
    assert_eq!(format(&formatter, QuantityType::Coordinate, true, 100000.0).await, "328083.99 ft");

    let entry = OverrideFormatEntry::imperial(decimal(4, "Units.SURVEY_FT", "ft (US Survey)"));
    formatter.set_override_formats(&QuantityType::Coordinate, entry).await.unwrap();
    assert_eq!(
        format(&formatter, QuantityType::Coordinate, true, 100000.0).await,
        "328083.3333 ft (US Survey)"
    );
    // Metric side untouched
    assert_eq!(format(&formatter, QuantityType::Coordinate, false, 100000.0).await, "100000 m");

    for text in ["328083.333333333 ft (US Survey)", "328083.333333333"] {
        let value = parse(&formatter, QuantityType::Coordinate, true, text).await;
        assert!((value - 100000.0).abs() < 1e-4, "{} -> {}", text, value);
    }
}

#[tokio::test]
async fn test_area_survey_feet() {
    let formatter = QuantityFormatter::with_basic_units();
    assert_eq!(format(&formatter, QuantityType::Area, false, 100000.0).await, "100000 m²");
    assert_eq!(format(&formatter, QuantityType::Area, true, 100000.0).await, "1076391.0417 ft²");

    let entry = OverrideFormatEntry::imperial(decimal(4, "Units.SQ_SURVEY_FT", "ft² (US Survey)"));
    formatter.set_override_formats(&QuantityType::Area, entry).await.unwrap();
    assert_eq!(
        format(&formatter, QuantityType::Area, true, 100000.0).await,
        "1076386.7361 ft² (US Survey)"
    );

    let value = parse(&formatter, QuantityType::Area, true, "1076386.7361 sussf").await;
    assert!((value - 100000.0).abs() < 1e-5);
}

#[tokio::test]
async fn test_angles() {
    let formatter = QuantityFormatter::with_basic_units();
    let radians = 45.5_f64.to_radians();
    assert_eq!(format(&formatter, QuantityType::Angle, false, radians).await, "45.5°");
    assert_eq!(format(&formatter, QuantityType::Angle, true, radians).await, "45°30'0\"");

    let value = parse(&formatter, QuantityType::Angle, true, "45°30'0\"").await;
    assert!((value - radians).abs() < 1e-12);
    let value = parse(&formatter, QuantityType::Angle, false, "45.5").await;
    assert!((value - radians).abs() < 1e-12);
}

#[tokio::test]
async fn test_stationing() {
    let formatter = QuantityFormatter::with_basic_units();
    assert_eq!(format(&formatter, QuantityType::Stationing, false, 1234.56).await, "1+234.56 m");

    let value = parse(&formatter, QuantityType::Stationing, false, "1+234.56 m").await;
    assert!((value - 1234.56).abs() < 1e-9);
}

#[tokio::test]
async fn test_engineering_and_volume() {
    let formatter = QuantityFormatter::with_basic_units();
    assert_eq!(format(&formatter, QuantityType::LengthEngineering, false, 1.5).await, "1500 mm");
    assert_eq!(format(&formatter, QuantityType::LengthEngineering, true, 0.0254).await, "1 in");
    assert_eq!(format(&formatter, QuantityType::Volume, false, 2.0).await, "2 m³");
}

#[tokio::test]
async fn test_negative_values() {
    let formatter = QuantityFormatter::with_basic_units();
    assert_eq!(format(&formatter, QuantityType::Length, false, -1.5).await, "-1.5 m");
    assert_eq!(format(&formatter, QuantityType::Length, false, -0.00001).await, "0 m");

    let value = parse(&formatter, QuantityType::Length, true, "-4'-6\"").await;
    assert!((value + 4.5 * 0.3048).abs() < 1e-12);
}
