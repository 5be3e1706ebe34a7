//! Format definitions
//!
//! `FormatProps` is the declarative wire structure (camelCase JSON). A
//! `Format` is the validated form with every composite unit resolved against
//! the unit directory.

use std::fmt;
use serde::{Deserialize, Serialize};
use quantity_core::{QuantityError, QuantityResult};
use quantity_units::{UnitProps, UnitsProvider};

/// Fractional formats render at most 1/256
pub const MAX_FRACTION_PRECISION: u32 = 8;

/// Decimal places rendered exactly
pub const MAX_DECIMAL_PRECISION: u32 = quantity_core::number::MAX_DECIMAL_PRECISION;

/// Composite formats span at most this many units
pub const MAX_COMPOSITE_UNITS: usize = 4;

const DEFAULT_PRECISION: u32 = 6;
const DEFAULT_STATION_OFFSET_SIZE: u32 = 2;

/// Numeric style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FormatType {
    Decimal,
    Fractional,
    Scientific,
    Station,
}

impl FormatType {
    pub fn name(&self) -> &'static str {
        match self {
            FormatType::Decimal => "Decimal",
            FormatType::Fractional => "Fractional",
            FormatType::Scientific => "Scientific",
            FormatType::Station => "Station",
        }
    }

    pub fn parse(name: &str) -> QuantityResult<FormatType> {
        match name.trim().to_lowercase().as_str() {
            "decimal" => Ok(FormatType::Decimal),
            "fractional" => Ok(FormatType::Fractional),
            "scientific" => Ok(FormatType::Scientific),
            "station" => Ok(FormatType::Station),
            other => Err(QuantityError::invalid_format(format!("unknown format type '{}'", other))),
        }
    }

    /// Largest precision accepted for this type
    pub fn max_precision(&self) -> u32 {
        match self {
            FormatType::Fractional => MAX_FRACTION_PRECISION,
            _ => MAX_DECIMAL_PRECISION,
        }
    }
}

impl TryFrom<String> for FormatType {
    type Error = QuantityError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        FormatType::parse(&name)
    }
}

impl From<FormatType> for String {
    fn from(t: FormatType) -> Self {
        t.name().to_string()
    }
}

impl fmt::Display for FormatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Mantissa normalization for scientific formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScientificType {
    /// Mantissa in [1, 10)
    #[default]
    Normalized,
    /// Mantissa in [0.1, 1)
    ZeroNormalized,
}

/// A single format trait flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatTrait {
    KeepSingleZero,
    ShowUnitLabel,
    TrailZeroes,
    ZeroEmpty,
    FractionDash,
    ApplyRounding,
    PrependUnitLabel,
    Use1000Separator,
    ExponentOnlyNegative,
    KeepDecimalPoint,
}

impl FormatTrait {
    pub const ALL: [FormatTrait; 10] = [
        FormatTrait::KeepSingleZero,
        FormatTrait::ShowUnitLabel,
        FormatTrait::TrailZeroes,
        FormatTrait::ZeroEmpty,
        FormatTrait::FractionDash,
        FormatTrait::ApplyRounding,
        FormatTrait::PrependUnitLabel,
        FormatTrait::Use1000Separator,
        FormatTrait::ExponentOnlyNegative,
        FormatTrait::KeepDecimalPoint,
    ];

    /// Wire name
    pub fn name(&self) -> &'static str {
        match self {
            FormatTrait::KeepSingleZero => "keepSingleZero",
            FormatTrait::ShowUnitLabel => "showUnitLabel",
            FormatTrait::TrailZeroes => "trailZeroes",
            FormatTrait::ZeroEmpty => "zeroEmpty",
            FormatTrait::FractionDash => "fractionDash",
            FormatTrait::ApplyRounding => "applyRounding",
            FormatTrait::PrependUnitLabel => "prependUnitLabel",
            FormatTrait::Use1000Separator => "use1000Separator",
            FormatTrait::ExponentOnlyNegative => "exponentOnlyNegative",
            FormatTrait::KeepDecimalPoint => "keepDecimalPoint",
        }
    }

    pub fn from_name(name: &str) -> Option<FormatTrait> {
        let name = name.trim();
        Self::ALL.iter().copied().find(|t| t.name().eq_ignore_ascii_case(name))
    }

    fn bit(&self) -> u16 {
        1 << (*self as u16)
    }
}

/// Set of format traits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FormatTraits {
    bits: u16,
}

impl FormatTraits {
    pub const NONE: FormatTraits = FormatTraits { bits: 0 };

    pub fn from_traits(traits: &[FormatTrait]) -> Self {
        traits.iter().fold(Self::NONE, |acc, t| acc.with(*t))
    }

    /// Parse wire names; unknown names are a definition error
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> QuantityResult<Self> {
        let mut traits = Self::NONE;
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            let t = FormatTrait::from_name(name).ok_or_else(|| {
                QuantityError::invalid_format(format!("unknown format trait '{}'", name))
            })?;
            traits.insert(t);
        }
        Ok(traits)
    }

    pub fn contains(&self, t: FormatTrait) -> bool {
        self.bits & t.bit() != 0
    }

    pub fn insert(&mut self, t: FormatTrait) {
        self.bits |= t.bit();
    }

    pub fn remove(&mut self, t: FormatTrait) {
        self.bits &= !t.bit();
    }

    pub fn with(mut self, t: FormatTrait) -> Self {
        self.insert(t);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = FormatTrait> + '_ {
        FormatTrait::ALL.iter().copied().filter(move |t| self.contains(*t))
    }

    pub fn names(&self) -> Vec<String> {
        self.iter().map(|t| t.name().to_string()).collect()
    }
}

/// `formatTraits` accepts a list or a single delimited string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraitList {
    List(Vec<String>),
    Joined(String),
}

impl TraitList {
    fn names(&self) -> Vec<&str> {
        match self {
            TraitList::List(list) => list.iter().map(|s| s.as_str()).collect(),
            TraitList::Joined(s) => s.split(|c| c == ',' || c == '|' || c == ';').collect(),
        }
    }
}

impl Default for TraitList {
    fn default() -> Self {
        TraitList::List(Vec::new())
    }
}

/// One unit of a composite definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeUnitProps {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl CompositeUnitProps {
    pub fn new(name: &str, label: Option<&str>) -> Self {
        CompositeUnitProps {
            name: name.to_string(),
            label: label.map(|l| l.to_string()),
        }
    }
}

/// Composite section of a format definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_zero: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacer: Option<String>,
    pub units: Vec<CompositeUnitProps>,
}

/// Declarative format definition (wire contract)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatProps {
    #[serde(rename = "type")]
    pub format_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<i64>,
    #[serde(default)]
    pub format_traits: TraitList,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uom_separator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station_offset_size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station_separator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scientific_type: Option<ScientificType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composite: Option<CompositeProps>,
}

impl FormatProps {
    /// Minimal definition of the given type
    pub fn new(format_type: FormatType, precision: u32) -> Self {
        FormatProps {
            format_type: format_type.name().to_string(),
            precision: Some(precision as i64),
            format_traits: TraitList::default(),
            round_factor: None,
            uom_separator: None,
            station_offset_size: None,
            station_separator: None,
            scientific_type: None,
            composite: None,
        }
    }

    /// Builder: set traits
    pub fn traits(mut self, traits: &[FormatTrait]) -> Self {
        self.format_traits = TraitList::List(traits.iter().map(|t| t.name().to_string()).collect());
        self
    }

    /// Builder: composite units (name, label), largest first
    pub fn units(mut self, units: &[(&str, &str)], spacer: &str, include_zero: bool) -> Self {
        self.composite = Some(CompositeProps {
            include_zero: Some(include_zero),
            spacer: Some(spacer.to_string()),
            units: units
                .iter()
                .map(|(name, label)| CompositeUnitProps::new(name, Some(label)))
                .collect(),
        });
        self
    }

    /// Builder: separator between value and unit label
    pub fn uom_separator(mut self, separator: &str) -> Self {
        self.uom_separator = Some(separator.to_string());
        self
    }

    /// Builder: station offset size
    pub fn station_offset_size(mut self, size: u32) -> Self {
        self.station_offset_size = Some(size as i64);
        self
    }

    pub fn from_json(json: &serde_json::Value) -> QuantityResult<Self> {
        serde_json::from_value(json.clone())
            .map_err(|e| QuantityError::invalid_format(e.to_string()))
    }
}

/// A composite tier: resolved unit plus optional display label override
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeUnit {
    pub unit: UnitProps,
    pub label: Option<String>,
}

impl CompositeUnit {
    /// Display label (override or the unit's own)
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.unit.label)
    }
}

/// Validated format with resolved composite units
#[derive(Debug, Clone, PartialEq)]
pub struct Format {
    name: String,
    format_type: FormatType,
    precision: u32,
    traits: FormatTraits,
    round_factor: f64,
    uom_separator: String,
    station_offset_size: u32,
    station_separator: String,
    scientific_type: ScientificType,
    spacer: String,
    include_zero: bool,
    units: Vec<CompositeUnit>,
}

/// Structural fields of a definition, checked without the unit directory
struct CheckedProps {
    format_type: FormatType,
    precision: u32,
    traits: FormatTraits,
    station_offset_size: u32,
}

impl Format {
    /// Plain decimal format with no units
    pub fn decimal(name: &str, precision: u32, traits: FormatTraits) -> Self {
        Format {
            name: name.to_string(),
            format_type: FormatType::Decimal,
            precision: precision.min(MAX_DECIMAL_PRECISION),
            traits,
            round_factor: 0.0,
            uom_separator: " ".to_string(),
            station_offset_size: DEFAULT_STATION_OFFSET_SIZE,
            station_separator: "+".to_string(),
            scientific_type: ScientificType::Normalized,
            spacer: " ".to_string(),
            include_zero: true,
            units: Vec::new(),
        }
    }

    /// Structural validation: type, precision range, trait names, composite shape
    pub fn validate_props(props: &FormatProps) -> QuantityResult<()> {
        Self::check_props(props).map(|_| ())
    }

    fn check_props(props: &FormatProps) -> QuantityResult<CheckedProps> {
        let format_type = FormatType::parse(&props.format_type)?;

        let precision = match props.precision {
            None => DEFAULT_PRECISION.min(format_type.max_precision()),
            Some(p) if p < 0 => {
                return Err(QuantityError::invalid_format(format!("precision must be non-negative, got {}", p)));
            }
            Some(p) if p > format_type.max_precision() as i64 => {
                return Err(QuantityError::invalid_format(format!(
                    "precision {} exceeds {} for {} formats",
                    p,
                    format_type.max_precision(),
                    format_type
                )));
            }
            Some(p) => p as u32,
        };

        let traits = FormatTraits::from_names(&props.format_traits.names())?;

        let station_offset_size = match props.station_offset_size {
            None => DEFAULT_STATION_OFFSET_SIZE,
            Some(s) if (0..=9).contains(&s) => s as u32,
            Some(s) => {
                return Err(QuantityError::invalid_format(format!("stationOffsetSize {} out of range 0-9", s)));
            }
        };

        if let Some(factor) = props.round_factor {
            if !(factor >= 0.0) || !factor.is_finite() {
                return Err(QuantityError::invalid_format(format!("roundFactor {} must be a non-negative number", factor)));
            }
        }

        if let Some(composite) = &props.composite {
            if composite.units.is_empty() {
                return Err(QuantityError::invalid_format("composite must list at least one unit"));
            }
            if composite.units.len() > MAX_COMPOSITE_UNITS {
                return Err(QuantityError::invalid_format(format!(
                    "composite lists {} units, at most {} allowed",
                    composite.units.len(),
                    MAX_COMPOSITE_UNITS
                )));
            }
            if let Some(u) = composite.units.iter().find(|u| u.name.trim().is_empty()) {
                return Err(QuantityError::invalid_format(format!("composite unit with empty name (label {:?})", u.label)));
            }
        }

        Ok(CheckedProps {
            format_type,
            precision,
            traits,
            station_offset_size,
        })
    }

    /// Build from a definition whose composite units are already resolved.
    ///
    /// `units` must line up with `props.composite.units`.
    pub fn with_units(name: &str, props: &FormatProps, units: Vec<UnitProps>) -> QuantityResult<Self> {
        let checked = Self::check_props(props)?;
        let composite = props.composite.as_ref();
        let expected = composite.map_or(0, |c| c.units.len());
        if units.len() != expected {
            return Err(QuantityError::invalid_format(format!(
                "expected {} resolved units, got {}",
                expected,
                units.len()
            )));
        }

        let units: Vec<CompositeUnit> = match composite {
            Some(c) => units
                .into_iter()
                .zip(c.units.iter())
                .map(|(unit, def)| CompositeUnit { unit, label: def.label.clone() })
                .collect(),
            None => Vec::new(),
        };
        check_decreasing(&units)?;

        Ok(Format {
            name: name.to_string(),
            format_type: checked.format_type,
            precision: checked.precision,
            traits: checked.traits,
            round_factor: props.round_factor.unwrap_or(0.0),
            uom_separator: props.uom_separator.clone().unwrap_or_else(|| " ".to_string()),
            station_offset_size: checked.station_offset_size,
            station_separator: props.station_separator.clone().unwrap_or_else(|| "+".to_string()),
            scientific_type: props.scientific_type.unwrap_or_default(),
            spacer: composite.and_then(|c| c.spacer.clone()).unwrap_or_else(|| " ".to_string()),
            include_zero: composite.and_then(|c| c.include_zero).unwrap_or(true),
            units,
        })
    }

    /// Build from a definition, resolving composite units through the directory
    pub async fn from_props(name: &str, props: &FormatProps, provider: &dyn UnitsProvider) -> QuantityResult<Self> {
        Self::validate_props(props)?;

        let mut units = Vec::new();
        if let Some(composite) = &props.composite {
            for def in &composite.units {
                units.push(provider.find_unit_by_name(&def.name).await?);
            }
        }
        Self::with_units(name, props, units)
    }

    /// Build from a JSON definition
    pub async fn from_json(name: &str, json: &serde_json::Value, provider: &dyn UnitsProvider) -> QuantityResult<Self> {
        let props = FormatProps::from_json(json)?;
        Self::from_props(name, &props, provider).await
    }

    /// Back to the declarative form
    pub fn to_props(&self) -> FormatProps {
        FormatProps {
            format_type: self.format_type.name().to_string(),
            precision: Some(self.precision as i64),
            format_traits: TraitList::List(self.traits.names()),
            round_factor: (self.round_factor > 0.0).then_some(self.round_factor),
            uom_separator: Some(self.uom_separator.clone()),
            station_offset_size: (self.format_type == FormatType::Station).then_some(self.station_offset_size as i64),
            station_separator: (self.format_type == FormatType::Station).then(|| self.station_separator.clone()),
            scientific_type: (self.format_type == FormatType::Scientific).then_some(self.scientific_type),
            composite: (!self.units.is_empty()).then(|| CompositeProps {
                include_zero: Some(self.include_zero),
                spacer: Some(self.spacer.clone()),
                units: self
                    .units
                    .iter()
                    .map(|u| CompositeUnitProps {
                        name: u.unit.name.clone(),
                        label: u.label.clone(),
                    })
                    .collect(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format_type(&self) -> FormatType {
        self.format_type
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn traits(&self) -> FormatTraits {
        self.traits
    }

    pub fn has_trait(&self, t: FormatTrait) -> bool {
        self.traits.contains(t)
    }

    pub fn round_factor(&self) -> f64 {
        self.round_factor
    }

    pub fn uom_separator(&self) -> &str {
        &self.uom_separator
    }

    pub fn station_offset_size(&self) -> u32 {
        self.station_offset_size
    }

    pub fn station_separator(&self) -> &str {
        &self.station_separator
    }

    pub fn scientific_type(&self) -> ScientificType {
        self.scientific_type
    }

    pub fn spacer(&self) -> &str {
        &self.spacer
    }

    pub fn include_zero(&self) -> bool {
        self.include_zero
    }

    /// Composite units, largest first
    pub fn units(&self) -> &[CompositeUnit] {
        &self.units
    }

    pub fn has_units(&self) -> bool {
        !self.units.is_empty()
    }

    /// Denominator for fractional formats (2^precision)
    pub fn fraction_denominator(&self) -> u64 {
        1u64 << self.precision.min(MAX_FRACTION_PRECISION)
    }
}

/// Composite tiers must share a phenomenon and strictly decrease in size
fn check_decreasing(units: &[CompositeUnit]) -> QuantityResult<()> {
    for pair in units.windows(2) {
        let (larger, smaller) = (&pair[0].unit, &pair[1].unit);
        if !larger.is_compatible(smaller) {
            return Err(QuantityError::IncompatiblePhenomenon {
                from: larger.name.clone(),
                to: smaller.name.clone(),
                from_phenomenon: larger.phenomenon.to_string(),
                to_phenomenon: smaller.phenomenon.to_string(),
            });
        }
        if !(smaller.factor < larger.factor) {
            return Err(QuantityError::invalid_format(format!(
                "composite units must be strictly decreasing: {} is not smaller than {}",
                smaller.name, larger.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quantity_units::BasicUnitsProvider;
    use serde_json::json;

    fn feet_inches() -> serde_json::Value {
        json!({
            "composite": {
                "includeZero": true,
                "spacer": "-",
                "units": [{ "label": "'", "name": "Units.FT" }, { "label": "\"", "name": "Units.IN" }]
            },
            "formatTraits": ["keepSingleZero", "showUnitLabel"],
            "precision": 3,
            "type": "Fractional",
            "uomSeparator": ""
        })
    }

    #[tokio::test]
    async fn test_from_json() {
        let provider = BasicUnitsProvider::new();
        let format = Format::from_json("ft-in", &feet_inches(), &provider).await.unwrap();
        assert_eq!(format.format_type(), FormatType::Fractional);
        assert_eq!(format.precision(), 3);
        assert_eq!(format.fraction_denominator(), 8);
        assert!(format.has_trait(FormatTrait::ShowUnitLabel));
        assert!(!format.has_trait(FormatTrait::TrailZeroes));
        assert_eq!(format.units().len(), 2);
        assert_eq!(format.units()[1].label(), "\"");
        assert_eq!(format.spacer(), "-");
        assert_eq!(format.uom_separator(), "");
    }

    #[tokio::test]
    async fn test_increasing_units_rejected() {
        let provider = BasicUnitsProvider::new();
        let mut json = feet_inches();
        json["composite"]["units"] = json!([{ "name": "Units.IN" }, { "name": "Units.FT" }]);
        let err = Format::from_json("bad", &json, &provider).await.unwrap_err();
        assert!(matches!(err, QuantityError::InvalidFormatDefinition(_)));
    }

    #[tokio::test]
    async fn test_equal_units_rejected() {
        let provider = BasicUnitsProvider::new();
        let mut json = feet_inches();
        json["composite"]["units"] = json!([{ "name": "Units.FT" }, { "name": "Units.FT" }]);
        assert!(Format::from_json("bad", &json, &provider).await.is_err());
    }

    #[tokio::test]
    async fn test_mixed_phenomena_rejected() {
        let provider = BasicUnitsProvider::new();
        let mut json = feet_inches();
        json["composite"]["units"] = json!([{ "name": "Units.SQ_FT" }, { "name": "Units.IN" }]);
        let err = Format::from_json("bad", &json, &provider).await.unwrap_err();
        assert!(matches!(err, QuantityError::IncompatiblePhenomenon { .. }));
    }

    #[tokio::test]
    async fn test_unknown_unit() {
        let provider = BasicUnitsProvider::new();
        let mut json = feet_inches();
        json["composite"]["units"] = json!([{ "name": "Units.FLURG" }]);
        let err = Format::from_json("bad", &json, &provider).await.unwrap_err();
        assert_eq!(err, QuantityError::UnknownUnit("Units.FLURG".to_string()));
    }

    #[test]
    fn test_negative_precision_rejected() {
        let mut props = FormatProps::new(FormatType::Decimal, 2);
        props.precision = Some(-1);
        assert!(matches!(
            Format::validate_props(&props),
            Err(QuantityError::InvalidFormatDefinition(_))
        ));
    }

    #[test]
    fn test_fraction_precision_range() {
        let props = FormatProps::new(FormatType::Fractional, 9);
        assert!(Format::validate_props(&props).is_err());
        let props = FormatProps::new(FormatType::Fractional, 8);
        assert!(Format::validate_props(&props).is_ok());
    }

    #[test]
    fn test_missing_type_is_invalid_definition() {
        let err = FormatProps::from_json(&json!({ "precision": 4 })).unwrap_err();
        assert!(matches!(err, QuantityError::InvalidFormatDefinition(_)));
    }

    #[test]
    fn test_unknown_trait_rejected() {
        let props = FormatProps::from_json(&json!({ "type": "Decimal", "formatTraits": ["showUnitLabel", "sparkle"] })).unwrap();
        let err = Format::validate_props(&props).unwrap_err();
        assert!(err.to_string().contains("sparkle"));
    }

    #[test]
    fn test_joined_traits() {
        let props = FormatProps::from_json(&json!({ "type": "decimal", "formatTraits": "trailZeroes|showUnitLabel" })).unwrap();
        let format = Format::with_units("d", &props, vec![]).unwrap();
        assert!(format.has_trait(FormatTrait::TrailZeroes));
        assert!(format.has_trait(FormatTrait::ShowUnitLabel));
        assert_eq!(format.format_type(), FormatType::Decimal);
    }

    #[test]
    fn test_empty_composite_rejected() {
        let props = FormatProps::from_json(&json!({ "type": "Decimal", "composite": { "units": [] } })).unwrap();
        assert!(Format::validate_props(&props).is_err());
    }

    #[tokio::test]
    async fn test_to_props_roundtrip() {
        let provider = BasicUnitsProvider::new();
        let format = Format::from_json("ft-in", &feet_inches(), &provider).await.unwrap();
        let again = Format::from_props("ft-in", &format.to_props(), &provider).await.unwrap();
        assert_eq!(format, again);
    }

    #[test]
    fn test_traits_set() {
        let traits = FormatTraits::from_traits(&[FormatTrait::ZeroEmpty, FormatTrait::FractionDash]);
        assert_eq!(traits.names(), vec!["zeroEmpty", "fractionDash"]);
        let mut traits = traits;
        traits.remove(FormatTrait::ZeroEmpty);
        assert!(!traits.contains(FormatTrait::ZeroEmpty));
    }
}
