//! Formatter and parser specs
//!
//! A spec binds a `Format` to the unit conversions it needs, resolved once
//! against the unit directory. Specs are immutable and shared freely.

use quantity_core::{QuantityError, QuantityResult};
use quantity_units::{
    create_unit_conversion_specs_for_unit, get_conversion, UnitConversion, UnitConversionSpec,
    UnitProps, UnitsProvider,
};
use crate::format::Format;
use crate::formatter::Formatter;
use crate::parse_result::ParseResult;
use crate::parser::Parser;

/// One conversion per composite tier of `format`, from `persistent` into the
/// tier unit, largest first. A format without composite units gets a single
/// identity entry for `persistent` itself.
pub async fn create_unit_conversion_specs(
    provider: &dyn UnitsProvider,
    persistent: &UnitProps,
    format: &Format,
) -> QuantityResult<Vec<UnitConversionSpec>> {
    if !format.has_units() {
        return Ok(vec![UnitConversionSpec::new(persistent, None, UnitConversion::IDENTITY)]);
    }

    let mut specs = Vec::with_capacity(format.units().len());
    for tier in format.units() {
        let conversion = provider.get_conversion(persistent, &tier.unit).await?;
        specs.push(UnitConversionSpec::new(&tier.unit, tier.label.as_deref(), conversion));
    }
    Ok(specs)
}

/// Everything needed to render a magnitude stored in `persistence_unit`
#[derive(Debug, Clone, PartialEq)]
pub struct FormatterSpec {
    name: String,
    format: Format,
    unit_conversions: Vec<UnitConversionSpec>,
    persistence_unit: UnitProps,
    ratios: Vec<f64>,
}

impl FormatterSpec {
    /// Resolve one conversion per composite tier, from the persistent unit
    pub async fn create(
        name: &str,
        format: Format,
        provider: &dyn UnitsProvider,
        persistence_unit: &UnitProps,
    ) -> QuantityResult<Self> {
        let unit_conversions = create_unit_conversion_specs(provider, persistence_unit, &format).await?;
        let ratios = format
            .units()
            .windows(2)
            .map(|pair| get_conversion(&pair[0].unit, &pair[1].unit).map(|c| c.factor))
            .collect::<QuantityResult<Vec<f64>>>()?;

        Ok(FormatterSpec {
            name: name.to_string(),
            format,
            unit_conversions,
            persistence_unit: persistence_unit.clone(),
            ratios,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format(&self) -> &Format {
        &self.format
    }

    /// One entry per displayed tier, largest first
    pub fn unit_conversions(&self) -> &[UnitConversionSpec] {
        &self.unit_conversions
    }

    pub fn persistence_unit(&self) -> &UnitProps {
        &self.persistence_unit
    }

    /// Units of each tier per unit of the tier above
    pub fn tier_ratios(&self) -> &[f64] {
        &self.ratios
    }

    pub fn apply_formatting(&self, magnitude: f64) -> String {
        Formatter::format_quantity(magnitude, self)
    }
}

/// Lower-cased label and the conversion it selects
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LabelEntry {
    pub(crate) key: Vec<char>,
    pub(crate) index: usize,
}

pub(crate) fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Everything needed to turn text into a magnitude in `output_unit`
#[derive(Debug, Clone, PartialEq)]
pub struct ParserSpec {
    output_unit: UnitProps,
    format: Format,
    unit_conversions: Vec<UnitConversionSpec>,
    labels: Vec<LabelEntry>,
    tier_indices: Vec<usize>,
}

impl ParserSpec {
    /// Resolve conversions from every unit of the output unit's phenomenon
    pub async fn create(format: Format, provider: &dyn UnitsProvider, output_unit: &UnitProps) -> QuantityResult<Self> {
        let mut unit_conversions = create_unit_conversion_specs_for_unit(provider, output_unit).await?;

        // Composite tiers come first in the label table so their display
        // labels win over identical aliases of other units
        let mut tier_indices = Vec::with_capacity(format.units().len());
        let mut labels: Vec<LabelEntry> = Vec::new();
        for tier in format.units() {
            let index = match unit_conversions.iter().position(|s| s.name == tier.unit.name) {
                Some(i) => i,
                None => {
                    let conversion = provider.get_conversion(&tier.unit, output_unit).await?;
                    unit_conversions.push(UnitConversionSpec::new(&tier.unit, None, conversion));
                    unit_conversions.len() - 1
                }
            };
            tier_indices.push(index);
            if let Some(label) = &tier.label {
                push_label(&mut labels, label, index);
            }
        }

        for (index, spec) in unit_conversions.iter().enumerate() {
            for label in spec.labels() {
                push_label(&mut labels, label, index);
            }
        }

        // Longest first; stable so earlier registrations win ties
        labels.sort_by(|a, b| b.key.len().cmp(&a.key.len()));

        if labels.is_empty() {
            return Err(QuantityError::UnknownUnit(format!(
                "no labels available for {}",
                output_unit.phenomenon
            )));
        }

        Ok(ParserSpec {
            output_unit: output_unit.clone(),
            format,
            unit_conversions,
            labels,
            tier_indices,
        })
    }

    pub fn output_unit(&self) -> &UnitProps {
        &self.output_unit
    }

    pub fn format(&self) -> &Format {
        &self.format
    }

    /// One entry per unit of the phenomenon, converting into the output unit
    pub fn unit_conversions(&self) -> &[UnitConversionSpec] {
        &self.unit_conversions
    }

    /// Conversion for a label or alias (case-insensitive, exact)
    pub fn conversion_for_label(&self, label: &str) -> Option<&UnitConversionSpec> {
        let key: Vec<char> = label.trim().chars().map(fold_char).collect();
        self.labels
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &self.unit_conversions[entry.index])
    }

    pub(crate) fn labels(&self) -> &[LabelEntry] {
        &self.labels
    }

    /// Conversion indices of the composite tiers, largest first
    pub(crate) fn tier_indices(&self) -> &[usize] {
        &self.tier_indices
    }

    pub fn parse_into_quantity_value(&self, text: &str) -> ParseResult {
        Parser::parse_into_quantity_value(text, self)
    }
}

fn push_label(labels: &mut Vec<LabelEntry>, label: &str, index: usize) {
    let key: Vec<char> = label.trim().chars().map(fold_char).collect();
    if key.is_empty() || labels.iter().any(|entry| entry.key == key) {
        return;
    }
    labels.push(LabelEntry { key, index });
}
