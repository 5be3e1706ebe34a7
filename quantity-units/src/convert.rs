//! Conversion resolution between units of one phenomenon
//!
//! Every conversion goes through the phenomenon base unit:
//! `base = value * from.factor + from.offset`, then
//! `value' = (base - to.offset) / to.factor`. The two steps fold into a
//! single affine `(factor, offset)` pair.

use serde::{Deserialize, Serialize};
use quantity_core::{QuantityError, QuantityResult};
use crate::provider::UnitsProvider;
use crate::unit::incompatible;
use crate::{UnitProps, UnitSystem};

/// Affine conversion: `target = source * factor + offset`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitConversion {
    pub factor: f64,
    #[serde(default)]
    pub offset: f64,
}

impl UnitConversion {
    pub const IDENTITY: UnitConversion = UnitConversion { factor: 1.0, offset: 0.0 };

    pub fn apply(&self, value: f64) -> f64 {
        value * self.factor + self.offset
    }
}

impl Default for UnitConversion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A resolved conversion bound to the unit it converts into (or out of)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitConversionSpec {
    /// Unit name, e.g. "Units.IN"
    pub name: String,
    /// Label to display (format override or the unit's own label)
    pub label: String,
    #[serde(default)]
    pub system: UnitSystem,
    pub conversion: UnitConversion,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternate_labels: Vec<String>,
}

impl UnitConversionSpec {
    pub fn new(unit: &UnitProps, label: Option<&str>, conversion: UnitConversion) -> Self {
        UnitConversionSpec {
            name: unit.name.clone(),
            label: label.unwrap_or(&unit.label).to_string(),
            system: unit.system,
            conversion,
            alternate_labels: unit.alternate_labels.clone(),
        }
    }

    /// Display label followed by aliases
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.label.as_str()).chain(self.alternate_labels.iter().map(|s| s.as_str()))
    }
}

/// Resolve the conversion from `from` into `to`
pub fn get_conversion(from: &UnitProps, to: &UnitProps) -> QuantityResult<UnitConversion> {
    if !from.is_compatible(to) {
        return Err(incompatible(from, to));
    }
    if to.factor == 0.0 || !to.factor.is_finite() {
        return Err(QuantityError::UnknownUnit(format!(
            "{} has no usable conversion factor",
            to.name
        )));
    }
    if from.name == to.name {
        return Ok(UnitConversion::IDENTITY);
    }

    Ok(UnitConversion {
        factor: from.factor / to.factor,
        offset: (from.offset - to.offset) / to.factor,
    })
}

/// One spec per unit of `out_unit`'s phenomenon, each converting from that
/// unit into `out_unit`. This is the table a parser needs.
pub async fn create_unit_conversion_specs_for_unit(
    provider: &dyn UnitsProvider,
    out_unit: &UnitProps,
) -> QuantityResult<Vec<UnitConversionSpec>> {
    let family = provider.get_units_by_family(&out_unit.phenomenon).await?;

    family
        .iter()
        .map(|unit| {
            let conversion = get_conversion(unit, out_unit)?;
            Ok(UnitConversionSpec::new(unit, None, conversion))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BasicUnitsProvider, Phenomenon};

    fn meter() -> UnitProps {
        UnitProps::new("Units.M", "m", Phenomenon::Length, UnitSystem::Metric, 1.0)
    }

    fn foot() -> UnitProps {
        UnitProps::new("Units.FT", "ft", Phenomenon::Length, UnitSystem::Imperial, 0.3048)
    }

    fn inch() -> UnitProps {
        UnitProps::new("Units.IN", "in", Phenomenon::Length, UnitSystem::Imperial, 0.0254)
    }

    #[test]
    fn test_get_conversion() {
        let c = get_conversion(&meter(), &foot()).unwrap();
        assert!((c.apply(0.3048) - 1.0).abs() < 1e-12);
        assert_eq!(c.offset, 0.0);
    }

    #[test]
    fn test_identity() {
        assert_eq!(get_conversion(&foot(), &foot()).unwrap(), UnitConversion::IDENTITY);
    }

    #[test]
    fn test_affine_conversion() {
        let c = UnitProps::with_offset("Units.CELSIUS", "°C", Phenomenon::Temperature, UnitSystem::Metric, 1.0, 273.15);
        let f = UnitProps::with_offset(
            "Units.FAHRENHEIT", "°F", Phenomenon::Temperature, UnitSystem::Imperial,
            5.0 / 9.0, 273.15 - 32.0 * 5.0 / 9.0,
        );
        let conv = get_conversion(&c, &f).unwrap();
        assert!((conv.apply(100.0) - 212.0).abs() < 1e-9);
        let back = get_conversion(&f, &c).unwrap();
        assert!(back.apply(32.0).abs() < 1e-9);
    }

    #[test]
    fn test_incompatible() {
        let sq = UnitProps::new("Units.SQ_M", "m²", Phenomenon::Area, UnitSystem::Metric, 1.0);
        assert!(matches!(
            get_conversion(&meter(), &sq),
            Err(QuantityError::IncompatiblePhenomenon { .. })
        ));
    }

    #[test]
    fn test_tier_ratio() {
        let ft_to_in = get_conversion(&foot(), &inch()).unwrap();
        assert!((ft_to_in.factor - 12.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_specs_for_unit_cover_family() {
        let provider = BasicUnitsProvider::new();
        let ft = provider.find_unit_by_name("Units.FT").await.unwrap();
        let specs = create_unit_conversion_specs_for_unit(&provider, &ft).await.unwrap();

        let meter_spec = specs.iter().find(|s| s.name == "Units.M").unwrap();
        assert!((meter_spec.conversion.apply(12.192) - 40.0).abs() < 1e-9);
        assert!(specs.iter().all(|s| s.name != "Units.SQ_M"));
    }
}
