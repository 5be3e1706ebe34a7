//! Built-in unit directory - common length, area, volume, angle, temperature,
//! time and mass units keyed by "Units.*" names

use std::collections::HashMap;
use std::f64::consts::PI;
use async_trait::async_trait;
use tracing::debug;
use quantity_core::{QuantityError, QuantityResult};
use crate::provider::UnitsProvider;
use crate::{Phenomenon, UnitProps, UnitSystem};

/// US survey foot in meters
pub const SURVEY_FOOT: f64 = 1200.0 / 3937.0;

/// In-memory unit directory
pub struct BasicUnitsProvider {
    units: Vec<UnitProps>,
    by_name: HashMap<String, usize>,
    /// Lowercased label or alias -> unit indices
    by_label: HashMap<String, Vec<usize>>,
}

impl BasicUnitsProvider {
    pub fn new() -> Self {
        let mut registry = BasicUnitsProvider {
            units: Vec::new(),
            by_name: HashMap::new(),
            by_label: HashMap::new(),
        };
        registry.register_all_units();
        debug!(units = registry.units.len(), "basic unit directory ready");
        registry
    }

    /// Directory with no units; populate with `with_unit`
    pub fn empty() -> Self {
        BasicUnitsProvider {
            units: Vec::new(),
            by_name: HashMap::new(),
            by_label: HashMap::new(),
        }
    }

    /// Builder: add or replace a unit
    pub fn with_unit(mut self, unit: UnitProps) -> Self {
        self.register(unit);
        self
    }

    /// Get a unit by name
    pub fn get(&self, name: &str) -> Option<&UnitProps> {
        self.by_name.get(name).map(|&i| &self.units[i])
    }

    /// Get units whose label or alias matches, case-insensitively
    pub fn by_label(&self, label: &str) -> Vec<&UnitProps> {
        self.by_label
            .get(&label.trim().to_lowercase())
            .map(|indices| indices.iter().map(|&i| &self.units[i]).collect())
            .unwrap_or_default()
    }

    /// All unit names, in registration order
    pub fn names(&self) -> Vec<&str> {
        self.units.iter().map(|u| u.name.as_str()).collect()
    }

    fn register(&mut self, unit: UnitProps) {
        let existing = self.by_name.get(&unit.name).copied();
        let index = match existing {
            Some(i) => {
                self.units[i] = unit;
                for indices in self.by_label.values_mut() {
                    indices.retain(|&j| j != i);
                }
                i
            }
            None => {
                self.units.push(unit);
                let i = self.units.len() - 1;
                self.by_name.insert(self.units[i].name.clone(), i);
                i
            }
        };

        let labels: Vec<String> = self.units[index].labels().map(|l| l.to_lowercase()).collect();
        for label in labels {
            let entry = self.by_label.entry(label).or_default();
            if !entry.contains(&index) {
                entry.push(index);
            }
        }
    }

    fn register_all_units(&mut self) {
        self.register_length_units();
        self.register_area_units();
        self.register_volume_units();
        self.register_angle_units();
        self.register_temperature_units();
        self.register_time_units();
        self.register_mass_units();
    }

    fn register_length_units(&mut self) {
        use Phenomenon::Length;
        use UnitSystem::*;

        // SI length units
        self.register(UnitProps::new("Units.M", "m", Length, Metric, 1.0).aliases(&["meter", "meters", "metre", "metres"]));
        self.register(UnitProps::new("Units.KM", "km", Length, Metric, 1000.0).aliases(&["kilometer", "kilometers"]));
        self.register(UnitProps::new("Units.DM", "dm", Length, Metric, 0.1));
        self.register(UnitProps::new("Units.CM", "cm", Length, Metric, 0.01).aliases(&["centimeter", "centimeters"]));
        self.register(UnitProps::new("Units.MM", "mm", Length, Metric, 0.001).aliases(&["millimeter", "millimeters"]));
        self.register(UnitProps::new("Units.UM", "µm", Length, Metric, 1.0e-6).aliases(&["um", "micron", "microns"]));

        // Imperial/US length units
        self.register(UnitProps::new("Units.IN", "in", Length, Imperial, 0.0254).aliases(&["\"", "inch", "inches"]));
        self.register(UnitProps::new("Units.FT", "ft", Length, Imperial, 0.3048).aliases(&["'", "feet", "foot"]));
        self.register(UnitProps::new("Units.YRD", "yd", Length, Imperial, 0.9144).aliases(&["yrd", "yard", "yards"]));
        self.register(UnitProps::new("Units.MILE", "mi", Length, Imperial, 1609.344).aliases(&["mile", "miles"]));

        // US survey length units
        self.register(UnitProps::new("Units.SURVEY_IN", "in (US Survey)", Length, UsSurvey, 100.0 / 3937.0).aliases(&["usin"]));
        self.register(UnitProps::new("Units.SURVEY_FT", "ft (US Survey)", Length, UsSurvey, SURVEY_FOOT).aliases(&["usft", "survey ft"]));
        self.register(UnitProps::new("Units.SURVEY_YRD", "yrd (US Survey)", Length, UsSurvey, 3600.0 / 3937.0).aliases(&["usyd"]));
        self.register(UnitProps::new("Units.SURVEY_MILE", "mi (US Survey)", Length, UsSurvey, 6_336_000.0 / 3937.0).aliases(&["usmi"]));
    }

    fn register_area_units(&mut self) {
        use Phenomenon::Area;
        use UnitSystem::*;

        self.register(UnitProps::new("Units.SQ_M", "m²", Area, Metric, 1.0).aliases(&["m2", "m^2", "sq m", "sm"]));
        self.register(UnitProps::new("Units.SQ_KM", "km²", Area, Metric, 1.0e6).aliases(&["km2", "sq km"]));
        self.register(UnitProps::new("Units.HECTARE", "ha", Area, Metric, 1.0e4).aliases(&["hectare", "hectares"]));
        self.register(UnitProps::new("Units.SQ_CM", "cm²", Area, Metric, 1.0e-4).aliases(&["cm2", "sq cm"]));
        self.register(UnitProps::new("Units.SQ_MM", "mm²", Area, Metric, 1.0e-6).aliases(&["mm2", "sq mm"]));

        self.register(UnitProps::new("Units.SQ_IN", "in²", Area, Imperial, 0.0254 * 0.0254).aliases(&["in2", "sq in", "sqin"]));
        self.register(UnitProps::new("Units.SQ_FT", "ft²", Area, Imperial, 0.3048 * 0.3048).aliases(&["ft2", "sq ft", "sqft", "sf"]));
        self.register(UnitProps::new("Units.SQ_YRD", "yd²", Area, Imperial, 0.9144 * 0.9144).aliases(&["yd2", "sq yd"]));
        self.register(UnitProps::new("Units.SQ_MILE", "mi²", Area, Imperial, 1609.344 * 1609.344).aliases(&["mi2", "sq mi"]));
        self.register(UnitProps::new("Units.ACRE", "acre", Area, Imperial, 4046.856_422_4).aliases(&["acres", "ac"]));

        self.register(UnitProps::new("Units.SQ_SURVEY_FT", "ft² (US Survey)", Area, UsSurvey, SURVEY_FOOT * SURVEY_FOOT).aliases(&["sussf", "sq ft (US Survey)"]));
    }

    fn register_volume_units(&mut self) {
        use Phenomenon::Volume;
        use UnitSystem::*;

        self.register(UnitProps::new("Units.CUB_M", "m³", Volume, Metric, 1.0).aliases(&["m3", "m^3", "cu m"]));
        self.register(UnitProps::new("Units.LITRE", "L", Volume, Metric, 1.0e-3).aliases(&["litre", "liter", "litres", "liters"]));
        self.register(UnitProps::new("Units.CUB_CM", "cm³", Volume, Metric, 1.0e-6).aliases(&["cm3", "cc"]));
        self.register(UnitProps::new("Units.CUB_MM", "mm³", Volume, Metric, 1.0e-9).aliases(&["mm3"]));

        self.register(UnitProps::new("Units.CUB_IN", "in³", Volume, Imperial, 0.0254 * 0.0254 * 0.0254).aliases(&["in3", "cu in"]));
        self.register(UnitProps::new("Units.CUB_FT", "ft³", Volume, Imperial, 0.3048 * 0.3048 * 0.3048).aliases(&["ft3", "cu ft", "cf"]));
        self.register(UnitProps::new("Units.CUB_YRD", "yd³", Volume, Imperial, 0.9144 * 0.9144 * 0.9144).aliases(&["yd3", "cu yd"]));
        self.register(UnitProps::new("Units.US_GALLON", "gal", Volume, Imperial, 0.003_785_411_784).aliases(&["gallon", "gallons"]));
    }

    fn register_angle_units(&mut self) {
        use Phenomenon::Angle;
        use UnitSystem::*;

        self.register(UnitProps::new("Units.RAD", "rad", Angle, Metric, 1.0).aliases(&["radian", "radians"]));
        self.register(UnitProps::new("Units.ARC_DEG", "°", Angle, Other, PI / 180.0).aliases(&["deg", "degree", "degrees", "^"]));
        self.register(UnitProps::new("Units.ARC_MINUTE", "'", Angle, Other, PI / 10_800.0).aliases(&["min", "arcmin", "′"]));
        self.register(UnitProps::new("Units.ARC_SECOND", "\"", Angle, Other, PI / 648_000.0).aliases(&["sec", "arcsec", "″"]));
        self.register(UnitProps::new("Units.GRAD", "grad", Angle, Metric, PI / 200.0).aliases(&["gon", "grads"]));
    }

    fn register_temperature_units(&mut self) {
        use Phenomenon::Temperature;
        use UnitSystem::*;

        self.register(UnitProps::new("Units.K", "K", Temperature, Metric, 1.0).aliases(&["kelvin"]));
        self.register(UnitProps::with_offset("Units.CELSIUS", "°C", Temperature, Metric, 1.0, 273.15).aliases(&["degC", "celsius"]));
        self.register(UnitProps::with_offset("Units.FAHRENHEIT", "°F", Temperature, Imperial, 5.0 / 9.0, 273.15 - 32.0 * 5.0 / 9.0).aliases(&["degF", "fahrenheit"]));
        self.register(UnitProps::new("Units.RANKINE", "°R", Temperature, Imperial, 5.0 / 9.0).aliases(&["degR", "rankine"]));
    }

    fn register_time_units(&mut self) {
        use Phenomenon::Time;
        use UnitSystem::*;

        self.register(UnitProps::new("Units.S", "s", Time, Metric, 1.0).aliases(&["sec", "second", "seconds"]));
        self.register(UnitProps::new("Units.MS", "ms", Time, Metric, 1.0e-3).aliases(&["millisecond", "milliseconds"]));
        self.register(UnitProps::new("Units.MIN", "min", Time, Other, 60.0).aliases(&["minute", "minutes"]));
        self.register(UnitProps::new("Units.HR", "h", Time, Other, 3600.0).aliases(&["hr", "hour", "hours"]));
        self.register(UnitProps::new("Units.DAY", "d", Time, Other, 86_400.0).aliases(&["day", "days"]));
    }

    fn register_mass_units(&mut self) {
        use Phenomenon::Mass;
        use UnitSystem::*;

        self.register(UnitProps::new("Units.KG", "kg", Mass, Metric, 1.0).aliases(&["kilogram", "kilograms"]));
        self.register(UnitProps::new("Units.G", "g", Mass, Metric, 1.0e-3).aliases(&["gram", "grams"]));
        self.register(UnitProps::new("Units.MG", "mg", Mass, Metric, 1.0e-6).aliases(&["milligram", "milligrams"]));
        self.register(UnitProps::new("Units.LBM", "lb", Mass, Imperial, 0.453_592_37).aliases(&["lbs", "pound", "pounds"]));
        self.register(UnitProps::new("Units.OZM", "oz", Mass, Imperial, 0.028_349_523_125).aliases(&["ounce", "ounces"]));
    }
}

impl Default for BasicUnitsProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UnitsProvider for BasicUnitsProvider {
    async fn find_unit_by_name(&self, name: &str) -> QuantityResult<UnitProps> {
        self.get(name)
            .cloned()
            .ok_or_else(|| QuantityError::UnknownUnit(name.to_string()))
    }

    async fn find_unit(&self, label: &str, phenomenon: Option<&Phenomenon>) -> QuantityResult<UnitProps> {
        self.by_label(label)
            .into_iter()
            .find(|u| phenomenon.map_or(true, |p| &u.phenomenon == p))
            .cloned()
            .ok_or_else(|| QuantityError::UnknownUnit(label.to_string()))
    }

    async fn get_units_by_family(&self, phenomenon: &Phenomenon) -> QuantityResult<Vec<UnitProps>> {
        Ok(self
            .units
            .iter()
            .filter(|u| &u.phenomenon == phenomenon)
            .cloned()
            .collect())
    }
}
