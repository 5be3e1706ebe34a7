//! Quantity Units - Unit directory and conversion resolution
//!
//! Provides the unit metadata the formatter and parser are built from.
//! Units convert only within a phenomenon, through its base unit.
//!
//! Phenomena:
//! - Length (m, mm, ft, in, ft (US Survey), etc.)
//! - Area (m², ft², ft² (US Survey), acre, etc.)
//! - Volume (m³, L, ft³, gal, etc.)
//! - Angle (rad, °, ', ")
//! - Temperature (K, °C, °F)
//! - Time (s, min, h, d)
//! - Mass (kg, g, lb, oz)

mod phenomenon;
mod unit;
mod units;
mod provider;
pub mod convert;

pub use phenomenon::{Phenomenon, UnitSystem};
pub use unit::UnitProps;
pub use units::{BasicUnitsProvider, SURVEY_FOOT};
pub use provider::UnitsProvider;
pub use convert::{
    create_unit_conversion_specs_for_unit, get_conversion, UnitConversion, UnitConversionSpec,
};
