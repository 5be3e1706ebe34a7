//! Unit directory interface
//!
//! The engine never owns unit definitions; it asks a provider. Lookups may
//! suspend (a provider can be backed by a remote schema), so the trait is
//! async.

use async_trait::async_trait;
use quantity_core::QuantityResult;
use crate::convert::{get_conversion, UnitConversion};
use crate::{Phenomenon, UnitProps};

/// Source of unit metadata
#[async_trait]
pub trait UnitsProvider: Send + Sync {
    /// Find a unit by its unique name (e.g., "Units.FT")
    async fn find_unit_by_name(&self, name: &str) -> QuantityResult<UnitProps>;

    /// Find a unit by display label or alias, optionally restricted to a phenomenon
    async fn find_unit(&self, label: &str, phenomenon: Option<&Phenomenon>) -> QuantityResult<UnitProps>;

    /// All units of a phenomenon, in a stable order
    async fn get_units_by_family(&self, phenomenon: &Phenomenon) -> QuantityResult<Vec<UnitProps>>;

    /// Conversion from one unit into another
    async fn get_conversion(&self, from: &UnitProps, to: &UnitProps) -> QuantityResult<UnitConversion> {
        get_conversion(from, to)
    }
}
