//! Caller-defined quantity types

use async_trait::async_trait;
use quantity_core::QuantityResult;
use quantity_format::{FormatterSpec, ParserSpec};
use quantity_units::UnitsProvider;

/// Builds the specs for a quantity type the formatter does not know natively
#[async_trait]
pub trait FormatterParserSpecsProvider: Send + Sync {
    /// Name the type is registered and requested under
    fn quantity_type_name(&self) -> &str;

    /// Persistent unit, when the type accepts format overrides
    fn persistence_unit_name(&self) -> Option<&str> {
        None
    }

    async fn create_formatter_spec(&self, units: &dyn UnitsProvider, use_imperial: bool) -> QuantityResult<FormatterSpec>;

    async fn create_parser_spec(&self, units: &dyn UnitsProvider, use_imperial: bool) -> QuantityResult<ParserSpec>;
}
