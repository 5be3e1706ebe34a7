//! Quantity Formatter - spec cache and format management
//!
//! `QuantityFormatter` is the entry point: it owns the override table and
//! the formatter and parser spec cache, knows the default formats of the built-in quantity types
//! and accepts caller-defined types through `FormatterParserSpecsProvider`.

mod cache;
mod defaults;
mod overrides;
mod provider;
mod quantity_formatter;
mod quantity_type;

pub use cache::SpecPair;
pub use defaults::default_format;
pub use overrides::OverrideFormatEntry;
pub use provider::FormatterParserSpecsProvider;
pub use quantity_formatter::QuantityFormatter;
pub use quantity_type::QuantityType;

// Re-export the layers below for single-crate consumers
pub use quantity_core::{QuantityError, QuantityResult};
pub use quantity_format::{
    Format, FormatProps, FormatTrait, FormatType, FormatterSpec, ParseError, ParseResult, ParserSpec,
};
pub use quantity_units::{BasicUnitsProvider, UnitProps, UnitsProvider};
