//! Quantity Format - format definitions, formatting and parsing
//!
//! A `Format` describes how a magnitude is displayed: decimal, fractional,
//! scientific or station style, optionally split across composite units
//! (feet and inches, degrees minutes seconds). A `FormatterSpec` or
//! `ParserSpec` binds a format to resolved unit conversions; the formatter
//! and parser are pure functions over those specs.

pub mod composite;
mod format;
mod formatter;
mod parse_result;
mod parser;
mod spec;

pub use format::{
    CompositeProps, CompositeUnit, CompositeUnitProps, Format, FormatProps, FormatTrait,
    FormatTraits, FormatType, ScientificType, TraitList, MAX_COMPOSITE_UNITS,
    MAX_DECIMAL_PRECISION, MAX_FRACTION_PRECISION,
};
pub use formatter::{format_value, Formatter};
pub use parse_result::{ParseError, ParseResult};
pub use parser::Parser;
pub use spec::{create_unit_conversion_specs, FormatterSpec, ParserSpec};
