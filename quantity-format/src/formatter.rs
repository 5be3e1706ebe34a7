//! Magnitude to text
//!
//! Formatting never fails: non-finite input renders a sentinel and every
//! finite value has a rendering.

use quantity_core::number::{
    fixed_parts, gcd, group_thousands, is_effectively_zero, round_to_factor, round_to_places,
    strip_trailing_zeros,
};
use crate::composite::{decompose, TierRounding};
use crate::format::{Format, FormatTrait, FormatType, ScientificType};
use crate::spec::FormatterSpec;

const THOUSANDS_SEPARATOR: char = ',';

/// Largest scaled fraction handled through integer arithmetic
const FRACTION_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Rendered number plus whether every digit shown is zero
struct Rendered {
    text: String,
    is_zero: bool,
}

pub struct Formatter;

impl Formatter {
    /// Render a magnitude in the formatter spec's persistent unit
    pub fn format_quantity(magnitude: f64, spec: &FormatterSpec) -> String {
        if magnitude.is_nan() {
            return "NaN".to_string();
        }
        if magnitude.is_infinite() {
            return if magnitude > 0.0 { "∞" } else { "-∞" }.to_string();
        }

        let format = spec.format();
        let Some(first) = spec.unit_conversions().first() else {
            return format_value(magnitude, format);
        };

        let mut value = first.conversion.apply(magnitude);
        if format.has_trait(FormatTrait::ApplyRounding) {
            value = round_to_factor(value, format.round_factor());
        }
        let negative = value < 0.0;

        let rendered = if format.has_units() {
            render_composite(value.abs(), spec)
        } else {
            let number = render_number(value.abs(), format);
            Rendered {
                text: with_label(number.text, &first.label, format),
                is_zero: number.is_zero,
            }
        };

        finish(rendered, negative, format)
    }
}

/// Render a bare value with no unit conversion or label
pub fn format_value(value: f64, format: &Format) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".to_string()
        } else if value > 0.0 {
            "∞".to_string()
        } else {
            "-∞".to_string()
        };
    }
    let rendered = render_number(value.abs(), format);
    finish(rendered, value < 0.0, format)
}

fn finish(rendered: Rendered, negative: bool, format: &Format) -> String {
    if rendered.is_zero {
        if format.has_trait(FormatTrait::ZeroEmpty) {
            return String::new();
        }
        return rendered.text;
    }
    if negative && !rendered.text.is_empty() {
        format!("-{}", rendered.text)
    } else {
        rendered.text
    }
}

fn with_label(number: String, label: &str, format: &Format) -> String {
    if !format.has_trait(FormatTrait::ShowUnitLabel) || label.is_empty() {
        return number;
    }
    if format.has_trait(FormatTrait::PrependUnitLabel) {
        format!("{}{}{}", label, format.uom_separator(), number)
    } else {
        format!("{}{}{}", number, format.uom_separator(), label)
    }
}

fn render_composite(value: f64, spec: &FormatterSpec) -> Rendered {
    let format = spec.format();
    // A lone tier is rounded by its own renderer
    let rounding = match format.format_type() {
        _ if spec.tier_ratios().is_empty() => TierRounding::None,
        FormatType::Fractional => TierRounding::Fraction(format.fraction_denominator()),
        _ => TierRounding::Decimal(format.precision()),
    };
    let parts = decompose(value, spec.tier_ratios(), rounding);
    let last = parts.len() - 1;

    let mut pieces = Vec::with_capacity(parts.len());
    let mut all_zero = true;
    for (i, (part, tier)) in parts.iter().zip(spec.unit_conversions()).enumerate() {
        let number = if i == last {
            render_number(*part, format)
        } else {
            render_whole(*part, format)
        };
        all_zero &= number.is_zero;
        pieces.push((number, tier.label.as_str()));
    }

    let keep: Vec<String> = if format.include_zero() {
        pieces
            .into_iter()
            .map(|(number, label)| with_label(number.text, label, format))
            .collect()
    } else {
        let non_zero: Vec<String> = pieces
            .iter()
            .filter(|(number, _)| !number.is_zero)
            .map(|(number, label)| with_label(number.text.clone(), label, format))
            .collect();
        if !non_zero.is_empty() {
            non_zero
        } else if format.has_trait(FormatTrait::KeepSingleZero) {
            pieces
                .pop()
                .map(|(number, label)| vec![with_label(number.text, label, format)])
                .unwrap_or_default()
        } else {
            Vec::new()
        }
    };

    Rendered {
        text: keep.join(format.spacer()),
        is_zero: all_zero,
    }
}

/// Whole number for an upper composite tier
fn render_whole(value: f64, format: &Format) -> Rendered {
    let (whole, _) = fixed_parts(value, 0);
    let is_zero = whole.chars().all(|c| c == '0');
    Rendered {
        text: group(whole, format),
        is_zero,
    }
}

fn render_number(value: f64, format: &Format) -> Rendered {
    match format.format_type() {
        FormatType::Decimal => render_decimal(value, format),
        FormatType::Fractional => render_fraction(value, format),
        FormatType::Scientific => render_scientific(value, format),
        FormatType::Station => render_station(value, format),
    }
}

fn group(whole: String, format: &Format) -> String {
    if format.has_trait(FormatTrait::Use1000Separator) {
        group_thousands(&whole, THOUSANDS_SEPARATOR)
    } else {
        whole
    }
}

/// Apply the decimal-point traits to a fraction digit string
fn join_fraction(whole: String, fraction: &str, format: &Format) -> String {
    let fraction = if format.has_trait(FormatTrait::TrailZeroes) {
        fraction
    } else {
        strip_trailing_zeros(fraction)
    };

    if !fraction.is_empty() {
        format!("{}.{}", whole, fraction)
    } else if format.has_trait(FormatTrait::KeepDecimalPoint) {
        if format.has_trait(FormatTrait::KeepSingleZero) {
            format!("{}.0", whole)
        } else {
            format!("{}.", whole)
        }
    } else {
        whole
    }
}

fn digits_are_zero(whole: &str, fraction: &str) -> bool {
    whole.chars().chain(fraction.chars()).all(|c| c == '0')
}

fn render_decimal(value: f64, format: &Format) -> Rendered {
    let (whole, fraction) = fixed_parts(value, format.precision());
    let is_zero = digits_are_zero(&whole, &fraction);
    Rendered {
        text: join_fraction(group(whole, format), &fraction, format),
        is_zero,
    }
}

fn render_fraction(value: f64, format: &Format) -> Rendered {
    let denominator = format.fraction_denominator();
    let scaled = round_to_places(value * denominator as f64, 0);
    if scaled >= FRACTION_LIMIT {
        let (whole, _) = fixed_parts(value, 0);
        let is_zero = digits_are_zero(&whole, "");
        return Rendered { text: group(whole, format), is_zero };
    }

    let units = scaled as u64;
    let whole = units / denominator;
    let numerator = units % denominator;
    let whole_text = group(whole.to_string(), format);

    if numerator == 0 {
        return Rendered {
            text: whole_text,
            is_zero: whole == 0,
        };
    }

    let divisor = gcd(numerator, denominator);
    let fraction = format!("{}/{}", numerator / divisor, denominator / divisor);
    let text = if whole == 0 && !format.has_trait(FormatTrait::KeepSingleZero) {
        fraction
    } else if format.has_trait(FormatTrait::FractionDash) {
        format!("{}-{}", whole_text, fraction)
    } else {
        format!("{} {}", whole_text, fraction)
    };
    Rendered { text, is_zero: false }
}

fn render_scientific(value: f64, format: &Format) -> Rendered {
    let precision = format.precision();
    let (mantissa, exponent) = if is_effectively_zero(value) {
        (0.0, 0)
    } else {
        let mut exponent = value.log10().floor() as i32;
        if format.scientific_type() == ScientificType::ZeroNormalized {
            exponent += 1;
        }
        let mut mantissa = round_to_places(value / 10f64.powi(exponent), precision);
        let limit = match format.scientific_type() {
            ScientificType::Normalized => 10.0,
            ScientificType::ZeroNormalized => 1.0,
        };
        if mantissa >= limit {
            mantissa = round_to_places(mantissa / 10.0, precision);
            exponent += 1;
        }
        (mantissa, exponent)
    };

    let (whole, fraction) = fixed_parts(mantissa, precision);
    let is_zero = digits_are_zero(&whole, &fraction);
    let sign = if exponent < 0 {
        "-"
    } else if format.has_trait(FormatTrait::ExponentOnlyNegative) {
        ""
    } else {
        "+"
    };
    Rendered {
        text: format!("{}e{}{}", join_fraction(whole, &fraction, format), sign, exponent.abs()),
        is_zero,
    }
}

fn render_station(value: f64, format: &Format) -> Rendered {
    let (whole, fraction) = fixed_parts(value, format.precision());
    let is_zero = digits_are_zero(&whole, &fraction);
    let size = format.station_offset_size() as usize;

    let (station, offset) = if whole.len() > size {
        let split = whole.len() - size;
        (whole[..split].to_string(), whole[split..].to_string())
    } else {
        ("0".to_string(), format!("{:0>width$}", whole, width = size))
    };

    let offset = join_fraction(offset, &fraction, format);
    Rendered {
        text: format!("{}{}{}", group(station, format), format.station_separator(), offset),
        is_zero,
    }
}
