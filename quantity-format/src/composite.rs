//! Composite tier decomposition
//!
//! Splits a magnitude in the largest tier unit into one value per tier
//! (e.g. feet and inches). Every tier but the last holds a whole number; the
//! last tier carries the rounded remainder. When the remainder rounds up to a
//! full unit of the tier above, it carries back through all tiers.

use quantity_core::number::{is_effectively_zero, round_to_places};

/// Relative slack used when a float sits just under an integer
const FLOOR_GUARD: f64 = 1.0e-9;

/// How the final tier is rounded
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TierRounding {
    /// Decimal places
    Decimal(u32),
    /// Nearest 1/denominator
    Fraction(u64),
    None,
}

impl TierRounding {
    pub fn apply(&self, value: f64) -> f64 {
        match *self {
            TierRounding::Decimal(places) => round_to_places(value, places),
            TierRounding::Fraction(denominator) if denominator > 0 => {
                let d = denominator as f64;
                round_to_places(value * d, 0) / d
            }
            _ => value,
        }
    }
}

/// Snap ratios that are integers up to float noise (0.3048 / 0.0254)
fn clean_ratio(ratio: f64) -> f64 {
    let nearest = ratio.round();
    if nearest > 0.0 && (ratio - nearest).abs() <= FLOOR_GUARD * ratio {
        nearest
    } else {
        ratio
    }
}

/// Floor that treats 4.9999999999 as 5
fn guarded_floor(value: f64) -> f64 {
    let nearest = value.round();
    if (value - nearest).abs() <= FLOOR_GUARD * value.abs().max(1.0) {
        nearest
    } else {
        value.floor()
    }
}

/// Decompose a non-negative value given in the first tier unit.
///
/// `ratios[i]` is how many units of tier `i + 1` make one unit of tier `i`,
/// so `ratios.len() + 1` tiers are produced.
pub fn decompose(value: f64, ratios: &[f64], rounding: TierRounding) -> Vec<f64> {
    let ratios: Vec<f64> = ratios.iter().map(|r| clean_ratio(*r)).collect();
    let mut parts = Vec::with_capacity(ratios.len() + 1);
    let mut remaining = value.abs();

    for ratio in &ratios {
        let whole = guarded_floor(remaining);
        parts.push(whole);
        remaining = ((remaining - whole) * ratio).max(0.0);
    }
    let last = rounding.apply(remaining);
    parts.push(if is_effectively_zero(last) { 0.0 } else { last });

    // Cascade carries from the finest tier upwards
    for i in (1..parts.len()).rev() {
        let ratio = ratios[i - 1];
        if parts[i] >= ratio - FLOOR_GUARD * ratio {
            parts[i] = (parts[i] - ratio).max(0.0);
            if is_effectively_zero(parts[i]) {
                parts[i] = 0.0;
            }
            parts[i - 1] += 1.0;
        }
    }
    parts
}
