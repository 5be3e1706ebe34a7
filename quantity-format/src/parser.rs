//! Text to magnitude
//!
//! Input is tokenised into numbers and unit labels. Labels are matched
//! greedily against the parser spec's label table, longest first and case-insensitive, so
//! `ft (US Survey)` wins over `ft`. Each number is converted through its
//! unit into the parser spec's output unit and the pieces are summed.
//!
//! Labels normally follow their number (`5 ft 6 in`). Input that opens with a
//! label is read prefix style (`ft 5 in 6`, as written by `prependUnitLabel`).

use crate::format::FormatType;
use crate::parse_result::{ParseError, ParseResult};
use crate::spec::{fold_char, ParserSpec};

const THOUSANDS_SEPARATOR: char = ',';

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number { value: f64, fraction: bool },
    Unit(usize),
}

pub struct Parser;

impl Parser {
    /// Parse text into a magnitude in the parser spec's output unit
    pub fn parse_into_quantity_value(text: &str, spec: &ParserSpec) -> ParseResult {
        parse(text, spec).into()
    }
}

fn parse(text: &str, spec: &ParserSpec) -> Result<f64, ParseError> {
    let trimmed = text.trim();
    let (sign, body) = match trimmed.chars().next() {
        Some('-') => (-1.0, &trimmed[1..]),
        Some('+') => (1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };

    let mut body: Vec<char> = body.trim_start().chars().collect();
    if body.is_empty() {
        return Err(ParseError::NoValueOrUnitFoundInString);
    }

    let format = spec.format();
    if format.format_type() == FormatType::Station {
        let separator: Vec<char> = format.station_separator().chars().collect();
        body = remove_between_digits(&body, &separator);
    }
    body = remove_between_digits(&body, &[THOUSANDS_SEPARATOR]);

    let tokens = tokenize(&body, spec)?;
    let components = pair_components(&tokens);
    if components.is_empty() {
        return Err(ParseError::NoValueOrUnitFoundInString);
    }

    let conversions = spec.unit_conversions();
    let tiers = spec.tier_indices();
    let mut total = 0.0;
    let mut previous: Option<usize> = None;

    for (i, (value, unit)) in components.iter().enumerate() {
        let unit = match unit {
            Some(index) => Some(*index),
            None => default_unit(previous, tiers),
        };
        let (factor, offset) = match unit {
            Some(index) => {
                let c = conversions[index].conversion;
                (c.factor, c.offset)
            }
            None => (1.0, 0.0),
        };
        total += sign * value * factor;
        // An affine offset applies once, to the leading component
        if i == 0 {
            total += offset;
        }
        previous = unit;
    }
    Ok(total)
}

/// Unit for a number with no label: the tier after the previous one, else the
/// first tier, else the output unit (None)
fn default_unit(previous: Option<usize>, tiers: &[usize]) -> Option<usize> {
    match previous {
        None => tiers.first().copied(),
        Some(index) => match tiers.iter().position(|t| *t == index) {
            Some(k) => tiers.get(k + 1).copied(),
            None => None,
        },
    }
}

/// Drop a separator sequence wherever it sits between two digits
fn remove_between_digits(text: &[char], separator: &[char]) -> Vec<char> {
    if separator.is_empty() {
        return text.to_vec();
    }
    let mut out = Vec::with_capacity(text.len());
    let mut i = 0;
    while i < text.len() {
        let end = i + separator.len();
        let between_digits = i > 0
            && text[i - 1].is_ascii_digit()
            && end < text.len()
            && text[end].is_ascii_digit()
            && text[i..end] == *separator;
        if between_digits {
            i = end;
        } else {
            out.push(text[i]);
            i += 1;
        }
    }
    out
}

fn tokenize(text: &[char], spec: &ParserSpec) -> Result<Vec<Token>, ParseError> {
    let folded: Vec<char> = text.iter().map(|c| fold_char(*c)).collect();
    let mut tokens: Vec<Token> = Vec::new();
    let mut after_separator = false;
    let mut i = 0;

    while i < text.len() {
        let c = text[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if starts_number(text, i) {
            let (token, next) = read_number(text, i)?;
            push_number(&mut tokens, token);
            after_separator = false;
            i = next;
            continue;
        }

        if let Some((index, next)) = match_label(&folded, i, spec) {
            tokens.push(Token::Unit(index));
            after_separator = false;
            i = next;
            continue;
        }

        // Separators between composite pieces ("4'-6\"")
        let more_follows = text[i + 1..].iter().any(|c| !c.is_whitespace());
        if matches!(c, '-' | '+' | ',' | ';') && !tokens.is_empty() && !after_separator && more_follows {
            after_separator = true;
            i += 1;
            continue;
        }

        let end = text[i..]
            .iter()
            .position(|c| c.is_whitespace() || c.is_ascii_digit())
            .map_or(text.len(), |p| i + p);
        return Err(ParseError::UnknownUnitToken(text[i..end].iter().collect()));
    }
    Ok(tokens)
}

fn starts_number(text: &[char], i: usize) -> bool {
    text[i].is_ascii_digit()
        || (text[i] == '.' && text.get(i + 1).is_some_and(|c| c.is_ascii_digit()))
}

fn skip_spaces(text: &[char], mut i: usize) -> usize {
    while i < text.len() && text[i] == ' ' {
        i += 1;
    }
    i
}

fn read_digits(text: &[char], mut i: usize) -> usize {
    while i < text.len() && text[i].is_ascii_digit() {
        i += 1;
    }
    i
}

/// Read a decimal, exponent or `a/b` number starting at `start`
fn read_number(text: &[char], start: usize) -> Result<(Token, usize), ParseError> {
    let mut i = start;
    while i < text.len() && (text[i].is_ascii_digit() || text[i] == '.') {
        i += 1;
    }

    // Exponent only when digits follow, so "5e" stays a label
    if i < text.len() && (text[i] == 'e' || text[i] == 'E') {
        let mut j = i + 1;
        if j < text.len() && (text[j] == '+' || text[j] == '-') {
            j += 1;
        }
        if j < text.len() && text[j].is_ascii_digit() {
            i = read_digits(text, j);
        }
    }

    let literal: String = text[start..i].iter().collect();
    let value: f64 = literal
        .parse()
        .map_err(|_| ParseError::InvalidNumber(literal.clone()))?;

    let slash = skip_spaces(text, i);
    if slash < text.len() && text[slash] == '/' {
        let denominator_start = skip_spaces(text, slash + 1);
        let end = read_digits(text, denominator_start);
        let denominator_text: String = text[denominator_start..end].iter().collect();
        let full: String = text[start..end].iter().collect();
        let denominator: f64 = denominator_text
            .parse()
            .map_err(|_| ParseError::InvalidNumber(full.clone()))?;
        if denominator == 0.0 {
            return Err(ParseError::InvalidNumber(full));
        }
        return Ok((Token::Number { value: value / denominator, fraction: true }, end));
    }

    Ok((Token::Number { value, fraction: false }, i))
}

/// A fraction right after a plain number forms a mixed number ("4 1/2")
fn push_number(tokens: &mut Vec<Token>, token: Token) {
    if let Token::Number { value: fraction, fraction: true } = token {
        if let Some(Token::Number { value, fraction: false }) = tokens.last_mut() {
            *value += fraction;
            return;
        }
    }
    tokens.push(token);
}

/// Longest label starting at `i`. Labels ending in a letter or digit must not
/// run into further letters ("m" does not match "mi").
fn match_label(folded: &[char], i: usize, spec: &ParserSpec) -> Option<(usize, usize)> {
    let rest = &folded[i..];
    spec.labels().iter().find_map(|entry| {
        if !rest.starts_with(&entry.key) {
            return None;
        }
        let end = i + entry.key.len();
        let word_label = entry.key.last().is_some_and(|c| c.is_alphanumeric());
        let runs_on = folded.get(end).is_some_and(|c| c.is_alphabetic());
        if word_label && runs_on {
            None
        } else {
            Some((entry.index, end))
        }
    })
}

/// Pair numbers with their labels: the label after each number, or the
/// label before it when the input opens with a label
fn pair_components(tokens: &[Token]) -> Vec<(f64, Option<usize>)> {
    if matches!(tokens.first(), Some(Token::Unit(_))) {
        return pair_prefixed(tokens);
    }

    let mut components = Vec::new();
    let mut pending: Option<f64> = None;
    for token in tokens {
        match *token {
            Token::Number { value, .. } => {
                if let Some(previous) = pending.replace(value) {
                    components.push((previous, None));
                }
            }
            Token::Unit(index) => {
                if let Some(value) = pending.take() {
                    components.push((value, Some(index)));
                }
            }
        }
    }
    if let Some(value) = pending {
        components.push((value, None));
    }
    components
}

fn pair_prefixed(tokens: &[Token]) -> Vec<(f64, Option<usize>)> {
    let mut components = Vec::new();
    let mut label: Option<usize> = None;
    for token in tokens {
        match *token {
            Token::Unit(index) => label = Some(index),
            Token::Number { value, .. } => components.push((value, label.take())),
        }
    }
    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{Format, FormatProps, FormatTrait};
    use quantity_units::{BasicUnitsProvider, UnitsProvider};

    const LABELED: [FormatTrait; 2] = [FormatTrait::KeepSingleZero, FormatTrait::ShowUnitLabel];

    async fn spec_for(props: FormatProps, output: &str) -> ParserSpec {
        let provider = BasicUnitsProvider::new();
        let unit = provider.find_unit_by_name(output).await.unwrap();
        let format = Format::from_props("test", &props, &provider).await.unwrap();
        ParserSpec::create(format, &provider, &unit).await.unwrap()
    }

    async fn feet_inches() -> ParserSpec {
        let props = FormatProps::new(FormatType::Fractional, 3)
            .traits(&LABELED)
            .units(&[("Units.FT", "'"), ("Units.IN", "\"")], "-", true)
            .uom_separator("");
        spec_for(props, "Units.M").await
    }

    fn value(result: ParseResult) -> f64 {
        result.value().unwrap()
    }

    #[tokio::test]
    async fn test_labels_and_aliases() {
        let spec = feet_inches().await;
        for text in ["48\"", "48 in", "48 IN", "4 ft", "4'", "4 feet"] {
            let v = value(spec.parse_into_quantity_value(text));
            assert!((v - 1.2192).abs() < 1e-9, "{} parsed to {}", text, v);
        }
    }

    #[tokio::test]
    async fn test_composite() {
        let spec = feet_inches().await;
        let expected = 5.5 * 0.3048;
        assert!((value(spec.parse_into_quantity_value("5'-6\"")) - expected).abs() < 1e-9);
        assert!((value(spec.parse_into_quantity_value("5'6")) - expected).abs() < 1e-9);
        assert!((value(spec.parse_into_quantity_value("5 ft 6 in")) - expected).abs() < 1e-9);
        assert!((value(spec.parse_into_quantity_value("-5'-6\"")) + expected).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_prefixed_labels() {
        let spec = feet_inches().await;
        let expected = 5.5 * 0.3048;
        assert!((value(spec.parse_into_quantity_value("ft 5 in 6")) - expected).abs() < 1e-9);
        assert!((value(spec.parse_into_quantity_value("'5-\"6")) - expected).abs() < 1e-9);
        assert!((value(spec.parse_into_quantity_value("-ft 5 in 6 1/2")) + expected + 0.5 * 0.0254).abs() < 1e-9);
        // Unlabelled number after a prefixed tier takes the next tier
        assert!((value(spec.parse_into_quantity_value("ft 5 6")) - expected).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_stray_separators_fail() {
        let spec = feet_inches().await;
        let cases = [("--5 ft", "-"), ("5 ft-", "-"), ("5 ft,", ","), ("5'--6\"", "-"), (";5 ft", ";")];
        for (text, token) in cases {
            let result = spec.parse_into_quantity_value(text);
            assert_eq!(result.error(), Some(&ParseError::UnknownUnitToken(token.into())), "{}", text);
        }
    }

    #[tokio::test]
    async fn test_unlabelled_uses_first_tier() {
        let spec = feet_inches().await;
        assert!((value(spec.parse_into_quantity_value("10")) - 3.048).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_longest_label_wins() {
        let spec = feet_inches().await;
        let v = value(spec.parse_into_quantity_value("328083.333333333 ft (US Survey)"));
        assert!((v - 100000.0).abs() < 1e-4);
        let v = value(spec.parse_into_quantity_value("1 FT (us survey)"));
        assert!((v - 1200.0 / 3937.0).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_fractions() {
        let spec = feet_inches().await;
        let v = value(spec.parse_into_quantity_value("4 1/2 in"));
        assert!((v - 4.5 * 0.0254).abs() < 1e-12);
        let v = value(spec.parse_into_quantity_value("5'-0 1/2\""));
        assert!((v - (5.0 * 0.3048 + 0.5 * 0.0254)).abs() < 1e-12);
        let v = value(spec.parse_into_quantity_value("3/4\""));
        assert!((v - 0.75 * 0.0254).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_errors() {
        let spec = feet_inches().await;
        assert_eq!(
            spec.parse_into_quantity_value("100 flurgs").error(),
            Some(&ParseError::UnknownUnitToken("flurgs".into()))
        );
        assert_eq!(
            spec.parse_into_quantity_value("   ").error(),
            Some(&ParseError::NoValueOrUnitFoundInString)
        );
        assert_eq!(
            spec.parse_into_quantity_value("ft").error(),
            Some(&ParseError::NoValueOrUnitFoundInString)
        );
        assert_eq!(
            spec.parse_into_quantity_value("1.2.3 m").error(),
            Some(&ParseError::InvalidNumber("1.2.3".into()))
        );
        assert_eq!(
            spec.parse_into_quantity_value("1/0 in").error(),
            Some(&ParseError::InvalidNumber("1/0".into()))
        );
    }

    #[tokio::test]
    async fn test_word_boundary() {
        let props = FormatProps::new(FormatType::Decimal, 4)
            .traits(&LABELED)
            .units(&[("Units.M", "m")], " ", true);
        let spec = spec_for(props, "Units.M").await;
        assert!((value(spec.parse_into_quantity_value("2 mm")) - 0.002).abs() < 1e-12);
        assert!((value(spec.parse_into_quantity_value("2 mi")) - 3218.688).abs() < 1e-9);
        assert!(!spec.parse_into_quantity_value("2 mx").is_ok());
    }

    #[tokio::test]
    async fn test_exponent_and_thousands() {
        let props = FormatProps::new(FormatType::Decimal, 4)
            .traits(&LABELED)
            .units(&[("Units.M", "m")], " ", true);
        let spec = spec_for(props, "Units.M").await;
        assert!((value(spec.parse_into_quantity_value("1.5e3 m")) - 1500.0).abs() < 1e-9);
        assert!((value(spec.parse_into_quantity_value("1,234,567.5 m")) - 1234567.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_station() {
        let props = FormatProps::new(FormatType::Station, 2)
            .traits(&LABELED)
            .units(&[("Units.M", "m")], " ", true);
        let spec = spec_for(props, "Units.M").await;
        assert!((value(spec.parse_into_quantity_value("12+34.56")) - 1234.56).abs() < 1e-9);
    }
}
