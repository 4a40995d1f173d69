//! Locale-aware numeric parsing for free-text target input.
//!
//! Lab staff paste targets in either EU (`1.500,2`) or US (`1,500.2`)
//! convention, sometimes with a trailing unit (`200mg`). Parsing keeps all
//! of that recoverable: the numeric value, the stripped unit text, and a
//! user-facing error when the numeric body is garbage. Empty input is a
//! plain "no value", not an error.

/// Result of parsing one free-text numeric input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedNumber {
    /// Parsed numeric value, if any.
    pub value: Option<f64>,
    /// Unit text stripped from the end of the input, e.g. `mg`.
    pub extracted_unit: Option<String>,
    /// True if unit text was present and removed.
    pub had_unit_text: bool,
    /// User-facing parse error, if the numeric body was unparseable.
    pub error: Option<String>,
}

impl ParsedNumber {
    fn empty() -> Self {
        ParsedNumber::default()
    }

    fn failed(message: &str) -> Self {
        ParsedNumber {
            error: Some(message.to_string()),
            ..ParsedNumber::default()
        }
    }
}

fn is_unit_char(c: char) -> bool {
    c.is_alphabetic() || c == '/' || c == '%'
}

/// Splits raw input into (numeric body, unit suffix).
///
/// Accepted shape: optional sign, a digit followed by digits/separators/
/// spaces, then an optional unit run. Anything else is a format error.
fn split_number_and_unit(s: &str) -> Option<(String, Option<String>)> {
    let mut chars = s.char_indices().peekable();
    let mut num = String::new();

    if let Some(&(_, c)) = chars.peek()
        && (c == '+' || c == '-')
    {
        num.push(c);
        chars.next();
    }

    // The numeric body must start with a digit.
    match chars.peek() {
        Some(&(_, c)) if c.is_ascii_digit() => {}
        _ => return None,
    }

    let mut unit_start = s.len();
    while let Some(&(idx, c)) = chars.peek() {
        if c.is_ascii_digit() || c == '.' || c == ',' || c == ' ' {
            num.push(c);
            chars.next();
        } else {
            unit_start = idx;
            break;
        }
    }

    let unit_text = s[unit_start..].trim();
    if unit_text.is_empty() {
        return Some((num, None));
    }
    if unit_text.chars().all(is_unit_char) {
        return Some((num, Some(unit_text.to_string())));
    }
    None
}

/// Normalizes thousands/decimal separators to a plain `.`-decimal string.
fn normalize_separators(num: &str) -> String {
    let dot = num.find('.');
    let comma = num.find(',');

    match (dot, comma) {
        (Some(dot_i), Some(comma_i)) => {
            if dot_i < comma_i {
                // EU: '.' thousands, ',' decimal
                num.replace('.', "").replace(',', ".")
            } else {
                // US: ',' thousands, '.' decimal
                num.replace(',', "")
            }
        }
        (Some(_), None) => {
            if separator_has_three_trailing_digits(num, '.') {
                num.replace('.', "")
            } else {
                num.to_string()
            }
        }
        (None, Some(_)) => {
            if separator_has_three_trailing_digits(num, ',') {
                num.replace(',', "")
            } else {
                num.replace(',', ".")
            }
        }
        (None, None) => num.to_string(),
    }
}

/// True when the last `sep` is followed by exactly three digits to the end,
/// which marks it as a thousands separator (`1.500` → 1500, not 1.5).
fn separator_has_three_trailing_digits(num: &str, sep: char) -> bool {
    match num.rfind(sep) {
        Some(idx) => {
            let tail = &num[idx + sep.len_utf8()..];
            tail.len() == 3 && tail.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

/// Parses a numeric string that may carry locale separators and a unit suffix.
pub fn parse_number_with_unit(raw: &str) -> ParsedNumber {
    let s = raw.trim();
    if s.is_empty() {
        return ParsedNumber::empty();
    }

    let Some((num_part, unit_part)) = split_number_and_unit(s) else {
        return ParsedNumber::failed("Could not parse number format.");
    };

    let had_unit_text = unit_part.is_some();
    let normalized = normalize_separators(&num_part.replace(' ', ""));

    match normalized.parse::<f64>() {
        Ok(value) => ParsedNumber {
            value: Some(value),
            extracted_unit: unit_part,
            had_unit_text,
            error: None,
        },
        Err(_) => ParsedNumber {
            value: None,
            extracted_unit: unit_part,
            had_unit_text,
            error: Some("Invalid numeric value.".to_string()),
        },
    }
}
