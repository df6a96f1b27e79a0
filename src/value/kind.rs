//! Per-kind parse, render and zero rules shared by every value shape.

use super::ValueError;
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The rules for one primitive kind.
pub trait Kind {
    type Value: Clone;

    /// Label used in usage text and error messages.
    const NAME: &'static str;

    /// Whether a slice of this kind splits tokens on commas.
    const SPLIT: bool = true;

    fn parse(token: &str) -> Result<Self::Value, ValueError>;

    fn render(value: &Self::Value) -> String;

    fn zero() -> Self::Value;

    fn is_zero(value: &Self::Value) -> bool;
}

/// A kind whose values can advance without a token.
pub trait Step: Kind {
    fn step(value: &mut Self::Value);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BoolKind;

#[derive(Debug, Clone, Copy, Default)]
pub struct IntKind;

#[derive(Debug, Clone, Copy, Default)]
pub struct FloatKind;

#[derive(Debug, Clone, Copy, Default)]
pub struct StringKind;

#[derive(Debug, Clone, Copy, Default)]
pub struct DateKind;

impl Kind for BoolKind {
    type Value = bool;
    const NAME: &'static str = "bool";

    fn parse(token: &str) -> Result<bool, ValueError> {
        let token = token.trim();
        match token {
            "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
            "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
            _ => Err(ValueError::new(Self::NAME, token)),
        }
    }

    fn render(value: &bool) -> String {
        value.to_string()
    }

    fn zero() -> bool {
        false
    }

    fn is_zero(value: &bool) -> bool {
        !*value
    }
}

impl Step for BoolKind {
    fn step(value: &mut bool) {
        *value = true;
    }
}

impl Kind for IntKind {
    type Value = i64;
    const NAME: &'static str = "int";

    fn parse(token: &str) -> Result<i64, ValueError> {
        let token = token.trim();
        parse_int(token).ok_or_else(|| ValueError::new(Self::NAME, token))
    }

    fn render(value: &i64) -> String {
        value.to_string()
    }

    fn zero() -> i64 {
        0
    }

    fn is_zero(value: &i64) -> bool {
        *value == 0
    }
}

impl Step for IntKind {
    fn step(value: &mut i64) {
        *value = value.saturating_add(1);
    }
}

/// Parse an integer literal, honouring `0x`, `0o`, `0b` and leading-zero
/// octal prefixes after an optional sign.
fn parse_int(token: &str) -> Option<i64> {
    let (negative, rest) = if let Some(rest) = token.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = token.strip_prefix('+') {
        (false, rest)
    } else {
        (false, token)
    };

    let lower = rest.get(..2).map(str::to_ascii_lowercase);
    let (radix, digits) = match lower.as_deref() {
        Some("0x") => (16, &rest[2..]),
        Some("0o") => (8, &rest[2..]),
        Some("0b") => (2, &rest[2..]),
        _ if rest.len() > 1 && rest.starts_with('0') => (8, &rest[1..]),
        _ => (10, rest),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    let magnitude = i128::from(u64::from_str_radix(digits, radix).ok()?);
    i64::try_from(if negative { -magnitude } else { magnitude }).ok()
}

impl Kind for FloatKind {
    type Value = f64;
    const NAME: &'static str = "float";

    fn parse(token: &str) -> Result<f64, ValueError> {
        let token = token.trim();
        token
            .parse::<f64>()
            .map_err(|_| ValueError::new(Self::NAME, token))
    }

    fn render(value: &f64) -> String {
        value.to_string()
    }

    fn zero() -> f64 {
        0.0
    }

    fn is_zero(value: &f64) -> bool {
        *value == 0.0
    }
}

impl Kind for StringKind {
    type Value = String;
    const NAME: &'static str = "string";
    const SPLIT: bool = false;

    fn parse(token: &str) -> Result<String, ValueError> {
        Ok(token.to_string())
    }

    fn render(value: &String) -> String {
        format!("{value:?}")
    }

    fn zero() -> String {
        String::new()
    }

    fn is_zero(value: &String) -> bool {
        value.is_empty()
    }
}

impl Kind for DateKind {
    type Value = NaiveDate;
    const NAME: &'static str = "date";

    fn parse(token: &str) -> Result<NaiveDate, ValueError> {
        let token = token.trim();
        NaiveDate::parse_from_str(token, DATE_FORMAT).map_err(|_| ValueError::new(Self::NAME, token))
    }

    fn render(value: &NaiveDate) -> String {
        value.format(DATE_FORMAT).to_string()
    }

    /// `0001-01-01`, a date nobody types on a command line.
    fn zero() -> NaiveDate {
        NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN)
    }

    fn is_zero(value: &NaiveDate) -> bool {
        *value == Self::zero()
    }
}
