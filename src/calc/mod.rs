//! Derived-field calculator used by the entry forms.
//!
//! The blended HIP price and the mid exchange rate are both the two-decimal
//! mean of a pair of inputs. The result is only a suggestion at entry time:
//! the user may overwrite it, and whatever is submitted gets stored as-is.

pub mod validate;

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Keeps digits and dots, drops everything else. `"1.2.3"` survives; it is
/// resolved later by [`parse_lenient`].
pub fn sanitize_numeric(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}

/// Parses the longest numeric prefix: `"12abc"` gives 12 and `"1.2.3"`
/// gives 1.2. Returns `None` when no digit leads the input.
pub fn parse_lenient(input: &str) -> Option<Decimal> {
    let s = input.trim();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'-') | Some(b'+')) {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if frac_end > frac_start || end > int_start {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    let prefix = s[..end].trim_end_matches('.');
    let prefix = prefix.strip_prefix('+').unwrap_or(prefix);
    let normalized = match prefix.strip_prefix('-') {
        Some(rest) if rest.starts_with('.') => format!("-0{rest}"),
        _ if prefix.starts_with('.') => format!("0{prefix}"),
        _ => prefix.to_string(),
    };
    Decimal::from_str(&normalized).ok()
}

/// Two-decimal mean of two text fields, `None` if either is empty or not a
/// number.
pub fn derive_mean(a: &str, b: &str) -> Option<Decimal> {
    if a.trim().is_empty() || b.trim().is_empty() {
        return None;
    }
    let x = parse_lenient(a)?;
    let y = parse_lenient(b)?;
    let mean = x.checked_add(y)?.checked_div(Decimal::from(2))?;
    Some(mean.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// Submission-time conversion: empty means null, never zero.
pub fn to_nullable(field: &str) -> Option<Decimal> {
    if field.trim().is_empty() {
        None
    } else {
        parse_lenient(field)
    }
}

/// Names one calculator pairing so forms and help text can label it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedRule {
    pub first: &'static str,
    pub second: &'static str,
    pub dependent: &'static str,
}

/// HIP LPG = 0.5 C3 + 0.5 C4, which is the plain mean.
pub const BLENDED_PRICE: DerivedRule = DerivedRule {
    first: "CP C3",
    second: "CP C4",
    dependent: "HIP LPG",
};

pub const MID_RATE: DerivedRule = DerivedRule {
    first: "Kurs Beli",
    second: "Kurs Jual",
    dependent: "Kurs Tengah",
};

/// Form state for two independent inputs and the field derived from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedPair {
    pub rule: DerivedRule,
    pub first: String,
    pub second: String,
    pub dependent: String,
}

impl DerivedPair {
    pub fn new(rule: DerivedRule) -> Self {
        Self {
            rule,
            first: String::new(),
            second: String::new(),
            dependent: String::new(),
        }
    }

    /// Seeds the fields from a stored record without recomputing, so a manual
    /// override survives an edit round trip.
    pub fn from_values(
        rule: DerivedRule,
        first: Option<Decimal>,
        second: Option<Decimal>,
        dependent: Option<Decimal>,
    ) -> Self {
        let text = |v: Option<Decimal>| v.map(|d| d.to_string()).unwrap_or_default();
        Self {
            rule,
            first: text(first),
            second: text(second),
            dependent: text(dependent),
        }
    }

    pub fn set_first(&mut self, raw: &str) {
        self.first = sanitize_numeric(raw);
        self.recompute();
    }

    pub fn set_second(&mut self, raw: &str) {
        self.second = sanitize_numeric(raw);
        self.recompute();
    }

    pub fn set_dependent(&mut self, raw: &str) {
        self.dependent = raw.to_string();
    }

    fn recompute(&mut self) {
        self.dependent = derive_mean(&self.first, &self.second)
            .map(|v| format!("{v:.2}"))
            .unwrap_or_default();
    }

    /// `(first, second, dependent)` ready for storage.
    pub fn values(&self) -> (Option<Decimal>, Option<Decimal>, Option<Decimal>) {
        (
            to_nullable(&self.first),
            to_nullable(&self.second),
            to_nullable(&self.dependent),
        )
    }
}
