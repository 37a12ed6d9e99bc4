//! id-ID display formatting shared by the TUI, the CLI and the charts.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::calc::parse_lenient;
use crate::models::parse_date;

pub(crate) const DEFAULT_DECIMALS: u32 = 2;

/// Placeholder for values that are missing or not numbers.
pub(crate) const PLACEHOLDER: &str = "-";

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// `"2024-08-05"` → `"05 Agu 2024"`; anything unparseable → `"-"`.
pub(crate) fn format_date(raw: &str) -> String {
    parse_date(raw)
        .map(format_day)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

pub(crate) fn format_day(date: NaiveDate) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// Formats a raw text value. Null, empty and non-numeric input give `"-"`.
pub(crate) fn format_number(raw: Option<&str>, decimals: u32) -> String {
    match raw {
        Some(s) if !s.trim().is_empty() => format_decimal(parse_lenient(s), decimals),
        _ => PLACEHOLDER.to_string(),
    }
}

/// `1234567.891` with 2 decimals → `"1.234.567,89"`.
pub(crate) fn format_decimal(value: Option<Decimal>, decimals: u32) -> String {
    let Some(value) = value else {
        return PLACEHOLDER.to_string();
    };
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.*}", decimals as usize, rounded.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, f),
        None => (text.as_str(), ""),
    };

    let grouped: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(".");

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped},{frac_part}")
    }
}
