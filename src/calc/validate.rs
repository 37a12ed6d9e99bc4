use thiserror::Error;

use crate::models::parse_date;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required field(s): {}", .0.join(", "))]
    Missing(Vec<&'static str>),
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("{0} is read-only")]
    ReadOnly(&'static str),
}

/// Checks `(field, present)` pairs and reports every absent field at once.
pub fn require(fields: &[(&'static str, bool)]) -> Result<(), ValidationError> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Missing(missing))
    }
}

/// Normalises a date (with or without time part) to `YYYY-MM-DD`.
pub fn normalize_date(raw: &str) -> Result<String, ValidationError> {
    parse_date(raw)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .ok_or_else(|| ValidationError::InvalidDate(raw.trim().to_string()))
}
