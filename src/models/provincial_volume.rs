use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Audit, Dated};
use crate::calc::validate::{normalize_date, require, ValidationError};

/// Realised volume and allotted quota for one province in one month.
/// The two numbers are independent of each other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProvincialVolume {
    #[serde(skip_deserializing)]
    pub id: Option<i64>,
    #[serde(rename = "Tanggal", default)]
    pub date: String,
    #[serde(rename = "Bulan", default)]
    pub month: String,
    #[serde(rename = "Propinsi", default)]
    pub province: String,
    /// Marketing operation region code, e.g. "MOR I".
    #[serde(rename = "MOR", default)]
    pub region_office: Option<String>,
    #[serde(rename = "Volume", default, with = "rust_decimal::serde::float_option")]
    pub volume: Option<Decimal>,
    #[serde(rename = "Kuota", default, with = "rust_decimal::serde::float_option")]
    pub quota: Option<Decimal>,
    #[serde(skip)]
    pub audit: Audit,
}

impl ProvincialVolume {
    pub fn new(
        date: &str,
        month: &str,
        province: &str,
        volume: Option<Decimal>,
        quota: Option<Decimal>,
    ) -> Self {
        Self {
            id: None,
            date: date.to_string(),
            month: month.to_string(),
            province: province.to_string(),
            region_office: None,
            volume,
            quota,
            audit: Audit::default(),
        }
    }

    pub fn validated(self) -> Result<Self, ValidationError> {
        require(&[
            ("Tanggal", !self.date.trim().is_empty()),
            ("Bulan", !self.month.trim().is_empty()),
            ("Propinsi", !self.province.trim().is_empty()),
        ])?;
        let date = normalize_date(&self.date)?;
        let region_office = self
            .region_office
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Ok(Self {
            date,
            month: self.month.trim().to_string(),
            province: self.province.trim().to_string(),
            region_office,
            ..self
        })
    }
}

impl Dated for ProvincialVolume {
    fn record_date(&self) -> &str {
        &self.date
    }
}
