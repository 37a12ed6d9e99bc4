use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Audit, Dated};
use crate::calc::validate::{normalize_date, require, ValidationError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NationalVolume {
    #[serde(skip_deserializing)]
    pub id: Option<i64>,
    #[serde(rename = "Tanggal", default)]
    pub date: String,
    #[serde(rename = "Bulan", default)]
    pub month: String,
    /// Kilograms distributed nationally in the month.
    #[serde(rename = "Volume", default, with = "rust_decimal::serde::float_option")]
    pub volume: Option<Decimal>,
    #[serde(skip)]
    pub audit: Audit,
}

impl NationalVolume {
    pub fn new(date: &str, month: &str, volume: Option<Decimal>) -> Self {
        Self {
            id: None,
            date: date.to_string(),
            month: month.to_string(),
            volume,
            audit: Audit::default(),
        }
    }

    pub fn validated(self) -> Result<Self, ValidationError> {
        require(&[
            ("Tanggal", !self.date.trim().is_empty()),
            ("Bulan", !self.month.trim().is_empty()),
            ("Volume", self.volume.is_some()),
        ])?;
        let date = normalize_date(&self.date)?;
        let month = self.month.trim().to_string();
        Ok(Self { date, month, ..self })
    }
}

impl Dated for NationalVolume {
    fn record_date(&self) -> &str {
        &self.date
    }
}
