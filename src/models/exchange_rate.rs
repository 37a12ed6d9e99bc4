use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Audit, Dated};
use crate::calc::validate::{normalize_date, require, ValidationError};

/// Rupiah per USD, recorded per LPG calculation period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    #[serde(skip_deserializing)]
    pub id: Option<i64>,
    #[serde(rename = "Tanggal", default)]
    pub date: String,
    #[serde(
        rename(serialize = "periode_perhitungan_lpg", deserialize = "Periode_Perhitungan_LPG"),
        alias = "periode_perhitungan_lpg",
        default
    )]
    pub period: String,
    #[serde(
        rename(serialize = "kurs_beli", deserialize = "Kurs_Beli"),
        alias = "kurs_beli",
        default,
        with = "rust_decimal::serde::float_option"
    )]
    pub buy: Option<Decimal>,
    #[serde(
        rename(serialize = "kurs_jual", deserialize = "Kurs_Jual"),
        alias = "kurs_jual",
        default,
        with = "rust_decimal::serde::float_option"
    )]
    pub sell: Option<Decimal>,
    #[serde(
        rename(serialize = "kurs_tengah", deserialize = "Kurs_Tengah"),
        alias = "kurs_tengah",
        default,
        with = "rust_decimal::serde::float_option"
    )]
    pub mid: Option<Decimal>,
    #[serde(skip)]
    pub audit: Audit,
}

impl ExchangeRate {
    pub fn new(
        date: &str,
        period: &str,
        buy: Option<Decimal>,
        sell: Option<Decimal>,
        mid: Option<Decimal>,
    ) -> Self {
        Self {
            id: None,
            date: date.to_string(),
            period: period.to_string(),
            buy,
            sell,
            mid,
            audit: Audit::default(),
        }
    }

    pub fn validated(self) -> Result<Self, ValidationError> {
        require(&[
            ("Tanggal", !self.date.trim().is_empty()),
            ("Periode_Perhitungan_LPG", !self.period.trim().is_empty()),
        ])?;
        let date = normalize_date(&self.date)?;
        let period = self.period.trim().to_string();
        Ok(Self {
            date,
            period,
            ..self
        })
    }
}

impl Dated for ExchangeRate {
    fn record_date(&self) -> &str {
        &self.date
    }
}
