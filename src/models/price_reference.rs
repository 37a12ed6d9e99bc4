use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Audit, Dated};
use crate::calc::validate::{normalize_date, require, ValidationError};

/// Monthly CP Aramco reference price, USD per metric ton.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceReference {
    #[serde(skip_deserializing)]
    pub id: Option<i64>,
    #[serde(rename = "Tanggal", default)]
    pub date: String,
    #[serde(rename = "Bulan", default)]
    pub month: String,
    /// C3
    #[serde(rename = "CPA_C3", default, with = "rust_decimal::serde::float_option")]
    pub propane: Option<Decimal>,
    /// C4
    #[serde(rename = "CPA_C4", default, with = "rust_decimal::serde::float_option")]
    pub butane: Option<Decimal>,
    /// HIP LPG, the 50/50 blend of C3 and C4 as entered.
    #[serde(
        rename(serialize = "hip_lpg", deserialize = "HIP_LPG_USD_Per_MT"),
        alias = "hip_lpg",
        default,
        with = "rust_decimal::serde::float_option"
    )]
    pub blended: Option<Decimal>,
    #[serde(skip)]
    pub audit: Audit,
}

impl PriceReference {
    pub fn new(
        date: &str,
        month: &str,
        propane: Option<Decimal>,
        butane: Option<Decimal>,
        blended: Option<Decimal>,
    ) -> Self {
        Self {
            id: None,
            date: date.to_string(),
            month: month.to_string(),
            propane,
            butane,
            blended,
            audit: Audit::default(),
        }
    }

    pub fn validated(self) -> Result<Self, ValidationError> {
        require(&[
            ("Tanggal", !self.date.trim().is_empty()),
            ("Bulan", !self.month.trim().is_empty()),
        ])?;
        let date = normalize_date(&self.date)?;
        let month = self.month.trim().to_string();
        Ok(Self { date, month, ..self })
    }
}

impl Dated for PriceReference {
    fn record_date(&self) -> &str {
        &self.date
    }
}
