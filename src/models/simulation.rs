use rust_decimal::Decimal;
use serde::Serialize;

use super::Dated;

/// One row of the `v_simulation_lpg_3kg` view. Read-only: the formula that
/// produces these numbers lives in the external pricing pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationRow {
    #[serde(rename = "Tanggal")]
    pub date: String,
    #[serde(rename = "Bulan")]
    pub month: String,
    #[serde(rename = "CPA_C3", with = "rust_decimal::serde::float_option")]
    pub propane: Option<Decimal>,
    #[serde(rename = "CPA_C4", with = "rust_decimal::serde::float_option")]
    pub butane: Option<Decimal>,
    #[serde(rename = "HIP_LPG_USD_Per_MT", with = "rust_decimal::serde::float_option")]
    pub blended: Option<Decimal>,
    #[serde(rename = "Rata_Rata_Kurs", with = "rust_decimal::serde::float_option")]
    pub average_rate: Option<Decimal>,
    #[serde(rename = "HIP_LPG_Per_Kg", with = "rust_decimal::serde::float_option")]
    pub hip_per_kg: Option<Decimal>,
    #[serde(rename = "Harga_Patokan_Rp_Kg", with = "rust_decimal::serde::float_option")]
    pub benchmark_price: Option<Decimal>,
    #[serde(rename = "HargaJualEceran", with = "rust_decimal::serde::float_option")]
    pub retail_price: Option<Decimal>,
    #[serde(rename = "Margin", with = "rust_decimal::serde::float_option")]
    pub margin: Option<Decimal>,
    #[serde(
        rename = "HargaJualTanpaMarginPlusPPN",
        with = "rust_decimal::serde::float_option"
    )]
    pub price_ex_margin_with_vat: Option<Decimal>,
    #[serde(rename = "PPN", with = "rust_decimal::serde::float_option")]
    pub vat: Option<Decimal>,
    #[serde(rename = "Subsidi", with = "rust_decimal::serde::float_option")]
    pub subsidy: Option<Decimal>,
    #[serde(rename = "Periode_Perhitungan_LPG")]
    pub period: Option<String>,
    #[serde(
        rename = "Harga_Jual_Perhitungan_Rp_Kg",
        with = "rust_decimal::serde::float_option"
    )]
    pub computed_price: Option<Decimal>,
}

impl Dated for SimulationRow {
    fn record_date(&self) -> &str {
        &self.date
    }
}
