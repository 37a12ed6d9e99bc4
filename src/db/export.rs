use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::path::Path;

use super::Database;
use crate::models::Series;

fn cell(value: Option<Decimal>) -> String {
    value.map(|d| d.to_string()).unwrap_or_default()
}

impl Database {
    /// Writes every row of a series to `path` as CSV, newest first.
    /// Returns the number of data rows written.
    pub(crate) fn export_to_csv(&self, series: Series, path: &Path) -> Result<usize> {
        let mut wtr = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;

        let count = match series {
            Series::PriceReference => {
                let rows = self.get_price_references()?;
                wtr.write_record(["id", "tanggal", "bulan", "cpa_c3", "cpa_c4", "hip_lpg_usd_per_mt"])?;
                for r in &rows {
                    wtr.write_record([
                        r.id.unwrap_or_default().to_string(),
                        r.date.clone(),
                        r.month.clone(),
                        cell(r.propane),
                        cell(r.butane),
                        cell(r.blended),
                    ])?;
                }
                rows.len()
            }
            Series::ExchangeRate => {
                let rows = self.get_exchange_rates()?;
                wtr.write_record(["id", "tanggal", "periode", "kurs_beli", "kurs_jual", "kurs_tengah"])?;
                for r in &rows {
                    wtr.write_record([
                        r.id.unwrap_or_default().to_string(),
                        r.date.clone(),
                        r.period.clone(),
                        cell(r.buy),
                        cell(r.sell),
                        cell(r.mid),
                    ])?;
                }
                rows.len()
            }
            Series::NationalVolume => {
                let rows = self.get_national_volumes()?;
                wtr.write_record(["id", "tanggal", "bulan", "volume_kg"])?;
                for r in &rows {
                    wtr.write_record([
                        r.id.unwrap_or_default().to_string(),
                        r.date.clone(),
                        r.month.clone(),
                        cell(r.volume),
                    ])?;
                }
                rows.len()
            }
            Series::ProvincialVolume => {
                let rows = self.get_provincial_volumes()?;
                wtr.write_record(["id", "tanggal", "bulan", "propinsi", "mor", "volume", "kuota"])?;
                for r in &rows {
                    wtr.write_record([
                        r.id.unwrap_or_default().to_string(),
                        r.date.clone(),
                        r.month.clone(),
                        r.province.clone(),
                        r.region_office.clone().unwrap_or_default(),
                        cell(r.volume),
                        cell(r.quota),
                    ])?;
                }
                rows.len()
            }
            Series::Simulation => {
                let rows = self.get_simulation_rows()?;
                wtr.write_record([
                    "tanggal",
                    "bulan",
                    "cpa_c3",
                    "cpa_c4",
                    "hip_lpg_usd_per_mt",
                    "rata_rata_kurs",
                    "hip_lpg_per_kg",
                    "harga_patokan_rp_kg",
                    "harga_jual_eceran",
                    "margin",
                    "harga_jual_tanpa_margin_plus_ppn",
                    "ppn",
                    "subsidi",
                    "periode",
                    "harga_jual_perhitungan_rp_kg",
                ])?;
                for r in &rows {
                    wtr.write_record([
                        r.date.clone(),
                        r.month.clone(),
                        cell(r.propane),
                        cell(r.butane),
                        cell(r.blended),
                        cell(r.average_rate),
                        cell(r.hip_per_kg),
                        cell(r.benchmark_price),
                        cell(r.retail_price),
                        cell(r.margin),
                        cell(r.price_ex_margin_with_vat),
                        cell(r.vat),
                        cell(r.subsidy),
                        r.period.clone().unwrap_or_default(),
                        cell(r.computed_price),
                    ])?;
                }
                rows.len()
            }
        };

        wtr.flush()?;
        Ok(count)
    }
}
