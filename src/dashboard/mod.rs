//! Turns the five raw series into what the dashboard shows: recent windows,
//! chart lines, the provincial pivot and the paged simulation table.
//!
//! Everything here is pure. Bad input degrades to 0, `""` or `"-"` and
//! never panics.

pub(crate) mod format;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use crate::models::{
    Dated, ExchangeRate, NationalVolume, PriceReference, ProvincialVolume, SimulationRow,
};
use format::{format_date, format_day};

pub(crate) const RECENT_WINDOW: usize = 12;
pub(crate) const PIVOT_PROVINCES: usize = 3;
pub(crate) const SIMULATION_PAGE_SIZE: usize = 10;

// ── Windowing ─────────────────────────────────────────────────

/// `recent` is newest first and feeds the lists; `chart` holds the same rows
/// oldest first for plotting.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Window<T> {
    pub(crate) recent: Vec<T>,
    pub(crate) chart: Vec<T>,
}

impl<T> Default for Window<T> {
    fn default() -> Self {
        Self {
            recent: Vec::new(),
            chart: Vec::new(),
        }
    }
}

/// Rows with unparseable dates go last in both directions.
fn by_date(a: Option<NaiveDate>, b: Option<NaiveDate>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) if descending => y.cmp(&x),
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub(crate) fn window<T: Dated + Clone>(rows: &[T], size: usize) -> Window<T> {
    let mut recent = rows.to_vec();
    recent.sort_by(|a, b| by_date(a.parsed_date(), b.parsed_date(), true));
    recent.truncate(size);
    let mut chart = recent.clone();
    chart.sort_by(|a, b| by_date(a.parsed_date(), b.parsed_date(), false));
    Window { recent, chart }
}

// ── Chart lines ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ChartLine {
    pub(crate) name: String,
    pub(crate) values: Vec<f64>,
}

/// Category axis (`labels`) plus one or more lines with a value per label.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Chart {
    pub(crate) labels: Vec<String>,
    pub(crate) lines: Vec<ChartLine>,
}

impl Chart {
    pub(crate) fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Min and max over every line, widened so a flat series still renders.
    pub(crate) fn bounds(&self) -> (f64, f64) {
        let mut values = self.lines.iter().flat_map(|l| l.values.iter().copied());
        let Some(first) = values.next() else {
            return (0.0, 1.0);
        };
        let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if (max - min).abs() < f64::EPSILON {
            let pad = if max.abs() < 1.0 { 1.0 } else { max.abs() * 0.1 };
            (min - pad, max + pad)
        } else {
            (min, max)
        }
    }
}

pub(crate) fn to_plot(value: Option<Decimal>) -> f64 {
    value.and_then(|d| d.to_f64()).unwrap_or(0.0)
}

type Pick<T> = fn(&T) -> Option<Decimal>;

fn line_chart<T: Dated>(rows: &[T], lines: &[(&str, Pick<T>)]) -> Chart {
    Chart {
        labels: rows.iter().map(|r| format_date(r.record_date())).collect(),
        lines: lines
            .iter()
            .map(|(name, pick)| ChartLine {
                name: (*name).to_string(),
                values: rows.iter().map(|r| to_plot(pick(r))).collect(),
            })
            .collect(),
    }
}

pub(crate) fn price_reference_chart(rows: &[PriceReference]) -> Chart {
    let lines: [(&str, Pick<PriceReference>); 3] = [
        ("CP C3", |r| r.propane),
        ("CP C4", |r| r.butane),
        ("HIP LPG", |r| r.blended),
    ];
    line_chart(rows, &lines)
}

pub(crate) fn exchange_rate_chart(rows: &[ExchangeRate]) -> Chart {
    let lines: [(&str, Pick<ExchangeRate>); 3] = [
        ("Kurs Beli", |r| r.buy),
        ("Kurs Jual", |r| r.sell),
        ("Kurs Tengah", |r| r.mid),
    ];
    line_chart(rows, &lines)
}

pub(crate) fn national_volume_chart(rows: &[NationalVolume]) -> Chart {
    let lines: [(&str, Pick<NationalVolume>); 1] = [("Volume (kg)", |r| r.volume)];
    line_chart(rows, &lines)
}

/// All simulation rows, oldest first. The view is not windowed.
pub(crate) fn simulation_chart(rows: &[SimulationRow]) -> Chart {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| by_date(a.parsed_date(), b.parsed_date(), false));
    let lines: [(&str, Pick<SimulationRow>); 3] = [
        ("HIP LPG/kg", |r| r.hip_per_kg),
        ("Harga Jual Eceran", |r| r.retail_price),
        ("Harga Jual Perhitungan", |r| r.computed_price),
    ];
    line_chart(&sorted, &lines)
}

// ── Provincial pivot ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PivotCell {
    pub(crate) volume: Decimal,
    pub(crate) quota: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PivotRow {
    pub(crate) date: NaiveDate,
    pub(crate) label: String,
    /// One cell per charted province, same order as `ProvincialPivot::provinces`.
    pub(crate) cells: Vec<PivotCell>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ProvincialPivot {
    pub(crate) provinces: Vec<String>,
    pub(crate) rows: Vec<PivotRow>,
}

/// Charts the first `limit` provinces in the order they appear in `rows`.
/// The date axis covers every parseable date in the whole dataset; a
/// province without a row on some date gets a zero cell there.
pub(crate) fn provincial_pivot(rows: &[ProvincialVolume], limit: usize) -> ProvincialPivot {
    let mut provinces: Vec<String> = Vec::new();
    for r in rows {
        let name = r.province.trim();
        if !name.is_empty() && !provinces.iter().any(|p| p == name) {
            provinces.push(name.to_string());
        }
    }
    provinces.truncate(limit);

    let mut lookup: HashMap<(NaiveDate, &str), PivotCell> = HashMap::new();
    let mut dates = BTreeSet::new();
    for r in rows {
        let Some(date) = r.parsed_date() else {
            continue;
        };
        dates.insert(date);
        lookup.entry((date, r.province.trim())).or_insert(PivotCell {
            volume: r.volume.unwrap_or_default(),
            quota: r.quota.unwrap_or_default(),
        });
    }

    let zero = PivotCell {
        volume: Decimal::ZERO,
        quota: Decimal::ZERO,
    };
    let pivot_rows = dates
        .into_iter()
        .map(|date| PivotRow {
            date,
            label: format_day(date),
            cells: provinces
                .iter()
                .map(|p| lookup.get(&(date, p.as_str())).copied().unwrap_or(zero))
                .collect(),
        })
        .collect();

    ProvincialPivot {
        provinces,
        rows: pivot_rows,
    }
}

impl ProvincialPivot {
    /// Two lines per province: volume and quota.
    pub(crate) fn chart(&self) -> Chart {
        let mut lines = Vec::with_capacity(self.provinces.len() * 2);
        for (i, province) in self.provinces.iter().enumerate() {
            lines.push(ChartLine {
                name: format!("{province} Volume"),
                values: self.rows.iter().map(|r| to_plot(r.cells.get(i).map(|c| c.volume))).collect(),
            });
            lines.push(ChartLine {
                name: format!("{province} Kuota"),
                values: self.rows.iter().map(|r| to_plot(r.cells.get(i).map(|c| c.quota))).collect(),
            });
        }
        Chart {
            labels: self.rows.iter().map(|r| r.label.clone()).collect(),
            lines,
        }
    }
}

// ── Paging ────────────────────────────────────────────────────

pub(crate) fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Pages past the end clamp to the last page.
pub(crate) fn clamp_page(page: usize, len: usize, page_size: usize) -> usize {
    page.min(page_count(len, page_size).saturating_sub(1))
}

pub(crate) fn page_slice<T>(rows: &[T], page: usize, page_size: usize) -> &[T] {
    let page = clamp_page(page, rows.len(), page_size);
    let start = (page * page_size).min(rows.len());
    let end = (start + page_size).min(rows.len());
    &rows[start..end]
}

// ── Assembly ──────────────────────────────────────────────────

pub(crate) struct Sources<'a> {
    pub(crate) price_references: &'a [PriceReference],
    pub(crate) exchange_rates: &'a [ExchangeRate],
    pub(crate) national_volumes: &'a [NationalVolume],
    pub(crate) provincial_volumes: &'a [ProvincialVolume],
    pub(crate) simulation: &'a [SimulationRow],
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Dashboard {
    pub(crate) price_reference: Window<PriceReference>,
    pub(crate) exchange_rate: Window<ExchangeRate>,
    pub(crate) national_volume: Window<NationalVolume>,
    pub(crate) provincial_volume: Window<ProvincialVolume>,
    pub(crate) price_chart: Chart,
    pub(crate) rate_chart: Chart,
    pub(crate) national_chart: Chart,
    pub(crate) pivot: ProvincialPivot,
    pub(crate) simulation_chart: Chart,
    /// Newest first, for the paged table.
    pub(crate) simulation_table: Vec<SimulationRow>,
}

pub(crate) fn build(src: &Sources<'_>) -> Dashboard {
    let price_reference = window(src.price_references, RECENT_WINDOW);
    let exchange_rate = window(src.exchange_rates, RECENT_WINDOW);
    let national_volume = window(src.national_volumes, RECENT_WINDOW);
    let provincial_volume = window(src.provincial_volumes, RECENT_WINDOW);

    let mut simulation_table = src.simulation.to_vec();
    simulation_table.sort_by(|a, b| by_date(a.parsed_date(), b.parsed_date(), true));

    Dashboard {
        price_chart: price_reference_chart(&price_reference.chart),
        rate_chart: exchange_rate_chart(&exchange_rate.chart),
        national_chart: national_volume_chart(&national_volume.chart),
        pivot: provincial_pivot(src.provincial_volumes, PIVOT_PROVINCES),
        simulation_chart: simulation_chart(src.simulation),
        simulation_table,
        price_reference,
        exchange_rate,
        national_volume,
        provincial_volume,
    }
}

#[cfg(test)]
mod tests;
