#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;

fn national(date: &str, volume: i64) -> NationalVolume {
    NationalVolume::new(date, "", Some(Decimal::from(volume)))
}

fn provincial(date: &str, province: &str, volume: Decimal, quota: Decimal) -> ProvincialVolume {
    ProvincialVolume::new(date, "", province, Some(volume), Some(quota))
}

fn monthly(n: usize) -> Vec<NationalVolume> {
    (0..n)
        .map(|i| national(&format!("{}-{:02}-01", 2022 + i / 12, i % 12 + 1), i as i64))
        .collect()
}

// ── Windowing ─────────────────────────────────────────────────

#[test]
fn test_window_keeps_twelve_newest() {
    let rows = monthly(15);
    let w = window(&rows, RECENT_WINDOW);
    assert_eq!(w.recent.len(), 12);
    assert_eq!(w.chart.len(), 12);
    assert_eq!(w.recent[0].date, "2023-03-01");
    assert_eq!(w.recent[11].date, "2022-04-01");
}

#[test]
fn test_window_chart_is_ascending() {
    let mut rows = monthly(15);
    rows.reverse();
    let w = window(&rows, RECENT_WINDOW);
    let dates: Vec<_> = w.chart.iter().map(|r| r.parsed_date().unwrap()).collect();
    assert!(dates.windows(2).all(|p| p[0] < p[1]));
    assert_eq!(w.chart.first().unwrap().date, "2022-04-01");
}

#[test]
fn test_window_shorter_than_size() {
    for len in [0, 1, 5, 12] {
        let w = window(&monthly(len), RECENT_WINDOW);
        assert_eq!(w.recent.len(), len);
        assert_eq!(w.chart.len(), len);
    }
}

#[test]
fn test_window_unparseable_dates_sort_last() {
    let rows = vec![national("bogus", 1), national("2024-01-01", 2), national("2024-02-01", 3)];
    let w = window(&rows, 2);
    assert_eq!(w.recent[0].date, "2024-02-01");
    assert_eq!(w.recent[1].date, "2024-01-01");

    let all = window(&rows, RECENT_WINDOW);
    assert_eq!(all.recent.last().unwrap().date, "bogus");
    assert_eq!(all.chart.last().unwrap().date, "bogus");
}

// ── Charts ────────────────────────────────────────────────────

#[test]
fn test_empty_chart_has_no_data() {
    let chart = national_volume_chart(&[]);
    assert!(chart.is_empty());
    assert_eq!(chart.lines.len(), 1);
    assert!(chart.lines[0].values.is_empty());
}

#[test]
fn test_price_chart_lines_and_labels() {
    let rows = vec![
        PriceReference::new("2024-01-01", "Januari", Some(dec!(600)), Some(dec!(580)), Some(dec!(590))),
        PriceReference::new("2024-08-05", "Agustus", Some(dec!(500)), None, Some(dec!(490))),
    ];
    let chart = price_reference_chart(&rows);
    assert_eq!(chart.labels, vec!["01 Jan 2024", "05 Agu 2024"]);
    let names: Vec<_> = chart.lines.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["CP C3", "CP C4", "HIP LPG"]);
    assert_eq!(chart.lines[1].values, vec![580.0, 0.0]);
}

#[test]
fn test_exchange_rate_chart_mid_line() {
    let rows = vec![ExchangeRate::new("2024-01-15", "Jan", Some(dec!(15000)), Some(dec!(15100)), Some(dec!(15050)))];
    let chart = exchange_rate_chart(&rows);
    assert_eq!(chart.lines[2].name, "Kurs Tengah");
    assert_eq!(chart.lines[2].values, vec![15050.0]);
}

#[test]
fn test_chart_bounds() {
    let chart = national_volume_chart(&[national("2024-01-01", 10), national("2024-02-01", 30)]);
    assert_eq!(chart.bounds(), (10.0, 30.0));

    let flat = national_volume_chart(&[national("2024-01-01", 100)]);
    let (lo, hi) = flat.bounds();
    assert!(lo < 100.0 && hi > 100.0);

    assert_eq!(Chart::default().bounds(), (0.0, 1.0));
}

#[test]
fn test_simulation_chart_uses_all_rows_ascending() {
    let rows: Vec<SimulationRow> = (1..=20)
        .rev()
        .map(|day| SimulationRow {
            date: format!("2024-01-{day:02}"),
            hip_per_kg: Some(Decimal::from(day)),
            retail_price: None,
            ..Default::default()
        })
        .collect();
    let chart = simulation_chart(&rows);
    assert_eq!(chart.labels.len(), 20);
    assert_eq!(chart.labels[0], "01 Jan 2024");
    assert_eq!(chart.lines[0].values[0], 1.0);
    assert!(chart.lines[1].values.iter().all(|v| *v == 0.0));
    assert_eq!(chart.lines[2].name, "Harga Jual Perhitungan");
}

// ── Provincial pivot ──────────────────────────────────────────

#[test]
fn test_pivot_fills_missing_cells_with_zero() {
    let rows = vec![
        provincial("2024-01-01", "Aceh", dec!(10), dec!(12)),
        provincial("2024-02-01", "Bali", dec!(20), dec!(22)),
    ];
    let pivot = provincial_pivot(&rows, PIVOT_PROVINCES);
    assert_eq!(pivot.provinces, vec!["Aceh", "Bali"]);
    assert_eq!(pivot.rows.len(), 2);

    let jan = &pivot.rows[0];
    assert_eq!(jan.label, "01 Jan 2024");
    assert_eq!(jan.cells[0], PivotCell { volume: dec!(10), quota: dec!(12) });
    assert_eq!(jan.cells[1], PivotCell { volume: Decimal::ZERO, quota: Decimal::ZERO });

    let feb = &pivot.rows[1];
    assert_eq!(feb.cells[0].volume, Decimal::ZERO);
    assert_eq!(feb.cells[1].quota, dec!(22));
}

#[test]
fn test_pivot_takes_first_three_provinces_seen() {
    let rows = vec![
        provincial("2024-01-01", "Jawa Barat", dec!(1), dec!(1)),
        provincial("2024-01-01", "Aceh", dec!(1), dec!(1)),
        provincial("2024-01-01", "Jawa Barat", dec!(1), dec!(1)),
        provincial("2024-01-01", "Bali", dec!(1), dec!(1)),
        provincial("2024-03-01", "Papua", dec!(5), dec!(5)),
    ];
    let pivot = provincial_pivot(&rows, PIVOT_PROVINCES);
    assert_eq!(pivot.provinces, vec!["Jawa Barat", "Aceh", "Bali"]);
    // Papua's date still appears on the axis
    assert_eq!(pivot.rows.len(), 2);
    assert!(pivot.rows[1].cells.iter().all(|c| c.volume.is_zero()));
}

#[test]
fn test_pivot_joins_on_calendar_date() {
    let rows = vec![
        provincial("2024-01-01T00:00:00.000Z", "Aceh", dec!(10), dec!(11)),
        provincial("2024-01-01", "Bali", dec!(20), dec!(21)),
    ];
    let pivot = provincial_pivot(&rows, PIVOT_PROVINCES);
    assert_eq!(pivot.rows.len(), 1);
    assert_eq!(pivot.rows[0].cells[0].volume, dec!(10));
    assert_eq!(pivot.rows[0].cells[1].volume, dec!(20));
}

#[test]
fn test_pivot_skips_unparseable_dates_and_blank_provinces() {
    let rows = vec![
        provincial("nanti", "Aceh", dec!(10), dec!(11)),
        provincial("2024-01-01", "  ", dec!(20), dec!(21)),
    ];
    let pivot = provincial_pivot(&rows, PIVOT_PROVINCES);
    assert_eq!(pivot.provinces, vec!["Aceh"]);
    assert_eq!(pivot.rows.len(), 1);
    assert_eq!(pivot.rows[0].cells[0].volume, Decimal::ZERO);
}

#[test]
fn test_pivot_chart_has_volume_and_quota_lines() {
    let rows = vec![provincial("2024-01-01", "Aceh", dec!(10), dec!(12))];
    let chart = provincial_pivot(&rows, PIVOT_PROVINCES).chart();
    let names: Vec<_> = chart.lines.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Aceh Volume", "Aceh Kuota"]);
    assert_eq!(chart.lines[1].values, vec![12.0]);
}

#[test]
fn test_pivot_empty() {
    let pivot = provincial_pivot(&[], PIVOT_PROVINCES);
    assert!(pivot.provinces.is_empty());
    assert!(pivot.chart().is_empty());
}

// ── Paging ────────────────────────────────────────────────────

#[test]
fn test_page_count() {
    assert_eq!(page_count(0, SIMULATION_PAGE_SIZE), 0);
    assert_eq!(page_count(10, SIMULATION_PAGE_SIZE), 1);
    assert_eq!(page_count(11, SIMULATION_PAGE_SIZE), 2);
    assert_eq!(page_count(5, 0), 0);
}

#[test]
fn test_page_slice_clamps() {
    let rows: Vec<usize> = (0..25).collect();
    assert_eq!(page_slice(&rows, 0, 10), &rows[0..10]);
    assert_eq!(page_slice(&rows, 2, 10), &rows[20..25]);
    assert_eq!(page_slice(&rows, 9, 10), &rows[20..25]);
    assert!(page_slice::<usize>(&[], 3, 10).is_empty());
}

// ── Assembly ──────────────────────────────────────────────────

#[test]
fn test_build_dashboard() {
    let nationals = monthly(14);
    let provincials = vec![provincial("2024-01-01", "Aceh", dec!(1), dec!(2))];
    let sim = vec![
        SimulationRow { date: "2024-01-01".into(), ..Default::default() },
        SimulationRow { date: "2024-02-01".into(), ..Default::default() },
    ];
    let dash = build(&Sources {
        price_references: &[],
        exchange_rates: &[],
        national_volumes: &nationals,
        provincial_volumes: &provincials,
        simulation: &sim,
    });
    assert!(dash.price_chart.is_empty());
    assert!(dash.rate_chart.is_empty());
    assert_eq!(dash.national_volume.recent.len(), 12);
    assert_eq!(dash.national_chart.labels.len(), 12);
    assert_eq!(dash.pivot.provinces, vec!["Aceh"]);
    assert_eq!(dash.simulation_table[0].date, "2024-02-01");
    assert_eq!(dash.simulation_chart.labels[0], "01 Jan 2024");
}
