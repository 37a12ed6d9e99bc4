use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::dashboard::format::{format_date, format_decimal, DEFAULT_DECIMALS, PLACEHOLDER};
use crate::dashboard::{Chart, RECENT_WINDOW};
use crate::models::*;
use crate::ui::app::{App, Screen};
use crate::ui::theme;
use crate::ui::util::truncate;

/// One line of a fact tab's recent list.
pub(crate) trait ListRow {
    const HEADERS: &'static [&'static str];
    fn widths() -> Vec<Constraint>;
    fn cells(&self) -> Vec<String>;
}

impl ListRow for PriceReference {
    const HEADERS: &'static [&'static str] = &["Tanggal", "Bulan", "CP C3", "CP C4", "HIP LPG"];

    fn widths() -> Vec<Constraint> {
        vec![
            Constraint::Length(13),
            Constraint::Min(12),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(12),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            format_date(&self.date),
            self.month.clone(),
            format_decimal(self.propane, DEFAULT_DECIMALS),
            format_decimal(self.butane, DEFAULT_DECIMALS),
            format_decimal(self.blended, DEFAULT_DECIMALS),
        ]
    }
}

impl ListRow for ExchangeRate {
    const HEADERS: &'static [&'static str] =
        &["Tanggal", "Periode", "Kurs Beli", "Kurs Jual", "Kurs Tengah"];

    fn widths() -> Vec<Constraint> {
        vec![
            Constraint::Length(13),
            Constraint::Min(14),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(12),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            format_date(&self.date),
            self.period.clone(),
            format_decimal(self.buy, DEFAULT_DECIMALS),
            format_decimal(self.sell, DEFAULT_DECIMALS),
            format_decimal(self.mid, DEFAULT_DECIMALS),
        ]
    }
}

impl ListRow for NationalVolume {
    const HEADERS: &'static [&'static str] = &["Tanggal", "Bulan", "Volume (kg)"];

    fn widths() -> Vec<Constraint> {
        vec![
            Constraint::Length(13),
            Constraint::Min(12),
            Constraint::Length(20),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            format_date(&self.date),
            self.month.clone(),
            format_decimal(self.volume, 0),
        ]
    }
}

impl ListRow for ProvincialVolume {
    const HEADERS: &'static [&'static str] =
        &["Tanggal", "Bulan", "Propinsi", "MOR", "Volume (kg)", "Kuota (kg)"];

    fn widths() -> Vec<Constraint> {
        vec![
            Constraint::Length(13),
            Constraint::Length(12),
            Constraint::Min(16),
            Constraint::Length(8),
            Constraint::Length(16),
            Constraint::Length(16),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            format_date(&self.date),
            self.month.clone(),
            truncate(&self.province, 24),
            self.region_office
                .clone()
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            format_decimal(self.volume, 0),
            format_decimal(self.quota, 0),
        ]
    }
}

impl ListRow for SimulationRow {
    const HEADERS: &'static [&'static str] = &[
        "Tanggal",
        "Bulan",
        "HIP LPG/kg",
        "Harga Patokan",
        "HJE",
        "Margin",
        "PPN",
        "Subsidi",
        "Harga Perhitungan",
    ];

    fn widths() -> Vec<Constraint> {
        vec![
            Constraint::Length(13),
            Constraint::Min(10),
            Constraint::Length(11),
            Constraint::Length(13),
            Constraint::Length(10),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(11),
            Constraint::Length(17),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            format_date(&self.date),
            self.month.clone(),
            format_decimal(self.hip_per_kg, DEFAULT_DECIMALS),
            format_decimal(self.benchmark_price, DEFAULT_DECIMALS),
            format_decimal(self.retail_price, DEFAULT_DECIMALS),
            format_decimal(self.margin, DEFAULT_DECIMALS),
            format_decimal(self.vat, DEFAULT_DECIMALS),
            format_decimal(self.subsidy, DEFAULT_DECIMALS),
            format_decimal(self.computed_price, DEFAULT_DECIMALS),
        ]
    }
}

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Min(6)])
        .split(area);

    let d = &app.dashboard;
    match app.screen {
        Screen::CpAramco => {
            super::chart::render(f, chunks[0], "CP Aramco (USD/MT)", &d.price_chart);
            render_list(f, chunks[1], app, &d.price_reference.recent);
        }
        Screen::Kurs => {
            super::chart::render(f, chunks[0], "Kurs (Rp/USD)", &d.rate_chart);
            render_list(f, chunks[1], app, &d.exchange_rate.recent);
        }
        Screen::LpgNasional => {
            super::chart::render(f, chunks[0], "Volume LPG 3 Kg Nasional", &d.national_chart);
            render_list(f, chunks[1], app, &d.national_volume.recent);
        }
        Screen::LpgProvinsi => {
            let chart: Chart = d.pivot.chart();
            let title = if d.pivot.provinces.is_empty() {
                "Volume & Kuota per Propinsi".to_string()
            } else {
                format!("Volume & Kuota: {}", d.pivot.provinces.join(", "))
            };
            super::chart::render(f, chunks[0], &title, &chart);
            render_list(f, chunks[1], app, &d.provincial_volume.recent);
        }
        Screen::Beranda => {}
    }
}

fn render_list<T: ListRow>(f: &mut Frame, area: Rect, app: &App, rows: &[T]) {
    let title = format!(" {} ({} of latest {}) ", app.screen, rows.len(), RECENT_WINDOW);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    if rows.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No data", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Press a to add the first record",
                theme::dim_style(),
            )),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header = Row::new(
        T::HEADERS
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    )
    .height(1);

    let table_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .skip(app.list_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, row)| {
            let style = if i == app.list_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(row.cells().into_iter().map(Cell::from)).style(style)
        })
        .collect();

    let table = Table::new(table_rows, T::widths())
        .header(header)
        .block(block);
    f.render_widget(table, area);
}
