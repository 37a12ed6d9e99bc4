use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use super::series::ListRow;
use crate::dashboard::{page_count, page_slice, SIMULATION_PAGE_SIZE};
use crate::models::SimulationRow;
use crate::ui::app::App;
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),                                  // Price chart
            Constraint::Length(SIMULATION_PAGE_SIZE as u16 + 3), // Paged table
        ])
        .split(area);

    super::chart::render(
        f,
        chunks[0],
        "Simulasi LPG 3 Kg (Rp/kg)",
        &app.dashboard.simulation_chart,
    );
    render_table(f, chunks[1], app);
}

fn render_table(f: &mut Frame, area: Rect, app: &App) {
    let rows = &app.dashboard.simulation_table;
    let pages = page_count(rows.len(), SIMULATION_PAGE_SIZE);
    let title = format!(
        " Simulasi ({} rows, page {}/{}) ",
        rows.len(),
        if pages == 0 { 0 } else { app.simulation_page + 1 },
        pages
    );
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
                "The simulation view fills in once the pricing pipeline has run",
                theme::dim_style(),
            )),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header = Row::new(
        SimulationRow::HEADERS
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    )
    .height(1);

    let table_rows: Vec<Row> = page_slice(rows, app.simulation_page, SIMULATION_PAGE_SIZE)
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(row.cells().into_iter().map(Cell::from)).style(style)
        })
        .collect();

    let table = Table::new(table_rows, SimulationRow::widths())
        .header(header)
        .block(block);
    f.render_widget(table, area);
}
