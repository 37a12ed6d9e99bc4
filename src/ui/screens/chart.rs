use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph},
    Frame,
};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::dashboard::{self, format::format_decimal};
use crate::ui::theme;

fn block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_style(false))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ))
}

/// First, middle and last category labels.
fn x_labels(labels: &[String]) -> Vec<String> {
    match labels.len() {
        0 => Vec::new(),
        1 | 2 => labels.to_vec(),
        n => vec![
            labels[0].clone(),
            labels[n / 2].clone(),
            labels[n - 1].clone(),
        ],
    }
}

fn y_label(value: f64, span: f64) -> String {
    let decimals = if span < 10.0 { 2 } else { 0 };
    format_decimal(Decimal::from_f64(value), decimals)
}

/// Line chart over a category axis, or a "no data" panel when empty.
pub(crate) fn render(f: &mut Frame, area: Rect, title: &str, chart: &dashboard::Chart) {
    if chart.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No data", theme::dim_style())),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block(title)), area);
        return;
    }

    let points: Vec<Vec<(f64, f64)>> = chart
        .lines
        .iter()
        .map(|line| {
            line.values
                .iter()
                .enumerate()
                .map(|(i, v)| (i as f64, *v))
                .collect()
        })
        .collect();

    let datasets: Vec<Dataset> = chart
        .lines
        .iter()
        .zip(&points)
        .enumerate()
        .map(|(i, (line, data))| {
            Dataset::default()
                .name(line.name.clone())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(theme::series_color(i)))
                .data(data)
        })
        .collect();

    let (lo, hi) = chart.bounds();
    let span = hi - lo;
    let x_max = chart.labels.len().saturating_sub(1).max(1) as f64;

    let x_axis = Axis::default()
        .style(theme::dim_style())
        .bounds([0.0, x_max])
        .labels(x_labels(&chart.labels));
    let y_axis = Axis::default()
        .style(theme::dim_style())
        .bounds([lo, hi])
        .labels(vec![
            y_label(lo, span),
            y_label((lo + hi) / 2.0, span),
            y_label(hi, span),
        ]);

    let widget = Chart::new(datasets)
        .block(block(title))
        .x_axis(x_axis)
        .y_axis(y_axis)
        .legend_position(Some(LegendPosition::TopLeft));
    f.render_widget(widget, area);
}
