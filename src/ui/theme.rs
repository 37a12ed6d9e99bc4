use ratatui::style::{Color, Modifier, Style};

pub(crate) const HEADER_BG: Color = Color::Rgb(22, 32, 44);
pub(crate) const HEADER_FG: Color = Color::Rgb(218, 226, 236);
pub(crate) const ACCENT: Color = Color::Rgb(96, 165, 250);
pub(crate) const GREEN: Color = Color::Rgb(74, 222, 128);
pub(crate) const RED: Color = Color::Rgb(248, 113, 113);
pub(crate) const YELLOW: Color = Color::Rgb(250, 204, 21);
pub(crate) const SURFACE: Color = Color::Rgb(36, 48, 62);
pub(crate) const TEXT: Color = Color::Rgb(218, 226, 236);
pub(crate) const TEXT_DIM: Color = Color::Rgb(128, 140, 156);
pub(crate) const OVERLAY: Color = Color::Rgb(62, 76, 94);
pub(crate) const COMMAND_BG: Color = Color::Rgb(16, 24, 34);

/// Line colours in dataset order. Pivot charts pair volume and quota per
/// province, so colours repeat in twos there.
pub(crate) const SERIES_COLORS: [Color; 6] = [
    Color::Rgb(96, 165, 250),
    Color::Rgb(251, 146, 60),
    Color::Rgb(74, 222, 128),
    Color::Rgb(244, 114, 182),
    Color::Rgb(250, 204, 21),
    Color::Rgb(167, 139, 250),
];

pub(crate) fn series_color(i: usize) -> Color {
    SERIES_COLORS[i % SERIES_COLORS.len()]
}

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(HEADER_FG)
        .bg(HEADER_BG)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn selected_style() -> Style {
    Style::default().fg(HEADER_BG).bg(ACCENT)
}

pub(crate) fn normal_style() -> Style {
    Style::default().fg(TEXT)
}

pub(crate) fn dim_style() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub(crate) fn alt_row_style() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub(crate) fn command_bar_style() -> Style {
    Style::default().fg(TEXT).bg(COMMAND_BG)
}

pub(crate) fn status_bar_style() -> Style {
    Style::default().fg(TEXT_DIM).bg(SURFACE)
}

pub(crate) fn section_style() -> Style {
    Style::default().fg(YELLOW).add_modifier(Modifier::BOLD)
}

pub(crate) fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(OVERLAY)
    }
}
