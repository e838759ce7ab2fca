//! Calculator view: evaluation history and the input line.

use crate::app::App;
use crate::ui::ThemeColors;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub(super) fn draw_calculator(f: &mut Frame<'_>, area: Rect, app: &App, colors: &ThemeColors) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(area);

    draw_history(f, chunks[0], app, colors);
    draw_input(f, chunks[1], app, colors);
}

fn draw_history(f: &mut Frame<'_>, area: Rect, app: &App, colors: &ThemeColors) {
    let mut lines: Vec<Line<'_>> = Vec::with_capacity(app.history.len() * 2);
    for entry in &app.history {
        lines.push(Line::from(vec![
            Span::styled("> ", Style::default().fg(colors.axis)),
            Span::styled(entry.input.as_str(), Style::default().fg(colors.text)),
        ]));
        let output_style = if entry.is_error {
            Style::default().fg(colors.error)
        } else {
            Style::default()
                .fg(colors.result)
                .add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(Span::styled(
            format!("  {}", entry.output),
            output_style,
        )));
    }

    // keep the newest entries visible
    let visible = area.height.saturating_sub(2) as usize;
    let skip = lines.len().saturating_sub(visible);

    let paragraph = Paragraph::new(lines)
        .scroll((skip as u16, 0))
        .style(Style::default().fg(colors.text).bg(colors.bg))
        .block(
            Block::default()
                .title(" Catenary ")
                .title_style(Style::default().fg(colors.heading))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.border)),
        );

    f.render_widget(paragraph, area);
}

fn draw_input(f: &mut Frame<'_>, area: Rect, app: &App, colors: &ThemeColors) {
    let paragraph = Paragraph::new(app.input.as_str())
        .style(Style::default().fg(colors.text).bg(colors.bg))
        .block(
            Block::default()
                .title(" Input ")
                .title_style(Style::default().fg(colors.heading))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.focus)),
        );
    f.render_widget(paragraph, area);

    let cursor_x = area.x + 1 + app.input.as_str().width() as u16;
    f.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
}
