//! Plot overlay - input fields and the curve canvas.
//!
//! A pure rendering layer: the geometry is produced by
//! [`crate::plot::build_geometry`] in canvas pixel coordinates (y down) and
//! translated here into braille canvas drawing calls (y up).

use crate::app::App;
use crate::plot::geometry::{CanvasGeometry, Segment, Stroke};
use crate::plot::{build_geometry, PlotField, PlotState};
use crate::ui::ThemeColors;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Context, Line as CanvasLine},
        Block, Borders, Clear, Paragraph,
    },
    Frame,
};

// Length of one dash (and one gap) of a dashed axis line, in canvas pixels.
const DASH_LEN: f64 = 4.0;

pub(super) fn draw_plot_view(f: &mut Frame<'_>, app: &App, colors: &ThemeColors) {
    let Some(plot) = app.current_plot() else {
        return;
    };

    let area = centered_rect(90, 90, f.area());
    f.render_widget(Clear, area);

    let title = format!(" Plot {}/{} ", app.active_plot + 1, app.plots.len());
    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(colors.heading))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .style(Style::default().bg(colors.bg));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let has_message = plot.message.is_some();
    let mut constraints = vec![Constraint::Length(3)];
    if has_message {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Min(3));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    draw_fields(f, chunks[0], plot, colors);

    let mut chunk_idx = 1;
    if let Some(ref message) = plot.message {
        let paragraph = Paragraph::new(message.as_str())
            .style(Style::default().fg(colors.warning))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, chunks[chunk_idx]);
        chunk_idx += 1;
    }

    draw_canvas(f, chunks[chunk_idx], plot, colors);
}

fn draw_fields(f: &mut Frame<'_>, area: Rect, plot: &PlotState, colors: &ThemeColors) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),
            Constraint::Length(12),
            Constraint::Length(12),
        ])
        .split(area);

    let fields = [
        (PlotField::Function, plot.function_input.as_str(), chunks[0]),
        (PlotField::XStart, plot.x_start_input.as_str(), chunks[1]),
        (PlotField::XEnd, plot.x_end_input.as_str(), chunks[2]),
    ];

    for (field, text, chunk) in fields {
        let border = if plot.focus == field {
            Style::default().fg(colors.focus)
        } else {
            Style::default().fg(colors.border)
        };
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(colors.text))
            .block(
                Block::default()
                    .title(format!(" {} ", field.name()))
                    .borders(Borders::ALL)
                    .border_style(border),
            );
        f.render_widget(paragraph, chunk);
    }
}

fn draw_canvas(f: &mut Frame<'_>, area: Rect, plot: &PlotState, colors: &ThemeColors) {
    let Some(ref curve) = plot.curve else {
        let paragraph = Paragraph::new("No curve - enter f(x) and press Enter to draw")
            .style(Style::default().fg(colors.axis))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    };

    // braille sub-cell resolution of the live rendering surface
    let width = f64::from(area.width) * 2.0;
    let height = f64::from(area.height) * 4.0;
    let geometry = build_geometry(&curve.points, curve.domain, width, height);

    let canvas = Canvas::default()
        .background_color(colors.bg)
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| paint_geometry(ctx, &geometry, height, colors));

    f.render_widget(canvas, area);
}

/// Translate canvas geometry (y down) into braille drawing calls (y up).
fn paint_geometry(ctx: &mut Context<'_>, geometry: &CanvasGeometry, height: f64, colors: &ThemeColors) {
    for segment in &geometry.segments {
        match segment.stroke {
            Stroke::Solid => draw_segment(ctx, segment.from, segment.to, height, colors.axis),
            Stroke::Dashed => draw_dashed(ctx, segment, height, colors.axis),
        }
    }

    for pair in geometry.curve.windows(2) {
        draw_segment(ctx, pair[0], pair[1], height, colors.curve);
    }

    for label in &geometry.labels {
        ctx.print(
            label.x,
            height - label.y,
            Line::from(Span::styled(
                label.text.clone(),
                Style::default().fg(colors.axis),
            )),
        );
    }
}

fn draw_segment(
    ctx: &mut Context<'_>,
    from: (f64, f64),
    to: (f64, f64),
    height: f64,
    color: ratatui::style::Color,
) {
    ctx.draw(&CanvasLine {
        x1: from.0,
        y1: height - from.1,
        x2: to.0,
        y2: height - to.1,
        color,
    });
}

fn draw_dashed(
    ctx: &mut Context<'_>,
    segment: &Segment,
    height: f64,
    color: ratatui::style::Color,
) {
    let (dx, dy) = (
        segment.to.0 - segment.from.0,
        segment.to.1 - segment.from.1,
    );
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 {
        return;
    }

    let mut travelled = 0.0;
    while travelled < len {
        let stop = (travelled + DASH_LEN).min(len);
        let at = |d: f64| {
            (
                segment.from.0 + dx * d / len,
                segment.from.1 + dy * d / len,
            )
        };
        draw_segment(ctx, at(travelled), at(stop), height, color);
        travelled += 2.0 * DASH_LEN;
    }
}

/// Centered sub-rectangle taking the given percentages of the area.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
