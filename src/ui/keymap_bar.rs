//! Keymap help bar UI component.

use crate::ui::ThemeColors;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Draw the keymap help bar.
pub(super) fn draw_keymap(f: &mut Frame<'_>, area: Rect, plot_visible: bool, colors: &ThemeColors) {
    let keymap_text = if plot_visible {
        "Enter:draw | Tab:field | ←→:view | ^N:new view | ^D:differentiate | Esc:close"
    } else {
        "Enter:eval | ↑↓:history | ^P:plot | ^Y:copy result | ^O:copy transcript | ^L:clear | ^T:theme | Esc:quit"
    };

    let paragraph =
        Paragraph::new(keymap_text).style(Style::default().fg(colors.status_fg).bg(colors.bg));

    f.render_widget(paragraph, area);
}
