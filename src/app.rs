//! Application state and logic.

use std::sync::Arc;

use crate::eval::Evaluator;
use crate::plot::PlotState;
use crate::symbols::SymbolTable;
use crate::util;

/// Application theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Gruvbox dark theme.
    GruvboxDark,
    /// Gruvbox light theme.
    GruvboxLight,
}

impl Theme {
    /// Get the next theme in the cycle.
    pub fn next(self) -> Self {
        match self {
            Theme::GruvboxDark => Theme::GruvboxLight,
            Theme::GruvboxLight => Theme::GruvboxDark,
        }
    }

    /// Get the theme name.
    pub fn name(self) -> &'static str {
        match self {
            Theme::GruvboxDark => "Gruvbox Dark",
            Theme::GruvboxLight => "Gruvbox Light",
        }
    }
}

/// One calculator interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// What the user typed.
    pub input: String,
    /// Result or error text.
    pub output: String,
    /// Whether the output is an error.
    pub is_error: bool,
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Current input line.
    pub input: String,
    /// Evaluation history, oldest first.
    pub history: Vec<HistoryEntry>,
    /// Canonical symbol table; replaced, never mutated, on evaluation.
    pub symbols: Arc<SymbolTable>,
    /// The expression engine.
    pub evaluator: Evaluator,
    /// Open plot views.
    pub plots: Vec<PlotState>,
    /// Index of the visible plot view.
    pub active_plot: usize,
    /// Whether the plot overlay is shown.
    pub plot_visible: bool,
    /// Status message.
    pub status: String,
    /// Current theme.
    pub theme: Theme,
    /// History recall position for Up/Down.
    history_cursor: Option<usize>,
}

impl App {
    /// Create a new application instance.
    pub fn new() -> Self {
        Self {
            input: String::new(),
            history: Vec::new(),
            symbols: Arc::new(SymbolTable::standard()),
            evaluator: Evaluator::new(),
            plots: Vec::new(),
            active_plot: 0,
            plot_visible: false,
            status: "Ready".to_string(),
            theme: Theme::GruvboxDark,
            history_cursor: None,
        }
    }

    /// Evaluate the current input line.
    ///
    /// On success the new symbol table snapshot is published to every open
    /// plot view; on failure the table is left as it was.
    pub fn evaluate(&mut self) {
        let input = self.input.trim().to_string();
        if input.is_empty() {
            self.status = "Nothing to evaluate".to_string();
            return;
        }

        match self.evaluator.eval(&self.symbols, &input) {
            Ok(result) => {
                tracing::info!(input = %input, result = %result.display, "evaluated");
                self.history.push(HistoryEntry {
                    input,
                    output: result.display,
                    is_error: false,
                });
                self.symbols = Arc::new(result.table);
                self.publish_symbols();
                self.status = "Evaluated".to_string();
            }
            Err(err) => {
                tracing::error!(input = %input, error = %err, "evaluation failed");
                self.history.push(HistoryEntry {
                    input,
                    output: err.to_string(),
                    is_error: true,
                });
                self.status = format!("Error: {}", err);
            }
        }

        self.input.clear();
        self.history_cursor = None;
    }

    /// Push the current symbol table snapshot to every plot view.
    fn publish_symbols(&mut self) {
        for plot in &mut self.plots {
            plot.publish_symbols(Arc::clone(&self.symbols));
        }
    }

    /// Add a character to the input line.
    pub fn input_char(&mut self, c: char) {
        self.input.push(c);
        self.history_cursor = None;
    }

    /// Remove the last character from the input line.
    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Clear the input line.
    pub fn clear_input(&mut self) {
        self.input.clear();
        self.history_cursor = None;
    }

    /// Clear the evaluation history.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.history_cursor = None;
        self.status = "History cleared".to_string();
    }

    /// Recall the previous input from history.
    pub fn recall_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let cursor = match self.history_cursor {
            Some(c) => c.saturating_sub(1),
            None => self.history.len() - 1,
        };
        self.history_cursor = Some(cursor);
        self.input = self.history[cursor].input.clone();
    }

    /// Recall the next input from history, clearing past the newest.
    pub fn recall_next(&mut self) {
        match self.history_cursor {
            Some(c) if c + 1 < self.history.len() => {
                self.history_cursor = Some(c + 1);
                self.input = self.history[c + 1].input.clone();
            }
            Some(_) => {
                self.history_cursor = None;
                self.input.clear();
            }
            None => {}
        }
    }

    /// Toggle the plot overlay, creating the first view on demand.
    pub fn toggle_plot(&mut self) {
        if self.plot_visible {
            self.plot_visible = false;
            self.status = "Plot closed".to_string();
            return;
        }
        if self.plots.is_empty() {
            self.plots.push(PlotState::new(Arc::clone(&self.symbols)));
            self.active_plot = 0;
        }
        self.plot_visible = true;
        self.status = format!("Plot view {} of {}", self.active_plot + 1, self.plots.len());
    }

    /// Open an additional plot view and switch to it.
    pub fn new_plot(&mut self) {
        self.plots.push(PlotState::new(Arc::clone(&self.symbols)));
        self.active_plot = self.plots.len() - 1;
        self.status = format!("Plot view {} of {}", self.active_plot + 1, self.plots.len());
    }

    /// Switch to the next plot view.
    pub fn next_plot(&mut self) {
        if !self.plots.is_empty() {
            self.active_plot = (self.active_plot + 1) % self.plots.len();
            self.status = format!("Plot view {} of {}", self.active_plot + 1, self.plots.len());
        }
    }

    /// Switch to the previous plot view.
    pub fn prev_plot(&mut self) {
        if !self.plots.is_empty() {
            if self.active_plot == 0 {
                self.active_plot = self.plots.len() - 1;
            } else {
                self.active_plot -= 1;
            }
            self.status = format!("Plot view {} of {}", self.active_plot + 1, self.plots.len());
        }
    }

    /// Get the visible plot view.
    pub fn current_plot(&self) -> Option<&PlotState> {
        self.plots.get(self.active_plot)
    }

    /// Run the draw action on the visible plot view.
    pub fn draw_active_plot(&mut self) {
        let evaluator = &self.evaluator;
        if let Some(plot) = self.plots.get_mut(self.active_plot) {
            self.status = plot.draw(evaluator);
        }
    }

    /// Differentiate the visible plot view's function field.
    pub fn differentiate_active_plot(&mut self) {
        let evaluator = &self.evaluator;
        if let Some(plot) = self.plots.get_mut(self.active_plot) {
            self.status = plot.differentiate(evaluator);
        }
    }

    /// Route a typed character to the visible plot view.
    pub fn plot_input(&mut self, c: char) {
        if let Some(plot) = self.plots.get_mut(self.active_plot) {
            plot.input(c);
        }
    }

    /// Route a backspace to the visible plot view.
    pub fn plot_backspace(&mut self) {
        if let Some(plot) = self.plots.get_mut(self.active_plot) {
            plot.backspace();
        }
    }

    /// Cycle the focused field of the visible plot view.
    pub fn plot_next_field(&mut self) {
        if let Some(plot) = self.plots.get_mut(self.active_plot) {
            plot.next_field();
            self.status = format!("Editing {}", plot.focus.name());
        }
    }

    /// Copy the most recent result to the clipboard.
    pub fn copy_last_result(&mut self) {
        match self.history.last() {
            Some(entry) => match util::copy_last_entry(entry) {
                Ok(_) => self.status = "Result copied!".to_string(),
                Err(e) => self.status = format!("Copy failed: {}", e),
            },
            None => self.status = "Nothing to copy".to_string(),
        }
    }

    /// Copy the whole transcript to the clipboard.
    pub fn copy_transcript(&mut self) {
        if self.history.is_empty() {
            self.status = "Nothing to copy".to_string();
            return;
        }
        match util::copy_transcript(&self.history) {
            Ok(_) => self.status = "Transcript copied!".to_string(),
            Err(e) => self.status = format!("Copy failed: {}", e),
        }
    }

    /// Cycle to the next theme.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.status = format!("Theme: {}", self.theme.name());
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_publishes_snapshot_to_plots() {
        let mut app = App::new();
        app.toggle_plot();
        assert_eq!(app.plots.len(), 1);

        app.input = "a = 4".to_string();
        app.evaluate();

        assert_eq!(app.symbols.get("a"), Some(4.0));
        assert_eq!(app.plots[0].symbols.get("a"), Some(4.0));
        assert_eq!(app.history.len(), 1);
        assert!(!app.history[0].is_error);
    }

    #[test]
    fn failed_evaluation_keeps_table() {
        let mut app = App::new();
        let before = Arc::clone(&app.symbols);

        app.input = "1 +".to_string();
        app.evaluate();

        assert!(app.history[0].is_error);
        assert!(Arc::ptr_eq(&before, &app.symbols));
    }

    #[test]
    fn history_recall_cycles() {
        let mut app = App::new();
        app.input = "1 + 1".to_string();
        app.evaluate();
        app.input = "2 + 2".to_string();
        app.evaluate();

        app.recall_prev();
        assert_eq!(app.input, "2 + 2");
        app.recall_prev();
        assert_eq!(app.input, "1 + 1");
        app.recall_next();
        assert_eq!(app.input, "2 + 2");
        app.recall_next();
        assert_eq!(app.input, "");
    }

    #[test]
    fn plot_views_cycle() {
        let mut app = App::new();
        app.toggle_plot();
        app.new_plot();
        assert_eq!(app.plots.len(), 2);
        assert_eq!(app.active_plot, 1);

        app.next_plot();
        assert_eq!(app.active_plot, 0);
        app.prev_plot();
        assert_eq!(app.active_plot, 1);
    }
}
