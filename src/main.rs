//! Catenary - a terminal-based graphing calculator.

use anyhow::Result;
use catenary::app::App;
use catenary::eval::Evaluator;
use catenary::symbols::SymbolTable;
use catenary::ui;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "catenary")]
#[command(about = "A terminal-based graphing calculator", long_about = None)]
struct Args {
    /// Evaluate an expression, print the result and exit without starting the UI
    #[arg(short, long, value_name = "EXPR")]
    eval: Option<String>,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        let log_path = log_path.clone();
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_writer(move || {
                std::fs::OpenOptions::new()
                    .create(true)
                    .write(true)
                    .truncate(true)
                    .append(false)
                    .open(&log_path)
                    .expect("Failed to open log file")
            })
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting Catenary");
    }

    // One-shot evaluation mode
    if let Some(expr) = &args.eval {
        let evaluator = Evaluator::new();
        match evaluator.eval(&SymbolTable::standard(), expr) {
            Ok(result) => {
                println!("{}", result.display);
                return Ok(());
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                std::process::exit(1);
            }
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let app = App::new();
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    if args.log.is_some() {
        tracing::info!("Catenary exited");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Plot overlay mode - handle separately
                if app.plot_visible {
                    match (key.modifiers, key.code) {
                        // Close overlay
                        (KeyModifiers::NONE, KeyCode::Esc) => {
                            app.plot_visible = false;
                            app.status = "Plot closed".to_string();
                        }
                        // Run the draw action
                        (KeyModifiers::NONE, KeyCode::Enter) => {
                            app.draw_active_plot();
                        }
                        // Cycle the focused input field
                        (KeyModifiers::NONE, KeyCode::Tab) => {
                            app.plot_next_field();
                        }
                        // Switch between plot views
                        (KeyModifiers::NONE, KeyCode::Left) => {
                            app.prev_plot();
                        }
                        (KeyModifiers::NONE, KeyCode::Right) => {
                            app.next_plot();
                        }
                        // Open another plot view
                        (KeyModifiers::CONTROL, KeyCode::Char('n')) => {
                            app.new_plot();
                        }
                        // Differentiate the function field
                        (KeyModifiers::CONTROL, KeyCode::Char('d')) => {
                            app.differentiate_active_plot();
                        }
                        // Field editing
                        (KeyModifiers::NONE, KeyCode::Backspace) => {
                            app.plot_backspace();
                        }
                        (KeyModifiers::NONE, KeyCode::Char(c))
                        | (KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                            app.plot_input(c);
                        }
                        _ => {}
                    }
                    continue;
                }

                // Normal mode
                match (key.modifiers, key.code) {
                    // Quit
                    (KeyModifiers::NONE, KeyCode::Esc)
                    | (KeyModifiers::CONTROL, KeyCode::Char('q'))
                    | (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Ok(()),

                    // Evaluate
                    (KeyModifiers::NONE, KeyCode::Enter) => {
                        app.evaluate();
                    }

                    // History recall
                    (KeyModifiers::NONE, KeyCode::Up) => {
                        app.recall_prev();
                    }
                    (KeyModifiers::NONE, KeyCode::Down) => {
                        app.recall_next();
                    }

                    // Features
                    (KeyModifiers::CONTROL, KeyCode::Char('p')) => {
                        app.toggle_plot();
                    }
                    (KeyModifiers::CONTROL, KeyCode::Char('t')) => {
                        app.cycle_theme();
                    }
                    (KeyModifiers::CONTROL, KeyCode::Char('l')) => {
                        app.clear_history();
                    }
                    (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
                        app.clear_input();
                    }

                    // Clipboard
                    (KeyModifiers::CONTROL, KeyCode::Char('y')) => {
                        app.copy_last_result();
                    }
                    (KeyModifiers::CONTROL, KeyCode::Char('o')) => {
                        app.copy_transcript();
                    }

                    // Input editing
                    (KeyModifiers::NONE, KeyCode::Backspace) => {
                        app.backspace();
                    }
                    (KeyModifiers::NONE, KeyCode::Char(c))
                    | (KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                        app.input_char(c);
                    }

                    _ => {}
                }
            }
        }
    }
}
