//! Catenary - a terminal-based graphing calculator.
//!
//! Catenary evaluates mathematical expressions in an interactive terminal
//! interface and plots them as smooth curves, with a shared symbol table
//! carrying variable bindings from the calculator into every plot view.
//!
//! # Features
//!
//! - Expression evaluation with variables, functions and constants
//! - Polynomial coefficient lists ("1 0 -2" is x² − 2) and their derivatives
//! - Catmull-Rom smoothed curve plotting with automatic viewport scaling
//! - Dashed reference axes when the true axis is off-screen
//! - Gruvbox color themes
//! - Clipboard integration
//!
//! # Example
//!
//! ```
//! use catenary::eval::Evaluator;
//! use catenary::symbols::SymbolTable;
//!
//! let evaluator = Evaluator::new();
//! let table = SymbolTable::standard();
//!
//! let result = evaluator.eval(&table, "a = 2 * pi").unwrap();
//! assert!(result.table.get("a").is_some());
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod app;
pub mod error;
pub mod eval;
pub mod plot;
pub mod symbols;
pub mod ui;
pub mod util;

pub use error::{CatenaryError, Result};
