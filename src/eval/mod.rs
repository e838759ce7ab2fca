//! Expression evaluation.
//!
//! This module is the calculator's evaluation engine: a lexer, a
//! shunting-yard parser and an RPN stack machine, wrapped in the narrow
//! [`Evaluator`] interface the rest of the application talks to. The
//! plotting pipeline never looks past that interface.
//!
//! Besides ordinary expressions (`2 * sin(pi / 4)`), the evaluator accepts
//! variable assignments (`a = 3`) and polynomial coefficient lists written
//! highest power first (`1 0 -2` is x² − 2).

mod lexer;
mod parser;

use thiserror::Error;

use crate::plot::sample::Sample;
use crate::symbols::SymbolTable;

/// Errors produced while evaluating expression text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// A character the lexer does not recognize.
    #[error("invalid character '{ch}' at position {pos}")]
    InvalidChar {
        /// The offending character.
        ch: char,
        /// Byte offset in the input.
        pos: usize,
    },

    /// A numeric literal that does not parse.
    #[error("invalid number '{text}'")]
    InvalidNumber {
        /// The literal as written.
        text: String,
    },

    /// Nothing to evaluate.
    #[error("empty expression")]
    EmptyExpression,

    /// Unbalanced parentheses.
    #[error("mismatched parentheses")]
    ParenMismatch,

    /// An identifier with no binding in the symbol table.
    #[error("unknown name '{name}'")]
    UnknownName {
        /// The unresolved identifier.
        name: String,
    },

    /// A call to a function the library does not provide.
    #[error("unknown function '{name}'")]
    UnknownFunction {
        /// The function name as written.
        name: String,
    },

    /// A function called with the wrong number of arguments.
    #[error("function '{name}' expects {expected} argument(s), found {found}")]
    WrongArity {
        /// The function name.
        name: String,
        /// Declared arity.
        expected: usize,
        /// Arguments actually available.
        found: usize,
    },

    /// Operators and operands do not line up.
    #[error("malformed expression")]
    Malformed,

    /// Assignment to something that is not a plain variable name.
    #[error("cannot assign to '{name}'")]
    InvalidAssignTarget {
        /// The rejected left-hand side.
        name: String,
    },

    /// Differentiation input that is not a polynomial coefficient list.
    #[error("differentiation expects a polynomial coefficient list, e.g. '1 0 -2'")]
    NotAPolynomial,
}

/// A builtin function: fixed arity, pure on its arguments.
struct Builtin {
    arity: usize,
    eval: fn(&[f64]) -> f64,
}

/// Look up a builtin function by name.
fn builtin(name: &str) -> Option<Builtin> {
    let (arity, eval): (usize, fn(&[f64]) -> f64) = match name {
        "sin" => (1, |a| a[0].sin()),
        "cos" => (1, |a| a[0].cos()),
        "tan" => (1, |a| a[0].tan()),
        "asin" => (1, |a| a[0].asin()),
        "acos" => (1, |a| a[0].acos()),
        "atan" => (1, |a| a[0].atan()),
        "sqrt" => (1, |a| a[0].sqrt()),
        "abs" => (1, |a| a[0].abs()),
        "ln" => (1, |a| a[0].ln()),
        "log" => (2, |a| a[0].log(a[1])),
        "exp" => (1, |a| a[0].exp()),
        "floor" => (1, |a| a[0].floor()),
        "ceil" => (1, |a| a[0].ceil()),
        "min" => (2, |a| a[0].min(a[1])),
        "max" => (2, |a| a[0].max(a[1])),
        _ => return None,
    };
    Some(Builtin { arity, eval })
}

/// The result of a successful evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Display-ready result text.
    pub display: String,
    /// The symbol table after the evaluation. Identical to the input table
    /// unless the input was an assignment.
    pub table: SymbolTable,
}

/// The expression evaluation engine.
///
/// Stateless: all variable state lives in the [`SymbolTable`] snapshots
/// passed in and handed back.
#[derive(Debug, Default)]
pub struct Evaluator;

impl Evaluator {
    /// Create an evaluator.
    pub fn new() -> Self {
        Self
    }

    /// Evaluate one line of calculator input against a symbol table.
    ///
    /// Handles assignments (`name = expr`), polynomial coefficient lists and
    /// plain expressions. On success the returned [`Evaluation`] carries the
    /// display text and the (possibly extended) symbol table.
    pub fn eval(&self, table: &SymbolTable, input: &str) -> Result<Evaluation, EvalError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(EvalError::EmptyExpression);
        }

        if let Some((target, rhs)) = input.split_once('=') {
            let name = target.trim();
            if !is_valid_variable(name) {
                return Err(EvalError::InvalidAssignTarget {
                    name: name.to_string(),
                });
            }
            let value = self.eval_number(table, rhs)?;
            return Ok(Evaluation {
                display: format!("{} = {}", name, format_value(value)),
                table: table.with_binding(name, value),
            });
        }

        if let Some(coeffs) = parse_coefficients(input) {
            return Ok(Evaluation {
                display: format_polynomial(&coeffs),
                table: table.clone(),
            });
        }

        let value = self.eval_number(table, input)?;
        Ok(Evaluation {
            display: format_value(value),
            table: table.clone(),
        })
    }

    /// Evaluate an expression at each x value, producing one sample per x in
    /// the same order.
    ///
    /// The expression is parsed once and run per sample with `x` bound on top
    /// of the table. Numeric failures surface as NaN/infinite y values and
    /// are left for the sample filter downstream; structural errors (parse
    /// failure, unknown names) abort the whole sweep.
    pub fn plot_eval(
        &self,
        table: &SymbolTable,
        expr: &str,
        xs: &[f64],
    ) -> Result<Vec<Sample>, EvalError> {
        let expr = expr.trim();

        if let Some(coeffs) = parse_coefficients(expr) {
            return Ok(xs
                .iter()
                .map(|&x| Sample::new(x, horner(&coeffs, x)))
                .collect());
        }

        let program = parser::parse(&lexer::tokenize(expr)?)?;
        let mut samples = Vec::with_capacity(xs.len());
        for &x in xs {
            let y = program.run(table, Some(("x", x)))?;
            samples.push(Sample::new(x, y));
        }
        Ok(samples)
    }

    /// Differentiate a polynomial coefficient list by the power rule.
    ///
    /// Returns the derivative as a coefficient list, valid anywhere a
    /// function expression is accepted. Inputs that are not coefficient
    /// lists are reported as unsupported; general symbolic differentiation
    /// is out of scope.
    pub fn differentiate(&self, expr: &str) -> Result<String, EvalError> {
        let coeffs = parse_coefficients(expr.trim()).ok_or(EvalError::NotAPolynomial)?;
        let degree = coeffs.len() - 1;
        if degree == 0 {
            return Ok("0".to_string());
        }
        let derived: Vec<String> = coeffs[..degree]
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let power = (degree - i) as f64;
                format!("{}", c * power)
            })
            .collect();
        Ok(derived.join(" "))
    }

    fn eval_number(&self, table: &SymbolTable, expr: &str) -> Result<f64, EvalError> {
        let tokens = lexer::tokenize(expr.trim())?;
        parser::parse(&tokens)?.run(table, None)
    }
}

/// Check that a name is usable as an assignment target.
///
/// Builtin function names are rejected so `sin = 1` cannot shadow the
/// function library.
fn is_valid_variable(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    starts_ok
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && builtin(name).is_none()
}

/// Try to read the input as a whitespace-separated coefficient list,
/// highest power first.
pub(crate) fn parse_coefficients(expr: &str) -> Option<Vec<f64>> {
    let mut coeffs = Vec::new();
    for word in expr.split_whitespace() {
        coeffs.push(word.parse::<f64>().ok()?);
    }
    if coeffs.is_empty() {
        None
    } else {
        Some(coeffs)
    }
}

/// Evaluate a coefficient list at x by Horner's rule.
pub(crate) fn horner(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().fold(0.0, |acc, &c| acc * x + c)
}

/// Render a coefficient list as a readable polynomial, e.g. `x^2 - 2`.
fn format_polynomial(coeffs: &[f64]) -> String {
    let degree = coeffs.len() - 1;
    let mut out = String::new();

    for (i, &c) in coeffs.iter().enumerate() {
        if c == 0.0 && degree > 0 {
            continue;
        }
        let power = degree - i;
        let magnitude = c.abs();

        if out.is_empty() {
            if c < 0.0 {
                out.push('-');
            }
        } else if c < 0.0 {
            out.push_str(" - ");
        } else {
            out.push_str(" + ");
        }

        if power == 0 || magnitude != 1.0 {
            out.push_str(&format!("{}", magnitude));
        }
        match power {
            0 => {}
            1 => out.push('x'),
            _ => out.push_str(&format!("x^{}", power)),
        }
    }

    if out.is_empty() {
        out.push('0');
    }
    out
}

/// Format a result value with smart precision.
fn format_value(val: f64) -> String {
    if !val.is_finite() {
        return if val.is_nan() {
            "NaN".to_string()
        } else if val.is_sign_positive() {
            "+Inf".to_string()
        } else {
            "-Inf".to_string()
        };
    }
    let abs_val = val.abs();
    if abs_val == 0.0 {
        "0".to_string()
    } else if !(1e-6..1e12).contains(&abs_val) {
        format!("{:.6e}", val)
    } else if val.fract() == 0.0 {
        format!("{:.0}", val)
    } else {
        let text = format!("{:.6}", val);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eval_plain_expression() {
        let evaluator = Evaluator::new();
        let table = SymbolTable::standard();
        let result = evaluator.eval(&table, "2 + 3 * 4").unwrap();
        assert_eq!(result.display, "14");
        assert_eq!(result.table, table);
    }

    #[test]
    fn eval_assignment_extends_table() {
        let evaluator = Evaluator::new();
        let table = SymbolTable::standard();
        let result = evaluator.eval(&table, "a = 2 ^ 5").unwrap();

        assert_eq!(result.display, "a = 32");
        assert_eq!(result.table.get("a"), Some(32.0));
        // the input snapshot is untouched
        assert_eq!(table.get("a"), None);
    }

    #[test]
    fn eval_uses_previous_bindings() {
        let evaluator = Evaluator::new();
        let table = SymbolTable::standard().with_binding("a", 3.0);
        let result = evaluator.eval(&table, "a * a").unwrap();
        assert_eq!(result.display, "9");
    }

    #[test]
    fn eval_rejects_bad_assignment_targets() {
        let evaluator = Evaluator::new();
        let table = SymbolTable::standard();
        assert!(matches!(
            evaluator.eval(&table, "2x = 5"),
            Err(EvalError::InvalidAssignTarget { .. })
        ));
        assert!(matches!(
            evaluator.eval(&table, "sin = 5"),
            Err(EvalError::InvalidAssignTarget { .. })
        ));
    }

    #[test]
    fn eval_formats_polynomial_input() {
        let evaluator = Evaluator::new();
        let table = SymbolTable::new();
        let result = evaluator.eval(&table, "1 0 -2").unwrap();
        assert_eq!(result.display, "x^2 - 2");
    }

    #[test]
    fn plot_eval_preserves_order_and_length() {
        let evaluator = Evaluator::new();
        let table = SymbolTable::standard();
        let xs = [-1.0, 0.0, 1.0, 2.0];
        let samples = evaluator.plot_eval(&table, "x * x", &xs).unwrap();

        assert_eq!(samples.len(), xs.len());
        for (sample, &x) in samples.iter().zip(xs.iter()) {
            assert_eq!(sample.x, x);
            assert_eq!(sample.y, x * x);
        }
    }

    #[test]
    fn plot_eval_keeps_non_finite_values() {
        let evaluator = Evaluator::new();
        let table = SymbolTable::standard();
        let samples = evaluator.plot_eval(&table, "1 / x", &[-1.0, 0.0, 1.0]).unwrap();
        assert!(samples[1].y.is_infinite());
        assert_eq!(samples[0].y, -1.0);
    }

    #[test]
    fn plot_eval_polynomial() {
        let evaluator = Evaluator::new();
        let table = SymbolTable::new();
        let samples = evaluator
            .plot_eval(&table, "1 0 -2", &[0.0, 2.0])
            .unwrap();
        assert_eq!(samples[0].y, -2.0);
        assert_eq!(samples[1].y, 2.0);
    }

    #[test]
    fn plot_eval_unknown_name_aborts() {
        let evaluator = Evaluator::new();
        let table = SymbolTable::new();
        assert!(matches!(
            evaluator.plot_eval(&table, "y + 1", &[0.0]),
            Err(EvalError::UnknownName { .. })
        ));
    }

    #[test]
    fn differentiate_power_rule() {
        let evaluator = Evaluator::new();
        // d/dx (x^2 - 2) = 2x
        assert_eq!(evaluator.differentiate("1 0 -2").unwrap(), "2 0");
        // d/dx (3x^3 + x) = 9x^2 + 1
        assert_eq!(evaluator.differentiate("3 0 1 0").unwrap(), "9 0 1");
        // constants vanish
        assert_eq!(evaluator.differentiate("5").unwrap(), "0");
    }

    #[test]
    fn differentiate_rejects_expressions() {
        let evaluator = Evaluator::new();
        assert!(matches!(
            evaluator.differentiate("sin(x)"),
            Err(EvalError::NotAPolynomial)
        ));
    }

    #[test]
    fn horner_matches_direct_evaluation() {
        // 2x^3 - x + 4 at x = 3: 54 - 3 + 4 = 55
        assert_eq!(horner(&[2.0, 0.0, -1.0, 4.0], 3.0), 55.0);
    }

    #[test]
    fn polynomial_formatting() {
        assert_eq!(format_polynomial(&[1.0, 0.0, -2.0]), "x^2 - 2");
        assert_eq!(format_polynomial(&[-1.0, 2.0]), "-x + 2");
        assert_eq!(format_polynomial(&[2.5]), "2.5");
        assert_eq!(format_polynomial(&[0.0, 0.0]), "0");
    }

    #[test]
    fn value_formatting() {
        assert_eq!(format_value(14.0), "14");
        assert_eq!(format_value(0.5), "0.5");
        assert_eq!(format_value(f64::NAN), "NaN");
        assert_eq!(format_value(f64::INFINITY), "+Inf");
        assert_eq!(format_value(0.0), "0");
    }
}
