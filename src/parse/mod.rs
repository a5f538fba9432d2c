//! Adapters that load grids, surfaces and masks from text.

pub mod grid_xml;
pub mod mask_expr;
pub mod surface_asc;

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

use crate::geom::GridError;

/// Result type for the loaders in this module.
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors raised while loading input data.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The XML document could not be deserialized.
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::DeError),
    /// A file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A numeric field was not a valid number.
    #[error("invalid number: {0}")]
    Number(#[from] ParseFloatError),
    /// A count field was not a valid integer.
    #[error("invalid count: {0}")]
    Count(#[from] ParseIntError),
    /// The grid description is inconsistent.
    #[error("invalid grid: {0}")]
    Grid(#[from] GridError),
    /// A surface file is malformed.
    #[error("surface line {line}: {reason}")]
    Surface { line: usize, reason: String },
    /// A field held the wrong number of values.
    #[error("`{field}` needs {expected} values, got {found}")]
    FieldLength {
        field: &'static str,
        expected: usize,
        found: usize,
    },
    /// The mask expression could not be parsed or evaluated.
    #[error("mask expression: {0}")]
    MaskExpression(String),
}

/// Parse a whitespace separated list of numbers.
pub(crate) fn parse_numbers(text: &str) -> ParseResult<Vec<f64>> {
    text.split_whitespace()
        .map(|token| token.parse::<f64>().map_err(ParseError::from))
        .collect()
}

/// Parse exactly `N` numbers from `text`.
pub(crate) fn parse_fixed<const N: usize>(field: &'static str, text: &str) -> ParseResult<[f64; N]> {
    let numbers = parse_numbers(text)?;
    <[f64; N]>::try_from(numbers.as_slice()).map_err(|_| ParseError::FieldLength {
        field,
        expected: N,
        found: numbers.len(),
    })
}

#[cfg(test)]
mod tests;
