//! Error types for Lineage operations.
//!
//! This module provides the main error type [`LineageError`] which wraps the
//! error conditions that can occur while turning a tree document into a chart.

use std::io;

use thiserror::Error;

use crate::{export, layout::LayoutError, source::ParseError};

/// The main error type for Lineage operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text next to the error so that
/// callers can point at the offending span when reporting it.
#[derive(Debug, Error)]
pub enum LineageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(#[from] export::Error),
}

impl LineageError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
