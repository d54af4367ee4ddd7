//! Chart exporters.

pub mod svg;

use std::io;

use thiserror::Error;

use crate::layout::PositionedNode;

/// Turns a positioned tree into an output document.
pub trait Exporter {
    /// Renders the chart for `tree`; `None` renders an empty chart.
    fn export(&self, tree: Option<&PositionedNode>) -> Result<String, Error>;
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
