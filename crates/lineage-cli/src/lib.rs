//! CLI logic for the Lineage family-tree tool.
//!
//! This module contains the core CLI logic: load configuration, read the tree
//! document, lay it out and write the SVG chart.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use lineage::{ChartBuilder, LineageError};

/// Run the Lineage CLI application
///
/// This function processes the input file through the Lineage pipeline
/// and writes the resulting SVG to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `LineageError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Layout errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), LineageError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing family tree"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = ChartBuilder::new(app_config);
    let tree = builder.parse(&source)?;
    let svg = builder.render_svg(&tree)?;

    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
