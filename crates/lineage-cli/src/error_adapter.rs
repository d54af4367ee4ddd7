//! Error adapter for converting LineageError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Syntax errors in
//! tree documents are rendered with a snippet of the offending source.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use lineage::{LineageError, source::ParseError, tree::TreeError};

/// Adapter for a tree document error together with its source text.
pub struct DiagnosticAdapter<'a> {
    err: &'a ParseError,
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(err: &'a ParseError, src: &'a str) -> Self {
        Self { err, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.err, f)
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.err {
            ParseError::Syntax { .. } => "lineage::syntax",
            ParseError::Tree(_) => "lineage::tree",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.err {
            ParseError::Syntax { .. } => {
                "people are tables with a `name` and optional `id` and `children`"
            }
            ParseError::Tree(TreeError::DuplicateId(_)) => {
                "every `id` must be unique; omit it to get a generated one"
            }
            ParseError::Tree(TreeError::EmptyName(_)) => "give every person a non-blank `name`",
            ParseError::Tree(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.err.span()?;
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.err.span()?;
        let span = SourceSpan::new(span.start.into(), span.len());
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some("here".to_string()), span),
        )))
    }
}

/// Adapter for non-diagnostic [`LineageError`] variants.
///
/// This adapter handles errors that don't carry source information, such as
/// I/O, configuration, layout and export errors.
pub struct ErrorAdapter<'a>(pub &'a LineageError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            LineageError::Io(_) => "lineage::io",
            LineageError::Parse { .. } => return None,
            LineageError::Layout(_) => "lineage::layout",
            LineageError::Config(_) => "lineage::config",
            LineageError::Export(_) => "lineage::export",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A document error with source location information.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`LineageError`] into a reportable error.
pub fn to_reportable(err: &LineageError) -> Reportable<'_> {
    match err {
        LineageError::Parse {
            err: parse_err,
            src,
        } => Reportable::Diagnostic(DiagnosticAdapter::new(parse_err, src)),
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}

#[cfg(test)]
mod tests {
    use lineage::identifier::Id;

    use super::*;

    #[test]
    fn test_syntax_error_has_label() {
        let parse_err = ParseError::Syntax {
            message: "unexpected key".to_string(),
            span: Some(7..10),
        };
        let err = LineageError::new_parse_error(parse_err, "[root]\nage = 3\n");

        let reportable = to_reportable(&err);
        assert!(matches!(reportable, Reportable::Diagnostic(_)));
        assert_eq!(reportable.to_string(), "unexpected key");
        assert!(reportable.source_code().is_some());

        let labels: Vec<_> = reportable.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 7);
        assert_eq!(labels[0].len(), 3);
        assert!(labels[0].primary());
    }

    #[test]
    fn test_tree_error_has_no_snippet() {
        let parse_err = ParseError::Tree(TreeError::DuplicateId(Id::new("adapter-twin")));
        let err = LineageError::new_parse_error(parse_err, "");

        let reportable = to_reportable(&err);
        assert!(reportable.source_code().is_none());
        assert!(reportable.labels().is_none());
        assert!(reportable.help().is_some());
        assert_eq!(reportable.code().unwrap().to_string(), "lineage::tree");
    }

    #[test]
    fn test_non_parse_error() {
        let err = LineageError::Config("bad value".to_string());

        let reportable = to_reportable(&err);
        match &reportable {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "Configuration error: bad value");
            }
            Reportable::Diagnostic(_) => panic!("Expected Error"),
        }
        assert_eq!(reportable.code().unwrap().to_string(), "lineage::config");
    }

    #[test]
    fn test_tree_errors_report_through_parse() {
        let err = lineage::ChartBuilder::default()
            .parse("[root]\nid = \"adapter-blank\"\nname = \" \"\n")
            .unwrap_err();

        let reportable = to_reportable(&err);
        assert!(matches!(reportable, Reportable::Diagnostic(_)));
        assert_eq!(reportable.code().unwrap().to_string(), "lineage::tree");
    }

    #[test]
    fn test_layout_error_code() {
        let err = LineageError::from(lineage::layout::Spacing::new(0.0, 1.0).unwrap_err());

        let reportable = to_reportable(&err);
        assert_eq!(reportable.code().unwrap().to_string(), "lineage::layout");
    }
}
