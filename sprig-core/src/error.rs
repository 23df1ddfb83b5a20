use crate::ast::Span;
use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use std::{fmt, rc::Rc};

/// The failure categories the evaluator distinguishes. Every error carries
/// exactly one of these alongside its human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// `var` re-declared a name already present in the same scope frame
    DuplicateBinding,
    /// A name resolved against the scope chain matched nothing
    UnboundSymbol,
    /// An operator received an operand of the wrong value kind
    TypeMismatch,
    /// Wrong operand or argument count
    ArityMismatch,
    /// The operator position of a call form evaluated to a non-function
    NotCallable,
    /// `/` with a zero divisor
    DivisionByZero,
    /// Raised explicitly via the `error` built-in
    UserError,
    /// A special form's required shape was violated
    MalformedForm,
}

/// Runtime error with source location information for error reporting
#[derive(Debug)]
pub struct RuntimeError {
    pub kind: ErrorKind,
    pub message: String,
    pub span: Option<Span>,
    pub source: Option<Rc<str>>,
}

impl RuntimeError {
    /// Create a new runtime error without source location
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            span: None,
            source: None,
        }
    }

    /// Add span information to an existing error (useful for wrapping errors
    /// bubbling out of nested forms)
    pub fn with_call_site(self, span: Span) -> Self {
        // If the error already has span info, keep it (it's more specific)
        if self.span.is_some() {
            self
        } else {
            Self {
                span: Some(span),
                ..self
            }
        }
    }

    /// Attach the source text the failing node was parsed from, enabling
    /// the annotated rendering in `Display`
    pub fn with_source(self, source: Rc<str>) -> Self {
        if self.source.is_some() {
            self
        } else {
            Self {
                source: Some(source),
                ..self
            }
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // If we have both span and source, use ariadne for annotated output
        if let (Some(span), Some(source)) = (&self.span, &self.source) {
            let mut output = Vec::new();

            Report::build(ReportKind::Error, (), span.start_byte)
                .with_message(&self.message)
                .with_label(
                    Label::new(span.start_byte..span.end_byte)
                        .with_message(&self.message)
                        .with_color(Color::Red),
                )
                .with_config(Config::default())
                .finish()
                .write(Source::from(&**source), &mut output)
                .map_err(|_| fmt::Error)?;

            let output_str = String::from_utf8(output).map_err(|_| fmt::Error)?;
            write!(f, "{}", output_str)
        } else {
            // Fallback to simple error message
            write!(f, "[evaluation error] {}", self.message)
        }
    }
}

impl std::error::Error for RuntimeError {}

// Host-supplied native functions often report failures through anyhow
impl From<anyhow::Error> for RuntimeError {
    fn from(err: anyhow::Error) -> Self {
        RuntimeError::new(ErrorKind::UserError, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_error_with_span() {
        let source = "(+ 1 undefined_variable)".to_string();

        // Simulate an error at the location of "undefined_variable"
        let span = Span::new(5, 23, 1, 6);

        let error = RuntimeError::new(
            ErrorKind::UnboundSymbol,
            "undefined symbol: undefined_variable",
        )
        .with_call_site(span)
        .with_source(source.into());

        let error_msg = format!("{}", error);

        // The rendered message should contain the offending source text
        assert!(error_msg.contains("undefined_variable"));
    }

    #[test]
    fn test_runtime_error_without_span() {
        let error = RuntimeError::new(ErrorKind::UserError, "simple error");
        assert_eq!(format!("{}", error), "[evaluation error] simple error");
    }

    #[test]
    fn test_with_call_site_keeps_innermost_span() {
        let inner = Span::new(2, 4, 1, 3);
        let outer = Span::new(0, 10, 1, 1);
        let error = RuntimeError::new(ErrorKind::TypeMismatch, "cannot sum nil")
            .with_call_site(inner)
            .with_call_site(outer);
        assert_eq!(error.span, Some(inner));
    }
}
