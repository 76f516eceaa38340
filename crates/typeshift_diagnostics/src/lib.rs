//! typeshift_diagnostics: Diagnostic messages and reporting infrastructure.
//!
//! Lowering passes are pure tree transforms; anything they cannot express in
//! the output tree (skipped members, dropped generated interfaces) is
//! reported here. Diagnostics carry a stable code, a category and formatted
//! message text.

use std::fmt;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
        }
    }
}

/// A diagnostic message template with a code and category. The template may
/// contain `{0}`, `{1}`, etc. placeholders.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// A realized diagnostic with resolved message text.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// The package or declaration the diagnostic refers to, if any.
    pub origin: Option<String>,
    pub message_text: String,
    pub code: u32,
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    /// Create a new diagnostic without origin information.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            origin: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }

    /// Attach the package or declaration this diagnostic refers to.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref origin) = self.origin {
            write!(f, "{}: ", origin)?;
        }
        write!(f, "{} TSH{}: {}", self.category, self.code, self.message_text)
    }
}

/// Format a message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A collection of diagnostics accumulated while lowering.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }
}

/// Diagnostic messages emitted by the lowering pipeline.
pub mod messages {
    use super::{DiagnosticCategory, DiagnosticMessage};

    /// A lowering pass met a member variant it has no dedicated operation
    /// for and passed it through unchanged.
    pub const UNSUPPORTED_MEMBER: DiagnosticMessage = DiagnosticMessage {
        code: 9001,
        category: DiagnosticCategory::Warning,
        message: "Lowering pass '{0}' does not handle member '{1}'; passing it through unchanged.",
    };

    /// A strict lowering pass refused to pass an unhandled member through.
    pub const UNSUPPORTED_MEMBER_DENIED: DiagnosticMessage = DiagnosticMessage {
        code: 9002,
        category: DiagnosticCategory::Error,
        message: "Lowering pass '{0}' cannot process member '{1}'.",
    };

    /// A generated interface was never referenced by a surviving top-level
    /// declaration and is omitted from the rearranged output.
    pub const UNREACHABLE_GENERATED_INTERFACE: DiagnosticMessage = DiagnosticMessage {
        code: 9003,
        category: DiagnosticCategory::Warning,
        message: "Generated interface '{0}' is not referenced by any declaration and is omitted.",
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message_replaces_placeholders() {
        assert_eq!(
            format_message("pass '{0}' skipped '{1}'", &["primitives", "call-signature"]),
            "pass 'primitives' skipped 'call-signature'"
        );
    }

    #[test]
    fn test_collection_error_tracking() {
        let mut collection = DiagnosticCollection::new();
        collection.add(Diagnostic::new(
            &messages::UNREACHABLE_GENERATED_INTERFACE,
            &["`T$0`"],
        ));
        assert!(!collection.has_errors());
        collection.add(Diagnostic::new(
            &messages::UNSUPPORTED_MEMBER_DENIED,
            &["strict", "index-signature"],
        ));
        assert!(collection.has_errors());
        assert_eq!(collection.error_count(), 1);
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_display_includes_origin_and_code() {
        let diagnostic = Diagnostic::new(&messages::UNSUPPORTED_MEMBER, &["identity", "method"])
            .with_origin("dom.events");
        let rendered = diagnostic.to_string();
        assert!(rendered.starts_with("dom.events: warning TSH9001"));
    }
}
