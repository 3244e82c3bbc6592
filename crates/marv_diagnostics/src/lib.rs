//! marv_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Recoverable problems found while resolving a program (redeclarations,
//! undefined identifiers) are collected as [`Diagnostic`] values instead of
//! aborting the pass. Each one carries a code, a severity and, when known,
//! the source location it refers to.

use marv_core::text::SourceLocation;
use std::fmt;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagnosticCategory {
    Message,
    Warning,
    Error,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Message => write!(f, "message"),
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    /// May contain `{0}`, `{1}`, ... placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The file this diagnostic belongs to, if any.
    pub file: Option<String>,
    /// The node location the diagnostic points at, if the node had one.
    pub loc: Option<SourceLocation>,
    pub message_text: String,
    pub code: u32,
    pub category: DiagnosticCategory,
    pub related_information: Vec<Diagnostic>,
}

impl Diagnostic {
    /// Create a diagnostic that is not tied to a location.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            loc: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
            related_information: Vec::new(),
        }
    }

    /// Create a diagnostic pointing at `loc`. The file is taken from the
    /// location's source name.
    pub fn with_location(
        loc: Option<SourceLocation>,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        let file = loc
            .as_ref()
            .and_then(|l| l.source_name())
            .map(str::to_string);
        Self {
            file,
            loc,
            ..Self::new(message, args)
        }
    }

    /// Attribute this diagnostic to `file` when the location did not name one.
    pub fn in_file(mut self, file: &str) -> Self {
        if self.file.is_none() {
            self.file = Some(file.to_string());
        }
        self
    }

    pub fn with_related(mut self, related: Diagnostic) -> Self {
        self.related_information.push(related);
        self
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }

    pub fn is_warning(&self) -> bool {
        self.category == DiagnosticCategory::Warning
    }

    /// The location as text, or `unknown` when the node had none.
    pub fn location_text(&self) -> String {
        match (&self.loc, &self.file) {
            (Some(loc), _) if loc.source.is_some() => loc.to_string(),
            (Some(loc), Some(file)) => format!("{} {}", file, loc),
            (Some(loc), None) => loc.to_string(),
            (None, Some(file)) => file.clone(),
            (None, None) => "unknown".to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} MARV{}: {}",
            self.location_text(),
            self.category,
            self.code,
            self.message_text
        )
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

/// Diagnostics accumulated over one pass or one whole run.
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

    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_warning()).count()
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

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Sort diagnostics by file, then by start position.
    /// Diagnostics without a location sort first within their file.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by(|a, b| {
            a.file
                .cmp(&b.file)
                .then_with(|| {
                    let a_pos = a.loc.as_ref().map(|l| l.start);
                    let b_pos = b.loc.as_ref().map(|l| l.start);
                    a_pos.cmp(&b_pos)
                })
        });
    }
}

impl IntoIterator for DiagnosticCollection {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Warning, message: $msg }
        };
        ($code:expr, Message, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Message, message: $msg }
        };
    }

    // ========================================================================
    // Pipeline failures (1000-1099)
    // ========================================================================
    pub const PARSER_FAILED_0: DiagnosticMessage = diag!(1001, Error, "Parser failed: {0}");
    pub const TRANSLATION_FAILED_0: DiagnosticMessage = diag!(1002, Error, "Translation failed: {0}");
    pub const CANNOT_READ_FILE_0_1: DiagnosticMessage = diag!(1003, Error, "Cannot read file '{0}': {1}");

    // ========================================================================
    // Scope resolution (2000-2099)
    // ========================================================================
    pub const VARIABLE_0_WAS_DEFINED_TWICE_IN_THE_SAME_SCOPE: DiagnosticMessage = diag!(2001, Warning, "Variable '{0}' was defined twice in the same scope.");
    pub const CONSTANT_0_WAS_DEFINED_TWICE_IN_THE_SAME_SCOPE: DiagnosticMessage = diag!(2002, Error, "Constant '{0}' was defined twice in the same scope.");
    pub const VAR_0_CONFLICTS_WITH_BLOCK_SCOPED_DECLARATION: DiagnosticMessage = diag!(2003, Error, "Variable '{0}' is declared with 'var' in a block that already declares it with 'let' or 'const'.");
    pub const UNDEFINED_IDENTIFIER_0: DiagnosticMessage = diag!(2004, Warning, "Undefined identifier {0}.");
    pub const FIRST_DEFINITION_0_STYLE: DiagnosticMessage = diag!(2010, Message, "First definition {0}-style.");
    pub const SECOND_DEFINITION_0_STYLE: DiagnosticMessage = diag!(2011, Message, "Second definition {0}-style.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use marv_core::text::Position;
    use std::sync::Arc;

    fn loc(file: &str, line: u32) -> SourceLocation {
        SourceLocation::new(
            Some(Arc::from(file)),
            Position::new(line, 0),
            Position::new(line, 5),
        )
    }

    #[test]
    fn test_format_message() {
        let msg = format_message("Variable '{0}' was defined twice in the same scope.", &["x"]);
        assert_eq!(msg, "Variable 'x' was defined twice in the same scope.");
        assert_eq!(format_message("No arguments.", &[]), "No arguments.");
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::with_location(
            Some(loc("a.js", 2)),
            &messages::UNDEFINED_IDENTIFIER_0,
            &["z"],
        );
        assert_eq!(diag.file.as_deref(), Some("a.js"));
        assert_eq!(
            diag.to_string(),
            "a.js [2:0-2:5]: warning MARV2004: Undefined identifier z."
        );
    }

    #[test]
    fn test_unknown_location() {
        let diag = Diagnostic::new(&messages::UNDEFINED_IDENTIFIER_0, &["q"]);
        assert!(diag.file.is_none());
        assert_eq!(diag.location_text(), "unknown");
        assert_eq!(diag.in_file("b.js").location_text(), "b.js");
    }

    #[test]
    fn test_collection_counts() {
        let mut collection = DiagnosticCollection::new();
        assert!(collection.is_empty());
        collection.add(Diagnostic::new(&messages::VARIABLE_0_WAS_DEFINED_TWICE_IN_THE_SAME_SCOPE, &["a"]));
        collection.add(Diagnostic::new(&messages::CONSTANT_0_WAS_DEFINED_TWICE_IN_THE_SAME_SCOPE, &["b"]));
        assert!(collection.has_errors());
        assert_eq!(collection.error_count(), 1);
        assert_eq!(collection.warning_count(), 1);
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_collection_sort() {
        let mut collection = DiagnosticCollection::new();
        collection.add(Diagnostic::with_location(Some(loc("b.js", 1)), &messages::UNDEFINED_IDENTIFIER_0, &["x"]));
        collection.add(Diagnostic::with_location(Some(loc("a.js", 9)), &messages::UNDEFINED_IDENTIFIER_0, &["y"]));
        collection.add(Diagnostic::with_location(Some(loc("a.js", 3)), &messages::UNDEFINED_IDENTIFIER_0, &["z"]));
        collection.sort();
        let order: Vec<_> = collection.iter().map(|d| d.message_text.clone()).collect();
        assert_eq!(
            order,
            vec!["Undefined identifier z.", "Undefined identifier y.", "Undefined identifier x."]
        );
    }

    #[test]
    fn test_related_information() {
        let primary = Diagnostic::new(&messages::CONSTANT_0_WAS_DEFINED_TWICE_IN_THE_SAME_SCOPE, &["y"])
            .with_related(Diagnostic::with_location(Some(loc("a.js", 1)), &messages::FIRST_DEFINITION_0_STYLE, &["const"]))
            .with_related(Diagnostic::with_location(Some(loc("a.js", 2)), &messages::SECOND_DEFINITION_0_STYLE, &["var"]));
        assert_eq!(primary.related_information.len(), 2);
        assert_eq!(primary.related_information[0].message_text, "First definition const-style.");
        assert_eq!(primary.related_information[1].category, DiagnosticCategory::Message);
    }
}
