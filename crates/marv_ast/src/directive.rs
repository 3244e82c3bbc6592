//! Comments and the directives parsed out of doc comments.

use crate::types::NodeId;
use marv_core::collections::OrderedMap;
use marv_core::text::{SourceLocation, TextRange};
use std::fmt;

/// Whether a comment was written `/* ... */` or `// ...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentKind {
    Block,
    Line,
}

impl CommentKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Block" => Some(CommentKind::Block),
            "Line" => Some(CommentKind::Line),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CommentKind::Block => "Block",
            CommentKind::Line => "Line",
        }
    }
}

/// A comment as reported by the parser. `value` excludes the delimiters.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub kind: CommentKind,
    pub value: String,
    pub loc: Option<SourceLocation>,
    pub range: Option<TextRange>,
}

impl Comment {
    /// Doc comments start with `*`, as in `/** ... */`.
    pub fn is_doc(&self) -> bool {
        self.value.starts_with('*')
    }

    pub fn end_line(&self) -> Option<u32> {
        self.loc.as_ref().map(|loc| loc.end.line)
    }
}

/// One `@tag {param} optName` annotation found in a doc comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// The kind of comment the directive came from.
    pub kind: CommentKind,
    pub tag: String,
    pub param: String,
    /// Empty when the directive names nothing.
    pub opt_name: String,
    /// The matched text, normalized to start with `* `.
    pub raw_text: String,
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{} {{{}}}", self.tag, self.param)?;
        if !self.opt_name.is_empty() {
            write!(f, " {}", self.opt_name)?;
        }
        Ok(())
    }
}

/// Tag name to the nodes carrying a directive with that tag, in discovery
/// order. A node appears once per matching directive.
pub type DirectiveIndex = OrderedMap<String, Vec<NodeId>>;

#[cfg(test)]
mod tests {
    use super::*;
    use marv_core::text::Position;

    #[test]
    fn test_doc_comment_detection() {
        let doc = Comment {
            kind: CommentKind::Block,
            value: "* @kind {foo} bar ".to_string(),
            loc: Some(SourceLocation::new(None, Position::new(1, 0), Position::new(2, 3))),
            range: None,
        };
        assert!(doc.is_doc());
        assert_eq!(doc.end_line(), Some(2));

        let plain = Comment {
            kind: CommentKind::Line,
            value: " just a note".to_string(),
            loc: None,
            range: None,
        };
        assert!(!plain.is_doc());
        assert_eq!(plain.end_line(), None);
    }

    #[test]
    fn test_directive_display() {
        let directive = Directive {
            kind: CommentKind::Block,
            tag: "param".to_string(),
            param: "number".to_string(),
            opt_name: "x".to_string(),
            raw_text: "* @param {number} x".to_string(),
        };
        assert_eq!(directive.to_string(), "@param {number} x");
        assert_eq!(CommentKind::from_str("Line"), Some(CommentKind::Line));
    }
}
