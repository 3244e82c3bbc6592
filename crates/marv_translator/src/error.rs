//! Structural translation errors.
//!
//! Any of these stops translation of the current file.

use marv_ast::{CapabilityError, NodeKind};
use marv_core::text::SourceLocation;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TranslateError {
    #[error("input is not an ESTree Program")]
    NotAProgram,

    #[error("node type `{tag}` is not handled{}", at(.loc))]
    UnhandledNodeKind {
        tag: String,
        loc: Option<SourceLocation>,
    },

    #[error("{kind} is missing required field `{field}`")]
    MissingField {
        kind: NodeKind,
        field: &'static str,
    },

    #[error("field `{field}` of {kind} is not a node")]
    NotANode {
        kind: NodeKind,
        field: &'static str,
    },

    #[error("doc comment `{text}` has no line information")]
    MissingCommentLocation { text: String },

    #[error("malformed comment: {reason}")]
    MalformedComment { reason: String },

    #[error("unsupported {kind}: {reason}")]
    UnsupportedConstruct { kind: NodeKind, reason: String },

    #[error("nesting deeper than {limit} nodes")]
    NestingTooDeep { limit: u32 },

    #[error(transparent)]
    Capability(#[from] CapabilityError),
}

fn at(loc: &Option<SourceLocation>) -> String {
    match loc {
        Some(loc) => format!(" at {}", loc),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marv_core::text::Position;
    use std::sync::Arc;

    #[test]
    fn test_messages_name_the_node() {
        let err = TranslateError::UnhandledNodeKind {
            tag: "ClassDeclaration".to_string(),
            loc: Some(SourceLocation::new(
                Some(Arc::from("a.js")),
                Position::new(1, 0),
                Position::new(1, 12),
            )),
        };
        assert_eq!(
            err.to_string(),
            "node type `ClassDeclaration` is not handled at a.js [1:0-1:12]"
        );

        let err = TranslateError::MissingField {
            kind: NodeKind::IfStatement,
            field: "test",
        };
        assert_eq!(err.to_string(), "IfStatement is missing required field `test`");

        let err: TranslateError = CapabilityError {
            kind: NodeKind::SwitchCase,
            expected: "a statement",
        }
        .into();
        assert_eq!(err.to_string(), "SwitchCase cannot be used as a statement");
    }
}
