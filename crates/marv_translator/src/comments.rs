//! Doc comment attachment and directive parsing.
//!
//! Doc comments (those whose text starts with `*`) are indexed by the line
//! they end on. A statement or declaration starting on line `L` takes the
//! comments ending on `L - 1` and then those ending on `L`; taken comments
//! leave the index, so no comment attaches to two nodes. Whatever is left
//! once the whole tree has been translated belongs to the program.

use crate::error::TranslateError;
use lazy_static::lazy_static;
use marv_ast::{Comment, Directive, DirectiveIndex, NodeId};
use marv_core::collections::MultiMap;
use regex::Regex;
use tracing::{debug, trace};

lazy_static! {
    /// `@tag {param} optName`. Spaces and tabs may separate the parts.
    static ref DIRECTIVE_PATTERN: Regex =
        Regex::new(r"@([A-Za-z0-9_]*)[ \t]*\{([^}]*)\}[ \t]*([A-Za-z0-9_]*)")
            .expect("directive pattern is valid");
}

/// Parse every directive in a comment, in order of appearance.
pub fn parse_directives(comment: &Comment) -> Vec<Directive> {
    DIRECTIVE_PATTERN
        .captures_iter(&comment.value)
        .map(|caps| Directive {
            kind: comment.kind,
            tag: caps[1].to_string(),
            param: caps[2].to_string(),
            opt_name: caps[3].to_string(),
            raw_text: format!("* {}", &caps[0]),
        })
        .collect()
}

/// Per-file comment index. Lives for the duration of one translation.
#[derive(Debug, Default)]
pub struct CommentAttacher {
    unattached: MultiMap<u32, Comment>,
    directive_index: DirectiveIndex,
}

impl CommentAttacher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the doc comments among `comments`. Other comments are dropped.
    pub fn add_comments(&mut self, comments: Vec<Comment>) -> Result<(), TranslateError> {
        for comment in comments {
            debug!(value = %comment.value, "examining comment");
            if !comment.is_doc() {
                trace!("not a doc comment");
                continue;
            }
            let line = comment
                .end_line()
                .ok_or_else(|| TranslateError::MissingCommentLocation {
                    text: comment.value.clone(),
                })?;
            trace!(line, "doc comment indexed");
            self.unattached.insert(line, comment);
        }
        Ok(())
    }

    /// Take the comments documenting a node that starts on `start_line`.
    pub fn take_for_line(&mut self, start_line: u32) -> Vec<Comment> {
        let mut taken = Vec::new();
        if start_line > 0 {
            let previous = self.unattached.remove(&(start_line - 1));
            if !previous.is_empty() {
                debug!(line = start_line - 1, count = previous.len(), "attaching comments from previous line");
                taken.extend(previous);
            }
        }
        let same = self.unattached.remove(&start_line);
        if !same.is_empty() {
            debug!(line = start_line, count = same.len(), "attaching comments from same line");
            taken.extend(same);
        }
        taken
    }

    /// Parse the directives of `comments`, which now belong to `node`, and
    /// record the node in the tag index once per directive.
    pub fn record(&mut self, node: NodeId, comments: &[Comment]) -> Vec<Directive> {
        let directives: Vec<Directive> = comments.iter().flat_map(parse_directives).collect();
        for directive in &directives {
            self.directive_index
                .get_or_default(directive.tag.clone())
                .push(node);
        }
        directives
    }

    /// Remove every comment still in the index, sorted by position.
    pub fn take_unattached(&mut self) -> Vec<Comment> {
        let mut rest = self.unattached.drain_values();
        rest.sort_by_key(|c| {
            (
                c.loc.as_ref().map(|l| (l.start, l.end)),
                c.range.map(|r| r.pos),
            )
        });
        rest
    }

    pub fn into_directive_index(self) -> DirectiveIndex {
        self.directive_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marv_ast::CommentKind;
    use marv_core::text::{Position, SourceLocation};

    fn doc(value: &str, start_line: u32, end_line: u32) -> Comment {
        Comment {
            kind: CommentKind::Block,
            value: value.to_string(),
            loc: Some(SourceLocation::new(
                None,
                Position::new(start_line, 0),
                Position::new(end_line, 3),
            )),
            range: None,
        }
    }

    #[test]
    fn test_parse_single_directive() {
        let directives = parse_directives(&doc("* @kind {foo} bar ", 1, 1));
        assert_eq!(directives.len(), 1);
        let d = &directives[0];
        assert_eq!(d.tag, "kind");
        assert_eq!(d.param, "foo");
        assert_eq!(d.opt_name, "bar");
        assert_eq!(d.raw_text, "* @kind {foo} bar");
        assert_eq!(d.kind, CommentKind::Block);
    }

    #[test]
    fn test_parse_multiple_directives() {
        let text = "*\n * @param {number} x\n * @param {string}   label\n * @return {boolean}\n ";
        let directives = parse_directives(&doc(text, 1, 5));
        let tags: Vec<_> = directives
            .iter()
            .map(|d| (d.tag.as_str(), d.param.as_str(), d.opt_name.as_str()))
            .collect();
        assert_eq!(
            tags,
            vec![
                ("param", "number", "x"),
                ("param", "string", "label"),
                ("return", "boolean", ""),
            ]
        );
    }

    #[test]
    fn test_parse_is_idempotent() {
        let comment = doc("* @type {Array<{a: number}>} items", 1, 1);
        assert_eq!(parse_directives(&comment), parse_directives(&comment));
    }

    #[test]
    fn test_no_directive_in_plain_doc() {
        assert!(parse_directives(&doc("* Just documentation. ", 1, 1)).is_empty());
    }

    #[test]
    fn test_take_previous_then_same_line() {
        let mut attacher = CommentAttacher::new();
        attacher
            .add_comments(vec![
                doc("* same", 4, 4),
                doc("* above", 2, 3),
                doc("* far", 1, 1),
            ])
            .unwrap();

        let taken = attacher.take_for_line(4);
        let values: Vec<_> = taken.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["* above", "* same"]);

        assert!(attacher.take_for_line(4).is_empty());
        let rest = attacher.take_unattached();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].value, "* far");
    }

    #[test]
    fn test_non_doc_comments_are_ignored() {
        let mut attacher = CommentAttacher::new();
        let mut line = doc(" plain", 1, 1);
        line.kind = CommentKind::Line;
        line.loc = None;
        attacher.add_comments(vec![line]).unwrap();
        assert!(attacher.take_unattached().is_empty());
    }

    #[test]
    fn test_doc_comment_without_location_is_fatal() {
        let mut attacher = CommentAttacher::new();
        let mut comment = doc("* @kind {x}", 1, 1);
        comment.loc = None;
        let err = attacher.add_comments(vec![comment]).unwrap_err();
        assert!(matches!(err, TranslateError::MissingCommentLocation { .. }));
    }

    #[test]
    fn test_record_indexes_tags() {
        let mut attacher = CommentAttacher::new();
        let comments = vec![doc("* @export {a} @kind {b}", 1, 1)];
        let directives = attacher.record(NodeId(3), &comments);
        assert_eq!(directives.len(), 2);
        attacher.record(NodeId(7), &[doc("* @kind {c}", 5, 5)]);

        let index = attacher.into_directive_index();
        assert_eq!(index.get("kind"), Some(&vec![NodeId(3), NodeId(7)]));
        assert_eq!(index.get("export"), Some(&vec![NodeId(3)]));
        let tags: Vec<_> = index.keys().cloned().collect();
        assert_eq!(tags, vec!["export", "kind"]);
    }
}
