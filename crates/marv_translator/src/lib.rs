//! marv_translator: ESTree JSON to typed AST.
//!
//! Reads the untyped tree an ESTree parser emits (with `comment`, `raw`,
//! `loc` and `range` enabled), attaches doc comments to the statements and
//! declarations they document, and builds the typed tree of `marv_ast`.

pub mod comments;
mod error;
mod translator;
mod utilities;

pub use comments::{parse_directives, CommentAttacher};
pub use error::TranslateError;
pub use translator::{translate, Translator, MAX_DEPTH, MIN_STACK_SIZE};
