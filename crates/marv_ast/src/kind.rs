//! ESTree node type tags.

use crate::types::NodeCategory;
use std::fmt;

macro_rules! node_kinds {
    ($($variant:ident => $category:ident),* $(,)?) => {
        /// The `type` tag of every supported ESTree node.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum NodeKind {
            $($variant),*
        }

        impl NodeKind {
            /// Every supported kind, in declaration order.
            pub const ALL: &'static [NodeKind] = &[$(NodeKind::$variant),*];

            /// Look up the kind for an ESTree `type` tag.
            pub fn from_tag(tag: &str) -> Option<NodeKind> {
                match tag {
                    $(stringify!($variant) => Some(NodeKind::$variant),)*
                    _ => None,
                }
            }

            /// The ESTree `type` tag.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(NodeKind::$variant => stringify!($variant)),*
                }
            }

            pub fn category(self) -> NodeCategory {
                match self {
                    $(NodeKind::$variant => NodeCategory::$category),*
                }
            }
        }
    };
}

node_kinds! {
    Program => PROGRAM,

    // Statements
    BlockStatement => STATEMENT,
    EmptyStatement => STATEMENT,
    ExpressionStatement => STATEMENT,
    IfStatement => STATEMENT,
    LabeledStatement => STATEMENT,
    BreakStatement => STATEMENT,
    ContinueStatement => STATEMENT,
    SwitchStatement => STATEMENT,
    ReturnStatement => STATEMENT,
    ThrowStatement => STATEMENT,
    TryStatement => STATEMENT,
    WhileStatement => STATEMENT,
    DoWhileStatement => STATEMENT,
    ForStatement => STATEMENT,
    ForInStatement => STATEMENT,
    DebuggerStatement => STATEMENT,

    // Declarations
    VariableDeclaration => DECLARATION,
    FunctionDeclaration => DECLARATION,

    // Expressions
    Identifier => EXPRESSION,
    Literal => EXPRESSION,
    ThisExpression => EXPRESSION,
    ArrayExpression => EXPRESSION,
    ObjectExpression => EXPRESSION,
    FunctionExpression => EXPRESSION,
    UnaryExpression => EXPRESSION,
    UpdateExpression => EXPRESSION,
    BinaryExpression => EXPRESSION,
    LogicalExpression => EXPRESSION,
    AssignmentExpression => EXPRESSION,
    ConditionalExpression => EXPRESSION,
    CallExpression => EXPRESSION,
    NewExpression => EXPRESSION,
    MemberExpression => EXPRESSION,
    SequenceExpression => EXPRESSION,

    // Parts of other nodes
    VariableDeclarator => NONE,
    Property => NONE,
    SwitchCase => CLAUSE,
    CatchClause => CLAUSE,
}

impl NodeKind {
    pub fn is_expression(self) -> bool {
        self.category().contains(NodeCategory::EXPRESSION)
    }

    /// Declarations count as statements: they appear in statement lists.
    pub fn is_statement(self) -> bool {
        self.category()
            .intersects(NodeCategory::STATEMENT | NodeCategory::DECLARATION)
    }

    pub fn is_declaration(self) -> bool {
        self.category().contains(NodeCategory::DECLARATION)
    }

    /// Whether doc comments may be attached to nodes of this kind.
    pub fn accepts_comments(self) -> bool {
        self.category().intersects(NodeCategory::COMMENT_TARGET)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip() {
        for &kind in NodeKind::ALL {
            assert_eq!(NodeKind::from_tag(kind.as_str()), Some(kind));
        }
        assert_eq!(NodeKind::from_tag("ClassDeclaration"), None);
        assert_eq!(NodeKind::from_tag("ArrowFunctionExpression"), None);
    }

    #[test]
    fn test_comment_eligibility() {
        assert!(NodeKind::VariableDeclaration.accepts_comments());
        assert!(NodeKind::ReturnStatement.accepts_comments());
        assert!(!NodeKind::VariableDeclarator.accepts_comments());
        assert!(!NodeKind::Identifier.accepts_comments());
        assert!(!NodeKind::Program.accepts_comments());
        assert!(!NodeKind::CatchClause.accepts_comments());
    }

    #[test]
    fn test_categories() {
        assert!(NodeKind::FunctionDeclaration.is_statement());
        assert!(NodeKind::FunctionDeclaration.is_declaration());
        assert!(!NodeKind::FunctionExpression.is_statement());
        assert!(NodeKind::Identifier.is_expression());
        assert!(!NodeKind::Property.is_expression());
    }
}
