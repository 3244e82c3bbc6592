//! Identifiers, flags and operator types for the AST.

use std::fmt;

// ============================================================================
// Node, declaration and scope identity
// ============================================================================

/// Unique id of a node within one translation unit, assigned in pre-order
/// by the translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Id carried by nodes that were synthesized by a pass.
    pub const INVALID: NodeId = NodeId(u32::MAX);

    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Index of a declaration in the resolver's declaration arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(pub u32);

impl DeclId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a scope created by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub u32);

impl ScopeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// ============================================================================
// Declaration kinds
// ============================================================================

/// How a name was introduced.
///
/// Variable declarations only ever carry `Var`, `Let` or `Const`; the other
/// kinds are produced by the resolver for function names, parameters and
/// catch parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Var,
    Let,
    Const,
    Argument,
    Function,
    Catch,
}

impl DeclKind {
    /// Parse the `kind` field of an ESTree `VariableDeclaration`.
    pub fn from_variable_kind(s: &str) -> Option<Self> {
        match s {
            "var" => Some(DeclKind::Var),
            "let" => Some(DeclKind::Let),
            "const" => Some(DeclKind::Const),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DeclKind::Var => "var",
            DeclKind::Let => "let",
            DeclKind::Const => "const",
            DeclKind::Argument => "argument",
            DeclKind::Function => "function",
            DeclKind::Catch => "catch",
        }
    }

    /// `let` and `const` bind in the current block scope.
    pub fn is_block_scoped(self) -> bool {
        matches!(self, DeclKind::Let | DeclKind::Const | DeclKind::Catch)
    }

    pub fn is_const(self) -> bool {
        self == DeclKind::Const
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Node categories
// ============================================================================

bitflags::bitflags! {
    /// Broad grouping of node kinds.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NodeCategory: u8 {
        const NONE        = 0;
        const EXPRESSION  = 1 << 0;
        const STATEMENT   = 1 << 1;
        const DECLARATION = 1 << 2;
        const CLAUSE      = 1 << 3;
        const PROGRAM     = 1 << 4;

        /// Kinds that may receive attached doc comments.
        const COMMENT_TARGET = Self::STATEMENT.bits() | Self::DECLARATION.bits();
    }
}

// ============================================================================
// Operators
// ============================================================================

macro_rules! operator_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),*
        }

        impl $name {
            pub fn from_str(s: &str) -> Option<Self> {
                match s {
                    $($text => Some($name::$variant),)*
                    _ => None,
                }
            }

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

operator_enum!(
    BinaryOperator {
        Equal => "==",
        NotEqual => "!=",
        StrictEqual => "===",
        StrictNotEqual => "!==",
        LessThan => "<",
        LessThanEqual => "<=",
        GreaterThan => ">",
        GreaterThanEqual => ">=",
        LeftShift => "<<",
        RightShift => ">>",
        UnsignedRightShift => ">>>",
        Add => "+",
        Subtract => "-",
        Multiply => "*",
        Divide => "/",
        Remainder => "%",
        BitwiseOr => "|",
        BitwiseXor => "^",
        BitwiseAnd => "&",
        In => "in",
        Instanceof => "instanceof",
    }
);

operator_enum!(
    LogicalOperator {
        Or => "||",
        And => "&&",
    }
);

operator_enum!(
    AssignmentOperator {
        Assign => "=",
        AddAssign => "+=",
        SubtractAssign => "-=",
        MultiplyAssign => "*=",
        DivideAssign => "/=",
        RemainderAssign => "%=",
        LeftShiftAssign => "<<=",
        RightShiftAssign => ">>=",
        UnsignedRightShiftAssign => ">>>=",
        BitwiseOrAssign => "|=",
        BitwiseXorAssign => "^=",
        BitwiseAndAssign => "&=",
    }
);

operator_enum!(
    UnaryOperator {
        Minus => "-",
        Plus => "+",
        Not => "!",
        BitwiseNot => "~",
        Typeof => "typeof",
        Void => "void",
        Delete => "delete",
    }
);

operator_enum!(
    UpdateOperator {
        Increment => "++",
        Decrement => "--",
    }
);

impl UnaryOperator {
    /// Keyword operators need a space before their operand.
    pub fn is_keyword(self) -> bool {
        matches!(self, UnaryOperator::Typeof | UnaryOperator::Void | UnaryOperator::Delete)
    }
}

/// The kind of an object literal property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Init,
    Get,
    Set,
}

impl PropertyKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "init" => Some(PropertyKind::Init),
            "get" => Some(PropertyKind::Get),
            "set" => Some(PropertyKind::Set),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PropertyKind::Init => "init",
            PropertyKind::Get => "get",
            PropertyKind::Set => "set",
        }
    }
}
