//! Operator precedence for parenthesization.
//!
//! An expression is wrapped in parentheses when its own precedence is lower
//! than the minimum its slot accepts, so printed code re-parses to the same
//! tree without the AST having to remember the original parentheses.

use marv_ast::{BinaryOperator, Expression, LogicalOperator, UpdateExpression};

/// Wrapper around a precedence value with total ordering.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct Prec(u8);

impl Prec {
    pub const LOWEST: Prec = Prec(0);

    pub const fn new(value: u8) -> Self {
        Prec(value)
    }

    pub const fn tighter(self) -> Self {
        Prec(self.0 + 1)
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

pub const SEQUENCE_PRECEDENCE: Prec = Prec::new(1);
/// Assignment; also the minimum for arguments, array elements and
/// initializers, where a bare comma would change meaning.
pub const ASSIGNMENT_PRECEDENCE: Prec = Prec::new(2);
pub const CONDITIONAL_PRECEDENCE: Prec = Prec::new(3);
pub const LOGICAL_OR_PRECEDENCE: Prec = Prec::new(4);
pub const PREFIX_PRECEDENCE: Prec = Prec::new(15);
pub const POSTFIX_PRECEDENCE: Prec = Prec::new(16);
/// Member access, calls and `new` with arguments.
pub const CALL_MEMBER_PRECEDENCE: Prec = Prec::new(18);
/// Identifiers, literals, `this`, array, object and function expressions.
pub const PRIMARY_PRECEDENCE: Prec = Prec::new(19);

#[derive(Clone, Copy, Debug)]
pub enum Side {
    Left,
    Right,
}

pub fn needs_parens(child_prec: Prec, min_prec: Prec) -> bool {
    child_prec < min_prec
}

pub fn binary_prec(op: BinaryOperator) -> Prec {
    use BinaryOperator::*;
    match op {
        BitwiseOr => Prec::new(6),
        BitwiseXor => Prec::new(7),
        BitwiseAnd => Prec::new(8),
        Equal | NotEqual | StrictEqual | StrictNotEqual => Prec::new(9),
        LessThan | LessThanEqual | GreaterThan | GreaterThanEqual | In | Instanceof => Prec::new(10),
        LeftShift | RightShift | UnsignedRightShift => Prec::new(11),
        Add | Subtract => Prec::new(12),
        Multiply | Divide | Remainder => Prec::new(13),
    }
}

pub fn logical_prec(op: LogicalOperator) -> Prec {
    match op {
        LogicalOperator::Or => LOGICAL_OR_PRECEDENCE,
        LogicalOperator::And => Prec::new(5),
    }
}

/// Every binary and logical operator here is left-associative, so the
/// right operand must bind tighter than the operator itself.
pub fn child_min_prec(prec: Prec, side: Side) -> Prec {
    match side {
        Side::Left => prec,
        Side::Right => prec.tighter(),
    }
}

fn update_prec(update: &UpdateExpression) -> Prec {
    if update.prefix {
        PREFIX_PRECEDENCE
    } else {
        POSTFIX_PRECEDENCE
    }
}

pub fn expr_prec(expr: &Expression) -> Prec {
    match expr {
        Expression::Sequence(_) => SEQUENCE_PRECEDENCE,
        Expression::Assignment(_) => ASSIGNMENT_PRECEDENCE,
        Expression::Conditional(_) => CONDITIONAL_PRECEDENCE,
        Expression::Logical(n) => logical_prec(n.operator),
        Expression::Binary(n) => binary_prec(n.operator),
        Expression::Unary(_) => PREFIX_PRECEDENCE,
        Expression::Update(n) => update_prec(n),
        Expression::Call(_) | Expression::New(_) | Expression::Member(_) => CALL_MEMBER_PRECEDENCE,
        Expression::Identifier(_)
        | Expression::Literal(_)
        | Expression::This(_)
        | Expression::Array(_)
        | Expression::Object(_)
        | Expression::Function(_) => PRIMARY_PRECEDENCE,
    }
}

/// Whether the printed form of `expr` begins with `function` or `{`, which
/// at the start of a statement would be read as a declaration or a block.
pub fn starts_with_function_or_brace(expr: &Expression) -> bool {
    match expr {
        Expression::Function(_) | Expression::Object(_) => true,
        Expression::Binary(n) => starts_with_function_or_brace(&n.left),
        Expression::Logical(n) => starts_with_function_or_brace(&n.left),
        Expression::Assignment(n) => starts_with_function_or_brace(&n.left),
        Expression::Conditional(n) => starts_with_function_or_brace(&n.test),
        Expression::Call(n) => starts_with_function_or_brace(&n.callee),
        Expression::Member(n) => starts_with_function_or_brace(&n.object),
        Expression::Update(n) if !n.prefix => starts_with_function_or_brace(&n.argument),
        Expression::Sequence(n) => n
            .expressions
            .first()
            .map_or(false, starts_with_function_or_brace),
        _ => false,
    }
}

/// Whether a call appears in the member chain of a `new` callee, where it
/// would otherwise be taken as the `new` expression's own arguments.
pub fn callee_contains_call(expr: &Expression) -> bool {
    match expr {
        Expression::Call(_) => true,
        Expression::Member(n) => callee_contains_call(&n.object),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(binary_prec(BinaryOperator::Multiply) > binary_prec(BinaryOperator::Add));
        assert!(binary_prec(BinaryOperator::BitwiseOr) > logical_prec(LogicalOperator::And));
        assert!(logical_prec(LogicalOperator::And) > logical_prec(LogicalOperator::Or));
        assert!(LOGICAL_OR_PRECEDENCE > CONDITIONAL_PRECEDENCE);
        assert!(PREFIX_PRECEDENCE > binary_prec(BinaryOperator::Remainder));
    }

    #[test]
    fn test_left_associativity() {
        let add = binary_prec(BinaryOperator::Subtract);
        assert!(!needs_parens(add, child_min_prec(add, Side::Left)));
        assert!(needs_parens(add, child_min_prec(add, Side::Right)));
    }
}
