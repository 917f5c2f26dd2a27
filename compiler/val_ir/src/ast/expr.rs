//! Expression nodes.

use crate::ast::{FunctionDeclId, NameExprId};
use crate::{AnyExprId, Name};

/// Qualification of a name expression.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NameExprDomain {
    /// Unqualified: `x`.
    None,
    /// Implicit member: `.x`.
    Implicit,
    /// Qualified by a value or type expression: `a.x`.
    Expr(AnyExprId),
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct NameExpr {
    pub domain: NameExprDomain,
    pub name: Name,
}

/// Integer literal; the interned source text.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct IntegerLiteralExpr {
    pub value: Name,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct BooleanLiteralExpr {
    pub value: bool,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct StringLiteralExpr {
    pub value: Name,
}

/// One `operator operand` step after the head of a sequence.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct SequenceElement {
    pub operator: NameExprId,
    pub operand: AnyExprId,
}

/// Unparenthesized chain of infix operators, `a + b * c`, as parsed.
///
/// Precedence is not resolved by the parser; the folded tree is stored by
/// the type checker.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct SequenceExpr {
    pub head: AnyExprId,
    pub tail: Vec<SequenceElement>,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct CallArgument {
    pub label: Option<Name>,
    pub value: AnyExprId,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FunctionCallExpr {
    pub callee: AnyExprId,
    pub arguments: Vec<CallArgument>,
}

/// Anonymous function; the underlying declaration carries parameters,
/// captures and body.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct LambdaExpr {
    pub decl: FunctionDeclId,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TupleElement {
    pub label: Option<Name>,
    pub value: AnyExprId,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TupleExpr {
    pub elements: Vec<TupleElement>,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct MapElement {
    pub key: AnyExprId,
    pub value: AnyExprId,
}

/// `[k1: v1, k2: v2]`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MapLiteralExpr {
    pub elements: Vec<MapElement>,
}
