//! Statement nodes.

use crate::{AnyDeclId, AnyExprId, AnyStmtId};

/// `{ ... }`: a statement list opening a scope.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct BraceStmt {
    pub stmts: Vec<AnyStmtId>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ExprStmt {
    pub expr: AnyExprId,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct DeclStmt {
    pub decl: AnyDeclId,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ReturnStmt {
    pub value: Option<AnyExprId>,
}
