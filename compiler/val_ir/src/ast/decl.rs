//! Declaration nodes.

use crate::ast::{
    BindingDeclId, BindingPatternId, BraceStmtId, GenericParameterDeclId, ParameterDeclId,
    SubscriptImplId, TranslationUnitId,
};
use crate::{AnyDeclId, AnyExprId, Name};

/// Access effect of a parameter, receiver or subscript implementation.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum AccessEffect {
    Let,
    Inout,
    Set,
    Sink,
}

impl AccessEffect {
    pub const fn keyword(self) -> &'static str {
        match self {
            AccessEffect::Let => "let",
            AccessEffect::Inout => "inout",
            AccessEffect::Set => "set",
            AccessEffect::Sink => "sink",
        }
    }
}

/// A module: the root scope of a set of translation units.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ModuleDecl {
    pub name: Name,
    pub sources: Vec<TranslationUnitId>,
}

/// A source file of a module.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TranslationUnit {
    pub decls: Vec<AnyDeclId>,
}

/// `import Name`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ImportDecl {
    pub name: Name,
}

/// `let (x, y) = pair`: a pattern introducing variables, with an optional
/// initializer.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct BindingDecl {
    pub pattern: BindingPatternId,
    pub initializer: Option<AnyExprId>,
}

/// A variable introduced by a name pattern inside a binding declaration.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct VarDecl {
    pub name: Name,
}

/// A parameter, or the implicit receiver of a member.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParameterDecl {
    pub label: Option<Name>,
    pub name: Name,
    pub convention: AccessEffect,
}

/// Body of a function or subscript implementation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FunctionBody {
    /// `fun f() -> Int { 42 }` written as a single expression.
    Expr(AnyExprId),
    Block(BraceStmtId),
}

/// A named function, method, or the declaration underlying a lambda.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FunctionDecl {
    /// `None` for lambdas.
    pub name: Option<Name>,
    pub generic_parameters: Vec<GenericParameterDeclId>,
    /// Capture list `[let a = x, inout b = y]`, left to right.
    pub explicit_captures: Vec<BindingDeclId>,
    /// Implicit `self` parameter of non-static members.
    pub receiver: Option<ParameterDeclId>,
    pub parameters: Vec<ParameterDeclId>,
    /// `None` for declarations without a body (requirements, externs).
    pub body: Option<FunctionBody>,
}

/// A subscript bundle: one declaration grouping several implementations
/// (`let`, `inout`, `set`, `sink`) that share parameters and captures.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct SubscriptDecl {
    pub name: Option<Name>,
    pub generic_parameters: Vec<GenericParameterDeclId>,
    pub explicit_captures: Vec<BindingDeclId>,
    pub receiver: Option<ParameterDeclId>,
    pub parameters: Vec<ParameterDeclId>,
    pub impls: Vec<SubscriptImplId>,
}

/// One implementation of a subscript bundle.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct SubscriptImpl {
    pub introducer: AccessEffect,
    pub body: Option<FunctionBody>,
}

/// A nominal product type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ProductTypeDecl {
    pub name: Name,
    pub generic_parameters: Vec<GenericParameterDeclId>,
    pub members: Vec<AnyDeclId>,
}

/// A trait and its requirements.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TraitDecl {
    pub name: Name,
    pub members: Vec<AnyDeclId>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct GenericParameterDecl {
    pub name: Name,
}

/// Operation a synthesized declaration implements.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum SynthesizedDeclKind {
    Deinitialize,
    MoveInitialization,
    MoveAssignment,
    Copy,
}

/// A declaration materialized by the type checker rather than parsed.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct SynthesizedDecl {
    pub kind: SynthesizedDeclKind,
}
