//! Accessors of specific node kinds.

use val_ir::ast::{
    BindingDeclId, BindingPatternId, BraceStmtId, FunctionBody, FunctionDeclId, LambdaExprId,
    MapLiteralExprId, ModuleDeclId, NameExprDomain, NameExprId, ParameterDeclId,
    SequenceExprId, SubscriptDeclId, SubscriptImplId, TranslationUnitId, VarDeclId,
};
use val_ir::{AnyDeclId, AnyExprId, AnyScopeId, NodeIdentity};

use super::{Projected, TypedNode};
use crate::program::captures::Captures;
use crate::program::contract_violation;
use crate::tables::{DeclReference, FoldedSequenceExpr, SynthesizedDecl};

/// Qualification of a name expression.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NameDomain<'p> {
    None,
    /// The name denotes a member of an implicit type: `.x`.
    Implicit,
    /// The name is qualified by a value or type expression.
    Expr(TypedNode<'p, AnyExprId>),
}

/// The declaration a name expression refers to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypedDeclRef<'p> {
    Direct(TypedNode<'p, AnyDeclId>),
    /// A member bound to the implicit receiver.
    Member(TypedNode<'p, AnyDeclId>),
}

impl<'p> TypedDeclRef<'p> {
    pub fn decl(self) -> TypedNode<'p, AnyDeclId> {
        match self {
            TypedDeclRef::Direct(d) | TypedDeclRef::Member(d) => d,
        }
    }

    pub fn is_member(self) -> bool {
        matches!(self, TypedDeclRef::Member(_))
    }
}

/// Body of a function or subscript implementation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FunctionBodyView<'p> {
    Expr(TypedNode<'p, AnyExprId>),
    Block(TypedNode<'p, BraceStmtId>),
}

impl<'p, I: NodeIdentity> TypedNode<'p, I> {
    fn body_view(self, body: Option<FunctionBody>) -> Option<FunctionBodyView<'p>> {
        body.map(|body| match body {
            FunctionBody::Expr(expr) => FunctionBodyView::Expr(self.project(expr)),
            FunctionBody::Block(block) => FunctionBodyView::Block(self.project(block)),
        })
    }
}

impl<'p> TypedNode<'p, ModuleDeclId> {
    /// Declarations of every translation unit, in source order.
    pub fn top_level_decls(self) -> impl Iterator<Item = TypedNode<'p, AnyDeclId>> + 'p {
        let program = self.program;
        program
            .ast()
            .top_level_decls(self.id)
            .map(move |d| program.node(d))
    }

    /// Declarations the type checker materialized in this module.
    pub fn synthesized_decls(self) -> &'p [SynthesizedDecl] {
        let program = self.program;
        program
            .tables
            .synthesized_decls
            .get(&self.id)
            .map_or(&[], Vec::as_slice)
    }
}

impl<'p> TypedNode<'p, TranslationUnitId> {
    /// Imported modules, in declaration order of the modules.
    pub fn imports(self) -> impl Iterator<Item = TypedNode<'p, ModuleDeclId>> + 'p {
        let program = self.program;
        program
            .tables
            .imports
            .get(&self.id)
            .into_iter()
            .flatten()
            .map(move |&m| program.node(m))
    }
}

impl<'p> TypedNode<'p, VarDeclId> {
    /// The binding declaration introducing this variable.
    pub fn binding(self) -> TypedNode<'p, BindingDeclId> {
        match self.program.scoped().var_binding(self.id) {
            Some(binding) => self.project(binding),
            None => contract_violation(format_args!("{:?} has no binding", self.id)),
        }
    }
}

impl<'p> TypedNode<'p, BindingDeclId> {
    pub fn pattern(self) -> TypedNode<'p, BindingPatternId> {
        self.project(self.syntax().pattern)
    }

    pub fn initializer(self) -> Option<TypedNode<'p, AnyExprId>> {
        self.syntax().initializer.map(|e| self.project(e))
    }
}

impl<'p> TypedNode<'p, FunctionDeclId> {
    pub fn body(self) -> Option<FunctionBodyView<'p>> {
        self.body_view(self.syntax().body)
    }

    pub fn receiver(self) -> Option<TypedNode<'p, ParameterDeclId>> {
        self.syntax().receiver.map(|r| self.project(r))
    }

    pub fn parameters(self) -> impl Iterator<Item = TypedNode<'p, ParameterDeclId>> + 'p {
        self.project_all(self.syntax().parameters.iter().copied())
    }

    /// Captures in environment layout order.
    pub fn captures(self) -> Projected<'p, smallvec::IntoIter<[AnyDeclId; 4]>> {
        let captures: Captures = self.program.captures_of_function(self.id);
        self.project_all(captures)
    }
}

impl<'p> TypedNode<'p, SubscriptDeclId> {
    pub fn impls(self) -> impl Iterator<Item = TypedNode<'p, SubscriptImplId>> + 'p {
        self.project_all(self.syntax().impls.iter().copied())
    }

    pub fn captures(self) -> Projected<'p, smallvec::IntoIter<[AnyDeclId; 4]>> {
        self.project_all(self.program.captures_of_subscript(self.id))
    }
}

impl<'p> TypedNode<'p, SubscriptImplId> {
    /// The subscript declaration this implementation belongs to.
    pub fn bundle(self) -> TypedNode<'p, SubscriptDeclId> {
        let bundle = self
            .program
            .scoped()
            .decl_scope(self.id)
            .and_then(|s: AnyScopeId| s.narrow::<SubscriptDeclId>());
        match bundle {
            Some(bundle) => self.project(bundle),
            None => contract_violation(format_args!("{:?} is not scoped in a subscript", self.id)),
        }
    }

    pub fn body(self) -> Option<FunctionBodyView<'p>> {
        self.body_view(self.syntax().body)
    }

    /// Captures of the bundle.
    pub fn captures(self) -> Projected<'p, smallvec::IntoIter<[AnyDeclId; 4]>> {
        self.project_all(self.program.captures_of_subscript_impl(self.id))
    }
}

impl<'p> TypedNode<'p, NameExprId> {
    pub fn domain(self) -> NameDomain<'p> {
        match self.syntax().domain {
            NameExprDomain::None => NameDomain::None,
            NameExprDomain::Implicit => NameDomain::Implicit,
            NameExprDomain::Expr(expr) => NameDomain::Expr(self.project(expr)),
        }
    }

    /// The declaration this name refers to.
    pub fn referred_decl(self) -> TypedDeclRef<'p> {
        match self.program.tables.referred_decls.get(&self.id) {
            Some(&DeclReference::Direct(d)) => TypedDeclRef::Direct(self.project(d)),
            Some(&DeclReference::Member(d)) => TypedDeclRef::Member(self.project(d)),
            None => contract_violation(format_args!("{:?} was not resolved", self.id)),
        }
    }

    /// The scope in which the name is looked up.
    pub fn lookup_scope(self) -> Option<TypedNode<'p, AnyScopeId>> {
        self.program
            .scoped()
            .expr_scope(self.id)
            .map(|s| self.project(s))
    }
}

impl<'p> TypedNode<'p, SequenceExprId> {
    /// The sequence with operator precedence resolved.
    pub fn folded(self) -> Option<&'p FoldedSequenceExpr> {
        let program = self.program;
        program.tables.folded_sequence_exprs.get(&self.id)
    }
}

impl<'p> TypedNode<'p, MapLiteralExprId> {
    /// Key-value pairs, in source order.
    pub fn entries(
        self,
    ) -> impl Iterator<Item = (TypedNode<'p, AnyExprId>, TypedNode<'p, AnyExprId>)> + 'p {
        self.syntax()
            .elements
            .iter()
            .map(move |e| (self.project(e.key), self.project(e.value)))
    }
}

impl<'p> TypedNode<'p, LambdaExprId> {
    /// The function underlying the lambda.
    pub fn decl(self) -> TypedNode<'p, FunctionDeclId> {
        self.project(self.syntax().decl)
    }
}
