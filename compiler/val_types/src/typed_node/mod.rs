//! Typed-node projections.
//!
//! A [`TypedNode`] bundles a node identity with the [`TypedProgram`] it
//! belongs to, and answers both syntactic questions (through the arena) and
//! semantic ones (through the property tables). Projections are `Copy`,
//! borrow the program, and compare by identity alone.
//!
//! Accessors are grouped by the identity they apply to:
//! - every identity: [`TypedNode::kind`], [`TypedNode::span`], casts
//! - scopes: [`ScopeView`]
//! - declarations: [`DeclView`]
//! - expressions: [`ExprView`]
//! - patterns: [`PatternView`]
//! - specific kinds: inherent methods on `TypedNode<'_, Id<N>>`
//!
//! Properties that construction guarantees to be total panic if the entry is
//! missing; everything else returns `Option`.

mod concrete;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::Copied;
use std::slice;

use val_ir::ast::NamePatternId;
use val_ir::{
    AnyDeclId, AnyNodeId, AnyScopeId, AstNode, DeclIdentity, ExprIdentity, Id, NodeIdentity,
    NodeKind, PatternIdentity, ScopeIdentity, Span,
};

pub use concrete::{FunctionBodyView, NameDomain, TypedDeclRef};

use crate::environment::GenericEnvironment;
use crate::program::{contract_violation, TypedProgram};
use crate::tables::ImplicitCapture;
use crate::ty::TypeId;

/// A node of a [`TypedProgram`], with its semantic properties.
pub struct TypedNode<'p, I> {
    id: I,
    program: &'p TypedProgram,
}

impl<'p, I: NodeIdentity> TypedNode<'p, I> {
    #[inline]
    pub(crate) fn new(id: I, program: &'p TypedProgram) -> Self {
        TypedNode { id, program }
    }

    #[inline]
    pub fn id(self) -> I {
        self.id
    }

    #[inline]
    pub fn kind(self) -> NodeKind {
        self.id.kind()
    }

    #[inline]
    pub fn program(self) -> &'p TypedProgram {
        self.program
    }

    pub fn span(self) -> Span {
        self.program.ast().span(self.id)
    }

    /// The same node under identity type `J`, or `None` if its kind is not
    /// admitted by `J`.
    pub fn cast<J: NodeIdentity>(self) -> Option<TypedNode<'p, J>> {
        self.id.narrow::<J>().map(|id| TypedNode::new(id, self.program))
    }

    /// The same node under a wider identity type.
    pub fn widen<J: NodeIdentity + From<I>>(self) -> TypedNode<'p, J> {
        TypedNode::new(J::from(self.id), self.program)
    }

    /// Project another node of the same program.
    #[inline]
    pub fn project<J: NodeIdentity>(self, id: J) -> TypedNode<'p, J> {
        TypedNode::new(id, self.program)
    }

    /// Project each identity of `ids`, lazily and in order.
    pub fn project_all<It>(self, ids: It) -> Projected<'p, It::IntoIter>
    where
        It: IntoIterator,
        It::Item: NodeIdentity,
    {
        Projected::new(ids.into_iter(), self.program)
    }

    /// Direct syntactic children, in source order.
    pub fn children(self) -> Projected<'p, smallvec::IntoIter<[AnyNodeId; 8]>> {
        self.project_all(self.program.ast().children(self.id))
    }
}

impl<'p, N: AstNode> TypedNode<'p, Id<N>> {
    /// The syntax of this node.
    #[inline]
    pub fn syntax(self) -> &'p N {
        &self.program.ast()[self.id]
    }
}

impl<I: Copy> Clone for TypedNode<'_, I> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: Copy> Copy for TypedNode<'_, I> {}

impl<I: PartialEq> PartialEq for TypedNode<'_, I> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<I: Eq> Eq for TypedNode<'_, I> {}

impl<I: Hash> Hash for TypedNode<'_, I> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<I: fmt::Debug> fmt::Debug for TypedNode<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypedNode({:?})", self.id)
    }
}

/// Lazy projection of a sequence of identities.
#[derive(Clone)]
pub struct Projected<'p, It> {
    ids: It,
    program: &'p TypedProgram,
}

impl<'p, It> Projected<'p, It> {
    pub(crate) fn new(ids: It, program: &'p TypedProgram) -> Self {
        Projected { ids, program }
    }
}

impl<'p, It> Iterator for Projected<'p, It>
where
    It: Iterator,
    It::Item: NodeIdentity,
{
    type Item = TypedNode<'p, It::Item>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.ids.next().map(|id| TypedNode::new(id, self.program))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl<It> DoubleEndedIterator for Projected<'_, It>
where
    It: DoubleEndedIterator,
    It::Item: NodeIdentity,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ids.next_back().map(|id| TypedNode::new(id, self.program))
    }
}

impl<It> ExactSizeIterator for Projected<'_, It>
where
    It: ExactSizeIterator,
    It::Item: NodeIdentity,
{
}

/// Projected declarations of a scope.
pub type ProjectedDecls<'p> = Projected<'p, Copied<slice::Iter<'p, AnyDeclId>>>;

/// Accessors of scope nodes.
pub trait ScopeView<'p> {
    /// The enclosing scope; `None` for a module.
    fn parent(self) -> Option<TypedNode<'p, AnyScopeId>>;

    /// Declarations directly owned by this scope, in source order.
    fn decls(self) -> ProjectedDecls<'p>;
}

impl<'p, I: ScopeIdentity> ScopeView<'p> for TypedNode<'p, I> {
    fn parent(self) -> Option<TypedNode<'p, AnyScopeId>> {
        let scope = self.id.to_scope();
        self.program
            .scoped()
            .scope_parent(scope)
            .map(|p| self.project(p))
    }

    fn decls(self) -> ProjectedDecls<'p> {
        let program = self.program;
        let decls = program.scoped().scope_decls(self.id.to_scope());
        Projected::new(decls.iter().copied(), program)
    }
}

/// Accessors of declaration nodes.
pub trait DeclView<'p> {
    /// The scope containing this declaration.
    fn scope(self) -> TypedNode<'p, AnyScopeId>;

    /// The overarching type of the declared entity.
    fn declared_type(self) -> TypeId;

    /// Implicit captures, for functions and subscript bundles.
    fn implicit_captures(self) -> Option<&'p [ImplicitCapture]>;

    /// Generic environment, for generic declarations.
    fn environment(self) -> Option<&'p GenericEnvironment>;
}

impl<'p, I: DeclIdentity> DeclView<'p> for TypedNode<'p, I> {
    fn scope(self) -> TypedNode<'p, AnyScopeId> {
        match self.program.scoped().decl_scope(self.id) {
            Some(scope) => self.project(scope),
            None => contract_violation(format_args!("{:?} has no scope", self.id)),
        }
    }

    fn declared_type(self) -> TypeId {
        match self.program.tables.decl_types.get(&self.id.to_decl()) {
            Some(&ty) => ty,
            None => contract_violation(format_args!("{:?} has no type", self.id)),
        }
    }

    fn implicit_captures(self) -> Option<&'p [ImplicitCapture]> {
        let program = self.program;
        program
            .tables
            .implicit_captures
            .get(&self.id.to_decl())
            .map(Vec::as_slice)
    }

    fn environment(self) -> Option<&'p GenericEnvironment> {
        let program = self.program;
        program.tables.environments.get(&self.id.to_decl())
    }
}

/// Accessors of expression nodes.
pub trait ExprView<'p> {
    /// The type of this expression.
    fn ty(self) -> TypeId;
}

impl<'p, I: ExprIdentity> ExprView<'p> for TypedNode<'p, I> {
    fn ty(self) -> TypeId {
        match self.program.tables.expr_types.get(&self.id.to_expr()) {
            Some(&ty) => ty,
            None => contract_violation(format_args!("{:?} has no type", self.id)),
        }
    }
}

/// Accessors of pattern nodes.
pub trait PatternView<'p> {
    /// Names introduced by this pattern, left to right, each with its path
    /// of tuple-element indices.
    fn names(self) -> Vec<(Vec<usize>, TypedNode<'p, NamePatternId>)>;
}

impl<'p, I: PatternIdentity> PatternView<'p> for TypedNode<'p, I> {
    fn names(self) -> Vec<(Vec<usize>, TypedNode<'p, NamePatternId>)> {
        self.program
            .ast()
            .names(self.id)
            .into_iter()
            .map(|name| (name.path, self.project(name.pattern)))
            .collect()
    }
}
