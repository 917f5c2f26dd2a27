//! Syntax arena.
//!
//! [`Ast`] stores every syntax node of a program in one append-only arena,
//! with a parallel array of source spans. Nodes refer to each other through
//! kind-tagged identities ([`Id<N>`](crate::Id) and the subset identities),
//! never through pointers, so the whole tree is a flat `Vec`.
//!
//! # Index Spaces
//!
//! - `nodes`/`spans`: parallel arrays indexed by the raw identity value
//! - `modules`: every [`ModuleDecl`] in insertion order

mod decl;
mod expr;
mod node;
mod pattern;
mod stmt;

use std::ops::Index;

use smallvec::SmallVec;

pub use decl::{
    AccessEffect, BindingDecl, FunctionBody, FunctionDecl, GenericParameterDecl, ImportDecl,
    ModuleDecl, ParameterDecl, ProductTypeDecl, SubscriptDecl, SubscriptImpl, SynthesizedDecl,
    SynthesizedDeclKind, TraitDecl, TranslationUnit, VarDecl,
};
pub use expr::{
    BooleanLiteralExpr, CallArgument, FunctionCallExpr, IntegerLiteralExpr, LambdaExpr,
    MapElement, MapLiteralExpr, NameExpr, NameExprDomain, SequenceElement, SequenceExpr,
    StringLiteralExpr, TupleElement, TupleExpr,
};
pub use node::*;
pub use pattern::{
    BindingIntroducer, BindingPattern, NamePattern, TuplePattern, TuplePatternElement,
    WildcardPattern,
};
pub use stmt::{BraceStmt, DeclStmt, ExprStmt, ReturnStmt};

use crate::stack::ensure_sufficient_stack;
use crate::{AnyDeclId, AnyNodeId, AnyPatternId, Id, NodeIdentity, NodeKind, Span};

/// Convert an arena length to a raw identity, panicking on overflow.
#[inline]
fn to_raw(len: usize) -> u32 {
    u32::try_from(len)
        .unwrap_or_else(|_| panic!("syntax arena overflow: {len} nodes exceed u32::MAX"))
}

/// A name bound by a pattern, with its position in the pattern.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct PatternName {
    /// Tuple-element indices leading from the root pattern to the name.
    pub path: Vec<usize>,
    pub pattern: NamePatternId,
}

/// Append-only arena of syntax nodes.
#[derive(Clone, Debug, Default)]
pub struct Ast {
    nodes: Vec<Node>,
    spans: Vec<Span>,
    modules: Vec<ModuleDeclId>,
    core_library: Option<ModuleDeclId>,
}

impl Ast {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an arena able to hold `capacity` nodes without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Ast {
            nodes: Vec::with_capacity(capacity),
            spans: Vec::with_capacity(capacity),
            modules: Vec::new(),
            core_library: None,
        }
    }

    /// Allocate a node of concrete kind `N`.
    pub fn insert<N: AstNode>(&mut self, node: N, span: Span) -> Id<N> {
        let any = self.insert_node(node.into_node(), span);
        Id::new(any.raw())
    }

    /// Allocate a node whose kind is only known at run time.
    pub fn insert_node(&mut self, node: Node, span: Span) -> AnyNodeId {
        let raw = to_raw(self.nodes.len());
        let kind = node.kind();
        self.nodes.push(node);
        self.spans.push(span);
        if kind == NodeKind::ModuleDecl {
            self.modules.push(Id::new(raw));
        }
        AnyNodeId::new(raw, kind)
    }

    /// The node denoted by `id`, if `id` belongs to this arena.
    pub fn get<N: AstNode>(&self, id: Id<N>) -> Option<&N> {
        self.nodes.get(id.index()).and_then(N::from_node)
    }

    /// The node denoted by any identity.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not allocated by this arena.
    #[inline]
    pub fn node<I: NodeIdentity>(&self, id: I) -> &Node {
        &self.nodes[id.index()]
    }

    /// Source span of a node; [`Span::DUMMY`] for synthesized nodes.
    #[inline]
    pub fn span<I: NodeIdentity>(&self, id: I) -> Span {
        self.spans[id.index()]
    }

    /// Kind of the node stored at `id`'s index, whatever kind `id` claims.
    pub fn kind_of<I: NodeIdentity>(&self, id: I) -> Option<NodeKind> {
        self.nodes.get(id.index()).map(Node::kind)
    }

    /// Whether `id` denotes a node of this arena with the kind it claims.
    pub fn contains<I: NodeIdentity>(&self, id: I) -> bool {
        self.kind_of(id) == Some(id.kind())
    }

    /// Number of allocated nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no nodes have been allocated.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every identity in allocation order.
    pub fn ids(&self) -> impl Iterator<Item = AnyNodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| AnyNodeId::new(to_raw(i), node.kind()))
    }

    /// Every identity admitted by `T`, in allocation order.
    pub fn ids_of<T: NodeIdentity>(&self) -> impl Iterator<Item = T> + '_ {
        self.ids().filter_map(T::from_any)
    }

    /// Modules in insertion order.
    pub fn modules(&self) -> &[ModuleDeclId] {
        &self.modules
    }

    pub fn core_library(&self) -> Option<ModuleDeclId> {
        self.core_library
    }

    /// Mark `module` as the core library.
    pub fn set_core_library(&mut self, module: ModuleDeclId) {
        self.core_library = Some(module);
    }

    /// Declarations of every translation unit of `module`, in source order.
    pub fn top_level_decls(&self, module: ModuleDeclId) -> impl Iterator<Item = AnyDeclId> + '_ {
        self[module]
            .sources
            .iter()
            .flat_map(move |&unit| self[unit].decls.iter().copied())
    }

    /// Names bound by `pattern`, left to right.
    pub fn names<P: NodeIdentity>(&self, pattern: P) -> Vec<PatternName> {
        let mut names = Vec::new();
        if let Some(root) = pattern.narrow::<AnyPatternId>() {
            let mut path = Vec::new();
            self.collect_names(root, &mut path, &mut names);
        }
        names
    }

    fn collect_names(
        &self,
        pattern: AnyPatternId,
        path: &mut Vec<usize>,
        out: &mut Vec<PatternName>,
    ) {
        ensure_sufficient_stack(|| match self.node(pattern) {
            Node::BindingPattern(p) => self.collect_names(p.subpattern, path, out),
            Node::NamePattern(_) => {
                if let Some(id) = pattern.narrow::<NamePatternId>() {
                    out.push(PatternName {
                        path: path.clone(),
                        pattern: id,
                    });
                }
            }
            Node::TuplePattern(p) => {
                for (i, element) in p.elements.iter().enumerate() {
                    path.push(i);
                    self.collect_names(element.pattern, path, out);
                    path.pop();
                }
            }
            _ => {}
        });
    }

    /// Direct syntactic children of a node, in source order.
    pub fn children<I: NodeIdentity>(&self, id: I) -> SmallVec<[AnyNodeId; 8]> {
        let mut out: SmallVec<[AnyNodeId; 8]> = SmallVec::new();
        match self.node(id) {
            Node::ModuleDecl(n) => out.extend(n.sources.iter().map(|&s| s.to_any())),
            Node::TranslationUnit(n) => out.extend(n.decls.iter().map(|&d| d.to_any())),
            Node::BindingDecl(n) => {
                out.push(n.pattern.to_any());
                out.extend(n.initializer.map(NodeIdentity::to_any));
            }
            Node::FunctionDecl(n) => {
                out.extend(n.generic_parameters.iter().map(|&p| p.to_any()));
                out.extend(n.explicit_captures.iter().map(|&c| c.to_any()));
                out.extend(n.receiver.map(NodeIdentity::to_any));
                out.extend(n.parameters.iter().map(|&p| p.to_any()));
                out.extend(n.body.map(body_id));
            }
            Node::SubscriptDecl(n) => {
                out.extend(n.generic_parameters.iter().map(|&p| p.to_any()));
                out.extend(n.explicit_captures.iter().map(|&c| c.to_any()));
                out.extend(n.receiver.map(NodeIdentity::to_any));
                out.extend(n.parameters.iter().map(|&p| p.to_any()));
                out.extend(n.impls.iter().map(|&i| i.to_any()));
            }
            Node::SubscriptImpl(n) => out.extend(n.body.map(body_id)),
            Node::ProductTypeDecl(n) => {
                out.extend(n.generic_parameters.iter().map(|&p| p.to_any()));
                out.extend(n.members.iter().map(|&m| m.to_any()));
            }
            Node::TraitDecl(n) => out.extend(n.members.iter().map(|&m| m.to_any())),
            Node::NameExpr(n) => {
                if let NameExprDomain::Expr(domain) = n.domain {
                    out.push(domain.to_any());
                }
            }
            Node::SequenceExpr(n) => {
                out.push(n.head.to_any());
                for element in &n.tail {
                    out.push(element.operator.to_any());
                    out.push(element.operand.to_any());
                }
            }
            Node::FunctionCallExpr(n) => {
                out.push(n.callee.to_any());
                out.extend(n.arguments.iter().map(|a| a.value.to_any()));
            }
            Node::LambdaExpr(n) => out.push(n.decl.to_any()),
            Node::TupleExpr(n) => out.extend(n.elements.iter().map(|e| e.value.to_any())),
            Node::MapLiteralExpr(n) => {
                for element in &n.elements {
                    out.push(element.key.to_any());
                    out.push(element.value.to_any());
                }
            }
            Node::BindingPattern(n) => out.push(n.subpattern.to_any()),
            Node::NamePattern(n) => out.push(n.decl.to_any()),
            Node::TuplePattern(n) => out.extend(n.elements.iter().map(|e| e.pattern.to_any())),
            Node::BraceStmt(n) => out.extend(n.stmts.iter().map(|&s| s.to_any())),
            Node::ExprStmt(n) => out.push(n.expr.to_any()),
            Node::DeclStmt(n) => out.push(n.decl.to_any()),
            Node::ReturnStmt(n) => out.extend(n.value.map(NodeIdentity::to_any)),
            Node::ImportDecl(_)
            | Node::VarDecl(_)
            | Node::ParameterDecl(_)
            | Node::GenericParameterDecl(_)
            | Node::SynthesizedDecl(_)
            | Node::IntegerLiteralExpr(_)
            | Node::BooleanLiteralExpr(_)
            | Node::StringLiteralExpr(_)
            | Node::WildcardPattern(_) => {}
        }
        out
    }
}

fn body_id(body: FunctionBody) -> AnyNodeId {
    match body {
        FunctionBody::Expr(expr) => expr.to_any(),
        FunctionBody::Block(block) => block.to_any(),
    }
}

impl<N: AstNode> Index<Id<N>> for Ast {
    type Output = N;

    /// # Panics
    ///
    /// Panics if `id` was not allocated by this arena.
    fn index(&self, id: Id<N>) -> &N {
        self.get(id)
            .unwrap_or_else(|| panic!("{id:?} does not denote a node of this arena"))
    }
}
