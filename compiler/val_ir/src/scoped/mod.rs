//! Scope tree and binding tables.
//!
//! [`ScopedProgram`] owns the syntax arena together with the tables produced
//! by scope resolution: the parent of every scope, the declarations each
//! scope owns, the scope of every declaration and name expression, and the
//! binding declaration introducing every variable.
//!
//! The tables are either derived from the arena by the structural resolver
//! ([`ScopedProgram::new`]) or supplied by an external resolver
//! ([`ScopedProgram::from_parts`]). Both paths validate well-formedness
//! before a program is handed out, and the tables are never mutated again
//! except to register synthesized declarations.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::ast::{
    BindingDeclId, NameExprId, SynthesizedDecl, SynthesizedDeclId, VarDeclId,
};
use crate::visitor::{walk, Visitor};
use crate::{
    AnyDeclId, AnyNodeId, AnyScopeId, Ast, DeclIdentity, NodeIdentity, NodeKind, ScopeIdentity,
    Span,
};

/// Scope-resolution output, keyed by node identity.
#[derive(Clone, Debug, Default)]
pub struct ScopeTables {
    /// Parent of every scope except modules.
    pub scope_to_parent: FxHashMap<AnyScopeId, AnyScopeId>,
    /// Declarations owned by each scope, in source order.
    pub scope_to_decls: FxHashMap<AnyScopeId, Vec<AnyDeclId>>,
    /// Scope of every declaration. A module is its own scope.
    pub decl_to_scope: FxHashMap<AnyDeclId, AnyScopeId>,
    /// Scope in which each name expression is looked up.
    pub expr_to_scope: FxHashMap<NameExprId, AnyScopeId>,
    /// Binding declaration introducing each variable.
    pub var_to_binding: FxHashMap<VarDeclId, BindingDeclId>,
}

/// Ill-formed scope tables.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScopeError {
    #[error("scope {scope:?} is its own ancestor")]
    ScopeCycle { scope: AnyScopeId },

    #[error("scope {scope:?} has no parent and is not a module")]
    OrphanScope { scope: AnyScopeId },

    #[error("{decl:?} is listed in {listed_in:?} but scoped in {scoped_in:?}")]
    DeclScopeMismatch {
        decl: AnyDeclId,
        listed_in: AnyScopeId,
        scoped_in: Option<AnyScopeId>,
    },

    #[error("declaration {decl:?} has no scope")]
    UnscopedDecl { decl: AnyDeclId },

    #[error("variable {var:?} is not introduced by any binding declaration")]
    UnboundVariable { var: VarDeclId },

    #[error("{id:?} claims kind {claimed} but the arena holds a {found} at that index")]
    KindMismatch {
        id: AnyNodeId,
        claimed: NodeKind,
        found: NodeKind,
    },

    #[error("{id:?} does not belong to the syntax arena")]
    ForeignNode { id: AnyNodeId },
}

/// A syntax arena with validated scope and binding tables.
#[derive(Clone, Debug)]
pub struct ScopedProgram {
    ast: Ast,
    tables: ScopeTables,
}

impl ScopedProgram {
    /// Resolve the scope structure of `ast`.
    ///
    /// Declarations are scoped in the innermost enclosing scope, with these
    /// consequences of the arena's shape: variables are scoped where their
    /// binding declaration is, a lambda's underlying function is scoped where
    /// the lambda expression appears, and subscript implementations are
    /// scoped in their bundle.
    #[tracing::instrument(level = "debug", skip_all, fields(nodes = ast.len(), modules = ast.modules().len()))]
    pub fn new(ast: Ast) -> Result<Self, ScopeError> {
        let mut resolver = Resolver::default();
        for &module in ast.modules() {
            let scope = module.to_scope();
            resolver.tables.decl_to_scope.insert(module.to_decl(), scope);
            resolver.enter(&ast, scope);
        }
        tracing::debug!(
            scopes = resolver.tables.scope_to_decls.len(),
            decls = resolver.tables.decl_to_scope.len(),
            "scope resolution complete"
        );
        Self::from_parts(ast, resolver.tables)
    }

    /// Accept tables produced by an external resolver.
    pub fn from_parts(ast: Ast, tables: ScopeTables) -> Result<Self, ScopeError> {
        validate(&ast, &tables)?;
        Ok(ScopedProgram { ast, tables })
    }

    #[inline]
    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    #[inline]
    pub fn tables(&self) -> &ScopeTables {
        &self.tables
    }

    pub fn into_parts(self) -> (Ast, ScopeTables) {
        (self.ast, self.tables)
    }

    /// Parent of `scope`, or `None` for a module.
    pub fn scope_parent(&self, scope: AnyScopeId) -> Option<AnyScopeId> {
        self.tables.scope_to_parent.get(&scope).copied()
    }

    /// `scope` followed by each of its ancestors, ending at a module.
    pub fn scope_ancestors(&self, scope: AnyScopeId) -> impl Iterator<Item = AnyScopeId> + '_ {
        std::iter::successors(Some(scope), |&s| self.scope_parent(s))
    }

    /// Declarations owned by `scope`, in source order.
    pub fn scope_decls(&self, scope: AnyScopeId) -> &[AnyDeclId] {
        self.tables
            .scope_to_decls
            .get(&scope)
            .map_or(&[], Vec::as_slice)
    }

    pub fn decl_scope<D: DeclIdentity>(&self, decl: D) -> Option<AnyScopeId> {
        self.tables.decl_to_scope.get(&decl.to_decl()).copied()
    }

    pub fn expr_scope(&self, expr: NameExprId) -> Option<AnyScopeId> {
        self.tables.expr_to_scope.get(&expr).copied()
    }

    pub fn var_binding(&self, var: VarDeclId) -> Option<BindingDeclId> {
        self.tables.var_to_binding.get(&var).copied()
    }

    /// Append a declaration materialized by the type checker, scoped in
    /// `scope`.
    ///
    /// The declaration takes the next identity of the arena and is not listed
    /// among the scope's source declarations.
    pub fn insert_synthesized(&mut self, decl: SynthesizedDecl, scope: AnyScopeId) -> SynthesizedDeclId {
        let id = self.ast.insert(decl, Span::DUMMY);
        self.tables.decl_to_scope.insert(id.to_decl(), scope);
        tracing::trace!(?id, ?scope, "registered synthesized declaration");
        id
    }
}

/// Structural scope resolver.
#[derive(Default)]
struct Resolver {
    tables: ScopeTables,
    scopes: Vec<AnyScopeId>,
    bindings: Vec<BindingDeclId>,
}

impl Resolver {
    fn enter(&mut self, ast: &Ast, scope: AnyScopeId) {
        self.scopes.push(scope);
        walk(self, ast, scope.to_any());
        self.scopes.pop();
    }

    fn declare(&mut self, decl: AnyDeclId) {
        if let Some(&scope) = self.scopes.last() {
            self.tables.decl_to_scope.insert(decl, scope);
            self.tables.scope_to_decls.entry(scope).or_default().push(decl);
        }
    }
}

impl Visitor for Resolver {
    fn visit(&mut self, ast: &Ast, id: AnyNodeId) {
        if let Some(decl) = id.narrow::<AnyDeclId>() {
            self.declare(decl);
        }
        if let Some(var) = id.narrow::<VarDeclId>() {
            if let Some(&binding) = self.bindings.last() {
                self.tables.var_to_binding.insert(var, binding);
            }
        }
        if let Some(name) = id.narrow::<NameExprId>() {
            if let Some(&scope) = self.scopes.last() {
                self.tables.expr_to_scope.insert(name, scope);
            }
        }

        let binding = id.narrow::<BindingDeclId>();
        if let Some(binding) = binding {
            self.bindings.push(binding);
        }
        match id.narrow::<AnyScopeId>() {
            Some(scope) => {
                if let Some(&parent) = self.scopes.last() {
                    self.tables.scope_to_parent.insert(scope, parent);
                }
                self.enter(ast, scope);
            }
            None => walk(self, ast, id),
        }
        if binding.is_some() {
            self.bindings.pop();
        }
    }
}

fn check_node<I: NodeIdentity>(ast: &Ast, id: I) -> Result<(), ScopeError> {
    match ast.kind_of(id) {
        None => Err(ScopeError::ForeignNode { id: id.to_any() }),
        Some(found) if found != id.kind() => Err(ScopeError::KindMismatch {
            id: id.to_any(),
            claimed: id.kind(),
            found,
        }),
        Some(_) => Ok(()),
    }
}

#[tracing::instrument(level = "debug", skip_all)]
fn validate(ast: &Ast, tables: &ScopeTables) -> Result<(), ScopeError> {
    for (&scope, &parent) in &tables.scope_to_parent {
        check_node(ast, scope)?;
        check_node(ast, parent)?;
    }
    for (&scope, decls) in &tables.scope_to_decls {
        check_node(ast, scope)?;
        for &decl in decls {
            check_node(ast, decl)?;
            let scoped_in = tables.decl_to_scope.get(&decl).copied();
            if scoped_in != Some(scope) {
                return Err(ScopeError::DeclScopeMismatch {
                    decl,
                    listed_in: scope,
                    scoped_in,
                });
            }
        }
    }
    for (&decl, &scope) in &tables.decl_to_scope {
        check_node(ast, decl)?;
        check_node(ast, scope)?;
    }
    for (&expr, &scope) in &tables.expr_to_scope {
        check_node(ast, expr)?;
        check_node(ast, scope)?;
    }
    for (&var, &binding) in &tables.var_to_binding {
        check_node(ast, var)?;
        check_node(ast, binding)?;
    }

    // Every parent chain must reach a module. Scopes already known to
    // terminate are not walked again.
    let mut rooted: FxHashSet<AnyScopeId> = FxHashSet::default();
    for scope in ast.ids_of::<AnyScopeId>() {
        let mut chain = Vec::new();
        let mut seen = FxHashSet::default();
        let mut current = scope;
        loop {
            if rooted.contains(&current) {
                break;
            }
            if !seen.insert(current) {
                return Err(ScopeError::ScopeCycle { scope: current });
            }
            chain.push(current);
            match tables.scope_to_parent.get(&current) {
                Some(&parent) => current = parent,
                None if current.kind() == NodeKind::ModuleDecl => break,
                None => return Err(ScopeError::OrphanScope { scope: current }),
            }
        }
        rooted.extend(chain);
    }

    for decl in ast.ids_of::<AnyDeclId>() {
        if !tables.decl_to_scope.contains_key(&decl) {
            return Err(ScopeError::UnscopedDecl { decl });
        }
    }
    for var in ast.ids_of::<VarDeclId>() {
        if !tables.var_to_binding.contains_key(&var) {
            return Err(ScopeError::UnboundVariable { var });
        }
    }
    Ok(())
}
