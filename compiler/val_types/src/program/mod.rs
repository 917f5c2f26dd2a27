//! The typed program.
//!
//! [`TypedProgram`] merges the scoped syntax arena with the semantic
//! property tables into one immutable structure. It is built exactly once,
//! after every module type checked successfully, and only read afterwards:
//! consumers see it through [`TypedNode`] projections and the capture
//! queries in [`captures`].
//!
//! Construction validates the tables against the arena. Which checks run is
//! selected by [`ValidationMode`]; a violation is a [`ConstructionError`].

pub mod captures;

use std::fmt;

use val_ir::ast::{ModuleDeclId, NameExprId};
use val_ir::{
    AnyDeclId, AnyExprId, AnyNodeId, Ast, DeclIdentity, NodeIdentity, ScopeIdentity, ScopedProgram,
};

use crate::pool::TypePool;
use crate::relations::TypeRelations;
use crate::tables::PropertyTables;
use crate::ty::{TraitType, Type, TypeId};
use crate::typed_node::{Projected, TypedNode};

/// Which construction checks run.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum ValidationMode {
    /// Every table is checked for totality and for keys outside the arena.
    #[default]
    Full,
    /// Only the declared type of every module is checked.
    ModulesOnly,
}

/// Construction options.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ProgramConfig {
    pub validation: ValidationMode,
}

impl ProgramConfig {
    #[must_use]
    pub fn with_validation(mut self, validation: ValidationMode) -> Self {
        self.validation = validation;
        self
    }
}

/// Tables that don't describe a successfully checked program.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConstructionError {
    #[error("module {module:?} was not successfully type checked")]
    UncheckedModule { module: ModuleDeclId },

    #[error("declaration {decl:?} has no type")]
    MissingDeclType { decl: AnyDeclId },

    #[error("expression {expr:?} has no type")]
    MissingExprType { expr: AnyExprId },

    #[error("name expression {expr:?} does not refer to any declaration")]
    UnresolvedName { expr: NameExprId },

    #[error("a property table refers to {id:?}, which is not a node of this program")]
    ForeignKey { id: AnyNodeId },
}

/// A type-checked program, ready to be lowered.
pub struct TypedProgram {
    scoped: ScopedProgram,
    pool: TypePool,
    pub(crate) tables: PropertyTables,
    relations: Box<dyn TypeRelations>,
}

impl TypedProgram {
    /// Annotate `program` with the results of type checking.
    ///
    /// # Panics
    ///
    /// Panics if the tables are not those of a successfully checked program.
    pub fn new(
        program: ScopedProgram,
        pool: TypePool,
        tables: PropertyTables,
        relations: Box<dyn TypeRelations>,
    ) -> Self {
        Self::with_config(program, pool, tables, relations, ProgramConfig::default())
    }

    /// Like [`TypedProgram::new`], returning the violated precondition
    /// instead of panicking.
    pub fn try_new(
        program: ScopedProgram,
        pool: TypePool,
        tables: PropertyTables,
        relations: Box<dyn TypeRelations>,
    ) -> Result<Self, ConstructionError> {
        Self::try_with_config(program, pool, tables, relations, ProgramConfig::default())
    }

    /// # Panics
    ///
    /// Panics if the checks selected by `config` fail.
    pub fn with_config(
        program: ScopedProgram,
        pool: TypePool,
        tables: PropertyTables,
        relations: Box<dyn TypeRelations>,
        config: ProgramConfig,
    ) -> Self {
        Self::try_with_config(program, pool, tables, relations, config).unwrap_or_else(|e| {
            tracing::error!(error = %e, "typed program construction failed");
            panic!("{e}")
        })
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(nodes = program.ast().len(), types = pool.len(), mode = ?config.validation)
    )]
    pub fn try_with_config(
        program: ScopedProgram,
        pool: TypePool,
        tables: PropertyTables,
        relations: Box<dyn TypeRelations>,
        config: ProgramConfig,
    ) -> Result<Self, ConstructionError> {
        check_modules(program.ast(), &pool, &tables)?;
        if config.validation == ValidationMode::Full {
            check_keys(program.ast(), &tables)?;
            check_totality(program.ast(), &tables)?;
        }
        tracing::debug!("typed program constructed");
        Ok(TypedProgram {
            scoped: program,
            pool,
            tables,
            relations,
        })
    }

    /// Project `id` onto this program.
    #[inline]
    pub fn node<I: NodeIdentity>(&self, id: I) -> TypedNode<'_, I> {
        TypedNode::new(id, self)
    }

    /// Project each identity of `ids`, lazily and in order.
    pub fn nodes<I>(&self, ids: I) -> Projected<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: NodeIdentity,
    {
        Projected::new(ids.into_iter(), self)
    }

    #[inline]
    pub fn ast(&self) -> &Ast {
        self.scoped.ast()
    }

    #[inline]
    pub fn scoped(&self) -> &ScopedProgram {
        &self.scoped
    }

    #[inline]
    pub fn pool(&self) -> &TypePool {
        &self.pool
    }

    #[inline]
    pub fn relations(&self) -> &dyn TypeRelations {
        &*self.relations
    }

    /// Modules in insertion order.
    pub fn modules(
        &self,
    ) -> Projected<'_, std::iter::Copied<std::slice::Iter<'_, ModuleDeclId>>> {
        self.nodes(self.ast().modules().iter().copied())
    }

    /// The core library, if one was loaded.
    pub fn core_library(&self) -> Option<TypedNode<'_, ModuleDeclId>> {
        self.ast().core_library().map(|m| self.node(m))
    }

    /// Whether `lhs` is a subtype of `rhs`.
    pub fn is_subtype(&self, lhs: TypeId, rhs: TypeId) -> bool {
        self.relations.is_subtype(lhs, rhs)
    }

    /// Whether `ty` conforms to `trait_type` through a conformance visible
    /// from `scope`.
    pub fn conforms<S: ScopeIdentity>(&self, ty: TypeId, trait_type: TraitType, scope: S) -> bool {
        let ty = self.relations.canonical(ty);
        self.scoped
            .scope_ancestors(scope.to_scope())
            .any(|s| self.relations.conforms(ty, trait_type, s))
    }

    pub fn canonical(&self, ty: TypeId) -> TypeId {
        self.relations.canonical(ty)
    }
}

impl fmt::Debug for TypedProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedProgram")
            .field("nodes", &self.ast().len())
            .field("modules", &self.ast().modules())
            .field("types", &self.pool.len())
            .finish_non_exhaustive()
    }
}

/// Report a broken construction contract and abort.
#[cold]
#[track_caller]
pub(crate) fn contract_violation(message: impl fmt::Display) -> ! {
    tracing::error!(%message, "typed program contract violated");
    panic!("typed program contract violated: {message}")
}

fn check_modules(
    ast: &Ast,
    pool: &TypePool,
    tables: &PropertyTables,
) -> Result<(), ConstructionError> {
    for &module in ast.modules() {
        let ty = tables.decl_types.get(&module.to_decl());
        if !ty.and_then(|&t| pool.get(t)).is_some_and(Type::is_module) {
            return Err(ConstructionError::UncheckedModule { module });
        }
    }
    Ok(())
}

fn check_key<I: NodeIdentity>(ast: &Ast, id: I) -> Result<(), ConstructionError> {
    if ast.contains(id) {
        Ok(())
    } else {
        Err(ConstructionError::ForeignKey { id: id.to_any() })
    }
}

fn check_keys(ast: &Ast, tables: &PropertyTables) -> Result<(), ConstructionError> {
    for (&unit, imports) in &tables.imports {
        check_key(ast, unit)?;
        for &module in imports {
            check_key(ast, module)?;
        }
    }
    for &decl in tables.decl_types.keys() {
        check_key(ast, decl)?;
    }
    for &expr in tables.expr_types.keys() {
        check_key(ast, expr)?;
    }
    for (&decl, captures) in &tables.implicit_captures {
        check_key(ast, decl)?;
        for capture in captures {
            check_key(ast, capture.decl)?;
        }
    }
    for (&decl, environment) in &tables.environments {
        check_key(ast, decl)?;
        for &parameter in &environment.parameters {
            check_key(ast, parameter)?;
        }
    }
    for (&module, decls) in &tables.synthesized_decls {
        check_key(ast, module)?;
        for synthesized in decls {
            check_key(ast, synthesized.id)?;
            check_key(ast, synthesized.scope)?;
        }
    }
    for (&name, reference) in &tables.referred_decls {
        check_key(ast, name)?;
        check_key(ast, reference.decl())?;
    }
    for (&sequence, folded) in &tables.folded_sequence_exprs {
        check_key(ast, sequence)?;
        for operand in folded.operands() {
            check_key(ast, operand)?;
        }
    }
    Ok(())
}

fn check_totality(ast: &Ast, tables: &PropertyTables) -> Result<(), ConstructionError> {
    for decl in ast.ids_of::<AnyDeclId>() {
        if !tables.decl_types.contains_key(&decl) {
            return Err(ConstructionError::MissingDeclType { decl });
        }
    }
    for expr in ast.ids_of::<AnyExprId>() {
        if !tables.expr_types.contains_key(&expr) {
            return Err(ConstructionError::MissingExprType { expr });
        }
    }
    for name in ast.ids_of::<NameExprId>() {
        if !tables.referred_decls.contains_key(&name) {
            return Err(ConstructionError::UnresolvedName { expr: name });
        }
    }
    Ok(())
}
