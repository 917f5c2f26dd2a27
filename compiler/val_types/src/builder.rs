//! Checker-side assembly of a typed program.
//!
//! The type checker owns a [`ProgramBuilder`] while it walks the arena. It
//! records every property it infers, materializes synthesized declarations,
//! and reports type errors against the module they occur in. Once checking
//! is over, [`ProgramBuilder::finish`] either yields the [`TypedProgram`] or,
//! if any module failed, the errors with a proof they were reported.

use std::collections::BTreeSet;

use val_diagnostic::ErrorGuaranteed;
use val_ir::ast::{
    ModuleDeclId, NameExprId, SequenceExprId, SynthesizedDecl as SynthesizedSyntax,
    SynthesizedDeclId, SynthesizedDeclKind, TranslationUnitId,
};
use val_ir::{AnyScopeId, DeclIdentity, ExprIdentity, ScopeIdentity, ScopedProgram};

use crate::environment::GenericEnvironment;
use crate::pool::TypePool;
use crate::program::{ConstructionError, ProgramConfig, TypedProgram};
use crate::relations::TypeRelations;
use crate::tables::{
    DeclReference, FoldedSequenceExpr, ImplicitCapture, PropertyTables, SynthesizedDecl,
};
use crate::ty::{Type, TypeId};
use crate::type_error::TypeError;

/// Why no typed program was produced.
#[derive(Debug, thiserror::Error)]
pub enum CheckFailure {
    /// At least one module failed to type check.
    #[error("{} module(s) failed to type check with {} error(s)", failed_modules.len(), errors.len())]
    TypeErrors {
        errors: Vec<TypeError>,
        failed_modules: BTreeSet<ModuleDeclId>,
        guarantee: ErrorGuaranteed,
    },

    /// Checking succeeded but left the tables incomplete.
    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

/// Single-writer accumulator for the results of type checking.
pub struct ProgramBuilder {
    scoped: ScopedProgram,
    pool: TypePool,
    tables: PropertyTables,
    errors: Vec<TypeError>,
    failed: BTreeSet<ModuleDeclId>,
    config: ProgramConfig,
}

impl ProgramBuilder {
    pub fn new(scoped: ScopedProgram, pool: TypePool) -> Self {
        ProgramBuilder {
            scoped,
            pool,
            tables: PropertyTables::default(),
            errors: Vec::new(),
            failed: BTreeSet::new(),
            config: ProgramConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ProgramConfig) -> Self {
        self.config = config;
        self
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
    pub fn pool_mut(&mut self) -> &mut TypePool {
        &mut self.pool
    }

    /// Intern `ty` in the program's pool.
    pub fn intern(&mut self, ty: Type) -> TypeId {
        self.pool.intern(ty)
    }

    pub fn set_decl_type<D: DeclIdentity>(&mut self, decl: D, ty: TypeId) {
        self.tables.decl_types.insert(decl.to_decl(), ty);
    }

    pub fn set_expr_type<E: ExprIdentity>(&mut self, expr: E, ty: TypeId) {
        self.tables.expr_types.insert(expr.to_expr(), ty);
    }

    /// Record that `unit` imports `module`.
    pub fn add_import(&mut self, unit: TranslationUnitId, module: ModuleDeclId) {
        self.tables.imports.entry(unit).or_default().insert(module);
    }

    /// Record the implicit captures of a function or subscript bundle, in
    /// the order they were found.
    pub fn set_implicit_captures<D: DeclIdentity>(
        &mut self,
        decl: D,
        captures: Vec<ImplicitCapture>,
    ) {
        self.tables.implicit_captures.insert(decl.to_decl(), captures);
    }

    pub fn set_environment<D: DeclIdentity>(&mut self, decl: D, environment: GenericEnvironment) {
        self.tables.environments.insert(decl.to_decl(), environment);
    }

    pub fn set_referred_decl(&mut self, name: NameExprId, reference: DeclReference) {
        self.tables.referred_decls.insert(name, reference);
    }

    pub fn set_folded(&mut self, sequence: SequenceExprId, folded: FoldedSequenceExpr) {
        self.tables.folded_sequence_exprs.insert(sequence, folded);
    }

    /// Materialize a declaration of `module`, scoped in `scope`, with type
    /// `ty`.
    pub fn synthesize<S: ScopeIdentity>(
        &mut self,
        module: ModuleDeclId,
        kind: SynthesizedDeclKind,
        ty: TypeId,
        scope: S,
    ) -> SynthesizedDeclId {
        let scope: AnyScopeId = scope.to_scope();
        let id = self
            .scoped
            .insert_synthesized(SynthesizedSyntax { kind }, scope);
        self.tables.decl_types.insert(id.to_decl(), ty);
        self.tables
            .synthesized_decls
            .entry(module)
            .or_default()
            .push(SynthesizedDecl { id, kind, ty, scope });
        tracing::trace!(?module, ?id, ?kind, "synthesized declaration");
        id
    }

    /// Report `error`, marking `module` as failed.
    pub fn report(&mut self, module: ModuleDeclId, error: TypeError) {
        tracing::debug!(?module, kind = ?error.kind, "type error");
        self.failed.insert(module);
        self.errors.push(error);
    }

    /// Errors reported so far, in order.
    pub fn errors(&self) -> &[TypeError] {
        &self.errors
    }

    pub fn has_failed(&self, module: ModuleDeclId) -> bool {
        self.failed.contains(&module)
    }

    /// Give up on checking and take the accumulated state apart.
    pub fn into_parts(self) -> (ScopedProgram, TypePool, PropertyTables) {
        (self.scoped, self.pool, self.tables)
    }

    /// Merge the accumulated tables into a typed program.
    ///
    /// Fails without constructing anything if a module reported an error.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(errors = self.errors.len(), failed = self.failed.len())
    )]
    pub fn finish(self, relations: Box<dyn TypeRelations>) -> Result<TypedProgram, CheckFailure> {
        if let Some(guarantee) = ErrorGuaranteed::from_error_count(self.errors.len()) {
            return Err(CheckFailure::TypeErrors {
                errors: self.errors,
                failed_modules: self.failed,
                guarantee,
            });
        }
        let program =
            TypedProgram::try_with_config(self.scoped, self.pool, self.tables, relations, self.config)?;
        Ok(program)
    }
}

#[cfg(test)]
mod tests;
