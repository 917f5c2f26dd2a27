//! Shared helpers for `val_types` integration tests.
//!
//! [`Source`] builds arenas the way a parser would; [`check`] plays the type
//! checker, typing every node and handing the builder to the test for the
//! properties it cares about.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::sync::Once;

use val_ir::ast::{
    AccessEffect, BindingDecl, BindingDeclId, BindingIntroducer, BindingPattern, BraceStmt,
    BraceStmtId, DeclStmt, ExprStmt, FunctionBody, FunctionDecl, FunctionDeclId, ModuleDecl,
    ModuleDeclId, NameExpr, NameExprDomain, NameExprId, NamePattern, ParameterDecl,
    ParameterDeclId, TranslationUnit, TranslationUnitId, VarDecl, VarDeclId,
};
use val_ir::{
    AnyDeclId, AnyExprId, AnyStmtId, Ast, Name, ScopedProgram, Span, StmtIdentity,
    StringInterner,
};
use val_types::{ProgramBuilder, RelationTable, Type, TypeId, TypePool, TypedProgram};

static TRACING_INIT: Once = Once::new();

/// Install a hierarchical subscriber when `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(EnvFilter::from_default_env())
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .init();
        }
    });
}

/// An arena under construction.
pub struct Source {
    pub ast: Ast,
    pub interner: StringInterner,
    offset: u32,
}

impl Source {
    pub fn new() -> Self {
        init_tracing();
        Source {
            ast: Ast::new(),
            interner: StringInterner::new(),
            offset: 0,
        }
    }

    pub fn name(&self, text: &str) -> Name {
        self.interner.intern(text)
    }

    /// A fresh non-empty span, after every span handed out so far.
    pub fn span(&mut self) -> Span {
        let start = self.offset;
        self.offset += 4;
        Span::new(start, start + 3)
    }

    pub fn name_expr(&mut self, text: &str) -> NameExprId {
        self.qualified(NameExprDomain::None, text)
    }

    pub fn qualified(&mut self, domain: NameExprDomain, text: &str) -> NameExprId {
        let name = self.name(text);
        let span = self.span();
        self.ast.insert(NameExpr { domain, name }, span)
    }

    /// `let <text> = <initializer>`
    pub fn let_binding(
        &mut self,
        text: &str,
        initializer: Option<AnyExprId>,
    ) -> (BindingDeclId, VarDeclId) {
        let name = self.name(text);
        let span = self.span();
        let var = self.ast.insert(VarDecl { name }, span);
        let pattern = self.ast.insert(NamePattern { decl: var }, span);
        let pattern = self.ast.insert(
            BindingPattern { introducer: BindingIntroducer::Let, subpattern: pattern.into() },
            span,
        );
        let binding = self.ast.insert(BindingDecl { pattern, initializer }, span);
        (binding, var)
    }

    pub fn parameter(&mut self, text: &str, convention: AccessEffect) -> ParameterDeclId {
        let name = self.name(text);
        let span = self.span();
        self.ast.insert(ParameterDecl { label: None, name, convention }, span)
    }

    pub fn block(&mut self, stmts: Vec<AnyStmtId>) -> BraceStmtId {
        let span = self.span();
        self.ast.insert(BraceStmt { stmts }, span)
    }

    pub fn expr_stmt(&mut self, expr: impl Into<AnyExprId>) -> AnyStmtId {
        let span = self.span();
        self.ast.insert(ExprStmt { expr: expr.into() }, span).to_stmt()
    }

    pub fn decl_stmt(&mut self, decl: impl Into<AnyDeclId>) -> AnyStmtId {
        let span = self.span();
        self.ast.insert(DeclStmt { decl: decl.into() }, span).to_stmt()
    }

    pub fn function(
        &mut self,
        text: &str,
        explicit_captures: Vec<BindingDeclId>,
        receiver: Option<ParameterDeclId>,
        body: Option<FunctionBody>,
    ) -> FunctionDeclId {
        let name = Some(self.name(text));
        let span = self.span();
        self.ast.insert(
            FunctionDecl {
                name,
                generic_parameters: Vec::new(),
                explicit_captures,
                receiver,
                parameters: Vec::new(),
                body,
            },
            span,
        )
    }

    /// A module with a single translation unit holding `decls`.
    pub fn module(&mut self, text: &str, decls: Vec<AnyDeclId>) -> (ModuleDeclId, TranslationUnitId) {
        let span = self.span();
        let unit = self.ast.insert(TranslationUnit { decls }, span);
        let name = self.name(text);
        let module = self.ast.insert(ModuleDecl { name, sources: vec![unit] }, span);
        (module, unit)
    }

    pub fn resolve(self) -> (ScopedProgram, StringInterner) {
        let scoped = ScopedProgram::new(self.ast).unwrap_or_else(|e| panic!("{e}"));
        (scoped, self.interner)
    }
}

/// Type every declaration and expression of `scoped` with `Int` (modules
/// with their module type), then let `annotate` fill in the rest.
pub fn check(
    scoped: ScopedProgram,
    annotate: impl FnOnce(&mut ProgramBuilder),
) -> ProgramBuilder {
    let mut builder = ProgramBuilder::new(scoped, TypePool::new());
    let decls: Vec<AnyDeclId> = builder.scoped().ast().ids_of().collect();
    let exprs: Vec<AnyExprId> = builder.scoped().ast().ids_of().collect();
    let modules = builder.scoped().ast().modules().to_vec();
    for decl in decls {
        builder.set_decl_type(decl, TypeId::INT);
    }
    for expr in exprs {
        builder.set_expr_type(expr, TypeId::INT);
    }
    for module in modules {
        let ty = builder.intern(Type::Module(module));
        builder.set_decl_type(module, ty);
    }
    annotate(&mut builder);
    builder
}

/// Finish `builder` with an empty relation table.
pub fn finish(builder: ProgramBuilder) -> TypedProgram {
    builder
        .finish(Box::new(RelationTable::new()))
        .unwrap_or_else(|e| panic!("{e}"))
}
