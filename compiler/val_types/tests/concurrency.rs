//! A finished program is shared by parallel readers.

mod common;

use std::sync::Arc;

use common::{check, finish, Source};
use pretty_assertions::assert_eq;
use rayon::prelude::*;
use val_ir::ast::{FunctionBody, FunctionDeclId};
use val_ir::{AnyDeclId, AnyExprId, AnyScopeId};
use val_types::{
    CaptureMode, DeclReference, DeclView, ExprView, ImplicitCapture, ScopeView, TypeId,
    TypedNode, TypedProgram,
};

/// `count` functions, each capturing the global before it implicitly.
fn program(count: usize) -> (TypedProgram, Vec<FunctionDeclId>) {
    let mut src = Source::new();
    let (global, global_var) = src.let_binding("global", None);
    let mut functions = Vec::new();
    let mut uses = Vec::new();
    for i in 0..count {
        let use_site = src.name_expr("global");
        let body = Some(FunctionBody::Expr(use_site.into()));
        let f = src.function(&format!("f{i}"), Vec::new(), None, body);
        functions.push(f);
        uses.push(use_site);
    }
    let mut decls: Vec<AnyDeclId> = vec![global.into()];
    decls.extend(functions.iter().map(|&f| AnyDeclId::from(f)));
    let _ = src.module("Main", decls);
    let (scoped, interner) = src.resolve();

    let program = finish(check(scoped, |builder| {
        for (&f, &use_site) in functions.iter().zip(&uses) {
            builder.set_referred_decl(use_site, DeclReference::Direct(global_var.into()));
            builder.set_implicit_captures(
                f,
                vec![ImplicitCapture {
                    name: interner.intern("global"),
                    ty: TypeId::INT,
                    decl: global_var.into(),
                    mode: CaptureMode::ByValue,
                }],
            );
        }
    }));
    (program, functions)
}

type Summary = (AnyDeclId, TypeId, AnyScopeId, Vec<AnyDeclId>);

fn summarize(node: TypedNode<'_, FunctionDeclId>) -> Summary {
    (
        node.id().into(),
        node.declared_type(),
        node.scope().id(),
        node.captures().map(TypedNode::id).collect(),
    )
}

#[test]
fn parallel_readers_agree_with_a_sequential_one() {
    let (program, functions) = program(64);
    let sequential: Vec<Summary> = functions
        .iter()
        .map(|&f| summarize(program.node(f)))
        .collect();
    let parallel: Vec<Summary> = functions
        .par_iter()
        .map(|&f| summarize(program.node(f)))
        .collect();
    assert_eq!(parallel, sequential);
}

#[test]
fn program_moves_across_threads() {
    let (program, functions) = program(8);
    let program = Arc::new(program);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let program = Arc::clone(&program);
            let functions = functions.clone();
            std::thread::spawn(move || {
                let exprs: usize = program
                    .ast()
                    .ids_of::<AnyExprId>()
                    .filter(|&e| program.node(e).ty() == TypeId::INT)
                    .count();
                let decls = program
                    .modules()
                    .flat_map(|m| m.top_level_decls())
                    .count();
                (exprs, decls, functions.len())
            })
        })
        .collect();
    for handle in handles {
        let (exprs, decls, functions) = handle
            .join()
            .unwrap_or_else(|_| panic!("reader panicked"));
        assert_eq!(exprs, functions);
        assert_eq!(decls, functions + 1);
    }
    let module = program.modules().next().map(|m| m.decls().len());
    assert_eq!(module, Some(0));
}
