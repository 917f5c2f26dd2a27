use pretty_assertions::assert_eq;
use val_diagnostic::ErrorCode;
use val_ir::ast::SynthesizedDeclKind;
use val_ir::{DeclIdentity, NodeIdentity, ScopeIdentity, Span};

use super::*;
use crate::constraint::{Constraint, LocatableConstraint};
use crate::fixture;
use crate::relations::RelationTable;
use crate::typed_node::DeclView;

fn stale(span: Span) -> TypeError {
    TypeError::stale_constraint(LocatableConstraint::new(
        Constraint::Equality { lhs: TypeId::INT, rhs: TypeId::BOOL },
        None,
        span,
    ))
}

#[test]
fn finish_without_errors_builds_the_program() {
    let (scoped, s) = fixture::syntax();
    let builder = fixture::typed_everywhere(scoped, &s);
    assert!(builder.errors().is_empty());
    assert!(!builder.has_failed(s.module));
    let program = builder.finish(Box::new(RelationTable::new()));
    assert!(program.is_ok());
}

#[test]
fn reported_errors_prevent_construction() {
    let (scoped, s) = fixture::syntax();
    let mut builder = fixture::typed_everywhere(scoped, &s);
    builder.report(s.module, stale(Span::new(1, 2)));
    assert!(builder.has_failed(s.module));

    match builder.finish(Box::new(RelationTable::new())) {
        Err(CheckFailure::TypeErrors { errors, failed_modules, .. }) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].kind.code(), ErrorCode::E9002);
            assert_eq!(failed_modules.into_iter().collect::<Vec<_>>(), vec![s.module]);
        }
        other => panic!("expected type errors, got {other:?}"),
    }
}

#[test]
fn incomplete_tables_surface_as_construction_errors() {
    let (scoped, s) = fixture::syntax();
    let builder = ProgramBuilder::new(scoped, TypePool::new());
    match builder.finish(Box::new(RelationTable::new())) {
        Err(CheckFailure::Construction(ConstructionError::UncheckedModule { module })) => {
            assert_eq!(module, s.module);
        }
        other => panic!("expected a construction error, got {other:?}"),
    }
}

#[test]
fn synthesized_decls_are_scoped_and_typed() {
    let (scoped, s) = fixture::syntax();
    let mut builder = fixture::typed_everywhere(scoped, &s);
    let copy = builder.synthesize(s.module, SynthesizedDeclKind::Copy, TypeId::VOID, s.unit);
    let deinit = builder.synthesize(
        s.module,
        SynthesizedDeclKind::Deinitialize,
        TypeId::VOID,
        s.module,
    );
    let program = builder
        .finish(Box::new(RelationTable::new()))
        .unwrap_or_else(|e| panic!("{e}"));

    let synthesized = program.node(s.module).synthesized_decls();
    let ids: Vec<_> = synthesized.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![copy, deinit]);
    assert_eq!(synthesized[0].kind, SynthesizedDeclKind::Copy);

    let node = program.node(copy);
    assert_eq!(node.scope().id(), s.unit.to_scope());
    assert_eq!(node.declared_type(), TypeId::VOID);
    assert_eq!(program.node(deinit).scope().id(), s.module.to_scope());
    assert!(program.ast().contains(copy.to_decl()));

    // Synthesized declarations are not source declarations of their scope.
    let listed = program.scoped().scope_decls(s.unit.to_scope());
    assert!(!listed.contains(&copy.to_decl()));
    assert_eq!(program.ast().span(copy), Span::DUMMY);
    assert!(copy.raw() as usize >= program.ast().len() - 2);
}

#[test]
fn imports_are_deduplicated_and_sorted() {
    let (scoped, s) = fixture::syntax();
    let mut builder = fixture::typed_everywhere(scoped, &s);
    builder.add_import(s.unit, s.module);
    builder.add_import(s.unit, s.module);
    let program = builder
        .finish(Box::new(RelationTable::new()))
        .unwrap_or_else(|e| panic!("{e}"));
    let imports: Vec<_> = program.node(s.unit).imports().map(|m| m.id()).collect();
    assert_eq!(imports, vec![s.module]);
}

#[test]
fn failure_message_counts() {
    let (scoped, s) = fixture::syntax();
    let mut builder = fixture::typed_everywhere(scoped, &s);
    builder.report(s.module, stale(Span::DUMMY));
    builder.report(s.module, stale(Span::DUMMY));
    let message = builder
        .finish(Box::new(RelationTable::new()))
        .err()
        .map(|e| e.to_string());
    assert_eq!(
        message.as_deref(),
        Some("1 module(s) failed to type check with 2 error(s)")
    );
}
