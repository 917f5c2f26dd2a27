use pretty_assertions::assert_eq;
use val_ir::ast::{ModuleDecl, TraitDecl};
use val_ir::{NodeIdentity, Span};

use super::*;
use crate::constraint::Constraint;

struct Fixture {
    ast: Ast,
    interner: StringInterner,
    pool: TypePool,
    hashable: TraitType,
    module: AnyNodeId,
}

fn fixture() -> Fixture {
    let interner = StringInterner::new();
    let mut ast = Ast::new();
    let hashable = ast.insert(
        TraitDecl { name: interner.intern("Hashable"), members: Vec::new() },
        Span::new(0, 20),
    );
    let module = ast.insert(
        ModuleDecl { name: interner.intern("Main"), sources: Vec::new() },
        Span::new(0, 200),
    );
    Fixture {
        ast,
        interner,
        pool: TypePool::new(),
        hashable: TraitType::new(hashable),
        module: module.to_any(),
    }
}

fn conformance_cause(f: &Fixture) -> LocatableConstraint {
    LocatableConstraint::new(
        Constraint::Conformance {
            subject: TypeId::INT,
            traits: BTreeSet::from([f.hashable]),
        },
        None,
        Span::new(40, 45),
    )
}

#[test]
fn conformance_failure_is_a_source_error() {
    let f = fixture();
    let error = TypeError::does_not_conform(
        TypeId::INT,
        BTreeSet::from([f.hashable]),
        f.module,
        conformance_cause(&f),
    );
    assert_eq!(error.category(), ErrorCategory::Source);

    let diag = error.to_diagnostic(&f.pool, &f.ast, &f.interner);
    assert_eq!(diag.code, ErrorCode::E2009);
    assert_eq!(diag.message, "type `Int` does not conform to `Hashable`");
    assert_eq!(diag.primary_span(), Some(Span::new(40, 45)));
    assert_eq!(diag.labels.len(), 2);
    assert_eq!(
        diag.suggestions,
        vec!["declare a conformance of `Int` to `Hashable` visible from this scope".to_owned()]
    );
    assert!(!diag.is_internal());
}

#[test]
fn stale_constraint_is_internal() {
    let f = fixture();
    let error = TypeError::stale_constraint(conformance_cause(&f));
    assert_eq!(error.category(), ErrorCategory::Internal);

    let diag = error.to_diagnostic(&f.pool, &f.ast, &f.interner);
    assert_eq!(diag.code, ErrorCode::E9002);
    assert_eq!(diag.message, "constraint `Int: Hashable` went stale");
    assert!(diag.is_internal());
    assert_eq!(diag.notes.len(), 1);
    assert!(diag.suggestions.is_empty());
}

#[test]
fn kinds_never_share_a_code() {
    let f = fixture();
    let cause = conformance_cause(&f);
    let conform = TypeError::does_not_conform(
        TypeId::INT,
        BTreeSet::from([f.hashable]),
        f.module,
        cause.clone(),
    );
    let stale = TypeError::stale_constraint(cause);
    assert_ne!(conform.kind.code(), stale.kind.code());
    assert_ne!(conform.category(), stale.category());
}

#[test]
fn equality_and_subtyping_render_both_sides() {
    let f = fixture();
    let equality = Constraint::Equality { lhs: TypeId::INT, rhs: TypeId::BOOL };
    let subtyping = Constraint::Subtyping { subtype: TypeId::NEVER, supertype: TypeId::STRING };
    assert_eq!(equality.display(&f.pool, &f.ast, &f.interner), "Int == Bool");
    assert_eq!(subtyping.display(&f.pool, &f.ast, &f.interner), "Never <: String");
}
