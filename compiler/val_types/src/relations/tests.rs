use val_ir::ast::{ModuleDecl, TraitDecl};
use val_ir::{Ast, Name, ScopeIdentity, Span};

use super::*;

fn trait_and_module() -> (TraitType, AnyScopeId) {
    let mut ast = Ast::new();
    let trait_decl = ast.insert(TraitDecl { name: Name::EMPTY, members: Vec::new() }, Span::DUMMY);
    let module = ast.insert(ModuleDecl { name: Name::EMPTY, sources: Vec::new() }, Span::DUMMY);
    (TraitType::new(trait_decl), module.to_scope())
}

#[test]
fn subtyping_is_reflexive_and_never_is_bottom() {
    let table = RelationTable::new();
    assert!(table.is_subtype(TypeId::INT, TypeId::INT));
    assert!(table.is_subtype(TypeId::NEVER, TypeId::STRING));
    assert!(!table.is_subtype(TypeId::INT, TypeId::FLOAT));
}

#[test]
fn recorded_facts_are_answered() {
    let (hashable, scope) = trait_and_module();
    let mut table = RelationTable::new();
    table
        .add_subtype(TypeId::INT, TypeId::FLOAT)
        .add_conformance(TypeId::INT, hashable, scope);

    assert!(table.is_subtype(TypeId::INT, TypeId::FLOAT));
    assert!(!table.is_subtype(TypeId::FLOAT, TypeId::INT));
    assert!(table.conforms(TypeId::INT, hashable, scope));
    assert!(!table.conforms(TypeId::BOOL, hashable, scope));
}

#[test]
fn aliases_are_canonicalized() {
    let (hashable, scope) = trait_and_module();
    let text = TypeId::from_raw(TypeId::BUILTIN_COUNT);
    let mut table = RelationTable::new();
    table
        .add_alias(text, TypeId::STRING)
        .add_conformance(TypeId::STRING, hashable, scope);

    assert_eq!(table.canonical(text), TypeId::STRING);
    assert_eq!(table.canonical(TypeId::INT), TypeId::INT);
    assert!(table.conforms(text, hashable, scope));
    assert!(table.is_subtype(text, TypeId::STRING));
}

#[test]
fn alias_cycles_terminate() {
    let mut table = RelationTable::new();
    table.add_alias(TypeId::INT, TypeId::BOOL).add_alias(TypeId::BOOL, TypeId::INT);
    let canonical = table.canonical(TypeId::INT);
    assert!(canonical == TypeId::INT || canonical == TypeId::BOOL);
}
