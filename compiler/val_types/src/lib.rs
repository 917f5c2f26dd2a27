//! Typed program for Val.
//!
//! This crate holds the output of type checking and the read-only view that
//! later phases consume:
//! - Interned semantic types ([`TypePool`], [`TypeId`])
//! - Property tables keyed by node identity ([`PropertyTables`])
//! - The immutable [`TypedProgram`] and its [`TypedNode`] projections
//! - Capture-list derivation for closures and subscripts
//! - The type-error taxonomy and its diagnostics
//!
//! # Building a program
//!
//! The checker fills a [`ProgramBuilder`] and calls
//! [`ProgramBuilder::finish`] exactly once. Callers that already hold
//! complete tables can use [`TypedProgram::new`] directly.
//!
//! ```text
//! ScopedProgram ──► ProgramBuilder ──finish──► TypedProgram ──node(id)──► TypedNode
//! ```

mod builder;
mod constraint;
mod environment;
#[cfg(test)]
mod fixture;
mod pool;
mod program;
mod relations;
mod tables;
mod ty;
mod type_error;
mod typed_node;

pub use builder::{CheckFailure, ProgramBuilder};
pub use constraint::{Constraint, LocatableConstraint};
pub use environment::{GenericConstraint, GenericEnvironment};
pub use pool::TypePool;
pub use program::captures::Captures;
pub use program::{ConstructionError, ProgramConfig, TypedProgram, ValidationMode};
pub use relations::{RelationTable, TypeRelations};
pub use tables::{
    CaptureMode, DeclReference, FoldedSequenceExpr, ImplicitCapture, PrecedenceGroup,
    PropertyTables, SynthesizedDecl,
};
pub use ty::{
    BuiltinType, CallableParameter, LambdaType, SubscriptType, TraitType, TupleTypeElement, Type,
    TypeId,
};
pub use type_error::{ErrorCategory, TypeError, TypeErrorKind};
pub use typed_node::{
    DeclView, ExprView, FunctionBodyView, NameDomain, PatternView, Projected, ProjectedDecls,
    ScopeView, TypedDeclRef, TypedNode,
};

// Projections are copied into every iterator adaptor.
#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{TypeId, TypedNode};
    use val_ir::AnyNodeId;
    val_ir::static_assert_size!(TypeId, 4);
    val_ir::static_assert_size!(TypedNode<'static, AnyNodeId>, 16);
}
