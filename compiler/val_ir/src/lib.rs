//! Val IR - syntax arena and scope structure
//!
//! This crate contains the front half of the Val typed-program model:
//! - Kind-tagged node identities with checked narrowing
//! - The append-only syntax arena and its node structs
//! - Spans and interned names
//! - The scope tree and binding tables produced by scope resolution
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifiers are `Name(u32)`
//! - **Flatten Everything**: nodes refer to each other by identity, never by
//!   pointer, and every identity carries its kind
//! - **Immutable After Construction**: tables are validated once and then
//!   only read

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-copied types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod interner;
mod node_id;
mod node_kind;
pub mod scoped;
mod span;
pub mod stack;
pub mod visitor;

pub use ast::{Ast, AstNode, Node, PatternName};
pub use interner::{InternError, Name, StringInterner};
pub use node_id::{
    AnyDeclId, AnyExprId, AnyNodeId, AnyPatternId, AnyScopeId, AnyStmtId, DeclIdentity,
    ExprIdentity, Id, NodeIdentity, PatternIdentity, ScopeIdentity, StmtIdentity,
};
pub use node_kind::{KindTraits, NodeKind};
pub use scoped::{ScopeError, ScopeTables, ScopedProgram};
pub use span::{Span, SpanError};
pub use visitor::Visitor;

// Identities are copied into every table key.
static_assert_size!(AnyNodeId, 8);
static_assert_size!(AnyDeclId, 8);
static_assert_size!(ast::VarDeclId, 4);
static_assert_size!(Span, 8);
