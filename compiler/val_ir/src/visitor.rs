//! Generic traversal of the syntax arena.
//!
//! Nodes are visited by identity. The default [`Visitor::visit`] calls
//! [`walk`], which visits every direct child in source order; override
//! `visit` to act on a node and call [`walk`] to continue into its children.
//!
//! ```text
//! struct CountNames(usize);
//!
//! impl Visitor for CountNames {
//!     fn visit(&mut self, ast: &Ast, id: AnyNodeId) {
//!         if id.kind() == NodeKind::NameExpr {
//!             self.0 += 1;
//!         }
//!         walk(self, ast, id);
//!     }
//! }
//! ```

use crate::stack::ensure_sufficient_stack;
use crate::{AnyNodeId, Ast};

/// Syntax tree visitor.
///
/// The visitor may mutate its own state; the arena stays immutable.
pub trait Visitor {
    /// Visit a node.
    fn visit(&mut self, ast: &Ast, id: AnyNodeId) {
        walk(self, ast, id);
    }
}

/// Visit every direct child of `id`, in source order.
pub fn walk<V: Visitor + ?Sized>(visitor: &mut V, ast: &Ast, id: AnyNodeId) {
    ensure_sufficient_stack(|| {
        for child in ast.children(id) {
            visitor.visit(ast, child);
        }
    });
}

/// Visit every module of `ast` in insertion order.
pub fn walk_program<V: Visitor + ?Sized>(visitor: &mut V, ast: &Ast) {
    for &module in ast.modules() {
        visitor.visit(ast, module.into());
    }
}
