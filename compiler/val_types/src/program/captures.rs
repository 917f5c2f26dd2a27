//! Capture lists of functions and subscripts.
//!
//! The order of a capture list is part of the calling convention: lowering
//! lays out closure environments in this order.
//!
//! - A member (one with a receiver) captures its receiver and nothing else.
//! - Otherwise, explicit captures come first, in capture-list order, then
//!   implicit captures in the order the type checker found them.
//!
//! A subscript implementation has the captures of its bundle.

use smallvec::SmallVec;
use val_ir::ast::{
    BindingDeclId, FunctionDeclId, ParameterDeclId, SubscriptDeclId, SubscriptImplId,
};
use val_ir::{AnyDeclId, DeclIdentity, NodeIdentity};

use super::{contract_violation, TypedProgram};

/// Declarations captured by a function or subscript, in layout order.
pub type Captures = SmallVec<[AnyDeclId; 4]>;

impl TypedProgram {
    /// Captures of the function `d`.
    pub fn captures_of_function(&self, d: FunctionDeclId) -> Captures {
        let decl = &self.ast()[d];
        self.capture_list(d.to_decl(), decl.receiver, &decl.explicit_captures)
    }

    /// Captures of the subscript bundle `d`.
    pub fn captures_of_subscript(&self, d: SubscriptDeclId) -> Captures {
        let decl = &self.ast()[d];
        self.capture_list(d.to_decl(), decl.receiver, &decl.explicit_captures)
    }

    /// Captures of the subscript implementation `d`: those of its bundle.
    pub fn captures_of_subscript_impl(&self, d: SubscriptImplId) -> Captures {
        let bundle = self
            .scoped()
            .decl_scope(d)
            .and_then(|s| s.narrow::<SubscriptDeclId>())
            .unwrap_or_else(|| {
                contract_violation(format_args!("{d:?} is not scoped in a subscript"))
            });
        self.captures_of_subscript(bundle)
    }

    fn capture_list(
        &self,
        owner: AnyDeclId,
        receiver: Option<ParameterDeclId>,
        explicit: &[BindingDeclId],
    ) -> Captures {
        if let Some(receiver) = receiver {
            tracing::trace!(?owner, ?receiver, "member captures its receiver");
            return SmallVec::from_elem(receiver.to_decl(), 1);
        }

        let mut captures: Captures = explicit.iter().map(|b| b.to_decl()).collect();
        match self.tables.implicit_captures.get(&owner) {
            Some(implicit) => captures.extend(implicit.iter().map(|c| c.decl)),
            None => tracing::debug!(?owner, "no implicit captures recorded"),
        }
        tracing::trace!(?owner, count = captures.len(), "derived capture list");
        captures
    }
}
