//! Solver constraints, as carried by type errors.

use std::collections::BTreeSet;

use val_ir::{AnyNodeId, Ast, Span, StringInterner};

use crate::pool::TypePool;
use crate::ty::{TraitType, TypeId};

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Constraint {
    /// `lhs == rhs`
    Equality { lhs: TypeId, rhs: TypeId },
    /// `subtype <: supertype`
    Subtyping { subtype: TypeId, supertype: TypeId },
    /// `subject: traits`
    Conformance {
        subject: TypeId,
        traits: BTreeSet<TraitType>,
    },
}

impl Constraint {
    /// Render the constraint for diagnostics.
    pub fn display(&self, pool: &TypePool, ast: &Ast, interner: &StringInterner) -> String {
        match self {
            Constraint::Equality { lhs, rhs } => format!(
                "{} == {}",
                pool.display(*lhs, ast, interner),
                pool.display(*rhs, ast, interner)
            ),
            Constraint::Subtyping { subtype, supertype } => format!(
                "{} <: {}",
                pool.display(*subtype, ast, interner),
                pool.display(*supertype, ast, interner)
            ),
            Constraint::Conformance { subject, traits } => format!(
                "{}: {}",
                pool.display(*subject, ast, interner),
                display_traits(traits, pool, ast, interner)
            ),
        }
    }
}

/// `A & B`, in trait declaration order.
pub(crate) fn display_traits(
    traits: &BTreeSet<TraitType>,
    pool: &TypePool,
    ast: &Ast,
    interner: &StringInterner,
) -> String {
    traits
        .iter()
        .map(|t| match ast.get(t.decl) {
            Some(decl) => interner.lookup(decl.name).to_owned(),
            None => pool.display(TypeId::ERROR, ast, interner),
        })
        .collect::<Vec<_>>()
        .join(" & ")
}

/// A constraint with the location that gave rise to it.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct LocatableConstraint {
    pub constraint: Constraint,
    /// Node whose checking produced the constraint, if any.
    pub site: Option<AnyNodeId>,
    pub span: Span,
}

impl LocatableConstraint {
    pub fn new(constraint: Constraint, site: Option<AnyNodeId>, span: Span) -> Self {
        LocatableConstraint {
            constraint,
            site,
            span,
        }
    }
}
