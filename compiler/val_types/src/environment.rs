//! Generic environments.

use std::collections::BTreeSet;

use val_ir::ast::GenericParameterDeclId;
use val_ir::AnyDeclId;

use crate::ty::{TraitType, TypeId};

/// A constraint declared on the generic parameters of a declaration.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum GenericConstraint {
    /// `T: A & B`
    Conformance {
        subject: TypeId,
        traits: BTreeSet<TraitType>,
    },
    /// `T == U`
    Equality { lhs: TypeId, rhs: TypeId },
}

/// Generic parameters and constraints of a generic declaration, including
/// those inherited from enclosing generic scopes.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct GenericEnvironment {
    pub decl: AnyDeclId,
    pub parameters: Vec<GenericParameterDeclId>,
    pub constraints: Vec<GenericConstraint>,
}

impl GenericEnvironment {
    pub fn new(decl: AnyDeclId) -> Self {
        GenericEnvironment {
            decl,
            parameters: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Traits `subject` is declared to conform to.
    pub fn conformances_of(&self, subject: TypeId) -> BTreeSet<TraitType> {
        let mut result = BTreeSet::new();
        for constraint in &self.constraints {
            if let GenericConstraint::Conformance { subject: s, traits } = constraint {
                if *s == subject {
                    result.extend(traits.iter().copied());
                }
            }
        }
        result
    }

    /// Types `ty` is declared equal to.
    pub fn equivalences_of(&self, ty: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        self.constraints.iter().filter_map(move |c| match *c {
            GenericConstraint::Equality { lhs, rhs } if lhs == ty => Some(rhs),
            GenericConstraint::Equality { lhs, rhs } if rhs == ty => Some(lhs),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty() && self.constraints.is_empty()
    }
}
