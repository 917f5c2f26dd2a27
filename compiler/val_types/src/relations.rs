//! Type relations.
//!
//! The typed program does not decide subtyping or conformance itself. It
//! forwards those questions to a [`TypeRelations`] oracle supplied by the
//! solver when the program is built. [`RelationTable`] is a plain fact store
//! implementing the oracle, used when the solver has already computed every
//! answer the later phases need.

use std::collections::BTreeSet;

use rustc_hash::{FxHashMap, FxHashSet};
use val_ir::AnyScopeId;

use crate::ty::{TraitType, TypeId};

/// Read-only oracle over type relations.
pub trait TypeRelations: Send + Sync {
    /// Whether `lhs` is a subtype of `rhs`.
    fn is_subtype(&self, lhs: TypeId, rhs: TypeId) -> bool;

    /// Whether `ty` conforms to `trait_type` through a conformance declared
    /// exactly in `scope`. Visibility from nested scopes is resolved by the
    /// caller.
    fn conforms(&self, ty: TypeId, trait_type: TraitType, scope: AnyScopeId) -> bool;

    /// Canonical form of `ty`, with aliases resolved.
    fn canonical(&self, ty: TypeId) -> TypeId;
}

/// Pre-computed relation facts.
#[derive(Clone, Debug, Default)]
pub struct RelationTable {
    subtypes: FxHashSet<(TypeId, TypeId)>,
    conformances: FxHashMap<(TypeId, AnyScopeId), BTreeSet<TraitType>>,
    aliases: FxHashMap<TypeId, TypeId>,
}

impl RelationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `lhs <: rhs`.
    pub fn add_subtype(&mut self, lhs: TypeId, rhs: TypeId) -> &mut Self {
        self.subtypes.insert((lhs, rhs));
        self
    }

    /// Record that `ty` conforms to `trait_type` in `scope`.
    pub fn add_conformance(
        &mut self,
        ty: TypeId,
        trait_type: TraitType,
        scope: AnyScopeId,
    ) -> &mut Self {
        self.conformances
            .entry((ty, scope))
            .or_default()
            .insert(trait_type);
        self
    }

    /// Record that `alias` denotes `target`.
    pub fn add_alias(&mut self, alias: TypeId, target: TypeId) -> &mut Self {
        self.aliases.insert(alias, target);
        self
    }
}

impl TypeRelations for RelationTable {
    fn is_subtype(&self, lhs: TypeId, rhs: TypeId) -> bool {
        let (lhs, rhs) = (self.canonical(lhs), self.canonical(rhs));
        lhs == rhs || lhs == TypeId::NEVER || self.subtypes.contains(&(lhs, rhs))
    }

    fn conforms(&self, ty: TypeId, trait_type: TraitType, scope: AnyScopeId) -> bool {
        self.conformances
            .get(&(self.canonical(ty), scope))
            .is_some_and(|traits| traits.contains(&trait_type))
    }

    fn canonical(&self, ty: TypeId) -> TypeId {
        // Bounded so that an alias cycle cannot loop forever.
        let mut current = ty;
        for _ in 0..=self.aliases.len() {
            match self.aliases.get(&current) {
                Some(&next) => current = next,
                None => return current,
            }
        }
        current
    }
}

#[cfg(test)]
mod tests;
