//! Type representation.
//!
//! Types are interned in a [`TypePool`](crate::TypePool) and referred to by
//! [`TypeId`]. Builtin types are pre-interned at fixed indices, so comparing
//! against them needs no pool.

use std::fmt;

use val_ir::ast::{
    AccessEffect, GenericParameterDeclId, ModuleDeclId, ProductTypeDeclId, TraitDeclId,
};
use val_ir::Name;

/// A 32-bit handle into the type pool.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    // === Builtin Types (indices 0-6) ===

    /// The unit type `Void`.
    pub const VOID: Self = Self(0);
    /// The bottom type `Never`.
    pub const NEVER: Self = Self(1);
    pub const BOOL: Self = Self(2);
    pub const INT: Self = Self(3);
    pub const FLOAT: Self = Self(4);
    pub const STRING: Self = Self(5);
    /// Placeholder for an ill-typed entity.
    pub const ERROR: Self = Self(6);

    /// Number of pre-interned types.
    pub const BUILTIN_COUNT: u32 = 7;

    #[inline]
    pub(crate) const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_builtin(self) -> bool {
        self.0 < Self::BUILTIN_COUNT
    }

    #[inline]
    pub const fn is_error(self) -> bool {
        self.0 == Self::ERROR.0
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

/// Types built into the language.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum BuiltinType {
    Void,
    Never,
    Bool,
    Int,
    Float,
    String,
}

impl BuiltinType {
    pub const fn name(self) -> &'static str {
        match self {
            BuiltinType::Void => "Void",
            BuiltinType::Never => "Never",
            BuiltinType::Bool => "Bool",
            BuiltinType::Int => "Int",
            BuiltinType::Float => "Float",
            BuiltinType::String => "String",
        }
    }
}

/// A trait, as a type.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TraitType {
    pub decl: TraitDeclId,
}

impl TraitType {
    pub fn new(decl: TraitDeclId) -> Self {
        TraitType { decl }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TupleTypeElement {
    pub label: Option<Name>,
    pub ty: TypeId,
}

/// A parameter of a callable type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct CallableParameter {
    pub label: Option<Name>,
    pub convention: AccessEffect,
    pub ty: TypeId,
}

/// Type of a function or lambda.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct LambdaType {
    /// Tuple of the captured values, [`TypeId::VOID`] for thin functions.
    pub environment: TypeId,
    pub inputs: Vec<CallableParameter>,
    pub output: TypeId,
}

/// Type of a subscript bundle.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct SubscriptType {
    /// Effects of the implementations of the bundle.
    pub capabilities: Vec<AccessEffect>,
    pub environment: TypeId,
    pub inputs: Vec<CallableParameter>,
    pub output: TypeId,
}

/// A type, as stored in the pool.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Type {
    Builtin(BuiltinType),
    /// Type of a module declaration.
    Module(ModuleDeclId),
    Product(ProductTypeDeclId),
    Trait(TraitType),
    GenericParameter(GenericParameterDeclId),
    Tuple(Vec<TupleTypeElement>),
    Lambda(LambdaType),
    Subscript(SubscriptType),
    Error,
}

impl Type {
    #[inline]
    pub fn is_module(&self) -> bool {
        matches!(self, Type::Module(_))
    }
}
