//! Kind-tagged node identities.
//!
//! An identity is a dense arena index paired with the node's [`NodeKind`].
//! Three families of identity types exist:
//!
//! - [`AnyNodeId`]: any node at all
//! - subset identities ([`AnyDeclId`], [`AnyExprId`], [`AnyPatternId`],
//!   [`AnyStmtId`], [`AnyScopeId`]): any node whose kind belongs to the subset
//! - [`Id<N>`]: a node of exactly the concrete kind `N`
//!
//! Widening (concrete to subset, anything to [`AnyNodeId`]) is lossless and
//! spelled with `From`. Narrowing goes through [`NodeIdentity::narrow`] and
//! yields `None` when the kind tag does not match. Identities are only minted
//! by the [`Ast`](crate::Ast), so the kind tag never lies.
//!
//! Equality, ordering and hashing use the arena index alone.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::ast::{AstNode, DeclNode, ExprNode, PatternNode, ScopeNode, StmtNode};
use crate::node_kind::{KindTraits, NodeKind};

/// Operations shared by every identity type.
pub trait NodeIdentity: Copy + Eq + Ord + Hash + fmt::Debug + Send + Sync + 'static {
    /// Dense arena index.
    fn raw(self) -> u32;

    /// Concrete kind of the denoted node.
    fn kind(self) -> NodeKind;

    /// Widen to the universal identity.
    fn to_any(self) -> AnyNodeId;

    /// Narrow a universal identity, or `None` if its kind is not admitted.
    fn from_any(id: AnyNodeId) -> Option<Self>;

    /// Re-derive this identity as `T`, or `None` if the kind does not match.
    #[inline]
    fn narrow<T: NodeIdentity>(self) -> Option<T> {
        T::from_any(self.to_any())
    }

    /// Index into the arena's node storage.
    #[inline]
    fn index(self) -> usize {
        self.raw() as usize
    }
}

/// Identity of any node.
#[derive(Copy, Clone)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct AnyNodeId {
    raw: u32,
    kind: NodeKind,
}

impl AnyNodeId {
    #[inline]
    pub(crate) const fn new(raw: u32, kind: NodeKind) -> Self {
        AnyNodeId { raw, kind }
    }
}

impl NodeIdentity for AnyNodeId {
    #[inline]
    fn raw(self) -> u32 {
        self.raw
    }

    #[inline]
    fn kind(self) -> NodeKind {
        self.kind
    }

    #[inline]
    fn to_any(self) -> AnyNodeId {
        self
    }

    #[inline]
    fn from_any(id: AnyNodeId) -> Option<Self> {
        Some(id)
    }
}

impl PartialEq for AnyNodeId {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for AnyNodeId {}

impl Hash for AnyNodeId {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl PartialOrd for AnyNodeId {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AnyNodeId {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl fmt::Debug for AnyNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.raw)
    }
}

macro_rules! subset_identity {
    ($(#[$doc:meta])* $name:ident, $traits:expr, $marker:ident, $category:ident, $convert:ident) => {
        $(#[$doc])*
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
        #[repr(transparent)]
        pub struct $name(AnyNodeId);

        impl NodeIdentity for $name {
            #[inline]
            fn raw(self) -> u32 {
                self.0.raw
            }

            #[inline]
            fn kind(self) -> NodeKind {
                self.0.kind
            }

            #[inline]
            fn to_any(self) -> AnyNodeId {
                self.0
            }

            #[inline]
            fn from_any(id: AnyNodeId) -> Option<Self> {
                id.kind.traits().contains($traits).then_some($name(id))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(&self.0, f)
            }
        }

        impl From<$name> for AnyNodeId {
            #[inline]
            fn from(id: $name) -> AnyNodeId {
                id.0
            }
        }

        impl<N: $marker> From<Id<N>> for $name {
            #[inline]
            fn from(id: Id<N>) -> $name {
                $name(id.to_any())
            }
        }

        /// Identities whose every value belongs to this subset.
        pub trait $category: NodeIdentity {
            /// Widen to the subset identity.
            #[inline]
            fn $convert(self) -> $name {
                $name(self.to_any())
            }
        }

        impl $category for $name {}

        impl<N: $marker> $category for Id<N> {}
    };
}

subset_identity!(
    /// Identity of any declaration.
    AnyDeclId, KindTraits::DECL, DeclNode, DeclIdentity, to_decl
);
subset_identity!(
    /// Identity of any expression.
    AnyExprId, KindTraits::EXPR, ExprNode, ExprIdentity, to_expr
);
subset_identity!(
    /// Identity of any pattern.
    AnyPatternId, KindTraits::PATTERN, PatternNode, PatternIdentity, to_pattern
);
subset_identity!(
    /// Identity of any statement.
    AnyStmtId, KindTraits::STMT, StmtNode, StmtIdentity, to_stmt
);
subset_identity!(
    /// Identity of any lexical scope.
    AnyScopeId, KindTraits::SCOPE, ScopeNode, ScopeIdentity, to_scope
);

/// Identity of a node of concrete kind `N`.
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "cache", serde(bound = ""))]
pub struct Id<N> {
    raw: u32,
    #[cfg_attr(feature = "cache", serde(skip))]
    node: PhantomData<fn() -> N>,
}

impl<N> Id<N> {
    #[inline]
    pub(crate) const fn new(raw: u32) -> Self {
        Id {
            raw,
            node: PhantomData,
        }
    }
}

impl<N: AstNode> NodeIdentity for Id<N> {
    #[inline]
    fn raw(self) -> u32 {
        self.raw
    }

    #[inline]
    fn kind(self) -> NodeKind {
        N::KIND
    }

    #[inline]
    fn to_any(self) -> AnyNodeId {
        AnyNodeId::new(self.raw, N::KIND)
    }

    #[inline]
    fn from_any(id: AnyNodeId) -> Option<Self> {
        (id.kind == N::KIND).then_some(Id::new(id.raw))
    }
}

impl<N: AstNode> From<Id<N>> for AnyNodeId {
    #[inline]
    fn from(id: Id<N>) -> AnyNodeId {
        id.to_any()
    }
}

impl<N> Clone for Id<N> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for Id<N> {}

impl<N> PartialEq for Id<N> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<N> Eq for Id<N> {}

impl<N> Hash for Id<N> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<N> PartialOrd for Id<N> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N> Ord for Id<N> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<N: AstNode> fmt::Debug for Id<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", N::KIND, self.raw)
    }
}
