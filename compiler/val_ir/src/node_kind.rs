//! Closed enumeration of syntax node kinds.
//!
//! Every identity carries its [`NodeKind`] inline, and every kind carries a
//! static set of [`KindTraits`] naming the identity subsets it belongs to.
//! Narrowing an identity to a subset is a flag test against this table.

use std::fmt;

bitflags::bitflags! {
    /// Identity subsets a node kind belongs to.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct KindTraits: u8 {
        const DECL = 1 << 0;
        const EXPR = 1 << 1;
        const PATTERN = 1 << 2;
        const STMT = 1 << 3;
        /// Lexical region owning declarations.
        const SCOPE = 1 << 4;
        /// Scope that may introduce generic parameters.
        const GENERIC_SCOPE = 1 << 5;
    }
}

macro_rules! node_kinds {
    ($($kind:ident => $traits:expr),* $(,)?) => {
        /// Concrete kind of a syntax node.
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
        #[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
        #[repr(u8)]
        pub enum NodeKind {
            $($kind),*
        }

        impl NodeKind {
            /// All kinds, in declaration order.
            pub const ALL: &'static [NodeKind] = &[$(NodeKind::$kind),*];

            /// The subsets this kind belongs to.
            pub const fn traits(self) -> KindTraits {
                match self {
                    $(NodeKind::$kind => $traits),*
                }
            }

            /// Name of the kind as written in the node struct.
            pub const fn name(self) -> &'static str {
                match self {
                    $(NodeKind::$kind => stringify!($kind)),*
                }
            }
        }
    };
}

const DECL: KindTraits = KindTraits::DECL;
const DECL_SCOPE: KindTraits = KindTraits::DECL.union(KindTraits::SCOPE);
const GENERIC_DECL_SCOPE: KindTraits = DECL_SCOPE.union(KindTraits::GENERIC_SCOPE);
const EXPR: KindTraits = KindTraits::EXPR;
const PATTERN: KindTraits = KindTraits::PATTERN;
const STMT: KindTraits = KindTraits::STMT;

node_kinds! {
    // Declarations
    ModuleDecl => DECL_SCOPE,
    ImportDecl => DECL,
    BindingDecl => DECL,
    VarDecl => DECL,
    ParameterDecl => DECL,
    FunctionDecl => GENERIC_DECL_SCOPE,
    SubscriptDecl => GENERIC_DECL_SCOPE,
    SubscriptImpl => DECL_SCOPE,
    ProductTypeDecl => GENERIC_DECL_SCOPE,
    TraitDecl => GENERIC_DECL_SCOPE,
    GenericParameterDecl => DECL,
    SynthesizedDecl => DECL,

    // Expressions
    NameExpr => EXPR,
    IntegerLiteralExpr => EXPR,
    BooleanLiteralExpr => EXPR,
    StringLiteralExpr => EXPR,
    SequenceExpr => EXPR,
    FunctionCallExpr => EXPR,
    LambdaExpr => EXPR,
    TupleExpr => EXPR,
    MapLiteralExpr => EXPR,

    // Patterns
    BindingPattern => PATTERN,
    NamePattern => PATTERN,
    TuplePattern => PATTERN,
    WildcardPattern => PATTERN,

    // Statements
    BraceStmt => STMT.union(KindTraits::SCOPE),
    ExprStmt => STMT,
    DeclStmt => STMT,
    ReturnStmt => STMT,

    // Other scopes
    TranslationUnit => KindTraits::SCOPE,
}

impl NodeKind {
    #[inline]
    pub const fn is_decl(self) -> bool {
        self.traits().contains(KindTraits::DECL)
    }

    #[inline]
    pub const fn is_expr(self) -> bool {
        self.traits().contains(KindTraits::EXPR)
    }

    #[inline]
    pub const fn is_pattern(self) -> bool {
        self.traits().contains(KindTraits::PATTERN)
    }

    #[inline]
    pub const fn is_stmt(self) -> bool {
        self.traits().contains(KindTraits::STMT)
    }

    #[inline]
    pub const fn is_scope(self) -> bool {
        self.traits().contains(KindTraits::SCOPE)
    }

    #[inline]
    pub const fn is_generic_scope(self) -> bool {
        self.traits().contains(KindTraits::GENERIC_SCOPE)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
