//! The closed node enumeration and the per-kind marker traits.

use super::decl::{
    BindingDecl, FunctionDecl, GenericParameterDecl, ImportDecl, ModuleDecl, ParameterDecl,
    ProductTypeDecl, SubscriptDecl, SubscriptImpl, SynthesizedDecl, TraitDecl, TranslationUnit,
    VarDecl,
};
use super::expr::{
    BooleanLiteralExpr, FunctionCallExpr, IntegerLiteralExpr, LambdaExpr, MapLiteralExpr,
    NameExpr, SequenceExpr, StringLiteralExpr, TupleExpr,
};
use super::pattern::{BindingPattern, NamePattern, TuplePattern, WildcardPattern};
use super::stmt::{BraceStmt, DeclStmt, ExprStmt, ReturnStmt};
use crate::{Id, NodeKind};

/// A concrete node struct stored in the arena.
pub trait AstNode: Sized + Send + Sync + 'static {
    const KIND: NodeKind;

    /// Borrow the payload of `node` if it has kind [`Self::KIND`].
    fn from_node(node: &Node) -> Option<&Self>;

    fn into_node(self) -> Node;
}

/// Node kinds whose identities widen to [`AnyDeclId`](crate::AnyDeclId).
pub trait DeclNode: AstNode {}
/// Node kinds whose identities widen to [`AnyExprId`](crate::AnyExprId).
pub trait ExprNode: AstNode {}
/// Node kinds whose identities widen to [`AnyPatternId`](crate::AnyPatternId).
pub trait PatternNode: AstNode {}
/// Node kinds whose identities widen to [`AnyStmtId`](crate::AnyStmtId).
pub trait StmtNode: AstNode {}
/// Node kinds whose identities widen to [`AnyScopeId`](crate::AnyScopeId).
pub trait ScopeNode: AstNode {}

macro_rules! nodes {
    ($($kind:ident as $alias:ident: [$($marker:ident),*]),* $(,)?) => {
        /// A syntax node of any kind.
        #[derive(Clone, Eq, PartialEq, Hash, Debug)]
        pub enum Node {
            $($kind($kind)),*
        }

        impl Node {
            pub fn kind(&self) -> NodeKind {
                match self {
                    $(Node::$kind(_) => NodeKind::$kind),*
                }
            }
        }

        $(
            impl AstNode for $kind {
                const KIND: NodeKind = NodeKind::$kind;

                #[inline]
                fn from_node(node: &Node) -> Option<&Self> {
                    match node {
                        Node::$kind(n) => Some(n),
                        _ => None,
                    }
                }

                #[inline]
                fn into_node(self) -> Node {
                    Node::$kind(self)
                }
            }

            $(impl $marker for $kind {})*

            pub type $alias = Id<$kind>;
        )*
    };
}

nodes! {
    ModuleDecl as ModuleDeclId: [DeclNode, ScopeNode],
    ImportDecl as ImportDeclId: [DeclNode],
    BindingDecl as BindingDeclId: [DeclNode],
    VarDecl as VarDeclId: [DeclNode],
    ParameterDecl as ParameterDeclId: [DeclNode],
    FunctionDecl as FunctionDeclId: [DeclNode, ScopeNode],
    SubscriptDecl as SubscriptDeclId: [DeclNode, ScopeNode],
    SubscriptImpl as SubscriptImplId: [DeclNode, ScopeNode],
    ProductTypeDecl as ProductTypeDeclId: [DeclNode, ScopeNode],
    TraitDecl as TraitDeclId: [DeclNode, ScopeNode],
    GenericParameterDecl as GenericParameterDeclId: [DeclNode],
    SynthesizedDecl as SynthesizedDeclId: [DeclNode],

    NameExpr as NameExprId: [ExprNode],
    IntegerLiteralExpr as IntegerLiteralExprId: [ExprNode],
    BooleanLiteralExpr as BooleanLiteralExprId: [ExprNode],
    StringLiteralExpr as StringLiteralExprId: [ExprNode],
    SequenceExpr as SequenceExprId: [ExprNode],
    FunctionCallExpr as FunctionCallExprId: [ExprNode],
    LambdaExpr as LambdaExprId: [ExprNode],
    TupleExpr as TupleExprId: [ExprNode],
    MapLiteralExpr as MapLiteralExprId: [ExprNode],

    BindingPattern as BindingPatternId: [PatternNode],
    NamePattern as NamePatternId: [PatternNode],
    TuplePattern as TuplePatternId: [PatternNode],
    WildcardPattern as WildcardPatternId: [PatternNode],

    BraceStmt as BraceStmtId: [StmtNode, ScopeNode],
    ExprStmt as ExprStmtId: [StmtNode],
    DeclStmt as DeclStmtId: [StmtNode],
    ReturnStmt as ReturnStmtId: [StmtNode],

    TranslationUnit as TranslationUnitId: [ScopeNode],
}
