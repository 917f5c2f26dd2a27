//! Semantic property tables.
//!
//! [`PropertyTables`] collects everything the type checker learned about the
//! program, keyed by node identity. The tables are filled by the
//! [`ProgramBuilder`](crate::ProgramBuilder) and merged once into a
//! [`TypedProgram`](crate::TypedProgram), which validates them.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;
use val_ir::ast::{
    ModuleDeclId, NameExprId, SequenceExprId, SynthesizedDeclId, SynthesizedDeclKind,
    TranslationUnitId,
};
use val_ir::{AnyDeclId, AnyExprId, AnyScopeId, Name};

use crate::environment::GenericEnvironment;
use crate::ty::TypeId;

/// How a closure holds a captured value.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CaptureMode {
    ByValue,
    ByReference,
}

/// A declaration used in a function body but declared outside of it.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ImplicitCapture {
    pub name: Name,
    pub ty: TypeId,
    pub decl: AnyDeclId,
    pub mode: CaptureMode,
}

/// Declaration a name expression refers to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DeclReference {
    Direct(AnyDeclId),
    /// A member bound to the implicit receiver `self`.
    Member(AnyDeclId),
}

impl DeclReference {
    pub fn decl(self) -> AnyDeclId {
        match self {
            DeclReference::Direct(d) | DeclReference::Member(d) => d,
        }
    }
}

/// Precedence groups of infix operators, loosest first.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum PrecedenceGroup {
    Assignment,
    Funnel,
    Disjunction,
    Conjunction,
    Comparison,
    Fallback,
    Range,
    Addition,
    Multiplication,
    Shift,
    Exponentiation,
}

impl PrecedenceGroup {
    /// Whether operators of this group associate to the right.
    pub fn is_right_associative(self) -> bool {
        matches!(self, PrecedenceGroup::Assignment | PrecedenceGroup::Fallback)
    }
}

/// A sequence expression with operator precedence resolved.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum FoldedSequenceExpr {
    Leaf(AnyExprId),
    Infix {
        operator: NameExprId,
        precedence: PrecedenceGroup,
        lhs: Box<FoldedSequenceExpr>,
        rhs: Box<FoldedSequenceExpr>,
    },
}

impl FoldedSequenceExpr {
    /// Operands in source order.
    pub fn operands(&self) -> Vec<AnyExprId> {
        let mut out = Vec::new();
        self.collect_operands(&mut out);
        out
    }

    fn collect_operands(&self, out: &mut Vec<AnyExprId>) {
        match self {
            FoldedSequenceExpr::Leaf(expr) => out.push(*expr),
            FoldedSequenceExpr::Infix { lhs, rhs, .. } => {
                lhs.collect_operands(out);
                rhs.collect_operands(out);
            }
        }
    }

    /// Operators in the order their applications are evaluated.
    pub fn operators(&self) -> Vec<NameExprId> {
        let mut out = Vec::new();
        self.collect_operators(&mut out);
        out
    }

    fn collect_operators(&self, out: &mut Vec<NameExprId>) {
        if let FoldedSequenceExpr::Infix { operator, lhs, rhs, .. } = self {
            lhs.collect_operators(out);
            rhs.collect_operators(out);
            out.push(*operator);
        }
    }
}

/// A declaration materialized by the type checker.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct SynthesizedDecl {
    pub id: SynthesizedDeclId,
    pub kind: SynthesizedDeclKind,
    pub ty: TypeId,
    pub scope: AnyScopeId,
}

/// Everything the type checker attaches to the syntax.
#[derive(Clone, Debug, Default)]
pub struct PropertyTables {
    /// Modules imported by each translation unit.
    pub imports: FxHashMap<TranslationUnitId, BTreeSet<ModuleDeclId>>,
    /// Overarching type of each declaration.
    pub decl_types: FxHashMap<AnyDeclId, TypeId>,
    pub expr_types: FxHashMap<AnyExprId, TypeId>,
    /// Implicit captures of functions and subscript bundles, in the order
    /// they were found.
    pub implicit_captures: FxHashMap<AnyDeclId, Vec<ImplicitCapture>>,
    /// Environment of each generic declaration.
    pub environments: FxHashMap<AnyDeclId, GenericEnvironment>,
    pub synthesized_decls: FxHashMap<ModuleDeclId, Vec<SynthesizedDecl>>,
    pub referred_decls: FxHashMap<NameExprId, DeclReference>,
    pub folded_sequence_exprs: FxHashMap<SequenceExprId, FoldedSequenceExpr>,
}
