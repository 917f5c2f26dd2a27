//! Pattern nodes.

use crate::ast::VarDeclId;
use crate::{AnyPatternId, Name};

/// Keyword introducing a binding pattern.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BindingIntroducer {
    Let,
    Var,
    SinkLet,
    Inout,
}

/// `let <subpattern>`: the root pattern of a binding declaration.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct BindingPattern {
    pub introducer: BindingIntroducer,
    pub subpattern: AnyPatternId,
}

/// A name introducing a variable.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct NamePattern {
    pub decl: VarDeclId,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TuplePatternElement {
    pub label: Option<Name>,
    pub pattern: AnyPatternId,
}

/// `(x, y)`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TuplePattern {
    pub elements: Vec<TuplePatternElement>,
}

/// `_`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct WildcardPattern;
