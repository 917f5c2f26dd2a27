//! Type errors reported by the solver.
//!
//! A [`TypeError`] pairs what went wrong ([`TypeErrorKind`]) with the
//! constraint that exposed it. Errors are plain data; turning them into
//! [`Diagnostic`]s is done on demand with [`TypeError::to_diagnostic`].
//!
//! Two categories are kept apart: errors in the program being compiled, and
//! errors that can only come from a defect of the compiler itself. A stale
//! constraint is of the second kind and is reported under an internal error
//! code, never under a user-facing one.

use std::collections::BTreeSet;

use val_diagnostic::{Diagnostic, ErrorCode};
use val_ir::{AnyNodeId, Ast, StringInterner};

use crate::constraint::{display_traits, LocatableConstraint};
use crate::pool::TypePool;
use crate::ty::{TraitType, TypeId};

/// Who is at fault for an error.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCategory {
    /// The program being compiled.
    Source,
    /// The compiler.
    Internal,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeErrorKind {
    /// `ty` does not conform to `traits` in `scope`.
    DoesNotConform {
        ty: TypeId,
        traits: BTreeSet<TraitType>,
        scope: AnyNodeId,
    },
    /// The causing constraint went stale before it could be solved.
    StaleConstraint,
}

impl TypeErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TypeErrorKind::DoesNotConform { .. } => ErrorCategory::Source,
            TypeErrorKind::StaleConstraint => ErrorCategory::Internal,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            TypeErrorKind::DoesNotConform { .. } => ErrorCode::E2009,
            TypeErrorKind::StaleConstraint => ErrorCode::E9002,
        }
    }
}

/// An error encountered during type checking.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeError {
    pub kind: TypeErrorKind,
    /// The constraint that caused the error.
    pub cause: LocatableConstraint,
}

impl TypeError {
    pub fn does_not_conform(
        ty: TypeId,
        traits: BTreeSet<TraitType>,
        scope: AnyNodeId,
        cause: LocatableConstraint,
    ) -> Self {
        TypeError {
            kind: TypeErrorKind::DoesNotConform { ty, traits, scope },
            cause,
        }
    }

    pub fn stale_constraint(cause: LocatableConstraint) -> Self {
        TypeError {
            kind: TypeErrorKind::StaleConstraint,
            cause,
        }
    }

    #[inline]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Build the diagnostic reporting this error.
    pub fn to_diagnostic(
        &self,
        pool: &TypePool,
        ast: &Ast,
        interner: &StringInterner,
    ) -> Diagnostic {
        let span = self.cause.span;
        match &self.kind {
            TypeErrorKind::DoesNotConform { ty, traits, scope } => {
                let ty = pool.display(*ty, ast, interner);
                let traits = display_traits(traits, pool, ast, interner);
                let mut diag = Diagnostic::error(self.kind.code())
                    .with_message(format!("type `{ty}` does not conform to `{traits}`"))
                    .with_label(span, "conformance required here")
                    .with_suggestion(format!(
                        "declare a conformance of `{ty}` to `{traits}` visible from this scope"
                    ));
                if ast.contains(*scope) {
                    let scope_span = ast.span(*scope);
                    if !scope_span.is_empty() && scope_span != span {
                        diag = diag.with_secondary_label(
                            scope_span,
                            "no conformance visible in this scope",
                        );
                    }
                }
                diag
            }
            TypeErrorKind::StaleConstraint => Diagnostic::error(self.kind.code())
                .with_message(format!(
                    "constraint `{}` went stale",
                    self.cause.constraint.display(pool, ast, interner)
                ))
                .with_label(span, "constraint originated here")
                .with_note("this is a bug in the compiler, not in the program being compiled"),
        }
    }
}

#[cfg(test)]
mod tests;
