//! Error codes for semantic diagnostics.
//!
//! The first digit names the phase that reports the error:
//! - E2xxx: type errors in the program being compiled
//! - E9xxx: internal compiler errors

use std::fmt;

/// Error codes for semantic diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Type Errors (E2xxx)
    /// Type does not conform to a required trait
    E2009,

    // Internal Errors (E9xxx)
    /// Constraint left unsolved by a stale solver state
    E9002,
}

impl ErrorCode {
    /// Every code, in numeric order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E2009,
        ErrorCode::E9002,
    ];

    /// The code as written in diagnostics (e.g. "E2009").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E2009 => "E2009",
            ErrorCode::E9002 => "E9002",
        }
    }

    /// Check if this is a type error (E2xxx range).
    pub fn is_type_error(&self) -> bool {
        matches!(self, ErrorCode::E2009)
    }

    /// Check if this is an internal compiler error (E9xxx range).
    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::E9002)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2009"`, ignoring case.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
