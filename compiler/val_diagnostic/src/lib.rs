//! Diagnostic values for reporting semantic errors.
//!
//! A [`Diagnostic`] carries an [`ErrorCode`] for searchability, a message
//! saying what went wrong, labeled spans saying where, and notes. Rendering
//! to a terminal or an editor is left to the driver.
//!
//! # Error Guarantees
//!
//! [`ErrorGuaranteed`] is proof that at least one error was reported. A
//! phase that fails returns it instead of a bare `()`, so a failure can't be
//! forgotten on the way out.
//!
//! ```text
//! fn finish(self) -> Result<TypedProgram, CheckFailure> { ... }
//! ```

mod diagnostic;
mod error_code;
mod guarantee;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
pub use guarantee::ErrorGuaranteed;
