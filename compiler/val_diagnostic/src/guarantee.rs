use std::fmt;

/// Proof that at least one error diagnostic was produced.
///
/// Can only be obtained from a non-zero error count, so holding one means
/// the failure has already been reported.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ErrorGuaranteed {
    _private: (),
}

impl ErrorGuaranteed {
    /// `Some` iff `count` is non-zero.
    pub fn from_error_count(count: usize) -> Option<Self> {
        (count > 0).then_some(ErrorGuaranteed { _private: () })
    }
}

impl fmt::Display for ErrorGuaranteed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("error(s) emitted")
    }
}
