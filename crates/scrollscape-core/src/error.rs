use thiserror::Error;

/// Configuration errors raised when building stage components.
///
/// Per-frame updates never fail; these only come out of constructors that
/// accept caller-supplied data.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("layout set is empty")]
    NoLayouts,
    #[error("layout {index} has {got} points, expected {expected}")]
    LayoutLength {
        index: usize,
        expected: usize,
        got: usize,
    },
    #[error("depth field {width}x{height} needs {expected} samples, got {got}")]
    FieldSize {
        width: u32,
        height: u32,
        expected: usize,
        got: usize,
    },
    #[error("phase table: {0}")]
    PhaseTable(&'static str),
}

pub type Result<T> = std::result::Result<T, CoreError>;
