//! Result codes and the error type shared by every fallible operation.
//!
//! Purpose
//! - `ErrorCode` is the flat taxonomy reported to the diagnostic sink.
//! - `GeomError` carries the context a caller needs to act on a failure; every
//!   variant maps onto exactly one `ErrorCode` via `GeomError::code`.

use std::fmt;
use std::path::PathBuf;

/// Flat result-code taxonomy recorded by the diagnostic sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Success,
    NoMemory,
    NullArgument,
    ZeroDimension,
    DimensionMismatch,
    NotANumber,
    OutOfBounds,
    OpenFile,
    ElementNotFound,
    InvalidParameter,
    Unknown,
}

impl ErrorCode {
    /// Stable numeric id written to log files.
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Fixed human-readable message for this code.
    pub fn message(self) -> &'static str {
        match self {
            Self::Success => "success (no errors)",
            Self::NoMemory => "not enough memory for allocation",
            Self::NullArgument => "missing object",
            Self::ZeroDimension => "zero dimension object",
            Self::DimensionMismatch => "objects of different dimensions",
            Self::NotANumber => "value is not a finite number",
            Self::OutOfBounds => "ran out of bounds",
            Self::OpenFile => "unable to open file",
            Self::ElementNotFound => "element not found",
            Self::InvalidParameter => "invalid parameters passed",
            Self::Unknown => "unknown error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Error type for vectors, sets, boxes, iterators and the sink.
#[derive(Debug)]
pub enum GeomError {
    /// The diagnostic sink was torn down (its last client detached).
    SinkDetached,
    ZeroDimension,
    DimensionMismatch { expected: usize, found: usize },
    NotANumber { what: &'static str },
    IndexOutOfBounds { index: usize, len: usize },
    /// A grid iterator stepped past its last lattice point.
    Exhausted,
    OpenFile { path: PathBuf, source: std::io::Error },
    ElementNotFound,
    InvalidParameter { reason: String },
    /// Union requested for boxes whose corners are not stackable.
    NotStackable { reason: String },
    /// Intersection or union requested for boxes that do not overlap.
    Disjoint,
}

impl GeomError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }

    pub(crate) fn not_stackable(reason: impl Into<String>) -> Self {
        Self::NotStackable {
            reason: reason.into(),
        }
    }

    #[inline]
    pub(crate) fn dims(expected: usize, found: usize) -> Self {
        Self::DimensionMismatch { expected, found }
    }

    /// Flat code reported to the diagnostic sink.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::SinkDetached => ErrorCode::NullArgument,
            Self::ZeroDimension => ErrorCode::ZeroDimension,
            Self::DimensionMismatch { .. } => ErrorCode::DimensionMismatch,
            Self::NotANumber { .. } => ErrorCode::NotANumber,
            Self::IndexOutOfBounds { .. } | Self::Exhausted => ErrorCode::OutOfBounds,
            Self::OpenFile { .. } => ErrorCode::OpenFile,
            Self::ElementNotFound => ErrorCode::ElementNotFound,
            Self::InvalidParameter { .. } | Self::NotStackable { .. } | Self::Disjoint => {
                ErrorCode::InvalidParameter
            }
        }
    }
}

impl fmt::Display for GeomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SinkDetached => write!(f, "diagnostic sink has no registered clients"),
            Self::ZeroDimension => write!(f, "zero dimension object"),
            Self::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Self::NotANumber { what } => write!(f, "{what} is not a finite number"),
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            Self::Exhausted => write!(f, "grid iterator ran past its last lattice point"),
            Self::OpenFile { path, source } => {
                write!(f, "unable to open log file {}: {source}", path.display())
            }
            Self::ElementNotFound => write!(f, "element not found"),
            Self::InvalidParameter { reason } => write!(f, "invalid parameter: {reason}"),
            Self::NotStackable { reason } => write!(f, "boxes are not stackable: {reason}"),
            Self::Disjoint => write!(f, "boxes do not intersect"),
        }
    }
}

impl std::error::Error for GeomError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::OpenFile { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type GeomResult<T> = Result<T, GeomError>;
