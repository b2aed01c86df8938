//! Curated API surface (UNSTABLE).
//!
//! Prefer these re-exports over deep module paths in binaries and benches.

// vectors and sets
pub use crate::set::VectorSet;
pub use crate::vector::{Norm, Vector};
// boxes and lattice walks
pub use crate::compact::{Compact, GridCursor, GridIter, LatticePoints, Orientation, Region};
// diagnostics
pub use crate::logger::{ClientId, LogRecord, Logger, SinkClient};
// defaults and errors
pub use crate::cfg::{GeomCfg, DEFAULT_ACCURACY, DEFAULT_NORM};
pub use crate::error::{ErrorCode, GeomError, GeomResult};
