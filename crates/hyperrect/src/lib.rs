//! Axis-aligned hyperrectangle geometry on top of `nalgebra` vectors.
//!
//! Layout
//! - `vector`: dynamically sized `f64` vectors with norms and tolerance equality.
//! - `set`: tolerance-based vector sets and their set algebra.
//! - `compact`: boxes, lattice iterators, union/intersection/convex.
//! - `logger`: the diagnostic sink every fallible operation reports to.
//! - `cfg`, `error`: defaults and the shared error type.
//!
//! API Policy
//! - `api` and `prelude` are the curated import surfaces. Module paths may move.

pub mod api;
pub mod cfg;
pub mod compact;
pub mod error;
pub mod logger;
pub mod set;
pub mod vector;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::GeomCfg;
pub use error::{ErrorCode, GeomError, GeomResult};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cfg::{GeomCfg, DEFAULT_ACCURACY};
    pub use crate::compact::{Compact, GridCursor, GridIter, Orientation, Region};
    pub use crate::error::{ErrorCode, GeomError, GeomResult};
    pub use crate::logger::Logger;
    pub use crate::set::VectorSet;
    pub use crate::vector::{Norm, Vector};
}
