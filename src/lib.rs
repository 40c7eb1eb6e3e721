//! Core library for 2D CNC cutting layout optimization.
//!
//! - Geometry: rectangles, circles, and rotatable diamonds on an integer
//!   cell grid ([`geometry`], [`grid`]).
//! - Placement oracle: a raster-scan greedy packer ([`packer`]).
//! - Scoring: utilization minus overlap/out-of-bounds/missing penalties
//!   ([`fitness`]).
//! - Search: Ant Colony Optimization ([`aco`]) and a Genetic Algorithm
//!   ([`ga`]) drivers over the placement oracle.
//!
//! Quick example:
//! ```ignore
//! use cutlay_core::{Part, Sheet, ScanConfig, pack};
//!
//! let sheet = Sheet::new(10, 10);
//! let parts = vec![Part::Rectangular { largura: 5, altura: 10, rotacao: 0 }];
//! let layout = pack(sheet, &parts, &ScanConfig::default());
//! assert_eq!(layout.len(), 1);
//! ```

pub mod aco;
pub mod display;
pub mod error;
pub mod fitness;
pub mod ga;
pub mod geometry;
pub mod grid;
pub mod input;
pub mod model;
pub mod packer;
pub mod result;

pub use aco::{aco_optimize, aco_optimize_with, AcoConfig};
pub use display::{DisplaySink, NoopSink};
pub use error::{CutLayError, Result};
pub use fitness::{evaluate, Quality};
pub use ga::{ga_optimize, ga_optimize_with, GaConfig};
pub use model::{Layout, Part, PlacedPart, ScanConfig, Sheet};
pub use packer::pack;
pub use result::OptimizationResult;

/// Convenience prelude for common types and functions.
/// Importing `cutlay_core::prelude::*` brings the primary API into scope.
pub mod prelude {
    pub use crate::aco::{aco_optimize, aco_optimize_with, AcoConfig};
    pub use crate::display::{DisplaySink, NoopSink};
    pub use crate::error::{CutLayError, Result};
    pub use crate::fitness::{evaluate, Quality};
    pub use crate::ga::{ga_optimize, ga_optimize_with, GaConfig};
    pub use crate::model::{Layout, Part, PlacedPart, ScanConfig, Sheet};
    pub use crate::packer::pack;
    pub use crate::result::OptimizationResult;
}
