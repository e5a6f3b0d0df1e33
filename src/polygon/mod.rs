//! Rings and tolerance-aware Boolean operations on them.
//!
//! The pipeline for two rings is:
//! - [`find_interactions`] inserts every crossing and touch point into both
//!   boundaries and reports whether a walk is needed,
//! - the decomposition walk follows the augmented boundaries, switching
//!   ring wherever the result's boundary does,
//! - the traced fragments are assembled into a [`Shape`].
//!
//! # Example
//!
//! ```
//! use ringops::polygon::{differentiate, Ring, ShapeKind};
//!
//! let outer = Ring::rectangle(0.0, 0.0, 10.0, 10.0).unwrap();
//! let inner = Ring::rectangle(2.0, 2.0, 4.0, 4.0).unwrap();
//!
//! let holed = differentiate(&outer, &inner).unwrap();
//! assert_eq!(holed.kind(), ShapeKind::Holed);
//! assert_eq!(holed.area(), 96.0);
//! ```

mod boolean;
mod contiguity;
mod decompose;
mod interaction;
mod position;
mod raster;
mod ring;
mod scan;
mod scan2;
mod shape;

pub use boolean::{
    differentiate, differentiate_from, differentiate_from_with, differentiate_with, intersect,
    intersect_with, symmetric_difference, symmetric_difference_with, unify, unify_with,
};
pub use interaction::{find_interactions, insert_self_touch_points, Interactions, Operation};
pub use position::{
    classify_point, classify_segment_midpoint, classify_segment_strict, SpatialPosition,
};
pub use raster::{CrossingScanlines, ScanlineLimits, ScanlineSink};
pub use ring::{Ring, Winding};
pub use shape::{ComplexShape, HoledShape, Shape, ShapeKind};
