//! ringops - Tolerance-aware Boolean operations on polygon rings
//!
//! Rings are closed point sequences compared under an explicit tolerance:
//! points closer than the tolerance are the same point, and a point that
//! close to a boundary is on it. Boolean operations (difference,
//! intersection, union, symmetric difference) on two rings return a
//! [`Shape`], which is empty, a single ring, a ring with holes, or several
//! disjoint pieces.
//!
//! # Example
//!
//! ```
//! use ringops::{intersect, Ring, ShapeKind};
//!
//! let a = Ring::rectangle(0.0, 0.0, 2.0, 2.0).unwrap();
//! let b = Ring::rectangle(1.0, 1.0, 3.0, 3.0).unwrap();
//!
//! let common = intersect(&a, &b).unwrap();
//! assert_eq!(common.kind(), ShapeKind::Rectangle);
//! assert_eq!(common.area(), 1.0);
//! ```

pub mod bounds;
pub mod config;
pub mod error;
pub mod polygon;
pub mod primitives;
pub mod tolerance;

pub use bounds::Aabb2;
pub use config::BooleanOptions;
pub use error::{BooleanError, DecompositionFailure, GeometryError};
pub use polygon::{
    differentiate, differentiate_from, intersect, symmetric_difference, unify, Ring, Shape,
    ShapeKind, SpatialPosition, Winding,
};
pub use primitives::{Affine2, Point2, Segment2, Vec2};
pub use tolerance::{orient2d, Orientation, SegmentIntersection, Tolerance};
