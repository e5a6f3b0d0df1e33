//! Ring extents.

mod aabb;

pub use aabb::Aabb2;
