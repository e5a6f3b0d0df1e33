//! Results of Boolean operations.
//!
//! A Boolean operation on two rings can produce nothing, a single ring, a
//! ring with holes, or several disjoint pieces. [`Shape`] is the tagged union
//! of those outcomes. Only the single-ring variants are accepted back as
//! operands; the ring kernel has no notion of holes.

use super::boolean;
use super::position::SpatialPosition;
use super::ring::Ring;
use crate::bounds::Aabb2;
use crate::config::BooleanOptions;
use crate::error::BooleanError;
use crate::primitives::Point2;
use num_traits::Float;

/// Discriminant of a [`Shape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Void,
    Simple,
    Rectangle,
    Holed,
    Complex,
}

impl ShapeKind {
    /// Lowercase name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Void => "void",
            ShapeKind::Simple => "simple",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Holed => "holed",
            ShapeKind::Complex => "complex",
        }
    }
}

/// An outer ring with holes strictly inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct HoledShape<F> {
    outer: Ring<F>,
    holes: Vec<Ring<F>>,
}

impl<F: Float> HoledShape<F> {
    /// Creates a holed shape. Holes are expected strictly inside `outer`.
    pub fn new(outer: Ring<F>, holes: Vec<Ring<F>>) -> Self {
        Self { outer, holes }
    }

    /// Returns the outer boundary.
    pub fn outer(&self) -> &Ring<F> {
        &self.outer
    }

    /// Returns the holes.
    pub fn holes(&self) -> &[Ring<F>] {
        &self.holes
    }

    /// Outer area minus the area of every hole.
    pub fn area(&self) -> F {
        self.holes
            .iter()
            .fold(self.outer.area(), |acc, hole| acc - hole.area())
    }

    fn contains(&self, point: Point2<F>) -> bool {
        self.outer.contains(point)
            && self
                .holes
                .iter()
                .all(|hole| hole.spatial_position_of_point(point) == SpatialPosition::Out)
    }
}

/// Several disjoint shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexShape<F> {
    components: Vec<Shape<F>>,
}

impl<F: Float> ComplexShape<F> {
    /// Creates a shape made of disjoint pieces.
    pub fn new(components: Vec<Shape<F>>) -> Self {
        Self { components }
    }

    /// Returns the pieces.
    pub fn components(&self) -> &[Shape<F>] {
        &self.components
    }

    /// Sum of the component areas.
    pub fn area(&self) -> F {
        self.components
            .iter()
            .fold(F::zero(), |acc, shape| acc + shape.area())
    }
}

/// Outcome of a Boolean operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape<F> {
    /// Nothing is left.
    Void,
    /// A single ring.
    Simple(Ring<F>),
    /// A single ring that is an axis-aligned rectangle.
    Rectangle(Ring<F>),
    /// A ring with holes.
    Holed(HoledShape<F>),
    /// Disjoint pieces.
    Complex(ComplexShape<F>),
}

impl<F: Float> Shape<F> {
    /// Wraps a ring, recognizing axis-aligned rectangles.
    pub fn from_ring(ring: Ring<F>) -> Self {
        if ring.represents_rectangle() {
            Shape::Rectangle(ring)
        } else {
            Shape::Simple(ring)
        }
    }

    /// Wraps the rings produced by a decomposition.
    pub fn from_rings(rings: Vec<Ring<F>>) -> Self {
        Self::from_components(rings.into_iter().map(Self::from_ring).collect())
    }

    /// Collapses a list of shapes: no piece is `Void`, one piece is itself,
    /// more become a [`ComplexShape`]. Void pieces are dropped.
    pub fn from_components(components: Vec<Shape<F>>) -> Self {
        let mut components: Vec<_> = components.into_iter().filter(|s| !s.is_void()).collect();
        match components.len() {
            0 => Shape::Void,
            1 => components.pop().unwrap_or(Shape::Void),
            _ => Shape::Complex(ComplexShape::new(components)),
        }
    }

    /// Splits the shape into its top-level pieces.
    pub fn into_components(self) -> Vec<Shape<F>> {
        match self {
            Shape::Void => Vec::new(),
            Shape::Complex(complex) => complex.components,
            other => vec![other],
        }
    }

    /// Returns the variant tag.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Void => ShapeKind::Void,
            Shape::Simple(_) => ShapeKind::Simple,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Holed(_) => ShapeKind::Holed,
            Shape::Complex(_) => ShapeKind::Complex,
        }
    }

    /// Returns `true` for the empty shape.
    #[inline]
    pub fn is_void(&self) -> bool {
        matches!(self, Shape::Void)
    }

    /// Enclosed area: holes are subtracted, pieces are summed.
    pub fn area(&self) -> F {
        match self {
            Shape::Void => F::zero(),
            Shape::Simple(ring) | Shape::Rectangle(ring) => ring.area(),
            Shape::Holed(holed) => holed.area(),
            Shape::Complex(complex) => complex.area(),
        }
    }

    /// Bounding box, `None` for `Void`.
    pub fn extent(&self) -> Option<Aabb2<F>> {
        match self {
            Shape::Void => None,
            Shape::Simple(ring) | Shape::Rectangle(ring) => Some(ring.extent()),
            Shape::Holed(holed) => Some(holed.outer.extent()),
            Shape::Complex(complex) => complex
                .components
                .iter()
                .filter_map(Shape::extent)
                .reduce(Aabb2::union),
        }
    }

    /// Returns true if `point` lies strictly inside the shape.
    pub fn contains(&self, point: Point2<F>) -> bool {
        match self {
            Shape::Void => false,
            Shape::Simple(ring) | Shape::Rectangle(ring) => ring.contains(point),
            Shape::Holed(holed) => holed.contains(point),
            Shape::Complex(complex) => complex.components.iter().any(|s| s.contains(point)),
        }
    }

    /// Outer boundaries of every piece, holes excluded.
    pub fn outer_rings(&self) -> Vec<&Ring<F>> {
        match self {
            Shape::Void => Vec::new(),
            Shape::Simple(ring) | Shape::Rectangle(ring) => vec![ring],
            Shape::Holed(holed) => vec![&holed.outer],
            Shape::Complex(complex) => complex
                .components
                .iter()
                .flat_map(Shape::outer_rings)
                .collect(),
        }
    }

    /// Returns the number of top-level pieces.
    pub fn component_count(&self) -> usize {
        match self {
            Shape::Void => 0,
            Shape::Complex(complex) => complex.components.len(),
            _ => 1,
        }
    }

    /// The single ring of a `Simple` or `Rectangle` shape.
    pub fn as_ring(&self) -> Option<&Ring<F>> {
        match self {
            Shape::Simple(ring) | Shape::Rectangle(ring) => Some(ring),
            _ => None,
        }
    }

    /// Returns the extent of a `Rectangle` shape.
    pub fn as_rectangle_extent(&self) -> Option<Aabb2<F>> {
        match self {
            Shape::Rectangle(ring) => Some(ring.extent()),
            _ => None,
        }
    }

    /// Computes `self - other`.
    pub fn differentiate(&self, other: &Shape<F>) -> Result<Shape<F>, BooleanError> {
        self.differentiate_with(other, &BooleanOptions::default())
    }

    /// Computes `self - other` with explicit options.
    pub fn differentiate_with(
        &self,
        other: &Shape<F>,
        options: &BooleanOptions,
    ) -> Result<Shape<F>, BooleanError> {
        if self.is_void() {
            return Ok(Shape::Void);
        }
        if other.is_void() {
            return Ok(self.clone());
        }
        let (ring, given) = ring_operands(self, other)?;
        boolean::differentiate_with(ring, given, options)
    }

    /// Computes `other - self`.
    pub fn differentiate_from(&self, other: &Shape<F>) -> Result<Shape<F>, BooleanError> {
        self.differentiate_from_with(other, &BooleanOptions::default())
    }

    /// Computes `other - self` with explicit options.
    pub fn differentiate_from_with(
        &self,
        other: &Shape<F>,
        options: &BooleanOptions,
    ) -> Result<Shape<F>, BooleanError> {
        if other.is_void() {
            return Ok(Shape::Void);
        }
        if self.is_void() {
            return Ok(other.clone());
        }
        let (ring, given) = ring_operands(self, other)?;
        boolean::differentiate_from_with(ring, given, options)
    }

    /// Computes the area common to both shapes.
    pub fn intersect(&self, other: &Shape<F>) -> Result<Shape<F>, BooleanError> {
        self.intersect_with(other, &BooleanOptions::default())
    }

    /// Computes the intersection with explicit options.
    pub fn intersect_with(
        &self,
        other: &Shape<F>,
        options: &BooleanOptions,
    ) -> Result<Shape<F>, BooleanError> {
        if self.is_void() || other.is_void() {
            return Ok(Shape::Void);
        }
        let (ring, given) = ring_operands(self, other)?;
        boolean::intersect_with(ring, given, options)
    }

    /// Computes the area covered by either shape.
    pub fn unify(&self, other: &Shape<F>) -> Result<Shape<F>, BooleanError> {
        self.unify_with(other, &BooleanOptions::default())
    }

    /// Computes the union with explicit options.
    pub fn unify_with(
        &self,
        other: &Shape<F>,
        options: &BooleanOptions,
    ) -> Result<Shape<F>, BooleanError> {
        if self.is_void() {
            return Ok(other.clone());
        }
        if other.is_void() {
            return Ok(self.clone());
        }
        let (ring, given) = ring_operands(self, other)?;
        boolean::unify_with(ring, given, options)
    }

    /// Computes the area covered by exactly one of the shapes.
    pub fn symmetric_difference(&self, other: &Shape<F>) -> Result<Shape<F>, BooleanError> {
        self.symmetric_difference_with(other, &BooleanOptions::default())
    }

    /// Computes the symmetric difference with explicit options.
    pub fn symmetric_difference_with(
        &self,
        other: &Shape<F>,
        options: &BooleanOptions,
    ) -> Result<Shape<F>, BooleanError> {
        if self.is_void() {
            return Ok(other.clone());
        }
        if other.is_void() {
            return Ok(self.clone());
        }
        let (ring, given) = ring_operands(self, other)?;
        boolean::symmetric_difference_with(ring, given, options)
    }
}

impl<F: Float> From<Ring<F>> for Shape<F> {
    fn from(ring: Ring<F>) -> Self {
        Shape::from_ring(ring)
    }
}

fn ring_operands<'a, F: Float>(
    a: &'a Shape<F>,
    b: &'a Shape<F>,
) -> Result<(&'a Ring<F>, &'a Ring<F>), BooleanError> {
    let unsupported = |shape: &Shape<F>| BooleanError::UnsupportedOperand {
        kind: shape.kind().name(),
    };
    let ring = a.as_ring().ok_or_else(|| unsupported(a))?;
    let given = b.as_ring().ok_or_else(|| unsupported(b))?;
    Ok((ring, given))
}
