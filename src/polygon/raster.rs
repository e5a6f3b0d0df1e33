//! Scanline rasterization of rings.
//!
//! A ring hands its boundary to a [`ScanlineSink`], which decides where the
//! scanlines are and what to record at each crossing. The first ring handed
//! to a sink also sets the vertical limits the sink works within.

use super::ring::Ring;
use crate::primitives::Point2;
use num_traits::Float;

/// Vertical limits of a rasterized boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanlineLimits<F> {
    /// Lowest vertex y.
    pub y_min: F,
    /// Highest vertex y.
    pub y_max: F,
    /// Number of direction changes in y along the boundary, plus one.
    /// Bounds the number of crossings on any single scanline.
    pub polarity_changes: usize,
}

/// Receiver of ring boundaries during rasterization.
pub trait ScanlineSink<F> {
    /// Returns `true` once [`set_limits`](Self::set_limits) has been called.
    fn limits_are_set(&self) -> bool;

    /// Fixes the vertical range the sink works within.
    fn set_limits(&mut self, limits: ScanlineLimits<F>);

    /// Receives a closed point list (first point repeated at the end).
    fn add_crossing_points(&mut self, points: &[Point2<F>]);
}

impl<F: Float> Ring<F> {
    /// Rasterizes the ring into `sink`, setting its limits first if needed.
    pub fn rasterize<S: ScanlineSink<F>>(&self, sink: &mut S) {
        let points = self.points();
        if points.len() < 3 {
            return;
        }
        if !sink.limits_are_set() {
            sink.set_limits(scanline_limits(points));
        }
        sink.add_crossing_points(points);
    }
}

fn scanline_limits<F: Float>(points: &[Point2<F>]) -> ScanlineLimits<F> {
    let mut y_min = points[0].y;
    let mut y_max = y_min;

    // Leading horizontal run.
    let skip = points
        .windows(2)
        .position(|w| w[0].y != w[1].y)
        .unwrap_or(points.len() - 1);

    let mut polarity_changes = 1;
    let mut polarity: Option<bool> = None;

    for w in points[skip..].windows(2) {
        let (a, b) = (w[0], w[1]);
        if a.y == b.y {
            continue;
        }
        let rising = a.y < b.y;
        match polarity {
            Some(p) if p != rising => {
                polarity_changes += 1;
                polarity = Some(rising);
            }
            None => polarity = Some(rising),
            _ => {}
        }
        y_min = y_min.min(a.y);
        y_max = y_max.max(a.y);
    }

    ScanlineLimits {
        y_min,
        y_max,
        polarity_changes,
    }
}

/// Reference sink: crossings of the handed boundaries with evenly spaced
/// horizontal lines.
///
/// Lines sit at `y_min + (k + 1/2) * spacing` for every `k` that keeps them
/// below `y_max`. A segment crosses a line when the line's y lies in the
/// half-open span between its end points, so shared vertices count once.
#[derive(Debug, Clone)]
pub struct CrossingScanlines<F> {
    spacing: F,
    limits: Option<ScanlineLimits<F>>,
    lines: Vec<Vec<F>>,
}

impl<F: Float> CrossingScanlines<F> {
    /// Creates an empty sink. `spacing` must be positive.
    pub fn new(spacing: F) -> Self {
        Self {
            spacing,
            limits: None,
            lines: Vec::new(),
        }
    }

    /// Returns the limits, once a ring has set them.
    pub fn limits(&self) -> Option<ScanlineLimits<F>> {
        self.limits
    }

    /// Number of scanlines within the limits.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Height of scanline `index`.
    pub fn line_y(&self, index: usize) -> Option<F> {
        let limits = self.limits?;
        let k = F::from(index)?;
        let half = F::from(0.5)?;
        Some(limits.y_min + (k + half) * self.spacing)
    }

    /// Sorted crossing abscissas of every scanline, bottom to top.
    pub fn crossings(&self) -> Vec<Vec<F>> {
        self.lines
            .iter()
            .map(|xs| {
                let mut xs = xs.clone();
                xs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                xs
            })
            .collect()
    }
}

impl<F: Float> ScanlineSink<F> for CrossingScanlines<F> {
    fn limits_are_set(&self) -> bool {
        self.limits.is_some()
    }

    fn set_limits(&mut self, limits: ScanlineLimits<F>) {
        self.limits = Some(limits);
        let mut count = 0;
        if self.spacing > F::zero() {
            let half = F::from(0.5).unwrap_or_else(F::zero);
            while let Some(k) = F::from(count) {
                if limits.y_min + (k + half) * self.spacing >= limits.y_max {
                    break;
                }
                count += 1;
            }
        }
        self.lines = vec![Vec::new(); count];
    }

    fn add_crossing_points(&mut self, points: &[Point2<F>]) {
        for index in 0..self.lines.len() {
            let Some(y) = self.line_y(index) else {
                continue;
            };
            for w in points.windows(2) {
                let (a, b) = (w[0], w[1]);
                let spans = (a.y <= y && y < b.y) || (b.y <= y && y < a.y);
                if spans {
                    let t = (y - a.y) / (b.y - a.y);
                    self.lines[index].push(a.x + t * (b.x - a.x));
                }
            }
        }
    }
}
