//! 2D cross-section profiles for bodies of revolution.

use shapegen_math::vector::{profile_normal, quarter_turn};
use shapegen_math::{Point2, Vector2};

/// Ordered polyline in the `(distance from axis, height)` plane, traced from
/// the bottom of the solid to the top.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    points: Vec<Point2>,
}

impl Profile {
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// Capsule cross-section: the bottom hemisphere arc from the south pole to
    /// the equator, then the top arc from the equator to the north pole.
    ///
    /// Each arc has `cap_segments + 1` points centered at `(0, -length/2)` and
    /// `(0, length/2)`. The cylinder wall is the span between the two equator
    /// points; when `length` is zero those points coincide and the profile is
    /// a semicircle.
    pub fn capsule(radius: f64, length: f64, cap_segments: usize) -> Self {
        let half_length = length / 2.0;
        let mut points = Vec::with_capacity(2 * (cap_segments + 1));

        // Angles 3PI/2..2PI: (cos, sin) = (sin t, -cos t) of the quarter turn.
        points.extend((0..=cap_segments).map(|i| {
            let (cos, sin) = quarter_turn(i as f64 / cap_segments as f64);
            Point2::new(sin * radius, -cos * radius - half_length)
        }));
        // Angles 0..PI/2.
        points.extend((0..=cap_segments).map(|i| {
            let (cos, sin) = quarter_turn(i as f64 / cap_segments as f64);
            Point2::new(cos * radius, sin * radius + half_length)
        }));

        Self { points }
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Tangent at point `i`: forward difference at the first point, backward
    /// difference at the last, central difference elsewhere.
    pub fn tangent(&self, i: usize) -> Vector2 {
        let last = self.points.len() - 1;
        let prev = i.saturating_sub(1);
        let next = (i + 1).min(last);
        self.points[next] - self.points[prev]
    }

    /// Unit outward normals, one per point, plus the number of points whose
    /// tangent vanished.
    ///
    /// Where the tangent has zero length the normal falls back to the axis
    /// direction: down for the first half of the profile, up for the rest.
    pub fn normals(&self) -> (Vec<Vector2>, usize) {
        let half = self.points.len() / 2;
        let mut fallbacks = 0;
        let normals = (0..self.points.len())
            .map(|i| {
                profile_normal(self.tangent(i)).unwrap_or_else(|| {
                    fallbacks += 1;
                    if i < half {
                        Vector2::NEG_Y
                    } else {
                        Vector2::Y
                    }
                })
            })
            .collect();
        (normals, fallbacks)
    }
}
