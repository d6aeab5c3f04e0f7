//! Small vector helpers shared by the lathe and grid builders.
//!
//! Profiles live in the `(distance from axis, height)` plane and are revolved
//! about the world Y axis. Angles grow from +X towards +Z.

use crate::{Point2, Point3, Vector2, Vector3};

/// Rotate a 2D tangent by -90 degrees, giving `(dy, -dx)`.
///
/// For a profile traced from the bottom of the axis to the top this points
/// away from the axis.
pub fn tangent_to_outward(tangent: Vector2) -> Vector2 {
    Vector2::new(tangent.y, -tangent.x)
}

/// Unit outward normal for a profile tangent, or `None` if the tangent has
/// zero (or non-finite) length.
///
/// The tangent is divided by its largest component first so that squaring it
/// cannot underflow for very small profiles.
pub fn profile_normal(tangent: Vector2) -> Option<Vector2> {
    let outward = tangent_to_outward(tangent);
    let scale = outward.abs().max_element();
    if !scale.is_finite() || scale <= 0.0 {
        return None;
    }
    (outward / scale).try_normalize()
}

/// Revolve a profile point about the Y axis: `(x cos phi, y, x sin phi)`.
pub fn revolve_point(p: Point2, cos_phi: f64, sin_phi: f64) -> Point3 {
    Point3::new(p.x * cos_phi, p.y, p.x * sin_phi)
}

/// Revolve a 2D profile normal about the Y axis.
///
/// The transform is the same as for points; it is kept separate so call sites
/// read as what they compute.
pub fn revolve_normal(n: Vector2, cos_phi: f64, sin_phi: f64) -> Vector3 {
    Vector3::new(n.x * cos_phi, n.y, n.x * sin_phi)
}

/// `(cos, sin)` of `t * PI/2` for `t` in `[0, 1]`, exact at both ends.
///
/// `FRAC_PI_2.cos()` is `6.1e-17`, not zero; arcs that must meet the axis or
/// the equator exactly go through this instead.
pub fn quarter_turn(t: f64) -> (f64, f64) {
    if t <= 0.0 {
        (1.0, 0.0)
    } else if t >= 1.0 {
        (0.0, 1.0)
    } else {
        let (sin, cos) = (t * std::f64::consts::FRAC_PI_2).sin_cos();
        (cos, sin)
    }
}
