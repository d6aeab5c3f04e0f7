//! Capsules: a hemisphere-capped cylinder revolved from its cross-section.

use shapegen_core::{Result, Validate};
use tracing::debug;

use crate::lathe::{lathe_index_count, lathe_vertex_count, revolve};
use crate::mesh_data::MeshData;
use crate::params::{CapsuleParameters, ShapeParameters};
use crate::profile::Profile;

fn profile_len(params: &CapsuleParameters) -> Option<usize> {
    (params.cap_segments as usize).checked_add(1)?.checked_mul(2)
}

/// `(radial_segments + 1) * 2 * (cap_segments + 1)`
pub fn capsule_vertex_count(params: &CapsuleParameters) -> Option<usize> {
    lathe_vertex_count(profile_len(params)?, params.radial_segments as usize)
}

/// `6 * radial_segments * (2 * (cap_segments + 1) - 1)`
pub fn capsule_index_count(params: &CapsuleParameters) -> Option<usize> {
    lathe_index_count(profile_len(params)?, params.radial_segments as usize)
}

/// Build a capsule centered at the origin with its axis along Y.
///
/// Total height is `length + 2 * radius`. With `length == 0` the result is a
/// UV sphere; with `radius == 0` it collapses onto the axis but keeps finite,
/// unit normals.
pub fn build_capsule(params: &CapsuleParameters) -> Result<MeshData> {
    params.validate()?;

    let profile = Profile::capsule(params.radius, params.length, params.cap_segments as usize);
    let mesh = revolve(&profile, params.radial_segments as usize)?
        .into_mesh(ShapeParameters::Capsule(*params));

    debug!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        cap_segments = params.cap_segments,
        radial_segments = params.radial_segments,
        "built capsule mesh"
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use shapegen_core::{BoundingBox, MeshError};
    use shapegen_math::{dvec3, Vector3};

    #[test]
    fn test_default_counts() {
        let params = CapsuleParameters::default();
        let mesh = build_capsule(&params).unwrap();
        // 9 rings of 10 profile points; 8 * 9 quads.
        assert_eq!(mesh.vertex_count(), 90);
        assert_eq!(mesh.indices.len(), 6 * 8 * 9);
        assert_eq!(capsule_vertex_count(&params), Some(90));
        assert_eq!(capsule_index_count(&params), Some(432));
        mesh.validate().unwrap();
    }

    #[test]
    fn test_extent_along_axis() {
        let mesh = build_capsule(&CapsuleParameters::new(0.5, 2.0, 3, 6)).unwrap();
        let bb = mesh.bounding_box();
        assert_eq!(bb.min.y, -1.5);
        assert_eq!(bb.max.y, 1.5);
        assert_abs_diff_eq!(bb.max.x, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_cylinder_wall_normals_are_horizontal() {
        let params = CapsuleParameters::new(1.0, 4.0, 2, 8);
        let mesh = build_capsule(&params).unwrap();
        let n = 6;
        for j in 0..=8 {
            // Profile indices 2 and 3 are the two equator points.
            for i in [2, 3] {
                let v = j * n + i;
                let p = mesh.positions[v];
                let normal = mesh.normals[v];
                let radial = Vector3::new(p.x, 0.0, p.z).normalize();
                assert!(normal.dot(radial) > 0.9, "vertex {} normal {}", v, normal);
            }
        }
    }

    #[test]
    fn test_poles() {
        let mesh = build_capsule(&CapsuleParameters::new(1.0, 1.0, 4, 8)).unwrap();
        // First profile point of every ring is the south pole.
        for j in 0..=8 {
            assert_eq!(mesh.positions[j * 10], dvec3(0.0, -1.5, 0.0));
            assert_eq!(mesh.positions[j * 10 + 9], dvec3(0.0, 1.5, 0.0));
        }
    }

    #[test]
    fn test_zero_radius_is_finite() {
        let mesh = build_capsule(&CapsuleParameters::new(0.0, 1.0, 3, 5)).unwrap();
        for n in &mesh.normals {
            assert!(n.is_finite());
            assert_abs_diff_eq!(n.length(), 1.0, epsilon = 1e-12);
        }
        assert!(mesh.positions.iter().all(|p| p.x == 0.0 && p.z == 0.0));
    }

    #[test]
    fn test_tiny_radius_normals_are_unit() {
        for radius in [1e-150, 1e-155, 1e-160] {
            let mesh = build_capsule(&CapsuleParameters::new(radius, 0.0, 4, 8)).unwrap();
            for n in &mesh.normals {
                assert_abs_diff_eq!(n.length(), 1.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_zero_everything_is_finite() {
        let mesh = build_capsule(&CapsuleParameters::new(0.0, 0.0, 1, 3)).unwrap();
        assert!(mesh.normals.iter().all(|n| n.is_finite()));
        assert!(mesh.positions.iter().all(|p| p.length() == 0.0));
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        let err = build_capsule(&CapsuleParameters::new(-1.0, 1.0, 4, 8)).unwrap_err();
        assert!(matches!(err, MeshError::InvalidParameter { field: "radius", .. }));
        let err = build_capsule(&CapsuleParameters::new(1.0, 1.0, 4, 0)).unwrap_err();
        assert_eq!(err.field(), Some("radialSegments"));
    }
}
