//! Bodies of revolution: a profile swept once around the Y axis.
//!
//! Ring `j` holds every profile point rotated by `phi = j * TAU / segments`.
//! There are `segments + 1` rings; the last one repeats the first at `u = 1`
//! so the texture seam gets its own vertices, but no triangle wraps from the
//! last ring back to ring 0.

use std::f64::consts::TAU;

use rayon::prelude::*;
use shapegen_core::{MeshError, Result, Validate};
use shapegen_math::vector::{revolve_normal, revolve_point};
use shapegen_math::{Point2, Point3, Vector3};
use tracing::{debug, warn};

use crate::mesh_data::MeshData;
use crate::params::{LatheParameters, ShapeParameters};
use crate::profile::Profile;

/// Vertex count of a lathe: `(segments + 1) * profile_len`.
pub fn lathe_vertex_count(profile_len: usize, segments: usize) -> Option<usize> {
    segments.checked_add(1)?.checked_mul(profile_len)
}

/// Index count of a lathe: `6 * segments * (profile_len - 1)`.
pub fn lathe_index_count(profile_len: usize, segments: usize) -> Option<usize> {
    segments
        .checked_mul(profile_len.checked_sub(1)?)?
        .checked_mul(6)
}

/// `(cos, sin)` of ring `j`. The closing ring reuses angle zero so it lands
/// exactly on ring 0.
fn ring_rotation(j: usize, segments: usize) -> (f64, f64) {
    if j == 0 || j == segments {
        return (1.0, 0.0);
    }
    let (sin, cos) = (j as f64 / segments as f64 * TAU).sin_cos();
    (cos, sin)
}

/// Geometry buffers of a revolved profile, before a parameter echo is attached.
pub(crate) struct Revolved {
    pub positions: Vec<Point3>,
    pub normals: Vec<Vector3>,
    pub uvs: Vec<Point2>,
    pub indices: Vec<u32>,
}

impl Revolved {
    pub fn into_mesh(self, parameters: ShapeParameters) -> MeshData {
        MeshData {
            positions: self.positions,
            normals: self.normals,
            uvs: self.uvs,
            indices: self.indices,
            parameters,
        }
    }
}

/// Revolve `profile` into `segments` sides.
///
/// Requires at least 2 profile points and 1 segment; callers validate the
/// stricter public limits first.
pub(crate) fn revolve(profile: &Profile, segments: usize) -> Result<Revolved> {
    let n = profile.len();
    debug_assert!(n >= 2 && segments >= 1);

    let vertex_count =
        lathe_vertex_count(n, segments).ok_or(MeshError::TooManyVertices { count: usize::MAX })?;
    if vertex_count > u32::MAX as usize {
        return Err(MeshError::TooManyVertices {
            count: vertex_count,
        });
    }
    let index_count =
        lathe_index_count(n, segments).ok_or(MeshError::TooManyVertices { count: vertex_count })?;

    let points = profile.points();
    let (profile_normals, fallbacks) = profile.normals();
    if fallbacks > 0 {
        warn!(
            fallbacks,
            "degenerate profile tangents, using axis-aligned normals"
        );
    }

    let mut positions = vec![Point3::ZERO; vertex_count];
    let mut normals = vec![Vector3::ZERO; vertex_count];
    let mut uvs = vec![Point2::ZERO; vertex_count];
    let mut indices = vec![0u32; index_count];

    let v_span = (n - 1) as f64;
    positions
        .par_chunks_mut(n)
        .zip(normals.par_chunks_mut(n))
        .zip(uvs.par_chunks_mut(n))
        .enumerate()
        .for_each(|(j, ((ring_positions, ring_normals), ring_uvs))| {
            let (cos_phi, sin_phi) = ring_rotation(j, segments);
            let u = j as f64 / segments as f64;
            for i in 0..n {
                ring_positions[i] = revolve_point(points[i], cos_phi, sin_phi);
                ring_normals[i] = revolve_normal(profile_normals[i], cos_phi, sin_phi);
                ring_uvs[i] = Point2::new(u, 1.0 - i as f64 / v_span);
            }
        });

    // Same cell winding as the box patches, with rings as columns.
    indices
        .par_chunks_mut(6 * (n - 1))
        .enumerate()
        .for_each(|(j, band)| {
            let ring = (j * n) as u32;
            let next_ring = ((j + 1) * n) as u32;
            for (i, tri) in band.chunks_exact_mut(6).enumerate() {
                let i = i as u32;
                let a = ring + i;
                let b = ring + i + 1;
                let c = next_ring + i + 1;
                let d = next_ring + i;
                tri.copy_from_slice(&[a, b, d, b, c, d]);
            }
        });

    Ok(Revolved {
        positions,
        normals,
        uvs,
        indices,
    })
}

/// Revolve an arbitrary profile around the Y axis.
pub fn build_lathe(params: &LatheParameters) -> Result<MeshData> {
    params.validate()?;

    let profile = Profile::new(params.points.clone());
    let mesh = revolve(&profile, params.segments as usize)?
        .into_mesh(ShapeParameters::Lathe(params.clone()));

    debug!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        profile_points = profile.len(),
        segments = params.segments,
        "built lathe mesh"
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use shapegen_math::dvec2;

    fn tube() -> LatheParameters {
        LatheParameters::new(vec![dvec2(1.0, -1.0), dvec2(1.0, 0.0), dvec2(1.0, 1.0)], 4)
    }

    #[test]
    fn test_counts() {
        let mesh = build_lathe(&tube()).unwrap();
        assert_eq!(mesh.vertex_count(), 5 * 3);
        assert_eq!(mesh.indices.len(), 6 * 4 * 2);
        assert_eq!(lathe_vertex_count(3, 4), Some(15));
        assert_eq!(lathe_index_count(3, 4), Some(48));
        assert_eq!(lathe_index_count(0, 4), None);
    }

    #[test]
    fn test_ring_positions() {
        let mesh = build_lathe(&tube()).unwrap();
        // Ring 1 is a quarter turn: +x maps to +z.
        assert_abs_diff_eq!(mesh.positions[3].x, 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(mesh.positions[3].z, 1.0, epsilon = 1e-15);
        assert_eq!(mesh.positions[3].y, -1.0);
    }

    #[test]
    fn test_closing_ring_matches_first() {
        let mesh = build_lathe(&tube()).unwrap();
        assert_eq!(mesh.positions[..3], mesh.positions[12..]);
        assert_eq!(mesh.normals[..3], mesh.normals[12..]);
        assert_eq!(mesh.uvs[0], dvec2(0.0, 1.0));
        assert_eq!(mesh.uvs[14], dvec2(1.0, 0.0));
    }

    #[test]
    fn test_indices_never_wrap() {
        let mesh = build_lathe(&tube()).unwrap();
        assert_eq!(&mesh.indices[..6], &[0, 1, 3, 1, 4, 3]);
        assert_eq!(*mesh.indices.iter().max().unwrap(), 14);
    }

    #[test]
    fn test_tube_faces_outward() {
        let mesh = build_lathe(&tube()).unwrap();
        for tri in mesh.triangles() {
            let [p0, p1, p2] = tri.map(|i| mesh.positions[i as usize]);
            let n = (p1 - p0).cross(p2 - p0);
            let radial = ((p0 + p1 + p2) / 3.0) * Vector3::new(1.0, 0.0, 1.0);
            assert!(n.dot(radial) > 0.0, "Triangle {:?} winds inward", tri);
        }
        for n in &mesh.normals {
            assert_abs_diff_eq!(n.y, 0.0, epsilon = 1e-15);
            assert_abs_diff_eq!(n.length(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_rejects_two_segments() {
        let mut params = tube();
        params.segments = 2;
        assert_eq!(build_lathe(&params).unwrap_err().field(), Some("segments"));
    }

    #[test]
    fn test_default_lathe_builds() {
        let mesh = build_lathe(&LatheParameters::default()).unwrap();
        mesh.validate().unwrap();
        assert_eq!(mesh.vertex_count(), 13 * 3);
    }
}
