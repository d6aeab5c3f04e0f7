use shapegen_core::{BoundingBox, MeshError, Result, Validate};
use shapegen_math::{Aabb3, Point2, Point3, Vector3};

use crate::params::ShapeParameters;

/// Indexed triangle mesh produced by one builder call.
///
/// `positions`, `normals` and `uvs` are parallel per-vertex arrays. `indices`
/// is a triangle list with counter-clockwise front faces.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub positions: Vec<Point3>,
    pub normals: Vec<Vector3>,
    pub uvs: Vec<Point2>,
    pub indices: Vec<u32>,
    /// The validated parameters this mesh was generated from.
    ///
    /// Segment counts are stored after truncation, so a fractional count such
    /// as `2.6` reads back as `2`.
    pub parameters: ShapeParameters,
}

impl MeshData {
    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Rebuild the mesh from its parameter echo.
    pub fn regenerate(&self) -> Result<MeshData> {
        self.parameters.build()
    }
}

impl BoundingBox for MeshData {
    type Bounds = Aabb3;

    /// Zero-sized box at the origin when the mesh has no vertices.
    fn bounding_box(&self) -> Aabb3 {
        Aabb3::from_points(&self.positions).unwrap_or_else(Aabb3::zero)
    }
}

impl Validate for MeshData {
    fn validate(&self) -> Result<()> {
        let n = self.positions.len();
        if self.normals.len() != n {
            return Err(MeshError::Topology(format!(
                "{} normals for {} positions",
                self.normals.len(),
                n
            )));
        }
        if self.uvs.len() != n {
            return Err(MeshError::Topology(format!(
                "{} uvs for {} positions",
                self.uvs.len(),
                n
            )));
        }
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::Topology(format!(
                "Index count {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        if let Some((at, &idx)) = self
            .indices
            .iter()
            .enumerate()
            .find(|(_, &idx)| idx as usize >= n)
        {
            return Err(MeshError::Topology(format!(
                "Index {} at position {} out of bounds (n={})",
                idx, at, n
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::BoxParameters;
    use shapegen_math::{dvec2, DVec3};

    fn single_triangle() -> MeshData {
        MeshData {
            positions: vec![
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(1.0, 0.0, 0.0),
                DVec3::new(0.0, 1.0, 0.0),
            ],
            normals: vec![DVec3::Z; 3],
            uvs: vec![dvec2(0.0, 0.0), dvec2(1.0, 0.0), dvec2(0.0, 1.0)],
            indices: vec![0, 1, 2],
            parameters: ShapeParameters::Box(BoxParameters::default()),
        }
    }

    #[test]
    fn test_vertex_and_triangle_count() {
        let mesh = single_triangle();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.triangles().collect::<Vec<_>>(), vec![[0, 1, 2]]);
    }

    #[test]
    fn test_bounding_box() {
        let mesh = single_triangle();
        let bb = mesh.bounding_box();
        assert_eq!(bb.min, DVec3::new(0.0, 0.0, 0.0));
        assert_eq!(bb.max, DVec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_validate_ok() {
        single_triangle().validate().unwrap();
    }

    #[test]
    fn test_validate_index_out_of_bounds() {
        let mut mesh = single_triangle();
        mesh.indices[2] = 3;
        let err = mesh.validate().unwrap_err();
        assert!(err.to_string().contains("out of bounds"), "{}", err);
    }

    #[test]
    fn test_validate_partial_triangle() {
        let mut mesh = single_triangle();
        mesh.indices.push(0);
        assert!(matches!(mesh.validate(), Err(MeshError::Topology(_))));
    }

    #[test]
    fn test_validate_length_mismatch() {
        let mut mesh = single_triangle();
        mesh.uvs.pop();
        assert!(matches!(mesh.validate(), Err(MeshError::Topology(_))));
    }
}
