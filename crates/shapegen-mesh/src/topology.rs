//! Edge-based closedness checks on generated meshes.
//!
//! Builders duplicate vertices along UV seams and box edges, so edges are
//! compared after welding vertices that share a position. Triangles that
//! collapse under welding (the pole fans of a capsule) carry no area and are
//! skipped.

use std::collections::HashMap;

use shapegen_core::Tolerance;
use shapegen_math::Point3;

use crate::mesh_data::MeshData;

/// Summary of how the triangles of a mesh share their edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeReport {
    /// Distinct positions after welding.
    pub welded_vertices: usize,
    /// Triangles that still have three distinct corners after welding.
    pub triangles: usize,
    /// Triangles dropped because two corners welded together.
    pub collapsed_triangles: usize,
    /// Undirected edges used by exactly one triangle.
    pub boundary_edges: usize,
    /// Undirected edges used by more than two triangles.
    pub non_manifold_edges: usize,
    /// Directed edges traversed the same way by two or more triangles.
    pub inconsistent_edges: usize,
}

impl EdgeReport {
    /// Closed, manifold, and consistently wound.
    pub fn is_watertight(&self) -> bool {
        self.boundary_edges == 0 && self.non_manifold_edges == 0 && self.inconsistent_edges == 0
    }
}

fn weld_key(p: Point3, tolerance: Tolerance) -> [i64; 3] {
    (p / tolerance.linear).round().as_i64vec3().to_array()
}

/// Weld vertices by position and classify every edge of the mesh.
pub fn edge_report(mesh: &MeshData, tolerance: Tolerance) -> EdgeReport {
    let mut welded: HashMap<[i64; 3], u32> = HashMap::with_capacity(mesh.vertex_count());
    let remap: Vec<u32> = mesh
        .positions
        .iter()
        .map(|&p| {
            let next = welded.len() as u32;
            *welded.entry(weld_key(p, tolerance)).or_insert(next)
        })
        .collect();

    let mut report = EdgeReport {
        welded_vertices: welded.len(),
        ..EdgeReport::default()
    };

    let mut directed: HashMap<(u32, u32), usize> = HashMap::new();
    for tri in mesh.triangles() {
        let [a, b, c] = tri.map(|i| remap[i as usize]);
        if a == b || b == c || c == a {
            report.collapsed_triangles += 1;
            continue;
        }
        report.triangles += 1;
        for edge in [(a, b), (b, c), (c, a)] {
            *directed.entry(edge).or_insert(0) += 1;
        }
    }

    for (&(from, to), &count) in &directed {
        if count > 1 {
            report.inconsistent_edges += 1;
        }
        // Count each undirected edge once, from its smaller endpoint.
        let reverse = directed.get(&(to, from)).copied().unwrap_or(0);
        if from < to || reverse == 0 {
            match count + reverse {
                1 => report.boundary_edges += 1,
                2 => {}
                _ => report.non_manifold_edges += 1,
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{BoxParameters, ShapeParameters};
    use shapegen_math::{dvec2, dvec3};

    fn quad() -> MeshData {
        MeshData {
            positions: vec![
                dvec3(0.0, 0.0, 0.0),
                dvec3(1.0, 0.0, 0.0),
                dvec3(1.0, 1.0, 0.0),
                dvec3(0.0, 1.0, 0.0),
            ],
            normals: vec![dvec3(0.0, 0.0, 1.0); 4],
            uvs: vec![dvec2(0.0, 0.0); 4],
            indices: vec![0, 1, 2, 0, 2, 3],
            parameters: ShapeParameters::Box(BoxParameters::default()),
        }
    }

    #[test]
    fn test_open_quad_has_boundary() {
        let report = edge_report(&quad(), Tolerance::default());
        assert_eq!(report.triangles, 2);
        assert_eq!(report.boundary_edges, 4);
        assert_eq!(report.inconsistent_edges, 0);
        assert!(!report.is_watertight());
    }

    #[test]
    fn test_flipped_triangle_is_inconsistent() {
        let mut mesh = quad();
        mesh.indices = vec![0, 1, 2, 0, 3, 2];
        let report = edge_report(&mesh, Tolerance::default());
        assert_eq!(report.inconsistent_edges, 1);
    }

    #[test]
    fn test_duplicate_positions_weld() {
        let mut mesh = quad();
        mesh.positions.push(dvec3(1.0, 1.0, 1e-9));
        mesh.normals.push(dvec3(0.0, 0.0, 1.0));
        mesh.uvs.push(dvec2(1.0, 1.0));
        mesh.indices = vec![0, 1, 4, 0, 2, 3];
        let report = edge_report(&mesh, Tolerance::default());
        assert_eq!(report.welded_vertices, 4);
        assert_eq!(report.boundary_edges, 4);
    }

    #[test]
    fn test_collapsed_triangle_skipped() {
        let mut mesh = quad();
        mesh.positions[3] = mesh.positions[0];
        let report = edge_report(&mesh, Tolerance::default());
        assert_eq!(report.collapsed_triangles, 1);
        assert_eq!(report.triangles, 1);
        assert_eq!(report.boundary_edges, 3);
    }

    #[test]
    fn test_tetrahedron_is_watertight() {
        let mut mesh = quad();
        mesh.positions = vec![
            dvec3(0.0, 0.0, 0.0),
            dvec3(1.0, 0.0, 0.0),
            dvec3(0.0, 1.0, 0.0),
            dvec3(0.0, 0.0, 1.0),
        ];
        mesh.indices = vec![0, 2, 1, 0, 1, 3, 0, 3, 2, 1, 2, 3];
        let report = edge_report(&mesh, Tolerance::default());
        assert_eq!(report.triangles, 4);
        assert!(report.is_watertight(), "{:?}", report);
    }
}
