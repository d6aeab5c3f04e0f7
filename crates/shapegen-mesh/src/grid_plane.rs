//! Subdivided rectangular patches, the building block of box faces.
//!
//! A patch is laid out in its own `(u, v, w)` frame and mapped onto world
//! axes by a [`FaceOrientation`]. Vertices are written row-major (rows along
//! v, columns along u) into caller-provided slices, so several patches can be
//! carved out of one pre-sized buffer and filled independently.

use shapegen_math::{Point2, Point3, Vector3};

/// A world axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Which side of the w axis a patch faces.
///
/// The normal's sign comes from this, not from the sign of the patch offset,
/// so a box face keeps pointing outward when its depth is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Positive,
    Negative,
}

impl Facing {
    pub fn sign(self) -> f64 {
        match self {
            Facing::Positive => 1.0,
            Facing::Negative => -1.0,
        }
    }
}

/// Placement and resolution of one patch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceOrientation {
    pub u: Axis,
    pub v: Axis,
    pub w: Axis,
    /// Direction of increasing grid column along `u` (+1 or -1).
    pub u_dir: f64,
    /// Direction of increasing grid row along `v` (+1 or -1).
    pub v_dir: f64,
    pub width: f64,
    pub height: f64,
    /// Full extent along `w`; the patch sits at `facing * depth / 2`.
    pub depth: f64,
    pub facing: Facing,
    pub grid_x: usize,
    pub grid_y: usize,
}

impl FaceOrientation {
    pub fn vertex_count(&self) -> usize {
        (self.grid_x + 1) * (self.grid_y + 1)
    }

    pub fn index_count(&self) -> usize {
        self.grid_x * self.grid_y * 6
    }

    fn compose(&self, u: f64, v: f64, w: f64) -> Point3 {
        let mut xyz = [0.0; 3];
        xyz[self.u.index()] = u;
        xyz[self.v.index()] = v;
        xyz[self.w.index()] = w;
        Point3::from_array(xyz)
    }

    /// Constant outward normal of the patch.
    pub fn normal(&self) -> Vector3 {
        self.compose(0.0, 0.0, self.facing.sign())
    }
}

/// Disjoint output slices for one patch (or the remainder of a shared buffer).
#[derive(Debug)]
pub struct PatchBuffers<'a> {
    pub positions: &'a mut [Point3],
    pub normals: &'a mut [Vector3],
    pub uvs: &'a mut [Point2],
    pub indices: &'a mut [u32],
    /// Index of `positions[0]` in the final mesh.
    pub base_vertex: u32,
}

impl<'a> PatchBuffers<'a> {
    /// Split the first `vertex_count` vertices and `index_count` indices off
    /// the front of these buffers.
    ///
    /// The returned patch records its offset in the shared vertex buffer and
    /// `self` advances past it.
    pub fn take_front(&mut self, vertex_count: usize, index_count: usize) -> PatchBuffers<'a> {
        let (positions, rest) = std::mem::take(&mut self.positions).split_at_mut(vertex_count);
        self.positions = rest;
        let (normals, rest) = std::mem::take(&mut self.normals).split_at_mut(vertex_count);
        self.normals = rest;
        let (uvs, rest) = std::mem::take(&mut self.uvs).split_at_mut(vertex_count);
        self.uvs = rest;
        let (indices, rest) = std::mem::take(&mut self.indices).split_at_mut(index_count);
        self.indices = rest;

        let base_vertex = self.base_vertex;
        self.base_vertex += vertex_count as u32;
        PatchBuffers {
            positions,
            normals,
            uvs,
            indices,
            base_vertex,
        }
    }
}

/// Fill `out` with the vertices and triangles of one patch.
///
/// Each grid cell with corners `a` (ix, iy), `b` (ix, iy+1), `c` (ix+1, iy+1)
/// and `d` (ix+1, iy) becomes triangles `(a, b, d)` and `(b, c, d)`. With the
/// orientation signs chosen per face this winding is counter-clockwise seen
/// from outside.
///
/// `out` must hold exactly `face.vertex_count()` vertices and
/// `face.index_count()` indices, and both grid dimensions must be at least 1.
pub fn build_plane(face: &FaceOrientation, out: PatchBuffers<'_>) {
    debug_assert!(face.grid_x >= 1 && face.grid_y >= 1);
    debug_assert_eq!(out.positions.len(), face.vertex_count());
    debug_assert_eq!(out.indices.len(), face.index_count());

    let grid_x1 = face.grid_x + 1;
    let segment_width = face.width / face.grid_x as f64;
    let segment_height = face.height / face.grid_y as f64;
    let width_half = face.width / 2.0;
    let height_half = face.height / 2.0;
    let depth_half = face.facing.sign() * face.depth / 2.0;
    let normal = face.normal();

    let rows = out
        .positions
        .chunks_exact_mut(grid_x1)
        .zip(out.normals.chunks_exact_mut(grid_x1))
        .zip(out.uvs.chunks_exact_mut(grid_x1));
    for (iy, ((positions, normals), uvs)) in rows.enumerate() {
        let y = iy as f64 * segment_height - height_half;
        let uv_v = 1.0 - iy as f64 / face.grid_y as f64;
        for ix in 0..grid_x1 {
            let x = ix as f64 * segment_width - width_half;
            positions[ix] = face.compose(x * face.u_dir, y * face.v_dir, depth_half);
            normals[ix] = normal;
            uvs[ix] = Point2::new(ix as f64 / face.grid_x as f64, uv_v);
        }
    }

    let base = out.base_vertex;
    let corner = |ix: usize, iy: usize| base + (ix + grid_x1 * iy) as u32;
    let cells = (0..face.grid_y).flat_map(|iy| (0..face.grid_x).map(move |ix| (ix, iy)));
    for ((ix, iy), tri) in cells.zip(out.indices.chunks_exact_mut(6)) {
        let a = corner(ix, iy);
        let b = corner(ix, iy + 1);
        let c = corner(ix + 1, iy + 1);
        let d = corner(ix + 1, iy);
        tri.copy_from_slice(&[a, b, d, b, c, d]);
    }
}
