//! Subdivided axis-aligned box built from six grid patches.

use rayon::prelude::*;
use shapegen_core::{MeshError, Result, Validate};
use shapegen_math::{Point2, Point3, Vector3};
use tracing::{debug, trace};

use crate::grid_plane::{build_plane, Axis, FaceOrientation, Facing, PatchBuffers};
use crate::mesh_data::MeshData;
use crate::params::{BoxParameters, ShapeParameters};

/// Exact vertex count of a box: `2 * [(w+1)(h+1) + (h+1)(d+1) + (d+1)(w+1)]`.
///
/// `None` if the count overflows `usize`.
pub fn box_vertex_count(params: &BoxParameters) -> Option<usize> {
    let w = params.width_segments as usize + 1;
    let h = params.height_segments as usize + 1;
    let d = params.depth_segments as usize + 1;
    let wh = w.checked_mul(h)?;
    let hd = h.checked_mul(d)?;
    let dw = d.checked_mul(w)?;
    wh.checked_add(hd)?.checked_add(dw)?.checked_mul(2)
}

/// Exact index count of a box: `12 * (w*h + h*d + d*w)`.
pub fn box_index_count(params: &BoxParameters) -> Option<usize> {
    let w = params.width_segments as usize;
    let h = params.height_segments as usize;
    let d = params.depth_segments as usize;
    let wh = w.checked_mul(h)?;
    let hd = h.checked_mul(d)?;
    let dw = d.checked_mul(w)?;
    wh.checked_add(hd)?.checked_add(dw)?.checked_mul(12)
}

/// The six faces in output order: +x, -x, +y, -y, +z, -z.
fn box_faces(params: &BoxParameters) -> [FaceOrientation; 6] {
    let (w, h, d) = (params.width, params.height, params.depth);
    let ws = params.width_segments as usize;
    let hs = params.height_segments as usize;
    let ds = params.depth_segments as usize;

    let face = |u, v, w_axis, u_dir, v_dir, width, height, depth, facing, grid_x, grid_y| {
        FaceOrientation {
            u,
            v,
            w: w_axis,
            u_dir,
            v_dir,
            width,
            height,
            depth,
            facing,
            grid_x,
            grid_y,
        }
    };

    use Axis::{X, Y, Z};
    use Facing::{Negative, Positive};
    [
        face(Z, Y, X, -1.0, -1.0, d, h, w, Positive, ds, hs),
        face(Z, Y, X, 1.0, -1.0, d, h, w, Negative, ds, hs),
        face(X, Z, Y, 1.0, 1.0, w, d, h, Positive, ws, ds),
        face(X, Z, Y, 1.0, -1.0, w, d, h, Negative, ws, ds),
        face(X, Y, Z, 1.0, -1.0, w, h, d, Positive, ws, hs),
        face(X, Y, Z, -1.0, -1.0, w, h, d, Negative, ws, hs),
    ]
}

/// Build a box centered at the origin with `width` along X, `height` along Y
/// and `depth` along Z.
///
/// Each face is its own patch, so vertices along box edges are duplicated
/// with per-face normals and UVs. Zero extents give a flattened but
/// well-formed mesh.
pub fn build_box(params: &BoxParameters) -> Result<MeshData> {
    params.validate()?;

    let vertex_count =
        box_vertex_count(params).ok_or(MeshError::TooManyVertices { count: usize::MAX })?;
    if vertex_count > u32::MAX as usize {
        return Err(MeshError::TooManyVertices {
            count: vertex_count,
        });
    }
    let index_count =
        box_index_count(params).ok_or(MeshError::TooManyVertices { count: vertex_count })?;

    let mut positions = vec![Point3::ZERO; vertex_count];
    let mut normals = vec![Vector3::ZERO; vertex_count];
    let mut uvs = vec![Point2::ZERO; vertex_count];
    let mut indices = vec![0u32; index_count];

    let mut rest = PatchBuffers {
        positions: &mut positions,
        normals: &mut normals,
        uvs: &mut uvs,
        indices: &mut indices,
        base_vertex: 0,
    };
    let patches: Vec<_> = box_faces(params)
        .into_iter()
        .map(|face| {
            let out = rest.take_front(face.vertex_count(), face.index_count());
            trace!(
                w = ?face.w,
                facing = ?face.facing,
                base_vertex = out.base_vertex,
                "box face"
            );
            (face, out)
        })
        .collect();
    debug_assert!(rest.positions.is_empty() && rest.indices.is_empty());

    patches
        .into_par_iter()
        .for_each(|(face, out)| build_plane(&face, out));

    debug!(
        vertices = vertex_count,
        triangles = index_count / 3,
        width_segments = params.width_segments,
        height_segments = params.height_segments,
        depth_segments = params.depth_segments,
        "built box mesh"
    );

    Ok(MeshData {
        positions,
        normals,
        uvs,
        indices,
        parameters: ShapeParameters::Box(*params),
    })
}
