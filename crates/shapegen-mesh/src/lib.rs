//! Triangulated surface meshes for parametric solids.
//!
//! Every builder is a pure function from a validated parameter struct to a
//! freshly allocated [`MeshData`]. Buffers are sized exactly from the
//! parameters before the first vertex is written.

pub mod box_mesh;
pub mod buffers;
pub mod capsule;
pub mod grid_plane;
pub mod lathe;
pub mod mesh_data;
pub mod params;
pub mod profile;
pub mod topology;

pub use box_mesh::{box_index_count, box_vertex_count, build_box};
pub use buffers::{IndexBuffer, IndexFormat, MeshBuffers};
pub use capsule::{build_capsule, capsule_index_count, capsule_vertex_count};
pub use lathe::build_lathe;
pub use mesh_data::MeshData;
pub use params::{BoxParameters, CapsuleParameters, LatheParameters, ShapeParameters};
pub use profile::Profile;
pub use topology::{edge_report, EdgeReport};
