//! Mesh resources
//!
//! Authored geometry ([`MeshDefinition`]) is validated and frozen into a
//! shared, immutable [`Mesh`] by the [`MeshRegistry`]. Entities refer to
//! meshes by name; any number of them can share one mesh.

mod vertex;
mod geometry;
mod registry;

pub use vertex::Vertex;
pub use geometry::{Aabb, Mesh, MeshDefinition, MeshDefinitionBuilder, Triangle};
pub use registry::{MeshHandle, MeshRegistry};
