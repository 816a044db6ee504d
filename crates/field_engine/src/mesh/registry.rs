//! Named mesh registry
//!
//! Turns [`MeshDefinition`]s into shared [`Mesh`] resources. Names are
//! unique: registering a taken name fails unless the caller explicitly
//! asks to replace it.

use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use super::{Mesh, MeshDefinition};
use crate::EngineError;

/// Cheap, clonable reference to a registered mesh
#[derive(Clone)]
pub struct MeshHandle(Arc<Mesh>);

impl MeshHandle {
    /// Whether two handles point at the same registered mesh
    pub fn ptr_eq(&self, other: &MeshHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for MeshHandle {
    type Target = Mesh;

    fn deref(&self) -> &Mesh {
        &self.0
    }
}

impl fmt::Debug for MeshHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeshHandle")
            .field("name", &self.name())
            .field("vertices", &self.vertex_count())
            .field("triangles", &self.triangle_count())
            .finish()
    }
}

/// Central store of named meshes
#[derive(Debug, Default)]
pub struct MeshRegistry {
    meshes: HashMap<String, MeshHandle>,
}

impl MeshRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a definition and register it under a new, unique name
    ///
    /// # Errors
    /// - [`EngineError::DuplicateResourceName`] if `name` is taken
    /// - [`EngineError::EmptyMesh`] if there are no vertices or no triangles
    /// - [`EngineError::InvalidTriangleIndex`] if a triangle indexes past the vertex list
    pub fn build_mesh(&mut self, name: &str, definition: &MeshDefinition) -> Result<MeshHandle, EngineError> {
        if self.meshes.contains_key(name) {
            return Err(EngineError::DuplicateResourceName {
                kind: "mesh",
                name: name.to_string(),
            });
        }
        self.insert(name, definition)
    }

    /// Validate a definition and register it, replacing any mesh with the same name
    ///
    /// Handles to the previous mesh stay valid and keep the old data.
    pub fn replace_mesh(&mut self, name: &str, definition: &MeshDefinition) -> Result<MeshHandle, EngineError> {
        if self.meshes.contains_key(name) {
            log::debug!("Replacing mesh '{}'", name);
        }
        self.insert(name, definition)
    }

    fn insert(&mut self, name: &str, definition: &MeshDefinition) -> Result<MeshHandle, EngineError> {
        validate(name, definition)?;

        let handle = MeshHandle(Arc::new(Mesh::from_validated(name.to_string(), definition)));
        log::debug!(
            "Registered mesh '{}' ({} vertices, {} triangles, material '{}')",
            name,
            handle.vertex_count(),
            handle.triangle_count(),
            handle.material()
        );
        self.meshes.insert(name.to_string(), handle.clone());
        Ok(handle)
    }

    /// Look up a mesh by name
    pub fn get(&self, name: &str) -> Option<&MeshHandle> {
        self.meshes.get(name)
    }

    /// Whether a mesh with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.meshes.contains_key(name)
    }

    /// Number of registered meshes
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.meshes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

fn validate(name: &str, definition: &MeshDefinition) -> Result<(), EngineError> {
    if definition.vertices.is_empty() || definition.triangles.is_empty() {
        return Err(EngineError::EmptyMesh(name.to_string()));
    }

    let vertex_count = definition.vertices.len();
    for (triangle, indices) in definition.triangles.iter().enumerate() {
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(EngineError::InvalidTriangleIndex {
                mesh: name.to_string(),
                triangle,
                index,
                vertex_count,
            });
        }
    }
    Ok(())
}
