//! Mesh definitions and frozen mesh resources

use super::Vertex;
use crate::foundation::math::Vec3;

/// One triangle as three vertex indices, counter-clockwise seen from outside
pub type Triangle = [u32; 3];

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box around a set of points, `None` when there are none
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::new(first, first), |aabb, p| Self {
            min: aabb.min.inf(&p),
            max: aabb.max.sup(&p),
        }))
    }
}

/// Authored geometry before it becomes a registered [`Mesh`]
///
/// Vertices are never shared or deduplicated; the triangle list indexes
/// straight into `vertices`.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshDefinition {
    /// Material the mesh is drawn with
    pub material: String,
    /// Ordered vertex records
    pub vertices: Vec<Vertex>,
    /// Ordered triangles; winding decides the front face
    pub triangles: Vec<Triangle>,
}

impl MeshDefinition {
    /// Create a definition from complete vertex and triangle tables
    pub fn new(material: impl Into<String>, vertices: Vec<Vertex>, triangles: Vec<Triangle>) -> Self {
        Self {
            material: material.into(),
            vertices,
            triangles,
        }
    }

    /// Start a definition vertex by vertex
    pub fn builder(material: impl Into<String>) -> MeshDefinitionBuilder {
        MeshDefinitionBuilder {
            definition: Self::new(material, Vec::new(), Vec::new()),
        }
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

/// Incremental construction of a [`MeshDefinition`]
#[derive(Debug, Clone)]
pub struct MeshDefinitionBuilder {
    definition: MeshDefinition,
}

impl MeshDefinitionBuilder {
    /// Append a vertex; its index is the number of vertices added before it
    pub fn vertex(mut self, vertex: Vertex) -> Self {
        self.definition.vertices.push(vertex);
        self
    }

    /// Append a triangle
    pub fn triangle(mut self, a: u32, b: u32, c: u32) -> Self {
        self.definition.triangles.push([a, b, c]);
        self
    }

    /// Append a quad `a b c d` as triangles `(a, b, d)` and `(b, c, d)`
    pub fn quad(self, a: u32, b: u32, c: u32, d: u32) -> Self {
        self.triangle(a, b, d).triangle(b, c, d)
    }

    /// Finish the definition
    pub fn build(self) -> MeshDefinition {
        self.definition
    }
}

/// Immutable, named triangle-list mesh
///
/// Created only through [`MeshRegistry`](super::MeshRegistry), which
/// validates the definition first.
#[derive(Debug, Clone)]
pub struct Mesh {
    name: String,
    material: String,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    bounds: Aabb,
    bounding_radius: f32,
}

impl Mesh {
    /// Freeze a definition that has already been validated (non-empty, indices in range)
    pub(crate) fn from_validated(name: String, definition: &MeshDefinition) -> Self {
        let positions = definition.vertices.iter().map(|v| Vec3::from(v.position));
        let bounds = Aabb::from_points(positions.clone())
            .unwrap_or_else(|| Aabb::new(Vec3::zeros(), Vec3::zeros()));
        let bounding_radius = positions.map(|p| p.magnitude()).fold(0.0_f32, f32::max);

        Self {
            name,
            material: definition.material.clone(),
            vertices: definition.vertices.clone(),
            indices: definition.triangles.iter().flatten().copied().collect(),
            bounds,
            bounding_radius,
        }
    }

    /// Registered name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Material name
    pub fn material(&self) -> &str {
        &self.material
    }

    /// Vertex data
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Flat triangle-list index data
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Object-space bounding box
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Radius of the origin-centred sphere enclosing every vertex
    pub fn bounding_radius(&self) -> f32 {
        self.bounding_radius
    }
}
