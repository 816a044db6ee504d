//! Scene nodes and the entities attached to them

use crate::foundation::math::{Quat, Transform, Vec3};
use crate::mesh::MeshHandle;

slotmap::new_key_type! {
    /// Opaque handle to a scene node
    pub struct NodeId;

    /// Opaque handle to a renderable entity
    pub struct EntityId;
}

/// A transform in the scene hierarchy that renderables hang off
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) transform: Transform,
    pub(crate) visible: bool,
    pub(crate) objects: Vec<EntityId>,
}

impl SceneNode {
    pub(crate) fn new(name: String, parent: Option<NodeId>) -> Self {
        Self {
            name,
            parent,
            children: Vec::new(),
            transform: Transform::identity(),
            visible: true,
            objects: Vec::new(),
        }
    }

    /// Unique node name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent node, `None` only for the root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in creation order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Position relative to the parent
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Orientation relative to the parent
    pub fn orientation(&self) -> Quat {
        self.transform.rotation
    }

    /// Scale relative to the parent
    pub fn scale(&self) -> Vec3 {
        self.transform.scale
    }

    /// Local transform
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Node's own visibility flag (ancestors may still hide it)
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Entities attached to this node
    pub fn attached_objects(&self) -> &[EntityId] {
        &self.objects
    }
}

/// A named instance of a mesh
#[derive(Debug, Clone)]
pub struct Entity {
    pub(crate) name: String,
    pub(crate) mesh: MeshHandle,
    pub(crate) attached_to: Option<NodeId>,
}

impl Entity {
    /// Unique entity name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mesh this entity instantiates
    pub fn mesh(&self) -> &MeshHandle {
        &self.mesh
    }

    /// Node the entity hangs off, if attached
    pub fn attached_to(&self) -> Option<NodeId> {
        self.attached_to
    }
}
