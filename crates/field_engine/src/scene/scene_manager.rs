//! Scene Manager - owner of nodes, entities, cameras and meshes
//!
//! Nodes form a tree under a single root. Entities instantiate a registered
//! mesh and hang off at most one node. Each frame the manager walks the tree
//! and produces the [`RenderQueue`] a rasterizer would consume: only
//! entities whose node and every ancestor are visible make it in.

use std::collections::HashMap;

use slotmap::SlotMap;

use super::{Camera, Entity, EntityId, NodeId, RenderItem, RenderQueue, SceneNode};
use crate::foundation::math::{Quat, Transform, Vec3};
use crate::mesh::MeshRegistry;
use crate::EngineError;

/// Name of the node every other node descends from
pub const ROOT_NODE_NAME: &str = "Root";

/// Sink for per-body transforms pushed by a simulation
///
/// Implemented by [`SceneManager`]; simulations only ever see opaque
/// [`NodeId`]s through this trait.
pub trait Presentation {
    /// Place a node
    fn set_node_transform(&mut self, node: NodeId, position: Vec3, orientation: Quat) -> Result<(), EngineError>;

    /// Stop drawing whatever hangs off a node; the node keeps its transform
    fn detach_node(&mut self, node: NodeId) -> Result<(), EngineError>;
}

/// Central scene store
#[derive(Debug)]
pub struct SceneManager {
    nodes: SlotMap<NodeId, SceneNode>,
    node_names: HashMap<String, NodeId>,
    entities: SlotMap<EntityId, Entity>,
    entity_names: HashMap<String, EntityId>,
    cameras: HashMap<String, Camera>,
    meshes: MeshRegistry,
    root: NodeId,
}

impl SceneManager {
    /// Create an empty scene containing only the root node
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SceneNode::new(ROOT_NODE_NAME.to_string(), None));
        let mut node_names = HashMap::new();
        node_names.insert(ROOT_NODE_NAME.to_string(), root);

        Self {
            nodes,
            node_names,
            entities: SlotMap::with_key(),
            entity_names: HashMap::new(),
            cameras: HashMap::new(),
            meshes: MeshRegistry::new(),
            root,
        }
    }

    /// Root of the node tree
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Mesh registry entities draw from
    pub fn meshes(&self) -> &MeshRegistry {
        &self.meshes
    }

    /// Mutable mesh registry, for building meshes
    pub fn meshes_mut(&mut self) -> &mut MeshRegistry {
        &mut self.meshes
    }

    /// Create a uniquely named node under `parent`
    pub fn create_child_node(&mut self, parent: NodeId, name: &str) -> Result<NodeId, EngineError> {
        if self.node_names.contains_key(name) {
            return Err(EngineError::DuplicateResourceName {
                kind: "scene node",
                name: name.to_string(),
            });
        }
        if !self.nodes.contains_key(parent) {
            return Err(missing_node(parent));
        }

        let id = self.nodes.insert(SceneNode::new(name.to_string(), Some(parent)));
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.push(id);
        }
        self.node_names.insert(name.to_string(), id);
        log::trace!("Created scene node '{}'", name);
        Ok(id)
    }

    /// Look up a node
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    /// Find a node by name
    pub fn node_by_name(&self, name: &str) -> Option<NodeId> {
        self.node_names.get(name).copied()
    }

    /// Number of nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Create a uniquely named entity instantiating a registered mesh
    pub fn create_entity(&mut self, name: &str, mesh_name: &str) -> Result<EntityId, EngineError> {
        if self.entity_names.contains_key(name) {
            return Err(EngineError::DuplicateResourceName {
                kind: "entity",
                name: name.to_string(),
            });
        }
        let mesh = self.meshes.get(mesh_name).cloned().ok_or_else(|| EngineError::NotFound {
            kind: "mesh",
            name: mesh_name.to_string(),
        })?;

        let id = self.entities.insert(Entity {
            name: name.to_string(),
            mesh,
            attached_to: None,
        });
        self.entity_names.insert(name.to_string(), id);
        log::trace!("Created entity '{}' from mesh '{}'", name, mesh_name);
        Ok(id)
    }

    /// Look up an entity
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Find an entity by name
    pub fn entity_by_name(&self, name: &str) -> Option<EntityId> {
        self.entity_names.get(name).copied()
    }

    /// Number of entities, attached or not
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Hang an entity off a node
    ///
    /// An entity can only be attached to one node at a time.
    pub fn attach_object(&mut self, node: NodeId, entity: EntityId) -> Result<(), EngineError> {
        if !self.nodes.contains_key(node) {
            return Err(missing_node(node));
        }
        let object = self.entities.get_mut(entity).ok_or_else(|| missing_entity(entity))?;
        if object.attached_to.is_some() {
            return Err(EngineError::AlreadyAttached(object.name.clone()));
        }
        object.attached_to = Some(node);

        self.node_mut(node)?.objects.push(entity);
        Ok(())
    }

    /// Detach every entity from a node, returning how many were detached
    pub fn detach_all_objects(&mut self, node: NodeId) -> Result<usize, EngineError> {
        let detached = std::mem::take(&mut self.node_mut(node)?.objects);
        for entity in &detached {
            if let Some(object) = self.entities.get_mut(*entity) {
                object.attached_to = None;
            }
        }
        if !detached.is_empty() {
            log::debug!("Detached {} object(s) from node '{}'", detached.len(), self.nodes[node].name);
        }
        Ok(detached.len())
    }

    /// Set a node's position relative to its parent
    pub fn set_position(&mut self, node: NodeId, position: Vec3) -> Result<(), EngineError> {
        self.node_mut(node)?.transform.position = position;
        Ok(())
    }

    /// Set a node's orientation relative to its parent; stored renormalized
    pub fn set_orientation(&mut self, node: NodeId, orientation: Quat) -> Result<(), EngineError> {
        let mut orientation = orientation;
        orientation.renormalize();
        self.node_mut(node)?.transform.rotation = orientation;
        Ok(())
    }

    /// Set a node's scale relative to its parent
    pub fn set_scale(&mut self, node: NodeId, scale: Vec3) -> Result<(), EngineError> {
        self.node_mut(node)?.transform.scale = scale;
        Ok(())
    }

    /// Show or hide a node and, through it, its whole subtree
    pub fn set_visible(&mut self, node: NodeId, visible: bool) -> Result<(), EngineError> {
        self.node_mut(node)?.visible = visible;
        Ok(())
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut SceneNode, EngineError> {
        self.nodes.get_mut(id).ok_or_else(|| missing_node(id))
    }

    /// Register a named camera
    pub fn create_camera(&mut self, name: &str, camera: Camera) -> Result<(), EngineError> {
        if self.cameras.contains_key(name) {
            return Err(EngineError::DuplicateResourceName {
                kind: "camera",
                name: name.to_string(),
            });
        }
        log::debug!("Created camera '{}' at {:?}", name, camera.position);
        self.cameras.insert(name.to_string(), camera);
        Ok(())
    }

    /// Look up a camera by name
    pub fn camera(&self, name: &str) -> Result<&Camera, EngineError> {
        self.cameras.get(name).ok_or_else(|| missing_camera(name))
    }

    /// Look up a camera by name for modification
    pub fn camera_mut(&mut self, name: &str) -> Result<&mut Camera, EngineError> {
        self.cameras.get_mut(name).ok_or_else(|| missing_camera(name))
    }

    /// World transform of a node (all ancestor transforms composed)
    pub fn world_transform(&self, node: NodeId) -> Option<Transform> {
        let mut current = self.nodes.get(node)?;
        let mut world = current.transform;
        while let Some(parent) = current.parent.and_then(|p| self.nodes.get(p)) {
            world = parent.transform.combine(&world);
            current = parent;
        }
        Some(world)
    }

    /// Everything that would be drawn this frame, in depth-first order
    pub fn render_items(&self) -> Vec<RenderItem> {
        let mut items = Vec::new();
        let mut stack = vec![(self.root, Transform::identity())];

        while let Some((id, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get(id) else { continue };
            if !node.visible {
                continue;
            }

            let world = parent_world.combine(&node.transform);
            for &entity in &node.objects {
                if let Some(object) = self.entities.get(entity) {
                    items.push(RenderItem {
                        entity,
                        node: id,
                        mesh: object.mesh.clone(),
                        world,
                    });
                }
            }
            // Reversed so children pop in creation order
            stack.extend(node.children.iter().rev().map(|&child| (child, world)));
        }

        items
    }

    /// Render queue for this frame, batched by mesh
    pub fn render_queue(&self) -> RenderQueue {
        RenderQueue::from_items(self.render_items())
    }

    /// Whether a node currently draws anything
    ///
    /// True when the node and all its ancestors are visible and at least one
    /// entity is attached to it.
    pub fn is_node_rendered(&self, node: NodeId) -> bool {
        let Some(mut current) = self.nodes.get(node) else { return false };
        if current.objects.is_empty() {
            return false;
        }
        loop {
            if !current.visible {
                return false;
            }
            match current.parent.and_then(|p| self.nodes.get(p)) {
                Some(parent) => current = parent,
                None => return true,
            }
        }
    }
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Presentation for SceneManager {
    fn set_node_transform(&mut self, node: NodeId, position: Vec3, orientation: Quat) -> Result<(), EngineError> {
        self.set_position(node, position)?;
        self.set_orientation(node, orientation)
    }

    fn detach_node(&mut self, node: NodeId) -> Result<(), EngineError> {
        self.detach_all_objects(node).map(|_| ())
    }
}

fn missing_node(id: NodeId) -> EngineError {
    EngineError::NotFound {
        kind: "scene node",
        name: format!("{id:?}"),
    }
}

fn missing_entity(id: EntityId) -> EngineError {
    EngineError::NotFound {
        kind: "entity",
        name: format!("{id:?}"),
    }
}

fn missing_camera(name: &str) -> EngineError {
    EngineError::NotFound {
        kind: "camera",
        name: name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::PI;
    use crate::mesh::{MeshDefinition, Vertex};
    use approx::assert_relative_eq;

    fn scene_with_mesh() -> SceneManager {
        let mut scene = SceneManager::new();
        let vertex = |p: [f32; 3]| Vertex::new(p, [0.0, 0.0, 1.0], [0.0, 0.0], [1.0; 4]);
        let definition = MeshDefinition::new(
            "ObjectMaterial",
            vec![vertex([0.0, 0.0, 0.0]), vertex([1.0, 0.0, 0.0]), vertex([0.0, 1.0, 0.0])],
            vec![[0, 1, 2]],
        );
        scene.meshes_mut().build_mesh("Tri", &definition).unwrap();
        scene
    }

    fn spawn(scene: &mut SceneManager, parent: NodeId, name: &str) -> (NodeId, EntityId) {
        let node = scene.create_child_node(parent, name).unwrap();
        let entity = scene.create_entity(name, "Tri").unwrap();
        scene.attach_object(node, entity).unwrap();
        (node, entity)
    }

    #[test]
    fn test_node_names_are_unique() {
        let mut scene = SceneManager::new();
        let root = scene.root();
        let node = scene.create_child_node(root, "Asteroid0").unwrap();

        assert_eq!(scene.node_by_name("Asteroid0"), Some(node));
        assert_eq!(scene.node(node).unwrap().parent(), Some(root));
        assert!(matches!(
            scene.create_child_node(root, "Asteroid0"),
            Err(EngineError::DuplicateResourceName { kind: "scene node", .. })
        ));
    }

    #[test]
    fn test_entity_needs_registered_mesh() {
        let mut scene = scene_with_mesh();
        assert!(matches!(
            scene.create_entity("Rock", "Icosahedron"),
            Err(EngineError::NotFound { kind: "mesh", .. })
        ));

        scene.create_entity("Rock", "Tri").unwrap();
        assert!(matches!(
            scene.create_entity("Rock", "Tri"),
            Err(EngineError::DuplicateResourceName { kind: "entity", .. })
        ));
    }

    #[test]
    fn test_entity_attaches_once() {
        let mut scene = scene_with_mesh();
        let root = scene.root();
        let (_, entity) = spawn(&mut scene, root, "A");
        let other = scene.create_child_node(root, "B").unwrap();

        assert!(matches!(scene.attach_object(other, entity), Err(EngineError::AlreadyAttached(_))));
    }

    #[test]
    fn test_render_queue_respects_visibility_chain() {
        let mut scene = scene_with_mesh();
        let root = scene.root();
        let (parent, _) = spawn(&mut scene, root, "Parent");
        let (child, child_entity) = spawn(&mut scene, parent, "Child");

        assert_eq!(scene.render_queue().item_count(), 2);
        assert!(scene.is_node_rendered(child));

        scene.set_visible(parent, false).unwrap();
        let queue = scene.render_queue();
        assert_eq!(queue.item_count(), 0);
        assert!(!queue.contains_entity(child_entity));
        assert!(!scene.is_node_rendered(child));
        // Child's own flag is untouched
        assert!(scene.node(child).unwrap().is_visible());
    }

    #[test]
    fn test_detached_node_renders_nothing_but_keeps_moving() {
        let mut scene = scene_with_mesh();
        let root = scene.root();
        let (node, entity) = spawn(&mut scene, root, "Asteroid0");

        scene.detach_node(node).unwrap();
        assert!(!scene.is_node_rendered(node));
        assert!(!scene.render_queue().contains_node(node));
        assert_eq!(scene.entity(entity).unwrap().attached_to(), None);

        scene.set_node_transform(node, Vec3::new(1.0, 2.0, 3.0), Quat::identity()).unwrap();
        assert_relative_eq!(scene.node(node).unwrap().position(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_world_transform_composes_parents() {
        let mut scene = scene_with_mesh();
        let root = scene.root();
        let (parent, _) = spawn(&mut scene, root, "Parent");
        let (child, _) = spawn(&mut scene, parent, "Child");

        scene.set_position(parent, Vec3::new(10.0, 0.0, 0.0)).unwrap();
        scene
            .set_orientation(parent, Quat::from_axis_angle(&Vec3::y_axis(), PI * 0.5))
            .unwrap();
        scene.set_position(child, Vec3::new(0.0, 0.0, -1.0)).unwrap();

        let world = scene.world_transform(child).unwrap();
        assert_relative_eq!(world.position, Vec3::new(9.0, 0.0, 0.0), epsilon = 1e-5);

        let item = scene
            .render_items()
            .into_iter()
            .find(|item| item.node == child)
            .unwrap();
        assert_relative_eq!(item.world.position, world.position, epsilon = 1e-5);
    }

    #[test]
    fn test_cameras_by_name() {
        let mut scene = SceneManager::new();
        scene.create_camera("PlayerCam", Camera::default()).unwrap();
        scene.camera_mut("PlayerCam").unwrap().set_position(Vec3::new(0.0, 0.0, 800.0));

        assert_relative_eq!(scene.camera("PlayerCam").unwrap().position.z, 800.0);
        assert!(scene.camera("Other").is_err());
        assert!(scene.create_camera("PlayerCam", Camera::default()).is_err());
    }
}
