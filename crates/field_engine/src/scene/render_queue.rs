//! Render queue for batched rendering
//!
//! What the scene would hand to a rasterizer this frame: every attached
//! entity on a visible node chain, with its world transform, grouped by
//! mesh so one mesh can be drawn instanced.

use super::{EntityId, NodeId};
use crate::foundation::math::Transform;
use crate::mesh::MeshHandle;

/// One entity to draw
#[derive(Debug, Clone)]
pub struct RenderItem {
    /// Entity being drawn
    pub entity: EntityId,
    /// Node that places it
    pub node: NodeId,
    /// Geometry
    pub mesh: MeshHandle,
    /// Accumulated world transform
    pub world: Transform,
}

/// A batch of items sharing the same mesh
#[derive(Debug, Clone)]
pub struct RenderBatch {
    /// Mesh used by all items in this batch
    pub mesh: MeshHandle,
    /// Items in this batch
    pub items: Vec<RenderItem>,
}

/// Render queue for a frame
#[derive(Debug, Default)]
pub struct RenderQueue {
    batches: Vec<RenderBatch>,
}

impl RenderQueue {
    /// Build a render queue from items in traversal order
    pub fn from_items(items: Vec<RenderItem>) -> Self {
        let mut batches: Vec<RenderBatch> = Vec::new();

        for item in items {
            match batches.iter_mut().find(|b| b.mesh.ptr_eq(&item.mesh)) {
                Some(batch) => batch.items.push(item),
                None => batches.push(RenderBatch {
                    mesh: item.mesh.clone(),
                    items: vec![item],
                }),
            }
        }

        Self { batches }
    }

    /// Batches in first-seen order
    pub fn batches(&self) -> &[RenderBatch] {
        &self.batches
    }

    /// Total number of items to draw
    pub fn item_count(&self) -> usize {
        self.batches.iter().map(|b| b.items.len()).sum()
    }

    /// Whether a given entity is drawn this frame
    pub fn contains_entity(&self, entity: EntityId) -> bool {
        self.batches
            .iter()
            .any(|b| b.items.iter().any(|item| item.entity == entity))
    }

    /// Whether anything on a given node is drawn this frame
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.batches
            .iter()
            .any(|b| b.items.iter().any(|item| item.node == node))
    }
}
