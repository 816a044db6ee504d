//! Scene management
//!
//! An in-memory scene graph: named nodes carrying local transforms,
//! entities instancing shared meshes, named cameras, and the per-frame
//! render queue derived from them.

mod node;
mod camera;
mod viewport;
mod render_queue;
mod scene_manager;

pub use node::{Entity, EntityId, NodeId, SceneNode};
pub use camera::Camera;
pub use viewport::{Viewport, ViewportConfig};
pub use render_queue::{RenderBatch, RenderItem, RenderQueue};
pub use scene_manager::{Presentation, SceneManager, ROOT_NODE_NAME};
