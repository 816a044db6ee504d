//! Rigid-body state of a single asteroid

use std::fmt;

use field_engine::foundation::math::{Quat, Vec3};
use field_engine::scene::NodeId;

/// Stable identifier of a body: its slot in the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub(crate) usize);

impl BodyId {
    /// Slot index
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One asteroid
///
/// A body removed by a hit keeps its slot and keeps spinning; it is only
/// excluded from further hit tests and from presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub(crate) id: BodyId,
    pub(crate) position: Vec3,
    pub(crate) orientation: Quat,
    pub(crate) angular_increment: Quat,
    pub(crate) drift: Vec3,
    pub(crate) live: bool,
    pub(crate) node: Option<NodeId>,
}

impl Body {
    pub(crate) fn new(id: BodyId, position: Vec3, orientation: Quat, angular_increment: Quat, drift: Vec3) -> Self {
        Self {
            id,
            position,
            orientation,
            angular_increment,
            drift,
            live: true,
            node: None,
        }
    }

    /// Identifier
    pub fn id(&self) -> BodyId {
        self.id
    }

    /// World position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// World orientation
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Rotation applied (on the left) every tick
    pub fn angular_increment(&self) -> Quat {
        self.angular_increment
    }

    /// Per-tick translation, applied only when drift is enabled
    pub fn drift(&self) -> Vec3 {
        self.drift
    }

    /// Whether the body is still in play
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Scene node presenting this body, once bound
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    pub(crate) fn advance(&mut self, renormalize: bool, apply_drift: bool) {
        self.orientation = self.angular_increment * self.orientation;
        if renormalize {
            self.orientation.renormalize();
        }
        if apply_drift {
            self.position += self.drift;
        }
    }
}
