use glam::{DAffine3, DVec3, Mat3, Vec3};

use crate::resources::INVALID_INDEX;

/// Where an instance is in its previous/current transform bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformHistory {
    /// No transform has been written since creation or the last reset.
    /// The next write initializes both the current and previous transform.
    #[default]
    Uninitialized,
    /// The previous transform holds the value from the write before the last.
    Steady,
}

/// A placed occurrence of a mesh with a material.
///
/// Keeps both the current and previous-frame transform so the renderer can
/// derive motion vectors. Rotation carries the rotation × scale part in
/// single precision; position is double precision for large worlds.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub rotation: Mat3,
    pub rotation_prev: Mat3,
    pub position: DVec3,
    pub position_prev: DVec3,
    /// Authored scale, kept for hull generation. Not driven by animation.
    pub scale: Vec3,
    pub mesh_index: u32,
    pub material_index: u32,
    /// `false`: merged into the monolithic static acceleration structure.
    pub allow_update: bool,

    history: TransformHistory,
}

impl Default for Instance {
    fn default() -> Self {
        Self {
            rotation: Mat3::IDENTITY,
            rotation_prev: Mat3::IDENTITY,
            position: DVec3::ZERO,
            position_prev: DVec3::ZERO,
            scale: Vec3::ONE,
            mesh_index: INVALID_INDEX,
            material_index: INVALID_INDEX,
            allow_update: false,
            history: TransformHistory::Uninitialized,
        }
    }
}

impl Instance {
    #[must_use]
    pub fn new(mesh_index: u32, material_index: u32) -> Self {
        Self {
            mesh_index,
            material_index,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_transform(mut self, rotation: Mat3, position: DVec3) -> Self {
        self.rotation = rotation;
        self.rotation_prev = rotation;
        self.position = position;
        self.position_prev = position;
        self
    }

    #[inline]
    #[must_use]
    pub fn history(&self) -> TransformHistory {
        self.history
    }

    /// Forgets the previous transform, e.g. after a teleport. The next write
    /// produces zero motion.
    pub fn reset_history(&mut self) {
        self.history = TransformHistory::Uninitialized;
    }

    /// Writes a new current transform, snapshotting the old one first.
    pub fn set_transform(&mut self, rotation: Mat3, position: DVec3) {
        match self.history {
            TransformHistory::Uninitialized => {
                self.rotation_prev = rotation;
                self.position_prev = position;
                self.history = TransformHistory::Steady;
            }
            TransformHistory::Steady => {
                self.rotation_prev = self.rotation;
                self.position_prev = self.position;
            }
        }
        self.rotation = rotation;
        self.position = position;
    }

    /// Splits a world transform into the single-precision 3×3 part and the
    /// double-precision translation.
    pub fn set_world_transform(&mut self, world: &DAffine3) {
        self.set_transform(world.matrix3.as_mat3(), world.translation);
    }

    #[must_use]
    pub fn world_transform(&self) -> DAffine3 {
        DAffine3::from_mat3_translation(self.rotation.as_dmat3(), self.position)
    }

    #[must_use]
    pub fn previous_world_transform(&self) -> DAffine3 {
        DAffine3::from_mat3_translation(self.rotation_prev.as_dmat3(), self.position_prev)
    }

    /// Whether the last write changed the transform.
    #[must_use]
    pub fn has_moved(&self) -> bool {
        self.rotation != self.rotation_prev || self.position != self.position_prev
    }

    #[inline]
    #[must_use]
    pub fn is_static(&self) -> bool {
        !self.allow_update
    }
}
