//! Error Types
//!
//! The per-frame animation path never fails: broken clips degrade to clamped
//! sampling and invalid indices are skipped. Errors only surface from the
//! validation pass a loader runs before handing a scene over.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rtscene::errors::Result;
//!
//! fn finish_loading(scene: &mut rtscene::Scene) -> Result<()> {
//!     scene.validate()?;
//!     scene.classify_dynamic_instances();
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::animation::Channel;

/// Errors reported by scene validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    // ========================================================================
    // Node tree references
    // ========================================================================
    /// A node tree references an instance that does not exist.
    #[error("Node {node_hash:#018x} references instance {index}, but the scene has {count}")]
    InstanceIndexOutOfRange {
        /// Hash of the offending node
        node_hash: u64,
        /// The invalid instance index
        index: u32,
        /// Number of instances in the scene
        count: usize,
    },

    /// A node tree references an animation node that does not exist.
    #[error(
        "Node {node_hash:#018x} references animation node {index}, but the animation has {count}"
    )]
    AnimationNodeIndexOutOfRange {
        /// Hash of the offending node
        node_hash: u64,
        /// The invalid animation node index
        index: u32,
        /// Number of animation nodes in the animation
        count: usize,
    },

    // ========================================================================
    // Instance payload
    // ========================================================================
    /// An instance points at a mesh that does not exist.
    #[error("Instance {instance} references mesh {index}, but the scene has {count}")]
    MeshIndexOutOfRange {
        instance: usize,
        index: u32,
        count: usize,
    },

    /// An instance points at a material that does not exist.
    #[error("Instance {instance} references material {index}, but the scene has {count}")]
    MaterialIndexOutOfRange {
        instance: usize,
        index: u32,
        count: usize,
    },

    /// A mesh range reaches past the shared vertex or index buffer.
    #[error("Mesh {mesh} {buffer} range {start}..{end} exceeds buffer length {len}")]
    MeshRangeOutOfBounds {
        mesh: usize,
        buffer: &'static str,
        start: usize,
        end: usize,
        len: usize,
    },

    // ========================================================================
    // Keyframe data
    // ========================================================================
    /// Keyframe times must be strictly increasing within a channel.
    #[error("Animation '{animation}': {channel:?} keys of node {node} are not increasing at key {key}")]
    NonMonotonicKeyframes {
        animation: String,
        node: usize,
        channel: Channel,
        key: usize,
    },

    /// A channel has a different number of key times and values.
    #[error("Animation '{animation}': {channel:?} channel of node {node} has {times} times but {values} values")]
    KeyCountMismatch {
        animation: String,
        node: usize,
        channel: Channel,
        times: usize,
        values: usize,
    },
}

/// Alias for `Result<T, SceneError>`.
pub type Result<T> = std::result::Result<T, SceneError>;
