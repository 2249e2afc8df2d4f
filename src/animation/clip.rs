use glam::DAffine3;
use log::trace;

use crate::animation::node::AnimationNode;
use crate::errors::{Result, SceneError};
use crate::scene::instance::Instance;
use crate::scene::node_tree::NodeTree;

/// What happens when playback reaches either end of an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopMode {
    /// Stop at the end (or the start, when playing backwards).
    Once,
    /// Wrap around to the other end.
    Loop,
    /// Reflect at both ends and reverse direction.
    #[default]
    PingPong,
}

/// A named, time-bounded playback unit.
///
/// Owns every [`AnimationNode`] its trees reference, the root tree driving
/// scene instances and an optional camera tree. Playback position is kept
/// normalized in `[0, 1]`.
#[derive(Debug, Clone)]
pub struct Animation {
    pub name: String,
    pub animation_nodes: Vec<AnimationNode>,
    pub root_node: NodeTree,
    pub camera_node: Option<NodeTree>,
    pub duration_ms: f32,

    /// Normalized playback position.
    pub progress: f32,
    /// Normalized time the nodes were last sampled at.
    pub normalized_time: f32,
    /// Playback direction, `1.0` or `-1.0`. Flipped by ping-pong reflections.
    pub sign: f32,
    pub loop_mode: LoopMode,
}

impl Animation {
    /// Creates an animation whose duration spans the latest key of any node.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        animation_nodes: Vec<AnimationNode>,
        root_node: NodeTree,
    ) -> Self {
        let duration_ms = animation_nodes
            .iter()
            .filter_map(AnimationNode::end_time)
            .fold(0.0_f32, f32::max);

        Self {
            name: name.into(),
            animation_nodes,
            root_node,
            camera_node: None,
            duration_ms,
            progress: 0.0,
            normalized_time: 0.0,
            sign: 1.0,
            loop_mode: LoopMode::default(),
        }
    }

    #[must_use]
    pub fn with_camera(mut self, camera_node: NodeTree) -> Self {
        self.camera_node = Some(camera_node);
        self
    }

    #[must_use]
    pub fn with_loop_mode(mut self, loop_mode: LoopMode) -> Self {
        self.loop_mode = loop_mode;
        self
    }

    #[inline]
    #[must_use]
    pub fn has_camera_animation(&self) -> bool {
        self.camera_node.is_some()
    }

    /// Rewinds to the start, playing forward.
    pub fn reset(&mut self) {
        self.progress = 0.0;
        self.normalized_time = 0.0;
        self.sign = 1.0;
    }

    /// Current playback time in milliseconds.
    #[inline]
    #[must_use]
    pub fn time_ms(&self) -> f32 {
        self.normalized_time * self.duration_ms
    }

    /// Advances the playback clock and returns the new time in milliseconds.
    ///
    /// `speed` scales `elapsed_ms`; negative speeds play backwards. An
    /// animation without duration does not advance.
    pub fn advance(&mut self, speed: f32, elapsed_ms: f32) -> f32 {
        if self.duration_ms > 0.0 {
            let delta = elapsed_ms * speed / self.duration_ms;
            self.step(delta);
        }

        self.normalized_time = self.progress;
        self.time_ms()
    }

    fn step(&mut self, delta: f32) {
        let raw = self.progress + delta * self.sign;
        if !raw.is_finite() {
            return;
        }

        match self.loop_mode {
            LoopMode::Once => self.progress = raw.clamp(0.0, 1.0),
            LoopMode::Loop => self.progress = raw.rem_euclid(1.0),
            LoopMode::PingPong => {
                // Whole round trips keep the direction; only the remaining
                // half period decides whether to reflect.
                let folded = raw.rem_euclid(2.0);
                if folded > 1.0 {
                    self.progress = 2.0 - folded;
                    self.sign = -self.sign;
                } else {
                    self.progress = folded;
                }
            }
        }
    }

    /// Samples every animation node at `time_ms`.
    pub fn update_nodes(&mut self, time_ms: f32) {
        for node in &mut self.animation_nodes {
            node.update(time_ms);
        }
    }

    /// Propagates the current node transforms into `instances` and, when both
    /// a camera tree and `out_camera` exist, into `out_camera`.
    pub fn apply(&self, instances: &mut [Instance], out_camera: Option<&mut DAffine3>) {
        self.root_node
            .animate(instances, &self.animation_nodes, &DAffine3::IDENTITY, None);

        if let (Some(camera_node), Some(out)) = (&self.camera_node, out_camera) {
            camera_node.animate(instances, &self.animation_nodes, &DAffine3::IDENTITY, Some(out));
        }

        trace!(
            "Animation '{}' applied at {:.1} ms (progress {:.3})",
            self.name,
            self.time_ms(),
            self.progress
        );
    }

    /// Finds a node by source hash in the root tree, then the camera tree.
    #[must_use]
    pub fn find_node(&self, hash: u64) -> Option<&NodeTree> {
        self.root_node
            .find_by_hash(hash)
            .or_else(|| self.camera_node.as_ref()?.find_by_hash(hash))
    }

    /// Checks tree references and keyframe layout.
    pub fn validate(&self, instance_count: usize) -> Result<()> {
        let node_count = self.animation_nodes.len();
        self.root_node.validate(instance_count, node_count)?;
        if let Some(camera_node) = &self.camera_node {
            camera_node.validate(instance_count, node_count)?;
        }

        for (node_index, node) in self.animation_nodes.iter().enumerate() {
            for (channel, times, values, unordered) in node.channel_layout() {
                if times != values {
                    return Err(SceneError::KeyCountMismatch {
                        animation: self.name.clone(),
                        node: node_index,
                        channel,
                        times,
                        values,
                    });
                }
                if let Some(key) = unordered {
                    return Err(SceneError::NonMonotonicKeyframes {
                        animation: self.name.clone(),
                        node: node_index,
                        channel,
                        key,
                    });
                }
            }
        }

        Ok(())
    }
}
