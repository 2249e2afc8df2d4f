use glam::DAffine3;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::animation::AnimationNode;
use crate::errors::{Result, SceneError};
use crate::scene::instance::Instance;
use crate::utils::{ContentHasher, hash_name};

/// A node of an animation hierarchy.
///
/// Children are owned by value, so a tree is acyclic by construction.
/// Instances are referenced by index into [`Scene::instances`](crate::Scene)
/// and animation nodes by index into the owning
/// [`Animation::animation_nodes`](crate::Animation); neither is validated
/// during playback; dangling indices are skipped.
#[derive(Debug, Clone, Default)]
pub struct NodeTree {
    pub children: Vec<NodeTree>,
    /// Instances driven by this node.
    pub instances: SmallVec<[u32; 4]>,
    /// Static local transform, used when the node is not animated.
    pub transform: DAffine3,
    /// Hash of the source asset node this sub-tree was built from.
    pub hash: u64,
    /// Animation node supplying the local transform. `None` means static.
    pub animation_node: Option<u32>,
}

impl NodeTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a node whose hash identifies the named source node.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            hash: hash_name(name),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_transform(mut self, transform: DAffine3) -> Self {
        self.transform = transform;
        self
    }

    #[must_use]
    pub fn with_animation_node(mut self, index: u32) -> Self {
        self.animation_node = Some(index);
        self
    }

    #[must_use]
    pub fn with_instances(mut self, instances: impl IntoIterator<Item = u32>) -> Self {
        self.instances.extend(instances);
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: NodeTree) -> Self {
        self.children.push(child);
        self
    }

    /// Appends a child and returns it for further construction.
    pub fn add_child(&mut self, child: NodeTree) -> &mut NodeTree {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    // ========================================================================
    // Playback
    // ========================================================================

    /// Local transform for this frame: the animation node's cached transform
    /// when animated, the static transform otherwise.
    #[must_use]
    pub fn local_transform<'a>(&'a self, animation_nodes: &'a [AnimationNode]) -> &'a DAffine3 {
        self.animation_node
            .and_then(|index| animation_nodes.get(index as usize))
            .map_or(&self.transform, AnimationNode::transform)
    }

    /// Composes `parent × local` down the tree.
    ///
    /// Without `out`, every referenced instance receives its node's world
    /// transform (previous transform snapshotted first). With `out`, the
    /// instances are left alone and the world transform is written to `out`
    /// instead; on a multi-node tree the last node in depth-first order wins.
    ///
    /// Only borrows the instance slice rather than the whole scene, so the
    /// scene can keep its animations and instances in separate fields.
    pub fn animate(
        &self,
        instances: &mut [Instance],
        animation_nodes: &[AnimationNode],
        parent: &DAffine3,
        mut out: Option<&mut DAffine3>,
    ) {
        let world = *parent * *self.local_transform(animation_nodes);

        match out.as_deref_mut() {
            Some(out) => *out = world,
            None => {
                for &index in &self.instances {
                    if let Some(instance) = instances.get_mut(index as usize) {
                        instance.set_world_transform(&world);
                    }
                }
            }
        }

        for child in &self.children {
            child.animate(instances, animation_nodes, &world, out.as_deref_mut());
        }
    }

    // ========================================================================
    // Static / dynamic classification
    // ========================================================================

    /// Marks every instance reachable from this node as dynamic (`true`) or
    /// static (`false`). A load-time operation.
    pub fn set_allow_update(&self, instances: &mut [Instance], allow_update: bool) {
        for &index in &self.instances {
            if let Some(instance) = instances.get_mut(index as usize) {
                instance.allow_update = allow_update;
            }
        }
        for child in &self.children {
            child.set_allow_update(instances, allow_update);
        }
    }

    /// Marks every sub-tree rooted at an animated node as dynamic. Instances
    /// outside animated sub-trees keep their current flag.
    pub fn mark_animated_dynamic(&self, instances: &mut [Instance]) {
        if self.animation_node.is_some() {
            self.set_allow_update(instances, true);
            return;
        }
        for child in &self.children {
            child.mark_animated_dynamic(instances);
        }
    }

    /// Whether any node in this sub-tree is animated.
    #[must_use]
    pub fn is_animated(&self) -> bool {
        self.animation_node.is_some() || self.children.iter().any(NodeTree::is_animated)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(NodeTree::node_count).sum::<usize>()
    }

    /// Depth-first pre-order traversal. The callback receives the depth
    /// (0 for `self`).
    pub fn visit(&self, f: &mut impl FnMut(&NodeTree, usize)) {
        self.visit_at(0, f);
    }

    fn visit_at(&self, depth: usize, f: &mut impl FnMut(&NodeTree, usize)) {
        f(self, depth);
        for child in &self.children {
            child.visit_at(depth + 1, f);
        }
    }

    /// Appends every instance index reachable from this node.
    pub fn collect_instances(&self, out: &mut Vec<u32>) {
        self.visit(&mut |node, _| out.extend_from_slice(&node.instances));
    }

    /// First node (pre-order) carrying `hash`.
    #[must_use]
    pub fn find_by_hash(&self, hash: u64) -> Option<&NodeTree> {
        if self.hash == hash {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find_by_hash(hash))
    }

    /// Structural hash of the whole sub-tree: node hashes, whether each node
    /// is animated, instance counts and child order.
    #[must_use]
    pub fn subtree_hash(&self) -> u64 {
        self.subtree_hash_into(&mut None)
    }

    /// Number of occurrences of every sub-tree hash in this tree. Entries
    /// with a count above one are duplicated sub-trees.
    #[must_use]
    pub fn subtree_hash_counts(&self) -> FxHashMap<u64, usize> {
        let mut counts = FxHashMap::default();
        self.subtree_hash_into(&mut Some(&mut counts));
        counts
    }

    fn subtree_hash_into(&self, counts: &mut Option<&mut FxHashMap<u64, usize>>) -> u64 {
        let mut hasher = ContentHasher::new();
        hasher.write_u64(self.hash);
        hasher.write_u32(u32::from(self.animation_node.is_some()));
        hasher.write_u64(self.instances.len() as u64);
        for child in &self.children {
            hasher.write_u64(child.subtree_hash_into(counts));
        }

        let hash = hasher.finish();
        if let Some(counts) = counts.as_deref_mut() {
            *counts.entry(hash).or_insert(0) += 1;
        }
        hash
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Checks every instance and animation node reference in the sub-tree.
    pub fn validate(&self, instance_count: usize, animation_node_count: usize) -> Result<()> {
        for &index in &self.instances {
            if index as usize >= instance_count {
                return Err(SceneError::InstanceIndexOutOfRange {
                    node_hash: self.hash,
                    index,
                    count: instance_count,
                });
            }
        }

        if let Some(index) = self.animation_node
            && index as usize >= animation_node_count
        {
            return Err(SceneError::AnimationNodeIndexOutOfRange {
                node_hash: self.hash,
                index,
                count: animation_node_count,
            });
        }

        self.children
            .iter()
            .try_for_each(|child| child.validate(instance_count, animation_node_count))
    }
}
