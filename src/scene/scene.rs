use glam::{Affine3A, DAffine3, Mat4};
use log::{debug, trace, warn};

use crate::animation::Animation;
use crate::errors::{Result, SceneError};
use crate::resources::{
    BoundingBox, INVALID_INDEX, Index, Material, Mesh, Primitive, Texture, UnpackedVertex, Vertex,
};
use crate::scene::instance::Instance;
use crate::scene::settings::SceneSettings;
use crate::utils::ContentHasher;

/// In-memory scene.
///
/// Populated by the loader, read by the renderer for upload and
/// acceleration-structure builds, and mutated once per frame by
/// [`Scene::animate`].
///
/// Buffers come in two groups: transient ones (texture pixels and raw
/// geometry) that can be released with [`Scene::unload_texture_data`] and
/// [`Scene::unload_geometry_data`] once GPU copies exist, and persistent ones
/// that playback keeps using.
///
/// There is no internal synchronization: readers on other threads must wait
/// for `animate` to return.
#[derive(Debug, Clone)]
pub struct Scene {
    // ==== Transient ====
    pub textures: Vec<Texture>,
    pub vertices: Vec<Vertex>,
    pub unpacked_vertices: Vec<UnpackedVertex>,
    pub indices: Vec<Index>,
    pub primitives: Vec<Primitive>,

    // ==== Persistent ====
    pub materials: Vec<Material>,
    pub instances: Vec<Instance>,
    pub meshes: Vec<Mesh>,
    pub animations: Vec<Animation>,
    pub scene_to_world: Mat4,
    pub aabb: BoundingBox,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            textures: Vec::new(),
            vertices: Vec::new(),
            unpacked_vertices: Vec::new(),
            indices: Vec::new(),
            primitives: Vec::new(),

            materials: Vec::new(),
            instances: Vec::new(),
            meshes: Vec::new(),
            animations: Vec::new(),
            scene_to_world: Mat4::IDENTITY,
            aabb: BoundingBox::EMPTY,
        }
    }

    // ========================================================================
    // Per-frame playback
    // ========================================================================

    /// Advances animation `animation_index` by `elapsed_ms × animation_speed`
    /// and writes the resulting transforms into the instances.
    ///
    /// `progress` is the normalized playback position: read as the starting
    /// point (so callers can scrub) and overwritten with the new position.
    /// When the animation has a camera tree, its transform is written to
    /// `out_camera_transform`; otherwise that output is left untouched.
    ///
    /// An out-of-range index is a no-op.
    pub fn animate(
        &mut self,
        animation_speed: f32,
        elapsed_ms: f32,
        progress: &mut f32,
        animation_index: usize,
        out_camera_transform: Option<&mut DAffine3>,
    ) {
        let Some(animation) = self.animations.get_mut(animation_index) else {
            trace!(
                "Animation index {animation_index} out of range ({} animations)",
                self.animations.len()
            );
            return;
        };

        if progress.is_finite() {
            animation.progress = progress.clamp(0.0, 1.0);
        }
        let time_ms = animation.advance(animation_speed, elapsed_ms);
        *progress = animation.progress;

        animation.update_nodes(time_ms);
        animation.apply(&mut self.instances, out_camera_transform);
    }

    /// Index of the first animation called `name`.
    #[must_use]
    pub fn animation_index(&self, name: &str) -> Option<usize> {
        self.animations.iter().position(|a| a.name == name)
    }

    /// Makes the next transform write of every instance produce zero motion,
    /// e.g. after a camera cut or a clip switch.
    pub fn reset_instance_history(&mut self) {
        for instance in &mut self.instances {
            instance.reset_history();
        }
    }

    // ========================================================================
    // Transient data lifecycle
    // ========================================================================

    /// Drops every texture and releases the storage.
    pub fn unload_texture_data(&mut self) {
        if self.textures.is_empty() {
            return;
        }

        let bytes: usize = self.textures.iter().map(Texture::byte_size).sum();
        debug!("Unloading {} textures ({bytes} bytes)", self.textures.len());
        self.textures = Vec::new();
    }

    /// Drops the raw vertex, index and primitive buffers. Meshes keep their
    /// ranges, which stay meaningful for the GPU copies.
    pub fn unload_geometry_data(&mut self) {
        debug!(
            "Unloading geometry: {} vertices, {} indices, {} primitives",
            self.vertices.len(),
            self.indices.len(),
            self.primitives.len()
        );

        self.vertices = Vec::new();
        self.unpacked_vertices = Vec::new();
        self.indices = Vec::new();
        self.primitives = Vec::new();
    }

    #[must_use]
    pub fn has_texture_data(&self) -> bool {
        !self.textures.is_empty()
    }

    #[must_use]
    pub fn has_geometry_data(&self) -> bool {
        !self.vertices.is_empty()
            || !self.unpacked_vertices.is_empty()
            || !self.indices.is_empty()
            || !self.primitives.is_empty()
    }

    // ========================================================================
    // Load-time checks and classification
    // ========================================================================

    /// Checks every cross reference the animation core and renderer rely on.
    ///
    /// Mesh ranges are only checked against buffers that are still loaded.
    pub fn validate(&self) -> Result<()> {
        for (instance_index, instance) in self.instances.iter().enumerate() {
            if instance.mesh_index != INVALID_INDEX
                && instance.mesh_index as usize >= self.meshes.len()
            {
                return Err(SceneError::MeshIndexOutOfRange {
                    instance: instance_index,
                    index: instance.mesh_index,
                    count: self.meshes.len(),
                });
            }
            if instance.material_index != INVALID_INDEX
                && instance.material_index as usize >= self.materials.len()
            {
                return Err(SceneError::MaterialIndexOutOfRange {
                    instance: instance_index,
                    index: instance.material_index,
                    count: self.materials.len(),
                });
            }
        }

        for (mesh_index, mesh) in self.meshes.iter().enumerate() {
            check_range(mesh_index, "vertex", &mesh.vertex_range(), self.vertices.len())?;
            check_range(mesh_index, "index", &mesh.index_range(), self.indices.len())?;
        }

        self.animations
            .iter()
            .try_for_each(|animation| animation.validate(self.instances.len()))
    }

    /// Recomputes `allow_update` for every instance: dynamic when reachable
    /// from an animated node of any animation, static otherwise.
    pub fn classify_dynamic_instances(&mut self) {
        for instance in &mut self.instances {
            instance.allow_update = false;
        }
        for animation in &self.animations {
            animation.root_node.mark_animated_dynamic(&mut self.instances);
        }

        debug!(
            "Classified instances: {} static, {} dynamic",
            self.static_instances().count(),
            self.dynamic_instances().count()
        );
    }

    /// Instances merged into the static acceleration structure.
    pub fn static_instances(&self) -> impl Iterator<Item = (usize, &Instance)> {
        self.instances
            .iter()
            .enumerate()
            .filter(|(_, instance)| !instance.allow_update)
    }

    /// Instances whose acceleration structures are refreshed every frame.
    pub fn dynamic_instances(&self) -> impl Iterator<Item = (usize, &Instance)> {
        self.instances
            .iter()
            .enumerate()
            .filter(|(_, instance)| instance.allow_update)
    }

    /// Content hash of the static geometry: which instances are static, what
    /// they draw and where. While it is unchanged the merged static
    /// acceleration structure can be reused.
    #[must_use]
    pub fn static_geometry_hash(&self) -> u64 {
        let mut hasher = ContentHasher::new();
        for (index, instance) in self.static_instances() {
            hasher.write_u64(index as u64);
            hasher.write_u32(instance.mesh_index);
            hasher.write_u32(instance.material_index);
            hasher.write_f32s(&instance.rotation.to_cols_array());
            hasher.write_f64s(&instance.position.to_array());
        }
        hasher.finish()
    }

    /// Recomputes `aabb` from the mesh bounds placed by each instance.
    pub fn update_bounds(&mut self) {
        let mut aabb = BoundingBox::EMPTY;
        for instance in &self.instances {
            let Some(mesh) = self.meshes.get(instance.mesh_index as usize) else {
                continue;
            };
            let placement =
                Affine3A::from_mat3_translation(instance.rotation, instance.position.as_vec3());
            aabb = aabb.union(&mesh.aabb.transform(&placement));
        }
        self.aabb = aabb;
    }

    /// Post-load step: validation, loop-mode override, static/dynamic
    /// classification and bounds.
    pub fn prepare(&mut self, settings: &SceneSettings) -> Result<()> {
        match self.validate() {
            Err(err) if settings.strict_validation => return Err(err),
            Err(err) => warn!("Scene validation failed, continuing: {err}"),
            Ok(()) => {}
        }

        if let Some(loop_mode) = settings.loop_mode {
            for animation in &mut self.animations {
                animation.loop_mode = loop_mode;
            }
        }

        if settings.allow_update {
            self.classify_dynamic_instances();
        } else {
            for instance in &mut self.instances {
                instance.allow_update = false;
            }
        }

        for animation in &self.animations {
            let duplicated = animation
                .root_node
                .subtree_hash_counts()
                .values()
                .filter(|&&count| count > 1)
                .count();
            if duplicated > 0 {
                debug!(
                    "Animation '{}': {duplicated} sub-tree shapes occur more than once",
                    animation.name
                );
            }
        }

        if settings.update_bounds {
            self.update_bounds();
        }

        debug!(
            "Scene prepared: {} instances, {} meshes, {} materials, {} animations",
            self.instances.len(),
            self.meshes.len(),
            self.materials.len(),
            self.animations.len()
        );
        Ok(())
    }
}

fn check_range(
    mesh: usize,
    buffer: &'static str,
    range: &std::ops::Range<usize>,
    len: usize,
) -> Result<()> {
    // Unloaded buffers can no longer be checked.
    if len == 0 || range.end <= len {
        return Ok(());
    }
    Err(SceneError::MeshRangeOutOfBounds {
        mesh,
        buffer,
        start: range.start,
        end: range.end,
        len,
    })
}
