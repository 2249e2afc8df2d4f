//! Scene tests
//!
//! Tests for:
//! - Scene::animate end-to-end (progress, instances, camera)
//! - Transient data unloading
//! - Validation of cross references
//! - Static / dynamic classification and static geometry hashing
//! - Bounds and the post-load prepare step

use glam::{DAffine3, DVec3, Mat3, Vec3};
use rtscene::{
    Animation, AnimationNode, BoundingBox, Index, Instance, KeyframeTrack, LoopMode, Material,
    Mesh, NodeTree, Scene, SceneError, SceneSettings, Texture, TextureFormat, Vertex,
};

// ============================================================================
// Helper
// ============================================================================

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn dvec3_approx(a: DVec3, b: DVec3) -> bool {
    (a - b).abs().max_element() < 1e-4
}

fn slide_x(to: f64) -> AnimationNode {
    AnimationNode::new(
        KeyframeTrack::linear(vec![0.0, 1000.0], vec![DVec3::ZERO, DVec3::new(to, 0.0, 0.0)]),
        KeyframeTrack::default(),
        KeyframeTrack::default(),
    )
}

/// Two meshes, two materials, three instances. Instance 0 is driven by an
/// animated node sliding from the origin to (10, 0, 0) over one second;
/// instances 1 and 2 hang off a static node.
fn sample_scene() -> Scene {
    let mut scene = Scene::new();

    scene.vertices = vec![Vertex::default(); 8];
    scene.indices = (0..12).map(|i| i as Index % 8).collect();
    scene.meshes = vec![
        Mesh {
            aabb: BoundingBox::new(Vec3::splat(-1.0), Vec3::splat(1.0)),
            vertex_offset: 0,
            vertex_num: 4,
            index_offset: 0,
            index_num: 6,
            blas_index: None,
        },
        Mesh {
            aabb: BoundingBox::new(Vec3::ZERO, Vec3::new(2.0, 1.0, 1.0)),
            vertex_offset: 4,
            vertex_num: 4,
            index_offset: 6,
            index_num: 6,
            blas_index: None,
        },
    ];
    scene.materials = vec![Material::default(), Material::default()];
    scene.instances = vec![
        Instance::new(0, 0),
        Instance::new(1, 1).with_transform(Mat3::IDENTITY, DVec3::new(0.0, 5.0, 0.0)),
        Instance::new(1, 0).with_transform(Mat3::IDENTITY, DVec3::new(0.0, -5.0, 0.0)),
    ];

    let root = NodeTree::named("root")
        .with_child(NodeTree::named("mover").with_animation_node(0).with_instances([0]))
        .with_child(NodeTree::named("props").with_instances([1, 2]));
    scene.animations = vec![Animation::new("slide", vec![slide_x(10.0)], root)];

    scene
}

// ============================================================================
// Scene::animate
// ============================================================================

#[test]
fn animate_moves_instance_to_halfway_point() {
    init_logging();
    let mut scene = sample_scene();
    let mut progress = 0.0;

    scene.animate(1.0, 500.0, &mut progress, 0, None);

    assert!((progress - 0.5).abs() < 1e-5);
    assert!(
        dvec3_approx(scene.instances[0].position, DVec3::new(5.0, 0.0, 0.0)),
        "got {}",
        scene.instances[0].position
    );
}

#[test]
fn animate_keeps_previous_frame_for_motion_vectors() {
    let mut scene = sample_scene();
    let mut progress = 0.0;

    scene.animate(1.0, 250.0, &mut progress, 0, None);
    scene.animate(1.0, 250.0, &mut progress, 0, None);

    let instance = &scene.instances[0];
    assert!(dvec3_approx(instance.position_prev, DVec3::new(2.5, 0.0, 0.0)));
    assert!(dvec3_approx(instance.position, DVec3::new(5.0, 0.0, 0.0)));
}

#[test]
fn animate_invalid_index_is_noop() {
    let mut scene = sample_scene();
    let before = scene.instances.clone();
    let mut progress = 0.3;
    let mut camera = DAffine3::from_translation(DVec3::splat(7.0));

    scene.animate(1.0, 500.0, &mut progress, 5, Some(&mut camera));

    assert_eq!(scene.instances, before);
    assert_eq!(progress, 0.3);
    assert_eq!(camera, DAffine3::from_translation(DVec3::splat(7.0)));
}

#[test]
fn animate_respects_caller_progress() {
    let mut scene = sample_scene();
    let mut progress = 0.8;

    scene.animate(1.0, 0.0, &mut progress, 0, None);

    assert!(dvec3_approx(scene.instances[0].position, DVec3::new(8.0, 0.0, 0.0)));
}

#[test]
fn animate_clamps_out_of_range_progress() {
    let mut scene = sample_scene();
    scene.animations[0].loop_mode = LoopMode::Once;
    let mut progress = 3.0;

    scene.animate(1.0, 0.0, &mut progress, 0, None);

    assert_eq!(progress, 1.0);
    assert!(dvec3_approx(scene.instances[0].position, DVec3::new(10.0, 0.0, 0.0)));
}

#[test]
fn animate_ping_pongs_by_default() {
    let mut scene = sample_scene();
    let mut progress = 0.9;

    scene.animate(1.0, 200.0, &mut progress, 0, None);

    assert!((progress - 0.9).abs() < 1e-5);
    assert_eq!(scene.animations[0].sign, -1.0);

    scene.animate(1.0, 400.0, &mut progress, 0, None);
    assert!((progress - 0.5).abs() < 1e-5);
}

#[test]
fn animate_static_node_overwrites_loader_placement() {
    let mut scene = sample_scene();
    let mut progress = 0.0;

    scene.animate(1.0, 500.0, &mut progress, 0, None);

    // The "props" node has an identity transform and owns the placement.
    assert_eq!(scene.instances[1].position, DVec3::ZERO);
    assert!(!scene.instances[1].has_moved());
}

#[test]
fn animate_applies_static_node_transform_every_frame() {
    let mut scene = sample_scene();
    let offset = DVec3::new(0.0, 0.0, 3.0);
    scene.animations[0].root_node.children[1].transform = DAffine3::from_translation(offset);

    let mut progress = 0.0;
    for _ in 0..3 {
        scene.animate(1.0, 100.0, &mut progress, 0, None);
        assert_eq!(scene.instances[1].position, offset);
        assert_eq!(scene.instances[2].position, offset);
        assert!(!scene.instances[1].has_moved());
    }
}

#[test]
fn animate_writes_camera_transform() {
    let mut scene = sample_scene();
    let camera_tree = NodeTree::named("camera").with_animation_node(1);
    let animation = &mut scene.animations[0];
    animation.animation_nodes.push(slide_x(-4.0));
    animation.camera_node = Some(camera_tree);

    let mut progress = 0.0;
    let mut camera = DAffine3::IDENTITY;
    scene.animate(1.0, 500.0, &mut progress, 0, Some(&mut camera));

    assert!(dvec3_approx(camera.translation, DVec3::new(-2.0, 0.0, 0.0)));
    assert!(dvec3_approx(scene.instances[0].position, DVec3::new(5.0, 0.0, 0.0)));
}

#[test]
fn animate_without_camera_tree_leaves_output_untouched() {
    let mut scene = sample_scene();
    let mut progress = 0.0;
    let marker = DAffine3::from_translation(DVec3::new(1.0, 2.0, 3.0));
    let mut camera = marker;

    scene.animate(1.0, 500.0, &mut progress, 0, Some(&mut camera));

    assert_eq!(camera, marker);
}

#[test]
fn animation_index_finds_by_name() {
    let scene = sample_scene();
    assert_eq!(scene.animation_index("slide"), Some(0));
    assert_eq!(scene.animation_index("missing"), None);
}

#[test]
fn reset_instance_history_suppresses_motion() {
    let mut scene = sample_scene();
    let mut progress = 0.0;
    scene.animate(1.0, 100.0, &mut progress, 0, None);
    scene.animate(1.0, 100.0, &mut progress, 0, None);
    assert!(scene.instances[0].has_moved());

    scene.reset_instance_history();
    scene.animate(1.0, 100.0, &mut progress, 0, None);

    assert!(!scene.instances[0].has_moved());
}

// ============================================================================
// Transient data
// ============================================================================

#[test]
fn unload_texture_data_releases_textures() {
    let mut scene = sample_scene();
    scene.textures.push(Texture::new(
        "albedo",
        TextureFormat::Rgba8Unorm,
        2,
        2,
        1,
        1,
        vec![vec![0; 16]],
    ));
    assert!(scene.has_texture_data());

    scene.unload_texture_data();

    assert!(!scene.has_texture_data());
    assert_eq!(scene.textures.capacity(), 0);
    assert_eq!(scene.materials.len(), 2);
}

#[test]
fn unload_geometry_data_keeps_meshes_and_instances() {
    let mut scene = sample_scene();
    assert!(scene.has_geometry_data());

    scene.unload_geometry_data();

    assert!(!scene.has_geometry_data());
    assert_eq!(scene.vertices.capacity(), 0);
    assert_eq!(scene.indices.capacity(), 0);
    assert_eq!(scene.meshes.len(), 2);
    assert_eq!(scene.instances.len(), 3);

    // Playback does not need the raw buffers.
    let mut progress = 0.0;
    scene.animate(1.0, 500.0, &mut progress, 0, None);
    assert!(dvec3_approx(scene.instances[0].position, DVec3::new(5.0, 0.0, 0.0)));
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn validate_accepts_sample_scene() -> anyhow::Result<()> {
    sample_scene().validate()?;
    Ok(())
}

#[test]
fn validate_rejects_bad_mesh_index() {
    let mut scene = sample_scene();
    scene.instances[2].mesh_index = 9;

    assert_eq!(
        scene.validate(),
        Err(SceneError::MeshIndexOutOfRange {
            instance: 2,
            index: 9,
            count: 2,
        })
    );
}

#[test]
fn validate_rejects_bad_material_index() {
    let mut scene = sample_scene();
    scene.instances[1].material_index = 4;

    assert!(matches!(
        scene.validate(),
        Err(SceneError::MaterialIndexOutOfRange { instance: 1, index: 4, .. })
    ));
}

#[test]
fn validate_rejects_mesh_past_index_buffer() {
    let mut scene = sample_scene();
    scene.meshes[1].index_num = 30;

    assert_eq!(
        scene.validate(),
        Err(SceneError::MeshRangeOutOfBounds {
            mesh: 1,
            buffer: "index",
            start: 6,
            end: 36,
            len: 12,
        })
    );
}

#[test]
fn validate_skips_ranges_after_unload() {
    let mut scene = sample_scene();
    scene.meshes[1].index_num = 30;
    scene.unload_geometry_data();

    assert!(scene.validate().is_ok());
}

#[test]
fn validate_rejects_tree_pointing_past_instances() {
    let mut scene = sample_scene();
    scene.animations[0]
        .root_node
        .add_child(NodeTree::named("ghost").with_instances([42]));

    assert!(matches!(
        scene.validate(),
        Err(SceneError::InstanceIndexOutOfRange { index: 42, count: 3, .. })
    ));
}

// ============================================================================
// Classification and static geometry hash
// ============================================================================

#[test]
fn classify_marks_only_animated_instances_dynamic() {
    let mut scene = sample_scene();
    scene.classify_dynamic_instances();

    let dynamic: Vec<usize> = scene.dynamic_instances().map(|(i, _)| i).collect();
    let fixed: Vec<usize> = scene.static_instances().map(|(i, _)| i).collect();
    assert_eq!(dynamic, vec![0]);
    assert_eq!(fixed, vec![1, 2]);
    assert!(scene.instances[1].is_static());
}

#[test]
fn static_geometry_hash_ignores_dynamic_motion() {
    let mut scene = sample_scene();
    scene.classify_dynamic_instances();
    let before = scene.static_geometry_hash();

    let mut progress = 0.0;
    scene.animate(1.0, 300.0, &mut progress, 0, None);

    // Instance 0 moved but is dynamic; the statics were rewritten with the
    // same identity node transform they had after the first write.
    let after_first = scene.static_geometry_hash();
    scene.animate(1.0, 300.0, &mut progress, 0, None);
    assert_eq!(after_first, scene.static_geometry_hash());
    assert_ne!(before, 0);
}

#[test]
fn static_geometry_hash_changes_with_static_placement() {
    let mut scene = sample_scene();
    scene.classify_dynamic_instances();
    let before = scene.static_geometry_hash();

    scene.instances[2].position.z += 1.0;
    assert_ne!(before, scene.static_geometry_hash());

    scene.instances[2].position.z -= 1.0;
    assert_eq!(before, scene.static_geometry_hash());

    scene.instances[1].allow_update = true;
    assert_ne!(before, scene.static_geometry_hash());
}

// ============================================================================
// Bounds and prepare
// ============================================================================

#[test]
fn update_bounds_covers_placed_meshes() {
    let mut scene = sample_scene();
    scene.update_bounds();

    // Instance 0: unit cube at origin. Instances 1 and 2: (0..2, 0..1, 0..1)
    // shifted by ±5 on Y.
    assert_eq!(scene.aabb.min, Vec3::new(-1.0, -5.0, -1.0));
    assert_eq!(scene.aabb.max, Vec3::new(2.0, 6.0, 1.0));
}

#[test]
fn update_bounds_of_empty_scene_is_empty() {
    let mut scene = Scene::new();
    scene.update_bounds();
    assert!(scene.aabb.is_empty());
}

#[test]
fn prepare_classifies_and_overrides_loop_mode() -> anyhow::Result<()> {
    init_logging();
    let mut scene = sample_scene();

    scene.prepare(&SceneSettings {
        loop_mode: Some(LoopMode::Loop),
        ..Default::default()
    })?;

    assert_eq!(scene.animations[0].loop_mode, LoopMode::Loop);
    assert!(scene.instances[0].allow_update);
    assert!(!scene.instances[1].allow_update);
    assert!(!scene.aabb.is_empty());
    Ok(())
}

#[test]
fn prepare_without_updates_keeps_everything_static() -> anyhow::Result<()> {
    let mut scene = sample_scene();
    scene.instances[1].allow_update = true;

    scene.prepare(&SceneSettings {
        allow_update: false,
        ..Default::default()
    })?;

    assert_eq!(scene.static_instances().count(), 3);
    Ok(())
}

#[test]
fn prepare_strict_fails_on_invalid_scene() {
    let mut scene = sample_scene();
    scene.instances[0].mesh_index = 100;

    assert!(scene.prepare(&SceneSettings::default()).is_err());
}

#[test]
fn prepare_lenient_continues_on_invalid_scene() {
    init_logging();
    let mut scene = sample_scene();
    scene.instances[0].mesh_index = 100;

    let result = scene.prepare(&SceneSettings {
        strict_validation: false,
        ..Default::default()
    });

    assert!(result.is_ok());
    assert!(scene.instances[0].allow_update);
}
