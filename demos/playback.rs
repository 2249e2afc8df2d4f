//! Plays a two-part animation for a few frames and prints instance motion.
//!
//! Run with `RUST_LOG=debug cargo run --example playback` to see the
//! classification and playback logs.

use glam::{DAffine3, DVec3, Quat, Vec3};

use rtscene::{
    Animation, AnimationNode, BoundingBox, Instance, KeyframeTrack, Material, Mesh, NodeTree,
    Scene, SceneSettings,
};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut scene = Scene::new();
    scene.materials.push(Material::default());
    scene.meshes.push(Mesh {
        aabb: BoundingBox::new(Vec3::splat(-0.5), Vec3::splat(0.5)),
        ..Default::default()
    });

    // === 1. Instances: a spinning arm holding a cube, and a static floor ===
    scene.instances = vec![Instance::new(0, 0), Instance::new(0, 0)];

    let arm = AnimationNode::new(
        KeyframeTrack::default(),
        KeyframeTrack::linear(
            vec![0.0, 1000.0, 2000.0],
            vec![
                Quat::IDENTITY,
                Quat::from_rotation_y(std::f32::consts::PI),
                Quat::IDENTITY,
            ],
        ),
        KeyframeTrack::default(),
    );
    let camera = AnimationNode::new(
        KeyframeTrack::linear(
            vec![0.0, 2000.0],
            vec![DVec3::new(0.0, 2.0, 10.0), DVec3::new(0.0, 4.0, 6.0)],
        ),
        KeyframeTrack::default(),
        KeyframeTrack::default(),
    );

    let root = NodeTree::named("root")
        .with_child(
            NodeTree::named("arm").with_animation_node(0).with_child(
                NodeTree::named("cube")
                    .with_transform(DAffine3::from_translation(DVec3::new(3.0, 0.0, 0.0)))
                    .with_instances([0]),
            ),
        )
        .with_child(
            NodeTree::named("floor")
                .with_transform(DAffine3::from_translation(DVec3::new(0.0, -1.0, 0.0)))
                .with_instances([1]),
        );

    scene.animations.push(
        Animation::new("spin", vec![arm, camera], root)
            .with_camera(NodeTree::named("camera").with_animation_node(1)),
    );

    // === 2. Post-load step ===
    scene.prepare(&SceneSettings::default())?;
    println!(
        "{} dynamic / {} static instances, bounds {:?}",
        scene.dynamic_instances().count(),
        scene.static_instances().count(),
        scene.aabb
    );

    // === 3. Playback at 60 fps ===
    let mut progress = 0.0;
    let mut camera_transform = DAffine3::IDENTITY;
    for frame in 0..8 {
        scene.animate(1.0, 1000.0 / 60.0 * 8.0, &mut progress, 0, Some(&mut camera_transform));

        let cube = &scene.instances[0];
        println!(
            "frame {frame}: progress {progress:.3} cube {:.2} (moved {:.3}) camera {:.2}",
            cube.position,
            cube.position.distance(cube.position_prev),
            camera_transform.translation
        );
    }

    Ok(())
}
