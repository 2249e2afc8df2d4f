//! rtscene
//!
//! In-memory scene representation for a real-time ray tracer: geometry,
//! materials, textures and hierarchical keyframe animation. Each frame,
//! [`Scene::animate`] samples an [`Animation`], composes transforms through
//! its [`NodeTree`] and writes world transforms (with the previous frame's
//! snapshot for motion vectors) into the scene's [`Instance`]s.
//!
//! Loading, GPU upload and acceleration-structure builds live elsewhere;
//! this crate provides the data they consume and the static/dynamic
//! classification that drives acceleration-structure placement.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod animation;
pub mod errors;
pub mod resources;
pub mod scene;
pub mod utils;

pub use animation::{
    Animation, AnimationNode, Channel, InterpolationMode, KeyframeTrack, LoopMode,
};
pub use errors::{Result, SceneError};
pub use resources::{
    AlphaMode, BoundingBox, INVALID_INDEX, Index, Material, Mesh, Primitive, StaticTexture,
    Texture, TextureFormat, UnpackedVertex, Vertex,
};
pub use scene::{Instance, NodeTree, Scene, SceneSettings, TransformHistory};
