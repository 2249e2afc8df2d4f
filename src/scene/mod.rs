//! Scene Module
//!
//! - [`Scene`]: owns geometry, materials, textures, instances and animations
//! - [`NodeTree`]: transform hierarchy driving instances
//! - [`Instance`]: placed mesh with current and previous transform
//! - [`SceneSettings`]: post-load configuration

pub mod instance;
pub mod node_tree;
#[allow(clippy::module_inception)]
pub mod scene;
pub mod settings;

pub use instance::{Instance, TransformHistory};
pub use node_tree::NodeTree;
pub use scene::Scene;
pub use settings::SceneSettings;
