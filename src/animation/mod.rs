//! Keyframe animation
//!
//! - [`KeyframeTrack`]: one sampled channel with clamped interpolation
//! - [`AnimationNode`]: position / rotation / scale tracks baked into a local transform
//! - [`Animation`]: a named clip owning its nodes, node trees and playback clock

pub mod clip;
pub mod node;
pub mod tracks;
pub mod values;

pub use clip::{Animation, LoopMode};
pub use node::{AnimationNode, Channel};
pub use tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
pub use values::Interpolatable;
