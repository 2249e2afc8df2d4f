//! Scene payload
//!
//! Plain data handed over by the loader and uploaded by the renderer. The
//! animation core only writes instance transforms and reads mesh bounds.
//!
//! - [`Texture`]: decoded pixel data with mip chain
//! - [`Material`]: texture indices and alpha mode
//! - [`Mesh`], [`Vertex`], [`UnpackedVertex`], [`Primitive`]: geometry
//! - [`BoundingBox`]: axis-aligned bounds

pub mod bounds;
pub mod material;
pub mod mesh;
pub mod texture;

pub use bounds::BoundingBox;
pub use material::{AlphaMode, Material, StaticTexture};
pub use mesh::{Index, Mesh, Primitive, UnpackedVertex, Vertex};
pub use texture::{Texture, TextureFormat};

/// Marks an unset payload index (mesh, material) on GPU-facing data.
pub const INVALID_INDEX: u32 = u32::MAX;
