//! Utility Module
//!
//! - [`hash`]: xxh3 name and content hashing used by node trees and the
//!   static geometry signature

pub mod hash;

pub use hash::{ContentHasher, hash_name};
