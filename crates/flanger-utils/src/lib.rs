//! Internal utilities for the flanger parameter layer.
//!
//! Small, dependency-free helpers shared by `flanger-core`. Everything here is
//! `const fn` where the language allows it.
//!
//! # Contents
//!
//! - [`fnv1a_32`] - FNV-1a hash used to derive host parameter ids from identifiers
//! - [`find_collision`] - detects two identifiers that hash to the same host id

pub mod hash;

pub use hash::{find_collision, fnv1a_32};
