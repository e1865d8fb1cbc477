//! Plain-data building blocks of the scene.
//!
//! Submodules overview:
//! - [`button`] – hit-tested four-state UI button and its sprite clips
//! - [`sprite`] – clip rectangles and sprite sheets
//! - [`transform`] – position, rotation and flip of the animated sprite

pub mod button;
pub mod sprite;
pub mod transform;
