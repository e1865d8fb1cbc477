//! spritestage library.
//!
//! Interactive sprite presentation engine: texture resources with RAII
//! handles, a frame-indexed animation clock, hit-tested buttons and an
//! input-driven 2D transform, all behind a [`backend::Backend`] seam so the
//! same loop runs against raylib or fully in memory.

pub mod app;
pub mod backend;
pub mod components;
pub mod error;
pub mod events;
pub mod resources;
pub mod systems;
