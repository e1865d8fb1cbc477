//! Per-tick logic.
//!
//! - [`input`] – drains one tick of input and broadcasts it
//! - [`render`] – draws and presents one frame
//! - [`transform`] – applies input events to the sprite transform

pub mod input;
pub mod render;
pub mod transform;
