//! Event types delivered by the backend.
//!
//! Submodules:
//! - [`input`] – per-tick input events and the frame that carries them
pub mod input;
