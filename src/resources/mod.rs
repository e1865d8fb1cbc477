//! Long-lived state owned by the application context.
//!
//! Overview
//! - `animationclock` – frame-indexed clock that picks the sprite-sheet frame
//! - `gameconfig` – INI-backed application configuration
//! - `input` – key bindings and their config-file names
//! - `stopwatch` – elapsed-time caption shown next to the sprite
//! - `texture` – a single backend texture with load/reload/deallocate
//! - `texturestore` – textures keyed by name

pub mod animationclock;
pub mod gameconfig;
pub mod input;
pub mod stopwatch;
pub mod texture;
pub mod texturestore;
