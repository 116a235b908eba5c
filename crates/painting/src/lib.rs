//! Artboard painting engine - procedural stroke synthesis and snapshot history
//!
//! This crate turns streams of pointer samples into varied ink:
//! - [`tools`] - Bristle brush, marker, airbrush, eraser, sketch/shading
//!   hatching and watercolor, all behind the [`tools::Tool`] lifecycle
//! - [`geometry`] - Rotation, bearing and angle smoothing helpers
//! - [`context`] - The [`context::PaintContext`] contract tools draw through
//! - [`raster`] - Software rasterizer implementing that contract
//! - [`recording`] - Context that logs draw calls (golden tests, remote hosts)
//! - [`history`] - Whole-surface snapshot undo/redo with a cursor
//! - [`artboard`] - Driver wiring pointer input, tool, surface and history
//! - [`surface`] / [`tiles`] - f32 RGBA storage with dirty-tile tracking

pub mod artboard;
pub mod constants;
pub mod context;
pub mod cursor;
pub mod geometry;
pub mod history;
pub mod random;
pub mod raster;
pub mod recording;
pub mod surface;
pub mod tiles;
pub mod tools;
pub mod types;

pub use artboard::*;
pub use constants::*;
pub use context::*;
pub use cursor::*;
pub use history::*;
pub use raster::RasterContext;
pub use recording::*;
pub use surface::*;
pub use tiles::*;
pub use tools::*;
pub use types::*;
