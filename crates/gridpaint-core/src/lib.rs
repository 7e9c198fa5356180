//! Core types for the gridpaint pathfinding visualizer.
//!
//! This crate owns the mutable world the search operates on:
//!
//! - [`GridStore`] — a fixed-size 2D grid of [`Tile`]s with bounded
//!   read/write access, unique-marker handling and snapshot/restore
//! - [`Point`] — integer grid coordinates
//! - [`CellSink`] — the observer interface a renderer implements to see
//!   every cell mutation as it happens
//! - [`brush`] — pointer-to-cell mapping and drag interpolation for
//!   painting front-ends
//!
//! The search algorithms themselves live in `gridpaint-search`.

pub mod brush;
mod error;
mod geom;
mod grid;
mod sink;
mod tile;

pub use error::{Error, Result};
pub use geom::Point;
pub use grid::{CellWrites, GridSnapshot, GridStore};
pub use sink::{CellSink, NullSink};
pub use tile::Tile;
