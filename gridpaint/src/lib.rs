//! Interactive terminal front-end for the gridpaint search engine.
//!
//! Paint walls with the mouse, place a start and a destination, then
//! watch the shortest-path search animate across the grid.

mod app;
mod colors;
mod scatter;

pub use app::{App, AppOptions, USAGE};
pub use colors::tile_color;
pub use scatter::scatter_walls;
