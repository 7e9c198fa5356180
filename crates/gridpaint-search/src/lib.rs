//! Incremental shortest-path search over a paintable grid.
//!
//! The engine maintains an open frontier and a closed set over a
//! [`GridStore`](gridpaint_core::GridStore), expands nodes in priority
//! order, and marks visited/frontier/path cells on the grid as an
//! observable side effect of the algorithm. A run executes either as one
//! atomic computation (batch) or one expansion at a time (stepwise), so a
//! renderer can interleave drawing with the search.
//!
//! Entry point is [`SearchRun`], which owns the grid, the selected
//! [`Heuristic`]/[`Neighborhood`] policy, and the search lifecycle:
//!
//! ```
//! use gridpaint_core::{GridStore, NullSink, Point, Tile};
//! use gridpaint_search::{RunConfig, SearchRun, SearchState};
//!
//! let mut grid = GridStore::new(8, 8);
//! grid.set(Point::new(0, 0), Tile::Start).unwrap();
//! grid.set(Point::new(7, 7), Tile::Destination).unwrap();
//! let mut run = SearchRun::new(grid, RunConfig::default());
//! let state = run.start(&mut NullSink).unwrap();
//! assert_eq!(state, SearchState::Found);
//! ```

mod engine;
mod frontier;
mod policy;
mod run;

pub use engine::{PathFound, SearchState};
pub use policy::{Heuristic, Neighborhood, Step};
pub use run::{RunConfig, SearchRun, YieldCadence};
