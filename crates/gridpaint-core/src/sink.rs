//! The [`CellSink`] observer — how a renderer sees grid mutations.

use crate::geom::Point;
use crate::tile::Tile;

/// Receiver for observable grid mutations.
///
/// The search engine and run controller report every cell they write
/// through this interface; a front-end redraws exactly those cells.
/// [`force_redraw`](CellSink::force_redraw) is invoked after bulk
/// overwrites (restore), where a cell-by-cell diff would be pointless.
pub trait CellSink {
    /// One cell changed to `tile`.
    fn cell_write(&mut self, p: Point, tile: Tile);

    /// The whole grid changed; repaint everything.
    fn force_redraw(&mut self);
}

/// A sink that ignores everything, for headless (batch) use.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullSink;

impl CellSink for NullSink {
    fn cell_write(&mut self, _p: Point, _tile: Tile) {}
    fn force_redraw(&mut self) {}
}
