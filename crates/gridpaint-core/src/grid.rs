//! The [`GridStore`] — owner of the 2D cell-state array.
//!
//! Unlike a rendering surface, the store is exclusively owned: the search
//! engine mutates it directly and a renderer observes mutations through
//! the [`CellWrites`] each [`set`](GridStore::set) returns.

use crate::error::{Error, Result};
use crate::geom::Point;
use crate::tile::Tile;

// ---------------------------------------------------------------------------
// CellWrites
// ---------------------------------------------------------------------------

/// The cells actually written by one [`GridStore::set`] call.
///
/// A single logical write touches up to four cells: the wall brush paints
/// a 2x2 block, and placing a unique marker first clears its previous
/// holder. Callers forward these to their renderer / [`CellSink`].
///
/// [`CellSink`]: crate::CellSink
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CellWrites {
    cells: [(Point, Tile); 4],
    len: usize,
}

impl CellWrites {
    #[inline]
    fn push(&mut self, p: Point, tile: Tile) {
        self.cells[self.len] = (p, tile);
        self.len += 1;
    }

    /// Number of cells written.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the call was a no-op.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate over the written `(position, tile)` pairs in write order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (Point, Tile)> + '_ {
        self.cells[..self.len].iter().copied()
    }
}

impl IntoIterator for CellWrites {
    type Item = (Point, Tile);
    type IntoIter = std::iter::Take<std::array::IntoIter<(Point, Tile), 4>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter().take(self.len)
    }
}

// ---------------------------------------------------------------------------
// GridSnapshot
// ---------------------------------------------------------------------------

/// A deep copy of a grid's cells, used for run-start rollback.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSnapshot {
    tiles: Vec<Tile>,
    width: i32,
    height: i32,
}

// ---------------------------------------------------------------------------
// GridStore
// ---------------------------------------------------------------------------

/// A fixed-size rectangular grid of [`Tile`]s, indexed by integer
/// coordinates in `[0, width) x [0, height)`.
///
/// Row-major flat storage. The store enforces the unique-marker rule for
/// `Start` and `Destination` and implements the 2x2 wall brush.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridStore {
    tiles: Vec<Tile>,
    width: i32,
    height: i32,
}

impl GridStore {
    /// Create a new grid of the given dimensions, all cells `Empty`.
    pub fn new(width: i32, height: i32) -> Self {
        let w = width.max(0);
        let h = height.max(0);
        Self {
            tiles: vec![Tile::Empty; (w * h) as usize],
            width: w,
            height: h,
        }
    }

    /// Parse a grid from ASCII art: `.` empty, `#` wall, `S` start,
    /// `D` destination, `n`/`o` new/old frontier, `*` path. Lines must
    /// all have the same width.
    pub fn from_ascii(s: &str) -> Result<Self> {
        let s = s.trim();
        let mut rows: Vec<Vec<Tile>> = Vec::new();
        for (y, line) in s.lines().enumerate() {
            let mut row = Vec::new();
            for ch in line.trim().chars() {
                let tile = match ch {
                    '.' => Tile::Empty,
                    '#' => Tile::Wall,
                    'S' => Tile::Start,
                    'D' => Tile::Destination,
                    'n' => Tile::FrontierNew,
                    'o' => Tile::FrontierOld,
                    '*' => Tile::Path,
                    _ => {
                        return Err(Error::UnknownOption {
                            name: "tile char",
                            value: ch.to_string(),
                        });
                    }
                };
                row.push(tile);
            }
            if y > 0 && row.len() != rows[0].len() {
                return Err(Error::UnknownOption {
                    name: "grid row",
                    value: line.to_string(),
                });
            }
            rows.push(row);
        }
        let height = rows.len() as i32;
        let width = rows.first().map_or(0, |r| r.len() as i32);
        let mut grid = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, &tile) in row.iter().enumerate() {
                grid.tiles[y * width as usize + x] = tile;
            }
        }
        Ok(grid)
    }

    /// Grid width.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if self.contains(p) {
            Some((p.y * self.width + p.x) as usize)
        } else {
            None
        }
    }

    /// Read the tile at `p`.
    pub fn get(&self, p: Point) -> Result<Tile> {
        self.index(p)
            .map(|i| self.tiles[i])
            .ok_or(Error::OutOfBounds { x: p.x, y: p.y })
    }

    /// Write `tile` at `p`, returning every cell actually touched.
    ///
    /// Semantics carried over from the painting interface:
    /// - writing the tile a cell already holds is a no-op, except `Wall`,
    ///   which is always reapplied;
    /// - `Wall` also paints the three up-and-left neighbors when both
    ///   coordinates are positive (the 2x2 brush);
    /// - `Start` and `Destination` first reset their previous holder, if
    ///   any, to `Empty`.
    pub fn set(&mut self, p: Point, tile: Tile) -> Result<CellWrites> {
        let idx = self.index(p).ok_or(Error::OutOfBounds { x: p.x, y: p.y })?;
        let mut writes = CellWrites::default();
        if self.tiles[idx] == tile && tile != Tile::Wall {
            return Ok(writes);
        }
        match tile {
            Tile::Wall => {
                self.write_raw(p, tile, &mut writes);
                if p.x > 0 && p.y > 0 {
                    self.write_raw(p.shift(-1, -1), tile, &mut writes);
                    self.write_raw(p.shift(-1, 0), tile, &mut writes);
                    self.write_raw(p.shift(0, -1), tile, &mut writes);
                }
            }
            Tile::Start | Tile::Destination => {
                if let Some(prev) = self.position_of(tile) {
                    self.write_raw(prev, Tile::Empty, &mut writes);
                }
                self.write_raw(p, tile, &mut writes);
            }
            _ => self.write_raw(p, tile, &mut writes),
        }
        Ok(writes)
    }

    #[inline]
    fn write_raw(&mut self, p: Point, tile: Tile, writes: &mut CellWrites) {
        // Positions here are always in bounds (checked by set).
        if let Some(i) = self.index(p) {
            self.tiles[i] = tile;
            writes.push(p, tile);
        }
    }

    /// Row-major scan for the first cell holding `tile`.
    fn position_of(&self, tile: Tile) -> Option<Point> {
        self.tiles
            .iter()
            .position(|&t| t == tile)
            .map(|i| Point::new(i as i32 % self.width, i as i32 / self.width))
    }

    /// Column-major scan (x outer, y inner) for the unique cell holding
    /// `tile`. Returns `None` if absent.
    pub fn find_unique(&self, tile: Tile) -> Option<Point> {
        for x in 0..self.width {
            for y in 0..self.height {
                if self.tiles[(y * self.width + x) as usize] == tile {
                    return Some(Point::new(x, y));
                }
            }
        }
        None
    }

    /// Deep-copy the current cell states.
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            tiles: self.tiles.clone(),
            width: self.width,
            height: self.height,
        }
    }

    /// Overwrite every cell from a snapshot of the same dimensions.
    pub fn restore(&mut self, snapshot: &GridSnapshot) {
        debug_assert_eq!((snapshot.width, snapshot.height), (self.width, self.height));
        if snapshot.width == self.width && snapshot.height == self.height {
            self.tiles.clone_from(&snapshot.tiles);
        }
    }

    /// Reset every cell to `Empty`.
    pub fn clear(&mut self) {
        self.tiles.fill(Tile::Empty);
    }

    /// Row-major iterator over `(Point, Tile)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Tile)> + '_ {
        let w = self.width;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, &t)| (Point::new(i as i32 % w, i as i32 / w), t))
    }

    /// Count cells holding `tile`.
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_set_in_bounds() {
        let mut g = GridStore::new(4, 3);
        assert_eq!(g.get(Point::new(0, 0)).unwrap(), Tile::Empty);
        let w = g.set(Point::new(2, 1), Tile::Path).unwrap();
        assert_eq!(w.len(), 1);
        assert_eq!(g.get(Point::new(2, 1)).unwrap(), Tile::Path);
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let mut g = GridStore::new(4, 3);
        assert_eq!(
            g.get(Point::new(4, 0)),
            Err(Error::OutOfBounds { x: 4, y: 0 })
        );
        assert_eq!(
            g.set(Point::new(0, -1), Tile::Wall),
            Err(Error::OutOfBounds { x: 0, y: -1 })
        );
    }

    #[test]
    fn same_tile_is_a_no_op_except_wall() {
        let mut g = GridStore::new(3, 3);
        g.set(Point::new(1, 1), Tile::Path).unwrap();
        let w = g.set(Point::new(1, 1), Tile::Path).unwrap();
        assert!(w.is_empty());
        // Walls are always repainted, brush included.
        g.set(Point::new(2, 2), Tile::Wall).unwrap();
        let w = g.set(Point::new(2, 2), Tile::Wall).unwrap();
        assert_eq!(w.len(), 4);
    }

    #[test]
    fn wall_brush_paints_2x2() {
        let mut g = GridStore::new(4, 4);
        let w = g.set(Point::new(2, 2), Tile::Wall).unwrap();
        assert_eq!(w.len(), 4);
        for p in [
            Point::new(2, 2),
            Point::new(1, 1),
            Point::new(1, 2),
            Point::new(2, 1),
        ] {
            assert_eq!(g.get(p).unwrap(), Tile::Wall);
        }
        assert_eq!(g.count(Tile::Wall), 4);
    }

    #[test]
    fn wall_brush_skipped_on_edges() {
        let mut g = GridStore::new(4, 4);
        let w = g.set(Point::new(0, 2), Tile::Wall).unwrap();
        assert_eq!(w.len(), 1);
        let w = g.set(Point::new(3, 0), Tile::Wall).unwrap();
        assert_eq!(w.len(), 1);
        assert_eq!(g.count(Tile::Wall), 2);
    }

    #[test]
    fn unique_markers_move() {
        let mut g = GridStore::new(5, 5);
        g.set(Point::new(1, 1), Tile::Start).unwrap();
        let w = g.set(Point::new(3, 3), Tile::Start).unwrap();
        // Old holder cleared first, then the new cell written.
        let writes: Vec<_> = w.iter().collect();
        assert_eq!(writes[0], (Point::new(1, 1), Tile::Empty));
        assert_eq!(writes[1], (Point::new(3, 3), Tile::Start));
        assert_eq!(g.count(Tile::Start), 1);
        assert_eq!(g.find_unique(Tile::Start), Some(Point::new(3, 3)));
    }

    #[test]
    fn start_and_destination_are_independent() {
        let mut g = GridStore::new(5, 5);
        g.set(Point::new(0, 0), Tile::Start).unwrap();
        g.set(Point::new(4, 4), Tile::Destination).unwrap();
        assert_eq!(g.find_unique(Tile::Start), Some(Point::new(0, 0)));
        assert_eq!(g.find_unique(Tile::Destination), Some(Point::new(4, 4)));
        assert_eq!(g.find_unique(Tile::Path), None);
    }

    #[test]
    fn find_unique_scans_column_major() {
        let mut g = GridStore::new(3, 3);
        // Walls at (2, 0) and (0, 2): column-major order finds (0, 2)
        // first, row-major order would find (2, 0).
        g.set(Point::new(2, 0), Tile::Wall).unwrap();
        g.set(Point::new(0, 2), Tile::Wall).unwrap();
        assert_eq!(g.find_unique(Tile::Wall), Some(Point::new(0, 2)));
    }

    #[test]
    fn snapshot_and_restore() {
        let mut g = GridStore::new(4, 4);
        g.set(Point::new(1, 1), Tile::Start).unwrap();
        let snap = g.snapshot();
        g.set(Point::new(2, 2), Tile::Wall).unwrap();
        g.set(Point::new(3, 3), Tile::Path).unwrap();
        g.restore(&snap);
        assert_eq!(g.get(Point::new(1, 1)).unwrap(), Tile::Start);
        assert_eq!(g.count(Tile::Wall), 0);
        assert_eq!(g.count(Tile::Path), 0);
    }

    #[test]
    fn clear_resets_everything() {
        let mut g = GridStore::new(3, 3);
        g.set(Point::new(1, 1), Tile::Wall).unwrap();
        g.set(Point::new(2, 2), Tile::Start).unwrap();
        g.clear();
        assert!(g.iter().all(|(_, t)| t == Tile::Empty));
    }

    #[test]
    fn from_ascii_round_trip() {
        let g = GridStore::from_ascii(
            "S..\n\
             .#.\n\
             ..D",
        )
        .unwrap();
        assert_eq!(g.width(), 3);
        assert_eq!(g.height(), 3);
        assert_eq!(g.get(Point::new(0, 0)).unwrap(), Tile::Start);
        assert_eq!(g.get(Point::new(1, 1)).unwrap(), Tile::Wall);
        assert_eq!(g.get(Point::new(2, 2)).unwrap(), Tile::Destination);
    }

    #[test]
    fn from_ascii_rejects_unknown_chars() {
        assert!(GridStore::from_ascii("..!\n...").is_err());
        assert!(GridStore::from_ascii("..\n...").is_err());
    }
}
