//! The search state machine: seeding, one-expansion ticks, backtrace.

use gridpaint_core::{CellSink, Error, GridStore, Point, Result, Tile};

use crate::frontier::{Frontier, Node};
use crate::policy::{Heuristic, Neighborhood};

// ---------------------------------------------------------------------------
// SearchState / PathFound
// ---------------------------------------------------------------------------

/// Lifecycle of a search.
///
/// `Running` is re-entered on every tick in stepwise mode; the other
/// post-seed states are terminal until the next seed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchState {
    #[default]
    Idle,
    Seeded,
    Running,
    Found,
    Exhausted,
    Cancelled,
}

impl SearchState {
    /// Whether the search has ended (successfully or not).
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SearchState::Found | SearchState::Exhausted | SearchState::Cancelled
        )
    }
}

/// The result of a successful search.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathFound {
    /// Total accumulated move cost from start to destination.
    pub cost: f64,
    /// Path cells in start-to-destination order, excluding the start and
    /// destination cells themselves. These are exactly the cells marked
    /// [`Tile::Path`].
    pub cells: Vec<Point>,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// The expansion state machine. Policy fields are captured at seed time
/// and held for the run's duration.
pub(crate) struct Engine {
    state: SearchState,
    neighborhood: Neighborhood,
    heuristic: Heuristic,
    goal_marker: Tile,
    start: Point,
    goal: Point,
    frontier: Frontier,
    result: Option<PathFound>,
    ticks: u64,
}

impl Engine {
    pub(crate) fn new(width: i32, height: i32) -> Self {
        Self {
            state: SearchState::Idle,
            neighborhood: Neighborhood::default(),
            heuristic: Heuristic::default(),
            goal_marker: Tile::Wall,
            start: Point::ZERO,
            goal: Point::ZERO,
            frontier: Frontier::new(width, height),
            result: None,
            ticks: 0,
        }
    }

    #[inline]
    pub(crate) fn state(&self) -> SearchState {
        self.state
    }

    #[inline]
    pub(crate) fn result(&self) -> Option<&PathFound> {
        self.result.as_ref()
    }

    /// Expansions performed since the last seed.
    #[inline]
    pub(crate) fn ticks(&self) -> u64 {
        self.ticks
    }

    #[inline]
    pub(crate) fn open_len(&self) -> usize {
        self.frontier.open_len()
    }

    /// Locate the start and destination markers, discard any previous
    /// node graph, and push the root node. Does not write to the grid, so
    /// a failed seed leaves it untouched.
    pub(crate) fn seed(
        &mut self,
        grid: &GridStore,
        neighborhood: Neighborhood,
        heuristic: Heuristic,
        goal_marker: Tile,
    ) -> Result<()> {
        let start = grid.find_unique(Tile::Start).ok_or(Error::NoStart)?;
        let goal = grid.find_unique(Tile::Destination).ok_or(Error::NoDestination)?;
        self.neighborhood = neighborhood;
        self.heuristic = heuristic;
        self.goal_marker = goal_marker;
        self.start = start;
        self.goal = goal;
        self.frontier.reset();
        self.result = None;
        self.ticks = 0;
        self.frontier.push(Node {
            pos: start,
            g: 0.0,
            f: heuristic.estimate(start, goal),
            parent: None,
        });
        self.state = SearchState::Seeded;
        log::debug!(
            "seeded search {start} -> {goal} ({neighborhood}-way, heuristic {heuristic})"
        );
        Ok(())
    }

    /// Request cancellation. Takes effect at the tick boundary: a tick in
    /// progress always completes, and the next [`tick`](Self::tick) call
    /// returns `Cancelled` without touching the grid.
    pub(crate) fn cancel(&mut self) {
        if matches!(self.state, SearchState::Seeded | SearchState::Running) {
            self.state = SearchState::Cancelled;
            log::debug!("search cancelled after {} ticks", self.ticks);
        }
    }

    /// Expand the lowest-`f` open node. Returns the state after the tick;
    /// calling on a terminal (or idle) state is a no-op.
    pub(crate) fn tick(
        &mut self,
        grid: &mut GridStore,
        sink: &mut dyn CellSink,
    ) -> Result<SearchState> {
        match self.state {
            SearchState::Seeded | SearchState::Running => {}
            other => return Ok(other),
        }
        let Some(current) = self.frontier.peek() else {
            self.state = SearchState::Exhausted;
            log::debug!("open list exhausted after {} ticks, no path", self.ticks);
            return Ok(self.state);
        };
        self.state = SearchState::Running;
        self.ticks += 1;
        // The expanded node leaves the open list now, before successors
        // are inserted: an overestimating heuristic (Manhattan over
        // diagonal moves) can rank a successor ahead of its parent at
        // the front, and the close is by open-list position.
        self.frontier.close_front();

        let (cpos, cg) = {
            let n = self.frontier.node(current);
            (n.pos, n.g)
        };

        for step in self.neighborhood.steps() {
            let np = cpos.shift(step.dx, step.dy);
            // Out of bounds or unwalkable: not a candidate.
            let Ok(tile) = grid.get(np) else { continue };
            if !tile.is_walkable() {
                continue;
            }
            if tile == Tile::Destination {
                self.found(grid, sink, current, cg + step.cost())?;
                return Ok(self.state);
            }
            let g = cg + step.cost();
            let f = g + self.heuristic.estimate(np, self.goal);
            if self.frontier.is_closed(np) {
                continue;
            }
            if let Some(open_idx) = self.frontier.open_index_of(np) {
                // A new discovery always supersedes an open duplicate;
                // there is no cost comparison gate.
                self.frontier.evict_to_closed(open_idx);
            }
            self.frontier.push(Node {
                pos: np,
                g,
                f,
                parent: Some(current),
            });
            write(grid, sink, np, Tile::FrontierNew)?;
        }

        // The expanded node's cell becomes "old", except the start cell,
        // whose marker must survive.
        if cpos != self.start {
            write(grid, sink, cpos, Tile::FrontierOld)?;
        }
        Ok(self.state)
    }

    /// Terminal transition: seal the destination with the configured goal
    /// marker (through the normal write path, so a `Wall` marker gets the
    /// usual brush), then walk the parent chain from the discovering node
    /// marking path cells. The parentless root is the start node and is
    /// left unmarked.
    fn found(
        &mut self,
        grid: &mut GridStore,
        sink: &mut dyn CellSink,
        discoverer: usize,
        cost: f64,
    ) -> Result<()> {
        self.state = SearchState::Found;
        write(grid, sink, self.goal, self.goal_marker)?;

        let mut cells = Vec::new();
        let mut cursor = discoverer;
        while let Some(parent) = self.frontier.node(cursor).parent {
            cells.push(self.frontier.node(cursor).pos);
            cursor = parent;
        }
        cells.reverse();
        for &p in &cells {
            write(grid, sink, p, Tile::Path)?;
        }
        log::info!(
            "path found after {} ticks: cost {:.3}, {} cells",
            self.ticks,
            cost,
            cells.len()
        );
        self.result = Some(PathFound { cost, cells });
        Ok(())
    }
}

/// Apply one logical write and forward every touched cell to the sink.
fn write(grid: &mut GridStore, sink: &mut dyn CellSink, p: Point, tile: Tile) -> Result<()> {
    for (wp, wt) in grid.set(p, tile)? {
        sink.cell_write(wp, wt);
    }
    Ok(())
}
