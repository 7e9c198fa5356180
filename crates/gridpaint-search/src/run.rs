//! The run controller: search lifecycle over an owned grid.

use gridpaint_core::{CellSink, GridSnapshot, GridStore, Result, Tile};

use crate::engine::{Engine, PathFound, SearchState};
use crate::policy::{Heuristic, Neighborhood};

// ---------------------------------------------------------------------------
// YieldCadence / RunConfig
// ---------------------------------------------------------------------------

/// Adaptive yield cadence for animated runs.
///
/// Ticks are batched in bursts proportional to the current open-list size
/// (`open_len >> shift` ticks per yield), trading animation smoothness
/// for throughput when the frontier grows large. While the open list is
/// smaller than `1 << shift` no yield is requested at all.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct YieldCadence {
    pub shift: u32,
}

impl Default for YieldCadence {
    fn default() -> Self {
        Self { shift: 2 }
    }
}

impl YieldCadence {
    /// Whether to hand control back to the host after `ticks` expansions
    /// with `open_len` nodes currently open.
    #[inline]
    pub fn should_yield(self, ticks: u64, open_len: usize) -> bool {
        let burst = (open_len >> self.shift) as u64;
        burst > 0 && ticks % burst == 0
    }
}

/// Policy selections for one run, read once at [`SearchRun::start`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    pub neighborhood: Neighborhood,
    pub heuristic: Heuristic,
    /// Batch (`false`) runs every tick inside `start`; animated (`true`)
    /// leaves the run seeded so the caller drives it stepwise.
    pub animate: bool,
    /// Tile written to the destination cell on success. Defaults to
    /// `Wall`, visually sealing the endpoint.
    pub goal_marker: Tile,
    pub cadence: YieldCadence,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            neighborhood: Neighborhood::default(),
            heuristic: Heuristic::default(),
            animate: false,
            goal_marker: Tile::Wall,
            cadence: YieldCadence::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// SearchRun
// ---------------------------------------------------------------------------

/// A self-contained search run: grid, policy, frontier state and the
/// run-start snapshot. Holds no ambient state, so independent runs can
/// coexist in one process.
pub struct SearchRun {
    grid: GridStore,
    /// Live policy selections; captured by the engine at `start`.
    pub config: RunConfig,
    engine: Engine,
    backup: Option<GridSnapshot>,
}

impl SearchRun {
    /// Take ownership of a grid to search over.
    pub fn new(grid: GridStore, config: RunConfig) -> Self {
        let engine = Engine::new(grid.width(), grid.height());
        Self {
            grid,
            config,
            engine,
            backup: None,
        }
    }

    /// The grid, for the painting collaborator and renderers.
    #[inline]
    pub fn grid(&self) -> &GridStore {
        &self.grid
    }

    /// Mutable grid access for painting. The painting interface must not
    /// be used while the run is `Running`.
    #[inline]
    pub fn grid_mut(&mut self) -> &mut GridStore {
        &mut self.grid
    }

    #[inline]
    pub fn state(&self) -> SearchState {
        self.engine.state()
    }

    /// The discovered path, once the state is `Found`.
    #[inline]
    pub fn result(&self) -> Option<&PathFound> {
        self.engine.result()
    }

    /// Expansions performed since the last `start`.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.engine.ticks()
    }

    /// Snapshot the grid, seed the engine from the current policy
    /// selections, and in batch mode drive the search to completion.
    ///
    /// Fails with `NoStart`/`NoDestination` when a marker is missing; the
    /// grid is not mutated in that case. In animated mode the returned
    /// state is `Seeded` and the caller advances the search with
    /// [`step`](Self::step) or [`step_burst`](Self::step_burst).
    pub fn start(&mut self, sink: &mut dyn CellSink) -> Result<SearchState> {
        self.backup = Some(self.grid.snapshot());
        self.engine.seed(
            &self.grid,
            self.config.neighborhood,
            self.config.heuristic,
            self.config.goal_marker,
        )?;
        if self.config.animate {
            return Ok(self.state());
        }
        loop {
            let state = self.engine.tick(&mut self.grid, sink)?;
            if state.is_terminal() {
                return Ok(state);
            }
        }
    }

    /// One expansion. No-op once the state is terminal.
    pub fn step(&mut self, sink: &mut dyn CellSink) -> Result<SearchState> {
        self.engine.tick(&mut self.grid, sink)
    }

    /// Run expansions until the yield cadence fires or the search ends.
    /// The caller redraws/polls between bursts.
    pub fn step_burst(&mut self, sink: &mut dyn CellSink) -> Result<SearchState> {
        loop {
            let state = self.engine.tick(&mut self.grid, sink)?;
            if state.is_terminal()
                || self
                    .config
                    .cadence
                    .should_yield(self.engine.ticks(), self.engine.open_len())
            {
                return Ok(state);
            }
        }
    }

    /// Request cancellation; observed at the next tick boundary.
    pub fn stop(&mut self) {
        self.engine.cancel();
    }

    /// Stop the run and roll the grid back to its state at the moment
    /// `start` was called, then ask the renderer for a full redraw.
    pub fn restore(&mut self, sink: &mut dyn CellSink) {
        self.stop();
        if let Some(backup) = &self.backup {
            self.grid.restore(backup);
            sink.force_redraw();
            log::debug!("grid restored to run-start snapshot");
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn run_config_round_trip() {
        let config = RunConfig {
            neighborhood: Neighborhood::Eight,
            heuristic: Heuristic::Euclidean,
            animate: true,
            goal_marker: Tile::Path,
            cadence: YieldCadence { shift: 3 },
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: RunConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn search_state_round_trip() {
        let json = serde_json::to_string(&SearchState::Exhausted).unwrap();
        let back: SearchState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SearchState::Exhausted);
    }
}
