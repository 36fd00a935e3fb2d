//! Randomized backtracking search over piece placements
//!
//! One [`Generator`] is one independent search attempt: it owns its grid,
//! solution, and RNG stream, and shares nothing mutable with its siblings.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, trace};
use thiserror::Error;

use crate::GenRng;

use super::{
    BuildPiece, BuildRoomSolution, CellKind, Grid, Point2D, Room, TransformedBuildPiece, catalog,
};

/// Cooperative cancellation flag shared between a generator and its
/// coordinator. Checked at every candidate placement, so a cancelled search
/// unwinds promptly and is never interrupted mid-mutation.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create an unraised flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether the flag has been raised
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Configuration errors detected before any search runs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("piece catalog is empty")]
    EmptyCatalog,
    #[error("no piece in the catalog has a connection cell")]
    NoConnectionCells,
}

/// Result of one search attempt.
///
/// Exhaustion and cancellation are routine outcomes, kept distinct so the
/// orchestrator can tell "no solution exists" from "a sibling already won".
#[derive(Debug)]
pub enum SearchOutcome {
    /// Every exit is connected. The final composite grid is
    /// `solution.current_grid(&base)`.
    Solved {
        base: Grid,
        solution: BuildRoomSolution,
    },
    /// Every branch was tried and backtracked; no solution exists for this
    /// room, catalog, and seed.
    Exhausted,
    /// The cancel flag was raised; neither success nor failure is implied.
    Cancelled,
}

/// Outcome of one recursion level.
enum Step {
    Solved,
    Exhausted,
    Cancelled,
}

/// One independent randomized search attempt over a room.
pub struct Generator {
    room: Room,
    base: Grid,
    pieces: Vec<Arc<BuildPiece>>,
    rng: GenRng,
    cancel: CancelFlag,
}

impl Generator {
    /// Create a generator with its own RNG stream and a fresh cancel flag
    pub fn new(room: Room, pieces: Vec<Arc<BuildPiece>>, seed: u64) -> Result<Self, GenerationError> {
        Self::with_cancel(room, pieces, seed, CancelFlag::new())
    }

    /// Create a generator observing an externally owned cancel flag
    pub fn with_cancel(
        room: Room,
        pieces: Vec<Arc<BuildPiece>>,
        seed: u64,
        cancel: CancelFlag,
    ) -> Result<Self, GenerationError> {
        if pieces.is_empty() {
            return Err(GenerationError::EmptyCatalog);
        }
        if pieces.iter().all(|p| p.connection_cells().is_empty()) {
            return Err(GenerationError::NoConnectionCells);
        }
        let base = Grid::new(room.width(), room.height());
        Ok(Self {
            room,
            base,
            pieces,
            rng: GenRng::new(seed),
            cancel,
        })
    }

    /// A handle on this generator's cancel flag
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Run the search to completion, consuming the generator.
    ///
    /// Exits are not stamped into the base grid; each one is retrofitted as
    /// a trivial single-cell `Exit` placement prepended to the solution, so
    /// the uniform placement validation enforces the exit discipline without
    /// special-casing.
    pub fn run(mut self) -> SearchOutcome {
        let mut solution = BuildRoomSolution::new();
        let marker = catalog::exit_marker();
        for &exit in self.room.exits() {
            solution.add(TransformedBuildPiece::new(
                Point2D::new(0, 0),
                exit,
                marker.clone(),
            ));
        }
        let mut exits_left: Vec<Point2D> = self.room.exits().to_vec();

        // Room validation guarantees at least one exit.
        let start = match self.rng.choose(self.room.exits()).copied() {
            Some(exit) => exit,
            None => return SearchOutcome::Exhausted,
        };
        debug!(
            "searching {}x{} room, {} exits, seed {}",
            self.room.width(),
            self.room.height(),
            self.room.exits().len(),
            self.rng.seed()
        );

        match self.search(&mut solution, &mut exits_left, vec![start]) {
            Step::Solved => {
                debug!("solved with {} placements", solution.len());
                SearchOutcome::Solved {
                    base: self.base,
                    solution,
                }
            }
            Step::Exhausted => {
                debug!("search space exhausted");
                SearchOutcome::Exhausted
            }
            Step::Cancelled => SearchOutcome::Cancelled,
        }
    }

    /// One recursion level: try every anchor, piece, and pivot in random
    /// order, committing each valid candidate and recursing; placements are
    /// undone in strict LIFO order on failure.
    fn search(
        &mut self,
        solution: &mut BuildRoomSolution,
        exits_left: &mut Vec<Point2D>,
        mut frontier: Vec<Point2D>,
    ) -> Step {
        self.rng.shuffle(&mut frontier);
        for &anchor in &frontier {
            let mut piece_order: Vec<usize> = (0..self.pieces.len()).collect();
            self.rng.shuffle(&mut piece_order);
            for idx in piece_order {
                let piece = self.pieces[idx].clone();
                let mut pivots = piece.connection_cells();
                self.rng.shuffle(&mut pivots);
                for pivot in pivots {
                    if self.cancel.is_cancelled() {
                        return Step::Cancelled;
                    }
                    let candidate = TransformedBuildPiece::new(pivot, anchor, piece.clone());
                    if !self.satisfies_constraints(&candidate, solution) {
                        continue;
                    }

                    trace!("committing piece {idx} pivot {pivot} at {anchor}");
                    solution.add(candidate.clone());

                    // Bounding-box containment of the exit within the placed
                    // piece's extent, not a per-cell match.
                    let covered: Vec<Point2D> = exits_left
                        .iter()
                        .copied()
                        .filter(|&exit| candidate.covers(exit))
                        .collect();
                    exits_left.retain(|exit| !covered.contains(exit));

                    if exits_left.is_empty() {
                        return Step::Solved;
                    }

                    // Covering an exit broadens the frontier to every
                    // connection cell of the assembled room; otherwise the
                    // search continues locally from the new piece.
                    let next_frontier = if covered.is_empty() {
                        candidate.connection_cells()
                    } else {
                        solution
                            .current_grid(&self.base)
                            .cells_of(CellKind::Connection)
                    };

                    match self.search(solution, exits_left, next_frontier) {
                        Step::Solved => return Step::Solved,
                        Step::Cancelled => return Step::Cancelled,
                        Step::Exhausted => {
                            trace!("backtracking from {anchor}");
                            solution.remove_last();
                            exits_left.extend(covered);
                        }
                    }
                }
            }
        }
        Step::Exhausted
    }

    /// Validate a candidate placement against the current composite grid:
    /// the full footprint must lie in bounds, solid cells may not overlap
    /// connection or border cells in either direction, exit cells may only
    /// receive a connection, and the placement must open at least one new
    /// connection point.
    fn satisfies_constraints(
        &self,
        candidate: &TransformedBuildPiece,
        solution: &mut BuildRoomSolution,
    ) -> bool {
        let piece = candidate.piece();
        let origin = candidate.origin();
        if !self.base.contains_rect(origin, piece.width(), piece.height()) {
            return false;
        }

        let grid = solution.current_grid(&self.base);
        let mut adds_connection = false;
        for (local, piece_cell) in piece.iter() {
            let room_cell = match grid.get(origin + local) {
                Some(cell) => cell,
                // unreachable after the bounds check
                None => return false,
            };
            if room_cell.conflicts_with(piece_cell) {
                return false;
            }
            // exits can only ever be plugged by a connector
            if room_cell == CellKind::Exit && piece_cell != CellKind::Connection {
                return false;
            }
            if piece_cell == CellKind::Connection
                && matches!(
                    room_cell,
                    CellKind::Empty | CellKind::Border | CellKind::Exit
                )
            {
                adds_connection = true;
            }
        }
        // placements that open no new connection point make no progress
        adds_connection
    }
}
