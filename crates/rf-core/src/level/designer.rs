//! Parallel generation rounds
//!
//! Spins up a configurable number of concurrent generator attempts against
//! the same room, keeps the first solution, and cancels the rest.

use std::sync::Arc;
use std::sync::mpsc;
use std::thread;

use log::{debug, info};

use crate::GenRng;

use super::{
    BuildPiece, BuildRoomSolution, CancelFlag, GenerationError, Generator, Grid, Room,
    SearchOutcome, catalog,
};

/// Result of one generation round
#[derive(Debug)]
pub enum DesignOutcome {
    /// The winning attempt's base grid and solution. The rendering consumer
    /// obtains the final composite grid via `solution.current_grid(&base)`.
    Solved {
        base: Grid,
        solution: BuildRoomSolution,
    },
    /// Every attempt exhausted its search space; the caller may retry with
    /// another seed or a different room.
    Exhausted,
}

/// Orchestrates concurrent generator attempts and claims the first success.
pub struct LevelDesigner {
    attempts: usize,
    pieces: Vec<Arc<BuildPiece>>,
}

impl LevelDesigner {
    /// A designer running `attempts` concurrent searches over the standard
    /// catalog. `attempts` is clamped to at least one.
    pub fn new(attempts: usize) -> Self {
        Self::with_pieces(attempts, catalog::piece_catalog().to_vec())
    }

    /// A designer using a caller-supplied catalog
    pub fn with_pieces(attempts: usize, pieces: Vec<Arc<BuildPiece>>) -> Self {
        Self {
            attempts: attempts.max(1),
            pieces,
        }
    }

    /// Run one generation round.
    ///
    /// Each attempt gets an independent seed derived from `seed` and its own
    /// cancel flag. The first solution received claims the win and raises
    /// every flag; the remaining attempts are drained before this returns,
    /// so no partial state outlives the round. Exactly one solution is kept.
    pub fn design(&self, room: &Room, seed: u64) -> Result<DesignOutcome, GenerationError> {
        let mut generators = Vec::with_capacity(self.attempts);
        let mut flags = Vec::with_capacity(self.attempts);
        for worker in 0..self.attempts {
            let flag = CancelFlag::new();
            let generator = Generator::with_cancel(
                room.clone(),
                self.pieces.clone(),
                GenRng::derive_seed(seed, worker as u64),
                flag.clone(),
            )?;
            flags.push(flag);
            generators.push(generator);
        }

        let (tx, rx) = mpsc::channel();
        let outcome = thread::scope(|scope| {
            for (worker, generator) in generators.into_iter().enumerate() {
                let tx = tx.clone();
                scope.spawn(move || {
                    // the receiver may be done once a sibling has won
                    let _ = tx.send((worker, generator.run()));
                });
            }
            drop(tx);

            let mut winner = None;
            for (worker, outcome) in rx {
                match outcome {
                    SearchOutcome::Solved { base, solution } if winner.is_none() => {
                        info!("attempt {worker} won the round");
                        for flag in &flags {
                            flag.cancel();
                        }
                        winner = Some((base, solution));
                    }
                    SearchOutcome::Solved { .. } => {
                        debug!("attempt {worker} solved after the win was claimed")
                    }
                    SearchOutcome::Exhausted => debug!("attempt {worker} exhausted its search"),
                    SearchOutcome::Cancelled => debug!("attempt {worker} cancelled"),
                }
            }
            winner
        });

        Ok(match outcome {
            Some((base, solution)) => DesignOutcome::Solved { base, solution },
            None => DesignOutcome::Exhausted,
        })
    }
}
