//! Ordered placement sequences with a memoized composite grid

use super::{Grid, TransformedBuildPiece};

/// An appendable, undoable sequence of piece placements plus a lazily
/// rebuilt composite grid of the room as currently assembled.
///
/// Owned exclusively by one search branch; backtracking undoes placements
/// with [`BuildRoomSolution::remove_last`] rather than copying the solution
/// per branch. The cached grid is invalidated on every mutation and rebuilt
/// by overlaying the placements, in list order, onto a copy of the base
/// grid, so later placements overwrite earlier ones where footprints
/// overlap.
#[derive(Debug, Clone, Default)]
pub struct BuildRoomSolution {
    placements: Vec<TransformedBuildPiece>,
    cached: Option<Grid>,
}

impl BuildRoomSolution {
    /// Create an empty solution
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a placement. Validation is the caller's responsibility.
    pub fn add(&mut self, placement: TransformedBuildPiece) {
        self.cached = None;
        self.placements.push(placement);
    }

    /// Remove and return the most recent placement; the exact inverse of
    /// [`BuildRoomSolution::add`].
    ///
    /// # Panics
    ///
    /// Panics when the solution is empty: backtracking past the first
    /// placement means the search bookkeeping is broken.
    pub fn remove_last(&mut self) -> TransformedBuildPiece {
        self.cached = None;
        match self.placements.pop() {
            Some(placement) => placement,
            None => panic!("remove_last on an empty solution"),
        }
    }

    /// True iff no placements are recorded
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Number of recorded placements
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// The recorded placements, oldest first
    pub fn placements(&self) -> &[TransformedBuildPiece] {
        &self.placements
    }

    /// The composite grid: `base` with every placement overlaid in append
    /// order. Cached until the next `add`/`remove_last`.
    pub fn current_grid(&mut self, base: &Grid) -> &Grid {
        self.cached.get_or_insert_with(|| {
            let mut grid = base.clone();
            for placement in &self.placements {
                placement.overlay_onto(&mut grid);
            }
            grid
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::super::{BuildPiece, CellKind, Point2D};
    use super::*;

    fn corridor_piece() -> Arc<BuildPiece> {
        Arc::new(BuildPiece::from_rows(&["cc", "ss"]).unwrap())
    }

    fn place(piece: &Arc<BuildPiece>, anchor: Point2D) -> TransformedBuildPiece {
        TransformedBuildPiece::new(Point2D::new(0, 0), anchor, piece.clone())
    }

    #[test]
    fn test_current_grid_idempotent() {
        let base = Grid::new(4, 4);
        let mut solution = BuildRoomSolution::new();
        solution.add(place(&corridor_piece(), Point2D::new(0, 0)));
        let first = solution.current_grid(&base).clone();
        let second = solution.current_grid(&base).clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_add_remove_inverse() {
        let base = Grid::new(4, 4);
        let piece = corridor_piece();
        let mut solution = BuildRoomSolution::new();
        solution.add(place(&piece, Point2D::new(0, 0)));
        let before = solution.current_grid(&base).clone();

        solution.add(place(&piece, Point2D::new(2, 2)));
        solution.remove_last();
        assert_eq!(solution.current_grid(&base), &before);
        assert_eq!(solution.len(), 1);
    }

    #[test]
    fn test_overlay_in_append_order() {
        let base = Grid::new(4, 4);
        let solid = Arc::new(BuildPiece::from_rows(&["ss"]).unwrap());
        let open = Arc::new(BuildPiece::from_rows(&["nn"]).unwrap());
        let mut solution = BuildRoomSolution::new();
        solution.add(place(&solid, Point2D::new(1, 1)));
        solution.add(place(&open, Point2D::new(1, 1)));
        let grid = solution.current_grid(&base);
        // the later empty footprint overwrites the earlier solid one
        assert_eq!(grid.get(Point2D::new(1, 1)), Some(CellKind::Empty));
        assert_eq!(grid.get(Point2D::new(2, 1)), Some(CellKind::Empty));
    }

    #[test]
    fn test_cache_invalidated_on_mutation() {
        let base = Grid::new(4, 4);
        let piece = corridor_piece();
        let mut solution = BuildRoomSolution::new();
        solution.add(place(&piece, Point2D::new(0, 0)));
        let one = solution.current_grid(&base).clone();
        solution.add(place(&piece, Point2D::new(2, 2)));
        let two = solution.current_grid(&base).clone();
        assert_ne!(one, two);
    }

    #[test]
    fn test_is_empty() {
        let mut solution = BuildRoomSolution::new();
        assert!(solution.is_empty());
        solution.add(place(&corridor_piece(), Point2D::new(0, 0)));
        assert!(!solution.is_empty());
    }

    #[test]
    #[should_panic(expected = "remove_last on an empty solution")]
    fn test_remove_last_on_empty_panics() {
        let mut solution = BuildRoomSolution::new();
        solution.remove_last();
    }
}
