//! Build pieces and their placements

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{CellKind, Grid, Point2D};

/// Errors parsing a piece stencil from glyph rows
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PieceParseError {
    #[error("piece stencil has no rows")]
    Empty,
    #[error("stencil row {row} has {got} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },
    #[error("unknown stencil glyph '{0}'")]
    UnknownGlyph(char),
}

/// An immutable rectangular stencil of categorised cells, used as a
/// placement template.
///
/// Pieces are shared read-only across all search branches and never mutated
/// after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildPiece {
    stencil: Grid,
}

impl BuildPiece {
    /// Parse a stencil from glyph rows, e.g. `&["cc", "ss"]`
    pub fn from_rows(rows: &[&str]) -> Result<Self, PieceParseError> {
        let height = rows.len();
        if height == 0 {
            return Err(PieceParseError::Empty);
        }
        let width = rows[0].chars().count();
        if width == 0 {
            return Err(PieceParseError::Empty);
        }
        let mut stencil = Grid::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            let got = row.chars().count();
            if got != width {
                return Err(PieceParseError::RaggedRow {
                    row: y,
                    expected: width,
                    got,
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                let kind =
                    CellKind::from_glyph(glyph).ok_or(PieceParseError::UnknownGlyph(glyph))?;
                stencil.set(Point2D::new(x as i32, y as i32), kind);
            }
        }
        Ok(Self { stencil })
    }

    /// Stencil width in cells
    pub fn width(&self) -> usize {
        self.stencil.width()
    }

    /// Stencil height in cells
    pub fn height(&self) -> usize {
        self.stencil.height()
    }

    /// Cell at the piece-local coordinate `p`
    pub fn get(&self, p: Point2D) -> Option<CellKind> {
        self.stencil.get(p)
    }

    /// Iterate every cell with its piece-local coordinate, row by row
    pub fn iter(&self) -> impl Iterator<Item = (Point2D, CellKind)> + '_ {
        self.stencil.iter()
    }

    /// Every connection-cell coordinate, in row-major order. Used as pivot
    /// candidates for placement; a piece without any is legal but produces
    /// no transformations.
    pub fn connection_cells(&self) -> Vec<Point2D> {
        self.stencil.cells_of(CellKind::Connection)
    }
}

/// A placement record: the piece's local `connection_point` cell sits on the
/// room-global `anchor`, so the piece origin is `anchor - connection_point`.
///
/// Created fresh per candidate placement and discarded if rejected.
#[derive(Debug, Clone)]
pub struct TransformedBuildPiece {
    connection_point: Point2D,
    anchor: Point2D,
    piece: Arc<BuildPiece>,
}

impl TransformedBuildPiece {
    /// Anchor `piece` so its local `connection_point` lands on `anchor`
    pub fn new(connection_point: Point2D, anchor: Point2D, piece: Arc<BuildPiece>) -> Self {
        Self {
            connection_point,
            anchor,
            piece,
        }
    }

    /// The placed piece
    pub fn piece(&self) -> &BuildPiece {
        &self.piece
    }

    /// Piece-local pivot cell
    pub fn connection_point(&self) -> Point2D {
        self.connection_point
    }

    /// Room coordinate the pivot cell is placed onto
    pub fn anchor(&self) -> Point2D {
        self.anchor
    }

    /// Room coordinate of the piece's top-left cell
    pub fn origin(&self) -> Point2D {
        self.anchor - self.connection_point
    }

    /// Whether `p` falls within this placement's rectangular extent.
    ///
    /// Exit coverage deliberately uses this bounding-box test rather than a
    /// per-cell one; the frontier-broadening step depends on it.
    pub fn covers(&self, p: Point2D) -> bool {
        let o = self.origin();
        p.x >= o.x
            && p.y >= o.y
            && p.x < o.x + self.piece.width() as i32
            && p.y < o.y + self.piece.height() as i32
    }

    /// Room coordinates of the piece's connection cells after translation
    pub fn connection_cells(&self) -> Vec<Point2D> {
        let o = self.origin();
        self.piece
            .connection_cells()
            .into_iter()
            .map(|c| o + c)
            .collect()
    }

    /// Write the full footprint onto `grid`. Every cell is written,
    /// including empty ones, so later placements overwrite earlier ones at
    /// overlapping coordinates.
    ///
    /// # Panics
    ///
    /// Panics when the footprint leaves the grid; constraint checking
    /// rejects such placements before they are ever committed.
    pub fn overlay_onto(&self, grid: &mut Grid) {
        let o = self.origin();
        for (local, kind) in self.piece.iter() {
            grid.set(o + local, kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let piece = BuildPiece::from_rows(&["cc", "ss"]).unwrap();
        assert_eq!(piece.width(), 2);
        assert_eq!(piece.height(), 2);
        assert_eq!(piece.get(Point2D::new(0, 0)), Some(CellKind::Connection));
        assert_eq!(piece.get(Point2D::new(1, 1)), Some(CellKind::Solid));
    }

    #[test]
    fn test_from_rows_errors() {
        assert_eq!(BuildPiece::from_rows(&[]), Err(PieceParseError::Empty));
        assert_eq!(BuildPiece::from_rows(&[""]), Err(PieceParseError::Empty));
        assert_eq!(
            BuildPiece::from_rows(&["cc", "s"]),
            Err(PieceParseError::RaggedRow {
                row: 1,
                expected: 2,
                got: 1
            })
        );
        assert_eq!(
            BuildPiece::from_rows(&["cx"]),
            Err(PieceParseError::UnknownGlyph('x'))
        );
    }

    #[test]
    fn test_connection_cells_row_major() {
        let piece = BuildPiece::from_rows(&["bc", "bs", "cn", "sn"]).unwrap();
        assert_eq!(
            piece.connection_cells(),
            vec![Point2D::new(1, 0), Point2D::new(0, 2)]
        );
    }

    #[test]
    fn test_origin_and_covers() {
        let piece = Arc::new(BuildPiece::from_rows(&["cc", "ss"]).unwrap());
        let placed = TransformedBuildPiece::new(Point2D::new(1, 0), Point2D::new(2, 1), piece);
        assert_eq!(placed.origin(), Point2D::new(1, 1));
        assert!(placed.covers(Point2D::new(1, 1)));
        assert!(placed.covers(Point2D::new(2, 2)));
        assert!(!placed.covers(Point2D::new(3, 1)));
        assert!(!placed.covers(Point2D::new(1, 0)));
    }

    #[test]
    fn test_translated_connection_cells() {
        let piece = Arc::new(BuildPiece::from_rows(&["cc", "ss"]).unwrap());
        let placed =
            TransformedBuildPiece::new(Point2D::new(0, 0), Point2D::new(2, 1), piece);
        assert_eq!(
            placed.connection_cells(),
            vec![Point2D::new(2, 1), Point2D::new(3, 1)]
        );
    }

    #[test]
    fn test_overlay_writes_empty_cells() {
        let mut grid = Grid::new(2, 2);
        grid.set(Point2D::new(1, 1), CellKind::Solid);
        let piece = Arc::new(BuildPiece::from_rows(&["cn", "nn"]).unwrap());
        let placed =
            TransformedBuildPiece::new(Point2D::new(0, 0), Point2D::new(0, 0), piece);
        placed.overlay_onto(&mut grid);
        // last write wins: the piece's empty cell erases the solid
        assert_eq!(grid.get(Point2D::new(1, 1)), Some(CellKind::Empty));
        assert_eq!(grid.get(Point2D::new(0, 0)), Some(CellKind::Connection));
    }
}
