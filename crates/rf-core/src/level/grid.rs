//! Composite room grid

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{CellKind, Point2D};

/// A rectangular grid of cells, stored row-major and indexed by [`Point2D`]
/// (`x` is the column, `y` is the row).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellKind>,
}

impl Grid {
    /// Create a grid filled with [`CellKind::Empty`]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![CellKind::Empty; width * height],
        }
    }

    /// Grid width in cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `p` lies inside the grid
    pub fn in_bounds(&self, p: Point2D) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    /// Whether a `w × h` rectangle anchored at `origin` lies fully inside
    pub fn contains_rect(&self, origin: Point2D, w: usize, h: usize) -> bool {
        origin.x >= 0
            && origin.y >= 0
            && origin.x as usize + w <= self.width
            && origin.y as usize + h <= self.height
    }

    /// Cell at `p`, or `None` when out of bounds
    pub fn get(&self, p: Point2D) -> Option<CellKind> {
        self.in_bounds(p).then(|| self.cells[self.index(p)])
    }

    /// Overwrite the cell at `p`.
    ///
    /// # Panics
    ///
    /// Panics when `p` is out of bounds; placement validation checks the
    /// footprint before any overlay writes.
    pub fn set(&mut self, p: Point2D, kind: CellKind) {
        assert!(
            self.in_bounds(p),
            "cell {p} outside {}x{} grid",
            self.width,
            self.height
        );
        let i = self.index(p);
        self.cells[i] = kind;
    }

    fn index(&self, p: Point2D) -> usize {
        p.y as usize * self.width + p.x as usize
    }

    /// Iterate every cell with its coordinate, row by row
    pub fn iter(&self) -> impl Iterator<Item = (Point2D, CellKind)> + '_ {
        self.cells.iter().enumerate().map(|(i, &kind)| {
            let p = Point2D::new((i % self.width) as i32, (i / self.width) as i32);
            (p, kind)
        })
    }

    /// Coordinates of every cell of the given category, in row-major order
    pub fn cells_of(&self, kind: CellKind) -> Vec<Point2D> {
        self.iter()
            .filter(|&(_, k)| k == kind)
            .map(|(p, _)| p)
            .collect()
    }

    /// One glyph string per row, top to bottom
    pub fn glyph_rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|kind| kind.glyph()).collect())
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.glyph_rows() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
