//! Text rendering of finished rooms
//!
//! Consumes the winning `(base, solution)` pair: frames the composite grid
//! with a border ring around an open ring, and marks the exits.

use rf_core::level::{CellKind, Grid, Point2D};

/// Drawing glyph for one cell
fn tile(kind: CellKind) -> char {
    match kind {
        CellKind::Empty => '.',
        CellKind::Solid => '=',
        CellKind::Border => '#',
        CellKind::Connection => '+',
        CellKind::Exit => 'E',
    }
}

/// The composite grid wrapped in the augmented frame, one string per row
pub fn framed_rows(grid: &Grid, exits: &[Point2D]) -> Vec<String> {
    let width = grid.width() + 4;
    let height = grid.height() + 4;
    let mut rows = Vec::with_capacity(height);
    for fy in 0..height {
        let mut row = String::with_capacity(width);
        for fx in 0..width {
            let ch = if fx == 0 || fy == 0 || fx == width - 1 || fy == height - 1 {
                tile(CellKind::Border)
            } else if fx == 1 || fy == 1 || fx == width - 2 || fy == height - 2 {
                tile(CellKind::Empty)
            } else {
                let p = Point2D::new(fx as i32 - 2, fy as i32 - 2);
                if exits.contains(&p) {
                    'E'
                } else {
                    grid.get(p).map(tile).unwrap_or('.')
                }
            };
            row.push(ch);
        }
        rows.push(row);
    }
    rows
}

/// Print one finished room
pub fn print_room(grid: &Grid, exits: &[Point2D], seed: u64) {
    println!("seed {seed}");
    for row in framed_rows(grid, exits) {
        println!("{row}");
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_dimensions() {
        let grid = Grid::new(3, 2);
        let rows = framed_rows(&grid, &[]);
        assert_eq!(rows.len(), 6);
        assert!(rows.iter().all(|row| row.chars().count() == 7));
    }

    #[test]
    fn test_frame_rings_and_exit_marker() {
        let mut grid = Grid::new(2, 2);
        grid.set(Point2D::new(1, 1), CellKind::Solid);
        let rows = framed_rows(&grid, &[Point2D::new(0, 0)]);
        assert_eq!(rows[0], "######");
        assert_eq!(rows[1], "#....#");
        assert_eq!(rows[2], "#.E..#");
        assert_eq!(rows[3], "#..=.#");
        assert_eq!(rows[5], "######");
    }
}
