//! Read-only cell adjacency for the supported board geometries.
//!
//! A `CellGraph` is built once per board shape and shared by every board
//! and search clone through an `Arc`. Cells are numbered row-major from the
//! lower-left corner; each cell stores its neighbour in every direction of
//! the geometry, so traversal never recomputes coordinates.
//!
//! Direction indices are arranged so that `opposite(d) = d + n/2 (mod n)`.
//!
//! ```
//! use rust_board::board::{CellGraph, Geometry};
//!
//! let graph = CellGraph::new(Geometry::Octagonal, 3, 3);
//! let centre = graph.cell_at(1, 1).unwrap();
//! assert_eq!(graph.neighbors(centre).count(), 8);
//!
//! let corner = graph.cell_at(0, 0).unwrap();
//! assert_eq!(graph.neighbors(corner).count(), 3);
//! ```

use serde::{Deserialize, Serialize};

const MAX_DIRECTIONS: usize = 8;

/// Index of a cell in its graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellId(pub u16);

impl CellId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index into the direction table of a geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Direction(pub u8);

/// Board connectivity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Geometry {
    /// One row, linked east and west.
    Line,
    /// Orthogonal links only.
    Square,
    /// Orthogonal and diagonal links.
    Octagonal,
    /// Axial hex coordinates on a rhombus.
    Hex,
}

impl Geometry {
    /// (column, row) step for each direction, in direction-index order.
    #[must_use]
    pub const fn deltas(self) -> &'static [(i8, i8)] {
        match self {
            Geometry::Line => &[(1, 0), (-1, 0)],
            Geometry::Square => &[(1, 0), (0, 1), (-1, 0), (0, -1)],
            Geometry::Octagonal => &[
                (1, 0),
                (1, 1),
                (0, 1),
                (-1, 1),
                (-1, 0),
                (-1, -1),
                (0, -1),
                (1, -1),
            ],
            Geometry::Hex => &[(1, 0), (0, 1), (-1, 1), (-1, 0), (0, -1), (1, -1)],
        }
    }

    /// Number of directions.
    #[must_use]
    pub const fn direction_count(self) -> usize {
        self.deltas().len()
    }

    /// The direction with this exact step, if the geometry has one.
    #[must_use]
    pub fn direction_of(self, dcol: i8, drow: i8) -> Option<Direction> {
        self.deltas()
            .iter()
            .position(|&d| d == (dcol, drow))
            .map(|i| Direction(i as u8))
    }
}

/// Fixed adjacency structure for one board shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellGraph {
    geometry: Geometry,
    cols: u8,
    rows: u8,
    links: Vec<[Option<CellId>; MAX_DIRECTIONS]>,
}

impl CellGraph {
    /// Build the graph for a `cols` x `rows` board.
    ///
    /// Panics on an empty board or on a multi-row `Line`.
    #[must_use]
    pub fn new(geometry: Geometry, cols: u8, rows: u8) -> Self {
        assert!(cols > 0 && rows > 0, "board must have at least one cell");
        assert!(cols <= 26, "columns are lettered a-z");
        assert!(
            geometry != Geometry::Line || rows == 1,
            "a line board has a single row"
        );

        let len = cols as usize * rows as usize;
        let mut links = vec![[None; MAX_DIRECTIONS]; len];

        for row in 0..rows {
            for col in 0..cols {
                let here = row as usize * cols as usize + col as usize;
                for (dir, &(dc, dr)) in geometry.deltas().iter().enumerate() {
                    let c = col as i16 + dc as i16;
                    let r = row as i16 + dr as i16;
                    if (0..cols as i16).contains(&c) && (0..rows as i16).contains(&r) {
                        links[here][dir] = Some(CellId((r * cols as i16 + c) as u16));
                    }
                }
            }
        }

        Self {
            geometry,
            cols,
            rows,
            links,
        }
    }

    #[must_use]
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    #[must_use]
    pub fn cols(&self) -> u8 {
        self.cols
    }

    #[must_use]
    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// All cells in index order.
    pub fn cells(&self) -> impl Iterator<Item = CellId> {
        (0..self.links.len() as u16).map(CellId)
    }

    /// Cell at 0-based (column, row).
    #[must_use]
    pub fn cell_at(&self, col: u8, row: u8) -> Option<CellId> {
        (col < self.cols && row < self.rows)
            .then(|| CellId(row as u16 * self.cols as u16 + col as u16))
    }

    /// 0-based (column, row) of a cell.
    #[must_use]
    pub fn coords(&self, cell: CellId) -> (u8, u8) {
        let cols = self.cols as u16;
        ((cell.0 % cols) as u8, (cell.0 / cols) as u8)
    }

    /// Directions of this geometry.
    pub fn directions(&self) -> impl Iterator<Item = Direction> {
        (0..self.geometry.direction_count() as u8).map(Direction)
    }

    #[must_use]
    pub fn opposite(&self, dir: Direction) -> Direction {
        let n = self.geometry.direction_count() as u8;
        Direction((dir.0 + n / 2) % n)
    }

    /// Adjacent cell in one direction.
    #[inline]
    #[must_use]
    pub fn neighbor(&self, cell: CellId, dir: Direction) -> Option<CellId> {
        self.links[cell.index()][dir.0 as usize]
    }

    /// All adjacent cells.
    pub fn neighbors(&self, cell: CellId) -> impl Iterator<Item = CellId> + '_ {
        self.links[cell.index()][..self.geometry.direction_count()]
            .iter()
            .filter_map(|c| *c)
    }

    /// Cells reached by stepping repeatedly in `dir`, excluding `from`.
    pub fn ray(&self, from: CellId, dir: Direction) -> Ray<'_> {
        Ray {
            graph: self,
            current: Some(from),
            dir,
        }
    }
}

/// Iterator produced by [`CellGraph::ray`].
pub struct Ray<'a> {
    graph: &'a CellGraph,
    current: Option<CellId>,
    dir: Direction,
}

impl Iterator for Ray<'_> {
    type Item = CellId;

    fn next(&mut self) -> Option<CellId> {
        let next = self.graph.neighbor(self.current?, self.dir);
        self.current = next;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_links_are_symmetric() {
        let graph = CellGraph::new(Geometry::Square, 4, 3);
        for cell in graph.cells() {
            for dir in graph.directions() {
                if let Some(n) = graph.neighbor(cell, dir) {
                    assert_eq!(graph.neighbor(n, graph.opposite(dir)), Some(cell));
                }
            }
        }
    }

    #[test]
    fn test_hex_interior_has_six_neighbors() {
        let graph = CellGraph::new(Geometry::Hex, 5, 5);
        let centre = graph.cell_at(2, 2).unwrap();
        assert_eq!(graph.neighbors(centre).count(), 6);

        // Acute corners of the rhombus have two neighbours, obtuse have three.
        assert_eq!(graph.neighbors(graph.cell_at(0, 0).unwrap()).count(), 2);
        assert_eq!(graph.neighbors(graph.cell_at(4, 0).unwrap()).count(), 3);
    }

    #[test]
    fn test_line_board() {
        let graph = CellGraph::new(Geometry::Line, 6, 1);
        let start = graph.cell_at(0, 0).unwrap();
        let east = Geometry::Line.direction_of(1, 0).unwrap();
        assert_eq!(graph.ray(start, east).count(), 5);
        assert_eq!(graph.ray(start, graph.opposite(east)).count(), 0);
    }

    #[test]
    fn test_coords_round_trip() {
        let graph = CellGraph::new(Geometry::Octagonal, 5, 4);
        for cell in graph.cells() {
            let (c, r) = graph.coords(cell);
            assert_eq!(graph.cell_at(c, r), Some(cell));
        }
        assert_eq!(graph.cell_at(5, 0), None);
        assert_eq!(graph.cell_at(0, 4), None);
    }

    #[test]
    fn test_diagonal_ray() {
        let graph = CellGraph::new(Geometry::Octagonal, 3, 3);
        let ne = Geometry::Octagonal.direction_of(1, 1).unwrap();
        let cells: Vec<_> = graph
            .ray(graph.cell_at(0, 0).unwrap(), ne)
            .map(|c| graph.coords(c))
            .collect();
        assert_eq!(cells, vec![(1, 1), (2, 2)]);
    }

    #[test]
    #[should_panic(expected = "a line board has a single row")]
    fn test_line_rejects_rows() {
        let _ = CellGraph::new(Geometry::Line, 4, 2);
    }
}
