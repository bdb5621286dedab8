use std::fmt;

use super::graph::NodeId;

/// A wall is the potential edge between two adjacent nodes, stored with the smaller node first.
pub type Wall = (NodeId, NodeId);

/// A unit square of the maze bounded by four nodes, addressed by row and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }

    /// Number of unit steps between two cells on a 4-connected grid.
    pub fn manhattan(self, other: Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Straight-line distance between the two cell positions.
    pub fn euclidean(self, other: Cell) -> f64 {
        let dr = self.row.abs_diff(other.row) as f64;
        let dc = self.col.abs_diff(other.col) as f64;
        (dr * dr + dc * dc).sqrt()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Cell { row, col }
    }
}

/// What a wall separates, seen from the cell dual graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    /// The wall lies past the last row or column of cells.
    Outside,
    /// The wall lies on the maze boundary and touches a single cell.
    Boundary(Cell),
    /// The wall separates two cells.
    Between(Cell, Cell),
}

/// Index arithmetic between the node grid and the cells it bounds.
///
/// Cells form a `(y_count - 1) x (x_count - 1)` grid. Cell `(r, c)` has its top-left
/// corner at node `r * x_count + c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellLayout {
    x_count: usize,
    rows: usize,
    cols: usize,
}

impl CellLayout {
    /// Creates the layout of cells bounded by an `x_count` by `y_count` node grid.
    pub fn new(x_count: usize, y_count: usize) -> Self {
        CellLayout {
            x_count,
            rows: y_count.saturating_sub(1),
            cols: x_count.saturating_sub(1),
        }
    }

    /// Returns the number of cell rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of cell columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Returns the number of nodes in the bounding node grid.
    pub fn node_count(&self) -> usize {
        self.x_count * (self.rows + 1)
    }

    /// Checks if the given cell is within the bounds of the maze.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Returns the flat row-major index of a cell.
    pub fn index(&self, cell: Cell) -> usize {
        cell.row * self.cols + cell.col
    }

    /// Returns the four walls around a cell, ordered top, left, right, bottom.
    pub fn cell_walls(&self, cell: Cell) -> [Wall; 4] {
        let top_left = cell.row * self.x_count + cell.col;
        let bottom_right = (cell.row + 1) * self.x_count + cell.col + 1;
        [
            (top_left, top_left + 1),
            (top_left, top_left + self.x_count),
            (bottom_right - self.x_count, bottom_right),
            (bottom_right - 1, bottom_right),
        ]
    }

    /// Determines which cells a wall separates.
    ///
    /// The first cell is always the one whose top-left node starts the wall. A horizontal wall
    /// is that cell's top side, so the other cell sits above it; a vertical wall is its left
    /// side, so the other cell sits to its left.
    pub fn split(&self, wall: Wall) -> Split {
        let (a, b) = wall;
        let first = Cell::new(a / self.x_count, a % self.x_count);
        if !self.contains(first) {
            return Split::Outside;
        }

        let second = if b - a == 1 {
            first.row.checked_sub(1).map(|row| Cell::new(row, first.col))
        } else {
            first.col.checked_sub(1).map(|col| Cell::new(first.row, col))
        };

        match second {
            Some(second) if self.contains(second) => Split::Between(first, second),
            _ => Split::Boundary(first),
        }
    }

    /// Returns the wall shared by two orthogonally adjacent cells, or `None` if the cells
    /// are not neighbors.
    pub fn wall_between(&self, a: Cell, b: Cell) -> Option<Wall> {
        let (upper, lower) = if a <= b { (a, b) } else { (b, a) };
        let node = lower.row * self.x_count + lower.col;
        if upper.col == lower.col && upper.row + 1 == lower.row {
            // Top side of the lower cell
            Some((node, node + 1))
        } else if upper.row == lower.row && upper.col + 1 == lower.col {
            // Left side of the right cell
            Some((node, node + self.x_count))
        } else {
            None
        }
    }

    /// Get in-bounds neighbors of a cell, in the order up, down, left, right.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + use<> {
        let layout = *self;
        [
            cell.row.checked_sub(1).map(|row| Cell::new(row, cell.col)),
            Some(Cell::new(cell.row + 1, cell.col)),
            cell.col.checked_sub(1).map(|col| Cell::new(cell.row, col)),
            Some(Cell::new(cell.row, cell.col + 1)),
        ]
        .into_iter()
        .flatten()
        .filter(move |&c| layout.contains(c))
    }

    /// The wall through which the maze is entered: the top side of cell `(0, 0)`.
    pub fn entrance(&self) -> Wall {
        (0, 1)
    }

    /// The wall through which the maze is left: the bottom side of the last cell.
    pub fn exit(&self) -> Wall {
        let n = self.node_count();
        (n - 2, n - 1)
    }
}
