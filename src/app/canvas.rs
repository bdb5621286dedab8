use std::fmt;

use crossterm::style::{Color, Stylize};

use crate::maze::{Cell, Maze, NodeId};

/// One drawing unit of the canvas. Every glyph is two terminal columns wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Empty,
    /// A grid node; `right` continues a horizontal line out of it
    Node { right: bool },
    Horizontal,
    Vertical,
    Visited,
    Path,
}

impl Glyph {
    /// Number of terminal columns each glyph occupies
    pub const WIDTH: u16 = 2;

    pub fn symbol(self) -> &'static str {
        let symbol = match self {
            Glyph::Empty => "  ",
            Glyph::Node { right: false } => "• ",
            Glyph::Node { right: true } => "•─",
            Glyph::Horizontal => "──",
            Glyph::Vertical => "│ ",
            Glyph::Visited => "░░",
            Glyph::Path => "██",
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                symbol.width(),
                Glyph::WIDTH as usize,
                "Each glyph must occupy exactly two character widths."
            );
        }

        symbol
    }

    pub fn color(self) -> Color {
        match self {
            Glyph::Empty => Color::Reset,
            Glyph::Node { .. } | Glyph::Horizontal | Glyph::Vertical => Color::White,
            Glyph::Visited => Color::Blue,
            Glyph::Path => Color::Yellow,
        }
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol().with(self.color()))
    }
}

/// Grid of glyphs holding one frame of the maze.
///
/// Node `i` sits at unit `(i / x_count * cell_size, i % x_count * cell_size)`; the units in
/// between are edges, walls and cell interiors.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    x_count: usize,
    cell_size: usize,
    glyphs: Vec<Glyph>,
}

impl Canvas {
    /// Create a canvas for an `x_count x y_count` node grid with every node drawn.
    pub fn new(x_count: usize, y_count: usize, cell_size: usize) -> Self {
        let cell_size = cell_size.max(1);
        let width = x_count.saturating_sub(1) * cell_size + 1;
        let height = y_count.saturating_sub(1) * cell_size + 1;
        let mut canvas = Canvas {
            width,
            height,
            x_count,
            cell_size,
            glyphs: vec![Glyph::Empty; width * height],
        };
        for node in 0..x_count * y_count {
            let (row, col) = canvas.node_position(node);
            canvas.set(row, col, Glyph::Node { right: false });
        }
        canvas
    }

    /// Draw the current frame of `maze`: nodes, the active generator's edges and the
    /// solver's cells.
    pub fn from_maze(maze: &Maze) -> Self {
        let graph = maze.graph();
        let mut canvas = Canvas::new(
            graph.x_count(),
            graph.y_count(),
            usize::from(maze.config().cell_size),
        );
        for (a, b) in maze.selected_edges() {
            canvas.draw_edge(a, b);
        }

        let (cells, is_path) = maze.solver_cells();
        if is_path {
            cells.iter().for_each(|&cell| canvas.fill_cell(cell, Glyph::Path));
            for pair in cells.windows(2) {
                canvas.fill_passage(pair[0], pair[1], Glyph::Path);
            }
        } else {
            cells
                .iter()
                .for_each(|&cell| canvas.fill_cell(cell, Glyph::Visited));
        }
        canvas
    }

    /// Width in glyphs.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in glyphs.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Glyph> {
        if row < self.height && col < self.width {
            Some(self.glyphs[row * self.width + col])
        } else {
            None
        }
    }

    /// Out of range writes are ignored.
    fn set(&mut self, row: usize, col: usize, glyph: Glyph) {
        if row < self.height && col < self.width {
            self.glyphs[row * self.width + col] = glyph;
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Glyph]> {
        self.glyphs.chunks(self.width.max(1))
    }

    fn node_position(&self, node: NodeId) -> (usize, usize) {
        (
            node / self.x_count * self.cell_size,
            node % self.x_count * self.cell_size,
        )
    }

    /// Draw the line between two neighboring nodes.
    pub fn draw_edge(&mut self, a: NodeId, b: NodeId) {
        let (a, b) = (a.min(b), a.max(b));
        let (row, col) = self.node_position(a);
        if b == a + 1 {
            self.set(row, col, Glyph::Node { right: true });
            for offset in 1..self.cell_size {
                self.set(row, col + offset, Glyph::Horizontal);
            }
        } else if b == a + self.x_count {
            for offset in 1..self.cell_size {
                self.set(row + offset, col, Glyph::Vertical);
            }
        }
    }

    /// Fill the inside of `cell`, leaving its border alone.
    pub fn fill_cell(&mut self, cell: Cell, glyph: Glyph) {
        let top = cell.row * self.cell_size;
        let left = cell.col * self.cell_size;
        for row in top + 1..top + self.cell_size {
            for col in left + 1..left + self.cell_size {
                self.set(row, col, glyph);
            }
        }
    }

    /// Fill the opening between two neighboring cells.
    pub fn fill_passage(&mut self, a: Cell, b: Cell, glyph: Glyph) {
        let (first, second) = (a.min(b), a.max(b));
        if first.row == second.row && first.col + 1 == second.col {
            let col = second.col * self.cell_size;
            let top = first.row * self.cell_size;
            for row in top + 1..top + self.cell_size {
                self.set(row, col, glyph);
            }
        } else if first.col == second.col && first.row + 1 == second.row {
            let row = second.row * self.cell_size;
            let left = first.col * self.cell_size;
            for col in left + 1..left + self.cell_size {
                self.set(row, col, glyph);
            }
        }
    }
}
