use std::{collections::HashSet, rc::Rc};

use super::{Cell, CellLayout, Wall};

/// Read-only view of a carved maze for the solvers.
///
/// Nothing is precomputed: every query looks up the wall between two cells in the set of
/// standing walls, and a wall missing from the set is passable.
#[derive(Debug, Clone)]
pub struct MazeAdjacency {
    layout: CellLayout,
    standing: Rc<HashSet<Wall>>,
}

impl MazeAdjacency {
    pub fn new(layout: CellLayout, standing: Rc<HashSet<Wall>>) -> Self {
        MazeAdjacency { layout, standing }
    }

    pub fn layout(&self) -> &CellLayout {
        &self.layout
    }

    /// Checks that `a` and `b` are in-bounds neighbors with no wall between them.
    pub fn is_open(&self, a: Cell, b: Cell) -> bool {
        if !self.layout.contains(a) || !self.layout.contains(b) {
            return false;
        }
        self.layout
            .wall_between(a, b)
            .is_some_and(|wall| !self.standing.contains(&wall))
    }

    /// Get the neighbors reachable from `cell` without crossing a wall, in the order up, down,
    /// left, right.
    pub fn open_neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        self.layout
            .neighbors(cell)
            .filter(move |&next| self.is_open(cell, next))
    }
}
