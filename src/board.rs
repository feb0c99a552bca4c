use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::ops::{Index, IndexMut};

use itertools::Itertools;
use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Dfs;
use unordered_pair::UnorderedPair;

use crate::cell::{display_of, Cell, FrozenCell, FrozenCellType};
use crate::error::{EngineError, InvariantViolation};
use crate::location::{Dimension, Location};
use crate::shape::SquareStep;

/// A rectangular puzzle: every cell's connectivity state plus the list of numbered pairs.
///
/// Boards are made empty with [`Board::with_dims`] and filled in by a [`Generator`](crate::Generator).
/// All play happens through the engine methods ([`connect`](Board::connect), [`disconnect`](Board::disconnect),
/// [`stroke`](Board::stroke), [`delete_path`](Board::delete_path)), after which [`has_win`](Board::has_win) may be queried.
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) dims: (Dimension, Dimension),
    pub(crate) cells: Array2<Cell>,
    pub(crate) pairs: Vec<UnorderedPair<Location>>,
}

impl Board {
    /// Construct an unlinked board with the specified dimensions, specified in `(x, y)` order.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        let width = dims.0.get();

        Self {
            dims,
            cells: Array2::from_shape_fn((dims.1.get(), width), |(y, x)| Cell::new(Location(x, y), x + y * width)),
            pairs: Vec::new(),
        }
    }

    /// Board dimensions in `(width, height)` order.
    pub fn dims(&self) -> (Dimension, Dimension) {
        self.dims
    }

    /// Whether `location` lies on this board.
    pub fn contains(&self, location: Location) -> bool {
        location.0 < self.dims.0.get() && location.1 < self.dims.1.get()
    }

    /// The cell at `location`, or [`None`] outside the board.
    pub fn cell(&self, location: Location) -> Option<&Cell> {
        self.cells.get(location.as_index())
    }

    pub(crate) fn checked(&self, location: Location) -> Result<Location, EngineError> {
        match self.contains(location) {
            true => Ok(location),
            false => Err(EngineError::OutOfBounds(location)),
        }
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub(crate) fn locations(&self) -> Vec<Location> {
        self.cells.iter().map(|cell| cell.location).collect_vec()
    }

    /// The numbered pairs, in the order their numbers were issued.
    pub fn pairs(&self) -> &[UnorderedPair<Location>] {
        &self.pairs
    }

    /// Clear play state while keeping the clue.
    ///
    /// Every cell's links are moved into its [`solution`](Cell::solution) and its identifier returns to its index.
    /// Numbers, pairs and the hues of numbered cells survive; all other hues are cleared.
    pub fn reset(&mut self) {
        self.cells.iter_mut().for_each(Cell::reset);
    }

    /// Whether the board is solved: every cell is linked and both cells of each pair are joined.
    pub fn has_win(&self) -> bool {
        self.cells.iter().all(|cell| !cell.connections.is_empty())
            && self.pairs.iter().all(|UnorderedPair(a, b)| self[*a].identifier == self[*b].identifier)
    }

    /// Every live link once, lower location first.
    pub fn edges(&self) -> Vec<UnorderedPair<Location>> {
        self.cells.iter()
            .flat_map(|cell| cell.connections.iter()
                .filter(move |other| cell.location < **other)
                .map(move |other| UnorderedPair(cell.location, *other)))
            .collect_vec()
    }

    /// The live links as a graph over every location of the board.
    pub fn graph(&self) -> UnGraphMap<Location, ()> {
        let mut graph = UnGraphMap::with_capacity(self.cells.len(), self.cells.len());
        for cell in self.cells.iter() {
            graph.add_node(cell.location);
        }
        for UnorderedPair(a, b) in self.edges() {
            graph.add_edge(a, b, ());
        }

        graph
    }

    /// Snapshot the board for rendering, indexed `(y, x)`.
    pub fn freeze(&self) -> Array2<FrozenCell> {
        self.cells.map(FrozenCell::from)
    }

    /// Draw the live links with box-drawing characters; numbered cells show their pair letter.
    pub fn draw_paths(&self) -> String {
        SquareStep::print(self.freeze().map(|cell| match cell.cell_type {
            FrozenCellType::Terminus { pair, .. } => display_of(pair),
            _ => SquareStep::glyph(&cell.exits),
        }))
    }

    /// Exchange every cell's live links with its stored solution.
    ///
    /// Identifiers and hues are recomputed for the new link set; calling this twice restores the original links.
    pub fn swap_solution(&mut self) {
        for cell in self.cells.iter_mut() {
            std::mem::swap(&mut cell.connections, &mut cell.solution);
            if cell.number.is_none() {
                cell.hue = None;
            }
        }

        self.reidentify_all();
    }

    /// Verify the structural invariants: symmetric links between adjacent cells, no cell over capacity,
    /// and identifiers partitioning the board exactly as reachability does.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for cell in self.cells.iter() {
            if cell.degree() > cell.max_connections() {
                return Err(InvariantViolation::OverCapacity {
                    location: cell.location,
                    degree: cell.degree(),
                    max: cell.max_connections(),
                });
            }

            for other in cell.connections.iter() {
                if !cell.location.is_adjacent(*other) {
                    return Err(InvariantViolation::NotAdjacent(cell.location, *other));
                }
                if !self.cell(*other).is_some_and(|o| o.connections.contains(&cell.location)) {
                    return Err(InvariantViolation::Asymmetric(cell.location, *other));
                }
            }
        }

        let graph = self.graph();
        let mut root_of = HashMap::with_capacity(self.cells.len());
        // identifier -> the first location seen carrying it
        let mut owner_of = HashMap::new();

        for root in self.locations() {
            if root_of.contains_key(&root) {
                continue;
            }

            let identifier = self[root].identifier;
            let mut dfs = Dfs::new(&graph, root);
            while let Some(node) = dfs.next(&graph) {
                if self[node].identifier != identifier {
                    return Err(InvariantViolation::IdentifierSplit(root, node));
                }
                root_of.insert(node, root);
            }

            if let Some(owner) = owner_of.insert(identifier, root) {
                return Err(InvariantViolation::IdentifierShared(owner, root));
            }
        }

        Ok(())
    }
}

impl Index<Location> for Board {
    type Output = Cell;

    fn index(&self, location: Location) -> &Self::Output {
        &self.cells[location.as_index()]
    }
}

impl IndexMut<Location> for Board {
    fn index_mut(&mut self, location: Location) -> &mut Self::Output {
        &mut self.cells[location.as_index()]
    }
}

/// One line per row. Numbered cells show their pair's letter and path cells its lowercase form;
/// `+` is a linked but uncoloured cell and `.` an empty one.
///
/// Pairs are lettered `A` to `Z` and then with ten Greek capitals, so up to 36 pairs print unambiguously.
/// Any pair beyond that prints as `#`.
impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", SquareStep::print(self.freeze().map(|cell| match cell.cell_type {
            FrozenCellType::Terminus { pair, .. } => display_of(pair),
            FrozenCellType::Path { hue: Some(hue) } => hue.display(),
            FrozenCellType::Path { hue: None } => '+',
            FrozenCellType::Empty => '.',
        })))
    }
}
