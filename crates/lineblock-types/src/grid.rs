//! The grid model and the traits through which stages read and write it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::ops::{Add, Sub};

// ─────────────────────────────────────────────────────────────────────
// Coordinates
// ─────────────────────────────────────────────────────────────────────

/// A cell coordinate in the three-dimensional grid.
///
/// Also used as a displacement vector: `b - a` is the offset from `a` to `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridPos {
    /// Create a new coordinate.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The neighbouring cell one step in `direction`.
    pub fn offset(self, direction: Direction) -> Self {
        self.offset_by(direction, 1)
    }

    /// The cell `steps` cells away in `direction`.
    pub fn offset_by(self, direction: Direction, steps: i32) -> Self {
        let (dx, dy, dz) = direction.vector();
        Self::new(
            self.x.wrapping_add(dx.wrapping_mul(steps)),
            self.y.wrapping_add(dy.wrapping_mul(steps)),
            self.z.wrapping_add(dz.wrapping_mul(steps)),
        )
    }
}

impl Add for GridPos {
    type Output = GridPos;

    fn add(self, rhs: GridPos) -> GridPos {
        GridPos::new(
            self.x.wrapping_add(rhs.x),
            self.y.wrapping_add(rhs.y),
            self.z.wrapping_add(rhs.z),
        )
    }
}

impl Sub for GridPos {
    type Output = GridPos;

    fn sub(self, rhs: GridPos) -> GridPos {
        GridPos::new(
            self.x.wrapping_sub(rhs.x),
            self.y.wrapping_sub(rhs.y),
            self.z.wrapping_sub(rhs.z),
        )
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ─────────────────────────────────────────────────────────────────────
// Directions
// ─────────────────────────────────────────────────────────────────────

/// One of the six axis-aligned scan directions.
///
/// The declaration order is significant: side-scans are probed and spliced
/// in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Down,
    Up,
    North,
    South,
    West,
    East,
}

impl Direction {
    /// Every direction, in probe order.
    pub const ALL: [Direction; 6] = [
        Direction::Down,
        Direction::Up,
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Unit vector `(dx, dy, dz)`.
    pub fn vector(self) -> (i32, i32, i32) {
        match self {
            Direction::Down => (0, -1, 0),
            Direction::Up => (0, 1, 0),
            Direction::North => (0, 0, -1),
            Direction::South => (0, 0, 1),
            Direction::West => (-1, 0, 0),
            Direction::East => (1, 0, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
        }
    }

    /// The four directions perpendicular to `self`, in probe order.
    pub fn orthogonal(self) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |d| *d != self && *d != self.opposite())
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Down => "down",
            Direction::Up => "up",
            Direction::North => "north",
            Direction::South => "south",
            Direction::West => "west",
            Direction::East => "east",
        })
    }
}

// ─────────────────────────────────────────────────────────────────────
// Symbols
// ─────────────────────────────────────────────────────────────────────

/// The raw content of a grid cell (a block identifier such as `"iron_ore"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Identifier of an empty cell.
    pub const AIR: &'static str = "air";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn air() -> Self {
        Self::new(Self::AIR)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_air(&self) -> bool {
        self.0 == Self::AIR
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::new(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Symbol(name)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────
// Grid oracle
// ─────────────────────────────────────────────────────────────────────

/// Read access to the grid a program is encoded in.
pub trait GridView {
    /// The symbol stored at `pos`. Empty cells read as [`Symbol::air`].
    fn symbol_at(&self, pos: GridPos) -> Symbol;

    /// The outgoing direction configured on the redirector at `pos`,
    /// or `None` when the cell carries no facing.
    fn redirector_facing(&self, pos: GridPos) -> Option<Direction>;
}

/// Read/write access to the grid, used by `PLACEBLOCK`.
pub trait Grid: GridView {
    fn set_symbol(&mut self, pos: GridPos, symbol: Symbol);
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Cell {
    symbol: Symbol,
    facing: Option<Direction>,
}

/// A sparse in-memory grid. Cells that were never written read as air.
#[derive(Debug, Clone, Default)]
pub struct MemoryGrid {
    cells: HashMap<GridPos, Cell>,
}

impl MemoryGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `symbol` at `pos`, clearing any facing.
    pub fn place(&mut self, pos: GridPos, symbol: impl Into<Symbol>) -> &mut Self {
        self.cells.insert(
            pos,
            Cell {
                symbol: symbol.into(),
                facing: None,
            },
        );
        self
    }

    /// Store `symbol` at `pos` with a facing attribute.
    pub fn place_facing(
        &mut self,
        pos: GridPos,
        symbol: impl Into<Symbol>,
        facing: Direction,
    ) -> &mut Self {
        self.cells.insert(
            pos,
            Cell {
                symbol: symbol.into(),
                facing: Some(facing),
            },
        );
        self
    }

    /// Store consecutive symbols starting at `start` and stepping in
    /// `direction`. Returns the first cell after the line.
    pub fn place_line<S>(&mut self, start: GridPos, direction: Direction, symbols: &[S]) -> GridPos
    where
        S: Clone + Into<Symbol>,
    {
        let mut pos = start;
        for symbol in symbols {
            self.place(pos, symbol.clone());
            pos = pos.offset(direction);
        }
        pos
    }

    pub fn remove(&mut self, pos: GridPos) {
        self.cells.remove(&pos);
    }

    /// Number of non-empty cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl GridView for MemoryGrid {
    fn symbol_at(&self, pos: GridPos) -> Symbol {
        self.cells
            .get(&pos)
            .map(|c| c.symbol.clone())
            .unwrap_or_else(Symbol::air)
    }

    fn redirector_facing(&self, pos: GridPos) -> Option<Direction> {
        self.cells.get(&pos).and_then(|c| c.facing)
    }
}

impl Grid for MemoryGrid {
    fn set_symbol(&mut self, pos: GridPos, symbol: Symbol) {
        if symbol.is_air() {
            self.cells.remove(&pos);
        } else {
            self.place(pos, symbol);
        }
    }
}
