use std::fmt;

use once_cell::sync::OnceCell;

use crate::error::{EngineError, EngineResult};

/*-------ARCHITECTURE--------*/

// Registry key layout:
// | 3 bits | 3 bits | 3 bits | 3 bits |
// | fromX  | fromY  |  toX   |  toY   |
// |            12 bits                |

const REGISTRY_SIZE: usize = 1 << 12;

/// An immutable (fromX, fromY, toX, toY) move in board coordinates.
///
/// Values only come out of a [`MoveRegistry`], so every coordinate is on the
/// board and equal tuples share one canonical table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    from_x: u8,
    from_y: u8,
    to_x: u8,
    to_y: u8,
}

impl Move {
    /// Canonical move for the given coordinates, rejecting anything off the board.
    pub fn new(from_x: i32, from_y: i32, to_x: i32, to_y: i32) -> EngineResult<Move> {
        MoveRegistry::global()
            .get(from_x, from_y, to_x, to_y)
            .copied()
    }

    pub fn from_x(&self) -> u8 {
        self.from_x
    }

    pub fn from_y(&self) -> u8 {
        self.from_y
    }

    pub fn to_x(&self) -> u8 {
        self.to_x
    }

    pub fn to_y(&self) -> u8 {
        self.to_y
    }

    pub fn from(&self) -> (u8, u8) {
        (self.from_x, self.from_y)
    }

    pub fn to(&self) -> (u8, u8) {
        (self.to_x, self.to_y)
    }

    /// Same move seen with the rows reversed.
    pub(crate) fn flipped_rows(&self) -> Move {
        *MoveRegistry::global().lookup(self.from_x, 7 - self.from_y, self.to_x, 7 - self.to_y)
    }

    /// Same move seen with the columns reversed.
    pub(crate) fn mirrored_files(&self) -> Move {
        *MoveRegistry::global().lookup(7 - self.from_x, self.from_y, 7 - self.to_x, self.to_y)
    }

    fn key(from_x: u8, from_y: u8, to_x: u8, to_y: u8) -> usize {
        ((from_x as usize) << 9) | ((from_y as usize) << 6) | ((to_x as usize) << 3) | to_y as usize
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{})->({},{})",
            self.from_x, self.from_y, self.to_x, self.to_y
        )
    }
}

/// Interning table of every on-board move.
///
/// The table is built on first use behind a one-time initializer, so
/// concurrent first calls are race-free. After that it is read-only and
/// shared across threads without locking.
pub struct MoveRegistry {
    table: OnceCell<Box<[Move]>>,
}

static GLOBAL_REGISTRY: MoveRegistry = MoveRegistry::new();

impl MoveRegistry {
    pub const fn new() -> Self {
        Self {
            table: OnceCell::new(),
        }
    }

    /// Process-wide registry used by the rules engine.
    pub fn global() -> &'static MoveRegistry {
        &GLOBAL_REGISTRY
    }

    fn table(&self) -> &[Move] {
        self.table.get_or_init(|| {
            log::trace!("populating move registry ({} entries)", REGISTRY_SIZE);
            let mut table = Vec::with_capacity(REGISTRY_SIZE);
            for from_x in 0..8u8 {
                for from_y in 0..8u8 {
                    for to_x in 0..8u8 {
                        for to_y in 0..8u8 {
                            table.push(Move { from_x, from_y, to_x, to_y });
                        }
                    }
                }
            }
            table.into_boxed_slice()
        })
    }

    /// Looks up the canonical entry, validating every coordinate.
    pub fn get(&self, from_x: i32, from_y: i32, to_x: i32, to_y: i32) -> EngineResult<&Move> {
        for (x, y) in [(from_x, from_y), (to_x, to_y)] {
            if !(0..8).contains(&x) || !(0..8).contains(&y) {
                return Err(EngineError::OutOfBounds { x, y });
            }
        }
        Ok(self.lookup(from_x as u8, from_y as u8, to_x as u8, to_y as u8))
    }

    /// Unchecked lookup for the move generator; callers guarantee 0..8 coordinates.
    pub(crate) fn lookup(&self, from_x: u8, from_y: u8, to_x: u8, to_y: u8) -> &Move {
        debug_assert!(from_x < 8 && from_y < 8 && to_x < 8 && to_y < 8);
        &self.table()[Move::key(from_x, from_y, to_x, to_y)]
    }
}

impl Default for MoveRegistry {
    fn default() -> Self {
        Self::new()
    }
}
