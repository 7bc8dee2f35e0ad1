#![forbid(unsafe_code)]

//! Ordered row collection shared by both editors.
//!
//! Row order lives here, not in the presentation medium. A binding keeps its
//! rendered rows in step with a [`RowList`] by asking for each row's
//! [`Placement`] after a mutation and moving the rendered element before the
//! named anchor.
//!
//! Moving a row is an adjacent index swap. For move-down this gives the same
//! result as re-inserting the row before its next-but-one sibling (or at the
//! end of the list when there is none): after the swap the row sits at
//! `i + 1`, so its new successor is the row that used to be at `i + 2`.

use core::fmt;
use core::str::FromStr;

/// Stable handle to one row of one editor.
///
/// Ids are allocated monotonically and never reused within a list, so a
/// handle that outlives its row simply stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

impl RowId {
    /// Raw numeric value, as rendered into markup.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RowId {
    type Err = core::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Direction of a single-step reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Enable state of one row's reorder controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveControls {
    pub up_disabled: bool,
    pub down_disabled: bool,
}

impl MoveControls {
    /// Control state for the row at `index` of `len` rows.
    #[must_use]
    pub const fn at(index: usize, len: usize) -> Self {
        Self {
            up_disabled: index == 0,
            down_disabled: index + 1 >= len,
        }
    }
}

/// Where a rendered row element belongs, expressed as the element it must
/// be inserted before.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Directly before the row with this id.
    BeforeRow(RowId),
    /// Last row: directly before the persistent "add" affordance.
    BeforeAdd,
}

/// A completed reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowMove {
    pub id: RowId,
    pub from: usize,
    pub to: usize,
}

/// Ordered collection of rows addressed by [`RowId`].
#[derive(Debug, Clone)]
pub struct RowList<T> {
    rows: Vec<(RowId, T)>,
    next_id: u64,
}

impl<T> Default for RowList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RowList<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row at the end (directly before the "add" affordance).
    pub fn push(&mut self, row: T) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.rows.push((id, row));
        id
    }

    /// Remove a row, returning its data. Unknown ids are ignored.
    pub fn remove(&mut self, id: RowId) -> Option<T> {
        let index = self.index_of(id)?;
        Some(self.rows.remove(index).1)
    }

    /// Current 0-based position of a row.
    #[must_use]
    pub fn index_of(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|(row_id, _)| *row_id == id)
    }

    #[must_use]
    pub fn get(&self, id: RowId) -> Option<&T> {
        self.rows
            .iter()
            .find(|(row_id, _)| *row_id == id)
            .map(|(_, row)| row)
    }

    pub fn get_mut(&mut self, id: RowId) -> Option<&mut T> {
        self.rows
            .iter_mut()
            .find(|(row_id, _)| *row_id == id)
            .map(|(_, row)| row)
    }

    /// Rows in order.
    pub fn iter(&self) -> impl Iterator<Item = (RowId, &T)> + '_ {
        self.rows.iter().map(|(id, row)| (*id, row))
    }

    /// Row ids in order.
    pub fn ids(&self) -> impl Iterator<Item = RowId> + '_ {
        self.rows.iter().map(|(id, _)| *id)
    }

    /// Swap a row with its neighbour in `direction`.
    ///
    /// Returns `None` for an unknown id or when the row already sits at the
    /// boundary it would move past.
    pub fn shift(&mut self, id: RowId, direction: MoveDirection) -> Option<RowMove> {
        let from = self.index_of(id)?;
        let to = match direction {
            MoveDirection::Up => from.checked_sub(1)?,
            MoveDirection::Down => {
                let to = from + 1;
                if to >= self.rows.len() {
                    return None;
                }
                to
            }
        };
        self.rows.swap(from, to);
        Some(RowMove { id, from, to })
    }

    /// Anchor the rendered element of `id` must be inserted before.
    #[must_use]
    pub fn placement(&self, id: RowId) -> Option<Placement> {
        let index = self.index_of(id)?;
        Some(match self.rows.get(index + 1) {
            Some((next, _)) => Placement::BeforeRow(*next),
            None => Placement::BeforeAdd,
        })
    }

    /// Reorder control state of one row.
    #[must_use]
    pub fn controls_of(&self, id: RowId) -> Option<MoveControls> {
        self.index_of(id)
            .map(|index| MoveControls::at(index, self.rows.len()))
    }

    /// Reorder control state of every row, in order.
    #[must_use]
    pub fn controls(&self) -> Vec<(RowId, MoveControls)> {
        let len = self.rows.len();
        self.rows
            .iter()
            .enumerate()
            .map(|(index, (id, _))| (*id, MoveControls::at(index, len)))
            .collect()
    }

    /// Remove every row, yielding them in order. Ids are not recycled.
    pub fn drain(&mut self) -> impl Iterator<Item = (RowId, T)> + '_ {
        self.rows.drain(..)
    }
}
