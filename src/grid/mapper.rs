use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};

/// Number of week columns in the grid.
pub const COLS: usize = 52;
/// Number of day rows in the grid.
pub const ROWS: usize = 7;
/// Number of days the grid covers, ending at the reference date.
pub const CELL_COUNT: usize = COLS * ROWS;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellState {
    Empty,
    Active,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub date: NaiveDate,
    pub state: CellState,
}

/// 52x7 cells, column-major and chronological: column 0 row 0 is the oldest day, the last
/// column's last row is the reference date.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridMatrix {
    start: NaiveDate,
    cells: Vec<Cell>,
}

impl GridMatrix {
    /// First (oldest) date covered.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last date covered.
    ///
    /// Equals the reference date except for references within 363 days of `NaiveDate::MIN`,
    /// where the window is clamped to start at `NaiveDate::MIN` and ends after it.
    pub fn end(&self) -> NaiveDate {
        self.cells[CELL_COUNT - 1].date
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<&Cell> {
        if col >= COLS || row >= ROWS {
            return None;
        }
        self.cells.get(col * ROWS + row)
    }

    /// `(col, row)` of the cell showing `date`, if it is inside the window.
    pub fn position_of(&self, date: NaiveDate) -> Option<(usize, usize)> {
        let offset = date.signed_duration_since(self.start).num_days();
        if !(0..CELL_COUNT as i64).contains(&offset) {
            return None;
        }
        let idx = offset as usize;
        Some((idx / ROWS, idx % ROWS))
    }

    /// Cells paired with their `(col, row)` coordinates, in chronological order.
    pub fn iter_positioned(&self) -> impl Iterator<Item = ((usize, usize), &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| ((i / ROWS, i % ROWS), cell))
    }

    pub fn active_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.state == CellState::Active)
            .count()
    }
}

/// Map a completion set onto the 364-day window ending at `reference`.
///
/// Dates outside `[reference - 363, reference]` are ignored.
///
/// When `reference` is within 363 days of `NaiveDate::MIN` that window does not exist. The grid
/// then covers the first 364 representable days instead, so the reference is no longer the last
/// cell; this is logged at `warn` and visible through [`GridMatrix::end`].
pub fn build_grid(completed: &BTreeSet<NaiveDate>, reference: NaiveDate) -> GridMatrix {
    let start = match reference.checked_sub_days(Days::new(CELL_COUNT as u64 - 1)) {
        Some(start) => start,
        None => {
            tracing::warn!(%reference, "reference date too early for a full window, clamping to the minimum date");
            NaiveDate::MIN
        }
    };

    let cells = start
        .iter_days()
        .take(CELL_COUNT)
        .map(|date| Cell {
            date,
            state: if completed.contains(&date) {
                CellState::Active
            } else {
                CellState::Empty
            },
        })
        .collect();

    GridMatrix { start, cells }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/mapper.rs"]
mod tests;
