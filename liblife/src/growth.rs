use crate::{
    pos::Position,
    rule::Rule,
    universe::{CellState, Universe},
};

/// Saturating "leaky" tally over one edge of the universe. A live cell
/// pushes the tally toward the trigger threshold; a dead cell pulls it back
/// one step, but neither below zero nor once the threshold is reached. A
/// single dead gap therefore does not reset the tally.
struct EdgeTally {
    count: usize,
    trigger: usize,
}

impl EdgeTally {
    fn new(trigger: usize) -> Self {
        Self { count: 0, trigger }
    }

    fn observe(&mut self, state: CellState) {
        match state {
            CellState::Alive if self.count != self.trigger => self.count += 1,
            CellState::Dead if self.count != 0 && self.count != self.trigger => self.count -= 1,
            _ => {}
        }
    }

    fn saturated(&self) -> bool {
        self.count == self.trigger
    }
}

/// Grows the universe by one row/column of dead cells on every side where
/// the next generation could spill over the current extent. A live cell on
/// an edge with `birth_count` qualifying edge neighbors can push new life
/// into the adjacent off-grid cell, so that edge gets padding. The tally is
/// a heuristic, not a reachability proof: it may over-expand, it never
/// under-expands.
pub fn expand(universe: &Universe, rule: &Rule) -> Universe {
    let rows = universe.row_count();
    let columns = universe.column_count();
    let at = |row, column| universe.state((row, column)).copied().unwrap_or_default();

    let mut left = EdgeTally::new(rule.birth_count);
    let mut right = EdgeTally::new(rule.birth_count);
    for row in 0..rows {
        left.observe(at(row, 0));
        right.observe(at(row, columns - 1));
        if left.saturated() && right.saturated() {
            break;
        }
    }

    let mut top = EdgeTally::new(rule.birth_count);
    let mut bottom = EdgeTally::new(rule.birth_count);
    for column in 0..columns {
        top.observe(at(0, column));
        bottom.observe(at(rows - 1, column));
        if top.saturated() && bottom.saturated() {
            break;
        }
    }

    pad(
        universe,
        top.saturated(),
        bottom.saturated(),
        left.saturated(),
        right.saturated(),
    )
}

fn pad(universe: &Universe, top: bool, bottom: bool, left: bool, right: bool) -> Universe {
    if !(top || bottom || left || right) {
        return universe.clone();
    }

    let rows = universe.row_count() + usize::from(top) + usize::from(bottom);
    let columns = universe.column_count() + usize::from(left) + usize::from(right);

    let mut cells = vec![CellState::Dead; rows * columns];
    for (pos, state) in universe.enumerate_cells() {
        let shifted = Position {
            row: pos.row + usize::from(top),
            column: pos.column + usize::from(left),
        };
        cells[shifted.row * columns + shifted.column] = *state;
    }

    Universe::with_cells(rows, columns, cells)
}
