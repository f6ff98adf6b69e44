use std::fmt;

use itertools::Itertools;
use thiserror::Error;

use super::pos::Position;

/// ALIVE cells render as this glyph.
pub const ALIVE_GLYPH: char = 'X';
/// DEAD cells render as this glyph.
pub const DEAD_GLYPH: char = '-';

/// Seed validation failures. Raised at construction time; geometry
/// operations on a constructed universe cannot fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeedError {
    #[error("row {row} holds {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("live cells provided for a universe with no extent")]
    MissingExtent,

    #[error("live cell at ({row}, {column}) is outside the {rows}x{columns} extent")]
    OutOfExtent {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },

    #[error("a {rows}x{columns} universe cannot hold {requested} live cells")]
    Overpopulated {
        rows: usize,
        columns: usize,
        requested: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    Alive,

    #[default]
    Dead,
}

/// A rectangular snapshot of cell states, stored row-major. Immutable once
/// constructed; every generation is a fresh value. Extents are always at
/// least 1x1: seeds with no area collapse to the empty universe.
#[derive(Debug, Clone)]
pub struct Universe {
    rows: usize,
    columns: usize,
    cells: Vec<CellState>,
}

impl Universe {
    /// The designated empty universe, a single dead cell at (0, 0).
    pub fn empty() -> Self {
        Self::with_cells(1, 1, vec![CellState::Dead])
    }

    pub fn from_rows(rows: Vec<Vec<CellState>>) -> Result<Self, SeedError> {
        let expected = rows.first().map_or(0, Vec::len);
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != expected {
                return Err(SeedError::RaggedRows {
                    row,
                    expected,
                    found: cells.len(),
                });
            }
        }

        if rows.is_empty() || expected == 0 {
            return Ok(Self::empty());
        }

        let row_count = rows.len();
        let cells = rows.into_iter().flatten().collect_vec();
        Ok(Self::with_cells(row_count, expected, cells))
    }

    pub fn from_live_cells(
        rows: usize,
        columns: usize,
        live: &[Position],
    ) -> Result<Self, SeedError> {
        if rows == 0 || columns == 0 {
            return if live.is_empty() {
                Ok(Self::empty())
            } else {
                Err(SeedError::MissingExtent)
            };
        }

        let mut universe = Self::with_cells(rows, columns, vec![CellState::Dead; rows * columns]);
        for pos in live {
            let Some(index) = universe.pos_to_index(*pos) else {
                return Err(SeedError::OutOfExtent {
                    row: pos.row,
                    column: pos.column,
                    rows,
                    columns,
                });
            };
            universe.cells[index] = CellState::Alive;
        }

        Ok(universe)
    }

    /// Seeds a universe with exactly `live_cells` distinct live cells placed
    /// uniformly at random.
    pub fn new_random(rows: usize, columns: usize, live_cells: usize) -> Result<Self, SeedError> {
        let mut open_positions = (0..rows)
            .cartesian_product(0..columns)
            .map(Position::from)
            .collect_vec();

        if live_cells > open_positions.len() {
            return Err(SeedError::Overpopulated {
                rows,
                columns,
                requested: live_cells,
            });
        }

        let mut live = Vec::with_capacity(live_cells);
        for _ in 0..live_cells {
            let chosen = rand::random_range(0..open_positions.len());
            live.push(open_positions.swap_remove(chosen));
        }

        Self::from_live_cells(rows, columns, &live)
    }

    pub(crate) fn with_cells(rows: usize, columns: usize, cells: Vec<CellState>) -> Self {
        debug_assert_eq!(cells.len(), rows * columns);
        Self {
            rows,
            columns,
            cells,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn state<P>(&self, pos: P) -> Option<&CellState>
    where
        P: Into<Position>,
    {
        let index = self.pos_to_index(pos.into())?;
        self.cells.get(index)
    }

    pub fn enumerate_cells(&self) -> impl Iterator<Item = (Position, &CellState)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, state)| (self.index_to_pos(index), state))
    }

    pub fn live_cells(&self) -> impl Iterator<Item = Position> {
        self.enumerate_cells()
            .filter(|(_, state)| **state == CellState::Alive)
            .map(|(pos, _)| pos)
    }

    pub fn population(&self) -> usize {
        self.live_cells().count()
    }

    /// The minimal bounding box around the live cells, re-indexed to start
    /// at (0, 0). A universe with no live cells canonicalizes to the empty
    /// universe. Idempotent.
    pub fn canonicalize(&self) -> Universe {
        let Some((top, bottom, left, right)) = self.live_bounds() else {
            return Universe::empty();
        };

        let cells = (top..=bottom)
            .cartesian_product(left..=right)
            .map(|pos| self.state(pos).copied().unwrap_or_default())
            .collect();

        Universe::with_cells(bottom - top + 1, right - left + 1, cells)
    }

    fn live_bounds(&self) -> Option<(usize, usize, usize, usize)> {
        self.live_cells().fold(None, |bounds, pos| {
            let (top, bottom, left, right) =
                bounds.unwrap_or((pos.row, pos.row, pos.column, pos.column));
            Some((
                top.min(pos.row),
                bottom.max(pos.row),
                left.min(pos.column),
                right.max(pos.column),
            ))
        })
    }

    /// The live cells translated so their bounding box starts at (0, 0).
    /// Row-major order, so two patterns compare directly.
    fn pattern(&self) -> Vec<Position> {
        let live = self.live_cells().collect_vec();
        let top = live.iter().map(|pos| pos.row).min().unwrap_or(0);
        let left = live.iter().map(|pos| pos.column).min().unwrap_or(0);

        live.into_iter()
            .map(|pos| Position {
                row: pos.row - top,
                column: pos.column - left,
            })
            .collect()
    }

    fn pos_to_index(&self, pos: Position) -> Option<usize> {
        if pos.row >= self.rows || pos.column >= self.columns {
            return None;
        }

        Some(pos.row * self.columns + pos.column)
    }

    fn index_to_pos(&self, index: usize) -> Position {
        Position {
            row: index / self.columns,
            column: index % self.columns,
        }
    }
}

/// Pattern equality: the same live cells up to translation, regardless of
/// extents or dead padding. Canonicalizing or padding a universe never
/// changes what it compares equal to.
impl PartialEq for Universe {
    fn eq(&self, other: &Self) -> bool {
        self.pattern() == other.pattern()
    }
}

impl Eq for Universe {}

impl fmt::Display for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .cells
            .chunks(self.columns)
            .map(|row| {
                row.iter()
                    .map(|state| match state {
                        CellState::Alive => ALIVE_GLYPH,
                        CellState::Dead => DEAD_GLYPH,
                    })
                    .collect::<String>()
            })
            .join("\n");

        write!(f, "{rendered}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn universe(pattern: &str) -> Universe {
        let rows = pattern
            .split_whitespace()
            .map(|row| {
                row.chars()
                    .map(|glyph| match glyph {
                        ALIVE_GLYPH => CellState::Alive,
                        _ => CellState::Dead,
                    })
                    .collect()
            })
            .collect();

        Universe::from_rows(rows).unwrap()
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let result = Universe::from_rows(vec![
            vec![CellState::Dead; 3],
            vec![CellState::Dead; 2],
        ]);

        assert_eq!(
            result,
            Err(SeedError::RaggedRows {
                row: 1,
                expected: 3,
                found: 2,
            })
        );
    }

    #[test]
    fn live_cells_outside_the_extent_are_rejected() {
        let result = Universe::from_live_cells(2, 2, &[Position { row: 2, column: 0 }]);

        assert!(matches!(result, Err(SeedError::OutOfExtent { .. })));
    }

    #[test]
    fn live_cells_without_an_extent_are_rejected() {
        let result = Universe::from_live_cells(0, 4, &[Position { row: 0, column: 0 }]);

        assert_eq!(result, Err(SeedError::MissingExtent));
    }

    #[test]
    fn seeds_with_no_area_collapse_to_the_empty_universe() {
        for empty in [
            Universe::from_rows(Vec::new()).unwrap(),
            Universe::from_live_cells(0, 0, &[]).unwrap(),
            Universe::empty(),
        ] {
            assert_eq!(empty.row_count(), 1);
            assert_eq!(empty.column_count(), 1);
            assert_eq!(empty.population(), 0);
        }
    }

    #[test]
    fn state_lookup_is_extent_checked() {
        let blinker = universe("XXX");

        assert_eq!(blinker.state((0, 2)), Some(&CellState::Alive));
        assert_eq!(blinker.state((0, 3)), None);
        assert_eq!(blinker.state((1, 0)), None);
    }

    #[test]
    fn population_counts_live_cells() {
        assert_eq!(universe("-XXX XXX-").population(), 6);
        assert_eq!(universe("---").population(), 0);
    }

    #[test]
    fn random_seeding_places_the_requested_population() {
        let random = Universe::new_random(4, 5, 7).unwrap();

        assert_eq!(random.row_count(), 4);
        assert_eq!(random.column_count(), 5);
        assert_eq!(random.population(), 7);
    }

    #[test]
    fn random_seeding_rejects_more_cells_than_the_area_holds() {
        let result = Universe::new_random(2, 2, 5);

        assert!(matches!(result, Err(SeedError::Overpopulated { .. })));
    }

    #[test]
    fn canonicalize_trims_to_the_bounding_box() {
        let padded = universe("---- -XX- ----");
        let canonical = padded.canonicalize();

        assert_eq!(canonical.row_count(), 1);
        assert_eq!(canonical.column_count(), 2);
        assert_eq!(canonical.to_string(), "XX");
    }

    #[test]
    fn canonicalize_is_idempotent() {
        let once = universe("--- -X- --X").canonicalize();
        let twice = once.canonicalize();

        assert_eq!(once.row_count(), twice.row_count());
        assert_eq!(once.column_count(), twice.column_count());
        assert_eq!(once.to_string(), twice.to_string());
    }

    #[test]
    fn canonicalize_of_a_dead_universe_is_the_empty_universe() {
        let canonical = universe("--- ---").canonicalize();

        assert_eq!(canonical.row_count(), 1);
        assert_eq!(canonical.column_count(), 1);
        assert_eq!(canonical.population(), 0);
    }

    #[test]
    fn dead_padding_never_affects_equality() {
        let block = universe("XX XX");
        let padded = universe("---- -XX- -XX-");

        assert_eq!(block, padded);
        assert_eq!(padded.canonicalize(), padded);
    }

    #[test]
    fn distinct_patterns_are_unequal() {
        assert_ne!(universe("XXX"), universe("XX XX"));
        assert_ne!(universe("XXX"), universe("X X X"));
    }

    #[test]
    fn rendering_uses_the_documented_glyphs() {
        assert_eq!(universe("X- -X").to_string(), "X-\n-X");
        assert_eq!(Universe::empty().to_string(), "-");
    }
}
