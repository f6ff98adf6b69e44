use pos::Position;
use rule::Rule;
use universe::{CellState, Universe};

pub mod growth;
pub mod pos;
pub mod rule;
pub mod universe;

/// Number of generations a run keeps before giving up on convergence.
pub const GENERATIONS_LIMIT: usize = 10;

/// Stateless simulation service: a rule set plus a generation cap. Each
/// `play` is an independent, deterministic run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub rule: Rule,
    pub generations_limit: usize,
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The latest generation has no live cells.
    Extinct,

    /// The latest generation repeats an earlier one, so the universe is a
    /// still life or an oscillator.
    Repeating,

    /// The generation cap was reached without extinction or repetition.
    LimitReached,
}

/// The ordered history of one run, seed included, plus the reason it
/// stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playback {
    pub generations: Vec<Universe>,
    pub outcome: Outcome,
}

impl Game {
    pub fn new(rule: Rule, generations_limit: usize) -> Self {
        Self {
            rule,
            generations_limit,
        }
    }

    /// One full generation: grow the tracked extent wherever life could
    /// spill over, apply the transition rule, trim back to the bounding box.
    pub fn step(&self, universe: &Universe) -> Universe {
        let expanded = growth::expand(universe, &self.rule);
        self.transition(&expanded).canonicalize()
    }

    /// Runs the simulation to a verdict. The history never exceeds the
    /// generation cap; a transition into extinction and the repeated
    /// generation that closes a cycle are both kept.
    pub fn play(&self, seed: Universe) -> Playback {
        let mut generations = vec![seed];
        loop {
            let current = &generations[generations.len() - 1];

            if current.population() == 0 {
                return Playback {
                    generations,
                    outcome: Outcome::Extinct,
                };
            }

            if generations.len() >= self.generations_limit {
                return Playback {
                    generations,
                    outcome: Outcome::LimitReached,
                };
            }

            let next = self.step(current);
            let repeating = generations.contains(&next);
            generations.push(next);

            if repeating {
                return Playback {
                    generations,
                    outcome: Outcome::Repeating,
                };
            }
        }
    }

    /// Synchronous update: every cell of the next generation is derived from
    /// the single input universe.
    fn transition(&self, universe: &Universe) -> Universe {
        let cells = universe
            .enumerate_cells()
            .map(|(pos, state)| self.transition_cell(universe, pos, *state))
            .collect();

        Universe::with_cells(universe.row_count(), universe.column_count(), cells)
    }

    fn transition_cell(&self, universe: &Universe, pos: Position, state: CellState) -> CellState {
        let live_neighbors = live_neighbor_count(universe, pos);

        let alive = match state {
            CellState::Alive => self.rule.survives(live_neighbors),
            CellState::Dead => self.rule.comes_alive(live_neighbors),
        };

        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self {
            rule: Rule::default(),
            generations_limit: GENERATIONS_LIMIT,
        }
    }
}

fn live_neighbor_count(universe: &Universe, center: Position) -> usize {
    const NEIGHBOR_OFFSETS: &[[isize; 2]] = &[
        [-1, -1],
        [-1, 0],
        [-1, 1],
        [0, -1],
        [0, 1],
        [1, -1],
        [1, 0],
        [1, 1],
    ];

    NEIGHBOR_OFFSETS
        .iter()
        .filter_map(|offset| {
            let pos = Position {
                row: center.row.checked_add_signed(offset[0])?,
                column: center.column.checked_add_signed(offset[1])?,
            };

            universe.state(pos)
        })
        .filter(|state| **state == CellState::Alive)
        .count()
}
