use std::{env, fs};

use anyhow::{Context, Result, bail};
use colored::Colorize;
use liblife::{
    Game, Outcome,
    rule::Rule,
    universe::{ALIVE_GLYPH, CellState, DEAD_GLYPH, Universe},
};
use serde::{Deserialize, Serialize};

/// Default seed: the toad pattern, the classic example of a universe that
/// outgrows its seed extent.
const DEFAULT_SEED: &str = "-XXX\nXXX-";

const RANDOM_ROWS: usize = 10;
const RANDOM_COLUMNS: usize = 10;
const RANDOM_LIVE_CELLS: usize = 25;

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
struct Config {
    rule: Rule,
    generations_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rule: Rule::default(),
            generations_limit: liblife::GENERATIONS_LIMIT,
        }
    }
}

fn main() -> Result<()> {
    let mut args = env::args().skip(1);

    let seed = match args.next().as_deref() {
        None | Some("-") => parse_pattern(DEFAULT_SEED)?,
        Some("random") => Universe::new_random(RANDOM_ROWS, RANDOM_COLUMNS, RANDOM_LIVE_CELLS)?,
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Couldn't read seed pattern {path}"))?;
            parse_pattern(&text)?
        }
    };

    let config = match args.next() {
        Some(path) => {
            let serialized =
                fs::read(&path).with_context(|| format!("Couldn't read config {path}"))?;
            serde_json::from_slice(&serialized).context("Couldn't deserialize config")?
        }
        None => Config::default(),
    };

    let playback = Game::new(config.rule, config.generations_limit).play(seed);

    for (generation, universe) in playback.generations.iter().enumerate() {
        println!("{}", format!("generation {generation}").bold());
        println!("{universe}\n");
    }

    let verdict = match playback.outcome {
        Outcome::Extinct => "universe went extinct".red(),
        Outcome::Repeating => "universe settled into a repeating pattern".green(),
        Outcome::LimitReached => format!(
            "universe still evolving after {} generations",
            playback.generations.len()
        )
        .yellow(),
    };
    println!("{verdict}");

    Ok(())
}

fn parse_pattern(text: &str) -> Result<Universe> {
    let rows = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            line.chars()
                .filter(|glyph| !glyph.is_whitespace())
                .map(|glyph| match glyph {
                    ALIVE_GLYPH => Ok(CellState::Alive),
                    DEAD_GLYPH => Ok(CellState::Dead),
                    other => bail!("Unknown cell glyph {other:?}"),
                })
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Universe::from_rows(rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_rendered_format_back() {
        let universe = parse_pattern("-X-\nX-X\n").unwrap();

        assert_eq!(universe.to_string(), "-X-\nX-X");
    }

    #[test]
    fn whitespace_between_glyphs_is_tolerated() {
        let universe = parse_pattern(" - X X X \n X X X - ").unwrap();

        assert_eq!(universe.row_count(), 2);
        assert_eq!(universe.column_count(), 4);
        assert_eq!(universe.population(), 6);
    }

    #[test]
    fn unknown_glyphs_are_rejected() {
        assert!(parse_pattern("-X?\n").is_err());
    }

    #[test]
    fn ragged_patterns_are_rejected() {
        assert!(parse_pattern("XX\nX").is_err());
    }
}
