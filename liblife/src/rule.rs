use serde::{Deserialize, Serialize};

/// Neighbor-count thresholds driving the transition rule. The classic
/// Conway rule is the `Default`; alternative rule sets plug in here without
/// touching the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Rule {
    /// A live cell with fewer live neighbors dies of loneliness.
    pub loneliness_limit: usize,

    /// A live cell with more live neighbors dies of overcrowding.
    pub overcrowding_limit: usize,

    /// A dead cell with exactly this many live neighbors comes to life.
    /// Also the trigger threshold for boundary expansion.
    pub birth_count: usize,
}

impl Rule {
    pub fn survives(&self, live_neighbors: usize) -> bool {
        live_neighbors >= self.loneliness_limit && live_neighbors <= self.overcrowding_limit
    }

    pub fn comes_alive(&self, live_neighbors: usize) -> bool {
        live_neighbors == self.birth_count
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            loneliness_limit: 2,
            overcrowding_limit: 3,
            birth_count: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conway_thresholds() {
        let rule = Rule::default();

        assert!(!rule.survives(1));
        assert!(rule.survives(2));
        assert!(rule.survives(3));
        assert!(!rule.survives(4));

        assert!(!rule.comes_alive(2));
        assert!(rule.comes_alive(3));
        assert!(!rule.comes_alive(4));
    }
}
