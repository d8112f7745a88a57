use serde::{Deserialize, Serialize};

/// End-of-session result bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultTier {
    Best,
    Good,
    Encouragement,
    Retry,
}

impl ResultTier {
    pub fn headline(self) -> &'static str {
        match self {
            ResultTier::Best => "BRAVO! 🎉",
            ResultTier::Good => "Odlično! 👏",
            ResultTier::Encouragement => "Dobar pokušaj 🙂",
            ResultTier::Retry => "Ne odustaj 💪",
        }
    }

    /// Full result text shown on the quiz screen.
    pub fn message(self, score: usize, total: usize) -> String {
        let headline = self.headline();
        match self {
            ResultTier::Best => format!("{headline}\nOdličan rezultat: {score}/{total}"),
            ResultTier::Good => format!("{headline}\nSkoro savršeno: {score}/{total}"),
            ResultTier::Encouragement => {
                format!("{headline}\nImaš {score}/{total}. Pokušaj ponovo!")
            }
            ResultTier::Retry => {
                format!("{headline}\nRezultat: {score}/{total}\nPročitaj Info pa pokušaj opet!")
            }
        }
    }
}

/// Lower bounds (inclusive) of the score ratio for each tier.
/// Anything under `encouragement` is [`ResultTier::Retry`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreThresholds {
    pub best: f64,
    pub good: f64,
    pub encouragement: f64,
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self {
            best: 0.9,
            good: 0.7,
            encouragement: 0.4,
        }
    }
}

impl ScoreThresholds {
    /// Fixed buckets for an eight-question quiz: 8 best, 5..=7 good,
    /// 2..=4 encouragement, 0..=1 retry.
    pub fn legacy_eight() -> Self {
        Self {
            best: 1.0,
            good: 0.625,
            encouragement: 0.25,
        }
    }

    pub fn classify(&self, score: usize, total: usize) -> ResultTier {
        if total == 0 {
            return ResultTier::Retry;
        }
        // Integer ratios like 4/10 must not fall under 0.4 through rounding.
        let ratio = score.min(total) as f64 / total as f64;
        let at_least = |threshold: f64| ratio + 1e-6 >= threshold;
        if at_least(self.best) {
            ResultTier::Best
        } else if at_least(self.good) {
            ResultTier::Good
        } else if at_least(self.encouragement) {
            ResultTier::Encouragement
        } else {
            ResultTier::Retry
        }
    }
}
