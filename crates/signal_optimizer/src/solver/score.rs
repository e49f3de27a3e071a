use std::{
    fmt,
    iter,
    ops::{Add, AddAssign, Sub},
};

use serde::Serialize;

/// Fitness of a solution: bonus-weighted finished cars plus leftover time.
/// Higher is better.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Score(u64);

impl Score {
    pub const ZERO: Score = Score(0);

    pub const fn new(value: u64) -> Self {
        Score(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl iter::Sum for Score {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Score::ZERO, |acc, score| acc + score)
    }
}

impl Add<Score> for Score {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Score(self.0 + other.0)
    }
}

impl AddAssign<Score> for Score {
    fn add_assign(&mut self, other: Score) {
        self.0 += other.0;
    }
}

impl Sub<Score> for Score {
    type Output = Self;

    /// Saturates at zero, scores are never negative.
    fn sub(self, other: Self) -> Self::Output {
        Score(self.0.saturating_sub(other.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_sum() {
        let scores = vec![Score::new(10), Score::new(5), Score::ZERO];
        let total: Score = scores.into_iter().sum();
        assert_eq!(total, Score::new(15));
    }

    #[test]
    fn test_score_subtraction_saturates() {
        assert_eq!(Score::new(10) - Score::new(4), Score::new(6));
        assert_eq!(Score::new(4) - Score::new(10), Score::ZERO);
    }

    #[test]
    fn test_score_cmp() {
        let mut scores = [Score::new(3), Score::new(30), Score::new(12)];
        scores.sort_by(|a, b| b.cmp(a));
        assert_eq!(scores, [Score::new(30), Score::new(12), Score::new(3)]);
        assert!(Score::ZERO.is_zero());
    }
}
