use serde::Serialize;

use super::{score::Score, solution::Solution};

#[derive(Clone, Debug, Serialize)]
pub struct ScoredSolution {
    pub solution: Solution,
    pub score: Score,
}
