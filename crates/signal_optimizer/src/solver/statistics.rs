use std::io::Write;

use jiff::{SignedDuration, Timestamp};
use serde::Serialize;

use crate::OptimizerError;

use super::score::Score;

#[derive(Clone, Debug, Serialize)]
pub struct GenerationStatistics {
    pub generation: usize,
    pub timestamp: Timestamp,
    pub elapsed: SignedDuration,
    pub best_score: Score,
    pub worst_score: Score,
    pub mean_score: f64,
    /// Children that replaced their parent during breeding.
    pub improved_children: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct ScoreEvolutionRow {
    pub timestamp: Timestamp,
    pub generation: usize,
    pub score: Score,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct SearchStatistics {
    generations: Vec<GenerationStatistics>,
    score_evolution: Vec<ScoreEvolutionRow>,
}

impl SearchStatistics {
    pub fn add_generation(&mut self, statistics: GenerationStatistics) {
        self.generations.push(statistics);
    }

    pub fn add_best_score(&mut self, row: ScoreEvolutionRow) {
        self.score_evolution.push(row);
    }

    pub fn generations(&self) -> &[GenerationStatistics] {
        &self.generations
    }

    pub fn score_evolution(&self) -> &[ScoreEvolutionRow] {
        &self.score_evolution
    }

    pub fn write_json(&self, writer: impl Write) -> Result<(), OptimizerError> {
        serde_json::to_writer_pretty(writer, self).map_err(std::io::Error::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_json() {
        let mut statistics = SearchStatistics::default();
        statistics.add_best_score(ScoreEvolutionRow {
            timestamp: Timestamp::UNIX_EPOCH,
            generation: 0,
            score: Score::new(1002),
        });
        statistics.add_generation(GenerationStatistics {
            generation: 1,
            timestamp: Timestamp::UNIX_EPOCH,
            elapsed: SignedDuration::from_millis(15),
            best_score: Score::new(1002),
            worst_score: Score::new(10),
            mean_score: 506.0,
            improved_children: 3,
        });

        let mut buffer = Vec::new();
        statistics.write_json(&mut buffer).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["score_evolution"][0]["score"], 1002);
        assert_eq!(value["generations"][0]["generation"], 1);
        assert_eq!(value["generations"][0]["worst_score"], 10);
        assert_eq!(value["generations"][0]["improved_children"], 3);
    }
}
