use fxhash::FxHashSet;
use serde::Serialize;

use crate::{
    OptimizerError,
    problem::{intersection::IntersectionIdx, traffic_signaling_problem::TrafficSignalingProblem},
    solver::schedule::ScheduleEntry,
};

/// A full schedule: one entry per intersection, indexed by intersection id.
///
/// Cloning is a deep copy, population members never share entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Solution {
    entries: Vec<ScheduleEntry>,
}

impl Solution {
    pub fn new(entries: Vec<ScheduleEntry>) -> Self {
        Solution { entries }
    }

    /// A solution where no light ever turns green.
    pub fn empty(intersection_count: usize) -> Self {
        Solution {
            entries: vec![ScheduleEntry::default(); intersection_count],
        }
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [ScheduleEntry] {
        &mut self.entries
    }

    pub fn entry(&self, intersection_id: IntersectionIdx) -> &ScheduleEntry {
        &self.entries[intersection_id.get()]
    }

    pub fn entry_mut(&mut self, intersection_id: IntersectionIdx) -> &mut ScheduleEntry {
        &mut self.entries[intersection_id.get()]
    }

    pub fn intersection_count(&self) -> usize {
        self.entries.len()
    }

    /// Same intersection count and same entry length everywhere.
    pub fn has_same_shape(&self, other: &Solution) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(other.entries.iter())
                .all(|(lhs, rhs)| lhs.len() == rhs.len())
    }

    /// Number of intersections with at least one positive duration.
    pub fn scheduled_intersection_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.cycle_time() > 0)
            .count()
    }

    /// Checks the structural invariants against `problem`.
    pub fn validate(&self, problem: &TrafficSignalingProblem) -> Result<(), OptimizerError> {
        if self.entries.len() != problem.intersection_count() {
            return Err(OptimizerError::precondition(format!(
                "solution has {} schedule entries, the network has {} intersections",
                self.entries.len(),
                problem.intersection_count()
            )));
        }

        for (index, entry) in self.entries.iter().enumerate() {
            let mut seen = FxHashSet::default();
            for item in entry.items() {
                let street = problem.street(item.street);
                if street.end().get() != index {
                    return Err(OptimizerError::precondition(format!(
                        "street {} is scheduled at intersection {index} but ends at {}",
                        street.name(),
                        street.end()
                    )));
                }

                if !seen.insert(item.street) {
                    return Err(OptimizerError::precondition(format!(
                        "street {} is scheduled twice at intersection {index}",
                        street.name()
                    )));
                }
            }
        }

        Ok(())
    }
}
