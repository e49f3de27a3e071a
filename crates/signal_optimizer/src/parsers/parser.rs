use std::path::Path;

use crate::{OptimizerError, problem::traffic_signaling_problem::TrafficSignalingProblem};

pub trait DatasetParser {
    fn parse<P: AsRef<Path>>(&self, file: P) -> Result<TrafficSignalingProblem, OptimizerError>;
}
