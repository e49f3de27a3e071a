use std::{fmt, io::Write, path::Path};

use fxhash::FxHashSet;

use crate::{
    OptimizerError,
    problem::{intersection::IntersectionIdx, traffic_signaling_problem::TrafficSignalingProblem},
    solver::{
        schedule::{ScheduleEntry, ScheduleItem},
        solution::Solution,
    },
};

/// The submission format: the number of scheduled intersections, then for
/// each one its id, its number of green streets and one `name duration` line
/// per street. Zero durations are left out and so are intersections without
/// any green street.
struct Submission<'a> {
    problem: &'a TrafficSignalingProblem,
    solution: &'a Solution,
}

impl fmt::Display for Submission<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.solution.scheduled_intersection_count())?;

        for (index, entry) in self.solution.entries().iter().enumerate() {
            let active = entry.active_items().collect::<Vec<_>>();
            if active.is_empty() {
                continue;
            }

            writeln!(f, "{index}")?;
            writeln!(f, "{}", active.len())?;
            for item in active {
                writeln!(
                    f,
                    "{} {}",
                    self.problem.street(item.street).name(),
                    item.duration
                )?;
            }
        }

        Ok(())
    }
}

pub fn format_submission(problem: &TrafficSignalingProblem, solution: &Solution) -> String {
    Submission { problem, solution }.to_string()
}

pub fn write_submission(
    problem: &TrafficSignalingProblem,
    solution: &Solution,
    mut writer: impl Write,
) -> Result<(), OptimizerError> {
    write!(writer, "{}", Submission { problem, solution })?;
    writer.flush()?;
    Ok(())
}

pub fn read_submission<P: AsRef<Path>>(
    problem: &TrafficSignalingProblem,
    file: P,
) -> Result<Solution, OptimizerError> {
    let file_content = std::fs::read_to_string(file)?;
    parse_submission(problem, &file_content)
}

/// Reads a submission back against `problem`. Intersections missing from the
/// submission get an empty entry.
pub fn parse_submission(
    problem: &TrafficSignalingProblem,
    text: &str,
) -> Result<Solution, OptimizerError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()));
    let mut next_line = |what: &str| {
        lines.next().ok_or_else(|| {
            OptimizerError::malformed(format!("unexpected end of submission, expected {what}"))
        })
    };

    let mut solution = Solution::empty(problem.intersection_count());
    let mut scheduled = FxHashSet::default();

    let (line, count) = next_line("the number of intersections")?;
    let count = parse_count(line, count)?;

    for _ in 0..count {
        let (line, id) = next_line("an intersection id")?;
        let id = parse_count(line, id)?;
        if id >= problem.intersection_count() {
            return Err(OptimizerError::malformed_at(
                line,
                format!("unknown intersection {id}"),
            ));
        }
        if !scheduled.insert(id) {
            return Err(OptimizerError::malformed_at(
                line,
                format!("intersection {id} is scheduled twice"),
            ));
        }

        let intersection = IntersectionIdx::new(id);
        let (line, street_count) = next_line("a number of streets")?;
        let street_count = parse_count(line, street_count)?;

        let mut items = Vec::with_capacity(street_count);
        for _ in 0..street_count {
            let (line, content) = next_line("a street schedule")?;
            let Some((name, duration)) = content.split_once(' ') else {
                return Err(OptimizerError::malformed_at(
                    line,
                    "expected a street name and a duration",
                ));
            };

            let street = problem.street_id(name).ok_or_else(|| {
                OptimizerError::malformed_at(line, format!("unknown street {name}"))
            })?;
            if problem.street(street).end() != intersection {
                return Err(OptimizerError::malformed_at(
                    line,
                    format!("street {name} does not end at intersection {id}"),
                ));
            }
            if items.iter().any(|item: &ScheduleItem| item.street == street) {
                return Err(OptimizerError::malformed_at(
                    line,
                    format!("street {name} is scheduled twice"),
                ));
            }

            let duration: u32 = duration.trim().parse().map_err(|_| {
                OptimizerError::malformed_at(line, format!("invalid duration: {duration}"))
            })?;
            if duration > problem.duration() {
                return Err(OptimizerError::malformed_at(
                    line,
                    format!(
                        "duration {duration} of street {name} exceeds the simulation duration {}",
                        problem.duration()
                    ),
                ));
            }
            items.push(ScheduleItem::new(street, duration));
        }

        *solution.entry_mut(intersection) = ScheduleEntry::new(items);
    }

    Ok(solution)
}

fn parse_count(line: usize, value: &str) -> Result<usize, OptimizerError> {
    value
        .parse()
        .map_err(|_| OptimizerError::malformed_at(line, format!("invalid number: {value}")))
}

#[cfg(test)]
mod tests {
    use crate::{
        solver::evaluation::evaluate_solution,
        test_utils,
    };

    use super::*;

    const EXAMPLE_SUBMISSION: &str = "3
1
2
rue-d-athenes 2
rue-d-amsterdam 1
0
1
rue-de-londres 2
2
1
rue-de-moscou 1
";

    #[test]
    fn test_format_example_submission() {
        let problem = test_utils::create_hashcode_example_problem();
        let solution = test_utils::create_hashcode_example_solution(&problem);

        let expected = "3
0
1
rue-de-londres 2
1
2
rue-d-athenes 2
rue-d-amsterdam 1
2
1
rue-de-moscou 1
";
        assert_eq!(format_submission(&problem, &solution), expected);
    }

    #[test]
    fn test_format_skips_zero_durations() {
        let problem = test_utils::create_hashcode_example_problem();
        let mut solution = test_utils::create_uniform_solution(&problem, 0);
        solution.entry_mut(IntersectionIdx::new(1)).items_mut()[1].duration = 3;

        assert_eq!(
            format_submission(&problem, &solution),
            "1\n1\n1\nrue-d-athenes 3\n"
        );
    }

    #[test]
    fn test_parse_example_submission() {
        let problem = test_utils::create_hashcode_example_problem();
        let solution = parse_submission(&problem, EXAMPLE_SUBMISSION).unwrap();

        assert_eq!(solution, test_utils::create_hashcode_example_solution(&problem));
        assert_eq!(evaluate_solution(&problem, &solution).value(), 1002);
    }

    #[test]
    fn test_write_submission() {
        let problem = test_utils::create_hashcode_example_problem();
        let solution = test_utils::create_hashcode_example_solution(&problem);

        let mut buffer = Vec::new();
        write_submission(&problem, &solution, &mut buffer).unwrap();

        let written = String::from_utf8(buffer).unwrap();
        assert_eq!(parse_submission(&problem, &written).unwrap(), solution);
    }

    #[test]
    fn test_parse_rejects_street_at_wrong_intersection() {
        let problem = test_utils::create_hashcode_example_problem();
        let submission = "1\n0\n1\nrue-de-rome 2\n";

        assert!(matches!(
            parse_submission(&problem, submission),
            Err(OptimizerError::MalformedInput { line: Some(4), .. })
        ));
    }

    #[test]
    fn test_parse_rejects_duration_longer_than_simulation() {
        let problem = test_utils::create_hashcode_example_problem();
        let submission = "1\n1\n2\nrue-d-athenes 4000000000\nrue-d-amsterdam 4000000000\n";

        assert!(matches!(
            parse_submission(&problem, submission),
            Err(OptimizerError::MalformedInput { line: Some(4), .. })
        ));

        let at_limit = parse_submission(&problem, "1\n1\n1\nrue-d-athenes 6\n").unwrap();
        assert_eq!(
            at_limit
                .entry(IntersectionIdx::new(1))
                .duration_of(problem.street_id("rue-d-athenes").unwrap()),
            Some(6)
        );
    }

    #[test]
    fn test_parse_rejects_truncated_submission() {
        let problem = test_utils::create_hashcode_example_problem();

        assert!(matches!(
            parse_submission(&problem, "2\n0\n1\nrue-de-londres 2\n"),
            Err(OptimizerError::MalformedInput { line: None, .. })
        ));
    }
}
