use std::path::Path;

use crate::{
    OptimizerError,
    parsers::parser::DatasetParser,
    problem::traffic_signaling_problem::{
        TrafficSignalingProblem, TrafficSignalingProblemBuilder,
    },
};

/// Parser for the Hash Code 2021 qualification input format.
///
/// ```text
/// duration intersections streets cars bonus
/// start end name length      (one line per street)
/// count street_1 .. street_n (one line per car)
/// ```
pub struct HashCodeParser;

impl DatasetParser for HashCodeParser {
    fn parse<P: AsRef<Path>>(&self, file: P) -> Result<TrafficSignalingProblem, OptimizerError> {
        let file_content = std::fs::read_to_string(file)?;
        parse(&file_content)
    }
}

struct Lines<'a> {
    inner: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> Lines<'a> {
    /// Next line split on whitespace, with its 1-based line number.
    fn next_fields(&mut self, what: &str) -> Result<(usize, Vec<&'a str>), OptimizerError> {
        match self.inner.next() {
            Some((index, line)) => Ok((index + 1, line.split_whitespace().collect())),
            None => Err(OptimizerError::malformed(format!(
                "unexpected end of input, expected {what}"
            ))),
        }
    }
}

fn parse_number<T: std::str::FromStr>(
    line: usize,
    field: &str,
    value: &str,
) -> Result<T, OptimizerError> {
    value
        .parse()
        .map_err(|_| OptimizerError::malformed_at(line, format!("invalid {field}: {value}")))
}

pub fn parse(text: &str) -> Result<TrafficSignalingProblem, OptimizerError> {
    let mut lines = Lines {
        inner: text.lines().enumerate(),
    };

    let (line, header) = lines.next_fields("the header line")?;
    let &[duration, intersections, streets, cars, bonus] = header.as_slice() else {
        return Err(OptimizerError::malformed_at(
            line,
            format!("expected 5 header fields, found {}", header.len()),
        ));
    };

    let duration: u32 = parse_number(line, "duration", duration)?;
    let intersection_count: usize = parse_number(line, "number of intersections", intersections)?;
    let street_count: usize = parse_number(line, "number of streets", streets)?;
    let car_count: usize = parse_number(line, "number of cars", cars)?;
    let bonus: u32 = parse_number(line, "bonus", bonus)?;

    let mut builder = TrafficSignalingProblemBuilder::default();
    builder
        .set_duration(duration)
        .set_bonus(bonus)
        .set_intersection_count(intersection_count);

    for _ in 0..street_count {
        let (line, fields) = lines.next_fields("a street line")?;
        let &[start, end, name, length] = fields.as_slice() else {
            return Err(OptimizerError::malformed_at(
                line,
                format!("expected 4 street fields, found {}", fields.len()),
            ));
        };

        builder.add_street(
            name,
            parse_number(line, "street start", start)?,
            parse_number(line, "street end", end)?,
            parse_number(line, "street length", length)?,
        );
    }

    for _ in 0..car_count {
        let (line, fields) = lines.next_fields("a car line")?;
        let Some((count, path)) = fields.split_first() else {
            return Err(OptimizerError::malformed_at(line, "empty car line"));
        };

        let count: usize = parse_number(line, "path length", count)?;
        if count == 0 || count != path.len() {
            return Err(OptimizerError::malformed_at(
                line,
                format!("car path announces {count} streets, found {}", path.len()),
            ));
        }

        builder.add_car(path.iter().copied());
    }

    builder.build()
}
