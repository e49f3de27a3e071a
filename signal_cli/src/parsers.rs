use jiff::SpanRelativeTo;

/// Accepts `30s`, `5m`, `PT1H30M` or a bare number of seconds.
pub fn parse_duration(input: &str) -> Result<jiff::SignedDuration, String> {
    let duration = if let Ok(duration) = input.parse::<jiff::SignedDuration>() {
        duration
    } else if let Ok(duration) = input
        .parse::<jiff::Span>()
        .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    {
        duration
    } else if let Ok(seconds) = input.parse::<i64>() {
        jiff::SignedDuration::from_secs(seconds)
    } else {
        return Err(format!("Invalid duration: {input}"));
    };

    if duration.is_negative() {
        return Err(format!("Duration must not be negative: {input}"));
    }

    Ok(duration)
}

/// A probability in `[0, 1]`.
pub fn parse_rate(input: &str) -> Result<f64, String> {
    let rate = input
        .parse::<f64>()
        .map_err(|_| format!("Invalid rate: {input}"))?;

    if !(0.0..=1.0).contains(&rate) {
        return Err(format!("Rate must be within [0, 1]: {input}"));
    }

    Ok(rate)
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;

    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("30s"), Ok(SignedDuration::from_secs(30)));
        assert_eq!(parse_duration("5m"), Ok(SignedDuration::from_mins(5)));
        assert_eq!(parse_duration("PT1H30M"), Ok(SignedDuration::from_mins(90)));
        assert_eq!(parse_duration("45"), Ok(SignedDuration::from_secs(45)));
        assert!(parse_duration("-3").is_err());
        assert!(parse_duration("soon").is_err());
    }

    #[test]
    fn test_parse_rate() {
        assert_eq!(parse_rate("0.25"), Ok(0.25));
        assert_eq!(parse_rate("1"), Ok(1.0));
        assert!(parse_rate("1.2").is_err());
        assert!(parse_rate("often").is_err());
    }
}
