use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptimizerError {
    /// The input file or submission is structurally invalid.
    #[error("Malformed input{}: {message}", line_suffix(.line))]
    MalformedInput {
        line: Option<usize>,
        message: String,
    },
    /// An operation was called with arguments it cannot work with.
    #[error("Precondition violated: {0}")]
    PreconditionViolation(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

fn line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(line) => format!(" at line {line}"),
        None => String::new(),
    }
}

impl OptimizerError {
    pub fn malformed(message: impl Into<String>) -> Self {
        OptimizerError::MalformedInput {
            line: None,
            message: message.into(),
        }
    }

    pub fn malformed_at(line: usize, message: impl Into<String>) -> Self {
        OptimizerError::MalformedInput {
            line: Some(line),
            message: message.into(),
        }
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        OptimizerError::PreconditionViolation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_includes_line() {
        let error = OptimizerError::malformed_at(3, "expected 4 fields");
        assert_eq!(
            error.to_string(),
            "Malformed input at line 3: expected 4 fields"
        );

        let error = OptimizerError::malformed("missing header");
        assert_eq!(error.to_string(), "Malformed input: missing header");
    }
}
