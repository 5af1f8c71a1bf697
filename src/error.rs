//! Typed failures produced by the analysis pipeline.

use std::fmt;

use thiserror::Error;

/// Which plot axis a selection problem refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "X-axis"),
            Axis::Y => write!(f, "Y-axis"),
        }
    }
}

/// Why a chosen axis column was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisIssue {
    UnknownColumn,
    NonNumeric,
}

impl fmt::Display for AxisIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisIssue::UnknownColumn => write!(f, "does not exist in the uploaded data"),
            AxisIssue::NonNumeric => write!(f, "is not numeric"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// Unparseable or structurally inconsistent CSV. `row` is the 1-based data
    /// row (header excluded) when the problem is tied to one.
    #[error("{}", malformed_message(.row, .message))]
    MalformedInput { row: Option<usize>, message: String },

    #[error("Not enough data: {0}")]
    InsufficientData(String),

    #[error("{axis} column '{column}' {reason}")]
    InvalidAxis {
        axis: Axis,
        column: String,
        reason: AxisIssue,
    },
}

fn malformed_message(row: &Option<usize>, message: &str) -> String {
    match row {
        Some(r) => format!("Malformed CSV at data row {r}: {message}"),
        None => format!("Malformed CSV: {message}"),
    }
}

impl PipelineError {
    /// Short, stable name of the error kind for display next to the message.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::MalformedInput { .. } => "MalformedInputError",
            PipelineError::InsufficientData(_) => "InsufficientDataError",
            PipelineError::InvalidAxis { .. } => "InvalidAxisError",
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        PipelineError::MalformedInput {
            row: None,
            message: message.into(),
        }
    }

    pub fn malformed_at(row: usize, message: impl Into<String>) -> Self {
        PipelineError::MalformedInput {
            row: Some(row),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let e = PipelineError::malformed_at(3, "expected 2 fields, found 3");
        assert_eq!(e.kind(), "MalformedInputError");
        assert_eq!(
            e.to_string(),
            "Malformed CSV at data row 3: expected 2 fields, found 3"
        );

        let e = PipelineError::InvalidAxis {
            axis: Axis::Y,
            column: "city".into(),
            reason: AxisIssue::NonNumeric,
        };
        assert_eq!(e.kind(), "InvalidAxisError");
        assert_eq!(e.to_string(), "Y-axis column 'city' is not numeric");
    }
}
