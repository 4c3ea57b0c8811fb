use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Exit status when the result parser accepted no readout
pub const EXIT_NO_SOLUTIONS: i32 = 4;
/// Exit status for problems with the user's input
pub const EXIT_INPUT_ERROR: i32 = 3;
/// Exit status for I/O and serialization failures
pub const EXIT_RUNTIME_ERROR: i32 = 2;
/// Exit status for anything else (panics)
pub const EXIT_UNKNOWN_ERROR: i32 = 1;

/// Validation failures while reading an edge list.
///
/// Line numbers are 1-based and count every physical line, including
/// skipped blanks and comments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EdgeListError {
    #[error("Bad indices at line {line}")]
    Parse { line: usize },

    #[error("Edge repetition at line {line}")]
    DuplicateEdge { line: usize },

    #[error("Node 0 must be defined")]
    MissingNodeZero,

    /// `node` appears in the edge list while the lower index `missing` does not.
    #[error("Node {node} is defined, but not {missing}")]
    Discontinuity { node: usize, missing: usize },

    #[error("Input does not define any edges")]
    EmptyGraph,

    #[error("Number of nodes must be even, found {count}")]
    OddNodeCount { count: usize },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Cannot open file {}: {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Input(#[from] EdgeListError),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::FileOpen { .. } | Error::Input(_) => EXIT_INPUT_ERROR,
            Error::Io(_) | Error::Csv(_) => EXIT_RUNTIME_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_use_input_tier() {
        let err = Error::from(EdgeListError::DuplicateEdge { line: 7 });
        assert_eq!(err.exit_code(), EXIT_INPUT_ERROR);
        assert_eq!(err.to_string(), "Edge repetition at line 7");
    }

    #[test]
    fn test_io_errors_use_runtime_tier() {
        let err = Error::from(io::Error::new(io::ErrorKind::Other, "disk full"));
        assert_eq!(err.exit_code(), EXIT_RUNTIME_ERROR);
    }

    #[test]
    fn test_file_open_message() {
        let err = Error::FileOpen {
            path: PathBuf::from("missing.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.exit_code(), EXIT_INPUT_ERROR);
        assert!(err.to_string().starts_with("Cannot open file missing.txt"));
    }

    #[test]
    fn test_discontinuity_message() {
        let err = EdgeListError::Discontinuity { node: 3, missing: 2 };
        assert_eq!(err.to_string(), "Node 3 is defined, but not 2");
    }
}
