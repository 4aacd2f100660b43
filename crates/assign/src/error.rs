use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssignError {
    #[error("malformed cost matrix: {0}")]
    Malformed(String),
    #[error("no finite-cost perfect matching exists")]
    Unsatisfiable,
}
