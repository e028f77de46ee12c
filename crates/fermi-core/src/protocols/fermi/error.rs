use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FermiError {
    #[error("packet too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
}
