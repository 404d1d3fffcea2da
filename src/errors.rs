use crate::options::CompileOptionsError;
use crate::pattern::PatternError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompileError {
    #[error(transparent)]
    Options(#[from] CompileOptionsError),
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error("regex '{regex}' derived from pattern '{pattern}' was rejected: {error}")]
    UnsupportedRegex {
        pattern: String,
        regex: String,
        error: String,
    },
}

pub type CompileResult<T> = Result<T, CompileError>;
