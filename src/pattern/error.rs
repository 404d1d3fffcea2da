use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern is {length} bytes long, exceeding the limit of {max}")]
    PatternTooLong { length: usize, max: usize },
    #[error("pattern '{pattern}' ends with a lone escape character at index {index}")]
    LoneEscapeCharacter { pattern: String, index: usize },
    #[error(
        "variable declaration starting at index {start} in pattern '{pattern}' is never closed"
    )]
    UnterminatedVariable { pattern: String, start: usize },
    #[error("pattern '{pattern}' has an unexpected '}}' at index {index}")]
    UnexpectedClosingBrace { pattern: String, index: usize },
    #[error("pattern '{pattern}' has an unexpected ')' at index {index}")]
    UnexpectedClosingParenthesis { pattern: String, index: usize },
    #[error("group starting at index {start} in pattern '{pattern}' is never closed")]
    UnterminatedGroup { pattern: String, start: usize },
    #[error("group starting at index {start} in pattern '{pattern}' is empty")]
    EmptyGroup { pattern: String, start: usize },
    #[error(
        "quantifier '{modifier}' at index {index} in pattern '{pattern}' has nothing to apply to"
    )]
    DanglingQuantifier {
        pattern: String,
        index: usize,
        modifier: char,
    },
    #[error("variable declaration at index {start} in pattern '{pattern}' is missing a name")]
    VariableMissingName { pattern: String, start: usize },
    #[error(
        "variable name '{name}' in pattern '{pattern}' must start with an alphabetic character or underscore (found '{found}')"
    )]
    VariableInvalidStart {
        pattern: String,
        name: String,
        found: char,
    },
    #[error("variable name '{name}' in pattern '{pattern}' contains invalid character '{invalid}'")]
    VariableInvalidCharacter {
        pattern: String,
        name: String,
        invalid: char,
    },
    #[error("variable '{name}' in pattern '{pattern}' declares an empty constraint")]
    EmptyConstraint { pattern: String, name: String },
    #[error("variable '{name}' is declared more than once in pattern '{pattern}'")]
    DuplicateVariable { pattern: String, name: String },
}

pub type PatternResult<T> = Result<T, PatternError>;
