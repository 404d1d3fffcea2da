mod error;
mod lexer;
mod translator;

pub use error::{PatternError, PatternResult};
pub use lexer::{SpannedToken, Token, tokenize};
pub use translator::{
    ANY_PATH_PATTERN, DEFAULT_VARIABLE_PATTERN, NESTED_DIRECTORIES_PATTERN,
    SEGMENT_WILDCARD_PATTERN, Translation, VariableConstraint, VariableNames, slot_name, translate,
    translate_with,
};
