use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MAX_PATTERN_LEN: usize = 4096;

/// What to do when one pattern declares the same variable name twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DuplicateVariablePolicy {
    /// The last declaration that captured something supplies the value.
    #[default]
    LastWins,
    Reject,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CompileOptions {
    pub case_insensitive: bool,
    pub duplicate_variables: DuplicateVariablePolicy,
    pub max_pattern_len: usize,
    pub size_limit: Option<usize>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            duplicate_variables: DuplicateVariablePolicy::default(),
            max_pattern_len: DEFAULT_MAX_PATTERN_LEN,
            size_limit: None,
        }
    }
}

impl CompileOptions {
    pub fn builder() -> CompileOptionsBuilder {
        CompileOptionsBuilder::default()
    }

    pub fn validate(&self) -> Result<(), CompileOptionsError> {
        if self.max_pattern_len == 0 {
            return Err(CompileOptionsError::MaxPatternLenInvalid { provided: 0 });
        }
        if self.size_limit == Some(0) {
            return Err(CompileOptionsError::SizeLimitInvalid { provided: 0 });
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct CompileOptionsBuilder {
    options: CompileOptions,
}

impl CompileOptionsBuilder {
    pub fn case_insensitive(mut self, value: bool) -> Self {
        self.options.case_insensitive = value;
        self
    }

    pub fn duplicate_variables(mut self, value: DuplicateVariablePolicy) -> Self {
        self.options.duplicate_variables = value;
        self
    }

    pub fn max_pattern_len(mut self, value: usize) -> Self {
        self.options.max_pattern_len = value;
        self
    }

    pub fn size_limit(mut self, value: usize) -> Self {
        self.options.size_limit = Some(value);
        self
    }

    pub fn build(self) -> Result<CompileOptions, CompileOptionsError> {
        let options = self.options;
        options.validate()?;
        Ok(options)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompileOptionsError {
    #[error("max_pattern_len must be at least 1 (got {provided})")]
    MaxPatternLenInvalid { provided: usize },
    #[error("size_limit must be at least 1 byte when set (got {provided})")]
    SizeLimitInvalid { provided: usize },
}
