use regex::{RegexSet, RegexSetBuilder};

use super::{PathMatcher, PathParams, compile_with};
use crate::errors::{CompileError, CompileResult};
use crate::options::CompileOptions;

/// An ordered list of compiled patterns used to classify paths. Lookups run
/// every pattern in one pass and extract variables only for the winner.
#[derive(Debug, Clone)]
pub struct PatternSet {
    set: RegexSet,
    matchers: Vec<PathMatcher>,
}

impl PatternSet {
    pub fn new<I, S>(patterns: I) -> CompileResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_options(patterns, &CompileOptions::default())
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn with_options<I, S>(patterns: I, options: &CompileOptions) -> CompileResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut raw = Vec::new();
        let mut matchers = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            matchers.push(compile_with(pattern, options)?);
            raw.push(pattern.to_string());
        }

        let mut builder = RegexSetBuilder::new(matchers.iter().map(PathMatcher::as_str));
        builder.case_insensitive(options.case_insensitive);
        if let Some(limit) = options.size_limit {
            builder.size_limit(limit);
        }
        let set = builder.build().map_err(|err| CompileError::UnsupportedRegex {
            pattern: raw.join(", "),
            regex: matchers
                .iter()
                .map(PathMatcher::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            error: err.to_string(),
        })?;

        tracing::debug!(patterns = matchers.len(), "compiled pattern set");
        Ok(Self { set, matchers })
    }

    /// First pattern, in insertion order, that matches `path`.
    pub fn find(&self, path: &str) -> Option<(usize, PathParams)> {
        let index = self.set.matches(path).into_iter().next()?;
        let params = self.matchers[index].match_path(path).into_params()?;
        Some((index, params))
    }

    /// Indices of every pattern that matches `path`, ascending.
    pub fn matching(&self, path: &str) -> Vec<usize> {
        self.set.matches(path).into_iter().collect()
    }

    pub fn get(&self, index: usize) -> Option<&PathMatcher> {
        self.matchers.get(index)
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}
