use std::collections::HashMap;

pub type PathParams = HashMap<String, String>;

/// Outcome of testing a path against a compiled pattern.
///
/// `Matched` with an empty map means the pattern matched but declares no
/// variables (or none of them participated); it is never used for a miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Matched(PathParams),
    NoMatch,
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params()
            .and_then(|params| params.get(name))
            .map(String::as_str)
    }

    pub fn params(&self) -> Option<&PathParams> {
        match self {
            Self::Matched(params) => Some(params),
            Self::NoMatch => None,
        }
    }

    pub fn into_params(self) -> Option<PathParams> {
        match self {
            Self::Matched(params) => Some(params),
            Self::NoMatch => None,
        }
    }
}

impl From<MatchResult> for Option<PathParams> {
    fn from(result: MatchResult) -> Self {
        result.into_params()
    }
}
