mod compiled;
mod result;
mod set;

pub use compiled::{PathMatcher, compile, compile_with, match_path};
pub use result::{MatchResult, PathParams};
pub use set::PatternSet;
