//! Compiles glob-like file path patterns with named variables into reusable
//! matchers.
//!
//! | syntax        | matches                                                |
//! |---------------|--------------------------------------------------------|
//! | `.`           | a literal full stop                                    |
//! | `*`           | any characters within one path segment                 |
//! | `**`          | any number of nested directories (`**/` may match none) |
//! | `{name}`      | one or more segment characters, saved as `name`        |
//! | `{name:re}`   | text matching the regex `re`, saved as `name`          |
//! | `( ) \| ?`    | grouping, alternation and optional, as in a regex      |
//! | `\c`          | the character `c`, literally                           |
//!
//! A `?` directly after `*`, `**` or another `?` is rejected; write `(*)?` instead.
//!
//! ```
//! use path_pattern_rs::compile;
//!
//! let matcher = compile("docs/({sort}-)?{title}.{ext:txt|json|csv}").unwrap();
//! let result = matcher.match_path("docs/10-Product List.csv");
//! assert_eq!(result.get("sort"), Some("10"));
//! assert_eq!(result.get("title"), Some("Product List"));
//! assert_eq!(result.get("ext"), Some("csv"));
//! assert!(!matcher.is_match("docs/report.xml"));
//! ```

pub mod cache;
pub mod errors;
pub mod matcher;
pub mod options;
pub mod pattern;

pub use cache::MatcherCache;
pub use errors::{CompileError, CompileResult};
pub use matcher::{
    MatchResult, PathMatcher, PathParams, PatternSet, compile, compile_with, match_path,
};
pub use options::{
    CompileOptions, CompileOptionsBuilder, CompileOptionsError, DuplicateVariablePolicy,
};
pub use pattern::{PatternError, Translation, translate};
