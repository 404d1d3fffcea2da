use regex::{Regex, RegexBuilder};
use smallvec::SmallVec;

use super::{MatchResult, PathParams};
use crate::errors::{CompileError, CompileResult};
use crate::options::CompileOptions;
use crate::pattern::{VariableConstraint, slot_name, translate_with};

#[derive(Debug, Clone)]
struct VariableSlot {
    name: String,
    group: usize,
}

/// A compiled path pattern. Immutable once built and safe to share between
/// threads.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    regex: Regex,
    slots: SmallVec<[VariableSlot; 4]>,
}

impl PathMatcher {
    /// Tests `path` against the whole pattern and extracts the declared
    /// variables. When a name is declared more than once, the last
    /// declaration that captured something supplies the value.
    #[tracing::instrument(level = "trace", skip(self, path), fields(path_len = path.len() as u64))]
    pub fn match_path(&self, path: &str) -> MatchResult {
        let Some(captures) = self.regex.captures(path) else {
            return MatchResult::NoMatch;
        };

        let mut params = PathParams::with_capacity(self.slots.len());
        for slot in &self.slots {
            if let Some(found) = captures.get(slot.group) {
                params.insert(slot.name.clone(), found.as_str().to_string());
            }
        }
        MatchResult::Matched(params)
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Declared variable names in declaration order, duplicates included.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.name.as_str())
    }

    pub fn variable_count(&self) -> usize {
        self.slots.len()
    }

    /// The derived regex source.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Capture groups in the derived regex, including the implicit whole-match
    /// group and any opened inside constraints.
    pub fn captures_len(&self) -> usize {
        self.regex.captures_len()
    }
}

pub fn compile(pattern: &str) -> CompileResult<PathMatcher> {
    compile_with(pattern, &CompileOptions::default())
}

#[tracing::instrument(level = "trace", skip(options), fields(pattern_len = pattern.len() as u64))]
pub fn compile_with(pattern: &str, options: &CompileOptions) -> CompileResult<PathMatcher> {
    options.validate()?;
    let translation = translate_with(pattern, options)?;
    validate_constraints(pattern, &translation.constraints)?;
    let (source, variables) = translation.into_parts();
    let regex = build_regex(pattern, &source, options)?;

    let slots = bind_slots(pattern, &regex, variables)?;
    tracing::debug!(
        variables = slots.len(),
        regex = regex.as_str(),
        "compiled path pattern"
    );

    Ok(PathMatcher { regex, slots })
}

/// One-off convenience for `compile(pattern)?.match_path(path)`.
pub fn match_path(path: &str, pattern: &str) -> CompileResult<MatchResult> {
    Ok(compile(pattern)?.match_path(path))
}

/// Each constraint must parse as a regex of its own, so unbalanced text such as
/// `a)|(b` cannot close the variable's slot and escape the anchors.
fn validate_constraints(pattern: &str, constraints: &[VariableConstraint]) -> CompileResult<()> {
    for constraint in constraints {
        if let Err(err) = Regex::new(&constraint.raw) {
            tracing::debug!(
                variable = constraint.name.as_str(),
                constraint = constraint.raw.as_str(),
                "rejected variable constraint"
            );
            return Err(CompileError::UnsupportedRegex {
                pattern: pattern.to_string(),
                regex: constraint.raw.clone(),
                error: err.to_string(),
            });
        }
    }
    Ok(())
}

fn build_regex(pattern: &str, source: &str, options: &CompileOptions) -> CompileResult<Regex> {
    let mut builder = RegexBuilder::new(source);
    builder.case_insensitive(options.case_insensitive);
    if let Some(limit) = options.size_limit {
        builder.size_limit(limit);
    }
    builder.build().map_err(|err| CompileError::UnsupportedRegex {
        pattern: pattern.to_string(),
        regex: source.to_string(),
        error: err.to_string(),
    })
}

/// Resolves every declaration's named slot to its group index, so groups
/// opened inside a constraint cannot shift the association.
fn bind_slots<I>(
    pattern: &str,
    regex: &Regex,
    variables: I,
) -> CompileResult<SmallVec<[VariableSlot; 4]>>
where
    I: IntoIterator<Item = String>,
{
    let names: Vec<Option<&str>> = regex.capture_names().collect();
    variables
        .into_iter()
        .enumerate()
        .map(|(declaration, name)| {
            let slot = slot_name(declaration);
            match names.iter().position(|candidate| *candidate == Some(slot.as_str())) {
                Some(group) => Ok(VariableSlot { name, group }),
                None => Err(CompileError::UnsupportedRegex {
                    pattern: pattern.to_string(),
                    regex: regex.as_str().to_string(),
                    error: format!("capture slot '{slot}' for variable '{name}' is missing"),
                }),
            }
        })
        .collect()
}
