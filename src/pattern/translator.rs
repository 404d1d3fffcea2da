use smallvec::SmallVec;

use super::lexer::{SpannedToken, Token, tokenize};
use super::{PatternError, PatternResult};
use crate::options::{CompileOptions, DuplicateVariablePolicy};

pub const DEFAULT_VARIABLE_PATTERN: &str = "[^/]+";
pub const SEGMENT_WILDCARD_PATTERN: &str = "[^/]*";
pub const NESTED_DIRECTORIES_PATTERN: &str = "(?:[^/]+/)*";
pub const ANY_PATH_PATTERN: &str = ".*";
pub(crate) const SLOT_PREFIX: &str = "__var";

pub type VariableNames = SmallVec<[String; 4]>;

/// Raw `{name:regex}` text, kept so it can be checked on its own before the
/// spliced source is compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableConstraint {
    pub name: String,
    pub raw: String,
}

/// Regex source derived from a pattern plus the variables it declares, in
/// declaration order. Declaration `n` is captured by the group named
/// `slot_name(n)`. Constraint text is spliced in unchecked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub source: String,
    pub variables: VariableNames,
    pub constraints: Vec<VariableConstraint>,
}

impl Translation {
    pub fn into_parts(self) -> (String, VariableNames) {
        (self.source, self.variables)
    }
}

pub fn slot_name(declaration: usize) -> String {
    format!("{SLOT_PREFIX}{declaration}")
}

pub fn translate(pattern: &str) -> PatternResult<Translation> {
    translate_with(pattern, &CompileOptions::default())
}

#[tracing::instrument(level = "trace", skip(options), fields(pattern_len = pattern.len() as u64))]
pub fn translate_with(pattern: &str, options: &CompileOptions) -> PatternResult<Translation> {
    if pattern.len() > options.max_pattern_len {
        return Err(PatternError::PatternTooLong {
            length: pattern.len(),
            max: options.max_pattern_len,
        });
    }

    let tokens = tokenize(pattern)?;
    let mut translator = Translator::new(pattern, &tokens, options.duplicate_variables);
    translator.run()?;
    Ok(translator.finish())
}

struct Translator<'a> {
    pattern: &'a str,
    tokens: &'a [SpannedToken],
    index: usize,
    duplicates: DuplicateVariablePolicy,
    out: String,
    variables: VariableNames,
    constraints: Vec<VariableConstraint>,
    open_groups: SmallVec<[usize; 4]>,
    prev: Option<&'a Token>,
}

impl<'a> Translator<'a> {
    fn new(
        pattern: &'a str,
        tokens: &'a [SpannedToken],
        duplicates: DuplicateVariablePolicy,
    ) -> Self {
        let mut out = String::with_capacity(pattern.len() * 2 + 8);
        out.push_str("^(?:");
        Self {
            pattern,
            tokens,
            index: 0,
            duplicates,
            out,
            variables: SmallVec::new(),
            constraints: Vec::new(),
            open_groups: SmallVec::new(),
            prev: None,
        }
    }

    fn run(&mut self) -> PatternResult<()> {
        while let Some(spanned) = self.next() {
            match &spanned.token {
                Token::Literal(ch) | Token::Escaped(ch) => push_literal(&mut self.out, *ch),
                Token::FullStop => self.out.push_str(r"\."),
                Token::Wildcard => self.out.push_str(SEGMENT_WILDCARD_PATTERN),
                Token::RecursiveWildcard => {
                    if matches!(self.peek(), Some(Token::Literal('/'))) {
                        self.next();
                        self.out.push_str(NESTED_DIRECTORIES_PATTERN);
                    } else {
                        self.out.push_str(ANY_PATH_PATTERN);
                    }
                }
                Token::VariableOpen => self.variable(spanned.index)?,
                Token::VariableClose => {
                    return Err(PatternError::UnexpectedClosingBrace {
                        pattern: self.pattern.to_string(),
                        index: spanned.index,
                    });
                }
                Token::GroupOpen => {
                    self.open_groups.push(spanned.index);
                    self.out.push_str("(?:");
                }
                Token::GroupClose => {
                    let Some(start) = self.open_groups.pop() else {
                        return Err(PatternError::UnexpectedClosingParenthesis {
                            pattern: self.pattern.to_string(),
                            index: spanned.index,
                        });
                    };
                    if matches!(self.prev, Some(Token::GroupOpen)) {
                        return Err(PatternError::EmptyGroup {
                            pattern: self.pattern.to_string(),
                            start,
                        });
                    }
                    self.out.push(')');
                }
                Token::Alternation => self.out.push('|'),
                // `?` never turns a preceding wildcard into a lazy repetition
                Token::Optional => {
                    if matches!(
                        self.prev,
                        None | Some(
                            Token::GroupOpen
                                | Token::Alternation
                                | Token::Optional
                                | Token::Wildcard
                                | Token::RecursiveWildcard
                        )
                    ) {
                        return Err(PatternError::DanglingQuantifier {
                            pattern: self.pattern.to_string(),
                            index: spanned.index,
                            modifier: '?',
                        });
                    }
                    self.out.push('?');
                }
                // only reachable through a hand-built token stream
                Token::VariableName(_) | Token::VariableSeparator | Token::Constraint(_) => {
                    return Err(PatternError::UnterminatedVariable {
                        pattern: self.pattern.to_string(),
                        start: spanned.index,
                    });
                }
            }
            self.prev = Some(&spanned.token);
        }

        if let Some(&start) = self.open_groups.first() {
            return Err(PatternError::UnterminatedGroup {
                pattern: self.pattern.to_string(),
                start,
            });
        }

        Ok(())
    }

    fn variable(&mut self, start: usize) -> PatternResult<()> {
        let name = match self.next().map(|spanned| &spanned.token) {
            Some(Token::VariableName(name)) => name.as_str(),
            _ => {
                return Err(PatternError::UnterminatedVariable {
                    pattern: self.pattern.to_string(),
                    start,
                });
            }
        };
        validate_variable_name(self.pattern, name, start)?;

        let mut constraint = None;
        if matches!(self.peek(), Some(Token::VariableSeparator)) {
            self.next();
            if let Some(Token::Constraint(raw)) = self.peek() {
                self.next();
                constraint = Some(raw.as_str());
            }
        }
        if !matches!(self.next().map(|spanned| &spanned.token), Some(Token::VariableClose)) {
            return Err(PatternError::UnterminatedVariable {
                pattern: self.pattern.to_string(),
                start,
            });
        }

        let body = match constraint {
            Some("") => {
                return Err(PatternError::EmptyConstraint {
                    pattern: self.pattern.to_string(),
                    name: name.to_string(),
                });
            }
            Some(raw) => {
                self.constraints.push(VariableConstraint {
                    name: name.to_string(),
                    raw: raw.to_string(),
                });
                raw
            }
            None => DEFAULT_VARIABLE_PATTERN,
        };

        if self.variables.iter().any(|existing| existing == name) {
            match self.duplicates {
                DuplicateVariablePolicy::Reject => {
                    return Err(PatternError::DuplicateVariable {
                        pattern: self.pattern.to_string(),
                        name: name.to_string(),
                    });
                }
                DuplicateVariablePolicy::LastWins => {
                    tracing::debug!(
                        variable = name,
                        "duplicate variable declared; last match wins"
                    );
                }
            }
        }

        let slot = slot_name(self.variables.len());
        self.out.push_str("(?P<");
        self.out.push_str(&slot);
        self.out.push('>');
        self.out.push_str(body);
        self.out.push(')');
        self.variables.push(name.to_string());
        Ok(())
    }

    fn finish(mut self) -> Translation {
        self.out.push_str(")$");
        Translation {
            source: self.out,
            variables: self.variables,
            constraints: self.constraints,
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.index).map(|spanned| &spanned.token)
    }

    fn next(&mut self) -> Option<&'a SpannedToken> {
        let spanned = self.tokens.get(self.index);
        if spanned.is_some() {
            self.index += 1;
        }
        spanned
    }
}

fn validate_variable_name(pattern: &str, name: &str, start: usize) -> PatternResult<()> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(PatternError::VariableMissingName {
            pattern: pattern.to_string(),
            start,
        });
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(PatternError::VariableInvalidStart {
            pattern: pattern.to_string(),
            name: name.to_string(),
            found: first,
        });
    }
    for c in chars {
        if !(c.is_ascii_alphanumeric() || c == '_') {
            return Err(PatternError::VariableInvalidCharacter {
                pattern: pattern.to_string(),
                name: name.to_string(),
                invalid: c,
            });
        }
    }
    Ok(())
}

fn push_literal(out: &mut String, ch: char) {
    if matches!(
        ch,
        '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$'
    ) {
        out.push('\\');
    }
    out.push(ch);
}
