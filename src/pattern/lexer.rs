use super::{PatternError, PatternResult};

/// A classified unit of pattern text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(char),
    /// `\c`: the next character, taken literally.
    Escaped(char),
    FullStop,
    Wildcard,
    RecursiveWildcard,
    VariableOpen,
    VariableName(String),
    VariableSeparator,
    /// Raw constraint text between `:` and the closing `}`.
    Constraint(String),
    VariableClose,
    GroupOpen,
    GroupClose,
    Alternation,
    Optional,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedToken {
    pub token: Token,
    /// Byte offset of the token's first character in the pattern.
    pub index: usize,
}

impl SpannedToken {
    fn new(token: Token, index: usize) -> Self {
        Self { token, index }
    }
}

#[tracing::instrument(level = "trace", fields(pattern_len = pattern.len() as u64))]
pub fn tokenize(pattern: &str) -> PatternResult<Vec<SpannedToken>> {
    let mut lexer = PatternLexer::new(pattern);
    lexer.run()?;
    Ok(lexer.tokens)
}

struct PatternLexer<'a> {
    pattern: &'a str,
    chars: Vec<(usize, char)>,
    index: usize,
    tokens: Vec<SpannedToken>,
}

impl<'a> PatternLexer<'a> {
    fn new(pattern: &'a str) -> Self {
        let chars: Vec<(usize, char)> = pattern.char_indices().collect();
        Self {
            pattern,
            tokens: Vec::with_capacity(chars.len()),
            chars,
            index: 0,
        }
    }

    fn run(&mut self) -> PatternResult<()> {
        while let Some(ch) = self.peek() {
            let start = self.current_byte_index();
            match ch {
                '{' => {
                    self.lex_variable()?;
                }
                '*' => {
                    self.next();
                    if self.peek() == Some('*') {
                        self.next();
                        self.push(Token::RecursiveWildcard, start);
                    } else {
                        self.push(Token::Wildcard, start);
                    }
                }
                '\\' => {
                    let escaped = self.consume_escape_char()?;
                    self.push(Token::Escaped(escaped), start);
                }
                _ => {
                    self.next();
                    let token = match ch {
                        '.' => Token::FullStop,
                        '}' => Token::VariableClose,
                        '(' => Token::GroupOpen,
                        ')' => Token::GroupClose,
                        '|' => Token::Alternation,
                        '?' => Token::Optional,
                        other => Token::Literal(other),
                    };
                    self.push(token, start);
                }
            }
        }
        Ok(())
    }

    fn lex_variable(&mut self) -> PatternResult<()> {
        let brace_start = self.current_byte_index();
        self.expect('{');
        self.push(Token::VariableOpen, brace_start);

        let name_start = self.current_byte_index();
        let mut name = String::new();
        while let Some(ch) = self.peek() {
            if ch == '}' || ch == ':' {
                break;
            }
            name.push(ch);
            self.next();
        }
        self.push(Token::VariableName(name), name_start);

        if self.peek() == Some(':') {
            self.push(Token::VariableSeparator, self.current_byte_index());
            self.next();
            let constraint_start = self.current_byte_index();
            let constraint = self.read_constraint(brace_start)?;
            self.push(Token::Constraint(constraint), constraint_start);
        }

        if self.peek() != Some('}') {
            return Err(PatternError::UnterminatedVariable {
                pattern: self.pattern.to_string(),
                start: brace_start,
            });
        }
        self.push(Token::VariableClose, self.current_byte_index());
        self.next();
        Ok(())
    }

    /// Reads constraint text up to the `}` that closes the declaration. Nested
    /// braces must balance; escapes are kept with their backslash.
    fn read_constraint(&mut self, brace_start: usize) -> PatternResult<String> {
        let mut depth = 0usize;
        let mut value = String::new();
        while let Some(ch) = self.peek() {
            match ch {
                '\\' => {
                    let escaped = self.consume_escape_char()?;
                    value.push('\\');
                    value.push(escaped);
                    continue;
                }
                '{' => depth += 1,
                '}' if depth == 0 => return Ok(value),
                '}' => depth -= 1,
                _ => {}
            }
            value.push(ch);
            self.next();
        }

        Err(PatternError::UnterminatedVariable {
            pattern: self.pattern.to_string(),
            start: brace_start,
        })
    }

    fn push(&mut self, token: Token, index: usize) {
        self.tokens.push(SpannedToken::new(token, index));
    }

    fn expect(&mut self, expected: char) {
        let actual = self.next();
        debug_assert_eq!(Some(expected), actual);
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.index).map(|(_, ch)| *ch)
    }

    fn next(&mut self) -> Option<char> {
        let ch = self.peek();
        if ch.is_some() {
            self.index += 1;
        }
        ch
    }

    fn current_byte_index(&self) -> usize {
        self.chars
            .get(self.index)
            .map(|(idx, _)| *idx)
            .unwrap_or(self.pattern.len())
    }

    fn consume_escape_char(&mut self) -> PatternResult<char> {
        let escape_index = self.current_byte_index();
        self.expect('\\');
        match self.next() {
            Some(ch) => Ok(ch),
            None => Err(PatternError::LoneEscapeCharacter {
                pattern: self.pattern.to_string(),
                index: escape_index,
            }),
        }
    }
}
