// Binding scripts
//
// A script is a stream of whitespace separated tokens forming records of
// the form `[bind|doublebind|mapbind] <key> <command>`. The table keyword
// is optional and defaults to `bind`. Tokens may be double quoted, and
// `//` and `/* */` comments are skipped.

use super::binding::BindingSet;
use super::BindError;

/// A single token and the line it started on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub line: usize,
}

/// Splits script text into tokens
pub struct TokenStream<'a> {
    text: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> TokenStream<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0, line: 1 }
    }

    /// Line the stream is currently positioned on
    pub fn line(&self) -> usize {
        self.line
    }

    /// Next token, or `None` at the end of the text
    pub fn next_token(&mut self) -> Option<Token> {
        self.skip_blanks();

        let rest = &self.text[self.pos..];
        let first = rest.chars().next()?;
        let line = self.line;

        let text = if first == '"' {
            self.pos += 1;
            self.read_quoted()
        } else {
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            self.pos += end;
            rest[..end].to_string()
        };

        Some(Token { text, line })
    }

    /// Next token, failing the record when the text has run out
    pub fn must_get(&mut self, expected: &'static str) -> Result<Token, BindError> {
        self.next_token().ok_or(BindError::MalformedRecord {
            line: self.line,
            expected,
        })
    }

    fn skip_blanks(&mut self) {
        loop {
            let rest = &self.text[self.pos..];
            let Some(c) = rest.chars().next() else {
                return;
            };

            if c == '\n' {
                self.line += 1;
                self.pos += 1;
            } else if c.is_whitespace() {
                self.pos += c.len_utf8();
            } else if rest.starts_with("//") {
                self.pos += rest.find('\n').unwrap_or(rest.len());
            } else if rest.starts_with("/*") {
                let end = rest[2..].find("*/").map_or(rest.len(), |i| i + 4);
                self.line += rest[..end].matches('\n').count();
                self.pos += end;
            } else {
                return;
            }
        }
    }

    /// Body of a quoted token; the opening quote is already consumed.
    /// An unterminated quote runs to the end of the text.
    fn read_quoted(&mut self) -> String {
        let mut text = String::new();
        let mut chars = self.text[self.pos..].char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            match c {
                '"' => {
                    self.pos += offset + 1;
                    return text;
                }
                '\\' => match chars.peek() {
                    Some(&(_, escaped @ ('"' | '\\'))) => {
                        text.push(escaped);
                        chars.next();
                    }
                    _ => text.push('\\'),
                },
                '\n' => {
                    self.line += 1;
                    text.push(c);
                }
                _ => text.push(c),
            }
        }

        self.pos = self.text.len();
        text
    }
}

/// One `[table] key command` record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRecord {
    pub target: BindingSet,
    pub key: String,
    pub command: String,
    pub line: usize,
}

/// Reads records from a script.
///
/// Yields an error for a record cut short by the end of the text and stops
/// there; records before it have already been yielded.
pub struct ScriptReader<'a> {
    tokens: TokenStream<'a>,
    failed: bool,
}

impl<'a> ScriptReader<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            tokens: TokenStream::new(text),
            failed: false,
        }
    }

    fn read_record(&mut self, first: Token) -> Result<ScriptRecord, BindError> {
        let (target, key) = match BindingSet::from_keyword(&first.text) {
            Some(target) => (target, self.tokens.must_get("key name")?),
            None => (BindingSet::Normal, first),
        };
        let command = self.tokens.must_get("command")?;

        Ok(ScriptRecord {
            target,
            key: key.text,
            command: command.text,
            line: key.line,
        })
    }
}

impl Iterator for ScriptReader<'_> {
    type Item = Result<ScriptRecord, BindError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let first = self.tokens.next_token()?;
        let record = self.read_record(first);
        self.failed = record.is_err();
        Some(record)
    }
}
