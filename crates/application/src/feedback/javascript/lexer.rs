//! JavaScript tokenizer.
//!
//! Produces just enough token structure for the recognizer: identifiers,
//! literals, punctuators and template literal expression slices. Comments are
//! dropped; whether a line break preceded a token is recorded for automatic
//! semicolon insertion.

use super::SyntaxError;

/// Token category
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind<'a> {
    /// Identifier or keyword
    Ident,
    /// `#name` inside a class
    PrivateName,
    Number,
    String,
    /// Template literal; holds the offset and source of each `${...}` part
    Template(Vec<(usize, &'a str)>),
    Regex,
    Punct,
}

/// A token and its source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub text: &'a str,
    /// Byte offset of the token start
    pub offset: usize,
    /// A line terminator appeared between this token and the previous one
    pub newline_before: bool,
}

impl<'a> Token<'a> {
    pub fn is_punct(&self, p: &str) -> bool {
        self.kind == TokenKind::Punct && self.text == p
    }

    pub fn is_word(&self, w: &str) -> bool {
        self.kind == TokenKind::Ident && self.text == w
    }
}

/// Punctuators, longest first so the scan is greedy
const PUNCTUATORS: &[&str] = &[
    ">>>=", "...", "===", "!==", "**=", "<<=", ">>=", ">>>", "&&=", "||=", "??=", "=>", "==",
    "!=", "<=", ">=", "&&", "||", "??", "?.", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=",
    "|=", "^=", "**", "<<", ">>", "{", "}", "(", ")", "[", "]", ";", ",", "<", ">", "+", "-",
    "*", "/", "%", "&", "|", "^", "!", "~", "?", ":", "=", ".",
];

/// Words after which a `/` starts a regular expression
const REGEX_PREFIX_WORDS: &[&str] = &[
    "return", "typeof", "instanceof", "in", "of", "new", "delete", "void", "throw", "case", "do",
    "else", "yield", "await",
];

/// Deepest template literal nesting inside `${...}` parts
const MAX_TEMPLATE_DEPTH: usize = 32;

pub(crate) fn tokenize(input: &str) -> Result<Vec<Token<'_>>, SyntaxError> {
    tokenize_at(input, 0)
}

/// Tokenize a fragment whose first byte sits at `base` in the full source
pub(crate) fn tokenize_at(input: &str, base: usize) -> Result<Vec<Token<'_>>, SyntaxError> {
    Lexer::new(input, base).run()
}

struct Lexer<'a> {
    input: &'a str,
    base: usize,
    pos: usize,
    newline_pending: bool,
    template_depth: usize,
    tokens: Vec<Token<'a>>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str, base: usize) -> Self {
        Lexer {
            input,
            base,
            pos: 0,
            newline_pending: false,
            template_depth: 0,
            tokens: Vec::new(),
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(n)
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn next_char_if(&mut self, f: impl Fn(char) -> bool) -> Option<char> {
        let c = self.peek_char()?;
        if !f(c) {
            return None;
        }
        self.pos += c.len_utf8();
        Some(c)
    }

    fn end(&mut self, kind: TokenKind<'a>, start: usize) {
        self.tokens.push(Token {
            kind,
            text: &self.input[start..self.pos],
            offset: self.base + start,
            newline_before: std::mem::take(&mut self.newline_pending),
        });
    }

    fn run(mut self) -> Result<Vec<Token<'a>>, SyntaxError> {
        loop {
            self.skip_trivia()?;
            let start = self.pos;
            let Some(c) = self.peek_char() else {
                break;
            };

            if is_ident_start(c) {
                self.next_char();
                while self.next_char_if(is_ident_part).is_some() {}
                self.end(TokenKind::Ident, start);
            } else if c == '#' && self.peek_nth(1).is_some_and(is_ident_start) {
                self.next_char();
                while self.next_char_if(is_ident_part).is_some() {}
                self.end(TokenKind::PrivateName, start);
            } else if c.is_ascii_digit()
                || (c == '.' && self.peek_nth(1).is_some_and(|d| d.is_ascii_digit()))
            {
                self.number();
                self.end(TokenKind::Number, start);
            } else if c == '"' || c == '\'' {
                self.string(c)?;
                self.end(TokenKind::String, start);
            } else if c == '`' {
                let parts = self.template()?;
                self.end(TokenKind::Template(parts), start);
            } else if c == '/' && self.regex_allowed() {
                self.regex()?;
                self.end(TokenKind::Regex, start);
            } else if let Some(p) = PUNCTUATORS
                .iter()
                .find(|p| self.input[self.pos..].starts_with(**p))
            {
                self.pos += p.len();
                self.end(TokenKind::Punct, start);
            } else {
                return Err(SyntaxError::InvalidToken);
            }
        }
        Ok(self.tokens)
    }

    /// Skip whitespace and comments, noting line breaks
    fn skip_trivia(&mut self) -> Result<(), SyntaxError> {
        loop {
            match self.peek_char() {
                Some('\n' | '\r' | '\u{2028}' | '\u{2029}') => {
                    self.newline_pending = true;
                    self.next_char();
                }
                Some(c) if c.is_whitespace() || c == '\u{feff}' => {
                    self.next_char();
                }
                Some('/') if self.peek_nth(1) == Some('/') => {
                    while self.next_char_if(|c| c != '\n' && c != '\r').is_some() {}
                }
                Some('/') if self.peek_nth(1) == Some('*') => {
                    let body_start = self.pos + 2;
                    let Some(len) = self.input[body_start..].find("*/") else {
                        return Err(SyntaxError::InvalidToken);
                    };
                    if self.input[body_start..body_start + len].contains('\n') {
                        self.newline_pending = true;
                    }
                    self.pos = body_start + len + 2;
                }
                _ => return Ok(()),
            }
        }
    }

    fn number(&mut self) {
        let rest = &self.input[self.pos..];
        let hex = rest.starts_with("0x") || rest.starts_with("0X");
        let mut seen_dot = false;
        let mut prev = '\0';
        while let Some(c) = self.peek_char() {
            let take = if c.is_ascii_alphanumeric() || c == '_' {
                true
            } else if c == '.' && !seen_dot && !hex {
                seen_dot = true;
                true
            } else {
                (c == '+' || c == '-') && !hex && matches!(prev, 'e' | 'E')
            };
            if !take {
                break;
            }
            prev = c;
            self.next_char();
        }
    }

    fn string(&mut self, quote: char) -> Result<(), SyntaxError> {
        self.next_char();
        loop {
            match self.next_char() {
                None | Some('\n' | '\r') => return Err(SyntaxError::InvalidToken),
                Some('\\') => {
                    self.next_char();
                }
                Some(c) if c == quote => return Ok(()),
                Some(_) => {}
            }
        }
    }

    /// Scan a template literal and return the source of each substitution
    fn template(&mut self) -> Result<Vec<(usize, &'a str)>, SyntaxError> {
        self.next_char();
        let mut parts = Vec::new();
        loop {
            match self.next_char() {
                None => return Err(SyntaxError::InvalidToken),
                Some('\\') => {
                    self.next_char();
                }
                Some('`') => return Ok(parts),
                Some('$') if self.peek_char() == Some('{') => {
                    self.next_char();
                    let part_start = self.pos;
                    self.skip_balanced_braces()?;
                    parts.push((self.base + part_start, &self.input[part_start..self.pos - 1]));
                }
                Some(_) => {}
            }
        }
    }

    /// Advance past the `}` closing a `${`, skipping nested strings
    fn skip_balanced_braces(&mut self) -> Result<(), SyntaxError> {
        let mut depth = 1usize;
        while let Some(c) = self.peek_char() {
            match c {
                '{' => {
                    depth += 1;
                    self.next_char();
                }
                '}' => {
                    depth -= 1;
                    self.next_char();
                    if depth == 0 {
                        return Ok(());
                    }
                }
                '"' | '\'' => self.string(c)?,
                '`' => {
                    if self.template_depth == MAX_TEMPLATE_DEPTH {
                        return Err(SyntaxError::TooDeep);
                    }
                    self.template_depth += 1;
                    self.template()?;
                    self.template_depth -= 1;
                }
                _ => {
                    self.next_char();
                }
            }
        }
        Err(SyntaxError::InvalidToken)
    }

    fn regex_allowed(&self) -> bool {
        match self.tokens.last() {
            None => true,
            Some(t) => match t.kind {
                TokenKind::Punct => !matches!(t.text, ")" | "]" | "}" | "++" | "--"),
                TokenKind::Ident => REGEX_PREFIX_WORDS.contains(&t.text),
                _ => false,
            },
        }
    }

    fn regex(&mut self) -> Result<(), SyntaxError> {
        self.next_char();
        let mut in_class = false;
        loop {
            match self.next_char() {
                None | Some('\n' | '\r') => return Err(SyntaxError::InvalidToken),
                Some('\\') => {
                    self.next_char();
                }
                Some('[') => in_class = true,
                Some(']') => in_class = false,
                Some('/') if !in_class => break,
                Some(_) => {}
            }
        }
        while self.next_char_if(is_ident_part).is_some() {}
        Ok(())
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphabetic()
}

fn is_ident_part(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(src: &str) -> Vec<&str> {
        tokenize(src).unwrap().into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_punctuators_are_greedy() {
        assert_eq!(texts("a !== b"), vec!["a", "!==", "b"]);
        assert_eq!(texts("x => x ** 2"), vec!["x", "=>", "x", "**", "2"]);
        assert_eq!(texts("o?.p ?? q"), vec!["o", "?.", "p", "??", "q"]);
    }

    #[test]
    fn test_comments_and_newlines() {
        let tokens = tokenize("a // note\n/* block\n */ b").unwrap();
        assert_eq!(tokens.len(), 2);
        assert!(!tokens[0].newline_before);
        assert!(tokens[1].newline_before);
    }

    #[test]
    fn test_regex_versus_division() {
        let tokens = tokenize("x = a / b / c").unwrap();
        assert!(tokens.iter().all(|t| t.kind != TokenKind::Regex));

        let tokens = tokenize("s.replace(/[a-z]+/g, '')").unwrap();
        assert!(tokens
            .iter()
            .any(|t| t.kind == TokenKind::Regex && t.text == "/[a-z]+/g"));
    }

    #[test]
    fn test_template_parts() {
        let tokens = tokenize("`sum ${a + b} of ${ {k: 1}.k }`").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(
            tokens[0].kind,
            TokenKind::Template(vec![(7, "a + b"), (19, " {k: 1}.k ")])
        );
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(tokenize("'open"), Err(SyntaxError::InvalidToken));
        assert_eq!(tokenize("a @ b"), Err(SyntaxError::InvalidToken));
        assert_eq!(tokenize("/* never closed"), Err(SyntaxError::InvalidToken));
    }

    #[test]
    fn test_template_nesting_is_bounded() {
        let shallow = format!("{}x{}", "`${".repeat(4), "}`".repeat(4));
        assert!(tokenize(&shallow).is_ok());

        let deep = format!("{}x{}", "`${".repeat(10_000), "}`".repeat(10_000));
        assert_eq!(tokenize(&deep), Err(SyntaxError::TooDeep));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            texts("1.5e-3 + 0xFF + .5 + 10n"),
            vec!["1.5e-3", "+", "0xFF", "+", ".5", "+", "10n"]
        );
    }

    #[test]
    fn test_offsets_include_base() {
        let tokens = tokenize_at("a + b", 10).unwrap();
        assert_eq!(tokens[2].offset, 14);
    }
}
