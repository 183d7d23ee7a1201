//! Recursive-descent recognizer for JavaScript function bodies.
//!
//! The parser builds no tree. It checks the token stream against the
//! statement and expression grammar, and records declarations and identifier
//! reads into a [`ScopeTree`] for the undeclared-name pass.

use super::lexer::{tokenize_at, Token, TokenKind};
use super::scope::{ScopeKind, ScopeTree};
use super::SyntaxError;

type ParseResult<T = ()> = Result<T, SyntaxError>;

/// Words that can never be an identifier reference or binding
const RESERVED: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "import",
    "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "while", "with",
];

const ASSIGN_OPS: &[&str] = &[
    "=", "+=", "-=", "*=", "/=", "%=", "**=", "<<=", ">>=", ">>>=", "&=", "|=", "^=", "&&=",
    "||=", "??=",
];

/// Deepest statement or expression nesting the recognizer follows
const MAX_NESTING: usize = 200;

fn is_reserved(word: &str) -> bool {
    RESERVED.contains(&word)
}

/// Binding power of a binary operator, and whether it is right-associative
fn binary_precedence(token: &Token<'_>, no_in: bool) -> Option<(u8, bool)> {
    match token.kind {
        TokenKind::Punct => match token.text {
            "??" | "||" => Some((1, false)),
            "&&" => Some((2, false)),
            "|" => Some((3, false)),
            "^" => Some((4, false)),
            "&" => Some((5, false)),
            "==" | "!=" | "===" | "!==" => Some((6, false)),
            "<" | ">" | "<=" | ">=" => Some((7, false)),
            "<<" | ">>" | ">>>" => Some((8, false)),
            "+" | "-" => Some((9, false)),
            "*" | "/" | "%" => Some((10, false)),
            "**" => Some((11, true)),
            _ => None,
        },
        TokenKind::Ident => match token.text {
            "instanceof" => Some((7, false)),
            "in" if !no_in => Some((7, false)),
            _ => None,
        },
        _ => None,
    }
}

#[derive(Debug, Clone, Copy)]
enum Binding {
    Var,
    Lexical,
}

pub(crate) struct Parser<'s, 'a> {
    tokens: Vec<Token<'a>>,
    index: usize,
    depth: usize,
    scopes: &'s mut ScopeTree<'a>,
}

impl<'s, 'a> Parser<'s, 'a> {
    pub fn new(tokens: Vec<Token<'a>>, scopes: &'s mut ScopeTree<'a>) -> Self {
        Parser {
            tokens,
            index: 0,
            depth: 0,
            scopes,
        }
    }

    /// Run `parse` one nesting level down. Fails instead of recursing past
    /// [`MAX_NESTING`].
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= MAX_NESTING {
            return Err(SyntaxError::TooDeep);
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Parse statements until the input runs out
    pub fn program(&mut self) -> ParseResult {
        while self.peek().is_some() {
            self.statement()?;
        }
        Ok(())
    }

    fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.index)
    }

    fn peek_nth(&self, n: usize) -> Option<&Token<'a>> {
        self.tokens.get(self.index + n)
    }

    fn at_punct(&self, p: &str) -> bool {
        self.peek().is_some_and(|t| t.is_punct(p))
    }

    fn at_word(&self, w: &str) -> bool {
        self.peek().is_some_and(|t| t.is_word(w))
    }

    fn bump(&mut self) {
        self.index += 1;
    }

    fn unexpected(&self) -> SyntaxError {
        match self.peek() {
            Some(token) => SyntaxError::UnexpectedToken(token.text.to_string()),
            None => SyntaxError::UnexpectedEnd,
        }
    }

    fn try_exact(&mut self, p: &str) -> bool {
        if self.at_punct(p) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn try_word(&mut self, w: &str) -> bool {
        if self.at_word(w) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, p: &str) -> ParseResult {
        if self.try_exact(p) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn expect_word(&mut self, w: &str) -> ParseResult {
        if self.try_word(w) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    /// Explicit `;` or an inserted one before `}`, a line break or the end
    fn consume_semicolon(&mut self) -> ParseResult {
        if self.try_exact(";") {
            return Ok(());
        }
        match self.peek() {
            None => Ok(()),
            Some(t) if t.is_punct("}") || t.newline_before => Ok(()),
            Some(_) => Err(self.unexpected()),
        }
    }

    fn at_statement_end(&self) -> bool {
        match self.peek() {
            None => true,
            Some(t) => t.is_punct(";") || t.is_punct("}") || t.newline_before,
        }
    }

    fn at_expression_end(&self) -> bool {
        match self.peek() {
            None => true,
            Some(t) => {
                t.newline_before
                    || (t.kind == TokenKind::Punct
                        && matches!(t.text, ")" | "]" | "}" | "," | ";" | ":"))
            }
        }
    }

    fn declare(&mut self, binding: Binding, name: &'a str) {
        match binding {
            Binding::Var => self.scopes.declare_var(name),
            Binding::Lexical => self.scopes.declare_lexical(name),
        }
    }

    // Statements

    fn statement(&mut self) -> ParseResult {
        self.nested(Self::statement_inner)
    }

    fn statement_inner(&mut self) -> ParseResult {
        let Some(token) = self.peek() else {
            return Err(SyntaxError::UnexpectedEnd);
        };
        let text = token.text;
        let is_ident = token.kind == TokenKind::Ident;
        if token.is_punct("{") {
            return self.block();
        }
        if token.is_punct(";") {
            self.bump();
            return Ok(());
        }
        if is_ident {
            if let Some(result) = self.keyword_statement(text) {
                return result;
            }
        }
        self.expression(false)?;
        self.consume_semicolon()
    }

    /// Statements introduced by a keyword or a label; `None` means the word
    /// starts an expression statement.
    fn keyword_statement(&mut self, word: &'a str) -> Option<ParseResult> {
        let result = match word {
            "var" => {
                self.bump();
                self.declarations(Binding::Var, false)
                    .and_then(|_| self.consume_semicolon())
            }
            "let" | "const" => {
                self.bump();
                self.declarations(Binding::Lexical, false)
                    .and_then(|_| self.consume_semicolon())
            }
            "function" => {
                self.bump();
                self.function_declaration()
            }
            "async"
                if self
                    .peek_nth(1)
                    .is_some_and(|t| t.is_word("function") && !t.newline_before) =>
            {
                self.index += 2;
                self.function_declaration()
            }
            "class" => {
                self.bump();
                self.class_declaration()
            }
            "if" => self.if_statement(),
            "for" => self.for_statement(),
            "while" => {
                self.bump();
                self.paren_expression().and_then(|_| self.statement())
            }
            "do" => self.do_while_statement(),
            "return" => {
                self.bump();
                self.optional_expression()
                    .and_then(|_| self.consume_semicolon())
            }
            "throw" => {
                self.bump();
                self.expression(false)
                    .and_then(|_| self.consume_semicolon())
            }
            "break" | "continue" => {
                self.bump();
                if self.peek().is_some_and(|t| {
                    t.kind == TokenKind::Ident && !t.newline_before && !is_reserved(t.text)
                }) {
                    self.bump();
                }
                self.consume_semicolon()
            }
            "try" => self.try_statement(),
            "switch" => self.switch_statement(),
            "debugger" => {
                self.bump();
                self.consume_semicolon()
            }
            label
                if !is_reserved(label)
                    && self.peek_nth(1).is_some_and(|t| t.is_punct(":")) =>
            {
                self.index += 2;
                self.statement()
            }
            _ => return None,
        };
        Some(result)
    }

    fn block(&mut self) -> ParseResult {
        self.expect("{")?;
        self.scopes.push(ScopeKind::Block);
        self.statements_until_close()?;
        self.scopes.pop();
        Ok(())
    }

    /// Statements up to and including the closing `}`
    fn statements_until_close(&mut self) -> ParseResult {
        loop {
            match self.peek() {
                None => return Err(SyntaxError::UnexpectedEnd),
                Some(t) if t.is_punct("}") => {
                    self.bump();
                    return Ok(());
                }
                Some(_) => self.statement()?,
            }
        }
    }

    fn declarations(&mut self, binding: Binding, no_in: bool) -> ParseResult {
        loop {
            self.binding_target(binding)?;
            if self.try_exact("=") {
                self.assignment(no_in)?;
            }
            if !self.try_exact(",") {
                return Ok(());
            }
        }
    }

    fn optional_expression(&mut self) -> ParseResult {
        if self.at_statement_end() {
            Ok(())
        } else {
            self.expression(false)
        }
    }

    fn paren_expression(&mut self) -> ParseResult {
        self.expect("(")?;
        self.expression(false)?;
        self.expect(")")
    }

    fn if_statement(&mut self) -> ParseResult {
        self.bump();
        self.paren_expression()?;
        self.statement()?;
        if self.try_word("else") {
            self.statement()?;
        }
        Ok(())
    }

    fn do_while_statement(&mut self) -> ParseResult {
        self.bump();
        self.statement()?;
        self.expect_word("while")?;
        self.paren_expression()?;
        self.try_exact(";");
        Ok(())
    }

    fn for_statement(&mut self) -> ParseResult {
        self.bump();
        self.try_word("await");
        self.expect("(")?;
        self.scopes.push(ScopeKind::Block);

        if !self.try_exact(";") {
            if self.try_word("var") {
                self.declarations(Binding::Var, true)?;
            } else if self.at_word("let") || self.at_word("const") {
                self.bump();
                self.declarations(Binding::Lexical, true)?;
            } else {
                self.expression(true)?;
            }

            if self.try_word("of") {
                self.assignment(false)?;
                return self.loop_body();
            }
            if self.try_word("in") {
                self.expression(false)?;
                return self.loop_body();
            }
            self.expect(";")?;
        }

        if !self.at_punct(";") {
            self.expression(false)?;
        }
        self.expect(";")?;
        self.loop_body()
    }

    /// Optional update expression, `)`, body, then leave the loop scope
    fn loop_body(&mut self) -> ParseResult {
        if !self.at_punct(")") {
            self.expression(false)?;
        }
        self.expect(")")?;
        self.statement()?;
        self.scopes.pop();
        Ok(())
    }

    fn try_statement(&mut self) -> ParseResult {
        self.bump();
        self.block()?;
        let mut handled = false;
        if self.try_word("catch") {
            handled = true;
            self.scopes.push(ScopeKind::Block);
            if self.try_exact("(") {
                self.binding_target(Binding::Lexical)?;
                self.expect(")")?;
            }
            self.block()?;
            self.scopes.pop();
        }
        if self.try_word("finally") {
            handled = true;
            self.block()?;
        }
        if handled {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn switch_statement(&mut self) -> ParseResult {
        self.bump();
        self.paren_expression()?;
        self.expect("{")?;
        self.scopes.push(ScopeKind::Block);
        loop {
            if self.try_exact("}") {
                break;
            }
            if self.try_word("case") {
                self.expression(false)?;
                self.expect(":")?;
            } else if self.try_word("default") {
                self.expect(":")?;
            } else {
                self.statement()?;
            }
        }
        self.scopes.pop();
        Ok(())
    }

    // Bindings

    fn binding_identifier(&mut self) -> ParseResult<&'a str> {
        match self.peek() {
            Some(t) if t.kind == TokenKind::Ident && !is_reserved(t.text) => {
                let name = t.text;
                self.bump();
                Ok(name)
            }
            _ => Err(self.unexpected()),
        }
    }

    fn binding_target(&mut self, binding: Binding) -> ParseResult {
        self.nested(|p| p.binding_target_inner(binding))
    }

    fn binding_target_inner(&mut self, binding: Binding) -> ParseResult {
        if self.try_exact("[") {
            loop {
                if self.try_exact("]") {
                    return Ok(());
                }
                if self.try_exact(",") {
                    continue;
                }
                if self.try_exact("...") {
                    self.binding_target(binding)?;
                } else {
                    self.binding_target(binding)?;
                    if self.try_exact("=") {
                        self.assignment(false)?;
                    }
                }
                if !self.try_exact(",") {
                    return self.expect("]");
                }
            }
        }

        if self.try_exact("{") {
            loop {
                if self.try_exact("}") {
                    return Ok(());
                }
                if self.try_exact("...") {
                    let name = self.binding_identifier()?;
                    self.declare(binding, name);
                } else {
                    let shorthand = self.property_key()?;
                    if self.try_exact(":") {
                        self.binding_target(binding)?;
                    } else {
                        match shorthand {
                            Some(name) if !is_reserved(name) => self.declare(binding, name),
                            _ => return Err(self.unexpected()),
                        }
                    }
                    if self.try_exact("=") {
                        self.assignment(false)?;
                    }
                }
                if !self.try_exact(",") {
                    return self.expect("}");
                }
            }
        }

        let name = self.binding_identifier()?;
        self.declare(binding, name);
        Ok(())
    }

    /// Object or class member key. Returns the name when the key is a plain
    /// identifier, which makes it usable as shorthand.
    fn property_key(&mut self) -> ParseResult<Option<&'a str>> {
        let Some(token) = self.peek() else {
            return Err(SyntaxError::UnexpectedEnd);
        };
        match token.kind {
            TokenKind::Ident => {
                let name = token.text;
                self.bump();
                Ok(Some(name))
            }
            TokenKind::String | TokenKind::Number | TokenKind::PrivateName => {
                self.bump();
                Ok(None)
            }
            TokenKind::Punct if token.text == "[" => {
                self.bump();
                self.assignment(false)?;
                self.expect("]")?;
                Ok(None)
            }
            _ => Err(self.unexpected()),
        }
    }

    // Functions and classes

    fn function_declaration(&mut self) -> ParseResult {
        self.try_exact("*");
        let name = self.binding_identifier()?;
        self.scopes.declare_var(name);
        self.function_rest(None)
    }

    /// Parameters and body, in a fresh function scope
    fn function_rest(&mut self, own_name: Option<&'a str>) -> ParseResult {
        self.scopes.push(ScopeKind::Function);
        if let Some(name) = own_name {
            self.scopes.declare_lexical(name);
        }
        self.scopes.declare_lexical("arguments");
        self.formal_parameters()?;
        self.expect("{")?;
        self.statements_until_close()?;
        self.scopes.pop();
        Ok(())
    }

    fn formal_parameters(&mut self) -> ParseResult {
        self.expect("(")?;
        loop {
            if self.try_exact(")") {
                return Ok(());
            }
            if self.try_exact("...") {
                self.binding_target(Binding::Lexical)?;
            } else {
                self.binding_target(Binding::Lexical)?;
                if self.try_exact("=") {
                    self.assignment(false)?;
                }
            }
            if !self.try_exact(",") {
                return self.expect(")");
            }
        }
    }

    fn class_declaration(&mut self) -> ParseResult {
        let name = self.binding_identifier()?;
        self.scopes.declare_lexical(name);
        self.class_tail()
    }

    fn class_tail(&mut self) -> ParseResult {
        if self.try_word("extends") {
            self.left_hand_side()?;
        }
        self.expect("{")?;
        self.scopes.push(ScopeKind::Block);
        loop {
            match self.peek() {
                None => return Err(SyntaxError::UnexpectedEnd),
                Some(t) if t.is_punct("}") => {
                    self.bump();
                    break;
                }
                Some(t) if t.is_punct(";") => self.bump(),
                Some(_) => self.class_member()?,
            }
        }
        self.scopes.pop();
        Ok(())
    }

    fn class_member(&mut self) -> ParseResult {
        if self.at_word("static") && self.peek_nth(1).is_some_and(|t| t.is_punct("{")) {
            self.bump();
            self.scopes.push(ScopeKind::Function);
            self.expect("{")?;
            self.statements_until_close()?;
            self.scopes.pop();
            return Ok(());
        }

        self.skip_modifiers(&["static", "get", "set", "async"]);
        self.try_exact("*");
        self.property_key()?;
        if self.at_punct("(") {
            return self.function_rest(None);
        }

        // Field, with an optional initializer evaluated per instance
        if self.try_exact("=") {
            self.scopes.push(ScopeKind::Function);
            self.assignment(false)?;
            self.scopes.pop();
        }
        self.consume_semicolon()
    }

    /// Skip `get`/`set`/`async`/`static` when they modify a following key
    /// rather than being the key themselves.
    fn skip_modifiers(&mut self, words: &[&str]) {
        while self
            .peek()
            .is_some_and(|t| t.kind == TokenKind::Ident && words.contains(&t.text))
            && self.peek_nth(1).is_some_and(|next| {
                !(next.kind == TokenKind::Punct
                    && matches!(next.text, "(" | "=" | ";" | "}" | "," | ":"))
            })
        {
            self.bump();
        }
    }

    // Expressions

    fn expression(&mut self, no_in: bool) -> ParseResult {
        self.assignment(no_in)?;
        while self.try_exact(",") {
            self.assignment(no_in)?;
        }
        Ok(())
    }

    fn assignment(&mut self, no_in: bool) -> ParseResult {
        self.nested(|p| p.assignment_inner(no_in))
    }

    fn assignment_inner(&mut self, no_in: bool) -> ParseResult {
        if self.try_arrow(no_in)? {
            return Ok(());
        }

        let start = self.index;
        let refs_before = self.scopes.reference_count();
        self.conditional(no_in)?;

        let Some(op) = self
            .peek()
            .filter(|t| t.kind == TokenKind::Punct && ASSIGN_OPS.contains(&t.text))
        else {
            return Ok(());
        };
        if op.text == "="
            && self.index == start + 1
            && self.scopes.reference_count() == refs_before + 1
        {
            self.scopes.forget_reference(refs_before);
        }
        self.bump();
        self.assignment(no_in)
    }

    /// Parse an arrow function if one starts here
    fn try_arrow(&mut self, no_in: bool) -> ParseResult<bool> {
        let skip = usize::from(
            self.at_word("async")
                && self.peek_nth(1).is_some_and(|t| {
                    !t.newline_before && (t.kind == TokenKind::Ident || t.is_punct("("))
                }),
        );
        let start = self.index + skip;
        let Some(first) = self.tokens.get(start) else {
            return Ok(false);
        };
        let followed_by_arrow = |i: usize| self.tokens.get(i).is_some_and(|t| t.is_punct("=>"));

        if first.kind == TokenKind::Ident && !is_reserved(first.text) && followed_by_arrow(start + 1)
        {
            let name = first.text;
            self.index = start + 2;
            self.scopes.push(ScopeKind::Function);
            self.scopes.declare_lexical(name);
        } else if first.is_punct("(")
            && self
                .matching_close(start)
                .is_some_and(|close| followed_by_arrow(close + 1))
        {
            self.index = start;
            self.scopes.push(ScopeKind::Function);
            self.formal_parameters()?;
            self.expect("=>")?;
        } else {
            return Ok(false);
        }

        if self.at_punct("{") {
            self.bump();
            self.statements_until_close()?;
        } else {
            self.assignment(no_in)?;
        }
        self.scopes.pop();
        Ok(true)
    }

    /// Index of the bracket closing the one at `open`
    fn matching_close(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (i, token) in self.tokens.iter().enumerate().skip(open) {
            if token.kind != TokenKind::Punct {
                continue;
            }
            match token.text {
                "(" | "[" | "{" => depth += 1,
                ")" | "]" | "}" => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        None
    }

    fn conditional(&mut self, no_in: bool) -> ParseResult {
        self.binary(0, no_in)?;
        if self.try_exact("?") {
            self.assignment(false)?;
            self.expect(":")?;
            self.assignment(no_in)?;
        }
        Ok(())
    }

    fn binary(&mut self, min_precedence: u8, no_in: bool) -> ParseResult {
        self.nested(|p| p.binary_inner(min_precedence, no_in))
    }

    fn binary_inner(&mut self, min_precedence: u8, no_in: bool) -> ParseResult {
        self.unary()?;
        while let Some((precedence, right_assoc)) =
            self.peek().and_then(|t| binary_precedence(t, no_in))
        {
            if precedence < min_precedence {
                break;
            }
            self.bump();
            let next = if right_assoc { precedence } else { precedence + 1 };
            self.binary(next, no_in)?;
        }
        Ok(())
    }

    fn unary(&mut self) -> ParseResult {
        self.nested(Self::unary_inner)
    }

    fn unary_inner(&mut self) -> ParseResult {
        let Some(token) = self.peek() else {
            return Err(SyntaxError::UnexpectedEnd);
        };
        let prefix = match token.kind {
            TokenKind::Punct => matches!(token.text, "!" | "~" | "+" | "-" | "++" | "--"),
            TokenKind::Ident => matches!(token.text, "typeof" | "void" | "delete" | "await"),
            _ => false,
        };
        if prefix {
            self.bump();
            return self.unary();
        }

        if self.try_word("yield") {
            if !self.at_expression_end() {
                self.try_exact("*");
                self.assignment(false)?;
            }
            return Ok(());
        }

        self.left_hand_side()?;
        if self
            .peek()
            .is_some_and(|t| (t.is_punct("++") || t.is_punct("--")) && !t.newline_before)
        {
            self.bump();
        }
        Ok(())
    }

    fn left_hand_side(&mut self) -> ParseResult {
        self.nested(Self::left_hand_side_inner)
    }

    fn left_hand_side_inner(&mut self) -> ParseResult {
        if self.try_word("new") {
            if self.try_exact(".") {
                self.member_name()?;
            } else {
                return self.left_hand_side();
            }
        } else {
            self.primary()?;
        }

        loop {
            if self.try_exact(".") {
                self.member_name()?;
            } else if self.try_exact("?.") {
                if self.at_punct("(") {
                    self.arguments()?;
                } else if self.try_exact("[") {
                    self.expression(false)?;
                    self.expect("]")?;
                } else {
                    self.member_name()?;
                }
            } else if self.try_exact("[") {
                self.expression(false)?;
                self.expect("]")?;
            } else if self.at_punct("(") {
                self.arguments()?;
            } else if let Some(TokenKind::Template(parts)) = self.peek().map(|t| t.kind.clone()) {
                self.bump();
                self.template_parts(&parts)?;
            } else {
                return Ok(());
            }
        }
    }

    fn member_name(&mut self) -> ParseResult {
        match self.peek() {
            Some(t) if matches!(t.kind, TokenKind::Ident | TokenKind::PrivateName) => {
                self.bump();
                Ok(())
            }
            _ => Err(self.unexpected()),
        }
    }

    fn arguments(&mut self) -> ParseResult {
        self.expect("(")?;
        loop {
            if self.try_exact(")") {
                return Ok(());
            }
            self.try_exact("...");
            self.assignment(false)?;
            if !self.try_exact(",") {
                return self.expect(")");
            }
        }
    }

    fn primary(&mut self) -> ParseResult {
        let Some(token) = self.peek().cloned() else {
            return Err(SyntaxError::UnexpectedEnd);
        };
        match token.kind {
            TokenKind::Number | TokenKind::String | TokenKind::Regex | TokenKind::PrivateName => {
                self.bump();
                Ok(())
            }
            TokenKind::Template(parts) => {
                self.bump();
                self.template_parts(&parts)
            }
            TokenKind::Punct => match token.text {
                "(" => self.paren_expression(),
                "[" => self.array_literal(),
                "{" => self.object_literal(),
                _ => Err(self.unexpected()),
            },
            TokenKind::Ident => match token.text {
                "this" | "null" | "true" | "false" | "super" => {
                    self.bump();
                    Ok(())
                }
                "function" => {
                    self.bump();
                    self.function_expression()
                }
                "async" if self.peek_nth(1).is_some_and(|t| t.is_word("function")) => {
                    self.index += 2;
                    self.function_expression()
                }
                "class" => {
                    self.bump();
                    self.scopes.push(ScopeKind::Block);
                    if self
                        .peek()
                        .is_some_and(|t| t.kind == TokenKind::Ident && t.text != "extends")
                    {
                        let name = self.binding_identifier()?;
                        self.scopes.declare_lexical(name);
                    }
                    self.class_tail()?;
                    self.scopes.pop();
                    Ok(())
                }
                word if is_reserved(word) => Err(self.unexpected()),
                name => {
                    self.scopes.reference(name, token.offset);
                    self.bump();
                    Ok(())
                }
            },
        }
    }

    fn function_expression(&mut self) -> ParseResult {
        self.try_exact("*");
        let name = if self.peek().is_some_and(|t| t.kind == TokenKind::Ident) {
            Some(self.binding_identifier()?)
        } else {
            None
        };
        self.function_rest(name)
    }

    /// Each `${...}` part must hold exactly one expression
    fn template_parts(&mut self, parts: &[(usize, &'a str)]) -> ParseResult {
        for &(offset, source) in parts {
            let tokens = tokenize_at(source, offset)?;
            let mut inner = Parser::new(tokens, &mut *self.scopes);
            inner.depth = self.depth;
            inner.expression(false)?;
            if inner.peek().is_some() {
                return Err(inner.unexpected());
            }
        }
        Ok(())
    }

    fn array_literal(&mut self) -> ParseResult {
        self.expect("[")?;
        loop {
            if self.try_exact("]") {
                return Ok(());
            }
            if self.try_exact(",") {
                continue;
            }
            self.try_exact("...");
            self.assignment(false)?;
            if !self.try_exact(",") {
                return self.expect("]");
            }
        }
    }

    fn object_literal(&mut self) -> ParseResult {
        self.expect("{")?;
        loop {
            if self.try_exact("}") {
                return Ok(());
            }
            self.property_definition()?;
            if !self.try_exact(",") {
                return self.expect("}");
            }
        }
    }

    fn property_definition(&mut self) -> ParseResult {
        if self.try_exact("...") {
            return self.assignment(false);
        }
        self.skip_modifiers(&["get", "set", "async"]);
        self.try_exact("*");

        let offset = self.peek().map(|t| t.offset).unwrap_or_default();
        let shorthand = self.property_key()?;
        if self.try_exact(":") {
            return self.assignment(false);
        }
        if self.at_punct("(") {
            return self.function_rest(None);
        }
        match shorthand {
            Some(name) if !is_reserved(name) => {
                self.scopes.reference(name, offset);
                // `{ a = 1 } = source` destructuring default
                if self.try_exact("=") {
                    self.assignment(false)?;
                }
                Ok(())
            }
            _ => Err(self.unexpected()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::lexer::tokenize;
    use super::*;

    fn parse(source: &str) -> Result<Option<String>, SyntaxError> {
        let tokens = tokenize(source)?;
        let mut scopes = ScopeTree::new();
        Parser::new(tokens, &mut scopes).program()?;
        Ok(scopes
            .first_unresolved(|name| matches!(name, "console" | "Math" | "Map"))
            .map(str::to_string))
    }

    #[test]
    fn test_accepts_common_solutions() {
        let two_sum = "function twoSum(nums, target) {\n  const map = new Map();\n  for (let i = 0; i < nums.length; i++) {\n    const complement = target - nums[i];\n    if (map.has(complement)) {\n      return [map.get(complement), i];\n    }\n    map.set(nums[i], i);\n  }\n  return [];\n}";
        assert_eq!(parse(two_sum), Ok(None));

        let merge = "var merge = function(intervals) {\n  intervals.sort((a, b) => a[0] - b[0]);\n  const result = [intervals[0]];\n  for (const [start, end] of intervals.slice(1)) {\n    const last = result[result.length - 1];\n    if (start <= last[1]) last[1] = Math.max(last[1], end);\n    else result.push([start, end]);\n  }\n  return result;\n};";
        assert_eq!(parse(merge), Ok(None));
    }

    #[test]
    fn test_accepts_classes_and_templates() {
        let source = "class LRUCache {\n  #hits = 0\n  constructor(capacity) {\n    this.capacity = capacity;\n    this.cache = new Map();\n  }\n  get(key) {\n    return this.cache.get(key) ?? -1;\n  }\n  static of(n) { return new LRUCache(n) }\n}\nconsole.log(`size ${LRUCache.of(2).capacity}`)";
        assert_eq!(parse(source), Ok(None));
    }

    #[test]
    fn test_hoisting_and_closures_resolve() {
        assert_eq!(parse("helper(); function helper() { return total; } var total = 1"), Ok(None));
        assert_eq!(parse("const add = (a, b = 1) => a + b; add(2)"), Ok(None));
        assert_eq!(parse("const f = async x => await x"), Ok(None));
    }

    #[test]
    fn test_plain_assignment_is_not_a_read() {
        assert_eq!(parse("count = 1"), Ok(None));
        assert_eq!(parse("count += 1"), Ok(Some("count".to_string())));
    }

    #[test]
    fn test_reports_first_undeclared_name() {
        assert_eq!(parse("console.log(x)"), Ok(Some("x".to_string())));
        assert_eq!(parse("let a = b + c"), Ok(Some("b".to_string())));
        assert_eq!(parse("{ let inner = 1 } inner"), Ok(Some("inner".to_string())));
        assert_eq!(parse("`${missing}`"), Ok(Some("missing".to_string())));
    }

    #[test]
    fn test_syntax_errors() {
        assert_eq!(parse("function f() {"), Err(SyntaxError::UnexpectedEnd));
        assert_eq!(
            parse("let x = 1 let y = 2"),
            Err(SyntaxError::UnexpectedToken("let".to_string()))
        );
        assert_eq!(
            parse("if (a) }"),
            Err(SyntaxError::UnexpectedToken("}".to_string()))
        );
        assert_eq!(parse("foo(1, 2"), Err(SyntaxError::UnexpectedEnd));
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let prefixes = format!("{}x", "!".repeat(100_000));
        assert_eq!(parse(&prefixes), Err(SyntaxError::TooDeep));

        let arrays = format!("let a = {}1{};", "[".repeat(10_000), "]".repeat(10_000));
        assert_eq!(parse(&arrays), Err(SyntaxError::TooDeep));

        assert_eq!(parse(&"(".repeat(100_000)), Err(SyntaxError::TooDeep));
        assert_eq!(parse(&"{".repeat(100_000)), Err(SyntaxError::TooDeep));
        assert_eq!(parse(&"if (a) ".repeat(50_000)), Err(SyntaxError::TooDeep));

        let powers = format!("{}a", "a ** ".repeat(10_000));
        assert_eq!(parse(&powers), Err(SyntaxError::TooDeep));
        let constructors = format!("{}F", "new ".repeat(10_000));
        assert_eq!(parse(&constructors), Err(SyntaxError::TooDeep));
        let arrows = format!("{}a", "a => ".repeat(10_000));
        assert_eq!(parse(&arrows), Err(SyntaxError::TooDeep));
        let patterns = format!("let {}a{} = b", "[".repeat(10_000), "]".repeat(10_000));
        assert_eq!(parse(&patterns), Err(SyntaxError::TooDeep));
    }

    #[test]
    fn test_ordinary_nesting_is_accepted() {
        let arrays = format!("let a = {}1{};", "[".repeat(20), "]".repeat(20));
        assert_eq!(parse(&arrays), Ok(None));

        let blocks = format!("{}let x = 1{}", "{".repeat(60), "}".repeat(60));
        assert_eq!(parse(&blocks), Ok(None));

        assert_eq!(parse("let n = !!!!-~1"), Ok(None));
    }

    #[test]
    fn test_flat_chains_do_not_nest() {
        let sum = format!("let a = 1; let b = {}a", "a + ".repeat(100_000));
        assert_eq!(parse(&sum), Ok(None));

        let calls = "f(1);\n".repeat(50_000);
        assert_eq!(parse(&format!("function f(n) {{}}\n{calls}")), Ok(None));
    }

    #[test]
    fn test_asi_allows_newlines() {
        assert_eq!(parse("let a = 1\nlet b = a\nb++"), Ok(None));
    }
}
