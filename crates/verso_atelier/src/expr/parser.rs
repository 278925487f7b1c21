//! Expression parser.
//!
//! Recursive-descent parser for the source expression dialect: identifiers,
//! member/index access, literals, array/object literals (computed keys
//! included), unary/binary operators, calls, and conditionals.

use crate::errors::{CompileError, Result};

use super::lexer::Token;

/// Expression AST.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(String),
    Number(String),
    Str(String),
    Bool(bool),
    Null,
    /// `a.b`
    Member(Box<Expr>, String),
    /// `a[e]`
    Index(Box<Expr>, Box<Expr>),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    /// `c ? t : f`
    Conditional(Box<Expr>, Box<Expr>, Box<Expr>),
    Call(Box<Expr>, Vec<Expr>),
    Array(Vec<Expr>),
    Object(Vec<(ObjectKey, Expr)>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKey {
    Static(String),
    Computed(Expr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
    Pos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

/// Parse a token stream into an expression. `src` is cited in errors.
pub fn parse(src: &str, tokens: Vec<Token>) -> Result<Expr> {
    let mut parser = Parser {
        src,
        tokens,
        pos: 0,
    };
    let expr = parser.parse_conditional()?;
    if parser.pos != parser.tokens.len() {
        return Err(parser.error("trailing input after expression"));
    }
    Ok(expr)
}

struct Parser<'a> {
    src: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &Token, what: &str) -> Result<()> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(format!("expected {what}")))
        }
    }

    fn error(&self, message: impl Into<String>) -> CompileError {
        CompileError::expression(message, self.src)
    }

    fn parse_conditional(&mut self) -> Result<Expr> {
        let condition = self.parse_or()?;
        if self.eat(&Token::Question) {
            let consequent = self.parse_conditional()?;
            self.expect(&Token::Colon, "`:` in conditional")?;
            let alternate = self.parse_conditional()?;
            return Ok(Expr::Conditional(
                Box::new(condition),
                Box::new(consequent),
                Box::new(alternate),
            ));
        }
        Ok(condition)
    }

    fn parse_or(&mut self) -> Result<Expr> {
        let mut left = self.parse_and()?;
        while self.eat(&Token::OrOr) {
            let right = self.parse_and()?;
            left = Expr::Binary(BinaryOp::Or, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr> {
        let mut left = self.parse_equality()?;
        while self.eat(&Token::AndAnd) {
            let right = self.parse_equality()?;
            left = Expr::Binary(BinaryOp::And, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<Expr> {
        let mut left = self.parse_comparison()?;
        loop {
            let op = match self.peek() {
                Some(Token::EqEq) => BinaryOp::Eq,
                Some(Token::NotEq) => BinaryOp::NotEq,
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_comparison()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Expr> {
        let mut left = self.parse_additive()?;
        loop {
            let op = match self.peek() {
                Some(Token::Lt) => BinaryOp::Lt,
                Some(Token::Gt) => BinaryOp::Gt,
                Some(Token::LtEq) => BinaryOp::LtEq,
                Some(Token::GtEq) => BinaryOp::GtEq,
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_additive()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_multiplicative()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                Some(Token::Percent) => BinaryOp::Rem,
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_unary()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        let op = match self.peek() {
            Some(Token::Bang) => Some(UnaryOp::Not),
            Some(Token::Minus) => Some(UnaryOp::Neg),
            Some(Token::Plus) => Some(UnaryOp::Pos),
            _ => None,
        };
        if let Some(op) = op {
            self.pos += 1;
            let operand = self.parse_unary()?;
            return Ok(Expr::Unary(op, Box::new(operand)));
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<Expr> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.eat(&Token::Dot) {
                match self.advance() {
                    Some(Token::Ident(name)) => {
                        expr = Expr::Member(Box::new(expr), name);
                    }
                    _ => return Err(self.error("expected property name after `.`")),
                }
            } else if self.eat(&Token::LBracket) {
                let index = self.parse_conditional()?;
                self.expect(&Token::RBracket, "`]`")?;
                expr = Expr::Index(Box::new(expr), Box::new(index));
            } else if self.eat(&Token::LParen) {
                let mut args = Vec::new();
                if !self.eat(&Token::RParen) {
                    loop {
                        args.push(self.parse_conditional()?);
                        if self.eat(&Token::Comma) {
                            if self.eat(&Token::RParen) {
                                break;
                            }
                            continue;
                        }
                        self.expect(&Token::RParen, "`)` after arguments")?;
                        break;
                    }
                }
                expr = Expr::Call(Box::new(expr), args);
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        match self.advance() {
            Some(Token::Ident(name)) => Ok(match name.as_str() {
                "true" => Expr::Bool(true),
                "false" => Expr::Bool(false),
                "null" | "undefined" => Expr::Null,
                _ => Expr::Ident(name),
            }),
            Some(Token::Number(n)) => Ok(Expr::Number(n)),
            Some(Token::Str(s)) => Ok(Expr::Str(s)),
            Some(Token::LParen) => {
                let expr = self.parse_conditional()?;
                self.expect(&Token::RParen, "`)`")?;
                Ok(expr)
            }
            Some(Token::LBracket) => {
                let mut items = Vec::new();
                if !self.eat(&Token::RBracket) {
                    loop {
                        items.push(self.parse_conditional()?);
                        if self.eat(&Token::Comma) {
                            if self.eat(&Token::RBracket) {
                                break;
                            }
                            continue;
                        }
                        self.expect(&Token::RBracket, "`]` after array items")?;
                        break;
                    }
                }
                Ok(Expr::Array(items))
            }
            Some(Token::LBrace) => self.parse_object(),
            _ => Err(self.error("expected expression")),
        }
    }

    fn parse_object(&mut self) -> Result<Expr> {
        let mut entries = Vec::new();
        if self.eat(&Token::RBrace) {
            return Ok(Expr::Object(entries));
        }
        loop {
            let key = match self.advance() {
                Some(Token::Ident(name)) => ObjectKey::Static(name),
                Some(Token::Str(s)) => ObjectKey::Static(s),
                Some(Token::Number(n)) => ObjectKey::Static(n),
                Some(Token::LBracket) => {
                    let expr = self.parse_conditional()?;
                    self.expect(&Token::RBracket, "`]` after computed key")?;
                    ObjectKey::Computed(expr)
                }
                _ => return Err(self.error("expected object key")),
            };

            let value = if self.eat(&Token::Colon) {
                self.parse_conditional()?
            } else {
                // Shorthand `{a}` — the key doubles as an identifier value
                match &key {
                    ObjectKey::Static(name) => Expr::Ident(name.clone()),
                    ObjectKey::Computed(_) => {
                        return Err(self.error("computed key requires a value"));
                    }
                }
            };
            entries.push((key, value));

            if self.eat(&Token::Comma) {
                if self.eat(&Token::RBrace) {
                    break;
                }
                continue;
            }
            self.expect(&Token::RBrace, "`}` after object entries")?;
            break;
        }
        Ok(Expr::Object(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::lexer::scan;

    fn parse_src(src: &str) -> Result<Expr> {
        parse(src, scan(src)?)
    }

    #[test]
    fn test_parse_ident() {
        assert_eq!(parse_src("foo").unwrap(), Expr::Ident("foo".into()));
    }

    #[test]
    fn test_parse_member_chain() {
        let expr = parse_src("a.b.c").unwrap();
        assert_eq!(
            expr,
            Expr::Member(
                Box::new(Expr::Member(
                    Box::new(Expr::Ident("a".into())),
                    "b".into()
                )),
                "c".into()
            )
        );
    }

    #[test]
    fn test_parse_index() {
        let expr = parse_src("a[i]").unwrap();
        assert_eq!(
            expr,
            Expr::Index(
                Box::new(Expr::Ident("a".into())),
                Box::new(Expr::Ident("i".into()))
            )
        );
    }

    #[test]
    fn test_precedence() {
        // a + b * c parses as a + (b * c)
        let expr = parse_src("a + b * c").unwrap();
        match expr {
            Expr::Binary(BinaryOp::Add, _, right) => {
                assert!(matches!(*right, Expr::Binary(BinaryOp::Mul, _, _)));
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn test_logical_precedence() {
        // a || b && c parses as a || (b && c)
        let expr = parse_src("a || b && c").unwrap();
        match expr {
            Expr::Binary(BinaryOp::Or, _, right) => {
                assert!(matches!(*right, Expr::Binary(BinaryOp::And, _, _)));
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn test_conditional() {
        let expr = parse_src("ok ? 1 : 2").unwrap();
        assert!(matches!(expr, Expr::Conditional(_, _, _)));
    }

    #[test]
    fn test_call_with_args() {
        let expr = parse_src("f(a, 1)").unwrap();
        match expr {
            Expr::Call(callee, args) => {
                assert_eq!(*callee, Expr::Ident("f".into()));
                assert_eq!(args.len(), 2);
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn test_array_literal() {
        let expr = parse_src("[1, a]").unwrap();
        assert!(matches!(expr, Expr::Array(ref items) if items.len() == 2));
    }

    #[test]
    fn test_object_literal_with_computed_key() {
        let expr = parse_src(r#"({[a + "1"]: 1})"#).unwrap();
        match expr {
            Expr::Object(entries) => {
                assert_eq!(entries.len(), 1);
                assert!(matches!(entries[0].0, ObjectKey::Computed(_)));
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn test_object_shorthand() {
        let expr = parse_src("{a, b: 1}").unwrap();
        match expr {
            Expr::Object(entries) => {
                assert_eq!(entries[0].1, Expr::Ident("a".into()));
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn test_keywords() {
        assert_eq!(parse_src("true").unwrap(), Expr::Bool(true));
        assert_eq!(parse_src("null").unwrap(), Expr::Null);
        assert_eq!(parse_src("undefined").unwrap(), Expr::Null);
    }

    #[test]
    fn test_unary() {
        let expr = parse_src("!ok").unwrap();
        assert!(matches!(expr, Expr::Unary(UnaryOp::Not, _)));
    }

    #[test]
    fn test_malformed_is_error() {
        assert!(parse_src("a +").is_err());
        assert!(parse_src("a b").is_err());
        assert!(parse_src("(a").is_err());
    }

    #[test]
    fn test_error_cites_source() {
        let err = parse_src("a +").unwrap_err();
        assert!(err.to_string().contains("a +"));
    }
}
