//! Tokenizer, recursive-descent parser and evaluator for plural selectors.
//!
//! Precedence, loosest first: `?:`, `||`, `&&`, `== !=`, `< <= > >=`,
//! `+ -`, `* / %`, unary `!` and `-`. Booleans evaluate to `0`/`1` and
//! division by zero yields `0`.

use std::iter::Peekable;
use std::str::Chars;

use super::PluralError;

/// Deepest expression tree the parser builds. Parsing and evaluation both
/// recurse once per level.
pub(super) const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Number(u64),
    N,
    Op(&'static str),
    LParen,
    RParen,
    Question,
    Colon,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::N => String::from("n"),
            Self::Op(op) => (*op).to_owned(),
            Self::LParen => String::from("("),
            Self::RParen => String::from(")"),
            Self::Question => String::from("?"),
            Self::Colon => String::from(":"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum BinaryOp {
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOp {
    fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "||" => Self::Or,
            "&&" => Self::And,
            "==" => Self::Eq,
            "!=" => Self::Ne,
            "<" => Self::Lt,
            "<=" => Self::Le,
            ">" => Self::Gt,
            ">=" => Self::Ge,
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "%" => Self::Rem,
            _ => return None,
        })
    }

    fn apply(self, lhs: u64, rhs: u64) -> u64 {
        match self {
            Self::Or => u64::from(lhs != 0 || rhs != 0),
            Self::And => u64::from(lhs != 0 && rhs != 0),
            Self::Eq => u64::from(lhs == rhs),
            Self::Ne => u64::from(lhs != rhs),
            Self::Lt => u64::from(lhs < rhs),
            Self::Le => u64::from(lhs <= rhs),
            Self::Gt => u64::from(lhs > rhs),
            Self::Ge => u64::from(lhs >= rhs),
            Self::Add => lhs.wrapping_add(rhs),
            Self::Sub => lhs.wrapping_sub(rhs),
            Self::Mul => lhs.wrapping_mul(rhs),
            Self::Div => lhs.checked_div(rhs).unwrap_or(0),
            Self::Rem => lhs.checked_rem(rhs).unwrap_or(0),
        }
    }
}

/// Compiled plural selector expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Expr {
    Literal(u64),
    N,
    Not(Box<Expr>),
    Negate(Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Conditional(Box<Expr>, Box<Expr>, Box<Expr>),
}

impl Expr {
    pub(super) fn parse(source: &str) -> Result<Self, PluralError> {
        let tokens = tokenize(source)?;
        let mut parser = Parser {
            tokens,
            pos: 0,
            depth: 0,
        };
        let expr = parser.conditional()?;
        match parser.peek() {
            None => Ok(expr),
            Some(token) => Err(PluralError::UnexpectedToken(token.describe())),
        }
    }

    pub(super) fn eval(&self, n: u64) -> u64 {
        match self {
            Self::Literal(value) => *value,
            Self::N => n,
            Self::Not(inner) => u64::from(inner.eval(n) == 0),
            Self::Negate(inner) => 0_u64.wrapping_sub(inner.eval(n)),
            Self::Binary(BinaryOp::Or, lhs, rhs) => {
                u64::from(lhs.eval(n) != 0 || rhs.eval(n) != 0)
            }
            Self::Binary(BinaryOp::And, lhs, rhs) => {
                u64::from(lhs.eval(n) != 0 && rhs.eval(n) != 0)
            }
            Self::Binary(op, lhs, rhs) => op.apply(lhs.eval(n), rhs.eval(n)),
            Self::Conditional(cond, then, otherwise) => {
                if cond.eval(n) == 0 {
                    otherwise.eval(n)
                } else {
                    then.eval(n)
                }
            }
        }
    }
}

fn tokenize(source: &str) -> Result<Vec<Token>, PluralError> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();
    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }
        let token = match ch {
            '0'..='9' => Token::Number(take_number(&mut chars)?),
            'n' => {
                chars.next();
                Token::N
            }
            '(' => {
                chars.next();
                Token::LParen
            }
            ')' => {
                chars.next();
                Token::RParen
            }
            '?' => {
                chars.next();
                Token::Question
            }
            ':' => {
                chars.next();
                Token::Colon
            }
            _ => Token::Op(take_operator(&mut chars)?),
        };
        tokens.push(token);
    }
    Ok(tokens)
}

fn take_number(chars: &mut Peekable<Chars<'_>>) -> Result<u64, PluralError> {
    let mut digits = String::new();
    while let Some(digit) = chars.next_if(char::is_ascii_digit) {
        digits.push(digit);
    }
    digits
        .parse::<u64>()
        .map_err(|_| PluralError::LiteralOutOfRange(digits))
}

fn take_operator(chars: &mut Peekable<Chars<'_>>) -> Result<&'static str, PluralError> {
    let Some(first) = chars.next() else {
        return Err(PluralError::UnexpectedEnd);
    };
    let second = chars.peek().copied();
    let (symbol, is_pair) = match (first, second) {
        ('|', Some('|')) => ("||", true),
        ('&', Some('&')) => ("&&", true),
        ('=', Some('=')) => ("==", true),
        ('!', Some('=')) => ("!=", true),
        ('<', Some('=')) => ("<=", true),
        ('>', Some('=')) => (">=", true),
        ('!', _) => ("!", false),
        ('<', _) => ("<", false),
        ('>', _) => (">", false),
        ('+', _) => ("+", false),
        ('-', _) => ("-", false),
        ('*', _) => ("*", false),
        ('/', _) => ("/", false),
        ('%', _) => ("%", false),
        (other, _) => return Err(PluralError::InvalidCharacter(other)),
    };
    if is_pair {
        chars.next();
    }
    Ok(symbol)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos = self.pos.saturating_add(1);
        }
        token
    }

    fn expect(&mut self, expected: &Token) -> Result<(), PluralError> {
        match self.advance() {
            Some(ref token) if token == expected => Ok(()),
            Some(token) => Err(PluralError::UnexpectedToken(token.describe())),
            None => Err(PluralError::UnexpectedEnd),
        }
    }

    /// Records one more level of tree depth.
    fn descend(&mut self) -> Result<(), PluralError> {
        if self.depth >= MAX_DEPTH {
            return Err(PluralError::TooDeep(MAX_DEPTH));
        }
        self.depth = self.depth.saturating_add(1);
        Ok(())
    }

    fn conditional(&mut self) -> Result<Expr, PluralError> {
        let base = self.depth;
        self.descend()?;
        let expr = self.ternary();
        self.depth = base;
        expr
    }

    fn ternary(&mut self) -> Result<Expr, PluralError> {
        let cond = self.binary(0)?;
        if self.peek() != Some(&Token::Question) {
            return Ok(cond);
        }
        self.advance();
        let then = self.conditional()?;
        self.expect(&Token::Colon)?;
        let otherwise = self.conditional()?;
        Ok(Expr::Conditional(
            Box::new(cond),
            Box::new(then),
            Box::new(otherwise),
        ))
    }

    /// Parses left-associative binary operators at `level` and tighter.
    fn binary(&mut self, level: usize) -> Result<Expr, PluralError> {
        let Some(symbols) = PRECEDENCE.get(level) else {
            return self.unary();
        };
        let next_level = level.saturating_add(1);
        let base = self.depth;
        let mut lhs = self.binary(next_level)?;
        while let Some(Token::Op(symbol)) = self.peek() {
            if !symbols.contains(symbol) {
                break;
            }
            let Some(op) = BinaryOp::from_symbol(symbol) else {
                break;
            };
            self.advance();
            // Each chained operator deepens the left spine.
            self.descend()?;
            let rhs = self.binary(next_level)?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        self.depth = base;
        Ok(lhs)
    }

    fn negated(&mut self) -> Result<Expr, PluralError> {
        let base = self.depth;
        self.descend()?;
        let operand = self.unary();
        self.depth = base;
        operand
    }

    fn unary(&mut self) -> Result<Expr, PluralError> {
        match self.advance() {
            Some(Token::Op("!")) => Ok(Expr::Not(Box::new(self.negated()?))),
            Some(Token::Op("-")) => Ok(Expr::Negate(Box::new(self.negated()?))),
            Some(Token::Number(value)) => Ok(Expr::Literal(value)),
            Some(Token::N) => Ok(Expr::N),
            Some(Token::LParen) => {
                let inner = self.conditional()?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }
            Some(token) => Err(PluralError::UnexpectedToken(token.describe())),
            None => Err(PluralError::UnexpectedEnd),
        }
    }
}

const PRECEDENCE: [&[&str]; 6] = [
    &["||"],
    &["&&"],
    &["==", "!="],
    &["<", "<=", ">", ">="],
    &["+", "-"],
    &["*", "/", "%"],
];
