use crate::common::*;
use crate::dice::DicePool;
use crate::types::Symbol;
use logos::{Lexer as LogosLexer, Logos};
use logos_iter::{LogosIter, PeekableLexer};
use std::fmt;

pub type Lexer<'a> = PeekableLexer<'a, LogosLexer<'a, TokenKind>, TokenKind>;

pub fn lexer(s: &str) -> Lexer<'_> {
    TokenKind::lexer(s).peekable_lexer()
}

#[derive(Logos, Debug, Clone, PartialEq)]
pub enum TokenKind {
    #[regex(r"[0-9]+", |lex| lex.slice().parse())]
    Integer(Int),

    #[regex(r"[0-9]*d[0-9]+([HL][0-9]+)?", |lex| lex.slice().parse())]
    Dice(DicePool),

    #[regex(r"'[A-Za-z_][A-Za-z0-9_]*", |lex| Symbol::tick(&lex.slice()[1..]))]
    #[regex(r":[A-Za-z_][A-Za-z0-9_]*", |lex| Symbol::colon(&lex.slice()[1..]))]
    Symbol(Symbol),

    #[regex(r"\$[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice()[1..].to_owned())]
    Name(String),

    #[token("true")]
    True,
    #[token("false")]
    False,

    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(":=")]
    ColonEq,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("<")]
    LessThan,
    #[token(">")]
    GreaterThan,
    #[token("=")]
    Equal,
    #[token("and")]
    And,
    #[token("or")]
    Or,

    #[regex(r"#.*", logos::skip)]
    #[regex(r"[ \t\r\n]+", logos::skip)]
    #[error]
    Error,
}

impl TokenKind {
    pub const ARITHMETIC_OPS: &'static [Self] = &[Self::Plus, Self::Minus, Self::Star, Self::Slash];

    pub const CONDITION_OPS: &'static [Self] = &[
        Self::LessThan,
        Self::GreaterThan,
        Self::Equal,
        Self::And,
        Self::Or,
    ];

    pub fn as_str(&self) -> &'static str {
        use TokenKind::*;

        match self {
            Integer(_) => "<integer>",
            Dice(_) => "<dice>",
            Self::Symbol(_) => "<symbol>",
            Name(_) => "<name>",
            True => "'true'",
            False => "'false'",
            LeftParen => "'('",
            RightParen => "')'",
            LeftBrace => "'{'",
            RightBrace => "'}'",
            Comma => "','",
            Colon => "':'",
            ColonEq => "':='",
            Plus => "'+'",
            Minus => "'-'",
            Star => "'*'",
            Slash => "'/'",
            LessThan => "'<'",
            GreaterThan => "'>'",
            Equal => "'='",
            And => "'and'",
            Or => "'or'",
            Error => "<error>",
        }
    }

    pub fn as_binary_op(&self) -> Option<BinaryOperator> {
        use BinaryOperator::*;
        Some(match self {
            Self::Plus => Add,
            Self::Minus => Sub,
            Self::Star => Mul,
            Self::Slash => Div,
            Self::LessThan => Lt,
            Self::GreaterThan => Gt,
            Self::Equal => Eq,
            Self::And => And,
            Self::Or => Or,
            _ => return None,
        })
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
