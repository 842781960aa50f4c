pub mod ast;
mod error;
mod lexer;
mod parser;

pub use error::{ParseError, ParseErrorKind};
pub use lexer::TokenKind;

/// Parses one statement, with every operator chain already normalized.
pub fn parse(s: &str) -> Result<ast::Statement, ParseError> {
    parser::Parser::new(s).parse()
}
