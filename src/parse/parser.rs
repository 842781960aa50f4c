use super::ast::*;
use super::error::{ParseError, ParseErrorKind};
use super::lexer::*;
use crate::common::{BinaryOperator, NonEmpty};
use crate::types::{Mark, Symbol};
use logos::Logos;
use logos_iter::LogosIter;

type PResult<T> = Result<T, ParseError>;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    src: &'a str,
}

impl<'a> Parser<'a> {
    const ATOM_START: &'static [&'static str] = &[
        "<integer>",
        "<dice>",
        "<symbol>",
        "<name>",
        "'true'",
        "'false'",
        "'('",
        "'{'",
    ];

    const COMPONENT_START: &'static [&'static str] = &["<integer>", "'true'", "'false'"];

    pub fn new(s: &'a str) -> Self {
        Self {
            lexer: lexer(s),
            src: s,
        }
    }

    pub fn parse(mut self) -> PResult<Statement> {
        let statement = match self.definition_name() {
            Some(name) => {
                self.advance();
                self.advance();
                Statement::Definition(name, self.parse_condition()?)
            }
            None => Statement::Expression(self.parse_condition()?),
        };
        self.expect_end()?;
        Ok(statement)
    }

    /// The name being defined if the input opens with `$name :=`.
    fn definition_name(&self) -> Option<String> {
        let mut ahead = TokenKind::lexer(self.src);
        match (ahead.next(), ahead.next()) {
            (Some(TokenKind::Name(name)), Some(TokenKind::ColonEq)) => Some(name),
            _ => None,
        }
    }

    fn advance(&mut self) -> Option<TokenKind> {
        self.lexer.next()
    }

    fn matches(&mut self, kind: &TokenKind) -> bool {
        self.lexer.peek() == Some(kind)
    }

    fn peek_op(&mut self, options: &[TokenKind]) -> Option<BinaryOperator> {
        self.lexer
            .peek()
            .filter(|peeked| options.contains(peeked))
            .and_then(TokenKind::as_binary_op)
    }

    fn consume(&mut self, expected: TokenKind) -> PResult<()> {
        if self.matches(&expected) {
            self.advance();
            Ok(())
        } else {
            self.unexpected_token(vec![expected.as_str()])
        }
    }

    fn expect_end(&mut self) -> PResult<()> {
        if self.lexer.peek().is_none() {
            Ok(())
        } else {
            self.unexpected_token(vec!["an operator", "end of input"])
        }
    }

    fn error<T>(&mut self, kind: ParseErrorKind) -> PResult<T> {
        Err(ParseError {
            kind,
            span: self.lexer.span(),
            slice: self.lexer.slice().to_string(),
        })
    }

    fn unexpected_token<T>(&mut self, expected: Vec<&'static str>) -> PResult<T> {
        let found = self.advance();
        self.unexpected(found, expected)
    }

    /// Reports `found`, which has already been consumed.
    fn unexpected<T>(&mut self, found: Option<TokenKind>, expected: Vec<&'static str>) -> PResult<T> {
        match found {
            None => Err(ParseError {
                kind: ParseErrorKind::UnexpectedEnd { expected },
                span: self.src.len()..self.src.len(),
                slice: String::new(),
            }),
            Some(TokenKind::Error) => self.error(ParseErrorKind::LexError),
            Some(found) => self.error(ParseErrorKind::UnexpectedToken { found, expected }),
        }
    }

    fn parse_condition(&mut self) -> PResult<Condition> {
        Ok(self.parse_condition_chain()?.normalize())
    }

    fn parse_condition_chain(&mut self) -> PResult<Condition> {
        let lhs = Condition::Term(self.parse_term()?);

        match self.peek_op(TokenKind::CONDITION_OPS) {
            Some(op) => {
                self.advance();
                let rhs = self.parse_condition_chain()?;
                Ok(Condition::Binary(Box::new(lhs), op, Box::new(rhs)))
            }
            None => Ok(lhs),
        }
    }

    fn parse_term(&mut self) -> PResult<Term> {
        Ok(self.parse_term_chain()?.normalize())
    }

    fn parse_term_chain(&mut self) -> PResult<Term> {
        let lhs = Term::Atom(self.parse_atom()?);

        match self.peek_op(TokenKind::ARITHMETIC_OPS) {
            Some(op) => {
                self.advance();
                let rhs = self.parse_term_chain()?;
                Ok(Term::Binary(Box::new(lhs), op, Box::new(rhs)))
            }
            None => Ok(lhs),
        }
    }

    fn parse_atom(&mut self) -> PResult<Atom> {
        Ok(match self.advance() {
            Some(TokenKind::Integer(x)) => Atom::Integer(x),
            Some(TokenKind::Dice(dice)) => Atom::Dice(dice),
            Some(TokenKind::Symbol(symbol)) => Atom::Symbol(symbol),
            Some(TokenKind::Name(name)) => Atom::Name(name),
            Some(TokenKind::True) => Atom::Boolean(true),
            Some(TokenKind::False) => Atom::Boolean(false),
            Some(TokenKind::LeftParen) => {
                let inner = self.parse_condition()?;
                self.consume(TokenKind::RightParen)?;
                Atom::Group(Box::new(inner))
            }
            Some(TokenKind::LeftBrace) => {
                let mut items = NonEmpty::new(self.parse_component()?);
                while self.matches(&TokenKind::Comma) {
                    self.advance();
                    items.push(self.parse_component()?);
                }
                self.consume(TokenKind::RightBrace)?;
                Atom::Vector(items)
            }
            found => return self.unexpected(found, Self::ATOM_START.to_vec()),
        })
    }

    fn parse_component(&mut self) -> PResult<(Symbol, Literal)> {
        let symbol = match self.advance() {
            Some(TokenKind::Symbol(symbol)) => symbol,
            found => return self.unexpected(found, vec!["<symbol>"]),
        };
        let value = match self.advance() {
            Some(TokenKind::Colon) => match self.advance() {
                Some(TokenKind::Integer(x)) => Literal::Integer(x),
                Some(TokenKind::True) => Literal::Boolean(true),
                Some(TokenKind::False) => Literal::Boolean(false),
                found => return self.unexpected(found, Self::COMPONENT_START.to_vec()),
            },
            // `'a:true` lexes its tail as the symbol `:true`.
            Some(TokenKind::Symbol(tail))
                if tail.mark() == Mark::Colon && matches!(tail.name(), "true" | "false") =>
            {
                Literal::Boolean(tail.name() == "true")
            }
            found => return self.unexpected(found, vec!["':'"]),
        };
        Ok((symbol, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> PResult<Statement> {
        Parser::new(s).parse()
    }

    fn check(s: &str, expected: &str) {
        let parsed = parse(s).unwrap();
        assert_eq!(parsed.to_string(), expected);
    }

    fn check_err(s: &str, kind: ParseErrorKind, span: std::ops::Range<usize>) {
        let err = parse(s).unwrap_err();
        assert_eq!(err.kind, kind, "{}", err);
        assert_eq!(err.span, span);
    }

    #[test]
    fn test_parse_atoms() {
        check("32", "32");
        check("3d6", "3d6");
        check("d20", "1d20");
        check("4d6H3", "4d6H3");
        check("true", "true");
        check("'heads", "'heads");
        check(":tails", ":tails");
        check("$atk", "$atk");
        check("{'a: 1, 'b: true}", "{'a: 1, 'b: true}");
    }

    #[test]
    fn test_parse_left_associative() {
        check("1 - 2 + 3", "((1 - 2) + 3)");
        check("8 / 4 / 2", "((8 / 4) / 2)");
        check("true and false or true", "((true and false) or true)");
    }

    #[test]
    fn test_parse_precedence() {
        check("1 + 2 * 3", "(1 + (2 * 3))");
        check("1 * 2 + 3 * 4", "((1 * 2) + (3 * 4))");
        check("2d6 + 1 > 6", "((2d6 + 1) > 6)");
        check(
            "d6 < 4 and d6 > 2 or false",
            "(((1d6 < 4) and (1d6 > 2)) or false)",
        );
        check("1 < 2 = 3 > 4", "((1 < 2) = (3 > 4))");
    }

    #[test]
    fn test_parse_groups() {
        check("(1 + 2) * 3", "([(1 + 2)] * 3)");
        check("1 - (2 - 3)", "(1 - [(2 - 3)])");
        check("(1 < 2) = true", "([(1 < 2)] = true)");
    }

    #[test]
    fn test_parse_definition() {
        check("$x := 3d6", "$x := 3d6");
        check("$x:=1 + 2 * 3", "$x := (1 + (2 * 3))");
        check("$x * 2", "($x * 2)");
        check("$atk > 15", "($atk > 15)");
        check("$x := $x + 1", "$x := ($x + 1)");
        check_err(
            "1 := 2",
            ParseErrorKind::UnexpectedToken {
                found: TokenKind::ColonEq,
                expected: vec!["an operator", "end of input"],
            },
            2..4,
        );
    }

    #[test]
    fn test_parse_unspaced_components() {
        check("{'a:true, :b:false}", "{'a: true, :b: false}");
        check("{'a:1}", "{'a: 1}");
        check_err(
            "{'a:b}",
            ParseErrorKind::UnexpectedToken {
                found: TokenKind::Symbol(Symbol::colon("b")),
                expected: vec!["':'"],
            },
            3..5,
        );
    }

    #[test]
    fn test_parse_errors() {
        check_err(
            "1 +",
            ParseErrorKind::UnexpectedEnd {
                expected: Parser::ATOM_START.to_vec(),
            },
            3..3,
        );
        check_err(
            "1 + )",
            ParseErrorKind::UnexpectedToken {
                found: TokenKind::RightParen,
                expected: Parser::ATOM_START.to_vec(),
            },
            4..5,
        );
        check_err(
            "(1",
            ParseErrorKind::UnexpectedEnd {
                expected: vec!["')'"],
            },
            2..2,
        );
        check_err(
            "1 2",
            ParseErrorKind::UnexpectedToken {
                found: TokenKind::Integer(2),
                expected: vec!["an operator", "end of input"],
            },
            2..3,
        );
        check_err("1 % 2", ParseErrorKind::LexError, 2..3);
        check_err(
            "{}",
            ParseErrorKind::UnexpectedToken {
                found: TokenKind::RightBrace,
                expected: vec!["<symbol>"],
            },
            1..2,
        );
        check_err(
            "{'a: 'b}",
            ParseErrorKind::UnexpectedToken {
                found: TokenKind::Symbol(Symbol::tick("b")),
                expected: Parser::COMPONENT_START.to_vec(),
            },
            5..7,
        );
    }
}
