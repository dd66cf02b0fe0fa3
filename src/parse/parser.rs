use super::ast::Expression;
use super::lexer::{lexer, parse_dice_lit, Lexer, TokenKind};
use crate::common::{BinaryOperator, Float};
use crate::context::Context;
use logos_iter::LogosIter;
use std::fmt;
use std::ops::Range;
use vec1::{vec1, Vec1};

type PResult<T = Expression> = Result<T, ParseError>;

#[derive(thiserror::Error, Debug, PartialEq)]
#[error("error at position {} ({slice:?}): {kind}", .span.start)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Range<usize>,
    pub slice: String,
}

#[derive(Debug, PartialEq)]
pub enum ParseErrorKind {
    EmptyInput,
    UnexpectedToken {
        found: Option<TokenKind>,
        expected: Vec1<TokenKind>,
    },
    UnexpectedString {
        expected: Vec1<TokenKind>,
    },
    TrailingInput(TokenKind),
    ZeroDice,
    UnknownFunction(String),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "empty dice notation"),
            Self::UnexpectedToken {
                found: Some(found),
                expected,
            } => {
                write!(f, "unexpected token: found {}, expected ", found)?;
                fmt_expected(expected, f)
            }
            Self::UnexpectedToken {
                found: None,
                expected,
            } => {
                write!(f, "unexpected end of input, expected ")?;
                fmt_expected(expected, f)
            }
            Self::UnexpectedString { expected } => {
                write!(f, "expected ")?;
                fmt_expected(expected, f)
            }
            Self::TrailingInput(found) => {
                write!(f, "expected end of input, found {}", found)
            }
            Self::ZeroDice => {
                write!(f, "dice must have a positive count and at least one side")
            }
            Self::UnknownFunction(name) => {
                write!(f, "unknown function '{}'", name)
            }
        }
    }
}

fn fmt_expected(expected: &[TokenKind], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match expected {
        [] => Ok(()),
        [a] => write!(f, "{}", a),
        [a, b] => write!(f, "{} or {}", a, b),
        [init @ .., last] => {
            for exp in init {
                write!(f, "{}, ", exp)?;
            }
            write!(f, "or {}", last)
        }
    }
}

pub struct Parser<'a, 'ctx> {
    lexer: Lexer<'a>,
    ctx: &'ctx Context,
}

impl<'a, 'ctx> Parser<'a, 'ctx> {
    const ADDITION_OPS: &'static [TokenKind] = &[TokenKind::Plus, TokenKind::Minus];

    const MULTIPLICATION_OPS: &'static [TokenKind] =
        &[TokenKind::Star, TokenKind::Slash, TokenKind::Percent];

    const EXTENDED_DIVIDE_OPS: &'static [TokenKind] = &[
        TokenKind::SlashSlash,
        TokenKind::SlashTilde,
        TokenKind::SlashPlus,
        TokenKind::SlashMinus,
    ];

    const UNARY_PREFIX_OPS: &'static [TokenKind] = &[TokenKind::Plus, TokenKind::Minus];

    pub fn new(s: &'a str, ctx: &'ctx Context) -> Self {
        Self {
            lexer: lexer(s),
            ctx,
        }
    }

    pub fn parse(mut self) -> PResult {
        if self.lexer.peek().is_none() {
            return self.error(ParseErrorKind::EmptyInput);
        }
        let expr = self.parse_expression()?;
        match self.lexer.next() {
            None => Ok(expr),
            Some(TokenKind::ErrZeroDice) => self.error(ParseErrorKind::ZeroDice),
            Some(found) => self.error(ParseErrorKind::TrailingInput(found)),
        }
    }

    fn advance(&mut self) -> Option<TokenKind> {
        self.lexer.next()
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        self.lexer.peek().map_or(false, |&peeked| peeked == kind)
    }

    fn matches_any(&mut self, options: &[TokenKind]) -> bool {
        self.lexer
            .peek()
            .map_or(false, |peeked| options.contains(peeked))
    }

    fn consume(&mut self, expected: TokenKind) -> PResult<()> {
        if self.matches(expected) {
            self.lexer.next();
            Ok(())
        } else {
            self.unexpected_token(vec1![expected])
        }
    }

    fn consume_as<T: std::str::FromStr>(
        &mut self,
        expected: TokenKind,
    ) -> PResult<Result<T, T::Err>> {
        self.consume(expected)?;
        Ok(self.lexer.slice().parse())
    }

    fn error<T>(&mut self, kind: ParseErrorKind) -> PResult<T> {
        Err(ParseError {
            kind,
            span: self.lexer.span(),
            slice: self.lexer.slice().to_string(),
        })
    }

    fn unexpected_token<T>(&mut self, expected: Vec1<TokenKind>) -> PResult<T> {
        match self.lexer.next() {
            Some(TokenKind::ErrZeroDice) => self.error(ParseErrorKind::ZeroDice),
            Some(TokenKind::Error) => self.error(ParseErrorKind::UnexpectedString { expected }),
            found => self.error(ParseErrorKind::UnexpectedToken { found, expected }),
        }
    }

    fn resolve_call(&mut self, name: &str, args: Vec<Expression>) -> PResult {
        match self.ctx.resolve_function(name) {
            Some(function) => Ok(Expression::call(name, function, args)),
            None => self.error(ParseErrorKind::UnknownFunction(name.to_string())),
        }
    }

    fn parse_expression(&mut self) -> PResult {
        self.parse_addition()
    }

    fn parse_addition(&mut self) -> PResult {
        let mut lhs = self.parse_multiplication()?;

        while self.matches_any(Self::ADDITION_OPS) {
            let op = self.advance().unwrap().as_binary_op().unwrap();
            let rhs = self.parse_multiplication()?;
            lhs = Expression::binary(op, lhs, rhs);
        }

        Ok(lhs)
    }

    fn parse_multiplication(&mut self) -> PResult {
        let mut lhs = self.parse_extended_divide()?;

        while self.matches_any(Self::MULTIPLICATION_OPS) {
            let op = self.advance().unwrap().as_binary_op().unwrap();
            let rhs = self.parse_extended_divide()?;
            lhs = Expression::binary(op, lhs, rhs);
        }

        Ok(lhs)
    }

    // `l // r` and friends are sugar for the rounding built-ins over a
    // plain division
    fn parse_extended_divide(&mut self) -> PResult {
        let mut lhs = self.parse_unary_prefix()?;

        while self.matches_any(Self::EXTENDED_DIVIDE_OPS) {
            let name = self.advance().unwrap().rounding_function().unwrap();
            let rhs = self.parse_unary_prefix()?;
            let quotient = Expression::binary(BinaryOperator::Div, lhs, rhs);
            lhs = self.resolve_call(name, vec![quotient])?;
        }

        Ok(lhs)
    }

    fn parse_unary_prefix(&mut self) -> PResult {
        if self.matches_any(Self::UNARY_PREFIX_OPS) {
            let op = self.advance().unwrap().as_unary_op().unwrap();
            let operand = self.parse_unary_prefix()?;
            Ok(Expression::unary(op, operand))
        } else {
            self.parse_primary()
        }
    }

    fn parse_primary(&mut self) -> PResult {
        match self.lexer.peek().copied() {
            Some(TokenKind::Integer) => self.parse_integer(),
            Some(TokenKind::Die | TokenKind::Roll) => self.parse_dice(),
            Some(TokenKind::Name) => self.parse_function_call(),
            Some(TokenKind::LeftParen) => self.parse_group(),
            Some(TokenKind::LeftBracket) => self.parse_array(),
            _ => self.unexpected_token(vec1![
                TokenKind::Integer,
                TokenKind::Die,
                TokenKind::Roll,
                TokenKind::Name,
                TokenKind::LeftParen,
                TokenKind::LeftBracket,
            ]),
        }
    }

    fn parse_integer(&mut self) -> PResult {
        let x = self.consume_as::<Float>(TokenKind::Integer)?.unwrap();
        Ok(Expression::Constant(x))
    }

    fn parse_dice(&mut self) -> PResult {
        self.advance();
        let lit = parse_dice_lit(self.lexer.slice());
        let die = Expression::Die(self.ctx.bag().die(lit.sides));

        let count = match lit.count {
            None => return Ok(die),
            Some(count) => count,
        };

        let roll = self.resolve_call("roll", vec![Expression::Constant(count as Float), die])?;
        let rolls = match lit.modifier {
            None => roll,
            Some(modifier) => self.resolve_call(
                modifier.function_name(),
                vec![roll, Expression::Constant(modifier.count as Float)],
            )?,
        };
        self.resolve_call("sum", vec![rolls])
    }

    fn parse_function_call(&mut self) -> PResult {
        self.advance();
        let name = self.lexer.slice().to_string();
        // resolution happens before the arguments so an unknown name is
        // reported at the name itself
        let function = match self.ctx.resolve_function(&name) {
            Some(function) => function,
            None => return self.error(ParseErrorKind::UnknownFunction(name)),
        };

        self.consume(TokenKind::LeftParen)?;
        let mut args = Vec::new();
        if !self.matches(TokenKind::RightParen) {
            loop {
                args.push(self.parse_expression()?);
                if self.matches(TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.consume(TokenKind::RightParen)?;

        Ok(Expression::call(name, function, args))
    }

    fn parse_group(&mut self) -> PResult {
        self.consume(TokenKind::LeftParen)?;
        let inner = self.parse_expression()?;
        self.consume(TokenKind::RightParen)?;
        Ok(Expression::group(inner))
    }

    fn parse_array(&mut self) -> PResult {
        self.consume(TokenKind::LeftBracket)?;
        let mut items = Vec::new();
        if !self.matches(TokenKind::RightBracket) {
            loop {
                items.push(self.parse_expression()?);
                if self.matches(TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.consume(TokenKind::RightBracket)?;
        Ok(Expression::Array(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{BinaryOperator::*, UnaryOperator::*};
    use crate::functions::Function;
    use crate::value::Value;

    fn parse(s: &str) -> PResult {
        let ctx = Context::default();
        Parser::new(s, &ctx).parse()
    }

    fn check(s: &str, expected: Expression) {
        assert_eq!(parse(s).unwrap(), expected);
    }

    fn int(x: i64) -> Expression {
        Expression::Constant(x as Float)
    }

    fn die(sides: u32) -> Expression {
        // equality on dice compares side counts, so any bag will do
        Expression::Die(crate::DiceBag::default().d(sides).unwrap())
    }

    fn call(name: &str, args: Vec<Expression>) -> Expression {
        Expression::call(name, Function::new(|_| Ok(Value::Number(0.0))), args)
    }

    fn dice_roll(count: i64, sides: u32) -> Expression {
        call("sum", vec![call("roll", vec![int(count), die(sides)])])
    }

    #[test]
    fn test_parse_integer() {
        check("32", int(32));
        check("0", int(0));
    }

    #[test]
    fn test_parse_die() {
        check("d8", die(8));
        check("d%", die(100));
    }

    #[test]
    fn test_parse_dice_roll() {
        check("3d8", dice_roll(3, 8));
        check("2d%", dice_roll(2, 100));
    }

    #[test]
    fn test_parse_roll_modifiers() {
        check(
            "4d6-L",
            call(
                "sum",
                vec![call(
                    "dropLowestRolls",
                    vec![call("roll", vec![int(4), die(6)]), int(1)],
                )],
            ),
        );
        check(
            "4d6+2H",
            call(
                "sum",
                vec![call(
                    "cloneHighestRolls",
                    vec![call("roll", vec![int(4), die(6)]), int(2)],
                )],
            ),
        );
    }

    #[test]
    fn test_addition_binds_looser_than_multiplication() {
        check(
            "3*1+1*3",
            Expression::binary(
                Add,
                Expression::binary(Mul, int(3), int(1)),
                Expression::binary(Mul, int(1), int(3)),
            ),
        );
    }

    #[test]
    fn test_left_associativity() {
        check(
            "1-2-3",
            Expression::binary(Sub, Expression::binary(Sub, int(1), int(2)), int(3)),
        );
        check(
            "8/4/2",
            Expression::binary(Div, Expression::binary(Div, int(8), int(4)), int(2)),
        );
    }

    #[test]
    fn test_extended_divide_desugars() {
        check("1//2", call("trunc", vec![Expression::binary(Div, int(1), int(2))]));
        check("1/~2", call("round", vec![Expression::binary(Div, int(1), int(2))]));
        check("1/+2", call("ceil", vec![Expression::binary(Div, int(1), int(2))]));
        check("1/-2", call("floor", vec![Expression::binary(Div, int(1), int(2))]));
    }

    #[test]
    fn test_extended_divide_needs_contiguous_token() {
        check(
            "1/ -2",
            Expression::binary(Div, int(1), Expression::unary(Neg, int(2))),
        );
    }

    #[test]
    fn test_extended_divide_binds_tighter_than_multiplication() {
        check(
            "1//2*3",
            Expression::binary(
                Mul,
                call("trunc", vec![Expression::binary(Div, int(1), int(2))]),
                int(3),
            ),
        );
    }

    #[test]
    fn test_parse_unary() {
        check("-2", Expression::unary(Neg, int(2)));
        check("+2", Expression::unary(Pos, int(2)));
        check("--2", Expression::unary(Neg, Expression::unary(Neg, int(2))));
        check("-3d4", Expression::unary(Neg, dice_roll(3, 4)));
    }

    #[test]
    fn test_parse_group() {
        check(
            "(1 + 2) * 3",
            Expression::binary(
                Mul,
                Expression::group(Expression::binary(Add, int(1), int(2))),
                int(3),
            ),
        );
    }

    #[test]
    fn test_parse_array() {
        check("[1, 2, 3]", Expression::Array(vec![int(1), int(2), int(3)]));
        check("[]", Expression::Array(vec![]));
        check("[2d6]", Expression::Array(vec![dice_roll(2, 6)]));
    }

    #[test]
    fn test_parse_function_call() {
        check("sum([1, 2])", call("sum", vec![Expression::Array(vec![int(1), int(2)])]));
        check("floor(ceil(1))", call("floor", vec![call("ceil", vec![int(1)])]));
        check(
            "roll(3, d8)",
            call("roll", vec![int(3), die(8)]),
        );
    }

    #[test]
    fn test_user_functions_resolve() {
        let mut ctx = Context::default();
        ctx.functions_mut()
            .insert("double", Function::new(|_| Ok(Value::Number(0.0))));
        let parsed = Parser::new("double(2)", &ctx).parse().unwrap();
        assert_eq!(parsed, call("double", vec![int(2)]));
    }

    #[test]
    fn test_unknown_function_is_a_parse_error() {
        let err = parse("nope(1)").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnknownFunction("nope".into()));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse("").unwrap_err().kind, ParseErrorKind::EmptyInput);
        assert_eq!(parse("   ").unwrap_err().kind, ParseErrorKind::EmptyInput);
    }

    #[test]
    fn test_invalid_input() {
        let err = parse("<<INVALID>>").unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::UnexpectedString { .. }));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_trailing_input() {
        let err = parse("1 2").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::TrailingInput(TokenKind::Integer));
    }

    #[test]
    fn test_zero_dice() {
        assert_eq!(parse("0d6").unwrap_err().kind, ParseErrorKind::ZeroDice);
        assert_eq!(parse("d0").unwrap_err().kind, ParseErrorKind::ZeroDice);
        assert_eq!(parse("1 + 3d0").unwrap_err().kind, ParseErrorKind::ZeroDice);
    }

    #[test]
    fn test_unclosed_group() {
        let err = parse("(1").unwrap_err();
        assert!(matches!(
            err.kind,
            ParseErrorKind::UnexpectedToken { found: None, .. }
        ));
    }
}
