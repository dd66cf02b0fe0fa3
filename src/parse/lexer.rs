use crate::common::{BinaryOperator, NonZeroUInt, UInt, UnaryOperator, PERCENTILE_SIDES};
use logos::{Lexer as LogosLexer, Logos};
use logos_iter::{LogosIter, PeekableLexer};
use std::fmt;

pub type Lexer<'a> = PeekableLexer<'a, LogosLexer<'a, TokenKind>, TokenKind>;

pub fn lexer(s: &str) -> Lexer {
    TokenKind::lexer(s).peekable_lexer()
}

#[derive(Logos, Debug, Copy, Clone, Eq, PartialEq)]
pub enum TokenKind {
    #[regex(r"[0-9]+")]
    Integer,

    // a bare die literal: d6, d%
    #[regex(r"d(%|[1-9][0-9]*)", priority = 3)]
    Die,
    // a dice-roll literal with an optional contiguous modifier: 3d6, 4d6-L, 4d6+2H
    #[regex(r"[1-9][0-9]*d(%|[1-9][0-9]*)([+-][0-9]*[HL])?", priority = 3)]
    Roll,

    #[regex(r"[a-zA-Z][a-zA-Z0-9]*")]
    Name,

    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token(",")]
    Comma,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("//")]
    SlashSlash,
    #[token("/~")]
    SlashTilde,
    #[token("/+")]
    SlashPlus,
    #[token("/-")]
    SlashMinus,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,

    #[regex(r"0[0-9]*d(%|[0-9]+)([+-][0-9]*[HL])?", priority = 4)]
    #[regex(r"[0-9]*d0[0-9]*", priority = 3)]
    ErrZeroDice,

    #[regex(r"[ \t\r\n]+", logos::skip)]
    #[error]
    Error,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        use TokenKind::*;

        match self {
            Integer => "<integer>",
            Die => "<die>",
            Roll => "<dice roll>",
            Name => "<name>",
            LeftParen => "'('",
            RightParen => "')'",
            LeftBracket => "'['",
            RightBracket => "']'",
            Comma => "','",
            Plus => "'+'",
            Minus => "'-'",
            Star => "'*'",
            SlashSlash => "'//'",
            SlashTilde => "'/~'",
            SlashPlus => "'/+'",
            SlashMinus => "'/-'",
            Slash => "'/'",
            Percent => "'%'",
            ErrZeroDice | Error => "<error>",
        }
    }

    pub fn as_unary_op(&self) -> Option<UnaryOperator> {
        use UnaryOperator::*;
        Some(match self {
            Self::Plus => Pos,
            Self::Minus => Neg,
            _ => return None,
        })
    }

    pub fn as_binary_op(&self) -> Option<BinaryOperator> {
        use BinaryOperator::*;
        Some(match self {
            Self::Plus => Add,
            Self::Minus => Sub,
            Self::Star => Mul,
            Self::Slash => Div,
            Self::Percent => Mod,
            _ => return None,
        })
    }

    /// The rounding built-in an extended divide operator stands for.
    pub fn rounding_function(&self) -> Option<&'static str> {
        Some(match self {
            Self::SlashSlash => "trunc",
            Self::SlashTilde => "round",
            Self::SlashPlus => "ceil",
            Self::SlashMinus => "floor",
            _ => return None,
        })
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DiceLit {
    pub count: Option<UInt>,
    pub sides: NonZeroUInt,
    pub modifier: Option<ModifierLit>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ModifierLit {
    pub op: ModifierOp,
    pub count: UInt,
    pub target: ModifierTarget,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ModifierOp {
    Clone,
    Drop,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ModifierTarget {
    Highest,
    Lowest,
}

impl ModifierLit {
    pub(crate) fn function_name(self) -> &'static str {
        match (self.op, self.target) {
            (ModifierOp::Clone, ModifierTarget::Highest) => "cloneHighestRolls",
            (ModifierOp::Clone, ModifierTarget::Lowest) => "cloneLowestRolls",
            (ModifierOp::Drop, ModifierTarget::Highest) => "dropHighestRolls",
            (ModifierOp::Drop, ModifierTarget::Lowest) => "dropLowestRolls",
        }
    }
}

// `unwrap` is fine here: the lexer only hands over slices matching the
// `Die` / `Roll` regexes
pub(crate) fn parse_dice_lit(s: &str) -> DiceLit {
    let (count, rest) = s.split_once('d').unwrap();
    let count = if count.is_empty() {
        None
    } else {
        Some(count.parse().unwrap())
    };
    let (sides, modifier) = match rest.find(&['+', '-'][..]) {
        Some(at) => (&rest[..at], Some(parse_modifier(&rest[at..]))),
        None => (rest, None),
    };
    let sides = if sides == "%" {
        PERCENTILE_SIDES
    } else {
        sides.parse().unwrap()
    };
    DiceLit {
        count,
        sides: NonZeroUInt::new(sides).unwrap(),
        modifier,
    }
}

fn parse_modifier(s: &str) -> ModifierLit {
    let op = match &s[..1] {
        "+" => ModifierOp::Clone,
        _ => ModifierOp::Drop,
    };
    let target = match &s[s.len() - 1..] {
        "H" => ModifierTarget::Highest,
        _ => ModifierTarget::Lowest,
    };
    let digits = &s[1..s.len() - 1];
    let count = if digits.is_empty() {
        1
    } else {
        digits.parse().unwrap()
    };
    ModifierLit { op, count, target }
}
