use crate::{parser::Span, value::Position};
use nom::error::{ErrorKind, FromExternalError, ParseError};
use std::fmt::{self, Display};

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Kind {
    /// The character matches no grammar production.
    UnexpectedToken(char),
    /// The input ended where a value was expected.
    UnexpectedEnd,
    UnterminatedObject,
    UnterminatedArray,
    UnterminatedString,
    /// A token starting like `true`, `false` or `null` that is not one of them.
    InvalidLiteral(String),
    /// Numeric text that is not a valid integer or decimal.
    InvalidNumber(String),
    MissingKey,
    MissingKeySeparator,
    MissingComma,
    TrailingComma,
    InvalidEscape,
    DepthLimitExceeded(usize),
    CharsAfterRoot(String),
    NomError(ErrorKind),
}

impl Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken(c) => write!(f, "unexpected character '{}'", c),
            Self::UnexpectedEnd => write!(f, "unexpected end of input"),
            Self::UnterminatedObject => write!(f, "object is missing its closing '}}'"),
            Self::UnterminatedArray => write!(f, "array is missing its closing ']'"),
            Self::UnterminatedString => write!(f, "string is missing its closing '\"'"),
            Self::InvalidLiteral(token) => write!(f, "invalid literal '{}'", token),
            Self::InvalidNumber(token) => write!(f, "invalid number '{}'", token),
            Self::MissingKey => write!(f, "expected a quoted object key"),
            Self::MissingKeySeparator => write!(f, "expected ':' after object key"),
            Self::MissingComma => write!(f, "expected ',' between elements"),
            Self::TrailingComma => write!(f, "trailing ',' before closing delimiter"),
            Self::InvalidEscape => write!(f, "invalid escape sequence"),
            Self::DepthLimitExceeded(max) => write!(f, "nesting deeper than {} levels", max),
            Self::CharsAfterRoot(rest) => write!(f, "unexpected characters at the end: {}", rest),
            Self::NomError(kind) => write!(f, "syntax error ({})", kind.description()),
        }
    }
}

/// A failed parse.
///
/// `end` is where the problem was detected; `start` is where the offending
/// construct begins (the opening delimiter of an unterminated container, the
/// first character of a bad token). Both are the same for single-character
/// errors.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Error {
    pub start: Position,
    pub end: Position,
    pub kind: Kind,
}

impl Error {
    pub fn new(start: Position, end: Position, kind: Kind) -> Self {
        Self { start, end, kind }
    }

    pub fn at(position: Position, kind: Kind) -> Self {
        Self::new(position, position, kind)
    }

    /// Byte offset at which the error was detected.
    pub fn offset(&self) -> usize {
        self.end.offset
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.end)?;

        if self.start != self.end {
            write!(f, " (starting at {})", self.start)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {}

impl<'a> ParseError<Span<'a>> for Error {
    fn from_error_kind(input: Span<'a>, kind: ErrorKind) -> Self {
        Self::at(Position::from(input), Kind::NomError(kind))
    }

    fn append(_input: Span<'a>, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<'a, T> FromExternalError<Span<'a>, T> for Error {
    fn from_external_error(input: Span<'a>, kind: ErrorKind, _e: T) -> Self {
        Self::at(Position::from(input), Kind::NomError(kind))
    }
}
