use crate::error::{Error, Kind};
use crate::input::Input;
use crate::number::Decimal;
use crate::options::ParseOptions;
use crate::value::{Map, Position, Value};
use memchr::memchr2;
use nom::{
    branch::alt,
    bytes::complete::{tag, take, take_till, take_while},
    character::complete::{anychar, char},
    combinator::{map, map_opt, map_res, opt, recognize, value, verify},
    sequence::{pair, preceded, separated_pair},
    AsBytes, Err, IResult, InputTake, Slice,
};
use num_bigint::BigInt;

pub type Span<'a> = Input<'a>;

pub type Result<'a, R> = IResult<Span<'a>, R, Error>;
pub type ParseResult = std::result::Result<Value, Error>;

fn failure<T>(start: Position, end: Span, kind: Kind) -> Result<T> {
    Err(Err::Failure(Error::new(start, Position::from(end), kind)))
}

fn end_of_input<T>(i: Span) -> Result<T> {
    Err(Err::Failure(Error::at(Position::from(i), Kind::UnexpectedEnd)))
}

fn is_sp(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

fn sp(i: Span) -> Result<Span> {
    take_while(is_sp)(i)
}

fn is_delimiter(c: char) -> bool {
    is_sp(c) || matches!(c, ',' | ']' | '}')
}

fn take_until_delimiter(i: Span) -> Result<Span> {
    take_till(is_delimiter)(i)
}

// An unexpected end directly inside a container means the container is unterminated.
fn unterminated(e: Err<Error>, start: Position, kind: Kind) -> Err<Error> {
    match e {
        Err::Failure(mut e) if e.kind == Kind::UnexpectedEnd => {
            e.start = start;
            e.kind = kind;
            Err::Failure(e)
        }
        e => e,
    }
}

fn enter(i: Span, options: &ParseOptions, depth: usize) -> std::result::Result<usize, Err<Error>> {
    let depth = depth + 1;

    if depth > options.max_depth {
        return Err(Err::Failure(Error::at(
            Position::from(i),
            Kind::DepthLimitExceeded(options.max_depth),
        )));
    }

    tracing::trace!(depth, offset = i.location().offset, "entering container");

    Ok(depth)
}

fn literal(i: Span) -> Result<Value> {
    let start = Position::from(i);

    let parsed: Result<Value> = alt((
        value(Value::Boolean(true), tag("true")),
        value(Value::Boolean(false), tag("false")),
        value(Value::Null, tag("null")),
    ))(i);

    match parsed {
        Ok((rest, keyword)) if rest.peek().map_or(true, is_delimiter) => Ok((rest, keyword)),
        _ => {
            let (rest, token) = take_until_delimiter(i)?;

            failure(
                start,
                rest,
                Kind::InvalidLiteral(token.fragment().to_owned()),
            )
        }
    }
}

fn u16_hex(i: Span) -> Result<u16> {
    map_res(
        verify(take(4usize), |s: &Span| {
            s.fragment().bytes().all(|b| b.is_ascii_hexdigit())
        }),
        |s: Span| u16::from_str_radix(s.fragment(), 16),
    )(i)
}

fn unicode_escape(i: Span) -> Result<char> {
    map_opt(
        alt((
            // Not a surrogate
            map(verify(u16_hex, |cp: &u16| !(0xD800..0xE000).contains(cp)), |cp| {
                cp as u32
            }),
            // See https://en.wikipedia.org/wiki/UTF-16#Code_points_from_U+010000_to_U+10FFFF for details
            map(
                verify(
                    separated_pair(u16_hex, tag("\\u"), u16_hex),
                    |(high, low): &(u16, u16)| {
                        (0xD800..0xDC00).contains(high) && (0xDC00..0xE000).contains(low)
                    },
                ),
                |(high, low)| {
                    let high_ten = (high as u32) - 0xD800;
                    let low_ten = (low as u32) - 0xDC00;
                    (high_ten << 10) + low_ten + 0x10000
                },
            ),
        )),
        std::char::from_u32,
    )(i)
}

fn string_char(i: Span) -> Result<char> {
    let (rest, c) = anychar(i)?;

    if c != '\\' {
        return Ok((rest, c));
    }

    alt((
        map_opt(anychar, |c: char| match c {
            '"' | '\\' | '/' => Some(c),
            'b' => Some('\x08'),
            'f' => Some('\x0C'),
            'n' => Some('\n'),
            'r' => Some('\r'),
            't' => Some('\t'),
            _ => None,
        }),
        preceded(char('u'), unicode_escape),
    ))(rest)
    .map_err(|_: Err<Error>| {
        Err::Failure(Error::new(
            Position::from(i),
            Position::from(rest),
            Kind::InvalidEscape,
        ))
    })
}

fn unescape(raw: Span) -> std::result::Result<String, Err<Error>> {
    let mut text = String::with_capacity(raw.fragment().len());
    let mut rest = raw;

    while !rest.is_empty() {
        let (next, c) = string_char(rest)?;
        text.push(c);
        rest = next;
    }

    Ok(text)
}

/// Splits `i` (just past an opening quote) into the raw contents and the
/// input after the closing quote.
fn split_closing_quote(i: Span) -> Option<(Span, Span)> {
    let bytes = i.as_bytes();
    let mut from = 0;

    while let Some(found) = bytes.get(from..).and_then(|rest| memchr2(b'"', b'\\', rest)) {
        let at = from + found;

        if bytes[at] == b'"' {
            let (rest, raw) = i.take_split(at);
            return Some((rest.slice(1..), raw));
        }

        // The character after a backslash never closes the string
        from = at + 2;
    }

    None
}

fn string<'a>(i: Span<'a>, options: &ParseOptions) -> Result<'a, String> {
    let start = Position::from(i);

    let (i, _) = char('"')(i)?;

    let Some((rest, raw)) = split_closing_quote(i) else {
        return failure(start, i.end(), Kind::UnterminatedString);
    };

    let text = if options.unescape_strings {
        unescape(raw)?
    } else {
        raw.fragment().to_owned()
    };

    Ok((rest, text))
}

fn number(i: Span) -> Result<Value> {
    let start = Position::from(i);

    let (rest, literal) = recognize(pair(
        opt(char('-')),
        take_while(|c: char| c.is_ascii_digit() || c == '.'),
    ))(i)?;

    let text = literal.fragment();

    let parsed = if text.contains('.') {
        text.parse::<Decimal>().map(Value::Decimal).ok()
    } else {
        text.parse::<BigInt>().map(Value::Integer).ok()
    };

    match parsed {
        Some(number) => Ok((rest, number)),
        None => failure(start, rest, Kind::InvalidNumber(text.to_string())),
    }
}

/// Consumes what stands before an element. `i` is past any whitespace.
fn separator<'a>(
    i: Span<'a>,
    options: &ParseOptions,
    first: bool,
    close: char,
) -> Result<'a, ()> {
    if !options.strict_commas {
        let (i, _) = opt(char(','))(i)?;
        let (i, _) = sp(i)?;

        return Ok((i, ()));
    }

    if first {
        return Ok((i, ()));
    }

    let comma = Position::from(i);

    let Ok((i, _)) = char::<Span, Error>(',')(i) else {
        return failure(comma, i, Kind::MissingComma);
    };

    let (i, _) = sp(i)?;

    if i.starts_with(close) {
        return failure(comma, i, Kind::TrailingComma);
    }

    Ok((i, ()))
}

fn array<'a>(i: Span<'a>, options: &ParseOptions, depth: usize) -> Result<'a, Vec<Value>> {
    let start = Position::from(i);
    let depth = enter(i, options, depth)?;

    let (i, _) = char('[')(i)?;
    let (mut i, _) = sp(i)?;

    let mut items = Vec::new();

    loop {
        if i.is_empty() {
            return failure(start, i, Kind::UnterminatedArray);
        }

        if i.starts_with(']') {
            return Ok((i.slice(1..), items));
        }

        let (rest, _) = separator(i, options, items.is_empty(), ']')?;

        let (rest, item) = json_value(rest, options, depth)
            .map_err(|e| unterminated(e, start, Kind::UnterminatedArray))?;

        items.push(item);

        let (rest, _) = sp(rest)?;
        i = rest;
    }
}

fn key_value<'a>(
    i: Span<'a>,
    options: &ParseOptions,
    depth: usize,
) -> Result<'a, (String, Value)> {
    match i.peek() {
        None => return end_of_input(i),
        Some('"') => (),
        Some(_) => return failure(Position::from(i), i, Kind::MissingKey),
    }

    let (i, key) = string(i, options)?;
    let (i, _) = sp(i)?;

    match i.peek() {
        None => return end_of_input(i),
        Some(':') => (),
        Some(_) => return failure(Position::from(i), i, Kind::MissingKeySeparator),
    }

    let (i, member) = json_value(i.slice(1..), options, depth)?;

    Ok((i, (key, member)))
}

fn object<'a>(i: Span<'a>, options: &ParseOptions, depth: usize) -> Result<'a, Map> {
    let start = Position::from(i);
    let depth = enter(i, options, depth)?;

    let (i, _) = char('{')(i)?;
    let (mut i, _) = sp(i)?;

    let mut entries = Map::new();

    loop {
        if i.is_empty() {
            return failure(start, i, Kind::UnterminatedObject);
        }

        if i.starts_with('}') {
            return Ok((i.slice(1..), entries));
        }

        let (rest, _) = separator(i, options, entries.is_empty(), '}')?;

        let (rest, (key, member)) = key_value(rest, options, depth)
            .map_err(|e| unterminated(e, start, Kind::UnterminatedObject))?;

        // Last occurrence of a key wins
        entries.insert(key, member);

        let (rest, _) = sp(rest)?;
        i = rest;
    }
}

fn json_value<'a>(i: Span<'a>, options: &ParseOptions, depth: usize) -> Result<'a, Value> {
    let (i, _) = sp(i)?;

    let Some(first_char) = i.peek() else {
        return end_of_input(i);
    };

    match first_char {
        '{' => object(i, options, depth).map(|(i, obj)| (i, Value::Object(obj))),
        '[' => array(i, options, depth).map(|(i, array)| (i, Value::Array(array))),
        '"' => string(i, options).map(|(i, str)| (i, Value::Text(str))),
        '-' | '0'..='9' => number(i),
        't' | 'f' | 'n' => literal(i),
        c => failure(Position::from(i), i, Kind::UnexpectedToken(c)),
    }
}

fn end_chars(i: Span, options: &ParseOptions) -> std::result::Result<(), Error> {
    let (rest, _) = unwrap_nom_error(i, sp(i))?;

    if rest.is_empty() {
        return Ok(());
    }

    if options.allow_trailing {
        tracing::debug!(
            offset = rest.location().offset,
            "ignoring content after the root value"
        );

        return Ok(());
    }

    Err(Error::at(
        Position::from(rest),
        Kind::CharsAfterRoot(rest.fragment().to_owned()),
    ))
}

fn unwrap_nom_error<'a, T>(
    i: Span<'a>,
    value: Result<'a, T>,
) -> std::result::Result<(Span<'a>, T), Error> {
    match value {
        Ok(v) => Ok(v),
        Err(Err::Error(e)) | Err(Err::Failure(e)) => Err(e),
        // Only complete parsers are used, so this means the input ran out
        Err(Err::Incomplete(_)) => Err(Error::at(Position::from(i.end()), Kind::UnexpectedEnd)),
    }
}

/// Parses one JSON document with the default [`ParseOptions`].
pub fn parse(s: &str) -> ParseResult {
    parse_with(s, &ParseOptions::default())
}

/// Parses one JSON document.
///
/// Fails on the first malformed construct; no partial tree is returned.
pub fn parse_with(s: &str, options: &ParseOptions) -> ParseResult {
    tracing::debug!(len = s.len(), "parsing document");

    let span = Span::new(s);

    let result = unwrap_nom_error(span, json_value(span, options, 0))
        .and_then(|(rest, root)| end_chars(rest, options).map(|_| root));

    if let Err(e) = &result {
        tracing::debug!(kind = ?e.kind, offset = e.offset(), "parse failed");
    }

    result
}
