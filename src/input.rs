use bytecount::num_chars;
use memchr::Memchr;
use nom::{
    AsBytes, Compare, Err, InputIter, InputLength, InputTake, InputTakeAtPosition,
    Offset, Slice,
};
use std::{
    ops::{Range, RangeFrom, RangeTo},
    str::{CharIndices, Chars},
};

use crate::value::Position;

/// Parser cursor: the unconsumed rest of the document plus where it starts.
///
/// Every production takes a cursor by value and hands back the advanced one,
/// so the location of any sub-parse is known without shared mutable state.
#[derive(Clone, Debug, Copy)]
pub struct Input<'a> {
    data: &'a str,
    offset: usize,
    line: usize,
    col: usize,
}

impl<'a> Input<'a> {
    pub fn new(data: &'a str) -> Self {
        Self {
            data,
            offset: 0,
            line: 1,
            col: 1,
        }
    }

    pub fn location(&self) -> Position {
        Position {
            offset: self.offset,
            line: self.line,
            col: self.col,
        }
    }

    pub fn fragment(&self) -> &'a str {
        self.data
    }

    pub fn peek(&self) -> Option<char> {
        self.data.chars().next()
    }

    pub fn starts_with(&self, char: char) -> bool {
        self.data.starts_with(char)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Cursor positioned after everything that is left.
    pub fn end(&self) -> Self {
        self.slice(self.data.len()..)
    }
}

impl<'a> From<Input<'a>> for Position {
    fn from(input: Input<'a>) -> Self {
        input.location()
    }
}

impl<'a> AsBytes for Input<'a> {
    fn as_bytes(&self) -> &[u8] {
        self.data.as_bytes()
    }
}

impl<'a, 'b> Compare<&'b str> for Input<'a> {
    fn compare(&self, t: &'b str) -> nom::CompareResult {
        self.data.compare(t)
    }

    fn compare_no_case(&self, t: &'b str) -> nom::CompareResult {
        self.data.compare_no_case(t)
    }
}

impl<'a> InputIter for Input<'a> {
    type Item = char;

    type Iter = CharIndices<'a>;

    type IterElem = Chars<'a>;

    fn iter_indices(&self) -> Self::Iter {
        self.data.iter_indices()
    }

    fn iter_elements(&self) -> Self::IterElem {
        self.data.iter_elements()
    }

    fn position<P>(&self, predicate: P) -> Option<usize>
    where
        P: Fn(Self::Item) -> bool,
    {
        self.data.position(predicate)
    }

    fn slice_index(&self, count: usize) -> Result<usize, nom::Needed> {
        self.data.slice_index(count)
    }
}

impl<'a> InputLength for Input<'a> {
    fn input_len(&self) -> usize {
        self.data.len()
    }
}

impl<'a> InputTake for Input<'a> {
    fn take(&self, count: usize) -> Self {
        self.slice(..count)
    }

    fn take_split(&self, count: usize) -> (Self, Self) {
        (self.slice(count..), self.slice(..count))
    }
}

impl<'a> InputTakeAtPosition for Input<'a> {
    type Item = char;

    fn split_at_position<P, E: nom::error::ParseError<Self>>(
        &self,
        predicate: P,
    ) -> nom::IResult<Self, Self, E>
    where
        P: Fn(Self::Item) -> bool,
    {
        match self.data.position(predicate) {
            Some(n) => Ok(self.take_split(n)),
            None => Err(Err::Incomplete(nom::Needed::new(1))),
        }
    }

    fn split_at_position1<P, E: nom::error::ParseError<Self>>(
        &self,
        predicate: P,
        e: nom::error::ErrorKind,
    ) -> nom::IResult<Self, Self, E>
    where
        P: Fn(Self::Item) -> bool,
    {
        match self.data.position(predicate) {
            Some(0) => Err(Err::Error(E::from_error_kind(*self, e))),
            Some(n) => Ok(self.take_split(n)),
            None => Err(Err::Incomplete(nom::Needed::new(1))),
        }
    }

    fn split_at_position_complete<P, E: nom::error::ParseError<Self>>(
        &self,
        predicate: P,
    ) -> nom::IResult<Self, Self, E>
    where
        P: Fn(Self::Item) -> bool,
    {
        match self.split_at_position(predicate) {
            Err(Err::Incomplete(_)) => Ok(self.take_split(self.input_len())),
            res => res,
        }
    }

    fn split_at_position1_complete<P, E: nom::error::ParseError<Self>>(
        &self,
        predicate: P,
        e: nom::error::ErrorKind,
    ) -> nom::IResult<Self, Self, E>
    where
        P: Fn(Self::Item) -> bool,
    {
        match self.data.position(predicate) {
            Some(0) => Err(Err::Error(E::from_error_kind(*self, e))),
            Some(n) => Ok(self.take_split(n)),
            None => {
                if self.data.is_empty() {
                    Err(Err::Error(E::from_error_kind(*self, e)))
                } else {
                    Ok(self.take_split(self.input_len()))
                }
            }
        }
    }
}

impl<'a> Offset for Input<'a> {
    fn offset(&self, second: &Self) -> usize {
        second.offset - self.offset
    }
}

impl<'a> Input<'a> {
    // `next_data` must be a suffix-or-prefix view that starts inside `self.data`.
    fn advance_to(&self, next_data: &'a str) -> Self {
        let consumed = self.data.offset(next_data);

        if consumed == 0 {
            return Self {
                data: next_data,
                ..*self
            };
        }

        let skipped = &self.data.as_bytes()[..consumed];

        let mut lines_to_add = 0;
        let mut last_newline = None;
        for i in Memchr::new(b'\n', skipped) {
            lines_to_add += 1;
            last_newline = Some(i);
        }
        let line_start = last_newline.map(|v| v + 1).unwrap_or(0);

        let col = num_chars(&skipped[line_start..]);

        Self {
            data: next_data,
            offset: self.offset + consumed,
            line: self.line + lines_to_add,
            col: if lines_to_add == 0 {
                self.col + col
            } else {
                // Columns restart at 1 on a new line
                col + 1
            },
        }
    }
}

impl<'a> Slice<Range<usize>> for Input<'a> {
    fn slice(&self, range: Range<usize>) -> Self {
        self.advance_to(&self.data[range])
    }
}

impl<'a> Slice<RangeTo<usize>> for Input<'a> {
    fn slice(&self, range: RangeTo<usize>) -> Self {
        self.advance_to(&self.data[range])
    }
}

impl<'a> Slice<RangeFrom<usize>> for Input<'a> {
    fn slice(&self, range: RangeFrom<usize>) -> Self {
        self.advance_to(&self.data[range])
    }
}
