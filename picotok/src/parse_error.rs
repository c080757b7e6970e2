// SPDX-License-Identifier: Apache-2.0

use crate::scan_buffer::ScanBufferError;

/// Internal consistency failures. Seeing one of these means a cursor or
/// slice computation went wrong, not that the input was bad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnexpectedState {
    /// A computed range fell outside the valid data.
    InvalidSliceBounds,
    /// A reader reported more units than the slice it was given.
    BufferCapacityExceeded,
    /// A cursor was advanced past the end of the buffered data.
    CursorOverrun,
}

/// A rejected construction or setup parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentError {
    /// The scan buffer is smaller than the enforced minimum.
    BufferTooSmall { capacity: usize, minimum: usize },
    /// The refill threshold must be at least 1 and no larger than the buffer.
    InvalidRefillThreshold { threshold: usize, capacity: usize },
    /// No delimiter units were supplied.
    EmptyDelimiters,
    /// `index..index + length` is empty or does not fit the source.
    InvalidRange {
        index: usize,
        length: usize,
        bound: usize,
    },
    /// MATCH_EXACT needs at least as many units as the delimiter has.
    SourceShorterThanDelimiter { available: usize, delimiter: usize },
    /// A MATCH_EXACT delimiter that cannot fit in the scan buffer.
    DelimiterExceedsCapacity { delimiter: usize, capacity: usize },
    /// A child token falls outside a fixed container's span.
    ChildOutOfBounds {
        child_index: usize,
        child_end: usize,
        index: usize,
        end: usize,
    },
}

/// Errors that can occur while tokenizing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Setup or construction was given an invalid parameter. Nothing was
    /// changed.
    InvalidArgument(ArgumentError),
    /// The operation needs input that has not been configured yet.
    NotReady(&'static str),
    /// Reserved for grammars layered on top of tokens. The core only
    /// validates boundaries and never produces this itself.
    Malformed(&'static str),
    /// The tokenizer entered an unexpected internal state.
    Unexpected(UnexpectedState),
}

/// Error from a streaming operation: either our own, or the reader's.
#[derive(Debug, PartialEq)]
pub enum StreamError<E> {
    /// An error raised by the tokenizer itself.
    Parse(ParseError),
    /// The underlying reader failed. The engine state is left as it was, so
    /// the caller may retry or abandon the input.
    Reader(E),
}

impl From<ArgumentError> for ParseError {
    fn from(err: ArgumentError) -> Self {
        ParseError::InvalidArgument(err)
    }
}

impl From<UnexpectedState> for ParseError {
    fn from(info: UnexpectedState) -> Self {
        ParseError::Unexpected(info)
    }
}

impl From<ScanBufferError> for ParseError {
    fn from(err: ScanBufferError) -> Self {
        match err {
            ScanBufferError::EndOfData => ParseError::Unexpected(UnexpectedState::CursorOverrun),
            ScanBufferError::Overfill => {
                ParseError::Unexpected(UnexpectedState::BufferCapacityExceeded)
            }
            ScanBufferError::InvalidSliceBounds => {
                ParseError::Unexpected(UnexpectedState::InvalidSliceBounds)
            }
        }
    }
}

impl<E> From<ParseError> for StreamError<E> {
    fn from(e: ParseError) -> Self {
        StreamError::Parse(e)
    }
}

impl<E> From<ArgumentError> for StreamError<E> {
    fn from(e: ArgumentError) -> Self {
        StreamError::Parse(e.into())
    }
}

impl<E> From<ScanBufferError> for StreamError<E> {
    fn from(e: ScanBufferError) -> Self {
        StreamError::Parse(e.into())
    }
}

impl<E> From<UnexpectedState> for StreamError<E> {
    fn from(e: UnexpectedState) -> Self {
        StreamError::Parse(e.into())
    }
}

impl core::fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ArgumentError::BufferTooSmall { capacity, minimum } => {
                write!(f, "buffer capacity [{capacity}] must be >= {minimum}")
            }
            ArgumentError::InvalidRefillThreshold {
                threshold,
                capacity,
            } => write!(
                f,
                "refill threshold [{threshold}] must be >= 1 and <= buffer capacity [{capacity}]"
            ),
            ArgumentError::EmptyDelimiters => write!(f, "delimiters cannot be empty"),
            ArgumentError::InvalidRange {
                index,
                length,
                bound,
            } => write!(
                f,
                "length [{length}] must be > 0 and (index + length) [{index} + {length}] must be <= source length [{bound}]"
            ),
            ArgumentError::SourceShorterThanDelimiter {
                available,
                delimiter,
            } => write!(
                f,
                "MATCH_EXACT needs at least {delimiter} units of input, only {available} available"
            ),
            ArgumentError::DelimiterExceedsCapacity {
                delimiter,
                capacity,
            } => write!(
                f,
                "delimiter length [{delimiter}] exceeds buffer capacity [{capacity}]"
            ),
            ArgumentError::ChildOutOfBounds {
                child_index,
                child_end,
                index,
                end,
            } => write!(
                f,
                "child span [{child_index}, {child_end}) must lie within container span [{index}, {end})"
            ),
        }
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::InvalidArgument(e) => write!(f, "Invalid argument: {e}"),
            ParseError::NotReady(what) => write!(f, "Not ready: {what}"),
            ParseError::Malformed(what) => write!(f, "Malformed input: {what}"),
            ParseError::Unexpected(info) => write!(f, "Unexpected state: {info:?}"),
        }
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for StreamError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StreamError::Parse(e) => write!(f, "{e}"),
            StreamError::Reader(e) => write!(f, "Reader error: {e:?}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for StreamError<E> {}
