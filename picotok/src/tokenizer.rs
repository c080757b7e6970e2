// SPDX-License-Identifier: Apache-2.0

//! Bounded tokenizer over fully resident input.
//!
//! The whole configured range `[index, index + length)` is the scan window
//! for the life of the source, so there is no refill: a token that reaches
//! the end of the range without a delimiter is simply the last token.

use crate::matcher::{DelimiterMode, Delimiters, ScanOutcome};
use crate::parse_error::{ArgumentError, ParseError};
use crate::shared::PullTokenizer;
use crate::token::{SliceHandle, SliceToken, Token, TokenHandle, TokenPolicy};

/// Splits a slice into tokens.
///
/// # Example
///
/// ```rust
/// use picotok::{Delimiters, Tokenizer, Valued};
///
/// let mut tokenizer = Tokenizer::new();
/// tokenizer
///     .set_source(b"a::b::c", 0, 7, Delimiters::exact(b"::"))
///     .unwrap();
///
/// let mut values = Vec::new();
/// while let Some(token) = tokenizer.next_token().unwrap() {
///     values.push(token.value().to_vec());
/// }
/// assert_eq!(values, [b"a", b"b", b"c"]);
/// ```
#[derive(Debug)]
pub struct Tokenizer<'s, U = u8> {
    source: &'s [U],
    index: usize,
    length: usize,
    /// Exclusive end of the configured range.
    end_index: usize,
    /// Next unscanned position.
    cursor: usize,
    delimiters: Option<Delimiters<'s, U>>,
    more_tokens: bool,
    policy: TokenPolicy,
    reusable: SliceToken<'s, U>,
    generation: u64,
}

impl<'s, U: Copy + PartialEq> Tokenizer<'s, U> {
    /// A tokenizer that hands out fresh tokens.
    pub fn new() -> Self {
        Self::with_policy(TokenPolicy::Fresh)
    }

    pub fn with_policy(policy: TokenPolicy) -> Self {
        let empty: &'s [U] = &[];
        Self {
            source: empty,
            index: 0,
            length: 0,
            end_index: 0,
            cursor: 0,
            delimiters: None,
            more_tokens: false,
            policy,
            reusable: Token::from_raw(empty, 0, 0),
            generation: 0,
        }
    }

    /// Configure the range `[index, index + length)` of `source` for
    /// tokenizing. Nothing changes if any argument is rejected.
    pub fn set_source(
        &mut self,
        source: &'s [U],
        index: usize,
        length: usize,
        delimiters: Delimiters<'s, U>,
    ) -> Result<(), ParseError> {
        if delimiters.is_empty() {
            return Err(ArgumentError::EmptyDelimiters.into());
        }
        let end_index = index
            .checked_add(length)
            .filter(|&end| length > 0 && end <= source.len())
            .ok_or(ArgumentError::InvalidRange {
                index,
                length,
                bound: source.len(),
            })?;
        if delimiters.mode() == DelimiterMode::MatchExact && length < delimiters.units().len() {
            return Err(ArgumentError::SourceShorterThanDelimiter {
                available: length,
                delimiter: delimiters.units().len(),
            }
            .into());
        }

        self.source = source;
        self.index = index;
        self.length = length;
        self.end_index = end_index;
        self.cursor = index;
        self.delimiters = Some(delimiters);
        self.more_tokens = true;
        Ok(())
    }

    /// Return the next token, or `None` once the range is used up.
    pub fn next_token(&mut self) -> Result<Option<SliceHandle<'_, 's, U>>, ParseError> {
        let delimiters = self
            .delimiters
            .ok_or(ParseError::NotReady("no source configured"))?;
        if !self.more_tokens {
            return Ok(None);
        }

        let window = self.source.get(self.cursor..self.end_index).unwrap_or(&[]);
        let (index, length) = match delimiters.scan(window) {
            ScanOutcome::Complete { start, end } => {
                let index = self.cursor + start;
                self.cursor += end;
                (index, end - start)
            }
            ScanOutcome::Incomplete { start } => {
                let index = self.cursor + start;
                self.cursor = self.end_index;
                self.more_tokens = false;
                (index, self.end_index - index)
            }
            ScanOutcome::NoToken => {
                self.cursor = self.end_index;
                self.more_tokens = false;
                return Ok(None);
            }
        };

        Ok(Some(self.deliver(index, length)))
    }

    /// True when another call to [`next_token`](Self::next_token) would
    /// return a token. Does not consume anything.
    pub fn has_more_tokens(&self) -> bool {
        let Some(delimiters) = self.delimiters else {
            return false;
        };
        self.more_tokens
            && delimiters
                .token_start(self.source.get(self.cursor..self.end_index).unwrap_or(&[]))
                .is_some()
    }

    /// Forget the current source. The token policy is kept.
    pub fn reset(&mut self) {
        self.source = &[];
        self.index = 0;
        self.length = 0;
        self.end_index = 0;
        self.cursor = 0;
        self.delimiters = None;
        self.more_tokens = false;
    }

    pub fn source(&self) -> &'s [U] {
        self.source
    }

    /// Start of the configured range.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Length of the configured range.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Next position to be scanned.
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn delimiters(&self) -> Option<Delimiters<'s, U>> {
        self.delimiters
    }

    pub fn policy(&self) -> TokenPolicy {
        self.policy
    }

    fn deliver(&mut self, index: usize, length: usize) -> SliceHandle<'_, 's, U> {
        match self.policy {
            TokenPolicy::Fresh => TokenHandle::Owned(Token::from_raw(self.source, index, length)),
            TokenPolicy::Reuse => {
                self.reusable.overwrite(self.source, index, length);
                self.generation = self.generation.wrapping_add(1);
                TokenHandle::Borrowed {
                    token: &self.reusable,
                    generation: self.generation,
                }
            }
        }
    }
}

impl<U: Copy + PartialEq> Default for Tokenizer<'_, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'s, U: Copy + PartialEq> PullTokenizer for Tokenizer<'s, U> {
    type Token<'a>
        = SliceHandle<'a, 's, U>
    where
        Self: 'a;
    type Error = ParseError;

    fn next_token(&mut self) -> Result<Option<Self::Token<'_>>, Self::Error> {
        Tokenizer::next_token(self)
    }
}
