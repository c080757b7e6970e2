// SPDX-License-Identifier: Apache-2.0

use crate::matcher::Delimiters;
use crate::parse_error::{ParseError, StreamError};
use crate::reader::Reader;
use crate::scan_engine::{EngineState, ScanEngine};
use crate::shared::{ParseControl, ParserConfig, PullTokenizer};
use crate::token::{StreamHandle, Token, TokenHandle, TokenPolicy};

/// A streaming tokenizer that pulls input from a [`Reader`] into a
/// caller-supplied buffer.
///
/// Token positions are absolute offsets into the input, whatever the buffer
/// size or read chunking. A handle borrows the parser until it is dropped,
/// so keeping one across calls requires [`TokenHandle::into_owned`].
///
/// Under [`TokenPolicy::Reuse`] no single token slot is overwritten, unlike
/// the in-memory [`Tokenizer`](crate::Tokenizer). Each call hands out a new
/// borrowed handle over the same buffer storage, which allocates nothing;
/// the generation counter tells successive handles apart.
///
/// ```compile_fail
/// use picotok::{ChunkReader, Delimiters, StreamParser};
///
/// let mut buffer = [0u8; 128];
/// let mut parser = StreamParser::new(&mut buffer).unwrap();
/// parser
///     .set_input(ChunkReader::full_slice(b"a b"), Delimiters::any(b" "))
///     .unwrap();
/// let first = parser.next_token().unwrap();
/// let second = parser.next_token().unwrap();
/// drop((first, second));
/// ```
pub struct StreamParser<'b, R, U = u8> {
    engine: ScanEngine<'b, R, U>,
    policy: TokenPolicy,
    generation: u64,
}

impl<'b, R: Reader<U>, U: Copy + PartialEq> StreamParser<'b, R, U> {
    /// Create a parser with default configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use picotok::{ChunkReader, Delimiters, Positioned, StreamParser};
    ///
    /// let mut buffer = [0u8; 256];
    /// let mut parser = StreamParser::new(&mut buffer).unwrap();
    /// parser
    ///     .set_input(ChunkReader::new(b"GET /index.html HTTP/1.1", 5), Delimiters::any(b" "))
    ///     .unwrap();
    ///
    /// let path = parser.next_token().unwrap().unwrap();
    /// assert_eq!(path.index(), 0);
    /// ```
    pub fn new(buffer: &'b mut [U]) -> Result<Self, ParseError> {
        Self::with_config(buffer, ParserConfig::default())
    }

    /// Create a parser with explicit refill threshold and token policy.
    pub fn with_config(buffer: &'b mut [U], config: ParserConfig) -> Result<Self, ParseError> {
        Ok(Self {
            engine: ScanEngine::new(buffer, config.engine_config())?,
            policy: config.policy,
            generation: 0,
        })
    }

    /// Attach an input. Any previous input is dropped.
    pub fn set_input(
        &mut self,
        reader: R,
        delimiters: Delimiters<'b, U>,
    ) -> Result<(), StreamError<R::Error>> {
        self.engine.set_input(reader, delimiters)
    }

    /// Return the next token, or `None` once the input has no more.
    pub fn next_token(&mut self) -> Result<Option<StreamHandle<'_, U>>, StreamError<R::Error>> {
        let Some(found) = self.engine.parse_token()? else {
            return Ok(None);
        };
        let token = Token::from_raw(self.engine.window(), found.index, found.length);
        let handle = match self.policy {
            TokenPolicy::Fresh => TokenHandle::Owned(token.detach()),
            TokenPolicy::Reuse => {
                self.generation = self.generation.wrapping_add(1);
                TokenHandle::Borrowed {
                    token,
                    generation: self.generation,
                }
            }
        };
        Ok(Some(handle))
    }

    /// Deliver tokens to `callback` in input order until the input ends or
    /// the callback calls [`ParseControl::stop`].
    ///
    /// Returns the number of tokens delivered. The parser stays usable after
    /// a stop, so a later call resumes where this one left off.
    pub fn parse<F>(&mut self, mut callback: F) -> Result<usize, StreamError<R::Error>>
    where
        F: FnMut(StreamHandle<'_, U>, &mut ParseControl),
    {
        let mut control = ParseControl::new();
        while !control.is_stopped() {
            let Some(token) = self.next_token()? else {
                break;
            };
            control.record_delivery();
            callback(token, &mut control);
        }
        Ok(control.delivered())
    }

    /// Drop the current input and return to Idle.
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    pub fn state(&self) -> EngineState {
        self.engine.state()
    }

    /// Absolute input position of the first unconsumed unit.
    pub fn position(&self) -> usize {
        self.engine.position()
    }

    pub fn policy(&self) -> TokenPolicy {
        self.policy
    }

    pub fn capacity(&self) -> usize {
        self.engine.capacity()
    }
}

impl<'b, R: Reader<U>, U: Copy + PartialEq> PullTokenizer for StreamParser<'b, R, U> {
    type Token<'a>
        = StreamHandle<'a, U>
    where
        Self: 'a;
    type Error = StreamError<R::Error>;

    fn next_token(&mut self) -> Result<Option<Self::Token<'_>>, Self::Error> {
        StreamParser::next_token(self)
    }
}
