// SPDX-License-Identifier: Apache-2.0

//! Buffered scan engine: the refill protocol around the delimiter matcher.
//!
//! The engine owns a [`ScanBuffer`] over caller-supplied storage and pulls
//! from a [`Reader`] on demand. A token that runs off the end of the window
//! gets exactly one refill-and-retry; if it still has no end, the input is
//! abandoned rather than waiting forever. Callers whose tokens may be larger
//! than the buffer must size the buffer for them, as the engine never grows.

use log::{debug, trace, warn};

use crate::matcher::{DelimiterMode, Delimiters, ScanOutcome};
use crate::parse_error::{ArgumentError, ParseError, StreamError};
use crate::reader::{ReadStatus, Reader};
use crate::scan_buffer::ScanBuffer;
use crate::shared::{DEFAULT_REFILL_THRESHOLD, MIN_BUFFER_CAPACITY};
use crate::token::Window;

/// Lifecycle of an engine for one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No input configured.
    Idle,
    /// Input configured, tokens may follow.
    Ready,
    /// No further tokens for this input. Terminal until the next setup.
    Exhausted,
}

/// Construction-time engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// A refill is attempted before scanning whenever fewer than this many
    /// unconsumed units remain.
    pub refill_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            refill_threshold: DEFAULT_REFILL_THRESHOLD,
        }
    }
}

/// Bounds of one token found by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Offset of the token within the buffer.
    pub start: usize,
    /// Absolute position of the token in the input.
    pub index: usize,
    pub length: usize,
}

/// Fixed-capacity streaming scanner.
pub struct ScanEngine<'b, R, U = u8> {
    buffer: ScanBuffer<'b, U>,
    reader: Option<R>,
    delimiters: Option<Delimiters<'b, U>>,
    refill_threshold: usize,
    state: EngineState,
    /// Set once the reader has confirmed it has nothing more.
    source_exhausted: bool,
}

impl<'b, R, U> ScanEngine<'b, R, U>
where
    R: Reader<U>,
    U: Copy + PartialEq,
{
    /// Create an idle engine over `buffer`.
    ///
    /// The buffer must hold at least [`MIN_BUFFER_CAPACITY`] units and the
    /// refill threshold must lie in `1..=capacity`.
    pub fn new(buffer: &'b mut [U], config: EngineConfig) -> Result<Self, ParseError> {
        let capacity = buffer.len();
        if capacity < MIN_BUFFER_CAPACITY {
            return Err(ArgumentError::BufferTooSmall {
                capacity,
                minimum: MIN_BUFFER_CAPACITY,
            }
            .into());
        }
        if config.refill_threshold == 0 || config.refill_threshold > capacity {
            return Err(ArgumentError::InvalidRefillThreshold {
                threshold: config.refill_threshold,
                capacity,
            }
            .into());
        }
        Ok(Self {
            buffer: ScanBuffer::new(buffer),
            reader: None,
            delimiters: None,
            refill_threshold: config.refill_threshold,
            state: EngineState::Idle,
            source_exhausted: false,
        })
    }

    /// Attach a new input, replacing any previous one.
    ///
    /// Performs the initial fill. On any error the engine is left Idle.
    ///
    /// The initial fill stops at the first `Read(0)`, and a MATCH_EXACT
    /// input must have at least one delimiter's worth of units by then. A
    /// reader that stalls before delivering enough is rejected with
    /// [`ArgumentError::SourceShorterThanDelimiter`] even if more would
    /// have followed.
    pub fn set_input(
        &mut self,
        reader: R,
        delimiters: Delimiters<'b, U>,
    ) -> Result<(), StreamError<R::Error>> {
        let capacity = self.buffer.capacity();
        if delimiters.is_empty() {
            return Err(ArgumentError::EmptyDelimiters.into());
        }
        let exact_len = match delimiters.mode() {
            DelimiterMode::MatchExact => delimiters.units().len(),
            DelimiterMode::MatchAny => 0,
        };
        if exact_len > capacity {
            return Err(ArgumentError::DelimiterExceedsCapacity {
                delimiter: exact_len,
                capacity,
            }
            .into());
        }

        self.reset();
        self.reader = Some(reader);
        if let Err(e) = self.refill() {
            self.reset();
            return Err(e);
        }

        let available = self.buffer.remaining();
        if available < exact_len {
            self.reset();
            return Err(ArgumentError::SourceShorterThanDelimiter {
                available,
                delimiter: exact_len,
            }
            .into());
        }

        debug!(
            "Input ready: {} units buffered, capacity {}, mode {:?}",
            available,
            capacity,
            delimiters.mode()
        );
        self.delimiters = Some(delimiters);
        self.state = EngineState::Ready;
        Ok(())
    }

    /// Find the next token.
    ///
    /// Returns `Ok(None)` once the input has no more tokens. A reader error
    /// is returned as-is and leaves the engine Ready, so the call may be
    /// repeated.
    pub fn parse_token(&mut self) -> Result<Option<Match>, StreamError<R::Error>> {
        let delimiters = match (self.state, self.delimiters) {
            (EngineState::Exhausted, _) => return Ok(None),
            (EngineState::Ready, Some(delimiters)) => delimiters,
            _ => return Err(ParseError::NotReady("no input configured").into()),
        };

        if self.buffer.remaining() < self.refill_threshold && !self.source_exhausted {
            self.refill()?;
        }

        let mut retried = false;
        loop {
            match delimiters.scan(self.buffer.window()) {
                ScanOutcome::Complete { start, end } => {
                    let found = self.match_at(start, end - start);
                    self.buffer.consume(end)?;
                    trace!("Token at {} len {}", found.index, found.length);
                    return Ok(Some(found));
                }
                ScanOutcome::NoToken => {
                    self.buffer.consume(self.buffer.remaining())?;
                    if self.source_exhausted {
                        self.finish();
                        return Ok(None);
                    }
                    let read = self.refill()?;
                    if read == 0 && !self.source_exhausted {
                        if retried {
                            debug!("Reader stalled at {}", self.buffer.position());
                            self.finish();
                            return Ok(None);
                        }
                        retried = true;
                    }
                }
                ScanOutcome::Incomplete { start } => {
                    self.buffer.consume(start)?;
                    if !self.source_exhausted
                        && self.buffer.remaining() == self.buffer.capacity()
                        && self.source_continues()?
                    {
                        warn!(
                            "Token at {} fills buffer capacity {} and continues",
                            self.buffer.position(),
                            self.buffer.capacity()
                        );
                        self.finish();
                        return Ok(None);
                    }
                    if self.source_exhausted {
                        let found = self.match_at(0, self.buffer.remaining());
                        self.buffer.consume(found.length)?;
                        trace!("Final token at {} len {}", found.index, found.length);
                        return Ok(Some(found));
                    }
                    if retried {
                        warn!(
                            "Token at {} has no end within buffer capacity {}",
                            self.buffer.position(),
                            self.buffer.capacity()
                        );
                        self.finish();
                        return Ok(None);
                    }
                    self.refill()?;
                    retried = true;
                }
            }
        }
    }

    /// Drop the current input and return to Idle.
    pub fn reset(&mut self) {
        self.buffer.reset();
        self.reader = None;
        self.delimiters = None;
        self.state = EngineState::Idle;
        self.source_exhausted = false;
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Absolute input position of the first unconsumed unit.
    pub fn position(&self) -> usize {
        self.buffer.position()
    }

    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    pub fn delimiters(&self) -> Option<Delimiters<'b, U>> {
        self.delimiters
    }

    /// View of everything buffered, consumed or not. Tokens returned by the
    /// last [`parse_token`](Self::parse_token) resolve against it.
    pub fn window(&self) -> Window<'_, U> {
        Window::new(self.buffer.origin(), self.buffer.filled())
    }

    /// Token of `length` starting `offset` units into the unconsumed window.
    fn match_at(&self, offset: usize, length: usize) -> Match {
        let start = self.buffer.consumed().saturating_add(offset);
        Match {
            start,
            index: self.buffer.origin().saturating_add(start),
            length,
        }
    }

    fn finish(&mut self) {
        debug!("Input exhausted at {}", self.buffer.position());
        self.state = EngineState::Exhausted;
    }

    /// Ask the reader for one unit past a full buffer, to learn whether the
    /// token filling it is the last one. Returns `true` if more data
    /// follows; that unit is dropped, as the input cannot continue anyway.
    fn source_continues(&mut self) -> Result<bool, StreamError<R::Error>> {
        let reader = self
            .reader
            .as_mut()
            .ok_or(ParseError::NotReady("no input configured"))?;
        let Some(&unit) = self.buffer.window().first() else {
            return Ok(false);
        };
        let mut scratch = [unit];
        match reader.read(&mut scratch).map_err(StreamError::Reader)? {
            ReadStatus::EndOfSource => {
                self.source_exhausted = true;
                Ok(false)
            }
            ReadStatus::Read(0) => {
                if reader.is_empty() {
                    self.source_exhausted = true;
                }
                Ok(false)
            }
            ReadStatus::Read(_) => Ok(true),
        }
    }

    /// Compact, then read until the buffer is full, the reader has nothing
    /// right now, or the source ends. Returns the number of units read.
    fn refill(&mut self) -> Result<usize, StreamError<R::Error>> {
        let reader = self
            .reader
            .as_mut()
            .ok_or(ParseError::NotReady("no input configured"))?;
        if self.source_exhausted {
            return Ok(0);
        }

        self.buffer.compact();
        let mut total = 0usize;
        while let Some(fill_slice) = self.buffer.fill_slice() {
            match reader.read(fill_slice).map_err(StreamError::Reader)? {
                ReadStatus::Read(0) => break,
                ReadStatus::Read(n) => {
                    self.buffer.mark_filled(n)?;
                    total = total.saturating_add(n);
                }
                ReadStatus::EndOfSource => {
                    self.source_exhausted = true;
                    break;
                }
            }
        }
        if !self.source_exhausted && reader.is_empty() {
            self.source_exhausted = true;
        }

        debug!(
            "Refill read {} units, {} buffered, source exhausted: {}",
            total,
            self.buffer.remaining(),
            self.source_exhausted
        );
        Ok(total)
    }
}
