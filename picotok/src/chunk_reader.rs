// SPDX-License-Identifier: Apache-2.0

//! Convenience [`Reader`] implementations over in-memory data.
//!
//! [`ChunkReader`] serves a slice, either as fast as the parser's buffer
//! allows or in fixed-size chunks to simulate packets or short file reads.
//! [`IterReader`] pulls units from any iterator, which covers `str::chars()`.
//!
//! For real I/O, implement [`Reader`] for your source, or use
//! [`IoReader`](crate::IoReader) with the `std` feature.
//!
//! # Examples
//!
//! ```rust
//! use picotok::{ChunkReader, Delimiters, StreamParser};
//!
//! let text = b"one two three";
//! let mut buffer = [0u8; 128];
//! let mut parser = StreamParser::new(&mut buffer).unwrap();
//! parser
//!     .set_input(ChunkReader::new(text, 3), Delimiters::any(b" "))
//!     .unwrap();
//!
//! let mut words = Vec::new();
//! while let Some(token) = parser.next_token().unwrap() {
//!     words.push(token.into_owned().to_vec());
//! }
//! assert_eq!(words, [b"one".to_vec(), b"two".to_vec(), b"three".to_vec()]);
//! ```

use crate::reader::{ReadStatus, Reader};

/// A [`Reader`] that reads from a slice, optionally in fixed-size chunks.
///
/// Once the slice is drained, reads report [`ReadStatus::EndOfSource`] and
/// [`is_empty`](Reader::is_empty) turns true.
#[derive(Debug)]
pub struct ChunkReader<'a, U = u8> {
    data: &'a [U],
    pos: usize,
    chunk_size: usize,
}

impl<'a, U> ChunkReader<'a, U> {
    /// Create a new chunked reader.
    ///
    /// Each call to `read()` returns at most `chunk_size` units (minimum 1),
    /// even if the buffer could hold more.
    pub fn new(data: &'a [U], chunk_size: usize) -> Self {
        Self {
            data,
            pos: 0,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Create a reader that hands out as much as the buffer can take.
    pub fn full_slice(data: &'a [U]) -> Self {
        Self {
            data,
            pos: 0,
            chunk_size: usize::MAX,
        }
    }

    /// Units not yet handed out.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }
}

impl<U: Copy> Reader<U> for ChunkReader<'_, U> {
    type Error = ();

    fn read(&mut self, buf: &mut [U]) -> Result<ReadStatus, Self::Error> {
        let remaining_len = self.remaining();
        if remaining_len == 0 {
            return Ok(ReadStatus::EndOfSource);
        }

        let to_copy = remaining_len.min(buf.len()).min(self.chunk_size);
        let end = self.pos.saturating_add(to_copy);
        match (buf.get_mut(..to_copy), self.data.get(self.pos..end)) {
            (Some(dest), Some(src)) => dest.copy_from_slice(src),
            _ => return Ok(ReadStatus::Read(0)),
        }
        self.pos = end;

        Ok(ReadStatus::Read(to_copy))
    }

    fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

/// A [`Reader`] that pulls units one at a time from an iterator.
pub struct IterReader<I: Iterator> {
    iter: core::iter::Peekable<I>,
}

impl<I: Iterator> IterReader<I> {
    pub fn new(iter: I) -> Self {
        Self {
            iter: iter.peekable(),
        }
    }
}

impl<I: Iterator> Reader<I::Item> for IterReader<I> {
    type Error = ();

    fn read(&mut self, buf: &mut [I::Item]) -> Result<ReadStatus, Self::Error> {
        if self.iter.peek().is_none() {
            return Ok(ReadStatus::EndOfSource);
        }
        let mut count = 0;
        for slot in buf.iter_mut() {
            match self.iter.next() {
                Some(unit) => {
                    *slot = unit;
                    count += 1;
                }
                None => break,
            }
        }
        Ok(ReadStatus::Read(count))
    }

    fn is_empty(&self) -> bool {
        // Peeking needs `&mut`, so an unpeeked iterator is not known to be empty
        false
    }
}
