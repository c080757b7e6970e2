// SPDX-License-Identifier: Apache-2.0

//! The pull interface the streaming engine consumes.

/// Outcome of a single [`Reader::read`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStatus {
    /// `n` units were written to the front of the buffer. `Read(0)` means
    /// nothing is available right now, not that the source has ended.
    Read(usize),
    /// No more data will ever arrive.
    EndOfSource,
}

/// Trait for input sources that can provide units to the streaming parser.
///
/// # Contract
/// - `Read(n)` **MUST** satisfy `n <= buf.len()`
/// - After `EndOfSource` has been returned, every later call **MUST** return
///   `EndOfSource` again
/// - `is_empty()` may return `true` only when the next read would return
///   `EndOfSource`
pub trait Reader<U = u8> {
    /// The error type returned by read operations
    type Error;

    /// Read units into the front of `buf`.
    fn read(&mut self, buf: &mut [U]) -> Result<ReadStatus, Self::Error>;

    /// Report exhaustion without reading. Sources that cannot tell ahead of
    /// time keep the default.
    fn is_empty(&self) -> bool {
        false
    }
}

impl<U, R: Reader<U> + ?Sized> Reader<U> for &mut R {
    type Error = R::Error;

    fn read(&mut self, buf: &mut [U]) -> Result<ReadStatus, Self::Error> {
        (**self).read(buf)
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }
}
