// SPDX-License-Identifier: Apache-2.0

//! Byte [`Reader`] over anything implementing [`std::io::Read`].

use std::io::{ErrorKind, Read};

use crate::reader::{ReadStatus, Reader};

/// Adapts a [`std::io::Read`] into a byte [`Reader`].
///
/// `Ok(0)` from the inner reader is taken as end of source, as `std::io`
/// defines it. Interrupted reads are retried.
#[derive(Debug)]
pub struct IoReader<R> {
    inner: R,
    finished: bool,
}

impl<R: Read> IoReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            finished: false,
        }
    }

    /// Give back the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Reader<u8> for IoReader<R> {
    type Error = std::io::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<ReadStatus, Self::Error> {
        if self.finished {
            return Ok(ReadStatus::EndOfSource);
        }
        if buf.is_empty() {
            return Ok(ReadStatus::Read(0));
        }
        loop {
            match self.inner.read(buf) {
                Ok(0) => {
                    self.finished = true;
                    return Ok(ReadStatus::EndOfSource);
                }
                Ok(n) => return Ok(ReadStatus::Read(n)),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.finished
    }
}
