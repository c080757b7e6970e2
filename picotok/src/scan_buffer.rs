// SPDX-License-Identifier: Apache-2.0

/// Error types for ScanBuffer operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanBufferError {
    /// Attempted to consume beyond the available data
    EndOfData,
    /// A fill reported more units than there was room for
    Overfill,
    /// Invalid slice bounds provided
    InvalidSliceBounds,
}

/// ScanBuffer manages the fixed-capacity window a streaming tokenizer scans.
///
/// Layout:
/// - `buffer[..consumed]` has been handed out already and may be reclaimed
/// - `buffer[consumed..available]` is the live window
/// - `buffer[available..]` is free space for the reader
///
/// `origin` is the absolute stream position of `buffer[0]`, so positions
/// survive compaction.
pub struct ScanBuffer<'b, U> {
    /// The entire buffer slice
    buffer: &'b mut [U],
    /// Start of the unconsumed window
    consumed: usize,
    /// End of valid data from the reader
    available: usize,
    /// Stream position of buffer[0]
    origin: usize,
}

impl<'b, U: Copy> ScanBuffer<'b, U> {
    /// Create a new ScanBuffer over the given storage
    pub fn new(buffer: &'b mut [U]) -> Self {
        Self {
            buffer,
            consumed: 0,
            available: 0,
            origin: 0,
        }
    }

    /// Forget all buffered data and restart positions at zero
    pub fn reset(&mut self) {
        self.consumed = 0;
        self.available = 0;
        self.origin = 0;
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// The unconsumed window
    pub fn window(&self) -> &[U] {
        self.buffer
            .get(self.consumed..self.available)
            .unwrap_or(&[])
    }

    /// Everything the reader has filled, consumed or not
    pub fn filled(&self) -> &[U] {
        self.buffer.get(..self.available).unwrap_or(&[])
    }

    /// Number of unconsumed units
    pub fn remaining(&self) -> usize {
        self.available.saturating_sub(self.consumed)
    }

    /// Buffer offset where the unconsumed window starts
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Stream position of buffer slot 0
    pub fn origin(&self) -> usize {
        self.origin
    }

    /// Stream position of the first unconsumed unit
    pub fn position(&self) -> usize {
        self.origin.saturating_add(self.consumed)
    }

    /// Advance past `count` units of the window
    pub fn consume(&mut self, count: usize) -> Result<(), ScanBufferError> {
        let new_consumed = self
            .consumed
            .checked_add(count)
            .ok_or(ScanBufferError::InvalidSliceBounds)?;
        if new_consumed > self.available {
            return Err(ScanBufferError::EndOfData);
        }
        self.consumed = new_consumed;
        Ok(())
    }

    /// Get slice for the reader to fill with new data
    /// Returns None if no space available
    pub fn fill_slice(&mut self) -> Option<&mut [U]> {
        if self.available >= self.buffer.len() {
            return None;
        }
        self.buffer.get_mut(self.available..)
    }

    /// Mark that the reader filled `count` units
    pub fn mark_filled(&mut self, count: usize) -> Result<(), ScanBufferError> {
        let new_available = self
            .available
            .checked_add(count)
            .ok_or(ScanBufferError::Overfill)?;
        if new_available > self.buffer.len() {
            return Err(ScanBufferError::Overfill);
        }
        self.available = new_available;
        Ok(())
    }

    /// Move the unconsumed window to the start of the buffer.
    ///
    /// Returns the number of slots reclaimed.
    pub fn compact(&mut self) -> usize {
        let shift = self.consumed;
        if shift == 0 {
            return 0;
        }

        if shift < self.available {
            // Regions may overlap; copy_within behaves like memmove
            self.buffer.copy_within(shift..self.available, 0);
        }

        self.origin = self.origin.saturating_add(shift);
        self.available = self.available.saturating_sub(shift);
        self.consumed = 0;
        shift
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(db: &mut ScanBuffer<'_, u8>, data: &[u8]) {
        let fill_slice = db.fill_slice().unwrap();
        fill_slice[..data.len()].copy_from_slice(data);
        db.mark_filled(data.len()).unwrap();
    }

    #[test]
    fn test_new_scan_buffer() {
        let mut buffer = [0u8; 100];
        let mut db = ScanBuffer::new(&mut buffer);

        assert_eq!(db.consumed, 0);
        assert_eq!(db.available, 0);
        assert_eq!(db.origin, 0);
        assert_eq!(db.remaining(), 0);
        assert_eq!(db.fill_slice().map(|s| s.len()), Some(100));
    }

    #[test]
    fn test_fill_and_consume() {
        let mut buffer = [0u8; 100];
        let mut db = ScanBuffer::new(&mut buffer);

        fill(&mut db, b"hello");
        assert_eq!(db.remaining(), 5);
        assert_eq!(db.window(), b"hello");

        db.consume(2).unwrap();
        assert_eq!(db.window(), b"llo");
        assert_eq!(db.filled(), b"hello");
        assert_eq!(db.position(), 2);
    }

    #[test]
    fn test_error_conditions() {
        let mut buffer = [0u8; 10];
        let mut db = ScanBuffer::new(&mut buffer);

        assert_eq!(db.consume(1).unwrap_err(), ScanBufferError::EndOfData);
        assert_eq!(db.mark_filled(11).unwrap_err(), ScanBufferError::Overfill);
        // Failed calls leave the cursors alone
        assert_eq!(db.available, 0);
        assert_eq!(db.consumed, 0);
    }

    #[test]
    fn test_buffer_full_scenario() {
        let mut buffer = [0u8; 10];
        let mut db = ScanBuffer::new(&mut buffer);

        fill(&mut db, b"0123456789");

        assert!(db.fill_slice().is_none());
        assert_eq!(db.remaining(), 10);
    }

    #[test]
    fn test_compact_basic() {
        let mut buffer = [0u8; 10];
        let mut db = ScanBuffer::new(&mut buffer);

        fill(&mut db, b"0123456789");
        db.consume(4).unwrap();

        let shift = db.compact();
        assert_eq!(shift, 4);
        assert_eq!(db.consumed, 0);
        assert_eq!(db.available, 6);
        assert_eq!(db.origin, 4);
        assert_eq!(db.window(), b"456789");
        assert_eq!(db.position(), 4);
    }

    #[test]
    fn test_compact_no_op_when_at_start() {
        let mut buffer = [0u8; 10];
        let mut db = ScanBuffer::new(&mut buffer);

        fill(&mut db, b"hello");
        assert_eq!(db.compact(), 0);
        assert_eq!(db.available, 5);
        assert_eq!(db.origin, 0);
        assert_eq!(db.window(), b"hello");
    }

    #[test]
    fn test_compact_all_data_consumed() {
        let mut buffer = [0u8; 10];
        let mut db = ScanBuffer::new(&mut buffer);

        fill(&mut db, b"hello");
        db.consume(5).unwrap();

        assert_eq!(db.compact(), 5);
        assert_eq!(db.remaining(), 0);
        assert_eq!(db.available, 0);
        assert_eq!(db.origin, 5);
        assert_eq!(db.fill_slice().unwrap().len(), 10);
    }

    #[test]
    fn test_compact_enables_new_data_fill() {
        let mut buffer = [0u8; 10];
        let mut db = ScanBuffer::new(&mut buffer);

        fill(&mut db, b"0123456789");
        db.consume(5).unwrap();
        assert!(db.fill_slice().is_none());

        db.compact();
        assert_eq!(db.fill_slice().unwrap().len(), 5);
        fill(&mut db, b"ABCDE");

        assert_eq!(db.window(), b"56789ABCDE");
        assert_eq!(db.origin(), 5);
    }

    #[test]
    fn test_compact_saves_partial_token() {
        // A token cut off by the end of the buffer survives compaction intact
        let mut buffer = [0u8; 8];
        let mut db = ScanBuffer::new(&mut buffer);

        fill(&mut db, b"ab cd ef");
        db.consume(6).unwrap();
        assert_eq!(db.window(), b"ef");

        db.compact();
        assert_eq!(db.window(), b"ef");
        assert_eq!(db.position(), 6);
        fill(&mut db, b"gh ");
        assert_eq!(db.window(), b"efgh ");
    }

    #[test]
    fn test_chars_buffer() {
        let mut buffer = ['\0'; 4];
        let mut db = ScanBuffer::new(&mut buffer);

        db.fill_slice().unwrap()[..3].copy_from_slice(&['π', ' ', 'τ']);
        db.mark_filled(3).unwrap();
        db.consume(2).unwrap();
        db.compact();
        assert_eq!(db.window(), &['τ']);
        assert_eq!(db.position(), 2);
    }
}
