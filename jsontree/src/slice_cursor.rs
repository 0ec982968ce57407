// SPDX-License-Identifier: Apache-2.0

/// Error type for SliceCursor operations.
#[derive(Debug, PartialEq)]
pub enum Error {
    /// Reached the end of input data.
    ReachedEnd,
    /// A position or range fell outside the input.
    InvalidSliceBounds,
}

/// The input slice together with the current parse position.
///
/// Every sub-parser shares one cursor, so a nested construct's consumed
/// length is simply the distance the position moved while it was parsed.
#[derive(Debug)]
pub struct SliceCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceCursor<'a> {
    /// Creates a new cursor positioned at the first byte of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn current_pos(&self) -> usize {
        self.pos
    }

    /// Gets the length of the underlying data for bounds checking.
    pub fn data_len(&self) -> usize {
        self.data.len()
    }

    /// The byte under the cursor, or `None` once all input has been consumed.
    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Everything from the cursor to the end of input.
    pub fn remaining(&self) -> &'a [u8] {
        self.data.get(self.pos..).unwrap_or(&[])
    }

    /// Returns the byte under the cursor and moves past it.
    pub fn consume_byte(&mut self) -> Result<u8, Error> {
        let byte = self.peek().ok_or(Error::ReachedEnd)?;
        self.pos = self.pos.checked_add(1).ok_or(Error::InvalidSliceBounds)?;
        Ok(byte)
    }

    /// Moves the cursor forward by `count` bytes. The cursor may land exactly
    /// at the end of input but never past it.
    pub fn advance(&mut self, count: usize) -> Result<(), Error> {
        let new_pos = self
            .pos
            .checked_add(count)
            .ok_or(Error::InvalidSliceBounds)?;
        if new_pos > self.data.len() {
            return Err(Error::InvalidSliceBounds);
        }
        self.pos = new_pos;
        Ok(())
    }

    /// Moves the cursor back to an earlier position.
    pub fn rewind_to(&mut self, pos: usize) -> Result<(), Error> {
        if pos > self.pos {
            return Err(Error::InvalidSliceBounds);
        }
        self.pos = pos;
        Ok(())
    }

    /// Advances past every leading byte accepted by `accept`.
    pub fn skip_while(&mut self, accept: impl Fn(u8) -> bool) {
        while let Some(byte) = self.peek() {
            if !accept(byte) {
                break;
            }
            self.pos += 1;
        }
    }

    /// Offset of the first `needle` at or after `from`, relative to the cursor.
    pub fn find_from(&self, from: usize, needle: u8) -> Option<usize> {
        let rest = self.remaining().get(from..)?;
        rest.iter()
            .position(|&byte| byte == needle)
            .map(|found| found + from)
    }

    /// Gets a slice of the data from start to end positions, with bounds checking.
    pub fn slice(&self, start: usize, end: usize) -> Result<&'a [u8], Error> {
        self.data.get(start..end).ok_or(Error::InvalidSliceBounds)
    }
}
