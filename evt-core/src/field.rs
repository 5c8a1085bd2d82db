//! Bidirectional field cursor over a fixed-size parameter block
//!
//! A record's layout is declared once as a sequence of `rw_*` calls. Running
//! that sequence over a reader cursor decodes the block into the record's
//! fields; running it over a writer cursor encodes the fields back. All
//! multi-byte fields are little-endian.

use crate::{Error, Result};
use byteorder::{ByteOrder, LittleEndian};
use std::fmt;
use std::ops::Range;

/// Direction of a traversal, fixed for the lifetime of a cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Fields are filled from the block
    Read,
    /// The block is filled from the fields
    Write,
}

/// A fixed-width field type the cursor can thread
pub trait Scalar: Copy + PartialEq + Default + fmt::Display {
    /// Width of the field in bytes
    const WIDTH: usize;

    /// Decodes the value from exactly `WIDTH` bytes
    fn read_from(buf: &[u8]) -> Self;

    /// Encodes the value into exactly `WIDTH` bytes
    fn write_to(self, buf: &mut [u8]);
}

impl Scalar for u8 {
    const WIDTH: usize = 1;

    fn read_from(buf: &[u8]) -> Self {
        buf[0]
    }

    fn write_to(self, buf: &mut [u8]) {
        buf[0] = self;
    }
}

impl Scalar for i8 {
    const WIDTH: usize = 1;

    fn read_from(buf: &[u8]) -> Self {
        buf[0] as i8
    }

    fn write_to(self, buf: &mut [u8]) {
        buf[0] = self as u8;
    }
}

macro_rules! impl_scalar {
    ($ty:ty, $width:expr, $read:ident, $write:ident) => {
        impl Scalar for $ty {
            const WIDTH: usize = $width;

            fn read_from(buf: &[u8]) -> Self {
                LittleEndian::$read(buf)
            }

            fn write_to(self, buf: &mut [u8]) {
                LittleEndian::$write(buf, self)
            }
        }
    };
}

impl_scalar!(u16, 2, read_u16, write_u16);
impl_scalar!(i16, 2, read_i16, write_i16);
impl_scalar!(u32, 4, read_u32, write_u32);
impl_scalar!(i32, 4, read_i32, write_i32);
impl_scalar!(f32, 4, read_f32, write_f32);

enum Block<'a> {
    Read(&'a [u8]),
    Write(&'a mut [u8]),
}

/// Cursor threading record fields through a byte block in one direction
pub struct FieldCursor<'a> {
    block: Block<'a>,
    pos: usize,
}

impl<'a> FieldCursor<'a> {
    /// Creates a cursor that decodes fields from `bytes`
    pub fn reader(bytes: &'a [u8]) -> Self {
        Self {
            block: Block::Read(bytes),
            pos: 0,
        }
    }

    /// Creates a cursor that encodes fields into `bytes`
    pub fn writer(bytes: &'a mut [u8]) -> Self {
        Self {
            block: Block::Write(bytes),
            pos: 0,
        }
    }

    pub fn direction(&self) -> Direction {
        match self.block {
            Block::Read(_) => Direction::Read,
            Block::Write(_) => Direction::Write,
        }
    }

    /// Current offset into the block
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total size of the block
    pub fn len(&self) -> usize {
        match &self.block {
            Block::Read(b) => b.len(),
            Block::Write(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes left between the cursor and the end of the block
    pub fn remaining(&self) -> usize {
        self.len() - self.pos
    }

    /// Reserves the next `width` bytes, failing without moving if they run past the end
    fn claim(&mut self, width: usize) -> Result<Range<usize>> {
        let size = self.len();
        let end = self.pos + width;
        if end > size {
            return Err(Error::Overrun {
                offset: self.pos,
                width,
                size,
            });
        }
        let range = self.pos..end;
        self.pos = end;
        Ok(range)
    }

    /// Threads one scalar field
    pub fn rw<T: Scalar>(&mut self, field: &mut T) -> Result<()> {
        let range = self.claim(T::WIDTH)?;
        match &mut self.block {
            Block::Read(b) => *field = T::read_from(&b[range]),
            Block::Write(b) => field.write_to(&mut b[range]),
        }
        Ok(())
    }

    pub fn rw_u8(&mut self, field: &mut u8) -> Result<()> {
        self.rw(field)
    }

    pub fn rw_i8(&mut self, field: &mut i8) -> Result<()> {
        self.rw(field)
    }

    pub fn rw_u16(&mut self, field: &mut u16) -> Result<()> {
        self.rw(field)
    }

    pub fn rw_i16(&mut self, field: &mut i16) -> Result<()> {
        self.rw(field)
    }

    pub fn rw_u32(&mut self, field: &mut u32) -> Result<()> {
        self.rw(field)
    }

    pub fn rw_i32(&mut self, field: &mut i32) -> Result<()> {
        self.rw(field)
    }

    pub fn rw_f32(&mut self, field: &mut f32) -> Result<()> {
        self.rw(field)
    }

    /// Threads each element of an array field in order
    pub fn rw_array<T: Scalar>(&mut self, fields: &mut [T]) -> Result<()> {
        for field in fields.iter_mut() {
            self.rw(field)?;
        }
        Ok(())
    }

    /// Threads a raw byte run verbatim
    pub fn rw_bytes(&mut self, bytes: &mut [u8]) -> Result<()> {
        let range = self.claim(bytes.len())?;
        match &mut self.block {
            Block::Read(b) => bytes.copy_from_slice(&b[range]),
            Block::Write(b) => b[range].copy_from_slice(bytes),
        }
        Ok(())
    }

    /// Threads a field that must always be zero
    ///
    /// The check runs in both directions, so a nonzero reserved value is
    /// neither accepted from a file nor written back to one.
    pub fn reserved<T: Scalar>(&mut self, name: &str, field: &mut T) -> Result<()> {
        self.rw(field)?;
        if *field != T::default() {
            return Err(Error::ReservedField {
                field: name.to_string(),
                value: field.to_string(),
            });
        }
        Ok(())
    }
}
