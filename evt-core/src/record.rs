//! Command parameter records
//!
//! Every concrete record declares its size and a single `traverse` routine.
//! Decoding and encoding both run that routine, so the two directions share
//! one declaration of field order and widths.

use crate::field::FieldCursor;
use crate::{Error, Result};

/// A fixed-size, strongly-typed command parameter block
pub trait CommandRecord: Default + Clone {
    /// Four-character command code this layout belongs to
    const CODE: &'static str;

    /// Size of the parameter block in bytes
    const SIZE: usize;

    /// Threads every field, in file order, through the cursor
    fn traverse(&mut self, cursor: &mut FieldCursor<'_>) -> Result<()>;

    /// Decodes a record from its parameter block
    fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > Self::SIZE {
            return Err(Error::SizeMismatch {
                code: Self::CODE.to_string(),
                expected: Self::SIZE,
                actual: bytes.len(),
            });
        }

        let mut record = Self::default();
        let mut cursor = FieldCursor::reader(bytes);
        record.traverse(&mut cursor)?;
        check_layout::<Self>(cursor.position())?;
        Ok(record)
    }

    /// Encodes the record into a new block of exactly `SIZE` bytes
    fn encode(&self) -> Result<Vec<u8>> {
        let mut bytes = vec![0u8; Self::SIZE];
        // traverse takes &mut so one routine serves both directions
        let mut record = self.clone();
        let mut cursor = FieldCursor::writer(&mut bytes);
        record.traverse(&mut cursor)?;
        check_layout::<Self>(cursor.position())?;
        Ok(bytes)
    }
}

fn check_layout<R: CommandRecord>(traversed: usize) -> Result<()> {
    if traversed != R::SIZE {
        return Err(Error::LayoutMismatch {
            code: R::CODE.to_string(),
            declared: R::SIZE,
            traversed,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Declares more bytes than it traverses
    #[derive(Debug, Default, Clone)]
    struct ShortLayout {
        value: u16,
    }

    impl CommandRecord for ShortLayout {
        const CODE: &'static str = "Tst_";
        const SIZE: usize = 4;

        fn traverse(&mut self, cursor: &mut FieldCursor<'_>) -> Result<()> {
            cursor.rw_u16(&mut self.value)
        }
    }

    #[test]
    fn test_layout_mismatch_is_reported() {
        let err = ShortLayout::decode(&[1, 0, 0, 0]).unwrap_err();
        assert!(matches!(
            err,
            Error::LayoutMismatch {
                declared: 4,
                traversed: 2,
                ..
            }
        ));
        assert!(ShortLayout { value: 1 }.encode().is_err());
    }

    #[test]
    fn test_oversized_block_is_rejected() {
        let err = ShortLayout::decode(&[0; 8]).unwrap_err();
        assert!(matches!(
            err,
            Error::SizeMismatch {
                expected: 4,
                actual: 8,
                ..
            }
        ));
    }
}
