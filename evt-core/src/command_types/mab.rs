//! `MAB_` - model animation blend

use crate::field::FieldCursor;
use crate::record::CommandRecord;
use crate::Result;

/// Parameters of a `MAB_` command: two animation slots played on a model
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mab {
    pub primary_animation_index: i32,
    /// Observed values: 0, 1
    pub primary_loop: i32,
    pub primary_animation_speed: f32,
    pub secondary_animation_index: i32,
    /// Observed values: 0, 1
    pub secondary_loop: i32,
    pub secondary_animation_speed: f32,
    /// Kept as a raw byte; likely a bit field, layout unconfirmed
    pub animation_mode: u8,
    pub first_frame: i32,
    pub last_frame: i32,

    pub unk_u8: [u8; 1],
    pub unk_i16: [i16; 1],
    pub unk_i32: [i32; 5],

    pub unused_i32: [i32; 2],
}

impl Mab {
    pub fn primary_loops(&self) -> bool {
        self.primary_loop != 0
    }

    pub fn secondary_loops(&self) -> bool {
        self.secondary_loop != 0
    }
}

impl CommandRecord for Mab {
    const CODE: &'static str = "MAB_";
    const SIZE: usize = 64;

    fn traverse(&mut self, cursor: &mut FieldCursor<'_>) -> Result<()> {
        cursor.rw_i32(&mut self.primary_animation_index)?;
        cursor.rw_i32(&mut self.unk_i32[0])?;
        cursor.rw_i32(&mut self.primary_loop)?;
        cursor.rw_f32(&mut self.primary_animation_speed)?;
        cursor.rw_i32(&mut self.secondary_animation_index)?;
        cursor.rw_i32(&mut self.unk_i32[1])?;
        cursor.rw_i32(&mut self.secondary_loop)?;
        cursor.rw_f32(&mut self.secondary_animation_speed)?;
        cursor.rw_u8(&mut self.animation_mode)?;
        cursor.rw_u8(&mut self.unk_u8[0])?;
        cursor.rw_i16(&mut self.unk_i16[0])?;
        cursor.rw_i32(&mut self.first_frame)?;
        cursor.rw_i32(&mut self.last_frame)?;
        cursor.rw_array(&mut self.unk_i32[2..5])?;
        for (i, unused) in self.unused_i32.iter_mut().enumerate() {
            cursor.reserved(&format!("MAB_.unused_i32[{i}]"), unused)?;
        }
        Ok(())
    }
}
