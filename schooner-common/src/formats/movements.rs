//! Schooner 3D movements format (.sch3Dmovements)
//!
//! # Layout
//! ```text
//! i32      version (1)
//! for each action:
//!   string   name (UTF-8, zero terminated)
//!   u8       flags: bit0 = location, bit1 = rotation (quaternion),
//!                   bit2 = uniform scale, bit3 = per-axis scale
//!   if flags != 0, for each enabled channel
//!   (location[3], rotation[4], scale[1 or 3], in that order):
//!     u8     keyframe_count (shared by every component curve)
//!     for each component curve: keyframe_count keyframe records
//! ```
//!
//! # Keyframe record
//! ```text
//! f32 left_time,  f32 left_value     (omitted for the first keyframe)
//! f32 point_time, f32 point_value
//! f32 right_time, f32 right_value    (omitted for the last keyframe)
//! ```
//!
//! Times are relative to the action's first keyframe. The same movement
//! block opens every action of an armature file.

/// Maximum keyframes per curve (u8 count field)
pub const MAX_KEYFRAMES: usize = u8::MAX as usize;

/// Movement flags byte
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementFlags {
    pub location: bool,
    pub rotation: bool,
    pub uniform_scale: bool,
    pub axis_scale: bool,
}

impl MovementFlags {
    /// Booleans in bit order, for `BinaryWriter::write_flags`
    pub fn bits(&self) -> [bool; 4] {
        [
            self.location,
            self.rotation,
            self.uniform_scale,
            self.axis_scale,
        ]
    }

    /// No channel enabled: the action carries no movement payload
    pub fn is_empty(&self) -> bool {
        !(self.location || self.rotation || self.uniform_scale || self.axis_scale)
    }

    /// Component curve count of each enabled channel, in file order.
    ///
    /// Each entry is preceded by one keyframe count byte in the file.
    pub fn channel_widths(&self) -> impl Iterator<Item = usize> {
        let scale = if self.uniform_scale {
            Some(1)
        } else if self.axis_scale {
            Some(3)
        } else {
            None
        };
        [self.location.then_some(3), self.rotation.then_some(4), scale]
            .into_iter()
            .flatten()
    }

    /// Number of component curves that follow the flags byte
    pub fn curve_count(&self) -> usize {
        self.channel_widths().sum()
    }

    /// Read flags from the packed byte
    pub fn from_byte(byte: u8) -> Self {
        Self {
            location: byte & 0b0001 != 0,
            rotation: byte & 0b0010 != 0,
            uniform_scale: byte & 0b0100 != 0,
            axis_scale: byte & 0b1000 != 0,
        }
    }
}

/// Number of (time, value) pairs stored for a curve with `keyframes` keys.
///
/// Every keyframe has a point, and all but the ends carry both handles.
pub fn point_pair_count(keyframes: usize) -> usize {
    match keyframes {
        0 => 0,
        n => (n - 1) * 3 + 1,
    }
}
