//! Schooner 3D armature format (.sch3Darmature)
//!
//! # Layout
//! ```text
//! i32      version (1)
//! u8       bone_count - 1 (a single-bone armature stores 0)
//! for each bone:
//!   f32 × 3  head position (local)
//!   u8       parent index + 1 (0 = no parent)
//!
//! for each action:
//!   movement block (see `movements`)
//!   for each bone, for each quaternion component (w, x, y, z):
//!     u8     keyframe_count
//!     keyframe records
//! ```
//!
//! A bone without rotation curves for an action writes four zero counts.

/// Maximum bones in an armature (count is stored minus one in a u8)
pub const MAX_BONE_COUNT: usize = u8::MAX as usize + 1;

/// Quaternion components written per bone, in file order
pub const BONE_CURVE_COMPONENTS: usize = 4;

/// Encode the bone count byte (`count - 1`).
///
/// Returns `None` when the count is zero or exceeds [`MAX_BONE_COUNT`].
pub fn bone_count_byte(count: usize) -> Option<u8> {
    count.checked_sub(1).and_then(|c| u8::try_from(c).ok())
}

/// Encode a parent reference (`index + 1`, or 0 for a root bone).
///
/// Returns `None` when the index does not fit the byte.
pub fn parent_index_byte(parent: Option<usize>) -> Option<u8> {
    match parent {
        None => Some(0),
        Some(index) => index.checked_add(1).and_then(|i| u8::try_from(i).ok()),
    }
}
