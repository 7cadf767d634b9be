//! Big-endian primitive encoder
//!
//! Append-only writer used for every Schooner 3D file. It knows nothing about
//! asset semantics: callers pick the field width and signedness explicitly.
//!
//! - Integers are big-endian (`u8`/`i8`, `u16`/`i16`, `i32`)
//! - Floats are IEEE 754 single precision, clamped to `0.0` when their
//!   magnitude is below [`ROUND_TO_ZERO_WITHIN`]
//! - Strings are UTF-8 followed by one zero byte (no length prefix)
//! - Flags are packed least-significant bit first

use std::io::{self, Write};

/// Magnitude below which floats are written as exactly `0.0`.
///
/// Static transforms exported from an editor tend to carry values like
/// `1.2e-8` that should read back as zero.
pub const ROUND_TO_ZERO_WITHIN: f32 = 1e-4;

/// Clamp near-zero floats to exactly zero
#[inline]
pub fn clamp_float(value: f32) -> f32 {
    if value.abs() < ROUND_TO_ZERO_WITHIN {
        0.0
    } else {
        value
    }
}

/// Append-only big-endian writer over any [`Write`] sink.
///
/// The writer is consumed by [`BinaryWriter::finish`], which flushes the sink
/// and hands it back. Dropping the writer closes the sink without reporting
/// flush errors.
#[derive(Debug)]
pub struct BinaryWriter<W: Write> {
    inner: W,
    written: u64,
}

impl<W: Write> BinaryWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    /// Number of bytes appended so far
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    fn put(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)?;
        self.written += bytes.len() as u64;
        Ok(())
    }

    /// Pack booleans into `byte_count` bytes.
    ///
    /// Bit `i` of byte `j` is set from `bits[j * 8 + i]` (bit 0 is the least
    /// significant). Missing trailing booleans are written as zero bits.
    pub fn write_flags(&mut self, bits: &[bool], byte_count: usize) -> io::Result<()> {
        debug_assert!(
            bits.len() <= byte_count * 8,
            "{} flags do not fit in {} byte(s)",
            bits.len(),
            byte_count
        );

        for byte_index in 0..byte_count {
            let mut byte = 0u8;
            for (bit, &set) in bits.iter().skip(byte_index * 8).take(8).enumerate() {
                if set {
                    byte |= 1 << bit;
                }
            }
            self.put(&[byte])?;
        }
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) -> io::Result<()> {
        self.put(&[value])
    }

    pub fn write_i8(&mut self, value: i8) -> io::Result<()> {
        self.put(&value.to_be_bytes())
    }

    pub fn write_u16(&mut self, value: u16) -> io::Result<()> {
        self.put(&value.to_be_bytes())
    }

    pub fn write_i16(&mut self, value: i16) -> io::Result<()> {
        self.put(&value.to_be_bytes())
    }

    pub fn write_i32(&mut self, value: i32) -> io::Result<()> {
        self.put(&value.to_be_bytes())
    }

    /// Write an f32, clamping near-zero magnitudes to `0.0`
    pub fn write_f32(&mut self, value: f32) -> io::Result<()> {
        self.put(&clamp_float(value).to_be_bytes())
    }

    /// Write UTF-8 bytes followed by a single zero terminator
    pub fn write_str(&mut self, value: &str) -> io::Result<()> {
        self.put(value.as_bytes())?;
        self.put(&[0])
    }

    pub fn write_all_u16(&mut self, values: &[u16]) -> io::Result<()> {
        for &value in values {
            self.write_u16(value)?;
        }
        Ok(())
    }

    pub fn write_all_f32(&mut self, values: &[f32]) -> io::Result<()> {
        for &value in values {
            self.write_f32(value)?;
        }
        Ok(())
    }

    /// Write each pair as two consecutive u16 values
    pub fn write_all_u16_pairs(&mut self, pairs: &[[u16; 2]]) -> io::Result<()> {
        for pair in pairs {
            self.write_all_u16(pair)?;
        }
        Ok(())
    }

    /// Flush and return the underlying sink
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}
