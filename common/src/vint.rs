use std::io;
use std::io::{Read, Write};

use byteorder::ReadBytesExt;

use super::BinarySerializable;

/// Wrapper over a `u64` that serializes as a variable int.
///
/// The encoding is LEB128: 7 bits of payload per byte, least significant
/// group first. Every byte except the last one has its high bit set.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct VInt(pub u64);

const CONTINUATION_BIT: u8 = 128;

/// A `u64` never takes more than 10 bytes.
pub const MAX_VINT_NUM_BYTES: usize = 10;

impl VInt {
    pub fn val(&self) -> u64 {
        self.0
    }

    /// Deserializes a VInt and checks that it fits in a `u32`.
    pub fn deserialize_u32<R: Read>(reader: &mut R) -> io::Result<u32> {
        let val = VInt::deserialize(reader)?.val();
        u32::try_from(val).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("VInt {val} does not fit in a u32"),
            )
        })
    }

    /// Writes the encoded value into `buffer` and returns the number of bytes used.
    pub fn serialize_into(&self, buffer: &mut [u8; MAX_VINT_NUM_BYTES]) -> usize {
        let mut remaining = self.0;
        for (i, b) in buffer.iter_mut().enumerate() {
            let next_byte: u8 = (remaining % 128u64) as u8;
            remaining /= 128u64;
            if remaining == 0u64 {
                *b = next_byte;
                return i + 1;
            } else {
                *b = next_byte | CONTINUATION_BIT;
            }
        }
        unreachable!();
    }

    /// Number of bytes `val` takes once encoded.
    pub fn num_bytes(val: u64) -> usize {
        let num_bits = 64 - val.leading_zeros() as usize;
        ((num_bits + 6) / 7).max(1)
    }
}

impl BinarySerializable for VInt {
    fn serialize<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        let mut buffer = [0u8; MAX_VINT_NUM_BYTES];
        let num_bytes = self.serialize_into(&mut buffer);
        writer.write_all(&buffer[0..num_bytes])
    }

    fn deserialize<R: Read>(reader: &mut R) -> io::Result<Self> {
        let mut result = 0u64;
        let mut shift = 0u32;
        for _ in 0..MAX_VINT_NUM_BYTES {
            let b = reader.read_u8()?;
            result |= u64::from(b & 127u8) << shift;
            if b & CONTINUATION_BIT == 0 {
                return Ok(VInt(result));
            }
            shift += 7;
        }
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "VInt is longer than 10 bytes",
        ))
    }
}
