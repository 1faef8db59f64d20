use std::io::{Read, Write};
use std::{fmt, io};

use byteorder::{ReadBytesExt, WriteBytesExt};

use crate::{Endianness, VInt};

/// Trait for a simple binary serialization.
pub trait BinarySerializable: fmt::Debug + Sized {
    /// Serialize
    fn serialize<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()>;
    /// Deserialize
    fn deserialize<R: Read>(reader: &mut R) -> io::Result<Self>;
}

/// `FixedSize` marks a `BinarySerializable` that always serializes
/// as the same number of bytes.
pub trait FixedSize: BinarySerializable {
    const SIZE_IN_BYTES: usize;
}

impl BinarySerializable for () {
    fn serialize<W: Write + ?Sized>(&self, _: &mut W) -> io::Result<()> {
        Ok(())
    }
    fn deserialize<R: Read>(_: &mut R) -> io::Result<Self> {
        Ok(())
    }
}

impl FixedSize for () {
    const SIZE_IN_BYTES: usize = 0;
}

impl<Left: BinarySerializable, Right: BinarySerializable> BinarySerializable for (Left, Right) {
    fn serialize<W: Write + ?Sized>(&self, write: &mut W) -> io::Result<()> {
        self.0.serialize(write)?;
        self.1.serialize(write)
    }
    fn deserialize<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok((Left::deserialize(reader)?, Right::deserialize(reader)?))
    }
}

impl BinarySerializable for u8 {
    fn serialize<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u8(*self)
    }
    fn deserialize<R: Read>(reader: &mut R) -> io::Result<u8> {
        reader.read_u8()
    }
}

impl FixedSize for u8 {
    const SIZE_IN_BYTES: usize = 1;
}

macro_rules! impl_fixed_width {
    ($ty:ty, $write:ident, $read:ident, $num_bytes:expr) => {
        impl BinarySerializable for $ty {
            fn serialize<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
                writer.$write::<Endianness>(*self)
            }
            fn deserialize<R: Read>(reader: &mut R) -> io::Result<$ty> {
                reader.$read::<Endianness>()
            }
        }

        impl FixedSize for $ty {
            const SIZE_IN_BYTES: usize = $num_bytes;
        }
    };
}

impl_fixed_width!(u32, write_u32, read_u32, 4);
impl_fixed_width!(i32, write_i32, read_i32, 4);
impl_fixed_width!(u64, write_u64, read_u64, 8);
impl_fixed_width!(i64, write_i64, read_i64, 8);
impl_fixed_width!(f32, write_f32, read_f32, 4);
impl_fixed_width!(f64, write_f64, read_f64, 8);

impl BinarySerializable for String {
    fn serialize<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        let data: &[u8] = self.as_bytes();
        VInt(data.len() as u64).serialize(writer)?;
        writer.write_all(data)
    }

    fn deserialize<R: Read>(reader: &mut R) -> io::Result<String> {
        let string_length = VInt::deserialize(reader)?.val();
        let mut data = Vec::new();
        reader.take(string_length).read_to_end(&mut data)?;
        if data.len() as u64 != string_length {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "string declares {string_length} bytes, only {} available",
                    data.len()
                ),
            ));
        }
        String::from_utf8(data).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }
}
