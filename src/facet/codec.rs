//! Wire format of a terms facet.
//!
//! ```text
//! name           : VInt byte length + UTF-8 bytes
//! comparator id  : u8
//! required size  : VInt
//! missing        : VInt
//! total          : VInt
//! entry count    : VInt
//! entries        : (term: fixed width, big-endian; count: VInt) * entry count
//! ```

use std::io::{self, Read, Write};

use common::{BinarySerializable, FixedSize, VInt};

use super::{ComparatorType, InternalTermsFacet, TermEntry, TermKey};
use crate::FacetError;

/// The entry count comes from the wire: never trust it for more than this
/// many slots of upfront allocation.
const MAX_PREALLOCATED_ENTRIES: usize = 4_096;

impl<K: TermKey> BinarySerializable for TermEntry<K> {
    fn serialize<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        // `K` is `serde::Serialize` too.
        BinarySerializable::serialize(&self.term, writer)?;
        VInt(self.count).serialize(writer)
    }

    fn deserialize<R: Read>(reader: &mut R) -> io::Result<Self> {
        let term = K::deserialize(reader)?;
        let count = VInt::deserialize(reader)?.val();
        Ok(TermEntry { term, count })
    }
}

impl<K: TermKey> BinarySerializable for InternalTermsFacet<K> {
    fn serialize<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        self.name.serialize(writer)?;
        self.comparator_type.id().serialize(writer)?;
        VInt(u64::from(self.required_size)).serialize(writer)?;
        VInt(self.missing).serialize(writer)?;
        VInt(self.total).serialize(writer)?;
        VInt(self.entries.len() as u64).serialize(writer)?;
        for entry in &self.entries {
            entry.serialize(writer)?;
        }
        Ok(())
    }

    fn deserialize<R: Read>(reader: &mut R) -> io::Result<Self> {
        let name = String::deserialize(reader)?;
        let comparator_type = ComparatorType::from_id(u8::deserialize(reader)?)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        let required_size = VInt::deserialize_u32(reader)?;
        let missing = VInt::deserialize(reader)?.val();
        let total = VInt::deserialize(reader)?.val();
        let num_entries = VInt::deserialize(reader)?.val();
        let capacity = usize::try_from(num_entries)
            .unwrap_or(usize::MAX)
            .min(MAX_PREALLOCATED_ENTRIES);
        let mut entries = Vec::with_capacity(capacity);
        for entry_ord in 0..num_entries {
            let entry = TermEntry::deserialize(reader).map_err(|err| {
                io::Error::new(
                    err.kind(),
                    format!(
                        "facet `{name}` declares {num_entries} entries, failed to read entry \
                         #{entry_ord}: {err}"
                    ),
                )
            })?;
            entries.push(entry);
        }
        Ok(InternalTermsFacet {
            name,
            comparator_type,
            required_size,
            entries,
            missing,
            total,
        })
    }
}

/// Writes `facet` into `writer`.
pub fn encode_into<K: TermKey, W: Write + ?Sized>(
    facet: &InternalTermsFacet<K>,
    writer: &mut W,
) -> crate::Result<()> {
    facet.serialize(writer)?;
    Ok(())
}

/// Number of bytes [`encode`] produces for `facet`.
pub fn encoded_len<K: TermKey>(facet: &InternalTermsFacet<K>) -> usize {
    let entries_len: usize = facet
        .entries
        .iter()
        .map(|entry| K::SIZE_IN_BYTES + VInt::num_bytes(entry.count))
        .sum();
    VInt::num_bytes(facet.name.len() as u64)
        + facet.name.len()
        + u8::SIZE_IN_BYTES
        + VInt::num_bytes(u64::from(facet.required_size))
        + VInt::num_bytes(facet.missing)
        + VInt::num_bytes(facet.total)
        + VInt::num_bytes(facet.entries.len() as u64)
        + entries_len
}

/// Serializes `facet` into a new buffer.
pub fn encode<K: TermKey>(facet: &InternalTermsFacet<K>) -> crate::Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(encoded_len(facet));
    encode_into(facet, &mut buffer)?;
    Ok(buffer)
}

/// Decodes one facet from the front of `bytes`, advancing the slice past it.
pub fn decode_from<K: TermKey>(bytes: &mut &[u8]) -> crate::Result<InternalTermsFacet<K>> {
    InternalTermsFacet::deserialize(bytes).map_err(FacetError::malformed)
}

/// Decodes a facet written by [`encode`].
pub fn decode<K: TermKey>(mut bytes: &[u8]) -> crate::Result<InternalTermsFacet<K>> {
    decode_from(&mut bytes)
}
