//! Terms facets whose key kind is only known at runtime.
//!
//! On the wire, such a facet is prefixed by its stream type
//! (`fTerms`, `dTerms`, `iTerms` or `lTerms`).

use std::io::{self, Read, Write};

use common::BinarySerializable;

use super::term_key::{
    DOUBLE_TERMS_STREAM, FLOAT_TERMS_STREAM, INT_TERMS_STREAM, LONG_TERMS_STREAM,
};
use super::{InternalTermsFacet, TermKey, TermsFacetReducer};
use crate::FacetError;

/// A terms facet over any of the supported key kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum TermsFacet {
    /// `f32` terms.
    Float(InternalTermsFacet<f32>),
    /// `f64` terms.
    Double(InternalTermsFacet<f64>),
    /// `i32` terms.
    Int(InternalTermsFacet<i32>),
    /// `i64` terms.
    Long(InternalTermsFacet<i64>),
}

/// Key kinds that can be wrapped into a [`TermsFacet`].
pub trait StreamKey: TermKey {
    fn into_terms_facet(facet: InternalTermsFacet<Self>) -> TermsFacet;

    /// Returns the facet back if it is of another key kind.
    fn from_terms_facet(facet: TermsFacet) -> Result<InternalTermsFacet<Self>, TermsFacet>;
}

macro_rules! impl_stream_key {
    ($ty:ty, $variant:ident) => {
        impl StreamKey for $ty {
            fn into_terms_facet(facet: InternalTermsFacet<$ty>) -> TermsFacet {
                TermsFacet::$variant(facet)
            }

            fn from_terms_facet(facet: TermsFacet) -> Result<InternalTermsFacet<$ty>, TermsFacet> {
                match facet {
                    TermsFacet::$variant(facet) => Ok(facet),
                    other => Err(other),
                }
            }
        }

        impl From<InternalTermsFacet<$ty>> for TermsFacet {
            fn from(facet: InternalTermsFacet<$ty>) -> TermsFacet {
                TermsFacet::$variant(facet)
            }
        }
    };
}

impl_stream_key!(f32, Float);
impl_stream_key!(f64, Double);
impl_stream_key!(i32, Int);
impl_stream_key!(i64, Long);

macro_rules! for_each_kind {
    ($facet:expr, $inner:ident => $body:expr) => {
        match $facet {
            TermsFacet::Float($inner) => $body,
            TermsFacet::Double($inner) => $body,
            TermsFacet::Int($inner) => $body,
            TermsFacet::Long($inner) => $body,
        }
    };
}

impl TermsFacet {
    pub fn name(&self) -> &str {
        for_each_kind!(self, facet => facet.name())
    }

    pub fn stream_type(&self) -> &'static str {
        for_each_kind!(self, facet => facet.stream_type())
    }

    pub fn missing_count(&self) -> u64 {
        for_each_kind!(self, facet => facet.missing_count())
    }

    pub fn total_count(&self) -> u64 {
        for_each_kind!(self, facet => facet.total_count())
    }

    pub fn other_count(&self) -> u64 {
        for_each_kind!(self, facet => facet.other_count())
    }

    /// Number of entries held.
    pub fn num_entries(&self) -> usize {
        for_each_kind!(self, facet => facet.entries().len())
    }

    /// Reduces facets of the same key kind.
    ///
    /// Fails with [`FacetError::InvalidReduceInput`] when key kinds are mixed,
    /// on top of the checks done by [`TermsFacetReducer::reduce`].
    pub fn reduce(
        reducer: &TermsFacetReducer,
        facets: Vec<TermsFacet>,
    ) -> crate::Result<TermsFacet> {
        match facets.first() {
            None => Err(FacetError::InvalidReduceInput(
                "cannot reduce an empty list of facets".to_string(),
            )),
            Some(TermsFacet::Float(_)) => reduce_kind::<f32>(reducer, facets),
            Some(TermsFacet::Double(_)) => reduce_kind::<f64>(reducer, facets),
            Some(TermsFacet::Int(_)) => reduce_kind::<i32>(reducer, facets),
            Some(TermsFacet::Long(_)) => reduce_kind::<i64>(reducer, facets),
        }
    }
}

fn reduce_kind<K: StreamKey>(
    reducer: &TermsFacetReducer,
    facets: Vec<TermsFacet>,
) -> crate::Result<TermsFacet> {
    let typed_facets = facets
        .into_iter()
        .map(|facet| {
            K::from_terms_facet(facet).map_err(|other| {
                FacetError::InvalidReduceInput(format!(
                    "cannot reduce `{}` facet `{}` with `{}` facets",
                    other.stream_type(),
                    other.name(),
                    K::STREAM_TYPE
                ))
            })
        })
        .collect::<crate::Result<Vec<InternalTermsFacet<K>>>>()?;
    reducer.reduce(typed_facets).map(K::into_terms_facet)
}

impl BinarySerializable for TermsFacet {
    fn serialize<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        self.stream_type().to_string().serialize(writer)?;
        for_each_kind!(self, facet => facet.serialize(writer))
    }

    fn deserialize<R: Read>(reader: &mut R) -> io::Result<Self> {
        let stream_type = String::deserialize(reader)?;
        match stream_type.as_str() {
            FLOAT_TERMS_STREAM => InternalTermsFacet::deserialize(reader).map(TermsFacet::Float),
            DOUBLE_TERMS_STREAM => InternalTermsFacet::deserialize(reader).map(TermsFacet::Double),
            INT_TERMS_STREAM => InternalTermsFacet::deserialize(reader).map(TermsFacet::Int),
            LONG_TERMS_STREAM => InternalTermsFacet::deserialize(reader).map(TermsFacet::Long),
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unknown terms facet stream type `{stream_type}`"),
            )),
        }
    }
}

impl TermsFacet {
    /// Writes the stream type followed by the facet.
    pub fn encode(&self) -> crate::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.serialize(&mut buffer)?;
        Ok(buffer)
    }

    /// Reads a facet written by [`TermsFacet::encode`].
    pub fn decode(mut bytes: &[u8]) -> crate::Result<TermsFacet> {
        TermsFacet::deserialize(&mut bytes).map_err(FacetError::malformed)
    }
}
