//! Serialization of reduced facets, as returned to clients.
//!
//! ```json
//! {
//!   "price": {
//!     "_type": "terms",
//!     "missing": 1,
//!     "total": 18,
//!     "other": 7,
//!     "terms": [ { "term": 1.0, "count": 7 }, { "term": 3.0, "count": 4 } ]
//!   }
//! }
//! ```

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use super::{InternalTermsFacet, TermKey, TermsFacet};

impl<K: TermKey> Serialize for InternalTermsFacet<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut facet = serializer.serialize_struct("TermsFacet", 5)?;
        facet.serialize_field("_type", self.facet_type())?;
        facet.serialize_field("missing", &self.missing)?;
        facet.serialize_field("total", &self.total)?;
        facet.serialize_field("other", &self.other_count())?;
        facet.serialize_field("terms", &self.entries)?;
        facet.end()
    }
}

impl Serialize for TermsFacet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TermsFacet::Float(facet) => facet.serialize(serializer),
            TermsFacet::Double(facet) => facet.serialize(serializer),
            TermsFacet::Int(facet) => facet.serialize(serializer),
            TermsFacet::Long(facet) => facet.serialize(serializer),
        }
    }
}

/// The reduced facets of a query, serialized as an object keyed by facet name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FacetResponse {
    facets: Vec<TermsFacet>,
}

impl FacetResponse {
    pub fn new() -> FacetResponse {
        FacetResponse::default()
    }

    /// Adds a facet. The facets keep their insertion order once serialized.
    pub fn push(&mut self, facet: impl Into<TermsFacet>) {
        self.facets.push(facet.into());
    }

    /// Returns the facet with the given name.
    pub fn get(&self, name: &str) -> Option<&TermsFacet> {
        self.facets.iter().find(|facet| facet.name() == name)
    }

    pub fn facets(&self) -> &[TermsFacet] {
        &self.facets
    }
}

impl FromIterator<TermsFacet> for FacetResponse {
    fn from_iter<I: IntoIterator<Item = TermsFacet>>(facets: I) -> FacetResponse {
        FacetResponse {
            facets: facets.into_iter().collect(),
        }
    }
}

impl Serialize for FacetResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.facets.len()))?;
        for facet in &self.facets {
            map.serialize_entry(facet.name(), facet)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::FacetResponse;
    use crate::facet::{ComparatorType, InternalTermsFacet, TermEntry};

    #[test]
    fn test_render_terms_facet() {
        let facet = InternalTermsFacet::new(
            "price",
            ComparatorType::Count,
            2,
            vec![TermEntry::new(1.0f32, 7), TermEntry::new(3.0f32, 4)],
            1,
            18,
        );
        let rendered = serde_json::to_value(&facet).unwrap();
        assert_eq!(
            rendered,
            json!({
                "_type": "terms",
                "missing": 1,
                "total": 18,
                "other": 7,
                "terms": [
                    { "term": 1.0, "count": 7 },
                    { "term": 3.0, "count": 4 }
                ]
            })
        );
    }

    #[test]
    fn test_render_facet_response() {
        let mut response = FacetResponse::new();
        response.push(InternalTermsFacet::new(
            "year",
            ComparatorType::Term,
            1,
            vec![TermEntry::new(1999i64, 2)],
            0,
            2,
        ));
        response.push(InternalTermsFacet::<i32>::new(
            "age",
            ComparatorType::Count,
            1,
            Vec::new(),
            4,
            0,
        ));
        assert_eq!(response.get("age").map(|facet| facet.missing_count()), Some(4));
        assert!(response.get("price").is_none());
        let rendered = serde_json::to_string(&response).unwrap();
        assert_eq!(
            rendered,
            r#"{"year":{"_type":"terms","missing":0,"total":2,"other":0,"terms":[{"term":1999,"count":2}]},"age":{"_type":"terms","missing":4,"total":0,"other":0,"terms":[]}}"#
        );
    }
}
