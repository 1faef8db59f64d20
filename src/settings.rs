use serde::{Deserialize, Serialize};

/// Default number of idle scratch maps a reducer keeps around.
pub const DEFAULT_MAX_RECYCLED_MAPS: usize = 16;

/// Scratch maps that grew past this many terms are released instead of recycled.
pub const DEFAULT_MAX_RECYCLED_CAPACITY: usize = 1 << 16;

/// Settings of a [`TermsFacetReducer`](crate::facet::TermsFacetReducer).
///
/// ```rust
/// use termfacet::ReducerSettings;
///
/// let settings = ReducerSettings::from_json(r#"{ "max_recycled_maps": 4 }"#).unwrap();
/// assert_eq!(settings.max_recycled_maps, 4);
/// assert_eq!(settings.max_recycled_capacity, 65_536);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReducerSettings {
    /// Maximum number of idle scratch maps kept for reuse.
    /// 0 disables recycling: every reduction allocates its own map.
    pub max_recycled_maps: usize,
    /// Capacity, in terms, above which a scratch map is dropped on release.
    pub max_recycled_capacity: usize,
}

impl Default for ReducerSettings {
    fn default() -> ReducerSettings {
        ReducerSettings {
            max_recycled_maps: DEFAULT_MAX_RECYCLED_MAPS,
            max_recycled_capacity: DEFAULT_MAX_RECYCLED_CAPACITY,
        }
    }
}

impl ReducerSettings {
    /// Parses settings from their JSON representation.
    /// Missing fields take their default value.
    pub fn from_json(json: &str) -> crate::Result<ReducerSettings> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::ReducerSettings;
    use crate::FacetError;

    #[test]
    fn test_settings_defaults() {
        let settings = ReducerSettings::from_json("{}").unwrap();
        assert_eq!(settings, ReducerSettings::default());
    }

    #[test]
    fn test_settings_round_trip() {
        let settings = ReducerSettings {
            max_recycled_maps: 0,
            max_recycled_capacity: 12,
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(json, r#"{"max_recycled_maps":0,"max_recycled_capacity":12}"#);
        assert_eq!(ReducerSettings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_settings_unknown_field() {
        let err = ReducerSettings::from_json(r#"{ "max_maps": 3 }"#).unwrap_err();
        assert!(matches!(err, FacetError::InvalidSettings(_)));
    }
}
