//! Backend recommendation payload.

use serde::{Deserialize, Serialize};

/// A single recommended place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub address: String,
    pub link: String,
}

/// Weather text plus the two ranked place lists for one coordinate.
///
/// Absent and `null` lists deserialize to empty vectors; the render pipeline
/// decides how an empty list is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub message: String,
    #[serde(default, deserialize_with = "nullable_list")]
    pub attractions: Vec<Place>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub places: Vec<Place>,
}

fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<Place>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Place>>::deserialize(deserializer)?.unwrap_or_default())
}

impl RecommendationResult {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            attractions: Vec::new(),
            places: Vec::new(),
        }
    }
}
