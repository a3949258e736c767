use serde::{Deserialize, Serialize};

use super::event::null_as_empty;
use super::AssetId;

/// A tracked physical item, as stored in the `assets` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub location: String,
    #[serde(default)]
    pub deleted: bool,
}

/// Insert payload for the `assets` table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewAsset {
    pub name: String,
    pub category: String,
    pub location: String,
    pub deleted: bool,
}

impl NewAsset {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            location: location.into(),
            deleted: false,
        }
    }
}
