//! # Favorites Models
//!
//! Data types shared by the coordinator, the favorites store, and the
//! catalog service.

use serde::{Deserialize, Serialize};

/// A character the user marked as favorite.
///
/// Identity is `character_id`; the store keeps at most one record per id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FavoriteCharacter {
    #[serde(rename = "characterID")]
    pub character_id: i64,
}

impl FavoriteCharacter {
    pub fn new(character_id: i64) -> Self {
        Self { character_id }
    }
}

/// A full character record as served by the catalog.
///
/// Read-only from the coordinator's point of view. Display fields default
/// to empty strings when the catalog omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ki: String,
    #[serde(default)]
    pub max_ki: String,
    #[serde(default)]
    pub race: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub affiliation: String,
}

impl CharacterRecord {
    /// Create a record with only id and name set
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ki: String::new(),
            max_ki: String::new(),
            race: String::new(),
            gender: String::new(),
            description: String::new(),
            image: String::new(),
            affiliation: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favorite_wire_name() {
        let json = serde_json::to_value(FavoriteCharacter::new(7)).unwrap();
        assert_eq!(json, serde_json::json!({ "characterID": 7 }));
    }

    #[test]
    fn test_character_record_tolerates_missing_fields() {
        let record: CharacterRecord = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Goku",
            "maxKi": "90 Septillion",
            "deletedAt": null
        }))
        .unwrap();

        assert_eq!(record.id, 1);
        assert_eq!(record.max_ki, "90 Septillion");
        assert!(record.race.is_empty());
    }
}
