use crate::utils::error::{DirectoryError, Result};
use crate::utils::validation::Validate;
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One spreadsheet row keyed by trimmed header name. Empty cells are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetRow {
    pub data: BTreeMap<String, serde_json::Value>,
}

impl SheetRow {
    pub fn get(&self, column: &str) -> Option<&serde_json::Value> {
        self.data.get(column)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Province {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub city_count: u64,
    #[serde(default)]
    pub sauna_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub name: String,
    pub slug: String,
    pub province: String,
    pub province_slug: String,
    #[serde(default)]
    pub sauna_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sauna {
    pub name: String,
    pub city: String,
    pub city_slug: String,
    pub province: String,
    pub province_slug: String,
    pub country: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
}

impl Sauna {
    /// The compound key the `saunas` collection is unique on.
    pub fn identity(&self) -> (&str, &str, &str) {
        (&self.name, &self.city, &self.province)
    }

    /// Identity after slug normalization; spelling variants of a city or
    /// province collapse to one key.
    pub fn slug_identity(&self) -> (&str, &str, &str) {
        (&self.name, &self.city_slug, &self.province_slug)
    }
}

/// A sauna as stored, with its database identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaunaRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(flatten)]
    pub sauna: Sauna,
}

/// The three collections derived from one spreadsheet.
#[derive(Debug, Clone, Default)]
pub struct DirectoryDataset {
    pub provinces: Vec<Province>,
    pub cities: Vec<City>,
    pub saunas: Vec<Sauna>,
    pub rows_read: usize,
    pub rows_dropped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub output_dir: String,
    pub provinces: usize,
    pub cities: usize,
    pub saunas: usize,
    pub rows_dropped: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub provinces: usize,
    pub cities_attempted: usize,
    pub cities_seeded: usize,
    pub cities_merged: usize,
    pub saunas_attempted: usize,
    pub saunas_seeded: usize,
}

fn require(entity: &str, field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(DirectoryError::validation(format!(
            "{} is missing required field '{}'",
            entity, field
        )));
    }
    Ok(())
}

impl Validate for Province {
    fn validate(&self) -> Result<()> {
        require("province", "name", &self.name)?;
        require("province", "slug", &self.slug)
    }
}

impl Validate for City {
    fn validate(&self) -> Result<()> {
        require("city", "name", &self.name)?;
        require("city", "slug", &self.slug)?;
        require("city", "province", &self.province)?;
        require("city", "provinceSlug", &self.province_slug)
    }
}

impl Validate for Sauna {
    fn validate(&self) -> Result<()> {
        require("sauna", "name", &self.name)?;
        require("sauna", "city", &self.city)?;
        require("sauna", "citySlug", &self.city_slug)?;
        require("sauna", "province", &self.province)?;
        require("sauna", "provinceSlug", &self.province_slug)?;
        require("sauna", "country", &self.country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sauna_omits_absent_optional_fields() {
        let sauna = Sauna {
            name: "Nordic Sauna".to_string(),
            city: "Banff ".to_string(),
            city_slug: "banff".to_string(),
            province: "Alberta".to_string(),
            province_slug: "alberta".to_string(),
            country: "Canada".to_string(),
            rating: Some(4.5),
            ..Default::default()
        };

        let json = serde_json::to_value(&sauna).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object["citySlug"], "banff");
        assert_eq!(object["rating"], 4.5);
        assert!(!object.contains_key("street"));
        assert!(!object.contains_key("images"));
        assert!(!object.contains_key("placeId"));
    }

    #[test]
    fn test_city_without_slug_fails_validation() {
        let city = City {
            name: "???".to_string(),
            slug: String::new(),
            province: "Quebec".to_string(),
            province_slug: "quebec".to_string(),
            sauna_count: 1,
        };
        assert!(city.validate().is_err());
    }
}
