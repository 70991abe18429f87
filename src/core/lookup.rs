use crate::domain::model::{City, Province, Sauna, SaunaRecord};
use crate::domain::ports::DirectoryReader;
use crate::utils::error::Result;
use bson::oid::ObjectId;
use serde::Serialize;

pub const NO_DESCRIPTION: &str = "No description available";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProvinceView {
    #[serde(flatten)]
    pub province: Province,
    pub cities: Vec<City>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityView {
    #[serde(flatten)]
    pub city: City,
    pub saunas: Vec<SaunaListing>,
}

/// A stored sauna with its id rendered as hex.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaunaListing {
    pub id: String,
    #[serde(flatten)]
    pub sauna: Sauna,
}

impl From<SaunaRecord> for SaunaListing {
    fn from(record: SaunaRecord) -> Self {
        Self {
            id: record.id.to_hex(),
            sauna: record.sauna,
        }
    }
}

/// Sauna detail page data. Missing text renders as `""`, missing numbers as 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaunaDetail {
    pub id: String,
    pub name: String,
    pub city: String,
    pub province: String,
    pub street: String,
    pub postal_code: String,
    pub phone: String,
    pub website: String,
    pub email: String,
    pub description: String,
    pub rating: f64,
    pub review_count: i64,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl From<SaunaRecord> for SaunaDetail {
    fn from(record: SaunaRecord) -> Self {
        let SaunaRecord { id, sauna } = record;
        Self {
            id: id.to_hex(),
            name: sauna.name,
            city: sauna.city,
            province: sauna.province,
            street: sauna.street.unwrap_or_default(),
            postal_code: sauna.postal_code.unwrap_or_default(),
            phone: sauna.phone.unwrap_or_default(),
            website: sauna.website.unwrap_or_default(),
            email: sauna.email.unwrap_or_default(),
            description: sauna
                .description
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            rating: sauna.rating.unwrap_or(0.0),
            review_count: sauna.review_count.unwrap_or(0),
            images: sauna.images.unwrap_or_default(),
            latitude: sauna.latitude,
            longitude: sauna.longitude,
        }
    }
}

/// Read paths behind the province, city and sauna pages.
pub struct DirectoryLookup<'a> {
    reader: &'a dyn DirectoryReader,
}

impl<'a> DirectoryLookup<'a> {
    pub fn new(reader: &'a dyn DirectoryReader) -> Self {
        Self { reader }
    }

    pub async fn provinces(&self) -> Result<Vec<Province>> {
        self.reader.list_provinces().await
    }

    pub async fn province(&self, slug: &str) -> Result<Option<ProvinceView>> {
        let Some(province) = self.reader.find_province(slug).await? else {
            return Ok(None);
        };
        let cities = self.reader.find_cities_by_province(&province.slug).await?;
        Ok(Some(ProvinceView { province, cities }))
    }

    pub async fn cities(&self, province_slug: &str) -> Result<Vec<City>> {
        self.reader.find_cities_by_province(province_slug).await
    }

    pub async fn city(&self, slug: &str) -> Result<Option<CityView>> {
        let Some(city) = self.reader.find_city(slug).await? else {
            return Ok(None);
        };
        let saunas = self.saunas(&city.slug).await?;
        Ok(Some(CityView { city, saunas }))
    }

    pub async fn saunas(&self, city_slug: &str) -> Result<Vec<SaunaListing>> {
        let records = self.reader.find_saunas_by_city(city_slug).await?;
        Ok(records.into_iter().map(SaunaListing::from).collect())
    }

    /// Fails on a malformed id; `Ok(None)` when no sauna has it.
    pub async fn sauna(&self, id: &str) -> Result<Option<SaunaDetail>> {
        let id = ObjectId::parse_str(id)?;
        let record = self.reader.find_sauna(id).await?;
        Ok(record.map(SaunaDetail::from))
    }
}
