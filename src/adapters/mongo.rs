use crate::domain::model::{City, Province, Sauna, SaunaRecord};
use crate::domain::ports::{CollectionName, DirectoryReader, DirectoryWriter};
use crate::utils::error::{DirectoryError, Result};
use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Document};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{FindOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use serde::Serialize;

const DUPLICATE_KEY: i32 = 11000;

/// Database name used when the connection string does not name one.
pub const DEFAULT_DATABASE: &str = "sauna-directory";

/// MongoDB-backed directory store. Owns the client; call [`MongoStore::close`]
/// when the run is over.
pub struct MongoStore {
    client: Client,
    database: Database,
}

impl MongoStore {
    pub async fn connect(uri: &str, database: Option<&str>) -> Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        let database = match database {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
        };
        tracing::info!("Connected to MongoDB database '{}'", database.name());
        Ok(Self { client, database })
    }

    pub async fn close(self) {
        self.client.shutdown().await;
        tracing::info!("Disconnected from MongoDB");
    }

    fn documents(&self, collection: CollectionName) -> Collection<Document> {
        self.database.collection(collection.as_str())
    }

    fn provinces(&self) -> Collection<Province> {
        self.database.collection(CollectionName::Provinces.as_str())
    }

    fn cities(&self) -> Collection<City> {
        self.database.collection(CollectionName::Cities.as_str())
    }

    fn saunas(&self) -> Collection<SaunaRecord> {
        self.database.collection(CollectionName::Saunas.as_str())
    }

    async fn insert_one_document(&self, collection: CollectionName, document: Document, key: String) -> Result<()> {
        self.documents(collection)
            .insert_one(document, None)
            .await
            .map_err(|e| classify_insert_error(e, collection, key))?;
        Ok(())
    }
}

/// Serializes a record and stamps `createdAt`/`updatedAt`.
fn timestamped<T: Serialize>(record: &T) -> Result<Document> {
    let mut document = bson::to_document(record)?;
    let now = bson::DateTime::from_chrono(Utc::now());
    document.insert("createdAt", now);
    document.insert("updatedAt", now);
    Ok(document)
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

fn classify_insert_error(
    error: mongodb::error::Error,
    collection: CollectionName,
    key: String,
) -> DirectoryError {
    if is_duplicate_key(&error) {
        DirectoryError::DuplicateKeyError {
            collection: collection.to_string(),
            key,
        }
    } else {
        DirectoryError::DatabaseError(error)
    }
}

fn sorted_by_name() -> FindOptions {
    FindOptions::builder().sort(doc! { "name": 1 }).build()
}

#[async_trait]
impl DirectoryWriter for MongoStore {
    async fn drop_collection(&self, collection: CollectionName) -> Result<bool> {
        // drop() 對不存在的集合也回傳 Ok，先查名稱
        let existing = self
            .database
            .list_collection_names(doc! { "name": collection.as_str() })
            .await?;
        if existing.is_empty() {
            return Ok(false);
        }
        self.documents(collection).drop(None).await?;
        Ok(true)
    }

    async fn ensure_indexes(&self) -> Result<()> {
        let unique = || IndexOptions::builder().unique(true).build();

        self.documents(CollectionName::Provinces)
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "slug": 1 })
                    .options(unique())
                    .build(),
                None,
            )
            .await?;

        self.documents(CollectionName::Cities)
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "slug": 1 })
                    .options(unique())
                    .build(),
                None,
            )
            .await?;

        let saunas = self.documents(CollectionName::Saunas);
        saunas
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "name": 1, "city": 1, "province": 1 })
                    .options(unique())
                    .build(),
                None,
            )
            .await?;
        saunas
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "placeId": 1 })
                    .options(IndexOptions::builder().sparse(true).build())
                    .build(),
                None,
            )
            .await?;
        saunas
            .create_index(IndexModel::builder().keys(doc! { "citySlug": 1 }).build(), None)
            .await?;

        tracing::debug!("Ensured indexes on provinces, cities and saunas");
        Ok(())
    }

    async fn insert_provinces(&self, provinces: &[Province]) -> Result<usize> {
        if provinces.is_empty() {
            return Ok(0);
        }

        let documents = provinces.iter().map(timestamped).collect::<Result<Vec<_>>>()?;
        let result = self
            .documents(CollectionName::Provinces)
            .insert_many(documents, None)
            .await?;
        Ok(result.inserted_ids.len())
    }

    async fn insert_city(&self, city: &City) -> Result<()> {
        self.insert_one_document(CollectionName::Cities, timestamped(city)?, city.slug.clone())
            .await
    }

    async fn insert_sauna(&self, id: ObjectId, sauna: &Sauna) -> Result<()> {
        let mut document = timestamped(sauna)?;
        document.insert("_id", id);
        let key = format!("{}/{}/{}", sauna.name, sauna.city, sauna.province);
        self.insert_one_document(CollectionName::Saunas, document, key).await
    }
}

#[async_trait]
impl DirectoryReader for MongoStore {
    async fn list_provinces(&self) -> Result<Vec<Province>> {
        let cursor = self.provinces().find(None, sorted_by_name()).await?;
        let provinces: Vec<Province> = cursor.try_collect().await?;
        Ok(provinces)
    }

    async fn find_province(&self, slug: &str) -> Result<Option<Province>> {
        Ok(self.provinces().find_one(doc! { "slug": slug }, None).await?)
    }

    async fn find_cities_by_province(&self, province_slug: &str) -> Result<Vec<City>> {
        let cursor = self
            .cities()
            .find(doc! { "provinceSlug": province_slug }, sorted_by_name())
            .await?;
        let cities: Vec<City> = cursor.try_collect().await?;
        Ok(cities)
    }

    async fn find_city(&self, slug: &str) -> Result<Option<City>> {
        Ok(self.cities().find_one(doc! { "slug": slug }, None).await?)
    }

    async fn find_saunas_by_city(&self, city_slug: &str) -> Result<Vec<SaunaRecord>> {
        let cursor = self
            .saunas()
            .find(doc! { "citySlug": city_slug }, sorted_by_name())
            .await?;
        let saunas: Vec<SaunaRecord> = cursor.try_collect().await?;
        Ok(saunas)
    }

    async fn find_sauna(&self, id: ObjectId) -> Result<Option<SaunaRecord>> {
        Ok(self.saunas().find_one(doc! { "_id": id }, None).await?)
    }
}
