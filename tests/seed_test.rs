use anyhow::Result;
use sauna_directory::core::{DirectoryReader, DirectoryWriter};
use sauna_directory::domain::ports::CollectionName;
use sauna_directory::{
    DirectoryError, EtlEngine, ImportConfig, ImportPipeline, LocalStorage, MemoryStore, SeedConfig,
    Seeder,
};
use serde_json::json;
use tempfile::TempDir;

fn write_fixtures(
    dir: &TempDir,
    provinces: serde_json::Value,
    cities: serde_json::Value,
    saunas: serde_json::Value,
) -> Result<()> {
    std::fs::write(dir.path().join("provinces.json"), serde_json::to_vec_pretty(&provinces)?)?;
    std::fs::write(dir.path().join("cities.json"), serde_json::to_vec_pretty(&cities)?)?;
    std::fs::write(dir.path().join("saunas.json"), serde_json::to_vec_pretty(&saunas)?)?;
    Ok(())
}

fn seeder_for(dir: &TempDir) -> Seeder<LocalStorage> {
    Seeder::new(
        LocalStorage::new(dir.path()),
        SeedConfig {
            data_dir: dir.path().to_path_buf(),
        },
    )
}

fn alberta() -> serde_json::Value {
    json!([{"name": "Alberta", "slug": "alberta", "cityCount": 1, "saunaCount": 3}])
}

fn sauna(name: &str, city: &str) -> serde_json::Value {
    json!({
        "name": name,
        "city": city,
        "citySlug": "banff",
        "province": "Alberta",
        "provinceSlug": "alberta",
        "country": "Canada"
    })
}

#[tokio::test]
async fn test_duplicate_city_slugs_are_merged() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_fixtures(
        &temp_dir,
        alberta(),
        json!([
            {"name": "Banff", "slug": "banff", "province": "Alberta", "provinceSlug": "alberta", "saunaCount": 2},
            {"name": "Banff ", "slug": "banff", "province": "Alberta", "provinceSlug": "alberta", "saunaCount": 1}
        ]),
        json!([]),
    )?;

    let store = MemoryStore::new();
    let report = seeder_for(&temp_dir).run(&store).await?;

    assert_eq!(report.cities_merged, 1);
    assert_eq!(report.cities_attempted, 1);
    assert_eq!(report.cities_seeded, 1);

    let city = store.find_city("banff").await?.expect("merged city");
    assert_eq!(city.name, "Banff");
    assert_eq!(city.sauna_count, 3);
    assert_eq!(store.count(CollectionName::Cities).await, 1);
    Ok(())
}

#[tokio::test]
async fn test_duplicate_sauna_is_skipped_not_fatal() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_fixtures(
        &temp_dir,
        alberta(),
        json!([]),
        json!([
            sauna("Nordic Sauna", "Banff"),
            sauna("Nordic Sauna", "Banff"),
            sauna("Cabin Steam", "Banff"),
        ]),
    )?;

    let store = MemoryStore::new();
    let report = seeder_for(&temp_dir).run(&store).await?;

    assert_eq!(report.saunas_attempted, 3);
    assert_eq!(report.saunas_seeded, 2);

    let saunas = store.find_saunas_by_city("banff").await?;
    let names: Vec<&str> = saunas.iter().map(|r| r.sauna.name.as_str()).collect();
    assert_eq!(names, ["Cabin Steam", "Nordic Sauna"]);
    assert_ne!(saunas[0].id, saunas[1].id);
    Ok(())
}

#[tokio::test]
async fn test_sauna_city_spelling_variants_seed_once() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_fixtures(
        &temp_dir,
        alberta(),
        json!([]),
        json!([sauna("Nordic Sauna", "Banff"), sauna("Nordic Sauna", "Banff ")]),
    )?;

    let store = MemoryStore::new();
    let report = seeder_for(&temp_dir).run(&store).await?;

    assert_eq!(report.saunas_attempted, 2);
    assert_eq!(report.saunas_seeded, 1);

    let saunas = store.find_saunas_by_city("banff").await?;
    assert_eq!(saunas.len(), 1);
    assert_eq!(saunas[0].sauna.city, "Banff");
    Ok(())
}

#[tokio::test]
async fn test_empty_saunas_fixture_seeds_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_fixtures(&temp_dir, json!([]), json!([]), json!([]))?;

    let store = MemoryStore::new();
    let report = seeder_for(&temp_dir).run(&store).await?;

    assert_eq!(report.provinces, 0);
    assert_eq!(report.saunas_attempted, 0);
    assert_eq!(report.saunas_seeded, 0);
    Ok(())
}

#[tokio::test]
async fn test_seed_replaces_previous_contents() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = MemoryStore::new();

    write_fixtures(&temp_dir, alberta(), json!([]), json!([sauna("Old Sauna", "Banff")]))?;
    seeder_for(&temp_dir).run(&store).await?;

    write_fixtures(&temp_dir, alberta(), json!([]), json!([sauna("New Sauna", "Banff")]))?;
    let report = seeder_for(&temp_dir).run(&store).await?;

    assert_eq!(report.provinces, 1);
    assert_eq!(report.saunas_seeded, 1);
    assert_eq!(store.count(CollectionName::Provinces).await, 1);
    let saunas = store.find_saunas_by_city("banff").await?;
    assert_eq!(saunas.len(), 1);
    assert_eq!(saunas[0].sauna.name, "New Sauna");
    Ok(())
}

#[tokio::test]
async fn test_record_missing_required_field_is_skipped() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_fixtures(
        &temp_dir,
        alberta(),
        json!([
            {"name": "!!!", "slug": "", "province": "Alberta", "provinceSlug": "alberta", "saunaCount": 1},
            {"name": "Canmore", "slug": "canmore", "province": "Alberta", "provinceSlug": "alberta", "saunaCount": 1}
        ]),
        json!([]),
    )?;

    let store = MemoryStore::new();
    let report = seeder_for(&temp_dir).run(&store).await?;

    assert_eq!(report.cities_attempted, 2);
    assert_eq!(report.cities_seeded, 1);
    Ok(())
}

#[tokio::test]
async fn test_missing_fixture_aborts_run() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("provinces.json"), "[]")?;

    let store = MemoryStore::new();
    let err = seeder_for(&temp_dir).run(&store).await.unwrap_err();

    assert!(matches!(err, DirectoryError::IoError(_)));
    Ok(())
}

#[tokio::test]
async fn test_malformed_fixture_aborts_run() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_fixtures(&temp_dir, json!([]), json!([]), json!([]))?;
    std::fs::write(temp_dir.path().join("cities.json"), "{ not json")?;

    let store = MemoryStore::new();
    let err = seeder_for(&temp_dir).run(&store).await.unwrap_err();

    assert!(matches!(err, DirectoryError::SerializationError(_)));
    Ok(())
}

#[tokio::test]
async fn test_import_then_seed_round_trip() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("sauna-data.csv");
    std::fs::write(
        &input,
        "name,city,province,country\n\
         Nordic Sauna,Banff,Alberta,Canada\n\
         Cabin Steam,Banff ,Alberta,Canada\n\
         Nordic Sauna,Banff,Alberta,Canada\n\
         Urban Steam House,Vancouver,British Columbia,Canada\n",
    )?;

    let data_dir = temp_dir.path().join("data");
    EtlEngine::new(ImportPipeline::new(
        LocalStorage::new(temp_dir.path()),
        ImportConfig {
            input,
            sheet: None,
            output_dir: data_dir.clone(),
        },
    ))
    .run()
    .await?;

    let store = MemoryStore::new();
    let report = Seeder::new(LocalStorage::new(temp_dir.path()), SeedConfig { data_dir })
        .run(&store)
        .await?;

    assert_eq!(report.provinces, 2);
    assert_eq!(report.cities_merged, 1);
    assert_eq!(report.cities_seeded, 2);
    assert_eq!(report.saunas_attempted, 4);
    assert_eq!(report.saunas_seeded, 3);

    let banff = store.find_city("banff").await?.expect("banff");
    assert_eq!(banff.sauna_count, 3);

    store.drop_collection(CollectionName::Saunas).await?;
    assert_eq!(store.count(CollectionName::Saunas).await, 0);
    Ok(())
}
