use crate::adapters::spreadsheet::SUPPORTED_EXTENSIONS;
use crate::config::toml_config::FileConfig;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_connection_string, validate_file_extension, validate_non_empty_string, validate_path,
    validate_required_field, Validate,
};
use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "data/sauna-data.xlsx";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const MONGODB_URI_VAR: &str = "MONGODB_URI";

pub const PROVINCES_FILE: &str = "provinces.json";
pub const CITIES_FILE: &str = "cities.json";
pub const SAUNAS_FILE: &str = "saunas.json";

/// Resolved settings for one import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    pub input: PathBuf,
    pub sheet: Option<String>,
    pub output_dir: PathBuf,
}

impl ImportConfig {
    /// CLI value, then config file, then default.
    pub fn resolve(
        input: Option<PathBuf>,
        sheet: Option<String>,
        output_dir: Option<PathBuf>,
        file: &FileConfig,
    ) -> Self {
        Self {
            input: input
                .or_else(|| file.import.input.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)),
            sheet: sheet.or_else(|| file.import.sheet.clone()),
            output_dir: output_dir
                .or_else(|| file.import.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self::resolve(None, None, None, &FileConfig::default())
    }
}

impl Validate for ImportConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        validate_file_extension("input", &self.input, &SUPPORTED_EXTENSIONS)?;
        validate_path("output_dir", &self.output_dir)?;
        if let Some(sheet) = &self.sheet {
            validate_non_empty_string("sheet", sheet)?;
        }
        Ok(())
    }
}

/// Resolved settings for one seed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedConfig {
    pub data_dir: PathBuf,
}

impl SeedConfig {
    pub fn resolve(data_dir: Option<PathBuf>, file: &FileConfig) -> Self {
        Self {
            data_dir: data_dir
                .or_else(|| file.seed.data_dir.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
        }
    }

    pub fn provinces_path(&self) -> PathBuf {
        self.data_dir.join(PROVINCES_FILE)
    }

    pub fn cities_path(&self) -> PathBuf {
        self.data_dir.join(CITIES_FILE)
    }

    pub fn saunas_path(&self) -> PathBuf {
        self.data_dir.join(SAUNAS_FILE)
    }
}

impl Validate for SeedConfig {
    fn validate(&self) -> Result<()> {
        validate_path("data_dir", &self.data_dir)
    }
}

/// Connection settings. The URI is required; its absence stops the run
/// before anything touches the database.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub uri: String,
    pub database: Option<String>,
}

impl std::fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("uri", &"***")
            .field("database", &self.database)
            .finish()
    }
}

impl DatabaseSettings {
    /// Config file URI first, then `MONGODB_URI` from the environment.
    pub fn resolve(database: Option<String>, file: &FileConfig) -> Result<Self> {
        Self::resolve_with_env(database, file, std::env::var(MONGODB_URI_VAR).ok())
    }

    pub fn resolve_with_env(
        database: Option<String>,
        file: &FileConfig,
        env_uri: Option<String>,
    ) -> Result<Self> {
        let uri = file
            .database_uri()
            .map(str::to_string)
            .or_else(|| env_uri.filter(|v| !v.trim().is_empty()));
        let uri = validate_required_field(MONGODB_URI_VAR, &uri)?.clone();

        let settings = Self {
            uri,
            database: database.or_else(|| file.database.name.clone()),
        };
        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for DatabaseSettings {
    fn validate(&self) -> Result<()> {
        validate_connection_string(MONGODB_URI_VAR, &self.uri)?;
        if let Some(name) = &self.database {
            validate_non_empty_string("database", name)?;
        }
        Ok(())
    }
}

/// Loads `.env.local`, then `.env`. Variables already set win.
pub fn load_env_files() {
    for file in [".env.local", ".env"] {
        match dotenv::from_filename(file) {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("Ignoring unreadable {}: {}", file, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::DirectoryError;

    #[test]
    fn test_cli_overrides_file_overrides_default() {
        let file = FileConfig::from_toml_str(
            r#"
[import]
input = "from-file.csv"
output_dir = "out"
"#,
        )
        .unwrap();

        let config = ImportConfig::resolve(Some(PathBuf::from("cli.xlsx")), None, None, &file);
        assert_eq!(config.input, PathBuf::from("cli.xlsx"));
        assert_eq!(config.output_dir, PathBuf::from("out"));

        let config = ImportConfig::resolve(None, None, None, &file);
        assert_eq!(config.input, PathBuf::from("from-file.csv"));

        let config = ImportConfig::default();
        assert_eq!(config.input, PathBuf::from(DEFAULT_INPUT));
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_DATA_DIR));
    }

    #[test]
    fn test_import_config_rejects_unknown_extension() {
        let config = ImportConfig::resolve(Some(PathBuf::from("saunas.pdf")), None, None, &FileConfig::default());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_seed_paths() {
        let config = SeedConfig::resolve(Some(PathBuf::from("fixtures")), &FileConfig::default());
        assert_eq!(config.saunas_path(), PathBuf::from("fixtures/saunas.json"));
        assert_eq!(config.provinces_path(), PathBuf::from("fixtures/provinces.json"));
    }

    #[test]
    fn test_database_uri_from_file() {
        let file = FileConfig::from_toml_str(
            r#"
[database]
uri = "mongodb://localhost:27017"
name = "saunas"
"#,
        )
        .unwrap();

        let settings =
            DatabaseSettings::resolve_with_env(None, &file, Some("mongodb://env-host:27017".to_string())).unwrap();
        assert_eq!(settings.uri, "mongodb://localhost:27017");
        assert_eq!(settings.database.as_deref(), Some("saunas"));
        assert!(!format!("{:?}", settings).contains("localhost"));
    }

    #[test]
    fn test_missing_uri_is_fatal() {
        let result = DatabaseSettings::resolve_with_env(None, &FileConfig::default(), None);
        assert!(matches!(result, Err(DirectoryError::MissingConfigError { .. })));

        let blank = DatabaseSettings::resolve_with_env(None, &FileConfig::default(), Some("  ".to_string()));
        assert!(matches!(blank, Err(DirectoryError::MissingConfigError { .. })));
    }

    #[test]
    fn test_env_uri_used_when_file_has_none() {
        let settings = DatabaseSettings::resolve_with_env(
            Some("saunas".to_string()),
            &FileConfig::default(),
            Some("mongodb://env-host:27017".to_string()),
        )
        .unwrap();
        assert_eq!(settings.uri, "mongodb://env-host:27017");
        assert_eq!(settings.database.as_deref(), Some("saunas"));
    }
}
