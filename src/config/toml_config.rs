use crate::utils::error::{DirectoryError, Result};
use crate::utils::validation::{validate_connection_string, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid regex"));

/// Optional `sauna-directory.toml`. Every key may be left out; CLI flags
/// take precedence over anything set here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub import: ImportSection,
    #[serde(default)]
    pub seed: SeedSection,
    #[serde(default)]
    pub database: DatabaseSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImportSection {
    pub input: Option<PathBuf>,
    pub sheet: Option<String>,
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedSection {
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseSection {
    pub uri: Option<String>,
    pub name: Option<String>,
}

impl FileConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| DirectoryError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| DirectoryError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MONGODB_URI})；未定義的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// Database URI from the file, ignoring a placeholder whose variable was never set.
    pub fn database_uri(&self) -> Option<&str> {
        self.database
            .uri
            .as_deref()
            .filter(|uri| !ENV_VAR.is_match(uri) && !uri.trim().is_empty())
    }
}

impl Validate for FileConfig {
    fn validate(&self) -> Result<()> {
        if let Some(input) = &self.import.input {
            validate_path("import.input", input)?;
        }
        if let Some(output_dir) = &self.import.output_dir {
            validate_path("import.output_dir", output_dir)?;
        }
        if let Some(data_dir) = &self.seed.data_dir {
            validate_path("seed.data_dir", data_dir)?;
        }
        if let Some(uri) = self.database_uri() {
            validate_connection_string("database.uri", uri)?;
        }
        Ok(())
    }
}
