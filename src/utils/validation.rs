use crate::utils::error::{DirectoryError, Result};
use mongodb::error::ErrorKind;
use mongodb::options::ConnectionString;
use std::collections::HashSet;
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Parses the URI with the driver's connection-string parser.
pub fn validate_connection_string(field_name: &str, uri: &str) -> Result<()> {
    if uri.is_empty() {
        return Err(DirectoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: uri.to_string(),
            reason: "Connection string cannot be empty".to_string(),
        });
    }

    ConnectionString::parse(uri).map_err(|e| {
        let reason = match e.kind.as_ref() {
            ErrorKind::InvalidArgument { message, .. } => message.clone(),
            _ => e.to_string(),
        };
        DirectoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: redact(uri),
            reason: format!("Invalid MongoDB connection string: {}", reason),
        }
    })?;
    Ok(())
}

// 連線字串可能含密碼，錯誤訊息只保留 scheme
fn redact(uri: &str) -> String {
    match uri.split_once("://") {
        Some((scheme, _)) => format!("{}://***", scheme),
        None => "***".to_string(),
    }
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let display = path.to_string_lossy();
    if display.is_empty() {
        return Err(DirectoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: display.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if display.contains('\0') {
        return Err(DirectoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: display.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extension(field_name: &str, path: &Path, allowed_extensions: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    match path.extension().and_then(|ext| ext.to_str()) {
        Some(extension) if allowed_set.contains(extension.to_ascii_lowercase().as_str()) => Ok(()),
        Some(extension) => Err(DirectoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.display().to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(DirectoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.display().to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| DirectoryError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DirectoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
