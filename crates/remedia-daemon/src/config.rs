//! Configuration file management.
//!
//! Everything lives in one `config.toml` under the data directory. The
//! data directory and the vault key can be overridden per process via
//! `REMEDIA_DATA_DIR` and `REMEDIA_ENCRYPTION_KEY`; the key override
//! exists so the secret can stay out of the file entirely.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Complete daemon configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Security settings.
    #[serde(default)]
    pub security: SecurityConfig,
    /// Upload limits.
    #[serde(default)]
    pub files: FilesConfig,
    /// Retention settings.
    #[serde(default)]
    pub retention: RetentionConfig,
    /// Transfer code settings.
    #[serde(default)]
    pub codes: CodesConfig,
}

/// Storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Data directory. Empty = platform default.
    #[serde(default)]
    pub data_dir: String,
}

/// Security configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Vault key, base64. Empty = take it from `REMEDIA_ENCRYPTION_KEY`.
    #[serde(default)]
    pub encryption_key: String,
}

/// Upload limit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    /// Maximum accepted payload size in MB.
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,
    /// Extensions admitted for upload.
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

/// Retention configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionConfig {
    /// Days a document rests before deletion.
    #[serde(default = "default_retention_days")]
    pub data_retention_days: u64,
    /// Run the periodic sweep.
    #[serde(default = "default_true")]
    pub auto_delete_enabled: bool,
    /// Minutes between sweeps.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_minutes: u64,
}

/// Transfer code configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodesConfig {
    /// Default code lifetime in hours.
    #[serde(default = "default_code_expiration_hours")]
    pub code_expiration_hours: u64,
    /// Uses granted per code.
    #[serde(default = "default_code_max_uses")]
    pub default_max_uses: u32,
}

// Default value functions

fn default_max_file_size_mb() -> u64 {
    10
}

fn default_allowed_extensions() -> Vec<String> {
    vec![
        "pdf".to_string(),
        "jpg".to_string(),
        "jpeg".to_string(),
        "png".to_string(),
    ]
}

fn default_retention_days() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_sweep_interval() -> u64 {
    60
}

fn default_code_expiration_hours() -> u64 {
    1
}

fn default_code_max_uses() -> u32 {
    1
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: default_max_file_size_mb(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            data_retention_days: default_retention_days(),
            auto_delete_enabled: true,
            sweep_interval_minutes: default_sweep_interval(),
        }
    }
}

impl Default for CodesConfig {
    fn default() -> Self {
        Self {
            code_expiration_hours: default_code_expiration_hours(),
            default_max_uses: default_code_max_uses(),
        }
    }
}

impl DaemonConfig {
    /// Load configuration from the default config file location.
    ///
    /// Falls back to defaults if file does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: DaemonConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Get the data directory path.
    pub fn data_dir(&self) -> PathBuf {
        if self.storage.data_dir.is_empty() {
            Self::default_data_dir()
        } else {
            PathBuf::from(&self.storage.data_dir)
        }
    }

    /// The vault key in base64, environment taking precedence over file.
    pub fn encryption_key_b64(&self) -> Option<String> {
        if let Ok(key) = std::env::var("REMEDIA_ENCRYPTION_KEY") {
            if !key.is_empty() {
                return Some(key);
            }
        }
        if self.security.encryption_key.is_empty() {
            None
        } else {
            Some(self.security.encryption_key.clone())
        }
    }

    /// Vault limits as the vault crate consumes them.
    pub fn vault_policy(&self) -> remedia_vault::VaultPolicy {
        remedia_vault::VaultPolicy {
            max_file_size_bytes: self.files.max_file_size_mb * 1024 * 1024,
            allowed_extensions: self.files.allowed_extensions.clone(),
            retention_days: self.retention.data_retention_days,
        }
    }

    /// Issuance defaults as the code crate consumes them.
    pub fn code_policy(&self) -> remedia_codes::CodePolicy {
        remedia_codes::CodePolicy {
            default_expiration_hours: self.codes.code_expiration_hours,
            default_max_uses: self.codes.default_max_uses,
        }
    }

    /// Get the config file path.
    fn config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("REMEDIA_DATA_DIR") {
            return PathBuf::from(dir).join("config.toml");
        }
        Self::default_data_dir().join("config.toml")
    }

    /// Platform-specific default data directory.
    fn default_data_dir() -> PathBuf {
        if let Ok(dir) = std::env::var("REMEDIA_DATA_DIR") {
            return PathBuf::from(dir);
        }
        #[cfg(target_os = "macos")]
        {
            dirs_fallback("Library/Application Support/Remedia")
        }
        #[cfg(target_os = "linux")]
        {
            dirs_fallback(".remedia")
        }
        #[cfg(target_os = "windows")]
        {
            dirs_fallback("Remedia")
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            dirs_fallback(".remedia")
        }
    }
}

/// Fallback home directory resolution.
fn dirs_fallback(subpath: &str) -> PathBuf {
    std::env::var("HOME")
        .map(|h| PathBuf::from(h).join(subpath))
        .unwrap_or_else(|_| PathBuf::from("/tmp/remedia"))
}
