//! Settings file plus environment overrides.

use crate::error::{Error, Result};
use crate::models::Ipv4;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "ccna_tables.json";

const ENV_OUTPUT_DIR: &str = "CCNA_OUTPUT_DIR";
const ENV_FILE_PREFIX: &str = "CCNA_FILE_PREFIX";

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory export files are written to.
    pub output_dir: PathBuf,
    /// First part of every export file name.
    pub file_prefix: String,
    /// Prefix CSV files with a UTF-8 BOM.
    pub csv_bom: bool,
    /// Network used by the menu when none is given.
    pub default_network: Ipv4,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            file_prefix: "tabla_red".to_string(),
            csv_bom: true,
            default_network: Ipv4 {
                addr: std::net::Ipv4Addr::new(192, 168, 1, 0),
                mask: 24,
            },
        }
    }
}

/// Read `ccna_tables.json` from `directory`, default when the file is absent.
pub fn load_config(directory: impl AsRef<Path>) -> Result<Config> {
    let path = directory.as_ref().join(CONFIG_FILE_NAME);
    if !path.exists() {
        log::debug!("No {}, using defaults", path.display());
        return Ok(Config::default());
    }
    let file = std::fs::read(&path)?;
    let conf = serde_json::from_slice(&file)
        .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
    log::info!("Loaded config {}", path.display());
    Ok(conf)
}

impl Config {
    /// Apply `CCNA_OUTPUT_DIR` / `CCNA_FILE_PREFIX` when set (`.env` included).
    pub fn with_env(mut self) -> Config {
        if let Ok(dir) = dotenv::var(ENV_OUTPUT_DIR) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Ok(prefix) = dotenv::var(ENV_FILE_PREFIX) {
            self.file_prefix = prefix;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_is_default() {
        let dir = std::env::temp_dir().join("ccna_no_config_here");
        assert_eq!(load_config(&dir).unwrap(), Config::default());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = std::env::temp_dir().join(format!("ccna_config_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(CONFIG_FILE_NAME),
            r#"{"file_prefix": "lab", "default_network": "10.0.0.0/8"}"#,
        )
        .unwrap();
        let conf = load_config(&dir).unwrap();
        assert_eq!(conf.file_prefix, "lab");
        assert_eq!(conf.default_network, Ipv4::new("10.0.0.0/8").unwrap());
        assert!(conf.csv_bom);

        std::fs::write(dir.join(CONFIG_FILE_NAME), "{not json").unwrap();
        assert!(matches!(load_config(&dir), Err(Error::Config(_))));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
