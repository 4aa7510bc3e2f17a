//! Configuration parsing and validation.
//!
//! Handles bytesed.toml parsing with version validation and unknown key warnings.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::escape::unescape;
use crate::mapping::MappingTable;
use crate::replacer::{ReplacerOptions, Strategy};
use crate::scratch::{DEFAULT_PREFIX, has_separator};
use crate::substitute::DEFAULT_CHUNK_SIZE;

/// Config file name looked up by discovery.
pub const CONFIG_FILE_NAME: &str = "bytesed.toml";

/// Currently supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Known top-level keys in the config.
const KNOWN_KEYS: &[&str] = &["version", "replace", "mapping"];

/// Known keys of the `[replace]` table.
const KNOWN_REPLACE_KEYS: &[&str] = &["strategy", "chunk_size", "scratch_prefix", "escapes"];

/// Known keys of a `[[mapping]]` entry.
const KNOWN_MAPPING_KEYS: &[&str] = &["old", "new"];

/// Minimum config structure for version checking.
#[derive(Deserialize)]
struct VersionOnly {
    version: Option<i64>,
}

/// Config shape that captures unknown keys for warnings.
#[derive(Deserialize)]
struct FlexibleConfig {
    #[serde(default)]
    replace: Option<toml::Value>,

    #[serde(default)]
    mapping: Option<toml::Value>,

    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

/// Full configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Replace engine settings.
    #[serde(default)]
    pub replace: ReplaceConfig,

    /// Mappings applied before any given on the command line.
    #[serde(default, rename = "mapping")]
    pub mappings: Vec<MappingConfig>,
}

/// `[replace]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplaceConfig {
    /// Strategy used when none is given on the command line.
    #[serde(default)]
    pub strategy: Strategy,

    /// Bytes pulled per read (default: 8192).
    #[serde(default = "ReplaceConfig::default_chunk_size")]
    pub chunk_size: usize,

    /// Scratch file prefix (default: "bytesed").
    #[serde(default = "ReplaceConfig::default_scratch_prefix")]
    pub scratch_prefix: String,

    /// Decode backslash escapes in config mappings.
    #[serde(default)]
    pub escapes: bool,
}

impl Default for ReplaceConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            chunk_size: Self::default_chunk_size(),
            scratch_prefix: Self::default_scratch_prefix(),
            escapes: false,
        }
    }
}

impl ReplaceConfig {
    fn default_chunk_size() -> usize {
        DEFAULT_CHUNK_SIZE
    }

    fn default_scratch_prefix() -> String {
        DEFAULT_PREFIX.to_string()
    }

    /// Replacer options described by this table.
    pub fn options(&self) -> ReplacerOptions {
        ReplacerOptions {
            chunk_size: self.chunk_size,
            scratch_prefix: self.scratch_prefix.clone(),
        }
    }
}

/// One `[[mapping]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MappingConfig {
    pub old: String,
    #[serde(default)]
    pub new: String,
}

impl Config {
    /// Build a mapping table from the configured mappings.
    pub fn mapping_table(&self) -> Result<MappingTable> {
        let mut table = MappingTable::new();
        for mapping in &self.mappings {
            if self.replace.escapes {
                table.add(unescape(&mapping.old)?, unescape(&mapping.new)?)?;
            } else {
                table.add_str(&mapping.old, &mapping.new)?;
            }
        }
        Ok(table)
    }
}

/// Load and validate config from a file path.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse(&content, path)
}

/// Load config with warnings for unknown keys.
pub fn load_with_warnings(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_with_warnings(&content, path)
}

/// Parse config from string content (strict mode).
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    check_version(content, path)?;

    let config: Config = toml::from_str(content).map_err(|e| config_error(e, path))?;
    validate(&config, path)?;
    Ok(config)
}

/// Parse config, warning on unknown keys.
pub fn parse_with_warnings(content: &str, path: &Path) -> Result<Config> {
    let config = parse(content, path)?;

    let flexible: FlexibleConfig = toml::from_str(content).map_err(|e| config_error(e, path))?;
    for key in unknown_keys(&flexible) {
        warn_unknown_key(path, &key);
    }

    Ok(config)
}

fn check_version(content: &str, path: &Path) -> Result<()> {
    let version_check: VersionOnly =
        toml::from_str(content).map_err(|e| config_error(e, path))?;

    let version = version_check.version.ok_or_else(|| Error::Config {
        message: "missing required field: version".to_string(),
        path: Some(path.to_path_buf()),
    })?;

    if version != SUPPORTED_VERSION {
        return Err(Error::Config {
            message: format!(
                "unsupported config version {} (supported: {})\n  Upgrade bytesed to use this config.",
                version, SUPPORTED_VERSION
            ),
            path: Some(path.to_path_buf()),
        });
    }

    Ok(())
}

fn validate(config: &Config, path: &Path) -> Result<()> {
    if config.replace.chunk_size == 0 {
        return Err(Error::Config {
            message: "replace.chunk_size must be greater than zero".to_string(),
            path: Some(path.to_path_buf()),
        });
    }

    if has_separator(&config.replace.scratch_prefix) {
        return Err(Error::Config {
            message: "replace.scratch_prefix must not contain a path separator".to_string(),
            path: Some(path.to_path_buf()),
        });
    }

    if let Some(index) = config.mappings.iter().position(|m| m.old.is_empty()) {
        return Err(Error::Config {
            message: format!("mapping {}: `old` must not be empty", index + 1),
            path: Some(path.to_path_buf()),
        });
    }

    Ok(())
}

/// Dotted names of every unrecognized key, sorted.
fn unknown_keys(flexible: &FlexibleConfig) -> Vec<String> {
    let mut keys: Vec<String> = flexible
        .unknown
        .keys()
        .filter(|k| !KNOWN_KEYS.contains(&k.as_str()))
        .cloned()
        .collect();

    if let Some(toml::Value::Table(t)) = &flexible.replace {
        for key in t.keys() {
            if !KNOWN_REPLACE_KEYS.contains(&key.as_str()) {
                keys.push(format!("replace.{}", key));
            }
        }
    }

    if let Some(toml::Value::Array(entries)) = &flexible.mapping {
        for (index, entry) in entries.iter().enumerate() {
            let Some(t) = entry.as_table() else { continue };
            for key in t.keys() {
                if !KNOWN_MAPPING_KEYS.contains(&key.as_str()) {
                    keys.push(format!("mapping[{}].{}", index, key));
                }
            }
        }
    }

    keys.sort();
    keys
}

fn config_error(err: toml::de::Error, path: &Path) -> Error {
    Error::Config {
        message: err.to_string(),
        path: Some(path.to_path_buf()),
    }
}

fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "bytesed: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
