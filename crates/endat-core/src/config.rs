//! Layered configuration store.
//!
//! The store is a two-level `section -> key -> value` string table. It is
//! assembled once at process start: the embedded default table first, then
//! every `*.ini` file found in the user configuration directory (sorted by
//! file name), then runtime overrides via [`Config::set`]. Later layers win
//! per key.
//!
//! Lookups are strict. A missing section or key is an error, never a silent
//! default, and the `None` sentinel is reported as [`EndatError::Unset`]
//! rather than handed out as a usable string.

use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{EndatError, EndatResult};
use crate::ini::{Document, Section};
use crate::paths;

/// The default configuration table shipped with the crate.
pub const DEFAULT_INI: &str = include_str!("../data/endat.ini");

/// Marker for a value that is intentionally unset and must be supplied
/// before use.
pub const SENTINEL: &str = "None";

/// Environment variable overriding the user configuration directory.
pub const CONFIG_DIR_ENV: &str = "ENDAT_CONFIG_DIR";

/// Merged configuration table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    doc: Document,
}

impl Config {
    /// The embedded default table, without user files and without derived
    /// path sections. Never touches the filesystem.
    pub fn default_config() -> EndatResult<Self> {
        let doc = Document::parse(DEFAULT_INI)?;
        Ok(Self { doc })
    }

    /// Full start-up load: defaults, user `*.ini` files, derived paths.
    pub fn load() -> EndatResult<Self> {
        let files = match user_config_dir() {
            Some(dir) => list_ini_files(&dir)?,
            None => Vec::new(),
        };
        Self::load_with_files(&files)
    }

    /// Like [`Config::load`] but with an explicit file list instead of the
    /// user configuration directory.
    pub fn load_with_files<P: AsRef<Path>>(files: &[P]) -> EndatResult<Self> {
        let mut config = Self::default_config()?;
        for file in files {
            let doc = read_ini_file(file.as_ref())?;
            config.doc.merge(&doc);
            info!("Merged configuration from {}", file.as_ref().display());
        }
        paths::build_paths(&mut config)?;
        Ok(config)
    }

    /// Fold one parsed document into the table, later keys winning.
    pub fn merge_document(&mut self, doc: &Document) {
        self.doc.merge(doc);
    }

    /// Strict lookup. Missing section, missing key and the `None` sentinel
    /// are all errors.
    pub fn get(&self, section: &str, key: &str) -> EndatResult<&str> {
        let value = self.get_raw(section, key)?;
        if value == SENTINEL {
            return Err(EndatError::Unset {
                section: section.into(),
                key: key.into(),
            });
        }
        Ok(value)
    }

    /// Lookup that maps the sentinel to `None`. A missing section or key
    /// is still an error.
    pub fn get_opt(&self, section: &str, key: &str) -> EndatResult<Option<&str>> {
        let value = self.get_raw(section, key)?;
        Ok(if value == SENTINEL { None } else { Some(value) })
    }

    /// The stored string, sentinel included. Only the serialisation layer
    /// and tests should need this.
    pub fn get_raw(&self, section: &str, key: &str) -> EndatResult<&str> {
        let sec = self
            .doc
            .section(section)
            .ok_or_else(|| EndatError::MissingSection {
                section: section.into(),
            })?;
        sec.get(key).ok_or_else(|| EndatError::MissingKey {
            section: section.into(),
            key: key.into(),
        })
    }

    pub fn get_int(&self, section: &str, key: &str) -> EndatResult<i64> {
        let value = self.get(section, key)?;
        value
            .parse()
            .map_err(|_| invalid(section, key, "integer", value))
    }

    pub fn get_float(&self, section: &str, key: &str) -> EndatResult<f64> {
        let value = self.get(section, key)?;
        value
            .parse()
            .map_err(|_| invalid(section, key, "float", value))
    }

    pub fn get_bool(&self, section: &str, key: &str) -> EndatResult<bool> {
        let value = self.get(section, key)?;
        match value.to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(invalid(section, key, "boolean", value)),
        }
    }

    /// A comma-separated value as a list of trimmed, non-empty items.
    pub fn get_list(&self, section: &str, key: &str) -> EndatResult<Vec<String>> {
        let value = self.get(section, key)?;
        Ok(value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// A whole section as a key/value map (e.g. `coastdat_data_height`).
    pub fn section_map(&self, section: &str) -> EndatResult<BTreeMap<String, String>> {
        let sec = self
            .doc
            .section(section)
            .ok_or_else(|| EndatError::MissingSection {
                section: section.into(),
            })?;
        Ok(sec
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect())
    }

    /// Runtime override; creates the section if needed.
    pub fn set(&mut self, section: &str, key: impl Into<String>, value: impl Into<String>) {
        self.doc.set(section, key, value);
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.doc.section(section).is_some()
    }

    pub fn has_option(&self, section: &str, key: &str) -> bool {
        self.doc.get(section, key).is_some()
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.doc.sections()
    }

    pub fn section_names(&self) -> Vec<&str> {
        self.doc.sections().map(|s| s.name.as_str()).collect()
    }

    /// Serialise the current table back to the INI grammar.
    pub fn to_ini_string(&self) -> String {
        self.doc.to_ini_string()
    }

    pub(crate) fn document(&self) -> &Document {
        &self.doc
    }
}

fn invalid(section: &str, key: &str, expected: &'static str, value: &str) -> EndatError {
    EndatError::InvalidValue {
        section: section.into(),
        key: key.into(),
        expected,
        value: value.into(),
    }
}

/// Parse one INI file from disk.
pub fn read_ini_file(path: &Path) -> EndatResult<Document> {
    let text = std::fs::read_to_string(path)?;
    debug!("Read configuration file {}", path.display());
    Document::parse(&text)
}

/// The user configuration directory: `$ENDAT_CONFIG_DIR`, else
/// `<config_dir>/endat`.
pub fn user_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = env::var(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|dir| dir.join("endat"))
}

/// All `*.ini` files of a directory, sorted by file name. A missing
/// directory yields an empty list.
pub fn list_ini_files(dir: &Path) -> EndatResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "ini") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
