//! Root resolution and path-name composition.
//!
//! `path_names` and `path_pattern_names` entries are comma-separated lists
//! of symbolic components, e.g. `local_root, data, coastdat`. A component
//! that names a `root_paths` key resolves to that root directory; every
//! other component is a literal path segment. At load time the composed
//! paths are written into the runtime `[paths]` and `[paths_pattern]`
//! sections, where explicit absolute overrides win over composition.
//!
//! Placeholder tokens inside pattern components (`{year}`, `{type}`) pass
//! through composition verbatim; filling them in is the caller's job via
//! [`crate::template::render`].

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{Config, SENTINEL};
use crate::error::{EndatError, EndatResult};
use crate::template;

/// Environment variable overriding the local data root.
pub const LOCAL_ROOT_ENV: &str = "ENDAT_LOCAL_ROOT";

/// Environment variable overriding the packaged-data directory.
pub const PACKAGE_DATA_ENV: &str = "ENDAT_PACKAGE_DATA";

/// Runtime section holding composed plain paths.
pub const PATHS_SECTION: &str = "paths";

/// Runtime section holding composed path patterns.
pub const PATHS_PATTERN_SECTION: &str = "paths_pattern";

/// Where downloaded and derived data lands when `root_paths.local_root`
/// is unset (env override, then the user data dir, then a relative
/// fallback).
pub fn default_local_root() -> PathBuf {
    if let Ok(dir) = env::var(LOCAL_ROOT_ENV) {
        return PathBuf::from(dir);
    }
    if let Some(data) = dirs::data_dir() {
        return data.join("endat");
    }
    PathBuf::from("data").join("endat")
}

/// Where the static files shipped with the package live when
/// `root_paths.package_data` is unset.
pub fn default_package_data() -> PathBuf {
    if let Ok(dir) = env::var(PACKAGE_DATA_ENV) {
        return PathBuf::from(dir);
    }
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Resolve one `root_paths` key to a directory. A non-sentinel value in
/// the configuration wins; the sentinel falls back to the built-in
/// default for the known roots.
pub fn resolve_root(config: &Config, name: &str) -> EndatResult<PathBuf> {
    if let Some(value) = config.get_opt("root_paths", name)? {
        return Ok(PathBuf::from(value));
    }
    match name {
        "local_root" => Ok(default_local_root()),
        "package_data" => Ok(default_package_data()),
        _ => Err(EndatError::Path(format!(
            "root path \"{name}\" is unset and has no built-in default"
        ))),
    }
}

/// Join one component list against the configured roots.
fn compose(config: &Config, components: &[String]) -> EndatResult<PathBuf> {
    let mut path = PathBuf::new();
    for component in components {
        if config.has_option("root_paths", component) {
            path.push(resolve_root(config, component)?);
        } else {
            path.push(component);
        }
    }
    Ok(path)
}

/// Build the runtime `[paths]` and `[paths_pattern]` sections from
/// `path_names` / `path_pattern_names`. Called once at load time;
/// explicit non-sentinel overrides already present in `[paths]` or
/// `[paths_pattern]` are left alone.
pub fn build_paths(config: &mut Config) -> EndatResult<()> {
    for (section, target) in [
        ("path_names", PATHS_SECTION),
        ("path_pattern_names", PATHS_PATTERN_SECTION),
    ] {
        let names: Vec<String> = match config.section_map(section) {
            Ok(map) => map.keys().cloned().collect(),
            Err(EndatError::MissingSection { .. }) => continue,
            Err(err) => return Err(err),
        };
        for name in names {
            let overridden = config
                .has_option(target, &name)
                .then(|| config.get_raw(target, &name))
                .transpose()?
                .is_some_and(|value| value != SENTINEL && !value.is_empty());
            if overridden {
                debug!("Keeping explicit {target} override for \"{name}\"");
                continue;
            }
            let components = config.get_list(section, &name)?;
            let composed = compose(config, &components)?;
            debug!("Composed {target}.{name} = {}", composed.display());
            config.set(target, name.as_str(), composed.to_string_lossy());
        }
    }
    Ok(())
}

impl Config {
    /// A composed plain path from the runtime `[paths]` section.
    pub fn path(&self, name: &str) -> EndatResult<PathBuf> {
        Ok(PathBuf::from(self.get(PATHS_SECTION, name)?))
    }

    /// A composed path pattern (placeholders intact) from the runtime
    /// `[paths_pattern]` section.
    pub fn pattern_path(&self, name: &str) -> EndatResult<String> {
        Ok(self.get(PATHS_PATTERN_SECTION, name)?.to_string())
    }
}

/// Create a directory if it does not exist yet and hand it back.
pub fn ensure_dir(path: &Path) -> EndatResult<PathBuf> {
    if !path.is_dir() {
        std::fs::create_dir_all(path)?;
        debug!("Created directory {}", path.display());
    }
    Ok(path.to_path_buf())
}

/// Check the composition invariant of `path_names` and
/// `path_pattern_names`: no empty component lists, no empty components,
/// no placeholder tokens in plain path names, well-formed placeholders in
/// patterns. Returns one message per violation instead of stopping at the
/// first.
pub fn verify_path_names(config: &Config) -> EndatResult<Vec<String>> {
    let mut violations = Vec::new();

    for (section, patterns_allowed) in [("path_names", false), ("path_pattern_names", true)] {
        let map = match config.section_map(section) {
            Ok(map) => map,
            Err(EndatError::MissingSection { .. }) => {
                violations.push(format!("section [{section}] is missing"));
                continue;
            }
            Err(err) => return Err(err),
        };
        for (name, value) in map {
            if value.trim().is_empty() {
                violations.push(format!("[{section}] {name}: empty component list"));
                continue;
            }
            for component in value.split(',') {
                let component = component.trim();
                if component.is_empty() {
                    violations.push(format!("[{section}] {name}: empty component in \"{value}\""));
                    continue;
                }
                match template::placeholders(component) {
                    Ok(tokens) => {
                        if !patterns_allowed && !tokens.is_empty() {
                            violations.push(format!(
                                "[{section}] {name}: placeholder in plain path component \"{component}\""
                            ));
                        }
                    }
                    Err(err) => {
                        violations.push(format!("[{section}] {name}: {err}"));
                    }
                }
            }
        }
    }

    Ok(violations)
}
