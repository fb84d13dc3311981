//! Process-wide configuration handle.
//!
//! The table is read once at first access (the original loader's
//! lifecycle) and then shared. Tests and embedders can install a
//! prepared table up front with [`init_with`].

use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

use once_cell::sync::OnceCell;

use crate::config::Config;
use crate::error::EndatResult;

static GLOBAL: OnceCell<RwLock<Config>> = OnceCell::new();

fn handle() -> EndatResult<&'static RwLock<Config>> {
    GLOBAL.get_or_try_init(|| Ok(RwLock::new(Config::load()?)))
}

/// Install a prepared configuration instead of loading from disk on
/// first access. Returns false if the global table was already
/// initialised.
pub fn init_with(config: Config) -> bool {
    GLOBAL.set(RwLock::new(config)).is_ok()
}

pub fn is_initialized() -> bool {
    GLOBAL.get().is_some()
}

/// Run a closure against the shared table.
pub fn with_config<T>(f: impl FnOnce(&Config) -> T) -> EndatResult<T> {
    let lock = handle()?;
    let guard = lock.read().unwrap_or_else(PoisonError::into_inner);
    Ok(f(&guard))
}

pub fn get(section: &str, key: &str) -> EndatResult<String> {
    with_config(|cfg| cfg.get(section, key).map(str::to_string))?
}

pub fn get_opt(section: &str, key: &str) -> EndatResult<Option<String>> {
    with_config(|cfg| {
        cfg.get_opt(section, key)
            .map(|value| value.map(str::to_string))
    })?
}

pub fn get_int(section: &str, key: &str) -> EndatResult<i64> {
    with_config(|cfg| cfg.get_int(section, key))?
}

pub fn get_float(section: &str, key: &str) -> EndatResult<f64> {
    with_config(|cfg| cfg.get_float(section, key))?
}

pub fn get_bool(section: &str, key: &str) -> EndatResult<bool> {
    with_config(|cfg| cfg.get_bool(section, key))?
}

pub fn get_list(section: &str, key: &str) -> EndatResult<Vec<String>> {
    with_config(|cfg| cfg.get_list(section, key))?
}

pub fn path(name: &str) -> EndatResult<PathBuf> {
    with_config(|cfg| cfg.path(name))?
}

pub fn pattern_path(name: &str) -> EndatResult<String> {
    with_config(|cfg| cfg.pattern_path(name))?
}

/// Runtime override on the shared table.
pub fn set(section: &str, key: &str, value: &str) -> EndatResult<()> {
    let lock = handle()?;
    let mut guard = lock.write().unwrap_or_else(PoisonError::into_inner);
    guard.set(section, key, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths;

    // One test only: the global table is process state, and splitting
    // the assertions would make them order-dependent.
    #[test]
    fn test_global_lifecycle() {
        let mut cfg = Config::default_config().unwrap();
        cfg.set("root_paths", "local_root", "/srv/energy");
        paths::build_paths(&mut cfg).unwrap();
        assert!(init_with(cfg));
        assert!(is_initialized());

        assert_eq!(
            get("geometry", "germany_polygon").unwrap(),
            "germany_polygon.csv"
        );
        assert_eq!(get_int("postGIS", "port").unwrap(), 5432);
        assert_eq!(
            path("coastdat").unwrap(),
            PathBuf::from("/srv/energy/data/coastdat")
        );

        set("geometry", "germany_polygon", "patched.csv").unwrap();
        assert_eq!(get("geometry", "germany_polygon").unwrap(), "patched.csv");

        // second init is rejected
        assert!(!init_with(Config::default_config().unwrap()));
    }
}
