//! Connection descriptor for the `postGIS` section.
//!
//! The table only carries the connection shape (host, user, database,
//! port); the actual database client lives in external consuming code.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::Config;
use crate::error::EndatResult;

/// Connection parameters of the geometry database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostgisConfig {
    pub host: String,
    pub username: String,
    pub database: String,
    pub port: u16,
}

impl PostgisConfig {
    /// Read the `postGIS` section with strict lookups; a missing key or a
    /// non-numeric port is an error.
    pub fn from_config(config: &Config) -> EndatResult<Self> {
        Ok(Self {
            host: config.get("postGIS", "host")?.to_string(),
            username: config.get("postGIS", "username")?.to_string(),
            database: config.get("postGIS", "database")?.to_string(),
            port: config.get_int("postGIS", "port")? as u16,
        })
    }
}

impl fmt::Display for PostgisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}:{}/{}",
            self.username, self.host, self.port, self.database
        )
    }
}
