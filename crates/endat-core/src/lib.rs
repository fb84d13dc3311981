//! # endat-core: Energy Dataset Configuration
//!
//! Configuration layer of the endat data-acquisition pipeline. The crate
//! ships a declarative table of dataset locations for energy-system
//! modeling (local path templates, remote dataset URLs for OPSD, ENTSO-E
//! snapshots, BMWi energy data, VG250 population geodata and coastDat2
//! weather, plus file-name patterns) together with the loader that merges
//! user overrides on top and composes filesystem paths from symbolic
//! components.
//!
//! ## Design Philosophy
//!
//! **The table is data, not code.** All locations live in one INI-style
//! table (`data/endat.ini`), embedded at compile time; consuming code asks
//! for values by `(section, key)` and never hard-codes a path or URL.
//!
//! **Strict lookups.** A missing section or key is an error, never a
//! silent default, so misconfiguration cannot masquerade as behaviour.
//! The `None` sentinel marks values that must be supplied before use.
//!
//! **Deferred substitution.** `{year}`-style placeholders are preserved
//! verbatim by the loader; [`template::render`] fills them in explicitly
//! at use time.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use endat_core::{Config, template};
//!
//! fn main() -> endat_core::EndatResult<()> {
//!     let cfg = Config::load()?;
//!
//!     // A literal file name from the table
//!     let polygon = cfg.get("geometry", "germany_polygon")?;
//!
//!     // A composed local path
//!     let coastdat_dir = cfg.path("coastdat")?;
//!
//!     // A file-name template, filled at use time
//!     let weather = template::render(
//!         cfg.get("coastdat", "file_pattern")?,
//!         &[("year", "2014")],
//!     )?;
//!
//!     println!("{polygon}, {}, {weather}", coastdat_dir.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`ini`] - the INI grammar codec (parse / serialise, round-trip safe)
//! - [`config`] - the layered [`Config`] store with typed accessors
//! - [`paths`] - root resolution and path-name composition
//! - [`template`] - `{placeholder}` scanning and explicit rendering
//! - [`postgis`] - the `postGIS` connection descriptor
//! - [`global`] - process-wide lazily-loaded handle
//! - [`error`] - [`EndatError`] / [`EndatResult`]

pub mod config;
pub mod error;
pub mod global;
pub mod ini;
pub mod paths;
pub mod postgis;
pub mod template;

pub use config::{Config, CONFIG_DIR_ENV, DEFAULT_INI, SENTINEL};
pub use error::{EndatError, EndatResult};
pub use ini::{Document, Section};
pub use paths::{build_paths, ensure_dir, verify_path_names};
pub use postgis::PostgisConfig;
