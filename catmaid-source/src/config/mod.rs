//! Configuration file support.
//!
//! Settings live in an INI file, by default at
//! `~/.config/catmaid-source/config.ini`:
//!
//! ```ini
//! [server]
//! url = https://catmaid.example.org
//!
//! [http]
//! timeout_secs = 30
//! user_agent = catmaid-source/0.1.0
//!
//! [cache]
//! metadata_entries = 1024
//! ```
//!
//! A missing file yields the defaults. Unknown keys are ignored.

mod file;

pub use file::{config_file_path, ClientConfig, ConfigError, ConfigFile};
