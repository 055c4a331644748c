//! Tool configuration — `pixpress.toml` loading and the stock template.
//!
//! Layering, strongest first: environment (`PIXPRESS_*`) → config file →
//! built-in defaults. Command-line flags sit above all of these and are
//! applied by the CLI layer, not here. `pixpress gen-config` prints the
//! documented stock file generated from this struct.

use confique::Config;
use std::path::Path;

use crate::settings::CompressionLevel;

/// Default config filename looked up in the working directory.
pub const CONFIG_FILENAME: &str = "pixpress.toml";

#[derive(Config, Debug, Clone)]
pub struct AppConfig {
    /// Compression level used when --level is not given. 10–90 in steps
    /// of 5; values off the grid are snapped to it.
    #[config(default = 90, env = "PIXPRESS_LEVEL")]
    pub level: u8,

    /// Prefix for output filenames: photo.jpg becomes
    /// <output_prefix>photo.jpg.
    #[config(default = "compressed-", env = "PIXPRESS_OUTPUT_PREFIX")]
    pub output_prefix: String,

    /// Carry EXIF metadata from the source into the compressed output when
    /// the source has any. --strip-metadata overrides this per run.
    #[config(default = true, env = "PIXPRESS_KEEP_METADATA")]
    pub keep_metadata: bool,
}

impl AppConfig {
    /// Load configuration, reading `path` if given, otherwise
    /// `pixpress.toml` in the working directory when present.
    pub fn load(path: Option<&Path>) -> Result<Self, confique::Error> {
        let file = path.unwrap_or(Path::new(CONFIG_FILENAME));
        AppConfig::builder().env().file(file).load()
    }

    /// The configured default level, snapped onto the slider grid.
    pub fn default_level(&self) -> CompressionLevel {
        CompressionLevel::new(self.level)
    }

    /// Stock config file with every option documented.
    pub fn stock_toml() -> String {
        confique::toml::template::<AppConfig>(confique::toml::FormatOptions::default())
    }
}
