//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default species catalog id
pub const DEFAULT_SPECIES: &str = "carolina";

/// Default clustering grid size in kilometers
pub const DEFAULT_GRID_KM: f64 = 25.0;

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 8686;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "terra-atlas";
