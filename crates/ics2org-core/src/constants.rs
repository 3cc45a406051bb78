/// Display timezone used when neither configuration nor override file names one.
pub const DEFAULT_TIMEZONE: &str = "America/Los_Angeles";

/// Half-width of the expansion window in days around the current instant.
pub const DEFAULT_WINDOW_DAYS: i64 = 90;

/// Log level used when no filter is configured anywhere.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "ics2org.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "ICS2ORG";
