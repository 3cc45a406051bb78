use std::path::Path;
use std::str::FromStr;

use chrono_tz::Tz;
use config::Config;
use serde::Deserialize;

use crate::constants::{
    CONFIG_FILE, DEFAULT_LOG_LEVEL, DEFAULT_TIMEZONE, DEFAULT_WINDOW_DAYS, ENV_PREFIX,
};
use crate::error::{CoreError, CoreResult};

/// Converter settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// IANA name of the display timezone.
    pub timezone: String,
    /// Optional file whose trimmed contents override `timezone` when it exists.
    pub timezone_file: Option<String>,
    /// Mail address whose DECLINED attendance marks events; may be empty.
    pub attendee: String,
    /// Half-width of the expansion window in days.
    pub window_days: i64,
    /// Tag glued onto recurring headings; empty disables tagging.
    pub recur_tag: String,
    /// Log level used when neither `RUST_LOG` nor `-v` is given.
    pub log_level: String,
}

impl Settings {
    /// ## Summary
    /// Loads settings from defaults, an optional TOML file, and
    /// `ICS2ORG_`-prefixed environment variables, later sources winning.
    ///
    /// Without an explicit path, `ics2org.toml` in the working directory
    /// is read when present.
    ///
    /// ## Errors
    /// Returns an error if an explicitly named file is missing or
    /// malformed, if a value fails to deserialize, or if `window_days`
    /// is not positive.
    pub fn load(file: Option<&Path>) -> CoreResult<Self> {
        let file_source = match file {
            Some(path) => config::File::from(path.to_path_buf()).required(true),
            None => config::File::with_name(CONFIG_FILE).required(false),
        };
        let settings = Config::builder()
            .set_default("timezone", DEFAULT_TIMEZONE)?
            .set_default("attendee", "")?
            .set_default("window_days", DEFAULT_WINDOW_DAYS)?
            .set_default("recur_tag", "")?
            .set_default("log_level", DEFAULT_LOG_LEVEL)?
            .add_source(file_source)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;
        if settings.window_days < 1 {
            return Err(CoreError::InvalidWindow(settings.window_days));
        }
        tracing::debug!(
            timezone = settings.timezone,
            window_days = settings.window_days,
            "Loaded settings"
        );
        Ok(settings)
    }

    /// ## Summary
    /// Resolves the display timezone, honoring the timezone file
    /// override when that file exists.
    ///
    /// ## Errors
    /// Returns an error if the override file exists but cannot be read,
    /// or if the resulting name is not an IANA timezone.
    pub fn resolve_timezone(&self) -> CoreResult<Tz> {
        let name = match &self.timezone_file {
            Some(path) if Path::new(path).exists() => std::fs::read_to_string(path)
                .map_err(|source| CoreError::TimezoneFile { path: path.clone(), source })?
                .trim()
                .to_string(),
            _ => self.timezone.clone(),
        };
        Tz::from_str(&name).map_err(|_e| CoreError::UnknownTimezone(name))
    }
}

/// ## Summary
/// Loads configuration from the `.env` file, the configuration file, and
/// environment variables. Environment variables take precedence.
///
/// ## Errors
/// Returns an error if loading or validating the configuration fails.
pub fn load_config(file: Option<&Path>) -> CoreResult<Settings> {
    dotenvy::dotenv().ok();

    Settings::load(file)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ics2org-core-{}-{name}", std::process::id()))
    }

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = temp_path(name);
        let mut file = std::fs::File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        path
    }

    fn settings_with(timezone: &str, timezone_file: Option<String>) -> Settings {
        Settings {
            timezone: timezone.to_string(),
            timezone_file,
            attendee: String::new(),
            window_days: 90,
            recur_tag: String::new(),
            log_level: "warn".to_string(),
        }
    }

    #[test_log::test]
    fn defaults_apply_when_the_file_sets_nothing() {
        // An explicit empty file keeps the test clear of any ics2org.toml
        // sitting in the working directory.
        let path = write_temp("empty.toml", "");

        let settings = Settings::load(Some(&path)).expect("load defaults");
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.timezone, "America/Los_Angeles");
        assert!(settings.timezone_file.is_none());
        assert_eq!(settings.attendee, "");
        assert_eq!(settings.window_days, 90);
        assert_eq!(settings.recur_tag, "");
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let path = write_temp(
            "settings.toml",
            "timezone = \"Europe/Berlin\"\nwindow_days = 30\nrecur_tag = \":RECURRING:\"\n",
        );

        let settings = Settings::load(Some(&path)).expect("load file");
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.timezone, "Europe/Berlin");
        assert_eq!(settings.window_days, 30);
        assert_eq!(settings.recur_tag, ":RECURRING:");
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn zero_window_is_rejected() {
        let path = write_temp("zero-window.toml", "window_days = 0\n");

        let result = Settings::load(Some(&path));
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(CoreError::InvalidWindow(0))));
    }

    #[test]
    fn missing_explicit_file_is_fatal() {
        let path = temp_path("does-not-exist.toml");

        let result = Settings::load(Some(&path));

        assert!(matches!(result, Err(CoreError::Config(_))));
    }

    #[test]
    fn configured_timezone_resolves() {
        let settings = settings_with("America/New_York", None);

        let tz = settings.resolve_timezone().expect("resolve timezone");

        assert_eq!(tz, chrono_tz::Tz::America__New_York);
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let settings = settings_with("Mars/Olympus_Mons", None);

        let result = settings.resolve_timezone();

        assert!(
            matches!(result, Err(CoreError::UnknownTimezone(name)) if name == "Mars/Olympus_Mons")
        );
    }

    #[test]
    fn timezone_file_overrides_when_present() {
        let path = write_temp("timezone", "Europe/Berlin\n");
        let settings = settings_with(
            "America/Los_Angeles",
            Some(path.display().to_string()),
        );

        let tz = settings.resolve_timezone().expect("resolve timezone");
        std::fs::remove_file(&path).ok();

        assert_eq!(tz, chrono_tz::Tz::Europe__Berlin);
    }

    #[test]
    fn missing_timezone_file_falls_back_to_configured() {
        let absent = temp_path("absent-timezone-file");
        let settings = settings_with(
            "America/Los_Angeles",
            Some(absent.display().to_string()),
        );

        let tz = settings.resolve_timezone().expect("resolve timezone");

        assert_eq!(tz, chrono_tz::Tz::America__Los_Angeles);
    }

    #[test]
    fn garbage_in_the_timezone_file_is_rejected() {
        let path = write_temp("bad-timezone", "not a timezone\n");
        let settings = settings_with("America/Los_Angeles", Some(path.display().to_string()));

        let result = settings.resolve_timezone();
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(CoreError::UnknownTimezone(_))));
    }
}
