//! Environment variable settings.
//!
//! Reads the handful of `CF_*` variables that change how the client behaves
//! for a single process.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Default timeout for HTTP requests when `CF_DIAL_TIMEOUT` is unset.
pub const DEFAULT_DIAL_TIMEOUT: Duration = Duration::from_secs(60);

/// Settings read from the process environment.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use cf::config::EnvSettings;
///
/// let mut vars = HashMap::new();
/// vars.insert("CF_TRACE".to_string(), "true".to_string());
/// vars.insert("CF_DIAL_TIMEOUT".to_string(), "5".to_string());
///
/// let settings = EnvSettings::from_vars(&vars);
/// assert!(settings.trace);
/// assert_eq!(settings.dial_timeout.as_secs(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct EnvSettings {
    /// Overrides the directory holding `.cf/config.json`.
    pub cf_home: Option<PathBuf>,
    /// `CF_TRACE=true` turns on request logging.
    pub trace: bool,
    /// `CF_COLOR=false` disables styled output.
    pub color: bool,
    /// `CF_DIAL_TIMEOUT` in seconds.
    pub dial_timeout: Duration,
}

impl Default for EnvSettings {
    fn default() -> Self {
        Self {
            cf_home: None,
            trace: false,
            color: true,
            dial_timeout: DEFAULT_DIAL_TIMEOUT,
        }
    }
}

impl EnvSettings {
    /// Read settings from the current process environment.
    pub fn from_env() -> Self {
        let vars: HashMap<String, String> = std::env::vars()
            .filter(|(key, _)| key.starts_with("CF_"))
            .collect();
        Self::from_vars(&vars)
    }

    /// Read settings from an explicit variable map.
    pub fn from_vars(vars: &HashMap<String, String>) -> Self {
        let mut settings = Self::default();

        if let Some(home) = vars.get("CF_HOME").filter(|v| !v.is_empty()) {
            settings.cf_home = Some(PathBuf::from(home));
        }

        if let Some(trace) = vars.get("CF_TRACE") {
            settings.trace = trace.eq_ignore_ascii_case("true");
        }

        if let Some(color) = vars.get("CF_COLOR") {
            settings.color = !color.eq_ignore_ascii_case("false");
        }

        if let Some(timeout) = vars.get("CF_DIAL_TIMEOUT") {
            match timeout.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => settings.dial_timeout = Duration::from_secs(secs),
                _ => tracing::warn!("Ignoring invalid CF_DIAL_TIMEOUT value '{}'", timeout),
            }
        }

        settings
    }

    /// Path of the session file.
    pub fn config_path(&self) -> PathBuf {
        let home = self
            .cf_home
            .clone()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        home.join(".cf").join("config.json")
    }
}
