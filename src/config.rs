use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, ValueEnum};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::markup::RenderMode;

// Default configuration
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";
pub const CHAT_PATH: &str = "/chat";
pub const DEFAULT_GREETING: &str = "Hi! Ask me anything about customer insights.";
pub const DEFAULT_ERROR_TEXT: &str = "❌ Error reaching server";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Dark,
    Light,
}

impl ThemeChoice {
    pub fn toggled(self) -> Self {
        match self {
            ThemeChoice::Dark => ThemeChoice::Light,
            ThemeChoice::Light => ThemeChoice::Dark,
        }
    }
}

/// Persisted widget settings. Every field falls back to its default when
/// missing from the file.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the chat backend; `/chat` is appended.
    pub endpoint: String,
    pub theme: ThemeChoice,
    /// Escape everything except the recognised markdown constructs.
    pub safe_markup: bool,
    pub greeting: String,
    pub error_text: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            theme: ThemeChoice::default(),
            safe_markup: false,
            greeting: DEFAULT_GREETING.to_string(),
            error_text: DEFAULT_ERROR_TEXT.to_string(),
        }
    }
}

impl Settings {
    /// Command line values win over the settings file.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(endpoint) = &args.endpoint {
            self.endpoint = endpoint.clone();
        }
        if let Some(theme) = args.theme {
            self.theme = theme;
        }
        if args.safe_markup {
            self.safe_markup = true;
        }
    }

    pub fn render_mode(&self) -> RenderMode {
        if self.safe_markup {
            RenderMode::Escaped
        } else {
            RenderMode::Trusted
        }
    }

    pub fn chat_url(&self) -> Result<String, ConfigError> {
        chat_url(&self.endpoint)
    }
}

/// Desktop chat widget for a customer-insights backend.
#[derive(Parser, Debug, Default)]
#[command(name = "insight-chat", version)]
pub struct Args {
    /// Base URL of the chat backend (the widget posts to <endpoint>/chat)
    #[arg(long, env = "INSIGHT_CHAT_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Colour theme
    #[arg(long, value_enum)]
    pub theme: Option<ThemeChoice>,

    /// Escape HTML in messages instead of passing it through
    #[arg(long)]
    pub safe_markup: bool,

    /// Settings file to use instead of the platform default
    #[arg(long, env = "INSIGHT_CHAT_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Validate an endpoint and join it with the chat path.
pub fn chat_url(endpoint: &str) -> Result<String, ConfigError> {
    let invalid = |why: &str| ConfigError::InvalidEndpoint(endpoint.to_string(), why.to_string());

    let url = reqwest::Url::parse(endpoint.trim()).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(invalid("missing host")),
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed"));
    }

    let base = url.as_str().trim_end_matches('/');
    Ok(format!("{base}{CHAT_PATH}"))
}

pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "insight", "insight-chat")
        .map(|proj| proj.config_dir().join("settings.json"))
}

pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// The settings file as read at startup.
///
/// Command line overrides never land here, so writing back only touches what
/// the user chose in the window. A file that exists but could not be read is
/// never overwritten.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredSettings {
    path: Option<PathBuf>,
    pub settings: Settings,
    writable: bool,
}

impl StoredSettings {
    /// Load settings, falling back to defaults when the file is absent or bad.
    pub fn load(path: Option<PathBuf>) -> Self {
        let Some(file) = path.as_deref() else {
            warn!("no configuration directory; using default settings");
            return Self {
                path: None,
                settings: Settings::default(),
                writable: false,
            };
        };
        if !file.exists() {
            debug!(path = %file.display(), "no settings file; using defaults");
            return Self {
                path,
                settings: Settings::default(),
                writable: true,
            };
        }
        match load_settings_from(file) {
            Ok(settings) => Self {
                path,
                settings,
                writable: true,
            },
            Err(e) => {
                warn!(error = %e, "ignoring settings file; it will not be overwritten");
                Self {
                    path,
                    settings: Settings::default(),
                    writable: false,
                }
            }
        }
    }

    /// File values merged with the command line for this run.
    pub fn runtime(&self, args: &Args) -> Settings {
        let mut settings = self.settings.clone();
        settings.apply_args(args);
        settings
    }

    /// Write `theme` into the stored file. Returns false when nothing was
    /// written: no path, an unreadable file, or an unchanged theme.
    pub fn save_theme(&mut self, theme: ThemeChoice) -> Result<bool, ConfigError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(false);
        };
        if !self.writable || (path.exists() && self.settings.theme == theme) {
            return Ok(false);
        }
        let mut updated = self.settings.clone();
        updated.theme = theme;
        save_settings(Some(path), &updated)?;
        self.settings = updated;
        Ok(true)
    }
}

pub fn save_settings(path: Option<&Path>, settings: &Settings) -> Result<(), ConfigError> {
    let path = path.ok_or(ConfigError::NoConfigDir)?;
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(io_err)?;
    }
    let data = serde_json::to_string_pretty(settings).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, data).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_url_joins_path() {
        assert_eq!(chat_url("http://127.0.0.1:5000").unwrap(), "http://127.0.0.1:5000/chat");
        assert_eq!(chat_url("http://localhost:5000/").unwrap(), "http://localhost:5000/chat");
        assert_eq!(
            chat_url("https://insights.example.com/api").unwrap(),
            "https://insights.example.com/api/chat"
        );
    }

    #[test]
    fn test_chat_url_rejects_bad_endpoints() {
        assert!(chat_url("").is_err());
        assert!(chat_url("localhost:5000").is_err());
        assert!(chat_url("ftp://example.com").is_err());
        assert!(chat_url("http://example.com/?x=1").is_err());
    }

    #[test]
    fn test_partial_settings_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"endpoint":"http://10.0.0.2:8000","theme":"light"}"#).unwrap();

        let settings = load_settings_from(&path).unwrap();
        assert_eq!(settings.endpoint, "http://10.0.0.2:8000");
        assert_eq!(settings.theme, ThemeChoice::Light);
        assert_eq!(settings.greeting, DEFAULT_GREETING);
        assert_eq!(settings.error_text, DEFAULT_ERROR_TEXT);
        assert!(!settings.safe_markup);
    }

    #[test]
    fn test_malformed_settings_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();

        assert!(matches!(load_settings_from(&path), Err(ConfigError::Parse { .. })));
        assert_eq!(StoredSettings::load(Some(path)).settings, Settings::default());
        assert_eq!(
            StoredSettings::load(Some(dir.path().join("missing.json"))).settings,
            Settings::default()
        );
    }

    #[test]
    fn test_theme_save_keeps_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"endpoint":"http://10.0.0.2:8000","theme":"light"}"#).unwrap();

        let mut stored = StoredSettings::load(Some(path.clone()));
        let args = Args::parse_from([
            "insight-chat",
            "--endpoint",
            "http://oneoff:1",
            "--safe-markup",
        ]);
        let runtime = stored.runtime(&args);
        assert_eq!(runtime.endpoint, "http://oneoff:1");
        assert!(runtime.safe_markup);

        assert!(stored.save_theme(ThemeChoice::Dark).unwrap());

        let on_disk = load_settings_from(&path).unwrap();
        assert_eq!(on_disk.endpoint, "http://10.0.0.2:8000");
        assert_eq!(on_disk.theme, ThemeChoice::Dark);
        assert!(!on_disk.safe_markup);
    }

    #[test]
    fn test_malformed_file_is_never_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let broken = r#"{"endpoint":"http://10.0.0.2:8000","theme":"light",}"#;
        fs::write(&path, broken).unwrap();

        let mut stored = StoredSettings::load(Some(path.clone()));
        assert!(!stored.save_theme(ThemeChoice::Dark).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), broken);
    }

    #[test]
    fn test_theme_save_without_path_is_skipped() {
        let mut stored = StoredSettings::load(None);
        assert!(!stored.save_theme(ThemeChoice::Light).unwrap());
    }

    #[test]
    fn test_theme_save_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut stored = StoredSettings::load(Some(path.clone()));
        assert!(stored.save_theme(ThemeChoice::Dark).unwrap());
        assert_eq!(load_settings_from(&path).unwrap(), Settings::default());

        // Unchanged theme on an existing file is not rewritten
        assert!(!stored.save_theme(ThemeChoice::Dark).unwrap());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            theme: ThemeChoice::Light,
            safe_markup: true,
            ..Settings::default()
        };

        save_settings(Some(&path), &settings).unwrap();
        assert_eq!(load_settings_from(&path).unwrap(), settings);
        assert!(matches!(save_settings(None, &settings), Err(ConfigError::NoConfigDir)));
    }

    #[test]
    fn test_args_override_file() {
        let mut settings = Settings::default();
        let args = Args::parse_from([
            "insight-chat",
            "--endpoint",
            "http://example.com:9000",
            "--theme",
            "light",
            "--safe-markup",
        ]);
        settings.apply_args(&args);
        assert_eq!(settings.endpoint, "http://example.com:9000");
        assert_eq!(settings.theme, ThemeChoice::Light);
        assert_eq!(settings.render_mode(), RenderMode::Escaped);
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(ThemeChoice::Dark.toggled(), ThemeChoice::Light);
        assert_eq!(ThemeChoice::Light.toggled(), ThemeChoice::Dark);
    }
}
