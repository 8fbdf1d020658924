use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::roster::Selector;
use crate::session::Timing;

fn def_names_path() -> PathBuf {
    PathBuf::from("data/names.xlsx")
}

fn def_idle_timeout_ms() -> u64 {
    15_000
}

fn def_idle_check_ms() -> u64 {
    100
}

fn def_slide_step() -> i32 {
    30
}

fn def_slide_interval_ms() -> u64 {
    10
}

fn def_hidden_offset() -> i32 {
    -85
}

fn def_window_width() -> u32 {
    150
}

fn def_window_height() -> u32 {
    100
}

fn def_lift() -> i32 {
    75
}

fn def_placeholder() -> String {
    "？？？".to_string()
}

fn def_button_label() -> String {
    "点名".to_string()
}

fn def_flash_ms() -> u64 {
    200
}

fn def_max_name_chars() -> usize {
    8
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Settings read from `config.json`. Every field is optional in the file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Used when no path is given on the command line.
    #[serde(default = "def_names_path")]
    pub names_path: PathBuf,

    /// Worksheet to read; the first one when unset.
    #[serde(default)]
    pub sheet: Option<String>,

    /// Column letter holding the names; `A` when unset.
    #[serde(default)]
    pub column: Option<String>,

    #[serde(default = "def_idle_timeout_ms")]
    pub idle_timeout_ms: u64,

    #[serde(default = "def_idle_check_ms")]
    pub idle_check_ms: u64,

    #[serde(default = "def_slide_step")]
    pub slide_step: i32,

    #[serde(default = "def_slide_interval_ms")]
    pub slide_interval_ms: u64,

    /// Vertical position the widget slides to. Negative tucks it under the top edge.
    #[serde(default = "def_hidden_offset")]
    pub hidden_offset: i32,

    #[serde(default = "def_window_width")]
    pub window_width: u32,

    #[serde(default = "def_window_height")]
    pub window_height: u32,

    /// How far above the vertical centre the widget starts.
    #[serde(default = "def_lift")]
    pub lift: i32,

    /// Screen size override; probed from the compositor when unset.
    #[serde(default)]
    pub screen_width: Option<u32>,

    #[serde(default)]
    pub screen_height: Option<u32>,

    /// Output (monitor) name to open on. `ROLL_CALL_OUTPUT` takes precedence.
    #[serde(default)]
    pub output: Option<String>,

    /// Text shown when no name is on display.
    #[serde(default = "def_placeholder")]
    pub placeholder: String,

    #[serde(default = "def_button_label")]
    pub button_label: String,

    #[serde(default = "def_flash_ms")]
    pub flash_ms: u64,

    /// Longer names are truncated with an ellipsis.
    #[serde(default = "def_max_name_chars")]
    pub max_name_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            names_path: def_names_path(),
            sheet: None,
            column: None,
            idle_timeout_ms: def_idle_timeout_ms(),
            idle_check_ms: def_idle_check_ms(),
            slide_step: def_slide_step(),
            slide_interval_ms: def_slide_interval_ms(),
            hidden_offset: def_hidden_offset(),
            window_width: def_window_width(),
            window_height: def_window_height(),
            lift: def_lift(),
            screen_width: None,
            screen_height: None,
            output: None,
            placeholder: def_placeholder(),
            button_label: def_button_label(),
            flash_ms: def_flash_ms(),
            max_name_chars: def_max_name_chars(),
        }
    }
}

impl Config {
    pub(crate) fn timing(&self) -> Timing {
        Timing {
            idle_timeout: Duration::from_millis(self.idle_timeout_ms),
            slide_step: self.slide_step,
            flash: Duration::from_millis(self.flash_ms),
        }
    }

    pub fn selector(&self) -> Selector {
        Selector {
            sheet: self.sheet.clone(),
            column: self.column.clone(),
        }
    }

    /// Target output: `ROLL_CALL_OUTPUT` if set and non-empty, else the config value.
    pub fn target_output(&self) -> Option<String> {
        std::env::var("ROLL_CALL_OUTPUT")
            .ok()
            .filter(|s| !s.is_empty())
            .or_else(|| self.output.clone())
    }

    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read the config file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Load from the default location, logging and falling back to defaults
    /// on any error.
    pub fn load() -> Self {
        let path = config_file_path();
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }
}

/// Return the path to the config file.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("roll-call/config.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_object_gives_defaults() {
        let config = Config::parse("{}", Path::new("config.json")).unwrap();
        assert_eq!(config.names_path, PathBuf::from("data/names.xlsx"));
        assert_eq!(config.idle_timeout_ms, 15_000);
        assert_eq!(config.idle_check_ms, 100);
        assert_eq!(config.slide_step, 30);
        assert_eq!(config.slide_interval_ms, 10);
        assert_eq!(config.hidden_offset, -85);
        assert_eq!((config.window_width, config.window_height), (150, 100));
        assert_eq!(config.placeholder, "？？？");
        assert!(config.sheet.is_none());
        assert!(config.screen_width.is_none());
    }

    #[test]
    fn partial_override() {
        let input = r#"{
            "names_path": "/srv/class/7b.ods",
            "sheet": "Roster",
            "column": "C",
            "idle_timeout_ms": 30000,
            "screen_width": 2560
        }"#;
        let config = Config::parse(input, Path::new("config.json")).unwrap();
        assert_eq!(config.names_path, PathBuf::from("/srv/class/7b.ods"));
        assert_eq!(config.sheet.as_deref(), Some("Roster"));
        assert_eq!(config.column.as_deref(), Some("C"));
        assert_eq!(config.screen_width, Some(2560));
        assert_eq!(config.screen_height, None);
        assert_eq!(config.timing().idle_timeout, Duration::from_secs(30));
        assert_eq!(config.timing().slide_step, 30);
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let err = Config::parse("{ not json", Path::new("x.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn wrong_type_is_parse_error() {
        let err = Config::parse(r#"{"slide_step": "fast"}"#, Path::new("x.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.idle_timeout_ms, 15_000);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"placeholder": "?", "max_name_chars": 4}"#)
            .unwrap();
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.placeholder, "?");
        assert_eq!(config.max_name_chars, 4);
    }

    #[test]
    fn selector_carries_sheet_and_column() {
        let config = Config {
            sheet: Some("B".into()),
            column: Some("D".into()),
            ..Config::default()
        };
        let selector = config.selector();
        assert_eq!(selector.sheet.as_deref(), Some("B"));
        assert_eq!(selector.column.as_deref(), Some("D"));
    }
}
