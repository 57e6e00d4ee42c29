//! Configuration file handling for march

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::commands::entry::CommandEntry;

/// Errors that can occur while locating, creating or loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config folder was not found: {0}\nTry setting/changing XDG_CONFIG_HOME env variable.")]
    ConfigDirectoryMissing(PathBuf),
    #[error("Unable to determine the home directory.\nTry setting XDG_CONFIG_HOME env variable.")]
    HomeNotFound,
    #[error("Config folder creation has failed: {path}: {source}")]
    ConfigFolderCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Config file creation has failed: {path}: {source}")]
    ConfigFileCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),
    #[error("Unable to parse YAML config file {path}: {source}")]
    Yaml {
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("Config file {0} must be a mapping of command names to entries")]
    NotAMapping(PathBuf),
    #[error("Command names must be strings, found: {0}")]
    InvalidKey(String),
    #[error("Malformed entry `{name}` (expected `short` and `command` strings): {source}")]
    ConfigEntryMalformed {
        name: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Name of the folder inside the config home
pub const APP_FOLDER: &str = "march";

/// Name of the config file inside the app folder
pub const CONFIG_FILENAME: &str = "config.yml";

/// Configuration for a single command, as written in the file
#[derive(Debug, Deserialize)]
pub struct ConfigEntry {
    pub short: String,
    pub command: String,
}

impl ConfigEntry {
    fn into_entry(self, name: String) -> CommandEntry {
        CommandEntry {
            name,
            short: self.short,
            command: self.command,
        }
    }
}

/// Loaded configuration: entries in declaration order
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub entries: Vec<CommandEntry>,
}

impl Config {
    /// Loads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if the file cannot be read, or any error from
    /// [`Config::parse`].
    pub fn from_file(file: &Path) -> Result<Config, ConfigError> {
        debug!("Loading config file: {}", file.display());
        let contents = std::fs::read_to_string(file)
            .map_err(|_| ConfigError::ConfigNotFound(file.to_path_buf()))?;
        Self::parse(&contents, file)
    }

    /// Parses configuration text. `path` is only used for error messages.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Yaml` for invalid YAML, `ConfigError::NotAMapping` if the document
    /// is not a mapping, `ConfigError::InvalidKey` for non-string command names,
    /// and `ConfigError::ConfigEntryMalformed` if an entry lacks a `short` or `command` string.
    pub fn parse(contents: &str, path: &Path) -> Result<Config, ConfigError> {
        if is_blank(contents) {
            debug!("Config file {} is empty", path.display());
            return Ok(Config::default());
        }

        let document: serde_yaml::Value =
            serde_yaml::from_str(contents).map_err(|e| ConfigError::Yaml {
                source: e,
                path: path.to_path_buf(),
            })?;

        let mapping = match document {
            serde_yaml::Value::Null => serde_yaml::Mapping::new(),
            serde_yaml::Value::Mapping(mapping) => mapping,
            _ => return Err(ConfigError::NotAMapping(path.to_path_buf())),
        };

        // serde_yaml keeps mapping keys in document order
        let entries = mapping
            .into_iter()
            .map(|(key, value)| {
                let name = match key {
                    serde_yaml::Value::String(name) => name,
                    other => return Err(ConfigError::InvalidKey(describe_key(&other))),
                };
                match serde_yaml::from_value::<ConfigEntry>(value) {
                    Ok(entry) => Ok(entry.into_entry(name)),
                    Err(source) => Err(ConfigError::ConfigEntryMalformed { name, source }),
                }
            })
            .collect::<Result<Vec<CommandEntry>, ConfigError>>()?;

        let config = Config { entries };
        check_entries(&config.entries);
        debug!("Loaded {} command entries", config.entries.len());
        Ok(config)
    }

}

/// True when the document holds nothing but whitespace and comments
fn is_blank(contents: &str) -> bool {
    contents.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}

fn describe_key(key: &serde_yaml::Value) -> String {
    serde_yaml::to_string(key).map_or_else(|_| format!("{key:?}"), |s| s.trim().to_string())
}

/// Report entries that do nothing, and aliases that can never or ambiguously be selected
fn check_entries(entries: &[CommandEntry]) {
    let mut owners: HashMap<&str, Vec<&str>> = HashMap::new();
    for entry in entries {
        if entry.command.trim().is_empty() {
            warn!("Command `{}` has an empty command string", entry.name);
        }
        match entry.short.chars().count() {
            0 => warn!("Command `{}` has an empty short alias", entry.name),
            1 => {}
            _ => warn!(
                "Short alias `{}` of `{}` is longer than one character and can only be selected by name",
                entry.short, entry.name
            ),
        }
        owners.entry(&entry.short).or_default().push(&entry.name);
    }
    for (short, names) in owners {
        if names.len() > 1 && !short.is_empty() {
            warn!(
                "Short alias `{short}` is shared by: {}",
                names.join(", ")
            );
        }
    }
}

/// Resolve the config home from `XDG_CONFIG_HOME` and the user's home directory.
///
/// An unset or empty `XDG_CONFIG_HOME` falls back to `~/.config`.
///
/// # Errors
///
/// Returns `ConfigError::HomeNotFound` if neither is available.
pub fn config_home(
    xdg_config_home: Option<OsString>,
    home_dir: Option<PathBuf>,
) -> Result<PathBuf, ConfigError> {
    match xdg_config_home {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => home_dir
            .map(|home| home.join(".config"))
            .ok_or(ConfigError::HomeNotFound),
    }
}

/// Path of the config file for a given config home
#[must_use]
pub fn config_path(config_home: &Path) -> PathBuf {
    config_home.join(APP_FOLDER).join(CONFIG_FILENAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(contents: &str) -> Result<Config, ConfigError> {
        Config::parse(contents, Path::new("config.yml"))
    }

    #[test]
    fn test_from_file_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "upgrade:\n  short: u\n  command: echo upgrade\n",
        )
        .unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(
            config.entries,
            vec![CommandEntry::new("upgrade", "u", "echo upgrade")]
        );
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yml");
        match Config::from_file(&path) {
            Err(ConfigError::ConfigNotFound(p)) => assert_eq!(p, path),
            other => panic!("Expected ConfigNotFound, got: {other:?}"),
        }
    }

    #[test]
    fn test_declaration_order_preserved() {
        let config = parse(
            "zeta:\n  short: z\n  command: Z\nalpha:\n  short: a\n  command: A\nmid:\n  short: m\n  command: M\n",
        )
        .unwrap();
        let names: Vec<&str> = config.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_extra_fields_ignored() {
        let config =
            parse("a:\n  short: x\n  command: A\n  description: something\n").unwrap();
        assert_eq!(config.entries[0].command, "A");
    }

    #[test]
    fn test_empty_document_is_empty_config() {
        assert!(parse("").unwrap().entries.is_empty());
        assert!(parse("# only a comment\n").unwrap().entries.is_empty());
    }

    #[test]
    fn test_missing_field_is_malformed_entry() {
        match parse("a:\n  short: x\n  command: A\nb:\n  short: y\n") {
            Err(ConfigError::ConfigEntryMalformed { name, .. }) => assert_eq!(name, "b"),
            other => panic!("Expected ConfigEntryMalformed, got: {other:?}"),
        }
    }

    #[test]
    fn test_scalar_entry_is_malformed() {
        match parse("a: echo hi\n") {
            Err(ConfigError::ConfigEntryMalformed { name, .. }) => assert_eq!(name, "a"),
            other => panic!("Expected ConfigEntryMalformed, got: {other:?}"),
        }
    }

    #[test]
    fn test_non_mapping_document() {
        assert!(matches!(
            parse("- a\n- b\n"),
            Err(ConfigError::NotAMapping(_))
        ));
    }

    #[test]
    fn test_non_string_key() {
        match parse("1:\n  short: x\n  command: A\n") {
            Err(ConfigError::InvalidKey(key)) => assert_eq!(key, "1"),
            other => panic!("Expected InvalidKey, got: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            parse("a: [unclosed\n"),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn test_empty_command_loads() {
        let config = parse("a:\n  short: x\n  command: ''\nb:\n  short: y\n  command: B\n").unwrap();
        assert_eq!(
            config.entries,
            vec![CommandEntry::new("a", "x", ""), CommandEntry::new("b", "y", "B")]
        );
    }

    #[test]
    fn test_multi_char_short_is_accepted() {
        let config = parse("upgrade:\n  short: up\n  command: U\n").unwrap();
        assert_eq!(config.entries[0].short, "up");
    }

    #[test]
    fn test_config_home_prefers_xdg() {
        let home = config_home(
            Some(OsString::from("/xdg")),
            Some(PathBuf::from("/home/user")),
        )
        .unwrap();
        assert_eq!(home, PathBuf::from("/xdg"));
    }

    #[test]
    fn test_config_home_falls_back_to_dot_config() {
        let expected = PathBuf::from("/home/user/.config");
        assert_eq!(
            config_home(None, Some(PathBuf::from("/home/user"))).unwrap(),
            expected
        );
        assert_eq!(
            config_home(Some(OsString::new()), Some(PathBuf::from("/home/user"))).unwrap(),
            expected
        );
    }

    #[test]
    fn test_config_home_without_home() {
        assert!(matches!(
            config_home(None, None),
            Err(ConfigError::HomeNotFound)
        ));
    }

    #[test]
    fn test_config_path() {
        assert_eq!(
            config_path(Path::new("/xdg")),
            PathBuf::from("/xdg/march/config.yml")
        );
    }
}
