use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::model::config::Config;

/// Written by `crumb config` when no config file exists yet.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# crumb configuration

# default tool to pre-select in the dropdown
default_tool: Claude Code

# custom tools to add to the dropdown (in addition to built-in tools)
custom_tools: []

# favorite tags to suggest when tagging prompts
favorite_tags: []

# output directory for prompts (relative to current working directory)
output_dir: crumbs
"#;

/// Error type for config file operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine the config directory (set XDG_CONFIG_HOME or HOME)")]
    NoConfigDir,
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("editor `{editor}` failed: {reason}")]
    Editor { editor: String, reason: String },
}

/// `$XDG_CONFIG_HOME/crumb/config.yaml`, falling back to
/// `~/.config/crumb/config.yaml` on every platform.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join("crumb").join("config.yaml"))
}

/// Load the config from its standard location; a missing file yields defaults.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path()?)
}

/// Load the config from `path`; a missing file yields defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    let text = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_config(&text).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Parse config text. Empty or comment-only documents yield defaults; absent,
/// null or blank fields are defaulted one by one.
pub fn parse_config(text: &str) -> Result<Config, serde_yaml::Error> {
    let value: serde_yaml::Value = serde_yaml::from_str(text)?;
    if value.is_null() {
        return Ok(Config::default());
    }
    let config: Config = serde_yaml::from_value(value)?;
    Ok(config.normalized())
}

/// Create the config file with documented defaults if it does not exist.
/// Returns true when a new file was written.
pub fn ensure_config_file(path: &Path) -> Result<bool, ConfigError> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| ConfigError::Write {
            path: dir.to_path_buf(),
            source: e,
        })?;
    }
    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(|e| ConfigError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(true)
}

/// `$EDITOR`, or `vim` when unset or blank.
pub fn editor_command() -> String {
    std::env::var("EDITOR")
        .ok()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| "vim".to_string())
}

/// Open `path` in the user's editor and wait for it to exit.
///
/// `$EDITOR` may carry arguments (`code --wait`), so it is split on
/// whitespace before the path is appended.
pub fn open_in_editor(path: &Path) -> Result<(), ConfigError> {
    let editor = editor_command();
    let mut parts = editor.split_whitespace();
    let program = parts.next().unwrap_or("vim");
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| ConfigError::Editor {
            editor: editor.clone(),
            reason: e.to_string(),
        })?;
    if !status.success() {
        return Err(ConfigError::Editor {
            editor,
            reason: format!("exited with {}", status),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config_from(&tmp.path().join("nope.yaml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn full_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        fs::write(
            &path,
            r#"default_tool: "Cursor"
custom_tools:
  - "My Custom Tool"
  - "Another Tool"
favorite_tags:
  - "golang"
  - "testing"
output_dir: "my-prompts"
"#,
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.default_tool, "Cursor");
        assert_eq!(config.output_dir, "my-prompts");
        assert_eq!(config.custom_tools, vec!["My Custom Tool", "Another Tool"]);
        assert_eq!(config.favorite_tags, vec!["golang", "testing"]);
    }

    #[test]
    fn partial_file_defaults_missing_fields() {
        let config = parse_config("custom_tools:\n  - \"My Tool\"\n").unwrap();
        assert_eq!(config.default_tool, "Claude Code");
        assert_eq!(config.output_dir, "crumbs");
        assert_eq!(config.custom_tools, vec!["My Tool"]);
    }

    #[test]
    fn null_and_blank_fields_are_defaulted() {
        let config = parse_config("default_tool:\ncustom_tools:\noutput_dir: \"\"\n").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn empty_and_comment_only_documents() {
        assert_eq!(parse_config("").unwrap(), Config::default());
        assert_eq!(parse_config("# nothing yet\n").unwrap(), Config::default());
    }

    #[test]
    fn default_template_parses_to_defaults() {
        assert_eq!(parse_config(DEFAULT_CONFIG_TEMPLATE).unwrap(), Config::default());
    }

    #[test]
    fn invalid_yaml_is_a_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        fs::write(&path, "custom_tools: [unclosed\n").unwrap();
        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.yaml"));
    }

    #[test]
    fn wrong_type_is_a_parse_error() {
        assert!(parse_config("custom_tools: 42\n").is_err());
    }

    #[test]
    fn ensure_config_file_writes_once() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("crumb").join("config.yaml");
        assert!(ensure_config_file(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG_TEMPLATE);

        fs::write(&path, "default_tool: Aider\n").unwrap();
        assert!(!ensure_config_file(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "default_tool: Aider\n");
    }
}
