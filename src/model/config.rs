use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

/// Tools offered in the selector before any `custom_tools`.
pub const BUILTIN_TOOLS: &[&str] = &[
    "Claude Code",
    "Cursor",
    "Kiro",
    "ChatGPT",
    "Copilot",
    "Warp AI",
    "Windsurf",
    "Aider",
    "Gemini",
    "Perplexity",
];

/// Default: see DEFAULT_CONFIG_TEMPLATE in io/config_io.rs
pub const DEFAULT_TOOL: &str = "Claude Code";

/// Default: see DEFAULT_CONFIG_TEMPLATE in io/config_io.rs
pub const DEFAULT_OUTPUT_DIR: &str = "crumbs";

/// Configuration from config.yaml
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Tool pre-selected in the form
    #[serde(default = "default_tool", deserialize_with = "nullable")]
    pub default_tool: String,
    /// Extra tools appended after the built-in list
    #[serde(default, deserialize_with = "nullable")]
    pub custom_tools: Vec<String>,
    /// Tags always offered as suggestions, ahead of frequently used ones
    #[serde(default, deserialize_with = "nullable")]
    pub favorite_tags: Vec<String>,
    /// Where entries are written; relative paths resolve against the working directory
    #[serde(default = "default_output_dir", deserialize_with = "nullable")]
    pub output_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_tool: default_tool(),
            custom_tools: Vec::new(),
            favorite_tags: Vec::new(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_tool() -> String {
    DEFAULT_TOOL.to_string()
}

fn default_output_dir() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}

/// A `key:` with no value deserializes as its type's empty value instead of
/// failing the whole file.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Config {
    /// Fill blank fields with their defaults and drop blank list items.
    pub fn normalized(mut self) -> Self {
        if self.default_tool.trim().is_empty() {
            self.default_tool = default_tool();
        }
        if self.output_dir.trim().is_empty() {
            self.output_dir = default_output_dir();
        }
        self.custom_tools.retain(|t| !t.trim().is_empty());
        self.favorite_tags.retain(|t| !t.trim().is_empty());
        self
    }

    /// Built-in tools followed by custom tools, without duplicates.
    pub fn all_tools(&self) -> Vec<String> {
        let mut tools: Vec<String> = BUILTIN_TOOLS.iter().map(|t| t.to_string()).collect();
        for custom in &self.custom_tools {
            if !tools.contains(custom) {
                tools.push(custom.clone());
            }
        }
        tools
    }

    pub fn is_known_tool(&self, name: &str) -> bool {
        BUILTIN_TOOLS.contains(&name) || self.custom_tools.iter().any(|t| t == name)
    }

    /// The output directory, made absolute against `base` when relative.
    pub fn output_path(&self, base: &Path) -> PathBuf {
        let dir = Path::new(&self.output_dir);
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            base.join(dir)
        }
    }
}
