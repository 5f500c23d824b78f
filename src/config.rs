//! Parser and renderer options, loadable from TOML
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Indent used by `=over` without an argument
    pub default_indent: f32,
    /// Link target for `L<name(N)>`; `{name}` and `{section}` are substituted
    pub man_url_template: String,
    /// Formats of `=begin`/`=for` blocks that are passed through to the output
    pub raw_formats: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            default_indent: 4.0,
            man_url_template: "https://man7.org/linux/man-pages/man{section}/{name}.{section}.html"
                .to_string(),
            raw_formats: vec!["html".to_string()],
        }
    }
}

impl Options {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        let config_path = config_path.as_ref();
        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        Self::from_toml_str(&content).map_err(|source| ConfigError::ConfigParseError {
            config_path: config_path.to_path_buf(),
            source,
        })
    }

    /// Expand the man page URL template
    pub fn man_url(&self, name: &str, section: char) -> String {
        self.man_url_template
            .replace("{name}", name)
            .replace("{section}", &section.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let options = Options::from_toml_str("default_indent = 2.5\n").unwrap();
        assert_eq!(options.default_indent, 2.5);
        assert_eq!(options.raw_formats, vec!["html".to_string()]);
    }

    #[test]
    fn test_man_url() {
        let options = Options::default();
        assert_eq!(
            options.man_url("ls", '1'),
            "https://man7.org/linux/man-pages/man1/ls.1.html"
        );
    }

    #[test]
    fn test_load_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "raw_formats = [\"html\", \"xhtml\"]").unwrap();
        writeln!(file, "man_url_template = \"man:{{name}}({{section}})\"").unwrap();

        let options = Options::load_from_path(file.path()).unwrap();
        assert_eq!(options.raw_formats.len(), 2);
        assert_eq!(options.man_url("cron", '8'), "man:cron(8)");
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let result = Options::load_from_path("/nonexistent/podhtml.toml");
        assert!(matches!(result, Err(ConfigError::ConfigReadError { .. })));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "default_indent = \"wide\"").unwrap();
        let result = Options::load_from_path(file.path());
        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }
}
