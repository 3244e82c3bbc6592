//! marv_options: marv.json parsing and run options.
//!
//! Parses marv.json files into a [`MarvConfig`]. Every field is optional;
//! command-line flags are layered on top with [`MarvConfig::merge`] and the
//! accessor methods supply the defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "marv.json";

/// The marv.json file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MarvConfig {
    // -- Inputs and outputs --
    pub files: Option<Vec<String>>,
    pub output: Option<String>,
    pub log_file: Option<String>,

    // -- Phases --
    pub parser: Option<ParserConfig>,
    pub printer: Option<PrinterConfig>,
    pub resolve: Option<bool>,
    pub globals: Option<Vec<String>>,

    // -- Reporting --
    pub warnings_as_errors: Option<bool>,
    pub emit_estree: Option<bool>,
}

/// How source files are turned into ESTree JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ParserConfig {
    /// Program and arguments; the input path is appended. When absent the
    /// inputs are read as ESTree JSON.
    pub command: Option<Vec<String>>,
}

/// Output formatting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PrinterConfig {
    pub indent: Option<String>,
    pub preserve_comments: Option<bool>,
    pub trailing_newline: Option<bool>,
}

/// Errors loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("parser.command must name a program")]
    EmptyParserCommand,
}

impl MarvConfig {
    /// Overlay `overrides` on `self`; fields set in `overrides` win.
    pub fn merge(self, overrides: MarvConfig) -> MarvConfig {
        MarvConfig {
            files: overrides.files.or(self.files),
            output: overrides.output.or(self.output),
            log_file: overrides.log_file.or(self.log_file),
            parser: match (self.parser, overrides.parser) {
                (Some(base), Some(top)) => Some(ParserConfig {
                    command: top.command.or(base.command),
                }),
                (base, top) => top.or(base),
            },
            printer: match (self.printer, overrides.printer) {
                (Some(base), Some(top)) => Some(PrinterConfig {
                    indent: top.indent.or(base.indent),
                    preserve_comments: top.preserve_comments.or(base.preserve_comments),
                    trailing_newline: top.trailing_newline.or(base.trailing_newline),
                }),
                (base, top) => top.or(base),
            },
            resolve: overrides.resolve.or(self.resolve),
            globals: match (self.globals, overrides.globals) {
                (Some(mut base), Some(top)) => {
                    base.extend(top);
                    Some(base)
                }
                (base, top) => top.or(base),
            },
            warnings_as_errors: overrides.warnings_as_errors.or(self.warnings_as_errors),
            emit_estree: overrides.emit_estree.or(self.emit_estree),
        }
    }

    pub fn files(&self) -> &[String] {
        self.files.as_deref().unwrap_or(&[])
    }

    pub fn parser_command(&self) -> Option<&[String]> {
        self.parser.as_ref().and_then(|p| p.command.as_deref())
    }

    pub fn resolve(&self) -> bool {
        self.resolve.unwrap_or(true)
    }

    pub fn globals(&self) -> &[String] {
        self.globals.as_deref().unwrap_or(&[])
    }

    pub fn warnings_as_errors(&self) -> bool {
        self.warnings_as_errors.unwrap_or(false)
    }

    pub fn emit_estree(&self) -> bool {
        self.emit_estree.unwrap_or(false)
    }

    pub fn indent(&self) -> &str {
        self.printer
            .as_ref()
            .and_then(|p| p.indent.as_deref())
            .unwrap_or("    ")
    }

    pub fn preserve_comments(&self) -> bool {
        self.printer
            .as_ref()
            .and_then(|p| p.preserve_comments)
            .unwrap_or(true)
    }

    pub fn trailing_newline(&self) -> bool {
        self.printer
            .as_ref()
            .and_then(|p| p.trailing_newline)
            .unwrap_or(true)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if let Some(command) = self.parser_command() {
            if command.first().map_or(true, |program| program.is_empty()) {
                return Err(ConfigError::EmptyParserCommand);
            }
        }
        Ok(self)
    }
}

/// Parse a marv.json file from a string.
pub fn parse_config(content: &str) -> Result<MarvConfig, ConfigError> {
    let config: MarvConfig = serde_json::from_str(content)?;
    config.validate()
}

/// Parse a marv.json file from a path.
pub fn parse_config_file(path: &Path) -> Result<MarvConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"{
                "files": ["a.js", "b.js"],
                "output": "out.js",
                "logFile": "marv.log",
                "parser": { "command": ["node", "tools/esprima-dump.js"] },
                "printer": { "indent": "  ", "preserveComments": false, "trailingNewline": true },
                "resolve": true,
                "globals": ["myHostFn"],
                "warningsAsErrors": true,
                "emitEstree": false
            }"#,
        )
        .unwrap();
        assert_eq!(config.files(), &["a.js".to_string(), "b.js".to_string()]);
        assert_eq!(config.output.as_deref(), Some("out.js"));
        assert_eq!(config.log_file.as_deref(), Some("marv.log"));
        assert_eq!(
            config.parser_command(),
            Some(&["node".to_string(), "tools/esprima-dump.js".to_string()][..])
        );
        assert_eq!(config.indent(), "  ");
        assert!(!config.preserve_comments());
        assert!(config.trailing_newline());
        assert_eq!(config.globals(), &["myHostFn".to_string()]);
        assert!(config.warnings_as_errors());
        assert!(!config.emit_estree());
    }

    #[test]
    fn test_defaults() {
        let config = parse_config("{}").unwrap();
        assert!(config.files().is_empty());
        assert_eq!(config.parser_command(), None);
        assert!(config.resolve());
        assert_eq!(config.indent(), "    ");
        assert!(config.preserve_comments());
        assert!(config.trailing_newline());
        assert!(!config.warnings_as_errors());
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            parse_config(r#"{ "outFile": "x.js" }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_empty_parser_command_rejected() {
        assert!(matches!(
            parse_config(r#"{ "parser": { "command": [] } }"#),
            Err(ConfigError::EmptyParserCommand)
        ));
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let base = parse_config(
            r#"{ "output": "a.js", "printer": { "indent": "  ", "preserveComments": false }, "globals": ["x"] }"#,
        )
        .unwrap();
        let overrides = MarvConfig {
            output: Some("b.js".to_string()),
            printer: Some(PrinterConfig {
                preserve_comments: Some(true),
                ..Default::default()
            }),
            globals: Some(vec!["y".to_string()]),
            resolve: Some(false),
            ..Default::default()
        };
        let merged = base.merge(overrides);
        assert_eq!(merged.output.as_deref(), Some("b.js"));
        assert_eq!(merged.indent(), "  ");
        assert!(merged.preserve_comments());
        assert_eq!(merged.globals(), &["x".to_string(), "y".to_string()]);
        assert!(!merged.resolve());
    }

    #[test]
    fn test_missing_file() {
        let err = parse_config_file(Path::new("/nonexistent/marv.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/marv.json"));
    }
}
