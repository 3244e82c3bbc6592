//! Parser back-ends: where the ESTree for a file comes from.

use crate::error::FrontendError;
use serde_json::Value;
use std::path::Path;
use std::process::Command;
use tracing::{debug, trace};

/// Produces ESTree JSON for one source file.
pub trait ParserBackend: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    fn parse(&self, path: &Path, source: &str) -> Result<Value, FrontendError>;
}

/// The input file already contains ESTree JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstreeJson;

impl ParserBackend for EstreeJson {
    fn name(&self) -> &str {
        "estree-json"
    }

    fn parse(&self, path: &Path, source: &str) -> Result<Value, FrontendError> {
        serde_json::from_str(source).map_err(|source| FrontendError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Runs an external parser with the file path appended and reads ESTree
/// JSON from its stdout.
///
/// The parser must emit comments, raw literal text, line locations and
/// ranges; `tools/esprima-dump.js` does.
#[derive(Debug, Clone)]
pub struct ExternalCommand {
    program: String,
    args: Vec<String>,
}

impl ExternalCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from a program-and-arguments list. `None` when it is empty.
    pub fn from_command_line(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self::new(program.clone(), args.to_vec()))
    }

    /// `node tools/esprima-dump.js`.
    pub fn esprima() -> Self {
        Self::new("node", vec!["tools/esprima-dump.js".to_string()])
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl ParserBackend for ExternalCommand {
    fn name(&self) -> &str {
        &self.program
    }

    fn parse(&self, path: &Path, _source: &str) -> Result<Value, FrontendError> {
        debug!(command = %self.command_line(), path = %path.display(), "running parser");
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .output()
            .map_err(|source| FrontendError::Spawn {
                command: self.command_line(),
                source,
            })?;
        if !output.status.success() {
            return Err(FrontendError::CommandFailed {
                command: self.command_line(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        trace!(bytes = output.stdout.len(), "parser output");
        serde_json::from_slice(&output.stdout).map_err(|source| FrontendError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estree_json_backend() {
        let value = EstreeJson
            .parse(Path::new("a.json"), r#"{ "type": "Program", "body": [] }"#)
            .unwrap();
        assert_eq!(value["type"], "Program");
    }

    #[test]
    fn test_estree_json_rejects_garbage() {
        let err = EstreeJson.parse(Path::new("a.js"), "var x = 1;").unwrap_err();
        assert!(matches!(err, FrontendError::InvalidJson { .. }));
        assert!(err.to_string().starts_with("a.js is not ESTree JSON"));
    }

    #[test]
    fn test_command_line() {
        let command = ExternalCommand::from_command_line(&[
            "node".to_string(),
            "dump.js".to_string(),
            "--flag".to_string(),
        ])
        .unwrap();
        assert_eq!(command.command_line(), "node dump.js --flag");
        assert_eq!(command.name(), "node");
        assert!(ExternalCommand::from_command_line(&[]).is_none());
        assert_eq!(ExternalCommand::esprima().command_line(), "node tools/esprima-dump.js");
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let command = ExternalCommand::new("marv-no-such-parser-binary", Vec::new());
        let err = command.parse(Path::new("a.js"), "").unwrap_err();
        assert!(matches!(err, FrontendError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_command_is_fatal() {
        let command = ExternalCommand::new("sh", vec!["-c".to_string(), "echo broken >&2; exit 3".to_string()]);
        let err = command.parse(Path::new("a.js"), "").unwrap_err();
        match err {
            FrontendError::CommandFailed { stderr, .. } => assert_eq!(stderr, "broken"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_command_output_is_parsed() {
        let command = ExternalCommand::new(
            "sh",
            vec!["-c".to_string(), r#"echo '{"type":"Program","body":[]}'"#.to_string(), "sh".to_string()],
        );
        let value = command.parse(Path::new("a.js"), "").unwrap();
        assert_eq!(value["body"], serde_json::json!([]));
    }
}
