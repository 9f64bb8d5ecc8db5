mod parameter;
mod types;

pub use self::parameter::Parameter;
pub use self::types::CwlType;

use serde::Deserialize;
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CwlError {
    #[error("Could not read CWL file at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid CWL document: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Expected a CommandLineTool but the document class is {0:?}")]
    WrongClass(String),
    #[error("Invalid parameter '{id}', {reason}")]
    InvalidParameter { id: String, reason: String },
}

impl CwlError {
    pub fn new_invalid_param(id: &str, reason: &str) -> Self {
        CwlError::InvalidParameter {
            id: id.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTool {
    class: Option<String>,
    cwl_version: Option<String>,
    id: Option<String>,
    label: Option<String>,
    #[serde(default)]
    inputs: Value,
    #[serde(default)]
    outputs: Value,
}

/// The subset of a CWL `CommandLineTool` needed to scaffold a tool CLI.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandLineTool {
    pub cwl_version: Option<String>,
    pub id: Option<String>,
    pub label: Option<String>,
    pub inputs: Vec<Parameter>,
    pub outputs: Vec<Parameter>,
}

impl CommandLineTool {
    pub fn load(path: &Path) -> Result<Self, CwlError> {
        let content = fs::read_to_string(path).map_err(|source| CwlError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tool = Self::from_yaml(&content)?;
        tracing::debug!(
            path = %path.display(),
            inputs = tool.inputs.len(),
            outputs = tool.outputs.len(),
            "loaded CommandLineTool"
        );
        Ok(tool)
    }

    /// Parses a tool from YAML (or JSON, which is valid YAML).
    pub fn from_yaml(content: &str) -> Result<Self, CwlError> {
        let raw: RawTool = serde_yaml::from_str(content)?;
        match raw.class.as_deref() {
            Some("CommandLineTool") => (),
            Some(other) => return Err(CwlError::WrongClass(other.to_string())),
            None => return Err(CwlError::WrongClass("<missing>".to_string())),
        }
        if raw.cwl_version.is_none() {
            tracing::warn!("CWL document does not declare a cwlVersion");
        }

        Ok(CommandLineTool {
            inputs: Parameter::parse_section("inputs", raw.inputs)?,
            outputs: Parameter::parse_section("outputs", raw.outputs)?,
            cwl_version: raw.cwl_version,
            id: raw.id,
            label: raw.label,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::test_utils::test_data;
    use super::*;

    #[test]
    fn test_load_tool() {
        let tool = CommandLineTool::load(&test_data("threshold.cwl")).unwrap();
        assert_eq!(tool.cwl_version.as_deref(), Some("v1.2"));
        assert_eq!(tool.label.as_deref(), Some("Threshold"));

        let ids: Vec<&str> = tool.inputs.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["inpDir", "filePattern", "threshold", "iterations", "preview", "outDir"]
        );
        assert_eq!(tool.outputs.len(), 1);
        assert_eq!(tool.outputs[0].cwl_type, CwlType::Directory);
    }

    #[test]
    fn test_load_optional_flags() {
        let tool = CommandLineTool::load(&test_data("threshold.cwl")).unwrap();
        let optional: Vec<bool> = tool.inputs.iter().map(|p| p.optional).collect();
        assert_eq!(optional, vec![false, true, true, true, true, false]);
    }

    #[test]
    fn test_load_unsupported_types_are_kept() {
        let tool = CommandLineTool::load(&test_data("unsupported.cwl")).unwrap();
        assert_eq!(tool.inputs[1].cwl_type, CwlType::Other("File[]".to_string()));
    }

    #[test]
    fn test_load_missing_file() {
        let err = CommandLineTool::load(&test_data("__no_file__.cwl")).unwrap_err();
        assert!(matches!(err, CwlError::Io { .. }));
        assert!(err.to_string().starts_with("Could not read CWL file at"));
    }

    #[test]
    fn test_workflow_class_is_rejected() {
        let err = CommandLineTool::from_yaml("cwlVersion: v1.2\nclass: Workflow\ninputs: []\n")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected a CommandLineTool but the document class is \"Workflow\""
        );
    }

    #[test]
    #[should_panic(expected = "WrongClass(\"<missing>\")")]
    fn test_missing_class_is_rejected() {
        CommandLineTool::from_yaml("cwlVersion: v1.2\ninputs: []\n").unwrap();
    }

    #[test]
    fn test_json_document() {
        let tool = CommandLineTool::from_yaml(
            r#"{"cwlVersion": "v1.0", "class": "CommandLineTool", "inputs": {"n": "int"}}"#,
        )
        .unwrap();
        assert_eq!(tool.inputs[0].cwl_type, CwlType::Int);
        assert!(tool.outputs.is_empty());
    }
}
