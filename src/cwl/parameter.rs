use crate::cwl::types::{resolve_type, CwlType};
use crate::cwl::CwlError;
use regex::Regex;
use serde::Deserialize;
use serde_yaml::Value;
use std::sync::OnceLock;

/// A single input or output declared by a `CommandLineTool`.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub id: String,
    pub doc: String,
    pub label: Option<String>,
    pub optional: bool,
    pub cwl_type: CwlType,
}

/// `doc` may be written as a string or as a list of lines.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDoc {
    Text(String),
    Lines(Vec<String>),
}

impl RawDoc {
    fn join(self) -> String {
        match self {
            RawDoc::Text(s) => s,
            RawDoc::Lines(lines) => lines.join("\n"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawParameter {
    id: Option<String>,
    #[serde(rename = "type")]
    type_: Option<Value>,
    doc: Option<RawDoc>,
    label: Option<String>,
    default: Option<Value>,
}

fn id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*$").expect("identifier pattern is valid")
    })
}

/// Strips the document and step prefixes CWL allows on ids, so both
/// `#threshold` and `tool.cwl#main/threshold` become `threshold`.
pub fn normalize_id(raw: &str) -> &str {
    let fragment = raw.rsplit('#').next().unwrap_or(raw);
    fragment.rsplit('/').next().unwrap_or(fragment)
}

fn validate_id(raw: &str) -> Result<String, CwlError> {
    let id = normalize_id(raw.trim());
    if id.is_empty() {
        return Err(CwlError::new_invalid_param(raw, "id cannot be empty"));
    }
    if !id_pattern().is_match(id) {
        return Err(CwlError::new_invalid_param(
            raw,
            "id must start with a letter or '_' and contain only letters, digits, '_' or '-'",
        ));
    }
    Ok(id.to_string())
}

impl Parameter {
    fn from_raw(key: Option<&str>, raw: RawParameter) -> Result<Self, CwlError> {
        let raw_id = match (raw.id.as_deref(), key) {
            (Some(id), _) => id,
            (None, Some(key)) => key,
            (None, None) => return Err(CwlError::new_invalid_param("<unnamed>", "missing id")),
        };
        let id = validate_id(raw_id)?;

        let type_value = raw
            .type_
            .ok_or_else(|| CwlError::new_invalid_param(&id, "missing type"))?;
        let expr = resolve_type(&id, &type_value)?;

        Ok(Parameter {
            optional: expr.nullable || raw.default.is_some(),
            cwl_type: expr.cwl_type,
            doc: raw.doc.map(RawDoc::join).unwrap_or_default(),
            label: raw.label,
            id,
        })
    }

    /// Parses the `inputs` or `outputs` section of a tool, which may be
    /// either a list of parameter objects or a map keyed by id. Document
    /// order is preserved.
    pub(crate) fn parse_section(section: &str, value: Value) -> Result<Vec<Self>, CwlError> {
        let params = match value {
            Value::Null => vec![],
            Value::Sequence(items) => items
                .into_iter()
                .map(|item| -> Result<Parameter, CwlError> {
                    let raw: RawParameter = serde_yaml::from_value(item)?;
                    Parameter::from_raw(None, raw)
                })
                .collect::<Result<Vec<_>, CwlError>>()?,
            Value::Mapping(map) => map
                .into_iter()
                .map(|(key, item)| -> Result<Parameter, CwlError> {
                    let key = key.as_str().map(str::to_string).ok_or_else(|| {
                        CwlError::new_invalid_param(section, "parameter keys must be strings")
                    })?;
                    // `name: int?` shorthand
                    let raw = if item.is_string() || item.is_sequence() {
                        RawParameter {
                            id: None,
                            type_: Some(item),
                            doc: None,
                            label: None,
                            default: None,
                        }
                    } else {
                        serde_yaml::from_value(item)?
                    };
                    Parameter::from_raw(Some(&key), raw)
                })
                .collect::<Result<Vec<_>, CwlError>>()?,
            _ => {
                return Err(CwlError::new_invalid_param(
                    section,
                    "expected a list or a map of parameters",
                ))
            }
        };

        for (i, p) in params.iter().enumerate() {
            if params[..i].iter().any(|other| other.id == p.id) {
                return Err(CwlError::new_invalid_param(
                    &p.id,
                    &format!("duplicate id in {}", section),
                ));
            }
        }
        Ok(params)
    }

    #[cfg(test)]
    pub fn for_test(id: &str, cwl_type: CwlType, optional: bool, doc: &str) -> Self {
        Parameter {
            id: id.to_string(),
            doc: doc.to_string(),
            label: None,
            optional,
            cwl_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(yaml: &str) -> Vec<Parameter> {
        let value: Value = serde_yaml::from_str(yaml).unwrap();
        Parameter::parse_section("inputs", value).unwrap()
    }

    #[test]
    fn test_normalize_id() {
        assert_eq!(normalize_id("threshold"), "threshold");
        assert_eq!(normalize_id("#threshold"), "threshold");
        assert_eq!(normalize_id("tool.cwl#main/threshold"), "threshold");
    }

    #[test]
    fn test_list_form() {
        let params = section(
            r##"
- id: "#inpDir"
  type: Directory
  doc: Input collection
- id: filePattern
  type: string?
"##,
        );
        assert_eq!(
            params,
            vec![
                Parameter::for_test("inpDir", CwlType::Directory, false, "Input collection"),
                Parameter::for_test("filePattern", CwlType::String, true, ""),
            ]
        );
    }

    #[test]
    fn test_map_form_keeps_order() {
        let params = section(
            r#"
zeta: int
alpha:
  type: boolean
  default: true
  doc:
    - first line
    - second line
"#,
        );
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].id, "zeta");
        assert!(!params[0].optional);
        assert_eq!(params[1].id, "alpha");
        assert!(params[1].optional);
        assert_eq!(params[1].doc, "first line\nsecond line");
    }

    #[test]
    fn test_null_section_is_empty() {
        assert!(section("~").is_empty());
    }

    #[test]
    #[should_panic(expected = "missing type")]
    fn test_missing_type_fails() {
        section("- id: foo");
    }

    #[test]
    #[should_panic(expected = "duplicate id")]
    fn test_duplicate_id_fails() {
        section("[{id: a, type: int}, {id: '#a', type: string}]");
    }

    #[test]
    #[should_panic(expected = "id must start with a letter")]
    fn test_invalid_id_fails() {
        section("- {id: 'a b', type: int}");
    }
}
