use crate::cwl::CwlError;
use serde_yaml::Value;
use std::fmt;

/// The type of a CWL parameter once the nullable part has been stripped.
#[derive(Debug, Clone, PartialEq)]
pub enum CwlType {
    Boolean,
    Int,
    Long,
    Float,
    Double,
    String,
    File,
    Directory,

    /// Anything this model does not understand: arrays, records, enums,
    /// multi-type unions, `Any`, `stdout`, ...
    Other(String),
}

impl CwlType {
    fn from_name(name: &str) -> Self {
        match name {
            "boolean" => CwlType::Boolean,
            "int" => CwlType::Int,
            "long" => CwlType::Long,
            "float" => CwlType::Float,
            "double" => CwlType::Double,
            "string" => CwlType::String,
            "File" => CwlType::File,
            "Directory" => CwlType::Directory,
            other => CwlType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for CwlType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            CwlType::Boolean => "boolean",
            CwlType::Int => "int",
            CwlType::Long => "long",
            CwlType::Float => "float",
            CwlType::Double => "double",
            CwlType::String => "string",
            CwlType::File => "File",
            CwlType::Directory => "Directory",
            CwlType::Other(name) => name,
        };
        write!(f, "{}", name)
    }
}

/// A resolved type expression: the underlying type and whether `null` is
/// accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeExpr {
    pub cwl_type: CwlType,
    pub nullable: bool,
}

impl TypeExpr {
    fn new(cwl_type: CwlType, nullable: bool) -> Self {
        TypeExpr { cwl_type, nullable }
    }
}

/// Resolves the `type` field of a parameter.
///
/// Handles the `T?` shorthand, `T[]` (kept as an unsupported type), unions
/// written as sequences and the long map form (`{type: array, items: ...}`).
pub fn resolve_type(param_id: &str, value: &Value) -> Result<TypeExpr, CwlError> {
    match value {
        Value::String(s) => Ok(resolve_name(s)),
        Value::Sequence(members) => {
            let mut nullable = false;
            let mut rest: Vec<&Value> = vec![];
            for member in members {
                if member.as_str() == Some("null") {
                    nullable = true;
                } else {
                    rest.push(member);
                }
            }
            match rest.as_slice() {
                [] => Ok(TypeExpr::new(CwlType::Other("null".to_string()), nullable)),
                [single] => {
                    let inner = resolve_type(param_id, single)?;
                    Ok(TypeExpr::new(inner.cwl_type, nullable || inner.nullable))
                }
                many => {
                    let names = many
                        .iter()
                        .map(|v| describe_value(v))
                        .collect::<Vec<_>>()
                        .join(" | ");
                    Ok(TypeExpr::new(CwlType::Other(names), nullable))
                }
            }
        }
        Value::Mapping(map) => match map.get("type") {
            Some(Value::String(s)) => Ok(TypeExpr::new(CwlType::Other(s.to_string()), false)),
            _ => Err(CwlError::new_invalid_param(
                param_id,
                "type mapping has no 'type' name",
            )),
        },
        other => Err(CwlError::new_invalid_param(
            param_id,
            &format!("unrecognized type expression {:?}", other),
        )),
    }
}

fn resolve_name(name: &str) -> TypeExpr {
    let (base, nullable) = strip_optional(name.trim());
    if base == "null" {
        return TypeExpr::new(CwlType::Other("null".to_string()), true);
    }
    if base.ends_with("[]") {
        return TypeExpr::new(CwlType::Other(base.to_string()), nullable);
    }
    TypeExpr::new(CwlType::from_name(base), nullable)
}

fn strip_optional(name: &str) -> (&str, bool) {
    match name.strip_suffix('?') {
        Some(base) => (base, true),
        None => (name, false),
    }
}

fn describe_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.to_string(),
        Value::Mapping(map) => map
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("mapping")
            .to_string(),
        _ => "unknown".to_string(),
    }
}
