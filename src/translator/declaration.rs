use crate::cwl::{CwlType, Parameter};
use crate::translator::Kind;

/// The shape of a parameter declaration the translator reads.
///
/// Anything that can name itself, describe itself, say whether it may be
/// omitted and report its kind can be turned into an option.
pub trait ParameterDeclaration {
    fn identifier(&self) -> &str;
    fn documentation(&self) -> &str;
    fn is_optional(&self) -> bool;

    /// The declared kind, or the declared type's name when it has no kind.
    fn kind(&self) -> Result<Kind, String>;
}

impl ParameterDeclaration for Parameter {
    fn identifier(&self) -> &str {
        &self.id
    }

    /// The `doc` text, or the `label` when no doc is given.
    fn documentation(&self) -> &str {
        if self.doc.trim().is_empty() {
            self.label.as_deref().unwrap_or(&self.doc)
        } else {
            &self.doc
        }
    }

    fn is_optional(&self) -> bool {
        self.optional
    }

    fn kind(&self) -> Result<Kind, String> {
        match &self.cwl_type {
            CwlType::Boolean => Ok(Kind::Boolean),
            CwlType::Int | CwlType::Long => Ok(Kind::Integer),
            CwlType::Float | CwlType::Double => Ok(Kind::Float),
            CwlType::String => Ok(Kind::Text),
            CwlType::File => Ok(Kind::File),
            CwlType::Directory => Ok(Kind::Directory),
            CwlType::Other(name) => Err(name.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cwl_kinds() {
        let inputs = vec![
            (CwlType::Boolean, Ok(Kind::Boolean)),
            (CwlType::Int, Ok(Kind::Integer)),
            (CwlType::Long, Ok(Kind::Integer)),
            (CwlType::Float, Ok(Kind::Float)),
            (CwlType::Double, Ok(Kind::Float)),
            (CwlType::String, Ok(Kind::Text)),
            (CwlType::File, Ok(Kind::File)),
            (CwlType::Directory, Ok(Kind::Directory)),
            (CwlType::Other("Any".to_string()), Err("Any".to_string())),
        ];

        for (cwl_type, expected) in inputs {
            let param = Parameter::for_test("p", cwl_type, false, "");
            assert_eq!(param.kind(), expected);
        }
    }

    #[test]
    fn test_documentation_falls_back_to_label() {
        let mut param = Parameter::for_test("p", CwlType::Int, false, "");
        assert_eq!(param.documentation(), "");

        param.label = Some("Iterations".to_string());
        assert_eq!(param.documentation(), "Iterations");

        param.doc = "Number of passes".to_string();
        assert_eq!(param.documentation(), "Number of passes");
    }
}
