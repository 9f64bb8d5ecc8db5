mod declaration;
mod descriptor;
mod errors;

pub use self::declaration::ParameterDeclaration;
pub use self::descriptor::{
    DefaultPolicy, Direction, Flag, Kind, OptionDescriptor, OptionType, OptionValue,
    ValidationFlags,
};
pub use self::errors::TranslateError;

use crate::cwl::CommandLineTool;

fn path_flags(kind: Kind, direction: Direction) -> ValidationFlags {
    let is_file = kind == Kind::File;
    let flags = ValidationFlags::default()
        .with(Flag::Exists, true)
        .with(Flag::FileOkay, is_file)
        .with(Flag::DirOkay, !is_file)
        .with(Flag::ResolvePath, true);
    match direction {
        Direction::Input => flags.with(Flag::Readable, true),
        Direction::Output => flags.with(Flag::Writable, true),
    }
}

/// Turns one parameter declaration into an option descriptor.
///
/// Optional scalar inputs get their kind's zero value as a default; paths and
/// outputs are always required.
pub fn translate<P: ParameterDeclaration + ?Sized>(
    param: &P,
    direction: Direction,
) -> Result<OptionDescriptor, TranslateError> {
    let id = param.identifier();
    let kind = param
        .kind()
        .map_err(|name| TranslateError::new_unsupported_type(id, name))?;

    let has_default = direction == Direction::Input && param.is_optional() && !kind.is_path();
    let default = if has_default {
        DefaultPolicy::Value(kind.zero_default()?)
    } else {
        DefaultPolicy::Required
    };

    let flags = if kind.is_path() {
        path_flags(kind, direction)
    } else {
        ValidationFlags::default()
    };

    tracing::debug!(id, %kind, ?direction, required = !has_default, "translated parameter");

    Ok(OptionDescriptor {
        id: id.to_string(),
        kind,
        option_type: kind.option_type(),
        default,
        help: param.documentation().to_string(),
        flags,
    })
}

/// Translates every declaration in order, stopping at the first failure.
pub fn translate_all<'a, P, I>(
    params: I,
    direction: Direction,
) -> Result<Vec<OptionDescriptor>, TranslateError>
where
    P: ParameterDeclaration + 'a,
    I: IntoIterator<Item = &'a P>,
{
    params
        .into_iter()
        .map(|p| translate(p, direction))
        .collect()
}

/// Translates the inputs of a tool and, when asked, its outputs after them.
pub fn translate_tool(
    tool: &CommandLineTool,
    include_outputs: bool,
) -> Result<Vec<OptionDescriptor>, TranslateError> {
    let mut options = translate_all(&tool.inputs, Direction::Input)?;
    if include_outputs {
        options.extend(translate_all(&tool.outputs, Direction::Output)?);
    }
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cwl::{CwlType, Parameter};

    struct Decl {
        id: &'static str,
        doc: &'static str,
        optional: bool,
        kind: Result<Kind, String>,
    }

    impl ParameterDeclaration for Decl {
        fn identifier(&self) -> &str {
            self.id
        }

        fn documentation(&self) -> &str {
            self.doc
        }

        fn is_optional(&self) -> bool {
            self.optional
        }

        fn kind(&self) -> Result<Kind, String> {
            self.kind.clone()
        }
    }

    fn decl(id: &'static str, kind: Kind, optional: bool, doc: &'static str) -> Decl {
        Decl {
            id,
            doc,
            optional,
            kind: Ok(kind),
        }
    }

    #[test]
    fn test_optional_scalars_get_zero_defaults() {
        let inputs = vec![
            (Kind::Boolean, OptionType::Bool, OptionValue::Bool(false)),
            (Kind::Integer, OptionType::Integer, OptionValue::Integer(0)),
            (Kind::Float, OptionType::Float, OptionValue::Float(0.0)),
            (Kind::Text, OptionType::Text, OptionValue::Text(String::new())),
        ];

        for (kind, option_type, value) in inputs {
            let option = translate(&decl("p", kind, true, ""), Direction::Input).unwrap();
            assert_eq!(option.option_type, option_type);
            assert_eq!(option.default, DefaultPolicy::Value(value));
            assert!(option.flags.is_empty());
        }
    }

    #[test]
    fn test_non_optional_scalars_are_required() {
        for kind in [Kind::Boolean, Kind::Integer, Kind::Float, Kind::Text] {
            let option = translate(&decl("p", kind, false, ""), Direction::Input).unwrap();
            assert!(option.is_required());
            assert_eq!(option.default_value(), None);
        }
    }

    #[test]
    fn test_outputs_never_get_defaults() {
        let option = translate(&decl("p", Kind::Integer, true, ""), Direction::Output).unwrap();
        assert!(option.is_required());
    }

    #[test]
    fn test_float_scenario() {
        let option = translate(&decl("threshold", Kind::Float, true, "cutoff"), Direction::Input)
            .unwrap();
        assert_eq!(
            option,
            OptionDescriptor {
                id: "threshold".to_string(),
                kind: Kind::Float,
                option_type: OptionType::Float,
                default: DefaultPolicy::Value(OptionValue::Float(0.0)),
                help: "cutoff".to_string(),
                flags: ValidationFlags::default(),
            }
        );
    }

    #[test]
    fn test_boolean_scenario() {
        let option =
            translate(&decl("flag", Kind::Boolean, true, "enable x"), Direction::Input).unwrap();
        assert_eq!(option.id, "flag");
        assert_eq!(option.option_type, OptionType::Bool);
        assert_eq!(option.default, DefaultPolicy::Value(OptionValue::Bool(false)));
        assert_eq!(option.help, "enable x");
        assert!(option.flags.is_empty());
    }

    #[test]
    fn test_input_directory_scenario() {
        let option = translate(
            &decl("input_dir", Kind::Directory, false, "input data"),
            Direction::Input,
        )
        .unwrap();
        assert_eq!(option.id, "input_dir");
        assert_eq!(option.option_type, OptionType::Path);
        assert!(option.is_required());
        assert_eq!(option.help, "input data");

        let flags: Vec<(&str, bool)> = option.flags.iter().map(|(f, v)| (f.name(), *v)).collect();
        assert_eq!(
            flags,
            vec![
                ("exists", true),
                ("file_okay", false),
                ("dir_okay", true),
                ("resolve_path", true),
                ("readable", true),
            ]
        );
    }

    #[test]
    fn test_file_flags_by_direction() {
        let input = translate(&decl("f", Kind::File, false, ""), Direction::Input).unwrap();
        assert_eq!(input.flags.get(Flag::Exists), Some(true));
        assert_eq!(input.flags.get(Flag::FileOkay), Some(true));
        assert_eq!(input.flags.get(Flag::DirOkay), Some(false));
        assert_eq!(input.flags.get(Flag::ResolvePath), Some(true));
        assert_eq!(input.flags.get(Flag::Readable), Some(true));
        assert_eq!(input.flags.get(Flag::Writable), None);

        let output = translate(&decl("f", Kind::File, false, ""), Direction::Output).unwrap();
        assert_eq!(output.flags.get(Flag::Writable), Some(true));
        assert_eq!(output.flags.get(Flag::Readable), None);
    }

    #[test]
    fn test_directory_output_is_writable() {
        let output = translate(&decl("d", Kind::Directory, false, ""), Direction::Output).unwrap();
        assert_eq!(output.flags.get(Flag::Writable), Some(true));
        assert_eq!(output.flags.get(Flag::Readable), None);
    }

    #[test]
    fn test_optional_paths_have_no_default() {
        for kind in [Kind::File, Kind::Directory] {
            let option = translate(&decl("p", kind, true, ""), Direction::Input).unwrap();
            assert!(option.is_required());
            assert_eq!(
                option.kind.zero_default(),
                Err(TranslateError::UnsupportedOperation { kind })
            );
        }
    }

    #[test]
    fn test_unsupported_type() {
        let param = Decl {
            id: "tables",
            doc: "",
            optional: false,
            kind: Err("File[]".to_string()),
        };
        assert_eq!(
            translate(&param, Direction::Input),
            Err(TranslateError::new_unsupported_type("tables", "File[]"))
        );
    }

    #[test]
    fn test_unsupported_type_message() {
        let param = Parameter::for_test("tables", CwlType::Other("File[]".to_string()), false, "");
        let err = translate(&param, Direction::Input).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported type File[] for parameter tables");
    }

    #[test]
    fn test_translate_is_deterministic() {
        let param = Parameter::for_test("n", CwlType::Long, true, "count");
        assert_eq!(
            translate(&param, Direction::Input),
            translate(&param, Direction::Input)
        );
    }

    #[test]
    fn test_translate_all_stops_at_first_failure() {
        let params = vec![
            Parameter::for_test("a", CwlType::Int, false, ""),
            Parameter::for_test("b", CwlType::Other("Any".to_string()), false, ""),
            Parameter::for_test("c", CwlType::Other("record".to_string()), false, ""),
        ];
        assert_eq!(
            translate_all(&params, Direction::Input),
            Err(TranslateError::new_unsupported_type("b", "Any"))
        );
    }

    #[test]
    fn test_translate_tool_inputs_only_by_default() {
        let tool = CommandLineTool {
            cwl_version: None,
            id: None,
            label: None,
            inputs: vec![Parameter::for_test("inpDir", CwlType::Directory, false, "")],
            outputs: vec![Parameter::for_test("outDir", CwlType::Directory, false, "")],
        };

        let options = translate_tool(&tool, false).unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].flags.get(Flag::Readable), Some(true));

        let options = translate_tool(&tool, true).unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options[1].id, "outDir");
        assert_eq!(options[1].flags.get(Flag::Writable), Some(true));
    }
}
