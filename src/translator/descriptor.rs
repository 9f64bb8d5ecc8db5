use crate::translator::TranslateError;
use std::fmt;

/// The closed set of parameter kinds that have a command line form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Boolean,
    Integer,
    Float,
    Text,
    File,
    Directory,
}

impl Kind {
    pub fn option_type(&self) -> OptionType {
        match self {
            Kind::Boolean => OptionType::Bool,
            Kind::Integer => OptionType::Integer,
            Kind::Float => OptionType::Float,
            Kind::Text => OptionType::Text,
            Kind::File | Kind::Directory => OptionType::Path,
        }
    }

    /// The value an optional parameter of this kind defaults to.
    ///
    /// Paths have no sensible default, so asking for one is an error.
    pub fn zero_default(&self) -> Result<OptionValue, TranslateError> {
        match self {
            Kind::Boolean => Ok(OptionValue::Bool(false)),
            Kind::Integer => Ok(OptionValue::Integer(0)),
            Kind::Float => Ok(OptionValue::Float(0.0)),
            Kind::Text => Ok(OptionValue::Text(String::new())),
            Kind::File | Kind::Directory => {
                Err(TranslateError::UnsupportedOperation { kind: *self })
            }
        }
    }

    pub fn is_path(&self) -> bool {
        matches!(self, Kind::File | Kind::Directory)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Kind::Boolean => "boolean",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::Text => "string",
            Kind::File => "file",
            Kind::Directory => "directory",
        };
        write!(f, "{}", name)
    }
}

/// Whether a parameter is consumed or produced by the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

/// The native type an option parses into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    Bool,
    Integer,
    Float,
    Text,
    Path,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            OptionType::Bool => "bool",
            OptionType::Integer => "i64",
            OptionType::Float => "f64",
            OptionType::Text => "String",
            OptionType::Path => "PathBuf",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OptionValue::Bool(v) => write!(f, "{}", v),
            OptionValue::Integer(v) => write!(f, "{}", v),
            // Always keep the decimal point so `0.0` stays a float literal.
            OptionValue::Float(v) => write!(f, "{:?}", v),
            OptionValue::Text(v) => write!(f, "{:?}", v),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DefaultPolicy {
    Value(OptionValue),
    Required,
}

/// A path check attached to an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Exists,
    FileOkay,
    DirOkay,
    ResolvePath,
    Readable,
    Writable,
}

impl Flag {
    pub fn name(&self) -> &'static str {
        match self {
            Flag::Exists => "exists",
            Flag::FileOkay => "file_okay",
            Flag::DirOkay => "dir_okay",
            Flag::ResolvePath => "resolve_path",
            Flag::Readable => "readable",
            Flag::Writable => "writable",
        }
    }
}

/// Flags in the order they were attached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationFlags(Vec<(Flag, bool)>);

impl ValidationFlags {
    pub(crate) fn with(mut self, flag: Flag, value: bool) -> Self {
        self.0.push((flag, value));
        self
    }

    pub fn get(&self, flag: Flag) -> Option<bool> {
        self.0.iter().find(|(f, _)| *f == flag).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Flag, bool)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Everything needed to declare one command line option.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionDescriptor {
    pub id: String,
    pub kind: Kind,
    pub option_type: OptionType,
    pub default: DefaultPolicy,
    pub help: String,
    pub flags: ValidationFlags,
}

impl OptionDescriptor {
    pub fn is_required(&self) -> bool {
        self.default == DefaultPolicy::Required
    }

    pub fn default_value(&self) -> Option<&OptionValue> {
        match &self.default {
            DefaultPolicy::Value(v) => Some(v),
            DefaultPolicy::Required => None,
        }
    }
}
