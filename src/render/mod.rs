mod path_rule;

use crate::render::path_rule::PATH_RULE_SOURCE;
use crate::translator::{DefaultPolicy, OptionDescriptor, OptionType, OptionValue};
use thiserror::Error;

const TAB: &str = "    ";

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "static", "struct", "trait", "true", "type", "unsafe", "use", "where",
    "while", "abstract", "become", "box", "do", "final", "gen", "macro", "override", "priv",
    "try", "typeof", "unsized", "virtual", "yield",
];

// Keywords that cannot be written as raw identifiers.
const RESERVED_PATH_KEYWORDS: &[&str] = &["self", "Self", "super", "crate"];

// Flags clap adds to every generated `Cli`.
const BUILTIN_FLAGS: &[&str] = &["help", "version"];

const DEFAULT_IMG_EXT: &str = ".ome.tif";
const DEFAULT_TAB_EXT: &str = ".csv";

#[derive(Error, Debug, PartialEq)]
pub enum RenderError {
    #[error("Options '{first}' and '{second}' both map to the field '{field}'")]
    DuplicateField {
        first: String,
        second: String,
        field: String,
    },
    #[error("Option '{id}' clashes with the built-in --{flag} flag of the generated tool")]
    BuiltinFlag { id: String, flag: String },
}

/// Naming used when rendering a generated tool.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    /// Human readable name, used in help and doc text.
    pub tool_name: String,

    /// Cargo package name of the generated tool.
    pub package_name: String,

    /// File name of the CWL document the tool was generated from.
    pub source_name: Option<String>,
}

impl RenderContext {
    pub fn new<T: Into<String>>(tool_name: T, package_name: T) -> Self {
        RenderContext {
            tool_name: tool_name.into(),
            package_name: package_name.into(),
            source_name: None,
        }
    }

    pub fn with_source_name<T: Into<String>>(mut self, name: T) -> Self {
        self.source_name = Some(name.into());
        self
    }

    /// The environment variable the generated tool reads its log filter from.
    pub fn log_env(&self) -> String {
        self.env_var("LOG")
    }

    /// The environment variable holding the default image file extension.
    pub fn img_ext_env(&self) -> String {
        self.env_var("IMG_EXT")
    }

    /// The environment variable holding the default table file extension.
    pub fn tab_ext_env(&self) -> String {
        self.env_var("TAB_EXT")
    }

    fn env_var(&self, suffix: &str) -> String {
        let mut env: String = self
            .package_name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        env.push('_');
        env.push_str(suffix);
        env
    }
}

/// Maps an option id to a snake_case Rust field name.
pub fn field_name(id: &str) -> String {
    let mut name = String::with_capacity(id.len() + 4);
    let mut prev_lower = false;
    for c in id.chars() {
        if c == '-' {
            name.push('_');
            prev_lower = false;
        } else if c.is_ascii_uppercase() {
            if prev_lower {
                name.push('_');
            }
            name.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else {
            name.push(c);
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        }
    }

    if name == "_" {
        name.push('0');
    } else if RESERVED_PATH_KEYWORDS.contains(&name.as_str()) {
        name.push('_');
    } else if RUST_KEYWORDS.contains(&name.as_str()) {
        name.insert_str(0, "r#");
    }
    name
}

fn render_default(option: &OptionDescriptor) -> Option<String> {
    match &option.default {
        DefaultPolicy::Required => None,
        DefaultPolicy::Value(OptionValue::Text(text)) => Some(format!("default_value = {:?}", text)),
        DefaultPolicy::Value(value) => Some(format!("default_value_t = {}", value)),
    }
}

/// Renders one option as an annotated `Cli` field.
pub fn render_option(option: &OptionDescriptor) -> Vec<String> {
    let mut args = vec![
        format!("long = {:?}", option.id),
        format!("help = {:?}", option.help),
    ];
    args.push(render_default(option).unwrap_or_else(|| "required = true".to_string()));

    if option.option_type == OptionType::Bool {
        if option.is_required() {
            args.push("action = ArgAction::Set".to_string());
        } else {
            args.push("action = ArgAction::SetTrue".to_string());
        }
    }

    let mut lines = vec![format!("{TAB}#[arg(")];
    lines.extend(args.into_iter().map(|a| format!("{TAB}{TAB}{a},")));

    if !option.flags.is_empty() {
        lines.push(format!("{TAB}{TAB}value_parser = PathRule {{"));
        for (flag, value) in option.flags.iter() {
            lines.push(format!("{TAB}{TAB}{TAB}{}: {},", flag.name(), value));
        }
        lines.push(format!("{TAB}{TAB}{TAB}..PathRule::default()"));
        lines.push(format!("{TAB}{TAB}}},"));
    }

    lines.push(format!("{TAB})]"));
    lines.push(format!(
        "{TAB}{}: {},",
        field_name(&option.id),
        option.option_type
    ));
    lines
}

fn check_field_names(options: &[OptionDescriptor]) -> Result<(), RenderError> {
    for (i, option) in options.iter().enumerate() {
        let field = field_name(&option.id);
        if let Some(flag) = BUILTIN_FLAGS
            .iter()
            .find(|flag| **flag == option.id || **flag == field)
        {
            return Err(RenderError::BuiltinFlag {
                id: option.id.clone(),
                flag: flag.to_string(),
            });
        }
        if let Some(first) = options[..i].iter().find(|o| field_name(&o.id) == field) {
            return Err(RenderError::DuplicateField {
                first: first.id.clone(),
                second: option.id.clone(),
                field,
            });
        }
    }
    Ok(())
}

/// Renders the `main.rs` of a generated tool whose options are `options`,
/// in order.
pub fn render_main(
    ctx: &RenderContext,
    options: &[OptionDescriptor],
) -> Result<String, RenderError> {
    check_field_names(options)?;

    let has_bool = options.iter().any(|o| o.option_type == OptionType::Bool);
    let has_path = options.iter().any(|o| o.option_type == OptionType::Path);

    let mut lines = vec![format!("//! CLI for the {} tool.", ctx.tool_name)];
    if let Some(source) = &ctx.source_name {
        lines.push("//!".to_string());
        lines.push(format!("//! Generated by cwl-scaffold from `{}`.", source));
    }
    lines.push(String::new());

    if has_bool {
        lines.push("use clap::{ArgAction, Parser};".to_string());
    } else {
        lines.push("use clap::Parser;".to_string());
    }
    if has_path {
        lines.push("use std::path::PathBuf;".to_string());
    }
    lines.push("use tracing_subscriber::EnvFilter;".to_string());
    lines.push(String::new());
    lines.push(format!("const LOG_ENV: &str = {:?};", ctx.log_env()));
    lines.push(format!("const IMG_EXT_ENV: &str = {:?};", ctx.img_ext_env()));
    lines.push(format!("const TAB_EXT_ENV: &str = {:?};", ctx.tab_ext_env()));
    lines.push(String::new());
    lines.push("/// File extension used when writing images.".to_string());
    lines.push("fn img_ext() -> String {".to_string());
    lines.push(format!(
        "{TAB}std::env::var(IMG_EXT_ENV).unwrap_or_else(|_| {:?}.to_string())",
        DEFAULT_IMG_EXT
    ));
    lines.push("}".to_string());
    lines.push(String::new());
    lines.push("/// File extension used when writing tables.".to_string());
    lines.push("fn tab_ext() -> String {".to_string());
    lines.push(format!(
        "{TAB}std::env::var(TAB_EXT_ENV).unwrap_or_else(|_| {:?}.to_string())",
        DEFAULT_TAB_EXT
    ));
    lines.push("}".to_string());
    lines.push(String::new());

    if has_path {
        lines.extend(PATH_RULE_SOURCE.lines().map(str::to_string));
        lines.push(String::new());
    }

    lines.push("#[derive(Parser, Debug)]".to_string());
    lines.push(format!(
        "#[command(version, about = {:?})]",
        format!("CLI for the {} tool.", ctx.tool_name)
    ));
    lines.push("struct Cli {".to_string());
    for option in options {
        lines.extend(render_option(option));
    }
    lines.push("}".to_string());
    lines.push(String::new());

    lines.push("fn main() {".to_string());
    lines.push(format!("{TAB}let filter = EnvFilter::try_from_env(LOG_ENV)"));
    lines.push(format!("{TAB}{TAB}.unwrap_or_else(|_| EnvFilter::new(\"info\"));"));
    lines.push(format!("{TAB}tracing_subscriber::fmt()"));
    lines.push(format!("{TAB}{TAB}.with_env_filter(filter)"));
    lines.push(format!("{TAB}{TAB}.with_writer(std::io::stderr)"));
    lines.push(format!("{TAB}{TAB}.init();"));
    lines.push(String::new());
    lines.push(format!(
        "{TAB}tracing::debug!(img_ext = %img_ext(), tab_ext = %tab_ext(), \"file extensions\");"
    ));

    if options.is_empty() {
        lines.push(format!("{TAB}let _cli = Cli::parse();"));
    } else {
        lines.push(format!("{TAB}let cli = Cli::parse();"));
        for option in options {
            lines.push(format!(
                "{TAB}tracing::debug!(\"{} = {{:?}}\", cli.{});",
                option.id,
                field_name(&option.id)
            ));
        }
    }
    lines.push("}".to_string());
    lines.push(String::new());

    Ok(lines.join("\n"))
}

/// Renders a minimal `Cargo.toml` for a generated tool.
pub fn render_manifest(ctx: &RenderContext) -> String {
    let lines = vec![
        "[package]".to_string(),
        format!("name = {:?}", ctx.package_name),
        "version = \"0.1.0\"".to_string(),
        "edition = \"2021\"".to_string(),
        format!("description = {:?}", format!("CLI for the {} tool.", ctx.tool_name)),
        String::new(),
        "[dependencies]".to_string(),
        "clap = { version = \"4.5\", features = [\"derive\"] }".to_string(),
        "tracing = \"0.1\"".to_string(),
        "tracing-subscriber = { version = \"0.3\", features = [\"env-filter\"] }".to_string(),
        String::new(),
    ];
    lines.join("\n")
}
