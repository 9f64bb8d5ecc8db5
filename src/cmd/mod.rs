pub mod describe;
pub mod generate;
pub mod render;

use crate::cmd::describe::DescribeArgs;
use crate::cmd::generate::GenerateArgs;
use crate::cmd::render::RenderArgs;
use crate::cwl::CommandLineTool;
use crate::translator::{translate_tool, OptionDescriptor};
use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub trait RunCommand {
    fn run(&self, global_args: &GlobalArgs) -> anyhow::Result<()>;
}

#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// If set, will suppress extra log information
    #[arg(short, long, action = clap::ArgAction::SetTrue)]
    pub quiet: bool,

    /// If set, will log every translated parameter
    #[arg(short, long, action = clap::ArgAction::SetTrue)]
    pub verbose: bool,
}

/// Arguments shared by every command that reads a CWL tool.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// The path to the CWL CommandLineTool
    pub cwl: PathBuf,

    /// Also turn the tool's outputs into options, after the inputs
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub include_outputs: bool,
}

impl SourceArgs {
    /// Loads the tool and translates its parameters into options.
    pub fn load(&self) -> anyhow::Result<(CommandLineTool, Vec<OptionDescriptor>)> {
        if !self.cwl.exists() {
            bail!("Could not find CWL file at {:?}", self.cwl);
        }
        let tool = CommandLineTool::load(&self.cwl)?;
        let options = translate_tool(&tool, self.include_outputs)
            .with_context(|| format!("Could not translate the parameters of {:?}", self.cwl))?;
        Ok((tool, options))
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "tool".to_string())
}

/// The tool's label, falling back to the CWL file name.
pub fn default_tool_name(tool: &CommandLineTool, cwl: &Path) -> String {
    match &tool.label {
        Some(label) if !label.trim().is_empty() => label.trim().to_string(),
        _ => file_stem(cwl),
    }
}

/// A kebab-case package name ending in `-tool`, derived from the file name.
pub fn default_tool_slug(cwl: &Path) -> String {
    let mut slug = String::new();
    for c in file_stem(cwl).chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let mut slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        slug.push_str("cwl");
    } else if slug.starts_with(|c: char| c.is_ascii_digit()) {
        slug.insert_str(0, "cwl-");
    }
    if !slug.ends_with("-tool") {
        slug.push_str("-tool");
    }
    slug
}

fn slug_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-z][a-z0-9]*(-[a-z0-9]+)*-tool$").expect("slug pattern is valid")
    })
}

/// Checks that `slug` is a kebab-case package name ending in `-tool`. The
/// slug is also used as a directory name, so it cannot contain separators.
pub fn validate_tool_slug(slug: &str) -> anyhow::Result<()> {
    if !slug_pattern().is_match(slug) {
        bail!(
            "Invalid tool slug {:?}: expected lowercase kebab-case ending in '-tool'",
            slug
        );
    }
    Ok(())
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lists the options a CWL tool translates to
    Describe(DescribeArgs),

    /// Prints the generated main.rs for a CWL tool
    Render(RenderArgs),

    /// Scaffolds a new tool crate from a CWL tool
    Generate(GenerateArgs),
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[clap(flatten)]
    pub global_args: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn parse_and_run(&self) -> anyhow::Result<()> {
        match &self.command {
            Commands::Describe(args) => args.run(&self.global_args),
            Commands::Render(args) => args.run(&self.global_args),
            Commands::Generate(args) => args.run(&self.global_args),
        }
    }
}
