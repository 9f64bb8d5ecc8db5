use crate::cmd::{
    default_tool_name, default_tool_slug, validate_tool_slug, GlobalArgs, RunCommand, SourceArgs,
};
use crate::render::{render_main, render_manifest, RenderContext};
use anyhow::{bail, Context};
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[clap(flatten)]
    pub source: SourceArgs,

    /// The directory the new tool is created in
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// The package and directory name of the new tool, defaults to the CWL
    /// file name followed by `-tool`
    #[arg(long)]
    pub tool_slug: Option<String>,

    /// The name used in the generated help text, defaults to the CWL label
    #[arg(long)]
    pub tool_name: Option<String>,

    /// Overwrite files that already exist
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub force: bool,
}

fn write_file(path: &Path, content: &str, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!("{:?} already exists, use --force to overwrite it", path);
    }
    fs::write(path, content).with_context(|| format!("Could not write {:?}", path))?;
    tracing::info!(path = %path.display(), "wrote file");
    Ok(())
}

impl GenerateArgs {
    /// Writes the new tool and returns its root directory.
    pub fn generate(&self) -> anyhow::Result<PathBuf> {
        let slug = self
            .tool_slug
            .clone()
            .unwrap_or_else(|| default_tool_slug(&self.source.cwl));
        validate_tool_slug(&slug)?;

        let (tool, options) = self.source.load()?;
        let name = self
            .tool_name
            .clone()
            .unwrap_or_else(|| default_tool_name(&tool, &self.source.cwl));
        let cwl_name = self
            .source
            .cwl
            .file_name()
            .with_context(|| format!("{:?} is not a file", self.source.cwl))?
            .to_owned();

        let ctx = RenderContext::new(name, slug.clone())
            .with_source_name(cwl_name.to_string_lossy());
        let main = render_main(&ctx, &options)?;
        let manifest = render_manifest(&ctx);

        let target = self.output_dir.join(&slug);
        let src_dir = target.join("src");
        fs::create_dir_all(&src_dir)
            .with_context(|| format!("Could not create {:?}", src_dir))?;

        write_file(&src_dir.join("main.rs"), &main, self.force)?;
        write_file(&target.join("Cargo.toml"), &manifest, self.force)?;

        let cwl_copy = target.join(&cwl_name);
        if cwl_copy.exists() && !self.force {
            bail!("{:?} already exists, use --force to overwrite it", cwl_copy);
        }
        fs::copy(&self.source.cwl, &cwl_copy)
            .with_context(|| format!("Could not copy {:?} to {:?}", self.source.cwl, cwl_copy))?;

        tracing::info!(
            tool = %ctx.tool_name,
            options = options.len(),
            target = %target.display(),
            "generated tool"
        );
        Ok(target)
    }
}

impl RunCommand for GenerateArgs {
    fn run(&self, _global_args: &GlobalArgs) -> anyhow::Result<()> {
        let target = self.generate()?;
        println!("Generated tool at {:?}", target);
        Ok(())
    }
}
