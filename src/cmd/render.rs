use crate::cmd::{default_tool_name, default_tool_slug, GlobalArgs, RunCommand, SourceArgs};
use crate::render::{render_main, RenderContext};
use clap::Args;

#[derive(Args, Debug)]
pub struct RenderArgs {
    #[clap(flatten)]
    pub source: SourceArgs,

    /// The name used in the generated help text, defaults to the CWL label
    #[arg(long)]
    pub tool_name: Option<String>,
}

impl RenderArgs {
    pub fn render(&self) -> anyhow::Result<String> {
        let (tool, options) = self.source.load()?;
        let name = self
            .tool_name
            .clone()
            .unwrap_or_else(|| default_tool_name(&tool, &self.source.cwl));
        let mut ctx = RenderContext::new(name, default_tool_slug(&self.source.cwl));
        if let Some(file_name) = self.source.cwl.file_name() {
            ctx = ctx.with_source_name(file_name.to_string_lossy());
        }
        Ok(render_main(&ctx, &options)?)
    }
}

impl RunCommand for RenderArgs {
    fn run(&self, _global_args: &GlobalArgs) -> anyhow::Result<()> {
        print!("{}", self.render()?);
        Ok(())
    }
}
