pub mod cmd;
pub mod cwl;
pub mod logging;
pub mod render;
pub mod translator;

use crate::cmd::Cli;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.global_args.quiet, cli.global_args.verbose);
    cli.parse_and_run()
}
