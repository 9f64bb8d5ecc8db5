use crate::cmd::{default_tool_name, GlobalArgs, RunCommand, SourceArgs};
use crate::render::field_name;
use crate::translator::{OptionDescriptor, OptionValue};
use clap::Args;
use std::cmp;

use ansi_term::Colour::{Cyan, Green, Red, Yellow};

#[derive(Args, Debug)]
pub struct DescribeArgs {
    #[clap(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug)]
struct AlignedRecord {
    left: String,
    right: String,
    size: usize,
}

impl AlignedRecord {
    fn new<L: Into<String>, R: Into<String>>(left: L, right: R) -> Self {
        let left = left.into();
        let size = left.len();
        AlignedRecord {
            left,
            right: right.into(),
            size,
        }
    }

    fn display_with_size(&self, max_size: usize) -> String {
        format!(
            "{}{} = {}",
            self.left,
            " ".repeat(max_size - self.size),
            self.right
        )
    }
}

fn print_header(header: &str, width: usize) {
    let remaining_space = width.saturating_sub(header.len() + 2); // 2 for the '=' on either end

    let left_spaces = " ".repeat(remaining_space / 2);
    let right_spaces = " ".repeat((remaining_space / 2) + remaining_space % 2);
    let mid_line = format!("={}{}{}=", &left_spaces, Green.paint(header), &right_spaces);

    println!(
        "\n{}\n{}\n{}\n",
        "=".repeat(width),
        mid_line,
        "=".repeat(width)
    );
}

fn format_default(v: Option<&OptionValue>) -> String {
    format!(
        "{}",
        match v {
            Some(v) => Green.paint(v.to_string()),
            None => Red.paint("required"),
        }
    )
}

fn records(option: &OptionDescriptor) -> Vec<AlignedRecord> {
    let mut records = vec![
        AlignedRecord::new("kind", format!("{}", Green.paint(option.kind.to_string()))),
        AlignedRecord::new(
            "type",
            format!("{}", Green.paint(option.option_type.to_string())),
        ),
        AlignedRecord::new("field", format!("{}", Green.paint(field_name(&option.id)))),
        AlignedRecord::new("default", format_default(option.default_value())),
        AlignedRecord::new("help", format!("{}", Yellow.paint(option.help.as_str()))),
    ];
    for (flag, value) in option.flags.iter() {
        records.push(AlignedRecord::new(
            flag.name(),
            format!("{}", Green.paint(value.to_string())),
        ));
    }
    records
}

fn print_option(option: &OptionDescriptor) {
    println!("{}:", Cyan.paint(format!("--{}", option.id)));
    let records = records(option);
    let mut max = 0;
    for r in &records {
        max = cmp::max(max, r.size);
    }

    for record in &records {
        println!("  - {}", record.display_with_size(max));
    }

    println!();
}

impl RunCommand for DescribeArgs {
    fn run(&self, _global_args: &GlobalArgs) -> anyhow::Result<()> {
        let (tool, options) = self.source.load()?;

        print_header(&default_tool_name(&tool, &self.source.cwl), 80);
        for option in &options {
            print_option(option);
        }
        Ok(())
    }
}
