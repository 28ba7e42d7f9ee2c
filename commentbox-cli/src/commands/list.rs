use anyhow::Result;
use clap::Parser;
use commentbox_core::CommentboxConfig;

use super::{build_widget, failure, get_output_format, print_comments, OutputFormat};
use crate::ui;

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(long, short, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long, conflicts_with = "output")]
    pub json: bool,
}

pub async fn run_list(config: &CommentboxConfig, args: ListArgs) -> Result<()> {
    let format = get_output_format(args.output, args.json);
    let widget = build_widget(config)?;

    let comments = match ui::with_spinner("Loading comments...", widget.mount()).await {
        Ok(comments) => comments,
        Err(err) => return Err(failure(&widget, err)),
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&comments)?);
        }
        OutputFormat::Human => widget.with_document(print_comments),
    }

    Ok(())
}
