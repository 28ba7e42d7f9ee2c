use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use commentbox_core::page::ids;
use commentbox_core::{CommentboxConfig, FeedbackState};

use super::{build_widget, failure, print_comments};
use crate::ui;

#[derive(Parser, Debug)]
pub struct PostArgs {
    /// Your name
    #[arg(long, short)]
    pub name: String,

    /// Inline comment text
    #[arg(long, short)]
    pub message: Option<String>,

    /// Read comment text from file
    #[arg(long, conflicts_with = "message")]
    pub file: Option<PathBuf>,

    /// Load the existing comments first and print the whole list afterwards
    #[arg(long)]
    pub show: bool,
}

pub async fn run_post(config: &CommentboxConfig, args: PostArgs) -> Result<()> {
    let message = get_content(&args.message, &args.file)?;
    let widget = build_widget(config)?;

    if args.show {
        if let Err(err) = ui::with_spinner("Loading comments...", widget.mount()).await {
            return Err(failure(&widget, err));
        }
    }

    widget.with_document_mut(|doc| {
        for (id, value) in [(ids::NAME, args.name.as_str()), (ids::MESSAGE, message.as_str())] {
            if let Some(input) = doc.get_element_by_id(id) {
                doc.set_value(input, value);
            }
        }
    });

    let comment = match ui::with_spinner("Posting comment...", widget.submit_form()).await {
        Ok(comment) => comment,
        Err(err) => return Err(failure(&widget, err)),
    };

    if let FeedbackState::Success(notice) = widget.feedback() {
        println!("✓ {}", notice);
    }

    if args.show {
        println!();
        widget.with_document(print_comments);
    } else {
        println!("{}: {}", comment.name, comment.message);
    }

    Ok(())
}

/// Priority: -m inline > --file > piped stdin. Nothing at all yields an
/// empty message, which the widget rejects.
fn get_content(message: &Option<String>, file: &Option<PathBuf>) -> Result<String> {
    if let Some(msg) = message {
        return Ok(msg.clone());
    }

    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()));
    }

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(String::new());
    }

    let mut buf = String::new();
    stdin
        .lock()
        .read_to_string(&mut buf)
        .context("Failed to read from stdin")?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn inline_message_wins() {
        let content = get_content(&Some("hi".into()), &Some(PathBuf::from("/nope"))).unwrap();
        assert_eq!(content, "hi");
    }

    #[test]
    fn reads_from_file() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "from a file\n").unwrap();

        let content = get_content(&None, &Some(file.path().to_path_buf())).unwrap();
        assert_eq!(content, "from a file\n");
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = get_content(&None, &Some(PathBuf::from("/definitely/not/here.txt"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
