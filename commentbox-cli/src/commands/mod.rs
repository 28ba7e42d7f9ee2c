//! Subcommands that drive the comment widget

pub mod list;
pub mod post;

pub use list::{run_list, ListArgs};
pub use post::{run_post, PostArgs};

use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use commentbox_core::page::ids;
use commentbox_core::widget::{COMMENT_MESSAGE_CLASS, COMMENT_NAME_CLASS};
use commentbox_core::{
    CommentWidget, CommentboxConfig, Document, FeedbackState, HttpCommentService, WidgetError,
};

/// The terminal has no layout; give the page a nominal viewport.
const VIEWPORT_HEIGHT: f64 = 800.0;

#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (for piping to jq)
    Json,
}

pub(crate) fn get_output_format(output: OutputFormat, json_flag: bool) -> OutputFormat {
    if json_flag {
        OutputFormat::Json
    } else {
        output
    }
}

pub(crate) fn build_widget(config: &CommentboxConfig) -> Result<CommentWidget<HttpCommentService>> {
    let service = HttpCommentService::from_config(&config.service)
        .context("Failed to build HTTP client")?;
    Ok(CommentWidget::new(
        service,
        Document::comment_page(VIEWPORT_HEIGHT),
        &config.widget,
    ))
}

/// Turn a widget failure into what the page would have shown, keeping the
/// underlying cause for service errors.
pub(crate) fn failure(widget: &CommentWidget<HttpCommentService>, err: WidgetError) -> anyhow::Error {
    let FeedbackState::Error(shown) = widget.feedback() else {
        return err.into();
    };

    match err {
        WidgetError::Validation(_) => anyhow!(shown),
        other => anyhow::Error::new(other).context(shown),
    }
}

/// (name, message) for each rendered list item, top to bottom
pub(crate) fn rendered_comments(doc: &Document) -> Vec<(String, String)> {
    let Some(list) = doc.get_element_by_id(ids::COMMENTS_LIST) else {
        return Vec::new();
    };

    doc.children(list)
        .iter()
        .filter(|item| doc.tag(**item) == "li")
        .map(|item| {
            let mut name = String::new();
            let mut message = String::new();
            for child in doc.children(*item) {
                if doc.has_class(*child, COMMENT_NAME_CLASS) {
                    name = doc.text(*child).to_string();
                } else if doc.has_class(*child, COMMENT_MESSAGE_CLASS) {
                    message = doc.text(*child).to_string();
                }
            }
            (name, message)
        })
        .collect()
}

pub(crate) fn print_comments(doc: &Document) {
    let comments = rendered_comments(doc);

    println!("┌─ comments :: {}", comments.len());
    println!("│");

    if comments.is_empty() {
        println!("│  (no comments)");
        return;
    }

    for (i, (name, message)) in comments.iter().enumerate() {
        let is_last = i == comments.len() - 1;
        let prefix = if is_last { "└─" } else { "├─" };
        let cont_prefix = if is_last { "   " } else { "│  " };

        println!("{} {}", prefix, name);
        for line in message.lines() {
            println!("{}{}", cont_prefix, line);
        }

        if !is_last {
            println!("│");
        }
    }
}
