//! The comment widget controller
//!
//! Ties the page, the feedback area and the remote service together:
//!
//! - page ready: [`CommentWidget::mount`] fetches and renders the list
//! - form submit: validate, POST, append the returned comment, reset the form
//! - scroll: debounced reveal of `fade-in` elements
//!
//! Page state sits behind a mutex that is only held between awaits, so the
//! host stays free to read the page while a request is in flight.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::WidgetConfig;
use crate::debounce::Debouncer;
use crate::error::{Result, WidgetError};
use crate::feedback::{Feedback, FeedbackState, NoticeId};
use crate::model::{Comment, NewComment};
use crate::page::{ids, Document, ElementId};
use crate::reveal::reveal_in_view;
use crate::service::CommentService;

pub const SUCCESS_MESSAGE: &str = "Comment submitted successfully!";
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit comment. Please try again.";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load comments. Please try again later.";

/// Class on each rendered comment `<li>`
pub const COMMENT_CLASS: &str = "comment";
pub const COMMENT_NAME_CLASS: &str = "comment-name";
pub const COMMENT_MESSAGE_CLASS: &str = "comment-message";

#[derive(Debug)]
struct View {
    document: Document,
    feedback: Feedback,
    scroll: Debouncer,
}

pub struct CommentWidget<S> {
    service: S,
    view: Arc<Mutex<View>>,
    success_notice: Duration,
}

impl<S: CommentService> CommentWidget<S> {
    pub fn new(service: S, document: Document, config: &WidgetConfig) -> Self {
        Self {
            service,
            view: Arc::new(Mutex::new(View {
                document,
                feedback: Feedback::default(),
                scroll: Debouncer::new(config.scroll_debounce()),
            })),
            success_notice: config.success_notice(),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn with_document<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        f(&lock(&self.view).document)
    }

    pub fn with_document_mut<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        f(&mut lock(&self.view).document)
    }

    pub fn feedback(&self) -> FeedbackState {
        lock(&self.view).feedback.state().clone()
    }

    /// Page-ready hook
    pub async fn mount(&self) -> Result<Vec<Comment>> {
        self.load_comments().await
    }

    /// Replace the list with the service's comments, in service order.
    pub async fn load_comments(&self) -> Result<Vec<Comment>> {
        {
            let mut view = lock(&self.view);
            let View { document, feedback, .. } = &mut *view;
            feedback.loading(document)?;
        }

        let result = self.service.list().await;

        let mut view = lock(&self.view);
        let View { document, feedback, .. } = &mut *view;
        feedback.reset(document);

        match result {
            Ok(comments) => {
                let list = comments_list(document)?;
                document.remove_children(list);
                for comment in &comments {
                    append_comment(document, list, comment);
                }
                info!(count = comments.len(), "rendered comments");
                Ok(comments)
            }
            Err(err) => {
                warn!(error = %err, "failed to load comments");
                feedback.error(document, LOAD_FAILED_MESSAGE)?;
                Err(err.into())
            }
        }
    }

    /// Submit whatever is currently typed into the form.
    pub async fn submit_form(&self) -> Result<Comment> {
        let (name, message) = {
            let view = lock(&self.view);
            (
                input_value(&view.document, ids::NAME)?,
                input_value(&view.document, ids::MESSAGE)?,
            )
        };
        self.submit_comment(&name, &message).await
    }

    pub async fn submit_comment(&self, name: &str, message: &str) -> Result<Comment> {
        let new_comment = {
            let mut view = lock(&self.view);
            let View { document, feedback, .. } = &mut *view;
            feedback.reset(document);

            match NewComment::validate(name, message) {
                Ok(new_comment) => {
                    feedback.loading(document)?;
                    new_comment
                }
                Err(errors) => {
                    debug!(%errors, "rejected comment");
                    feedback.error(document, errors.to_string())?;
                    return Err(errors.into());
                }
            }
        };

        let result = self.service.create(&new_comment).await;

        let (notice, comment) = {
            let mut view = lock(&self.view);
            let View { document, feedback, .. } = &mut *view;
            feedback.reset(document);

            match result {
                Ok(comment) => {
                    let list = comments_list(document)?;
                    append_comment(document, list, &comment);
                    clear_input(document, ids::NAME);
                    clear_input(document, ids::MESSAGE);
                    info!(name = %comment.name, "comment submitted");
                    (feedback.success(document, SUCCESS_MESSAGE)?, comment)
                }
                Err(err) => {
                    warn!(error = %err, "failed to submit comment");
                    let message = err.service_message().unwrap_or(SUBMIT_FAILED_MESSAGE);
                    feedback.error(document, message)?;
                    return Err(err.into());
                }
            }
        };

        self.hide_notice_later(notice);
        Ok(comment)
    }

    /// Scroll event handler. `None` when the debouncer swallowed the event,
    /// otherwise the number of elements newly revealed.
    pub fn handle_scroll(&self) -> Option<usize> {
        let mut view = lock(&self.view);
        if !view.scroll.hit(Instant::now()) {
            return None;
        }
        Some(reveal_in_view(&mut view.document).len())
    }

    /// Reveal pass without debouncing
    pub fn fade_in_on_scroll(&self) -> usize {
        reveal_in_view(&mut lock(&self.view).document).len()
    }

    fn hide_notice_later(&self, notice: NoticeId) {
        let view = Arc::clone(&self.view);
        let delay = self.success_notice;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut view = lock(&view);
            let View { document, feedback, .. } = &mut *view;
            if feedback.expire(document, notice) {
                debug!("success notice hidden");
            }
        });
    }
}

fn lock(view: &Mutex<View>) -> MutexGuard<'_, View> {
    view.lock().unwrap_or_else(PoisonError::into_inner)
}

fn comments_list(document: &Document) -> Result<ElementId> {
    document
        .get_element_by_id(ids::COMMENTS_LIST)
        .ok_or_else(|| WidgetError::missing_element(ids::COMMENTS_LIST))
}

fn input_value(document: &Document, id: &str) -> Result<String> {
    document
        .get_element_by_id(id)
        .map(|el| document.value(el).to_string())
        .ok_or_else(|| WidgetError::missing_element(id))
}

fn clear_input(document: &mut Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        document.set_value(el, "");
    }
}

fn append_comment(document: &mut Document, list: ElementId, comment: &Comment) -> ElementId {
    let item = document.create_element("li");
    document.add_class(item, COMMENT_CLASS);

    let name = document.create_element("strong");
    document.add_class(name, COMMENT_NAME_CLASS);
    document.set_text(name, comment.name.clone());

    let message = document.create_element("p");
    document.add_class(message, COMMENT_MESSAGE_CLASS);
    document.set_text(message, comment.message.clone());

    document.append_child(item, name);
    document.append_child(item, message);
    document.append_child(list, item);
    item
}
