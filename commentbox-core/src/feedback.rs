//! User feedback area: loader, error and success notices
//!
//! The three containers live under `#feedback` and are created the first
//! time they are needed. Exactly one of them is visible at a time, matching
//! [`FeedbackState`].

use crate::error::{Result, WidgetError};
use crate::page::{ids, Document, ElementId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeedbackState {
    #[default]
    Idle,
    Loading,
    Error(String),
    Success(String),
}

/// Identifies one success notice so a stale auto-hide cannot clear a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeId(u64);

#[derive(Debug, Default)]
pub struct Feedback {
    state: FeedbackState,
    notices: u64,
}

impl Feedback {
    pub fn state(&self) -> &FeedbackState {
        &self.state
    }

    /// Hide and empty every container that exists; back to idle.
    pub fn reset(&mut self, doc: &mut Document) {
        for id in [ids::ERROR_CONTAINER, ids::SUCCESS_CONTAINER, ids::LOADER] {
            if let Some(el) = doc.get_element_by_id(id) {
                doc.set_text(el, "");
                doc.hide(el);
            }
        }
        self.state = FeedbackState::Idle;
    }

    pub fn loading(&mut self, doc: &mut Document) -> Result<()> {
        self.reset(doc);
        let loader = container(doc, ids::LOADER, "loader")?;
        doc.set_text(loader, "Loading...");
        doc.show(loader);
        self.state = FeedbackState::Loading;
        Ok(())
    }

    pub fn error(&mut self, doc: &mut Document, message: impl Into<String>) -> Result<()> {
        let message = message.into();
        self.reset(doc);
        let el = container(doc, ids::ERROR_CONTAINER, "error")?;
        doc.set_text(el, message.clone());
        doc.show(el);
        self.state = FeedbackState::Error(message);
        Ok(())
    }

    pub fn success(&mut self, doc: &mut Document, message: impl Into<String>) -> Result<NoticeId> {
        let message = message.into();
        self.reset(doc);
        let el = container(doc, ids::SUCCESS_CONTAINER, "success")?;
        doc.set_text(el, message.clone());
        doc.show(el);
        self.state = FeedbackState::Success(message);
        self.notices += 1;
        Ok(NoticeId(self.notices))
    }

    /// Auto-hide for a success notice. Does nothing if anything has been
    /// shown since `notice`.
    pub fn expire(&mut self, doc: &mut Document, notice: NoticeId) -> bool {
        let current = matches!(self.state, FeedbackState::Success(_)) && notice.0 == self.notices;
        if current {
            self.reset(doc);
        }
        current
    }
}

fn container(doc: &mut Document, id: &str, class: &str) -> Result<ElementId> {
    if let Some(el) = doc.get_element_by_id(id) {
        return Ok(el);
    }

    let feedback = doc
        .get_element_by_id(ids::FEEDBACK)
        .ok_or_else(|| WidgetError::missing_element(ids::FEEDBACK))?;
    let el = doc.create_element("div");
    doc.set_id(el, id);
    doc.add_class(el, class);
    doc.hide(el);
    doc.append_child(feedback, el);
    Ok(el)
}
