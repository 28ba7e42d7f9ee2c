//! commentbox-core: a comment widget without a browser
//!
//! Validates submissions, talks to the remote comment service, renders the
//! returned comments into a page tree and runs the debounced scroll reveal.
//! Hosts (the `commentbox` CLI, tests) own the [`Document`] and feed events
//! in through [`CommentWidget`].

pub mod config;
pub mod debounce;
pub mod error;
pub mod feedback;
pub mod model;
pub mod page;
pub mod reveal;
pub mod service;
pub mod widget;

pub use config::{CommentboxConfig, ServiceConfig, WidgetConfig};
pub use debounce::Debouncer;
pub use error::{Result, WidgetError};
pub use feedback::{Feedback, FeedbackState};
pub use model::{Comment, NewComment, ValidationErrors};
pub use page::{Document, ElementId};
pub use service::{CommentService, HttpCommentService, ServiceError};
pub use widget::CommentWidget;
