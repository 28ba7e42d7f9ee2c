//! In-memory page tree
//!
//! A small arena-backed element tree standing in for the browser DOM. The
//! widget only ever touches the page through this API, so any host (the
//! CLI, tests, a real DOM bridge) can drive it.
//!
//! Layout is reduced to the one number the reveal effect needs: each element
//! has an `offset_top` in page coordinates, and the document tracks the
//! viewport height and current scroll offset.

use std::collections::BTreeSet;

/// Element ids the widget expects to find on the page
pub mod ids {
    pub const COMMENT_FORM: &str = "commentForm";
    pub const NAME: &str = "name";
    pub const MESSAGE: &str = "message";
    pub const COMMENTS_LIST: &str = "commentsList";
    pub const FEEDBACK: &str = "feedback";
    pub const ERROR_CONTAINER: &str = "errorContainer";
    pub const SUCCESS_CONTAINER: &str = "successContainer";
    pub const LOADER: &str = "loader";
}

/// Class names driving the scroll reveal
pub mod classes {
    pub const FADE_IN: &str = "fade-in";
    pub const IN_VIEW: &str = "in-view";
}

/// Handle to an element inside one [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

#[derive(Debug, Clone, Default)]
struct Element {
    tag: String,
    id: Option<String>,
    classes: BTreeSet<String>,
    text: String,
    value: String,
    hidden: bool,
    offset_top: f64,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

/// An element tree plus the viewport it is scrolled in.
///
/// Elements live in an arena and are addressed by [`ElementId`]. Clearing a
/// parent with [`Document::remove_children`] returns the removed subtrees'
/// slots to a free list, so re-rendering a list does not grow the arena.
#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Element>,
    free: Vec<ElementId>,
    root: ElementId,
    viewport_height: f64,
    scroll_y: f64,
}

impl Document {
    /// Empty page: a lone `<body>` root, scrolled to the top.
    pub fn new(viewport_height: f64) -> Self {
        let body = Element {
            tag: "body".to_string(),
            ..Element::default()
        };
        Self {
            elements: vec![body],
            free: Vec::new(),
            root: ElementId(0),
            viewport_height,
            scroll_y: 0.0,
        }
    }

    /// The markup the comment widget is written against: a form with
    /// `name`/`message` inputs, the `commentsList` and the `feedback` area.
    pub fn comment_page(viewport_height: f64) -> Self {
        let mut doc = Self::new(viewport_height);
        let root = doc.root();

        let form = doc.create_element("form");
        doc.set_id(form, ids::COMMENT_FORM);
        doc.append_child(root, form);

        for id in [ids::NAME, ids::MESSAGE] {
            let input = doc.create_element(if id == ids::MESSAGE { "textarea" } else { "input" });
            doc.set_id(input, id);
            doc.append_child(form, input);
        }

        let feedback = doc.create_element("div");
        doc.set_id(feedback, ids::FEEDBACK);
        doc.append_child(root, feedback);

        let list = doc.create_element("ul");
        doc.set_id(list, ids::COMMENTS_LIST);
        doc.append_child(root, list);

        doc
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    /// New detached element. Reuses a slot freed by `remove_children` when
    /// one is available.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        let element = Element {
            tag: tag.to_string(),
            ..Element::default()
        };
        match self.free.pop() {
            Some(slot) => {
                self.elements[slot.0] = element;
                slot
            }
            None => {
                self.elements.push(element);
                ElementId(self.elements.len() - 1)
            }
        }
    }

    /// Attach `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if let Some(old) = self.elements[child.0].parent.take() {
            self.elements[old.0].children.retain(|c| *c != child);
        }
        self.elements[child.0].parent = Some(parent);
        self.elements[parent.0].children.push(child);
    }

    /// Drop every child of `parent` along with its subtree.
    ///
    /// Ids of the removed elements are recycled; handles to them must not be
    /// used afterwards.
    pub fn remove_children(&mut self, parent: ElementId) {
        let mut stack = std::mem::take(&mut self.elements[parent.0].children);
        while let Some(next) = stack.pop() {
            let node = &mut self.elements[next.0];
            node.parent = None;
            stack.append(&mut node.children);
            self.free.push(next);
        }
    }

    pub fn children(&self, el: ElementId) -> &[ElementId] {
        &self.elements[el.0].children
    }

    pub fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.elements[el.0].parent
    }

    /// Lowercase tag name as given to `create_element`
    pub fn tag(&self, el: ElementId) -> &str {
        &self.elements[el.0].tag
    }

    pub fn set_id(&mut self, el: ElementId, id: &str) {
        self.elements[el.0].id = Some(id.to_string());
    }

    pub fn id_of(&self, el: ElementId) -> Option<&str> {
        self.elements[el.0].id.as_deref()
    }

    /// First attached element with the given id, in document order.
    pub fn get_element_by_id(&self, id: &str) -> Option<ElementId> {
        self.descendants(self.root)
            .into_iter()
            .find(|el| self.id_of(*el) == Some(id))
    }

    /// Attached elements carrying `class`, in document order.
    pub fn elements_by_class(&self, class: &str) -> Vec<ElementId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|el| self.has_class(*el, class))
            .collect()
    }

    /// Classes are only ever added; the reveal effect relies on `in-view`
    /// never going away.
    pub fn add_class(&mut self, el: ElementId, class: &str) {
        self.elements[el.0].classes.insert(class.to_string());
    }

    pub fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.elements[el.0].classes.contains(class)
    }

    /// Replace the element's own text. Children are untouched.
    pub fn set_text(&mut self, el: ElementId, text: impl Into<String>) {
        self.elements[el.0].text = text.into();
    }

    /// The element's own text, without descendants
    pub fn text(&self, el: ElementId) -> &str {
        &self.elements[el.0].text
    }

    /// Own text plus all descendant text, in document order, space separated.
    pub fn text_content(&self, el: ElementId) -> String {
        let mut parts = Vec::new();
        for node in std::iter::once(el).chain(self.descendants(el)) {
            let text = self.text(node);
            if !text.is_empty() {
                parts.push(text);
            }
        }
        parts.join(" ")
    }

    /// Set an input's current value, as if the user had typed it.
    pub fn set_value(&mut self, el: ElementId, value: impl Into<String>) {
        self.elements[el.0].value = value.into();
    }

    /// Current input value; empty for non-inputs.
    pub fn value(&self, el: ElementId) -> &str {
        &self.elements[el.0].value
    }

    pub fn hide(&mut self, el: ElementId) {
        self.elements[el.0].hidden = true;
    }

    pub fn show(&mut self, el: ElementId) {
        self.elements[el.0].hidden = false;
    }

    /// Only the element's own flag; a shown child of a hidden parent
    /// reports false.
    pub fn is_hidden(&self, el: ElementId) -> bool {
        self.elements[el.0].hidden
    }

    /// Position of the element's top edge in page coordinates.
    pub fn set_offset_top(&mut self, el: ElementId, top: f64) {
        self.elements[el.0].offset_top = top;
    }

    /// Top edge relative to the viewport.
    pub fn bounding_top(&self, el: ElementId) -> f64 {
        self.elements[el.0].offset_top - self.scroll_y
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Scroll the viewport to `y`, clamped at the top of the page.
    pub fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y.max(0.0);
    }

    fn descendants(&self, el: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(el).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_page_has_required_ids() {
        let doc = Document::comment_page(800.0);
        for id in [
            ids::COMMENT_FORM,
            ids::NAME,
            ids::MESSAGE,
            ids::COMMENTS_LIST,
            ids::FEEDBACK,
        ] {
            assert!(doc.get_element_by_id(id).is_some(), "missing #{id}");
        }
        assert!(doc.get_element_by_id(ids::LOADER).is_none());
    }

    #[test]
    fn detached_elements_are_not_found() {
        let mut doc = Document::new(600.0);
        let list = doc.create_element("ul");
        doc.append_child(doc.root(), list);

        let item = doc.create_element("li");
        doc.set_id(item, "first");
        doc.add_class(item, "comment");
        doc.append_child(list, item);
        assert_eq!(doc.get_element_by_id("first"), Some(item));

        doc.remove_children(list);
        assert!(doc.get_element_by_id("first").is_none());
        assert!(doc.elements_by_class("comment").is_empty());
        assert!(doc.children(list).is_empty());
    }

    #[test]
    fn cleared_subtrees_are_recycled() {
        let mut doc = Document::comment_page(600.0);
        let list = doc.get_element_by_id(ids::COMMENTS_LIST).unwrap();

        let render = |doc: &mut Document| {
            doc.remove_children(list);
            for text in ["one", "two"] {
                let item = doc.create_element("li");
                let body = doc.create_element("p");
                doc.set_text(body, text);
                doc.append_child(item, body);
                doc.append_child(list, item);
            }
        };

        render(&mut doc);
        let arena = doc.elements.len();
        for _ in 0..5 {
            render(&mut doc);
        }

        assert_eq!(doc.elements.len(), arena);
        assert!(doc.free.is_empty());
        let items: Vec<String> = doc
            .children(list)
            .iter()
            .map(|li| doc.text_content(*li))
            .collect();
        assert_eq!(items, vec!["one", "two"]);
        assert_eq!(doc.tag(doc.children(list)[0]), "li");
    }

    #[test]
    fn recycled_slots_start_clean() {
        let mut doc = Document::new(600.0);
        let list = doc.create_element("ul");
        doc.append_child(doc.root(), list);

        let old = doc.create_element("li");
        doc.set_id(old, "stale");
        doc.add_class(old, "comment");
        doc.set_text(old, "old text");
        doc.append_child(list, old);
        doc.remove_children(list);

        let fresh = doc.create_element("span");
        assert_eq!(fresh, old);
        assert_eq!(doc.tag(fresh), "span");
        assert_eq!(doc.id_of(fresh), None);
        assert!(!doc.has_class(fresh, "comment"));
        assert_eq!(doc.text(fresh), "");
        assert_eq!(doc.parent(fresh), None);
    }

    #[test]
    fn append_moves_between_parents() {
        let mut doc = Document::new(600.0);
        let a = doc.create_element("div");
        let b = doc.create_element("div");
        let child = doc.create_element("span");
        doc.append_child(doc.root(), a);
        doc.append_child(doc.root(), b);
        doc.append_child(a, child);
        doc.append_child(b, child);

        assert!(doc.children(a).is_empty());
        assert_eq!(doc.children(b), &[child]);
        assert_eq!(doc.parent(child), Some(b));
    }

    #[test]
    fn text_content_walks_in_document_order() {
        let mut doc = Document::new(600.0);
        let li = doc.create_element("li");
        let name = doc.create_element("strong");
        let body = doc.create_element("p");
        doc.set_text(name, "Ada");
        doc.set_text(body, "hello there");
        doc.append_child(li, name);
        doc.append_child(li, body);

        assert_eq!(doc.text_content(li), "Ada hello there");
    }

    #[test]
    fn bounding_top_follows_scroll() {
        let mut doc = Document::new(600.0);
        let el = doc.create_element("section");
        doc.set_offset_top(el, 900.0);
        assert_eq!(doc.bounding_top(el), 900.0);

        doc.scroll_to(400.0);
        assert_eq!(doc.bounding_top(el), 500.0);

        doc.scroll_to(-20.0);
        assert_eq!(doc.scroll_y(), 0.0);
    }
}
