//! Scroll-triggered fade-in

use crate::page::{classes, Document, ElementId};

/// Mark every `fade-in` element whose top edge is inside the viewport as
/// `in-view`. Elements are never un-marked. Returns the newly revealed ones.
pub fn reveal_in_view(doc: &mut Document) -> Vec<ElementId> {
    let viewport = doc.viewport_height();
    let revealed: Vec<ElementId> = doc
        .elements_by_class(classes::FADE_IN)
        .into_iter()
        .filter(|el| !doc.has_class(*el, classes::IN_VIEW))
        .filter(|el| doc.bounding_top(*el) < viewport)
        .collect();

    for el in &revealed {
        doc.add_class(*el, classes::IN_VIEW);
    }
    revealed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(doc: &mut Document, top: f64) -> ElementId {
        let el = doc.create_element("section");
        doc.add_class(el, classes::FADE_IN);
        doc.set_offset_top(el, top);
        doc.append_child(doc.root(), el);
        el
    }

    #[test]
    fn reveals_only_entered_elements() {
        let mut doc = Document::new(600.0);
        let above = section(&mut doc, 100.0);
        let edge = section(&mut doc, 600.0);
        let below = section(&mut doc, 1200.0);

        assert_eq!(reveal_in_view(&mut doc), vec![above]);
        assert!(!doc.has_class(edge, classes::IN_VIEW));
        assert!(!doc.has_class(below, classes::IN_VIEW));

        doc.scroll_to(700.0);
        assert_eq!(reveal_in_view(&mut doc), vec![edge, below]);
    }

    #[test]
    fn never_hides_again() {
        let mut doc = Document::new(600.0);
        let el = section(&mut doc, 900.0);

        doc.scroll_to(400.0);
        reveal_in_view(&mut doc);
        assert!(doc.has_class(el, classes::IN_VIEW));

        doc.scroll_to(0.0);
        assert!(reveal_in_view(&mut doc).is_empty());
        assert!(doc.has_class(el, classes::IN_VIEW));
    }

    #[test]
    fn ignores_untagged_elements() {
        let mut doc = Document::new(600.0);
        let plain = doc.create_element("div");
        doc.append_child(doc.root(), plain);

        assert!(reveal_in_view(&mut doc).is_empty());
        assert!(!doc.has_class(plain, classes::IN_VIEW));
    }
}
