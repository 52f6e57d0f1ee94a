//! Pattern matching over the refract parse tree

use crate::refract::Element;

/// A shape pattern for locating sub-trees: an element kind, optionally
/// narrowed by a classification tag in `meta.classes`.
#[derive(Debug, Clone)]
pub struct Pattern<'p> {
    element: &'p str,
    class: Option<&'p str>,
}

impl<'p> Pattern<'p> {
    pub fn element(element: &'p str) -> Pattern<'p> {
        Pattern {
            element,
            class: None,
        }
    }

    pub fn class(mut self, class: &'p str) -> Pattern<'p> {
        self.class = Some(class);
        self
    }

    fn matches(&self, node: &Element) -> bool {
        if node.element != self.element {
            return false;
        }
        match self.class {
            Some(class) => node.has_class(class),
            None => true,
        }
    }
}

/// Collect every node under `root` (including `root` itself) matching the
/// pattern, in document order. Matching nodes are still descended into, so
/// nested matches are all reported.
pub fn query<'e>(root: &'e Element, pattern: &Pattern) -> Vec<&'e Element> {
    let mut found = Vec::new();
    collect(root, pattern, &mut found);
    found
}

/// The first node matching the pattern, if any.
pub fn query_first<'e>(root: &'e Element, pattern: &Pattern) -> Option<&'e Element> {
    query(root, pattern)
        .into_iter()
        .next()
}

fn collect<'e>(node: &'e Element, pattern: &Pattern, found: &mut Vec<&'e Element>) {
    if pattern.matches(node) {
        found.push(node);
    }
    for child in node.children() {
        collect(child, pattern, found);
    }
}
