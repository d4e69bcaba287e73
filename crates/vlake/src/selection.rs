//! Hit-testing and parent lookup.

use vlake_core::geometry::Point;

use crate::element::{Element, ElementId};

/// Finds the innermost element under `point`.
///
/// The tree is searched in pre-order. An element matches if it has been
/// staged and `point` lies inside or on the edge of its box; later matches
/// win, so children beat their join and, among overlapping siblings,
/// connectives beat children. Unstaged elements never match.
pub fn trace_click(root: &Element, point: Point) -> Option<ElementId> {
    let mut hit = None;
    trace_into(root, point, &mut hit);
    hit
}

fn trace_into(element: &Element, point: Point, hit: &mut Option<ElementId>) {
    let inside = element
        .placement()
        .is_some_and(|bounds| bounds.contains(point));
    if !inside {
        return;
    }
    *hit = Some(element.id());
    if let Some(join) = element.as_join() {
        for child in join.elements() {
            trace_into(child, point, hit);
        }
    }
}

/// Returns the join that directly holds `target` as a child or connective.
///
/// The root has no parent, and neither does an id that is not in the tree.
pub fn find_parent(root: &Element, target: ElementId) -> Option<&Element> {
    let join = root.as_join()?;
    if join.is_parent_of(target) {
        return Some(root);
    }
    join.children()
        .iter()
        .find_map(|child| find_parent(child, target))
}

/// Moves the selection flag to `target`, clearing it everywhere else.
///
/// Returns false, leaving nothing selected, if `target` is not in the tree.
pub(crate) fn apply_selection(root: &mut Element, target: Option<ElementId>) -> bool {
    root.clear_selection();
    let Some(id) = target else {
        return true;
    };
    match root.find_mut(id) {
        Some(element) => {
            element.set_selected(true);
            true
        }
        None => false,
    }
}
