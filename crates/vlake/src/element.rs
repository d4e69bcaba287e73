//! The element tree of a deduction.
//!
//! A deduction is a tree of [`Element`]s. Leaves hold text or a connective
//! symbol, [`HorizontalLine`]s separate the rows of a vertical join, and
//! [`Join`]s arrange their children horizontally or vertically.
//!
//! ```text
//!            Join (vertical)
//!           /       |        \
//!   Join (horizontal)  line   AtomicLeaf "C"
//!    /     |     \
//!  "A"     ∧     "B"
//! ```
//!
//! Each element carries a stable [`ElementId`] used by hosts to refer to it,
//! a selection flag and, after a layout pass, its placement on the canvas.
//! There are no parent links; parents are found by searching from the root.

mod join;
mod leaf;
mod line;

pub use join::{Join, Orientation};
pub use leaf::{AtomicLeaf, ConnectiveLeaf};
pub use line::{HorizontalLine, Side};

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use vlake_core::geometry::Bounds;

use crate::error::VlakeError;

static NEXT_ELEMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of an element, unique within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    fn fresh() -> Self {
        Self(NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The kind of an element, as shown to hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    AtomicLeaf,
    Connective,
    Line,
    HorizontalJoin,
    VerticalJoin,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AtomicLeaf => "leaf",
            Self::Connective => "connective",
            Self::Line => "line",
            Self::HorizontalJoin => "hjoin",
            Self::VerticalJoin => "vjoin",
        };
        f.write_str(name)
    }
}

/// The variant-specific content of an element.
#[derive(Debug)]
pub enum Node {
    Leaf(AtomicLeaf),
    Connective(ConnectiveLeaf),
    Line(HorizontalLine),
    Join(Join),
}

/// A node of the deduction tree.
#[derive(Debug)]
pub struct Element {
    id: ElementId,
    selected: bool,
    placement: Option<Bounds>,
    node: Node,
}

impl Element {
    /// Wraps `node` in a new element with a fresh identity.
    pub fn new(node: Node) -> Self {
        Self {
            id: ElementId::fresh(),
            selected: false,
            placement: None,
            node,
        }
    }

    /// A fresh placeholder leaf showing the default star.
    pub fn default_leaf() -> Self {
        Self::new(Node::Leaf(AtomicLeaf::placeholder()))
    }

    /// A leaf showing `text` verbatim.
    pub fn leaf(text: impl Into<String>) -> Self {
        Self::new(Node::Leaf(AtomicLeaf::new(text)))
    }

    /// Wraps a join.
    pub fn join(join: Join) -> Self {
        Self::new(Node::Join(join))
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub(crate) fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }

    pub fn kind(&self) -> ElementKind {
        match &self.node {
            Node::Leaf(_) => ElementKind::AtomicLeaf,
            Node::Connective(_) => ElementKind::Connective,
            Node::Line(_) => ElementKind::Line,
            Node::Join(join) => match join.orientation() {
                Orientation::Horizontal => ElementKind::HorizontalJoin,
                Orientation::Vertical => ElementKind::VerticalJoin,
            },
        }
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// True for atomic leaves, the only elements that carry editable text.
    pub fn is_leaf(&self) -> bool {
        matches!(self.node, Node::Leaf(_))
    }

    /// True for the separators between join children.
    pub fn is_connective(&self) -> bool {
        matches!(self.node, Node::Connective(_) | Node::Line(_))
    }

    pub fn as_leaf(&self) -> Option<&AtomicLeaf> {
        match &self.node {
            Node::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    pub fn as_leaf_mut(&mut self) -> Option<&mut AtomicLeaf> {
        match &mut self.node {
            Node::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    pub fn as_connective(&self) -> Option<&ConnectiveLeaf> {
        match &self.node {
            Node::Connective(connective) => Some(connective),
            _ => None,
        }
    }

    pub fn as_connective_mut(&mut self) -> Option<&mut ConnectiveLeaf> {
        match &mut self.node {
            Node::Connective(connective) => Some(connective),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<&HorizontalLine> {
        match &self.node {
            Node::Line(line) => Some(line),
            _ => None,
        }
    }

    pub fn as_line_mut(&mut self) -> Option<&mut HorizontalLine> {
        match &mut self.node {
            Node::Line(line) => Some(line),
            _ => None,
        }
    }

    pub fn as_join(&self) -> Option<&Join> {
        match &self.node {
            Node::Join(join) => Some(join),
            _ => None,
        }
    }

    pub fn as_join_mut(&mut self) -> Option<&mut Join> {
        match &mut self.node {
            Node::Join(join) => Some(join),
            _ => None,
        }
    }

    /// The placement assigned by the last layout pass, if still valid.
    pub fn placement(&self) -> Option<Bounds> {
        self.placement
    }

    pub(crate) fn set_placement(&mut self, bounds: Bounds) {
        self.placement = Some(bounds);
    }

    /// The element's box on the canvas.
    ///
    /// # Errors
    ///
    /// Returns [`VlakeError::InvalidState`] if the element has not been
    /// staged since it was created or last mutated.
    pub fn bounds(&self) -> Result<Bounds, VlakeError> {
        self.placement.ok_or_else(|| VlakeError::unstaged(self.id))
    }

    /// Discards the geometry of this element and its whole subtree.
    pub fn unstage(&mut self) {
        self.placement = None;
        match &mut self.node {
            Node::Line(line) => line.clear_width(),
            Node::Join(join) => join.elements_mut().for_each(Element::unstage),
            Node::Leaf(_) | Node::Connective(_) => {}
        }
    }

    /// Clears the selection flag on this element and its whole subtree.
    pub fn clear_selection(&mut self) {
        self.selected = false;
        if let Node::Join(join) = &mut self.node {
            join.elements_mut().for_each(Element::clear_selection);
        }
    }

    /// Returns a structurally independent copy with fresh identities.
    ///
    /// Selection flags and geometry are not carried over.
    pub fn deep_copy(&self) -> Self {
        let node = match &self.node {
            Node::Leaf(leaf) => Node::Leaf(leaf.clone()),
            Node::Connective(connective) => Node::Connective(*connective),
            Node::Line(line) => Node::Line(line.copy_unstaged()),
            Node::Join(join) => Node::Join(join.deep_copy()),
        };
        Self::new(node)
    }

    /// Finds the element with the given identity in this subtree.
    pub fn find(&self, id: ElementId) -> Option<&Element> {
        if self.id == id {
            return Some(self);
        }
        self.as_join()?.elements().find_map(|element| element.find(id))
    }

    /// Finds the element with the given identity in this subtree, mutably.
    ///
    /// The returned slot can be overwritten to replace the element in place.
    pub fn find_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        if self.id == id {
            return Some(self);
        }
        match &mut self.node {
            Node::Join(join) => join.elements_mut().find_map(|element| element.find_mut(id)),
            _ => None,
        }
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.find(id).is_some()
    }

    /// Visits this element and its descendants in pre-order.
    ///
    /// Join children are visited before the join's connectives.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Element)) {
        visit(self);
        if let Node::Join(join) = &self.node {
            for element in join.elements() {
                element.walk(visit);
            }
        }
    }

    /// Number of elements in this subtree, including itself.
    pub fn count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_| count += 1);
        count
    }
}
