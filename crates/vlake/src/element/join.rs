//! Horizontal and vertical joins.

use std::fmt;

use crate::{
    element::{ConnectiveLeaf, Element, ElementId, HorizontalLine, Node},
    error::VlakeError,
};

/// The direction a join lays out its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Left to right, separated by connective symbols.
    Horizontal,
    /// Top to bottom, separated by inference lines.
    Vertical,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => f.write_str("horizontal"),
            Self::Vertical => f.write_str("vertical"),
        }
    }
}

/// An ordered group of children with one connective between each pair.
///
/// `connectives[i]` sits between `children[i]` and `children[i + 1]`, so a
/// join with `n` children always holds `n - 1` connectives. Horizontal joins
/// use [`ConnectiveLeaf`]s, vertical joins use [`HorizontalLine`]s.
#[derive(Debug)]
pub struct Join {
    orientation: Orientation,
    children: Vec<Element>,
    connectives: Vec<Element>,
    boxed: bool,
}

impl Join {
    /// Creates a join holding `first` then `second` with a default connective between.
    pub fn from_pair(orientation: Orientation, first: Element, second: Element) -> Self {
        let mut join = Self {
            orientation,
            children: Vec::with_capacity(2),
            connectives: Vec::with_capacity(1),
            boxed: false,
        };
        join.insert_child(0, first);
        join.insert_child(1, second);
        join
    }

    /// Creates a join from a list of children, with default connectives.
    ///
    /// # Errors
    ///
    /// Returns [`VlakeError::StructuralInvariant`] if `children` is empty.
    pub fn from_children(
        orientation: Orientation,
        children: Vec<Element>,
    ) -> Result<Self, VlakeError> {
        if children.is_empty() {
            return Err(VlakeError::StructuralInvariant(
                "a join needs at least one child".to_string(),
            ));
        }
        let mut join = Self {
            orientation,
            children: Vec::with_capacity(children.len()),
            connectives: Vec::with_capacity(children.len() - 1),
            boxed: false,
        };
        for child in children {
            join.insert_child(join.children.len(), child);
        }
        Ok(join)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn connectives(&self) -> &[Element] {
        &self.connectives
    }

    pub(crate) fn connectives_mut(&mut self) -> &mut [Element] {
        &mut self.connectives
    }

    /// Children followed by connectives.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().chain(self.connectives.iter())
    }

    /// Children followed by connectives, mutably.
    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().chain(self.connectives.iter_mut())
    }

    pub(crate) fn children_and_connectives_mut(
        &mut self,
    ) -> (&mut [Element], &mut [Element]) {
        (&mut self.children, &mut self.connectives)
    }

    pub fn is_boxed(&self) -> bool {
        self.boxed
    }

    pub fn set_boxed(&mut self, boxed: bool) {
        self.boxed = boxed;
    }

    pub fn toggle_box(&mut self) {
        self.boxed = !self.boxed;
    }

    /// Position of the child with identity `id`.
    pub fn child_index(&self, id: ElementId) -> Option<usize> {
        self.children.iter().position(|child| child.id() == id)
    }

    /// Position of the connective with identity `id`.
    pub fn connective_index(&self, id: ElementId) -> Option<usize> {
        self.connectives
            .iter()
            .position(|connective| connective.id() == id)
    }

    /// True if `id` is one of this join's direct children or connectives.
    pub fn is_parent_of(&self, id: ElementId) -> bool {
        self.elements().any(|element| element.id() == id)
    }

    fn new_connective(&self) -> Element {
        match self.orientation {
            Orientation::Horizontal => {
                Element::new(Node::Connective(ConnectiveLeaf::default_connective()))
            }
            Orientation::Vertical => Element::new(Node::Line(HorizontalLine::default())),
        }
    }

    /// Inserts `element` at child position `index`.
    ///
    /// A default connective is added in the new gap unless the join was empty.
    /// Panics if `index > children().len()`, like [`Vec::insert`].
    pub(crate) fn insert_child(&mut self, index: usize, element: Element) {
        if !self.children.is_empty() {
            let connective = self.new_connective();
            let at = index.min(self.connectives.len());
            self.connectives.insert(at, connective);
        }
        self.children.insert(index, element);
    }

    /// Removes the child at `index` together with its inward connective.
    ///
    /// The connective before the child is removed, or the one after it when
    /// the child is first.
    ///
    /// # Errors
    ///
    /// Returns [`VlakeError::StructuralInvariant`] if `index` is out of range.
    pub fn remove_child(&mut self, index: usize) -> Result<Element, VlakeError> {
        if index >= self.children.len() {
            return Err(VlakeError::StructuralInvariant(format!(
                "child index {index} out of range for join with {} children",
                self.children.len()
            )));
        }
        let removed = self.children.remove(index);
        if index > 0 {
            self.connectives.remove(index - 1);
        } else if !self.connectives.is_empty() {
            self.connectives.remove(0);
        }
        Ok(removed)
    }

    /// Takes the last remaining child out of a join that holds exactly one.
    pub(crate) fn take_only_child(&mut self) -> Option<Element> {
        if self.children.len() == 1 {
            self.children.pop()
        } else {
            None
        }
    }

    /// Checks the connective-count rule and the kinds of children and connectives.
    pub fn check(&self) -> Result<(), VlakeError> {
        if self.children.is_empty() {
            return Err(VlakeError::StructuralInvariant(
                "join has no children".to_string(),
            ));
        }
        if let Some(child) = self.children.iter().find(|child| child.is_connective()) {
            return Err(VlakeError::StructuralInvariant(format!(
                "connective {} sits in a child slot",
                child.id()
            )));
        }
        if self.connectives.len() + 1 != self.children.len() {
            return Err(VlakeError::StructuralInvariant(format!(
                "join has {} children but {} connectives",
                self.children.len(),
                self.connectives.len()
            )));
        }
        let kinds_match = self.connectives.iter().all(|connective| {
            match self.orientation {
                Orientation::Horizontal => connective.as_connective().is_some(),
                Orientation::Vertical => connective.as_line().is_some(),
            }
        });
        if !kinds_match {
            return Err(VlakeError::StructuralInvariant(format!(
                "{} join holds a connective of the wrong kind",
                self.orientation
            )));
        }
        Ok(())
    }

    pub(crate) fn deep_copy(&self) -> Self {
        Self {
            orientation: self.orientation,
            children: self.children.iter().map(Element::deep_copy).collect(),
            connectives: self.connectives.iter().map(Element::deep_copy).collect(),
            boxed: self.boxed,
        }
    }
}
