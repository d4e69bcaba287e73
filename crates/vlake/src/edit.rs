//! Structural edits of the element tree.
//!
//! These functions operate on the tree alone and assume the caller already
//! checked that the edit makes sense for the target (see
//! [`Editor`](crate::editor::Editor) for the user-facing rules). Every edit
//! leaves each join with at least two children and one connective per gap.

use std::{fmt, mem, str::FromStr};

use log::debug;

use crate::{
    element::{Element, ElementId, Join, Orientation},
    error::VlakeError,
    selection::find_parent,
};

/// Where a new leaf goes relative to the reference element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Above,
    Below,
    Left,
    Right,
}

impl Direction {
    /// The orientation of the join that holds the reference and the new leaf.
    pub fn orientation(self) -> Orientation {
        match self {
            Self::Above | Self::Below => Orientation::Vertical,
            Self::Left | Self::Right => Orientation::Horizontal,
        }
    }

    /// True if the new leaf goes before the reference in child order.
    pub fn is_before(self) -> bool {
        matches!(self, Self::Above | Self::Left)
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "above" => Ok(Self::Above),
            "below" => Ok(Self::Below),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(format!(
                "unknown direction `{s}`, valid values: above, below, left, right"
            )),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Above => "above",
            Self::Below => "below",
            Self::Left => "left",
            Self::Right => "right",
        };
        f.write_str(name)
    }
}

/// Adds a fresh placeholder leaf next to `target` and returns its identity.
///
/// If `target` sits in a join of the matching orientation, the leaf is
/// inserted beside it with a new connective in the gap. Otherwise, including
/// when `target` is the root, `target` is wrapped in a new join together with
/// the leaf and the wrapper takes its place.
///
/// # Errors
///
/// Returns [`VlakeError::StructuralInvariant`] if `target` is not in the tree
/// or is a connective.
pub fn insert(
    root: &mut Element,
    target: ElementId,
    direction: Direction,
) -> Result<ElementId, VlakeError> {
    let leaf = Element::default_leaf();
    let leaf_id = leaf.id();
    let orientation = direction.orientation();

    let parent = find_parent(root, target)
        .and_then(|parent| Some((parent.id(), parent.as_join()?.orientation())));

    match parent {
        Some((parent_id, parent_orientation)) if parent_orientation == orientation => {
            let join = root
                .find_mut(parent_id)
                .and_then(Element::as_join_mut)
                .ok_or_else(|| VlakeError::missing(parent_id))?;
            let index = join.child_index(target).ok_or_else(|| {
                VlakeError::StructuralInvariant(format!(
                    "element {target} is a connective and cannot take a neighbour"
                ))
            })?;
            let at = if direction.is_before() { index } else { index + 1 };
            join.insert_child(at, leaf);
            debug!(target:% = target, direction:% = direction, index = at; "Inserted leaf into join");
        }
        _ => {
            let slot = root.find_mut(target).ok_or_else(|| VlakeError::missing(target))?;
            if slot.is_connective() {
                return Err(VlakeError::StructuralInvariant(format!(
                    "element {target} is a connective and cannot be wrapped"
                )));
            }
            let reference = mem::replace(slot, Element::default_leaf());
            let (first, second) = if direction.is_before() {
                (leaf, reference)
            } else {
                (reference, leaf)
            };
            *slot = Element::join(Join::from_pair(orientation, first, second));
            debug!(target:% = target, direction:% = direction; "Wrapped element in new join");
        }
    }

    root.unstage();
    Ok(leaf_id)
}

/// Substitutes `replacement` for the element `target`, in place.
///
/// Replacing the root swaps the whole tree. Connectives are left untouched.
///
/// # Errors
///
/// Returns [`VlakeError::StructuralInvariant`] if `target` is not in the tree.
pub fn replace(
    root: &mut Element,
    target: ElementId,
    replacement: Element,
) -> Result<Element, VlakeError> {
    let slot = root.find_mut(target).ok_or_else(|| VlakeError::missing(target))?;
    let previous = mem::replace(slot, replacement);
    debug!(target:% = target; "Replaced element");
    root.unstage();
    Ok(previous)
}

/// Removes `target` from the tree.
///
/// The inward connective goes with it. A join left with a single child
/// collapses into that child; a join left empty is removed in turn. Removing
/// the root, or emptying it, resets the tree to a placeholder leaf.
///
/// # Errors
///
/// Returns [`VlakeError::StructuralInvariant`] if `target` is not in the tree
/// or is a connective.
pub fn remove(root: &mut Element, target: ElementId) -> Result<(), VlakeError> {
    if root.id() == target {
        *root = Element::default_leaf();
        debug!(target:% = target; "Removed root");
        return Ok(());
    }

    let parent_id = find_parent(root, target)
        .map(Element::id)
        .ok_or_else(|| VlakeError::missing(target))?;
    let parent = root
        .find_mut(parent_id)
        .ok_or_else(|| VlakeError::missing(parent_id))?;
    let join = parent
        .as_join_mut()
        .ok_or_else(|| VlakeError::StructuralInvariant(format!("parent {parent_id} is not a join")))?;
    let index = join.child_index(target).ok_or_else(|| {
        VlakeError::StructuralInvariant(format!("element {target} is a connective and cannot be removed"))
    })?;
    join.remove_child(index)?;
    debug!(target:% = target, parent:% = parent_id, index = index; "Removed element");

    match join.children().len() {
        0 => return remove(root, parent_id),
        1 => {
            if let Some(survivor) = join.take_only_child() {
                debug!(join:% = parent_id, survivor:% = survivor.id(); "Collapsed single-child join");
                *parent = survivor;
            }
        }
        _ => {}
    }

    root.unstage();
    Ok(())
}

/// Checks the structural rules on every join in the tree.
///
/// The root itself must not be a connective or a line.
pub fn check_tree(root: &Element) -> Result<(), VlakeError> {
    if root.is_connective() {
        return Err(VlakeError::StructuralInvariant(format!(
            "connective {} is the root",
            root.id()
        )));
    }
    let mut joins = Vec::new();
    root.walk(&mut |element| joins.extend(element.as_join()));
    joins.into_iter().try_for_each(Join::check)
}
