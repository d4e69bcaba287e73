//! The editing session a host drives.
//!
//! An [`Editor`] owns the deduction tree, the current selection and the
//! clipboard. Hosts translate user actions into calls on the editor, then
//! run [`Editor::layout`] and [`Editor::render`] to redraw.
//!
//! Operations that cannot apply to the current selection do nothing and
//! report why through [`EditStatus::Declined`]. Errors are reserved for
//! broken internal state.
//!
//! # Example
//!
//! ```
//! # use vlake::editor::{Editor, EditStatus};
//! # use vlake::edit::Direction;
//! let mut editor = Editor::default();
//! editor.select_root();
//! editor.set_text("A").unwrap();
//! editor.insert(Direction::Below).unwrap();
//! editor.set_text("B").unwrap();
//!
//! assert_eq!(
//!     editor.export_markup(),
//!     "$ \\vlgoodsyntax \\odframefalse \\od{\\odi{\\odh{A}}{}{B}{}} $"
//! );
//! ```

use std::fmt;

use log::{debug, info};

use vlake_core::{
    draw::{LineStyle, Surface, TextMeasurer},
    geometry::{Bounds, Point},
};

use crate::{
    config::AppConfig,
    edit::{self, Direction},
    element::{Element, ElementId, Side},
    error::VlakeError,
    export::svg::SvgSurface,
    layout, markup,
    render::{RenderStyle, draw_centre_mark},
    selection::{apply_selection, find_parent, trace_click},
};

/// Outcome of an editing operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditStatus {
    /// The tree or selection changed.
    Applied,
    /// Nothing changed, for the given reason.
    Declined(Decline),
}

impl EditStatus {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

/// Why an operation was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decline {
    /// The operation needs a selected element.
    NoSelection,
    /// Paste was requested before anything was copied.
    EmptyClipboard,
    /// The selected element does not support the operation.
    NotApplicable,
    /// The operation discards a whole structure and must be confirmed.
    NeedsConfirmation,
    /// There is no deduction to export yet.
    EmptyDeduction,
}

impl fmt::Display for Decline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::NoSelection => "select an element first",
            Self::EmptyClipboard => "nothing has been copied",
            Self::NotApplicable => "the selected element does not support this operation",
            Self::NeedsConfirmation => "this deletes a whole section and must be confirmed",
            Self::EmptyDeduction => "create a deduction before exporting it",
        };
        f.write_str(message)
    }
}

const APPLIED: Result<EditStatus, VlakeError> = Ok(EditStatus::Applied);

fn declined(reason: Decline) -> Result<EditStatus, VlakeError> {
    Ok(EditStatus::Declined(reason))
}

/// An editing session over one deduction tree.
#[derive(Debug)]
pub struct Editor {
    config: AppConfig,
    root: Element,
    selected: Option<ElementId>,
    clipboard: Option<Element>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl Editor {
    /// Starts a session with a single placeholder leaf.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            root: Element::default_leaf(),
            selected: None,
            clipboard: None,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// The selected element, if it is still part of the tree.
    pub fn selected(&self) -> Option<&Element> {
        self.selected.and_then(|id| self.root.find(id))
    }

    pub fn selected_id(&self) -> Option<ElementId> {
        self.selected().map(Element::id)
    }

    /// True if `id` is the root of the tree.
    pub fn is_root(&self, id: ElementId) -> bool {
        self.root.id() == id
    }

    /// True if `id` is an atomic leaf of the tree.
    pub fn is_leaf(&self, id: ElementId) -> bool {
        self.root.find(id).is_some_and(Element::is_leaf)
    }

    /// True if the copy buffer holds something to paste.
    pub fn has_clipboard(&self) -> bool {
        self.clipboard.is_some()
    }

    /// True while the root is still the untouched placeholder leaf.
    pub fn is_empty(&self) -> bool {
        self.root.as_leaf().is_some_and(|leaf| leaf.is_placeholder())
    }

    /// Selects `target`, or clears the selection with `None`.
    ///
    /// Declines with [`Decline::NotApplicable`] if `target` is not in the tree.
    pub fn select(&mut self, target: Option<ElementId>) -> EditStatus {
        if apply_selection(&mut self.root, target) {
            self.selected = target;
            debug!(selected:? = target; "Selection changed");
            EditStatus::Applied
        } else {
            self.selected = None;
            EditStatus::Declined(Decline::NotApplicable)
        }
    }

    pub fn select_root(&mut self) -> EditStatus {
        self.select(Some(self.root.id()))
    }

    /// Moves the selection to the join holding the selected element.
    pub fn select_parent(&mut self) -> EditStatus {
        let Some(target) = self.selected_id() else {
            return EditStatus::Declined(Decline::NoSelection);
        };
        match find_parent(&self.root, target).map(Element::id) {
            Some(parent) => self.select(Some(parent)),
            None => EditStatus::Declined(Decline::NotApplicable),
        }
    }

    /// Moves the selection to the `index`-th child of the selected join.
    pub fn select_child(&mut self, index: usize) -> EditStatus {
        self.select_within(|join| join.children().get(index).map(Element::id))
    }

    /// Moves the selection to the `index`-th connective of the selected join.
    pub fn select_connective(&mut self, index: usize) -> EditStatus {
        self.select_within(|join| join.connectives().get(index).map(Element::id))
    }

    fn select_within(
        &mut self,
        pick: impl FnOnce(&crate::element::Join) -> Option<ElementId>,
    ) -> EditStatus {
        let Some(selected) = self.selected() else {
            return EditStatus::Declined(Decline::NoSelection);
        };
        match selected.as_join().and_then(pick) {
            Some(target) => self.select(Some(target)),
            None => EditStatus::Declined(Decline::NotApplicable),
        }
    }

    /// Selects the innermost element under `point`, or nothing.
    ///
    /// # Errors
    ///
    /// Returns [`VlakeError::InvalidState`] if the tree has not been laid out
    /// since the last change.
    pub fn click(&mut self, point: Point) -> Result<Option<ElementId>, VlakeError> {
        self.root.bounds()?;
        let hit = trace_click(&self.root, point);
        debug!(x = point.x(), y = point.y(), hit:? = hit; "Traced click");
        self.select(hit);
        Ok(hit)
    }

    fn selection_or_decline(&self) -> Result<&Element, Decline> {
        self.selected().ok_or(Decline::NoSelection)
    }

    /// Adds a placeholder leaf next to the selection and selects it.
    pub fn insert(&mut self, direction: Direction) -> Result<EditStatus, VlakeError> {
        let target = match self.selection_or_decline() {
            Ok(element) if element.is_connective() => return declined(Decline::NotApplicable),
            Ok(element) => element.id(),
            Err(reason) => return declined(reason),
        };
        let leaf = edit::insert(&mut self.root, target, direction)?;
        self.select(Some(leaf));
        APPLIED
    }

    /// Deletes the selection.
    ///
    /// Deleting a join, or resetting a root that is not a leaf, requires
    /// `confirmed`. The selection is cleared afterwards.
    pub fn remove(&mut self, confirmed: bool) -> Result<EditStatus, VlakeError> {
        let (target, is_leaf) = match self.selection_or_decline() {
            Ok(element) if element.is_connective() => return declined(Decline::NotApplicable),
            Ok(element) => (element.id(), element.is_leaf()),
            Err(reason) => return declined(reason),
        };
        if !is_leaf && !confirmed {
            return declined(Decline::NeedsConfirmation);
        }
        edit::remove(&mut self.root, target)?;
        self.select(None);
        APPLIED
    }

    /// Snapshots a deep copy of the selection into the clipboard.
    pub fn copy(&mut self) -> EditStatus {
        match self.selection_or_decline() {
            Ok(element) => {
                self.clipboard = Some(element.deep_copy());
                EditStatus::Applied
            }
            Err(reason) => EditStatus::Declined(reason),
        }
    }

    /// Replaces the selection with a fresh copy of the clipboard and selects it.
    ///
    /// A copied connective or line only restyles a selected separator of the
    /// same kind; it never takes the place of a child or the root.
    pub fn paste(&mut self) -> Result<EditStatus, VlakeError> {
        let (target, target_is_connective) = match self.selection_or_decline() {
            Ok(element) => (element.id(), element.is_connective()),
            Err(reason) => return declined(reason),
        };
        let Some(clipboard) = self.clipboard.as_ref() else {
            return declined(Decline::EmptyClipboard);
        };

        match (target_is_connective, clipboard.is_connective()) {
            (false, false) => {
                let pasted = clipboard.deep_copy();
                let pasted_id = pasted.id();
                edit::replace(&mut self.root, target, pasted)?;
                self.select(Some(pasted_id));
                APPLIED
            }
            (true, true) => self.paste_style(),
            _ => declined(Decline::NotApplicable),
        }
    }

    /// Copies the clipboard separator's symbol or line style onto the selection.
    fn paste_style(&mut self) -> Result<EditStatus, VlakeError> {
        let Some(clipboard) = self.clipboard.as_ref() else {
            return declined(Decline::EmptyClipboard);
        };
        if let Some(connective) = clipboard.as_connective() {
            let key = connective.key();
            return self.modify_selected(|element| match element.as_connective_mut() {
                Some(target) => {
                    target.set_symbol(key)?;
                    Ok(true)
                }
                None => Ok(false),
            });
        }
        let Some(line) = clipboard.as_line() else {
            return declined(Decline::NotApplicable);
        };
        let style = line.style();
        let left = line.annotation(Side::Left).to_string();
        let right = line.annotation(Side::Right).to_string();
        self.modify_selected(|element| match element.as_line_mut() {
            Some(target) => {
                target.set_style(style);
                target.set_annotation(Side::Left, left);
                target.set_annotation(Side::Right, right);
                Ok(true)
            }
            None => Ok(false),
        })
    }

    /// Flips the frame around the selected join.
    pub fn toggle_box(&mut self) -> Result<EditStatus, VlakeError> {
        self.modify_selected(|element| match element.as_join_mut() {
            Some(join) => {
                join.toggle_box();
                Ok(true)
            }
            None => Ok(false),
        })
    }

    /// Changes the style of the selected inference line.
    pub fn set_line_style(&mut self, style: LineStyle) -> Result<EditStatus, VlakeError> {
        self.modify_selected(|element| match element.as_line_mut() {
            Some(line) => {
                line.set_style(style);
                Ok(true)
            }
            None => Ok(false),
        })
    }

    /// Changes the symbol of the selected connective.
    ///
    /// # Errors
    ///
    /// Returns [`VlakeError::UnknownStyle`] if `key` is not a known symbol.
    pub fn set_connective(&mut self, key: &str) -> Result<EditStatus, VlakeError> {
        self.modify_selected(|element| match element.as_connective_mut() {
            Some(connective) => {
                connective.set_symbol(key)?;
                Ok(true)
            }
            None => Ok(false),
        })
    }

    /// Replaces the text of the selected leaf; empty text restores the placeholder.
    pub fn set_text(&mut self, text: &str) -> Result<EditStatus, VlakeError> {
        self.modify_selected(|element| match element.as_leaf_mut() {
            Some(leaf) => {
                leaf.set_text(text);
                Ok(true)
            }
            None => Ok(false),
        })
    }

    /// Sets the annotation on one side of the selected inference line.
    pub fn set_annotation(&mut self, side: Side, text: &str) -> Result<EditStatus, VlakeError> {
        self.modify_selected(|element| match element.as_line_mut() {
            Some(line) => {
                line.set_annotation(side, text);
                Ok(true)
            }
            None => Ok(false),
        })
    }

    fn modify_selected(
        &mut self,
        apply: impl FnOnce(&mut Element) -> Result<bool, VlakeError>,
    ) -> Result<EditStatus, VlakeError> {
        let Some(id) = self.selected_id() else {
            return declined(Decline::NoSelection);
        };
        let element = self.root.find_mut(id).ok_or_else(|| VlakeError::missing(id))?;
        if !apply(element)? {
            return declined(Decline::NotApplicable);
        }
        debug!(id:% = id; "Modified selected element");
        self.root.unstage();
        APPLIED
    }

    /// Replaces the whole tree with a placeholder leaf.
    ///
    /// Requires `confirmed` unless the root is a leaf.
    pub fn reset(&mut self, confirmed: bool) -> EditStatus {
        if !self.root.is_leaf() && !confirmed {
            return EditStatus::Declined(Decline::NeedsConfirmation);
        }
        self.root = Element::default_leaf();
        self.selected = None;
        info!("Editor reset");
        EditStatus::Applied
    }

    /// Lays out the whole tree with its root at the canvas centre.
    pub fn layout(&mut self, measurer: &dyn TextMeasurer) -> Result<Bounds, VlakeError> {
        layout::layout(&mut self.root, self.config.layout(), measurer)
    }

    /// Draws the laid-out tree, and the centre mark if configured.
    ///
    /// # Errors
    ///
    /// Returns [`VlakeError::InvalidState`] if the tree has not been laid out
    /// since the last change, or [`VlakeError::Config`] for unparsable colors.
    pub fn render(&self, surface: &mut dyn Surface) -> Result<(), VlakeError> {
        let style_config = self.config.style();
        let ink = style_config.text_color().map_err(VlakeError::Config)?;
        let style = RenderStyle::from_config(&self.config)?;

        surface.set_stroke_color(ink);
        surface.set_fill_color(ink);
        self.root.render(surface, &style)?;

        if style_config.centre_mark() {
            let mark = style_config
                .centre_mark_color()
                .map_err(VlakeError::Config)?;
            draw_centre_mark(surface, self.config.layout().canvas_center(), mark);
        }
        Ok(())
    }

    /// Renders the laid-out tree to an SVG document string.
    pub fn render_svg(&self, measurer: &dyn TextMeasurer) -> Result<String, VlakeError> {
        let background = self
            .config
            .style()
            .background_color()
            .map_err(VlakeError::Config)?;
        let mut surface = SvgSurface::new(self.config.layout().canvas_size(), measurer)
            .with_background(background);
        self.render(&mut surface)?;
        let svg = surface.into_document().to_string();
        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }

    /// The markup document for the current tree.
    pub fn export_markup(&self) -> String {
        let markup = markup::to_document(&self.root);
        info!(bytes = markup.len(); "Markup exported");
        markup
    }

    /// The markup document, declined while there is no deduction yet.
    pub fn checked_markup(&self) -> Result<String, Decline> {
        if self.is_empty() {
            return Err(Decline::EmptyDeduction);
        }
        Ok(self.export_markup())
    }
}

#[cfg(test)]
mod tests {
    use vlake_core::{
        color::Color,
        draw::{FontSpec, MonospaceMeasurer},
    };

    use super::*;
    use crate::{
        config::{LayoutConfig, StyleConfig},
        edit::check_tree,
        element::ElementKind,
        render::tests::RecordingSurface,
    };

    fn editor() -> Editor {
        let layout = LayoutConfig::default().with_font(FontSpec::new("monospace", 20.0));
        Editor::new(AppConfig::new(layout, StyleConfig::default()))
    }

    fn measurer() -> MonospaceMeasurer {
        MonospaceMeasurer::new(0.5)
    }

    /// Builds "A" over "B ∧ C" and leaves "C" selected.
    fn two_rows() -> Editor {
        let mut editor = editor();
        editor.select_root();
        editor.set_text("A").unwrap();
        editor.insert(Direction::Below).unwrap();
        editor.set_text("B").unwrap();
        editor.insert(Direction::Right).unwrap();
        editor.set_text("C").unwrap();
        editor
    }

    #[test]
    fn test_new_editor_is_empty() {
        let editor = editor();
        assert!(editor.is_empty());
        assert!(editor.selected().is_none());
        assert_eq!(editor.checked_markup(), Err(Decline::EmptyDeduction));
        assert_eq!(
            editor.export_markup(),
            "$ \\vlgoodsyntax \\odframefalse \\bigstar $"
        );
    }

    #[test]
    fn test_operations_without_selection_decline() {
        let mut editor = editor();
        let declined = EditStatus::Declined(Decline::NoSelection);
        assert_eq!(editor.insert(Direction::Above).unwrap(), declined);
        assert_eq!(editor.remove(true).unwrap(), declined);
        assert_eq!(editor.copy(), declined);
        assert_eq!(editor.paste().unwrap(), declined);
        assert_eq!(editor.toggle_box().unwrap(), declined);
        assert_eq!(editor.set_text("x").unwrap(), declined);
        assert_eq!(editor.select_parent(), declined);
    }

    #[test]
    fn test_build_two_rows() {
        let editor = two_rows();
        assert_eq!(
            editor.export_markup(),
            "$ \\vlgoodsyntax \\odframefalse \\od{\\odi{\\odh{A}}{}{B \\vlan C}{}} $"
        );
        assert_eq!(editor.selected().unwrap().as_leaf().unwrap().text(), "C");
        assert!(check_tree(editor.root()).is_ok());
    }

    #[test]
    fn test_insert_selects_new_placeholder() {
        let mut editor = editor();
        editor.select_root();
        let old_root = editor.root().id();
        editor.insert(Direction::Left).unwrap();

        let selected = editor.selected().unwrap();
        assert!(selected.as_leaf().unwrap().is_placeholder());
        assert_ne!(selected.id(), old_root);
        assert!(selected.is_selected());
    }

    #[test]
    fn test_connective_declines_structural_edits() {
        let mut editor = two_rows();
        editor.select_parent();
        editor.select_connective(0);
        assert_eq!(editor.selected().unwrap().kind(), ElementKind::Connective);

        let na = EditStatus::Declined(Decline::NotApplicable);
        assert_eq!(editor.insert(Direction::Left).unwrap(), na);
        assert_eq!(editor.remove(true).unwrap(), na);
        assert_eq!(editor.set_text("x").unwrap(), na);
    }

    #[test]
    fn test_set_connective() {
        let mut editor = two_rows();
        editor.select_parent();
        editor.select_connective(0);
        assert!(editor.set_connective("log_or").unwrap().is_applied());
        assert!(editor.export_markup().contains("B \\vlor C"));

        let err = editor.set_connective("log_xor").unwrap_err();
        assert!(matches!(err, VlakeError::UnknownStyle(_)));
        assert!(editor.export_markup().contains("B \\vlor C"));
    }

    #[test]
    fn test_line_style_and_annotations() {
        let mut editor = two_rows();
        editor.select_root();
        editor.select_connective(0);
        editor.set_line_style(LineStyle::DoubleSolid).unwrap();
        editor.set_annotation(Side::Left, "R").unwrap();
        editor.set_annotation(Side::Right, "1").unwrap();
        assert_eq!(
            editor.export_markup(),
            "$ \\vlgoodsyntax \\odframefalse \\od{\\odI{\\odh{A}}{R}{B \\vlan C}{1}} $"
        );

        // A line is not a leaf
        assert_eq!(
            editor.set_text("x").unwrap(),
            EditStatus::Declined(Decline::NotApplicable)
        );
    }

    #[test]
    fn test_remove_join_needs_confirmation() {
        let mut editor = two_rows();
        editor.select_parent();
        assert_eq!(
            editor.remove(false).unwrap(),
            EditStatus::Declined(Decline::NeedsConfirmation)
        );
        assert!(editor.remove(true).unwrap().is_applied());

        // The column collapsed into its remaining row
        assert_eq!(editor.root().as_leaf().unwrap().text(), "A");
        assert!(editor.selected().is_none());
    }

    #[test]
    fn test_remove_leaf_collapses_row() {
        let mut editor = two_rows();
        assert!(editor.remove(false).unwrap().is_applied());
        assert_eq!(
            editor.export_markup(),
            "$ \\vlgoodsyntax \\odframefalse \\od{\\odi{\\odh{A}}{}{B}{}} $"
        );
    }

    #[test]
    fn test_remove_root_leaf_resets() {
        let mut editor = editor();
        editor.select_root();
        editor.set_text("A").unwrap();
        assert!(editor.remove(false).unwrap().is_applied());
        assert!(editor.is_empty());
    }

    #[test]
    fn test_copy_paste_gives_fresh_copies() {
        let mut editor = two_rows();
        editor.select_parent();
        editor.copy();
        editor.select_root();
        editor.select_child(0);
        assert!(editor.paste().unwrap().is_applied());
        let first = editor.selected_id().unwrap();

        editor.select_parent();
        editor.select_child(1);
        assert!(editor.paste().unwrap().is_applied());
        let second = editor.selected_id().unwrap();

        assert_ne!(first, second);
        assert_eq!(
            editor.export_markup(),
            "$ \\vlgoodsyntax \\odframefalse \\od{\\odi{\\odh{B \\vlan C}}{}{B \\vlan C}{}} $"
        );
        assert!(check_tree(editor.root()).is_ok());
    }

    #[test]
    fn test_paste_onto_root() {
        let mut editor = two_rows();
        editor.copy();
        editor.select_root();
        assert!(editor.paste().unwrap().is_applied());
        assert_eq!(editor.root().as_leaf().unwrap().text(), "C");
        assert_eq!(editor.selected_id(), Some(editor.root().id()));
    }

    #[test]
    fn test_copied_line_cannot_fill_a_child_slot() {
        let mut editor = two_rows();
        editor.select_root();
        editor.select_connective(0);
        assert!(editor.copy().is_applied());
        editor.select_parent();
        editor.select_child(0);
        let before = editor.export_markup();

        assert_eq!(
            editor.paste().unwrap(),
            EditStatus::Declined(Decline::NotApplicable)
        );
        assert_eq!(editor.export_markup(), before);
        assert!(check_tree(editor.root()).is_ok());
        assert!(editor.layout(&measurer()).is_ok());
    }

    #[test]
    fn test_copied_connective_cannot_replace_root() {
        let mut editor = two_rows();
        editor.select_parent();
        editor.select_connective(0);
        editor.copy();
        editor.select_root();

        assert_eq!(
            editor.paste().unwrap(),
            EditStatus::Declined(Decline::NotApplicable)
        );
        assert_eq!(editor.root().kind(), ElementKind::VerticalJoin);
        assert!(check_tree(editor.root()).is_ok());
        assert!(editor.layout(&measurer()).is_ok());
    }

    #[test]
    fn test_pasted_separator_restyles_same_kind() {
        let mut editor = two_rows();
        editor.select_parent();
        editor.select_connective(0);
        editor.set_connective("log_or").unwrap();
        editor.copy();

        editor.select_parent();
        editor.select_child(1);
        editor.insert(Direction::Right).unwrap();
        editor.set_text("D").unwrap();
        editor.select_parent();
        editor.select_connective(1);
        let target = editor.selected_id();
        assert!(editor.paste().unwrap().is_applied());
        assert_eq!(editor.selected_id(), target);
        assert_eq!(
            editor.export_markup(),
            "$ \\vlgoodsyntax \\odframefalse \\od{\\odi{\\odh{A}}{}{B \\vlor C \\vlor D}{}} $"
        );

        // A line does not restyle a connective
        editor.select_root();
        editor.select_connective(0);
        editor.copy();
        editor.select_parent();
        editor.select_child(1);
        editor.select_connective(0);
        assert_eq!(
            editor.paste().unwrap(),
            EditStatus::Declined(Decline::NotApplicable)
        );
        assert!(check_tree(editor.root()).is_ok());
    }

    #[test]
    fn test_pasted_line_carries_style_and_annotations() {
        let mut editor = two_rows();
        editor.select_parent();
        editor.insert(Direction::Below).unwrap();
        editor.set_text("E").unwrap();
        editor.select_parent();
        editor.select_connective(0);
        editor.set_line_style(LineStyle::SingleDotted).unwrap();
        editor.set_annotation(Side::Right, "R").unwrap();
        editor.copy();
        editor.select_parent();
        editor.select_connective(1);

        assert!(editor.paste().unwrap().is_applied());
        let line = editor.selected().unwrap().as_line().unwrap();
        assert_eq!(line.style(), LineStyle::SingleDotted);
        assert_eq!(line.annotation(Side::Right), "R");
        assert_eq!(line.annotation(Side::Left), "");
    }

    #[test]
    fn test_paste_with_empty_clipboard() {
        let mut editor = two_rows();
        assert_eq!(
            editor.paste().unwrap(),
            EditStatus::Declined(Decline::EmptyClipboard)
        );
    }

    #[test]
    fn test_toggle_box_only_on_joins() {
        let mut editor = two_rows();
        assert_eq!(
            editor.toggle_box().unwrap(),
            EditStatus::Declined(Decline::NotApplicable)
        );
        editor.select_parent();
        assert!(editor.toggle_box().unwrap().is_applied());
        assert!(editor.export_markup().contains("\\odbox{B \\vlan C}"));
    }

    #[test]
    fn test_select_parent_at_root() {
        let mut editor = two_rows();
        editor.select_root();
        assert_eq!(
            editor.select_parent(),
            EditStatus::Declined(Decline::NotApplicable)
        );
    }

    #[test]
    fn test_reset() {
        let mut editor = two_rows();
        assert_eq!(
            editor.reset(false),
            EditStatus::Declined(Decline::NeedsConfirmation)
        );
        assert!(editor.reset(true).is_applied());
        assert!(editor.is_empty());
        assert!(editor.selected().is_none());
        assert!(editor.reset(false).is_applied());
    }

    #[test]
    fn test_set_empty_text_restores_placeholder() {
        let mut editor = editor();
        editor.select_root();
        editor.set_text("P").unwrap();
        assert!(!editor.is_empty());
        editor.set_text("").unwrap();
        assert!(editor.is_empty());
    }

    #[test]
    fn test_click_requires_layout() {
        let mut editor = two_rows();
        assert!(matches!(
            editor.click(Point::new(400.0, 150.0)),
            Err(VlakeError::InvalidState(_))
        ));

        editor.layout(&measurer()).unwrap();
        // Outside everything clears the selection
        assert_eq!(editor.click(Point::new(1.0, 1.0)).unwrap(), None);
        assert!(editor.selected().is_none());
    }

    #[test]
    fn test_click_selects_leaf() {
        let mut editor = two_rows();
        editor.select(None);
        let bounds = editor.layout(&measurer()).unwrap();

        // "A" is the top row, centred horizontally
        let top = Point::new(bounds.center().x(), bounds.min_y() + 10.0);
        let hit = editor.click(top).unwrap().unwrap();
        assert_eq!(editor.selected().unwrap().id(), hit);
        assert_eq!(editor.selected().unwrap().as_leaf().unwrap().text(), "A");
    }

    #[test]
    fn test_edits_invalidate_layout() {
        let mut editor = two_rows();
        editor.layout(&measurer()).unwrap();
        assert!(editor.root().bounds().is_ok());

        editor.set_text("CC").unwrap();
        assert!(editor.root().bounds().is_err());
        let mut surface = RecordingSurface::default();
        assert!(editor.render(&mut surface).is_err());
    }

    #[test]
    fn test_render_draws_centre_mark_when_enabled() {
        let layout = LayoutConfig::default().with_font(FontSpec::new("monospace", 20.0));
        let style = StyleConfig::default().with_centre_mark(true);
        let mut editor = Editor::new(AppConfig::new(layout, style));
        editor.layout(&measurer()).unwrap();

        let mut surface = RecordingSurface::default();
        editor.render(&mut surface).unwrap();
        // Star, then two crosshair strokes
        assert_eq!(surface.calls.len(), 3);
    }

    #[test]
    fn test_render_svg() {
        let mut editor = two_rows();
        editor.layout(&measurer()).unwrap();
        let svg = editor.render_svg(&measurer()).unwrap();
        assert!(svg.starts_with("<svg"));
        // A, B, C and the connective
        assert_eq!(svg.matches("<text").count(), 4);
        // The selected leaf is highlighted
        let highlight = Color::new("#0000FF").unwrap().to_string();
        assert!(svg.contains(&highlight));
    }

    #[test]
    fn test_stale_selection_is_dropped() {
        let mut editor = two_rows();
        let c = editor.selected_id().unwrap();
        editor.select_root();
        editor.reset(true);
        assert!(editor.select(Some(c)) == EditStatus::Declined(Decline::NotApplicable));
        assert!(editor.selected().is_none());
    }
}
