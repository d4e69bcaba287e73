//! Virginia Lake markup export.
//!
//! Each element serializes itself recursively:
//!
//! - a leaf exports its markup override or its literal text, unescaped;
//! - a connective exports its macro;
//! - a horizontal join joins its children with ` <macro> `;
//! - a vertical join nests its rows into `\od{...}`, one inference step per
//!   line, using the line style's macro and its annotations.
//!
//! Boxed joins are wrapped in `\odbox{...}`.
//!
//! # Example
//!
//! ```
//! # use vlake::element::{Element, Join, Orientation};
//! # use vlake::markup::to_document;
//! let root = Element::join(Join::from_pair(
//!     Orientation::Vertical,
//!     Element::leaf("A"),
//!     Element::leaf("B"),
//! ));
//! assert_eq!(
//!     to_document(&root),
//!     "$ \\vlgoodsyntax \\odframefalse \\od{\\odi{\\odh{A}}{}{B}{}} $"
//! );
//! ```

use crate::element::{Element, Join, Node, Orientation, Side};

const DOCUMENT_PREAMBLE: &str = "\\vlgoodsyntax \\odframefalse";

/// Wraps the root's markup into an inline-math document fragment.
pub fn to_document(root: &Element) -> String {
    format!("$ {DOCUMENT_PREAMBLE} {} $", root.to_markup())
}

impl Element {
    /// Serializes this subtree.
    pub fn to_markup(&self) -> String {
        match self.node() {
            Node::Leaf(leaf) => leaf.to_markup().to_string(),
            Node::Connective(connective) => connective.markup().to_string(),
            // A line's markup only exists within its vertical join
            Node::Line(_) => String::new(),
            Node::Join(join) => join_markup(join),
        }
    }
}

fn join_markup(join: &Join) -> String {
    let markup = match join.orientation() {
        Orientation::Horizontal => row_markup(join),
        // Fewer than two rows export without a frame
        Orientation::Vertical => match join.children() {
            [] => return String::new(),
            [only] => return format!("\\od{{{}}}", only.to_markup()),
            _ => column_markup(join),
        },
    };
    if join.is_boxed() {
        format!("\\odbox{{{markup}}}")
    } else {
        markup
    }
}

fn row_markup(join: &Join) -> String {
    let mut markup = String::new();
    for (index, child) in join.children().iter().enumerate() {
        let gap = index.checked_sub(1);
        if let Some(connective) = gap.and_then(|gap| join.connectives().get(gap)) {
            markup.push(' ');
            markup.push_str(&connective.to_markup());
            markup.push(' ');
        }
        markup.push_str(&child.to_markup());
    }
    markup
}

fn column_markup(join: &Join) -> String {
    let Some((first, rest)) = join.children().split_first() else {
        return String::new();
    };

    let mut acc = format!("\\odh{{{}}}", first.to_markup());
    for (child, connective) in rest.iter().zip(join.connectives()) {
        let Some(line) = connective.as_line() else {
            continue;
        };
        acc = format!(
            "{}{{{acc}}}{{{}}}{{{}}}{{{}}}",
            line.style().markup_prefix(),
            line.annotation(Side::Left),
            child.to_markup(),
            line.annotation(Side::Right),
        );
    }
    format!("\\od{{{acc}}}")
}

#[cfg(test)]
mod tests {
    use vlake_core::draw::LineStyle;

    use super::*;

    fn row(texts: &[&str]) -> Element {
        Element::join(
            Join::from_children(
                Orientation::Horizontal,
                texts.iter().map(|text| Element::leaf(*text)).collect(),
            )
            .unwrap(),
        )
    }

    fn column(children: Vec<Element>) -> Element {
        Element::join(Join::from_children(Orientation::Vertical, children).unwrap())
    }

    #[test]
    fn test_placeholder_document() {
        let root = Element::default_leaf();
        assert_eq!(
            to_document(&root),
            "$ \\vlgoodsyntax \\odframefalse \\bigstar $"
        );
    }

    #[test]
    fn test_leaf_text_is_not_escaped() {
        let root = Element::leaf("A_1 & {B}");
        assert_eq!(root.to_markup(), "A_1 & {B}");
    }

    #[test]
    fn test_horizontal_join() {
        let mut root = row(&["A", "B", "C"]);
        root.as_join_mut().unwrap().connectives_mut()[1]
            .as_connective_mut()
            .unwrap()
            .set_symbol("log_or")
            .unwrap();
        assert_eq!(root.to_markup(), "A \\vlan B \\vlor C");

        root.as_join_mut().unwrap().set_boxed(true);
        assert_eq!(root.to_markup(), "\\odbox{A \\vlan B \\vlor C}");
    }

    #[test]
    fn test_vertical_join_single_child() {
        let root = Element::join(
            Join::from_children(Orientation::Vertical, vec![Element::leaf("A")]).unwrap(),
        );
        assert_eq!(root.to_markup(), "\\od{A}");

        let mut boxed = root;
        boxed.as_join_mut().unwrap().set_boxed(true);
        assert_eq!(boxed.to_markup(), "\\od{A}");
    }

    #[test]
    fn test_vertical_join_nests_steps() {
        let mut root = column(vec![
            Element::leaf("A"),
            Element::leaf("B"),
            Element::leaf("C"),
        ]);
        {
            let join = root.as_join_mut().unwrap();
            let first = join.connectives_mut()[0].as_line_mut().unwrap();
            first.set_annotation(Side::Left, "L");
            first.set_annotation(Side::Right, "R");
            join.connectives_mut()[1]
                .as_line_mut()
                .unwrap()
                .set_style(LineStyle::DoubleSolid);
        }
        assert_eq!(
            root.to_markup(),
            "\\od{\\odI{\\odi{\\odh{A}}{L}{B}{R}}{}{C}{}}"
        );
    }

    #[test]
    fn test_dotted_line_prefix() {
        let mut root = column(vec![Element::leaf("A"), Element::leaf("B")]);
        root.as_join_mut().unwrap().connectives_mut()[0]
            .as_line_mut()
            .unwrap()
            .set_style(LineStyle::SingleDotted);
        assert_eq!(root.to_markup(), "\\od{\\odo{\\odh{A}}{}{B}{}}");
    }

    #[test]
    fn test_boxed_vertical_join_inside_row() {
        let mut inner = column(vec![Element::leaf("A"), Element::leaf("B")]);
        inner.as_join_mut().unwrap().set_boxed(true);
        let root = Element::join(Join::from_pair(
            Orientation::Horizontal,
            inner,
            Element::default_leaf(),
        ));
        assert_eq!(
            root.to_markup(),
            "\\odbox{\\od{\\odi{\\odh{A}}{}{B}{}}} \\vlan \\bigstar"
        );
    }
}
