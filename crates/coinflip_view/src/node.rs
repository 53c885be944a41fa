//! Visual node tree
//!
//! The output of a render: plain data a host renderer walks to paint the coin.
//! Children are listed back to front.

use crate::motion::Motion;
use coinflip_core::{Blur, Gradient};
use serde::Serialize;

/// What a node paints
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// Transform-only group around the coin layers
    Container,
    /// Text symbol
    Glyph { symbol: String },
    /// Blurred gradient fill
    Glow { gradient: Gradient, blur: Blur },
}

/// One node of the rendered tree
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VisualNode {
    pub key: String,
    pub kind: NodeKind,
    pub motion: Motion,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<VisualNode>,
}

impl VisualNode {
    pub fn new(key: impl Into<String>, kind: NodeKind, motion: Motion) -> Self {
        Self {
            key: key.into(),
            kind,
            motion,
            children: Vec::new(),
        }
    }

    pub fn container(key: impl Into<String>, motion: Motion) -> Self {
        Self::new(key, NodeKind::Container, motion)
    }

    pub fn glyph(key: impl Into<String>, symbol: impl Into<String>, motion: Motion) -> Self {
        Self::new(
            key,
            NodeKind::Glyph {
                symbol: symbol.into(),
            },
            motion,
        )
    }

    pub fn glow(key: impl Into<String>, gradient: Gradient, blur: Blur, motion: Motion) -> Self {
        Self::new(key, NodeKind::Glow { gradient, blur }, motion)
    }

    /// Append a child (painted above earlier children)
    pub fn child(mut self, child: VisualNode) -> Self {
        self.children.push(child);
        self
    }

    /// Depth-first iterator over this node and its descendants
    pub fn iter(&self) -> NodeIter<'_> {
        NodeIter { stack: vec![self] }
    }

    /// First glyph node in the tree
    pub fn glyph_node(&self) -> Option<&VisualNode> {
        self.iter()
            .find(|n| matches!(n.kind, NodeKind::Glyph { .. }))
    }

    /// First glow node in the tree
    pub fn glow_node(&self) -> Option<&VisualNode> {
        self.iter().find(|n| matches!(n.kind, NodeKind::Glow { .. }))
    }

    /// Symbol of the first glyph node
    pub fn symbol(&self) -> Option<&str> {
        self.glyph_node().and_then(|n| match &n.kind {
            NodeKind::Glyph { symbol } => Some(symbol.as_str()),
            _ => None,
        })
    }

    /// Whether any node in the tree is animated
    pub fn has_animation(&self) -> bool {
        self.iter().any(|n| n.motion.is_animated())
    }
}

/// Depth-first, pre-order node iterator
pub struct NodeIter<'a> {
    stack: Vec<&'a VisualNode>,
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a VisualNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinflip_core::{Color, Point};

    fn sample_tree() -> VisualNode {
        VisualNode::container("c", Motion::None)
            .child(VisualNode::glow(
                "g",
                Gradient::radial(Point::new(0.5, 0.5), 0.5, Color::GOLD, Color::TRANSPARENT),
                Blur::new(24.0),
                Motion::None,
            ))
            .child(VisualNode::glyph("s", "H", Motion::None))
    }

    #[test]
    fn test_iter_pre_order() {
        let tree = sample_tree();
        let keys: Vec<&str> = tree.iter().map(|n| n.key.as_str()).collect();
        assert_eq!(keys, vec!["c", "g", "s"]);
    }

    #[test]
    fn test_lookups() {
        let tree = sample_tree();
        assert_eq!(tree.symbol(), Some("H"));
        assert_eq!(tree.glow_node().map(|n| n.key.as_str()), Some("g"));
        assert!(!tree.has_animation());
    }

    #[test]
    fn test_no_glyph() {
        let tree = VisualNode::container("c", Motion::None);
        assert_eq!(tree.symbol(), None);
        assert!(tree.glow_node().is_none());
    }
}
