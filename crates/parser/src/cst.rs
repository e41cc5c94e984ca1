// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

use crate::tag::{RuleTag, tag_name};
use itertools::Itertools;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::borrow::Cow;
use std::slice;

/// Source span of one matched region: a zero-copy view into the input buffer
/// plus the byte offset of its first byte and the line/column where the match
/// started. Node lifetimes are tied to the buffer's.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CSTSpan<'a> {
    pub(crate) text: &'a [u8],
    pub(crate) start: usize,
    pub(crate) line: usize,
    pub(crate) column: usize,
}

impl<'a> CSTSpan<'a> {
    /// Byte offset of the first matched byte within the input buffer.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset one past the last matched byte.
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Line number (1-based) of the first matched byte.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Column number (0-based) of the first matched byte.
    pub fn column(&self) -> usize {
        self.column
    }

    /// The matched bytes themselves.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.text
    }

    /// The matched bytes as text. Invalid UTF-8 is replaced, not rejected;
    /// the engine itself is byte-oriented.
    pub fn text(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.text)
    }
}

/// One node of a concrete syntax tree: the rule that produced it, the exact
/// span it matched, and its children in input order. Only named rules produce
/// nodes, so the nesting of a tree mirrors exactly the naming structure of
/// the grammar.
///
/// Nodes are immutable once built; they move into their parent (or out of the
/// driver, for the root) and are cloned only by the memo table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CSTNode<'a> {
    pub tag: RuleTag,
    pub span: CSTSpan<'a>,
    pub children: Vec<CSTNode<'a>>,
}

impl<'a> CSTNode<'a> {
    pub(crate) fn new(tag: RuleTag, span: CSTSpan<'a>, children: Vec<CSTNode<'a>>) -> Self {
        Self {
            tag,
            span,
            children,
        }
    }

    /// Tag of the rule that produced this node.
    pub fn tag(&self) -> RuleTag {
        self.tag
    }

    /// Declared name of the rule that produced this node.
    pub fn name(&self) -> Option<&'static str> {
        tag_name(self.tag)
    }

    pub fn span(&self) -> &CSTSpan<'a> {
        &self.span
    }

    pub fn start(&self) -> usize {
        self.span.start()
    }

    pub fn end(&self) -> usize {
        self.span.end()
    }

    pub fn line(&self) -> usize {
        self.span.line()
    }

    pub fn column(&self) -> usize {
        self.span.column()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.span.as_bytes()
    }

    pub fn text(&self) -> Cow<'a, str> {
        self.span.text()
    }

    pub fn children(&self) -> &[CSTNode<'a>] {
        &self.children
    }

    pub fn iter(&self) -> slice::Iter<'_, CSTNode<'a>> {
        self.children.iter()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// All nodes of this subtree in pre-order, this node first.
    pub fn find_all(&self) -> Vec<&CSTNode<'a>> {
        let mut nodes = Vec::new();
        self.find_all_recursive(&mut nodes);
        nodes
    }

    fn find_all_recursive<'n>(&'n self, nodes: &mut Vec<&'n CSTNode<'a>>) {
        nodes.push(self);
        for child in &self.children {
            child.find_all_recursive(nodes);
        }
    }

    /// Reconstruct the source text this subtree matched. Spans are contiguous
    /// views into the buffer, so this is just the node's own span.
    pub fn to_source(&self) -> Cow<'a, str> {
        self.text()
    }

    /// Render the tree structure for debugging, one node per line.
    pub fn pretty_print(&self, indent: usize) -> String {
        let indent_str = "  ".repeat(indent);
        let name = self.name().unwrap_or("<no rule>");
        if self.is_leaf() {
            format!(
                "{indent_str}{name} [{}:{}] {:?}",
                self.start(),
                self.end(),
                self.text()
            )
        } else {
            let head = format!("{indent_str}{name} [{}:{}]", self.start(), self.end());
            let body = self
                .children
                .iter()
                .map(|child| child.pretty_print(indent + 1))
                .join("\n");
            format!("{head}\n{body}")
        }
    }
}

impl Serialize for CSTNode<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("CSTNode", 6)?;
        state.serialize_field("rule", &self.name())?;
        state.serialize_field("start", &self.start())?;
        state.serialize_field("end", &self.end())?;
        state.serialize_field("line", &self.line())?;
        state.serialize_field("column", &self.column())?;
        if self.is_leaf() {
            state.serialize_field("text", &self.text())?;
        } else {
            state.serialize_field("children", &self.children)?;
        }
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::NO_RULE;

    fn leaf(buf: &[u8], start: usize, len: usize) -> CSTNode<'_> {
        CSTNode::new(
            NO_RULE,
            CSTSpan {
                text: &buf[start..start + len],
                start,
                line: 1,
                column: start,
            },
            vec![],
        )
    }

    #[test]
    fn span_accessors() {
        let buf = b"hello world";
        let node = leaf(buf, 6, 5);
        assert_eq!(node.start(), 6);
        assert_eq!(node.end(), 11);
        assert_eq!(node.as_bytes(), b"world");
        assert_eq!(node.text(), "world");
        assert_eq!(node.to_source(), "world");
        assert!(node.is_leaf());
        assert!(!node.span().is_empty());
    }

    #[test]
    fn find_all_is_preorder() {
        let buf = b"abc";
        let root = CSTNode::new(
            NO_RULE,
            CSTSpan {
                text: buf,
                start: 0,
                line: 1,
                column: 0,
            },
            vec![leaf(buf, 0, 1), leaf(buf, 1, 2)],
        );
        let all = root.find_all();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].end(), 3);
        assert_eq!(all[1].as_bytes(), b"a");
        assert_eq!(all[2].as_bytes(), b"bc");
    }

    #[test]
    fn pretty_print_nests() {
        let buf = b"ab";
        let root = CSTNode::new(
            NO_RULE,
            CSTSpan {
                text: buf,
                start: 0,
                line: 1,
                column: 0,
            },
            vec![leaf(buf, 0, 1)],
        );
        let printed = root.pretty_print(0);
        assert!(printed.contains("[0:2]"));
        assert!(printed.contains("\n  "));
    }
}
