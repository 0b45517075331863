//! Generic syntax tree view.
//!
//! Every typed AST node converts into a [`SyntaxNode`]: a stable snake_case
//! `kind`, a span, an optional value (identifier name, literal text, operator
//! or keyword) and an insertion-ordered map from field name to children.
//! Generic tooling walks this view instead of matching on the typed AST.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt::Write;

use crate::ast::Span;

mod builder;

/// One node of the generic syntax tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyntaxNode {
    pub kind: &'static str,
    pub span: Span,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub fields: IndexMap<&'static str, Vec<SyntaxNode>>,
}

/// Conversion from typed AST nodes
pub trait ToSyntaxNode {
    fn to_syntax_node(&self) -> SyntaxNode;
}

impl<T: ToSyntaxNode> ToSyntaxNode for Box<T> {
    fn to_syntax_node(&self) -> SyntaxNode {
        (**self).to_syntax_node()
    }
}

impl SyntaxNode {
    pub fn new(kind: &'static str, span: Span) -> Self {
        Self {
            kind,
            span,
            value: None,
            fields: IndexMap::new(),
        }
    }

    /// Leaf node carrying only a value
    pub fn leaf(kind: &'static str, span: Span, value: impl Into<String>) -> Self {
        Self::new(kind, span).with_value(value)
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_optional_value(mut self, value: Option<impl Into<String>>) -> Self {
        self.value = value.map(Into::into);
        self
    }

    /// Append an already-built node to `field`
    pub fn push(mut self, field: &'static str, node: SyntaxNode) -> Self {
        self.fields.entry(field).or_default().push(node);
        self
    }

    pub fn child(self, field: &'static str, node: &impl ToSyntaxNode) -> Self {
        self.push(field, node.to_syntax_node())
    }

    pub fn optional<T: ToSyntaxNode>(self, field: &'static str, node: Option<&T>) -> Self {
        match node {
            Some(node) => self.child(field, node),
            None => self,
        }
    }

    pub fn children<'n, T: ToSyntaxNode + 'n>(
        mut self,
        field: &'static str,
        nodes: impl IntoIterator<Item = &'n T>,
    ) -> Self {
        for node in nodes {
            self = self.child(field, node);
        }
        self
    }

    /// Tuple slots under `field`, keeping their positions
    ///
    /// A vacant slot becomes a zero-width `empty` node right after the
    /// previous slot (or at the start of the tuple).
    pub fn slots<'n, T: ToSyntaxNode + 'n>(
        mut self,
        field: &'static str,
        slots: impl IntoIterator<Item = &'n Option<T>>,
    ) -> Self {
        let mut cursor = Span::with_positions(
            self.span.start,
            self.span.start,
            self.span.start_position,
            self.span.start_position,
        );
        for slot in slots {
            let node = match slot {
                Some(node) => node.to_syntax_node(),
                None => SyntaxNode::new("empty", cursor),
            };
            cursor = node.span.after();
            self = self.push(field, node);
        }
        self
    }

    /// Children stored under `field` (empty when absent)
    pub fn field(&self, field: &str) -> &[SyntaxNode] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First child stored under `field`
    pub fn first(&self, field: &str) -> Option<&SyntaxNode> {
        self.field(field).first()
    }

    /// All children across fields, sorted by source position
    pub fn child_nodes(&self) -> Vec<&SyntaxNode> {
        let mut nodes: Vec<&SyntaxNode> = self.fields.values().flatten().collect();
        nodes.sort_by_key(|node| (node.span.start, node.span.end));
        nodes
    }

    pub fn is_error(&self) -> bool {
        self.kind == "error"
    }

    /// Source text covered by this node
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        self.span.text(source)
    }

    /// Depth-first pre-order traversal
    pub fn walk<'n>(&'n self, visit: &mut impl FnMut(&'n SyntaxNode)) {
        visit(self);
        for node in self.fields.values().flatten() {
            node.walk(visit);
        }
    }

    pub fn find_all(&self, kind: &str) -> Vec<&SyntaxNode> {
        let mut found = Vec::new();
        self.walk(&mut |node| {
            if node.kind == kind {
                found.push(node);
            }
        });
        found
    }

    /// Render as a tree-sitter style S-expression
    ///
    /// `(binary_expression "+" left: (identifier "a") right: (number_literal "1"))`
    pub fn to_sexp(&self) -> String {
        let mut out = String::new();
        self.write_sexp(&mut out);
        out
    }

    fn write_sexp(&self, out: &mut String) {
        out.push('(');
        out.push_str(self.kind);
        if let Some(value) = &self.value {
            // Debug formatting quotes and escapes the value
            let _ = write!(out, " {:?}", value);
        }
        for (field, nodes) in &self.fields {
            for node in nodes {
                out.push(' ');
                out.push_str(field);
                out.push_str(": ");
                node.write_sexp(out);
            }
        }
        out.push(')');
    }
}
