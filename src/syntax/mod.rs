//! Syntax trees for IOP source.
//!
//! The tree is a rowan lossless green/red tree: every byte of the input,
//! comments and whitespace included, appears as a token. Higher layers
//! (doc-comment extraction, position classification) rely on trivia being
//! real siblings in the tree.

mod kind;
mod lexer;
mod parser;

pub use kind::SyntaxKind;
pub use parser::{Parse, SyntaxError, parse};

use rowan::Language;

/// Rowan [`Language`] instance tying [`SyntaxKind`] to the raw tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IopLanguage {}

impl Language for IopLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> SyntaxKind {
        SyntaxKind::from_raw(raw.0)
    }

    fn kind_to_raw(kind: SyntaxKind) -> rowan::SyntaxKind {
        rowan::SyntaxKind(kind as u16)
    }
}

pub type SyntaxNode = rowan::SyntaxNode<IopLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<IopLanguage>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;

/// First child node of the given kind.
pub fn child_of_kind(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    node.children().find(|n| n.kind() == kind)
}

/// All child nodes of the given kind, in source order.
pub fn children_of_kind(node: &SyntaxNode, kind: SyntaxKind) -> Vec<SyntaxNode> {
    node.children().filter(|n| n.kind() == kind).collect()
}

/// First direct identifier token of a node.
///
/// Direct means not nested inside a child node, so for a `Variable` this
/// finds the declared name, not the identifier inside its `Type` child.
pub fn first_ident(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|el| el.into_token())
        .find(|t| t.kind() == SyntaxKind::Ident)
}

/// All direct identifier tokens of a node, in source order.
pub fn ident_tokens(node: &SyntaxNode) -> Vec<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|el| el.into_token())
        .filter(|t| t.kind() == SyntaxKind::Ident)
        .collect()
}

/// Previous sibling element (node or token) of an element.
pub fn prev_sibling_or_token(el: &SyntaxElement) -> Option<SyntaxElement> {
    match el {
        rowan::NodeOrToken::Node(n) => n.prev_sibling_or_token(),
        rowan::NodeOrToken::Token(t) => t.prev_sibling_or_token(),
    }
}

/// Next sibling element (node or token) of an element.
pub fn next_sibling_or_token(el: &SyntaxElement) -> Option<SyntaxElement> {
    match el {
        rowan::NodeOrToken::Node(n) => n.next_sibling_or_token(),
        rowan::NodeOrToken::Token(t) => t.next_sibling_or_token(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_ident_skips_nested() {
        let root = parse("package foo;\nstruct S { int count; };").syntax();
        let def = child_of_kind(&root, SyntaxKind::StructureDef).unwrap();
        assert_eq!(first_ident(&def).unwrap().text(), "S");

        let body = child_of_kind(&def, SyntaxKind::StructureBody).unwrap();
        let field = child_of_kind(&body, SyntaxKind::Field).unwrap();
        let var = child_of_kind(&field, SyntaxKind::Variable).unwrap();
        // The type's identifier is nested inside the Type node; the
        // variable's own first identifier is the field name.
        assert_eq!(first_ident(&var).unwrap().text(), "count");
    }

    #[test]
    fn test_kind_round_trip_through_rowan() {
        let raw = IopLanguage::kind_to_raw(SyntaxKind::EnumDef);
        assert_eq!(IopLanguage::kind_from_raw(raw), SyntaxKind::EnumDef);
    }
}
