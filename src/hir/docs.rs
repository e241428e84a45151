//! Doc-comment extraction from syntax trees.
//!
//! IOP documentation uses C-style markers: `/** ... */` immediately before
//! a declaration documents it, while `/**< ... */` on the same line after a
//! member documents that member. `/*** ... */` banners are decoration and
//! belong to nobody.

use rowan::NodeOrToken;

use crate::syntax::{SyntaxKind, SyntaxNode, next_sibling_or_token, prev_sibling_or_token};

/// Doc comment preceding a declaration node.
///
/// Walks backward over whitespace and attribute siblings, then requires a
/// block comment starting with `/**` but not `/***` (banner) or `/**<`
/// (trailing doc of the previous item).
pub fn doc_comment(node: &SyntaxNode) -> Option<String> {
    let mut candidate = node.prev_sibling_or_token();
    while let Some(el) = candidate {
        match &el {
            NodeOrToken::Token(t) if t.kind() == SyntaxKind::Whitespace => {
                candidate = prev_sibling_or_token(&el);
            }
            NodeOrToken::Node(n) if n.kind() == SyntaxKind::Attribute => {
                candidate = prev_sibling_or_token(&el);
            }
            NodeOrToken::Token(t) if t.kind() == SyntaxKind::Comment => {
                let text = t.text();
                if text.starts_with("/**")
                    && !text.starts_with("/***")
                    && !text.starts_with("/**<")
                {
                    return Some(clean_doc_comment(text));
                }
                return None;
            }
            _ => return None,
        }
    }
    None
}

/// Trailing doc comment (`/**< ... */`) after a member, on the same line.
///
/// Walks forward over separators and line-local whitespace; a newline or
/// the next item node ends the search.
pub fn trailing_doc_comment(node: &SyntaxNode) -> Option<String> {
    let mut candidate = node.next_sibling_or_token();
    while let Some(el) = candidate {
        match &el {
            NodeOrToken::Token(t) if t.kind() == SyntaxKind::Whitespace => {
                if t.text().contains('\n') {
                    return None;
                }
            }
            NodeOrToken::Token(t) if t.kind() == SyntaxKind::Comment => {
                let text = t.text();
                if text.starts_with("/**<") {
                    return Some(clean_trailing_doc_comment(text));
                }
                return None;
            }
            NodeOrToken::Token(t)
                if matches!(t.kind(), SyntaxKind::Comma | SyntaxKind::Semicolon) => {}
            _ => return None,
        }
        candidate = next_sibling_or_token(&el);
    }
    None
}

/// Doc for a field or enum value: preceding `/** */` first, then trailing
/// `/**< */`.
pub fn field_doc_comment(node: &SyntaxNode) -> Option<String> {
    doc_comment(node).or_else(|| trailing_doc_comment(node))
}

/// Strip `/**` ... `*/` delimiters and per-line `*` gutters.
fn clean_doc_comment(text: &str) -> String {
    let text = text.strip_prefix("/**").unwrap_or(text);
    let text = text.strip_suffix("*/").unwrap_or(text);

    let cleaned: Vec<&str> = text
        .lines()
        .map(|line| {
            let line = line.trim();
            line.strip_prefix("* ")
                .or_else(|| line.strip_prefix('*'))
                .unwrap_or(line)
        })
        .collect();

    cleaned.join("\n").trim().to_string()
}

/// Strip `/**<` ... `*/` delimiters.
fn clean_trailing_doc_comment(text: &str) -> String {
    let text = text.strip_prefix("/**<").unwrap_or(text);
    let text = text.strip_suffix("*/").unwrap_or(text);
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use crate::syntax::{SyntaxKind, child_of_kind, parse};

    use super::*;

    fn first_def(source: &str, kind: SyntaxKind) -> SyntaxNode {
        let root = parse(source).syntax();
        child_of_kind(&root, kind).expect("definition not found")
    }

    #[test]
    fn test_preceding_doc() {
        let def = first_def(
            "package foo;\n/** A test struct. */\nstruct Documented {};",
            SyntaxKind::StructureDef,
        );
        assert_eq!(doc_comment(&def).as_deref(), Some("A test struct."));
    }

    #[test]
    fn test_multiline_doc() {
        let def = first_def(
            "package foo;\n/** Configuration of a specific logger.\n */\nstruct LoggerConfig {};",
            SyntaxKind::StructureDef,
        );
        assert_eq!(
            doc_comment(&def).as_deref(),
            Some("Configuration of a specific logger.")
        );
    }

    #[test]
    fn test_gutter_lines_are_stripped() {
        let def = first_def(
            "package foo;\n/** First line.\n * Second line.\n */\nstruct S {};",
            SyntaxKind::StructureDef,
        );
        assert_eq!(doc_comment(&def).as_deref(), Some("First line.\nSecond line."));
    }

    #[test]
    fn test_banner_and_trailing_markers_rejected() {
        let banner = first_def("package foo;\n/*** banner */\nstruct S {};", SyntaxKind::StructureDef);
        assert_eq!(doc_comment(&banner), None);

        let trailing = first_def(
            "package foo;\n/**< stray */\nstruct S {};",
            SyntaxKind::StructureDef,
        );
        assert_eq!(doc_comment(&trailing), None);
    }

    #[test]
    fn test_doc_skips_attributes() {
        // The comment sits before the attribute, which the parser folds
        // into the definition; the walk must still find it.
        let def = first_def(
            "package foo;\n/** Doc. */\n@ctype(s__t)\nstruct S {};",
            SyntaxKind::StructureDef,
        );
        assert_eq!(doc_comment(&def).as_deref(), Some("Doc."));
    }

    #[test]
    fn test_trailing_doc_on_enum_value() {
        let root = parse("package foo;\nenum Level {\n    LOW = 0, /**< low level */\n};").syntax();
        let def = child_of_kind(&root, SyntaxKind::EnumDef).unwrap();
        let body = child_of_kind(&def, SyntaxKind::EnumBody).unwrap();
        let value = child_of_kind(&body, SyntaxKind::EnumValue).unwrap();
        assert_eq!(trailing_doc_comment(&value).as_deref(), Some("low level"));
    }

    #[test]
    fn test_trailing_doc_requires_same_line() {
        let root = parse("package foo;\nenum Level {\n    LOW = 0,\n    /**< not mine */ HIGH,\n};")
            .syntax();
        let def = child_of_kind(&root, SyntaxKind::EnumDef).unwrap();
        let body = child_of_kind(&def, SyntaxKind::EnumBody).unwrap();
        let low = child_of_kind(&body, SyntaxKind::EnumValue).unwrap();
        assert_eq!(trailing_doc_comment(&low), None);
    }

    #[test]
    fn test_field_doc_prefers_preceding() {
        let root = parse(
            "package foo;\nstruct S {\n    /** Preceding. */\n    int x; /**< trailing */\n};",
        )
        .syntax();
        let def = child_of_kind(&root, SyntaxKind::StructureDef).unwrap();
        let body = child_of_kind(&def, SyntaxKind::StructureBody).unwrap();
        let field = child_of_kind(&body, SyntaxKind::Field).unwrap();
        assert_eq!(field_doc_comment(&field).as_deref(), Some("Preceding."));
    }
}
