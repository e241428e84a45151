//! Cursor position classification.
//!
//! Given a parsed tree and a byte offset, find the identifier under the
//! cursor and decide what syntactic role it plays. Classification looks
//! only at the token's own kind and its parent/grandparent node kinds; it
//! is total (everything else is [`RefContext::Unknown`]) and has no side
//! effects.

use rowan::TokenAtOffset;
use smol_str::SmolStr;
use text_size::TextSize;

use crate::syntax::{SyntaxKind, SyntaxNode, SyntaxToken, ident_tokens};

/// The syntactic role of the identifier under a cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefContext {
    /// A use of a type name: field type, class parent, rpc payload, or the
    /// interface type of a module entry.
    TypeRef,
    /// A use of an enum value inside a default value.
    EnumValueRef,
    /// The declared name of a field.
    FieldName,
    /// The declared name of an enum value.
    EnumValueDef,
    /// The declared name of a type definition.
    TypeDef,
    /// The declared name of an rpc.
    RpcName,
    /// Anything else.
    Unknown,
}

/// An identifier under the cursor with its classified role and the text to
/// resolve it by.
#[derive(Clone, Debug)]
pub struct Classified {
    pub token: SyntaxToken,
    pub context: RefContext,
    /// Resolution text: the full (possibly dotted) referenced name.
    pub lookup: SmolStr,
}

/// Classify the token at `offset`.
///
/// Returns `None` when no token covers the position; a covered token that
/// plays no recognized role classifies as [`RefContext::Unknown`].
pub fn classify(root: &SyntaxNode, offset: TextSize) -> Option<Classified> {
    if offset > root.text_range().end() {
        return None;
    }

    let token = match root.token_at_offset(offset) {
        TokenAtOffset::None => return None,
        TokenAtOffset::Single(t) => t,
        // On a boundary, prefer the identifier.
        TokenAtOffset::Between(left, right) => {
            if right.kind() == SyntaxKind::Ident {
                right
            } else if left.kind() == SyntaxKind::Ident {
                left
            } else {
                right
            }
        }
    };

    let lookup = SmolStr::new(token.text());
    let context = classify_token(&token);
    Some(Classified {
        token,
        context,
        lookup,
    })
}

fn classify_token(token: &SyntaxToken) -> RefContext {
    if token.kind() != SyntaxKind::Ident {
        return RefContext::Unknown;
    }
    let Some(parent) = token.parent() else {
        return RefContext::Unknown;
    };
    let grandparent = parent.parent();

    match parent.kind() {
        // Field or typedef type, and the single-type payload of rpc clauses.
        SyntaxKind::Type => RefContext::TypeRef,
        // Parent class and rpc clause references keep a bare identifier.
        SyntaxKind::ClassParent | SyntaxKind::RpcIn | SyntaxKind::RpcOut | SyntaxKind::RpcThrow => {
            RefContext::TypeRef
        }
        // The first of a module entry's two identifiers is the interface
        // type; the second is the instance name.
        SyntaxKind::ModuleField => {
            let idents = ident_tokens(&parent);
            if idents.first() == Some(token) {
                RefContext::TypeRef
            } else {
                RefContext::Unknown
            }
        }
        SyntaxKind::Value => RefContext::EnumValueRef,
        _ if grandparent
            .as_ref()
            .is_some_and(|gp| gp.kind() == SyntaxKind::DefaultValue) =>
        {
            RefContext::EnumValueRef
        }
        // An identifier directly under a variable is its declared name;
        // the type's identifier sits inside the Type child.
        SyntaxKind::Variable => RefContext::FieldName,
        SyntaxKind::EnumValue => RefContext::EnumValueDef,
        SyntaxKind::Rpc => RefContext::RpcName,
        kind if kind.is_definition() => RefContext::TypeDef,
        _ => RefContext::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use crate::syntax::parse;

    use super::*;

    /// Classify at the byte offset of `needle`'s first occurrence.
    fn classify_at(source: &str, needle: &str) -> Classified {
        let pos = source.find(needle).expect("needle not in source");
        let root = parse(source).syntax();
        // Land inside the token, not on its boundary.
        classify(&root, TextSize::from((pos + 1) as u32)).expect("no token at position")
    }

    const SOURCE: &str = "\
package foo;
enum Level {
    LOW = 0,
    HIGH = 1,
};
struct LoggerConf {
    Level level = LOW;
    int verbosity;
};
class Child : 2 : Base {};
interface Svc {
    call in Req out void;
};
module Mod {
    Svc svc;
};
";

    #[test]
    fn test_field_type_is_type_ref() {
        let c = classify_at(SOURCE, "Level level");
        assert_eq!(c.context, RefContext::TypeRef);
        assert_eq!(c.lookup, "Level");
    }

    #[test]
    fn test_builtin_type_still_classifies_as_type_ref() {
        let c = classify_at(SOURCE, "int verbosity");
        assert_eq!(c.context, RefContext::TypeRef);
        assert_eq!(c.lookup, "int");
    }

    #[test]
    fn test_field_name() {
        let c = classify_at(SOURCE, "verbosity");
        assert_eq!(c.context, RefContext::FieldName);
    }

    #[test]
    fn test_enum_value_reference_in_default() {
        let c = classify_at(SOURCE, "LOW;");
        assert_eq!(c.context, RefContext::EnumValueRef);
        assert_eq!(c.lookup, "LOW");
    }

    #[test]
    fn test_enum_value_definition() {
        let c = classify_at(SOURCE, "HIGH");
        assert_eq!(c.context, RefContext::EnumValueDef);
    }

    #[test]
    fn test_type_definition_name() {
        let c = classify_at(SOURCE, "LoggerConf");
        assert_eq!(c.context, RefContext::TypeDef);
    }

    #[test]
    fn test_class_parent_is_type_ref() {
        let c = classify_at(SOURCE, "Base");
        assert_eq!(c.context, RefContext::TypeRef);
    }

    #[test]
    fn test_rpc_name_and_payload() {
        assert_eq!(classify_at(SOURCE, "call").context, RefContext::RpcName);
        assert_eq!(classify_at(SOURCE, "Req").context, RefContext::TypeRef);
    }

    #[test]
    fn test_module_field_identifiers() {
        assert_eq!(classify_at(SOURCE, "Svc svc").context, RefContext::TypeRef);
        assert_eq!(classify_at(SOURCE, "svc;").context, RefContext::Unknown);
    }

    #[test]
    fn test_keyword_is_unknown() {
        assert_eq!(classify_at(SOURCE, "struct").context, RefContext::Unknown);
    }

    #[test]
    fn test_offset_past_end() {
        let root = parse("package foo;").syntax();
        assert!(classify(&root, TextSize::from(9999)).is_none());
    }
}
