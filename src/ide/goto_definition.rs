//! Go-to-definition.

use text_size::TextSize;

use crate::base::{FileId, SourceRange};
use crate::hir::SymbolIndex;
use crate::syntax::{SyntaxKind, SyntaxNode, child_of_kind};

use super::position::{RefContext, classify};

/// A definition site: the owning file and the range of the declared name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    pub file: FileId,
    pub range: SourceRange,
}

/// Find the definition referenced at `offset` in `file`.
///
/// Type references resolve to the declared type; enum-value references to
/// the declaring value; a field's own name jumps to the field's type.
/// Everything else (builtins included) yields `None`.
pub fn goto_definition(
    index: &SymbolIndex,
    root: &SyntaxNode,
    file: FileId,
    offset: TextSize,
) -> Option<Location> {
    let classified = classify(root, offset)?;
    let current_package = index.package_of_file(file);

    match classified.context {
        RefContext::TypeRef => {
            let symbol = index.resolve(&classified.lookup, current_package)?;
            Some(Location {
                file: symbol.file,
                range: symbol.range,
            })
        }
        RefContext::EnumValueRef => {
            let (owner, value) = index.resolve_enum_value(&classified.lookup, current_package)?;
            Some(Location {
                file: owner.file,
                range: value.range,
            })
        }
        RefContext::FieldName => {
            // Jump to the declaration of the field's type.
            let variable = classified.token.parent()?;
            if variable.kind() != SyntaxKind::Variable {
                return None;
            }
            let ty = child_of_kind(&variable, SyntaxKind::Type)?;
            let symbol = index.resolve(&ty.text().to_string(), current_package)?;
            Some(Location {
                file: symbol.file,
                range: symbol.range,
            })
        }
        RefContext::EnumValueDef
        | RefContext::TypeDef
        | RefContext::RpcName
        | RefContext::Unknown => None,
    }
}
