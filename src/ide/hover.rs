//! Hover text rendering.
//!
//! Hover results are markdown strings built from resolved symbols, enum
//! values, or the field under the cursor. The formatting mirrors what the
//! editor shows in its hover popup; no protocol types leak in here.

use text_size::TextSize;

use crate::base::FileId;
use crate::hir::{EnumValueSymbol, Symbol, SymbolIndex, SymbolKind, field_doc_comment, is_builtin};
use crate::syntax::{SyntaxKind, SyntaxNode, child_of_kind};

use super::position::{Classified, RefContext, classify};

/// Build hover text for the position at `offset` in `file`.
pub fn hover(
    index: &SymbolIndex,
    root: &SyntaxNode,
    file: FileId,
    offset: TextSize,
) -> Option<String> {
    let classified = classify(root, offset)?;
    let current_package = index.package_of_file(file);

    match classified.context {
        RefContext::TypeRef => {
            if is_builtin(&classified.lookup) {
                return Some(format!("**{}** (built-in type)", classified.lookup));
            }
            let symbol = index.resolve(&classified.lookup, current_package)?;
            Some(format_symbol(symbol))
        }
        RefContext::EnumValueRef => {
            let (owner, value) = index.resolve_enum_value(&classified.lookup, current_package)?;
            Some(format_enum_value(owner, value))
        }
        RefContext::FieldName => format_field(&classified),
        RefContext::EnumValueDef => {
            let (owner, value) = index.resolve_enum_value(&classified.lookup, current_package)?;
            Some(format_enum_value(owner, value))
        }
        RefContext::TypeDef => {
            let qualified = match current_package {
                Some(pkg) => format!("{pkg}.{}", classified.lookup),
                None => classified.lookup.to_string(),
            };
            let symbol = index.by_qualified_name(&qualified)?;
            Some(format_symbol(symbol))
        }
        RefContext::RpcName | RefContext::Unknown => None,
    }
}

/// Render a symbol header, package, doc, and a short member summary.
pub fn format_symbol(symbol: &Symbol) -> String {
    let mut parts: Vec<String> = Vec::new();

    let mut header = format!("**{} {}**", symbol.kind, symbol.name);
    if symbol.kind == SymbolKind::Class {
        if let Some(parent) = &symbol.parent_class {
            header.push_str(&format!(" : {parent}"));
        }
    }
    if symbol.kind == SymbolKind::Typedef {
        if let Some(source) = &symbol.typedef_source {
            header = format!("**typedef** {source} → **{}**", symbol.name);
        }
    }
    parts.push(header);
    parts.push(format!("*(package: {})*", symbol.package));

    if let Some(doc) = &symbol.doc {
        parts.push(String::new());
        parts.push(doc.clone());
    }

    if !symbol.enum_values.is_empty() {
        parts.push(String::new());
        parts.push("```iop".to_string());
        for value in &symbol.enum_values {
            match &value.value {
                Some(v) => parts.push(format!("  {} = {v},", value.name)),
                None => parts.push(format!("  {},", value.name)),
            }
        }
        parts.push("```".to_string());
    } else if !symbol.fields.is_empty() && symbol.fields.len() <= 10 {
        parts.push(String::new());
        parts.push("```iop".to_string());
        for field in &symbol.fields {
            let type_str = field.type_ref.as_deref().unwrap_or("builtin");
            let spec = field.specifier.as_deref().unwrap_or("");
            parts.push(format!("  {type_str}{spec} {};", field.name));
        }
        parts.push("```".to_string());
    }

    parts.join("\n")
}

/// Render an enum value with its owning enum and doc.
pub fn format_enum_value(owner: &Symbol, value: &EnumValueSymbol) -> String {
    let mut parts: Vec<String> = Vec::new();
    match &value.value {
        Some(v) => parts.push(format!("**{}** = {v}", value.name)),
        None => parts.push(format!("**{}**", value.name)),
    }
    parts.push(format!("*(enum {})*", owner.qualified_name));
    if let Some(doc) = &value.doc {
        parts.push(String::new());
        parts.push(doc.clone());
    }
    parts.join("\n")
}

/// Render a field from its syntax node: name, type, default, and doc.
fn format_field(classified: &Classified) -> Option<String> {
    let variable = classified.token.parent()?;
    if variable.kind() != SyntaxKind::Variable {
        return None;
    }

    let type_text = child_of_kind(&variable, SyntaxKind::Type)
        .map(|n| n.text().to_string())
        .unwrap_or_else(|| "?".to_string());
    let spec_text = child_of_kind(&variable, SyntaxKind::TypeSpecifier)
        .map(|n| n.text().to_string())
        .unwrap_or_default();

    let mut header = format!("**{}** ({type_text}{spec_text})", classified.lookup);
    if let Some(default) = child_of_kind(&variable, SyntaxKind::DefaultValue) {
        header.push_str(&format!(" {}", default.text()));
    }

    let mut parts = vec![header];
    if let Some(field_node) = variable.parent().filter(|p| p.kind() == SyntaxKind::Field) {
        if let Some(doc) = field_doc_comment(&field_node) {
            parts.push(String::new());
            parts.push(doc);
        }
    }

    Some(parts.join("\n"))
}
