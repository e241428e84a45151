//! Per-file symbol extraction from parsed syntax trees.

use smol_str::SmolStr;

use crate::base::{FileId, LineIndex, SourceRange};
use crate::syntax::{
    SyntaxKind, SyntaxNode, SyntaxToken, child_of_kind, children_of_kind, first_ident,
    ident_tokens,
};

use super::docs::{doc_comment, field_doc_comment};
use super::symbols::{EnumValueSymbol, FieldSymbol, RpcSymbol, Symbol, SymbolKind, is_builtin};

/// Package declared at the top of a file, e.g. `tstiop` or `test.dso`.
pub fn package_name(root: &SyntaxNode) -> Option<SmolStr> {
    let package_def = child_of_kind(root, SyntaxKind::PackageDef)?;
    let ident = first_ident(&package_def)?;
    Some(SmolStr::new(ident.text()))
}

/// Extract every recognizable top-level symbol of a parsed file.
///
/// A declaration with an unrecognized kind or a missing name yields no
/// symbol; its siblings are extracted regardless.
pub fn extract_symbols(
    file: FileId,
    root: &SyntaxNode,
    package: &str,
    line_index: &LineIndex,
) -> Vec<Symbol> {
    root.children()
        .filter_map(|node| extract_symbol(file, &node, package, line_index))
        .collect()
}

fn extract_symbol(
    file: FileId,
    node: &SyntaxNode,
    package: &str,
    line_index: &LineIndex,
) -> Option<Symbol> {
    let kind = match node.kind() {
        SyntaxKind::StructureDef => structure_kind(node)?,
        SyntaxKind::ClassDef => SymbolKind::Class,
        SyntaxKind::EnumDef => SymbolKind::Enum,
        SyntaxKind::InterfaceDef => SymbolKind::Interface,
        SyntaxKind::ModuleDef => SymbolKind::Module,
        SyntaxKind::TypedefDef => SymbolKind::Typedef,
        SyntaxKind::SnmpObjDef => SymbolKind::SnmpObj,
        SyntaxKind::SnmpTblDef => SymbolKind::SnmpTbl,
        SyntaxKind::SnmpIfaceDef => SymbolKind::SnmpIface,
        _ => return None,
    };

    // For typedefs the declared name sits inside the variable wrapper.
    let name_token = if kind == SymbolKind::Typedef {
        first_ident(&child_of_kind(node, SyntaxKind::Variable)?)?
    } else {
        first_ident(node)?
    };

    let name = SmolStr::new(name_token.text());
    let qualified_name = SmolStr::new(format!("{package}.{name}"));

    let mut symbol = Symbol::new(
        name,
        qualified_name,
        kind,
        file,
        token_range(&name_token, line_index),
        SmolStr::new(package),
    );
    symbol.doc = doc_comment(node);
    symbol.ctype = extract_ctype(node);

    if kind == SymbolKind::Class {
        for parent in children_of_kind(node, SyntaxKind::ClassParent) {
            if let Some(ident) = first_ident(&parent) {
                symbol.parent_class = Some(SmolStr::new(ident.text()));
            }
        }
    }

    match kind {
        SymbolKind::Struct
        | SymbolKind::Union
        | SymbolKind::Class
        | SymbolKind::SnmpObj
        | SymbolKind::SnmpTbl => {
            if let Some(body) = child_of_kind(node, SyntaxKind::StructureBody) {
                symbol.fields = extract_fields(&body, line_index);
            }
        }
        SymbolKind::Enum => {
            if let Some(body) = child_of_kind(node, SyntaxKind::EnumBody) {
                symbol.enum_values = extract_enum_values(&body, line_index);
            }
        }
        SymbolKind::Interface => {
            if let Some(block) = child_of_kind(node, SyntaxKind::RpcBlock) {
                symbol.rpcs = extract_rpcs(&block, line_index);
            }
        }
        SymbolKind::Module => {
            if let Some(body) = child_of_kind(node, SyntaxKind::ModuleBody) {
                symbol.fields = extract_module_fields(&body, line_index);
            }
        }
        SymbolKind::Typedef => {
            if let Some(var) = child_of_kind(node, SyntaxKind::Variable) {
                if let Some(ty) = child_of_kind(&var, SyntaxKind::Type) {
                    symbol.typedef_source = Some(node_text(&ty));
                }
            }
        }
        SymbolKind::SnmpIface => {}
    }

    Some(symbol)
}

/// struct vs union, decided by the definition's keyword token.
fn structure_kind(node: &SyntaxNode) -> Option<SymbolKind> {
    node.children_with_tokens()
        .filter_map(|el| el.into_token())
        .find_map(|t| match t.kind() {
            SyntaxKind::StructKw => Some(SymbolKind::Struct),
            SyntaxKind::UnionKw => Some(SymbolKind::Union),
            _ => None,
        })
}

/// Value of a `@ctype(...)` attribute on a definition, when present.
fn extract_ctype(node: &SyntaxNode) -> Option<SmolStr> {
    for attr in children_of_kind(node, SyntaxKind::Attribute) {
        let is_ctype = first_ident(&attr).is_some_and(|t| t.text() == "ctype");
        if !is_ctype {
            continue;
        }
        let args = child_of_kind(&attr, SyntaxKind::AttributeArgs)?;
        let text = node_text(&args);
        let inner = text
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')')
            .trim();
        return Some(SmolStr::new(inner));
    }
    None
}

fn extract_fields(body: &SyntaxNode, line_index: &LineIndex) -> Vec<FieldSymbol> {
    let mut fields = Vec::new();
    for field_node in children_of_kind(body, SyntaxKind::Field) {
        let Some(var) = child_of_kind(&field_node, SyntaxKind::Variable) else {
            continue;
        };
        let type_node = child_of_kind(&var, SyntaxKind::Type);
        let specifier = child_of_kind(&var, SyntaxKind::TypeSpecifier);
        let default = child_of_kind(&var, SyntaxKind::DefaultValue);
        let name_token = first_ident(&var);

        let type_text = type_node.as_ref().map(node_text);
        let type_ref = type_text.filter(|t| !is_builtin(t));

        fields.push(FieldSymbol {
            name: name_token
                .as_ref()
                .map(|t| SmolStr::new(t.text()))
                .unwrap_or_default(),
            type_ref,
            specifier: specifier.as_ref().map(node_text),
            default_value: default.as_ref().map(node_text),
            range: name_or_node_range(name_token.as_ref(), &field_node, line_index),
            doc: field_doc_comment(&field_node),
        });
    }
    fields
}

fn extract_enum_values(body: &SyntaxNode, line_index: &LineIndex) -> Vec<EnumValueSymbol> {
    let mut values = Vec::new();
    for value_node in children_of_kind(body, SyntaxKind::EnumValue) {
        let name_token = first_ident(&value_node);
        let default = child_of_kind(&value_node, SyntaxKind::DefaultValue);

        // `= 0` -> `0`.
        let value = default.as_ref().map(|d| {
            let text = node_text(d);
            SmolStr::new(text.trim_start_matches(['=', ' ']).trim())
        });

        values.push(EnumValueSymbol {
            name: name_token
                .as_ref()
                .map(|t| SmolStr::new(t.text()))
                .unwrap_or_default(),
            value,
            range: name_or_node_range(name_token.as_ref(), &value_node, line_index),
            doc: field_doc_comment(&value_node),
        });
    }
    values
}

fn extract_rpcs(block: &SyntaxNode, line_index: &LineIndex) -> Vec<RpcSymbol> {
    let mut rpcs = Vec::new();
    for rpc_node in children_of_kind(block, SyntaxKind::Rpc) {
        let name_token = first_ident(&rpc_node);

        rpcs.push(RpcSymbol {
            name: name_token
                .as_ref()
                .map(|t| SmolStr::new(t.text()))
                .unwrap_or_default(),
            in_type: rpc_type_ref(&rpc_node, SyntaxKind::RpcIn),
            out_type: rpc_type_ref(&rpc_node, SyntaxKind::RpcOut),
            throw_type: rpc_type_ref(&rpc_node, SyntaxKind::RpcThrow),
            range: name_or_node_range(name_token.as_ref(), &rpc_node, line_index),
            doc: doc_comment(&rpc_node),
        });
    }
    rpcs
}

/// Single-type reference of an rpc clause. Inline argument lists, builtins,
/// `void`, and `null` yield no reference.
fn rpc_type_ref(rpc_node: &SyntaxNode, clause_kind: SyntaxKind) -> Option<SmolStr> {
    let clause = child_of_kind(rpc_node, clause_kind)?;
    if child_of_kind(&clause, SyntaxKind::ArgList).is_some() {
        return None;
    }
    let ty = child_of_kind(&clause, SyntaxKind::Type)?;
    let text = node_text(&ty);
    if is_builtin(&text) || text == "null" || text == "void" {
        return None;
    }
    Some(text)
}

/// Module entries: `<InterfaceType> <instanceName>;`.
fn extract_module_fields(body: &SyntaxNode, line_index: &LineIndex) -> Vec<FieldSymbol> {
    let mut fields = Vec::new();
    for entry in children_of_kind(body, SyntaxKind::ModuleField) {
        let idents = ident_tokens(&entry);
        if idents.len() < 2 {
            continue;
        }
        let type_id = &idents[0];
        let name_id = &idents[1];
        fields.push(FieldSymbol {
            name: SmolStr::new(name_id.text()),
            type_ref: Some(SmolStr::new(type_id.text())),
            specifier: None,
            default_value: None,
            range: token_range(name_id, line_index),
            doc: field_doc_comment(&entry),
        });
    }
    fields
}

fn node_text(node: &SyntaxNode) -> SmolStr {
    SmolStr::new(node.text().to_string())
}

fn token_range(token: &SyntaxToken, line_index: &LineIndex) -> SourceRange {
    line_index.source_range(token.text_range())
}

fn name_or_node_range(
    name: Option<&SyntaxToken>,
    node: &SyntaxNode,
    line_index: &LineIndex,
) -> SourceRange {
    match name {
        Some(token) => token_range(token, line_index),
        None => line_index.source_range(node.text_range()),
    }
}

#[cfg(test)]
mod tests {
    use crate::syntax::parse;

    use super::*;

    fn extract(source: &str) -> Vec<Symbol> {
        let parse = parse(source);
        let root = parse.syntax();
        let line_index = LineIndex::new(source);
        let package = package_name(&root).expect("test source must declare a package");
        extract_symbols(FileId::new(0), &root, &package, &line_index)
    }

    #[test]
    fn test_struct_fields() {
        let symbols = extract("package foo;\nstruct MyStruct {\n    int x;\n    string? name;\n};");
        assert_eq!(symbols.len(), 1);
        let sym = &symbols[0];
        assert_eq!(sym.kind, SymbolKind::Struct);
        assert_eq!(sym.qualified_name, "foo.MyStruct");
        assert_eq!(sym.fields.len(), 2);
        assert_eq!(sym.fields[0].name, "x");
        assert_eq!(sym.fields[0].type_ref, None); // int is builtin
        assert_eq!(sym.fields[1].name, "name");
        assert_eq!(sym.fields[1].specifier.as_deref(), Some("?"));
    }

    #[test]
    fn test_union() {
        let symbols = extract("package foo;\nunion U {\n    int a;\n    string b;\n};");
        assert_eq!(symbols[0].kind, SymbolKind::Union);
    }

    #[test]
    fn test_field_type_reference() {
        let symbols = extract(
            "package foo;\nenum Color { RED, };\nstruct Painted {\n    Color color;\n    int count;\n};",
        );
        let painted = &symbols[1];
        assert_eq!(painted.fields[0].type_ref.as_deref(), Some("Color"));
        assert_eq!(painted.fields[1].type_ref, None);
    }

    #[test]
    fn test_field_default_kept_verbatim() {
        let symbols = extract("package foo;\nstruct S {\n    int x = 3;\n};");
        assert_eq!(symbols[0].fields[0].default_value.as_deref(), Some("= 3"));
    }

    #[test]
    fn test_enum_values() {
        let symbols =
            extract("package foo;\nenum Color {\n    RED = 0,\n    GREEN = 1,\n    BLUE = 2,\n};");
        let sym = &symbols[0];
        assert_eq!(sym.kind, SymbolKind::Enum);
        assert_eq!(sym.enum_values.len(), 3);
        assert_eq!(sym.enum_values[0].name, "RED");
        assert_eq!(sym.enum_values[0].value.as_deref(), Some("0"));
        assert_eq!(sym.enum_values[2].name, "BLUE");
    }

    #[test]
    fn test_enum_trailing_docs() {
        let symbols = extract(
            "package foo;\nenum Level {\n    LOW = 0, /**< low level */\n    HIGH = 1, /**< high level */\n};",
        );
        let sym = &symbols[0];
        assert_eq!(sym.enum_values[0].doc.as_deref(), Some("low level"));
        assert_eq!(sym.enum_values[1].doc.as_deref(), Some("high level"));
    }

    #[test]
    fn test_class_inheritance() {
        let symbols = extract(
            "package foo;\nclass Base : 1 {\n    int x;\n};\nclass Child : 2 : Base {\n    int y;\n};",
        );
        assert_eq!(symbols[0].parent_class, None); // class id is not a parent
        assert_eq!(symbols[1].parent_class.as_deref(), Some("Base"));
    }

    #[test]
    fn test_interface_rpc_type_refs() {
        let symbols = extract(
            "package foo;\nstruct Req {};\nstruct Resp {};\nstruct Err {};\n\
             interface Svc {\n    call\n        in Req\n        out Resp\n        throw Err;\n};",
        );
        let svc = &symbols[3];
        assert_eq!(svc.kind, SymbolKind::Interface);
        let rpc = &svc.rpcs[0];
        assert_eq!(rpc.name, "call");
        assert_eq!(rpc.in_type.as_deref(), Some("Req"));
        assert_eq!(rpc.out_type.as_deref(), Some("Resp"));
        assert_eq!(rpc.throw_type.as_deref(), Some("Err"));
    }

    #[test]
    fn test_rpc_arg_list_and_void_yield_no_refs() {
        let symbols = extract(
            "package foo;\ninterface Svc {\n    doStuff\n        in (int x)\n        out void;\n};",
        );
        let rpc = &symbols[0].rpcs[0];
        assert_eq!(rpc.name, "doStuff");
        assert_eq!(rpc.in_type, None);
        assert_eq!(rpc.out_type, None);
        assert_eq!(rpc.throw_type, None);
    }

    #[test]
    fn test_module_fields() {
        let symbols = extract("package foo;\ninterface Log {};\nmodule Mod {\n    Log log;\n};");
        let module = &symbols[1];
        assert_eq!(module.kind, SymbolKind::Module);
        assert_eq!(module.fields.len(), 1);
        assert_eq!(module.fields[0].name, "log");
        assert_eq!(module.fields[0].type_ref.as_deref(), Some("Log"));
    }

    #[test]
    fn test_typedef() {
        let symbols = extract("package foo;\ntypedef int[] IntArray;");
        let sym = &symbols[0];
        assert_eq!(sym.kind, SymbolKind::Typedef);
        assert_eq!(sym.name, "IntArray");
        assert_eq!(sym.typedef_source.as_deref(), Some("int"));
    }

    #[test]
    fn test_ctype_attribute() {
        let symbols = extract("package foo;\n@ctype(http_code__t)\ntypedef int HttpCode;");
        assert_eq!(symbols[0].ctype.as_deref(), Some("http_code__t"));
    }

    #[test]
    fn test_doc_comment_on_definition() {
        let symbols = extract("package foo;\n/** A test struct. */\nstruct Documented {};");
        assert_eq!(symbols[0].doc.as_deref(), Some("A test struct."));
    }

    #[test]
    fn test_missing_name_skips_declaration_only() {
        let parse = parse("package foo;\nstruct {\n    int x;\n};\nstruct Ok {};");
        let root = parse.syntax();
        let line_index = LineIndex::new("package foo;\nstruct {\n    int x;\n};\nstruct Ok {};");
        let symbols = extract_symbols(FileId::new(0), &root, "foo", &line_index);
        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols[0].name, "Ok");
    }

    #[test]
    fn test_symbol_range_covers_name() {
        let symbols = extract("package foo;\nstruct Bar {};");
        let range = symbols[0].range;
        assert_eq!(range.start.line, 1);
        assert_eq!(range.start.col, 7);
        assert_eq!(range.end.col, 10);
    }

    #[test]
    fn test_dotted_package() {
        let source = "package sub.b;\nenum Bar { X, };";
        let root = parse(source).syntax();
        assert_eq!(package_name(&root).as_deref(), Some("sub.b"));
    }
}
