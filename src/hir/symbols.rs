//! Symbol records produced by extraction and stored in the index.

use std::fmt;

use smol_str::SmolStr;

use crate::base::{FileId, SourceRange};

/// Built-in IOP primitive types. Never indexed as references and never
/// resolvable as symbols.
pub const BUILTIN_TYPES: &[&str] = &[
    "int", "uint", "long", "ulong", "byte", "ubyte", "short", "ushort", "bool", "double", "bytes",
    "string", "xml", "void",
];

/// Check whether a type name is an IOP builtin.
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_TYPES.contains(&name)
}

/// Kind of a declared IOP symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Struct,
    Union,
    Class,
    Enum,
    Interface,
    Module,
    Typedef,
    SnmpObj,
    SnmpTbl,
    SnmpIface,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            SymbolKind::Struct => "struct",
            SymbolKind::Union => "union",
            SymbolKind::Class => "class",
            SymbolKind::Enum => "enum",
            SymbolKind::Interface => "interface",
            SymbolKind::Module => "module",
            SymbolKind::Typedef => "typedef",
            SymbolKind::SnmpObj => "snmpObj",
            SymbolKind::SnmpTbl => "snmpTbl",
            SymbolKind::SnmpIface => "snmpIface",
        };
        f.write_str(keyword)
    }
}

/// A field of a struct, union, class, SNMP object/table, or module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSymbol {
    pub name: SmolStr,
    /// Referenced type name; `None` for builtin-typed fields.
    pub type_ref: Option<SmolStr>,
    /// `?`, `&`, or `[]` when present.
    pub specifier: Option<SmolStr>,
    /// Raw default-value text as written, `=` included.
    pub default_value: Option<SmolStr>,
    pub range: SourceRange,
    pub doc: Option<String>,
}

/// One value of an enum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumValueSymbol {
    pub name: SmolStr,
    /// Explicit literal with the leading `=` stripped, when present.
    pub value: Option<SmolStr>,
    pub range: SourceRange,
    pub doc: Option<String>,
}

/// One rpc of an interface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RpcSymbol {
    pub name: SmolStr,
    /// Single declared-type reference; `None` for inline argument lists,
    /// `void`, `null`, or builtins.
    pub in_type: Option<SmolStr>,
    pub out_type: Option<SmolStr>,
    pub throw_type: Option<SmolStr>,
    pub range: SourceRange,
    pub doc: Option<String>,
}

/// A top-level declared symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    /// Simple name, e.g. `LogLevel`.
    pub name: SmolStr,
    /// Package-qualified name, e.g. `core.LogLevel`. Globally unique.
    pub qualified_name: SmolStr,
    pub kind: SymbolKind,
    /// File the symbol is declared in.
    pub file: FileId,
    /// Range of the declared name token.
    pub range: SourceRange,
    pub doc: Option<String>,
    /// Package of the declaring file.
    pub package: SmolStr,
    /// For classes: the extended parent class, when declared.
    pub parent_class: Option<SmolStr>,
    /// Explicit `@ctype(...)` override of the generated C name.
    pub ctype: Option<SmolStr>,
    pub fields: Vec<FieldSymbol>,
    pub enum_values: Vec<EnumValueSymbol>,
    pub rpcs: Vec<RpcSymbol>,
    /// For typedefs: the aliased source type text.
    pub typedef_source: Option<SmolStr>,
}

impl Symbol {
    /// Create a symbol with no children; extraction fills the rest in.
    pub fn new(
        name: SmolStr,
        qualified_name: SmolStr,
        kind: SymbolKind,
        file: FileId,
        range: SourceRange,
        package: SmolStr,
    ) -> Self {
        Self {
            name,
            qualified_name,
            kind,
            file,
            range,
            doc: None,
            package,
            parent_class: None,
            ctype: None,
            fields: Vec::new(),
            enum_values: Vec::new(),
            rpcs: Vec::new(),
            typedef_source: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins() {
        assert!(is_builtin("int"));
        assert!(is_builtin("void"));
        assert!(!is_builtin("LogLevel"));
        assert!(!is_builtin("core.LogLevel"));
    }

    #[test]
    fn test_kind_display_uses_iop_keywords() {
        assert_eq!(SymbolKind::Struct.to_string(), "struct");
        assert_eq!(SymbolKind::SnmpObj.to_string(), "snmpObj");
        assert_eq!(SymbolKind::SnmpIface.to_string(), "snmpIface");
    }
}
