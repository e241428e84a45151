//! Semantic model: symbol records, extraction, and the workspace index.
//!
//! The hir layer turns parsed syntax trees into [`Symbol`] records and
//! keeps them queryable across the workspace in a [`SymbolIndex`]. It also
//! owns the two pure helpers the records depend on: doc-comment extraction
//! and C-name mangling.

mod c_names;
mod docs;
mod extract;
mod index;
mod symbols;

pub use c_names::{C_TYPE_SUFFIXES, c_to_camel, camel_to_c, qualified_to_c, strip_c_suffix};
pub use docs::{doc_comment, field_doc_comment, trailing_doc_comment};
pub use extract::{extract_symbols, package_name};
pub use index::{SymbolId, SymbolIndex};
pub use symbols::{
    BUILTIN_TYPES, EnumValueSymbol, FieldSymbol, RpcSymbol, Symbol, SymbolKind, is_builtin,
};
