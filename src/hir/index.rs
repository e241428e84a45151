//! The workspace-wide symbol index.
//!
//! Symbols live in one canonical slot arena; every other view (simple
//! name, qualified name, package, file, C name) maps to [`SymbolId`]s.
//! All removal funnels through a single `unlink` routine so that a symbol
//! leaves every view exactly once and the views can never drift apart.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::FileId;

use super::c_names::{qualified_to_c, strip_c_suffix};
use super::symbols::{EnumValueSymbol, Symbol, SymbolKind, is_builtin};

/// Stable identifier of a symbol inside a [`SymbolIndex`].
///
/// Ids are slot indices and may be reused after the owning file is
/// re-indexed; holding one across mutations is not meaningful.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SymbolId(u32);

/// Index of all IOP symbols in the workspace.
#[derive(Debug, Default)]
pub struct SymbolIndex {
    /// The single source of truth for all symbols.
    slots: Vec<Option<Symbol>>,
    /// Free slot indices, reused by later insertions.
    free: Vec<u32>,
    /// Simple name → ids, in insertion order (may span packages).
    by_name: FxHashMap<SmolStr, Vec<SymbolId>>,
    /// `pkg.Name` → id. Last write wins on collisions.
    by_qualified_name: FxHashMap<SmolStr, SymbolId>,
    /// Package name → ids, in insertion order.
    by_package: FxHashMap<SmolStr, Vec<SymbolId>>,
    /// Owning file → ids; drives removal.
    by_file: FxHashMap<FileId, Vec<SymbolId>>,
    /// Generated C base name → id (plus `@ctype` override entries).
    by_c_name: FxHashMap<SmolStr, SymbolId>,
    /// Package declared by each indexed file.
    package_of_file: FxHashMap<FileId, SmolStr>,
}

impl SymbolIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a file's symbols: the file's previous symbol set is removed
    /// from every view, then the new set is inserted.
    pub fn add_file(&mut self, file: FileId, package: Option<SmolStr>, symbols: Vec<Symbol>) {
        self.remove_file(file);

        if let Some(package) = package {
            self.package_of_file.insert(file, package);
        }

        let mut file_ids = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            file_ids.push(self.insert(symbol));
        }
        if !file_ids.is_empty() {
            self.by_file.insert(file, file_ids);
        }
    }

    /// Remove every symbol owned by a file. A no-op for files that were
    /// never indexed.
    pub fn remove_file(&mut self, file: FileId) {
        self.package_of_file.remove(&file);
        let Some(ids) = self.by_file.remove(&file) else {
            return;
        };
        for id in ids {
            self.unlink(id);
        }
    }

    /// Resolve a type reference to its declaration.
    ///
    /// Builtins never resolve. A dotted name is tried as an exact
    /// qualified name first, then split at the last dot and searched in
    /// that package's bucket (covering multi-segment packages). A simple
    /// name prefers a match in `current_package`, then falls back to the
    /// first candidate in insertion order.
    pub fn resolve(&self, name: &str, current_package: Option<&str>) -> Option<&Symbol> {
        if is_builtin(name) {
            return None;
        }

        if name.contains('.') {
            if let Some(&id) = self.by_qualified_name.get(name) {
                return self.get(id);
            }
            let (pkg, type_name) = name.rsplit_once('.')?;
            return self
                .by_package
                .get(pkg)?
                .iter()
                .filter_map(|&id| self.get(id))
                .find(|sym| sym.name == type_name);
        }

        let candidates = self.by_name.get(name)?;
        let first = candidates.first().and_then(|&id| self.get(id))?;
        if candidates.len() == 1 {
            return Some(first);
        }
        if let Some(pkg) = current_package {
            for &id in candidates {
                if let Some(sym) = self.get(id) {
                    if sym.package == pkg {
                        return Some(sym);
                    }
                }
            }
        }
        Some(first)
    }

    /// Resolve an enum value reference like `LOG_LEVEL_DEFAULT`.
    ///
    /// Enums of `current_package` are scanned first; on failure every enum
    /// in the workspace is scanned in arena order.
    pub fn resolve_enum_value(
        &self,
        value_name: &str,
        current_package: Option<&str>,
    ) -> Option<(&Symbol, &EnumValueSymbol)> {
        if let Some(pkg) = current_package {
            if let Some(ids) = self.by_package.get(pkg) {
                for symbol in ids.iter().filter_map(|&id| self.get(id)) {
                    if let Some(found) = self.enum_value_in(symbol, value_name) {
                        return Some(found);
                    }
                }
            }
        }
        for symbol in self.slots.iter().flatten() {
            if let Some(found) = self.enum_value_in(symbol, value_name) {
                return Some(found);
            }
        }
        None
    }

    /// Resolve a generated C identifier like `tstiop__my_struct_a__t` back
    /// to its IOP declaration.
    pub fn resolve_c_name(&self, c_ident: &str) -> Option<&Symbol> {
        let base = strip_c_suffix(c_ident);
        self.by_c_name.get(base).and_then(|&id| self.get(id))
    }

    /// Look up a symbol by exact qualified name.
    pub fn by_qualified_name(&self, qualified_name: &str) -> Option<&Symbol> {
        self.by_qualified_name
            .get(qualified_name)
            .and_then(|&id| self.get(id))
    }

    /// Package declared by an indexed file.
    pub fn package_of_file(&self, file: FileId) -> Option<&str> {
        self.package_of_file.get(&file).map(SmolStr::as_str)
    }

    /// All symbols owned by a file, in declaration order.
    pub fn symbols_in_file(&self, file: FileId) -> Vec<&Symbol> {
        self.by_file
            .get(&file)
            .map(|ids| ids.iter().filter_map(|&id| self.get(id)).collect())
            .unwrap_or_default()
    }

    /// All symbols in the index, in arena order.
    pub fn all_symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.slots.iter().flatten()
    }

    /// Total number of symbols.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Check if the index holds no symbols.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of files contributing symbols.
    pub fn file_count(&self) -> usize {
        self.by_file.len()
    }

    fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.slots.get(id.0 as usize).and_then(Option::as_ref)
    }

    /// Insert one symbol into the arena and every derived view.
    fn insert(&mut self, symbol: Symbol) -> SymbolId {
        let c_name = qualified_to_c(&symbol.qualified_name);
        let ctype_base = symbol
            .ctype
            .as_ref()
            .map(|c| SmolStr::new(strip_c_suffix(c)));
        let name = symbol.name.clone();
        let qualified = symbol.qualified_name.clone();
        let package = symbol.package.clone();

        let id = match self.free.pop() {
            Some(slot) => {
                self.slots[slot as usize] = Some(symbol);
                SymbolId(slot)
            }
            None => {
                self.slots.push(Some(symbol));
                SymbolId((self.slots.len() - 1) as u32)
            }
        };

        self.by_name.entry(name).or_default().push(id);
        self.by_qualified_name.insert(qualified, id);
        self.by_package.entry(package).or_default().push(id);
        self.by_c_name.insert(c_name, id);
        if let Some(base) = ctype_base {
            self.by_c_name.insert(base, id);
        }

        id
    }

    /// Remove one symbol from every derived view and free its slot.
    ///
    /// A qualified-name or C-name entry is removed only while it still
    /// points at this symbol, so re-indexing the loser of a collision
    /// cannot evict the winner.
    fn unlink(&mut self, id: SymbolId) {
        let Some(symbol) = self.slots.get_mut(id.0 as usize).and_then(Option::take) else {
            return;
        };

        if let Some(bucket) = self.by_name.get_mut(&symbol.name) {
            bucket.retain(|&other| other != id);
            if bucket.is_empty() {
                self.by_name.remove(&symbol.name);
            }
        }

        if self.by_qualified_name.get(&symbol.qualified_name) == Some(&id) {
            self.by_qualified_name.remove(&symbol.qualified_name);
        }

        if let Some(bucket) = self.by_package.get_mut(&symbol.package) {
            bucket.retain(|&other| other != id);
            if bucket.is_empty() {
                self.by_package.remove(&symbol.package);
            }
        }

        let c_name = qualified_to_c(&symbol.qualified_name);
        if self.by_c_name.get(&c_name) == Some(&id) {
            self.by_c_name.remove(&c_name);
        }
        if let Some(ctype) = &symbol.ctype {
            let base = strip_c_suffix(ctype);
            if self.by_c_name.get(base) == Some(&id) {
                self.by_c_name.remove(base);
            }
        }

        self.free.push(id.0);
    }

    fn enum_value_in<'a>(
        &self,
        symbol: &'a Symbol,
        value_name: &str,
    ) -> Option<(&'a Symbol, &'a EnumValueSymbol)> {
        if symbol.kind != SymbolKind::Enum {
            return None;
        }
        symbol
            .enum_values
            .iter()
            .find(|v| v.name == value_name)
            .map(|v| (symbol, v))
    }
}

#[cfg(test)]
mod tests {
    use crate::base::SourceRange;

    use super::*;

    fn symbol(package: &str, name: &str, kind: SymbolKind, file: u32) -> Symbol {
        Symbol::new(
            SmolStr::new(name),
            SmolStr::new(format!("{package}.{name}")),
            kind,
            FileId::new(file),
            SourceRange::default(),
            SmolStr::new(package),
        )
    }

    fn enum_symbol(package: &str, name: &str, values: &[&str], file: u32) -> Symbol {
        let mut sym = symbol(package, name, SymbolKind::Enum, file);
        sym.enum_values = values
            .iter()
            .map(|v| EnumValueSymbol {
                name: SmolStr::new(*v),
                value: None,
                range: SourceRange::default(),
                doc: None,
            })
            .collect();
        sym
    }

    #[test]
    fn test_resolve_simple_and_qualified() {
        let mut index = SymbolIndex::new();
        index.add_file(
            FileId::new(0),
            Some(SmolStr::new("foo")),
            vec![symbol("foo", "Bar", SymbolKind::Struct, 0)],
        );

        assert_eq!(index.resolve("Bar", Some("foo")).unwrap().name, "Bar");
        assert_eq!(
            index.resolve("foo.Bar", None).unwrap().qualified_name,
            "foo.Bar"
        );
        assert_eq!(index.resolve("Missing", None), None);
    }

    #[test]
    fn test_builtins_never_resolve() {
        let mut index = SymbolIndex::new();
        index.add_file(
            FileId::new(0),
            Some(SmolStr::new("foo")),
            vec![symbol("foo", "int", SymbolKind::Struct, 0)],
        );
        assert_eq!(index.resolve("int", Some("foo")), None);
    }

    #[test]
    fn test_resolve_prefers_current_package() {
        let mut index = SymbolIndex::new();
        index.add_file(
            FileId::new(0),
            Some(SmolStr::new("foo")),
            vec![symbol("foo", "Common", SymbolKind::Struct, 0)],
        );
        index.add_file(
            FileId::new(1),
            Some(SmolStr::new("bar")),
            vec![symbol("bar", "Common", SymbolKind::Struct, 1)],
        );

        assert_eq!(index.resolve("Common", Some("bar")).unwrap().package, "bar");
        // No package match: first candidate in insertion order.
        assert_eq!(index.resolve("Common", Some("baz")).unwrap().package, "foo");
        assert_eq!(index.resolve("Common", None).unwrap().package, "foo");
    }

    #[test]
    fn test_resolve_multi_segment_package() {
        let mut index = SymbolIndex::new();
        index.add_file(
            FileId::new(0),
            Some(SmolStr::new("test.dso")),
            vec![symbol("test.dso", "ClassDso", SymbolKind::Class, 0)],
        );

        assert!(index.resolve("test.dso.ClassDso", None).is_some());
    }

    #[test]
    fn test_reindex_replaces_never_accumulates() {
        let mut index = SymbolIndex::new();
        let file = FileId::new(0);
        index.add_file(
            file,
            Some(SmolStr::new("foo")),
            vec![symbol("foo", "A", SymbolKind::Struct, 0)],
        );
        assert!(index.by_qualified_name("foo.A").is_some());

        index.add_file(
            file,
            Some(SmolStr::new("foo")),
            vec![symbol("foo", "B", SymbolKind::Struct, 0)],
        );
        assert!(index.by_qualified_name("foo.A").is_none());
        assert!(index.by_qualified_name("foo.B").is_some());
        assert_eq!(index.resolve("A", Some("foo")), None);
        assert_eq!(index.resolve_c_name("foo__a"), None);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_remove_file_prunes_all_views() {
        let mut index = SymbolIndex::new();
        let file = FileId::new(0);
        index.add_file(
            file,
            Some(SmolStr::new("foo")),
            vec![enum_symbol("foo", "Level", &["LOW"], 0)],
        );

        index.remove_file(file);
        assert!(index.is_empty());
        assert_eq!(index.resolve("Level", Some("foo")), None);
        assert_eq!(index.resolve("foo.Level", None), None);
        assert_eq!(index.resolve_enum_value("LOW", Some("foo")), None);
        assert_eq!(index.package_of_file(file), None);
        assert_eq!(index.file_count(), 0);

        // Removing twice is a no-op.
        index.remove_file(file);
        assert!(index.is_empty());
    }

    #[test]
    fn test_resolve_enum_value_prefers_current_package() {
        let mut index = SymbolIndex::new();
        index.add_file(
            FileId::new(0),
            Some(SmolStr::new("pkg_b")),
            vec![enum_symbol("pkg_b", "Kind", &["X"], 0)],
        );
        index.add_file(
            FileId::new(1),
            Some(SmolStr::new("pkg_a")),
            vec![enum_symbol("pkg_a", "Sort", &["X"], 1)],
        );

        // pkg_b's enum was indexed first, but pkg_a's own enum wins.
        let (owner, value) = index.resolve_enum_value("X", Some("pkg_a")).unwrap();
        assert_eq!(owner.package, "pkg_a");
        assert_eq!(value.name, "X");

        // Unknown package falls back to the global scan.
        assert!(index.resolve_enum_value("X", Some("elsewhere")).is_some());
        assert_eq!(index.resolve_enum_value("MISSING", None), None);
    }

    #[test]
    fn test_c_name_resolution() {
        let mut index = SymbolIndex::new();
        index.add_file(
            FileId::new(0),
            Some(SmolStr::new("tstiop")),
            vec![symbol("tstiop", "MyStructA", SymbolKind::Struct, 0)],
        );

        for ident in [
            "tstiop__my_struct_a",
            "tstiop__my_struct_a__t",
            "tstiop__my_struct_a__array_t",
        ] {
            assert_eq!(
                index.resolve_c_name(ident).unwrap().qualified_name,
                "tstiop.MyStructA",
                "{ident}"
            );
        }
        assert_eq!(index.resolve_c_name("tstiop__other__t"), None);
    }

    #[test]
    fn test_ctype_override_indexed_and_removed() {
        let mut index = SymbolIndex::new();
        let file = FileId::new(0);
        let mut sym = symbol("foo", "HttpCode", SymbolKind::Typedef, 0);
        sym.ctype = Some(SmolStr::new("http_code__t"));
        index.add_file(file, Some(SmolStr::new("foo")), vec![sym]);

        assert!(index.resolve_c_name("foo__http_code").is_some());
        assert!(index.resolve_c_name("http_code__t").is_some());
        assert!(index.resolve_c_name("http_code").is_some());

        index.remove_file(file);
        assert_eq!(index.resolve_c_name("http_code"), None);
        assert_eq!(index.resolve_c_name("foo__http_code"), None);
    }

    #[test]
    fn test_qualified_collision_last_write_wins() {
        let mut index = SymbolIndex::new();
        index.add_file(
            FileId::new(0),
            Some(SmolStr::new("foo")),
            vec![symbol("foo", "Dup", SymbolKind::Struct, 0)],
        );
        index.add_file(
            FileId::new(1),
            Some(SmolStr::new("foo")),
            vec![symbol("foo", "Dup", SymbolKind::Union, 1)],
        );

        assert_eq!(
            index.by_qualified_name("foo.Dup").unwrap().kind,
            SymbolKind::Union
        );

        // Re-indexing the loser must not evict the winner.
        index.remove_file(FileId::new(0));
        assert_eq!(
            index.by_qualified_name("foo.Dup").unwrap().kind,
            SymbolKind::Union
        );
    }
}
