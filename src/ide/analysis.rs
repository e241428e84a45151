//! The analysis host: the explicitly owned entry point for all editor
//! operations.
//!
//! An [`AnalysisHost`] owns the file registry, the parsed documents, and
//! the [`SymbolIndex`]. Mutation happens only through its `&mut self`
//! operations (open/change/save/remove events and workspace scans), so
//! queries can never observe a half-updated index. There is exactly one
//! host per workspace; constructing it is the replacement for any
//! process-global state.

use std::io;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use tracing::warn;

use crate::base::{FileId, FileSet, LineCol, LineIndex};
use crate::hir::{SymbolIndex, extract_symbols, package_name};
use crate::syntax::{Parse, parse};

use super::goto_definition::{self, Location};
use super::hover;

/// One parsed, indexed document.
#[derive(Debug)]
struct Document {
    parse: Parse,
    line_index: LineIndex,
}

/// Owns the workspace state and answers editor queries.
#[derive(Debug, Default)]
pub struct AnalysisHost {
    files: FileSet,
    documents: FxHashMap<FileId, Document>,
    index: SymbolIndex,
}

impl AnalysisHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a document from in-memory text and re-index it.
    ///
    /// This is the entry point for editor open/change events. The file's
    /// entire previous symbol set is replaced atomically; a document
    /// without a package declaration is logged and contributes no symbols.
    pub fn set_file_text(&mut self, path: &Path, text: &str) -> FileId {
        let file = self.files.file_id(path);
        let parse = parse(text);
        let line_index = LineIndex::new(text);
        let root = parse.syntax();

        match package_name(&root) {
            Some(package) => {
                let symbols = extract_symbols(file, &root, &package, &line_index);
                self.index.add_file(file, Some(package), symbols);
            }
            None => {
                warn!("no package declaration in {}", path.display());
                self.index.add_file(file, None, Vec::new());
            }
        }

        self.documents.insert(file, Document { parse, line_index });
        file
    }

    /// Read a file from disk and (re-)index it.
    ///
    /// This is the entry point for editor save events and workspace scans.
    /// An unreadable file is logged and skipped; its previously indexed
    /// symbols stay untouched.
    pub fn index_file(&mut self, path: &Path) -> io::Result<FileId> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                warn!("cannot read {}: {err}", path.display());
                return Err(err);
            }
        };
        Ok(self.set_file_text(path, &text))
    }

    /// Drop a document and all its symbols.
    pub fn remove_file(&mut self, path: &Path) {
        if let Some(file) = self.files.get(path) {
            self.index.remove_file(file);
            self.documents.remove(&file);
        }
    }

    /// Find the definition referenced at a position.
    pub fn goto_definition(&self, path: &Path, position: LineCol) -> Option<Location> {
        let (file, document) = self.document(path)?;
        let offset = document.line_index.offset(position)?;
        goto_definition::goto_definition(&self.index, &document.parse.syntax(), file, offset)
    }

    /// Build hover markdown for a position.
    pub fn hover(&self, path: &Path, position: LineCol) -> Option<String> {
        let (file, document) = self.document(path)?;
        let offset = document.line_index.offset(position)?;
        hover::hover(&self.index, &document.parse.syntax(), file, offset)
    }

    /// The symbol index, for direct queries.
    pub fn index(&self) -> &SymbolIndex {
        &self.index
    }

    /// Path of a registered file.
    pub fn file_path(&self, file: FileId) -> Option<PathBuf> {
        self.files.path(file)
    }

    /// FileId of a registered path, when known.
    pub fn file_id(&self, path: &Path) -> Option<FileId> {
        self.files.get(path)
    }

    /// The parse of a registered document, syntax errors included.
    pub fn file_parse(&self, path: &Path) -> Option<&Parse> {
        self.document(path).map(|(_, doc)| &doc.parse)
    }

    fn document(&self, path: &Path) -> Option<(FileId, &Document)> {
        let file = self.files.get(path)?;
        let document = self.documents.get(&file)?;
        Some((file, document))
    }
}
